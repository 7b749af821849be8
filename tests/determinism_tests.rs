// SPDX-License-Identifier: Apache-2.0 OR MIND-UCAL-1.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]

use guca_core::determinism::run_pair_determinism;
use guca_core::{
    Condition, EngineConfig, GraphStore, Label, Operation, OperationKind, Rule, RuleTable,
    TieBreaker, Transcription,
};

fn divide_and_seek_rules() -> RuleTable {
    RuleTable::new(
        vec![
            Rule::new(
                Condition::on_current("A"),
                Operation::with_operand(OperationKind::GiveBirthConnected, "A"),
            ),
            Rule::new(
                Condition::on_current("A"),
                Operation::with_operand(OperationKind::TryToConnectWithNearest, "A"),
            ),
        ],
        Transcription::Continuable,
    )
}

#[test]
fn two_engines_from_equal_inputs_stay_bit_identical() {
    let config = EngineConfig {
        start_state: Label::from("A"),
        max_vertices: 10,
        max_steps: 20,
        nearest_tie_breaker: TieBreaker::Random,
        rng_seed: Some(42),
        ..EngineConfig::default()
    };

    let result = run_pair_determinism(
        "left",
        "right",
        GraphStore::new(),
        GraphStore::new(),
        divide_and_seek_rules(),
        divide_and_seek_rules(),
        config,
        6,
    );

    assert!(result.is_ok(), "engines diverged: {result:?}");
}
