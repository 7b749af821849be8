// SPDX-License-Identifier: Apache-2.0 OR MIND-UCAL-1.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]

use guca_core::{
    Condition, Engine, EngineConfig, GraphStore, Label, Operation, OperationKind, Rule, RuleTable,
    Transcription,
};

#[test]
fn single_cell_divides_into_a_chain_until_capped() {
    let rules = RuleTable::new(
        vec![Rule::new(
            Condition::on_current("A"),
            Operation::with_operand(OperationKind::GiveBirthConnected, "A"),
        )],
        Transcription::Resettable,
    );
    let config = EngineConfig {
        start_state: Label::from("A"),
        max_vertices: 5,
        max_steps: 20,
        ..EngineConfig::default()
    };
    let mut engine = Engine::new(GraphStore::new(), rules, config);

    engine.step();
    assert_eq!(engine.graph().len(), 2);
    engine.step();
    assert_eq!(engine.graph().len(), 4);
    engine.step();
    // Cap is 5; only one of the four cells gets to divide this step.
    assert_eq!(engine.graph().len(), 5);
    engine.step();
    assert_eq!(engine.graph().len(), 5);
}
