// SPDX-License-Identifier: Apache-2.0 OR MIND-UCAL-1.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]

use guca_core::{
    Condition, Engine, EngineConfig, GraphStore, Label, Operation, OperationKind, Rule, RuleTable,
    TieBreaker, Transcription,
};

#[test]
fn nearest_search_picks_lowest_id_at_first_nonempty_depth() {
    // Path graph 1-2-3-4-5 (0-indexed internally); the middle vertex is "X",
    // the rest are "A". Searching from the middle at depth 2 must skip its
    // direct neighbors (already adjacent) and connect to one of the two
    // depth-2 "A" vertices, breaking the tie by lowest id.
    let mut graph = GraphStore::new();
    let ids: Vec<_> = (0..5)
        .map(|_| graph.add_vertex(Label::from("A"), 0, false))
        .collect();
    for w in ids.windows(2) {
        graph.add_edge(w[0], w[1]);
    }
    graph.vertex_mut(ids[2]).unwrap().state = Label::from("X");

    let rules = RuleTable::new(
        vec![Rule::new(
            Condition::on_current("X"),
            Operation::with_operand(OperationKind::TryToConnectWithNearest, "A"),
        )],
        Transcription::Resettable,
    );
    let config = EngineConfig {
        nearest_max_depth: 2,
        nearest_tie_breaker: TieBreaker::Stable,
        max_steps: 1,
        ..EngineConfig::default()
    };
    let mut engine = Engine::new(graph, rules, config);
    engine.step();

    let neighbors = engine.graph().neighbors(ids[2]);
    // Original path neighbors plus the newly connected depth-2 tie-winner.
    assert!(neighbors.contains(&ids[1]));
    assert!(neighbors.contains(&ids[3]));
    assert!(neighbors.contains(&ids[0]));
    assert!(!neighbors.contains(&ids[4]));
}
