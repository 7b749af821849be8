//! Operation dispatcher.
//!
//! Visibility discipline: vertices born this step (`marked_new`) are
//! outputs, not inputs, of the step and are invisible to structural search;
//! vertices condemned this step (`marked_deleted`) gain no new edges.

use rand_chacha::ChaCha8Rng;
use tracing::trace;

use crate::graph::GraphStore;
use crate::ident::VertexId;
use crate::nearest::{self, NearestConfig, TieBreaker};
use crate::rule::{Operation, OperationKind};

/// Engine-level nearest-neighbor configuration threaded through to
/// [`apply`] whenever a rule's operation is `TryToConnectWithNearest`.
#[derive(Debug, Clone)]
pub struct NearestSettings {
    /// Depth limit for the bounded BFS.
    pub max_depth: u32,
    /// Tie-break rule.
    pub tie_breaker: TieBreaker,
    /// Whether to connect to every vertex in the found set.
    pub connect_all: bool,
}

/// Applies `operation`, acting on behalf of `actor`, to `store`.
///
/// Every operation except `Die` requires a present operand; a missing
/// operand is a silent no-op.
pub fn apply(
    store: &mut GraphStore,
    actor: VertexId,
    operation: &Operation,
    nearest: &NearestSettings,
    max_vertices: u32,
    rng: Option<&mut ChaCha8Rng>,
) {
    match operation.kind {
        OperationKind::TurnToState => {
            let Some(label) = &operation.operand else {
                return;
            };
            if let Some(v) = store.vertex_mut(actor) {
                v.state = label.clone();
            }
        }
        OperationKind::GiveBirth => {
            let Some(label) = &operation.operand else {
                return;
            };
            give_birth(store, actor, label.clone(), max_vertices, false);
        }
        OperationKind::GiveBirthConnected => {
            let Some(label) = &operation.operand else {
                return;
            };
            give_birth(store, actor, label.clone(), max_vertices, true);
        }
        OperationKind::TryToConnectWith => {
            let Some(label) = &operation.operand else {
                return;
            };
            try_connect_with(store, actor, label);
        }
        OperationKind::TryToConnectWithNearest => {
            let config = NearestConfig {
                max_depth: nearest.max_depth,
                required_label: operation.operand.clone(),
                connect_all: nearest.connect_all,
                tie_breaker: nearest.tie_breaker,
            };
            let found = nearest::search(store, actor, &config);
            if config.connect_all {
                for candidate in found {
                    store.add_edge(actor, candidate);
                }
            } else if let Some(candidate) = nearest::select_one(&found, config.tie_breaker, rng) {
                store.add_edge(actor, candidate);
            }
        }
        OperationKind::DisconnectFrom => {
            let Some(label) = &operation.operand else {
                return;
            };
            disconnect_from(store, actor, label);
        }
        OperationKind::Die => {
            if let Some(v) = store.vertex_mut(actor) {
                v.marked_deleted = true;
                trace!(vertex = actor.value(), "vertex marked for death");
            }
        }
    }
}

fn give_birth(
    store: &mut GraphStore,
    actor: VertexId,
    label: crate::label::Label,
    max_vertices: u32,
    connect: bool,
) {
    if max_vertices != 0 && store.len() as u32 >= max_vertices {
        return;
    }
    let Some(parents_count) = store.vertex(actor).map(|v| v.parents_count) else {
        return;
    };
    let child = store.add_vertex(label, parents_count + 1, true);
    if connect {
        store.add_edge(actor, child);
    }
}

fn try_connect_with(store: &mut GraphStore, actor: VertexId, label: &crate::label::Label) {
    let candidates: Vec<VertexId> = store
        .iter_ascending()
        .filter(|w| {
            w.id != actor && !w.marked_new && !w.marked_deleted && &w.saved_state == label
        })
        .map(|w| w.id)
        .collect();
    for candidate in candidates {
        if !store.neighbors(actor).contains(&candidate) {
            store.add_edge(actor, candidate);
        }
    }
}

fn disconnect_from(store: &mut GraphStore, actor: VertexId, label: &crate::label::Label) {
    let Some(actor_record) = store.vertex(actor) else {
        return;
    };
    if actor_record.marked_deleted {
        return;
    }
    let neighbors: Vec<VertexId> = actor_record.neighbors.iter().copied().collect();
    for neighbor in neighbors {
        let Some(n) = store.vertex(neighbor) else {
            continue;
        };
        if !n.marked_new && &n.saved_state == label {
            store.remove_edge(actor, neighbor);
        }
    }
}
