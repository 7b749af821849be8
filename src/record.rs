//! Per-vertex record: live fields plus the step-snapshot fields rule matching reads.

use std::collections::BTreeSet;

use crate::ident::VertexId;
use crate::label::Label;

/// Materialised record for a single vertex in the graph store.
///
/// Invariants:
/// - `parents_count` is never negative (`u32`).
/// - `marked_new` is `true` only during the step in which the vertex was
///   born; it is cleared the next time [`crate::graph::GraphStore::snapshot_all`]
///   runs.
/// - `saved_state`, `saved_degree`, `saved_parents` are written exclusively by
///   `snapshot_all`; rule matching must never read the live fields instead.
#[derive(Clone, Debug)]
pub struct VertexRecord {
    /// Stable identity, assigned once at birth.
    pub id: VertexId,
    /// Current label.
    pub state: Label,
    /// Label observed at the end of the previous step.
    pub prior_state: Label,
    /// Undirected neighbor set, kept symmetric by `GraphStore`.
    pub neighbors: BTreeSet<VertexId>,
    /// Generational depth from the seed.
    pub parents_count: u32,
    /// True only during the step this vertex was born.
    pub marked_new: bool,
    /// Set by `Die`; the vertex is removed at end-of-step.
    pub marked_deleted: bool,
    /// Snapshot field: `state` at the last `snapshot_all`.
    pub saved_state: Label,
    /// Snapshot field: `neighbors.len()` at the last `snapshot_all`.
    pub saved_degree: u32,
    /// Snapshot field: `parents_count` at the last `snapshot_all`.
    pub saved_parents: u32,
    /// Per-vertex cursor used only by the continuable transcription.
    pub rule_cursor: usize,
}

impl VertexRecord {
    /// Constructs a freshly-born vertex record.
    ///
    /// `saved_*` fields start as copies of the live fields so a vertex is
    /// immediately matchable even before the first `snapshot_all` of its
    /// life, rather than left unset.
    pub(crate) fn new(id: VertexId, state: Label, parents_count: u32, marked_new: bool) -> Self {
        Self {
            id,
            saved_state: state.clone(),
            state,
            prior_state: Label::unknown(),
            neighbors: BTreeSet::new(),
            parents_count,
            marked_new,
            marked_deleted: false,
            saved_degree: 0,
            saved_parents: parents_count,
            rule_cursor: 0,
        }
    }

    /// Current degree (live neighbor count).
    #[must_use]
    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }
}
