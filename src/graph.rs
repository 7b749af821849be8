//! Graph store: owns vertices and undirected edges.
//!
//! `snapshot_all` is the step's synchronization barrier: it is
//! the sole writer of the `saved_*` fields, and matching/selection may only
//! read those fields, never the live ones, for the rest of the step.

use std::collections::BTreeSet;

use tracing::trace;

use crate::error::ValidationError;
use crate::ident::{VertexId, VertexIdAllocator};
use crate::label::Label;
use crate::record::VertexRecord;

/// In-memory, deterministically-ordered store for vertices and undirected
/// edges.
///
/// Vertices are kept in a `BTreeMap` and neighbor sets in `BTreeSet`s so that
/// ascending-id iteration, required throughout the engine for determinism,
/// falls directly out of the container rather than requiring an explicit
/// sort at every call site.
#[derive(Default, Clone)]
pub struct GraphStore {
    vertices: std::collections::BTreeMap<VertexId, VertexRecord>,
    allocator: VertexIdAllocator,
}

impl GraphStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of live vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` if the store has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns a shared reference to a vertex, if it exists.
    #[must_use]
    pub fn vertex(&self, id: VertexId) -> Option<&VertexRecord> {
        self.vertices.get(&id)
    }

    /// Returns a mutable reference to a vertex, if it exists.
    pub fn vertex_mut(&mut self, id: VertexId) -> Option<&mut VertexRecord> {
        self.vertices.get_mut(&id)
    }

    /// Returns `true` if a vertex with the given id is currently live.
    #[must_use]
    pub fn contains(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    /// Iterates over all live vertices in ascending id order.
    pub fn iter_ascending(&self) -> impl Iterator<Item = &VertexRecord> {
        self.vertices.values()
    }

    /// Returns the ordered list of live vertex ids at the moment of the call.
    ///
    /// Used by the engine to fix the per-step processing order at snapshot
    /// time, independent of any mutation that happens later in the same
    /// step.
    #[must_use]
    pub fn ordered_ids(&self) -> Vec<VertexId> {
        self.vertices.keys().copied().collect()
    }

    /// Creates a new vertex and returns its id.
    ///
    /// Ids are assigned monotonically and never reused, even across
    /// `remove_vertex` calls.
    pub fn add_vertex(&mut self, state: Label, parents_count: u32, marked_new: bool) -> VertexId {
        let id = self.allocator.alloc();
        self.vertices
            .insert(id, VertexRecord::new(id, state, parents_count, marked_new));
        trace!(vertex = id.value(), marked_new, "vertex born");
        id
    }

    /// Adds an undirected edge between `a` and `b`.
    ///
    /// No-op if either endpoint is missing, `a == b`, or the edge already
    /// exists.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId) {
        if a == b || !self.vertices.contains_key(&a) || !self.vertices.contains_key(&b) {
            return;
        }
        if self.vertices[&a].neighbors.contains(&b) {
            return;
        }
        self.vertices.get_mut(&a).unwrap().neighbors.insert(b);
        self.vertices.get_mut(&b).unwrap().neighbors.insert(a);
    }

    /// Removes the undirected edge between `a` and `b`, if present.
    pub fn remove_edge(&mut self, a: VertexId, b: VertexId) {
        if let Some(v) = self.vertices.get_mut(&a) {
            v.neighbors.remove(&b);
        }
        if let Some(v) = self.vertices.get_mut(&b) {
            v.neighbors.remove(&a);
        }
    }

    /// Removes a vertex and purges it from every remaining neighbor set.
    ///
    /// This is the only place vertex removal happens; callers that want
    /// two-phase deletion should set `marked_deleted` and rely on
    /// [`GraphStore::delete_marked`] instead of calling this directly mid-step.
    pub fn remove_vertex(&mut self, id: VertexId) {
        let Some(record) = self.vertices.remove(&id) else {
            return;
        };
        for neighbor in record.neighbors {
            if let Some(n) = self.vertices.get_mut(&neighbor) {
                n.neighbors.remove(&id);
            }
        }
    }

    /// Snapshots every live vertex: copies `state → saved_state`,
    /// `parents_count → saved_parents`, `|neighbors| → saved_degree`, and
    /// clears `marked_new`.
    ///
    /// This is the sole writer of the `saved_*` fields; it is
    /// the step's memory barrier separating "observe everything" from
    /// "mutate everything".
    pub fn snapshot_all(&mut self) {
        for vertex in self.vertices.values_mut() {
            vertex.saved_state = vertex.state.clone();
            vertex.saved_parents = vertex.parents_count;
            vertex.saved_degree = vertex.neighbors.len() as u32;
            vertex.marked_new = false;
        }
    }

    /// Removes every vertex whose `marked_deleted` flag is set, along with
    /// their incident edges.
    ///
    /// The only place vertex removal occurs as a result of `Die`.
    pub fn delete_marked(&mut self) {
        let dead: Vec<VertexId> = self
            .vertices
            .iter()
            .filter(|(_, v)| v.marked_deleted)
            .map(|(id, _)| *id)
            .collect();
        for id in dead {
            self.remove_vertex(id);
        }
    }

    /// Validates that `edges` reference only ids present in this store and
    /// contain no self-loops, then adds them.
    ///
    /// # Errors
    /// Returns [`ValidationError::MissingVertex`] or
    /// [`ValidationError::SelfLoop`] before mutating the store if any edge is
    /// invalid.
    pub fn add_edges_validated(
        &mut self,
        edges: impl IntoIterator<Item = (VertexId, VertexId)>,
    ) -> Result<(), ValidationError> {
        let edges: Vec<(VertexId, VertexId)> = edges.into_iter().collect();
        for &(a, b) in &edges {
            if a == b {
                return Err(ValidationError::SelfLoop(a));
            }
            if !self.contains(a) {
                return Err(ValidationError::MissingVertex(a));
            }
            if !self.contains(b) {
                return Err(ValidationError::MissingVertex(b));
            }
        }
        for (a, b) in edges {
            self.add_edge(a, b);
        }
        Ok(())
    }

    /// Returns the set of all distinct neighbors reachable through exactly
    /// one edge from `id`, or an empty set if `id` is missing.
    #[must_use]
    pub fn neighbors(&self, id: VertexId) -> BTreeSet<VertexId> {
        self.vertices
            .get(&id)
            .map(|v| v.neighbors.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lbl(s: &str) -> Label {
        Label::from(s)
    }

    #[test]
    fn add_edge_rejects_self_loop_and_missing_endpoints() {
        let mut g = GraphStore::new();
        let a = g.add_vertex(lbl("A"), 0, false);
        g.add_edge(a, a);
        assert!(g.neighbors(a).is_empty());

        let ghost = VertexId(999);
        g.add_edge(a, ghost);
        assert!(g.neighbors(a).is_empty());
    }

    #[test]
    fn add_edge_is_symmetric_and_deduplicated() {
        let mut g = GraphStore::new();
        let a = g.add_vertex(lbl("A"), 0, false);
        let b = g.add_vertex(lbl("A"), 0, false);
        g.add_edge(a, b);
        g.add_edge(b, a);
        assert_eq!(g.neighbors(a).len(), 1);
        assert_eq!(g.neighbors(b).len(), 1);
        assert!(g.neighbors(a).contains(&b));
        assert!(g.neighbors(b).contains(&a));
    }

    #[test]
    fn remove_vertex_purges_incident_edges() {
        let mut g = GraphStore::new();
        let a = g.add_vertex(lbl("A"), 0, false);
        let b = g.add_vertex(lbl("A"), 0, false);
        g.add_edge(a, b);
        g.remove_vertex(a);
        assert!(!g.contains(a));
        assert!(g.neighbors(b).is_empty());
    }

    #[test]
    fn snapshot_all_clears_marked_new_and_copies_fields() {
        let mut g = GraphStore::new();
        let a = g.add_vertex(lbl("A"), 2, true);
        let b = g.add_vertex(lbl("B"), 0, false);
        g.add_edge(a, b);
        g.snapshot_all();
        let rec = g.vertex(a).unwrap();
        assert!(!rec.marked_new);
        assert_eq!(rec.saved_state.as_str(), "A");
        assert_eq!(rec.saved_parents, 2);
        assert_eq!(rec.saved_degree, 1);
    }

    #[test]
    fn delete_marked_removes_only_flagged_vertices() {
        let mut g = GraphStore::new();
        let a = g.add_vertex(lbl("A"), 0, false);
        let b = g.add_vertex(lbl("A"), 0, false);
        g.vertex_mut(a).unwrap().marked_deleted = true;
        g.delete_marked();
        assert!(!g.contains(a));
        assert!(g.contains(b));
    }

    #[test]
    fn ids_never_reused_after_removal() {
        let mut g = GraphStore::new();
        let a = g.add_vertex(lbl("A"), 0, false);
        g.remove_vertex(a);
        let b = g.add_vertex(lbl("A"), 0, false);
        assert_ne!(a, b);
        assert_eq!(b.value(), 1);
    }
}
