//! Deterministic graph-state digest, used only as a diagnostic for the
//! determinism harness and tests.
//!
//! Encoding mirrors the workspace's existing snapshot-hash convention:
//! fixed-size fields, explicit little-endian lengths, and ascending-id
//! iteration so the digest is architecture-independent and reproducible.

use blake3::Hasher;

use crate::graph::GraphStore;

/// Computes a BLAKE3 digest over the entire graph: every vertex (ascending
/// id) and its state/prior-state/parents-count/neighbor set (also ascending).
#[must_use]
pub fn graph_digest(store: &GraphStore) -> [u8; 32] {
    let mut hasher = Hasher::new();
    for vertex in store.iter_ascending() {
        hasher.update(&vertex.id.value().to_le_bytes());
        hasher.update(vertex.state.as_str().as_bytes());
        hasher.update(&[0u8]); // field separator
        hasher.update(vertex.prior_state.as_str().as_bytes());
        hasher.update(&[0u8]);
        hasher.update(&u64::from(vertex.parents_count).to_le_bytes());
        hasher.update(&(vertex.neighbors.len() as u64).to_le_bytes());
        for neighbor in &vertex.neighbors {
            hasher.update(&neighbor.value().to_le_bytes());
        }
    }
    hasher.finalize().into()
}
