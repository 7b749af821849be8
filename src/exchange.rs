//! Rule-table and substrate exchange formats.
//!
//! Rule tables are a JSON document keyed by gene name, with only one gene's
//! rule list loaded into an engine at a time. Substrates are a flat 1-based
//! node array plus 1-based edge pairs; `"-"` marks a position with no vertex.

use std::collections::HashMap;

use serde::Deserialize;

use crate::graph::GraphStore;
use crate::ident::VertexId;
use crate::label::Label;
use crate::matcher::CountCompare;
use crate::rule::{Condition, Operation, OperationKind, Rule};
use crate::selector::{RuleTable, Transcription};

/// Failure loading a rule table or substrate document.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    /// The JSON document could not be parsed at all.
    #[error("malformed exchange document: {0}")]
    Json(#[from] serde_json::Error),
    /// The requested gene name is not present in the document.
    #[error("unknown gene: {0}")]
    UnknownGene(String),
    /// An operation's `kind` field did not name one of the seven operations.
    #[error("unknown operation kind: {0}")]
    UnknownOperationKind(String),
    /// An edge referenced a 1-based node position outside the substrate.
    #[error("edge references out-of-range node position {0}")]
    NodeOutOfRange(usize),
    /// An edge referenced a `"-"` (no-vertex) node position.
    #[error("edge references empty node position {0}")]
    EdgeToEmptySlot(usize),
    /// An edge connected a node position to itself.
    #[error("self-loop at node position {0}")]
    SelfLoop(usize),
}

#[derive(Debug, Deserialize)]
struct RuleTableDocument {
    genes: HashMap<String, Vec<GeneEntry>>,
}

#[derive(Debug, Deserialize)]
struct GeneEntry {
    condition: ConditionDocument,
    operation: OperationDocument,
}

#[derive(Debug, Deserialize)]
struct ConditionDocument {
    #[serde(rename = "currentState")]
    current_state: String,
    #[serde(rename = "priorState")]
    prior_state: String,
    #[serde(rename = "allConnectionsCount_GE")]
    all_connections_count_ge: i64,
    #[serde(rename = "allConnectionsCount_LE")]
    all_connections_count_le: i64,
    #[serde(rename = "parentsCount_GE")]
    parents_count_ge: i64,
    #[serde(rename = "parentsCount_LE")]
    parents_count_le: i64,
}

#[derive(Debug, Deserialize)]
struct OperationDocument {
    kind: String,
    #[serde(rename = "operandNodeState")]
    operand_node_state: Option<String>,
}

/// Loads the rule list for `gene_name` out of a rule-table exchange document
/// and builds a [`RuleTable`] with the given traversal discipline.
///
/// # Errors
/// Returns [`ExchangeError::Json`] if `json` doesn't parse, or
/// [`ExchangeError::UnknownGene`]/[`ExchangeError::UnknownOperationKind`] if
/// `gene_name` is absent or one of its operations names an unrecognized
/// kind.
pub fn load_rule_table(
    json: &str,
    gene_name: &str,
    transcription: Transcription,
) -> Result<RuleTable, ExchangeError> {
    let doc: RuleTableDocument = serde_json::from_str(json)?;
    let entries = doc
        .genes
        .get(gene_name)
        .ok_or_else(|| ExchangeError::UnknownGene(gene_name.to_string()))?;

    let mut rules = Vec::with_capacity(entries.len());
    for entry in entries {
        let condition = Condition {
            current: Label::from(entry.condition.current_state.as_str()),
            prior: Label::from(entry.condition.prior_state.as_str()),
            conn_ge: entry.condition.all_connections_count_ge,
            conn_le: entry.condition.all_connections_count_le,
            parents_ge: entry.condition.parents_count_ge,
            parents_le: entry.condition.parents_count_le,
        };
        let kind = OperationKind::parse(&entry.operation.kind)
            .map_err(|s| ExchangeError::UnknownOperationKind(s.to_string()))?;
        let operation = match &entry.operation.operand_node_state {
            Some(operand) => Operation::with_operand(kind, operand.as_str()),
            None => Operation::new(kind),
        };
        rules.push(Rule::new(condition, operation));
    }
    Ok(RuleTable::new(rules, transcription))
}

#[derive(Debug, Deserialize)]
struct SubstrateDocument {
    nodes: Vec<String>,
    edges: Vec<(usize, usize)>,
}

/// Loads a substrate document into a fresh [`GraphStore`], converting
/// 1-based node positions to the store's own `VertexId` space. Positions
/// marked `"-"` are skipped: no vertex is created for them, and any edge
/// referencing one is an error rather than a silent drop.
///
/// # Errors
/// Returns [`ExchangeError::Json`] if `json` doesn't parse, or one of the
/// edge-shape errors if an edge references an out-of-range, empty, or
/// self-identical position.
pub fn load_substrate(json: &str) -> Result<GraphStore, ExchangeError> {
    let doc: SubstrateDocument = serde_json::from_str(json)?;
    let mut store = GraphStore::new();
    let mut ids: Vec<Option<VertexId>> = Vec::with_capacity(doc.nodes.len());
    for state in &doc.nodes {
        if state == "-" {
            ids.push(None);
        } else {
            ids.push(Some(store.add_vertex(Label::from(state.as_str()), 0, false)));
        }
    }

    for (a, b) in doc.edges {
        if a == b {
            return Err(ExchangeError::SelfLoop(a));
        }
        let resolve = |pos: usize| -> Result<VertexId, ExchangeError> {
            let slot = ids
                .get(pos.checked_sub(1).ok_or(ExchangeError::NodeOutOfRange(pos))?)
                .ok_or(ExchangeError::NodeOutOfRange(pos))?;
            slot.ok_or(ExchangeError::EdgeToEmptySlot(pos))
        };
        let va = resolve(a)?;
        let vb = resolve(b)?;
        store.add_edge(va, vb);
    }

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULE_TABLE_JSON: &str = r#"{
        "genes": {
            "divide": [
                {
                    "condition": {
                        "currentState": "A",
                        "priorState": "any",
                        "allConnectionsCount_GE": -1,
                        "allConnectionsCount_LE": -1,
                        "parentsCount_GE": -1,
                        "parentsCount_LE": -1
                    },
                    "operation": {
                        "kind": "GiveBirthConnected",
                        "operandNodeState": "A"
                    }
                }
            ]
        }
    }"#;

    #[test]
    fn loads_named_gene_rule_list() {
        let table = load_rule_table(RULE_TABLE_JSON, "divide", Transcription::Resettable).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.get(0).unwrap().operation.kind,
            OperationKind::GiveBirthConnected
        );
    }

    #[test]
    fn unknown_gene_is_an_error() {
        let result = load_rule_table(RULE_TABLE_JSON, "missing", Transcription::Resettable);
        assert!(matches!(result, Err(ExchangeError::UnknownGene(_))));
    }

    #[test]
    fn loads_substrate_skipping_hole_slots() {
        let json = r#"{"nodes": ["A", "-", "A"], "edges": [[1, 3]]}"#;
        let store = load_substrate(json).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn edge_to_hole_slot_is_an_error() {
        let json = r#"{"nodes": ["A", "-", "A"], "edges": [[1, 2]]}"#;
        let result = load_substrate(json);
        assert!(matches!(result, Err(ExchangeError::EdgeToEmptySlot(2))));
    }
}
