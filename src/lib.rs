//! guca-core: a deterministic graph unfolding machine.
//!
//! A [`GraphStore`] of labeled vertices connected by undirected edges evolves
//! under a [`RuleTable`]: each [`Engine::step`] snapshots every vertex, then
//! walks ascending ids, matching each against the table and applying at most
//! one [`rule::Operation`] per vertex. Matching reads only the snapshot taken
//! at the start of the step, so the order vertices happen to be visited in
//! never changes the outcome.

mod dispatch;
mod error;
mod graph;
mod ident;
mod label;
mod matcher;
mod nearest;
mod record;
mod rule;
mod selector;

mod digest;
mod engine;

#[cfg(feature = "exchange")]
mod exchange;

#[cfg(feature = "telemetry")]
mod telemetry;

pub mod determinism;

pub use engine::{Engine, EngineConfig, RunSummary};
pub use error::{EngineError, ValidationError};
pub use graph::GraphStore;
pub use ident::VertexId;
pub use label::Label;
pub use matcher::CountCompare;
pub use nearest::TieBreaker;
pub use record::VertexRecord;
pub use rule::{Condition, Operation, OperationKind, Rule};
pub use selector::{RuleTable, Transcription};

#[cfg(feature = "exchange")]
pub use exchange::{load_rule_table, load_substrate, ExchangeError};

#[cfg(feature = "telemetry")]
pub use telemetry::{emit_step, StepEvent};
