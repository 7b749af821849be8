#![allow(missing_docs)]
//! Best-effort structured event emission for step diagnostics
//! (`telemetry` feature).

use serde::Serialize;

use crate::engine::Engine;

#[derive(Serialize)]
struct Event<'a> {
    timestamp_micros: u128,
    step: u64,
    event: &'a str,
    fired: bool,
    vertex_count: usize,
    digest_short: String,
}

fn ts_micros() -> u128 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_micros()
}

fn short_digest(digest: &[u8; 32]) -> String {
    hex::encode(&digest[0..8])
}

/// A single step's diagnostic summary, as emitted by [`emit_step`].
#[derive(Serialize, Debug, Clone)]
pub struct StepEvent {
    /// Step index this event describes.
    pub step: u64,
    /// Whether any rule fired during this step.
    pub fired: bool,
    /// Live vertex count after the step.
    pub vertex_count: usize,
    /// Short hex prefix of the step's state digest.
    pub digest_short: String,
}

/// Emits a single JSON-line event describing the outcome of `engine`'s most
/// recent step to stdout.
///
/// Errors writing to stdout are intentionally ignored; telemetry is
/// best-effort and must never fail a run.
pub fn emit_step(engine: &Engine, fired: bool) -> StepEvent {
    let digest = engine.state_digest();
    let event = Event {
        timestamp_micros: ts_micros(),
        step: engine.steps_run(),
        event: "step",
        fired,
        vertex_count: engine.graph().len(),
        digest_short: short_digest(&digest),
    };
    let _ = serde_json::to_writer(std::io::stdout(), &event);
    let _ = std::io::Write::write_all(&mut std::io::stdout(), b"\n");
    StepEvent {
        step: event.step,
        fired: event.fired,
        vertex_count: event.vertex_count,
        digest_short: event.digest_short,
    }
}
