//! Rule table types: conditions, operations, and rules.

use crate::label::Label;

/// The seven structural/labeling operations a rule may apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// Change the acting vertex's state; no structural change.
    TurnToState,
    /// Connect to every other eligible vertex with a given label.
    TryToConnectWith,
    /// Connect to the nearest eligible vertex with a given label.
    TryToConnectWithNearest,
    /// Spawn a new, unconnected vertex.
    GiveBirth,
    /// Spawn a new vertex and connect to it.
    GiveBirthConnected,
    /// Remove the edge to every eligible neighbor with a given label.
    DisconnectFrom,
    /// Mark the acting vertex for end-of-step removal.
    Die,
}

impl OperationKind {
    /// Parses the operation kind from its exchange-format name.
    ///
    /// # Errors
    /// Returns the original string if it names none of the seven kinds.
    pub fn parse(name: &str) -> Result<Self, &str> {
        Ok(match name {
            "TurnToState" => Self::TurnToState,
            "TryToConnectWith" => Self::TryToConnectWith,
            "TryToConnectWithNearest" => Self::TryToConnectWithNearest,
            "GiveBirth" => Self::GiveBirth,
            "GiveBirthConnected" => Self::GiveBirthConnected,
            "DisconnectFrom" => Self::DisconnectFrom,
            "Die" => Self::Die,
            other => return Err(other),
        })
    }
}

/// An operation: its kind plus an optional operand label.
///
/// Every kind except `Die` is meaningful only with an operand; a missing
/// operand makes the operation a silent no-op, not an
/// error.
#[derive(Debug, Clone)]
pub struct Operation {
    /// Which of the seven operations to apply.
    pub kind: OperationKind,
    /// Operand label, when the operation kind requires one.
    pub operand: Option<Label>,
}

impl Operation {
    /// Constructs an operation with no operand (only meaningful for `Die`,
    /// or to deliberately make any other kind a no-op).
    #[must_use]
    pub fn new(kind: OperationKind) -> Self {
        Self {
            kind,
            operand: None,
        }
    }

    /// Constructs an operation with an operand label.
    #[must_use]
    pub fn with_operand(kind: OperationKind, operand: impl Into<Label>) -> Self {
        Self {
            kind,
            operand: Some(operand.into()),
        }
    }
}

/// A vertex-local condition evaluated against snapshot fields only.
///
/// A negative bound (`ge`/`le` fields) means "unconstrained on this side".
#[derive(Debug, Clone)]
pub struct Condition {
    /// Required current label.
    pub current: Label,
    /// Required prior label, or [`Label::any`] to ignore.
    pub prior: Label,
    /// Lower degree bound (`< 0` = unconstrained).
    pub conn_ge: i64,
    /// Upper degree bound (`< 0` = unconstrained).
    pub conn_le: i64,
    /// Lower parents-count bound (`< 0` = unconstrained).
    pub parents_ge: i64,
    /// Upper parents-count bound (`< 0` = unconstrained).
    pub parents_le: i64,
}

impl Condition {
    /// Constructs a condition that only checks `current`, with every other
    /// field unconstrained.
    #[must_use]
    pub fn on_current(current: impl Into<Label>) -> Self {
        Self {
            current: current.into(),
            prior: Label::any(),
            conn_ge: -1,
            conn_le: -1,
            parents_ge: -1,
            parents_le: -1,
        }
    }
}

/// A single rule: a condition, an operation, an enabled flag, and
/// diagnostic-only activity counters.
///
/// The activity counters (`is_active`, `was_active`, `last_activation_index`)
/// never influence matching or selection; they exist for downstream
/// analytics/UI.
#[derive(Debug, Clone)]
pub struct Rule {
    /// The condition gating this rule.
    pub condition: Condition,
    /// The operation applied when the condition matches.
    pub operation: Operation,
    /// Whether this rule may match at all; `false` means never matches,
    /// regardless of condition.
    pub is_enabled: bool,
    /// Set to `true` the step this rule fires; diagnostic only.
    pub is_active: bool,
    /// Set to `true` the first time this rule ever fires and never cleared;
    /// diagnostic only.
    pub was_active: bool,
    /// Incremented by 1 from a base of 0 each time this rule fires;
    /// diagnostic only. `-1` before the rule has ever fired.
    pub last_activation_index: i64,
}

impl Rule {
    /// Constructs a new, enabled rule with its activity counters at rest.
    #[must_use]
    pub fn new(condition: Condition, operation: Operation) -> Self {
        Self {
            condition,
            operation,
            is_enabled: true,
            is_active: false,
            was_active: false,
            last_activation_index: -1,
        }
    }

    /// Records that this rule fired this step.
    pub(crate) fn record_activation(&mut self) {
        self.is_active = true;
        self.was_active = true;
        self.last_activation_index = if self.last_activation_index >= 0 {
            self.last_activation_index + 1
        } else {
            0
        };
    }
}
