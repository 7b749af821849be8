//! Opaque vertex/operand state labels.

use std::fmt;
use std::sync::Arc;

/// An opaque label drawn from a finite, caller-defined domain.
///
/// Backed by `Arc<str>` rather than `String` so that passing a vertex's
/// current state into a condition check, a rule operand, or a freshly-born
/// vertex never requires an allocation — labels are cloned far more often
/// than they are constructed.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Label(Arc<str>);

impl Label {
    /// The sentinel prior-state label observed before a vertex has completed
    /// its first step; `prior_state` starts out `Unknown` for every vertex.
    pub fn unknown() -> Self {
        Label(Arc::from("Unknown"))
    }

    /// The wildcard condition value that matches any prior state.
    pub fn any() -> Self {
        Label(Arc::from("any"))
    }

    /// Returns `true` if this label is the `"any"` wildcard.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        &*self.0 == "any"
    }

    /// Borrows the label as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label(Arc::from(s))
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Label(Arc::from(s.as_str()))
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Label({:?})", self.0)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
