//! Rule matching against per-vertex snapshot fields.

use crate::record::VertexRecord;
use crate::rule::Rule;

/// Numeric predicate interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountCompare {
    /// Two-sided bound check: `(ge < 0 || val >= ge) && (le < 0 || val <= le)`.
    #[default]
    Range,
    /// Equality-on-lower-bound: if `ge >= 0`, require `val == ge` and ignore
    /// `le` entirely.
    Exact,
}

/// Evaluates the numeric predicate `match_int(val, ge, le, mode)`.
#[must_use]
pub fn match_int(val: i64, ge: i64, le: i64, mode: CountCompare) -> bool {
    if ge < 0 && le < 0 {
        return true;
    }
    if mode == CountCompare::Exact && ge >= 0 {
        return val == ge;
    }
    if ge >= 0 && val < ge {
        return false;
    }
    if le >= 0 && val > le {
        return false;
    }
    true
}

/// Evaluates whether `rule` matches the given vertex's snapshot fields.
///
/// Reads only `saved_state`, `prior_state`, `saved_degree`, and
/// `saved_parents` — never live fields — so that mutations earlier in the
/// step can't influence a match decision later in the same step.
#[must_use]
pub fn matches(vertex: &VertexRecord, rule: &Rule, cmp_mode: CountCompare) -> bool {
    if !rule.is_enabled {
        return false;
    }
    let c = &rule.condition;
    if c.current != vertex.saved_state {
        return false;
    }
    if !c.prior.is_wildcard() && c.prior != vertex.prior_state {
        return false;
    }
    if !match_int(
        i64::from(vertex.saved_degree),
        c.conn_ge,
        c.conn_le,
        cmp_mode,
    ) {
        return false;
    }
    if !match_int(
        i64::from(vertex.saved_parents),
        c.parents_ge,
        c.parents_le,
        cmp_mode,
    ) {
        return false;
    }
    true
}
