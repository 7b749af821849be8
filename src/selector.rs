//! Rule table traversal: resettable vs. continuable selection.

use crate::matcher::{matches, CountCompare};
use crate::record::VertexRecord;
use crate::rule::Rule;

/// Rule-table scan discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transcription {
    /// Always scan rules from index 0; return the first match.
    #[default]
    Resettable,
    /// Per-vertex rotating cursor: start at `rule_cursor`, wrap around once.
    Continuable,
}

/// Ordered rule list plus the traversal discipline used to scan it.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
    transcription: Transcription,
}

impl RuleTable {
    /// Constructs a rule table with the given traversal discipline.
    #[must_use]
    pub fn new(rules: Vec<Rule>, transcription: Transcription) -> Self {
        Self {
            rules,
            transcription,
        }
    }

    /// Returns the number of rules in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the table has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Borrows the rule at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    /// Borrows the rule at `index` mutably, if present.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Rule> {
        self.rules.get_mut(index)
    }

    /// Appends a rule to the end of the table.
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Finds the first rule matching `vertex`, starting from the position the
    /// current transcription discipline dictates.
    ///
    /// Returns the matching rule's index, or `None` if no rule matches.
    /// `rule_cursor` is left untouched on a miss; callers apply the returned
    /// rule and then call [`RuleTable::advance_cursor`] themselves so that
    /// the cursor only moves once the operation has actually been applied.
    #[must_use]
    pub fn select(&self, vertex: &VertexRecord, cmp_mode: CountCompare) -> Option<usize> {
        let start = match self.transcription {
            Transcription::Resettable => 0,
            Transcription::Continuable => vertex.rule_cursor.min(self.rules.len()),
        };

        if let Some(i) = self.scan(start, self.rules.len(), vertex, cmp_mode) {
            return Some(i);
        }
        if self.transcription == Transcription::Continuable && start > 0 {
            return self.scan(0, start, vertex, cmp_mode);
        }
        None
    }

    fn scan(
        &self,
        lo: usize,
        hi: usize,
        vertex: &VertexRecord,
        cmp_mode: CountCompare,
    ) -> Option<usize> {
        self.rules[lo..hi]
            .iter()
            .position(|rule| matches(vertex, rule, cmp_mode))
            .map(|offset| lo + offset)
    }

    /// Advances the continuable cursor for a vertex that just fired the rule
    /// at `matched_index`. A no-op under the resettable discipline.
    ///
    /// Preserves the source's `% max(1, |rules|)` behavior verbatim, which
    /// means the cursor divides by 1 (i.e. always resets to 0) when the
    /// table is empty — an intentional edge case, not a bug.
    pub fn advance_cursor(&self, vertex: &mut VertexRecord, matched_index: usize) {
        if self.transcription != Transcription::Continuable {
            return;
        }
        let modulus = self.rules.len().max(1);
        vertex.rule_cursor = (matched_index + 1) % modulus;
    }
}
