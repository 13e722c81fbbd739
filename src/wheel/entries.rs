//! Roster management: the active entry list, the drawn set, and the draw
//! history.
//!
//! Entries are trimmed, non-empty, and unique (case-sensitive). The drawn
//! set is a most-recent-first subset of the entry list; the history is a
//! most-recent-first log of every completed draw and may contain repeats.

use crate::error::WheelError;

/// Result of one add operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOutcome {
    /// Names appended to the list.
    pub added: usize,
    /// Tokens skipped because the name was already present.
    pub duplicates: usize,
}

/// Active entry list plus draw bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: Vec<String>,
    drawn: Vec<String>,
    history: Vec<String>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split raw input on whitespace and commas, trim each token, drop
    /// empties, and append the names not already present, in encounter
    /// order. Duplicates within the batch count once as added and the rest
    /// as duplicates. A fresh batch invalidates the draw history but leaves
    /// the drawn set alone: names already drawn stay drawn.
    pub fn add(&mut self, raw: &str) -> Result<AddOutcome, WheelError> {
        let tokens: Vec<&str> = raw
            .split(|c: char| c.is_whitespace() || c == ',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();

        if tokens.is_empty() {
            return Err(WheelError::validation("no names found in input"));
        }

        self.history.clear();

        let mut outcome = AddOutcome {
            added: 0,
            duplicates: 0,
        };
        for token in tokens {
            if self.entries.iter().any(|e| e == token) {
                outcome.duplicates += 1;
            } else {
                self.entries.push(token.to_string());
                outcome.added += 1;
            }
        }

        tracing::debug!(
            added = outcome.added,
            duplicates = outcome.duplicates,
            total = self.entries.len(),
            "added names to roster"
        );
        Ok(outcome)
    }

    /// Remove the entry at `index`. Out of range is a no-op. The name is
    /// also dropped from the drawn set so the drawn set stays a subset of
    /// the entry list.
    pub fn remove(&mut self, index: usize) {
        if index >= self.entries.len() {
            return;
        }
        let name = self.entries.remove(index);
        self.drawn.retain(|d| d != &name);
    }

    /// Empty the list. Drawn set and history go with it; the drawn set
    /// cannot outlive the entries it marks, and the history describes a
    /// list that no longer exists.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.drawn.clear();
        self.history.clear();
    }

    /// Replace the whole list (used when loading a saved class). Starts a
    /// fresh draw: drawn set and history are reset.
    pub fn replace(&mut self, entries: Vec<String>) {
        self.entries = entries;
        self.drawn.clear();
        self.history.clear();
    }

    /// Record a completed draw: history always gets the name (front),
    /// the drawn set only if it is not already there.
    pub fn commit_draw(&mut self, name: &str) {
        self.history.insert(0, name.to_string());
        if !self.drawn.iter().any(|d| d == name) {
            self.drawn.insert(0, name.to_string());
        }
    }

    /// Entries eligible for selection, in list order. With `no_repeat` the
    /// drawn ones are excluded; without it the whole list is eligible.
    pub fn available(&self, no_repeat: bool) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| !no_repeat || !self.is_drawn(e))
            .map(String::as_str)
            .collect()
    }

    pub fn is_drawn(&self, name: &str) -> bool {
        self.drawn.iter().any(|d| d == name)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn drawn(&self) -> &[String] {
        &self.drawn
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rebuild from persisted parts, trimming every string and dropping
    /// empties. Drawn names that no longer appear in the entry list are
    /// discarded.
    pub fn from_parts(entries: Vec<String>, drawn: Vec<String>, history: Vec<String>) -> Self {
        let clean = |v: Vec<String>| -> Vec<String> {
            v.into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        };
        let entries = clean(entries);
        let drawn = clean(drawn)
            .into_iter()
            .filter(|d| entries.iter().any(|e| e == d))
            .collect();
        Self {
            entries,
            drawn,
            history: clean(history),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_splits_on_whitespace_commas_and_newlines() {
        let mut roster = Roster::new();
        let outcome = roster.add("Alice Bob,Clara\nDavid\r\n  Erik  ").unwrap();
        assert_eq!(outcome.added, 5);
        assert_eq!(outcome.duplicates, 0);
        assert_eq!(
            roster.entries(),
            &["Alice", "Bob", "Clara", "David", "Erik"]
        );
    }

    #[test]
    fn test_add_counts_duplicates_and_keeps_list_unchanged() {
        let mut roster = Roster::new();
        roster.add("Alice Bob").unwrap();
        let outcome = roster.add("Bob Clara Bob").unwrap();
        // First "Bob" already present; second batch "Bob" hits the freshly
        // unchanged list then the batch itself.
        assert_eq!(outcome.added, 1);
        assert_eq!(outcome.duplicates, 2);
        assert_eq!(roster.entries(), &["Alice", "Bob", "Clara"]);
    }

    #[test]
    fn test_add_rejects_blank_input() {
        let mut roster = Roster::new();
        let err = roster.add("  , \n ,, ").unwrap_err();
        assert!(matches!(err, WheelError::Validation(_)));
        assert!(roster.is_empty());
    }

    #[test]
    fn test_add_clears_history_but_not_drawn() {
        let mut roster = Roster::new();
        roster.add("Alice Bob").unwrap();
        roster.commit_draw("Alice");
        assert_eq!(roster.history(), &["Alice"]);

        roster.add("Clara").unwrap();
        assert!(roster.history().is_empty());
        assert!(roster.is_drawn("Alice"));
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut roster = Roster::new();
        roster.add("Alice").unwrap();
        roster.remove(5);
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_remove_drops_name_from_drawn_set() {
        let mut roster = Roster::new();
        roster.add("Alice Bob").unwrap();
        roster.commit_draw("Alice");
        roster.remove(0);
        assert_eq!(roster.entries(), &["Bob"]);
        assert!(!roster.is_drawn("Alice"));
    }

    #[test]
    fn test_commit_draw_history_repeats_drawn_does_not() {
        let mut roster = Roster::new();
        roster.add("Alice Bob").unwrap();
        roster.commit_draw("Bob");
        roster.commit_draw("Bob");
        assert_eq!(roster.history(), &["Bob", "Bob"]);
        assert_eq!(roster.drawn(), &["Bob"]);
    }

    #[test]
    fn test_available_respects_no_repeat_flag() {
        let mut roster = Roster::new();
        roster.add("Alice Bob Clara").unwrap();
        roster.commit_draw("Bob");
        assert_eq!(roster.available(true), vec!["Alice", "Clara"]);
        assert_eq!(roster.available(false), vec!["Alice", "Bob", "Clara"]);
    }

    #[test]
    fn test_from_parts_trims_and_prunes_stale_drawn() {
        let roster = Roster::from_parts(
            vec![" Alice ".into(), "Bob".into(), "  ".into()],
            vec!["Bob ".into(), "Ghost".into()],
            vec![" Bob".into()],
        );
        assert_eq!(roster.entries(), &["Alice", "Bob"]);
        assert_eq!(roster.drawn(), &["Bob"]);
        assert_eq!(roster.history(), &["Bob"]);
    }
}
