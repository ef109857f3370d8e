//! Calculation tape
//!
//! Keeps the calculations completed with `=` so front ends can show them
//! as "12 + 7 = 19" lines.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::core::format::format_number;

/// A single completed calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TapeEntry {
    /// The calculation without the result, e.g. "12 + 7"
    pub expression: String,
    /// The result of the calculation
    pub result: f64,
    /// When the calculation was completed (Unix epoch millis)
    pub timestamp: u64,
}

impl TapeEntry {
    /// Creates a new tape entry stamped with the current time
    #[must_use]
    pub fn new(expression: String, result: f64) -> Self {
        Self {
            expression,
            result,
            timestamp: Self::current_timestamp(),
        }
    }

    /// Creates a tape entry with a specific timestamp (for testing)
    #[must_use]
    pub fn with_timestamp(expression: String, result: f64, timestamp: u64) -> Self {
        Self {
            expression,
            result,
            timestamp,
        }
    }

    fn current_timestamp() -> u64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    /// Returns the result formatted like the calculator display
    #[must_use]
    pub fn result_display(&self) -> String {
        format_number(self.result)
    }

    /// Returns the full tape line
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} = {}", self.expression, self.result_display())
    }
}

/// Bounded list of completed calculations, oldest first
#[derive(Debug, Clone)]
pub struct Tape {
    entries: VecDeque<TapeEntry>,
    max_entries: usize,
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape {
    /// Default maximum tape length
    pub const DEFAULT_MAX_ENTRIES: usize = 100;

    /// Creates a tape with default capacity
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_MAX_ENTRIES)
    }

    /// Creates a tape keeping at most `max_entries` calculations (at least one)
    #[must_use]
    pub fn with_capacity(max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            entries: VecDeque::with_capacity(max_entries.min(Self::DEFAULT_MAX_ENTRIES)),
            max_entries,
        }
    }

    /// Appends an entry, dropping the oldest when full
    pub fn push(&mut self, entry: TapeEntry) {
        if self.entries.len() >= self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Records a completed calculation
    pub fn record(&mut self, expression: &str, result: f64) {
        self.push(TapeEntry::new(expression.to_string(), result));
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries kept
    #[must_use]
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Drops all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates oldest first
    pub fn iter(&self) -> impl Iterator<Item = &TapeEntry> {
        self.entries.iter()
    }

    /// Iterates newest first
    pub fn iter_rev(&self) -> impl Iterator<Item = &TapeEntry> {
        self.entries.iter().rev()
    }

    /// Most recent entry
    #[must_use]
    pub fn last(&self) -> Option<&TapeEntry> {
        self.entries.back()
    }

    /// Serializes the tape to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }

    /// Deserializes a tape from JSON, keeping the newest entries that fit
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<TapeEntry> = serde_json::from_str(json)?;
        let mut tape = Self::new();
        for entry in entries {
            tape.push(entry);
        }
        Ok(tape)
    }

    /// One line per entry, oldest first
    #[must_use]
    pub fn export_formatted(&self) -> String {
        self.entries
            .iter()
            .map(TapeEntry::display)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_display_uses_display_format() {
        let entry = TapeEntry::with_timestamp("1 ÷ 4".into(), 0.25, 0);
        assert_eq!(entry.display(), "1 ÷ 4 = 0.25");

        let entry = TapeEntry::with_timestamp("12 + 7".into(), 19.0, 0);
        assert_eq!(entry.display(), "12 + 7 = 19");
    }

    #[test]
    fn test_entry_new_has_timestamp() {
        let entry = TapeEntry::new("1 + 1".into(), 2.0);
        assert!(entry.timestamp > 0);
    }

    #[test]
    fn test_tape_new() {
        let tape = Tape::new();
        assert!(tape.is_empty());
        assert_eq!(tape.max_entries(), Tape::DEFAULT_MAX_ENTRIES);
    }

    #[test]
    fn test_tape_zero_capacity_keeps_one() {
        let mut tape = Tape::with_capacity(0);
        tape.record("1 + 1", 2.0);
        assert_eq!(tape.len(), 1);
    }

    #[test]
    fn test_tape_drops_oldest() {
        let mut tape = Tape::with_capacity(2);
        tape.record("1 + 1", 2.0);
        tape.record("2 + 2", 4.0);
        tape.record("3 + 3", 6.0);
        assert_eq!(tape.len(), 2);
        let exprs: Vec<&str> = tape.iter().map(|e| e.expression.as_str()).collect();
        assert_eq!(exprs, vec!["2 + 2", "3 + 3"]);
    }

    #[test]
    fn test_tape_iter_rev_newest_first() {
        let mut tape = Tape::new();
        tape.record("1 + 1", 2.0);
        tape.record("2 × 3", 6.0);
        assert_eq!(tape.iter_rev().next().unwrap().expression, "2 × 3");
        assert_eq!(tape.last().unwrap().result, 6.0);
    }

    #[test]
    fn test_tape_clear() {
        let mut tape = Tape::new();
        tape.record("1 + 1", 2.0);
        tape.clear();
        assert!(tape.is_empty());
    }

    #[test]
    fn test_tape_json_round_trip() {
        let mut tape = Tape::new();
        tape.push(TapeEntry::with_timestamp("5 + 3".into(), 8.0, 1000));
        tape.push(TapeEntry::with_timestamp("1 ÷ 8".into(), 0.125, 2000));

        let json = tape.to_json().unwrap();
        assert!(json.contains("\"expression\":\"5 + 3\""));

        let restored = Tape::from_json(&json).unwrap();
        assert_eq!(restored.len(), 2);
        assert_eq!(restored.last().unwrap().timestamp, 2000);
    }

    #[test]
    fn test_tape_from_invalid_json() {
        assert!(Tape::from_json("not json").is_err());
    }

    #[test]
    fn test_export_formatted() {
        let mut tape = Tape::new();
        tape.record("5 + 3", 8.0);
        tape.record("9 - 10", -1.0);
        assert_eq!(tape.export_formatted(), "5 + 3 = 8\n9 - 10 = -1");
    }
}
