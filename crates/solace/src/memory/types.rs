//! Ledger types for the Solace memory layer
//!
//! Defines the immutable journal record and the per-user bounded ledger that
//! holds them in insertion order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of records a ledger retains; older entries are evicted.
pub const MEMORY_LIMIT: usize = 5;

/// A single indexed journal entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// The journal text as the user wrote it
    pub text: String,
    /// Vector embedding of the text (384 dimensions for all-MiniLM-L6-v2)
    pub vector: Vec<f32>,
    /// When this entry was indexed
    pub created_at: DateTime<Utc>,
}

impl MemoryRecord {
    /// Create a new record stamped with the current time
    pub fn new(text: String, vector: Vec<f32>) -> Self {
        Self {
            text,
            vector,
            created_at: Utc::now(),
        }
    }
}

/// One user's ordered, bounded sequence of records, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryLedger {
    records: Vec<MemoryRecord>,
}

impl MemoryLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, evicting from the front until the size bound holds.
    ///
    /// Returns the number of records evicted.
    pub fn push(&mut self, record: MemoryRecord) -> usize {
        self.records.push(record);
        let mut evicted = 0;
        while self.records.len() > MEMORY_LIMIT {
            self.records.remove(0);
            evicted += 1;
        }
        evicted
    }

    /// The most recently appended record, if any
    pub fn latest(&self) -> Option<&MemoryRecord> {
        self.records.last()
    }

    /// All records, oldest first
    pub fn records(&self) -> &[MemoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(text: &str) -> MemoryRecord {
        MemoryRecord::new(text.to_string(), vec![0.1; 384])
    }

    #[test]
    fn test_record_new_stamps_creation_time() {
        let before = Utc::now();
        let rec = record("had a rough day");
        let after = Utc::now();

        assert_eq!(rec.text, "had a rough day");
        assert_eq!(rec.vector.len(), 384);
        assert!(rec.created_at >= before && rec.created_at <= after);
    }

    #[test]
    fn test_ledger_starts_empty() {
        let ledger = MemoryLedger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.len(), 0);
        assert!(ledger.latest().is_none());
    }

    #[test]
    fn test_push_keeps_insertion_order() {
        let mut ledger = MemoryLedger::new();
        ledger.push(record("first"));
        ledger.push(record("second"));
        ledger.push(record("third"));

        let texts: Vec<&str> = ledger.records().iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
        assert_eq!(ledger.latest().unwrap().text, "third");
    }

    #[test]
    fn test_push_never_exceeds_limit() {
        let mut ledger = MemoryLedger::new();
        for i in 0..12 {
            ledger.push(record(&format!("entry {i}")));
            assert!(ledger.len() <= MEMORY_LIMIT);
        }
        assert_eq!(ledger.len(), MEMORY_LIMIT);
    }

    #[test]
    fn test_push_evicts_oldest_first() {
        let mut ledger = MemoryLedger::new();
        for i in 1..=6 {
            let evicted = ledger.push(record(&format!("t{i}")));
            let expected = if i <= MEMORY_LIMIT { 0 } else { 1 };
            assert_eq!(evicted, expected);
        }

        let texts: Vec<&str> = ledger.records().iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["t2", "t3", "t4", "t5", "t6"]);
    }

    #[test]
    fn test_ledger_serialization_roundtrip() {
        let mut ledger = MemoryLedger::new();
        ledger.push(record("felt calm after the walk"));
        ledger.push(record("work was stressful"));

        let json = serde_json::to_vec(&ledger).expect("Failed to serialize ledger");
        let restored: MemoryLedger =
            serde_json::from_slice(&json).expect("Failed to deserialize ledger");

        assert_eq!(ledger, restored);
    }
}
