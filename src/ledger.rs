//! Completion ledger: at most one row per (habit, day).

use crate::dates::date_key;
use crate::models::Completion;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Read/write contract the calculators run against.
///
/// `upsert` replaces any existing row for the same key outright; values are
/// never merged. `range` is inclusive on both ends and ascending by date.
pub trait CompletionLedger {
    fn get(&self, habit_id: &str, date: NaiveDate) -> Option<Completion>;

    fn upsert(&mut self, habit_id: &str, date: NaiveDate, value: f64) -> Completion;

    fn range(&self, habit_id: &str, from: NaiveDate, to: NaiveDate) -> Vec<Completion>;

    /// Drops every row for a habit. Only used when the habit itself is deleted.
    fn wipe(&mut self, habit_id: &str);
}

/// In-memory ledger, serialized as `{habit_id: {"YYYY-MM-DD": value}}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryLedger {
    rows: BTreeMap<String, BTreeMap<String, f64>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CompletionLedger for MemoryLedger {
    fn get(&self, habit_id: &str, date: NaiveDate) -> Option<Completion> {
        let value = *self.rows.get(habit_id)?.get(&date_key(date))?;
        Some(Completion {
            habit_id: habit_id.to_string(),
            date,
            value,
        })
    }

    fn upsert(&mut self, habit_id: &str, date: NaiveDate, value: f64) -> Completion {
        self.rows
            .entry(habit_id.to_string())
            .or_default()
            .insert(date_key(date), value);
        Completion {
            habit_id: habit_id.to_string(),
            date,
            value,
        }
    }

    fn range(&self, habit_id: &str, from: NaiveDate, to: NaiveDate) -> Vec<Completion> {
        if from > to {
            return Vec::new();
        }
        let Some(days) = self.rows.get(habit_id) else {
            return Vec::new();
        };
        // Zero-padded ISO keys sort chronologically.
        days.range(date_key(from)..=date_key(to))
            .filter_map(|(key, value)| {
                let date = NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()?;
                Some(Completion {
                    habit_id: habit_id.to_string(),
                    date,
                    value: *value,
                })
            })
            .collect()
    }

    fn wipe(&mut self, habit_id: &str) {
        self.rows.remove(habit_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn upsert_overwrites_instead_of_appending() {
        let mut ledger = MemoryLedger::new();
        ledger.upsert("water", day(2026, 1, 5), 5.0);
        ledger.upsert("water", day(2026, 1, 5), 8.0);

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get("water", day(2026, 1, 5)).unwrap().value, 8.0);
    }

    #[test]
    fn range_is_inclusive_and_ascending() {
        let mut ledger = MemoryLedger::new();
        ledger.upsert("run", day(2026, 1, 12), 1.0);
        ledger.upsert("run", day(2026, 1, 3), 1.0);
        ledger.upsert("run", day(2026, 1, 10), 0.0);
        ledger.upsert("run", day(2025, 12, 31), 1.0);
        ledger.upsert("read", day(2026, 1, 4), 1.0);

        let rows = ledger.range("run", day(2026, 1, 1), day(2026, 1, 12));
        let dates: Vec<_> = rows.iter().map(|row| row.date).collect();
        assert_eq!(dates, vec![day(2026, 1, 3), day(2026, 1, 10), day(2026, 1, 12)]);
        assert!(rows.iter().all(|row| row.habit_id == "run"));

        assert!(ledger.range("run", day(2026, 1, 12), day(2026, 1, 1)).is_empty());
        assert!(ledger.range("missing", day(2026, 1, 1), day(2026, 1, 12)).is_empty());
    }

    #[test]
    fn wipe_only_touches_one_habit() {
        let mut ledger = MemoryLedger::new();
        ledger.upsert("run", day(2026, 1, 3), 1.0);
        ledger.upsert("read", day(2026, 1, 3), 1.0);
        ledger.wipe("run");

        assert!(ledger.get("run", day(2026, 1, 3)).is_none());
        assert!(ledger.get("read", day(2026, 1, 3)).is_some());
    }

    #[test]
    fn serializes_as_nested_date_map() {
        let mut ledger = MemoryLedger::new();
        ledger.upsert("run", day(2026, 1, 3), 1.0);
        let json = serde_json::to_value(&ledger).unwrap();
        assert_eq!(json, serde_json::json!({ "run": { "2026-01-03": 1.0 } }));

        let back: MemoryLedger = serde_json::from_value(json).unwrap();
        assert_eq!(back.get("run", day(2026, 1, 3)).unwrap().value, 1.0);
    }
}
