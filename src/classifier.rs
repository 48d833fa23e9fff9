//! The one definition of "done" for a habit on a day.

use crate::ledger::CompletionLedger;
use crate::models::{Completion, Habit, HabitType};
use chrono::NaiveDate;

pub fn is_done(habit: &Habit, completion: Option<&Completion>) -> bool {
    let Some(completion) = completion else {
        return false;
    };
    match habit.habit_type {
        HabitType::Binary => completion.value >= 1.0,
        HabitType::Quantitative => match habit.target_value {
            Some(target) if target > 0.0 => completion.value >= target,
            _ => completion.value > 0.0,
        },
    }
}

/// Ledger lookup plus [`is_done`]. Days before the habit existed are never done.
pub fn is_done_on<L>(habit: &Habit, ledger: &L, date: NaiveDate) -> bool
where
    L: CompletionLedger + ?Sized,
{
    if date < habit.created_at {
        return false;
    }
    is_done(habit, ledger.get(&habit.id, date).as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::MemoryLedger;
    use crate::models::Frequency;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn completion(value: f64) -> Completion {
        Completion {
            habit_id: "h".into(),
            date: day(2026, 1, 5),
            value,
        }
    }

    #[test]
    fn missing_completion_is_not_done() {
        let habit = Habit::binary("h", Frequency::Daily, day(2026, 1, 1));
        assert!(!is_done(&habit, None));
    }

    #[test]
    fn binary_needs_value_of_one() {
        let habit = Habit::binary("h", Frequency::Daily, day(2026, 1, 1));
        assert!(!is_done(&habit, Some(&completion(0.0))));
        assert!(is_done(&habit, Some(&completion(1.0))));
    }

    #[test]
    fn quantitative_compares_against_target() {
        let water = Habit::quantitative(
            "h",
            Some(8.0),
            Some("glasses".into()),
            Frequency::Daily,
            day(2026, 1, 1),
        );
        assert!(!is_done(&water, Some(&completion(5.0))));
        assert!(is_done(&water, Some(&completion(8.0))));
        assert!(is_done(&water, Some(&completion(9.5))));
    }

    #[test]
    fn quantitative_without_target_needs_any_progress() {
        let untargeted = Habit::quantitative("h", None, None, Frequency::Daily, day(2026, 1, 1));
        assert!(!is_done(&untargeted, Some(&completion(0.0))));
        assert!(is_done(&untargeted, Some(&completion(0.25))));

        let zero_target =
            Habit::quantitative("h", Some(0.0), None, Frequency::Daily, day(2026, 1, 1));
        assert!(!is_done(&zero_target, Some(&completion(0.0))));
        assert!(is_done(&zero_target, Some(&completion(1.0))));
    }

    #[test]
    fn rows_before_creation_do_not_count() {
        let habit = Habit::binary("h", Frequency::Daily, day(2026, 1, 5));
        let mut ledger = MemoryLedger::new();
        ledger.upsert("h", day(2026, 1, 4), 1.0);
        ledger.upsert("h", day(2026, 1, 5), 1.0);

        assert!(!is_done_on(&habit, &ledger, day(2026, 1, 4)));
        assert!(is_done_on(&habit, &ledger, day(2026, 1, 5)));
    }
}
