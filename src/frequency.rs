use crate::classifier::is_done_on;
use crate::dates::DateRange;
use crate::ledger::CompletionLedger;
use crate::models::{Frequency, Habit, WeekProgress};
use chrono::{Duration, NaiveDate};

pub fn target_occurrences_per_week(frequency: Frequency) -> u32 {
    match frequency {
        Frequency::Daily => 7,
        Frequency::TwiceWeekly => 2,
        Frequency::ThreeTimesWeekly => 3,
        Frequency::FourTimesWeekly => 4,
        Frequency::FiveTimesWeekly => 5,
        Frequency::SixTimesWeekly => 6,
        Frequency::Weekly => 1,
    }
}

/// Done days in the seven days starting at `week_start`, stopping after `through`.
pub fn done_days_in_week<L>(
    habit: &Habit,
    ledger: &L,
    week_start: NaiveDate,
    through: NaiveDate,
) -> u32
where
    L: CompletionLedger + ?Sized,
{
    let week_end = (week_start + Duration::days(6)).min(through);
    DateRange::new(week_start, week_end)
        .days()
        .filter(|date| is_done_on(habit, ledger, *date))
        .count() as u32
}

pub fn frequency_satisfied<L>(habit: &Habit, ledger: &L, week_start: NaiveDate) -> bool
where
    L: CompletionLedger + ?Sized,
{
    week_progress(habit, ledger, week_start, week_start + Duration::days(6)).satisfied
}

pub fn week_progress<L>(
    habit: &Habit,
    ledger: &L,
    week_start: NaiveDate,
    through: NaiveDate,
) -> WeekProgress
where
    L: CompletionLedger + ?Sized,
{
    let completed = done_days_in_week(habit, ledger, week_start, through);
    let target = target_occurrences_per_week(habit.frequency);
    WeekProgress {
        week_start,
        completed,
        target,
        satisfied: completed >= target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::MemoryLedger;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn targets_follow_cadence() {
        assert_eq!(target_occurrences_per_week(Frequency::Daily), 7);
        assert_eq!(target_occurrences_per_week(Frequency::Weekly), 1);
        assert_eq!(target_occurrences_per_week(Frequency::TwiceWeekly), 2);
        assert_eq!(target_occurrences_per_week(Frequency::SixTimesWeekly), 6);
    }

    #[test]
    fn three_times_a_week_needs_three_days() {
        let habit = Habit::binary("gym", Frequency::ThreeTimesWeekly, day(2025, 12, 1));
        let monday = day(2026, 1, 5);
        let mut ledger = MemoryLedger::new();
        ledger.upsert("gym", monday, 1.0);
        ledger.upsert("gym", day(2026, 1, 7), 1.0);
        ledger.upsert("gym", day(2026, 1, 9), 1.0);
        assert!(frequency_satisfied(&habit, &ledger, monday));

        ledger.upsert("gym", day(2026, 1, 9), 0.0);
        assert!(!frequency_satisfied(&habit, &ledger, monday));
    }

    #[test]
    fn days_outside_the_week_are_ignored() {
        let habit = Habit::binary("gym", Frequency::TwiceWeekly, day(2025, 12, 1));
        let monday = day(2026, 1, 5);
        let mut ledger = MemoryLedger::new();
        ledger.upsert("gym", day(2026, 1, 4), 1.0);
        ledger.upsert("gym", day(2026, 1, 12), 1.0);
        ledger.upsert("gym", day(2026, 1, 11), 1.0);

        assert_eq!(done_days_in_week(&habit, &ledger, monday, day(2026, 1, 11)), 1);
        assert!(!frequency_satisfied(&habit, &ledger, monday));
    }

    #[test]
    fn partial_week_gets_no_forward_credit() {
        let habit = Habit::binary("gym", Frequency::TwiceWeekly, day(2025, 12, 1));
        let monday = day(2026, 1, 5);
        let mut ledger = MemoryLedger::new();
        ledger.upsert("gym", monday, 1.0);
        ledger.upsert("gym", day(2026, 1, 9), 1.0);

        let midweek = week_progress(&habit, &ledger, monday, day(2026, 1, 7));
        assert_eq!(midweek.completed, 1);
        assert_eq!(midweek.target, 2);
        assert!(!midweek.satisfied);
    }

    #[test]
    fn quantitative_days_use_the_classifier() {
        let habit = crate::models::Habit::quantitative(
            "swim",
            Some(20.0),
            Some("laps".into()),
            Frequency::Weekly,
            day(2025, 12, 1),
        );
        let monday = day(2026, 1, 5);
        let mut ledger = MemoryLedger::new();
        ledger.upsert("swim", day(2026, 1, 6), 12.0);
        assert!(!frequency_satisfied(&habit, &ledger, monday));
        ledger.upsert("swim", day(2026, 1, 8), 20.0);
        assert!(frequency_satisfied(&habit, &ledger, monday));
    }
}
