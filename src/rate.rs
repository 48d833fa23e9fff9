use crate::classifier::is_done_on;
use crate::dates::DateRange;
use crate::frequency::target_occurrences_per_week;
use crate::ledger::CompletionLedger;
use crate::models::Habit;
use chrono::NaiveDate;

/// Number of done days the habit's cadence asks for over `window_days`. Never zero.
pub fn expected_occurrences(habit: &Habit, window_days: u32) -> u32 {
    let expected = if habit.frequency.is_daily() {
        window_days
    } else {
        let per_week = target_occurrences_per_week(habit.frequency).max(1);
        (f64::from(window_days) / 7.0 * f64::from(per_week)).ceil() as u32
    };
    expected.max(1)
}

/// Percentage in `[0, 100]` of expected completions reached over the
/// `window_days` days ending on `as_of`, rounded to a whole number.
pub fn completion_rate<L>(habit: &Habit, ledger: &L, window_days: u32, as_of: NaiveDate) -> f64
where
    L: CompletionLedger + ?Sized,
{
    let completed = DateRange::trailing(as_of, window_days)
        .days()
        .filter(|date| is_done_on(habit, ledger, *date))
        .count();
    let expected = expected_occurrences(habit, window_days);
    let rate = (100.0 * completed as f64 / f64::from(expected)).round();
    rate.clamp(0.0, 100.0)
}
