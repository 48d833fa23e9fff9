//! Streaks are always derived from the ledger, never stored.
//!
//! Daily habits count consecutive done days; every `Nx-week` cadence counts
//! consecutive weeks whose done days reach the weekly target. The reference
//! day's own period has to qualify or the current streak is zero.

use crate::classifier::{is_done, is_done_on};
use crate::dates::week_start;
use crate::frequency::{done_days_in_week, target_occurrences_per_week};
use crate::ledger::CompletionLedger;
use crate::models::Habit;
use chrono::{Duration, NaiveDate, Weekday};
use std::collections::BTreeMap;

pub fn current_streak<L>(
    habit: &Habit,
    ledger: &L,
    as_of: NaiveDate,
    week_starts_on: Weekday,
) -> u32
where
    L: CompletionLedger + ?Sized,
{
    if as_of < habit.created_at {
        return 0;
    }
    if habit.frequency.is_daily() {
        current_daily_streak(habit, ledger, as_of)
    } else {
        current_weekly_streak(habit, ledger, as_of, week_starts_on)
    }
}

fn current_daily_streak<L>(habit: &Habit, ledger: &L, as_of: NaiveDate) -> u32
where
    L: CompletionLedger + ?Sized,
{
    let mut streak = 0;
    let mut date = as_of;
    while date >= habit.created_at && is_done_on(habit, ledger, date) {
        streak += 1;
        match date.pred_opt() {
            Some(previous) => date = previous,
            None => break,
        }
    }
    streak
}

fn current_weekly_streak<L>(
    habit: &Habit,
    ledger: &L,
    as_of: NaiveDate,
    week_starts_on: Weekday,
) -> u32
where
    L: CompletionLedger + ?Sized,
{
    let target = target_occurrences_per_week(habit.frequency);
    let first_week = week_start(habit.created_at, week_starts_on);
    let mut start = week_start(as_of, week_starts_on);
    let mut streak = 0;
    while start >= first_week && done_days_in_week(habit, ledger, start, as_of) >= target {
        streak += 1;
        match start.checked_sub_signed(Duration::weeks(1)) {
            Some(previous) => start = previous,
            None => break,
        }
    }
    streak
}

/// Longest run of qualifying periods between creation and `as_of`.
///
/// Works from the stored rows only, so the cost follows the number of
/// completions rather than the length of the habit's history.
pub fn longest_streak<L>(
    habit: &Habit,
    ledger: &L,
    as_of: NaiveDate,
    week_starts_on: Weekday,
) -> u32
where
    L: CompletionLedger + ?Sized,
{
    if as_of < habit.created_at {
        return 0;
    }

    let done_days = ledger
        .range(&habit.id, habit.created_at, as_of)
        .into_iter()
        .filter(|row| is_done(habit, Some(row)))
        .map(|row| row.date);

    if habit.frequency.is_daily() {
        return longest_run(done_days, Duration::days(1));
    }

    let target = target_occurrences_per_week(habit.frequency);
    let mut per_week: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for date in done_days {
        *per_week.entry(week_start(date, week_starts_on)).or_default() += 1;
    }
    let satisfied = per_week
        .into_iter()
        .filter(|(_, count)| *count >= target)
        .map(|(start, _)| start);
    longest_run(satisfied, Duration::weeks(1))
}

/// Longest chain of ascending periods that sit exactly `step` apart.
fn longest_run(periods: impl Iterator<Item = NaiveDate>, step: Duration) -> u32 {
    let mut best = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;
    for start in periods {
        run = match previous {
            Some(prev) if prev.checked_add_signed(step) == Some(start) => run + 1,
            _ => 1,
        };
        best = best.max(run);
        previous = Some(start);
    }
    best
}
