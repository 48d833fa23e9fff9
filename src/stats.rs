use crate::calendar::{Granularity, aggregate};
use crate::classifier::is_done_on;
use crate::dates::{DateRange, week_start};
use crate::frequency::week_progress;
use crate::ledger::CompletionLedger;
use crate::models::{AppData, DashboardResponse, Habit, HabitSummary, WeeklyPoint};
use crate::rate::completion_rate;
use crate::streak::{current_streak, longest_streak};
use chrono::{Duration, NaiveDate, Weekday};

const WEEK_COUNT: i64 = 8;

pub fn summarize_habit<L>(
    habit: &Habit,
    ledger: &L,
    as_of: NaiveDate,
    week_starts_on: Weekday,
) -> HabitSummary
where
    L: CompletionLedger + ?Sized,
{
    let this_week = week_start(as_of, week_starts_on);
    HabitSummary {
        id: habit.id.clone(),
        name: habit.name.clone(),
        frequency: habit.frequency,
        is_absolute: habit.is_absolute,
        as_of,
        done_today: is_done_on(habit, ledger, as_of),
        current_streak: current_streak(habit, ledger, as_of, week_starts_on),
        longest_streak: longest_streak(habit, ledger, as_of, week_starts_on),
        rate_7_days: completion_rate(habit, ledger, 7, as_of),
        rate_30_days: completion_rate(habit, ledger, 30, as_of),
        week: week_progress(habit, ledger, this_week, as_of),
    }
}

pub fn build_dashboard_at(
    today: NaiveDate,
    data: &AppData,
    week_starts_on: Weekday,
) -> DashboardResponse {
    let habits: Vec<Habit> = data.habits.values().cloned().collect();

    let summaries = habits
        .iter()
        .filter(|habit| habit.is_active && habit.created_at <= today)
        .map(|habit| summarize_habit(habit, &data.completions, today, week_starts_on))
        .collect();

    let last_7_days = aggregate(
        &habits,
        &data.completions,
        DateRange::trailing(today, 7),
        Granularity::Day,
        week_starts_on,
    )
    .cells()
    .cloned()
    .collect();

    let first_week = week_start(today, week_starts_on) - Duration::weeks(WEEK_COUNT - 1);
    let weekly = aggregate(
        &habits,
        &data.completions,
        DateRange::new(first_week, today),
        Granularity::Week,
        week_starts_on,
    )
    .groups
    .into_iter()
    .map(|group| WeeklyPoint {
        week: group.label,
        start_date: group.start,
        end_date: group.start + Duration::days(6),
        mean_ratio: group.mean_ratio,
    })
    .collect();

    DashboardResponse {
        date: today,
        habits: summaries,
        last_7_days,
        weekly,
    }
}
