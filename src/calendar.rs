//! Calendar aggregation across a habit set.
//!
//! Cells are always computed fresh from the ledger. Week and month views keep
//! every daily cell and add a mean ratio per group on top.

use crate::classifier::is_done_on;
use crate::dates::{DateRange, date_key, month_label, week_label, week_start};
use crate::ledger::CompletionLedger;
use crate::models::Habit;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Granularity::Day),
            "week" => Ok(Granularity::Week),
            "month" => Ok(Granularity::Month),
            other => Err(format!("unknown granularity '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Full,
    Majority,
    Partial,
    None,
}

pub fn tier_for_ratio(ratio: f64) -> Tier {
    if ratio >= 1.0 {
        Tier::Full
    } else if ratio >= 0.5 {
        Tier::Majority
    } else if ratio > 0.0 {
        Tier::Partial
    } else {
        Tier::None
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellCounts {
    pub completed: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub completed_count: u32,
    pub total_count: u32,
    pub ratio: f64,
    pub tier: Tier,
    /// Split of the counts above by the habit's `is_absolute` flag.
    pub must_do: CellCounts,
    pub flexible: CellCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarGroup {
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub mean_ratio: f64,
    pub cells: Vec<CalendarCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarAggregate {
    pub granularity: Granularity,
    pub range: DateRange,
    pub groups: Vec<CalendarGroup>,
}

impl CalendarAggregate {
    /// Every daily cell in date order, regardless of granularity.
    pub fn cells(&self) -> impl Iterator<Item = &CalendarCell> {
        self.groups.iter().flat_map(|group| group.cells.iter())
    }
}

pub fn cell_for_day<'a, L, I>(habits: I, ledger: &L, date: NaiveDate) -> CalendarCell
where
    L: CompletionLedger + ?Sized,
    I: IntoIterator<Item = &'a Habit>,
{
    let mut must_do = CellCounts::default();
    let mut flexible = CellCounts::default();
    for habit in habits {
        if !habit.is_tracked_on(date) {
            continue;
        }
        let bucket = if habit.is_absolute { &mut must_do } else { &mut flexible };
        bucket.total += 1;
        if is_done_on(habit, ledger, date) {
            bucket.completed += 1;
        }
    }

    let completed_count = must_do.completed + flexible.completed;
    let total_count = must_do.total + flexible.total;
    let ratio = if total_count == 0 {
        0.0
    } else {
        f64::from(completed_count) / f64::from(total_count)
    };
    CalendarCell {
        date,
        completed_count,
        total_count,
        ratio,
        tier: tier_for_ratio(ratio),
        must_do,
        flexible,
    }
}

pub fn aggregate<L>(
    habits: &[Habit],
    ledger: &L,
    range: DateRange,
    granularity: Granularity,
    week_starts_on: Weekday,
) -> CalendarAggregate
where
    L: CompletionLedger + ?Sized,
{
    debug!(
        habits = habits.len(),
        days = range.len(),
        ?granularity,
        "aggregating calendar"
    );

    let mut groups: Vec<CalendarGroup> = Vec::new();
    for date in range.days() {
        let cell = cell_for_day(habits, ledger, date);
        let (label, start) = match granularity {
            Granularity::Day => (date_key(date), date),
            Granularity::Week => {
                let start = week_start(date, week_starts_on);
                (week_label(start), start)
            }
            Granularity::Month => (month_label(date), date.with_day(1).unwrap_or(date)),
        };
        match groups.last_mut() {
            Some(group) if group.label == label => {
                group.end = date;
                group.cells.push(cell);
            }
            _ => groups.push(CalendarGroup {
                label,
                start: start.max(range.from),
                end: date,
                mean_ratio: 0.0,
                cells: vec![cell],
            }),
        }
    }

    for group in &mut groups {
        group.mean_ratio = mean_ratio(&group.cells);
    }

    CalendarAggregate {
        granularity,
        range,
        groups,
    }
}

/// Mean over the cells that had at least one tracked habit; 0 when none did.
pub fn mean_ratio(cells: &[CalendarCell]) -> f64 {
    let (sum, count) = cells
        .iter()
        .filter(|cell| cell.total_count > 0)
        .fold((0.0, 0u32), |(sum, count), cell| (sum + cell.ratio, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / f64::from(count)
    }
}
