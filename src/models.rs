use crate::calendar::CalendarCell;
use crate::ledger::MemoryLedger;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitType {
    Binary,
    Quantitative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    #[serde(rename = "daily")]
    Daily,
    #[serde(rename = "2x-week")]
    TwiceWeekly,
    #[serde(rename = "3x-week")]
    ThreeTimesWeekly,
    #[serde(rename = "4x-week")]
    FourTimesWeekly,
    #[serde(rename = "5x-week")]
    FiveTimesWeekly,
    #[serde(rename = "6x-week")]
    SixTimesWeekly,
    #[serde(rename = "weekly")]
    Weekly,
}

impl Frequency {
    pub fn is_daily(self) -> bool {
        matches!(self, Frequency::Daily)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub habit_type: HabitType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_unit: Option<String>,
    pub frequency: Frequency,
    #[serde(default)]
    pub is_absolute: bool,
    pub created_at: NaiveDate,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deactivated_at: Option<NaiveDate>,
}

fn default_active() -> bool {
    true
}

impl Habit {
    pub fn binary(id: impl Into<String>, frequency: Frequency, created_at: NaiveDate) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            habit_type: HabitType::Binary,
            target_value: None,
            target_unit: None,
            frequency,
            is_absolute: false,
            created_at,
            is_active: true,
            deactivated_at: None,
        }
    }

    pub fn quantitative(
        id: impl Into<String>,
        target_value: Option<f64>,
        target_unit: Option<String>,
        frequency: Frequency,
        created_at: NaiveDate,
    ) -> Self {
        Self {
            habit_type: HabitType::Quantitative,
            target_value,
            target_unit,
            ..Self::binary(id, frequency, created_at)
        }
    }

    /// Whether the habit belongs in the denominator of aggregates on `date`.
    pub fn is_tracked_on(&self, date: NaiveDate) -> bool {
        if date < self.created_at {
            return false;
        }
        if self.is_active {
            return true;
        }
        self.deactivated_at.is_some_and(|end| date < end)
    }
}

/// One ledger row. `value` is 0/1 for binary habits and a magnitude in the
/// habit's unit for quantitative ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    pub habit_id: String,
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub habits: BTreeMap<String, Habit>,
    #[serde(default)]
    pub completions: MemoryLedger,
}

#[derive(Debug, Deserialize)]
pub struct CreateHabitRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub habit_type: HabitType,
    pub target_value: Option<f64>,
    pub target_unit: Option<String>,
    pub frequency: Frequency,
    #[serde(default)]
    pub is_absolute: bool,
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ToggleRequest {
    pub date: Option<String>,
    pub value: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleResponse {
    pub habit_id: String,
    pub date: NaiveDate,
    pub value: f64,
    pub done: bool,
}

#[derive(Debug, Deserialize, Default)]
pub struct AsOfQuery {
    pub as_of: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub from: String,
    pub to: String,
    pub granularity: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct DeleteQuery {
    #[serde(default)]
    pub purge: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekProgress {
    pub week_start: NaiveDate,
    pub completed: u32,
    pub target: u32,
    pub satisfied: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HabitSummary {
    pub id: String,
    pub name: String,
    pub frequency: Frequency,
    pub is_absolute: bool,
    pub as_of: NaiveDate,
    pub done_today: bool,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub rate_7_days: f64,
    pub rate_30_days: f64,
    pub week: WeekProgress,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeeklyPoint {
    pub week: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub mean_ratio: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub date: NaiveDate,
    pub habits: Vec<HabitSummary>,
    pub last_7_days: Vec<CalendarCell>,
    pub weekly: Vec<WeeklyPoint>,
}
