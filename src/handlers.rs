use crate::calendar::{CalendarAggregate, Granularity, aggregate};
use crate::dates::{DateRange, parse_day};
use crate::errors::{AppError, ValidationError};
use crate::ledger::CompletionLedger;
use crate::models::{
    AppData, AsOfQuery, CalendarQuery, Completion, CreateHabitRequest, DashboardResponse,
    DeleteQuery, Habit, HabitSummary, HabitType, RangeQuery, ToggleRequest, ToggleResponse,
};
use crate::state::AppState;
use crate::stats::{build_dashboard_at, summarize_habit};
use crate::storage::persist_data;
use crate::toggle::toggle_in;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{Datelike, Local, NaiveDate};
use tracing::info;

/// Longest range a single calendar or completions query may cover.
pub const MAX_RANGE_DAYS: usize = 732;

/// Years a request date may fall in. Keeps whole-history walks bounded.
pub const SUPPORTED_YEARS: std::ops::RangeInclusive<i32> = 1970..=2200;

pub async fn list_habits(State(state): State<AppState>) -> Json<Vec<Habit>> {
    let data = state.data.lock().await;
    Json(data.habits.values().cloned().collect())
}

pub async fn create_habit(
    State(state): State<AppState>,
    Json(payload): Json<CreateHabitRequest>,
) -> Result<(StatusCode, Json<Habit>), AppError> {
    let habit = build_habit(payload, today())?;

    let mut data = state.data.lock().await;
    let mut next = data.clone();
    next.habits.insert(habit.id.clone(), habit.clone());
    commit(&state, &mut data, next).await?;

    info!(habit_id = %habit.id, frequency = ?habit.frequency, "created habit");
    Ok((StatusCode::CREATED, Json(habit)))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Path(habit_id): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> Result<StatusCode, AppError> {
    let mut data = state.data.lock().await;
    if !data.habits.contains_key(&habit_id) {
        return Err(ValidationError::UnknownHabit(habit_id).into());
    }

    let mut next = data.clone();
    if query.purge {
        next.habits.remove(&habit_id);
        next.completions.wipe(&habit_id);
    } else if let Some(habit) = next.habits.get_mut(&habit_id) {
        if habit.is_active {
            habit.is_active = false;
            habit.deactivated_at = Some(today());
        }
    }
    commit(&state, &mut data, next).await?;

    if query.purge {
        info!(%habit_id, "purged habit and its completions");
    } else {
        info!(%habit_id, "deactivated habit");
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn toggle(
    State(state): State<AppState>,
    Path(habit_id): Path<String>,
    payload: Option<Json<ToggleRequest>>,
) -> Result<Json<ToggleResponse>, AppError> {
    let Json(request) = payload.unwrap_or_default();
    let date = optional_day(request.date.as_deref())?.unwrap_or_else(today);

    let mut data = state.data.lock().await;
    let mut next = data.clone();
    let (completion, done) = toggle_in(&mut next, &habit_id, date, request.value)?;
    commit(&state, &mut data, next).await?;

    info!(%habit_id, %date, value = completion.value, done, "toggled completion");
    Ok(Json(ToggleResponse {
        habit_id: completion.habit_id,
        date: completion.date,
        value: completion.value,
        done,
    }))
}

pub async fn completions(
    State(state): State<AppState>,
    Path(habit_id): Path<String>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Vec<Completion>>, AppError> {
    let range = parse_range(&query.from, &query.to)?;
    let data = state.data.lock().await;
    if !data.habits.contains_key(&habit_id) {
        return Err(ValidationError::UnknownHabit(habit_id).into());
    }
    Ok(Json(data.completions.range(&habit_id, range.from, range.to)))
}

pub async fn habit_summary(
    State(state): State<AppState>,
    Path(habit_id): Path<String>,
    Query(query): Query<AsOfQuery>,
) -> Result<Json<HabitSummary>, AppError> {
    let as_of = optional_day(query.as_of.as_deref())?.unwrap_or_else(today);
    let data = state.data.lock().await;
    let habit = data
        .habits
        .get(&habit_id)
        .ok_or_else(|| ValidationError::UnknownHabit(habit_id.clone()))?;
    Ok(Json(summarize_habit(habit, &data.completions, as_of, state.week_start)))
}

pub async fn calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarAggregate>, AppError> {
    let range = parse_range(&query.from, &query.to)?;
    let granularity = match query.granularity.as_deref() {
        Some(raw) => raw.parse::<Granularity>().map_err(AppError::bad_request)?,
        None => Granularity::Day,
    };

    let data = state.data.lock().await;
    let habits: Vec<Habit> = data.habits.values().cloned().collect();
    Ok(Json(aggregate(
        &habits,
        &data.completions,
        range,
        granularity,
        state.week_start,
    )))
}

pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<AsOfQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    let as_of = optional_day(query.as_of.as_deref())?.unwrap_or_else(today);
    let data = state.data.lock().await;
    Ok(Json(build_dashboard_at(as_of, &data, state.week_start)))
}

/// Writes `next` to disk and only then makes it the shared state, so a failed
/// write leaves memory at the last persisted version.
async fn commit(state: &AppState, data: &mut AppData, next: AppData) -> Result<(), AppError> {
    persist_data(&state.data_path, &next).await?;
    *data = next;
    Ok(())
}

fn build_habit(payload: CreateHabitRequest, today: NaiveDate) -> Result<Habit, ValidationError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ValidationError::InvalidHabit("name must not be empty".into()));
    }

    let (target_value, target_unit) = match payload.habit_type {
        HabitType::Binary => {
            if payload.target_value.is_some() {
                return Err(ValidationError::InvalidHabit(
                    "binary habits do not take a target".into(),
                ));
            }
            (None, None)
        }
        HabitType::Quantitative => {
            if let Some(target) = payload.target_value {
                if !target.is_finite() || target < 0.0 {
                    return Err(ValidationError::InvalidValue(target));
                }
            }
            (payload.target_value, payload.target_unit)
        }
    };

    let created_at = optional_day(payload.created_at.as_deref())?.unwrap_or(today);

    Ok(Habit {
        id: uuid::Uuid::new_v4().to_string(),
        name: name.to_string(),
        habit_type: payload.habit_type,
        target_value,
        target_unit,
        frequency: payload.frequency,
        is_absolute: payload.is_absolute,
        created_at,
        is_active: true,
        deactivated_at: None,
    })
}

/// Parses a request date, rejecting years outside `SUPPORTED_YEARS`.
fn request_day(raw: &str) -> Result<NaiveDate, ValidationError> {
    parse_day(raw)
        .filter(|date| SUPPORTED_YEARS.contains(&date.year()))
        .ok_or_else(|| ValidationError::InvalidDate(raw.to_string()))
}

fn optional_day(raw: Option<&str>) -> Result<Option<NaiveDate>, ValidationError> {
    raw.map(request_day).transpose()
}

fn parse_range(from: &str, to: &str) -> Result<DateRange, ValidationError> {
    let from = request_day(from)?;
    let to = request_day(to)?;
    if from > to {
        return Err(ValidationError::InvalidRange(format!("{from} is after {to}")));
    }
    let range = DateRange::new(from, to);
    if range.len() > MAX_RANGE_DAYS {
        return Err(ValidationError::InvalidRange(format!(
            "at most {MAX_RANGE_DAYS} days per request"
        )));
    }
    Ok(range)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
