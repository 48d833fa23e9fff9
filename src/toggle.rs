//! Toggle-Completion: the single write path into the ledger.
//!
//! The next value is always derived from the row currently stored, using the
//! same classifier the calculators use. Callers hold the state lock across
//! the read and the write.

use crate::classifier::is_done;
use crate::errors::ValidationError;
use crate::ledger::CompletionLedger;
use crate::models::{AppData, Completion, Habit, HabitType};
use chrono::NaiveDate;

/// Value the toggle should write given what is stored now.
pub fn next_value(
    habit: &Habit,
    current: Option<&Completion>,
    explicit_value: Option<f64>,
) -> Result<f64, ValidationError> {
    if let Some(value) = explicit_value {
        if !value.is_finite() || value < 0.0 {
            return Err(ValidationError::InvalidValue(value));
        }
    }
    let value = match habit.habit_type {
        HabitType::Binary => {
            if is_done(habit, current) {
                0.0
            } else {
                1.0
            }
        }
        HabitType::Quantitative => explicit_value.unwrap_or(0.0),
    };
    Ok(value)
}

pub fn toggle_completion<L>(
    habit: &Habit,
    ledger: &mut L,
    date: NaiveDate,
    explicit_value: Option<f64>,
) -> Result<Completion, ValidationError>
where
    L: CompletionLedger + ?Sized,
{
    if date < habit.created_at {
        return Err(ValidationError::BeforeCreation {
            habit_id: habit.id.clone(),
            date,
            created_at: habit.created_at,
        });
    }
    let current = ledger.get(&habit.id, date);
    let value = next_value(habit, current.as_ref(), explicit_value)?;
    Ok(ledger.upsert(&habit.id, date, value))
}

/// Looks the habit up by id and toggles it.
pub fn toggle_in(
    data: &mut AppData,
    habit_id: &str,
    date: NaiveDate,
    explicit_value: Option<f64>,
) -> Result<(Completion, bool), ValidationError> {
    let habit = data
        .habits
        .get(habit_id)
        .ok_or_else(|| ValidationError::UnknownHabit(habit_id.to_string()))?;
    let completion = toggle_completion(habit, &mut data.completions, date, explicit_value)?;
    let done = is_done(habit, Some(&completion));
    Ok((completion, done))
}
