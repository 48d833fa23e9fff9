use crate::handlers;
use crate::state::AppState;
use axum::{routing::{delete, get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/habits", get(handlers::list_habits).post(handlers::create_habit))
        .route("/api/habits/:id", delete(handlers::delete_habit))
        .route("/api/habits/:id/toggle", post(handlers::toggle))
        .route("/api/habits/:id/completions", get(handlers::completions))
        .route("/api/habits/:id/summary", get(handlers::habit_summary))
        .route("/api/calendar", get(handlers::calendar))
        .route("/api/dashboard", get(handlers::dashboard))
        .with_state(state)
}
