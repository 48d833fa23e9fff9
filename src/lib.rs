pub mod app;
pub mod calendar;
pub mod classifier;
pub mod config;
pub mod dates;
pub mod errors;
pub mod frequency;
pub mod handlers;
pub mod ledger;
pub mod models;
pub mod rate;
pub mod state;
pub mod stats;
pub mod storage;
pub mod streak;
pub mod toggle;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::{load_data, persist_data};
