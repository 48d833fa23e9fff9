use crate::models::AppData;
use chrono::Weekday;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// Shared service state. The single mutex serializes every toggle's
/// read-modify-write and hands readers a consistent snapshot.
#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub week_start: Weekday,
    pub data: Arc<Mutex<AppData>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, week_start: Weekday, data: AppData) -> Self {
        Self {
            data_path,
            week_start,
            data: Arc::new(Mutex::new(data)),
        }
    }
}
