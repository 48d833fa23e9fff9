use crate::dates::DEFAULT_WEEK_START;
use crate::errors::ConfigError;
use chrono::Weekday;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/state.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub week_start: Weekday,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => DEFAULT_PORT,
        };

        let data_path = lookup("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let week_start = match lookup("HABIT_WEEK_START") {
            Some(raw) => parse_week_start(&raw)?,
            None => DEFAULT_WEEK_START,
        };

        Ok(Self {
            port,
            data_path,
            week_start,
        })
    }
}

fn parse_week_start(raw: &str) -> Result<Weekday, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "mon" | "monday" => Ok(Weekday::Mon),
        "sun" | "sunday" => Ok(Weekday::Sun),
        _ => Err(ConfigError::InvalidWeekStart(raw.to_string())),
    }
}
