//! Calendar-day helpers.
//!
//! Every date the engine sees is a `NaiveDate`: a day with no time-of-day and
//! no timezone. Anything coming in over the wire goes through [`parse_day`]
//! first so two requests for "the same day" always compare equal.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

pub const DEFAULT_WEEK_START: Weekday = Weekday::Mon;

/// Parses `YYYY-MM-DD` or an RFC 3339 timestamp into a calendar day.
///
/// Timestamps keep the wall-clock date they were written in; the offset is
/// not applied, so `2026-01-05T23:30:00-08:00` is still January 5th.
pub fn parse_day(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(input)
        .ok()
        .map(|stamp| stamp.date_naive())
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn week_start(date: NaiveDate, starts_on: Weekday) -> NaiveDate {
    let back = (7 + date.weekday().num_days_from_monday() - starts_on.num_days_from_monday()) % 7;
    date - Duration::days(i64::from(back))
}

pub fn week_label(start: NaiveDate) -> String {
    // Label by the ISO week that owns the middle of the span, so Sunday-start
    // weeks get the same label as the Monday that follows.
    let iso = (start + Duration::days(3)).iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}

pub fn month_label(date: NaiveDate) -> String {
    format!("{}-{:02}", date.year(), date.month())
}

/// Inclusive span of calendar days. `from > to` is an empty range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// The `days` days ending on `end`, inclusive.
    pub fn trailing(end: NaiveDate, days: u32) -> Self {
        let Some(back) = days.checked_sub(1) else {
            return Self {
                from: end.succ_opt().unwrap_or(NaiveDate::MAX),
                to: end,
            };
        };
        let from = end
            .checked_sub_signed(Duration::days(i64::from(back)))
            .unwrap_or(NaiveDate::MIN);
        Self { from, to: end }
    }

    pub fn len(&self) -> usize {
        if self.from > self.to {
            0
        } else {
            (self.to - self.from).num_days() as usize + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let from = self.from;
        (0..self.len() as i64).map(move |offset| from + Duration::days(offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_day_accepts_plain_dates_and_timestamps() {
        assert_eq!(parse_day("2026-01-05"), Some(day(2026, 1, 5)));
        assert_eq!(parse_day(" 2026-01-05 "), Some(day(2026, 1, 5)));
        assert_eq!(parse_day("2026-01-05T23:30:00-08:00"), Some(day(2026, 1, 5)));
        assert_eq!(parse_day("2026-01-05T00:10:00Z"), Some(day(2026, 1, 5)));
        assert_eq!(parse_day("05/01/2026"), None);
        assert_eq!(parse_day(""), None);
    }

    #[test]
    fn week_start_honours_configured_weekday() {
        // 2026-01-07 is a Wednesday.
        let wednesday = day(2026, 1, 7);
        assert_eq!(week_start(wednesday, Weekday::Mon), day(2026, 1, 5));
        assert_eq!(week_start(wednesday, Weekday::Sun), day(2026, 1, 4));

        let monday = day(2026, 1, 5);
        assert_eq!(week_start(monday, Weekday::Mon), monday);
        let sunday = day(2026, 1, 11);
        assert_eq!(week_start(sunday, Weekday::Mon), monday);
        assert_eq!(week_start(sunday, Weekday::Sun), sunday);
    }

    #[test]
    fn sunday_weeks_share_label_with_following_monday() {
        assert_eq!(week_label(day(2026, 1, 5)), "2026-W02");
        assert_eq!(week_label(day(2026, 1, 4)), "2026-W02");
    }

    #[test]
    fn range_iterates_inclusive_days() {
        let range = DateRange::new(day(2026, 1, 30), day(2026, 2, 2));
        let days: Vec<_> = range.days().collect();
        assert_eq!(days.len(), 4);
        assert_eq!(days[0], day(2026, 1, 30));
        assert_eq!(days[3], day(2026, 2, 2));

        let inverted = DateRange::new(day(2026, 2, 2), day(2026, 1, 30));
        assert!(inverted.is_empty());
        assert_eq!(inverted.days().count(), 0);
    }

    #[test]
    fn trailing_range_ends_on_given_day() {
        let range = DateRange::trailing(day(2026, 1, 30), 30);
        assert_eq!(range.from, day(2026, 1, 1));
        assert_eq!(range.len(), 30);
        assert!(DateRange::trailing(day(2026, 1, 30), 0).is_empty());
    }
}
