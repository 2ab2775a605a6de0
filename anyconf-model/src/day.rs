use chrono::{Datelike, NaiveDate, Weekday};
use std::fmt;

use crate::error::{ModelError, Result};

/// Heading shown above a day's schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayLabel {
    Today,
    Weekday(Weekday),
}

impl fmt::Display for DayLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayLabel::Today => f.write_str("TODAY"),
            DayLabel::Weekday(day) => {
                let name = match day {
                    Weekday::Mon => "MONDAY",
                    Weekday::Tue => "TUESDAY",
                    Weekday::Wed => "WEDNESDAY",
                    Weekday::Thu => "THURSDAY",
                    Weekday::Fri => "FRIDAY",
                    Weekday::Sat => "SATURDAY",
                    Weekday::Sun => "SUNDAY",
                };
                f.write_str(name)
            }
        }
    }
}

/// A conference day. Its id is the feed's date string, which is also what
/// sessions carry as their `day_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Day {
    pub id: String,
    pub date: NaiveDate,
    pub label: DayLabel,
}

impl Day {
    /// Build a day relative to `today`.
    pub fn new(date: &str, today: NaiveDate) -> Result<Self> {
        let parsed = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|_| ModelError::InvalidDate(date.to_string()))?;
        let label = if parsed == today {
            DayLabel::Today
        } else {
            DayLabel::Weekday(parsed.weekday())
        };
        Ok(Self {
            id: date.to_string(),
            date: parsed,
            label,
        })
    }

    /// Build a day relative to the local clock.
    pub fn from_local(date: &str) -> Result<Self> {
        Self::new(date, chrono::Local::now().date_naive())
    }

    pub fn is_today(&self) -> bool {
        self.label == DayLabel::Today
    }
}
