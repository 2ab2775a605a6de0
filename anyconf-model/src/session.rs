//! Conference sessions as delivered by the schedule feed.
//!
//! The feed describes each session with one or more scheduled instances; the
//! pager only ever shows the first one. Times are parsed eagerly and strictly:
//! a session whose start cannot be understood is rejected instead of being
//! silently placed at some default slot.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ModelError, Result};
use crate::ids::ItemId;

/// Accepted `date time` layouts, tried in order.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %I:%M %p",
    "%Y-%m-%d %I:%M%p",
];

/// One scheduled occurrence of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInstance {
    pub date: String,
    pub time: String,
    /// Length in minutes.
    #[serde(default)]
    pub duration: u32,
    #[serde(default, deserialize_with = "string_or_number")]
    pub room_id: Option<String>,
}

/// Session record exactly as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSession {
    pub id: ItemId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub speaker_ids: Vec<ItemId>,
    #[serde(default)]
    pub instances: Vec<SessionInstance>,
}

/// A session with its schedule resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: ItemId,
    pub title: String,
    pub details: String,
    pub room: Option<String>,
    /// Date string of the first instance; doubles as the owning day's id.
    pub day_id: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub speaker_ids: Vec<ItemId>,
}

impl Session {
    /// Resolve the first scheduled instance of `raw`.
    pub fn try_from_raw(raw: RawSession) -> Result<Self> {
        let Some(first) = raw.instances.first() else {
            return Err(ModelError::MissingInstance(raw.id.to_string()));
        };

        let start = make_date(&first.date, &first.time)?;
        let end = start + Duration::minutes(i64::from(first.duration));

        Ok(Self {
            title: raw.name,
            details: raw.description,
            room: first.room_id.clone(),
            day_id: first.date.clone(),
            start,
            end,
            speaker_ids: raw.speaker_ids,
            id: raw.id,
        })
    }

    /// Whether this session is scheduled on the day identified by `day_id`.
    pub fn is_on(&self, day_id: &str) -> bool {
        self.day_id == day_id
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

impl TryFrom<RawSession> for Session {
    type Error = ModelError;

    fn try_from(raw: RawSession) -> Result<Self> {
        Session::try_from_raw(raw)
    }
}

/// Combine a feed `date` and `time` into a timestamp.
///
/// Fails with [`ModelError::InvalidTime`] when the pair matches none of the
/// accepted layouts.
pub fn make_date(day: &str, time: &str) -> Result<NaiveDateTime> {
    let combined = format!("{} {}", day.trim(), time.trim());
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| {
            NaiveDateTime::parse_from_str(&combined, format).ok()
        })
        .ok_or(ModelError::InvalidTime(combined))
}

/// Parse a JSON array of wire sessions, failing on the first bad entry.
pub fn parse_sessions(json: &str) -> Result<Vec<Session>> {
    let raw: Vec<RawSession> = serde_json::from_str(json)?;
    let sessions = raw
        .into_iter()
        .map(Session::try_from_raw)
        .collect::<Result<Vec<_>>>()?;
    log::debug!("parsed {} sessions", sessions.len());
    Ok(sessions)
}

fn string_or_number<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Text(String),
        Number(i64),
    }

    Ok(Option::<Wire>::deserialize(deserializer)?.map(|wire| match wire {
        Wire::Text(text) => text,
        Wire::Number(number) => number.to_string(),
    }))
}
