//! Calendar events as returned by the provider and as enriched for the
//! allocation response.
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::AllocationError;

pub const UNTITLED_EVENT: &str = "No Title";

const ACCEPTED: &str = "accepted";

/// Start or end of an event. Timed events carry `dateTime`, all-day
/// events carry `date`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EventDateTime {
    #[serde(rename = "dateTime", skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "timeZone", skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl EventDateTime {
    pub fn timed(date_time: &str) -> Self {
        Self {
            date_time: Some(date_time.to_string()),
            ..Default::default()
        }
    }

    pub fn all_day(date: &str) -> Self {
        Self {
            date: Some(date.to_string()),
            ..Default::default()
        }
    }

    /// The raw string as the provider sent it, preferring `dateTime`.
    pub fn raw(&self) -> Option<&str> {
        self.date_time.as_deref().or(self.date.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Attendee {
    #[serde(default)]
    pub email: String,
    #[serde(rename = "responseStatus", default)]
    pub response_status: String,
    #[serde(rename = "displayName", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawEvent {
    pub summary: Option<String>,
    pub start: Option<EventDateTime>,
    pub end: Option<EventDateTime>,
    pub attendees: Option<Vec<Attendee>>,
    pub description: Option<String>,
}

impl RawEvent {
    pub fn summary(&self) -> &str {
        self.summary.as_deref().unwrap_or(UNTITLED_EVENT)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Accepted,
    Declined,
    /// The identity isn't on the guest list, e.g. a personal calendar item.
    Unknown,
}

impl AttendanceStatus {
    pub fn counts_toward_allocation(&self) -> bool {
        !matches!(self, AttendanceStatus::Declined)
    }
}

/// Resolve how `identity` responded to the event. The last attendee
/// record matching the identity decides when there are duplicates.
pub fn attendance_status(attendees: Option<&[Attendee]>, identity: &str) -> AttendanceStatus {
    let last_match = attendees
        .unwrap_or_default()
        .iter()
        .rev()
        .find(|a| a.email == identity);

    match last_match {
        Some(a) if a.response_status == ACCEPTED => AttendanceStatus::Accepted,
        Some(_) => AttendanceStatus::Declined,
        None => AttendanceStatus::Unknown,
    }
}

enum Instant {
    Timed(DateTime<FixedOffset>),
    AllDay(NaiveDate),
}

fn parse_instant(
    summary: &str,
    field: &str,
    value: Option<&EventDateTime>,
) -> Result<Instant, AllocationError> {
    let value = value.ok_or_else(|| AllocationError::malformed(summary, format!("missing {}", field)))?;

    if let Some(date_time) = &value.date_time {
        return DateTime::parse_from_rfc3339(date_time)
            .map(Instant::Timed)
            .map_err(|e| {
                AllocationError::malformed(summary, format!("invalid {} '{}': {}", field, date_time, e))
            });
    }

    if let Some(date) = &value.date {
        return NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map(Instant::AllDay)
            .map_err(|e| {
                AllocationError::malformed(summary, format!("invalid {} '{}': {}", field, date, e))
            });
    }

    Err(AllocationError::malformed(
        summary,
        format!("{} has neither dateTime nor date", field),
    ))
}

/// Absolute length of the event in fractional hours.
pub fn duration_hours(event: &RawEvent) -> Result<f64, AllocationError> {
    let summary = event.summary();
    let start = parse_instant(summary, "start", event.start.as_ref())?;
    let end = parse_instant(summary, "end", event.end.as_ref())?;

    let delta = match (start, end) {
        (Instant::Timed(start), Instant::Timed(end)) => end - start,
        (Instant::AllDay(start), Instant::AllDay(end)) => end - start,
        _ => {
            return Err(AllocationError::malformed(
                summary,
                "start and end mix all-day and timed values",
            ));
        }
    };

    let seconds = delta.num_milliseconds() as f64 / 1000.0;
    Ok((seconds / 3600.0).abs())
}

/// An included event with its computed duration and attendance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichedEvent {
    pub summary: String,
    pub start: String,
    pub end: String,
    pub duration: f64,
    pub attendance_status: AttendanceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
