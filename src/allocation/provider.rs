//! Collaborators the allocation pipeline reads from.
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::event::RawEvent;

/// Parameters for a calendar listing. Recurring events are always
/// expanded and results ordered by start time.
#[derive(Debug, Clone, PartialEq)]
pub struct EventsQuery {
    pub calendar_id: String,
    pub time_min: DateTime<Utc>,
    pub time_max: DateTime<Utc>,
    pub max_results: u32,
}

impl EventsQuery {
    pub const SINGLE_EVENTS: bool = true;
    pub const ORDER_BY: &'static str = "startTime";
}

#[async_trait]
pub trait CalendarProvider: Send + Sync {
    /// Events in `[time_min, time_max]` sorted ascending by start time.
    async fn list_events(&self, query: &EventsQuery) -> Result<Vec<RawEvent>>;
}

#[async_trait]
pub trait SheetProvider: Send + Sync {
    /// Roster rows of `sheet_name` rendered as an HTML list.
    async fn fetch_records(&self, sheet_name: &str) -> Result<String>;
}
