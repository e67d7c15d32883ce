//! Weekly time allocation: resolve the window for a date, fetch the
//! calendar, and total the events into categories.
pub mod aggregate;
pub mod error;
pub mod event;
pub mod provider;
pub mod taxonomy;
pub mod window;

use chrono::Utc;

pub use aggregate::{
    Aggregation, AllocationReport, CategoryBucket, WorkWeekHours, aggregate,
};
pub use error::AllocationError;
pub use event::{AttendanceStatus, Attendee, EnrichedEvent, EventDateTime, RawEvent};
pub use provider::{CalendarProvider, EventsQuery, SheetProvider};
pub use taxonomy::{CategoryRule, Taxonomy, Unclassified};
pub use window::{ResolvedWindow, parse_anchor_date, resolve_window, week_start};

use crate::core::AppConfig;

/// Run the full pipeline for the work week anchored at `date`.
pub async fn allocate_for_date(
    date: &str,
    config: &AppConfig,
    calendar: &dyn CalendarProvider,
) -> Result<Aggregation, AllocationError> {
    let anchor = parse_anchor_date(date)?;
    let window = resolve_window(anchor, config.working_days, config.timezone)?;

    let query = EventsQuery {
        calendar_id: config.calendar_email.clone(),
        time_min: window.start.with_timezone(&Utc),
        time_max: window.end.with_timezone(&Utc),
        max_results: config.max_results,
    };
    let events = calendar
        .list_events(&query)
        .await
        .map_err(AllocationError::upstream)?;

    tracing::info!(
        "Fetched {} events for {} between {} and {}",
        events.len(),
        config.calendar_email,
        window.start,
        window.end
    );

    aggregate(
        &events,
        &config.calendar_email,
        &config.taxonomy,
        config.work_week_hours,
    )
}
