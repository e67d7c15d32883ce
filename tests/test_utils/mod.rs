//! Test utilities for integration tests
#![allow(dead_code)]
use std::sync::{Arc, Mutex};

use allot::allocation::{
    AllocationError, Attendee, CalendarProvider, EventDateTime, EventsQuery, RawEvent, SheetProvider,
};
use allot::api::AppState;
use allot::api::app;
use allot::core::AppConfig;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use axum::{Router, body::Body};

pub const IDENTITY: &str = "me@example.com";

/// Calendar that returns canned events and records each query.
#[derive(Default)]
pub struct StubCalendar {
    pub events: Vec<RawEvent>,
    pub fail_with: Option<String>,
    pub queries: Mutex<Vec<EventsQuery>>,
}

#[async_trait]
impl CalendarProvider for StubCalendar {
    async fn list_events(&self, query: &EventsQuery) -> Result<Vec<RawEvent>> {
        self.queries.lock().unwrap().push(query.clone());
        match &self.fail_with {
            Some(msg) => Err(anyhow!(msg.clone())),
            None => Ok(self.events.clone()),
        }
    }
}

/// Sheets that echoes the requested sheet name.
pub struct StubSheets {
    pub fail_with: Option<AllocationError>,
    /// Fail with an error that isn't an `AllocationError`
    pub fail_untyped: bool,
}

#[async_trait]
impl SheetProvider for StubSheets {
    async fn fetch_records(&self, sheet_name: &str) -> Result<String> {
        if self.fail_untyped {
            return Err(anyhow!("connection reset"));
        }
        match &self.fail_with {
            Some(e) => Err(e.clone().into()),
            None => Ok(format!("<ul><li><b>{}</b></li></ul>", sheet_name)),
        }
    }
}

pub fn event(summary: &str, start: &str, end: &str) -> RawEvent {
    RawEvent {
        summary: Some(summary.to_string()),
        start: Some(EventDateTime::timed(start)),
        end: Some(EventDateTime::timed(end)),
        ..Default::default()
    }
}

pub fn responded(mut event: RawEvent, status: &str) -> RawEvent {
    event.attendees = Some(vec![Attendee {
        email: IDENTITY.to_string(),
        response_status: status.to_string(),
        display_name: None,
    }]);
    event
}

/// Creates a test application router backed by the given collaborators.
pub fn test_app_with(
    config: AppConfig,
    calendar: Arc<StubCalendar>,
    sheets: StubSheets,
) -> Router {
    let app_state = AppState::new(config, calendar, Arc::new(sheets));
    app(Arc::new(app_state))
}

pub fn test_app(events: Vec<RawEvent>) -> Router {
    let calendar = Arc::new(StubCalendar {
        events,
        ..Default::default()
    });
    test_app_with(
        AppConfig::for_identity(IDENTITY),
        calendar,
        StubSheets {
            fail_with: None,
            fail_untyped: false,
        },
    )
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
