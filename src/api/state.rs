use std::sync::Arc;

use crate::allocation::{CalendarProvider, SheetProvider};
use crate::core::AppConfig;
use crate::google::{GoogleCalendar, GoogleSheets};

/// Read-only for the life of the server. Every request builds its own
/// totals so nothing here needs a lock.
pub struct AppState {
    pub config: AppConfig,
    pub calendar: Arc<dyn CalendarProvider>,
    pub sheets: Arc<dyn SheetProvider>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        calendar: Arc<dyn CalendarProvider>,
        sheets: Arc<dyn SheetProvider>,
    ) -> Self {
        Self {
            config,
            calendar,
            sheets,
        }
    }

    /// State backed by the Google Calendar and Sheets APIs.
    pub fn google(config: AppConfig) -> Self {
        let calendar = Arc::new(GoogleCalendar::from_config(&config));
        let sheets = Arc::new(GoogleSheets::from_config(&config));
        Self::new(config, calendar, sheets)
    }
}
