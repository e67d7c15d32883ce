use std::env;

use chrono_tz::Tz;

use crate::allocation::window::{DEFAULT_WORKING_DAYS, MAX_WORKING_DAYS};
use crate::allocation::{AllocationError, Taxonomy, WorkWeekHours};

pub const DEFAULT_TIMEZONE: &str = "Asia/Karachi";
pub const DEFAULT_CALENDAR_API_URL: &str = "https://www.googleapis.com/calendar/v3";
pub const DEFAULT_SHEETS_API_URL: &str = "https://sheets.googleapis.com/v4";
pub const DEFAULT_OAUTH_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Calendar to read and the attendee whose responses count
    pub calendar_email: String,
    pub timezone: Tz,
    pub work_week_hours: WorkWeekHours,
    pub working_days: u32,
    pub max_results: u32,
    pub taxonomy: Taxonomy,
    pub google_client_id: String,
    pub google_client_secret: String,
    pub google_refresh_token: String,
    pub calendar_api_url: String,
    pub sheets_api_url: String,
    pub oauth_token_url: String,
    pub spreadsheet_id: Option<String>,
}

fn config_error(msg: String) -> AllocationError {
    AllocationError::ConfigurationError(msg)
}

fn parse_var<T: std::str::FromStr>(
    key: &str,
    value: Option<String>,
    default: T,
) -> Result<T, AllocationError> {
    match value {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| config_error(format!("Invalid value for {}: '{}'", key, v))),
        None => Ok(default),
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, AllocationError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup. Every constraint is
    /// checked here so a bad deployment fails at startup.
    pub fn from_vars<F>(var: F) -> Result<Self, AllocationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            var(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| config_error(format!("Missing env var {}", key)))
        };

        let calendar_email = required("ALLOT_CALENDAR_EMAIL")?;

        let timezone_name = var("ALLOT_TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let timezone: Tz = timezone_name
            .parse()
            .map_err(|_| config_error(format!("Unknown timezone '{}'", timezone_name)))?;

        let hours = parse_var("ALLOT_WORK_WEEK_HOURS", var("ALLOT_WORK_WEEK_HOURS"), 40.0)?;
        let work_week_hours = WorkWeekHours::new(hours)?;

        let working_days = parse_var(
            "ALLOT_WORKING_DAYS",
            var("ALLOT_WORKING_DAYS"),
            DEFAULT_WORKING_DAYS,
        )?;
        if working_days > MAX_WORKING_DAYS {
            return Err(config_error(format!(
                "ALLOT_WORKING_DAYS must be at most {}, got {}",
                MAX_WORKING_DAYS, working_days
            )));
        }
        let max_results = parse_var("ALLOT_MAX_RESULTS", var("ALLOT_MAX_RESULTS"), 100)?;

        let taxonomy = match var("ALLOT_TAXONOMY_PATH") {
            Some(path) => Taxonomy::from_file(path)?,
            None => Taxonomy::default(),
        };

        let google_client_id = required("ALLOT_GOOGLE_CLIENT_ID")?;
        let google_client_secret = required("ALLOT_GOOGLE_CLIENT_SECRET")?;
        let google_refresh_token = required("ALLOT_GOOGLE_REFRESH_TOKEN")?;

        let calendar_api_url = var("ALLOT_CALENDAR_API_URL")
            .unwrap_or_else(|| DEFAULT_CALENDAR_API_URL.to_string());
        let sheets_api_url =
            var("ALLOT_SHEETS_API_URL").unwrap_or_else(|| DEFAULT_SHEETS_API_URL.to_string());
        let oauth_token_url =
            var("ALLOT_OAUTH_TOKEN_URL").unwrap_or_else(|| DEFAULT_OAUTH_TOKEN_URL.to_string());
        let spreadsheet_id = var("ALLOT_SPREADSHEET_ID").filter(|v| !v.is_empty());

        Ok(Self {
            calendar_email,
            timezone,
            work_week_hours,
            working_days,
            max_results,
            taxonomy,
            google_client_id,
            google_client_secret,
            google_refresh_token,
            calendar_api_url,
            sheets_api_url,
            oauth_token_url,
            spreadsheet_id,
        })
    }

    /// Defaults for everything but the identity, with placeholder
    /// credentials.
    pub fn for_identity(calendar_email: &str) -> Self {
        Self {
            calendar_email: calendar_email.to_string(),
            timezone: chrono_tz::Asia::Karachi,
            work_week_hours: WorkWeekHours::default(),
            working_days: DEFAULT_WORKING_DAYS,
            max_results: 100,
            taxonomy: Taxonomy::default(),
            google_client_id: String::from("test_client_id"),
            google_client_secret: String::from("test_client_secret"),
            google_refresh_token: String::from("test_refresh_token"),
            calendar_api_url: DEFAULT_CALENDAR_API_URL.to_string(),
            sheets_api_url: DEFAULT_SHEETS_API_URL.to_string(),
            oauth_token_url: DEFAULT_OAUTH_TOKEN_URL.to_string(),
            spreadsheet_id: None,
        }
    }
}
