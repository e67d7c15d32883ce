//! Google Calendar v3 events listing
use anyhow::Result;
use async_trait::async_trait;
use chrono::SecondsFormat;
use reqwest::Client;
use serde::Deserialize;

use super::oauth::GoogleCredentials;
use crate::allocation::{CalendarProvider, EventsQuery, RawEvent};
use crate::core::AppConfig;

#[derive(Debug, Deserialize)]
pub struct ListEventsResponse {
    pub items: Option<Vec<RawEvent>>,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

/// List events on `query.calendar_id`, expanded and ordered by start time.
pub async fn list_events(
    client: &Client,
    api_url: &str,
    access_token: &str,
    query: &EventsQuery,
) -> Result<Vec<RawEvent>> {
    let url = format!(
        "{}/calendars/{}/events",
        api_url,
        urlencoding::encode(&query.calendar_id)
    );
    let res = client
        .get(&url)
        .bearer_auth(access_token)
        .query(&[
            (
                "timeMin",
                query.time_min.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            ),
            (
                "timeMax",
                query.time_max.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            ),
            ("maxResults", query.max_results.to_string()),
            ("singleEvents", EventsQuery::SINGLE_EVENTS.to_string()),
            ("orderBy", EventsQuery::ORDER_BY.to_string()),
        ])
        .send()
        .await?;
    let status = res.status();
    let text = res.text().await.unwrap_or_default();
    if !status.is_success() {
        anyhow::bail!("Calendar fetch failed: {} ({})", status, text);
    }

    let resp: ListEventsResponse = serde_json::from_str(&text)?;
    if resp.next_page_token.is_some() {
        tracing::warn!(
            "More than {} events in window for {}, remaining pages ignored",
            query.max_results,
            query.calendar_id
        );
    }
    Ok(resp.items.unwrap_or_default())
}

pub struct GoogleCalendar {
    client: Client,
    api_url: String,
    credentials: GoogleCredentials,
}

impl GoogleCalendar {
    pub fn new(api_url: &str, credentials: GoogleCredentials) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.calendar_api_url, super::credentials(config))
    }
}

#[async_trait]
impl CalendarProvider for GoogleCalendar {
    async fn list_events(&self, query: &EventsQuery) -> Result<Vec<RawEvent>> {
        let access_token = self.credentials.access_token(&self.client).await?;
        list_events(&self.client, &self.api_url, &access_token, query).await
    }
}
