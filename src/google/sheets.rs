//! Google Sheets roster lookup rendered as an HTML list
use std::collections::HashMap;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use handlebars::Handlebars;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::oauth::GoogleCredentials;
use crate::allocation::{AllocationError, SheetProvider};
use crate::core::AppConfig;

const ROSTER_TEMPLATE: &str = "<ul>{{#each records}}<li><b>{{name}}</b> - <a href='{{link}}'>{{project}}</a> ({{allocation}}%)</li>{{/each}}</ul>";

#[derive(Debug, Deserialize)]
pub struct ValueRange {
    pub range: Option<String>,
    pub values: Option<Vec<Vec<String>>>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RosterRecord {
    pub name: String,
    pub project: String,
    pub link: String,
    pub allocation: String,
}

/// Treat the first row as headers and key every following row by them.
/// Sheets drops trailing empty cells so short rows are padded.
pub fn rows_to_records(values: &[Vec<String>]) -> Vec<HashMap<String, String>> {
    let Some((headers, rows)) = values.split_first() else {
        return vec![];
    };

    rows.iter()
        .map(|row| {
            headers
                .iter()
                .enumerate()
                .map(|(i, header)| (header.clone(), row.get(i).cloned().unwrap_or_default()))
                .collect()
        })
        .collect()
}

fn column(record: &HashMap<String, String>, row: usize, name: &str) -> Result<String> {
    record
        .get(name)
        .cloned()
        .ok_or_else(|| anyhow!("Row {} is missing column '{}'", row + 2, name))
}

pub fn roster_records(values: &[Vec<String>]) -> Result<Vec<RosterRecord>> {
    rows_to_records(values)
        .iter()
        .enumerate()
        .map(|(i, record)| {
            Ok(RosterRecord {
                name: column(record, i, "Name")?,
                project: column(record, i, "Project")?,
                link: column(record, i, "Link")?,
                allocation: column(record, i, "Allocation")?,
            })
        })
        .collect()
}

pub fn render_roster(records: &[RosterRecord]) -> Result<String> {
    let handlebars = Handlebars::new();
    let html = handlebars.render_template(ROSTER_TEMPLATE, &json!({ "records": records }))?;
    Ok(html)
}

pub async fn fetch_values(
    client: &Client,
    api_url: &str,
    access_token: &str,
    spreadsheet_id: &str,
    sheet_name: &str,
) -> Result<Vec<Vec<String>>> {
    let url = format!(
        "{}/spreadsheets/{}/values/{}",
        api_url,
        urlencoding::encode(spreadsheet_id),
        urlencoding::encode(sheet_name)
    );
    let res = client.get(&url).bearer_auth(access_token).send().await?;
    let status = res.status();
    let text = res.text().await.unwrap_or_default();
    if !status.is_success() {
        anyhow::bail!("Sheet fetch failed: {} ({})", status, text);
    }
    let range: ValueRange = serde_json::from_str(&text)?;
    Ok(range.values.unwrap_or_default())
}

pub struct GoogleSheets {
    client: Client,
    api_url: String,
    spreadsheet_id: Option<String>,
    credentials: GoogleCredentials,
}

impl GoogleSheets {
    pub fn new(api_url: &str, spreadsheet_id: Option<String>, credentials: GoogleCredentials) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            spreadsheet_id,
            credentials,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.sheets_api_url,
            config.spreadsheet_id.clone(),
            super::credentials(config),
        )
    }
}

#[async_trait]
impl SheetProvider for GoogleSheets {
    async fn fetch_records(&self, sheet_name: &str) -> Result<String> {
        let spreadsheet_id = self.spreadsheet_id.as_deref().ok_or_else(|| {
            AllocationError::ConfigurationError("ALLOT_SPREADSHEET_ID is not set".to_string())
        })?;

        let access_token = self.credentials.access_token(&self.client).await?;
        let values = fetch_values(
            &self.client,
            &self.api_url,
            &access_token,
            spreadsheet_id,
            sheet_name,
        )
        .await?;
        let records = roster_records(&values)?;
        tracing::debug!("Rendering {} roster records from {}", records.len(), sheet_name);
        render_roster(&records)
    }
}
