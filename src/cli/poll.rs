use anyhow::Result;
use chrono::NaiveDate;
use reqwest::Client;
use serde_json::Value;

use crate::allocation::{parse_anchor_date, week_start};

/// Request the allocation for the week containing `date` from a running
/// server at `base_url`.
pub async fn poll_week(client: &Client, base_url: &str, date: &str) -> Result<(NaiveDate, Value)> {
    let monday = week_start(parse_anchor_date(date)?);

    let mut url = reqwest::Url::parse(&format!("{}/events", base_url.trim_end_matches('/')))?;
    url.query_pairs_mut()
        .append_pair("date", &monday.format("%Y-%m-%d").to_string());

    let body: Value = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok((monday, body))
}

pub async fn run(date: String, url: String) -> Result<()> {
    match poll_week(&Client::new(), &url, &date).await {
        Ok((monday, body)) => {
            println!("Start of the week for `{}` is {}", date, monday);
            println!("Response: {}", serde_json::to_string_pretty(&body)?);
        }
        Err(e) => {
            eprintln!("Request for `{}` failed: {:#}", date, e);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn it_polls_the_week_start() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/events")
            .match_query(mockito::Matcher::UrlEncoded("date".into(), "2024-10-14".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "No events found for this date."}"#)
            .create_async()
            .await;

        let (monday, body) = poll_week(&Client::new(), &format!("{}/", server.url()), "2024-10-18")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(monday, NaiveDate::from_ymd_opt(2024, 10, 14).unwrap());
        assert_eq!(body["message"], "No events found for this date.");
    }

    #[tokio::test]
    async fn it_reports_http_errors() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/events")
            .match_query(mockito::Matcher::Any)
            .with_status(502)
            .with_body(r#"{"error": "Upstream fetch failed"}"#)
            .create_async()
            .await;

        let result = poll_week(&Client::new(), &server.url(), "2024-10-18").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn it_rejects_bad_dates_locally() {
        let result = poll_week(&Client::new(), "http://127.0.0.1:1", "18/10/2024").await;
        assert!(result.is_err());
    }
}
