use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::allocation::allocate_for_date;
use crate::api::public::events::EventsResponse;
use crate::core::AppConfig;
use crate::google::GoogleCalendar;

pub async fn run(date: String, include_events: bool) -> Result<()> {
    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env()?;
    let calendar = GoogleCalendar::from_config(&config);

    let aggregation = allocate_for_date(&date, &config, &calendar).await?;
    let resp = EventsResponse::from_aggregation(aggregation, include_events);
    println!("{}", serde_json::to_string_pretty(&resp)?);

    Ok(())
}
