use anyhow::Result;

use crate::api;
use crate::core::AppConfig;

pub async fn run(host: String, port: String) -> Result<()> {
    // Refuse to start on a bad configuration rather than fail per request
    let config = AppConfig::from_env()?;
    api::serve(host, port, config).await
}
