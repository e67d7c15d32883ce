use anyhow::{Result, anyhow};
use reqwest::Client;
use std::io::{self, Write};

use crate::core::DEFAULT_OAUTH_TOKEN_URL;
use crate::google::oauth::{CALENDAR_SCOPE, SHEETS_SCOPE, exchange_code_for_token};

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_owned())
}

pub async fn run() -> Result<()> {
    let client_id = std::env::var("ALLOT_GOOGLE_CLIENT_ID")
        .map_err(|_| anyhow!("Set ALLOT_GOOGLE_CLIENT_ID in your environment"))?;
    let client_secret = std::env::var("ALLOT_GOOGLE_CLIENT_SECRET")
        .map_err(|_| anyhow!("Set ALLOT_GOOGLE_CLIENT_SECRET in your environment"))?;
    let redirect_uri = std::env::var("ALLOT_GOOGLE_REDIRECT_URI")
        .unwrap_or_else(|_| "urn:ietf:wg:oauth:2.0:oob".to_string());
    let token_url = std::env::var("ALLOT_OAUTH_TOKEN_URL")
        .unwrap_or_else(|_| DEFAULT_OAUTH_TOKEN_URL.to_string());

    let scope = format!("{} {}", CALENDAR_SCOPE, SHEETS_SCOPE);
    let auth_url = format!(
        "https://accounts.google.com/o/oauth2/v2/auth?client_id={}&redirect_uri={}&response_type=code&scope={}&access_type=offline&prompt=consent",
        urlencoding::encode(&client_id),
        urlencoding::encode(&redirect_uri),
        urlencoding::encode(&scope)
    );
    println!(
        "\nPlease open the following URL in your browser and authorize access:\n\n{}\n",
        auth_url
    );
    let code = prompt("Paste the authorization code shown by Google here: ")?;

    let token = exchange_code_for_token(
        &Client::new(),
        &token_url,
        &client_id,
        &client_secret,
        &code,
        &redirect_uri,
    )
    .await?;
    let refresh_token = token
        .refresh_token
        .ok_or(anyhow!("No refresh token in response"))?;

    println!("\nSet this in the server environment:\n\nALLOT_GOOGLE_REFRESH_TOKEN={}", refresh_token);

    Ok(())
}
