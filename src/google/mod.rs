//! Google API collaborators: Calendar for events, Sheets for the
//! roster, OAuth for both.
pub mod gcal;
pub mod oauth;
pub mod sheets;

pub use gcal::GoogleCalendar;
pub use sheets::GoogleSheets;

use crate::core::AppConfig;
use oauth::GoogleCredentials;

pub fn credentials(config: &AppConfig) -> GoogleCredentials {
    GoogleCredentials {
        token_url: config.oauth_token_url.clone(),
        client_id: config.google_client_id.clone(),
        client_secret: config.google_client_secret.clone(),
        refresh_token: config.google_refresh_token.clone(),
    }
}
