//! Application configuration loaded from environment variables.

use std::env;

use techhub_core::contact::ContactSettings;

#[cfg(feature = "rate-limit")]
use techhub_infra::RateLimitConfig;
#[cfg(feature = "resend")]
use techhub_infra::ResendConfig;
#[cfg(feature = "postgrest")]
use techhub_infra::StoreConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Public origin used for absolute URLs in the sitemap.
    pub site_url: String,
    pub contact: ContactSettings,
    /// `None` runs the server on an empty in-memory store.
    #[cfg(feature = "postgrest")]
    pub store: Option<StoreConfig>,
    /// `None` disables contact delivery.
    #[cfg(feature = "resend")]
    pub resend: Option<ResendConfig>,
    #[cfg(feature = "rate-limit")]
    pub contact_rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = ContactSettings::default();

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            site_url: env::var("SITE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string()),
            contact: ContactSettings {
                from: env::var("CONTACT_FROM_EMAIL").unwrap_or(defaults.from),
                destination: env::var("CONTACT_TO_EMAIL").unwrap_or(defaults.destination),
            },
            #[cfg(feature = "postgrest")]
            store: StoreConfig::from_env(),
            #[cfg(feature = "resend")]
            resend: ResendConfig::from_env(),
            #[cfg(feature = "rate-limit")]
            contact_rate_limit: RateLimitConfig::from_env(),
        }
    }
}
