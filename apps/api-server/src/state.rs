//! Application state - shared across all handlers.

use std::sync::Arc;

use techhub_core::contact::ContactService;
use techhub_core::domain::ContentEntity;
use techhub_core::ports::{RateLimiter, RemoteStore};
use techhub_core::{Gateway, PostGateway, TrendingAggregator};
use techhub_infra::InMemoryStore;

#[cfg(feature = "rate-limit")]
use techhub_infra::InMemoryRateLimiter;
#[cfg(feature = "postgrest")]
use techhub_infra::PostgrestStore;
#[cfg(feature = "resend")]
use techhub_infra::ResendMailer;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RemoteStore>,
    /// `None` when no mail provider is configured.
    pub contact: Option<Arc<ContactService>>,
    /// `None` disables contact rate limiting.
    pub contact_limiter: Option<Arc<dyn RateLimiter>>,
    pub site_url: String,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub fn new(config: &AppConfig) -> Self {
        let state = Self {
            store: Self::build_store(config),
            contact: Self::build_contact(config),
            contact_limiter: Self::build_limiter(config),
            site_url: config.site_url.clone(),
        };

        tracing::info!(
            contact_enabled = state.contact.is_some(),
            rate_limited = state.contact_limiter.is_some(),
            "Application state initialized"
        );
        state
    }

    pub fn gateway<E: ContentEntity>(&self) -> Gateway<E> {
        Gateway::new(self.store.clone())
    }

    pub fn posts(&self) -> PostGateway {
        self.gateway()
    }

    pub fn trending(&self) -> TrendingAggregator {
        TrendingAggregator::new(self.store.clone())
    }

    /// Empty tables so reads succeed with no rows.
    fn memory_store() -> Arc<dyn RemoteStore> {
        Arc::new(
            InMemoryStore::new()
                .with_table("posts")
                .with_table("jobs")
                .with_table("videos"),
        )
    }

    #[cfg(feature = "postgrest")]
    fn build_store(config: &AppConfig) -> Arc<dyn RemoteStore> {
        match &config.store {
            Some(store_config) => match PostgrestStore::new(store_config.clone()) {
                Ok(store) => Arc::new(store),
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        "Failed to configure hosted store. Using in-memory fallback."
                    );
                    Self::memory_store()
                }
            },
            None => {
                tracing::warn!(
                    "SUPABASE_URL/SUPABASE_KEY not set. Serving from an empty in-memory store."
                );
                Self::memory_store()
            }
        }
    }

    #[cfg(not(feature = "postgrest"))]
    fn build_store(_config: &AppConfig) -> Arc<dyn RemoteStore> {
        tracing::info!("Running without postgrest feature - using in-memory store");
        Self::memory_store()
    }

    #[cfg(feature = "resend")]
    fn build_contact(config: &AppConfig) -> Option<Arc<ContactService>> {
        let Some(resend) = config.resend.clone() else {
            tracing::warn!("RESEND_API_KEY not set. Contact submissions will be refused.");
            return None;
        };

        match ResendMailer::new(resend) {
            Ok(mailer) => Some(Arc::new(ContactService::new(
                Arc::new(mailer),
                config.contact.clone(),
            ))),
            Err(e) => {
                tracing::error!(error = %e, "Failed to configure mailer");
                None
            }
        }
    }

    #[cfg(not(feature = "resend"))]
    fn build_contact(_config: &AppConfig) -> Option<Arc<ContactService>> {
        tracing::info!("Running without resend feature - contact form disabled");
        None
    }

    #[cfg(feature = "rate-limit")]
    fn build_limiter(config: &AppConfig) -> Option<Arc<dyn RateLimiter>> {
        Some(Arc::new(InMemoryRateLimiter::new(
            config.contact_rate_limit.clone(),
        )))
    }

    #[cfg(not(feature = "rate-limit"))]
    fn build_limiter(_config: &AppConfig) -> Option<Arc<dyn RateLimiter>> {
        None
    }
}
