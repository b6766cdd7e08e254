//! # TechHub Infrastructure
//!
//! Concrete implementations of the ports defined in `techhub-core`:
//! the hosted store client, transactional email and rate limiting.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgrest` - Hosted store over PostgREST via reqwest
//! - `resend` - Contact email delivery through Resend
//! - `rate-limit` - Rate limiting via governor

pub mod mail;
pub mod store;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

// Re-exports - In-Memory
pub use mail::InMemoryMailer;
pub use store::InMemoryStore;

#[cfg(feature = "rate-limit")]
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};

// Re-exports - Hosted services
#[cfg(feature = "postgrest")]
pub use store::{PostgrestStore, StoreConfig};
#[cfg(feature = "resend")]
pub use mail::{ResendConfig, ResendMailer};
