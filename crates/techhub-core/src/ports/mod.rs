//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod mailer;
mod preferences;
mod rate_limit;
mod store;

pub use mailer::{MailError, Mailer, OutgoingEmail};
pub use preferences::PreferenceStore;
pub use rate_limit::{RateLimitError, RateLimitResult, RateLimiter};
pub use store::{Filter, Order, Query, RemoteStore, Row, Rows};
