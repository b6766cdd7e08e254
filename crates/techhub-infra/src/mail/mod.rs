//! Transactional email implementations.

mod memory;

pub use memory::InMemoryMailer;

#[cfg(feature = "resend")]
mod resend;
#[cfg(feature = "resend")]
pub use self::resend::{ResendConfig, ResendMailer};
