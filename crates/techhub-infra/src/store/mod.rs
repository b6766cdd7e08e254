//! Remote store implementations.

mod memory;

pub use memory::InMemoryStore;

#[cfg(feature = "postgrest")]
mod postgrest;
#[cfg(feature = "postgrest")]
pub use self::postgrest::{PostgrestStore, StoreConfig};
