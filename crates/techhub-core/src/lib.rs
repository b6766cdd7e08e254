//! # TechHub Core
//!
//! The content layer of the TechHub portal: domain entities, row decoders,
//! the Content Repository Gateway and the ports infrastructure must
//! implement. No I/O happens here.

pub mod contact;
pub mod domain;
pub mod error;
pub mod gateway;
mod markup;
pub mod ports;
pub mod preferences;
pub mod sitemap;

pub use error::{DecodeError, StoreError};
pub use gateway::{Gateway, JobGateway, PostGateway, TrendingAggregator, VideoGateway};
