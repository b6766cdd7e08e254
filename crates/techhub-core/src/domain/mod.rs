//! Domain entities - the shapes handed to the portal's pages.

mod job;
mod page;
mod post;
mod row;
mod trending;
mod video;

pub use job::{Job, JobKind};
pub use page::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, PageRequest};
pub use post::{Author, Post, PostKind};
pub use trending::TrendingTopic;
pub use video::Video;

use crate::error::DecodeError;
use crate::ports::{Filter, Row};

/// A read-only entity backed by one store table.
pub trait ContentEntity: Sized + Send + Sync + 'static {
    /// Table the rows live in.
    const TABLE: &'static str;
    /// Short name used in logs and decode errors.
    const KIND: &'static str;
    /// Columns requested on every select.
    const COLUMNS: &'static str = "*";
    /// Column used for "newest first" ordering.
    const CREATED_AT: &'static str = "created_at";
    /// Limit used by `get_latest` when the caller has no preference.
    const DEFAULT_LIMIT: usize;

    /// Decode one raw row, applying defaults for optional fields.
    fn from_row(row: Row) -> Result<Self, DecodeError>;

    fn id(&self) -> &str;

    fn tags(&self) -> &[String];

    /// Predicate behind the `"remote"` pseudo-tag.
    fn remote_filter() -> Filter {
        Filter::contains("tags", "remote")
    }
}
