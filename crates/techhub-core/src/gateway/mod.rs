//! Content Repository Gateway - per-entity accessors over a [`RemoteStore`].
//!
//! Every accessor is fail-open: store errors are logged and surface to the
//! caller as an empty list, an empty page, or `None`. Rows that fail to
//! decode are skipped with a warning.

mod jobs;
mod posts;
mod trending;
mod videos;

use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::json;

use crate::domain::{ContentEntity, Page, PageRequest};
use crate::ports::{Filter, Order, Query, RemoteStore, Row};

pub use posts::LATEST_POSTS_LIMIT;
pub use trending::TrendingAggregator;

/// Limit used by `get_related` when the caller has no preference.
pub const RELATED_LIMIT: usize = 3;
/// Remote procedure that atomically bumps a row's `views` counter.
pub const INCREMENT_VIEWS_RPC: &str = "increment_views";

/// Tag value meaning "no filter".
const ALL_TAG: &str = "all";
/// Tag value resolved through [`ContentEntity::remote_filter`].
const REMOTE_TAG: &str = "remote";

/// Read accessors for one entity table.
pub struct Gateway<E> {
    store: Arc<dyn RemoteStore>,
    _entity: PhantomData<fn() -> E>,
}

pub type PostGateway = Gateway<crate::domain::Post>;
pub type JobGateway = Gateway<crate::domain::Job>;
pub type VideoGateway = Gateway<crate::domain::Video>;

impl<E> Clone for Gateway<E> {
    fn clone(&self) -> Self {
        Self::new(self.store.clone())
    }
}

impl<E> Gateway<E> {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }
}

impl<E: ContentEntity> Gateway<E> {
    fn query() -> Query {
        Query::table(E::TABLE).select(E::COLUMNS)
    }

    fn newest_first() -> Query {
        Self::query().order(Order::desc(E::CREATED_AT))
    }

    /// All rows, newest first.
    pub async fn get_all(&self) -> Vec<E> {
        self.fetch("get_all", Self::newest_first()).await
    }

    /// The `limit` newest rows.
    pub async fn get_latest(&self, limit: usize) -> Vec<E> {
        self.fetch("get_latest", Self::newest_first().limit(limit)).await
    }

    /// Exact primary-key lookup.
    pub async fn get_by_id(&self, id: &str) -> Option<E> {
        self.fetch_one("get_by_id", Self::query().filter(Filter::eq("id", id))).await
    }

    /// `"all"` is unfiltered and `"remote"` uses the entity's remote rule.
    /// Any other value must equal one of the `tags`, ignoring case.
    ///
    /// PostgREST has no case-insensitive array containment, so ordinary tags
    /// are matched after decoding.
    pub async fn filter_by_tag(&self, tag: &str) -> Vec<E> {
        match tag {
            ALL_TAG => self.fetch("filter_by_tag", Self::newest_first()).await,
            REMOTE_TAG => {
                let query = Self::newest_first().filter(E::remote_filter());
                self.fetch("filter_by_tag", query).await
            }
            tag => {
                let wanted = tag.to_lowercase();
                self.fetch("filter_by_tag", Self::newest_first())
                    .await
                    .into_iter()
                    .filter(|entity| entity.tags().iter().any(|t| t.to_lowercase() == wanted))
                    .collect()
            }
        }
    }

    /// One page, newest first, optionally narrowed by a case-insensitive
    /// title search applied before the range.
    pub async fn get_paginated(&self, request: PageRequest, search: Option<&str>) -> Page<E> {
        let mut query = Self::newest_first();
        if let Some(needle) = search.map(str::trim).filter(|s| !s.is_empty()) {
            query = query.filter(Filter::ilike("title", needle));
        }
        let query = query
            .range(request.first_row(), request.last_row())
            .with_count();

        match self.store.select(&query).await {
            Ok(result) => {
                let fetched = result.rows.len();
                let total = result.total.unwrap_or(request.first_row() + fetched);
                Page::new(Self::decode_all(result.rows), total, request)
            }
            Err(err) => {
                tracing::error!(
                    table = E::TABLE,
                    operation = "get_paginated",
                    error = %err,
                    "Remote store query failed, returning an empty page"
                );
                Page::empty(request)
            }
        }
    }

    /// Views descending, never-viewed rows last.
    pub async fn get_top_by_views(&self, limit: usize) -> Vec<E> {
        let query = Self::query()
            .order(Order::desc("views"))
            .order(Order::desc(E::CREATED_AT))
            .limit(limit);
        self.fetch("get_top_by_views", query).await
    }

    /// Ask the store to bump the counter. Failures are logged only.
    pub async fn increment_views(&self, id: &str) {
        let args = json!({ "table_name": E::TABLE, "row_id": id });
        match self.store.rpc(INCREMENT_VIEWS_RPC, args).await {
            Ok(_) => tracing::debug!(table = E::TABLE, id = %id, "View counted"),
            Err(err) => tracing::error!(
                table = E::TABLE,
                id = %id,
                error = %err,
                "Failed to increment views"
            ),
        }
    }

    async fn fetch(&self, operation: &'static str, query: Query) -> Vec<E> {
        match self.store.select(&query).await {
            Ok(result) => Self::decode_all(result.rows),
            Err(err) => {
                tracing::error!(
                    table = E::TABLE,
                    operation,
                    error = %err,
                    "Remote store query failed, returning an empty list"
                );
                Vec::new()
            }
        }
    }

    async fn fetch_one(&self, operation: &'static str, query: Query) -> Option<E> {
        match self.store.select(&query.limit(1)).await {
            Ok(result) => Self::decode_all(result.rows).into_iter().next(),
            Err(err) => {
                tracing::error!(
                    table = E::TABLE,
                    operation,
                    error = %err,
                    "Remote store lookup failed, treating as absent"
                );
                None
            }
        }
    }

    fn decode_all(rows: Vec<Row>) -> Vec<E> {
        rows.into_iter()
            .filter_map(|row| match E::from_row(row) {
                Ok(entity) => Some(entity),
                Err(err) => {
                    tracing::warn!(table = E::TABLE, error = %err, "Skipping undecodable row");
                    None
                }
            })
            .collect()
    }
}
