//! Remote store port - the query-capable client the gateways run against.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;

/// One persisted record as returned by the store.
pub type Row = serde_json::Map<String, Value>;

/// Rows returned by a select, plus the exact match count when it was requested.
#[derive(Debug, Clone, Default)]
pub struct Rows {
    pub rows: Vec<Row>,
    pub total: Option<usize>,
}

impl Rows {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows, total: None }
    }

    pub fn with_total(mut self, total: usize) -> Self {
        self.total = Some(total);
        self
    }
}

/// A single predicate applied by the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Column equals the value.
    Eq { column: String, value: Value },
    /// Column is not null and differs from the value.
    Neq { column: String, value: Value },
    /// Case-insensitive substring match on a text column.
    ILike { column: String, needle: String },
    /// Array column contains every listed element (exact element match).
    Contains { column: String, values: Vec<String> },
    /// Column is null or absent.
    IsNull { column: String },
    /// Any of the nested predicates holds.
    Or(Vec<Filter>),
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Eq {
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn neq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Neq {
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn ilike(column: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::ILike {
            column: column.into(),
            needle: needle.into(),
        }
    }

    pub fn contains(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Contains {
            column: column.into(),
            values: vec![value.into()],
        }
    }

    pub fn is_null(column: impl Into<String>) -> Self {
        Self::IsNull {
            column: column.into(),
        }
    }

    pub fn or(filters: Vec<Filter>) -> Self {
        Self::Or(filters)
    }
}

/// Sort key with explicit null placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
    pub nulls_first: bool,
}

impl Order {
    /// Ascending, nulls last.
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: true,
            nulls_first: false,
        }
    }

    /// Descending, nulls last.
    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ascending: false,
            nulls_first: false,
        }
    }
}

/// A select request against one table.
///
/// # Example
/// ```
/// use techhub_core::ports::{Filter, Order, Query};
///
/// let query = Query::table("jobs")
///     .filter(Filter::contains("tags", "Rust"))
///     .order(Order::desc("created_at"))
///     .range(9, 17)
///     .with_count();
/// assert_eq!(query.offset, Some(9));
/// assert_eq!(query.limit, Some(9));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub table: String,
    pub columns: String,
    pub filters: Vec<Filter>,
    pub order: Vec<Order>,
    pub offset: Option<usize>,
    pub limit: Option<usize>,
    pub count: bool,
}

impl Query {
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: "*".to_string(),
            filters: Vec::new(),
            order: Vec::new(),
            offset: None,
            limit: None,
            count: false,
        }
    }

    pub fn select(mut self, columns: impl Into<String>) -> Self {
        self.columns = columns.into();
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order.push(order);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Restrict to the zero-based rows `from..=to`.
    pub fn range(mut self, from: usize, to: usize) -> Self {
        self.offset = Some(from);
        self.limit = Some(to.saturating_sub(from).saturating_add(1));
        self
    }

    /// Ask the store for the exact number of rows matching the filters.
    pub fn with_count(mut self) -> Self {
        self.count = true;
        self
    }
}

/// Store trait - abstraction over the hosted database (PostgREST, in-memory).
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Run a select and return the raw rows.
    async fn select(&self, query: &Query) -> Result<Rows, StoreError>;

    /// Invoke a named server-side procedure.
    async fn rpc(&self, function: &str, args: Value) -> Result<Value, StoreError>;
}
