//! In-memory store that evaluates queries the way the hosted store does.
//!
//! This is the fallback when no hosted store is configured, and the fixture
//! store for tests.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use techhub_core::StoreError;
use techhub_core::gateway::INCREMENT_VIEWS_RPC;
use techhub_core::ports::{Filter, Order, Query, RemoteStore, Row, Rows};

/// In-memory table store.
///
/// Unknown tables are rejected like a missing relation. Non-object seed
/// values are ignored.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<HashMap<String, Vec<Row>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style seeding, usable before the store is shared.
    pub fn with_rows(mut self, table: &str, rows: impl IntoIterator<Item = Value>) -> Self {
        self.tables
            .get_mut()
            .entry(table.to_string())
            .or_default()
            .extend(rows.into_iter().filter_map(into_row));
        self
    }

    /// Register an empty table.
    pub fn with_table(self, table: &str) -> Self {
        self.with_rows(table, Vec::new())
    }

    pub async fn insert(&self, table: &str, row: Value) {
        if let Some(row) = into_row(row) {
            self.tables
                .write()
                .await
                .entry(table.to_string())
                .or_default()
                .push(row);
        }
    }

    /// Snapshot of a table's rows in insertion order.
    pub async fn rows(&self, table: &str) -> Vec<Row> {
        self.tables
            .read()
            .await
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    fn increment_views(rows: &mut [Row], row_id: &str) -> usize {
        let mut touched = 0;
        for row in rows
            .iter_mut()
            .filter(|row| row.get("id").and_then(scalar_text).as_deref() == Some(row_id))
        {
            let current = row.get("views").and_then(Value::as_u64).unwrap_or(0);
            row.insert("views".to_string(), Value::from(current.saturating_add(1)));
            touched += 1;
        }
        touched
    }
}

#[async_trait]
impl RemoteStore for InMemoryStore {
    async fn select(&self, query: &Query) -> Result<Rows, StoreError> {
        let tables = self.tables.read().await;
        let table = tables.get(&query.table).ok_or_else(|| missing_table(&query.table))?;

        let mut matched: Vec<&Row> = table
            .iter()
            .filter(|row| query.filters.iter().all(|f| matches(row, f)))
            .collect();
        // Stable sort keeps insertion order for ties.
        matched.sort_by(|a, b| compare_rows(a, b, &query.order));

        let total = matched.len();
        let rows = matched
            .into_iter()
            .skip(query.offset.unwrap_or(0))
            .take(query.limit.unwrap_or(usize::MAX))
            .map(|row| project(row, &query.columns))
            .collect();

        let rows = Rows::new(rows);
        Ok(if query.count { rows.with_total(total) } else { rows })
    }

    async fn rpc(&self, function: &str, args: Value) -> Result<Value, StoreError> {
        if function != INCREMENT_VIEWS_RPC {
            return Err(StoreError::UnknownProcedure(function.to_string()));
        }

        let table_name = args
            .get("table_name")
            .and_then(Value::as_str)
            .ok_or_else(|| StoreError::Rejected {
                status: 400,
                message: "missing argument table_name".to_string(),
            })?;
        let row_id = args
            .get("row_id")
            .and_then(scalar_text)
            .ok_or_else(|| StoreError::Rejected {
                status: 400,
                message: "missing argument row_id".to_string(),
            })?;

        let mut tables = self.tables.write().await;
        let rows = tables
            .get_mut(table_name)
            .ok_or_else(|| missing_table(table_name))?;
        let touched = Self::increment_views(rows, &row_id);
        tracing::debug!(table = table_name, row_id = %row_id, touched, "Views incremented");

        Ok(Value::Null)
    }
}

fn into_row(value: Value) -> Option<Row> {
    match value {
        Value::Object(row) => Some(row),
        _ => None,
    }
}

fn missing_table(table: &str) -> StoreError {
    StoreError::Rejected {
        status: 404,
        message: format!("relation \"public.{table}\" does not exist"),
    }
}

/// Strings, numbers and booleans compared by their text form.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn present(row: &Row, column: &str) -> Option<Value> {
    row.get(column).filter(|v| !v.is_null()).cloned()
}

fn same_value(stored: &Value, wanted: &Value) -> bool {
    stored == wanted
        || matches!((scalar_text(stored), scalar_text(wanted)), (Some(a), Some(b)) if a == b)
}

fn matches(row: &Row, filter: &Filter) -> bool {
    match filter {
        Filter::Eq { column, value } => present(row, column).is_some_and(|v| same_value(&v, value)),
        // SQL semantics: `NULL <> x` is not true.
        Filter::Neq { column, value } => {
            present(row, column).is_some_and(|v| !same_value(&v, value))
        }
        Filter::ILike { column, needle } => row
            .get(column)
            .and_then(Value::as_str)
            .is_some_and(|text| text.to_lowercase().contains(&needle.to_lowercase())),
        Filter::Contains { column, values } => {
            row.get(column)
                .and_then(Value::as_array)
                .is_some_and(|items| {
                    values
                        .iter()
                        .all(|wanted| items.iter().any(|item| item.as_str() == Some(wanted)))
                })
        }
        Filter::IsNull { column } => present(row, column).is_none(),
        Filter::Or(branches) => branches.iter().any(|f| matches(row, f)),
    }
}

fn compare_rows(a: &Row, b: &Row, order: &[Order]) -> Ordering {
    order
        .iter()
        .map(|key| compare_column(a.get(&key.column), b.get(&key.column), key))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

fn compare_column(a: Option<&Value>, b: Option<&Value>, key: &Order) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());

    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => {
            if key.nulls_first { Ordering::Less } else { Ordering::Greater }
        }
        (Some(_), None) => {
            if key.nulls_first { Ordering::Greater } else { Ordering::Less }
        }
        (Some(a), Some(b)) => {
            let ordering = compare_values(a, b);
            if key.ascending { ordering } else { ordering.reverse() }
        }
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

/// Apply a `select` column list. `*` keeps every column.
fn project(row: &Row, columns: &str) -> Row {
    if columns.trim() == "*" {
        return row.clone();
    }
    columns
        .split(',')
        .map(str::trim)
        .filter_map(|column| row.get(column).map(|v| (column.to_string(), v.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> InMemoryStore {
        InMemoryStore::new().with_rows(
            "posts",
            vec![
                json!({ "id": 1, "title": "Rust async", "views": 50, "type": "tutorial", "tags": ["Rust"] }),
                json!({ "id": 2, "title": "Vue tips", "views": null, "tags": ["Vue", "remote"] }),
                json!({ "id": 3, "title": "Rust traits", "views": 10, "type": "article" }),
            ],
        )
    }

    fn ids(rows: &Rows) -> Vec<i64> {
        rows.rows
            .iter()
            .filter_map(|r| r.get("id").and_then(Value::as_i64))
            .collect()
    }

    #[tokio::test]
    async fn test_desc_order_puts_nulls_last() {
        let rows = store()
            .select(&Query::table("posts").order(Order::desc("views")))
            .await
            .unwrap();
        assert_eq!(ids(&rows), vec![1, 3, 2]);
    }

    #[tokio::test]
    async fn test_neq_skips_nulls() {
        let rows = store()
            .select(&Query::table("posts").filter(Filter::neq("type", "tutorial")))
            .await
            .unwrap();
        assert_eq!(ids(&rows), vec![3]);
    }

    #[tokio::test]
    async fn test_filters_count_and_range() {
        let rows = store()
            .select(
                &Query::table("posts")
                    .filter(Filter::ilike("title", "RUST"))
                    .range(1, 1)
                    .with_count(),
            )
            .await
            .unwrap();
        assert_eq!(ids(&rows), vec![3]);
        assert_eq!(rows.total, Some(2));
    }

    #[tokio::test]
    async fn test_contains_is_exact() {
        let rows = store()
            .select(&Query::table("posts").filter(Filter::contains("tags", "rust")))
            .await
            .unwrap();
        assert!(rows.rows.is_empty());
    }

    #[tokio::test]
    async fn test_projection() {
        let rows = store()
            .select(&Query::table("posts").select("id, views").limit(1))
            .await
            .unwrap();
        assert_eq!(rows.rows[0].len(), 2);
        assert!(rows.rows[0].get("title").is_none());
    }

    #[tokio::test]
    async fn test_unknown_table_is_rejected() {
        let err = store().select(&Query::table("nope")).await.unwrap_err();
        assert!(matches!(err, StoreError::Rejected { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_increment_views_rpc() {
        let store = store();
        for _ in 0..2 {
            store
                .rpc(INCREMENT_VIEWS_RPC, json!({ "table_name": "posts", "row_id": "2" }))
                .await
                .unwrap();
        }
        let rows = store.rows("posts").await;
        assert_eq!(rows[1].get("views"), Some(&json!(2)));

        let err = store.rpc("drop_everything", json!({})).await.unwrap_err();
        assert!(matches!(err, StoreError::UnknownProcedure(_)));
    }
}
