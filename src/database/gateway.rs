//! Generic access to named record collections.
//!
//! Every entity route goes through the same three operations; entity-specific
//! shaping (timestamps, default status) happens in the route layer, never
//! here. Rows travel as JSON maps via `row_to_json`, so the gateway has no
//! per-entity structs and no knowledge of column types.

use serde_json::{Map, Value};
use sqlx::Row;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};

/// Options for `select_many`. The filter compares a single column for
/// equality; comparison is done on the text form of the column so uuid,
/// text, and enum-shaped columns all behave the same.
#[derive(Debug, Default, Clone)]
pub struct ListQuery {
    pub filter: Option<(String, String)>,
    pub order_desc: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Insert one record and return the stored row, including the assigned id.
///
/// The record is inserted through `jsonb_populate_record`, which converts
/// each JSON field to the column's type by name and leaves unnamed columns
/// NULL. An id is assigned here when the caller did not provide one.
pub async fn insert_one(
    collection: &str,
    mut record: Map<String, Value>,
) -> Result<Map<String, Value>, DatabaseError> {
    DatabaseManager::ensure_identifier(collection)?;

    if !record.contains_key("id") {
        record.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
    }

    let sql = format!(
        "INSERT INTO \"{0}\" SELECT * FROM jsonb_populate_record(NULL::\"{0}\", $1) \
         RETURNING row_to_json(\"{0}\".*) AS row",
        collection
    );

    let pool = DatabaseManager::pool().await?;
    let row = sqlx::query(&sql)
        .bind(Value::Object(record))
        .fetch_one(&pool)
        .await?;

    row_value(row, collection)
}

/// Select records with an optional equality filter, optional descending
/// order, and offset/limit pagination.
pub async fn select_many(
    collection: &str,
    query: ListQuery,
) -> Result<Vec<Map<String, Value>>, DatabaseError> {
    DatabaseManager::ensure_identifier(collection)?;

    let mut inner = format!("SELECT * FROM \"{}\"", collection);

    if let Some((column, _)) = &query.filter {
        DatabaseManager::ensure_identifier(column)?;
        inner.push_str(&format!(" WHERE \"{}\"::text = $1", column));
    }
    if let Some(column) = &query.order_desc {
        DatabaseManager::ensure_identifier(column)?;
        inner.push_str(&format!(" ORDER BY \"{}\" DESC", column));
    }
    if let Some(limit) = query.limit {
        inner.push_str(&format!(" LIMIT {}", limit.max(0)));
    }
    if let Some(offset) = query.offset {
        inner.push_str(&format!(" OFFSET {}", offset.max(0)));
    }

    let sql = format!("SELECT row_to_json(t.*) AS row FROM ({}) t", inner);

    let pool = DatabaseManager::pool().await?;
    let mut q = sqlx::query(&sql);
    if let Some((_, value)) = &query.filter {
        q = q.bind(value.clone());
    }

    let rows = q.fetch_all(&pool).await?;
    rows.into_iter().map(|r| row_value(r, collection)).collect()
}

/// Update every record whose `field` equals `value`, setting the patch
/// columns plus `updated_at`. Returns the updated rows (possibly empty).
pub async fn update_where(
    collection: &str,
    field: &str,
    value: &str,
    patch: Map<String, Value>,
) -> Result<Vec<Map<String, Value>>, DatabaseError> {
    DatabaseManager::ensure_identifier(collection)?;
    DatabaseManager::ensure_identifier(field)?;

    let mut assignments = Vec::with_capacity(patch.len() + 1);
    let mut params = Vec::with_capacity(patch.len());
    for (column, patch_value) in patch {
        DatabaseManager::ensure_identifier(&column)?;
        params.push(patch_value);
        assignments.push(format!("\"{}\" = ${}", column, params.len()));
    }
    assignments.push("\"updated_at\" = now()".to_string());

    let sql = format!(
        "UPDATE \"{0}\" SET {1} WHERE \"{2}\"::text = ${3} RETURNING row_to_json(\"{0}\".*) AS row",
        collection,
        assignments.join(", "),
        field,
        params.len() + 1
    );

    let pool = DatabaseManager::pool().await?;
    let mut q = sqlx::query(&sql);
    for p in params {
        q = bind_param(q, p);
    }
    q = q.bind(value.to_string());

    let rows = q.fetch_all(&pool).await?;
    rows.into_iter().map(|r| row_value(r, collection)).collect()
}

fn row_value(row: sqlx::postgres::PgRow, collection: &str) -> Result<Map<String, Value>, DatabaseError> {
    let value: Value = row
        .try_get("row")
        .map_err(|_| DatabaseError::UnexpectedRow(collection.to_string()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(DatabaseError::UnexpectedRow(collection.to_string())),
    }
}

fn bind_param<'q>(
    q: sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>,
    v: Value,
) -> sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments> {
    match v {
        Value::Null => {
            let none: Option<String> = None;
            q.bind(none)
        }
        Value::Bool(b) => q.bind(b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else {
                q.bind(n.as_f64().unwrap_or(0.0))
            }
        }
        Value::String(s) => q.bind(s),
        other => q.bind(other),
    }
}
