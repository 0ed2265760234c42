//! Metric aggregation over a date range.
//!
//! The gateway only knows single-field equality filters, so range predicates
//! are applied here over the fetched rows. A metric that was not requested
//! is absent from the response entirely, not present-and-empty.

use std::collections::BTreeMap;

use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};

use crate::auth::AuthUser;
use crate::database::gateway::{self, ListQuery};
use crate::error::ApiError;
use crate::models::AnalyticsRequest;
use crate::validation::ValidJson;

/// POST /api/analytics
pub async fn report(
    Extension(_user): Extension<AuthUser>,
    ValidJson(body): ValidJson<AnalyticsRequest>,
) -> Result<Json<Value>, ApiError> {
    let mut data = Map::new();

    if body.wants("revenue") {
        let rows = gateway::select_many("payments", ListQuery::default()).await?;
        let (total, count) = sum_revenue(&rows, body.start_date, body.end_date);
        data.insert("revenue".to_string(), json!({ "total": total, "count": count }));
    }

    if body.wants("clients") {
        let rows = gateway::select_many("clients", ListQuery::default()).await?;
        data.insert("clients".to_string(), counts_to_value(count_by(&rows, "status")));
    }

    if body.wants("projects") {
        let rows = gateway::select_many("projects", ListQuery::default()).await?;
        data.insert("projects".to_string(), counts_to_value(count_by(&rows, "status")));
    }

    if body.wants("appointments") {
        let rows = gateway::select_many("appointments", ListQuery::default()).await?;
        let counts = count_by_in_range(&rows, "type", "date_time", body.start_date, body.end_date);
        data.insert("appointments".to_string(), counts_to_value(counts));
    }

    Ok(Json(json!({
        "success": true,
        "data": data,
        "period": {
            "start": body.start_date,
            "end": body.end_date,
        },
    })))
}

fn parse_ts(value: Option<&Value>) -> Option<DateTime<Utc>> {
    value
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn in_range(
    row: &Map<String, Value>,
    field: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> bool {
    // Both bounds are inclusive.
    matches!(parse_ts(row.get(field)), Some(ts) if ts >= start && ts <= end)
}

fn sum_revenue(
    rows: &[Map<String, Value>],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> (f64, usize) {
    let mut total = 0.0;
    let mut count = 0;
    for row in rows {
        if in_range(row, "payment_date", start, end) {
            total += row.get("amount").and_then(Value::as_f64).unwrap_or(0.0);
            count += 1;
        }
    }
    (total, count)
}

fn count_by(rows: &[Map<String, Value>], field: &str) -> BTreeMap<String, i64> {
    let mut counts = BTreeMap::new();
    for row in rows {
        if let Some(key) = row.get(field).and_then(Value::as_str) {
            *counts.entry(key.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

fn count_by_in_range(
    rows: &[Map<String, Value>],
    field: &str,
    ts_field: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> BTreeMap<String, i64> {
    let mut counts = BTreeMap::new();
    for row in rows {
        if !in_range(row, ts_field, start, end) {
            continue;
        }
        if let Some(key) = row.get(field).and_then(Value::as_str) {
            *counts.entry(key.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

fn counts_to_value(counts: BTreeMap<String, i64>) -> Value {
    let mut map = Map::new();
    for (key, count) in counts {
        map.insert(key, Value::from(count));
    }
    Value::Object(map)
}
