//! Wish normalization and recency filtering
//!
//! Bitable rows carry heterogeneous field values (plain text, person objects,
//! epoch numbers, ISO strings). Normalization is total: any value a record
//! throws at it resolves to a default rather than failing the batch.

use std::collections::HashMap;

use bitable_api::BitableRecord;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;
use tracing::debug;

use crate::types::Wish;

/// Wishes older than this many days are dropped from the wall
pub const RECENT_WINDOW_DAYS: i64 = 30;

/// Primary (Chinese) field names used by the wish table
const CONTENT_FIELD: &str = "许愿内容";
const AUTHOR_FIELD: &str = "许愿人";
const TIME_FIELD: &str = "许愿时间";

/// Epoch values above this are milliseconds, below are seconds
const EPOCH_MILLIS_THRESHOLD: i64 = 10_000_000_000;

/// Convert an epoch value (seconds or milliseconds) to a UTC timestamp
fn parse_epoch(value: i64) -> Option<DateTime<Utc>> {
    if value > EPOCH_MILLIS_THRESHOLD {
        Utc.timestamp_millis_opt(value).single()
    } else {
        Utc.timestamp_opt(value, 0).single()
    }
}

/// Extract an epoch timestamp from a JSON number or numeric string
fn parse_epoch_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(parse_epoch),
        Value::String(s) => s.trim().parse::<i64>().ok().and_then(parse_epoch),
        _ => None,
    }
}

/// Render a field value as plain text
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Pick the first present, non-empty value among the given field names
fn field<'a>(fields: &'a HashMap<String, Value>, names: &[&str]) -> Option<&'a Value> {
    for name in names {
        match fields.get(*name) {
            None | Some(Value::Null) => continue,
            Some(Value::String(s)) if s.is_empty() => continue,
            Some(Value::Array(a)) if a.is_empty() => continue,
            Some(Value::Object(o)) if o.is_empty() => continue,
            Some(value) => return Some(value),
        }
    }
    None
}

/// First non-empty of a person object's `name`, `en_name`, `email`
fn person_name(value: &Value) -> String {
    for key in ["name", "en_name", "email"] {
        if let Some(Value::String(s)) = value.get(key) {
            if !s.is_empty() {
                return s.clone();
            }
        }
    }
    String::new()
}

/// Format an author field, which may be a person object, a list of persons
/// or plain values, or a scalar
pub fn format_author(value: &Value) -> String {
    match value {
        Value::Object(_) => person_name(value),
        Value::Array(entries) => {
            let names: Vec<String> = entries
                .iter()
                .map(|entry| match entry {
                    Value::Object(_) => person_name(entry),
                    other => stringify(other),
                })
                .filter(|name| !name.is_empty())
                .collect();
            names.join(", ")
        }
        other => stringify(other),
    }
}

fn normalize_record(record: BitableRecord) -> Wish {
    let fields = &record.fields;

    let content = field(fields, &[CONTENT_FIELD, "content"])
        .map(stringify)
        .unwrap_or_default();
    let author = field(fields, &[AUTHOR_FIELD, "author"])
        .map(format_author)
        .unwrap_or_default();

    // Creation time: explicit wish-time field wins over the row metadata;
    // a string that fails to parse keeps the metadata-derived value
    let mut created_at = record.created_time.and_then(parse_epoch);

    match field(fields, &[TIME_FIELD, "time"]) {
        Some(Value::String(s)) => {
            if let Ok(parsed) = DateTime::parse_from_rfc3339(s) {
                created_at = Some(parsed.with_timezone(&Utc));
            }
        }
        Some(value @ Value::Number(_)) => created_at = parse_epoch_value(value),
        _ => {}
    }

    let created_at = created_at.unwrap_or_else(Utc::now);

    Wish {
        content,
        author,
        created_at: created_at.to_rfc3339(),
    }
}

/// Normalize raw Bitable rows into wish records
pub fn normalize_wishes(records: Vec<BitableRecord>) -> Vec<Wish> {
    let count = records.len();
    let wishes: Vec<Wish> = records.into_iter().map(normalize_record).collect();
    debug!(count, "Normalized wishes");
    wishes
}

/// Keep only wishes created within the trailing window, preserving order.
/// A stored timestamp that fails to re-parse counts as "now" and is kept.
pub fn filter_recent(wishes: Vec<Wish>, window_days: i64) -> Vec<Wish> {
    let now = Utc::now();
    let cutoff = now - Duration::days(window_days);

    wishes
        .into_iter()
        .filter(|wish| {
            let created = DateTime::parse_from_rfc3339(&wish.created_at)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or(now);
            created >= cutoff
        })
        .collect()
}
