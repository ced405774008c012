//! Record helpers: deep merge, pick, omit (v0.1)
//!
//! Records are JSON objects. With `preserve_order` the map keeps insertion
//! order, so overwriting a key keeps its position and new keys append.

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::error::{ArgPosition, Result, UtilError};

type Record = Map<String, Value>;

const RECORD: &str = "a non-null object";

fn as_record(value: &Value, position: ArgPosition) -> Result<&Record> {
    value
        .as_object()
        .ok_or_else(|| UtilError::invalid(position, RECORD))
}

/// Recursively merge `source` into a copy of `target`
///
/// Per key of `source`:
/// - absent from `target`: taken from `source`
/// - both objects: merged recursively
/// - both arrays: concatenated, target first, duplicates kept
/// - anything else (scalars, null, array/object mismatch): `source` wins
///
/// Keys only in `target` are kept as they are. Neither input is modified.
pub fn deep_merge(target: &Value, source: &Value) -> Result<Value> {
    let target = as_record(target, ArgPosition::First)?;
    let source = as_record(source, ArgPosition::Second)?;
    debug!(
        target_keys = target.len(),
        source_keys = source.len(),
        "deep merge"
    );
    Ok(Value::Object(merge_records(target, source)))
}

/// Fold [`deep_merge`] over a list of records, starting from `{}`
pub fn deep_merge_all(records: &[Value]) -> Result<Value> {
    let mut merged = Record::new();
    for (i, record) in records.iter().enumerate() {
        let record = as_record(record, ArgPosition::Index(i))?;
        merged = merge_records(&merged, record);
    }
    Ok(Value::Object(merged))
}

fn merge_records(target: &Record, source: &Record) -> Record {
    let mut result = target.clone();
    for (key, incoming) in source {
        let merged = match (target.get(key), incoming) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                trace!(key = %key, "merging nested record");
                Value::Object(merge_records(existing, incoming))
            }
            (Some(Value::Array(existing)), Value::Array(incoming)) => {
                trace!(key = %key, "concatenating sequences");
                Value::Array(existing.iter().chain(incoming).cloned().collect())
            }
            _ => incoming.clone(),
        };
        result.insert(key.clone(), merged);
    }
    result
}

/// New record with only `keys` that exist in `record`, in the order of `keys`
pub fn pick<S: AsRef<str>>(record: &Value, keys: &[S]) -> Result<Value> {
    let record = as_record(record, ArgPosition::First)?;
    let picked = keys
        .iter()
        .filter_map(|key| {
            let key = key.as_ref();
            record.get(key).map(|v| (key.to_string(), v.clone()))
        })
        .collect();
    Ok(Value::Object(picked))
}

/// Copy of `record` without `keys`, original order kept
pub fn omit<S: AsRef<str>>(record: &Value, keys: &[S]) -> Result<Value> {
    let record = as_record(record, ArgPosition::First)?;
    let omitted = record
        .iter()
        .filter(|(k, _)| !keys.iter().any(|key| key.as_ref() == k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    Ok(Value::Object(omitted))
}
