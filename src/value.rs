//! Sequence operations over JSON documents (v0.1)
//!
//! These take untyped [`Value`]s, so every entry point validates its
//! arguments eagerly and reports the failing position before doing any work.
//! Grouping results are JSON records, which means keys are strings: a numeric
//! key `1` and a string key `"1"` land in the same bucket.

use std::cmp::Ordering;
use std::str::FromStr;

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::array::{self, Direction, OrderKey};
use crate::error::{ArgPosition, Result, UtilError};
use crate::key::RecordKey;
use crate::path::Path;
use crate::selector::Selector;

const SEQUENCE: &str = "an array";

fn as_sequence(value: &Value, position: ArgPosition) -> Result<&Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| UtilError::invalid(position, SEQUENCE))
}

/// Group items into a record of buckets keyed by `selector`
#[instrument(skip_all)]
pub fn group_by<'a>(items: &Value, selector: impl Into<Selector<'a>>) -> Result<Value> {
    let items = as_sequence(items, ArgPosition::First)?;
    let key_fn = selector.into().resolve(ArgPosition::Second)?;

    let groups = array::group_by(items.iter(), |item| key_fn.key(item));
    debug!(items = items.len(), buckets = groups.len(), "grouped");

    Ok(Value::Object(
        groups
            .into_iter()
            .map(|(key, bucket)| {
                (
                    key.into_string(),
                    Value::Array(bucket.into_iter().cloned().collect()),
                )
            })
            .collect(),
    ))
}

/// Count items per key, as a record of counts
#[instrument(skip_all)]
pub fn count_by<'a>(items: &Value, selector: impl Into<Selector<'a>>) -> Result<Value> {
    let items = as_sequence(items, ArgPosition::First)?;
    let key_fn = selector.into().resolve(ArgPosition::Second)?;

    let counts = array::count_by(items.iter(), |item| key_fn.key(item));
    Ok(Value::Object(
        counts
            .into_iter()
            .map(|(key, n)| (key.into_string(), Value::from(n)))
            .collect(),
    ))
}

/// Deduplicate items
///
/// Without a selector, items compare by deep value. With one, the first item
/// per key survives.
#[instrument(skip_all)]
pub fn unique(items: &Value, selector: Option<Selector<'_>>) -> Result<Value> {
    let items = as_sequence(items, ArgPosition::First)?;
    let key_fn = selector
        .map(|s| s.resolve(ArgPosition::Second))
        .transpose()?;

    let out = match key_fn {
        None => array::unique(items),
        Some(key_fn) => array::unique_by(items, |item| key_fn.key(item)),
    };
    debug!(items = items.len(), kept = out.len(), "deduplicated");
    Ok(Value::Array(out))
}

/// Split into chunks of `size`
pub fn chunk(items: &Value, size: usize) -> Result<Value> {
    let items = as_sequence(items, ArgPosition::First)?;
    let chunks = array::chunk(items, size)?;
    Ok(Value::Array(chunks.into_iter().map(Value::Array).collect()))
}

/// Build a record from `[key, value]` pairs; the last value for a key wins
pub fn from_pairs(pairs: &Value) -> Result<Value> {
    let pairs = as_sequence(pairs, ArgPosition::First)?;
    let mut entries = Vec::with_capacity(pairs.len());
    for (i, pair) in pairs.iter().enumerate() {
        match pair.as_array().map(Vec::as_slice) {
            Some([key, value]) => entries.push((RecordKey::from(key).into_string(), value.clone())),
            _ => return Err(UtilError::invalid(ArgPosition::Index(i), "a [key, value] pair")),
        }
    }
    Ok(Value::Object(array::from_pairs(entries).into_iter().collect::<Map<_, _>>()))
}

/// One `order_by` criterion: a path and a direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSpec {
    pub path: Path,
    pub direction: Direction,
}

impl FromStr for OrderSpec {
    type Err = UtilError;

    /// `PATH`, `PATH:asc` or `PATH:desc`
    fn from_str(spec: &str) -> Result<Self> {
        let (path, direction) = match spec.rsplit_once(':') {
            Some((path, dir)) => {
                let direction = dir.parse().map_err(|_| UtilError::OrderSpec {
                    spec: spec.to_string(),
                })?;
                (path, direction)
            }
            None => (spec, Direction::Asc),
        };
        Ok(Self {
            path: Path::parse(path)?,
            direction,
        })
    }
}

/// Stable multi-key sort of a JSON array
///
/// Missing fields sort like `null`: after every present value, regardless
/// of direction.
#[instrument(skip_all)]
pub fn order_by(items: &Value, orders: &[OrderSpec]) -> Result<Value> {
    let items = as_sequence(items, ArgPosition::First)?;
    let keys: Vec<OrderKey<'_, Value>> = orders
        .iter()
        .map(|spec| {
            OrderKey::by(
                move |a: &Value, b: &Value| {
                    compare_fields(spec.path.resolve(a), spec.path.resolve(b), spec.direction)
                },
                Direction::Asc,
            )
        })
        .collect();
    Ok(Value::Array(array::order_by(items, &keys)))
}

fn compare_fields(a: Option<&Value>, b: Option<&Value>, direction: Direction) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let ord = compare_values(a, b);
            match direction {
                Direction::Asc => ord,
                Direction::Desc => ord.reverse(),
            }
        }
    }
}

/// Total order over JSON values: by type rank, then within the type
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => {
            let a = a.as_f64().unwrap_or(0.0);
            let b = b.as_f64().unwrap_or(0.0);
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Array(a), Value::Array(b)) => a.len().cmp(&b.len()),
        (Value::Object(a), Value::Object(b)) => a.len().cmp(&b.len()),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn group_by_path() {
        let items = json!([
            {"type": "a", "value": 1},
            {"type": "a", "value": 1},
            {"type": "b", "value": 1},
            {"type": "c", "value": 1}
        ]);
        let groups = group_by(&items, "$.type").unwrap();
        assert_eq!(
            groups,
            json!({
                "a": [{"type": "a", "value": 1}, {"type": "a", "value": 1}],
                "b": [{"type": "b", "value": 1}],
                "c": [{"type": "c", "value": 1}]
            })
        );
    }

    #[test]
    fn group_by_floor_function() {
        let floor = |v: &Value| RecordKey::from(v.as_f64().unwrap_or(f64::NAN).floor());
        let groups = group_by(&json!([1, 1.2, 2, 2.4, 3]), Selector::func(&floor)).unwrap();
        assert_eq!(groups, json!({"1": [1, 1.2], "2": [2, 2.4], "3": [3]}));
        let keys: Vec<_> = groups.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["1", "2", "3"]);
    }

    #[test]
    fn group_by_numeric_and_string_keys_share_bucket() {
        let groups = group_by(&json!([1, 2, 3, "1", "2"]), "$").unwrap();
        assert_eq!(groups, json!({"1": [1, "1"], "2": [2, "2"], "3": [3]}));
    }

    #[test]
    fn group_by_empty() {
        assert_eq!(group_by(&json!([]), "$.a").unwrap(), json!({}));
    }

    #[test]
    fn group_by_rejects_bad_arguments() {
        for bad in [json!(null), json!(123), json!("string"), json!({})] {
            let err = group_by(&bad, "$").unwrap_err();
            assert_eq!(err.position(), Some(ArgPosition::First));
            assert!(err.to_string().contains("an array for the first argument"));
        }
        let err = group_by(&json!([]), "a..b").unwrap_err();
        assert_eq!(err.position(), Some(ArgPosition::Second));
    }

    #[test]
    fn count_by_path() {
        let counts = count_by(&json!([{"k": "x"}, {"k": "y"}, {"k": "x"}, {}]), "$.k").unwrap();
        assert_eq!(counts, json!({"x": 2, "y": 1, "undefined": 1}));
    }

    #[test]
    fn unique_default_equality() {
        assert_eq!(
            unique(&json!([1, 2, 3, 2, 3, 4, 3, 2, 1, 3]), None).unwrap(),
            json!([1, 2, 3, 4])
        );
        assert_eq!(
            unique(&json!([1, "1", 2, "2", 3, 2]), None).unwrap(),
            json!([1, "1", 2, "2", 3])
        );
        assert_eq!(
            unique(&json!([{"a": 1, "b": 2}, {"b": 2, "a": 1}, {"a": 2}]), None).unwrap(),
            json!([{"a": 1, "b": 2}, {"a": 2}])
        );
    }

    #[test]
    fn unique_keyed_first_wins() {
        let items = json!([
            {"name": "JohnDoe", "age": 25},
            {"name": "JohnDoe", "age": 25},
            {"name": "JohnDoe", "age": 25},
            {"name": "JaneDoe", "age": 25},
            {"name": "JaneDoe", "age": 30}
        ]);
        let name_age = |v: &Value| RecordKey::from(format!("{}-{}", v["name"], v["age"]));
        assert_eq!(
            unique(&items, Some(Selector::func(&name_age))).unwrap(),
            json!([
                {"name": "JohnDoe", "age": 25},
                {"name": "JaneDoe", "age": 25},
                {"name": "JaneDoe", "age": 30}
            ])
        );
        assert_eq!(
            unique(&items, Some("$.name".into())).unwrap(),
            json!([{"name": "JohnDoe", "age": 25}, {"name": "JaneDoe", "age": 25}])
        );
    }

    #[test]
    fn unique_rejects_bad_arguments() {
        let err = unique(&json!(123), None).unwrap_err();
        assert_eq!(err.position(), Some(ArgPosition::First));
        let err = unique(&json!([]), Some("[".into())).unwrap_err();
        assert_eq!(err.position(), Some(ArgPosition::Second));
    }

    #[test]
    fn chunk_json() {
        assert_eq!(chunk(&json!([{}, {}, {}]), 2).unwrap(), json!([[{}, {}], [{}]]));
        assert_eq!(chunk(&json!(null), 2).unwrap_err().position(), Some(ArgPosition::First));
        assert_eq!(chunk(&json!([1]), 0).unwrap_err().position(), Some(ArgPosition::Second));
    }

    #[test]
    fn from_pairs_json() {
        assert_eq!(from_pairs(&json!([["a", 1], ["b", 2]])).unwrap(), json!({"a": 1, "b": 2}));
        assert_eq!(from_pairs(&json!([["a", 1], ["a", 2]])).unwrap(), json!({"a": 2}));
        assert_eq!(from_pairs(&json!([])).unwrap(), json!({}));
        let err = from_pairs(&json!([["a", 1], ["b"]])).unwrap_err();
        assert_eq!(err.position(), Some(ArgPosition::Index(1)));
    }

    #[test]
    fn order_spec_parsing() {
        let spec: OrderSpec = "$.age:desc".parse().unwrap();
        assert_eq!(spec.direction, Direction::Desc);
        assert_eq!(spec.path.as_str(), "$.age");
        let spec: OrderSpec = "name".parse().unwrap();
        assert_eq!(spec.direction, Direction::Asc);
        assert!(matches!("$.a:up".parse::<OrderSpec>(), Err(UtilError::OrderSpec { .. })));
        assert!(matches!("a..b".parse::<OrderSpec>(), Err(UtilError::PathSyntax { .. })));
    }

    #[test]
    fn order_by_multiple_keys() {
        let items = json!([
            {"name": "b", "age": 30},
            {"name": "a", "age": 25},
            {"name": "c", "age": 30},
            {"name": "d"}
        ]);
        let orders: [OrderSpec; 2] = ["$.age:desc".parse().unwrap(), "$.name".parse().unwrap()];
        let sorted = order_by(&items, &orders).unwrap();
        let names: Vec<_> = sorted
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["b", "c", "a", "d"]);
    }

    #[test]
    fn compare_values_by_type_then_value() {
        assert_eq!(compare_values(&json!(1), &json!(2.5)), Ordering::Less);
        assert_eq!(compare_values(&json!("b"), &json!("a")), Ordering::Greater);
        assert_eq!(compare_values(&json!(true), &json!("a")), Ordering::Less);
        assert_eq!(compare_values(&json!({}), &json!([1])), Ordering::Greater);
    }
}
