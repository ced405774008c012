//! Minimal path expressions for key selectors (v0.1)
//!
//! Supports:
//! - $.a.b.c (dot notation)
//! - $.a[0].b and $.a[0][1] (array index)
//! - a.b.c (without $ prefix)
//! - $ (the item itself)
//!
//! Does NOT support filters, wildcards or slices.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::UtilError;

/// `field[0][1]`: an optional field name followed by any number of indexes
static PART_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^\[\]]*)((?:\[\d+\])*)$").expect("valid regex"));

static INDEX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(\d+)\]").expect("valid regex"));

/// A parsed path segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Object field access: .field
    Field(String),
    /// Array index access: [0]
    Index(usize),
}

/// A parsed path, applied to every item by a key selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    raw: String,
    segments: Vec<Segment>,
}

impl Path {
    /// Parse a path string
    ///
    /// Examples:
    /// - "$.price.currency" → [Field("price"), Field("currency")]
    /// - "items[0].name" → [Field("items"), Index(0), Field("name")]
    pub fn parse(path: &str) -> Result<Self, UtilError> {
        let unsupported = || UtilError::PathSyntax {
            path: path.to_string(),
        };

        let body = if path == "$" {
            ""
        } else if let Some(rest) = path.strip_prefix("$.") {
            rest
        } else if path.starts_with("$[") {
            &path[1..]
        } else {
            path
        };

        let mut segments = Vec::new();
        if body.is_empty() {
            if path != "$" {
                return Err(unsupported());
            }
            return Ok(Self {
                raw: path.to_string(),
                segments,
            });
        }

        for part in body.split('.') {
            let caps = PART_RE.captures(part).ok_or_else(unsupported)?;
            let field = &caps[1];
            let indexes = &caps[2];

            if field.is_empty() && indexes.is_empty() {
                return Err(unsupported());
            }

            if !field.is_empty() {
                // Numeric segment treated as array index (e.g., "items.0")
                match field.parse::<usize>() {
                    Ok(index) if indexes.is_empty() => segments.push(Segment::Index(index)),
                    _ => segments.push(Segment::Field(field.to_string())),
                }
            }

            for index in INDEX_RE.captures_iter(indexes) {
                let index = index[1].parse().map_err(|_| unsupported())?;
                segments.push(Segment::Index(index));
            }
        }

        Ok(Self {
            raw: path.to_string(),
            segments,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Resolve against a value, borrowing the match
    pub fn resolve<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        self.segments
            .iter()
            .try_fold(value, |current, segment| match segment {
                Segment::Field(name) => current.get(name.as_str()),
                Segment::Index(idx) => match current {
                    Value::Object(map) => map.get(&idx.to_string()),
                    _ => current.get(*idx),
                },
            })
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
