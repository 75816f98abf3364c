//! Reading heading payloads exported from the document/heading API.
//!
//! Three shapes are accepted: a flat array of heading records, an array of nested tree nodes
//! (the shape of the per-course-file tree endpoint), or an object wrapping either under a
//! `headings` key. Nested payloads are flattened back into records so that every source goes
//! through the same tree builder.

use crate::error::{Error, Result};
use crate::heading::{null_as_default, Document, HeadingRecord};
use serde::Deserialize;
use serde_json::Value;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
/// A heading as returned by the tree endpoint, with children inlined.
struct NestedHeading {
    id: i64,
    title: String,
    #[serde(alias = "order_index", default)]
    order_index: Option<i64>,
    #[serde(alias = "files", default, deserialize_with = "null_as_default")]
    documents: Vec<Document>,
    #[serde(default, deserialize_with = "null_as_default")]
    children: Vec<NestedHeading>,
}

/// Parse a heading payload in any accepted shape.
///
/// # Errors
///
/// Returns an error if the text is not JSON, is not an array of headings (optionally wrapped in
/// a `headings` object), or if any entry is missing required fields.
pub fn parse_headings(json: &str) -> Result<Vec<HeadingRecord>> {
    let items = match serde_json::from_str::<Value>(json)? {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("headings") {
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(Error::InvalidPayload(
                    "`headings` must be an array".to_string(),
                ))
            }
            None => {
                return Err(Error::InvalidPayload(
                    "expected an array of headings or an object with a `headings` array"
                        .to_string(),
                ))
            }
        },
        other => {
            return Err(Error::InvalidPayload(format!(
                "expected an array of headings, found {}",
                json_kind(&other)
            )))
        }
    };

    let nested = items
        .iter()
        .any(|item| item.get("children").is_some_and(Value::is_array));

    if nested {
        let roots: Vec<NestedHeading> = serde_json::from_value(Value::Array(items))?;
        let mut records = Vec::new();
        flatten(roots, None, &mut records);
        tracing::debug!(headings = records.len(), "flattened nested heading payload");
        Ok(records)
    } else {
        let records: Vec<HeadingRecord> = serde_json::from_value(Value::Array(items))?;
        tracing::debug!(headings = records.len(), "parsed flat heading payload");
        Ok(records)
    }
}

fn flatten(nodes: Vec<NestedHeading>, parent: Option<i64>, out: &mut Vec<HeadingRecord>) {
    for (position, node) in nodes.into_iter().enumerate() {
        let order_index = node
            .order_index
            .unwrap_or_else(|| i64::try_from(position).unwrap_or(i64::MAX));
        out.push(HeadingRecord {
            id: node.id,
            title: node.title,
            parent_heading_id: parent,
            order_index,
            documents: node.documents,
        });
        flatten(node.children, Some(node.id), out);
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Read and parse a heading payload from a file, or from stdin when the path is absent or `-`.
///
/// # Errors
///
/// Returns an error if the source cannot be read or does not parse as headings.
pub fn read_headings(path: Option<&Path>) -> Result<Vec<HeadingRecord>> {
    let contents = match path {
        Some(p) if p != Path::new("-") => {
            std::fs::read_to_string(p).map_err(|source| Error::Io {
                path: p.to_path_buf(),
                source,
            })?
        }
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| Error::Io {
                    path: PathBuf::from("-"),
                    source,
                })?;
            buf
        }
    };
    parse_headings(&contents)
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
