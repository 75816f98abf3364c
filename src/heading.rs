//! Heading records as served by the document/heading API, and the tree nodes built from them.
//!
//! A course file's outline arrives as a flat list: every heading names its parent by id and
//! carries a sibling order key plus the documents uploaded under it. The API speaks `camelCase`
//! while older exports use `snake_case`, so both spellings deserialise into the same types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
/// A file uploaded under a heading.
pub struct Document {
    /// Server-side document identifier.
    pub id: i64,
    /// Original upload name shown to the user.
    #[serde(alias = "file_name", deserialize_with = "null_as_default")]
    pub file_name: String,
    /// Storage location used for preview and download.
    #[serde(alias = "file_path", default, deserialize_with = "null_as_default")]
    pub file_path: String,
    /// MIME type or extension reported at upload.
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    /// Size in bytes.
    #[serde(alias = "file_size", default, deserialize_with = "null_as_default")]
    pub file_size: u64,
    /// Upload revision, starting at 1.
    #[serde(
        alias = "version_no",
        default = "first_version",
        deserialize_with = "null_as_first_version"
    )]
    pub version_no: u32,
    /// Upload time in server local time.
    #[serde(
        alias = "uploaded_at",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub uploaded_at: Option<NaiveDateTime>,
}

fn first_version() -> u32 {
    1
}

/// The heading API serialises unset boxed fields as `null` rather than omitting them.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_first_version<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or_else(first_version))
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
/// One entry of a course-file outline in its flat form.
pub struct HeadingRecord {
    /// Unique identifier within a course file.
    pub id: i64,
    /// Display label.
    pub title: String,
    /// Containing heading, `None` for top-level headings.
    #[serde(alias = "parent_heading_id", default)]
    pub parent_heading_id: Option<i64>,
    /// Position among siblings sharing the same parent. Must be present; `null` sorts as 0.
    #[serde(alias = "order_index", deserialize_with = "null_as_default")]
    pub order_index: i64,
    /// Files uploaded directly under this heading.
    #[serde(alias = "files", default, deserialize_with = "null_as_default")]
    pub documents: Vec<Document>,
}

impl HeadingRecord {
    #[must_use]
    /// Creates a record with no documents attached.
    pub fn new(id: i64, title: impl Into<String>, parent: Option<i64>, order_index: i64) -> Self {
        Self {
            id,
            title: title.into(),
            parent_heading_id: parent,
            order_index,
            documents: Vec::new(),
        }
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
/// A heading placed in the tree together with its ordered subheadings.
pub struct HeadingNode {
    #[serde(flatten)]
    /// The flat record this node was built from.
    pub record: HeadingRecord,
    /// Direct subheadings in ascending `order_index`.
    pub children: Vec<HeadingNode>,
}

impl HeadingNode {
    #[must_use]
    /// Wraps a record as a childless node.
    pub fn new(record: HeadingRecord) -> Self {
        Self {
            record,
            children: Vec::new(),
        }
    }

    #[must_use]
    /// Identifier of the underlying record.
    pub fn id(&self) -> i64 {
        self.record.id
    }

    #[must_use]
    /// Display label of the underlying record.
    pub fn title(&self) -> &str {
        &self.record.title
    }

    #[must_use]
    /// Documents attached directly to this heading.
    pub fn documents(&self) -> &[Document] {
        &self.record.documents
    }

    #[must_use]
    /// Whether expanding the heading reveals any rows, given whether documents are listed.
    pub fn is_expandable(&self, show_documents: bool) -> bool {
        !self.children.is_empty() || (show_documents && !self.record.documents.is_empty())
    }

    #[must_use]
    /// Documents attached anywhere in this subtree.
    pub fn document_count_recursive(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += node.record.documents.len();
            pending.extend(&node.children);
        }
        count
    }
}
