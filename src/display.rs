//! Text helpers shared by the terminal view and the plain outline printer.

use crate::heading::{Document, HeadingNode};
use crate::tree::HeadingTree;
use std::fmt::Write;

const KIB: u64 = 1024;
const MIB: u64 = KIB * KIB;

#[must_use]
#[allow(clippy::cast_precision_loss)]
/// Human-readable size using base-1024 units.
///
/// Bytes are shown whole, kilobytes and megabytes to one decimal place.
pub fn format_file_size(bytes: u64) -> String {
    if bytes < KIB {
        format!("{bytes} B")
    } else if bytes < MIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    }
}

#[must_use]
/// Count followed by the singular or plural noun.
pub fn count_label(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

#[must_use]
/// Size, version and upload date of a document, separated by bullets.
pub fn document_summary(doc: &Document) -> String {
    let mut summary = format!("{} • v{}", format_file_size(doc.file_size), doc.version_no);
    if let Some(uploaded) = doc.uploaded_at {
        let _ = write!(summary, " • {}", uploaded.format("%Y-%m-%d"));
    }
    summary
}

#[must_use]
/// Fully expanded outline of a tree, one line per heading or document.
pub fn render_outline(tree: &HeadingTree, show_documents: bool) -> String {
    let mut out = String::new();
    if tree.is_empty() {
        out.push_str("No headings found for this course file.\n");
    }
    for root in &tree.roots {
        write_node(&mut out, root, 0, show_documents);
    }
    let _ = writeln!(
        out,
        "{} in {}",
        count_label(tree.total_documents, "document", "documents"),
        count_label(tree.heading_count(), "heading", "headings"),
    );
    out
}

fn write_node(out: &mut String, node: &HeadingNode, depth: usize, show_documents: bool) {
    let indent = "  ".repeat(depth);
    let _ = write!(out, "{indent}{}", node.title());
    if !node.documents().is_empty() {
        let _ = write!(
            out,
            " [{}]",
            count_label(node.documents().len(), "file", "files")
        );
    }
    out.push('\n');

    if show_documents {
        for doc in node.documents() {
            let _ = writeln!(
                out,
                "{indent}  - {} ({})",
                doc.file_name,
                document_summary(doc)
            );
        }
    }
    for child in &node.children {
        write_node(out, child, depth + 1, show_documents);
    }
}

#[cfg(test)]
#[path = "tests/display.rs"]
mod tests;
