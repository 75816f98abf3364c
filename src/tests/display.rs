use super::{count_label, document_summary, format_file_size, render_outline};
use crate::heading::{Document, HeadingRecord};
use crate::tree::HeadingTree;
use chrono::NaiveDate;

fn notes(size: u64) -> Document {
    Document {
        id: 10,
        file_name: "notes.pdf".to_string(),
        file_path: "/uploads/notes.pdf".to_string(),
        kind: "pdf".to_string(),
        file_size: size,
        version_no: 3,
        uploaded_at: None,
    }
}

#[test]
fn test_file_size_units() {
    assert_eq!(format_file_size(0), "0 B");
    assert_eq!(format_file_size(1023), "1023 B");
    assert_eq!(format_file_size(1024), "1.0 KB");
    assert_eq!(format_file_size(1536), "1.5 KB");
    assert_eq!(format_file_size(1024 * 1024 - 1), "1024.0 KB");
    assert_eq!(format_file_size(1024 * 1024), "1.0 MB");
    assert_eq!(format_file_size(5 * 1024 * 1024 + 512 * 1024), "5.5 MB");
}

#[test]
fn test_count_label_pluralises() {
    assert_eq!(count_label(0, "document", "documents"), "0 documents");
    assert_eq!(count_label(1, "file", "files"), "1 file");
    assert_eq!(count_label(4, "file", "files"), "4 files");
}

#[test]
fn test_document_summary() {
    assert_eq!(document_summary(&notes(2048)), "2.0 KB • v3");

    let mut dated = notes(512);
    dated.uploaded_at = NaiveDate::from_ymd_opt(2024, 3, 9)
        .and_then(|d| d.and_hms_opt(14, 30, 0));
    assert_eq!(document_summary(&dated), "512 B • v3 • 2024-03-09");
}

#[test]
fn test_outline_lists_headings_and_documents() {
    let mut lectures = HeadingRecord::new(2, "Lectures", Some(1), 0);
    lectures.documents.push(notes(2048));
    let records = vec![HeadingRecord::new(1, "Syllabus", None, 0), lectures];
    let tree = HeadingTree::from_records(&records);

    let outline = render_outline(&tree, true);
    let lines: Vec<&str> = outline.lines().collect();

    assert_eq!(lines[0], "Syllabus");
    assert_eq!(lines[1], "  Lectures [1 file]");
    assert_eq!(lines[2], "    - notes.pdf (2.0 KB • v3)");
    assert_eq!(lines[3], "1 document in 2 headings");

    let bare = render_outline(&tree, false);
    assert!(!bare.contains("notes.pdf"));
}

#[test]
fn test_outline_empty_tree() {
    let outline = render_outline(&HeadingTree::default(), true);

    assert!(outline.starts_with("No headings found"));
    assert!(outline.ends_with("0 documents in 0 headings\n"));
}
