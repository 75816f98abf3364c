use super::{AppState, RowKind};
use crate::config::Config;
use crate::heading::{Document, HeadingRecord};
use crate::preferences::PreferenceStore;
use crate::tree::HeadingTree;
use std::fs;
use tempfile::{tempdir, TempDir};

fn doc(id: i64, name: &str) -> Document {
    Document {
        id,
        file_name: name.to_string(),
        file_path: format!("/uploads/{name}"),
        kind: "pdf".to_string(),
        file_size: 2048,
        version_no: 1,
        uploaded_at: None,
    }
}

/// Syllabus (1 doc), Lectures > [Week 1 (2 docs), Week 2 > Lab]
fn course() -> HeadingTree {
    let mut syllabus = HeadingRecord::new(1, "Syllabus", None, 0);
    syllabus.documents.push(doc(10, "syllabus.pdf"));
    let mut week1 = HeadingRecord::new(3, "Week 1", Some(2), 0);
    week1.documents.push(doc(30, "slides.pdf"));
    week1.documents.push(doc(31, "notes.pdf"));

    HeadingTree::from_records(&[
        HeadingRecord::new(5, "Lab", Some(4), 0),
        HeadingRecord::new(4, "Week 2", Some(2), 1),
        week1,
        HeadingRecord::new(2, "Lectures", None, 1),
        syllabus,
    ])
}

fn app_with(cfg: &Config) -> (AppState, TempDir) {
    let dir = tempdir().unwrap();
    let prefs = PreferenceStore::open(dir.path().join("prefs.json"));
    (AppState::new("CS101", course(), cfg, prefs), dir)
}

fn roots_open() -> Config {
    Config {
        expand_depth: 1,
        ..Config::default()
    }
}

fn visible_ids(app: &AppState) -> Vec<i64> {
    app.rows.iter().map(|r| r.heading_id).collect()
}

#[test]
fn test_initial_rows_respect_expand_depth() {
    let (app, _dir) = app_with(&roots_open());

    assert_eq!(visible_ids(&app), vec![1, 1, 2, 3, 4]);
    assert!(matches!(app.rows[1].kind, RowKind::Document { index: 0, .. }));
    assert_eq!(app.rows[3].depth, 1);
    assert_eq!(app.cursor, 0);
}

#[test]
fn test_default_depth_opens_two_levels() {
    let (app, _dir) = app_with(&Config::default());

    // Week 1 documents and the Lab under Week 2 are visible
    assert_eq!(visible_ids(&app), vec![1, 1, 2, 3, 3, 3, 4, 5]);
}

#[test]
fn test_hidden_documents() {
    let cfg = Config {
        expand_depth: 1,
        show_documents: false,
        ..Config::default()
    };
    let (app, _dir) = app_with(&cfg);

    assert_eq!(visible_ids(&app), vec![1, 2, 3, 4]);
    assert!(app.rows.iter().all(super::Row::is_heading));
}

#[test]
fn test_cursor_stays_in_bounds() {
    let (mut app, _dir) = app_with(&roots_open());

    app.move_up();
    assert_eq!(app.cursor, 0);
    for _ in 0..10 {
        app.move_down();
    }
    assert_eq!(app.cursor, 4);
    app.go_to_first();
    assert_eq!(app.cursor, 0);
    app.go_to_last();
    assert_eq!(app.cursor, 4);
}

#[test]
fn test_toggle_expands_and_keeps_cursor() {
    let (mut app, _dir) = app_with(&roots_open());
    app.cursor = 3;

    app.toggle();

    assert_eq!(visible_ids(&app), vec![1, 1, 2, 3, 3, 3, 4]);
    assert_eq!(app.cursor, 3);
    assert_eq!(app.selected_row().unwrap().heading_id, 3);
}

#[test]
fn test_sibling_and_parent_navigation() {
    let (mut app, _dir) = app_with(&roots_open());
    app.cursor = 3;
    app.toggle();

    app.next_sibling();
    assert_eq!(app.cursor, 6, "skips Week 1 documents");
    app.prev_sibling();
    assert_eq!(app.cursor, 3);
    app.go_to_parent();
    assert_eq!(app.cursor, 2);

    app.prev_sibling();
    assert_eq!(app.cursor, 0, "root siblings");
    assert_eq!(app.next_sibling_index(), Some(2));
}

#[test]
fn test_toggle_on_document_collapses_owner() {
    let (mut app, _dir) = app_with(&roots_open());
    app.cursor = 3;
    app.toggle();
    app.cursor = 5;

    app.toggle();

    assert_eq!(visible_ids(&app), vec![1, 1, 2, 3, 4]);
    assert_eq!(app.cursor, 3);
}

#[test]
fn test_expand_descend_collapse_ascend() {
    let (mut app, _dir) = app_with(&roots_open());
    app.cursor = 4;

    app.expand_or_descend();
    assert_eq!(visible_ids(&app), vec![1, 1, 2, 3, 4, 5]);
    assert_eq!(app.cursor, 4);

    app.expand_or_descend();
    assert_eq!(app.cursor, 5);

    app.collapse_or_ascend();
    assert_eq!(app.cursor, 4);

    app.collapse_or_ascend();
    assert_eq!(visible_ids(&app), vec![1, 1, 2, 3, 4]);
}

#[test]
fn test_leaf_toggle_reports_nothing() {
    let (mut app, _dir) = app_with(&Config::default());
    app.cursor = 7;
    assert_eq!(app.selected_row().unwrap().heading_id, 5);

    app.toggle();

    assert_eq!(app.message.as_deref(), Some("Nothing to expand"));
    assert!(!app.expanded.contains(&5));
}

#[test]
fn test_expand_all_and_collapse_all() {
    let (mut app, _dir) = app_with(&roots_open());

    app.expand_all();
    assert_eq!(visible_ids(&app), vec![1, 1, 2, 3, 3, 3, 4, 5]);

    app.cursor = 7;
    app.collapse_all();
    assert_eq!(visible_ids(&app), vec![1, 2]);
    assert_eq!(app.cursor, 1, "cursor lands on the root that held it");
}

#[test]
fn test_tree_guides() {
    let (app, _dir) = app_with(&Config::default());

    // Syllabus document is the only thing under Syllabus
    assert!(app.rows[1].is_last);
    assert_eq!(app.rows[1].guides, vec![true]);
    // Lectures is the last root so its descendants draw no guide for it
    assert!(app.rows[2].is_last);
    assert_eq!(app.rows[3].guides, vec![false]);
    assert!(!app.rows[3].is_last);
    assert_eq!(app.rows[4].guides, vec![false, true]);
    assert!(!app.rows[4].is_last);
    assert!(app.rows[5].is_last, "last document of a heading without children");
    assert!(app.rows[6].is_last);
    assert_eq!(app.rows[7].guides, vec![false, false]);
}

#[test]
fn test_summary_line() {
    let (app, _dir) = app_with(&roots_open());

    assert_eq!(app.summary(), "3 documents • 75% complete");
}

#[test]
fn test_toggle_theme_persists() {
    let (mut app, dir) = app_with(&roots_open());

    app.toggle_theme();

    assert!(app.preferences.get().dark_mode);
    assert!(app.message.is_none());
    let saved = fs::read_to_string(dir.path().join("prefs.json")).unwrap();
    assert!(saved.contains("\"darkMode\": true"));
}

#[test]
fn test_empty_tree_is_inert() {
    let dir = tempdir().unwrap();
    let prefs = PreferenceStore::open(dir.path().join("prefs.json"));
    let mut app = AppState::new("Empty", HeadingTree::default(), &Config::default(), prefs);

    assert!(app.rows.is_empty());
    assert!(app.selected_row().is_none());
    app.move_down();
    app.toggle();
    app.go_to_parent();
    app.collapse_all();
    assert_eq!(app.cursor, 0);
    assert_eq!(app.summary(), "0 documents • 0% complete");
}

#[test]
fn test_breadcrumb_follows_cursor() {
    let (mut app, _dir) = app_with(&Config::default());

    assert_eq!(app.breadcrumb(), vec!["Syllabus".to_string()]);

    app.cursor = 7;
    assert_eq!(app.breadcrumb(), vec!["Lectures", "Week 2", "Lab"]);

    app.cursor = 4;
    assert_eq!(
        app.breadcrumb(),
        vec!["Lectures", "Week 1"],
        "document rows report their heading"
    );
}

#[test]
fn test_right_on_childless_root_stays_put() {
    let dir = tempdir().unwrap();
    let prefs = PreferenceStore::open(dir.path().join("prefs.json"));
    let tree = HeadingTree::from_records(&[
        HeadingRecord::new(1, "Intro", None, 0),
        HeadingRecord::new(2, "Outro", None, 1),
    ]);
    let mut app = AppState::new("CS101", tree, &Config::default(), prefs);

    assert!(app.expanded.is_empty(), "leaves are never opened");
    app.expand_or_descend();

    assert_eq!(app.cursor, 0);
    assert_eq!(visible_ids(&app), vec![1, 2]);
}

#[test]
fn test_hidden_documents_leave_document_headings_closed() {
    let cfg = Config {
        expand_depth: 2,
        show_documents: false,
        ..Config::default()
    };
    let (mut app, _dir) = app_with(&cfg);

    // Syllabus and Week 1 only hold documents, which are not listed
    assert!(!app.expanded.contains(&1));
    assert!(!app.expanded.contains(&3));
    assert!(matches!(
        app.rows[0].kind,
        RowKind::Heading {
            expandable: false,
            ..
        }
    ));

    app.expand_or_descend();
    assert_eq!(app.cursor, 0, "Syllabus has nothing to descend into");

    app.expand_all();
    assert!(!app.expanded.contains(&1));
    assert_eq!(visible_ids(&app), vec![1, 2, 3, 4, 5]);
}
