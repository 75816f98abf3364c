//! coursetree: build and browse course-file heading trees.
//!
//! The document/heading API hands out a course file's outline as a flat list of headings, each
//! naming its parent and its position among siblings. [`tree::build_tree`] turns that list into
//! an ordered forest and [`tree::count_documents`] totals the uploads. The remaining modules
//! read payloads, remember display preferences and drive the terminal browser.
#![allow(clippy::multiple_crate_versions)]

pub mod app_state;
pub mod config;
pub mod display;
pub mod error;
pub mod heading;
pub mod input;
pub mod preferences;
pub mod tree;
pub mod ui;

pub use error::{Error, Result};
pub use heading::{Document, HeadingNode, HeadingRecord};
pub use tree::{build_tree, count_documents, HeadingTree};
