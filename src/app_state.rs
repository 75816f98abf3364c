//! The state machine behind the heading browser.
//!
//! The forest is built once and never mutated. What changes while browsing is the set of
//! expanded heading ids and the cursor. After every expand or collapse the visible rows are
//! recomputed from the forest, and the cursor is kept on the same heading where possible.

use crate::config::Config;
use crate::display::{count_label, document_summary};
use crate::heading::HeadingNode;
use crate::preferences::PreferenceStore;
use crate::tree::HeadingTree;
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq)]
/// What a visible row shows.
pub enum RowKind {
    /// A heading in the outline.
    Heading {
        /// Display label.
        title: String,
        /// Whether expanding would reveal anything.
        expandable: bool,
        /// Whether the heading is currently open.
        expanded: bool,
        /// Documents attached directly to the heading.
        documents: usize,
    },
    /// A document listed under its expanded heading.
    Document {
        /// Position within the owning heading's documents.
        index: usize,
        /// Upload name.
        file_name: String,
        /// Size, version and date.
        summary: String,
    },
}

#[derive(Clone, Debug, PartialEq)]
/// A single line of the flattened outline.
pub struct Row {
    /// Heading this row is, or belongs to.
    pub heading_id: i64,
    /// Nesting depth, 0 for roots.
    pub depth: usize,
    /// Whether no further sibling follows at this depth.
    pub is_last: bool,
    /// For each ancestor depth, whether a vertical guide continues past this row.
    pub guides: Vec<bool>,
    /// Heading or document payload.
    pub kind: RowKind,
}

impl Row {
    #[must_use]
    /// Whether this row is a heading rather than a document.
    pub fn is_heading(&self) -> bool {
        matches!(self.kind, RowKind::Heading { .. })
    }
}

/// Browser session state: the forest, what is open, and where the cursor is.
pub struct AppState {
    /// Course label shown in the header.
    pub title: String,
    /// The forest being browsed.
    pub tree: HeadingTree,
    /// Ids of headings currently open.
    pub expanded: HashSet<i64>,
    /// Flattened visible outline.
    pub rows: Vec<Row>,
    /// Index into `rows` of the highlighted line.
    pub cursor: usize,
    /// List documents beneath open headings.
    pub show_documents: bool,
    /// Persisted display choices.
    pub preferences: PreferenceStore,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
}

impl AppState {
    #[must_use]
    /// Opens headings shallower than the configured depth and lays out the first view.
    pub fn new(
        title: impl Into<String>,
        tree: HeadingTree,
        cfg: &Config,
        preferences: PreferenceStore,
    ) -> Self {
        let mut expanded = HashSet::new();
        collect_ids(&tree.roots, 0, &mut |node, depth| {
            if depth < cfg.expand_depth && node.is_expandable(cfg.show_documents) {
                expanded.insert(node.id());
            }
        });

        let mut state = Self {
            title: title.into(),
            tree,
            expanded,
            rows: Vec::new(),
            cursor: 0,
            show_documents: cfg.show_documents,
            preferences,
            message: None,
        };
        state.rebuild_rows();
        state
    }

    /// Recomputes visible rows, keeping the cursor on the same heading or document if shown.
    pub fn rebuild_rows(&mut self) {
        let anchor = self
            .selected_row()
            .map(|row| (row.heading_id, document_index(row)));

        let mut rows = Vec::new();
        let count = self.tree.roots.len();
        for (i, root) in self.tree.roots.iter().enumerate() {
            self.push_rows(root, 0, i + 1 == count, &mut Vec::new(), &mut rows);
        }
        self.rows = rows;

        self.cursor = anchor
            .and_then(|(id, doc)| {
                self.rows
                    .iter()
                    .position(|r| r.heading_id == id && document_index(r) == doc)
                    .or_else(|| self.rows.iter().position(|r| r.heading_id == id))
            })
            .unwrap_or(self.cursor)
            .min(self.rows.len().saturating_sub(1));
    }

    fn push_rows(
        &self,
        node: &HeadingNode,
        depth: usize,
        is_last: bool,
        guides: &mut Vec<bool>,
        rows: &mut Vec<Row>,
    ) {
        let expanded = self.expanded.contains(&node.id());
        rows.push(Row {
            heading_id: node.id(),
            depth,
            is_last,
            guides: guides.clone(),
            kind: RowKind::Heading {
                title: node.title().to_string(),
                expandable: node.is_expandable(self.show_documents),
                expanded,
                documents: node.documents().len(),
            },
        });

        if !expanded {
            return;
        }

        guides.push(!is_last);
        if self.show_documents {
            let docs = node.documents();
            for (index, doc) in docs.iter().enumerate() {
                rows.push(Row {
                    heading_id: node.id(),
                    depth: depth + 1,
                    is_last: index + 1 == docs.len() && node.children.is_empty(),
                    guides: guides.clone(),
                    kind: RowKind::Document {
                        index,
                        file_name: doc.file_name.clone(),
                        summary: document_summary(doc),
                    },
                });
            }
        }
        let count = node.children.len();
        for (i, child) in node.children.iter().enumerate() {
            self.push_rows(child, depth + 1, i + 1 == count, guides, rows);
        }
        guides.pop();
    }

    #[must_use]
    /// The highlighted row, if the outline is not empty.
    pub fn selected_row(&self) -> Option<&Row> {
        self.rows.get(self.cursor)
    }

    /// Moves the cursor to the previous row.
    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the cursor to the next row.
    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.rows.len() {
            self.cursor += 1;
        }
    }

    /// Jumps to the first row.
    pub fn go_to_first(&mut self) {
        self.cursor = 0;
    }

    /// Jumps to the last row.
    pub fn go_to_last(&mut self) {
        self.cursor = self.rows.len().saturating_sub(1);
    }

    #[must_use]
    /// Index of the heading containing the current row.
    pub fn parent_index(&self) -> Option<usize> {
        let depth = self.selected_row()?.depth;
        (0..self.cursor)
            .rev()
            .find(|&i| self.rows[i].depth < depth && self.rows[i].is_heading())
    }

    #[must_use]
    /// Index of the next heading at the same depth under the same parent.
    pub fn next_sibling_index(&self) -> Option<usize> {
        let row = self.selected_row().filter(|r| r.is_heading())?;
        self.rows
            .iter()
            .enumerate()
            .skip(self.cursor + 1)
            .take_while(|(_, other)| other.depth >= row.depth)
            .find(|(_, other)| other.depth == row.depth && other.is_heading())
            .map(|(i, _)| i)
    }

    #[must_use]
    /// Index of the previous heading at the same depth under the same parent.
    pub fn prev_sibling_index(&self) -> Option<usize> {
        let row = self.selected_row().filter(|r| r.is_heading())?;
        self.rows[..self.cursor]
            .iter()
            .enumerate()
            .rev()
            .take_while(|(_, other)| other.depth >= row.depth)
            .find(|(_, other)| other.depth == row.depth && other.is_heading())
            .map(|(i, _)| i)
    }

    #[must_use]
    /// Titles from the root down to the heading under the cursor.
    pub fn breadcrumb(&self) -> Vec<String> {
        let mut titles = Vec::new();
        let mut current = self
            .rows
            .iter()
            .enumerate()
            .take(self.cursor + 1)
            .rev()
            .find(|(_, r)| r.is_heading());
        while let Some((i, row)) = current {
            if let RowKind::Heading { title, .. } = &row.kind {
                titles.push(title.clone());
            }
            current = (0..i)
                .rev()
                .find(|&j| self.rows[j].depth < row.depth && self.rows[j].is_heading())
                .map(|j| (j, &self.rows[j]));
        }
        titles.reverse();
        titles
    }

    /// Moves to the containing heading.
    pub fn go_to_parent(&mut self) {
        if let Some(i) = self.parent_index() {
            self.cursor = i;
        }
    }

    /// Moves to the next sibling heading.
    pub fn next_sibling(&mut self) {
        if let Some(i) = self.next_sibling_index() {
            self.cursor = i;
        }
    }

    /// Moves to the previous sibling heading.
    pub fn prev_sibling(&mut self) {
        if let Some(i) = self.prev_sibling_index() {
            self.cursor = i;
        }
    }

    /// Opens or closes the heading under the cursor.
    ///
    /// On a document row this closes the owning heading and selects it.
    pub fn toggle(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        let id = row.heading_id;
        match row.kind {
            RowKind::Heading { expandable, .. } => {
                if !self.expanded.remove(&id) {
                    if expandable {
                        self.expanded.insert(id);
                    } else {
                        self.message = Some("Nothing to expand".to_string());
                    }
                }
            }
            RowKind::Document { .. } => {
                self.go_to_parent();
                self.expanded.remove(&id);
            }
        }
        self.rebuild_rows();
    }

    /// Opens a closed heading, or steps into the first row beneath an open one.
    pub fn expand_or_descend(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        let depth = row.depth;
        if let RowKind::Heading {
            expandable,
            expanded,
            ..
        } = row.kind
        {
            if !expanded && expandable {
                self.toggle();
            } else if expanded
                && self
                    .rows
                    .get(self.cursor + 1)
                    .is_some_and(|next| next.depth > depth)
            {
                self.cursor += 1;
            }
        }
    }

    /// Closes an open heading, or steps out to the containing heading.
    pub fn collapse_or_ascend(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        match row.kind {
            RowKind::Heading { expanded: true, .. } => self.toggle(),
            _ => self.go_to_parent(),
        }
    }

    /// Opens every heading that has something to show.
    pub fn expand_all(&mut self) {
        let mut ids = Vec::new();
        let show_documents = self.show_documents;
        collect_ids(&self.tree.roots, 0, &mut |node, _| {
            if node.is_expandable(show_documents) {
                ids.push(node.id());
            }
        });
        self.expanded.extend(ids);
        self.rebuild_rows();
    }

    /// Closes every heading, leaving only the roots visible.
    pub fn collapse_all(&mut self) {
        let root = self
            .selected_row()
            .and_then(|row| self.root_of(row.heading_id));
        self.expanded.clear();
        self.rebuild_rows();
        if let Some(id) = root {
            if let Some(i) = self.rows.iter().position(|r| r.heading_id == id) {
                self.cursor = i;
            }
        }
    }

    fn root_of(&self, id: i64) -> Option<i64> {
        self.tree
            .roots
            .iter()
            .find(|root| contains(root, id))
            .map(HeadingNode::id)
    }

    /// Switches between light and dark palettes and persists the choice.
    pub fn toggle_theme(&mut self) {
        match self.preferences.update(|p| p.dark_mode = !p.dark_mode) {
            Ok(()) => self.message = None,
            Err(e) => self.message = Some(format!("Error saving preferences: {e}")),
        }
    }

    #[must_use]
    /// Header summary: document total and completion.
    pub fn summary(&self) -> String {
        format!(
            "{} • {:.0}% complete",
            count_label(self.tree.total_documents, "document", "documents"),
            self.tree.completion()
        )
    }
}

fn document_index(row: &Row) -> Option<usize> {
    match row.kind {
        RowKind::Document { index, .. } => Some(index),
        RowKind::Heading { .. } => None,
    }
}

fn contains(node: &HeadingNode, id: i64) -> bool {
    node.id() == id || node.children.iter().any(|c| contains(c, id))
}

fn collect_ids(nodes: &[HeadingNode], depth: usize, visit: &mut impl FnMut(&HeadingNode, usize)) {
    for node in nodes {
        visit(node, depth);
        collect_ids(&node.children, depth + 1, visit);
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
