//! The UI renders the browser state as a navigable outline.
//!
//! The screen is a breadcrumb header, the heading tree drawn with box-drawing characters, and a
//! help bar that doubles as the status line.

use crate::app_state::{AppState, Row, RowKind};
use crate::display::count_label;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Colours for one theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Base text and background.
    pub base: Style,
    /// Heading titles.
    pub heading: Color,
    /// Document names.
    pub document: Color,
    /// Secondary text such as sizes and badges.
    pub muted: Color,
}

#[must_use]
/// Palette for the light or dark theme.
pub fn palette(dark_mode: bool) -> Palette {
    if dark_mode {
        Palette {
            base: Style::default().fg(Color::White).bg(Color::Black),
            heading: Color::LightCyan,
            document: Color::LightBlue,
            muted: Color::Gray,
        }
    } else {
        Palette {
            base: Style::default(),
            heading: Color::Blue,
            document: Color::Black,
            muted: Color::DarkGray,
        }
    }
}

/// Renders the whole browser screen.
pub fn draw(f: &mut Frame, app: &AppState) {
    let colours = palette(app.preferences.get().dark_mode);
    f.render_widget(Block::default().style(colours.base), f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Breadcrumb
            Constraint::Min(0),    // Tree
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    let mut crumbs = vec![app.title.clone()];
    crumbs.extend(app.breadcrumb());
    let header = Paragraph::new(crumbs.join(" > ")).block(
        Block::default()
            .borders(Borders::ALL)
            .title(app.summary()),
    );
    f.render_widget(header, chunks[0]);

    if app.rows.is_empty() {
        let empty = Paragraph::new("No headings found for this course file.")
            .style(Style::default().fg(colours.muted))
            .block(Block::default().borders(Borders::ALL).title("Headings"));
        f.render_widget(empty, chunks[1]);
    } else {
        let items: Vec<ListItem> = app
            .rows
            .iter()
            .map(|row| ListItem::new(row_line(row, &colours)))
            .collect();
        let title = count_label(app.tree.heading_count(), "heading", "headings");
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut state = ListState::default().with_selected(Some(app.cursor));
        f.render_stateful_widget(list, chunks[1], &mut state);
    }

    let help = app.message.clone().unwrap_or_else(|| {
        "↑/↓: Navigate | ←/→: Collapse/Expand | Shift+↑/↓: Siblings | Enter: Toggle | e/c: Expand/Collapse all | t: Theme | q: Quit"
            .to_string()
    });
    let help_widget = Paragraph::new(help).block(Block::default().borders(Borders::ALL));
    f.render_widget(help_widget, chunks[2]);
}

fn row_line(row: &Row, colours: &Palette) -> Line<'static> {
    let mut spans = vec![Span::raw(tree_prefix(row.depth, row.is_last, &row.guides))];

    match &row.kind {
        RowKind::Heading {
            title,
            expandable,
            expanded,
            documents,
        } => {
            let marker = match (expandable, expanded) {
                (false, _) => "  ",
                (true, true) => "▾ ",
                (true, false) => "▸ ",
            };
            spans.push(Span::raw(marker));
            spans.push(Span::styled(
                title.clone(),
                Style::default()
                    .fg(colours.heading)
                    .add_modifier(if row.depth == 0 {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    }),
            ));
            if *documents > 0 {
                spans.push(Span::styled(
                    format!("  [{}]", count_label(*documents, "file", "files")),
                    Style::default().fg(colours.muted),
                ));
            }
        }
        RowKind::Document {
            file_name, summary, ..
        } => {
            spans.push(Span::styled(
                format!("📄 {file_name}"),
                Style::default().fg(colours.document),
            ));
            spans.push(Span::styled(
                format!("  {summary}"),
                Style::default().fg(colours.muted),
            ));
        }
    }

    Line::from(spans)
}

#[must_use]
/// Box-drawing prefix for a row at `depth`.
///
/// `guides[i]` says whether the ancestor at depth `i` has later siblings, in which case a
/// vertical line continues through this row.
pub fn tree_prefix(depth: usize, is_last: bool, guides: &[bool]) -> String {
    if depth == 0 {
        return String::new();
    }

    let mut prefix = String::new();

    // Skip the root level, whose rows carry no prefix
    for i in 1..depth {
        if guides.get(i).copied().unwrap_or(false) {
            prefix.push_str("│   ");
        } else {
            prefix.push_str("    ");
        }
    }

    if is_last {
        prefix.push_str("└── ");
    } else {
        prefix.push_str("├── ");
    }

    prefix
}

#[cfg(test)]
#[path = "tests/ui.rs"]
mod tests;
