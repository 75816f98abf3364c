//! coursetree: browse a course file's heading tree in the terminal.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use coursetree::{app_state, config, display, input, preferences, tree, ui};
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "coursetree")]
#[command(about = "Browse course-file heading trees", long_about = None)]
struct Args {
    /// Heading payload exported from the heading API (stdin if omitted or `-`)
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Print the fully expanded outline instead of opening the browser
    #[arg(long, conflicts_with = "json")]
    print: bool,

    /// Print the built tree as JSON
    #[arg(long)]
    json: bool,

    /// Open headings shallower than this depth on start
    #[arg(long, value_name = "N")]
    expand_depth: Option<usize>,

    /// Hide documents beneath headings
    #[arg(long)]
    no_documents: bool,
}

fn main() -> io::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("coursetree=warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    let mut cfg = config::Config::load();

    // Override config with command line args
    if let Some(depth) = args.expand_depth {
        cfg.expand_depth = depth;
    }
    if args.no_documents {
        cfg.show_documents = false;
    }

    let records = input::read_headings(args.path.as_deref()).map_err(io::Error::other)?;
    let heading_tree = tree::HeadingTree::from_records(&records);
    tracing::info!(
        records = records.len(),
        placed = heading_tree.heading_count(),
        documents = heading_tree.total_documents,
        "built heading tree"
    );

    if args.json {
        let json = serde_json::to_string_pretty(&heading_tree.roots).map_err(io::Error::other)?;
        println!("{json}");
        return Ok(());
    }
    if args.print {
        print!("{}", display::render_outline(&heading_tree, cfg.show_documents));
        return Ok(());
    }

    let title = args
        .path
        .as_ref()
        .and_then(|p| p.file_stem())
        .map_or_else(|| "stdin".to_string(), |s| s.to_string_lossy().into_owned());
    let prefs = preferences::PreferenceStore::open(&cfg.preferences_file);
    let state = app_state::AppState::new(title, heading_tree, &cfg, prefs);

    run_tui(state)
}

fn run_tui(mut app: app_state::AppState) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut app_state::AppState,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            app.message = None;
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Up | KeyCode::Char('k') => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        app.prev_sibling();
                    } else {
                        app.move_up();
                    }
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        app.next_sibling();
                    } else {
                        app.move_down();
                    }
                }
                KeyCode::Char('K') => app.prev_sibling(),
                KeyCode::Char('J') => app.next_sibling(),
                KeyCode::Left | KeyCode::Char('h') => app.collapse_or_ascend(),
                KeyCode::Right | KeyCode::Char('l') => app.expand_or_descend(),
                KeyCode::Enter | KeyCode::Char(' ') => app.toggle(),
                KeyCode::Char('p') => app.go_to_parent(),
                KeyCode::Home | KeyCode::Char('g') => app.go_to_first(),
                KeyCode::End | KeyCode::Char('G') => app.go_to_last(),
                KeyCode::Char('e') => app.expand_all(),
                KeyCode::Char('c') => app.collapse_all(),
                KeyCode::Char('t') => app.toggle_theme(),
                _ => {}
            }
        }
    }
}
