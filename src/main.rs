//! A terminal markets explorer.
//!
//! Every market is a long vertical section; the sticky category bar at the
//! top follows whichever section is dominant in the viewport, and clicking a
//! pill (or `←`/`→`) scrolls to that market.

mod app;
mod config;
mod core;
mod error;
mod ui;

use std::fs::File;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, widgets::Paragraph, Frame, Terminal};

use crate::app::{
    event::{AppEvent, EventSubscription},
    handler,
    state::AppState,
};
use crate::config::AppConfig;
use crate::core::catalog::Catalog;
use crate::ui::{
    category_bar::CategoryBar,
    chrome::{CompactHeader, PageHeader},
    page::PageView,
    popup::HelpPopup,
    theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(
    name = env!("CARGO_PKG_NAME"),
    about = "Browse markets with a scroll-synced category bar"
)]
struct Cli {
    /// Catalog file (`.json` or `.toml`).  Defaults to a built-in demo.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Config file.  Defaults to `$XDG_CONFIG_HOME/market-nav/config.toml`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the scroll throttle window (milliseconds).
    #[arg(long)]
    throttle_ms: Option<u64>,

    /// Write logs here instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    print_config: bool,
}

// ───────────────────────────────────────── drawing ───────────

fn draw(frame: &mut Frame, state: &AppState) {
    let layout = state.layout();
    let nav = &state.navigator;
    let active = nav.active_key();
    let active_title = state
        .catalog
        .categories
        .get(nav.active_index())
        .map_or("", |c| c.title.as_str());

    frame.render_widget(
        PageView::new(&state.page, state.scroll_y() as usize, nav.active_index()),
        layout.page_area,
    );

    frame.render_widget(
        PageHeader {
            brand: env!("CARGO_PKG_NAME"),
            active_title,
        },
        layout.header_area,
    );
    if nav.bar_visible() {
        frame.render_widget(CategoryBar::new(&state.catalog, nav.bar(), active), layout.bar_area);
    }

    if state.is_narrow() {
        let compact = nav
            .keys()
            .iter()
            .find(|key| nav.mobile_header_visible(key))
            .and_then(|key| state.page.section(key));
        let row = layout.compact_header_row(nav.boundary().round() as u16);
        if let (Some(section), Some(row)) = (compact, row) {
            let header = CompactHeader {
                title: &section.title,
            };
            frame.render_widget(header, row);
        }
    }

    frame.render_widget(
        Paragraph::new(state.config.status_bar_hint()).style(Theme::status_bar_style()),
        layout.status_area,
    );

    if state.show_help {
        let popup = HelpPopup {
            config: &state.config,
        };
        frame.render_widget(popup, frame.area());
    }
}

// ───────────────────────────────────────── main ─────────────

fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr) // the TUI owns stdout
                .init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;

    let mut config = AppConfig::load(cli.config.as_deref()).context("loading config")?;
    if let Some(ms) = cli.throttle_ms {
        config.navigator.throttle_ms = ms;
    }
    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let catalog = match &cli.catalog {
        Some(path) => Catalog::load(path).context("loading catalog")?,
        None => Catalog::demo(),
    };

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run(&mut terminal, catalog, config).await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    catalog: Catalog,
    config: AppConfig,
) -> Result<()> {
    let size = terminal.size()?;
    let area = Rect::new(0, 0, size.width, size.height);
    let frame_time = Duration::from_millis(config.page.frame_ms.max(1));
    let mut state = AppState::new(catalog, config, area)?;
    tracing::info!(
        "mounted {} markets, throttle {}ms",
        state.catalog.categories.len(),
        state.navigator.config().throttle_ms
    );

    // Dropping the subscription at the end of this scope stops the reader.
    let mut events = EventSubscription::spawn(frame_time);
    let mut needs_draw = true;

    loop {
        if needs_draw {
            terminal.draw(|frame| draw(frame, &state))?;
            needs_draw = false;
        }

        // Wake for input, or when a throttled navigator tick comes due.
        let deadline = state.navigator.next_deadline();
        let wake_at = tokio::time::Instant::from_std(deadline.unwrap_or_else(Instant::now));
        tokio::select! {
            biased;

            event = events.recv() => {
                let Some(event) = event else {
                    break;
                };
                // Handle the first event, then drain whatever else is queued
                // before advancing a frame.
                let mut next = Some(event);
                while let Some(event) = next {
                    match event {
                        AppEvent::Key(k) => {
                            handler::handle_key(&mut state, k);
                            needs_draw = true;
                        }
                        AppEvent::Mouse(m) => {
                            handler::handle_mouse(&mut state, m);
                            needs_draw = true;
                        }
                        AppEvent::Resize(w, h) => {
                            state.resize(w, h, Instant::now());
                            needs_draw = true;
                        }
                        AppEvent::Tick => {}
                    }
                    next = events.try_recv();
                }
            }

            () = tokio::time::sleep_until(wake_at), if deadline.is_some() => {}
        }

        needs_draw |= state.pump(Instant::now());

        if state.should_quit {
            break;
        }
    }

    Ok(())
}
