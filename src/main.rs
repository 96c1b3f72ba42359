use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use tokio::sync::mpsc;

use coinwatch::config::Config;
use coinwatch::event::AppEvent;
use coinwatch::input::{parse_main_command, parse_selector_command, UiCommand};
use coinwatch::store::{spawn_load, SnapshotCache, SnapshotStore};
use coinwatch::ui::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {:#}", e);
            eprintln!("Make sure .env exists with DB_HOST, DB_PORT, DB_NAME, DB_USER, DB_PASSWORD");
            std::process::exit(1);
        }
    };

    // Init tracing (log to file so it doesn't interfere with the TUI)
    let log_file = std::fs::File::create("coinwatch.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                config
                    .logging
                    .level
                    .parse()
                    .unwrap_or_else(|_| "info".parse().unwrap())
            }),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .json()
        .init();

    tracing::info!(
        table = %config.database.snapshot_table,
        host = %config.database.host,
        "Starting coinwatch"
    );

    let cache = Arc::new(SnapshotCache::new(SnapshotStore::new(
        config.database.clone(),
    )));
    let (app_tx, mut app_rx) = mpsc::channel::<AppEvent>(16);
    spawn_load(Arc::clone(&cache), app_tx.clone());

    let mut terminal = ratatui::init();
    let reference_date = chrono::Utc::now().date_naive();
    let mut app_state = AppState::new(reference_date, config.ui.default_compare_coins.clone());

    loop {
        terminal.draw(|frame| ui::render(frame, &app_state))?;

        // Handle input (non-blocking with timeout)
        if crossterm::event::poll(Duration::from_millis(config.ui.refresh_rate_ms))? {
            if let Event::Key(key) = crossterm::event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if !app_state.is_selector_open()
                    && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
                {
                    tracing::info!("User quit");
                    break;
                }
                if app_state.is_selector_open() {
                    if let Some(cmd) = parse_selector_command(&key.code) {
                        app_state.handle_selector_command(cmd);
                    }
                } else if let Some(cmd) = parse_main_command(&key.code) {
                    app_state.handle_command(cmd);
                    if cmd == UiCommand::Refresh {
                        tracing::info!("Manual refresh requested");
                        cache.invalidate();
                        spawn_load(Arc::clone(&cache), app_tx.clone());
                    }
                }
            }
        }

        // Drain load results from the background task.
        while let Ok(event) = app_rx.try_recv() {
            app_state.apply(event);
        }
    }

    ratatui::restore();
    tracing::info!("Shutdown complete");
    println!("Goodbye! Check coinwatch.log for details.");
    Ok(())
}
