mod api;
mod app;
mod catalog;
mod config;
mod controller;
mod error;
mod log;
mod ui;

use anyhow::Result;
use api::TutorClient;
use app::{App, Command};
use config::Config;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

#[tokio::main]
async fn main() -> Result<()> {
    log::init()?;

    let config = config::load_config()?;
    let client = TutorClient::new(&config.base_url);
    tracing::info!("starting against {}", config.base_url);

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();

    // One reachability probe before the first question; failure is not fatal
    app.set_status(Some("Checking tutor backend...".to_string()));
    terminal.draw(|f| ui::render(f, &app))?;
    if client.health().await {
        app.set_status(Some(format!("Connected to {}", config.base_url)));
    } else {
        tracing::warn!("tutor backend unreachable at {}", config.base_url);
        app.set_status(Some(format!("Tutor unreachable at {}", config.base_url)));
    }

    let result = run_app(&mut terminal, &mut app, &config, &client).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    config: &Config,
    client: &TutorClient,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                return Ok(());
            }

            match app.handle_key(key) {
                Some(Command::Quit) => return Ok(()),
                Some(Command::Submit) => {
                    if let Some(query) = controller::prepare(app, config) {
                        // Show the loading frame before blocking on the round-trip
                        terminal.draw(|f| ui::render(f, app))?;
                        controller::perform(app, client, &query).await;
                        app.set_status(None);
                    }
                }
                None => {}
            }
        }
    }
}
