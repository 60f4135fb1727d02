// File: ./src/tui/mod.rs
// Entry point and main loop for the TUI application.
pub mod action;
pub mod handlers;
pub mod network;
pub mod state;
pub mod view;

use crate::client::BibleClient;
use crate::config::Config;
use crate::context::SharedContext;
use crate::controller::ReadingController;
use crate::tui::action::Action;
use crate::tui::state::AppState;
use crate::tui::view::draw;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste,
        EnableMouseCapture, Event, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{io, time::Duration, time::Instant};
use tokio::sync::mpsc;

pub async fn run(ctx: SharedContext, config: Config) -> Result<()> {
    // --- 1. CLIENT & STATE ---
    // Built before the terminal switches modes so errors print normally.
    let client = BibleClient::new(&config)?;
    let controller = ReadingController::new(ctx, client.versions());
    let today = chrono::Local::now().date_naive();
    let mut app_state = AppState::new(controller, config.plan_year, today);

    // --- 2. TERMINAL SETUP ---
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (action_tx, action_rx) = mpsc::channel(10);
    let (event_tx, mut event_rx) = mpsc::channel(10);

    // --- 3. NETWORK THREAD ---
    tokio::spawn(network::run_network_actor(client, action_rx, event_tx));

    // Open today's reading right away.
    if let Some(action) = app_state.open_cursor_day() {
        let _ = action_tx.send(action).await;
    }

    // --- 4. UI LOOP ---
    let result: Result<()> = async {
        loop {
            app_state.expire_toast(Instant::now());
            terminal.draw(|f| draw(f, &mut app_state))?;

            // A. Network Events
            while let Ok(event) = event_rx.try_recv() {
                handlers::handle_app_event(&mut app_state, event);
            }

            // B. Input Events
            if !event::poll(Duration::from_millis(50))? {
                continue;
            }
            let action = match event::read()? {
                Event::Mouse(mouse) => {
                    match mouse.kind {
                        MouseEventKind::ScrollDown => app_state.scroll_reader(3),
                        MouseEventKind::ScrollUp => app_state.scroll_reader(-3),
                        _ => {}
                    }
                    None
                }
                Event::Paste(text) => {
                    handlers::handle_paste(&mut app_state, &text);
                    None
                }
                Event::Key(key) => {
                    // Filter out KeyRelease events to prevent double input on Windows
                    if key.kind == event::KeyEventKind::Release {
                        continue;
                    }
                    handlers::handle_key_event(key, &mut app_state)
                }
                _ => None,
            };

            match action {
                Some(Action::Quit) => {
                    let _ = action_tx.send(Action::Quit).await;
                    break;
                }
                Some(action) => {
                    let _ = action_tx.send(action).await;
                }
                None => {}
            }
        }
        Ok(())
    }
    .await;

    // --- 5. CLEANUP ---
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;
    result
}
