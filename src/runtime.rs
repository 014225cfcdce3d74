//! Terminal lifecycle and the event loop.
//!
//! A dedicated thread blocks on `crossterm::event::read()` and forwards
//! events over a channel, keeping `read()` on one OS thread. The async loop
//! selects over terminal input, fetch completions, and an animation ticker;
//! effects returned by [`App::update`] spawn tokio tasks over a shared
//! [`CatalogClient`], and each completion carries the sequence token of the
//! request that produced it.

use std::io::Stdout;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseButton, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use log::warn;
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};

use crate::api::CatalogClient;
use crate::app::{App, Effect, Focus, Msg};
use crate::error::FinderError;
use crate::ui;

type FinderTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Forward blocking terminal reads over a channel the async loop can select on.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(100);
    std::thread::spawn(move || loop {
        match event::read() {
            Ok(event) => {
                if sender.blocking_send(event).is_err() {
                    break;
                }
            }
            Err(err) => {
                warn!("failed to read terminal event: {err}");
                break;
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<FinderTerminal, FinderError> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut FinderTerminal) -> Result<(), FinderError> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the finder until the user exits. Terminal state is restored even when
/// the event loop fails.
pub async fn run_app(client: CatalogClient, mut app: App) -> Result<(), FinderError> {
    let mut input_events = spawn_input_thread();
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, client, &mut app, &mut input_events).await;
    cleanup_terminal(&mut terminal)?;
    result
}

async fn event_loop(
    terminal: &mut FinderTerminal,
    client: CatalogClient,
    app: &mut App,
    input_events: &mut mpsc::Receiver<Event>,
) -> Result<(), FinderError> {
    let client = Arc::new(client);
    let (completion_tx, mut completions) = mpsc::unbounded_channel::<Msg>();

    let mut ticker = time::interval(Duration::from_millis(120));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    terminal.draw(|f| ui::draw(f, app))?;

    loop {
        let mut effects: Vec<Effect> = Vec::new();
        let mut needs_render = true;

        tokio::select! {
            maybe_event = input_events.recv() => {
                let Some(input_event) = maybe_event else { break };
                match translate_event(app, input_event) {
                    Some(msg) => effects = app.update(msg),
                    None => needs_render = false,
                }
            }
            Some(msg) = completions.recv() => {
                effects = app.update(msg);
            }
            _ = ticker.tick() => {
                if app.loading {
                    effects = app.update(Msg::Tick);
                } else {
                    needs_render = false;
                }
            }
        }

        for effect in effects {
            match effect {
                Effect::Quit => return Ok(()),
                Effect::Search { ingredient, seq } => {
                    let client = Arc::clone(&client);
                    let tx = completion_tx.clone();
                    tokio::spawn(async move {
                        let outcome = client.search_by_ingredient(&ingredient).await;
                        let _ = tx.send(Msg::SearchCompleted { seq, ingredient, outcome });
                    });
                }
                Effect::Lookup { id, seq } => {
                    let client = Arc::clone(&client);
                    let tx = completion_tx.clone();
                    tokio::spawn(async move {
                        let outcome = client.lookup_by_id(&id).await;
                        let _ = tx.send(Msg::LookupCompleted { seq, outcome });
                    });
                }
            }
        }

        if needs_render {
            terminal.draw(|f| ui::draw(f, app))?;
        }
    }

    Ok(())
}

/// Map a raw crossterm event onto an application message.
fn translate_event(app: &App, input_event: Event) -> Option<Msg> {
    match input_event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                return Some(Msg::Quit);
            }
            if app.modal.is_some() {
                return match key.code {
                    KeyCode::Esc | KeyCode::Char('q') => Some(Msg::CloseModal),
                    KeyCode::Up => Some(Msg::ScrollModal(-1)),
                    KeyCode::Down => Some(Msg::ScrollModal(1)),
                    KeyCode::PageUp => Some(Msg::ScrollModal(-10)),
                    KeyCode::PageDown => Some(Msg::ScrollModal(10)),
                    _ => None,
                };
            }
            match (app.focus, key.code) {
                (_, KeyCode::Tab) => Some(Msg::FocusToggle),
                (_, KeyCode::Esc) => Some(Msg::Quit),
                (Focus::Input, KeyCode::Enter) => Some(Msg::SubmitSearch),
                (Focus::Input, KeyCode::Backspace) => Some(Msg::InputBackspace),
                (Focus::Input, KeyCode::Down) => Some(Msg::FocusToggle),
                (Focus::Input, KeyCode::Char(c)) => Some(Msg::InputChar(c)),
                (Focus::Results, KeyCode::Enter) => Some(Msg::ActivateSelected),
                (Focus::Results, KeyCode::Up) => Some(Msg::MoveSelection(-1)),
                (Focus::Results, KeyCode::Down) => Some(Msg::MoveSelection(1)),
                (Focus::Results, KeyCode::Char('q')) => Some(Msg::Quit),
                (Focus::Results, KeyCode::Char('/')) => Some(Msg::FocusToggle),
                _ => None,
            }
        }
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if app.modal.is_some() {
                    Some(Msg::BackdropClick {
                        column: mouse.column,
                        row: mouse.row,
                    })
                } else {
                    Some(Msg::ClickResults {
                        column: mouse.column,
                        row: mouse.row,
                    })
                }
            }
            MouseEventKind::ScrollUp if app.modal.is_some() => Some(Msg::ScrollModal(-1)),
            MouseEventKind::ScrollDown if app.modal.is_some() => Some(Msg::ScrollModal(1)),
            MouseEventKind::ScrollUp => Some(Msg::MoveSelection(-1)),
            MouseEventKind::ScrollDown => Some(Msg::MoveSelection(1)),
            _ => None,
        },
        // Redraw on resize; other events carry nothing actionable
        Event::Resize(_, _) => Some(Msg::Tick),
        _ => None,
    }
}
