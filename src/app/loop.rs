use crate::app::{
    action::Action, input::map_event_to_action, keymap::KeyMap, session::PaletteSession, ui,
};
use crate::theme::Theme;

use anyhow::Result;
use crossterm::event::{self, Event};
use ratatui::{backend::Backend, Terminal};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::info;

const TICK_RATE: Duration = Duration::from_millis(250);

pub async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    session: PaletteSession,
    action_rx: mpsc::Receiver<Action>,
) -> Result<()> {
    // User input channel
    let (event_tx, event_rx) = mpsc::channel(100);
    tokio::task::spawn_blocking(move || {
        forward_events(&event_tx, || {
            if event::poll(TICK_RATE)? {
                event::read().map(Some)
            } else {
                Ok(None)
            }
        });
    });

    run_loop_with_events(terminal, session, action_rx, event_rx).await
}

/// Pumps terminal events into `tx` until the loop drops its receiver or the
/// source fails. `next` must return within a bounded time (`Ok(None)` on a
/// poll timeout); the runtime waits for this thread on shutdown.
fn forward_events<F>(tx: &mpsc::Sender<Result<Event, std::io::Error>>, mut next: F)
where
    F: FnMut() -> std::io::Result<Option<Event>>,
{
    while !tx.is_closed() {
        match next() {
            Ok(Some(evt)) => {
                if tx.blocking_send(Ok(evt)).is_err() {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => {
                let _ = tx.blocking_send(Err(e));
                break;
            }
        }
    }
}

/// Drives one session until it asks to quit. `action_rx` must be the
/// receiving end of the channel the session was built with.
pub async fn run_loop_with_events<B: Backend>(
    terminal: &mut Terminal<B>,
    mut session: PaletteSession,
    mut action_rx: mpsc::Receiver<Action>,
    mut event_rx: mpsc::Receiver<Result<Event, std::io::Error>>,
) -> Result<()> {
    let keymap = KeyMap::default();
    let theme = Theme::default();
    let mut interval = interval(TICK_RATE);

    info!(commands = session.registry().len(), "palette session started");

    loop {
        // --- 1. Render ---
        terminal.draw(|f| {
            ui::draw(f, &session.state, session.registry(), &theme);
        })?;

        // --- 2. Event Handling ---
        let action = tokio::select! {
            _ = interval.tick() => Some(Action::Tick),

            // User Input
            Some(res) = event_rx.recv() => {
                let event = res?;
                map_event_to_action(
                    event,
                    &session.state,
                    session.registry(),
                    &keymap,
                    terminal.size()?,
                )
            },

            // Async Results
            Some(a) = action_rx.recv() => Some(a),
        };

        // --- 3. Update ---
        if let Some(action) = action {
            session.dispatch(action);
            if session.state.should_quit {
                break;
            }
        }
    }

    info!("palette session ended");
    Ok(())
}

#[cfg(test)]
#[path = "loop_tests.rs"]
mod tests;
