//! The terminal event loop: draw, read keys, run effects, collect fetch results.

use anyhow::{Context, Result};
use ratatui::{
    DefaultTerminal,
    crossterm::event::{self, Event},
};
use std::{io, ops::ControlFlow, sync::Arc, thread, time::Duration};
use tokio::sync::mpsc;
use tracing::debug;
use weather_core::{ConfigStore, WeatherError, WeatherProvider, WeatherResult};

use crate::{app::App, effect::Effect, ui};

const TICK: Duration = Duration::from_millis(100);

type FetchOutcome = Result<WeatherResult, WeatherError>;

enum Step {
    Fetched(FetchOutcome),
    Input(Option<io::Result<Event>>),
}

/// Owns everything the effects need.
pub struct Runtime {
    store: ConfigStore,
    provider: Arc<dyn WeatherProvider>,
    fetch_tx: mpsc::UnboundedSender<FetchOutcome>,
    fetch_rx: mpsc::UnboundedReceiver<FetchOutcome>,
}

impl Runtime {
    pub fn new(store: ConfigStore, provider: Arc<dyn WeatherProvider>) -> Self {
        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();
        Self { store, provider, fetch_tx, fetch_rx }
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal, mut app: App) -> Result<()> {
        let mut events = spawn_event_reader();

        loop {
            terminal.draw(|frame| ui::render(frame, &app)).context("Failed to draw frame")?;

            let step = tokio::select! {
                Some(outcome) = self.fetch_rx.recv() => Step::Fetched(outcome),
                event = events.recv() => Step::Input(event),
            };

            match step {
                Step::Fetched(outcome) => app.on_fetch_complete(outcome),
                Step::Input(None) => break,
                Step::Input(Some(event)) => {
                    let event = event.context("Failed to read terminal event")?;
                    if let Some(effect) = handle_event(&mut app, event) {
                        if self.apply(effect, &mut app).is_break() {
                            break;
                        }
                    }
                }
            }
        }

        debug!("event loop finished");
        Ok(())
    }

    /// Carry out one effect. Fetches run in the background and report back
    /// through the channel drained by [`Runtime::run`].
    pub fn apply(&self, effect: Effect, app: &mut App) -> ControlFlow<()> {
        match effect {
            Effect::Fetch { city, api_key } => {
                let provider = Arc::clone(&self.provider);
                let tx = self.fetch_tx.clone();
                tokio::spawn(async move {
                    let outcome = provider.fetch(&city, &api_key).await;
                    // Receiver only disappears on shutdown.
                    let _ = tx.send(outcome);
                });
            }
            Effect::SaveConfig(config) => app.on_save_complete(self.store.save(&config)),
            Effect::Quit => return ControlFlow::Break(()),
        }

        ControlFlow::Continue(())
    }
}

fn handle_event(app: &mut App, event: Event) -> Option<Effect> {
    match event {
        Event::Key(key) => app.handle_key(key),
        // Resizes and the rest only need the redraw at the top of the loop.
        _ => None,
    }
}

/// Terminal reads block, so they run on a plain thread that forwards events
/// to the async loop. The thread stops once the loop drops the receiver.
fn spawn_event_reader() -> mpsc::UnboundedReceiver<io::Result<Event>> {
    let (tx, rx) = mpsc::unbounded_channel();

    thread::spawn(move || {
        while !tx.is_closed() {
            match event::poll(TICK) {
                Ok(false) => {}
                Ok(true) => {
                    if tx.send(event::read()).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.send(Err(e));
                    break;
                }
            }
        }
    });

    rx
}
