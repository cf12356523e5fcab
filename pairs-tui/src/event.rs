//! Terminal input polling
//!
//! A background task reads crossterm events and forwards them over a
//! channel; the main loop turns them into [`EventKind`]s for components.
//!
//! The poller reads in batches. Within a batch, mouse motion is dropped
//! (no view reacts to hover) and a burst of resizes collapses into the
//! last one, so dragging the terminal edge costs one relayout per batch.

use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Raw event from crossterm before processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// Input as components see it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// Poller timing
#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    /// Timeout passed to each `crossterm::event::poll` call
    pub poll_timeout: Duration,
    /// Period between batches
    pub loop_sleep: Duration,
    /// Upper bound on terminal reads per batch
    pub max_batch: usize,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(10),
            loop_sleep: Duration::from_millis(16),
            max_batch: 20,
        }
    }
}

/// Spawn the event polling task
///
/// Runs until `cancel_token` fires or the receiving side of `tx` is dropped.
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<RawEvent>,
    config: PollerConfig,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut batches = tokio::time::interval(config.loop_sleep);
        batches.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    // Keystrokes typed during shutdown must not leak into the shell
                    discard_pending();
                    info!("Event poller stopped");
                    return;
                }
                _ = batches.tick() => {
                    for raw in coalesce_resizes(read_batch(&config)) {
                        if tx.send(raw).is_err() {
                            debug!("Event channel closed, stopping poller");
                            return;
                        }
                    }
                }
            }
        }
    })
}

fn read_batch(config: &PollerConfig) -> Vec<RawEvent> {
    let mut batch = Vec::new();
    for _ in 0..config.max_batch {
        if !event::poll(config.poll_timeout).unwrap_or(false) {
            break;
        }
        match event::read() {
            Ok(event) => batch.extend(translate(event)),
            Err(e) => {
                warn!(error = %e, "Failed to read terminal event");
                break;
            }
        }
    }
    batch
}

fn discard_pending() {
    while event::poll(Duration::ZERO).unwrap_or(false) {
        if event::read().is_err() {
            break;
        }
    }
}

/// Keep the crossterm events the game can act on
fn translate(event: Event) -> Option<RawEvent> {
    match event {
        Event::Key(key) => Some(RawEvent::Key(key)),
        Event::Mouse(mouse) if mouse.kind == MouseEventKind::Moved => None,
        Event::Mouse(mouse) => Some(RawEvent::Mouse(mouse)),
        Event::Resize(w, h) => Some(RawEvent::Resize(w, h)),
        _ => None,
    }
}

/// Drop every resize in the batch except the last, keeping order otherwise
fn coalesce_resizes(batch: Vec<RawEvent>) -> Vec<RawEvent> {
    let last = batch
        .iter()
        .rposition(|raw| matches!(raw, RawEvent::Resize(..)));
    batch
        .into_iter()
        .enumerate()
        .filter(|(index, raw)| !matches!(raw, RawEvent::Resize(..)) || Some(*index) == last)
        .map(|(_, raw)| raw)
        .collect()
}

/// Turn a raw event into what components consume
///
/// Key releases are dropped; some terminals report them and a card must
/// not flip twice per keystroke.
pub fn process_raw_event(raw: RawEvent) -> Option<EventKind> {
    match raw {
        RawEvent::Key(key) if key.kind == KeyEventKind::Release => None,
        RawEvent::Key(key) => Some(EventKind::Key(key)),
        RawEvent::Mouse(mouse) => Some(EventKind::Mouse(mouse)),
        RawEvent::Resize(w, h) => Some(EventKind::Resize(w, h)),
    }
}
