//! Keyed timers that feed actions back into the main loop
//!
//! Each [`TimerKey`] owns at most one task. Arming a key that is already
//! armed aborts the old task first, so a superseded timer can never deliver.
//!
//! # Example
//!
//! ```ignore
//! let (action_tx, mut action_rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut timers = Timers::new(action_tx);
//!
//! // One-shot: settle the revealed pair
//! timers.schedule(TimerKey::Resolve, Duration::from_millis(700), BoardAction::ResolveDidElapse { session });
//!
//! // Repeating: solo clock
//! timers.interval(TimerKey::Clock, Duration::from_secs(1), BoardAction::ClockDidTick { session });
//!
//! // Shutdown
//! timers.cancel_all();
//! ```

use std::collections::HashMap;
use std::time::Duration;

use pairs_core::{Action, Effect, TimerKey};
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tokio::time::MissedTickBehavior;
use tracing::trace;

pub struct Timers<A> {
    handles: HashMap<TimerKey, AbortHandle>,
    action_tx: mpsc::UnboundedSender<A>,
}

impl<A> Timers<A>
where
    A: Action,
{
    /// Actions produced by timers are sent on `action_tx`.
    pub fn new(action_tx: mpsc::UnboundedSender<A>) -> Self {
        Self {
            handles: HashMap::new(),
            action_tx,
        }
    }

    /// Carry out one effect requested by a transition
    pub fn apply(&mut self, effect: Effect<A>) {
        match effect {
            Effect::Schedule { key, delay, action } => self.schedule(key, delay, action),
            Effect::Interval {
                key,
                period,
                action,
            } => self.interval(key, period, action),
            Effect::Cancel(key) => self.cancel(key),
        }
    }

    /// Deliver `action` once after `delay`, replacing anything on `key`
    pub fn schedule(&mut self, key: TimerKey, delay: Duration, action: A) {
        self.cancel(key);
        trace!(timer = key.name(), ?delay, "Scheduling");

        let tx = self.action_tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(action);
        });
        self.handles.insert(key, handle.abort_handle());
    }

    /// Deliver a copy of `action` every `period`, replacing anything on `key`
    ///
    /// The first delivery happens one full period after arming.
    pub fn interval(&mut self, key: TimerKey, period: Duration, action: A) {
        self.cancel(key);
        trace!(timer = key.name(), ?period, "Starting interval");

        let tx = self.action_tx.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // Skip the first immediate tick
            interval.tick().await;

            loop {
                interval.tick().await;
                if tx.send(action.clone()).is_err() {
                    // Receiver gone, nothing left to drive
                    break;
                }
            }
        });
        self.handles.insert(key, handle.abort_handle());
    }

    /// Abort whatever is armed on `key`. No-op when nothing is.
    pub fn cancel(&mut self, key: TimerKey) {
        if let Some(handle) = self.handles.remove(&key) {
            trace!(timer = key.name(), "Cancelling");
            handle.abort();
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
    }

    /// Whether `key` still has a pending delivery
    pub fn is_active(&self, key: TimerKey) -> bool {
        self.handles
            .get(&key)
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl<A> Drop for Timers<A> {
    fn drop(&mut self) {
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
    }
}
