//! Side effects declared by the board controller
//!
//! The controller never touches timers itself. It returns [`Effect`]s
//! describing what should be scheduled or cancelled, and the runtime
//! carries them out. That keeps every transition testable without a clock.

use std::time::Duration;

/// Result of feeding an action to the board controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult<E> {
    /// Whether anything visible changed.
    pub changed: bool,
    /// Effects to run after the transition.
    pub effects: Vec<E>,
}

impl<E> Default for DispatchResult<E> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<E> DispatchResult<E> {
    #[inline]
    pub fn unchanged() -> Self {
        Self {
            changed: false,
            effects: vec![],
        }
    }

    #[inline]
    pub fn changed() -> Self {
        Self {
            changed: true,
            effects: vec![],
        }
    }

    #[inline]
    pub fn changed_with(effect: E) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    /// Add an effect to this result.
    #[inline]
    pub fn with(mut self, effect: E) -> Self {
        self.effects.push(effect);
        self
    }

    /// Set the changed flag to true.
    #[inline]
    pub fn mark_changed(mut self) -> Self {
        self.changed = true;
        self
    }

    /// Fold another result into this one, keeping effect order.
    pub fn merge(mut self, other: DispatchResult<E>) -> Self {
        self.changed |= other.changed;
        self.effects.extend(other.effects);
        self
    }

    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

/// Identifies a timer slot. Scheduling onto an occupied slot replaces it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKey {
    /// Delay before a revealed pair is turned back / settled
    Resolve,
    /// One-second elapsed-time clock for solo games
    Clock,
}

impl TimerKey {
    pub fn name(self) -> &'static str {
        match self {
            TimerKey::Resolve => "resolve",
            TimerKey::Clock => "clock",
        }
    }
}

/// Timer work requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect<A> {
    /// Deliver `action` once after `delay`.
    Schedule {
        key: TimerKey,
        delay: Duration,
        action: A,
    },
    /// Deliver `action` every `period`, first delivery after one period.
    Interval {
        key: TimerKey,
        period: Duration,
        action: A,
    },
    /// Drop whatever is pending on this slot.
    Cancel(TimerKey),
}

impl<A> Effect<A> {
    pub fn key(&self) -> TimerKey {
        match self {
            Effect::Schedule { key, .. } | Effect::Interval { key, .. } => *key,
            Effect::Cancel(key) => *key,
        }
    }
}
