//! Centralized state store with reducer pattern
//!
//! The store is an explicit handle: whoever needs to change game state is
//! given `&mut Store` and calls [`Store::dispatch`]. There is no ambient
//! lookup.

use serde::Serialize;

use crate::action::Action;

/// A reducer function that handles actions and mutates state
///
/// Returns `true` if the state changed and a re-render is needed.
pub type Reducer<S, A> = fn(&mut S, A) -> bool;

/// Hooks run around every dispatch
///
/// Middleware observes; it cannot rewrite the action or the state.
pub trait Middleware<S, A: Action> {
    /// Called before the reducer sees the action
    fn before(&mut self, action: &A, state: &S);

    /// Called after the reducer ran
    fn after(&mut self, action: &A, state: &S, changed: bool);
}

/// Middleware that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl<S, A: Action> Middleware<S, A> for NoopMiddleware {
    fn before(&mut self, _action: &A, _state: &S) {}
    fn after(&mut self, _action: &A, _state: &S, _changed: bool) {}
}

/// Middleware that reports every dispatch through `tracing`
///
/// The resulting state is attached as JSON at trace level, which makes a
/// log file enough to replay how a game unfolded.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMiddleware;

impl<S: Serialize, A: Action> Middleware<S, A> for TracingMiddleware {
    fn before(&mut self, action: &A, _state: &S) {
        tracing::trace!(action = %action.name(), "Dispatching");
    }

    fn after(&mut self, action: &A, state: &S, changed: bool) {
        tracing::debug!(action = ?action, changed, "Action processed");
        if changed && tracing::enabled!(tracing::Level::TRACE) {
            match serde_json::to_string(state) {
                Ok(json) => tracing::trace!(state = %json, "State after dispatch"),
                Err(e) => tracing::warn!(error = %e, "Could not serialize state"),
            }
        }
    }
}

/// State container with a single mutation entry point
///
/// # Type Parameters
/// * `S` - The state type
/// * `A` - The action type
/// * `M` - Middleware, `NoopMiddleware` unless given
///
/// # Example
/// ```
/// use pairs_core::{reducer, GameAction, GameState, Store};
///
/// let mut store = Store::new(GameState::default(), reducer);
/// store.dispatch(GameAction::PlayersSet(2));
/// assert_eq!(store.state().scores(), &[0, 0]);
/// ```
pub struct Store<S, A: Action, M: Middleware<S, A> = NoopMiddleware> {
    state: S,
    reducer: Reducer<S, A>,
    middleware: M,
}

impl<S, A: Action> Store<S, A, NoopMiddleware> {
    /// Create a store without middleware
    pub fn new(state: S, reducer: Reducer<S, A>) -> Self {
        Self::with_middleware(state, reducer, NoopMiddleware)
    }
}

impl<S, A: Action, M: Middleware<S, A>> Store<S, A, M> {
    /// Create a store whose dispatches pass through `middleware`
    pub fn with_middleware(state: S, reducer: Reducer<S, A>, middleware: M) -> Self {
        Self {
            state,
            reducer,
            middleware,
        }
    }

    /// Apply one action synchronously
    ///
    /// Returns `true` if the state changed.
    pub fn dispatch(&mut self, action: A) -> bool {
        self.middleware.before(&action, &self.state);
        let changed = (self.reducer)(&mut self.state, action.clone());
        self.middleware.after(&action, &self.state, changed);
        changed
    }

    /// Get a reference to the current state
    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn middleware(&self) -> &M {
        &self.middleware
    }

    pub fn middleware_mut(&mut self) -> &mut M {
        &mut self.middleware
    }
}

/// Middleware that remembers the name of every dispatched action
///
/// Mostly useful in tests to assert which commands a controller issued.
#[derive(Debug, Clone, Default)]
pub struct RecordingMiddleware {
    pub dispatched: Vec<&'static str>,
}

impl RecordingMiddleware {
    /// How many times an action with this name was dispatched
    pub fn count(&self, name: &str) -> usize {
        self.dispatched.iter().filter(|n| **n == name).count()
    }

    pub fn clear(&mut self) {
        self.dispatched.clear();
    }
}

impl<S, A: Action> Middleware<S, A> for RecordingMiddleware {
    fn before(&mut self, action: &A, _state: &S) {
        self.dispatched.push(action.name());
    }

    fn after(&mut self, _action: &A, _state: &S, _changed: bool) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::GameAction;
    use crate::reducer::reducer;
    use crate::state::{GameState, Theme};

    #[test]
    fn test_store_dispatch() {
        let mut store = Store::new(GameState::default(), reducer);

        assert!(store.dispatch(GameAction::PlayersSet(3)));
        assert_eq!(store.state().player_count, 3);

        assert!(store.dispatch(GameAction::TurnNext));
        assert_eq!(store.state().current_turn, 1);
    }

    #[test]
    fn test_store_unchanged_dispatch() {
        let mut store = Store::new(GameState::default(), reducer);
        assert!(!store.dispatch(GameAction::ThemeSet(Theme::Numbers)));
        assert!(!store.dispatch(GameAction::PlayersSet(0)));
    }

    #[derive(Default)]
    struct CountingMiddleware {
        before_count: usize,
        changed_count: usize,
    }

    impl<S, A: Action> Middleware<S, A> for CountingMiddleware {
        fn before(&mut self, _action: &A, _state: &S) {
            self.before_count += 1;
        }

        fn after(&mut self, _action: &A, _state: &S, changed: bool) {
            if changed {
                self.changed_count += 1;
            }
        }
    }

    #[test]
    fn test_store_with_middleware() {
        let mut store = Store::with_middleware(
            GameState::default(),
            reducer,
            CountingMiddleware::default(),
        );

        store.dispatch(GameAction::GameStart);
        store.dispatch(GameAction::GameStart);

        assert_eq!(store.middleware().before_count, 2);
        assert_eq!(store.middleware().changed_count, 1);
    }

    #[test]
    fn test_recording_middleware() {
        let mut store = Store::with_middleware(
            GameState::default(),
            reducer,
            RecordingMiddleware::default(),
        );

        store.dispatch(GameAction::MovesIncrement);
        store.dispatch(GameAction::MovesIncrement);
        store.dispatch(GameAction::TurnNext);

        assert_eq!(store.middleware().count("MovesIncrement"), 2);
        assert_eq!(store.middleware().count("TurnNext"), 1);

        store.middleware_mut().clear();
        assert!(store.middleware().dispatched.is_empty());
    }

    #[test]
    fn test_tracing_middleware_passes_through() {
        let mut store = Store::with_middleware(GameState::default(), reducer, TracingMiddleware);
        assert!(store.dispatch(GameAction::GameStart));
        assert!(store.state().is_started);
    }
}
