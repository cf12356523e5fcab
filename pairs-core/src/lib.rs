//! Core state and rules for the pairs memory game
//!
//! This crate has no terminal or runtime dependencies. It follows a
//! Redux/Elm-inspired split:
//!
//! # Core Concepts
//!
//! - **GameState**: configuration and per-player counters, one per process
//! - **GameAction**: the only way to change `GameState`, applied by [`reducer`]
//! - **Store**: owns the state, runs middleware around every dispatch
//! - **Deck**: shuffled face values, each exactly twice
//! - **Board**: per-deck controller for reveal, match and turn flow
//! - **Effect**: timer work the board asks the runtime to perform
//!
//! # Example
//!
//! ```
//! use pairs_core::{reducer, Board, BoardAction, BoardConfig, GameAction, GameRng, GameState, Store};
//!
//! let mut store = Store::new(GameState::default(), reducer);
//! let mut board = Board::new(BoardConfig::default(), GameRng::new(7)).unwrap();
//!
//! store.dispatch(GameAction::PlayersSet(2));
//! store.dispatch(GameAction::GameStart);
//! board.observe(store.state());
//! assert_eq!(board.deck().len(), 16);
//!
//! let result = board.update(BoardAction::CardClick(0), &mut store);
//! assert!(result.changed);
//! assert_eq!(board.revealed(), &[0]);
//! ```

pub mod action;
pub mod board;
pub mod deck;
pub mod effect;
pub mod reducer;
pub mod rng;
pub mod state;
pub mod store;

pub use action::{Action, GameAction};
pub use board::{
    standings, Board, BoardAction, BoardConfig, BoardResult, Pending, Standings, CLOCK_PERIOD,
    RESOLVE_DELAY,
};
pub use deck::{validate_catalog, Deck, DeckError, FaceValue, Icon, ICONS};
pub use effect::{DispatchResult, Effect, TimerKey};
pub use reducer::reducer;
pub use rng::GameRng;
pub use state::{GameState, GridSize, Theme, MAX_PLAYERS};
pub use store::{Middleware, NoopMiddleware, RecordingMiddleware, Reducer, Store, TracingMiddleware};
