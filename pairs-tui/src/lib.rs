//! Terminal front end for the pairs memory game
//!
//! Input flows one way:
//! 1. Terminal event -> focused component's `handle_event` -> [`Action`]s
//! 2. [`App::update`] applies the action to the store or the board
//! 3. The board's timer effects are carried out by [`Timers`]
//! 4. Timer callbacks come back as actions; changed state re-renders

pub mod action;
pub mod app;
pub mod components;
pub mod event;
pub mod testing;
pub mod timers;

pub use action::Action;
pub use app::{run, App};
pub use event::{process_raw_event, spawn_event_poller, EventKind, PollerConfig, RawEvent};
pub use timers::Timers;
