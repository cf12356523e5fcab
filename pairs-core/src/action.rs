//! Commands accepted by the game state store

use std::fmt::Debug;

use crate::state::{GridSize, Theme};

/// Marker trait for anything that can be dispatched to a store
///
/// Actions must be:
/// - Clone: middleware sees the action before the reducer consumes it
/// - Debug: for logging
/// - Send + 'static: actions travel back from timer tasks over a channel
pub trait Action: Clone + Debug + Send + 'static {
    /// Stable action name for logging and filtering
    fn name(&self) -> &'static str;
}

/// Commands that mutate the persistent game configuration
///
/// Naming follows `<Subject><Verb>` so related commands sort together in logs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameAction {
    /// Replace the card theme
    ThemeSet(Theme),

    /// Set the number of players (1..=4) and zero every score
    PlayersSet(u8),

    /// Replace the grid size
    GridSizeSet(GridSize),

    /// Overwrite one player's score with a caller-computed value
    ScoreSet { player: usize, score: u32 },

    /// Add one to a player's score
    ScoreIncrement { player: usize },

    /// Hand the turn to the next player
    TurnNext,

    /// Leave the settings screen and start playing
    GameStart,

    /// Restore every default and return to settings
    GameReset,

    /// Count one move for the player whose turn it is
    MovesIncrement,

    /// Zero the move counters
    MovesReset,
}

impl Action for GameAction {
    fn name(&self) -> &'static str {
        match self {
            GameAction::ThemeSet(_) => "ThemeSet",
            GameAction::PlayersSet(_) => "PlayersSet",
            GameAction::GridSizeSet(_) => "GridSizeSet",
            GameAction::ScoreSet { .. } => "ScoreSet",
            GameAction::ScoreIncrement { .. } => "ScoreIncrement",
            GameAction::TurnNext => "TurnNext",
            GameAction::GameStart => "GameStart",
            GameAction::GameReset => "GameReset",
            GameAction::MovesIncrement => "MovesIncrement",
            GameAction::MovesReset => "MovesReset",
        }
    }
}
