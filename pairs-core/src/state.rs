//! Game configuration and in-progress game state
//!
//! One `GameState` lives for the whole process. Views read it through
//! `Store::state()`; only the reducer writes to it.

use serde::{Deserialize, Serialize};

/// Upper bound on players; score and move slots are sized to this.
pub const MAX_PLAYERS: usize = 4;

/// What is printed on the card faces
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Numbers,
    Icons,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Numbers => Theme::Icons,
            Theme::Icons => Theme::Numbers,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Numbers => "Numbers",
            Theme::Icons => "Icons",
        }
    }
}

/// Board dimensions
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridSize {
    #[default]
    #[serde(rename = "4x4")]
    Four,
    #[serde(rename = "6x6")]
    Six,
}

impl GridSize {
    /// Cards per row (and per column)
    pub fn side(self) -> usize {
        match self {
            GridSize::Four => 4,
            GridSize::Six => 6,
        }
    }

    pub fn cell_count(self) -> usize {
        self.side() * self.side()
    }

    pub fn pair_count(self) -> usize {
        self.cell_count() / 2
    }

    pub fn toggle(self) -> Self {
        match self {
            GridSize::Four => GridSize::Six,
            GridSize::Six => GridSize::Four,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GridSize::Four => "4x4",
            GridSize::Six => "6x6",
        }
    }
}

/// Configuration plus the per-player counters of the running game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub theme: Theme,

    /// Active players, always within `1..=MAX_PLAYERS`
    pub player_count: u8,

    pub grid_size: GridSize,

    /// Index of the player to move, always `< player_count`
    pub current_turn: usize,

    /// Pairs found per player slot. Slots at or beyond `player_count` stay zero.
    pub score_slots: [u32; MAX_PLAYERS],

    /// Completed reveal cycles per player slot
    pub move_slots: [u32; MAX_PLAYERS],

    /// Settings screen when false, board when true
    pub is_started: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            theme: Theme::Numbers,
            player_count: 1,
            grid_size: GridSize::Four,
            current_turn: 0,
            score_slots: [0; MAX_PLAYERS],
            move_slots: [0; MAX_PLAYERS],
            is_started: false,
        }
    }
}

impl GameState {
    pub fn players(&self) -> usize {
        usize::from(self.player_count)
    }

    /// Scores of the active players only
    pub fn scores(&self) -> &[u32] {
        &self.score_slots[..self.players()]
    }

    /// Move counters of the active players only
    pub fn moves(&self) -> &[u32] {
        &self.move_slots[..self.players()]
    }

    pub fn is_solo(&self) -> bool {
        self.player_count == 1
    }

    /// The elapsed-time clock only runs for a started solo game
    pub fn clock_enabled(&self) -> bool {
        self.is_solo() && self.is_started
    }
}
