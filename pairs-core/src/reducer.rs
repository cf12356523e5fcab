//! Reducer - pure function: (state, command) -> state
//!
//! - `fn(state: &mut GameState, action: GameAction) -> bool`
//! - Returns true if state changed (triggers re-render and board sync)
//! - Invalid arguments leave the state untouched; nothing here can fail

use tracing::warn;

use crate::action::GameAction;
use crate::state::{GameState, MAX_PLAYERS};

/// Apply one store command
pub fn reducer(state: &mut GameState, action: GameAction) -> bool {
    match action {
        // ===== Configuration =====
        GameAction::ThemeSet(theme) => replace(&mut state.theme, theme),

        GameAction::PlayersSet(count) => {
            if count == 0 || usize::from(count) > MAX_PLAYERS {
                warn!(count, "Ignoring out-of-range player count");
                return false;
            }
            state.player_count = count;
            state.score_slots = [0; MAX_PLAYERS];
            if state.current_turn >= state.players() {
                state.current_turn = 0;
            }
            true
        }

        GameAction::GridSizeSet(size) => replace(&mut state.grid_size, size),

        // ===== Scoring =====
        GameAction::ScoreSet { player, score } => {
            if player >= state.players() {
                warn!(player, "Ignoring score for inactive player");
                return false;
            }
            replace(&mut state.score_slots[player], score)
        }

        GameAction::ScoreIncrement { player } => {
            if player >= state.players() {
                warn!(player, "Ignoring score for inactive player");
                return false;
            }
            state.score_slots[player] = state.score_slots[player].saturating_add(1);
            true
        }

        // ===== Turn flow =====
        GameAction::TurnNext => {
            let next = (state.current_turn + 1) % state.players();
            replace(&mut state.current_turn, next)
        }

        GameAction::MovesIncrement => {
            let slot = &mut state.move_slots[state.current_turn];
            *slot = slot.saturating_add(1);
            true
        }

        GameAction::MovesReset => {
            let cleared = [0; MAX_PLAYERS];
            replace(&mut state.move_slots, cleared)
        }

        // ===== Lifecycle =====
        GameAction::GameStart => replace(&mut state.is_started, true),

        GameAction::GameReset => {
            let defaults = GameState {
                is_started: false,
                ..GameState::default()
            };
            replace(state, defaults)
        }
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}
