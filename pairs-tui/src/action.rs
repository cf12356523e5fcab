//! Everything the main loop can process

use pairs_core::{BoardAction, GameAction};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Store command, e.g. from the settings screen
    Game(GameAction),
    /// Board input or timer callback
    Board(BoardAction),
    /// Terminal size changed
    UiResize(u16, u16),
    Quit,
}

impl pairs_core::Action for Action {
    fn name(&self) -> &'static str {
        match self {
            Action::Game(action) => pairs_core::Action::name(action),
            Action::Board(action) => pairs_core::Action::name(action),
            Action::UiResize(..) => "UiResize",
            Action::Quit => "Quit",
        }
    }
}

impl From<GameAction> for Action {
    fn from(action: GameAction) -> Self {
        Action::Game(action)
    }
}

impl From<BoardAction> for Action {
    fn from(action: BoardAction) -> Self {
        Action::Board(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairs_core::Action as _;

    #[test]
    fn test_names_forward_to_inner_action() {
        assert_eq!(Action::from(GameAction::TurnNext).name(), "TurnNext");
        assert_eq!(Action::from(BoardAction::CardClick(3)).name(), "CardClick");
        assert_eq!(Action::UiResize(80, 24).name(), "UiResize");
        assert_eq!(Action::Quit.name(), "Quit");
    }
}
