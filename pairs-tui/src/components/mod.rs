//! Terminal views for the game
//!
//! Components follow these rules:
//! 1. Props carry all read-only data needed for rendering
//! 2. `handle_event` returns actions, never mutates game state
//! 3. `render` draws from props plus purely visual state (cursor, hit areas)

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

pub mod board_view;
pub mod card;
pub mod modal;
pub mod settings;

pub use board_view::{BoardView, BoardViewProps};
pub use card::{CardFace, CardView, CardViewProps};
pub use modal::{centered_rect, render_modal, MenuModal, ModalStyle, ResultsModal, ResultsProps};
pub use settings::{SettingsView, SettingsViewProps};

/// A UI element that renders from props and emits actions
///
/// Components receive the raw `EventKind`. Anything else they need to
/// decide (focus, whether a modal covers them) comes through `Props`.
pub trait Component<A> {
    /// Data required to render the component (read-only)
    type Props<'a>;

    /// Handle an event and return actions to dispatch
    ///
    /// Returns any `IntoIterator<Item = A>`: `None`, `Some(action)` or a `Vec`.
    /// The default is for render-only components.
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}

/// Whether a terminal cell lies inside `area`
pub(crate) fn hit(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}
