//! One deck position on the board

use pairs_core::FaceValue;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::Component;
use crate::action::Action;

pub const CARD_BACK: Color = Color::Rgb(48, 72, 89);
pub const CARD_ACCENT: Color = Color::Rgb(253, 162, 20);
pub const CARD_MATCHED: Color = Color::Rgb(188, 206, 217);

/// What a card shows this frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardFace {
    /// Face down
    Hidden,
    /// Part of the pair being resolved
    Highlighted(FaceValue),
    /// Found earlier, stays face up
    Matched(FaceValue),
}

impl CardFace {
    pub fn label(&self) -> String {
        match self {
            CardFace::Hidden => "?".to_string(),
            CardFace::Highlighted(value) | CardFace::Matched(value) => value.to_string(),
        }
    }
}

pub struct CardViewProps {
    pub face: CardFace,
    /// Under the keyboard cursor
    pub is_selected: bool,
}

/// Render-only; clicks are hit-tested by the board
#[derive(Default)]
pub struct CardView;

impl Component<Action> for CardView {
    type Props<'a> = CardViewProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let (fill, text) = match props.face {
            CardFace::Hidden => (CARD_BACK, Color::Gray),
            CardFace::Highlighted(_) => (CARD_ACCENT, Color::Black),
            CardFace::Matched(_) => (CARD_MATCHED, Color::Black),
        };

        let border = if props.is_selected {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else if matches!(props.face, CardFace::Highlighted(_)) {
            Style::default().fg(CARD_ACCENT)
        } else {
            Style::default().fg(fill)
        };
        let border_type = if props.is_selected {
            BorderType::Thick
        } else {
            BorderType::Rounded
        };

        let label = Paragraph::new(props.face.label())
            .style(Style::default().fg(text).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);

        if area.height < 3 || area.width < 3 {
            frame.render_widget(label.style(Style::default().bg(fill).fg(text)), area);
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(border)
            .style(Style::default().bg(fill));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let middle = Rect {
            y: inner.y + inner.height / 2,
            height: 1,
            ..inner
        };
        frame.render_widget(label, middle);
    }
}
