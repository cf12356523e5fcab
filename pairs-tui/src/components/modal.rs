//! Modal overlays: end-of-game results and the pause menu
//!
//! Background content is drawn first, then dimmed, then the modal is drawn
//! over a cleared centered area.

use crossterm::event::{KeyCode, MouseButton, MouseEventKind};
use pairs_core::{Board, BoardAction, GameState};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use super::board_view::format_clock;
use super::card::{CARD_ACCENT, CARD_BACK};
use super::{hit, Component};
use crate::action::Action;
use crate::event::EventKind;

/// Configuration for modal appearance
pub struct ModalStyle {
    /// Dim factor for background (0.0 = no dim, 1.0 = black)
    pub dim_factor: f32,
    /// Background color for the modal area (None = cleared to default)
    pub bg_color: Option<Color>,
}

impl Default for ModalStyle {
    fn default() -> Self {
        Self {
            dim_factor: 0.5,
            bg_color: Some(Color::Rgb(242, 242, 242)),
        }
    }
}

/// Dim everything drawn so far and clear `area` for modal content
///
/// Call this AFTER rendering background content.
pub fn render_modal(frame: &mut Frame, area: Rect, style: &ModalStyle) {
    dim_buffer(frame.buffer_mut(), style.dim_factor);
    frame.render_widget(Clear, area);
    if let Some(bg) = style.bg_color {
        frame.buffer_mut().set_style(area, Style::default().bg(bg));
    }
}

fn dim_buffer(buffer: &mut Buffer, factor: f32) {
    let scale = 1.0 - factor.clamp(0.0, 1.0);
    for cell in buffer.content.iter_mut() {
        cell.fg = dim_color(cell.fg, scale);
        cell.bg = dim_color(cell.bg, scale);
        cell.modifier.insert(Modifier::DIM);
    }
}

fn dim_color(color: Color, scale: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => Color::Rgb(
            (r as f32 * scale) as u8,
            (g as f32 * scale) as u8,
            (b as f32 * scale) as u8,
        ),
        other => other,
    }
}

/// Calculate a centered rectangle within an area
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Horizontal row of buttons with a keyboard selection
#[derive(Default)]
struct Buttons {
    selected: usize,
    areas: Vec<Rect>,
}

impl Buttons {
    /// Index of the button the event activates, if any
    fn handle(&mut self, event: &EventKind, count: usize) -> Option<usize> {
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => {
                    self.selected = self.selected.saturating_sub(1);
                    None
                }
                KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
                    self.selected = (self.selected + 1).min(count.saturating_sub(1));
                    None
                }
                KeyCode::Enter | KeyCode::Char(' ') => Some(self.selected),
                _ => None,
            },
            EventKind::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                self.areas
                    .iter()
                    .position(|area| hit(*area, mouse.column, mouse.row))
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, row: Rect, labels: &[&str]) {
        self.areas.clear();
        let total: u16 = labels
            .iter()
            .map(|l| l.chars().count() as u16 + 4)
            .sum::<u16>()
            + 2 * labels.len().saturating_sub(1) as u16;
        let mut x = row.x + row.width.saturating_sub(total) / 2;

        for (index, label) in labels.iter().enumerate() {
            let width = label.chars().count() as u16 + 4;
            let area = Rect::new(x, row.y, width, 1).intersection(row);
            let style = if index == self.selected {
                Style::default()
                    .bg(CARD_ACCENT)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().bg(CARD_BACK).fg(Color::White)
            };
            if !area.is_empty() {
                frame.render_widget(
                    Paragraph::new(format!("  {}  ", label)).style(style),
                    area,
                );
            }
            self.areas.push(area);
            x += width + 2;
        }
    }
}

fn modal_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(CARD_BACK))
}

fn title_style() -> Style {
    Style::default()
        .fg(Color::Rgb(21, 33, 41))
        .add_modifier(Modifier::BOLD)
}

fn muted() -> Style {
    Style::default().fg(Color::Rgb(112, 138, 158))
}

// ===== Results =====

pub struct ResultsProps<'a> {
    pub state: &'a GameState,
    pub board: &'a Board,
}

/// End-of-game summary with Restart / New Game
#[derive(Default)]
pub struct ResultsModal {
    buttons: Buttons,
}

impl ResultsModal {
    const LABELS: [&'static str; 2] = ["Restart", "New Game"];

    fn button_action(index: usize) -> Option<Action> {
        match index {
            0 => Some(Action::Board(BoardAction::ResultsRestart)),
            1 => Some(Action::Board(BoardAction::NewGame)),
            _ => None,
        }
    }

    fn lines(props: &ResultsProps<'_>) -> Vec<Line<'static>> {
        let state = props.state;
        let standings = props.board.standings();
        let mut lines = Vec::new();

        if state.is_solo() {
            lines.push(Line::styled("You did it!", title_style()));
            lines.push(Line::default());
            lines.push(Line::styled("Game over! Here's how you got on…", muted()));
            lines.push(Line::default());
            lines.push(stat_line("Time", format_clock(props.board.shown_seconds())));
            lines.push(stat_line("Moves", state.moves()[0].to_string()));
            return lines;
        }

        let headline = match standings.winners.first() {
            Some(winner) if !standings.is_tie => format!("Player {} wins!", winner + 1),
            _ => "It's a tie!".to_string(),
        };
        lines.push(Line::styled(headline, title_style()));
        lines.push(Line::default());
        lines.push(Line::styled("Game over! Here are the results…", muted()));
        lines.push(Line::default());

        for (index, score) in state.scores().iter().enumerate() {
            let is_winner = standings.winners.contains(&index);
            let name = if is_winner {
                format!("Player {} (Winner!)", index + 1)
            } else {
                format!("Player {}", index + 1)
            };
            let pairs = format!("{} Pairs", score);
            let style = if is_winner {
                Style::default()
                    .bg(Color::Rgb(21, 33, 41))
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Rgb(48, 72, 89))
            };
            lines.push(spread(name, pairs, style));
        }
        lines
    }
}

fn stat_line(title: &'static str, value: String) -> Line<'static> {
    spread(title.to_string(), value, Style::default().fg(Color::Rgb(48, 72, 89)))
}

/// Left label, right value, padded to a fixed width
fn spread(left: String, right: String, style: Style) -> Line<'static> {
    const WIDTH: usize = 34;
    let gap = WIDTH.saturating_sub(left.chars().count() + right.chars().count());
    Line::from(vec![
        Span::styled(left, style),
        Span::styled(" ".repeat(gap.max(1)), style),
        Span::styled(right, style),
    ])
}

impl Component<Action> for ResultsModal {
    type Props<'a> = ResultsProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        _props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if let EventKind::Key(key) = event {
            match key.code {
                KeyCode::Char('r') => return Self::button_action(0),
                KeyCode::Char('n') => return Self::button_action(1),
                KeyCode::Esc => return Some(Action::Board(BoardAction::ResultsDismiss)),
                _ => {}
            }
        }
        self.buttons
            .handle(event, Self::LABELS.len())
            .and_then(Self::button_action)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let lines = Self::lines(&props);
        let height = lines.len() as u16 + 6;
        let modal = centered_rect(44, height, area);

        render_modal(frame, modal, &ModalStyle::default());
        let block = modal_block();
        let inner = block.inner(modal);
        frame.render_widget(block, modal);

        let body = Rect {
            y: inner.y + 1,
            height: inner.height.saturating_sub(3),
            ..inner
        };
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), body);

        let buttons = Rect {
            y: inner.bottom().saturating_sub(2),
            height: 1,
            ..inner
        };
        self.buttons.render(frame, buttons, &Self::LABELS);
    }
}

// ===== Menu =====

/// Pause menu: Restart / New Game / Resume Game
#[derive(Default)]
pub struct MenuModal {
    buttons: Buttons,
}

impl MenuModal {
    const LABELS: [&'static str; 3] = ["Restart", "New Game", "Resume Game"];

    fn button_actions(index: usize) -> Vec<Action> {
        match index {
            0 => vec![
                Action::Board(BoardAction::Restart),
                Action::Board(BoardAction::MenuClose),
            ],
            1 => vec![Action::Board(BoardAction::NewGame)],
            2 => vec![Action::Board(BoardAction::MenuClose)],
            _ => vec![],
        }
    }
}

impl Component<Action> for MenuModal {
    type Props<'a> = ();

    fn handle_event(
        &mut self,
        event: &EventKind,
        _props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if let EventKind::Key(key) = event {
            match key.code {
                KeyCode::Char('r') => return Self::button_actions(0),
                KeyCode::Char('n') => return Self::button_actions(1),
                KeyCode::Esc | KeyCode::Char('m') => return Self::button_actions(2),
                _ => {}
            }
        }
        self.buttons
            .handle(event, Self::LABELS.len())
            .map(Self::button_actions)
            .unwrap_or_default()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, _props: Self::Props<'_>) {
        let modal = centered_rect(48, 7, area);
        render_modal(frame, modal, &ModalStyle::default());
        let block = modal_block().title(Line::styled(" Menu ", title_style()).alignment(Alignment::Center));
        let inner = block.inner(modal);
        frame.render_widget(block, modal);

        let row = Rect {
            y: inner.y + inner.height / 2,
            height: 1,
            ..inner
        };
        self.buttons.render(frame, row, &Self::LABELS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{char_key, click, key, RenderHarness};
    use pairs_core::{reducer, BoardConfig, Deck, FaceValue, GameAction, GameRng, Store};

    /// Finished game: player 2 of 3 found both pairs
    fn finished(players: u8) -> (Store<GameState, GameAction>, Board) {
        let mut store = Store::new(GameState::default(), reducer);
        store.dispatch(GameAction::PlayersSet(players));
        store.dispatch(GameAction::GameStart);
        let mut board = Board::new(BoardConfig::default(), GameRng::new(3)).unwrap();
        board.observe(store.state());
        board.load_deck(Deck::from_cards(vec![
            FaceValue::Number(0),
            FaceValue::Number(0),
            FaceValue::Number(1),
            FaceValue::Number(1),
        ]));
        if players > 1 {
            store.dispatch(GameAction::TurnNext);
        }
        for index in 0..4 {
            board.update(BoardAction::CardClick(index), &mut store);
            if index % 2 == 1 {
                let session = board.session();
                board.update(BoardAction::ResolveDidElapse { session }, &mut store);
            }
        }
        (store, board)
    }

    fn render_results(store: &Store<GameState, GameAction>, board: &Board) -> String {
        let mut harness = RenderHarness::new(60, 24);
        let mut modal = ResultsModal::default();
        harness.render_to_string_plain(|frame| {
            modal.render(
                frame,
                frame.area(),
                ResultsProps {
                    state: store.state(),
                    board,
                },
            );
        })
    }

    #[test]
    fn test_multiplayer_results() {
        let (store, board) = finished(3);
        assert!(board.is_finished());

        let output = render_results(&store, &board);
        assert!(output.contains("Player 2 wins!"));
        assert!(output.contains("Player 2 (Winner!)"));
        assert!(output.contains("2 Pairs"));
        assert!(output.contains("Restart"));
        assert!(output.contains("New Game"));
    }

    #[test]
    fn test_solo_results() {
        let (store, board) = finished(1);
        let output = render_results(&store, &board);
        assert!(output.contains("You did it!"));
        assert!(output.contains("0:00"));
        assert!(output.contains("Moves"));
    }

    #[test]
    fn test_results_buttons() {
        let (store, board) = finished(2);
        let mut modal = ResultsModal::default();
        let props = || ResultsProps {
            state: store.state(),
            board: &board,
        };

        let actions: Vec<_> = modal.handle_event(&key(KeyCode::Enter), props()).into_iter().collect();
        assert_eq!(actions, vec![Action::Board(BoardAction::ResultsRestart)]);

        modal.handle_event(&key(KeyCode::Right), props());
        let actions: Vec<_> = modal.handle_event(&key(KeyCode::Enter), props()).into_iter().collect();
        assert_eq!(actions, vec![Action::Board(BoardAction::NewGame)]);

        let actions: Vec<_> = modal.handle_event(&key(KeyCode::Esc), props()).into_iter().collect();
        assert_eq!(actions, vec![Action::Board(BoardAction::ResultsDismiss)]);
    }

    #[test]
    fn test_menu_restart_closes_menu() {
        let mut modal = MenuModal::default();
        let actions: Vec<_> = modal.handle_event(&char_key('r'), ()).into_iter().collect();
        assert_eq!(
            actions,
            vec![
                Action::Board(BoardAction::Restart),
                Action::Board(BoardAction::MenuClose)
            ]
        );
    }

    #[test]
    fn test_menu_click_resume() {
        let mut harness = RenderHarness::new(60, 20);
        let mut modal = MenuModal::default();
        let output = harness.render_to_string_plain(|frame| modal.render(frame, frame.area(), ()));
        assert!(output.contains("Resume Game"));

        let resume = modal.buttons.areas[2];
        let actions: Vec<_> = modal
            .handle_event(&click(resume.x + 1, resume.y), ())
            .into_iter()
            .collect();
        assert_eq!(actions, vec![Action::Board(BoardAction::MenuClose)]);
    }

    #[test]
    fn test_modal_dims_background() {
        let mut harness = RenderHarness::new(40, 12);
        harness.render(|frame| {
            frame.render_widget(
                Paragraph::new("background").style(Style::default().fg(Color::Rgb(200, 100, 50))),
                frame.area(),
            );
            let area = centered_rect(20, 4, frame.area());
            render_modal(frame, area, &ModalStyle::default());
        });
        assert_eq!(harness.buffer()[(0, 0)].fg, Color::Rgb(100, 50, 25));
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 80, 24);
        let centered = centered_rect(40, 10, area);
        assert_eq!(centered, Rect::new(20, 7, 40, 10));

        let clamped = centered_rect(100, 50, Rect::new(0, 0, 30, 10));
        assert!(clamped.width <= 28 && clamped.height <= 8);
    }
}
