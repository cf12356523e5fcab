//! The playing screen: header, card grid and the player / stats strip

use crossterm::event::{KeyCode, MouseButton, MouseEventKind};
use pairs_core::{Board, BoardAction, GameState};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::card::{CardFace, CardView, CardViewProps, CARD_ACCENT, CARD_BACK, CARD_MATCHED};
use super::{hit, Component};
use crate::action::Action;
use crate::event::EventKind;

/// Below this width the header collapses into a menu button
pub const COMPACT_WIDTH: u16 = 60;

const MAX_CARD_WIDTH: u16 = 9;
const MAX_CARD_HEIGHT: u16 = 5;

/// `m:ss`
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

pub struct BoardViewProps<'a> {
    pub state: &'a GameState,
    pub board: &'a Board,
}

#[derive(Default)]
pub struct BoardView {
    cursor: usize,
    /// Card rectangles from the last render, by deck index
    card_areas: Vec<Rect>,
    /// Header buttons from the last render
    buttons: Vec<(Rect, BoardAction)>,
}

impl BoardView {
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn card_areas(&self) -> &[Rect] {
        &self.card_areas
    }

    fn move_cursor(&mut self, side: usize, len: usize, dx: isize, dy: isize) {
        if len == 0 || side == 0 {
            return;
        }
        let row = (self.cursor / side) as isize;
        let col = (self.cursor % side) as isize;
        let rows = len.div_ceil(side) as isize;
        let row = (row + dy).clamp(0, rows - 1) as usize;
        let col = (col + dx).clamp(0, side as isize - 1) as usize;
        self.cursor = (row * side + col).min(len - 1);
    }

    fn face(board: &Board, index: usize) -> CardFace {
        match board.deck().get(index) {
            Some(value) if board.is_highlighted(index) => CardFace::Highlighted(value),
            Some(value) if board.matched().contains(&index) => CardFace::Matched(value),
            _ => CardFace::Hidden,
        }
    }

    fn render_header(&mut self, frame: &mut Frame, area: Rect) {
        self.buttons.clear();
        frame.render_widget(
            Paragraph::new(Line::styled(
                "memory",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            area,
        );

        let entries = if area.width < COMPACT_WIDTH {
            vec![(" Menu (m) ", BoardAction::MenuOpen)]
        } else {
            vec![
                (" Restart (r) ", BoardAction::Restart),
                (" New Game (n) ", BoardAction::NewGame),
            ]
        };

        let mut right = area.right();
        for (label, action) in entries.iter().rev() {
            let width = label.chars().count() as u16;
            let x = right.saturating_sub(width).max(area.x);
            let button = Rect::new(x, area.y, width, 1).intersection(area);
            let style = match action {
                BoardAction::Restart | BoardAction::MenuOpen => {
                    Style::default().bg(CARD_ACCENT).fg(Color::White)
                }
                _ => Style::default().bg(CARD_MATCHED).fg(CARD_BACK),
            };
            frame.render_widget(Paragraph::new(*label).style(style), button);
            self.buttons.push((button, action.clone()));
            right = x.saturating_sub(1);
        }
    }

    fn render_grid(&mut self, frame: &mut Frame, area: Rect, state: &GameState, board: &Board) {
        let len = board.deck().len();
        self.card_areas.clear();
        if len == 0 {
            return;
        }
        self.cursor = self.cursor.min(len - 1);

        let side = state.grid_size.side().min(len);
        let rows = len.div_ceil(side);
        let cell_w = (area.width / side as u16).min(MAX_CARD_WIDTH);
        let cell_h = (area.height / rows as u16).min(MAX_CARD_HEIGHT);
        let left = area.x + area.width.saturating_sub(cell_w * side as u16) / 2;
        let top = area.y + area.height.saturating_sub(cell_h * rows as u16) / 2;

        for index in 0..len {
            let col = (index % side) as u16;
            let row = (index / side) as u16;
            let cell = Rect::new(left + col * cell_w, top + row * cell_h, cell_w, cell_h)
                .intersection(area);
            self.card_areas.push(cell);
            if cell.is_empty() {
                continue;
            }
            // One column of spacing between cards when there is room
            let card = if cell.width > 3 {
                Rect {
                    width: cell.width - 1,
                    ..cell
                }
            } else {
                cell
            };
            CardView.render(
                frame,
                card,
                CardViewProps {
                    face: Self::face(board, index),
                    is_selected: index == self.cursor,
                },
            );
        }
    }

    fn render_strip(&self, frame: &mut Frame, area: Rect, state: &GameState, board: &Board) {
        let compact = area.width < COMPACT_WIDTH;
        let tiles: Vec<(String, String, bool)> = if state.is_solo() {
            vec![
                ("Time".into(), format_clock(board.shown_seconds()), false),
                ("Moves".into(), state.moves()[0].to_string(), false),
            ]
        } else {
            state
                .scores()
                .iter()
                .enumerate()
                .map(|(index, score)| {
                    let name = if compact {
                        format!("P{}", index + 1)
                    } else {
                        format!("Player {}", index + 1)
                    };
                    (name, score.to_string(), index == state.current_turn)
                })
                .collect()
        };

        let constraints = vec![Constraint::Ratio(1, tiles.len() as u32); tiles.len()];
        let columns = Layout::horizontal(constraints).spacing(1).split(area);

        for ((title, value, current), column) in tiles.into_iter().zip(columns.iter()) {
            let (bg, fg) = if current {
                (CARD_ACCENT, Color::White)
            } else {
                (CARD_MATCHED, CARD_BACK)
            };
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(bg))
                .style(Style::default().bg(bg).fg(fg));
            let inner = block.inner(*column);
            frame.render_widget(block, *column);

            let text = if current && !compact {
                format!("{}  {}  ◂ turn", title, value)
            } else {
                format!("{}  {}", title, value)
            };
            frame.render_widget(
                Paragraph::new(text)
                    .alignment(Alignment::Center)
                    .style(Style::default().add_modifier(Modifier::BOLD)),
                inner,
            );
        }
    }
}

impl Component<Action> for BoardView {
    type Props<'a> = BoardViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let side = props.state.grid_size.side();
        let len = props.board.deck().len();

        let action = match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Left | KeyCode::Char('h') => {
                    self.move_cursor(side, len, -1, 0);
                    None
                }
                KeyCode::Right | KeyCode::Char('l') => {
                    self.move_cursor(side, len, 1, 0);
                    None
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.move_cursor(side, len, 0, -1);
                    None
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.move_cursor(side, len, 0, 1);
                    None
                }
                KeyCode::Enter | KeyCode::Char(' ') => Some(BoardAction::CardClick(self.cursor)),
                KeyCode::Char('r') => Some(BoardAction::Restart),
                KeyCode::Char('n') => Some(BoardAction::NewGame),
                KeyCode::Char('m') | KeyCode::Esc => Some(BoardAction::MenuOpen),
                _ => None,
            },
            EventKind::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = self
                    .card_areas
                    .iter()
                    .position(|area| hit(*area, mouse.column, mouse.row))
                {
                    self.cursor = index;
                    Some(BoardAction::CardClick(index))
                } else {
                    self.buttons
                        .iter()
                        .find(|(area, _)| hit(*area, mouse.column, mouse.row))
                        .map(|(_, action)| action.clone())
                }
            }
            _ => None,
        };
        action.map(Action::Board)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let [header, _, grid, strip] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(4),
            Constraint::Length(3),
        ])
        .areas(area);

        self.render_header(frame, header);
        self.render_grid(frame, grid, props.state, props.board);
        self.render_strip(frame, strip, props.state, props.board);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{char_key, click, key, RenderHarness};
    use pairs_core::{reducer, BoardConfig, Deck, FaceValue, GameAction, GameRng, Store};

    fn setup(players: u8) -> (Store<GameState, GameAction>, Board) {
        let mut store = Store::new(GameState::default(), reducer);
        store.dispatch(GameAction::PlayersSet(players));
        store.dispatch(GameAction::GameStart);
        let mut board = Board::new(BoardConfig::default(), GameRng::new(11)).unwrap();
        board.observe(store.state());
        (store, board)
    }

    fn events(
        view: &mut BoardView,
        state: &GameState,
        board: &Board,
        event: EventKind,
    ) -> Vec<Action> {
        view.handle_event(&event, BoardViewProps { state, board })
            .into_iter()
            .collect()
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(65), "1:05");
        assert_eq!(format_clock(600), "10:00");
    }

    #[test]
    fn test_cursor_moves_within_grid() {
        let (store, board) = setup(1);
        let mut view = BoardView::default();
        let state = store.state();

        events(&mut view, state, &board, key(KeyCode::Left));
        events(&mut view, state, &board, key(KeyCode::Up));
        assert_eq!(view.cursor(), 0);

        events(&mut view, state, &board, key(KeyCode::Right));
        events(&mut view, state, &board, char_key('j'));
        assert_eq!(view.cursor(), 5);

        for _ in 0..10 {
            events(&mut view, state, &board, key(KeyCode::Down));
            events(&mut view, state, &board, key(KeyCode::Right));
        }
        assert_eq!(view.cursor(), 15);

        assert_eq!(
            events(&mut view, state, &board, key(KeyCode::Enter)),
            vec![Action::Board(BoardAction::CardClick(15))]
        );
    }

    #[test]
    fn test_header_shortcuts() {
        let (store, board) = setup(2);
        let mut view = BoardView::default();
        let state = store.state();
        assert_eq!(
            events(&mut view, state, &board, char_key('r')),
            vec![Action::Board(BoardAction::Restart)]
        );
        assert_eq!(
            events(&mut view, state, &board, char_key('n')),
            vec![Action::Board(BoardAction::NewGame)]
        );
        assert_eq!(
            events(&mut view, state, &board, char_key('m')),
            vec![Action::Board(BoardAction::MenuOpen)]
        );
    }

    #[test]
    fn test_click_hits_card() {
        let (store, board) = setup(2);
        let mut harness = RenderHarness::new(80, 30);
        let mut view = BoardView::default();
        harness.render(|frame| {
            view.render(
                frame,
                frame.area(),
                BoardViewProps {
                    state: store.state(),
                    board: &board,
                },
            );
        });

        let target = view.card_areas()[6];
        assert_eq!(
            events(&mut view, store.state(), &board, click(target.x, target.y)),
            vec![Action::Board(BoardAction::CardClick(6))]
        );
        assert_eq!(view.cursor(), 6);
    }

    #[test]
    fn test_revealed_cards_render_faces() {
        let (mut store, mut board) = setup(1);
        board.load_deck(Deck::from_cards(
            (0..8u8).chain(0..8u8).map(FaceValue::Number).collect(),
        ));
        board.update(BoardAction::CardClick(3), &mut store);

        let mut harness = RenderHarness::new(80, 30);
        let mut view = BoardView::default();
        let output = harness.render_to_string_plain(|frame| {
            view.render(
                frame,
                frame.area(),
                BoardViewProps {
                    state: store.state(),
                    board: &board,
                },
            );
        });

        assert!(output.contains('3'));
        assert_eq!(output.matches('?').count(), 15);
        assert!(output.contains("Time  0:00"));
        assert!(output.contains("Moves  0"));
    }
}
