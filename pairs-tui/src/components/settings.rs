//! Settings screen shown before a game starts

use crossterm::event::{KeyCode, MouseButton, MouseEventKind};
use pairs_core::{GameAction, GameState, GridSize, Theme, MAX_PLAYERS};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::card::{CARD_ACCENT, CARD_BACK, CARD_MATCHED};
use super::modal::centered_rect;
use super::{hit, Component};
use crate::action::Action;
use crate::event::EventKind;

const PANEL_WIDTH: u16 = 44;
const PANEL_HEIGHT: u16 = 14;

/// Focusable rows, top to bottom
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Row {
    #[default]
    Theme,
    Players,
    Grid,
    Start,
}

impl Row {
    const ALL: [Row; 4] = [Row::Theme, Row::Players, Row::Grid, Row::Start];

    fn index(self) -> usize {
        Row::ALL.iter().position(|r| *r == self).unwrap_or(0)
    }

    fn prev(self) -> Self {
        Row::ALL[self.index().saturating_sub(1)]
    }

    fn next(self) -> Self {
        Row::ALL[(self.index() + 1).min(Row::ALL.len() - 1)]
    }
}

pub struct SettingsViewProps<'a> {
    pub state: &'a GameState,
}

#[derive(Default)]
pub struct SettingsView {
    selected: Row,
    /// Clickable regions from the last render
    hit_areas: Vec<(Rect, GameAction)>,
}

impl SettingsView {
    pub fn selected(&self) -> Row {
        self.selected
    }

    fn adjust(&self, state: &GameState, forward: bool) -> Option<GameAction> {
        match self.selected {
            Row::Theme => Some(GameAction::ThemeSet(if forward {
                Theme::Icons
            } else {
                Theme::Numbers
            })),
            Row::Players => {
                let players = if forward {
                    (state.player_count + 1).min(MAX_PLAYERS as u8)
                } else {
                    state.player_count.saturating_sub(1).max(1)
                };
                Some(GameAction::PlayersSet(players))
            }
            Row::Grid => Some(GameAction::GridSizeSet(if forward {
                GridSize::Six
            } else {
                GridSize::Four
            })),
            Row::Start => None,
        }
    }

    /// Enter cycles the focused row instead of clamping
    fn activate(&self, state: &GameState) -> GameAction {
        match self.selected {
            Row::Theme => GameAction::ThemeSet(state.theme.toggle()),
            Row::Players => GameAction::PlayersSet(state.player_count % MAX_PLAYERS as u8 + 1),
            Row::Grid => GameAction::GridSizeSet(state.grid_size.toggle()),
            Row::Start => GameAction::GameStart,
        }
    }
}

impl Component<Action> for SettingsView {
    type Props<'a> = SettingsViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let state = props.state;
        let action = match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => {
                    self.selected = self.selected.prev();
                    None
                }
                KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                    self.selected = self.selected.next();
                    None
                }
                KeyCode::Left | KeyCode::Char('h') => self.adjust(state, false),
                KeyCode::Right | KeyCode::Char('l') => self.adjust(state, true),
                KeyCode::Enter | KeyCode::Char(' ') => Some(self.activate(state)),
                KeyCode::Char('t') => Some(GameAction::ThemeSet(state.theme.toggle())),
                KeyCode::Char('g') => Some(GameAction::GridSizeSet(state.grid_size.toggle())),
                KeyCode::Char('s') => Some(GameAction::GameStart),
                KeyCode::Char(c @ '1'..='4') => c
                    .to_digit(10)
                    .map(|n| GameAction::PlayersSet(n as u8)),
                _ => None,
            },
            EventKind::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => self
                .hit_areas
                .iter()
                .find(|(area, _)| hit(*area, mouse.column, mouse.row))
                .map(|(_, action)| action.clone()),
            _ => None,
        };
        action.map(Action::Game)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        self.hit_areas.clear();

        let panel = centered_rect(PANEL_WIDTH, PANEL_HEIGHT, area);
        let block = Block::default()
            .title(Line::from(" memory ").alignment(Alignment::Center))
            .title_style(Style::default().add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CARD_MATCHED));
        let inner = block.inner(panel);
        frame.render_widget(block, panel);

        let bounds = frame.area();
        let mut y = inner.y + 1;

        let theme: Vec<_> = [Theme::Numbers, Theme::Icons]
            .into_iter()
            .map(|t| (t.label().to_string(), GameAction::ThemeSet(t), state.theme == t))
            .collect();
        let players: Vec<_> = (1..=MAX_PLAYERS as u8)
            .map(|n| (n.to_string(), GameAction::PlayersSet(n), state.player_count == n))
            .collect();
        let grid: Vec<_> = [GridSize::Four, GridSize::Six]
            .into_iter()
            .map(|g| (g.label().to_string(), GameAction::GridSizeSet(g), state.grid_size == g))
            .collect();

        for (row, title, options) in [
            (Row::Theme, "Select Theme", &theme[..]),
            (Row::Players, "Numbers of Players", &players[..]),
            (Row::Grid, "Grid Size", &grid[..]),
        ] {
            let focused = self.selected == row;
            let marker = if focused { "› " } else { "  " };
            let label_style = if focused {
                Style::default().fg(CARD_ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            draw_text(
                frame,
                Rect::new(inner.x + 1, y, inner.width.saturating_sub(2), 1),
                bounds,
                Line::from(vec![
                    Span::styled(marker, label_style),
                    Span::styled(title, label_style),
                ]),
            );
            y += 1;

            let mut x = inner.x + 3;
            for (label, action, active) in options {
                let text = format!(" {} ", label);
                let chip = Rect::new(x, y, text.chars().count() as u16, 1);
                let style = if *active {
                    Style::default()
                        .bg(CARD_ACCENT)
                        .fg(Color::Black)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().bg(CARD_BACK).fg(Color::Gray)
                };
                draw_text(frame, chip, bounds, Line::styled(text, style));
                self.hit_areas.push((chip, action.clone()));
                x = chip.right() + 2;
            }
            y += 2;
        }

        let start_focused = self.selected == Row::Start;
        let start_text = if start_focused {
            "› Start Game ‹"
        } else {
            "  Start Game  "
        };
        let start_style = if start_focused {
            Style::default()
                .bg(CARD_ACCENT)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(CARD_BACK).fg(Color::White)
        };
        let width = start_text.chars().count() as u16;
        let start = Rect::new(
            inner.x + inner.width.saturating_sub(width) / 2,
            y,
            width,
            1,
        );
        draw_text(frame, start, bounds, Line::styled(start_text, start_style));
        self.hit_areas.push((start, GameAction::GameStart));

        let hints = Rect::new(panel.x, panel.bottom(), panel.width, 1);
        draw_text(
            frame,
            hints,
            bounds,
            Line::styled(
                "↑↓ select  ←→ change  s start  q quit",
                Style::default().fg(Color::DarkGray),
            )
            .alignment(Alignment::Center),
        );
    }
}

/// Render one line clipped to the frame
fn draw_text(frame: &mut Frame, area: Rect, bounds: Rect, line: Line<'_>) {
    let area = area.intersection(bounds);
    if !area.is_empty() {
        frame.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{char_key, click, key, RenderHarness};

    fn events(view: &mut SettingsView, state: &GameState, event: EventKind) -> Vec<Action> {
        view.handle_event(&event, SettingsViewProps { state })
            .into_iter()
            .collect()
    }

    #[test]
    fn test_shortcuts() {
        let mut view = SettingsView::default();
        let state = GameState::default();

        assert_eq!(
            events(&mut view, &state, char_key('t')),
            vec![Action::Game(GameAction::ThemeSet(Theme::Icons))]
        );
        assert_eq!(
            events(&mut view, &state, char_key('3')),
            vec![Action::Game(GameAction::PlayersSet(3))]
        );
        assert_eq!(
            events(&mut view, &state, char_key('g')),
            vec![Action::Game(GameAction::GridSizeSet(GridSize::Six))]
        );
        assert_eq!(
            events(&mut view, &state, char_key('s')),
            vec![Action::Game(GameAction::GameStart)]
        );
        assert!(events(&mut view, &state, char_key('9')).is_empty());
    }

    #[test]
    fn test_arrows_move_focus_and_change_values() {
        let mut view = SettingsView::default();
        let state = GameState {
            player_count: 4,
            ..Default::default()
        };

        assert!(events(&mut view, &state, key(KeyCode::Down)).is_empty());
        assert_eq!(view.selected(), Row::Players);

        // Already at the maximum; the reducer sees an unchanged value
        assert_eq!(
            events(&mut view, &state, key(KeyCode::Right)),
            vec![Action::Game(GameAction::PlayersSet(4))]
        );
        assert_eq!(
            events(&mut view, &state, key(KeyCode::Left)),
            vec![Action::Game(GameAction::PlayersSet(3))]
        );
        // Enter cycles around
        assert_eq!(
            events(&mut view, &state, key(KeyCode::Enter)),
            vec![Action::Game(GameAction::PlayersSet(1))]
        );
    }

    #[test]
    fn test_enter_on_start_row_starts() {
        let mut view = SettingsView::default();
        let state = GameState::default();
        for _ in 0..5 {
            events(&mut view, &state, key(KeyCode::Down));
        }
        assert_eq!(view.selected(), Row::Start);
        assert_eq!(
            events(&mut view, &state, key(KeyCode::Enter)),
            vec![Action::Game(GameAction::GameStart)]
        );
    }

    #[test]
    fn test_render_marks_active_choices() {
        let mut harness = RenderHarness::new(60, 20);
        let mut view = SettingsView::default();
        let state = GameState::default();

        let output = harness.render_to_string_plain(|frame| {
            view.render(frame, frame.area(), SettingsViewProps { state: &state });
        });

        assert!(output.contains("memory"));
        assert!(output.contains("Select Theme"));
        assert!(output.contains("Numbers of Players"));
        assert!(output.contains("Grid Size"));
        assert!(output.contains("Start Game"));

        let (numbers, _) = view
            .hit_areas
            .iter()
            .find(|(_, action)| *action == GameAction::ThemeSet(Theme::Numbers))
            .unwrap();
        assert_eq!(harness.buffer()[(numbers.x, numbers.y)].bg, CARD_ACCENT);
    }

    #[test]
    fn test_click_on_chip() {
        let mut harness = RenderHarness::new(60, 20);
        let mut view = SettingsView::default();
        let state = GameState::default();
        harness.render(|frame| {
            view.render(frame, frame.area(), SettingsViewProps { state: &state });
        });

        let (six, _) = view
            .hit_areas
            .iter()
            .find(|(_, action)| *action == GameAction::GridSizeSet(GridSize::Six))
            .cloned()
            .unwrap();
        assert_eq!(
            events(&mut view, &state, click(six.x + 1, six.y)),
            vec![Action::Game(GameAction::GridSizeSet(GridSize::Six))]
        );
        assert!(events(&mut view, &state, click(0, 0)).is_empty());
    }
}
