//! Root composer and main loop
//!
//! `App` owns the store, the board controller and every view. The loop in
//! [`run`] feeds it terminal events, queued actions and timer callbacks,
//! and carries out the timer effects it returns.

use std::io;

use crossterm::event::{KeyCode, KeyModifiers};
use pairs_core::{
    Action as _, Board, BoardAction, BoardResult, GameAction, GameState, Middleware, Store,
    TracingMiddleware,
};
use ratatui::backend::Backend;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace};

use crate::action::Action;
use crate::components::{
    BoardView, BoardViewProps, Component, MenuModal, ResultsModal, ResultsProps, SettingsView,
    SettingsViewProps,
};
use crate::event::{process_raw_event, spawn_event_poller, EventKind, PollerConfig, RawEvent};
use crate::timers::Timers;

pub struct App<M = TracingMiddleware>
where
    M: Middleware<GameState, GameAction>,
{
    store: Store<GameState, GameAction, M>,
    board: Board,
    settings: SettingsView,
    board_view: BoardView,
    results: ResultsModal,
    menu: MenuModal,
    size: (u16, u16),
    should_quit: bool,
}

impl<M> App<M>
where
    M: Middleware<GameState, GameAction>,
{
    pub fn new(store: Store<GameState, GameAction, M>, board: Board) -> Self {
        Self {
            store,
            board,
            settings: SettingsView::default(),
            board_view: BoardView::default(),
            results: ResultsModal::default(),
            menu: MenuModal::default(),
            size: (0, 0),
            should_quit: false,
        }
    }

    /// Sync the board with the initial store state
    ///
    /// Call once before the first event; the returned effects arm timers.
    pub fn start(&mut self) -> BoardResult {
        self.board.observe(self.store.state())
    }

    pub fn state(&self) -> &GameState {
        self.store.state()
    }

    pub fn store(&self) -> &Store<GameState, GameAction, M> {
        &self.store
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> (u16, u16) {
        self.size
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Map input to actions through whichever view currently has focus
    pub fn handle_event(&mut self, event: &EventKind) -> Vec<Action> {
        match event {
            EventKind::Resize(w, h) => return vec![Action::UiResize(*w, *h)],
            EventKind::Key(key) => {
                let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c');
                if ctrl_c || key.code == KeyCode::Char('q') {
                    return vec![Action::Quit];
                }
            }
            EventKind::Mouse(_) => {}
        }

        let state = self.store.state();
        if !state.is_started {
            self.settings
                .handle_event(event, SettingsViewProps { state })
                .into_iter()
                .collect()
        } else if self.board.results_open() {
            let props = ResultsProps {
                state,
                board: &self.board,
            };
            self.results.handle_event(event, props).into_iter().collect()
        } else if self.board.menu_open() {
            self.menu.handle_event(event, ()).into_iter().collect()
        } else {
            let props = BoardViewProps {
                state,
                board: &self.board,
            };
            self.board_view
                .handle_event(event, props)
                .into_iter()
                .collect()
        }
    }

    /// Apply one action; returns whether to re-render plus timer effects
    pub fn update(&mut self, action: Action) -> BoardResult {
        trace!(action = action.name(), "Update");
        match action {
            Action::Game(action) => {
                let changed = self.store.dispatch(action);
                if changed {
                    self.board.observe(self.store.state()).mark_changed()
                } else {
                    BoardResult::unchanged()
                }
            }
            Action::Board(action) => self.board.update(action, &mut self.store),
            Action::UiResize(w, h) => {
                self.size = (w, h);
                BoardResult::changed()
            }
            Action::Quit => {
                info!("Quit requested");
                self.should_quit = true;
                BoardResult::unchanged()
            }
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let state = self.store.state();

        if !state.is_started {
            self.settings
                .render(frame, area, SettingsViewProps { state });
            return;
        }

        self.board_view.render(
            frame,
            area,
            BoardViewProps {
                state,
                board: &self.board,
            },
        );
        if self.board.results_open() {
            self.results.render(
                frame,
                area,
                ResultsProps {
                    state,
                    board: &self.board,
                },
            );
        } else if self.board.menu_open() {
            self.menu.render(frame, area, ());
        }
    }
}

/// Run the event/action/render loop until quit
pub async fn run<B, M>(terminal: &mut Terminal<B>, app: &mut App<M>) -> io::Result<()>
where
    B: Backend,
    M: Middleware<GameState, GameAction>,
{
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (timer_tx, mut timer_rx) = mpsc::unbounded_channel::<BoardAction>();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
    let cancel_token = CancellationToken::new();
    let _poller = spawn_event_poller(event_tx, PollerConfig::default(), cancel_token.clone());

    let mut timers = Timers::new(timer_tx);
    for effect in app.start().effects {
        timers.apply(effect);
    }

    let mut should_render = true;
    loop {
        if should_render {
            terminal.draw(|frame| app.render(frame))?;
            should_render = false;
        }

        let result = tokio::select! {
            Some(raw) = event_rx.recv() => {
                let Some(event) = process_raw_event(raw) else { continue };
                for action in app.handle_event(&event) {
                    let _ = action_tx.send(action);
                }
                // Cursor and focus moves have no action but still redraw
                BoardResult::changed()
            }

            Some(action) = action_rx.recv() => app.update(action),

            Some(action) = timer_rx.recv() => app.update(Action::Board(action)),

            else => break,
        };

        if result.has_effects() {
            debug!(count = result.effects.len(), "Applying effects");
            for effect in result.effects {
                timers.apply(effect);
            }
        }
        should_render |= result.changed;

        if app.should_quit() {
            break;
        }
    }

    cancel_token.cancel();
    timers.cancel_all();
    Ok(())
}
