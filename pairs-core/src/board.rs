//! Board controller - the reveal / match / resolve loop
//!
//! The board owns everything that only lives for one deck: which cards
//! are face-up, which pairs are found, the solo clock and the end-of-game
//! result. It changes persistent game state only by dispatching
//! [`GameAction`]s through the store handle it is given.
//!
//! State machine for one pair:
//!
//! ```text
//! Idle --click--> OneRevealed --click--> Matched    --delay--> Idle
//!                                    \-> Mismatched --delay--> Idle (+turn)
//! ```
//!
//! While a pair is pending, further clicks are ignored, so at most one
//! resolution timer is ever outstanding.

use std::collections::BTreeSet;
use std::time::Duration;

use tracing::{debug, error, info};

use crate::action::{Action, GameAction};
use crate::deck::{validate_catalog, Deck, DeckError, Icon, ICONS};
use crate::effect::{DispatchResult, Effect, TimerKey};
use crate::rng::GameRng;
use crate::state::{GameState, GridSize, Theme};
use crate::store::{Middleware, Store};

/// How long a revealed pair stays up before it settles
pub const RESOLVE_DELAY: Duration = Duration::from_millis(700);

/// Solo clock resolution
pub const CLOCK_PERIOD: Duration = Duration::from_secs(1);

/// Timing knobs for the board
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardConfig {
    pub resolve_delay: Duration,
    pub clock_period: Duration,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            resolve_delay: RESOLVE_DELAY,
            clock_period: CLOCK_PERIOD,
        }
    }
}

/// Inputs to the board controller
///
/// `Did*` variants are timer callbacks. They carry the session they were
/// scheduled in so that a callback outliving its deck is dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoardAction {
    /// A card position was clicked / selected
    CardClick(usize),
    /// The resolution delay for the pending pair ran out
    ResolveDidElapse { session: u64 },
    /// One clock period passed
    ClockDidTick { session: u64 },
    /// Clear found pairs and reshuffle the same deck
    Restart,
    /// Restart from the results modal; also closes it and zeroes the clock
    ResultsRestart,
    /// Go back to settings with default configuration
    NewGame,
    /// Close the results modal, leaving the finished board visible
    ResultsDismiss,
    MenuOpen,
    MenuClose,
}

impl Action for BoardAction {
    fn name(&self) -> &'static str {
        match self {
            BoardAction::CardClick(_) => "CardClick",
            BoardAction::ResolveDidElapse { .. } => "ResolveDidElapse",
            BoardAction::ClockDidTick { .. } => "ClockDidTick",
            BoardAction::Restart => "Restart",
            BoardAction::ResultsRestart => "ResultsRestart",
            BoardAction::NewGame => "NewGame",
            BoardAction::ResultsDismiss => "ResultsDismiss",
            BoardAction::MenuOpen => "MenuOpen",
            BoardAction::MenuClose => "MenuClose",
        }
    }
}

pub type BoardResult = DispatchResult<Effect<BoardAction>>;

/// Who is ahead
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Standings {
    /// Every player index sharing the top score, ascending
    pub winners: Vec<usize>,
    pub is_tie: bool,
}

/// Rank the given scores
///
/// Only pass the active players' scores (`GameState::scores()`); a slot
/// that is not playing must not be able to tie for first.
pub fn standings(scores: &[u32]) -> Standings {
    let Some(&best) = scores.iter().max() else {
        return Standings::default();
    };
    let winners: Vec<usize> = scores
        .iter()
        .enumerate()
        .filter(|(_, score)| **score == best)
        .map(|(index, _)| index)
        .collect();
    Standings {
        is_tie: winners.len() > 1,
        winners,
    }
}

/// Outcome of the pair currently waiting on the resolution delay
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pending {
    Matched,
    Mismatched,
}

/// The configuration a deck was dealt for
type Layout = (bool, GridSize, Theme);

pub struct Board {
    config: BoardConfig,
    rng: GameRng,
    catalog: &'static [Icon],
    deck: Deck,
    layout: Option<Layout>,
    session: u64,

    revealed: Vec<usize>,
    highlighted: Vec<usize>,
    matched: BTreeSet<usize>,
    pending: Option<Pending>,

    clock_running: bool,
    elapsed_seconds: u32,
    final_seconds: u32,

    is_finished: bool,
    results_open: bool,
    menu_open: bool,
    standings: Standings,
}

impl Board {
    /// Create a board drawing icons from the built-in catalog
    pub fn new(config: BoardConfig, rng: GameRng) -> Result<Self, DeckError> {
        Self::with_catalog(config, rng, &ICONS)
    }

    /// Create a board drawing icons from `catalog`
    ///
    /// The catalog is checked up front so a deck can always be dealt later.
    pub fn with_catalog(
        config: BoardConfig,
        rng: GameRng,
        catalog: &'static [Icon],
    ) -> Result<Self, DeckError> {
        validate_catalog(catalog)?;
        Ok(Self {
            config,
            rng,
            catalog,
            deck: Deck::default(),
            layout: None,
            session: 0,
            revealed: Vec::with_capacity(2),
            highlighted: Vec::with_capacity(2),
            matched: BTreeSet::new(),
            pending: None,
            clock_running: false,
            elapsed_seconds: 0,
            final_seconds: 0,
            is_finished: false,
            results_open: false,
            menu_open: false,
            standings: Standings::default(),
        })
    }

    // ===== Read access for views =====

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn revealed(&self) -> &[usize] {
        &self.revealed
    }

    pub fn highlighted(&self) -> &[usize] {
        &self.highlighted
    }

    pub fn matched(&self) -> &BTreeSet<usize> {
        &self.matched
    }

    pub fn pending(&self) -> Option<Pending> {
        self.pending
    }

    /// Face-up either temporarily or for good
    pub fn is_face_up(&self, index: usize) -> bool {
        self.revealed.contains(&index) || self.matched.contains(&index)
    }

    pub fn is_highlighted(&self, index: usize) -> bool {
        self.highlighted.contains(&index)
    }

    pub fn clock_running(&self) -> bool {
        self.clock_running
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn final_seconds(&self) -> u32 {
        self.final_seconds
    }

    /// What the time display should show
    pub fn shown_seconds(&self) -> u32 {
        if self.is_finished {
            self.final_seconds
        } else {
            self.elapsed_seconds
        }
    }

    pub fn is_finished(&self) -> bool {
        self.is_finished
    }

    pub fn results_open(&self) -> bool {
        self.results_open
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn standings(&self) -> &Standings {
        &self.standings
    }

    // ===== Transitions =====

    /// Handle one board action, dispatching store commands as needed
    pub fn update<M>(
        &mut self,
        action: BoardAction,
        store: &mut Store<GameState, GameAction, M>,
    ) -> BoardResult
    where
        M: Middleware<GameState, GameAction>,
    {
        let result = match action {
            BoardAction::CardClick(index) => self.click(index, store),
            BoardAction::ResolveDidElapse { session } => self.resolve(session, store),
            BoardAction::ClockDidTick { session } => self.tick(session),
            BoardAction::Restart => {
                if self.is_finished {
                    self.restart_from_results(store.state())
                } else {
                    self.restart()
                }
            }
            BoardAction::ResultsRestart => self.restart_from_results(store.state()),
            BoardAction::NewGame => {
                self.menu_open = false;
                store.dispatch(GameAction::GameReset);
                BoardResult::changed()
            }
            BoardAction::ResultsDismiss => {
                if self.results_open {
                    self.results_open = false;
                    BoardResult::changed()
                } else {
                    BoardResult::unchanged()
                }
            }
            BoardAction::MenuOpen => self.set_menu(true),
            BoardAction::MenuClose => self.set_menu(false),
        };

        // Store commands issued above may have moved scores or the layout
        result.merge(self.observe(store.state()))
    }

    /// Re-derive board state from the store
    ///
    /// Call after every store change. Deals a fresh deck when the start flag,
    /// grid size or theme changed, drives the solo clock, and re-ranks scores.
    pub fn observe(&mut self, game: &GameState) -> BoardResult {
        let mut result = BoardResult::unchanged();

        let layout = (game.is_started, game.grid_size, game.theme);
        if self.layout != Some(layout) {
            self.layout = Some(layout);
            result = result.merge(self.deal(game));
        } else if game.clock_enabled() != self.clock_running {
            if game.clock_enabled() && !self.is_finished {
                result = result.merge(self.start_clock());
            } else if !game.clock_enabled() {
                result = result.merge(self.stop_clock());
            }
        }

        let standings = standings(game.scores());
        if standings != self.standings {
            self.standings = standings;
            result = result.mark_changed();
        }

        result
    }

    /// Lay out a specific deck, discarding the current one
    ///
    /// Fixture hook for tests that need a known board; normal play deals
    /// through [`Board::observe`]. The round is cleared and a running clock
    /// keeps counting, re-armed under the new session.
    pub fn load_deck(&mut self, deck: Deck) -> BoardResult {
        self.deck = deck;
        self.session += 1;
        self.clear_round();
        let result = BoardResult::changed_with(Effect::Cancel(TimerKey::Resolve));
        if self.clock_running {
            result.merge(self.start_clock())
        } else {
            result
        }
    }

    fn deal(&mut self, game: &GameState) -> BoardResult {
        self.deck = match Deck::generate_from(
            game.grid_size,
            game.theme,
            self.catalog,
            &mut self.rng,
        ) {
            Ok(deck) => deck,
            Err(e) => {
                error!(error = %e, "Could not deal deck");
                Deck::default()
            }
        };
        self.session += 1;
        self.clear_round();
        self.menu_open = false;
        self.elapsed_seconds = 0;
        self.final_seconds = 0;

        info!(
            session = self.session,
            cards = self.deck.len(),
            grid = game.grid_size.label(),
            theme = game.theme.label(),
            "Dealt deck"
        );

        let result = BoardResult::changed_with(Effect::Cancel(TimerKey::Resolve));
        if game.clock_enabled() {
            result.merge(self.start_clock())
        } else {
            result.merge(self.stop_clock())
        }
    }

    fn clear_round(&mut self) {
        self.revealed.clear();
        self.highlighted.clear();
        self.matched.clear();
        self.pending = None;
        self.is_finished = false;
        self.results_open = false;
    }

    fn click<M>(&mut self, index: usize, store: &mut Store<GameState, GameAction, M>) -> BoardResult
    where
        M: Middleware<GameState, GameAction>,
    {
        if !store.state().is_started
            || self.is_finished
            || self.menu_open
            || index >= self.deck.len()
            || self.revealed.len() == 2
            || self.revealed.contains(&index)
            || self.matched.contains(&index)
        {
            return BoardResult::unchanged();
        }

        self.revealed.push(index);
        self.highlighted.push(index);

        let first = self.revealed[0];
        if self.revealed.len() == 1 {
            return BoardResult::changed();
        }

        let is_match = self.deck.get(first) == self.deck.get(index);
        let mut result = BoardResult::changed().with(Effect::Schedule {
            key: TimerKey::Resolve,
            delay: self.config.resolve_delay,
            action: BoardAction::ResolveDidElapse {
                session: self.session,
            },
        });

        if is_match {
            debug!(first, second = index, "Pair matched");
            self.matched.insert(first);
            self.matched.insert(index);
            self.pending = Some(Pending::Matched);

            let player = store.state().current_turn;
            store.dispatch(GameAction::ScoreIncrement { player });
            store.dispatch(GameAction::MovesIncrement);

            result = result.merge(self.check_completion(store.state()));
        } else {
            debug!(first, second = index, "Pair mismatched");
            self.pending = Some(Pending::Mismatched);
        }

        result
    }

    fn resolve<M>(&mut self, session: u64, store: &mut Store<GameState, GameAction, M>) -> BoardResult
    where
        M: Middleware<GameState, GameAction>,
    {
        if session != self.session {
            debug!(session, current = self.session, "Dropping stale resolution");
            return BoardResult::unchanged();
        }
        let Some(pending) = self.pending.take() else {
            return BoardResult::unchanged();
        };

        self.revealed.clear();
        self.highlighted.clear();

        if pending == Pending::Mismatched {
            // Credit the move to the player who made it before passing the turn
            store.dispatch(GameAction::MovesIncrement);
            store.dispatch(GameAction::TurnNext);
        }

        BoardResult::changed()
    }

    fn tick(&mut self, session: u64) -> BoardResult {
        if session != self.session || !self.clock_running || self.is_finished {
            return BoardResult::unchanged();
        }
        self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
        BoardResult::changed()
    }

    fn check_completion(&mut self, game: &GameState) -> BoardResult {
        if self.deck.is_empty() || self.matched.len() != self.deck.len() {
            return BoardResult::unchanged();
        }

        self.final_seconds = self.elapsed_seconds;
        if !game.is_started || self.is_finished {
            return BoardResult::changed();
        }

        self.is_finished = true;
        self.results_open = true;
        info!(
            seconds = self.final_seconds,
            winners = ?self.standings.winners,
            "Board cleared"
        );
        self.stop_clock().mark_changed()
    }

    fn restart(&mut self) -> BoardResult {
        self.matched.clear();
        self.deck.shuffle(&mut self.rng);
        debug!(session = self.session, "Board restarted");
        BoardResult::changed()
    }

    fn restart_from_results(&mut self, game: &GameState) -> BoardResult {
        let result = self.restart();
        self.is_finished = false;
        self.results_open = false;
        self.elapsed_seconds = 0;
        self.final_seconds = 0;
        if game.clock_enabled() {
            result.merge(self.start_clock())
        } else {
            result
        }
    }

    fn set_menu(&mut self, open: bool) -> BoardResult {
        if self.menu_open == open {
            return BoardResult::unchanged();
        }
        self.menu_open = open;
        BoardResult::changed()
    }

    fn start_clock(&mut self) -> BoardResult {
        self.clock_running = true;
        BoardResult::unchanged().with(Effect::Interval {
            key: TimerKey::Clock,
            period: self.config.clock_period,
            action: BoardAction::ClockDidTick {
                session: self.session,
            },
        })
    }

    fn stop_clock(&mut self) -> BoardResult {
        self.clock_running = false;
        BoardResult::unchanged().with(Effect::Cancel(TimerKey::Clock))
    }
}
