//! Render tests using RenderHarness
//!
//! Each test builds a store and board the way `main` does, drives them with
//! board actions, and checks the text a view draws.

use pairs_core::{
    reducer, Board, BoardAction, BoardConfig, Deck, FaceValue, GameAction, GameRng, GameState,
    NoopMiddleware, Store,
};
use pairs_tui::components::{
    BoardView, BoardViewProps, Component, MenuModal, ResultsModal, ResultsProps, SettingsView,
    SettingsViewProps,
};
use pairs_tui::testing::RenderHarness;

type GameStore = Store<GameState, GameAction, NoopMiddleware>;

fn started(players: u8) -> (GameStore, Board) {
    let mut store = Store::new(GameState::default(), reducer);
    store.dispatch(GameAction::PlayersSet(players));
    store.dispatch(GameAction::GameStart);
    let mut board = Board::new(BoardConfig::default(), GameRng::new(3)).unwrap();
    board.observe(store.state());
    (store, board)
}

fn numbers(values: &[u8]) -> Deck {
    Deck::from_cards(values.iter().map(|n| FaceValue::Number(*n)).collect())
}

/// Flip each pair, letting the reveal delay run out between turns
fn play(board: &mut Board, store: &mut GameStore, turns: &[(usize, usize)]) {
    for &(first, second) in turns {
        board.update(BoardAction::CardClick(first), store);
        board.update(BoardAction::CardClick(second), store);
        if !board.is_finished() {
            let session = board.session();
            board.update(BoardAction::ResolveDidElapse { session }, store);
        }
    }
}

fn render_board(width: u16, store: &GameStore, board: &Board) -> String {
    let mut render = RenderHarness::new(width, 30);
    let mut view = BoardView::default();
    render.render_to_string_plain(|frame| {
        let props = BoardViewProps {
            state: store.state(),
            board,
        };
        view.render(frame, frame.area(), props);
    })
}

fn render_results(store: &GameStore, board: &Board) -> String {
    let mut render = RenderHarness::new(80, 30);
    let mut modal = ResultsModal::default();
    render.render_to_string_plain(|frame| {
        let props = ResultsProps {
            state: store.state(),
            board,
        };
        modal.render(frame, frame.area(), props);
    })
}

#[test]
fn test_render_settings_screen() {
    let mut render = RenderHarness::new(80, 24);
    let mut view = SettingsView::default();
    let state = GameState::default();

    let output = render.render_to_string_plain(|frame| {
        view.render(frame, frame.area(), SettingsViewProps { state: &state });
    });

    assert!(output.contains("Select Theme"), "Should show theme row");
    assert!(output.contains("Numbers of Players"), "Should show players row");
    assert!(output.contains("Grid Size"), "Should show grid row");
    assert!(output.contains("Start Game"), "Should show start button");
}

#[test]
fn test_render_multiplayer_board() {
    let (store, board) = started(3);
    let output = render_board(80, &store, &board);

    assert!(output.contains("Restart (r)"));
    assert!(output.contains("New Game (n)"));
    assert!(output.contains("Player 1  0  ◂ turn"), "Should mark current player");
    assert!(output.contains("Player 3  0"));
    assert!(!output.contains("Player 4"), "Inactive slots are hidden");
    assert!(!output.contains("Moves"));
}

#[test]
fn test_render_compact_header() {
    let (store, board) = started(2);
    let output = render_board(50, &store, &board);

    assert!(output.contains("Menu (m)"));
    assert!(!output.contains("Restart (r)"));
    assert!(output.contains("P1  0"));
}

#[test]
fn test_render_solo_stats() {
    let (store, board) = started(1);
    let output = render_board(80, &store, &board);

    assert!(output.contains("Time  0:00"));
    assert!(output.contains("Moves  0"));
    assert!(!output.contains("Player 1"));
}

#[test]
fn test_render_revealed_card_shows_value() {
    let (mut store, mut board) = started(2);
    board.load_deck(numbers(&[7, 8, 7, 8]));

    let output = render_board(80, &store, &board);
    assert!(!output.contains('7'), "Cards start face down");

    board.update(BoardAction::CardClick(0), &mut store);
    let output = render_board(80, &store, &board);
    assert!(output.contains('7'), "Flipped card shows its number");
    assert!(!output.contains('8'));
}

#[test]
fn test_render_winner_results() {
    let (mut store, mut board) = started(2);
    board.load_deck(numbers(&[1, 1, 2, 2]));
    play(&mut board, &mut store, &[(0, 1), (2, 3)]);
    assert!(board.results_open());

    let output = render_results(&store, &board);
    assert!(output.contains("Player 1 wins!"));
    assert!(output.contains("Player 1 (Winner!)"));
    assert!(output.contains("2 Pairs"));
    assert!(output.contains("0 Pairs"));
    assert!(output.contains("Restart"));
    assert!(output.contains("New Game"));
}

#[test]
fn test_render_tie_results() {
    let (mut store, mut board) = started(2);
    board.load_deck(numbers(&[1, 1, 2, 2, 3, 3, 4, 4]));
    // Player 1 takes two pairs then misses, player 2 takes the rest
    play(&mut board, &mut store, &[(0, 1), (2, 3), (4, 6), (4, 5), (6, 7)]);
    assert_eq!(store.state().scores(), &[2, 2]);

    let output = render_results(&store, &board);
    assert!(output.contains("It's a tie!"));
    assert!(output.contains("Player 1 (Winner!)"));
    assert!(output.contains("Player 2 (Winner!)"));
}

#[test]
fn test_render_solo_results() {
    let (mut store, mut board) = started(1);
    board.load_deck(numbers(&[5, 5]));
    play(&mut board, &mut store, &[(0, 1)]);

    let output = render_results(&store, &board);
    assert!(output.contains("You did it!"));
    assert!(output.contains("Time"));
    assert!(output.contains("Moves"));
    assert!(!output.contains("Pairs"));
}

#[test]
fn test_render_menu() {
    let mut render = RenderHarness::new(80, 24);
    let mut menu = MenuModal::default();

    let output = render.render_to_string_plain(|frame| {
        menu.render(frame, frame.area(), ());
    });

    assert!(output.contains("Restart"));
    assert!(output.contains("New Game"));
    assert!(output.contains("Resume Game"));
}
