use xsaper::xsp_board::{BoardConfig, FlagToggle};
use xsaper::xsp_session::{ClickOutcome, GameSession, GameState};

fn session(rows: usize, columns: usize, mines: usize) -> GameSession {
    GameSession::new(BoardConfig::new(rows, columns, mines).expect("valid config"))
}

#[test]
fn first_click_is_never_a_mine() {
    // densest legal board: every cell except the clicked one is a mine,
    // so any unsafe placement would lose immediately
    for _ in 0..100 {
        let mut s = session(5, 5, 24);
        match s.on_left_click(2, 3) {
            ClickOutcome::Won { .. } => {}
            other => panic!("first click must be safe, got {:?}", other),
        }
        assert!(!s.board().cell(2, 3).unwrap().is_mine);
    }
}

#[test]
fn first_click_places_mines_and_starts_the_game() {
    let mut s = session(9, 9, 10);
    assert_eq!(s.state(), GameState::NotStarted);
    assert!(!s.board().mines_placed());

    let outcome = s.on_left_click(4, 4);
    assert!(s.board().mines_placed());
    assert!(!s.board().cell(4, 4).unwrap().is_mine);
    assert!(matches!(
        outcome,
        ClickOutcome::Revealed(_) | ClickOutcome::Won { .. }
    ));
    assert_ne!(s.state(), GameState::NotStarted);
}

#[test]
fn revealed_cells_report_their_counts() {
    let mut s = session(9, 9, 10);
    if let ClickOutcome::Revealed(cells) = s.on_left_click(4, 4) {
        assert!(!cells.is_empty());
        for (r, c, count) in cells {
            let cell = s.board().cell(r, c).unwrap();
            assert!(cell.is_revealed);
            assert_eq!(cell.adjacent_mines, count);
        }
    }
}

#[test]
fn win_flags_remaining_mines_and_needs_no_flags() {
    let mut s = session(5, 5, 24);
    // not a single flag was placed, yet revealing the one safe cell wins
    match s.on_left_click(0, 0) {
        ClickOutcome::Won { elapsed_seconds } => assert_eq!(elapsed_seconds, 0),
        other => panic!("expected win, got {:?}", other),
    }
    assert_eq!(s.state(), GameState::Won);
    assert_eq!(s.board().count_revealed(), s.board().safe_cells());
    // remaining mines were auto-flagged for the final display
    assert_eq!(s.flags_placed(), 24);
}

#[test]
fn stepping_on_a_mine_loses_and_freezes_the_session() {
    // 23 mines leave two safe cells, so the first click cannot win
    let mut s = session(5, 5, 23);
    assert!(matches!(s.on_left_click(0, 0), ClickOutcome::Revealed(_)));
    assert_eq!(s.state(), GameState::InProgress);
    s.tick();
    assert_eq!(s.elapsed_seconds(), 1);

    let mine = (0..5)
        .flat_map(|r| (0..5).map(move |c| (r, c)))
        .find(|&(r, c)| s.board().cell(r, c).unwrap().is_mine)
        .unwrap();
    match s.on_left_click(mine.0, mine.1) {
        ClickOutcome::Lost { row, column } => assert_eq!((row, column), mine),
        other => panic!("expected loss, got {:?}", other),
    }
    assert_eq!(s.state(), GameState::Lost);

    // every mine is shown (or still flagged) for the final display
    for r in 0..5 {
        for c in 0..5 {
            let cell = s.board().cell(r, c).unwrap();
            if cell.is_mine {
                assert!(cell.is_revealed || cell.is_flagged);
            }
        }
    }

    // terminal state: clicks, flags and ticks are all inert
    assert_eq!(s.on_left_click(0, 1), ClickOutcome::Ignored);
    assert!(matches!(s.on_right_click(0, 1), FlagToggle::Rejected));
    s.tick();
    assert_eq!(s.elapsed_seconds(), 1);
}

#[test]
fn flagged_cell_ignores_left_clicks() {
    let mut s = session(5, 5, 2);
    assert!(matches!(s.on_right_click(1, 1), FlagToggle::Placed(1)));
    // the flagged click neither starts the game nor places mines
    assert_eq!(s.on_left_click(1, 1), ClickOutcome::Ignored);
    assert_eq!(s.state(), GameState::NotStarted);
    assert!(!s.board().mines_placed());
    // unflagging makes the cell clickable again
    assert!(matches!(s.on_right_click(1, 1), FlagToggle::Removed(0)));
    assert!(matches!(s.on_left_click(1, 1), ClickOutcome::Revealed(_) | ClickOutcome::Won { .. }));
}

#[test]
fn flag_cap_is_enforced_through_the_session() {
    let mut s = session(5, 5, 2);
    assert!(matches!(s.on_right_click(0, 0), FlagToggle::Placed(1)));
    assert!(matches!(s.on_right_click(0, 1), FlagToggle::Placed(2)));
    assert!(matches!(s.on_right_click(0, 2), FlagToggle::Rejected));
    assert_eq!(s.flags_placed(), 2);
}

#[test]
fn timer_counts_only_while_in_progress() {
    let mut s = session(9, 9, 10);
    s.tick();
    s.tick();
    assert_eq!(s.elapsed_seconds(), 0, "inert before the first click");
    let _ = s.on_left_click(0, 0);
    if s.state() == GameState::InProgress {
        s.tick();
        s.tick();
        s.tick();
        assert_eq!(s.elapsed_seconds(), 3);
    }
}

#[test]
fn restart_resets_the_session_and_applies_new_config() {
    let mut s = session(5, 5, 24);
    let _ = s.on_left_click(0, 0);
    assert_eq!(s.state(), GameState::Won);

    s.on_restart(Some(BoardConfig::new(6, 8, 5).expect("valid config")));
    assert_eq!(s.state(), GameState::NotStarted);
    assert_eq!(s.elapsed_seconds(), 0);
    assert_eq!(s.flags_placed(), 0);
    assert_eq!(s.board().rows(), 6);
    assert_eq!(s.board().columns(), 8);
    assert_eq!(s.board().mines(), 5);
    assert!(!s.board().mines_placed());
}

#[test]
fn restart_without_config_keeps_dimensions() {
    let mut s = session(7, 10, 10);
    let _ = s.on_left_click(3, 3);
    s.on_restart(None);
    assert_eq!(s.state(), GameState::NotStarted);
    assert_eq!(s.board().rows(), 7);
    assert_eq!(s.board().columns(), 10);
    assert_eq!(s.board().mines(), 10);
    assert!(!s.board().mines_placed());
    assert_eq!(s.board().count_revealed(), 0);
}

#[test]
fn rejected_config_leaves_the_prior_board_active() {
    let mut s = session(7, 10, 10);
    // the settings dialog only restarts with a config that validated
    assert!(BoardConfig::new(4, 10, 10).is_err());
    assert_eq!(s.board().rows(), 7);
    assert_eq!(s.board().columns(), 10);
    assert!(matches!(s.on_left_click(0, 0), ClickOutcome::Revealed(_)));
}
