use rand::rngs::StdRng;
use rand::SeedableRng;

use xsaper::xsp_board::{Board, BoardConfig, ConfigError, FlagToggle, RevealOutcome};

fn board(rows: usize, columns: usize, mines: usize) -> Board {
    Board::new(BoardConfig::new(rows, columns, mines).expect("valid config"))
}

fn neighbors(rows: usize, columns: usize, r: usize, c: usize) -> Vec<(usize, usize)> {
    let (r, c) = (r as isize, c as isize);
    let mut out = Vec::new();
    for dr in -1..=1 {
        for dc in -1..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            let (nr, nc) = (r + dr, c + dc);
            if nr >= 0 && nc >= 0 && nr < rows as isize && nc < columns as isize {
                out.push((nr as usize, nc as usize));
            }
        }
    }
    out
}

// The component a single reveal must open: the connected zero-count region
// around `start` plus its bordering positive-count cells. Flagged cells are
// excluded, mines never border a zero-count cell.
fn expected_flood(b: &Board, start: (usize, usize)) -> Vec<(usize, usize)> {
    let mut seen = vec![start];
    let mut queue = vec![start];
    while let Some((r, c)) = queue.pop() {
        if b.cell(r, c).unwrap().adjacent_mines > 0 {
            continue;
        }
        for (nr, nc) in neighbors(b.rows(), b.columns(), r, c) {
            let cell = b.cell(nr, nc).unwrap();
            if !cell.is_mine && !cell.is_flagged && !seen.contains(&(nr, nc)) {
                seen.push((nr, nc));
                queue.push((nr, nc));
            }
        }
    }
    seen
}

fn find_zero_cell(b: &Board) -> Option<(usize, usize)> {
    for r in 0..b.rows() {
        for c in 0..b.columns() {
            let cell = b.cell(r, c).unwrap();
            if !cell.is_mine && cell.adjacent_mines == 0 {
                return Some((r, c));
            }
        }
    }
    None
}

#[test]
fn config_rejects_out_of_range_values() {
    assert_eq!(BoardConfig::new(4, 10, 10).unwrap_err(), ConfigError::Rows(4));
    assert_eq!(BoardConfig::new(21, 10, 10).unwrap_err(), ConfigError::Rows(21));
    assert_eq!(BoardConfig::new(7, 4, 3).unwrap_err(), ConfigError::Columns(4));
    assert_eq!(BoardConfig::new(7, 31, 3).unwrap_err(), ConfigError::Columns(31));
    assert_eq!(
        BoardConfig::new(5, 5, 0).unwrap_err(),
        ConfigError::Mines { got: 0, max: 24 }
    );
    assert_eq!(
        BoardConfig::new(5, 5, 25).unwrap_err(),
        ConfigError::Mines { got: 25, max: 24 }
    );
    // the upper bound leaves exactly one safe cell and is allowed
    assert!(BoardConfig::new(5, 5, 24).is_ok());
    assert!(BoardConfig::new(20, 30, 599).is_ok());
}

#[test]
fn new_board_is_empty_until_placement() {
    let b = board(7, 10, 10);
    assert!(!b.mines_placed());
    assert_eq!(b.count_revealed(), 0);
    assert_eq!(b.flags_placed(), 0);
    for r in 0..7 {
        for c in 0..10 {
            let cell = b.cell(r, c).unwrap();
            assert!(!cell.is_mine);
            assert!(!cell.is_revealed);
            assert!(!cell.is_flagged);
            assert_eq!(cell.adjacent_mines, 0);
        }
    }
}

#[test]
fn placement_has_exact_count_and_honors_exclusion() {
    // the densest legal board leaves only the excluded cell safe
    for seed in 0..50 {
        let mut b = board(5, 5, 24);
        let exclude = b.index(2, 2);
        let mut rng = StdRng::seed_from_u64(seed);
        b.place_mines_with_rng(exclude, &mut rng);
        let mut mined = 0;
        for r in 0..5 {
            for c in 0..5 {
                if b.cell(r, c).unwrap().is_mine {
                    mined += 1;
                }
            }
        }
        assert_eq!(mined, 24);
        assert!(!b.cell(2, 2).unwrap().is_mine);
    }
}

#[test]
fn adjacency_matches_neighbor_mines() {
    let mut b = board(8, 8, 10);
    let mut rng = StdRng::seed_from_u64(999);
    b.place_mines_with_rng(0, &mut rng);
    for r in 0..8 {
        for c in 0..8 {
            let cell = b.cell(r, c).unwrap();
            if cell.is_mine {
                continue;
            }
            let expected = neighbors(8, 8, r, c)
                .into_iter()
                .filter(|&(nr, nc)| b.cell(nr, nc).unwrap().is_mine)
                .count();
            assert_eq!(
                cell.adjacent_mines as usize, expected,
                "adjacency mismatch at ({},{})",
                r, c
            );
        }
    }
}

#[test]
fn flood_fill_opens_zero_component_with_border() {
    // several seeds, each checked against an independent BFS
    for seed in [7u64, 42, 1234] {
        let mut b = board(9, 9, 10);
        let mut rng = StdRng::seed_from_u64(seed);
        b.place_mines_with_rng(0, &mut rng);
        let Some(start) = find_zero_cell(&b) else {
            continue;
        };
        let mut expected = expected_flood(&b, start);
        let mut opened = match b.reveal(start.0, start.1) {
            RevealOutcome::Revealed(cells) => cells,
            other => panic!("expected reveal, got {:?}", other),
        };
        opened.sort();
        expected.sort();
        assert_eq!(opened, expected, "seed {}", seed);
        for &(r, c) in &opened {
            let cell = b.cell(r, c).unwrap();
            assert!(!cell.is_mine);
            assert!(cell.is_revealed);
        }
    }
}

#[test]
fn flood_fill_skips_flagged_cells() {
    let mut b = board(9, 9, 1);
    let mut rng = StdRng::seed_from_u64(3);
    b.place_mines_with_rng(0, &mut rng);
    let start = find_zero_cell(&b).expect("a lone mine leaves zero-count cells");
    // flag some unrevealed cell away from the start
    let flag_at = (0..9)
        .flat_map(|r| (0..9).map(move |c| (r, c)))
        .find(|&(r, c)| {
            (r, c) != start && !b.cell(r, c).unwrap().is_mine
        })
        .unwrap();
    assert!(matches!(
        b.toggle_flag(flag_at.0, flag_at.1),
        FlagToggle::Placed(1)
    ));
    let mut expected = expected_flood(&b, start);
    expected.sort();
    let mut opened = match b.reveal(start.0, start.1) {
        RevealOutcome::Revealed(cells) => cells,
        other => panic!("expected reveal, got {:?}", other),
    };
    opened.sort();
    assert_eq!(opened, expected);
    assert!(!opened.contains(&flag_at));
    assert!(!b.cell(flag_at.0, flag_at.1).unwrap().is_revealed);
}

#[test]
fn lone_mine_falls_to_a_single_sweep() {
    // with one mine, any zero-count click must clear the whole field
    let mut b = board(9, 9, 1);
    let mut rng = StdRng::seed_from_u64(11);
    b.place_mines_with_rng(b.index(4, 4), &mut rng);
    let start = find_zero_cell(&b).expect("zero-count cell");
    match b.reveal(start.0, start.1) {
        RevealOutcome::Revealed(cells) => assert_eq!(cells.len(), 80),
        other => panic!("expected reveal, got {:?}", other),
    }
    assert_eq!(b.count_revealed(), b.safe_cells());
}

#[test]
fn reveal_is_noop_on_flagged_and_repeated_cells() {
    let mut b = board(9, 9, 10);
    let mut rng = StdRng::seed_from_u64(5);
    b.place_mines_with_rng(0, &mut rng);
    assert!(matches!(b.toggle_flag(4, 4), FlagToggle::Placed(1)));
    assert_eq!(b.reveal(4, 4), RevealOutcome::NoOp);
    assert!(!b.cell(4, 4).unwrap().is_revealed);
    assert_eq!(b.count_revealed(), 0);

    // double reveal of a positive-count cell is a no-op the second time
    let target = (0..9)
        .flat_map(|r| (0..9).map(move |c| (r, c)))
        .find(|&(r, c)| {
            let cell = b.cell(r, c).unwrap();
            !cell.is_mine && !cell.is_flagged && cell.adjacent_mines > 0
        })
        .unwrap();
    match b.reveal(target.0, target.1) {
        RevealOutcome::Revealed(cells) => assert_eq!(cells, vec![target]),
        other => panic!("expected reveal, got {:?}", other),
    }
    assert_eq!(b.reveal(target.0, target.1), RevealOutcome::NoOp);
}

#[test]
fn reveal_mine_reports_hit_without_state_change() {
    let mut b = board(9, 9, 10);
    let mut rng = StdRng::seed_from_u64(21);
    b.place_mines_with_rng(0, &mut rng);
    let mine = (0..9)
        .flat_map(|r| (0..9).map(move |c| (r, c)))
        .find(|&(r, c)| b.cell(r, c).unwrap().is_mine)
        .unwrap();
    assert_eq!(
        b.reveal(mine.0, mine.1),
        RevealOutcome::MineHit {
            row: mine.0,
            column: mine.1
        }
    );
    assert!(!b.cell(mine.0, mine.1).unwrap().is_revealed);
    assert_eq!(b.count_revealed(), 0);
}

#[test]
fn flag_cap_blocks_placement_but_never_removal() {
    let mut b = board(5, 5, 3);
    assert!(matches!(b.toggle_flag(0, 0), FlagToggle::Placed(1)));
    assert!(matches!(b.toggle_flag(1, 1), FlagToggle::Placed(2)));
    assert!(matches!(b.toggle_flag(2, 2), FlagToggle::Placed(3)));
    // cap reached: a fourth flag is rejected as a no-op
    assert!(matches!(b.toggle_flag(3, 3), FlagToggle::Rejected));
    assert!(!b.cell(3, 3).unwrap().is_flagged);
    // unflagging works at the cap and frees a slot
    assert!(matches!(b.toggle_flag(1, 1), FlagToggle::Removed(2)));
    assert!(matches!(b.toggle_flag(3, 3), FlagToggle::Placed(3)));
}

#[test]
fn revealed_cells_cannot_be_flagged() {
    let mut b = board(9, 9, 10);
    let mut rng = StdRng::seed_from_u64(17);
    b.place_mines_with_rng(b.index(0, 0), &mut rng);
    let safe = (0..9)
        .flat_map(|r| (0..9).map(move |c| (r, c)))
        .find(|&(r, c)| !b.cell(r, c).unwrap().is_mine)
        .unwrap();
    let _ = b.reveal(safe.0, safe.1);
    assert!(b.cell(safe.0, safe.1).unwrap().is_revealed);
    assert!(matches!(b.toggle_flag(safe.0, safe.1), FlagToggle::Rejected));
    assert!(!b.cell(safe.0, safe.1).unwrap().is_flagged);
}

#[test]
fn loss_and_win_display_helpers_keep_the_flag_invariant() {
    let mut b = board(5, 5, 4);
    let mut rng = StdRng::seed_from_u64(2);
    b.place_mines_with_rng(0, &mut rng);
    let mine = (0..5)
        .flat_map(|r| (0..5).map(move |c| (r, c)))
        .find(|&(r, c)| b.cell(r, c).unwrap().is_mine)
        .unwrap();
    assert!(matches!(b.toggle_flag(mine.0, mine.1), FlagToggle::Placed(1)));

    b.reveal_all_mines();
    for r in 0..5 {
        for c in 0..5 {
            let cell = b.cell(r, c).unwrap();
            if cell.is_mine {
                // shown or still flagged, never both
                assert!(cell.is_revealed || cell.is_flagged);
                assert!(!(cell.is_revealed && cell.is_flagged));
            }
        }
    }

    let mut b = board(5, 5, 4);
    let mut rng = StdRng::seed_from_u64(2);
    b.place_mines_with_rng(0, &mut rng);
    b.flag_remaining_mines();
    assert_eq!(b.flags_placed(), 4);
    for r in 0..5 {
        for c in 0..5 {
            let cell = b.cell(r, c).unwrap();
            assert_eq!(cell.is_flagged, cell.is_mine);
        }
    }
}

#[test]
fn out_of_range_coordinates_are_rejected() {
    let mut b = board(5, 5, 3);
    assert!(b.cell(5, 0).is_none());
    assert!(b.cell(0, 5).is_none());
    assert_eq!(b.reveal(5, 5), RevealOutcome::NoOp);
    assert!(matches!(b.toggle_flag(7, 7), FlagToggle::Rejected));
}
