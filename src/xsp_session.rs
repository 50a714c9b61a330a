// Game session: first-click deferral, win/loss detection, timer bookkeeping

use crate::xsp_board::{Board, BoardConfig, FlagToggle, RevealOutcome};

/// Session state machine: NotStarted -> InProgress -> Won | Lost.
/// Restart is a wholesale reset back to NotStarted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    NotStarted,
    InProgress,
    Won,
    Lost,
}

/// What a left click did, for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Game over, cell flagged, or cell already open
    Ignored,
    /// Newly revealed cells with their neighbor counts
    Revealed(Vec<(usize, usize, u8)>),
    /// The clicked cell held a mine; all unflagged mines are now shown
    Lost { row: usize, column: usize },
    /// Every safe cell is open; remaining mines are now flagged
    Won { elapsed_seconds: u64 },
}

/// One game from construction to win or loss
///
/// Owns the board exclusively; discarded and replaced on restart. Terminal
/// once Won or Lost: every click is ignored until `on_restart`.
pub struct GameSession {
    board: Board,
    state: GameState,
    elapsed_seconds: u64,
}

impl GameSession {
    pub fn new(config: BoardConfig) -> Self {
        GameSession {
            board: Board::new(config),
            state: GameState::NotStarted,
            elapsed_seconds: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn flags_placed(&self) -> usize {
        self.board.flags_placed()
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state, GameState::Won | GameState::Lost)
    }

    /// Left click on a cell
    ///
    /// The first click of a session places the mines, excluding the clicked
    /// cell, and starts the game. The NotStarted check is what guarantees
    /// `place_mines` runs at most once per board.
    pub fn on_left_click(&mut self, row: usize, column: usize) -> ClickOutcome {
        if self.is_over() {
            return ClickOutcome::Ignored;
        }
        match self.board.cell(row, column) {
            Some(cell) if !cell.is_flagged => {}
            _ => return ClickOutcome::Ignored,
        }
        if self.state == GameState::NotStarted {
            let exclude = self.board.index(row, column);
            self.board.place_mines(exclude);
            self.state = GameState::InProgress;
        }
        match self.board.reveal(row, column) {
            RevealOutcome::NoOp => ClickOutcome::Ignored,
            RevealOutcome::MineHit { row, column } => {
                self.state = GameState::Lost;
                self.board.reveal_all_mines();
                ClickOutcome::Lost { row, column }
            }
            RevealOutcome::Revealed(cells) => {
                if self.board.count_revealed() == self.board.safe_cells() {
                    self.state = GameState::Won;
                    self.board.flag_remaining_mines();
                    ClickOutcome::Won {
                        elapsed_seconds: self.elapsed_seconds,
                    }
                } else {
                    let cells = cells
                        .into_iter()
                        .map(|(r, c)| {
                            let count = self
                                .board
                                .cell(r, c)
                                .map(|cell| cell.adjacent_mines)
                                .unwrap_or(0);
                            (r, c, count)
                        })
                        .collect();
                    ClickOutcome::Revealed(cells)
                }
            }
        }
    }

    /// Right click: toggle the flag, capped at the mine count
    pub fn on_right_click(&mut self, row: usize, column: usize) -> FlagToggle {
        if self.is_over() {
            return FlagToggle::Rejected;
        }
        self.board.toggle_flag(row, column)
    }

    /// Discard the board and start fresh, optionally with a new config
    pub fn on_restart(&mut self, new_config: Option<BoardConfig>) {
        let config = new_config.unwrap_or_else(|| self.board.config());
        *self = GameSession::new(config);
    }

    /// One-second timer tick; counts only while a game is in progress
    pub fn tick(&mut self) {
        if self.state == GameState::InProgress {
            self.elapsed_seconds += 1;
        }
    }
}
