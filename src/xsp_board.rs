// Board model: grid cells, deferred mine placement, neighbor counting,
// flood-fill reveal. Pure data, no UI dependency.

use rand::prelude::*;
use thiserror::Error;

pub const MIN_ROWS: usize = 5;
pub const MAX_ROWS: usize = 20;
pub const MIN_COLUMNS: usize = 5;
pub const MAX_COLUMNS: usize = 30;

/// Invalid board dimensions or mine count, rejected at the boundary.
/// The game state is unchanged when one of these is returned.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("rows must be between 5 and 20, got {0}")]
    Rows(usize),
    #[error("columns must be between 5 and 30, got {0}")]
    Columns(usize),
    #[error("mines must be between 1 and {max}, got {got}")]
    Mines { got: usize, max: usize },
}

/// Board dimensions and mine count, valid by construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    rows: usize,
    columns: usize,
    mines: usize,
}

impl BoardConfig {
    /// Validate dimensions: rows in [5,20], columns in [5,30],
    /// mines in [1, rows*columns-1]. The upper mine bound permits a board
    /// with a single safe cell.
    pub fn new(rows: usize, columns: usize, mines: usize) -> Result<Self, ConfigError> {
        if !(MIN_ROWS..=MAX_ROWS).contains(&rows) {
            return Err(ConfigError::Rows(rows));
        }
        if !(MIN_COLUMNS..=MAX_COLUMNS).contains(&columns) {
            return Err(ConfigError::Columns(columns));
        }
        let max = rows * columns - 1;
        if mines < 1 || mines > max {
            return Err(ConfigError::Mines { got: mines, max });
        }
        Ok(BoardConfig { rows, columns, mines })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn mines(&self) -> usize {
        self.mines
    }
}

/// A single cell on the board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    pub is_mine: bool,
    pub adjacent_mines: u8,
    pub is_revealed: bool,
    pub is_flagged: bool,
}

/// Result of a single reveal action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Cell out of range, already revealed, or flagged
    NoOp,
    /// The cell holds a mine; board state is unchanged, the caller ends the game
    MineHit { row: usize, column: usize },
    /// Every cell newly revealed by this action, flood fill included
    Revealed(Vec<(usize, usize)>),
}

/// Result of a flag toggle, carrying the updated flag count for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagToggle {
    Placed(usize),
    Removed(usize),
    /// Cell revealed, out of range, or the flag cap is reached
    Rejected,
}

/// Grid of cells with deferred mine placement
///
/// A fresh board has no mines; `place_mines` must run once, after the first
/// reveal request is known, so the first click can be excluded. The session
/// state machine guards against calling it twice.
pub struct Board {
    config: BoardConfig,
    cells: Vec<Cell>,
    mines_placed: bool,
    flags_placed: usize,
}

impl Board {
    pub fn new(config: BoardConfig) -> Self {
        Board {
            config,
            cells: vec![Cell::default(); config.rows() * config.columns()],
            mines_placed: false,
            flags_placed: 0,
        }
    }

    pub fn rows(&self) -> usize {
        self.config.rows()
    }

    pub fn columns(&self) -> usize {
        self.config.columns()
    }

    pub fn mines(&self) -> usize {
        self.config.mines()
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    pub fn flags_placed(&self) -> usize {
        self.flags_placed
    }

    /// Number of non-mine cells, i.e. how many reveals win the game
    pub fn safe_cells(&self) -> usize {
        self.rows() * self.columns() - self.mines()
    }

    /// Flat cell index of (row, column)
    pub fn index(&self, row: usize, column: usize) -> usize {
        row * self.columns() + column
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        if row < self.rows() && column < self.columns() {
            Some(&self.cells[self.index(row, column)])
        } else {
            None
        }
    }

    /// Place mines with the thread rng, avoiding `exclude`
    pub fn place_mines(&mut self, exclude: usize) {
        self.place_mines_with_rng(exclude, &mut thread_rng());
    }

    /// Select `mines` distinct cells uniformly at random from all indices
    /// except `exclude`, mark them mined and compute neighbor counts.
    /// Must be called at most once per board lifetime.
    pub fn place_mines_with_rng<R: Rng>(&mut self, exclude: usize, rng: &mut R) {
        debug_assert!(!self.mines_placed, "mines already placed");
        let mut candidates: Vec<usize> =
            (0..self.cells.len()).filter(|&i| i != exclude).collect();
        candidates.shuffle(rng);
        for &i in &candidates[..self.mines()] {
            self.cells[i].is_mine = true;
        }
        self.compute_adjacency();
        self.mines_placed = true;
    }

    /// Count mined neighbors for every non-mine cell
    fn compute_adjacency(&mut self) {
        for row in 0..self.rows() {
            for column in 0..self.columns() {
                let i = self.index(row, column);
                if self.cells[i].is_mine {
                    continue;
                }
                let mut count = 0u8;
                for (nr, nc) in self.neighbors(row, column) {
                    if self.cells[self.index(nr, nc)].is_mine {
                        count += 1;
                    }
                }
                self.cells[i].adjacent_mines = count;
            }
        }
    }

    /// In-bounds neighbors of a cell, at most 8
    fn neighbors(&self, row: usize, column: usize) -> Vec<(usize, usize)> {
        let mut out = Vec::with_capacity(8);
        let row_max = (row + 1).min(self.rows() - 1);
        let col_max = (column + 1).min(self.columns() - 1);
        for nr in row.saturating_sub(1)..=row_max {
            for nc in column.saturating_sub(1)..=col_max {
                if nr == row && nc == column {
                    continue;
                }
                out.push((nr, nc));
            }
        }
        out
    }

    /// Reveal a cell
    ///
    /// No-op for revealed or flagged cells. A mine returns `MineHit` without
    /// touching board state. A zero-count cell starts an iterative flood
    /// fill: zero-count neighbors are expanded, positive-count neighbors are
    /// revealed but not expanded, flagged cells are skipped. The revealed
    /// flag doubles as the visited set, so each cell is processed at most
    /// once and the resulting set depends only on connectivity.
    pub fn reveal(&mut self, row: usize, column: usize) -> RevealOutcome {
        let Some(start) = self.cell(row, column) else {
            return RevealOutcome::NoOp;
        };
        if start.is_revealed || start.is_flagged {
            return RevealOutcome::NoOp;
        }
        if start.is_mine {
            return RevealOutcome::MineHit { row, column };
        }
        let mut opened = Vec::new();
        let mut stack = vec![(row, column)];
        while let Some((r, c)) = stack.pop() {
            let i = self.index(r, c);
            if self.cells[i].is_revealed || self.cells[i].is_flagged || self.cells[i].is_mine {
                continue;
            }
            self.cells[i].is_revealed = true;
            opened.push((r, c));
            if self.cells[i].adjacent_mines == 0 {
                for (nr, nc) in self.neighbors(r, c) {
                    let ni = self.index(nr, nc);
                    if !self.cells[ni].is_revealed
                        && !self.cells[ni].is_flagged
                        && !self.cells[ni].is_mine
                    {
                        stack.push((nr, nc));
                    }
                }
            }
        }
        RevealOutcome::Revealed(opened)
    }

    /// Toggle the flag on an unrevealed cell
    ///
    /// Placing a flag is rejected once `flags_placed` reaches the mine
    /// count; removing one is always allowed.
    pub fn toggle_flag(&mut self, row: usize, column: usize) -> FlagToggle {
        if row >= self.rows() || column >= self.columns() {
            return FlagToggle::Rejected;
        }
        let i = self.index(row, column);
        if self.cells[i].is_revealed {
            return FlagToggle::Rejected;
        }
        if self.cells[i].is_flagged {
            self.cells[i].is_flagged = false;
            self.flags_placed -= 1;
            FlagToggle::Removed(self.flags_placed)
        } else if self.flags_placed < self.mines() {
            self.cells[i].is_flagged = true;
            self.flags_placed += 1;
            FlagToggle::Placed(self.flags_placed)
        } else {
            FlagToggle::Rejected
        }
    }

    /// Number of revealed non-mine cells, for win checking
    pub fn count_revealed(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.is_revealed && !c.is_mine)
            .count()
    }

    /// Show every unflagged mine after a loss
    /// Flagged mines keep their flag, so a cell is never flagged and revealed
    pub fn reveal_all_mines(&mut self) {
        for cell in &mut self.cells {
            if cell.is_mine && !cell.is_flagged {
                cell.is_revealed = true;
            }
        }
    }

    /// Flag every remaining mine after a win
    pub fn flag_remaining_mines(&mut self) {
        for cell in &mut self.cells {
            if cell.is_mine && !cell.is_flagged {
                cell.is_flagged = true;
                self.flags_placed += 1;
            }
        }
    }
}
