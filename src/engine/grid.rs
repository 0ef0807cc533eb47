use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Board edge length. The engine is a fixed 4x4 game, not a general N-by-N one.
pub const SIZE: usize = 4;

/// Largest tile value reachable on a 4x4 board (2^17).
pub const MAX_TILE: u32 = 131_072;

type Row = [u32; SIZE];

/// Outcome of sliding every row of a grid toward the left edge.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SlideOutcome {
    /// True if compression or merging changed any row.
    pub moved: bool,
    /// Sum of every merged pair's doubled value.
    pub gained: u32,
    /// Highest value produced by a merge (0 if nothing merged).
    pub highest: u32,
}

/// A 4x4 grid of tile values.
///
/// A cell holds 0 (empty) or a power of two from 2 up to [`MAX_TILE`].
/// `Grid` is a plain value: copying it is the snapshot operation, so the
/// live board and any saved state can never alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Grid {
    cells: [[u32; SIZE]; SIZE],
}

/// Error from building a [`Grid`] out of raw values.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    #[error("invalid tile value {value} at ({row}, {col}); expected 0 or a power of two in 2..=131072")]
    InvalidValue { row: usize, col: usize, value: u32 },
}

impl Grid {
    /// A constant empty grid (all cells 0).
    pub const EMPTY: Grid = Grid { cells: [[0; SIZE]; SIZE] };

    /// Construct a grid from explicit cell values, row-major.
    ///
    /// Every cell must be 0 or a power of two in `2..=`[`MAX_TILE`];
    /// values a 4x4 game can never build are rejected.
    ///
    /// ```
    /// use game_2048::engine::Grid;
    ///
    /// let g = Grid::from_values([
    ///     [2, 0, 0, 0],
    ///     [0, 4, 0, 0],
    ///     [0, 0, 8, 0],
    ///     [0, 0, 0, 16],
    /// ]).unwrap();
    /// assert_eq!(g.count_empty(), 12);
    /// assert!(Grid::from_values([[3, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).is_err());
    /// assert!(Grid::from_values([[262_144, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).is_err());
    /// ```
    pub fn from_values(cells: [[u32; SIZE]; SIZE]) -> Result<Self, GridError> {
        for (row, line) in cells.iter().enumerate() {
            for (col, &value) in line.iter().enumerate() {
                if value != 0 && !(value >= 2 && value <= MAX_TILE && value.is_power_of_two()) {
                    return Err(GridError::InvalidValue { row, col, value });
                }
            }
        }
        Ok(Grid { cells })
    }

    /// Read-only copy of all cell values, row-major.
    #[inline]
    pub fn values(&self) -> [[u32; SIZE]; SIZE] {
        self.cells
    }

    /// Value of the cell at (row, col); 0 means empty.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.cells[row][col]
    }

    #[inline]
    pub(crate) fn set(&mut self, row: usize, col: usize, value: u32) {
        self.cells[row][col] = value;
    }

    /// Number of empty cells.
    pub fn count_empty(&self) -> usize {
        self.cells.iter().flatten().filter(|&&v| v == 0).count()
    }

    /// Largest tile value on the grid (0 when the grid is empty).
    pub fn highest(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Coordinates of every empty cell, row-major.
    pub(crate) fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut empties = Vec::new();
        for row in 0..SIZE {
            for col in 0..SIZE {
                if self.cells[row][col] == 0 {
                    empties.push((row, col));
                }
            }
        }
        empties
    }

    /// Sum of all tile values. Slides and merges preserve this sum; only a
    /// spawned tile raises it, which is what the engine's changed-board
    /// proxy keys on.
    pub(crate) fn total(&self) -> u32 {
        self.cells.iter().flatten().sum()
    }

    /// The grid rotated 90 degrees counter-clockwise: (i, j) -> (SIZE-1-j, i).
    ///
    /// Four applications are the identity.
    pub(crate) fn rotated(self) -> Grid {
        let mut out = [[0; SIZE]; SIZE];
        for (i, row) in self.cells.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                out[SIZE - 1 - j][i] = value;
            }
        }
        Grid { cells: out }
    }

    /// Slide every row toward the left edge: compress, then merge.
    pub(crate) fn slide_left(&mut self) -> SlideOutcome {
        let mut outcome = SlideOutcome::default();
        for row in self.cells.iter_mut() {
            let compressed = compress_row(row);
            let pass = merge_row(row);
            outcome.moved |= compressed || pass.merged;
            outcome.gained += pass.gained;
            outcome.highest = outcome.highest.max(pass.highest);
        }
        outcome
    }
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let cells = <[[u32; SIZE]; SIZE]>::deserialize(deserializer)?;
        Grid::from_values(cells).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f, "{}", "-".repeat(SIZE * 8 - 1))?;
            }
            let line: Vec<String> = row.iter().map(|&v| format_cell(v)).collect();
            writeln!(f, "{}", line.join("|"))?;
        }
        Ok(())
    }
}

fn format_cell(value: u32) -> String {
    if value == 0 {
        " ".repeat(7)
    } else {
        format!("{value:^7}")
    }
}

/// Result of one merge pass over a row.
#[derive(Debug, Clone, Copy, Default)]
struct MergePass {
    merged: bool,
    gained: u32,
    highest: u32,
}

/// Slide non-zero values toward index 0, preserving their relative order;
/// trailing cells become 0. Returns whether the row changed.
fn compress_row(row: &mut Row) -> bool {
    let mut out = [0; SIZE];
    let mut idx = 0;
    for &value in row.iter() {
        if value != 0 {
            out[idx] = value;
            idx += 1;
        }
    }
    let changed = *row != out;
    *row = out;
    changed
}

/// Merge adjacent equal pairs in a compressed row, left to right.
///
/// Each pair is consumed once: the row is re-compressed immediately after a
/// merge and the scan resumes at the next index, so a freshly doubled tile
/// never merges again within the same pass.
fn merge_row(row: &mut Row) -> MergePass {
    let mut pass = MergePass::default();
    for j in 0..SIZE - 1 {
        if row[j] != 0 && row[j] == row[j + 1] {
            row[j] *= 2;
            row[j + 1] = 0;
            pass.merged = true;
            pass.gained += row[j];
            pass.highest = pass.highest.max(row[j]);
            compress_row(row);
        }
    }
    pass
}
