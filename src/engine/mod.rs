//! Game state machine: directional moves, tile spawning, undo, legality.

pub mod grid;

pub use grid::{Grid, GridError};

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Depth of the undo history. Pushing a snapshot past this drops the
/// oldest one, so long games run at a fixed memory ceiling.
pub const UNDO_LIMIT: usize = 64;

/// A direction to slide the tiles in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All four directions, in declaration order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];
}

/// Grid and score as they were before one move.
#[derive(Debug, Clone, Copy)]
struct Snapshot {
    grid: Grid,
    score: u32,
}

/// A full game of 2048.
///
/// Owns the grid, the score and max-tile counters, the undo history, and
/// the RNG that drives tile spawning. All four directional moves reduce to
/// one slide-toward-the-left algorithm on a grid rotated into place first
/// and back afterwards.
///
/// ```
/// use game_2048::engine::{Game, Grid, Move};
///
/// let grid = Grid::from_values([
///     [2, 2, 4, 4],
///     [0; 4],
///     [0; 4],
///     [0; 4],
/// ]).unwrap();
/// let mut game = Game::from_grid(grid, 7);
///
/// assert!(game.make_move(Move::Left));
/// assert_eq!(game.grid().get(0, 0), 4);
/// assert_eq!(game.grid().get(0, 1), 8);
/// assert_eq!(game.score(), 12); // 4 + 8, one merge each
/// assert_eq!(game.max_tile(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    grid: Grid,
    score: u32,
    max_tile: u32,
    history: VecDeque<Snapshot>,
    rng: StdRng,
}

impl Game {
    /// Start a fresh game with two spawned tiles and an entropy-seeded RNG.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Start a fresh game whose every spawn is reproducible from `seed`.
    ///
    /// ```
    /// use game_2048::engine::Game;
    ///
    /// let a = Game::from_seed(42);
    /// let b = Game::from_seed(42);
    /// assert_eq!(a.grid(), b.grid());
    /// ```
    pub fn from_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    /// Start from an explicit position rather than a random opening.
    ///
    /// Score starts at 0 and the history empty; the max-tile counter picks
    /// up the largest value already on `grid` (at least 2). No tiles are
    /// spawned.
    pub fn from_grid(grid: Grid, seed: u64) -> Self {
        Game {
            grid,
            score: 0,
            max_tile: grid.highest().max(2),
            history: VecDeque::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn from_rng(rng: StdRng) -> Self {
        let mut game = Game {
            grid: Grid::EMPTY,
            score: 0,
            max_tile: 2,
            history: VecDeque::new(),
            rng,
        };
        game.reset();
        game
    }

    /// Wipe the board back to a fresh game: empty grid, two spawned tiles,
    /// score 0, max tile 2, no undo history. The RNG keeps its state, so a
    /// seeded game that resets plays a new, still reproducible game.
    pub fn reset(&mut self) {
        self.grid = Grid::EMPTY;
        self.score = 0;
        self.max_tile = 2;
        self.history.clear();
        self.spawn_tile();
        self.spawn_tile();
    }

    /// Play one move: snapshot the current state, slide toward `dir`, and
    /// spawn one tile if anything moved or merged.
    ///
    /// Returns whether the board changed. Exactly one snapshot is pushed
    /// per call, so [`Game::rollback`] undoes moves one for one, no-ops
    /// included.
    pub fn make_move(&mut self, dir: Move) -> bool {
        self.push_snapshot();
        let changed = self.slide(dir);
        if changed {
            self.spawn_tile();
        }
        changed
    }

    /// Restore the grid and score saved by the most recent move. Does
    /// nothing when the history is empty.
    ///
    /// The max-tile counter and the RNG are not rewound.
    ///
    /// ```
    /// use game_2048::engine::{Game, Move};
    ///
    /// let mut game = Game::from_seed(42);
    /// let before = (game.grid(), game.score());
    /// game.make_move(Move::Left);
    /// game.rollback();
    /// assert_eq!((game.grid(), game.score()), before);
    /// ```
    pub fn rollback(&mut self) {
        if let Some(snapshot) = self.history.pop_back() {
            self.grid = snapshot.grid;
            self.score = snapshot.score;
        }
    }

    /// Whether any of the four directions would change the board.
    ///
    /// Probes run on scratch copies of the grid; the live game state is
    /// untouched.
    ///
    /// ```
    /// use game_2048::engine::{Game, Grid};
    ///
    /// assert!(Game::from_seed(1).can_move());
    ///
    /// let stuck = Grid::from_values([
    ///     [2, 4, 2, 4],
    ///     [4, 2, 4, 2],
    ///     [2, 4, 2, 4],
    ///     [4, 2, 4, 2],
    /// ]).unwrap();
    /// assert!(!Game::from_grid(stuck, 1).can_move());
    /// ```
    pub fn can_move(&self) -> bool {
        let mut scratch = self.grid;
        for _ in 0..4 {
            if scratch.slide_left().moved {
                return true;
            }
            scratch = scratch.rotated();
        }
        false
    }

    /// Current grid, as a copy.
    #[inline]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Points accumulated from merges since the last reset.
    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Highest tile value a merge has ever produced, floored at 2. A
    /// spawned 4 does not raise it.
    #[inline]
    pub fn max_tile(&self) -> u32 {
        self.max_tile
    }

    /// Number of moves that can currently be undone.
    #[inline]
    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    /// Whether the last move changed the board, judged by comparing tile
    /// sums with the latest snapshot. Slides and merges preserve the sum,
    /// so only the spawn that follows a real move can raise it. False when
    /// no move has been made.
    pub(crate) fn board_changed(&self) -> bool {
        match self.history.back() {
            Some(snapshot) => snapshot.grid.total() != self.grid.total(),
            None => false,
        }
    }

    pub(crate) fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Slide toward `dir` by rotating the grid so the target edge faces
    /// left, sliding left, and rotating back. Score and max tile update
    /// from the merges.
    fn slide(&mut self, dir: Move) -> bool {
        let turns = rotations_into(dir);
        for _ in 0..turns {
            self.grid = self.grid.rotated();
        }
        let outcome = self.grid.slide_left();
        for _ in 0..(4 - turns) % 4 {
            self.grid = self.grid.rotated();
        }
        self.score += outcome.gained;
        self.max_tile = self.max_tile.max(outcome.highest);
        outcome.moved
    }

    /// Put a 2 (probability 0.9) or a 4 (0.1) on a uniformly random empty
    /// cell. Silently does nothing when the board is full.
    fn spawn_tile(&mut self) {
        let empties = self.grid.empty_cells();
        if let Some(&(row, col)) = empties.choose(&mut self.rng) {
            let value = if self.rng.gen_bool(0.9) { 2 } else { 4 };
            self.grid.set(row, col, value);
        }
    }

    fn push_snapshot(&mut self) {
        if self.history.len() == UNDO_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(Snapshot {
            grid: self.grid,
            score: self.score,
        });
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// Counter-clockwise quarter turns that bring `dir`'s target edge to the
/// left. The inverse is (4 - turns) % 4.
fn rotations_into(dir: Move) -> usize {
    match dir {
        Move::Left => 0,
        Move::Up => 1,
        Move::Right => 2,
        Move::Down => 3,
    }
}
