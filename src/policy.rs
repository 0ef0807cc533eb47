//! Move selection layered on top of the engine.
//!
//! [`Game::auto_move`] is a greedy one-ply policy: every direction is
//! played for real, rated by how the board looks afterwards, and rolled
//! back; the best candidate is then committed. [`Game::random_move`] is
//! the uniform baseline the policy gets compared against.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::{Game, Move};

/// Ranking key for a candidate direction.
///
/// Ordered lexicographically: more empty cells beats any score, score
/// breaks ties. The sentinel marks a direction that leaves the board
/// unchanged and never outranks a real candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MoveEfficiency {
    /// Empty cells after the candidate move, -1 for a no-op.
    pub empty_cells: i32,
    /// Total score after the candidate move.
    pub score: u32,
}

impl MoveEfficiency {
    /// Rating of a direction that does not change the board.
    pub const SENTINEL: MoveEfficiency = MoveEfficiency {
        empty_cells: -1,
        score: 0,
    };
}

/// The order candidates are rated in. A later direction must rate strictly
/// higher to displace an earlier one, so ties stay with the earlier entry.
const EVALUATION_ORDER: [Move; 4] = [Move::Left, Move::Right, Move::Down, Move::Up];

impl Game {
    /// Play the best-rated of the four directions and return it.
    ///
    /// Candidates are rated by [`MoveEfficiency`]. When nothing can move,
    /// every candidate rates at the sentinel and the first one is played
    /// as a harmless no-op (it still takes its snapshot). Each call adds
    /// exactly one entry to the undo history; the probing leaves no trace.
    ///
    /// ```
    /// use game_2048::engine::{Game, Grid, Move};
    ///
    /// let grid = Grid::from_values([
    ///     [2, 2, 4, 4],
    ///     [4, 8, 2, 8],
    ///     [8, 4, 16, 2],
    ///     [16, 2, 8, 32],
    /// ]).unwrap();
    /// let mut game = Game::from_grid(grid, 7);
    /// // Only the top row can move; left and right rate equal and the
    /// // tie goes to the earlier candidate.
    /// assert_eq!(game.auto_move(), Move::Left);
    /// assert_eq!(game.score(), 12);
    /// ```
    pub fn auto_move(&mut self) -> Move {
        let mut best_dir = EVALUATION_ORDER[0];
        let mut best = self.probe(best_dir);
        for &dir in &EVALUATION_ORDER[1..] {
            let efficiency = self.probe(dir);
            if efficiency > best {
                best = efficiency;
                best_dir = dir;
            }
        }
        self.make_move(best_dir);
        best_dir
    }

    /// Play one uniformly random direction and return it. The move may
    /// turn out to be a no-op; it still takes its snapshot.
    ///
    /// ```
    /// use game_2048::engine::{Game, Move};
    ///
    /// let mut game = Game::from_seed(42);
    /// let dir = game.random_move();
    /// assert!(Move::ALL.contains(&dir));
    /// assert_eq!(game.undo_depth(), 1);
    /// ```
    pub fn random_move(&mut self) -> Move {
        let dir = match self.rng_mut().gen_range(0..4) {
            0 => Move::Left,
            1 => Move::Up,
            2 => Move::Right,
            _ => Move::Down,
        };
        self.make_move(dir);
        dir
    }

    /// Rate `dir` by playing it for real, reading the board, and rolling
    /// back. The spawned tile counts against the empty cells, exactly as
    /// it would after a committed move.
    fn probe(&mut self, dir: Move) -> MoveEfficiency {
        self.make_move(dir);
        let efficiency = if self.board_changed() {
            MoveEfficiency {
                empty_cells: self.grid().count_empty() as i32,
                score: self.score(),
            }
        } else {
            MoveEfficiency::SENTINEL
        };
        self.rollback();
        efficiency
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Grid;

    fn game_on(cells: [[u32; 4]; 4]) -> Game {
        Game::from_grid(Grid::from_values(cells).unwrap(), 7)
    }

    #[test]
    fn efficiency_orders_empties_then_score() {
        let e = |empty_cells, score| MoveEfficiency { empty_cells, score };
        assert!(e(3, 0) > e(2, 999));
        assert!(e(2, 10) > e(2, 9));
        assert!(e(0, 0) > MoveEfficiency::SENTINEL);
        assert_eq!(e(-1, 0), MoveEfficiency::SENTINEL);
    }

    #[test]
    fn auto_move_prefers_the_direction_with_more_empty_cells() {
        // Left frees two cells for 8 points; up and down free one cell
        // for 256. Empty cells outrank score.
        let mut game = game_on([
            [2, 2, 8, 4],
            [4, 16, 2, 2],
            [128, 8, 4, 16],
            [128, 4, 16, 32],
        ]);
        assert_eq!(game.auto_move(), Move::Left);
        assert_eq!(game.score(), 8);
        assert_eq!(game.undo_depth(), 1); // probes leave no snapshots behind
    }

    #[test]
    fn auto_move_breaks_empty_cell_ties_by_score() {
        // Every legal direction frees exactly one cell; the vertical
        // merge is worth 8 against the horizontal 4.
        let mut game = game_on([
            [2, 2, 8, 16],
            [8, 4, 2, 32],
            [16, 4, 8, 2],
            [2, 8, 32, 4],
        ]);
        assert_eq!(game.auto_move(), Move::Down);
        assert_eq!(game.score(), 8);
    }

    #[test]
    fn auto_move_ties_go_to_the_earlier_candidate() {
        // Only the top row can move, and left or right rate identically;
        // down and up rate identically too. Earlier candidates win.
        let mut game = game_on([
            [2, 2, 4, 4],
            [4, 8, 2, 8],
            [8, 4, 16, 2],
            [16, 2, 8, 32],
        ]);
        assert_eq!(game.auto_move(), Move::Left);
        assert_eq!(game.score(), 12);

        let mut game = game_on([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [4, 8, 2, 8],
            [2, 4, 8, 2],
        ]);
        assert_eq!(game.auto_move(), Move::Down);
        assert_eq!(game.score(), 8);
    }

    #[test]
    fn auto_move_on_a_stuck_board_is_a_recorded_no_op() {
        let stuck = [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]];
        let mut game = game_on(stuck);
        assert!(!game.can_move());
        assert_eq!(game.auto_move(), Move::Left);
        assert_eq!(game.grid().values(), stuck);
        assert_eq!(game.score(), 0);
        assert_eq!(game.undo_depth(), 1);
    }

    #[test]
    fn auto_move_always_changes_a_movable_board() {
        let mut game = Game::from_seed(17);
        for _ in 0..50 {
            if !game.can_move() {
                break;
            }
            let before = game.grid();
            game.auto_move();
            assert_ne!(game.grid(), before);
        }
    }

    #[test]
    fn random_move_plays_one_of_the_four_directions() {
        let mut game = Game::from_seed(11);
        let dir = game.random_move();
        assert!(Move::ALL.contains(&dir));
        assert_eq!(game.undo_depth(), 1);
    }

    #[test]
    fn random_move_is_reproducible_from_the_seed() {
        let mut a = Game::from_seed(5);
        let mut b = Game::from_seed(5);
        for _ in 0..20 {
            assert_eq!(a.random_move(), b.random_move());
            assert_eq!(a.grid(), b.grid());
        }
    }
}
