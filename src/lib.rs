//! game-2048: a 4x4 sliding-tile game engine
//!
//! This crate provides:
//! - [`engine::Game`]: the full game state machine. Four directional moves
//!   built on one slide-left algorithm and grid rotation, random tile
//!   spawning (2 at 90%, 4 at 10%), score and max-tile tracking, and a
//!   bounded LIFO undo history
//! - A greedy one-ply auto-play policy and a uniform random baseline, in
//!   [`policy`]
//!
//! Quick start:
//!
//! ```
//! use game_2048::engine::{Game, Move};
//!
//! // Seeded games replay identically.
//! let mut game = Game::from_seed(42);
//! assert_eq!(game.grid().count_empty(), 14); // two starting tiles
//!
//! // One player move: slide/merge, then spawn one tile if anything moved.
//! game.make_move(Move::Left);
//!
//! // Undo restores the exact pre-move grid and score.
//! game.rollback();
//! assert_eq!(game.score(), 0);
//! assert_eq!(game.grid().count_empty(), 14);
//! ```
//!
//! Letting the policy drive:
//!
//! ```
//! use game_2048::engine::Game;
//!
//! let mut game = Game::from_seed(7);
//! while game.can_move() && game.score() < 100 {
//!     game.auto_move();
//! }
//! assert!(game.score() >= 100 || !game.can_move());
//! ```

pub mod engine;
pub mod policy;
