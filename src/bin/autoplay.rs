use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use game_2048::engine::{Game, Grid};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let pb = if args.quiet || args.json {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(u64::from(args.games));
        pb.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40} {pos}/{len} games")?
                .progress_chars("=>-"),
        );
        pb
    };

    let mut out = match &args.out {
        Some(path) => Some(BufWriter::new(File::create(path)?)),
        None => None,
    };

    let mut total_score = 0u64;
    let mut total_moves = 0u64;
    let mut best_score = 0u32;
    let mut tile_counts: BTreeMap<u32, u32> = BTreeMap::new();

    for i in 0..args.games {
        let seed = game_seed(args.seed, i);
        let (game, moves) = play_one(args.policy, seed);

        total_score += u64::from(game.score());
        total_moves += u64::from(moves);
        best_score = best_score.max(game.score());
        *tile_counts.entry(game.grid().highest()).or_insert(0) += 1;

        let summary = GameSummary {
            game: i,
            seed,
            moves,
            score: game.score(),
            max_tile: game.max_tile(),
            grid: game.grid(),
        };
        if args.json {
            println!("{}", serde_json::to_string(&summary)?);
        }
        if let Some(out) = out.as_mut() {
            serde_json::to_writer(&mut *out, &summary)?;
            out.write_all(b"\n")?;
        }
        pb.inc(1);
    }
    pb.finish_and_clear();
    if let Some(mut out) = out {
        out.flush()?;
    }

    if !args.json {
        let games = f64::from(args.games.max(1));
        println!("games: {} ({:?} policy)", args.games, args.policy);
        println!("mean score: {:.1}", total_score as f64 / games);
        println!("best score: {best_score}");
        println!("mean moves: {:.1}", total_moves as f64 / games);
        println!("final tile distribution:");
        for (tile, count) in &tile_counts {
            println!("{tile:>6}: {count}");
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(name = "autoplay", about = "Headless 2048 batch runner")]
struct Args {
    /// Number of games to play
    #[arg(long, default_value_t = 100)]
    games: u32,

    /// Base RNG seed; game i plays with seed + i. Entropy-seeded when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Move selection policy
    #[arg(long, value_enum, default_value_t = Policy::Heuristic)]
    policy: Policy,

    /// Print one JSON summary line per game instead of the text report
    #[arg(long)]
    json: bool,

    /// Also write the JSON summary lines to this path
    #[arg(long)]
    out: Option<PathBuf>,

    /// Suppress the progress bar
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Policy {
    /// Greedy one-ply policy: most empty cells, then highest score
    Heuristic,
    /// Uniform random directions
    Random,
}

#[derive(Serialize)]
struct GameSummary {
    game: u32,
    seed: Option<u64>,
    moves: u32,
    score: u32,
    max_tile: u32,
    grid: Grid,
}

/// Seed for game `index` of a batch; wraps rather than overflowing at the
/// top of the u64 range.
fn game_seed(base: Option<u64>, index: u32) -> Option<u64> {
    base.map(|seed| seed.wrapping_add(u64::from(index)))
}

fn play_one(policy: Policy, seed: Option<u64>) -> (Game, u32) {
    let mut game = match seed {
        Some(seed) => Game::from_seed(seed),
        None => Game::new(),
    };
    let mut moves = 0u32;
    while game.can_move() {
        match policy {
            Policy::Heuristic => game.auto_move(),
            Policy::Random => game.random_move(),
        };
        moves += 1;
    }
    (game, moves)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_seed_steps_from_the_base() {
        assert_eq!(game_seed(Some(7), 0), Some(7));
        assert_eq!(game_seed(Some(7), 2), Some(9));
        assert_eq!(game_seed(None, 5), None);
    }

    #[test]
    fn game_seed_wraps_at_the_top_of_u64() {
        assert_eq!(game_seed(Some(u64::MAX), 3), Some(2));
    }
}
