//! Engine self-play driver.
//!
//! Run with:
//! `cargo run --release --bin self_play -- --depth 3 --plies 80`
//! `RUST_LOG=minimax_chess=debug cargo run --bin self_play -- --opponent random`

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use minimax_chess::chess_errors::ChessError;
use minimax_chess::engines::engine_alpha_beta::AlphaBetaEngine;
use minimax_chess::engines::engine_random::RandomEngine;
use minimax_chess::engines::engine_trait::{Engine, GoParams};
use minimax_chess::game_state::chess_types::Color;
use minimax_chess::game_state::game_state::{GameState, GameStatus};
use minimax_chess::search::search_config::SearchConfig;
use minimax_chess::utils::render_game_state::render_game_state;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Opponent {
    Random,
    Engine,
}

#[derive(Parser)]
#[command(name = "self_play")]
#[command(about = "Play the alpha-beta engine against itself or a random mover", long_about = None)]
struct Args {
    /// Starting position; defaults to the standard setup
    #[arg(long)]
    fen: Option<String>,

    /// Search depth for the alpha-beta side(s)
    #[arg(short, long, default_value_t = 3)]
    depth: u8,

    /// Stop after this many plies if the game has not ended
    #[arg(short, long, default_value_t = 120)]
    plies: u32,

    /// Seed for the root shuffle and the random opponent
    #[arg(long)]
    seed: Option<u64>,

    /// Per-move time limit in milliseconds
    #[arg(long)]
    time_limit_ms: Option<u64>,

    /// Who plays Black
    #[arg(long, value_enum, default_value_t = Opponent::Engine)]
    opponent: Opponent,
}

fn build_engine(args: &Args, salt: u64) -> AlphaBetaEngine {
    match args.seed {
        Some(seed) => AlphaBetaEngine::with_config(
            SearchConfig::default()
                .with_depth(args.depth)
                .with_seed(seed.wrapping_add(salt)),
        ),
        None => AlphaBetaEngine::new(args.depth),
    }
}

fn main() -> Result<(), ChessError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut game = match &args.fen {
        Some(fen) => GameState::from_fen(fen)?,
        None => GameState::new_game(),
    };

    let mut white: Box<dyn Engine> = Box::new(build_engine(&args, 0));
    let mut black: Box<dyn Engine> = match args.opponent {
        Opponent::Engine => Box::new(build_engine(&args, 1)),
        Opponent::Random => match args.seed {
            Some(seed) => Box::new(RandomEngine::with_seed(seed)),
            None => Box::new(RandomEngine::new()),
        },
    };
    white.new_game();
    black.new_game();

    let params = GoParams {
        depth: None,
        movetime_ms: args.time_limit_ms,
    };

    println!("{}", render_game_state(&game));
    let mut moves = Vec::new();
    for ply in 0..args.plies {
        if game.game_status() != GameStatus::Ongoing {
            break;
        }
        let engine = match game.side_to_move {
            Color::White => &mut white,
            Color::Black => &mut black,
        };
        let out = engine.choose_move(&mut game, &params)?;
        let Some(mv) = out.best_move else {
            break;
        };
        game.apply_move(mv.from, mv.to)?;
        info!(ply, engine = engine.name(), mv = %mv, "played");
        println!("{}. {} {}", ply + 1, engine.name(), mv);
        println!("{}", render_game_state(&game));
        moves.push(mv.to_string());
    }

    println!("moves: {}", moves.join(" "));
    println!("status: {:?}", game.game_status());
    println!(
        "material (white): {}  missing: {}",
        game.score(Color::White),
        game.missing_pieces().len()
    );
    Ok(())
}
