//! Headless runner (default binary).
//!
//! Plays one game without a screen. A simulated clock stands in for the
//! scheduler: it fires gravity ticks at whatever period the engine reports,
//! while a trivial policy walks each new piece toward a target column.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use blockfall::core::GameState;
use blockfall::types::{Command, Phase, BOARD_WIDTH};

#[derive(Debug, Parser)]
#[command(name = "blockfall", version, about = "Play a headless game of blockfall")]
struct Args {
    /// Seed for the bag randomizer (random when omitted)
    #[arg(long)]
    seed: Option<u32>,

    /// Stop once this many pieces have spawned
    #[arg(long, default_value_t = 200)]
    max_pieces: u32,

    /// Hold soft drop for the whole game
    #[arg(long)]
    soft_drop: bool,

    /// Print the final snapshot as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(|| fastrand::u32(..));
    info!(seed, max_pieces = args.max_pieces, "starting headless game");

    let mut game = GameState::new(seed);
    if args.soft_drop {
        game.apply(Command::SoftDropStart);
    }

    let elapsed_ms = run(&mut game, args.max_pieces);
    let snapshot = game.snapshot();

    if args.json {
        let json = serde_json::to_string_pretty(&snapshot).context("serializing snapshot")?;
        println!("{json}");
    } else {
        print!("{}", snapshot.board_text());
        println!(
            "phase={} score={} lines={} level={} pieces={} simulated={}ms",
            snapshot.phase.as_str(),
            snapshot.score,
            snapshot.lines,
            snapshot.level,
            game.pieces_spawned(),
            elapsed_ms
        );
    }
    Ok(())
}

/// Drive the game until it ends or the piece budget is spent.
/// Returns the simulated time in milliseconds.
fn run(game: &mut GameState, max_pieces: u32) -> u64 {
    let mut elapsed_ms: u64 = 0;
    let mut current_piece = 0;
    let mut target_x = 0i8;

    while game.phase() == Phase::Running && game.pieces_spawned() <= max_pieces {
        if game.pieces_spawned() != current_piece {
            current_piece = game.pieces_spawned();
            let span = (BOARD_WIDTH - game.active().shape.width() + 1) as u32;
            target_x = ((current_piece * 3) % span) as i8;
        }

        let x = game.active().x;
        if x > target_x {
            game.apply(Command::MoveLeft);
        } else if x < target_x {
            game.apply(Command::MoveRight);
        }

        elapsed_ms += u64::from(game.gravity_period_ms());
        game.tick();
    }

    info!(
        pieces = game.pieces_spawned(),
        score = game.score(),
        lines = game.lines(),
        "game finished"
    );
    elapsed_ms
}
