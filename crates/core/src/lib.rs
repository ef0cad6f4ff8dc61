//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the rules of the falling-block game: the field, the
//! piece catalog, the bag randomizer, collision, line clearing, scoring, and the
//! state machine that ties them together. It has **zero dependencies** on
//! rendering, input devices, clocks, or I/O:
//!
//! - **Deterministic**: Same random source produces identical games
//! - **Testable**: Every transition is a synchronous method call
//! - **Portable**: Any scheduler can drive it (terminal loop, GUI timer, test loop)
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid, row fullness and line clearing
//! - [`pieces`]: Tetromino shape matrices and spawn positions
//! - [`rng`]: Injectable random sources and the 7-bag randomizer
//! - [`collision`]: Collision tests and copy-on-write merging
//! - [`scoring`]: Line clear score, level and gravity period
//! - [`game_state`]: The Running / Paused / GameOver state machine
//! - [`snapshot`]: Render-ready observation of the game
//!
//! # Game Rules
//!
//! - **7-Bag Randomizer**: Each bag holds one of every kind; it is exhausted before reshuffling
//! - **No rotation**: Pieces keep their spawn orientation for their whole life
//! - **Immediate lock**: A piece locks on the first gravity tick that cannot move it down
//! - **Scoring**: 100/300/500/800 for 1-4 lines, times (level + 1)
//! - **Levels**: One level per 10 cleared lines
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_core::types::{Command, Phase};
//!
//! let mut game = GameState::new(12345);
//! assert_eq!(game.phase(), Phase::Running);
//!
//! game.apply(Command::MoveLeft);
//! while game.phase() == Phase::Running && game.pieces_spawned() < 3 {
//!     game.tick();
//! }
//! assert!(game.pieces_spawned() >= 3);
//! ```
//!
//! # Timing
//!
//! The engine owns no clock. After every transition the caller reads
//! [`GameState::gravity_period_ms`](game_state::GameState::gravity_period_ms)
//! and schedules the next [`tick`](game_state::GameState::tick) accordingly.

pub mod board;
pub mod collision;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collision::{collides, merge};
pub use game_state::GameState;
pub use pieces::{shape_of, spawn_position, Piece, Shape};
pub use rng::{Bag, RandomSource, ScriptedRng, SimpleRng};
pub use scoring::{gravity_period_ms, level_for_lines, line_clear_score};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
