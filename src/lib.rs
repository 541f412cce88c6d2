//! A small engine for tic-tac-toe on N×N boards.
//!
//! The engine keeps the board, applies the rules, and plays automated moves
//! either at random or optimally. Optimal moves come from an exact minimax
//! search with alpha-beta pruning over the whole remaining game tree, so it
//! is meant for the classic 3×3 board and other small sizes.
//!
//! # Example
//!
//! ```rust
//! use tictactoe_minimax::board::Action;
//! use tictactoe_minimax::player::{Automation, Marker, Player, PlayerMode};
//! use tictactoe_minimax::random::CustomNumberGenerator;
//! use tictactoe_minimax::session::{GameSession, RoundOutcome};
//!
//! let human = Player::new("Ada", Marker::new('X').unwrap(), PlayerMode::Human);
//! let engine = Player::new("Engine", Marker::new('O').unwrap(), PlayerMode::AutomatedOptimal);
//!
//! // Create a 3x3 session with a seeded random source for tie-breaks
//! let mut session = GameSession::builder(3, human, engine)
//!     .with_random_generator(CustomNumberGenerator::default())
//!     .build()
//!     .unwrap();
//!
//! // The human takes the centre, the engine answers
//! let outcome = session.play_round(Action::new(1, 1));
//! assert_eq!(outcome.to_string(), "Engine's turn.");
//!
//! let round = session.play_automated_round(Automation::Optimal).unwrap();
//! println!("The engine played {:?}", round.action);
//! assert!(matches!(round.outcome, RoundOutcome::NextTurn(_)));
//! ```

/// Explicit game-tree expansion for inspecting positions.
pub mod analysis;
/// The N×N board, its cells and coordinates.
pub mod board;
/// Engine configuration, loadable from TOML.
pub mod config;
/// Error types for every fallible operation.
pub mod error;
/// Players, markers and play modes.
pub mod player;
/// Traits and implementations for random number generation.
pub mod random;
/// Stateless rules: legal moves, winner, terminal state and utility.
pub mod rules;
/// Minimax search with alpha-beta pruning.
pub mod search;
/// A game session driving the board through rounds.
pub mod session;

pub use board::{Action, Board, Cell};
pub use config::EngineConfig;
pub use error::{BoardError, ConfigError, SearchError, SessionError};
pub use player::{Automation, Marker, Player, PlayerMode};
pub use search::{MinimaxSearch, SearchReport};
pub use session::{GameSession, RoundOutcome, SessionState};
