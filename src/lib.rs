//! Reversi-MC: a Reversi (Othello) engine using flat Monte Carlo search.
//!
//! For each legal move the engine plays many random or heuristic games to
//! the end and picks the move whose playouts scored best. There is no search
//! tree; every candidate gets the same fixed playout budget.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, square classes, and search parameters
//! - [`board`] - Chip colors, the 64-cell grid, and ray directions
//! - [`game`] - Game state, legality, captures, and outcomes
//! - [`playout`] - Playout policies and game simulation
//! - [`search`] - Flat Monte Carlo move selection
//! - [`metrics`] - Search metrics and game tallies
//! - [`engine`] - The computer player and the [`engine::Agent`] trait
//! - [`session`] - Turn-by-turn game driver
//!
//! ## Example
//!
//! ```
//! use reversi_mc::board::Color;
//! use reversi_mc::engine::Engine;
//! use reversi_mc::game::GameState;
//! use reversi_mc::search::SearchConfig;
//!
//! let mut state = GameState::new(Color::Dark);
//! let config = SearchConfig { playouts_per_candidate: 20, ..SearchConfig::default() };
//! let mut engine = Engine::new(config);
//!
//! if let Some(pos) = engine.select_move(&state) {
//!     state.apply_move(pos);
//!     state.switch_side();
//! }
//! println!("{state}");
//! ```

pub mod board;
pub mod constants;
pub mod engine;
pub mod game;
pub mod metrics;
pub mod playout;
pub mod search;
pub mod session;
