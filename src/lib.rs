//! Tile-merging puzzle engine (2048).
//!
//! The engine is a set of pure functions over the `Copy` value [`GameState`]:
//! a move is resolved by one row primitive ([`slide`]) applied after
//! mirroring and/or transposing the grid, and randomness is always passed in.
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use tile_merge::{initialize_game, make_move, Direction};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let state = initialize_game(&mut rng);
//! match make_move(&state, Direction::Left, &mut rng) {
//!     Some(next) => assert!(next.score >= state.score),
//!     None => {} // nothing slid or merged; keep `state`
//! }
//! ```
//!
//! [`Game`] wraps one authoritative state per session and serializes moves,
//! and [`io`] feeds it from a Unix socket.

pub mod config;
pub mod game;
pub mod io;

pub use config::{
    Settings, CONTROLS_H, FOUR_THRESHOLD, GRID_SIZE, INFO_H, INITIAL_TILES, MIN_PANE_HEIGHT,
    MIN_PANE_WIDTH, MIN_SWIPE_CELLS, PLAY_H, PLAY_W, POLL_MS, REMOTE_IDLE_SECS, REMOTE_REPLY_MS,
    SOCKET_PATH, TILE_H, TILE_W,
};
pub use game::{
    cell_color, generate_random_tile, initialize_game, is_game_over, make_move, make_named_move,
    slide, swipe_direction, CellColor, Direction, Game, GameState, Grid, MoveOutcome,
    SessionError,
};
