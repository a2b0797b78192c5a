// Shared game UI/constants.
use std::env;
use std::path::PathBuf;

pub const GRID_SIZE: usize = 4;
pub const INITIAL_TILES: usize = 3;
// Spawn draws r in [0, 1); r at or above this yields a 4 instead of a 2.
pub const FOUR_THRESHOLD: f64 = 0.9;

pub const TILE_W: usize = 7;
pub const TILE_H: usize = 3;
pub const PLAY_W: usize = GRID_SIZE * (TILE_W + 1) + 1; // tiles plus gutters
pub const PLAY_H: usize = GRID_SIZE * (TILE_H + 1) + 1;
// Minimal pane width to fit the board + cabinet border.
pub const MIN_PANE_WIDTH: u16 = (PLAY_W as u16) + 2;
pub const INFO_H: u16 = 5;
pub const CONTROLS_H: u16 = 5;
pub const MIN_PANE_HEIGHT: u16 = (PLAY_H as u16) + INFO_H + CONTROLS_H + 2;
pub const MIN_SWIPE_CELLS: i32 = 4;
pub const POLL_MS: u64 = 50;

pub const SOCKET_PATH: &str = "/tmp/tile-merge.sock";
// A remote client idle this long is dropped so the next one can connect.
pub const REMOTE_IDLE_SECS: u64 = 30;
pub const REMOTE_REPLY_MS: u64 = 2000;
pub const SEED_VAR: &str = "TILE_MERGE_SEED";
pub const LOG_VAR: &str = "TILE_MERGE_LOG";
pub const SOCKET_VAR: &str = "TILE_MERGE_SOCKET";

/// Runtime settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub socket_path: PathBuf,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup(SEED_VAR).and_then(|s| s.trim().parse().ok());
        let log_file = lookup(LOG_VAR)
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);
        let socket_path = lookup(SOCKET_VAR)
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(SOCKET_PATH));
        Self {
            seed,
            log_file,
            socket_path,
        }
    }
}
