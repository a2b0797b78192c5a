use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::game::{Direction, GameState, initialize_game, is_game_over, make_move};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { gained: u64 },
    NoOp,
    Finished,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("move submitted against version {expected} but game is at version {current}")]
    StaleVersion { expected: u64, current: u64 },
}

/// One game session: the authoritative state and the random source feeding it.
///
/// Moves are applied one at a time. Every accepted move or restart bumps
/// `version`, so a submitter holding an older version can be turned away.
pub struct Game {
    state: GameState,
    rng: StdRng,
    version: u64,
    pub game_over: bool,
    pub moves: u64,
    pub best_score: u64,
}

impl Game {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(rng)
    }

    pub fn with_rng(mut rng: StdRng) -> Self {
        let state = initialize_game(&mut rng);
        Self {
            state,
            rng,
            version: 0,
            game_over: false,
            moves: 0,
            best_score: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn apply(&mut self, direction: Direction) -> MoveOutcome {
        if self.game_over {
            return MoveOutcome::Finished;
        }
        let Some(next) = make_move(&self.state, direction, &mut self.rng) else {
            return MoveOutcome::NoOp;
        };
        let gained = next.score - self.state.score;
        self.state = next;
        self.version += 1;
        self.moves += 1;
        self.best_score = self.best_score.max(self.state.score);
        debug!(
            "move {} {} gained={} score={}",
            self.moves, direction, gained, self.state.score
        );
        if is_game_over(&self.state.cells) {
            self.game_over = true;
            info!(
                "game over after {} moves, score {}, best tile {}",
                self.moves,
                self.state.score,
                self.state.cells.highest_tile()
            );
            debug!("final board:\n{}", self.state.cells);
        }
        MoveOutcome::Moved { gained }
    }

    /// Apply a move only if the caller saw the current version.
    pub fn apply_at(
        &mut self,
        direction: Direction,
        expected_version: u64,
    ) -> Result<MoveOutcome, SessionError> {
        if expected_version != self.version {
            warn!(
                "rejecting {} at stale version {} (current {})",
                direction, expected_version, self.version
            );
            return Err(SessionError::StaleVersion {
                expected: expected_version,
                current: self.version,
            });
        }
        Ok(self.apply(direction))
    }

    pub fn apply_named(&mut self, name: &str) -> MoveOutcome {
        match Direction::from_name(name) {
            Some(direction) => self.apply(direction),
            None => {
                warn!("ignoring unknown direction {:?}", name);
                MoveOutcome::NoOp
            }
        }
    }

    pub fn restart(&mut self) {
        self.best_score = self.best_score.max(self.state.score);
        self.state = initialize_game(&mut self.rng);
        self.version += 1;
        self.moves = 0;
        self.game_over = false;
        info!("new game (best score {})", self.best_score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Grid;

    fn game_with(cells: Grid) -> Game {
        let mut game = Game::new(Some(5));
        game.state = GameState { cells, score: 0 };
        game
    }

    #[test]
    fn new_game_has_three_tiles() {
        let game = Game::new(Some(11));
        assert_eq!(game.state().cells.tile_count(), 3);
        assert_eq!(game.score(), 0);
        assert_eq!(game.version(), 0);
        assert!(!game.game_over);
    }

    #[test]
    fn same_seed_same_game() {
        let mut a = Game::new(Some(42));
        let mut b = Game::new(Some(42));
        for d in [Direction::Left, Direction::Up, Direction::Right, Direction::Down] {
            assert_eq!(a.apply(d), b.apply(d));
        }
        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn accepted_move_bumps_version_and_score() {
        let mut game = game_with(Grid::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]));
        assert_eq!(game.apply(Direction::Left), MoveOutcome::Moved { gained: 4 });
        assert_eq!(game.version(), 1);
        assert_eq!(game.moves, 1);
        assert_eq!(game.score(), 4);
        assert_eq!(game.best_score, 4);
    }

    #[test]
    fn no_op_leaves_version_alone() {
        let mut game = game_with(Grid::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]));
        assert_eq!(game.apply(Direction::Left), MoveOutcome::NoOp);
        assert_eq!(game.apply(Direction::Up), MoveOutcome::NoOp);
        assert_eq!(game.version(), 0);
        assert_eq!(game.state().cells.tile_count(), 1);
        assert_eq!(game.apply_named("nowhere"), MoveOutcome::NoOp);
    }

    #[test]
    fn stale_version_is_rejected() {
        let mut game = game_with(Grid::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]));
        assert!(game.apply_at(Direction::Left, 0).is_ok());
        let err = game.apply_at(Direction::Right, 0).unwrap_err();
        assert_eq!(
            err,
            SessionError::StaleVersion {
                expected: 0,
                current: 1
            }
        );
        assert_eq!(
            err.to_string(),
            "move submitted against version 0 but game is at version 1"
        );
        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert!(boxed.source().is_none());
    }

    #[test]
    fn finishing_move_latches_game_over() {
        // The only merge frees (3, 0); a 2 or a 4 there leaves no pairs.
        let cells = Grid::from_rows([
            [2, 2, 8, 16],
            [32, 64, 128, 256],
            [512, 1024, 2048, 4096],
            [8, 16, 32, 64],
        ]);
        let mut game = game_with(cells);
        assert_eq!(game.apply(Direction::Left), MoveOutcome::Moved { gained: 4 });
        assert_eq!(game.state().cells.rows()[0][..3], [4, 8, 16]);
        assert!(game.game_over);
        assert_eq!(game.apply(Direction::Up), MoveOutcome::Finished);
        assert_eq!(game.version(), 1);
    }

    #[test]
    fn restart_resets_board_and_keeps_best() {
        let mut game = game_with(Grid::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]));
        game.apply(Direction::Left);
        let version = game.version();
        game.restart();
        assert_eq!(game.score(), 0);
        assert_eq!(game.moves, 0);
        assert_eq!(game.best_score, 4);
        assert!(game.version() > version);
        assert_eq!(game.state().cells.tile_count(), 3);
    }
}
