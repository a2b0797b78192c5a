pub mod direction;
pub mod grid;
pub mod palette;
pub mod session;
pub mod slide;
pub mod state;

pub use direction::{swipe_direction, Direction};
pub use grid::{Grid, Row};
pub use palette::{cell_color, CellColor, CELL_COLORS};
pub use session::{Game, MoveOutcome, SessionError};
pub use slide::{shift, slide, slide_left, Shift};
pub use state::{
    generate_random_tile, initialize_game, is_game_over, make_move, make_named_move, GameState,
};
