use rand::Rng;

use crate::game::{Direction, Grid, shift};
use crate::{FOUR_THRESHOLD, GRID_SIZE, INITIAL_TILES};

/// A board plus the cumulative score of every merge made on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameState {
    pub cells: Grid,
    pub score: u64,
}

/// Empty board seeded with three random tiles and a zero score.
pub fn initialize_game<R: Rng + ?Sized>(rng: &mut R) -> GameState {
    let mut cells = Grid::EMPTY;
    for _ in 0..INITIAL_TILES {
        cells = generate_random_tile(&cells, rng);
    }
    GameState { cells, score: 0 }
}

/// Place a 2 (90%) or 4 (10%) on a uniformly chosen empty cell.
///
/// A full grid comes back unchanged.
pub fn generate_random_tile<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Grid {
    let empty = grid.empty_cells();
    if empty.is_empty() {
        return *grid;
    }
    let (x, y) = empty[rng.gen_range(0..empty.len())];
    let value = if rng.gen_range(0.0..1.0) >= FOUR_THRESHOLD { 4 } else { 2 };
    grid.with_tile(x, y, value)
}

/// Apply a move and spawn one tile.
///
/// Returns `None` when the move leaves every row and column as it was; the
/// caller must then keep its current state.
pub fn make_move<R: Rng + ?Sized>(
    state: &GameState,
    direction: Direction,
    rng: &mut R,
) -> Option<GameState> {
    let shifted = shift(state.cells, direction);
    if !shifted.changed {
        return None;
    }
    Some(GameState {
        cells: generate_random_tile(&shifted.grid, rng),
        score: state.score + shifted.score_gained,
    })
}

/// Like [`make_move`], but takes a direction name. Unknown names are a no-op.
pub fn make_named_move<R: Rng + ?Sized>(
    state: &GameState,
    name: &str,
    rng: &mut R,
) -> Option<GameState> {
    Direction::from_name(name).and_then(|d| make_move(state, d, rng))
}

/// True when the grid is full and no two orthogonal neighbours are equal.
pub fn is_game_over(grid: &Grid) -> bool {
    if !grid.is_full() {
        return false;
    }
    for y in 0..GRID_SIZE {
        for x in 0..GRID_SIZE {
            let current = grid.get(x, y);
            if x + 1 < GRID_SIZE && current == grid.get(x + 1, y) {
                return false;
            }
            if y + 1 < GRID_SIZE && current == grid.get(x, y + 1) {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::rngs::mock::StepRng;

    fn checkerboard() -> Grid {
        Grid::from_rows([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ])
    }

    #[test]
    fn initialize_places_three_tiles_with_zero_score() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let state = initialize_game(&mut rng);
            assert_eq!(state.cells.tile_count(), 3);
            assert_eq!(state.score, 0);
            assert!(
                state
                    .cells
                    .rows()
                    .iter()
                    .flatten()
                    .all(|&v| v == 0 || v == 2 || v == 4)
            );
        }
    }

    #[test]
    fn spawn_fills_first_empty_cell_with_two_on_low_draws() {
        let mut rng = StepRng::new(0, 0);
        let grid = Grid::EMPTY.with_tile(0, 0, 8);
        let next = generate_random_tile(&grid, &mut rng);
        assert_eq!(next.get(1, 0), 2);
        assert_eq!(next.tile_count(), 2);
        assert_eq!(grid.tile_count(), 1);
    }

    #[test]
    fn spawn_yields_four_on_high_value_draw() {
        // Index draw is 0, value draw lands near 0.95.
        let mut rng = StepRng::new(0, 0xF333_3333_3333_3333);
        let next = generate_random_tile(&Grid::EMPTY, &mut rng);
        assert_eq!(next.get(0, 0), 4);
    }

    #[test]
    fn spawn_on_full_grid_is_a_no_op() {
        let mut rng = StdRng::seed_from_u64(7);
        let full = checkerboard();
        assert_eq!(generate_random_tile(&full, &mut rng), full);
    }

    #[test]
    fn spawn_value_distribution_is_mostly_twos() {
        let mut rng = StdRng::seed_from_u64(2048);
        let fours = (0..1000)
            .map(|_| generate_random_tile(&Grid::EMPTY, &mut rng))
            .filter(|g| g.highest_tile() == 4)
            .count();
        assert!((50..=160).contains(&fours), "fours = {}", fours);
    }

    #[test]
    fn left_merge_scores_and_spawns_once() {
        let mut rng = StdRng::seed_from_u64(1);
        let state = GameState {
            cells: Grid::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]),
            score: 10,
        };
        let next = make_move(&state, Direction::Left, &mut rng).expect("move should apply");
        assert_eq!(next.cells.get(0, 0), 4);
        assert_eq!(next.score, 14);
        assert_eq!(next.cells.tile_count(), 2);
        // The spawn lands on one of the 15 cells left empty by the merge.
        let spawned: Vec<_> = next
            .cells
            .rows()
            .iter()
            .flatten()
            .skip(1)
            .filter(|&&v| v != 0)
            .collect();
        assert_eq!(spawned.len(), 1);
        assert!(*spawned[0] == 2 || *spawned[0] == 4);
        // Input is untouched.
        assert_eq!(state.cells.rows()[0], [2, 2, 0, 0]);
        assert_eq!(state.score, 10);
    }

    #[test]
    fn no_op_move_returns_none_every_time() {
        let mut rng = StdRng::seed_from_u64(3);
        let state = GameState {
            cells: Grid::from_rows([
                [2, 0, 0, 0],
                [4, 0, 0, 0],
                [8, 0, 0, 0],
                [16, 0, 0, 0],
            ]),
            score: 36,
        };
        assert_eq!(make_move(&state, Direction::Left, &mut rng), None);
        assert_eq!(make_move(&state, Direction::Left, &mut rng), None);
        assert_eq!(state.score, 36);
        assert_eq!(state.cells.tile_count(), 4);
    }

    #[test]
    fn unknown_direction_name_is_a_no_op() {
        let mut rng = StdRng::seed_from_u64(4);
        let state = GameState {
            cells: Grid::from_rows([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]),
            score: 0,
        };
        assert_eq!(make_named_move(&state, "diagonal", &mut rng), None);
        assert!(make_named_move(&state, "LEFT", &mut rng).is_some());
    }

    #[test]
    fn score_never_decreases_over_a_game() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut state = initialize_game(&mut rng);
        for step in 0..500 {
            let dir = Direction::ALL[step % 4];
            if let Some(next) = make_move(&state, dir, &mut rng) {
                assert!(next.score >= state.score);
                assert!(
                    next.cells
                        .rows()
                        .iter()
                        .flatten()
                        .all(|&v| v == 0 || v.is_power_of_two())
                );
                state = next;
            }
            if is_game_over(&state.cells) {
                break;
            }
        }
    }

    #[test]
    fn game_over_on_checkerboard() {
        assert!(is_game_over(&checkerboard()));
    }

    #[test]
    fn not_over_with_empty_cell() {
        let grid = checkerboard().with_tile(1, 1, 0);
        assert!(!is_game_over(&grid));
    }

    #[test]
    fn not_over_with_pair_on_last_row_or_column() {
        let last_row = checkerboard().with_tile(3, 3, 4);
        assert_eq!(last_row.get(2, 3), 4);
        assert!(!is_game_over(&last_row));

        let last_col = checkerboard().with_tile(3, 0, 2);
        assert_eq!(last_col.get(3, 1), 2);
        assert!(!is_game_over(&last_col));

        let interior = checkerboard().with_tile(1, 1, 4);
        assert!(!is_game_over(&interior));
    }
}
