use crate::game::{Direction, Grid, Row};
use crate::GRID_SIZE;

/// Result of resolving one move over a whole grid, before any spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shift {
    pub grid: Grid,
    pub score_gained: u64,
    pub changed: bool,
}

/// Compact a row toward index 0 and merge equal neighbours in one pass.
///
/// A merged tile is final for this call: `[2, 2, 2, 0]` becomes `[4, 2, 0, 0]`.
/// Returns the new row and the sum of all merge results.
pub fn slide(row: Row) -> (Row, u64) {
    let mut compacted: Vec<u32> = row.iter().copied().filter(|&v| v != 0).collect();
    let mut gained = 0u64;

    for i in 0..compacted.len().saturating_sub(1) {
        if compacted[i] != 0 && compacted[i] == compacted[i + 1] {
            compacted[i] *= 2;
            gained += u64::from(compacted[i]);
            compacted[i + 1] = 0;
        }
    }

    let mut out = [0; GRID_SIZE];
    for (slot, v) in out
        .iter_mut()
        .zip(compacted.into_iter().filter(|&v| v != 0))
    {
        *slot = v;
    }
    (out, gained)
}

pub fn slide_left(grid: Grid) -> Shift {
    let mut rows = *grid.rows();
    let mut score_gained = 0;
    let mut changed = false;
    for row in rows.iter_mut() {
        let (next, gained) = slide(*row);
        score_gained += gained;
        changed |= next != *row;
        *row = next;
    }
    Shift {
        grid: Grid::from_rows(rows),
        score_gained,
        changed,
    }
}

/// Resolve `direction` by reorienting the grid so that the move becomes a
/// left slide, then undoing the reorientation.
pub fn shift(grid: Grid, direction: Direction) -> Shift {
    match direction {
        Direction::Left => slide_left(grid),
        Direction::Right => {
            let s = slide_left(grid.mirror());
            Shift {
                grid: s.grid.mirror(),
                ..s
            }
        }
        Direction::Up => {
            let s = slide_left(grid.transpose());
            Shift {
                grid: s.grid.transpose(),
                ..s
            }
        }
        Direction::Down => {
            let s = slide_left(grid.transpose().mirror());
            Shift {
                grid: s.grid.mirror().transpose(),
                ..s
            }
        }
    }
}
