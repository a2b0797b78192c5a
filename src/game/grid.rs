use std::fmt;

use crate::GRID_SIZE;

pub type Row = [u32; GRID_SIZE];

/// Square board of tile values, indexed `[y][x]` with `y = 0` at the top.
///
/// Every cell is 0 (empty) or a power of two. Transformations return a new
/// grid and never touch `self`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Grid {
    cells: [Row; GRID_SIZE],
}

impl Grid {
    pub const EMPTY: Grid = Grid {
        cells: [[0; GRID_SIZE]; GRID_SIZE],
    };

    pub fn from_rows(rows: [Row; GRID_SIZE]) -> Self {
        Self { cells: rows }
    }

    pub fn rows(&self) -> &[Row; GRID_SIZE] {
        &self.cells
    }

    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.cells[y][x]
    }

    pub fn with_tile(&self, x: usize, y: usize, value: u32) -> Self {
        let mut next = *self;
        next.cells[y][x] = value;
        next
    }

    /// Coordinates `(x, y)` of every empty cell in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                if self.cells[y][x] == 0 {
                    out.push((x, y));
                }
            }
        }
        out
    }

    /// Swap rows and columns.
    pub fn transpose(&self) -> Self {
        let mut next = Self::EMPTY;
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                next.cells[x][y] = self.cells[y][x];
            }
        }
        next
    }

    /// Reverse each row.
    pub fn mirror(&self) -> Self {
        let mut next = *self;
        for row in next.cells.iter_mut() {
            row.reverse();
        }
        next
    }

    pub fn tile_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&v| v != 0).count()
    }

    pub fn highest_tile(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|&v| v != 0)
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid({:?})", self.cells)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.cells.iter().enumerate() {
            if y > 0 {
                writeln!(f, "{}", "-".repeat(GRID_SIZE * 6 - 1))?;
            }
            let cols: Vec<String> = row
                .iter()
                .map(|&v| if v == 0 { format!("{:^5}", "") } else { format!("{:^5}", v) })
                .collect();
            writeln!(f, "{}", cols.join("|"))?;
        }
        Ok(())
    }
}
