use std::fmt::{Display, Formatter};

use ndarray::Array2;
use strum::VariantArray;

use crate::location::Location;
use crate::row::Row;
use crate::shape::SquareStep;

/// A complete board, assembled from its top half.
///
/// Rows below the middle are the top rows turned half way round: row `size - 1 - i` is row `i`
/// reflected. Cells hold `true` for black.
#[derive(Clone)]
pub struct Board {
    cells: Array2<bool>,
    // scratch space for flood fills
    visited: Array2<bool>,
}

impl Board {
    /// An all-white board of side `size`.
    pub fn new(size: usize) -> Self {
        Self {
            cells: Array2::from_elem((size, size), false),
            visited: Array2::from_elem((size, size), false),
        }
    }

    /// The board whose rows from the top edge down to the middle are `half`.
    pub fn from_half(half: &[Row], size: usize) -> Self {
        let mut board = Self::new(size);
        board.fill(half);
        board
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.nrows()
    }

    /// Overwrite every cell from the top half `half`.
    pub fn fill(&mut self, half: &[Row]) {
        let size = self.size();
        for ((y, x), cell) in self.cells.indexed_iter_mut() {
            *cell = if y < half.len() {
                half[y].is_black(x, size)
            } else {
                half[size - 1 - y].mirror(size).is_black(x, size)
            };
        }
    }

    pub fn row(&self, y: usize) -> Row {
        Row::from_cells(self.cells.row(y).iter().copied())
    }

    /// Column `x` read top to bottom, as a row.
    pub fn column(&self, x: usize) -> Row {
        Row::from_cells(self.cells.column(x).iter().copied())
    }

    /// Whether every vertical white run is long enough.
    pub fn columns_valid(&self) -> bool {
        (0..self.size()).all(|x| self.column(x).is_valid(self.size()))
    }

    /// Number of 4-connected white regions.
    pub fn white_regions(&mut self) -> usize {
        self.visited.fill(false);
        let mut regions = 0;
        let mut stack = Vec::with_capacity(self.cells.len());

        for (index, black) in self.cells.indexed_iter() {
            if *black || self.visited[index] {
                continue;
            }
            regions += 1;
            self.visited[index] = true;
            stack.push(Location::from(index));

            while let Some(location) = stack.pop() {
                for step in SquareStep::VARIANTS {
                    let neighbor = step.attempt_from(location);
                    // off-board locations have no cell
                    if self.cells.get(neighbor.as_index()) != Some(&false) {
                        continue;
                    }
                    let seen = &mut self.visited[neighbor.as_index()];
                    if !*seen {
                        *seen = true;
                        stack.push(neighbor);
                    }
                }
            }
        }

        regions
    }

    /// Whether the white cells form exactly one region.
    pub fn is_connected(&mut self) -> bool {
        self.white_regions() == 1
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut out = String::with_capacity(self.cells.nrows() * (self.cells.ncols() + 1));

        for row in self.cells.rows() {
            for black in row {
                out.push(if *black { '1' } else { '0' });
            }
            out.push('\n');
        }

        write!(f, "{}", out)
    }
}
