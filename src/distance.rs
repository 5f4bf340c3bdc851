use crate::row::Row;

const BITS: usize = 2;
const MASK: u32 = (1 << BITS) - 1;
/// Value of a column whose newest cell is black.
const BLACK_NOW: u8 = 3;

/// Per-column count-down since the most recent black cell, packed two bits per column.
///
/// A column reads 3 when the newest row is black there and counts down by one for every white row
/// after that, stopping at 0. A column that has never seen black also reads 0. Values 1 and 2 mean
/// the white run since the last black cell is still shorter than [`MIN_RUN`](crate::row::MIN_RUN).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Distance(u32);

impl Distance {
    #[inline]
    pub fn get(self, column: usize) -> u8 {
        (self.0 >> (BITS * column) & MASK) as u8
    }

    #[inline]
    fn set(&mut self, column: usize, value: u8) {
        let shift = BITS * column;
        self.0 = self.0 & !(MASK << shift) | u32::from(value) << shift;
    }

    /// The vector after the first three rows, `newest` being the most recent.
    pub fn init(oldest: Row, middle: Row, newest: Row, width: usize) -> Self {
        let mut distance = Self::default();
        for column in 0..width {
            let value = if newest.is_black(column, width) {
                3
            } else if middle.is_black(column, width) {
                2
            } else if oldest.is_black(column, width) {
                1
            } else {
                0
            };
            distance.set(column, value);
        }
        distance
    }

    /// The vector after `row` is added.
    pub fn apply(self, row: Row, width: usize) -> Self {
        let mut distance = Self::default();
        for column in 0..width {
            let value = if row.is_black(column, width) {
                BLACK_NOW
            } else {
                self.get(column).saturating_sub(1)
            };
            distance.set(column, value);
        }
        distance
    }

    /// Whether the board may end here: no column is part way through a short white run.
    pub fn is_terminal(self, width: usize) -> bool {
        (0..width).all(|column| matches!(self.get(column), 0 | BLACK_NOW))
    }

    /// Columns where the next row must not be black.
    pub fn pending_mask(self, width: usize) -> Row {
        Row::from_cells((0..width).map(|column| matches!(self.get(column), 1 | 2)))
    }
}
