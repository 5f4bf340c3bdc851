use std::ops::Range;

use itertools::Itertools;

/// Shortest legal run of white cells, across or down.
pub const MIN_RUN: usize = 3;

/// One row of a board, bit-encoded with `1` for a black cell.
///
/// Rows do not know their own width; every method that needs it takes it explicitly.
/// Cell `i`, counting from the left edge, lives at bit `width - 1 - i`, so the row renders as its
/// zero-padded binary representation.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Row(pub u32);

impl Row {
    /// The all-black row, which pads a half-board once its pattern is complete.
    pub fn full(width: usize) -> Self {
        Self((1 << width) - 1)
    }

    /// Assemble a row from cells given left to right, `true` meaning black.
    pub fn from_cells(cells: impl IntoIterator<Item = bool>) -> Self {
        Self(cells.into_iter().fold(0, |bits, black| bits << 1 | u32::from(black)))
    }

    #[inline]
    pub fn is_black(self, i: usize, width: usize) -> bool {
        self.0 >> (width - 1 - i) & 1 == 1
    }

    /// Cells left to right, `true` meaning black.
    pub fn cells(self, width: usize) -> impl Iterator<Item = bool> + Clone {
        (0..width).map(move |i| self.is_black(i, width))
    }

    /// Maximal runs of white cells, as column ranges, left to right.
    pub fn white_runs(self, width: usize) -> impl Iterator<Item = Range<usize>> {
        let mut start = 0;
        self.cells(width)
            .dedup_with_count()
            .filter_map(move |(len, black)| {
                let run = start..start + len;
                start += len;
                (!black).then_some(run)
            })
    }

    /// Whether every maximal white run, including those cut off by either edge, spans at least
    /// [`MIN_RUN`] cells.
    pub fn is_valid(self, width: usize) -> bool {
        self.white_runs(width).all(|run| run.len() >= MIN_RUN)
    }

    /// This row reflected left to right.
    pub fn mirror(self, width: usize) -> Self {
        Self(self.0.reverse_bits() >> (u32::BITS as usize - width))
    }

    pub fn is_palindrome(self, width: usize) -> bool {
        self.mirror(width) == self
    }

    /// Whether either end of the row is white, i.e. the white region touches the left or right
    /// edge of the board here.
    pub fn has_edge(self, width: usize) -> bool {
        !self.is_black(0, width) || !self.is_black(width - 1, width)
    }

    /// Columns black in `self` but white in `other`.
    #[inline]
    pub fn without(self, other: Row) -> Row {
        Row(self.0 & !other.0)
    }

    pub fn render(self, width: usize) -> String {
        format!("{:0width$b}", self.0, width = width)
    }
}
