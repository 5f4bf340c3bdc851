//! Row tables built once per board size and shared read-only by every worker.

use bitvec::vec::BitVec;
use itertools::Itertools;
use rustc_hash::FxHashMap;

use crate::config::Symmetry;
use crate::reach::Reach;
use crate::row::Row;

/// A set of rows from a [`RowTables`] universe, stored densely by universe index.
///
/// Members enumerate in ascending row order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RowSet(BitVec);

impl RowSet {
    fn from_fn(len: usize, contains: impl Fn(usize) -> bool) -> Self {
        Self((0..len).map(contains).collect())
    }

    /// Rows present in both sets.
    pub fn and(&self, other: &RowSet) -> RowSet {
        let mut out = self.clone();
        out.0
            .as_raw_mut_slice()
            .iter_mut()
            .zip(other.0.as_raw_slice())
            .for_each(|(word, other)| *word &= *other);
        out
    }

    pub fn len(&self) -> usize {
        self.0.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.0.not_any()
    }

    fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter_ones()
    }
}

/// Everything about single rows the counter and the verifier look up on their hot paths.
pub struct RowTables {
    width: usize,
    // valid rows other than the all-black one, ascending
    universe: Vec<Row>,
    middle_rows: Vec<Row>,
    // indexed by row value, over every `width`-bit value
    mirror_of: Vec<Row>,
    reach_of: FxHashMap<Row, Reach>,
    compatible_with_middle: FxHashMap<Row, RowSet>,
    // indexed by mask value
    avoid_one_one: Vec<RowSet>,
    avoid_one_zero: FxHashMap<Row, RowSet>,
    empty: RowSet,
}

impl RowTables {
    /// Build the tables for boards of side `width`.
    ///
    /// Takes time proportional to `2^width` times the number of valid rows.
    pub fn new(width: usize, symmetry: Symmetry) -> Self {
        let sentinel = Row::full(width);
        let mirror_of = (0..=sentinel.0).map(|bits| Row(bits).mirror(width)).collect_vec();

        let universe = (0..sentinel.0)
            .map(Row)
            .filter(|row| row.is_valid(width))
            .filter(|row| symmetry == Symmetry::Rotational || row.is_palindrome(width))
            .collect_vec();
        let len = universe.len();

        let middle_rows = universe.iter()
            .copied()
            .filter(|row| row.is_palindrome(width))
            .collect_vec();

        let reach_of = universe.iter()
            .map(|row| (*row, Reach::of_row(*row, width)))
            .collect();

        // a white middle cell may not sit between two black cells
        let compatible_with_middle = middle_rows.iter()
            .map(|middle| (*middle, RowSet::from_fn(len, |i| {
                let row = universe[i];
                mirror_of[row.0 as usize].0 & !middle.0 & row.0 == 0
            })))
            .collect();

        let avoid_one_one = (0..=sentinel.0)
            .map(|mask| RowSet::from_fn(len, |i| universe[i].0 & mask == 0))
            .collect_vec();

        let avoid_one_zero = universe.iter()
            .map(|above| (*above, RowSet::from_fn(len, |i| above.without(universe[i]).0 == 0)))
            .collect();

        Self {
            width,
            universe,
            middle_rows,
            mirror_of,
            reach_of,
            compatible_with_middle,
            avoid_one_one,
            avoid_one_zero,
            empty: RowSet::from_fn(len, |_| false),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// The all-black row.
    #[inline]
    pub fn sentinel(&self) -> Row {
        Row::full(self.width)
    }

    /// Valid rows other than the sentinel, ascending.
    pub fn universe(&self) -> &[Row] {
        &self.universe
    }

    /// Palindromic rows that may sit in the exact middle of a board. The sentinel is not among
    /// them, since an all-black middle row splits the board in two.
    pub fn middle_rows(&self) -> &[Row] {
        &self.middle_rows
    }

    #[inline]
    pub fn mirror(&self, row: Row) -> Row {
        self.mirror_of[row.0 as usize]
    }

    /// Whether `row` reads the same reflected; true of the sentinel as well.
    #[inline]
    pub fn is_middle(&self, row: Row) -> bool {
        self.mirror(row) == row
    }

    /// Components of `row` on its own; empty for the sentinel.
    pub fn reach_of(&self, row: Row) -> Reach {
        self.reach_of.get(&row).copied().unwrap_or(Reach::EMPTY)
    }

    /// Rows that may be placed directly above the middle row `middle`.
    pub fn compatible_with_middle(&self, middle: Row) -> &RowSet {
        self.compatible_with_middle.get(&middle).unwrap_or(&self.empty)
    }

    /// Rows with no black cell where `mask` is black.
    #[inline]
    pub fn avoid_one_one(&self, mask: Row) -> &RowSet {
        &self.avoid_one_one[mask.0 as usize]
    }

    /// Rows black everywhere `above` is black.
    pub fn avoid_one_zero(&self, above: Row) -> &RowSet {
        self.avoid_one_zero.get(&above).unwrap_or(&self.empty)
    }

    /// Members of `set`, ascending.
    pub fn rows<'a>(&'a self, set: &'a RowSet) -> impl Iterator<Item = Row> + 'a {
        set.indices().map(|i| self.universe[i])
    }
}
