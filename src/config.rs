use std::num::NonZero;

use strum::VariantArray;

use crate::location::Dimension;

/// Board size used when none is given.
pub const DEFAULT_SIZE: usize = 15;

/// Which rows may appear on a board.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, VariantArray, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Symmetry {
    /// Boards symmetric under a half turn; any valid row may appear.
    #[default]
    Rotational,
    /// Boards that are also left-right symmetric; only palindromic rows may appear.
    Full,
}

/// How much progress is reported on standard error.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd, VariantArray, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Verbosity {
    /// Nothing.
    #[default]
    Quiet,
    /// Table sizes, state counts after every step, verifier progress.
    Rounds,
    /// Everything above, plus every counted board.
    Boards,
}

/// Everything a [`Census`](crate::Census) needs to know before it starts.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Settings {
    /// Side length of the board; odd.
    pub size: Dimension,
    /// Worker threads used by both the counter and the verifier.
    pub threads: usize,
    pub symmetry: Symmetry,
    /// Only count boards with a white cell on the left or right edge.
    pub require_edge: bool,
    pub verbosity: Verbosity,
    /// Carry a rendering of each board through the counter. States stop merging, so this is only
    /// practical for small boards.
    pub trace_boards: bool,
}

impl Settings {
    pub(crate) fn with_size(size: Dimension) -> Self {
        Self {
            size,
            threads: std::thread::available_parallelism().map_or(1, NonZero::get),
            symmetry: Symmetry::default(),
            require_edge: true,
            verbosity: Verbosity::default(),
            trace_boards: false,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.size.get()
    }

    /// Rows from the top edge to the middle row, inclusive.
    #[inline]
    pub fn half(&self) -> usize {
        (self.size.get() + 1) / 2
    }

    pub(crate) fn reports(&self, level: Verbosity) -> bool {
        self.verbosity >= level
    }
}
