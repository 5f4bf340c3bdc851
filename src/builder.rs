use std::fmt::{Display, Formatter};
use std::num::NonZero;

use crate::census::Census;
use crate::config::{Settings, Symmetry, Verbosity, DEFAULT_SIZE};
use crate::location::Dimension;
use crate::reach::MAX_WIDTH;

/// Smallest board with a middle row and a row on either side of it.
pub const MIN_SIZE: usize = 3;
/// Largest board the packed reach profiles can describe.
pub const MAX_SIZE: usize = MAX_WIDTH;

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BuilderInvalidReason {
    /// The board has no middle row.
    EvenSize,
    /// The board is smaller than [`MIN_SIZE`] or larger than [`MAX_SIZE`].
    SizeOutOfRange,
    /// Zero worker threads were requested.
    NoThreads,
}

impl Display for BuilderInvalidReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EvenSize => write!(f, "board size must be odd"),
            Self::SizeOutOfRange => write!(f, "board size must be between {} and {}", MIN_SIZE, MAX_SIZE),
            Self::NoThreads => write!(f, "at least one worker thread is required"),
        }
    }
}

impl std::error::Error for BuilderInvalidReason {}

/// Collects [`Settings`] and turns them into a [`Census`].
///
/// Setters mutate the builder and chain; the builder can be [`Clone`]d to save its state.
/// Once an invalid value has been given, further setters do nothing.
#[derive(Clone)]
pub struct CensusBuilder {
    settings: Settings,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl Default for CensusBuilder {
    fn default() -> Self {
        Self::with_size(NonZero::new(DEFAULT_SIZE).unwrap())
    }
}

impl CensusBuilder {
    /// Start from default settings for boards of side `size`.
    pub fn with_size(size: Dimension) -> Self {
        let mut invalid_reasons = Vec::new();
        if !(MIN_SIZE..=MAX_SIZE).contains(&size.get()) {
            invalid_reasons.push(BuilderInvalidReason::SizeOutOfRange);
        }
        if size.get() % 2 == 0 {
            invalid_reasons.push(BuilderInvalidReason::EvenSize);
        }

        Self {
            settings: Settings::with_size(size),
            invalid_reasons,
        }
    }

    /// Use `threads` workers; defaults to the available parallelism.
    ///
    /// May cause the builder to enter a [`NoThreads`](BuilderInvalidReason::NoThreads) invalid state.
    pub fn threads(&mut self, threads: usize) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if threads == 0 {
            self.invalid_reasons.push(BuilderInvalidReason::NoThreads);
            return self;
        }

        self.settings.threads = threads;
        self
    }

    pub fn symmetry(&mut self, symmetry: Symmetry) -> &mut Self {
        if self.invalid_reasons.is_empty() {
            self.settings.symmetry = symmetry;
        }
        self
    }

    /// Whether counted boards must have a white cell on the left or right edge. On by default.
    pub fn require_edge(&mut self, require_edge: bool) -> &mut Self {
        if self.invalid_reasons.is_empty() {
            self.settings.require_edge = require_edge;
        }
        self
    }

    pub fn verbosity(&mut self, verbosity: Verbosity) -> &mut Self {
        if self.invalid_reasons.is_empty() {
            self.settings.verbosity = verbosity;
        }
        self
    }

    /// Carry board renderings through the counter; see [`Settings::trace_boards`].
    pub fn trace_boards(&mut self, trace_boards: bool) -> &mut Self {
        if self.invalid_reasons.is_empty() {
            self.settings.trace_boards = trace_boards;
        }
        self
    }

    /// Check the validity of this builder.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Build the row tables and return a [`Census`] ready to count.
    /// If the builder is invalid for any reason, a reference to a [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<Census, &Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(&self.invalid_reasons);
        }

        Ok(Census::new(self.settings))
    }
}
