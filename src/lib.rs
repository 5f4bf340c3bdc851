#![warn(missing_docs)]

//! # `crossgrid`
//!
//! Counts the square crossword grids of odd side `N` that American-style puzzles allow: the
//! pattern of black cells looks the same after a half turn, every white run across or down is at
//! least three cells long, and the white cells form a single 4-connected region.
//! Begin by configuring a [`CensusBuilder`], build a [`Census`], then call
//! [`count()`](crate::Census::count) for the total or [`verify()`](crate::Census::verify) to
//! enumerate the same grids one by one.
//!
//! Besides the half-turn symmetry every grid has, [`Symmetry::Full`] restricts the count to grids
//! that are also left-right symmetric, and [`require_edge`](CensusBuilder::require_edge) (on by
//! default) rejects grids whose leftmost and rightmost columns are entirely black.
//!
//! # Internals
//! A rotationally symmetric grid is fixed by its rows from the top edge down to the middle row.
//! The counter places these from the middle outwards, so that each step adds one row to the top
//! half and its mirror image to the bottom half, and keeps only what the remaining rows can see:
//!
//! 1. the outermost row, which decides which rows may follow it;
//! 2. a [`Reach`] profile for each boundary row, telling which of its white cells are already joined
//! through the rows placed so far;
//! 3. a [`Distance`] vector telling how far each column is from its most recent black cell, so that
//! short vertical runs are caught as soon as they close.
//!
//! Partial grids with equal summaries have the same completions. Each step maps every summary to its
//! successors on a pool of worker threads and adds up the multiplicities.
//! A grid ends early by repeating an all-black row out to the edge.
//!
//! Both counters share [`RowTables`], built once per size: the valid rows and, for any mask,
//! the rows that avoid it.

pub use board::Board;
pub use builder::CensusBuilder;
pub use census::{Census, CountFailure};
pub use config::{Settings, Symmetry, Verbosity};
pub use distance::Distance;
pub use location::Location;
pub use reach::Reach;
pub use row::Row;
pub use tables::{RowSet, RowTables};
pub use verify::Tally;

pub mod board;
pub mod builder;
pub mod census;
pub mod config;
pub mod distance;
pub mod dp;
pub(crate) mod location;
pub mod reach;
pub mod row;
pub(crate) mod shape;
pub mod tables;
mod tests;
pub(crate) mod verify;
