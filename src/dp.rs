//! The row-by-row counter.
//!
//! Boards are grown from the middle row outwards, one row per step on the top half and its
//! mirror image on the bottom half. Every partial board is summarised by a [`DpState`]; partial
//! boards with equal states have exactly the same completions, so a [`Generation`] only keeps a
//! multiplicity per state.

use std::sync::{Mutex, PoisonError};

use itertools::Itertools;
use num_bigint::BigUint;
use num_traits::Zero;
use rayon::ThreadPool;
use rustc_hash::FxHashMap;

use crate::census::Census;
use crate::config::Verbosity;
use crate::distance::Distance;
use crate::reach::{self, Reach};
use crate::row::Row;

/// Everything about a partial board that its completions depend on.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DpState {
    /// Outermost row placed so far on the top half.
    pub last_row: Row,
    pub top: Reach,
    /// Components of `last_row`'s mirror image, the outermost row of the bottom half.
    pub bottom: Reach,
    pub distance: Distance,
    /// Some row touches the left or right edge with a white cell.
    pub has_edge: bool,
    /// Every row so far is a palindrome, so the partial board is its own mirror image.
    pub is_mirror: bool,
    /// Rendering of the partial board, when tracing.
    pub board: Option<String>,
}

impl DpState {
    /// Whether all white cells on both boundary rows belong to one component.
    pub fn is_connected(&self) -> bool {
        self.top.is_single() && self.bottom.is_single()
    }
}

/// Multiplicity of every state after some number of steps.
pub type Generation = FxHashMap<DpState, BigUint>;

/// Drives the counter step by step.
pub struct Driver<'a> {
    census: &'a Census,
    pool: ThreadPool,
    generation: Generation,
    // next step to take
    step: usize,
}

impl<'a> Driver<'a> {
    pub(crate) fn new(census: &'a Census, pool: ThreadPool) -> Self {
        let generation = Self::seed(census);
        if census.settings.reports(Verbosity::Rounds) {
            eprintln!("[Census] Seeded {} states", generation.len());
        }

        Self {
            census,
            pool,
            generation,
            step: 2,
        }
    }

    /// Every middle row with every row that may go directly above it.
    ///
    /// The middle row is a palindrome, so a second row and its mirror image give mirror-image
    /// boards; only the smaller of the two is kept.
    fn seed(census: &Census) -> Generation {
        let (settings, tables) = (&census.settings, &census.tables);
        let width = settings.width();
        let mut generation = Generation::default();

        for &middle in tables.middle_rows() {
            let middle_reach = tables.reach_of(middle);
            for second in tables.rows(tables.compatible_with_middle(middle)) {
                let below = tables.mirror(second);
                if second > below {
                    continue;
                }

                let Some((top, bottom)) = reach::advance(middle_reach, middle_reach, middle, second, width) else {
                    continue;
                };

                let state = DpState {
                    last_row: second,
                    top,
                    bottom,
                    distance: Distance::init(below, middle, second, width),
                    has_edge: !settings.require_edge || middle.has_edge(width) || second.has_edge(width),
                    is_mirror: tables.is_middle(second),
                    board: settings.trace_boards
                        .then(|| [second, middle, below].iter().map(|row| row.render(width)).join("\n")),
                };
                *generation.entry(state).or_default() += 1u32;
            }
        }

        generation
    }

    pub fn generation(&self) -> &Generation {
        &self.generation
    }

    /// Index of the next step; steps run from 2 up to the number of rows in a half-board.
    pub fn step(&self) -> usize {
        self.step
    }

    pub fn is_finished(&self) -> bool {
        self.step >= self.census.settings.half()
    }

    /// Rows that may be placed beyond `state.last_row` at step `step`.
    fn next_rows(&self, state: &DpState, step: usize) -> Vec<Row> {
        let (settings, tables) = (&self.census.settings, &self.census.tables);
        let width = settings.width();
        let sentinel = tables.sentinel();

        // once the board has been closed off, it stays closed
        if state.last_row == sentinel {
            return vec![sentinel];
        }

        let allowed = tables.avoid_one_one(state.distance.pending_mask(width));
        // the last two rows may not open a column below a black cell: the run would be cut short by the edge
        let mut rows = if step + 3 > settings.half() {
            tables.rows(&allowed.and(tables.avoid_one_zero(state.last_row))).collect_vec()
        } else {
            tables.rows(allowed).collect_vec()
        };

        if state.is_connected() && state.distance.is_terminal(width) {
            rows.push(sentinel);
        }
        rows
    }

    /// The state after placing `row`, or `None` if the placement is redundant or disconnects the board.
    fn transition(&self, state: &DpState, row: Row) -> Option<DpState> {
        let (settings, tables) = (&self.census.settings, &self.census.tables);
        let width = settings.width();
        let mirror = tables.mirror(row);

        // a symmetric prefix extended by `row` or by its mirror gives mirror-image boards
        if state.is_mirror && row > mirror {
            return None;
        }

        let (top, bottom) = reach::advance(state.top, state.bottom, state.last_row, row, width)?;
        Some(DpState {
            last_row: row,
            top,
            bottom,
            distance: state.distance.apply(row, width),
            has_edge: !settings.require_edge || state.has_edge || row.has_edge(width),
            is_mirror: state.is_mirror && tables.is_middle(row),
            board: state.board.as_ref()
                .map(|board| format!("{}\n{}\n{}", row.render(width), board, mirror.render(width))),
        })
    }

    /// Take one step, replacing the current generation with the next. Returns `false`, doing
    /// nothing, once every row has been placed.
    ///
    /// States are dealt round-robin to the worker threads. Each worker folds its transitions into
    /// a private map and merges that into the shared next generation under a lock; the step ends
    /// when every worker has finished.
    pub fn advance(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }

        let step = self.step;
        let threads = self.census.settings.threads;
        let next = Mutex::new(Generation::default());
        {
            let driver: &Self = self;
            let states = driver.generation.iter().collect_vec();

            driver.pool.scope(|scope| {
                for worker in 0..threads {
                    let (states, next) = (&states, &next);
                    scope.spawn(move |_| {
                        let mut local = Generation::default();
                        for (state, count) in states.iter().skip(worker).step_by(threads) {
                            for row in driver.next_rows(state, step) {
                                if let Some(next_state) = driver.transition(state, row) {
                                    *local.entry(next_state).or_default() += *count;
                                }
                            }
                        }

                        let mut shared = next.lock().unwrap_or_else(PoisonError::into_inner);
                        for (state, count) in local {
                            *shared.entry(state).or_default() += count;
                        }
                    });
                }
            });
        }

        self.generation = next.into_inner().unwrap_or_else(PoisonError::into_inner);
        self.step += 1;
        if self.census.settings.reports(Verbosity::Rounds) {
            eprintln!("[Census] Done with step {}, {} states", step, self.generation.len());
        }
        true
    }

    /// Take every remaining step.
    pub fn run(&mut self) {
        while self.advance() {}
    }

    /// States of the current generation that describe finished, countable boards.
    pub fn counted(&self) -> impl Iterator<Item = (&DpState, &BigUint)> {
        let width = self.census.settings.width();
        let sentinel = self.census.tables.sentinel();
        self.generation.iter().filter(move |(state, _)| {
            state.is_connected()
                && state.distance.is_terminal(width)
                && state.has_edge
                && state.last_row != sentinel
        })
    }

    /// Number of boards the current generation describes, counting the mirror image of every
    /// asymmetric board.
    pub fn total(&self) -> BigUint {
        self.counted().fold(BigUint::zero(), |total, (state, count)| {
            if state.is_mirror { total + count } else { total + count * 2u32 }
        })
    }
}
