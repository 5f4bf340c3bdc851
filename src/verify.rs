//! Exhaustive enumeration of half-boards, for checking the counter on small sizes.
//!
//! Every half-board is built row by row from the middle outwards, with the same local pruning the
//! counter uses, then assembled into a full [`Board`] and flood-filled.

use std::sync::atomic::{AtomicU64, Ordering};

use itertools::Itertools;
use num_bigint::BigUint;
use rayon::ThreadPool;

use crate::board::Board;
use crate::census::Census;
use crate::config::Verbosity;
use crate::row::Row;

/// Results of an exhaustive search.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Tally {
    /// Boards enumerated whose white cells form one region, before any other check.
    pub connected: u64,
    /// Boards that also satisfy every rule the counter applies; equal to its total.
    pub accepted: u64,
}

impl Tally {
    /// Whether the search found exactly `total` boards.
    pub fn agrees_with(&self, total: &BigUint) -> bool {
        BigUint::from(self.accepted) == *total
    }
}

pub(crate) struct Verifier<'a> {
    census: &'a Census,
    pool: ThreadPool,
}

impl<'a> Verifier<'a> {
    pub(crate) fn new(census: &'a Census, pool: ThreadPool) -> Self {
        Self { census, pool }
    }

    pub(crate) fn run(&self) -> Tally {
        let tables = &self.census.tables;
        let threads = self.census.settings.threads;

        let units = tables.middle_rows()
            .iter()
            .flat_map(|&middle| tables.rows(tables.compatible_with_middle(middle)).map(move |second| (middle, second)))
            .collect_vec();
        let connected = AtomicU64::new(0);
        let accepted = AtomicU64::new(0);

        self.pool.scope(|scope| {
            for worker in 0..threads {
                let (units, connected, accepted) = (&units, &connected, &accepted);
                scope.spawn(move |_| {
                    let mut search = Search::open(self.census, connected, accepted);
                    for &(middle, second) in units.iter().skip(worker).step_by(threads) {
                        search.start(middle, second);
                    }
                    if self.census.settings.reports(Verbosity::Rounds) {
                        eprintln!("[Verifier] worker {} done", worker);
                    }
                });
            }
        });

        Tally {
            connected: connected.into_inner(),
            accepted: accepted.into_inner(),
        }
    }
}

/// One worker's depth-first search. `half[i]` is row `i` of the board, counting from the top edge;
/// the last entry is the middle row.
struct Search<'a> {
    census: &'a Census,
    half: Vec<Row>,
    board: Board,
    connected: &'a AtomicU64,
    accepted: &'a AtomicU64,
}

impl<'a> Search<'a> {
    fn open(census: &'a Census, connected: &'a AtomicU64, accepted: &'a AtomicU64) -> Self {
        let width = census.settings.width();
        Self {
            census,
            half: vec![Row::default(); census.settings.half()],
            board: Board::new(width),
            connected,
            accepted,
        }
    }

    fn start(&mut self, middle: Row, second: Row) {
        let half = self.half.len();
        self.half[half - 1] = middle;
        self.half[half - 2] = second;
        self.descend(half - 2);
    }

    /// Row `i` of the whole board, for any `i` at or beyond the first `filled` row.
    fn row(&self, i: usize) -> Row {
        let half = self.half.len();
        if i < half {
            self.half[i]
        } else {
            let size = self.census.settings.width();
            self.census.tables.mirror(self.half[size - 1 - i])
        }
    }

    /// Fill rows above `filled`, the topmost row placed so far.
    fn descend(&mut self, filled: usize) {
        if filled == 0 {
            self.evaluate();
            return;
        }

        let i = filled - 1;
        for row in self.candidates(i) {
            self.half[i] = row;
            self.descend(i);
        }
    }

    /// Rows that may be placed at index `i`, given the three rows below it.
    fn candidates(&self, i: usize) -> Vec<Row> {
        let tables = &self.census.tables;
        let sentinel = tables.sentinel();
        let (a, b, c) = (self.row(i + 3), self.row(i + 2), self.row(i + 1));

        if c == sentinel {
            return vec![sentinel];
        }

        // columns whose white run above a black cell is still too short
        let pending = Row(a.without(c).0 | b.without(c).0);
        let allowed = tables.avoid_one_one(pending);
        let mut rows = if i < 2 {
            tables.rows(&allowed.and(tables.avoid_one_zero(c))).collect_vec()
        } else {
            tables.rows(allowed).collect_vec()
        };

        if pending.0 == 0 {
            rows.push(sentinel);
        }
        rows
    }

    fn evaluate(&mut self) {
        let settings = &self.census.settings;
        let width = settings.width();

        self.board.fill(&self.half);
        if !self.board.is_connected() {
            return;
        }
        self.connected.fetch_add(1, Ordering::Relaxed);

        let open = self.half[0] != self.census.tables.sentinel();
        let has_edge = !settings.require_edge || self.half.iter().any(|row| row.has_edge(width));
        if open && has_edge && self.board.columns_valid() {
            self.accepted.fetch_add(1, Ordering::Relaxed);
            if settings.reports(Verbosity::Boards) {
                eprintln!("[Verifier] board\n{}", self.board);
            }
        }
    }
}
