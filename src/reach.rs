//! Connectivity labels for the boundary rows of the two half-boards, and the canonicalizing step
//! that carries them onto a freshly added pair of rows.
//!
//! A [`Reach`] names, for every white cell of a boundary row, the white component that cell
//! belongs to as far as the rows placed so far can tell. The top and bottom half share one id
//! space: equal ids in the two profiles are the same component, joined somewhere nearer the
//! middle of the board.
//!
//! After every step the ids are renumbered in order of first appearance, scanning the new top row
//! left to right and then the new bottom row. Histories that leave the same partition behind
//! therefore produce equal profiles, which is what lets the counter merge them.

use std::fmt::Write;

use petgraph::unionfind::UnionFind;
use unordered_pair::UnorderedPair;

use crate::row::Row;

/// Identifier of a white component within a pair of reach profiles; `0` marks a black cell.
pub type ComponentId = u8;

/// Widest row a [`Reach`] can label.
pub const MAX_WIDTH: usize = 15;

const ID_BITS: usize = 4;
const ID_MASK: u64 = (1 << ID_BITS) - 1;
const ID_SLOTS: usize = 1 << ID_BITS;

/// Component ids of one boundary row, packed four bits per cell.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Reach(u64);

impl Reach {
    /// The profile of an all-black row.
    pub const EMPTY: Self = Self(0);

    /// Build a profile from explicit ids, left to right.
    pub fn from_ids(ids: &[ComponentId]) -> Self {
        let mut reach = Self::EMPTY;
        for (i, id) in ids.iter().enumerate() {
            reach.set(i, *id);
        }
        reach
    }

    /// The profile of a row taken on its own: each maximal white run is a component, numbered
    /// from 1, left to right.
    pub fn of_row(row: Row, width: usize) -> Self {
        let mut reach = Self::EMPTY;
        for (id, run) in (1..).zip(row.white_runs(width)) {
            run.for_each(|i| reach.set(i, id));
        }
        reach
    }

    #[inline]
    pub fn get(self, i: usize) -> ComponentId {
        (self.0 >> (ID_BITS * i) & ID_MASK) as ComponentId
    }

    #[inline]
    fn set(&mut self, i: usize, id: ComponentId) {
        let shift = ID_BITS * i;
        self.0 = self.0 & !(ID_MASK << shift) | u64::from(id) << shift;
    }

    /// Bitmask with bit `id` set for every component present.
    fn id_mask(self) -> u16 {
        (0..ID_SLOTS)
            .map(|i| self.get(i))
            .filter(|id| *id != 0)
            .fold(0, |mask, id| mask | 1 << id)
    }

    pub fn max_component(self) -> ComponentId {
        (0..ID_SLOTS).map(|i| self.get(i)).max().unwrap_or(0)
    }

    /// Whether every white cell here belongs to component 1.
    pub fn is_single(self) -> bool {
        self.max_component() < 2
    }

    pub fn render(self, width: usize) -> String {
        let mut out = String::with_capacity(3 * width);
        for i in 0..width {
            // writing to a String cannot fail
            let _ = write!(out, "{:2} ", self.get(i));
        }
        out
    }
}

/// What one half's old boundary row hands down to the new row next to it.
#[derive(Default)]
struct Propagation {
    // for each white cell of the new row, one old component reaching it, or 0
    inherited: [ComponentId; MAX_WIDTH],
    // old components joined through a white run of the new row
    merges: Vec<UnorderedPair<ComponentId>>,
    // bit `id` set when that old component has a white cell directly beside a white cell of the new row
    touching: u16,
}

/// Flood one half's old boundary row into its new row.
///
/// Inside the two-row strip, a white run of the new row and every old white cell adjacent to it
/// lie in one region, so it is enough to walk the new row run by run.
fn propagate(reach: Reach, old: Row, new: Row, width: usize) -> Propagation {
    let mut propagation = Propagation::default();
    for run in new.white_runs(width) {
        let mut ids = run
            .clone()
            .filter(|i| !old.is_black(*i, width))
            .map(|i| reach.get(i))
            .filter(|id| *id != 0);

        let Some(first) = ids.next() else {
            continue;
        };
        propagation.touching |= 1 << first;
        for other in ids.filter(|id| *id != first) {
            propagation.touching |= 1 << other;
            propagation.merges.push(UnorderedPair(first, other));
        }
        run.for_each(|i| propagation.inherited[i] = first);
    }
    propagation
}

/// Hands out canonical ids in first-discovery order.
struct Relabeler {
    groups: UnionFind<usize>,
    // canonical id per union-find representative, 0 when not yet seen
    assigned: [ComponentId; ID_SLOTS],
    last: ComponentId,
}

impl Relabeler {
    fn fresh(&mut self) -> ComponentId {
        self.last += 1;
        debug_assert!(usize::from(self.last) < ID_SLOTS, "component ids overflow a reach cell");
        self.last
    }

    fn label(&mut self, row: Row, inherited: &[ComponentId; MAX_WIDTH], width: usize) -> Reach {
        let mut reach = Reach::EMPTY;
        for i in (0..width).filter(|i| !row.is_black(*i, width)) {
            let id = match inherited[i] {
                // a run nothing above reaches continues from its left neighbour, or starts afresh
                0 if i > 0 && reach.get(i - 1) != 0 => reach.get(i - 1),
                0 => self.fresh(),
                old => {
                    let group = self.groups.find(usize::from(old));
                    match self.assigned[group] {
                        0 => {
                            let id = self.fresh();
                            self.assigned[group] = id;
                            id
                        }
                        id => id,
                    }
                }
            };
            reach.set(i, id);
        }
        reach
    }
}

/// Carry the reach profiles of both halves across one step.
///
/// `top` and `bottom` label `old_row` and its mirror image; `new_row` is added beyond `old_row`
/// on the top half while `new_row.mirror()` is added on the bottom half. Returns the canonical
/// profiles of the two new rows, or `None` when some old component touches neither new row: that
/// component is sealed off and the board can no longer be connected.
///
/// Adding the all-black row always succeeds and leaves both profiles empty.
pub fn advance(top: Reach, bottom: Reach, old_row: Row, new_row: Row, width: usize) -> Option<(Reach, Reach)> {
    if new_row == Row::full(width) {
        return Some((Reach::EMPTY, Reach::EMPTY));
    }

    let new_mirror = new_row.mirror(width);
    let upper = propagate(top, old_row, new_row, width);
    let lower = propagate(bottom, old_row.mirror(width), new_mirror, width);

    let live = top.id_mask() | bottom.id_mask();
    if live & !(upper.touching | lower.touching) != 0 {
        return None;
    }

    let mut groups = UnionFind::new(ID_SLOTS);
    for UnorderedPair(a, b) in upper.merges.iter().chain(&lower.merges) {
        groups.union(usize::from(*a), usize::from(*b));
    }

    let mut relabeler = Relabeler {
        groups,
        assigned: [0; ID_SLOTS],
        last: 0,
    };
    let new_top = relabeler.label(new_row, &upper.inherited, width);
    let new_bottom = relabeler.label(new_mirror, &lower.inherited, width);
    Some((new_top, new_bottom))
}
