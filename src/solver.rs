//! Depth-first packing search over a board.
//!
//! The search walks the grid in reading order (row-major), one linear cell
//! index per decision point. At each free cell it first tries to anchor a
//! placement there (shapes in ascending id order, variations in catalog
//! order), then tries leaving the cell permanently unfilled; the first
//! branch that reaches a full assignment wins. Both branches are gated on
//! area sufficiency, which prunes but never proves feasibility (a grid can
//! have enough free area and still admit no geometric fit).
//!
//! The search uses an explicit frame stack instead of recursion: the worst
//! case needs one frame per grid cell, which would overflow the call stack
//! on large grids.

use crate::board::Board;
use crate::shape::{Catalog, Cell};

/// A backtracking decision point: a free cell where the search either
/// anchors a placement or leaves the cell unfilled.
struct Frame {
    /// Linear index of this frame's cell.
    idx: usize,
    /// The (row, col) cell placements tried here are anchored at.
    anchor: Cell,
    /// Shape ids still required when this frame was entered, ascending.
    /// Empty when area pruning ruled out the placement branch.
    candidates: Vec<usize>,
    /// Cursor into `candidates`.
    shape_cursor: usize,
    /// Cursor into the current candidate's variation list.
    variation_cursor: usize,
    /// Whether leaving this cell unfilled still leaves enough free area.
    may_skip: bool,
    /// Whether the skip branch has already been taken.
    skipped: bool,
    /// Undo token for the placement currently active below this frame.
    active: Option<Placement>,
}

/// A placement made on the board, held for exact reversal.
struct Placement {
    shape_id: usize,
    cells: Vec<Cell>,
}

enum Entered {
    /// Every required placement is already made.
    Solved,
    /// Reached the end of the grid with placements still required.
    Exhausted,
    /// Stopped at a free cell with work left.
    Open(Frame),
}

fn cell_at(idx: usize, width: usize) -> Cell {
    ((idx / width) as i32, (idx % width) as i32)
}

/// Evaluates the terminal conditions at `idx` and, if none hold, builds the
/// decision frame for the next free cell at or after `idx`.
fn enter(mut idx: usize, board: &Board, catalog: &Catalog) -> Entered {
    if board.all_placed() {
        return Entered::Solved;
    }

    let total = board.total_area();
    let width = board.width();
    // cells ahead of idx can be pre-occupied by a shape anchored earlier
    // that extends forward; they are not decision points
    while idx < total && board.is_occupied(cell_at(idx, width)) {
        idx += 1;
    }
    if idx == total {
        return Entered::Exhausted;
    }

    let needed = board.remaining_required_area(catalog);
    let free = board.free_area();
    let candidates = if free >= needed {
        board.remaining_ids().collect()
    } else {
        Vec::new()
    };

    Entered::Open(Frame {
        idx,
        anchor: cell_at(idx, width),
        candidates,
        shape_cursor: 0,
        variation_cursor: 0,
        may_skip: free - 1 >= needed,
        skipped: false,
        active: None,
    })
}

/// Advances the frame's cursors to the next variation that fits at the
/// frame's anchor and places it on the board.
fn next_placement(frame: &mut Frame, board: &mut Board, catalog: &Catalog) -> Option<Placement> {
    while frame.shape_cursor < frame.candidates.len() {
        let shape_id = frame.candidates[frame.shape_cursor];
        let variations = match catalog.get(shape_id) {
            Some(shape) => shape.variations(),
            None => &[],
        };

        while frame.variation_cursor < variations.len() {
            let variation = &variations[frame.variation_cursor];
            frame.variation_cursor += 1;
            if let Some(cells) = board.try_place(variation, frame.anchor) {
                return Some(Placement { shape_id, cells });
            }
        }

        frame.shape_cursor += 1;
        frame.variation_cursor = 0;
    }
    None
}

/// Searches for a full assignment of the board's required placements.
///
/// Returns `true` as soon as one complete assignment is found and `false`
/// once every branch is exhausted. The fixed branch order makes the search
/// deterministic, but only the verdict is guaranteed stable: a different
/// branch order could find a different, equally valid assignment.
///
/// On a `false` verdict the board is restored to its initial state; on
/// `true` it is left holding the found assignment's occupancy.
pub fn solve(board: &mut Board, catalog: &Catalog) -> bool {
    let needed = board.remaining_required_area(catalog);
    log::debug!(
        "packing {}x{} grid, required area {} of {}",
        board.width(),
        board.height(),
        needed,
        board.total_area()
    );
    if needed > board.total_area() {
        return false;
    }

    let mut stack: Vec<Frame> = Vec::new();
    // Some(idx) descends into cell idx; None resumes the top frame.
    let mut descend = Some(0);

    loop {
        if let Some(idx) = descend.take() {
            match enter(idx, board, catalog) {
                Entered::Solved => return true,
                Entered::Exhausted => {}
                Entered::Open(frame) => stack.push(frame),
            }
        }

        let Some(frame) = stack.last_mut() else {
            return false;
        };

        // Control returning to a frame means the branch below it failed:
        // take back its placement before trying the next candidate.
        if let Some(placement) = frame.active.take() {
            board.undo(&placement.cells);
            board.restore(placement.shape_id);
        }

        if let Some(placement) = next_placement(frame, board, catalog) {
            board.decrement(placement.shape_id);
            frame.active = Some(placement);
            descend = Some(frame.idx + 1);
            continue;
        }

        if frame.may_skip && !frame.skipped {
            frame.skipped = true;
            descend = Some(frame.idx + 1);
            continue;
        }

        stack.pop();
    }
}
