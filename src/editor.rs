/*
editor.rs

Copyright 2025 Hervé Quatremain

This file is part of Pairlink.

Pairlink is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Pairlink is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Pairlink. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Draw paths on the grid.
//!
//! The player draws one path at a time by dragging from a cell.
//! [`PathEditor`] is the state machine behind the drag: [`PathEditor::start`] when the pointer
//! goes down, [`PathEditor::move_to`] for each cell the pointer enters, and [`PathEditor::end`]
//! when the pointer goes up.
//! The host passes the cells without any filtering; the editor ignores the moves that do not go
//! to a neighbor of the last cell.

use log::debug;
use std::fmt;

use crate::grid::{Cell, Grid, Pos};
use crate::label::Label;

/// Drag state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DragState<K> {
    Idle,
    Dragging {
        /// Key of the label being drawn.
        active: K,

        /// Cell where the drag started.
        start: Pos,

        /// Last cell added to the path.
        last: Pos,
    },
}

/// Result of [`PathEditor::start`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DragStart {
    /// The cell has no label and no path, the editor stays idle.
    Ignored,

    /// A fresh path is started from an endpoint; the previous path of the label was cleared.
    FromEndpoint,

    /// The drag continues an existing path from one of its cells.
    FromPath,
}

/// Result of [`PathEditor::move_to`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DragMove {
    /// No drag in progress, or the cell is not a neighbor of the last cell.
    Ignored,

    /// The cell is added to the path.
    Accepted,

    /// The cell holds the path of another label. The drag stays on its last cell.
    Rejected,

    /// The cell is an endpoint of another label. The path is cleared and the drag cancelled.
    Illegal,
}

/// Result of [`PathEditor::end`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DragEnd {
    /// No drag in progress.
    Ignored,

    /// The drag did not join the two endpoints of its label; the path is cleared.
    Discarded,

    /// The path joins the two endpoints of its label and is kept.
    Kept,

    /// The path is kept and all the pairs of the puzzle are connected.
    /// Only [`crate::puzzle::Puzzle::end`] returns this value.
    Solved,
}

/// Drag state machine.
#[derive(Debug, Clone)]
pub struct PathEditor<K> {
    state: DragState<K>,
}

impl<K: Copy + Eq + fmt::Debug> Default for PathEditor<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + fmt::Debug> PathEditor<K> {
    /// Create an idle [`PathEditor`] object.
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
        }
    }

    /// Return the drag state.
    pub fn state(&self) -> DragState<K> {
        self.state
    }

    /// Return the key of the label being drawn.
    pub fn active(&self) -> Option<K> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging { active, .. } => Some(active),
        }
    }

    /// Start a drag from the given cell.
    ///
    /// Starting from an endpoint clears the previous path of its label first.
    /// Starting from a path cell continues that path.
    /// A drag still in progress is abandoned and its path cleared.
    pub fn start<L: Label<Key = K>>(&mut self, grid: &mut Grid<L>, pos: Pos) -> DragStart {
        self.cancel(grid);

        let Some(cell) = grid.cell(pos) else {
            return DragStart::Ignored;
        };
        let (active, outcome) = match (cell.endpoint_key(), cell.path) {
            (Some(key), _) => (key, DragStart::FromEndpoint),
            (None, Some(key)) => (key, DragStart::FromPath),
            (None, None) => return DragStart::Ignored,
        };

        if outcome == DragStart::FromEndpoint {
            grid.clear_path(active);
            grid.mark(pos, active);
        }
        debug!("Drag {active:?} started at {pos}");
        self.state = DragState::Dragging {
            active,
            start: pos,
            last: pos,
        };
        outcome
    }

    /// Extend the drag to the given cell.
    pub fn move_to<L: Label<Key = K>>(&mut self, grid: &mut Grid<L>, pos: Pos) -> DragMove {
        let DragState::Dragging {
            active,
            start,
            last,
        } = self.state
        else {
            return DragMove::Ignored;
        };
        if !last.is_adjacent(pos) {
            return DragMove::Ignored;
        }
        let Some(cell) = grid.cell(pos) else {
            return DragMove::Ignored;
        };

        if cell.endpoint_key().is_some_and(|key| key != active) {
            debug!("Drag {active:?} hit a foreign endpoint at {pos}: cancelled");
            grid.clear_path(active);
            self.state = DragState::Idle;
            return DragMove::Illegal;
        }
        if cell.path.is_some_and(|key| key != active) {
            return DragMove::Rejected;
        }

        grid.link(last, pos, active);
        self.state = DragState::Dragging {
            active,
            start,
            last: pos,
        };
        DragMove::Accepted
    }

    /// End the drag.
    ///
    /// The path is kept only if the drag started and ended on the two endpoints of its label.
    pub fn end<L: Label<Key = K>>(&mut self, grid: &mut Grid<L>) -> DragEnd {
        let DragState::Dragging {
            active,
            start,
            last,
        } = self.state
        else {
            return DragEnd::Ignored;
        };
        self.state = DragState::Idle;

        let is_own_endpoint = |cell: Option<&Cell<L>>| {
            cell.and_then(|c| c.endpoint_key()) == Some(active)
        };
        if start != last && is_own_endpoint(grid.cell(start)) && is_own_endpoint(grid.cell(last))
        {
            debug!("Drag {active:?} ended at {last}: path kept");
            DragEnd::Kept
        } else {
            debug!("Drag {active:?} ended at {last}: path discarded");
            grid.clear_path(active);
            DragEnd::Discarded
        }
    }

    /// Abandon the drag in progress, if any, and clear its path.
    pub fn cancel<L: Label<Key = K>>(&mut self, grid: &mut Grid<L>) {
        if let DragState::Dragging { active, .. } = self.state {
            grid.clear_path(active);
            self.state = DragState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Links;
    use crate::label::Color;

    const A: Color = Color::Red;
    const B: Color = Color::Blue;

    /// 3x3 grid with A at (0,0)/(2,2) and B at (0,2)/(2,0).
    fn grid() -> Grid<Color> {
        let mut grid = Grid::new(3);
        grid.set_endpoint(Pos::new(0, 0), A);
        grid.set_endpoint(Pos::new(2, 2), A);
        grid.set_endpoint(Pos::new(0, 2), B);
        grid.set_endpoint(Pos::new(2, 0), B);
        grid
    }

    fn drag(editor: &mut PathEditor<Color>, grid: &mut Grid<Color>, cells: &[(usize, usize)]) {
        let (row, col) = cells[0];
        editor.start(grid, Pos::new(row, col));
        for (row, col) in &cells[1..] {
            editor.move_to(grid, Pos::new(*row, *col));
        }
    }

    #[test]
    fn start_on_an_empty_cell_is_a_no_op() {
        let mut grid = grid();
        let mut editor = PathEditor::new();

        assert_eq!(editor.start(&mut grid, Pos::new(1, 1)), DragStart::Ignored);
        assert_eq!(editor.state(), DragState::Idle);
        assert_eq!(editor.start(&mut grid, Pos::new(5, 5)), DragStart::Ignored);
        assert_eq!(editor.move_to(&mut grid, Pos::new(1, 2)), DragMove::Ignored);
        assert_eq!(editor.end(&mut grid), DragEnd::Ignored);
        assert_eq!(grid, self::grid());
    }

    #[test]
    fn accepted_moves_set_reciprocal_flags() {
        let mut grid = grid();
        let mut editor = PathEditor::new();

        assert_eq!(editor.start(&mut grid, Pos::new(2, 2)), DragStart::FromEndpoint);
        assert_eq!(editor.move_to(&mut grid, Pos::new(1, 2)), DragMove::Accepted);

        let source = grid.cell(Pos::new(2, 2)).expect("on grid");
        let destination = grid.cell(Pos::new(1, 2)).expect("on grid");
        assert_eq!(
            source.links,
            Links {
                n: true,
                ..Links::default()
            }
        );
        assert_eq!(
            destination.links,
            Links {
                s: true,
                ..Links::default()
            }
        );
        assert_eq!(destination.path, Some(A));
        assert_eq!(
            editor.state(),
            DragState::Dragging {
                active: A,
                start: Pos::new(2, 2),
                last: Pos::new(1, 2)
            }
        );
    }

    #[test]
    fn non_adjacent_moves_are_ignored() {
        let mut grid = grid();
        let mut editor = PathEditor::new();

        editor.start(&mut grid, Pos::new(0, 0));
        assert_eq!(editor.move_to(&mut grid, Pos::new(1, 1)), DragMove::Ignored);
        assert_eq!(editor.move_to(&mut grid, Pos::new(0, 0)), DragMove::Ignored);
        assert_eq!(grid.path_cells(A), vec![Pos::new(0, 0)]);
    }

    #[test]
    fn connecting_both_endpoints_keeps_the_path() {
        let mut grid = grid();
        let mut editor = PathEditor::new();

        drag(&mut editor, &mut grid, &[(0, 0), (1, 0), (1, 1), (1, 2), (2, 2)]);
        assert_eq!(editor.end(&mut grid), DragEnd::Kept);
        assert_eq!(grid.path_cells(A).len(), 5);
        assert_eq!(editor.state(), DragState::Idle);
    }

    #[test]
    fn crossing_another_path_is_rejected() {
        let mut grid = grid();
        let mut editor = PathEditor::new();
        drag(&mut editor, &mut grid, &[(0, 0), (1, 0), (1, 1), (1, 2), (2, 2)]);
        editor.end(&mut grid);
        let before = grid.clone();

        assert_eq!(editor.start(&mut grid, Pos::new(0, 2)), DragStart::FromEndpoint);
        assert_eq!(editor.move_to(&mut grid, Pos::new(1, 2)), DragMove::Rejected);
        assert_eq!(
            editor.state(),
            DragState::Dragging {
                active: B,
                start: Pos::new(0, 2),
                last: Pos::new(0, 2)
            }
        );
        assert_eq!(grid.cell(Pos::new(1, 2)).and_then(|c| c.path), Some(A));

        // The drag is still alive at its last cell
        assert_eq!(editor.move_to(&mut grid, Pos::new(0, 1)), DragMove::Accepted);
        editor.cancel(&mut grid);
        assert_eq!(grid, before);
    }

    #[test]
    fn foreign_endpoint_is_illegal() {
        let mut grid = grid();
        let mut editor = PathEditor::new();

        editor.start(&mut grid, Pos::new(0, 0));
        assert_eq!(editor.move_to(&mut grid, Pos::new(0, 1)), DragMove::Accepted);
        assert_eq!(editor.move_to(&mut grid, Pos::new(0, 2)), DragMove::Illegal);
        assert_eq!(editor.state(), DragState::Idle);
        assert!(grid.path_cells(A).is_empty());
        assert_eq!(grid, self::grid());

        // The cancelled drag does not react anymore
        assert_eq!(editor.move_to(&mut grid, Pos::new(1, 2)), DragMove::Ignored);
        assert_eq!(editor.end(&mut grid), DragEnd::Ignored);
    }

    #[test]
    fn illegal_move_leaves_other_cells_unchanged() {
        let mut grid = grid();
        let mut editor = PathEditor::new();

        // Kept B path along the left column
        drag(&mut editor, &mut grid, &[(0, 2), (0, 1), (1, 1), (1, 0), (2, 0)]);
        assert_eq!(editor.end(&mut grid), DragEnd::Kept);
        let before = grid.clone();

        editor.start(&mut grid, Pos::new(2, 2));
        assert_eq!(editor.move_to(&mut grid, Pos::new(2, 1)), DragMove::Accepted);
        assert_eq!(editor.move_to(&mut grid, Pos::new(2, 0)), DragMove::Illegal);
        assert_eq!(grid, before);
    }

    #[test]
    fn ending_away_from_the_other_endpoint_discards() {
        let mut grid = grid();
        let mut editor = PathEditor::new();

        drag(&mut editor, &mut grid, &[(0, 0), (1, 0), (1, 1)]);
        assert_eq!(editor.end(&mut grid), DragEnd::Discarded);
        assert!(grid.path_cells(A).is_empty());

        // Going back to the starting endpoint is not a connection either
        drag(&mut editor, &mut grid, &[(0, 0), (0, 1), (0, 0)]);
        assert_eq!(editor.end(&mut grid), DragEnd::Discarded);
        assert!(grid.path_cells(A).is_empty());
    }

    #[test]
    fn restarting_from_an_endpoint_clears_the_old_path() {
        let mut grid = grid();
        let mut editor = PathEditor::new();

        drag(&mut editor, &mut grid, &[(0, 0), (1, 0), (1, 1), (1, 2), (2, 2)]);
        editor.end(&mut grid);
        assert_eq!(editor.start(&mut grid, Pos::new(2, 2)), DragStart::FromEndpoint);
        assert_eq!(grid.path_cells(A), vec![Pos::new(2, 2)]);
    }

    #[test]
    fn starting_from_a_path_cell_continues_the_label() {
        let mut grid = grid();
        let mut editor = PathEditor::new();

        drag(&mut editor, &mut grid, &[(0, 0), (1, 0), (1, 1), (1, 2), (2, 2)]);
        editor.end(&mut grid);

        assert_eq!(editor.start(&mut grid, Pos::new(1, 1)), DragStart::FromPath);
        assert_eq!(editor.active(), Some(A));
        assert_eq!(grid.path_cells(A).len(), 5);

        // The drag did not start on an endpoint, so the whole label is wiped
        assert_eq!(editor.end(&mut grid), DragEnd::Discarded);
        assert!(grid.path_cells(A).is_empty());
    }
}
