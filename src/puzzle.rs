/*
puzzle.rs

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

//! Puzzle being played: a level, its grid, and the drag in progress.

use log::{Level as LogLevel, debug, log_enabled};

use crate::editor::{DragEnd, DragMove, DragStart, DragState, PathEditor};
use crate::grid::{Grid, Pos};
use crate::label::Label;
use crate::level::Level;
use crate::validator;

/// Puzzle in progress.
#[derive(Debug, Clone)]
pub struct Puzzle<L: Label> {
    /// Level description.
    level: Level<L>,

    /// Grid built from the level and modified by the drags.
    grid: Grid<L>,

    /// Drag state machine.
    editor: PathEditor<L::Key>,

    /// Whether all the pairs are connected.
    solved: bool,
}

impl<L: Label> Puzzle<L> {
    /// Create a [`Puzzle`] object with a fresh grid for the given level.
    pub fn new(level: Level<L>) -> Self {
        let grid: Grid<L> = Grid::from_level(&level);
        Self {
            level,
            grid,
            editor: PathEditor::new(),
            solved: false,
        }
    }

    /// Return the level.
    pub fn level(&self) -> &Level<L> {
        &self.level
    }

    /// Return the grid.
    pub fn grid(&self) -> &Grid<L> {
        &self.grid
    }

    /// Return the drag state.
    pub fn drag_state(&self) -> DragState<L::Key> {
        self.editor.state()
    }

    /// Whether all the pairs are connected.
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Start a drag at the given cell.
    pub fn start(&mut self, row: usize, col: usize) -> DragStart {
        self.editor.start(&mut self.grid, Pos::new(row, col))
    }

    /// Extend the drag to the given cell.
    pub fn move_to(&mut self, row: usize, col: usize) -> DragMove {
        self.editor.move_to(&mut self.grid, Pos::new(row, col))
    }

    /// End the drag. A kept path triggers the verification of the whole puzzle.
    pub fn end(&mut self) -> DragEnd {
        let res: DragEnd = self.editor.end(&mut self.grid);
        if res != DragEnd::Kept {
            return res;
        }
        if log_enabled!(LogLevel::Debug) {
            debug!("Grid after the drag:\n{}", self.grid);
        }
        self.solved = validator::win_check(&self.grid, &self.level);
        if self.solved {
            DragEnd::Solved
        } else {
            DragEnd::Kept
        }
    }

    /// Abandon the drag in progress, if any.
    pub fn cancel(&mut self) {
        self.editor.cancel(&mut self.grid);
    }

    /// Remove all the drawn paths.
    pub fn reset(&mut self) {
        self.editor.cancel(&mut self.grid);
        self.grid.clear_all_paths();
        self.solved = false;
    }

    /// Draw the generator's solution of every pair by replaying it as drags.
    ///
    /// Return the result of the last drag, which is [`DragEnd::Solved`] for a generated level.
    pub fn replay_solution(&mut self) -> DragEnd {
        self.reset();
        let solutions: Vec<Vec<Pos>> = self.level.pairs.iter().map(|p| p.solution.clone()).collect();
        let mut res: DragEnd = DragEnd::Ignored;

        for solution in solutions {
            let Some((first, rest)) = solution.split_first() else {
                continue;
            };
            self.start(first.row, first.col);
            for pos in rest {
                self.move_to(pos.row, pos.col);
            }
            res = self.end();
        }
        res
    }
}
