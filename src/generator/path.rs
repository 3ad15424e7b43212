/*
path.rs

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

//! Walk carved on the board.

use crate::grid::Pos;

/// Ordered list of the cells of a carved walk.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Walk {
    cells: Vec<Pos>,
}

impl Walk {
    /// Create an empty [`Walk`] object.
    pub fn new(max_length: usize) -> Self {
        Self {
            cells: Vec::with_capacity(max_length),
        }
    }

    /// Add a cell at the end of the walk.
    pub fn push(&mut self, pos: Pos) {
        self.cells.push(pos);
    }

    /// Get the number of cells in the walk.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the walk has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Return a reference to the cells.
    pub fn get(&self) -> &[Pos] {
        &self.cells
    }

    /// Return the first cell of the walk.
    pub fn get_first(&self) -> Option<Pos> {
        self.cells.first().copied()
    }

    /// Return the last cell of the walk.
    pub fn get_last(&self) -> Option<Pos> {
        self.cells.last().copied()
    }

    /// Consume the walk and return its cells.
    pub fn into_cells(self) -> Vec<Pos> {
        self.cells
    }
}
