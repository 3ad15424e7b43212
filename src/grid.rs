/*
grid.rs

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

//! Puzzle grid.
//!
//! The grid is a square matrix of [`Cell`] objects.
//! A cell can be a fixed endpoint (it holds a label for the whole level), and can be part of a
//! drawn path (it holds the key of the path's label).
//! Drawn connections between neighbor cells are stored as four direction flags per cell
//! ([`Links`]).
//! A flag toward a neighbor always comes with the reciprocal flag on that neighbor.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::label::Label;
use crate::level::Level;

/// Cell coordinates.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    /// Create a [`Pos`] object.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether the two positions are orthogonal neighbors (Manhattan distance of one).
    pub fn is_adjacent(&self, other: Pos) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }

    /// Return the direction to go from this position to the given neighbor, or None if the two
    /// positions are not neighbors.
    pub fn direction_to(&self, other: Pos) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|dir| self.step(*dir, usize::MAX) == Some(other))
    }

    /// Return the neighbor position in the given direction, or None if it is outside a
    /// `size`×`size` board.
    pub fn step(&self, dir: Direction, size: usize) -> Option<Pos> {
        let (row, col) = match dir {
            Direction::North => (self.row.checked_sub(1)?, self.col),
            Direction::South => (self.row.checked_add(1)?, self.col),
            Direction::East => (self.row, self.col.checked_add(1)?),
            Direction::West => (self.row, self.col.checked_sub(1)?),
        };
        if row < size && col < size {
            Some(Pos { row, col })
        } else {
            None
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Cardinal directions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// All the directions, in the order the connectivity check visits them.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Return the opposite direction.
    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }
}

/// Direction flags of a cell.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Links {
    pub n: bool,
    pub s: bool,
    pub e: bool,
    pub w: bool,
}

impl Links {
    /// Whether the flag for the given direction is set.
    pub fn has(&self, dir: Direction) -> bool {
        match dir {
            Direction::North => self.n,
            Direction::South => self.s,
            Direction::East => self.e,
            Direction::West => self.w,
        }
    }

    /// Set or clear the flag for the given direction.
    pub fn set(&mut self, dir: Direction, value: bool) {
        match dir {
            Direction::North => self.n = value,
            Direction::South => self.s = value,
            Direction::East => self.e = value,
            Direction::West => self.w = value,
        }
    }

    /// Number of flags set.
    pub fn count(&self) -> usize {
        Direction::ALL.iter().filter(|dir| self.has(**dir)).count()
    }

    /// Clear all the flags.
    pub fn clear(&mut self) {
        *self = Links::default();
    }

    /// Return the directions with a flag set, in the [`Direction::ALL`] order.
    pub fn directions(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(|dir| self.has(*dir))
    }
}

/// Grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell<L: Label> {
    /// Cell coordinates.
    pub pos: Pos,

    /// Label of the fixed endpoint, if the cell is an endpoint.
    pub label: Option<L>,

    /// Key of the label of the path drawn through the cell.
    pub path: Option<L::Key>,

    /// Drawn connections to the neighbor cells.
    pub links: Links,
}

impl<L: Label> Cell<L> {
    /// Create an empty cell.
    fn new(pos: Pos) -> Self {
        Self {
            pos,
            label: None,
            path: None,
            links: Links::default(),
        }
    }

    /// Key of the endpoint label, or None if the cell is not an endpoint.
    pub fn endpoint_key(&self) -> Option<L::Key> {
        self.label.as_ref().map(|l| l.key())
    }

    /// Whether the cell is a fixed endpoint.
    pub fn is_endpoint(&self) -> bool {
        self.label.is_some()
    }

    /// Remove the drawn path from the cell, back to its label-only baseline.
    fn clear_path(&mut self) {
        self.path = None;
        self.links.clear();
    }
}

/// Puzzle grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<L: Label> {
    /// Number of rows and columns.
    size: usize,

    /// Cells, row by row.
    cells: Vec<Cell<L>>,
}

impl<L: Label> Grid<L> {
    /// Create a `size`×`size` grid with no endpoints and no paths.
    pub fn new(size: usize) -> Self {
        let mut cells: Vec<Cell<L>> = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                cells.push(Cell::new(Pos::new(row, col)));
            }
        }
        Self { size, cells }
    }

    /// Build a fresh grid for the given level: every pair endpoint is set, no path is drawn.
    pub fn from_level(level: &Level<L>) -> Self {
        let mut grid: Grid<L> = Grid::new(level.size);
        for dot in level.dots() {
            grid.set_endpoint(dot.pos, dot.label.clone());
        }
        grid
    }

    /// Number of rows and columns.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the position is on the grid.
    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.row * self.size + pos.col)
        } else {
            None
        }
    }

    /// Return the cell at the given position.
    pub fn cell(&self, pos: Pos) -> Option<&Cell<L>> {
        self.index(pos).map(|i| &self.cells[i])
    }

    fn cell_mut(&mut self, pos: Pos) -> Option<&mut Cell<L>> {
        self.index(pos).map(|i| &mut self.cells[i])
    }

    /// Return all the cells, row by row.
    pub fn cells(&self) -> &[Cell<L>] {
        &self.cells
    }

    /// Return the neighbor of the given position in the given direction.
    pub fn neighbor(&self, pos: Pos, dir: Direction) -> Option<Pos> {
        pos.step(dir, self.size)
    }

    /// Make the cell a fixed endpoint. Return false if the position is outside the grid.
    pub fn set_endpoint(&mut self, pos: Pos, label: L) -> bool {
        match self.cell_mut(pos) {
            Some(cell) => {
                cell.label = Some(label);
                true
            }
            None => false,
        }
    }

    /// Mark the cell as part of the path with the given key.
    pub fn mark(&mut self, pos: Pos, key: L::Key) -> bool {
        match self.cell_mut(pos) {
            Some(cell) => {
                cell.path = Some(key);
                true
            }
            None => false,
        }
    }

    /// Connect two neighbor cells with the path of the given key: set the flag on `from`
    /// toward `to`, the reciprocal flag on `to`, and mark both cells.
    ///
    /// Return false, without changing anything, if the cells are not neighbors on the grid.
    pub fn link(&mut self, from: Pos, to: Pos, key: L::Key) -> bool {
        let Some(dir) = from.direction_to(to) else {
            return false;
        };
        if !self.contains(from) || !self.contains(to) {
            return false;
        }
        if let Some(cell) = self.cell_mut(from) {
            cell.links.set(dir, true);
            cell.path = Some(key);
        }
        if let Some(cell) = self.cell_mut(to) {
            cell.links.set(dir.opposite(), true);
            cell.path = Some(key);
        }
        true
    }

    /// Remove the path with the given key from every cell. Return the number of cleared cells.
    pub fn clear_path(&mut self, key: L::Key) -> usize {
        let mut count: usize = 0;
        for cell in self.cells.iter_mut().filter(|c| c.path == Some(key)) {
            cell.clear_path();
            count += 1;
        }
        count
    }

    /// Remove all the drawn paths.
    pub fn clear_all_paths(&mut self) {
        for cell in &mut self.cells {
            cell.clear_path();
        }
    }

    /// Return the positions of the cells carrying the path with the given key.
    pub fn path_cells(&self, key: L::Key) -> Vec<Pos> {
        self.cells
            .iter()
            .filter(|c| c.path == Some(key))
            .map(|c| c.pos)
            .collect()
    }
}

/// ASCII art of the grid: `o` is an endpoint, `O` an endpoint with a path, `+` a path cell and
/// `.` an empty cell. `-` and `|` are drawn connections.
impl<L: Label> fmt::Display for Grid<L> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.size {
            let mut line: String = String::with_capacity(self.size * 2);
            let mut below: String = String::with_capacity(self.size * 2);
            for col in 0..self.size {
                let cell: &Cell<L> = &self.cells[row * self.size + col];
                line.push(match (cell.is_endpoint(), cell.path.is_some()) {
                    (true, true) => 'O',
                    (true, false) => 'o',
                    (false, true) => '+',
                    (false, false) => '.',
                });
                if col + 1 < self.size {
                    line.push(if cell.links.e { '-' } else { ' ' });
                }
                below.push(if cell.links.s { '|' } else { ' ' });
                below.push(' ');
            }
            writeln!(f, "{line}")?;
            if row + 1 < self.size {
                writeln!(f, "{}", below.trim_end())?;
            }
        }
        Ok(())
    }
}
