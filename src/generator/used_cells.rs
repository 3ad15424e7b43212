/*
used_cells.rs

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

//! Board cells already taken by carved walks during one generation attempt.

use rand::Rng;
use rand::seq::IndexedRandom;

use super::path::Walk;
use crate::grid::{Direction, Pos};

/// Used status of the board cells.
#[derive(Debug, Clone)]
pub struct UsedCells {
    /// Number of rows and columns.
    size: usize,

    /// Used status, row by row.
    used: Vec<bool>,

    /// Number of cells not used yet.
    free: usize,
}

impl UsedCells {
    /// Create a [`UsedCells`] object where all the cells of a `size`×`size` board are free.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            used: vec![false; size * size],
            free: size * size,
        }
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        if pos.row < self.size && pos.col < self.size {
            Some(pos.row * self.size + pos.col)
        } else {
            None
        }
    }

    /// Whether the cell is used. Cells outside the board count as used.
    pub fn is_used(&self, pos: Pos) -> bool {
        self.index(pos).is_none_or(|i| self.used[i])
    }

    /// Mark the cell as used.
    pub fn take(&mut self, pos: Pos) {
        if let Some(i) = self.index(pos)
            && !self.used[i]
        {
            self.used[i] = true;
            self.free -= 1;
        }
    }

    /// Mark the cell as free.
    pub fn release(&mut self, pos: Pos) {
        if let Some(i) = self.index(pos)
            && self.used[i]
        {
            self.used[i] = false;
            self.free += 1;
        }
    }

    /// Release all the cells of a walk that is abandoned.
    pub fn release_walk(&mut self, walk: &Walk) {
        for pos in walk.get() {
            self.release(*pos);
        }
    }

    /// Number of free cells.
    pub fn free_count(&self) -> usize {
        self.free
    }

    /// Return the free cells, row by row.
    pub fn free_cells(&self) -> Vec<Pos> {
        self.used
            .iter()
            .enumerate()
            .filter(|(_, used)| !**used)
            .map(|(i, _)| Pos::new(i / self.size, i % self.size))
            .collect()
    }

    /// Return a uniformly selected free cell, or None if the board is full.
    pub fn random_free<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Pos> {
        self.free_cells().choose(rng).copied()
    }

    /// Return the free neighbors of the given cell.
    pub fn free_neighbors(&self, pos: Pos) -> Vec<Pos> {
        Direction::ALL
            .iter()
            .filter_map(|dir| pos.step(*dir, self.size))
            .filter(|p| !self.is_used(*p))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn take_and_release() {
        let mut used = UsedCells::new(3);
        assert_eq!(used.free_count(), 9);

        used.take(Pos::new(1, 1));
        used.take(Pos::new(1, 1));
        assert_eq!(used.free_count(), 8);
        assert!(used.is_used(Pos::new(1, 1)));
        assert!(used.is_used(Pos::new(3, 0)));

        let mut neighbors = used.free_neighbors(Pos::new(0, 1));
        neighbors.sort();
        assert_eq!(neighbors, vec![Pos::new(0, 0), Pos::new(0, 2)]);

        used.release(Pos::new(1, 1));
        assert_eq!(used.free_count(), 9);
    }

    #[test]
    fn release_walk_frees_every_cell() {
        let mut used = UsedCells::new(2);
        let mut walk = Walk::new(2);
        for pos in [Pos::new(0, 0), Pos::new(0, 1)] {
            used.take(pos);
            walk.push(pos);
        }
        used.take(Pos::new(1, 1));
        used.release_walk(&walk);

        assert_eq!(used.free_cells(), vec![Pos::new(0, 0), Pos::new(0, 1), Pos::new(1, 0)]);
    }

    #[test]
    fn random_free_on_a_full_board() {
        let mut used = UsedCells::new(1);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(used.random_free(&mut rng), Some(Pos::new(0, 0)));
        used.take(Pos::new(0, 0));
        assert_eq!(used.random_free(&mut rng), None);
    }
}
