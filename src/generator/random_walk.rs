/*
random_walk.rs

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

//! Carve a random walk.

use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::path::Walk;
use super::used_cells::UsedCells;
use crate::grid::Pos;

/// [`RandomWalk`] object.
pub struct RandomWalk {
    /// Maximum number of cells in a walk.
    pub max_length: usize,

    /// Number of cells carved by all the walks so far.
    pub steps: usize,
}

impl RandomWalk {
    /// Create the object.
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            steps: 0,
        }
    }

    /// Carve a self-avoiding random walk from `seed` over the free cells.
    ///
    /// The walk stops when it reaches [`RandomWalk::max_length`] cells or when the last cell has
    /// no free neighbor.
    /// All the cells of the walk are marked as used in the returned [`UsedCells`] object.
    /// If `seed` is already used, then the returned walk is empty.
    pub fn carve<R: Rng + ?Sized>(
        &mut self,
        mut used: UsedCells,
        seed: Pos,
        rng: &mut R,
    ) -> (UsedCells, Walk) {
        let mut walk: Walk = Walk::new(self.max_length);
        if used.is_used(seed) || self.max_length == 0 {
            return (used, walk);
        }
        used.take(seed);
        walk.push(seed);

        while walk.len() < self.max_length {
            let Some(last) = walk.get_last() else {
                break;
            };
            let Some(next) = used.free_neighbors(last).choose(rng).copied() else {
                debug!("    Walk from {seed} stuck at {last} after {} cells", walk.len());
                break;
            };
            used.take(next);
            walk.push(next);
        }
        self.steps += walk.len();
        (used, walk)
    }
}
