/*
level.rs

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

//! Generated level: the board size and the labeled pairs.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::grid::Pos;
use crate::label::Label;

/// Fixed endpoint of a pair.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Endpoint<L> {
    pub pos: Pos,
    pub label: L,
}

/// Two endpoints sharing a label key.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Pair<L> {
    pub first: Endpoint<L>,
    pub second: Endpoint<L>,

    /// Walk carved by the generator, from the first endpoint to the second.
    /// This is one solution for the pair.
    pub solution: Vec<Pos>,
}

impl<L: Label> Pair<L> {
    /// Key of the pair's label.
    pub fn key(&self) -> L::Key {
        self.first.label.key()
    }

    /// Whether the position is one of the two endpoints.
    pub fn is_endpoint(&self, pos: Pos) -> bool {
        self.first.pos == pos || self.second.pos == pos
    }
}

/// Level description.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Level<L> {
    /// Number of rows and columns of the board.
    pub size: usize,

    /// Pairs to connect.
    pub pairs: Vec<Pair<L>>,
}

impl<L: Label> Level<L> {
    /// Create a level without pairs.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            pairs: Vec::new(),
        }
    }

    /// Add a pair from a carved walk. The first and last cells of the walk become the endpoints.
    ///
    /// Return false, without adding the pair, if the walk has less than two cells.
    pub fn push_pair(&mut self, walk: Vec<Pos>, first_label: L, second_label: L) -> bool {
        let (Some(first), Some(second)) = (walk.first().copied(), walk.last().copied()) else {
            return false;
        };
        if first == second {
            return false;
        }
        self.pairs.push(Pair {
            first: Endpoint {
                pos: first,
                label: first_label,
            },
            second: Endpoint {
                pos: second,
                label: second_label,
            },
            solution: walk,
        });
        true
    }

    /// Number of pairs.
    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    /// Return the flattened list of the endpoints.
    pub fn dots(&self) -> Vec<&Endpoint<L>> {
        self.pairs
            .iter()
            .flat_map(|p| [&p.first, &p.second])
            .collect()
    }

    /// Return the pair with the given key.
    pub fn pair(&self, key: L::Key) -> Option<&Pair<L>> {
        self.pairs.iter().find(|p| p.key() == key)
    }

    /// Verify the level invariants: endpoints are on the board and pairwise distinct, each key
    /// is used by exactly one pair, and each solution is a chain of neighbor cells from the
    /// first endpoint to the second that never crosses another solution.
    pub fn is_consistent(&self) -> bool {
        let mut keys: HashSet<L::Key> = HashSet::with_capacity(self.pairs.len());
        let mut endpoints: HashSet<Pos> = HashSet::with_capacity(self.pairs.len() * 2);
        let mut walked: HashSet<Pos> = HashSet::new();
        let on_board = |p: &Pos| p.row < self.size && p.col < self.size;

        for pair in &self.pairs {
            if pair.second.label.key() != pair.key() || !keys.insert(pair.key()) {
                return false;
            }
            if !on_board(&pair.first.pos)
                || !on_board(&pair.second.pos)
                || !endpoints.insert(pair.first.pos)
                || !endpoints.insert(pair.second.pos)
            {
                return false;
            }
            if pair.solution.first() != Some(&pair.first.pos)
                || pair.solution.last() != Some(&pair.second.pos)
                || pair.solution.windows(2).any(|w| !w[0].is_adjacent(w[1]))
                || !pair.solution.iter().all(|p| on_board(p) && walked.insert(*p))
            {
                return false;
            }
        }
        true
    }
}

/// ASCII art of the level: pair `i` is drawn with the `i`-th letter of the alphabet, uppercase
/// for the endpoints and lowercase for its solution.
impl<L: Label> fmt::Display for Level<L> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut art: Vec<Vec<char>> = vec![vec!['.'; self.size]; self.size];
        for (i, pair) in self.pairs.iter().enumerate() {
            let letter: char = char::from(b'a' + (i % 26) as u8);
            for pos in &pair.solution {
                if let Some(c) = art.get_mut(pos.row).and_then(|r| r.get_mut(pos.col)) {
                    *c = if pair.is_endpoint(*pos) {
                        letter.to_ascii_uppercase()
                    } else {
                        letter
                    };
                }
            }
        }
        for row in art {
            writeln!(f, "{}", row.into_iter().collect::<String>())?;
        }
        Ok(())
    }
}
