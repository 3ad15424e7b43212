/*
validator.rs

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

//! Verify that the drawn paths connect every pair.
//!
//! For each pair, the check walks the direction flags from the first endpoint.
//! At each cell it follows the only flag that does not lead back to the previous cell.
//! The pair is connected when the walk reaches the second endpoint.
//!
//! A loop in a path always joins the rest of the path at a cell with three flags (or at the first
//! endpoint with two flags), so loops are reported as [`Disconnection::Branch`].

use log::debug;
use std::fmt;

use crate::grid::{Cell, Grid, Pos};
use crate::label::Label;
use crate::level::{Level, Pair};

/// Reason why a pair is not connected.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Disconnection {
    /// An endpoint of the pair is not on the grid with the pair's label.
    MissingEndpoint(Pos),

    /// The first endpoint does not carry the pair's path.
    NotStarted,

    /// The path stops before reaching the second endpoint.
    DeadEnd(Pos),

    /// The path splits at that cell.
    Branch(Pos),

    /// A flag of that cell leads outside the grid, into another path, or to a cell without the
    /// reciprocal flag.
    ForeignLink(Pos),

    /// The walk did not end within the number of cells of the grid.
    StepLimit,
}

impl fmt::Display for Disconnection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Disconnection::MissingEndpoint(p) => write!(f, "missing endpoint at {p}"),
            Disconnection::NotStarted => write!(f, "no path from the first endpoint"),
            Disconnection::DeadEnd(p) => write!(f, "dead end at {p}"),
            Disconnection::Branch(p) => write!(f, "branch at {p}"),
            Disconnection::ForeignLink(p) => write!(f, "broken link at {p}"),
            Disconnection::StepLimit => write!(f, "path too long"),
        }
    }
}

/// Verify that the pair's endpoints are joined by one acyclic chain of its path.
pub fn check_pair<L: Label>(grid: &Grid<L>, pair: &Pair<L>) -> Result<(), Disconnection> {
    let key: L::Key = pair.key();
    let start: Pos = pair.first.pos;
    let goal: Pos = pair.second.pos;

    for pos in [start, goal] {
        if grid.cell(pos).and_then(|c| c.endpoint_key()) != Some(key) {
            return Err(Disconnection::MissingEndpoint(pos));
        }
    }
    if grid.cell(start).and_then(|c| c.path) != Some(key) {
        return Err(Disconnection::NotStarted);
    }

    let mut previous: Option<Pos> = None;
    let mut current: Pos = start;

    for _ in 0..grid.size() * grid.size() {
        if current == goal {
            return Ok(());
        }
        let cell: &Cell<L> = grid.cell(current).ok_or(Disconnection::ForeignLink(current))?;
        let mut next: Option<Pos> = None;

        for dir in cell.links.directions() {
            let neighbor: &Cell<L> = grid
                .neighbor(current, dir)
                .and_then(|p| grid.cell(p))
                .ok_or(Disconnection::ForeignLink(current))?;
            if neighbor.path != Some(key) || !neighbor.links.has(dir.opposite()) {
                return Err(Disconnection::ForeignLink(current));
            }
            if Some(neighbor.pos) == previous {
                continue;
            }
            if next.is_some() {
                return Err(Disconnection::Branch(current));
            }
            next = Some(neighbor.pos);
        }

        match next {
            Some(pos) => {
                previous = Some(current);
                current = pos;
            }
            None => return Err(Disconnection::DeadEnd(current)),
        }
    }
    Err(Disconnection::StepLimit)
}

/// Whether every pair of the level is connected on the grid.
pub fn win_check<L: Label>(grid: &Grid<L>, level: &Level<L>) -> bool {
    level.pairs.iter().all(|pair| match check_pair(grid, pair) {
        Ok(()) => true,
        Err(reason) => {
            debug!("Pair {:?} not connected: {reason}", pair.key());
            false
        }
    })
}
