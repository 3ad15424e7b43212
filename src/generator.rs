/*
generator.rs

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

//! Generate random levels.
//!
//! A level is built by carving paths first and by turning the ends of each path into a pair of
//! endpoints, so every generated level can be solved.
//!
//! * [`used_cells::UsedCells`] tracks the cells already taken by a carved path.
//!   A new one is created for each generation attempt, and it is handed to the walker and back.
//!
//! * [`random_walk::RandomWalk`] carves one self-avoiding random walk over the free cells.
//!   The walk is stored in a [`path::Walk`] object.
//!
//! * [`level_generator::LevelGenerator`] repeats walks until the requested number of pairs is
//!   placed, restarting the whole attempt when the walk budget runs out.
//!   If all the attempts fail, then the method returns
//!   [`level_generator::GenerateError::NotConverged`] instead of a level with fewer pairs.

pub mod level_generator;
pub mod path;
pub mod random_walk;
pub mod used_cells;
