/*
lib.rs

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

//! Engine for "link the pairs" puzzles.
//!
//! The board is a square grid with pairs of endpoints that share a label. The player drags a
//! path from each endpoint to its partner. Paths cannot cross, and the puzzle is solved when every
//! pair is connected.
//!
//! * [`generator`] builds solvable levels by carving random walks.
//! * [`puzzle::Puzzle`] holds the grid of a level and applies the drags through
//!   [`editor::PathEditor`].
//! * [`validator`] verifies that the drawn paths connect every pair.
//! * [`progression::Progression`] maps the level index to the board size and the number of pairs.
//! * [`game::Game`] ties everything together and reports the events to a
//!   [`game::GameListener`].
//!
//! The crate does not draw anything: the host renders the [`grid::Grid`] and forwards the
//! pointer events.

pub mod config;
pub mod editor;
pub mod game;
pub mod generator;
pub mod grid;
pub mod label;
pub mod level;
pub mod progression;
pub mod puzzle;
pub mod validator;
