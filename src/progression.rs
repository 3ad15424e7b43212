/*
progression.rs

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

//! Level progression.
//!
//! The board grows and the number of pairs increases with the level index:
//!
//! | Level index | Board size | Pairs        |
//! |-------------|------------|--------------|
//! | 0 - 1       | 3×3        | 2            |
//! | 2 - 5       | 4×4        | 3 or 4       |
//! | 6 and above | 5×5        | 4, 5, or 6   |

use log::{info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::generator::level_generator::{GenerateError, LevelGenerator};
use crate::label::LabelSource;
use crate::level::Level;

/// Phase of the game.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Idle,
    Playing,
    GameOver,
}

/// Generation parameters for a level.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct LevelParams {
    pub size: usize,
    pub pairs: usize,
}

/// Level index management.
#[derive(Debug, Clone, Default)]
pub struct Progression {
    index: usize,
}

impl Progression {
    /// Create a [`Progression`] object at the first level.
    pub fn new() -> Self {
        Self { index: 0 }
    }

    /// Create a [`Progression`] object at the given level.
    pub fn at(index: usize) -> Self {
        Self { index }
    }

    /// Return the current level index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Return the generation parameters for the given level index.
    pub fn params_for<R: Rng + ?Sized>(index: usize, rng: &mut R) -> LevelParams {
        match index {
            0..=1 => LevelParams { size: 3, pairs: 2 },
            2..=5 => LevelParams {
                size: 4,
                pairs: rng.random_range(3..=4),
            },
            _ => LevelParams {
                size: 5,
                pairs: rng.random_range(4..=6),
            },
        }
    }

    /// Return the generation parameters for the current level.
    pub fn params<R: Rng + ?Sized>(&self, rng: &mut R) -> LevelParams {
        Self::params_for(self.index, rng)
    }

    /// Move to the next level and return its index.
    pub fn advance(&mut self) -> usize {
        self.index += 1;
        info!("Advancing to level {}", self.index);
        self.index
    }

    /// Go back to the first level.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Process a change of game phase. Starting to play from the idle or the game over phases
    /// restarts from the first level.
    ///
    /// Return whether the progression was reset.
    pub fn on_phase_change(&mut self, from: GamePhase, to: GamePhase) -> bool {
        if to == GamePhase::Playing && matches!(from, GamePhase::Idle | GamePhase::GameOver) {
            self.reset();
            true
        } else {
            false
        }
    }

    /// Generate the level for the current index.
    ///
    /// If the generator cannot place the requested number of pairs, then the number of pairs is
    /// reduced by one until a level is produced.
    ///
    /// # Errors
    ///
    /// The method returns the generator error when even a single pair cannot be placed, or when
    /// the parameters are invalid for the label source.
    pub fn generate<S: LabelSource, R: Rng + ?Sized>(
        &self,
        generator: &mut LevelGenerator<S>,
        rng: &mut R,
    ) -> Result<Level<S::Label>, GenerateError> {
        let params: LevelParams = self.params(rng);
        let mut pairs: usize = params.pairs;

        loop {
            match generator.generate(params.size, pairs, rng) {
                Ok(level) => return Ok(level),
                Err(e @ GenerateError::NotConverged { .. }) if pairs > 1 => {
                    warn!(
                        "Level {}: {e}; falling back to {} pairs",
                        self.index,
                        pairs - 1
                    );
                    pairs -= 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
