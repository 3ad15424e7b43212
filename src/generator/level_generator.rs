/*
level_generator.rs

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

//! Generate a level by partitioning the board into random walks.

use log::debug;
use rand::Rng;
use std::error::Error;
use std::fmt;
use std::time::Instant;

use super::path::Walk;
use super::random_walk::RandomWalk;
use super::used_cells::UsedCells;
use crate::config::GeneratorConfig;
use crate::label::LabelSource;
use crate::level::Level;

/// Type of errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateError {
    /// The board has no cells.
    EmptyBoard,

    /// No pairs requested.
    NoPairs,

    /// The board cannot hold that many endpoints.
    TooManyPairs { requested: usize, cells: usize },

    /// The label source cannot label that many pairs.
    NotEnoughLabels { requested: usize, available: usize },

    /// All the attempts failed to place the requested number of pairs.
    /// `placed` is the best number of pairs reached by an attempt.
    NotConverged { placed: usize, requested: usize },
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GenerateError::EmptyBoard => write!(f, "the board has no cells"),
            GenerateError::NoPairs => write!(f, "at least one pair is required"),
            GenerateError::TooManyPairs { requested, cells } => write!(
                f,
                "{requested} pairs do not fit on a board of {cells} cells"
            ),
            GenerateError::NotEnoughLabels {
                requested,
                available,
            } => write!(
                f,
                "{requested} pairs requested but only {available} labels are available"
            ),
            GenerateError::NotConverged { placed, requested } => write!(
                f,
                "could not place {requested} pairs (best attempt placed {placed})"
            ),
        }
    }
}

impl Error for GenerateError {}

/// [`LevelGenerator`] object.
pub struct LevelGenerator<S: LabelSource> {
    /// Supplier of the pair labels.
    source: S,

    /// Generation budgets.
    config: GeneratorConfig,

    /// Number of whole-generation attempts the last call used.
    pub retries: usize,

    /// Number of walks the last call carved.
    pub attempts: usize,

    /// Duration in seconds of the last call.
    pub duration: f32,
}

impl<S: LabelSource> LevelGenerator<S> {
    /// Create the object with the default budgets.
    pub fn new(source: S) -> Self {
        Self::with_config(source, GeneratorConfig::default())
    }

    /// Create the object.
    pub fn with_config(source: S, config: GeneratorConfig) -> Self {
        Self {
            source,
            config,
            retries: 0,
            attempts: 0,
            duration: 0.0,
        }
    }

    /// Return the label source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Generate a `size`×`size` level with exactly `pairs` pairs.
    ///
    /// # Errors
    ///
    /// The method returns an error if the parameters cannot produce a level, or if no attempt
    /// placed all the pairs within the budgets. In that later case, the method can be retried
    /// or called with fewer pairs.
    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        size: usize,
        pairs: usize,
        rng: &mut R,
    ) -> Result<Level<S::Label>, GenerateError> {
        self.check_parameters(size, pairs)?;

        let start: Instant = Instant::now();
        let mut best: usize = 0;
        self.retries = 0;
        self.attempts = 0;

        let res: Result<Level<S::Label>, GenerateError> = loop {
            if self.retries >= self.config.max_retries {
                break Err(GenerateError::NotConverged {
                    placed: best,
                    requested: pairs,
                });
            }
            self.retries += 1;
            match self.try_generate(size, pairs, rng) {
                Ok(level) => break Ok(level),
                Err(placed) => {
                    debug!(
                        "Attempt {} placed {placed} of {pairs} pairs",
                        self.retries
                    );
                    best = best.max(placed);
                }
            }
        };

        self.duration = start.elapsed().as_secs_f32();
        debug!(
            "Size = {size}  Pairs = {pairs}  Retries = {}  Walks = {}  Duration = {}",
            self.retries, self.attempts, self.duration
        );
        res
    }

    /// Verify that the parameters can produce a level.
    fn check_parameters(&self, size: usize, pairs: usize) -> Result<(), GenerateError> {
        let cells: usize = size * size;
        if cells == 0 {
            return Err(GenerateError::EmptyBoard);
        }
        if pairs == 0 {
            return Err(GenerateError::NoPairs);
        }
        if pairs * 2 > cells {
            return Err(GenerateError::TooManyPairs {
                requested: pairs,
                cells,
            });
        }
        let available: usize = self.source.capacity();
        if pairs > available {
            return Err(GenerateError::NotEnoughLabels {
                requested: pairs,
                available,
            });
        }
        Ok(())
    }

    /// One generation attempt. On failure, return the number of pairs that were placed.
    fn try_generate<R: Rng + ?Sized>(
        &mut self,
        size: usize,
        pairs: usize,
        rng: &mut R,
    ) -> Result<Level<S::Label>, usize> {
        let cells: usize = size * size;
        let buffer: usize = if size < 5 { 1 } else { 2 };
        let min_length: usize = if size <= 3 { 2 } else { 3 };
        let budget: usize = cells * self.config.attempts_per_cell;

        let mut walker: RandomWalk = RandomWalk::new(cells / pairs + buffer);
        let mut used: UsedCells = UsedCells::new(size);
        let mut level: Level<S::Label> = Level::new(size);
        let mut attempt: usize = 0;

        while level.pair_count() < pairs && attempt < budget {
            attempt += 1;
            self.attempts += 1;

            let Some(seed) = used.random_free(rng) else {
                debug!("    No free cell left");
                break;
            };
            let (next_used, walk) = walker.carve(used, seed, rng);
            used = next_used;

            if walk.len() < min_length {
                used.release_walk(&walk);
                continue;
            }
            let placed: usize = level.pair_count();
            let Some((first, second)) = self.source.pair(placed, rng) else {
                return Err(placed);
            };
            if !Self::commit(&mut level, walk, first, second) {
                return Err(placed);
            }
        }

        if level.pair_count() == pairs {
            Ok(level)
        } else {
            Err(level.pair_count())
        }
    }

    /// Turn the walk into a pair. Return false if the walk cannot hold two distinct endpoints.
    fn commit(level: &mut Level<S::Label>, walk: Walk, first: S::Label, second: S::Label) -> bool {
        debug!(
            "    Pair {} from {:?} to {:?} ({} cells)",
            level.pair_count(),
            walk.get_first(),
            walk.get_last(),
            walk.len()
        );
        level.push_pair(walk.into_cells(), first, second)
    }
}
