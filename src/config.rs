/*
config.rs

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

//! Tuning constants and settings.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const COPYRIGHT_NOTICE: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "
Copyright 2025 Hervé Quatremain
License GPLv3+: GNU GPL version 3 or later <https://gnu.org/licenses/gpl.html>.
This is free software: you are free to change and redistribute it.
There is NO WARRANTY, to the extent permitted by law."
);

/// Walk attempts per board cell before a generation attempt is abandoned.
pub const ATTEMPTS_PER_CELL: usize = 20;

/// Number of times the whole generation is restarted before giving up.
pub const MAX_RETRIES: usize = 1000;

/// Length of the streak of consecutive solves that can earn a reward.
pub const REWARD_STREAK: usize = 3;

/// Probability of granting a reward when the streak is reached.
pub const REWARD_PROBABILITY: f64 = 0.5;

/// Pause the host should observe between a solved level and the next one.
pub const ADVANCE_DELAY: Duration = Duration::from_millis(1200);

/// Generation budgets.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// See [`ATTEMPTS_PER_CELL`].
    pub attempts_per_cell: usize,

    /// See [`MAX_RETRIES`].
    pub max_retries: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            attempts_per_cell: ATTEMPTS_PER_CELL,
            max_retries: MAX_RETRIES,
        }
    }
}

/// Game session settings.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct GameConfig {
    pub generator: GeneratorConfig,

    /// See [`REWARD_STREAK`].
    pub reward_streak: usize,

    /// See [`REWARD_PROBABILITY`].
    pub reward_probability: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            reward_streak: REWARD_STREAK,
            reward_probability: REWARD_PROBABILITY,
        }
    }
}
