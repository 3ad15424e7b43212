/*
label.rs

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

//! Endpoint labels.
//!
//! A label is the identity that the two endpoints of a pair share.
//! The engine never looks at a label directly: it only compares label keys (see [`Label::key`]).
//! That way the same engine backs two variants of the puzzle:
//!
//! * [`Color`] labels: a closed set of six colors. A color is its own key.
//! * [`IconLabel`] labels: a category and an icon in that category. Only the category is the key,
//!   so the two endpoints of a pair can display different icons.
//!
//! Mapping a label to something visible (a color value, an image) is the job of the host.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use strum_macros::FromRepr;

/// Identity of a pair of endpoints.
pub trait Label: Clone + PartialEq + fmt::Debug {
    /// Value compared to decide whether two cells belong to the same pair.
    type Key: Copy + Eq + Hash + fmt::Debug;

    /// Return the key of the label.
    fn key(&self) -> Self::Key;
}

/// Supplier of the labels for the pairs of a level.
pub trait LabelSource {
    /// Type of the labels that the source hands out.
    type Label: Label;

    /// Maximum number of pairs the source can label.
    fn capacity(&self) -> usize;

    /// Return the labels of the two endpoints of the pair at `index`, or None if `index` is
    /// beyond [`LabelSource::capacity`].
    ///
    /// Two different indexes always get labels with different keys.
    fn pair<R: Rng + ?Sized>(
        &self,
        index: usize,
        rng: &mut R,
    ) -> Option<(Self::Label, Self::Label)>;
}

/// Pair colors.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, FromRepr)]
#[repr(u8)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Orange,
    Purple,
}

impl Color {
    /// Number of colors.
    pub const COUNT: usize = 6;
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::Red => write!(f, "red"),
            Color::Blue => write!(f, "blue"),
            Color::Green => write!(f, "green"),
            Color::Yellow => write!(f, "yellow"),
            Color::Orange => write!(f, "orange"),
            Color::Purple => write!(f, "purple"),
        }
    }
}

impl Label for Color {
    type Key = Color;

    fn key(&self) -> Color {
        *self
    }
}

/// Label source for the color variant: pair `i` gets the `i`-th color.
#[derive(Debug, Copy, Clone, Default)]
pub struct ColorLabels;

impl LabelSource for ColorLabels {
    type Label = Color;

    fn capacity(&self) -> usize {
        Color::COUNT
    }

    fn pair<R: Rng + ?Sized>(&self, index: usize, _rng: &mut R) -> Option<(Color, Color)> {
        let color: Color = Color::from_repr(u8::try_from(index).ok()?)?;
        Some((color, color))
    }
}

/// Label for the icon variant.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct IconLabel {
    /// Category of the icon. This is what the player must match.
    pub category: usize,

    /// Icon within the category. Only used for display.
    pub icon: usize,
}

impl fmt::Display for IconLabel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.category, self.icon)
    }
}

impl Label for IconLabel {
    type Key = usize;

    fn key(&self) -> usize {
        self.category
    }
}

/// Label source for the icon variant.
///
/// Pair `i` gets the `i`-th category of the theme. Each endpoint receives an icon randomly
/// selected in that category.
#[derive(Debug, Clone)]
pub struct IconLabels {
    /// For each usable category, its identifier and its number of icons.
    categories: Vec<(usize, usize)>,
}

impl IconLabels {
    /// Create an [`IconLabels`] object from the number of icons in each category of a theme.
    ///
    /// Categories without icons are skipped. The category identifier is the position in
    /// `icons_per_category`.
    pub fn new(icons_per_category: &[usize]) -> Self {
        Self {
            categories: icons_per_category
                .iter()
                .copied()
                .enumerate()
                .filter(|(_, icons)| *icons > 0)
                .collect(),
        }
    }

    /// Create an [`IconLabels`] object for a theme where all the categories have the same number
    /// of icons.
    pub fn uniform(categories: usize, icons: usize) -> Self {
        Self::new(&vec![icons; categories])
    }
}

impl LabelSource for IconLabels {
    type Label = IconLabel;

    fn capacity(&self) -> usize {
        self.categories.len()
    }

    fn pair<R: Rng + ?Sized>(&self, index: usize, rng: &mut R) -> Option<(IconLabel, IconLabel)> {
        let (category, icons) = *self.categories.get(index)?;
        Some((
            IconLabel {
                category,
                icon: rng.random_range(0..icons),
            },
            IconLabel {
                category,
                icon: rng.random_range(0..icons),
            },
        ))
    }
}
