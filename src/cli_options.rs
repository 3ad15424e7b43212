/*
cli_options.rs

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

//! Process command-line options.
//!
//! These options are intended for developers tuning the level generator.
//!
//! # Examples
//!
//! Generate two 5×5 levels with five pairs:
//!
//! ```text
//! $ pairlink -s 5 -p 5 -c 2
//! AaaaA
//! BbbbB
//! CcCDd
//! EeEDd
//! .....
//! ...
//! ```
//!
//! Generate ten levels with the parameters of level index 6, verify that they can be solved,
//! and print some statistics:
//!
//! ```text
//! $ pairlink -l 6 -c 10 --verify --summary
//! ```

use clap::{Parser, ValueEnum};
use log::{LevelFilter, debug};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use pairlink::config::COPYRIGHT_NOTICE;
use pairlink::editor::DragEnd;
use pairlink::generator::level_generator::{GenerateError, LevelGenerator};
use pairlink::label::{ColorLabels, IconLabels, Label, LabelSource};
use pairlink::level::Level;
use pairlink::progression::Progression;
use pairlink::puzzle::Puzzle;

/// Puzzle variant.
#[derive(ValueEnum, Debug, Copy, Clone, PartialEq, Eq)]
enum Variant {
    /// Pairs of colors
    Color,

    /// Pairs of icons of the same category
    Icon,
}

/// Generate random Pairlink levels for developers.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// Size of the board
    #[arg(short, long, requires = "pairs", conflicts_with = "level")]
    size: Option<usize>,

    /// Number of pairs
    #[arg(short, long, requires = "size", conflicts_with = "level")]
    pairs: Option<usize>,

    /// Level index to take the board size and the number of pairs from
    #[arg(short, long)]
    level: Option<usize>,

    /// Number of levels to generate
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Seed for the random generator
    #[arg(long)]
    seed: Option<u64>,

    /// Puzzle variant
    #[arg(value_enum, long, default_value_t = Variant::Color)]
    variant: Variant,

    /// Number of categories in the icon theme
    #[arg(long, default_value_t = 8)]
    categories: usize,

    /// Number of icons in each category of the icon theme
    #[arg(long, default_value_t = 5)]
    icons: usize,

    /// Print the levels in JSON format
    #[arg(short, long, default_value_t = false)]
    json: bool,

    /// Replay the solution of each level and verify that it solves the puzzle
    #[arg(long, default_value_t = false)]
    verify: bool,

    /// Print some statistics after generating the levels
    #[arg(long, default_value_t = false)]
    summary: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Statistics about the generated levels.
#[derive(Default)]
struct Stats {
    total: f32,
    max: f32,
    retries: usize,
    walks: usize,
    errors: usize,
    invalid: usize,
}

/// Parse and process command-line options.
///
/// Return the exit code of the program.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.debug {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    match args.variant {
        Variant::Color => run(&args, ColorLabels),
        Variant::Icon => run(&args, IconLabels::uniform(args.categories, args.icons)),
    }
}

/// Generate the levels with the given label source.
fn run<S: LabelSource>(args: &Args, source: S) -> u8
where
    S::Label: Serialize,
{
    let mut rng: StdRng = match args.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };
    let mut generator: LevelGenerator<S> = LevelGenerator::new(source);
    let mut stats: Stats = Stats::default();

    for i in 0..args.count {
        debug!("Iteration {i}");

        let ret: Result<Level<S::Label>, GenerateError> = match (args.size, args.pairs) {
            (Some(size), Some(pairs)) => generator.generate(size, pairs, &mut rng),
            _ => Progression::at(args.level.unwrap_or(0)).generate(&mut generator, &mut rng),
        };
        let level: Level<S::Label> = match ret {
            Ok(level) => level,
            Err(e @ GenerateError::NotConverged { .. }) => {
                // The generator gave up, try with the next iteration
                eprintln!("Error: {e}");
                stats.errors += 1;
                continue;
            }
            Err(e) => {
                eprintln!("Error: {e}");
                return 2;
            }
        };

        stats.total += generator.duration;
        stats.max = stats.max.max(generator.duration);
        stats.retries += generator.retries;
        stats.walks += generator.attempts;

        if args.verify && !verify(&level) {
            eprintln!("Level {i} cannot be solved with its own solution:\n{level}");
            stats.invalid += 1;
        }

        if args.json {
            match serde_json::to_string(&level) {
                Ok(s) => println!("{s}"),
                Err(e) => {
                    eprintln!("Error: cannot serialize the level: {e}");
                    return 1;
                }
            }
        } else {
            println!("{level}");
        }
    }

    if args.summary {
        let generated: usize = args.count - stats.errors;
        let divider: f32 = generated.max(1) as f32;
        println!(
            "
         total time = {}s
       average time = {}s
           max time = {}s
    average retries = {}
      average walks = {}
             errors = {}
     invalid levels = {}",
            stats.total,
            stats.total / divider,
            stats.max,
            stats.retries as f32 / divider,
            stats.walks as f32 / divider,
            stats.errors,
            stats.invalid
        );
    }

    if stats.invalid > 0 { 1 } else { 0 }
}

/// Whether the level is well formed and solved by replaying its solution through the editor.
fn verify<L: Label>(level: &Level<L>) -> bool {
    level.is_consistent() && Puzzle::new(level.clone()).replay_solution() == DragEnd::Solved
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn size_and_pairs_go_together() {
        let args = Args::try_parse_from(["pairlink", "-s", "5", "-p", "6", "--verify"]).expect("args");
        assert_eq!((args.size, args.pairs), (Some(5), Some(6)));
        assert!(args.verify);
        assert_eq!(args.variant, Variant::Color);

        assert!(Args::try_parse_from(["pairlink", "-s", "5"]).is_err());
        assert!(Args::try_parse_from(["pairlink", "-s", "5", "-p", "4", "-l", "2"]).is_err());
    }

    #[test]
    fn generated_levels_verify() {
        let mut rng = StdRng::seed_from_u64(10);
        let mut generator = LevelGenerator::new(IconLabels::uniform(8, 5));
        for index in [0, 3, 6] {
            let level = Progression::at(index)
                .generate(&mut generator, &mut rng)
                .expect("level");
            assert!(verify(&level));
        }
    }
}
