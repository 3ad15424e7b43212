/*
game.rs

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

//! Manage the status of a game in progress.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GameConfig;
use crate::editor::{DragEnd, DragMove, DragStart};
use crate::generator::level_generator::{GenerateError, LevelGenerator};
use crate::label::LabelSource;
use crate::progression::{GamePhase, Progression};
use crate::puzzle::Puzzle;

/// Collaborators interested in the game events (scoring, lives, combo, power-ups).
///
/// All the methods do nothing by default.
pub trait GameListener {
    /// The player moved the path onto the endpoint of another pair.
    fn penalty(&mut self) {}

    /// The player connected all the pairs of the level.
    fn solved(&mut self, _level_index: usize) {}

    /// End of an attempt at the level: `true` on a solve, `false` on a penalty.
    fn attempt(&mut self, _passed: bool) {}

    /// The player earned a reward.
    fn reward(&mut self) {}
}

/// Listener that ignores all the events.
impl GameListener for () {}

/// Manage the status of the game in progress.
pub struct Game<S: LabelSource> {
    generator: LevelGenerator<S>,
    progression: Progression,

    /// Level being played. `None` until the game starts.
    puzzle: Option<Puzzle<S::Label>>,

    phase: GamePhase,

    /// Number of consecutive solved attempts.
    streak: usize,

    /// Whether the level is solved and the host must call [`Game::next_level`].
    awaiting_advance: bool,

    /// Whether the player asked for the solution of the current level.
    /// In this case the level does not count for the streak.
    assisted: bool,

    config: GameConfig,
    rng: StdRng,
}

impl<S: LabelSource> Game<S> {
    /// Create a [`Game`] object with the default settings.
    ///
    /// With a `seed`, the sequence of levels is reproducible.
    pub fn new(source: S, seed: Option<u64>) -> Self {
        Self::with_config(source, seed, GameConfig::default())
    }

    /// Create a [`Game`] object.
    pub fn with_config(source: S, seed: Option<u64>, config: GameConfig) -> Self {
        let rng: StdRng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            generator: LevelGenerator::with_config(source, config.generator),
            progression: Progression::new(),
            puzzle: None,
            phase: GamePhase::Idle,
            streak: 0,
            awaiting_advance: false,
            assisted: false,
            config,
            rng,
        }
    }

    /// Return the game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Return the current level index.
    pub fn level_index(&self) -> usize {
        self.progression.index()
    }

    /// Return the level being played.
    pub fn puzzle(&self) -> Option<&Puzzle<S::Label>> {
        self.puzzle.as_ref()
    }

    /// Return the number of consecutive solved attempts.
    pub fn streak(&self) -> usize {
        self.streak
    }

    /// Whether the level is solved and waiting for [`Game::next_level`].
    pub fn is_awaiting_advance(&self) -> bool {
        self.awaiting_advance
    }

    /// Whether the player asked for the solution of the current level.
    pub fn is_assisted(&self) -> bool {
        self.assisted
    }

    /// Change the game phase. Entering [`GamePhase::Playing`] from [`GamePhase::Idle`] or
    /// [`GamePhase::GameOver`] restarts at the first level.
    ///
    /// # Errors
    ///
    /// The method returns an error if the first level cannot be generated.
    pub fn set_phase(&mut self, phase: GamePhase) -> Result<(), GenerateError> {
        let previous: GamePhase = self.phase;
        self.phase = phase;
        debug!("Game phase: {previous:?} -> {phase:?}");

        if self.progression.on_phase_change(previous, phase) {
            self.streak = 0;
            self.load_level()?;
        } else if phase != GamePhase::Playing
            && let Some(puzzle) = self.puzzle.as_mut()
        {
            puzzle.cancel();
        }
        Ok(())
    }

    /// Whether the player input must be processed.
    fn accepts_input(&self) -> bool {
        self.phase == GamePhase::Playing && !self.awaiting_advance
    }

    /// Start a drag at the given cell.
    pub fn start(&mut self, row: usize, col: usize) -> DragStart {
        if !self.accepts_input() {
            return DragStart::Ignored;
        }
        match self.puzzle.as_mut() {
            Some(puzzle) => puzzle.start(row, col),
            None => DragStart::Ignored,
        }
    }

    /// Extend the drag to the given cell. An illegal move is reported to the listener as a
    /// penalty and a failed attempt.
    pub fn move_to<G: GameListener + ?Sized>(
        &mut self,
        row: usize,
        col: usize,
        listener: &mut G,
    ) -> DragMove {
        if !self.accepts_input() {
            return DragMove::Ignored;
        }
        let Some(puzzle) = self.puzzle.as_mut() else {
            return DragMove::Ignored;
        };
        let res: DragMove = puzzle.move_to(row, col);
        if res == DragMove::Illegal {
            info!("Illegal move at ({row}, {col})");
            self.streak = 0;
            listener.penalty();
            listener.attempt(false);
        }
        res
    }

    /// End the drag. Connecting the last pair is reported to the listener as a solve and a
    /// passed attempt, and may grant a reward.
    pub fn end<G: GameListener + ?Sized>(&mut self, listener: &mut G) -> DragEnd {
        if !self.accepts_input() {
            return DragEnd::Ignored;
        }
        let Some(puzzle) = self.puzzle.as_mut() else {
            return DragEnd::Ignored;
        };
        let res: DragEnd = puzzle.end();
        if res == DragEnd::Solved {
            self.on_solved(listener);
        }
        res
    }

    fn on_solved<G: GameListener + ?Sized>(&mut self, listener: &mut G) {
        let index: usize = self.progression.index();
        self.awaiting_advance = true;
        if self.assisted {
            info!("Level {index} solved with the revealed solution");
            return;
        }
        info!("Level {index} solved");
        listener.solved(index);
        listener.attempt(true);

        self.streak += 1;
        if self.config.reward_streak > 0
            && self.streak % self.config.reward_streak == 0
            && self.rng.random_bool(self.config.reward_probability.clamp(0.0, 1.0))
        {
            debug!("Reward granted after {} consecutive solves", self.streak);
            listener.reward();
        }
    }

    /// Move to the next level. The host calls the method after the
    /// [`ADVANCE_DELAY`](crate::config::ADVANCE_DELAY) pause that follows a solve.
    ///
    /// Return whether the game moved to the next level. Nothing happens unless the game is
    /// playing and the current level is solved.
    ///
    /// # Errors
    ///
    /// The method returns an error if the level cannot be generated.
    pub fn next_level(&mut self) -> Result<bool, GenerateError> {
        if self.phase != GamePhase::Playing || !self.awaiting_advance {
            debug!("Level {} not solved: staying on it", self.progression.index());
            return Ok(false);
        }
        self.progression.advance();
        self.load_level()?;
        Ok(true)
    }

    /// Remove all the drawn paths of the current level.
    ///
    /// A level solved by the player cannot be restarted, it can only be left with
    /// [`Game::next_level`]. A level with a revealed solution can be restarted, and stays
    /// assisted.
    ///
    /// Return whether the paths were removed.
    pub fn restart_level(&mut self) -> bool {
        if self.awaiting_advance && !self.assisted {
            return false;
        }
        let Some(puzzle) = self.puzzle.as_mut() else {
            return false;
        };
        puzzle.reset();
        self.awaiting_advance = false;
        true
    }

    /// Draw the solution of the current level. The level does not count for the streak, even if
    /// the player restarts it and draws the paths again.
    ///
    /// Return whether the level is now solved.
    pub fn reveal_solution(&mut self) -> bool {
        let Some(puzzle) = self.puzzle.as_mut() else {
            return false;
        };
        self.assisted = true;
        self.streak = 0;
        let solved: bool = puzzle.replay_solution() == DragEnd::Solved;
        self.awaiting_advance = solved;
        solved
    }

    fn load_level(&mut self) -> Result<(), GenerateError> {
        let puzzle = Puzzle::new(
            self.progression
                .generate(&mut self.generator, &mut self.rng)?,
        );
        debug!(
            "Level {}: {}x{} with {} pairs",
            self.progression.index(),
            puzzle.level().size,
            puzzle.level().size,
            puzzle.level().pair_count()
        );
        self.puzzle = Some(puzzle);
        self.awaiting_advance = false;
        self.assisted = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GeneratorConfig, REWARD_STREAK};
    use crate::grid::Pos;
    use crate::label::{ColorLabels, IconLabels};

    #[derive(Default)]
    struct Recorder {
        penalties: usize,
        solved: Vec<usize>,
        attempts: Vec<bool>,
        rewards: usize,
    }

    impl GameListener for Recorder {
        fn penalty(&mut self) {
            self.penalties += 1;
        }

        fn solved(&mut self, level_index: usize) {
            self.solved.push(level_index);
        }

        fn attempt(&mut self, passed: bool) {
            self.attempts.push(passed);
        }

        fn reward(&mut self) {
            self.rewards += 1;
        }
    }

    fn playing<S: LabelSource>(source: S, reward_probability: f64) -> Game<S> {
        let config = GameConfig {
            reward_probability,
            ..GameConfig::default()
        };
        let mut game = Game::with_config(source, Some(99), config);
        game.set_phase(GamePhase::Playing).expect("first level");
        game
    }

    /// Draw every reference path through the game input.
    fn solve<S: LabelSource>(game: &mut Game<S>, listener: &mut Recorder) -> DragEnd {
        let solutions: Vec<Vec<Pos>> = game
            .puzzle()
            .expect("puzzle")
            .level()
            .pairs
            .iter()
            .map(|p| p.solution.clone())
            .collect();
        let mut res = DragEnd::Ignored;
        for solution in solutions {
            game.start(solution[0].row, solution[0].col);
            for pos in &solution[1..] {
                assert_eq!(game.move_to(pos.row, pos.col, listener), DragMove::Accepted);
            }
            res = game.end(listener);
        }
        res
    }

    /// Drag the first pair onto the first endpoint of the second pair.
    fn make_illegal_move<S: LabelSource>(game: &mut Game<S>, listener: &mut Recorder) {
        let level = game.puzzle().expect("puzzle").level().clone();
        let from = level.pairs[0].first.pos;
        let target = level.pairs[1].first.pos;

        // Walk row first, then column. The move is illegal as soon as the drag touches a
        // foreign endpoint, which may happen before the target.
        game.start(from.row, from.col);
        let mut current = from;
        let mut path = Vec::new();
        while current.row != target.row {
            current.row = if current.row < target.row { current.row + 1 } else { current.row - 1 };
            path.push(current);
        }
        while current.col != target.col {
            current.col = if current.col < target.col { current.col + 1 } else { current.col - 1 };
            path.push(current);
        }
        for pos in path {
            match game.move_to(pos.row, pos.col, listener) {
                DragMove::Illegal => return,
                DragMove::Accepted => {}
                other => panic!("unexpected move result {other:?}"),
            }
        }
        panic!("the drag never reached a foreign endpoint");
    }

    #[test]
    fn input_is_ignored_until_playing() {
        let mut game = Game::new(ColorLabels, Some(1));
        let mut listener = Recorder::default();
        assert_eq!(game.phase(), GamePhase::Idle);
        assert!(game.puzzle().is_none());
        assert_eq!(game.start(0, 0), DragStart::Ignored);
        assert_eq!(game.move_to(0, 1, &mut listener), DragMove::Ignored);
        assert_eq!(game.end(&mut listener), DragEnd::Ignored);

        game.set_phase(GamePhase::Playing).expect("first level");
        let level = game.puzzle().expect("puzzle").level();
        assert_eq!(level.size, 3);
        assert_eq!(level.pair_count(), 2);
    }

    #[test]
    fn solving_reports_and_waits_for_the_host() {
        let mut game = playing(ColorLabels, 0.0);
        let mut listener = Recorder::default();

        assert_eq!(solve(&mut game, &mut listener), DragEnd::Solved);
        assert_eq!(listener.solved, vec![0]);
        assert_eq!(listener.attempts, vec![true]);
        assert!(game.is_awaiting_advance());
        assert_eq!(game.start(0, 0), DragStart::Ignored);

        assert_eq!(game.next_level(), Ok(true));
        assert_eq!(game.level_index(), 1);
        assert!(!game.is_awaiting_advance());
        assert!(!game.puzzle().expect("puzzle").is_solved());
    }

    #[test]
    fn progression_grows_the_board() {
        let mut game = playing(ColorLabels, 0.0);
        let mut listener = Recorder::default();

        for index in 0..8 {
            let size = game.puzzle().expect("puzzle").level().size;
            let expected = match index {
                0..=1 => 3,
                2..=5 => 4,
                _ => 5,
            };
            assert_eq!(size, expected);
            assert_eq!(solve(&mut game, &mut listener), DragEnd::Solved);
            assert_eq!(game.next_level(), Ok(true));
        }
        assert_eq!(listener.solved, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn illegal_move_is_a_penalty() {
        let mut game = playing(ColorLabels, 0.0);
        let mut listener = Recorder::default();

        make_illegal_move(&mut game, &mut listener);
        assert_eq!(listener.penalties, 1);
        assert_eq!(listener.attempts, vec![false]);
        assert_eq!(game.streak(), 0);
        let puzzle = game.puzzle().expect("puzzle");
        assert!(puzzle.grid().cells().iter().filter(|c| !c.is_endpoint()).all(|c| c.path.is_none()));
    }

    #[test]
    fn every_third_consecutive_solve_may_grant_a_reward() {
        let mut game = playing(ColorLabels, 1.0);
        let mut listener = Recorder::default();

        for _ in 0..REWARD_STREAK * 2 {
            solve(&mut game, &mut listener);
            assert_eq!(game.next_level(), Ok(true));
        }
        assert_eq!(game.streak(), REWARD_STREAK * 2);
        assert_eq!(listener.rewards, 2);

        // A penalty breaks the streak
        make_illegal_move(&mut game, &mut listener);
        assert_eq!(game.streak(), 0);
        assert!(game.restart_level());
        solve(&mut game, &mut listener);
        assert_eq!(listener.rewards, 2);

        let mut game = playing(ColorLabels, 0.0);
        let mut listener = Recorder::default();
        for _ in 0..REWARD_STREAK * 2 {
            solve(&mut game, &mut listener);
            assert_eq!(game.next_level(), Ok(true));
        }
        assert_eq!(listener.rewards, 0);
    }

    #[test]
    fn revealed_solution_does_not_count() {
        let mut game = playing(ColorLabels, 1.0);
        let mut listener = Recorder::default();

        solve(&mut game, &mut listener);
        assert_eq!(game.next_level(), Ok(true));
        assert_eq!(game.streak(), 1);

        assert!(game.reveal_solution());
        assert!(game.is_assisted());
        assert!(game.is_awaiting_advance());
        assert_eq!(game.streak(), 0);
        assert_eq!(listener.solved, vec![0]);

        // Drawing the revealed paths again by hand still does not count
        assert!(game.restart_level());
        assert!(game.is_assisted());
        assert!(!game.is_awaiting_advance());
        for _ in 0..REWARD_STREAK {
            assert_eq!(solve(&mut game, &mut listener), DragEnd::Solved);
            assert!(game.is_awaiting_advance());
            assert!(game.restart_level());
        }
        assert_eq!(solve(&mut game, &mut listener), DragEnd::Solved);
        assert_eq!(listener.solved, vec![0]);
        assert_eq!(listener.attempts, vec![true]);
        assert_eq!(listener.rewards, 0);
        assert_eq!(game.streak(), 0);

        assert_eq!(game.next_level(), Ok(true));
        assert!(!game.is_assisted());
        assert_eq!(game.level_index(), 2);
    }

    #[test]
    fn solved_level_cannot_be_solved_again() {
        let mut game = playing(ColorLabels, 1.0);
        let mut listener = Recorder::default();

        assert_eq!(solve(&mut game, &mut listener), DragEnd::Solved);
        assert!(!game.restart_level());
        assert!(game.is_awaiting_advance());
        assert!(game.puzzle().expect("puzzle").is_solved());
        assert_eq!(game.start(0, 0), DragStart::Ignored);
        assert_eq!(game.end(&mut listener), DragEnd::Ignored);

        assert_eq!(listener.solved, vec![0]);
        assert_eq!(game.streak(), 1);
        assert_eq!(listener.rewards, 0);
        assert_eq!(game.level_index(), 0);
    }

    #[test]
    fn unsolved_level_cannot_advance() {
        let mut game = Game::new(ColorLabels, Some(21));
        let mut listener = Recorder::default();
        assert_eq!(game.next_level(), Ok(false));

        game.set_phase(GamePhase::Playing).expect("first level");
        for _ in 0..7 {
            assert_eq!(game.next_level(), Ok(false));
        }
        assert_eq!(game.level_index(), 0);
        assert_eq!(game.puzzle().expect("puzzle").level().size, 3);

        // Solved, but the game is over before the host advances
        solve(&mut game, &mut listener);
        game.set_phase(GamePhase::GameOver).expect("phase");
        assert_eq!(game.next_level(), Ok(false));
        assert_eq!(game.level_index(), 0);
    }

    #[test]
    fn game_over_then_playing_restarts() {
        let mut game = playing(IconLabels::uniform(6, 4), 0.0);
        let mut listener = Recorder::default();
        for _ in 0..3 {
            solve(&mut game, &mut listener);
            assert_eq!(game.next_level(), Ok(true));
        }
        assert_eq!(game.level_index(), 3);

        game.set_phase(GamePhase::GameOver).expect("phase");
        assert_eq!(game.start(0, 0), DragStart::Ignored);
        assert_eq!(game.level_index(), 3);

        game.set_phase(GamePhase::Playing).expect("phase");
        assert_eq!(game.level_index(), 0);
        assert_eq!(game.streak(), 0);
        assert_eq!(game.puzzle().expect("puzzle").level().size, 3);
    }

    #[test]
    fn unusable_generator_is_reported() {
        let config = GameConfig {
            generator: GeneratorConfig {
                attempts_per_cell: 0,
                max_retries: 1,
            },
            ..GameConfig::default()
        };
        let mut game = Game::with_config(ColorLabels, Some(3), config);
        assert!(matches!(
            game.set_phase(GamePhase::Playing),
            Err(GenerateError::NotConverged { .. })
        ));
        assert!(game.puzzle().is_none());
        assert_eq!(game.start(0, 0), DragStart::Ignored);
    }
}
