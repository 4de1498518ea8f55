/*
round.rs

Copyright 2025 Hervé Quatremain

This file is part of Teegoal.

Teegoal is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Teegoal is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Teegoal. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Manage the status of a round in progress.

use chrono::{DateTime, Local};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::error::Error;

use crate::codec::{self, InvalidToken};
use crate::generator::course::{Course, Hole, NUM_HOLES};
use crate::generator::random_course::{GenerationError, RandomCourse};
use crate::generator::rules::RuleSet;
use crate::saver::round::timestamp;
use crate::scorecard::{ScoreDelta, ScoreError, Scorecard, Totals};

/// Manage the status of the round in progress.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Round {
    /// Rules that the course follows.
    rules: RuleSet,

    /// Course being played.
    course: Course,

    /// Players and their entries.
    pub scorecard: Scorecard,

    /// Hole that receives the next entries, starting at 1.
    selected_hole: usize,

    /// Time when the course was created or loaded.
    #[serde(with = "timestamp")]
    created: DateTime<Local>,
}

impl Round {
    /// Create a [`Round`] object for the given course.
    ///
    /// The course must have been built with the given rules.
    pub fn new(rules: RuleSet, course: Course) -> Self {
        Self {
            rules,
            course,
            scorecard: Scorecard::default(),
            selected_hole: 1,
            created: Local::now(),
        }
    }

    /// Create a [`Round`] object with a random course.
    pub fn generate(rules: RuleSet) -> Result<Self, GenerationError> {
        let course: Course = RandomCourse::new(&rules).generate()?;
        Ok(Self::new(rules, course))
    }

    /// Create a [`Round`] object from a shared token or link.
    ///
    /// A link without a token gives [`InvalidToken::MissingToken`].
    pub fn from_token(rules: RuleSet, token: &str) -> Result<Self, InvalidToken> {
        let course: Course = codec::decode_link(token, &rules)?;
        Ok(Self::new(rules, course))
    }

    /// Rules of the round.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Course being played.
    pub fn course(&self) -> &Course {
        &self.course
    }

    /// Replace the course. The scores are cleared and the first hole is selected.
    pub fn set_course(&mut self, course: Course) {
        info!("New course: {}", codec::encode(&course));
        self.course = course;
        self.scorecard.clear();
        self.selected_hole = 1;
        self.created = Local::now();
    }

    /// Replace the course with a random one.
    pub fn new_course(&mut self) -> Result<(), GenerationError> {
        let course: Course = RandomCourse::new(&self.rules).generate()?;
        self.set_course(course);
        Ok(())
    }

    /// Replace the course with the one from a shared token or link.
    ///
    /// On error, the current course and scores are kept.
    pub fn load_token(&mut self, token: &str) -> Result<(), InvalidToken> {
        let course: Course = codec::decode_link(token, &self.rules)?;
        self.set_course(course);
        Ok(())
    }

    /// Time when the course was created or loaded.
    pub fn created(&self) -> DateTime<Local> {
        self.created
    }

    /// Hole that receives the next entries.
    pub fn selected_hole(&self) -> usize {
        self.selected_hole
    }

    /// Details of the selected hole.
    pub fn get_selected_hole(&self) -> Option<&Hole> {
        self.course.hole(self.selected_hole)
    }

    /// Change the selected hole.
    pub fn select_hole(&mut self, hole: usize) -> Result<(), ScoreError> {
        if !(1..=NUM_HOLES).contains(&hole) {
            return Err(ScoreError::UnknownHole(hole));
        }
        self.selected_hole = hole;
        Ok(())
    }

    /// Set the entries of all the players for the selected hole, and then select the next hole.
    ///
    /// The entries are given in the player order. Missing entries are left unchanged.
    pub fn enter_scores(&mut self, entries: &[Option<ScoreDelta>]) -> Result<(), ScoreError> {
        if entries.len() > self.scorecard.players().len() {
            return Err(ScoreError::UnknownPlayer(entries.len() - 1));
        }
        for (player, entry) in entries.iter().enumerate() {
            self.scorecard.set(player, self.selected_hole, *entry)?;
        }
        debug!("Hole {} entries: {entries:?}", self.selected_hole);
        if self.selected_hole < NUM_HOLES {
            self.selected_hole += 1;
        }
        Ok(())
    }

    /// Set the entry of one player for the selected hole. The selection does not move.
    pub fn enter_score(
        &mut self,
        player: usize,
        entry: Option<ScoreDelta>,
    ) -> Result<(), ScoreError> {
        self.scorecard.set(player, self.selected_hole, entry)
    }

    /// Undo the last entry and select its hole.
    pub fn undo(&mut self) -> bool {
        match self.scorecard.undo() {
            Some(hole) => {
                self.selected_hole = hole;
                true
            }
            None => false,
        }
    }

    /// Redo the last undone entry and select its hole.
    pub fn redo(&mut self) -> bool {
        match self.scorecard.redo() {
            Some(hole) => {
                self.selected_hole = hole;
                true
            }
            None => false,
        }
    }

    /// Totals of a player.
    pub fn totals(&self, player: usize) -> Result<Totals, ScoreError> {
        self.scorecard.totals(player, &self.course)
    }

    /// Whether a score has been entered for every hole.
    pub fn is_complete(&self) -> bool {
        self.scorecard.played() == NUM_HOLES
    }

    /// Verify a round that was deserialized.
    ///
    /// The holes are rebuilt from their targets with the round rules and must match the stored
    /// holes. The selected hole must exist, and the undo and redo lists must only refer to
    /// existing players and holes.
    pub fn verify(&self) -> Result<(), Box<dyn Error>> {
        let course: Course = self.course.revalidate(&self.rules)?;
        if course != self.course {
            return Err("the saved holes do not match the rules".into());
        }
        if !(1..=NUM_HOLES).contains(&self.selected_hole) {
            return Err(Box::new(ScoreError::UnknownHole(self.selected_hole)));
        }
        self.scorecard.verify()?;
        Ok(())
    }

    /// Token that encodes the course.
    pub fn token(&self) -> String {
        codec::encode(&self.course)
    }

    /// Link to share the course.
    pub fn link(&self, base: &str) -> String {
        codec::share_link(base, &self.course)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::course::tests::SAMPLE;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sample_round() -> Round {
        let rules: RuleSet = RuleSet::standard();
        let course: Course = Course::from_targets(&SAMPLE, &rules).unwrap();
        Round::new(rules, course)
    }

    fn delta(v: i64) -> Option<ScoreDelta> {
        Some(ScoreDelta::new(v).unwrap())
    }

    #[test]
    fn entries_move_the_selection() {
        let mut round: Round = sample_round();

        assert_eq!(round.selected_hole(), 1);
        round.enter_scores(&[delta(1), delta(-1)]).unwrap();
        assert_eq!(round.selected_hole(), 2);
        assert_eq!(round.scorecard.get(1, 1), Ok(delta(-1)));

        round.select_hole(18).unwrap();
        round.enter_scores(&[delta(0)]).unwrap();
        assert_eq!(round.selected_hole(), 18);
        assert_eq!(round.scorecard.get(1, 18), Ok(None));

        assert_eq!(round.select_hole(0), Err(ScoreError::UnknownHole(0)));
        assert_eq!(
            round.enter_scores(&[None, None, None]),
            Err(ScoreError::UnknownPlayer(2))
        );
    }

    #[test]
    fn single_entry_keeps_the_selection() {
        let mut round: Round = sample_round();

        round.select_hole(5).unwrap();
        round.enter_score(1, delta(3)).unwrap();
        assert_eq!(round.selected_hole(), 5);
        assert_eq!(round.totals(1).map(|t| t.front.diff), Ok(3));
    }

    #[test]
    fn undo_selects_the_changed_hole() {
        let mut round: Round = sample_round();

        round.enter_scores(&[delta(1)]).unwrap();
        round.enter_scores(&[delta(2)]).unwrap();
        assert_eq!(round.selected_hole(), 3);
        assert!(round.undo());
        assert_eq!(round.selected_hole(), 2);
        assert_eq!(round.scorecard.get(0, 2), Ok(None));
        assert!(round.redo());
        assert_eq!(round.scorecard.get(0, 2), Ok(delta(2)));
        assert!(!round.redo());
    }

    #[test]
    fn replacing_the_course_clears_the_scores() {
        let mut round: Round = sample_round();

        round.enter_scores(&[delta(1), delta(1)]).unwrap();
        round.select_hole(7).unwrap();

        let mut rng: ChaCha8Rng = ChaCha8Rng::seed_from_u64(3);
        let course: Course = RandomCourse::new(round.rules())
            .generate_with_rng(&mut rng)
            .unwrap();
        round.set_course(course.clone());

        assert_eq!(round.course(), &course);
        assert_eq!(round.selected_hole(), 1);
        assert_eq!(round.scorecard.played(), 0);
        assert!(!round.undo());
    }

    #[test]
    fn share_and_load() {
        let round: Round = sample_round();
        let link: String = round.link("https://example.org/play");

        let loaded: Round = Round::from_token(RuleSet::standard(), &link).unwrap();
        assert_eq!(loaded.course(), round.course());
        assert_eq!(loaded.token(), round.token());
    }

    #[test]
    fn bad_token_keeps_the_round() {
        let mut round: Round = sample_round();

        round.enter_scores(&[delta(2)]).unwrap();
        assert!(round.load_token("White%2CGreen").is_err());
        assert_eq!(round.load_token(""), Err(InvalidToken::MissingToken));
        assert_eq!(
            round.load_token("https://example.org/play?lang=fr"),
            Err(InvalidToken::MissingToken)
        );
        assert_eq!(round.scorecard.get(0, 1), Ok(delta(2)));
        assert_eq!(round.course().targets(), SAMPLE.to_vec());
    }

    #[test]
    fn completion() {
        let mut round: Round = sample_round();

        for _ in 0..NUM_HOLES {
            assert!(!round.is_complete());
            round.enter_scores(&[delta(0)]).unwrap();
        }
        assert!(round.is_complete());
        assert_eq!(round.totals(0).map(|t| t.total.throws), Ok(67));
    }
}
