/*
scorecard.rs

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

//! Manage the players' scores.
//!
//! Players enter, for each hole, the difference between their number of throws and the par.
//! A hole without an entry counts as 0.
//! The module computes the running totals and manages the undo and redo lists.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use crate::generator::course::{Course, FRONT_NINE, NUM_HOLES};

/// Lowest difference from par that a player can enter.
pub const MIN_DELTA: i8 = -2;

/// Highest difference from par that a player can enter.
pub const MAX_DELTA: i8 = 3;

/// Default player names.
const DEFAULT_PLAYERS: [&str; 2] = ["P1", "P2"];

/// Type of errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    /// The difference from par is outside [`MIN_DELTA`]..=[`MAX_DELTA`].
    OutOfRange(i64),

    /// The text is not a difference from par.
    Parse(String),

    /// No player at this index.
    UnknownPlayer(usize),

    /// No hole with this number.
    UnknownHole(usize),
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScoreError::OutOfRange(v) => {
                write!(f, "score {v} is not between {MIN_DELTA} and +{MAX_DELTA}")
            }
            ScoreError::Parse(s) => write!(f, "`{s}` is not a score"),
            ScoreError::UnknownPlayer(p) => write!(f, "no player {}", p + 1),
            ScoreError::UnknownHole(h) => write!(f, "no hole {h}"),
        }
    }
}

impl std::error::Error for ScoreError {}

/// Difference between the number of throws and the par for a hole.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(into = "i8", try_from = "i8")]
pub struct ScoreDelta(i8);

impl ScoreDelta {
    /// Create a [`ScoreDelta`] object.
    pub fn new(value: i64) -> Result<Self, ScoreError> {
        if (i64::from(MIN_DELTA)..=i64::from(MAX_DELTA)).contains(&value) {
            // The range check above guarantees the conversion
            Ok(Self(value as i8))
        } else {
            Err(ScoreError::OutOfRange(value))
        }
    }

    /// Difference from par.
    pub fn value(self) -> i8 {
        self.0
    }
}

impl From<ScoreDelta> for i8 {
    fn from(delta: ScoreDelta) -> Self {
        delta.0
    }
}

impl TryFrom<i8> for ScoreDelta {
    type Error = ScoreError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        Self::new(i64::from(value))
    }
}

/// Accept "-2", "-1", "0", "1", and "+1" forms.
impl FromStr for ScoreDelta {
    type Err = ScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s: &str = s.trim();
        let value: i64 = s
            .strip_prefix('+')
            .unwrap_or(s)
            .parse()
            .map_err(|_| ScoreError::Parse(s.to_string()))?;
        Self::new(value)
    }
}

impl fmt::Display for ScoreDelta {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0 > 0 {
            write!(f, "+{}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Position of a score relative to par.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Standing {
    Under,
    Even,
    Over,
}

impl Standing {
    /// Classify a difference from par.
    pub fn of(diff: i32) -> Self {
        match diff {
            d if d < 0 => Standing::Under,
            0 => Standing::Even,
            _ => Standing::Over,
        }
    }
}

/// Par, difference from par, and number of throws for a group of holes.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Subtotal {
    pub par: u32,
    pub diff: i32,
    pub throws: i32,
}

/// Totals of a player for the front nine, the back nine, and the course.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Totals {
    pub front: Subtotal,
    pub back: Subtotal,
    pub total: Subtotal,
}

/// Player and their entries.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Name displayed in the scorecard header.
    pub name: String,

    /// Entry for each hole. None means that the player has not entered a score yet.
    entries: [Option<ScoreDelta>; NUM_HOLES],
}

impl Player {
    /// Create a [`Player`] object with no entries.
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: [None; NUM_HOLES],
        }
    }

    /// Entries of all the holes, in order.
    pub fn entries(&self) -> &[Option<ScoreDelta>] {
        &self.entries
    }

    /// Sum of the differences from par for the given range of hole indexes (starting at 0).
    fn diff(&self, range: Range<usize>) -> i32 {
        self.entries[range]
            .iter()
            .map(|e| e.map_or(0, |d| i32::from(d.value())))
            .sum()
    }
}

/// Change that the player made to an entry.
/// The object stores the entry before and after the change.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
struct DoOperation {
    /// Player index.
    player: usize,

    /// Hole number.
    hole: usize,

    /// Entry before the change.
    before: Option<ScoreDelta>,

    /// Entry after the change.
    after: Option<ScoreDelta>,
}

/// Manage the players' entries.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Scorecard {
    /// List of the players.
    players: Vec<Player>,

    /// List of undo operations.
    undo_op: Vec<DoOperation>,

    /// List of redo operations.
    redo_op: Vec<DoOperation>,
}

impl Default for Scorecard {
    fn default() -> Self {
        Self::new(&DEFAULT_PLAYERS)
    }
}

impl Scorecard {
    /// Create a [`Scorecard`] object for the given players.
    pub fn new(names: &[&str]) -> Self {
        Self {
            players: names.iter().map(|n| Player::new(n)).collect(),
            undo_op: Vec::new(),
            redo_op: Vec::new(),
        }
    }

    /// Remove all the entries and reset the undo and redo lists. The players are kept.
    pub fn clear(&mut self) {
        for p in &mut self.players {
            p.entries = [None; NUM_HOLES];
        }
        self.undo_op.clear();
        self.redo_op.clear();
    }

    /// List of the players.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Return the player at the given index.
    pub fn player(&self, player: usize) -> Result<&Player, ScoreError> {
        self.players
            .get(player)
            .ok_or(ScoreError::UnknownPlayer(player))
    }

    /// Change the name of a player. An empty name restores the default name.
    pub fn rename(&mut self, player: usize, name: &str) -> Result<(), ScoreError> {
        let p: &mut Player = self
            .players
            .get_mut(player)
            .ok_or(ScoreError::UnknownPlayer(player))?;
        let name: &str = name.trim();
        p.name = if name.is_empty() {
            format!("P{}", player + 1)
        } else {
            name.to_string()
        };
        Ok(())
    }

    /// Return the entry of a player for a hole (starting at 1).
    pub fn get(&self, player: usize, hole: usize) -> Result<Option<ScoreDelta>, ScoreError> {
        let index: usize = Self::hole_index(hole)?;
        Ok(self.player(player)?.entries[index])
    }

    /// Set, or clear with None, the entry of a player for a hole and add the operation to the
    /// undo list.
    pub fn set(
        &mut self,
        player: usize,
        hole: usize,
        entry: Option<ScoreDelta>,
    ) -> Result<(), ScoreError> {
        let before: Option<ScoreDelta> = self.get(player, hole)?;
        if before == entry {
            return Ok(());
        }
        self.set_no_undo(player, hole, entry);
        self.undo_op.push(DoOperation {
            player,
            hole,
            before,
            after: entry,
        });
        self.redo_op.clear();
        Ok(())
    }

    /// Set an entry, but do not store the operation in the undo list.
    /// The player and the hole must have been verified.
    fn set_no_undo(&mut self, player: usize, hole: usize, entry: Option<ScoreDelta>) {
        if let Some(p) = self.players.get_mut(player)
            && let Some(index) = hole.checked_sub(1)
            && let Some(e) = p.entries.get_mut(index)
        {
            *e = entry;
        }
    }

    /// Undo the last operation and return the hole that changed.
    pub fn undo(&mut self) -> Option<usize> {
        let op: DoOperation = self.undo_op.pop()?;
        self.set_no_undo(op.player, op.hole, op.before);
        let hole: usize = op.hole;
        self.redo_op.push(op);
        Some(hole)
    }

    /// Redo the last undo operation and return the hole that changed.
    pub fn redo(&mut self) -> Option<usize> {
        let op: DoOperation = self.redo_op.pop()?;
        self.set_no_undo(op.player, op.hole, op.after);
        let hole: usize = op.hole;
        self.undo_op.push(op);
        Some(hole)
    }

    /// Return the length of the undo list.
    pub fn undo_len(&self) -> usize {
        self.undo_op.len()
    }

    /// Return the length of the redo list.
    pub fn redo_len(&self) -> usize {
        self.redo_op.len()
    }

    /// Number of holes for which at least one player entered a score.
    pub fn played(&self) -> usize {
        (0..NUM_HOLES)
            .filter(|i| self.players.iter().any(|p| p.entries[*i].is_some()))
            .count()
    }

    /// Percentage of played holes, rounded to the nearest integer.
    pub fn progress(&self) -> usize {
        (self.played() * 200 + NUM_HOLES) / (2 * NUM_HOLES)
    }

    /// Number of throws of a player for a hole: par plus the entry.
    pub fn throws(&self, player: usize, hole: usize, course: &Course) -> Result<i32, ScoreError> {
        let entry: Option<ScoreDelta> = self.get(player, hole)?;
        let par: u8 = course
            .hole(hole)
            .map(|h| h.par.value())
            .ok_or(ScoreError::UnknownHole(hole))?;
        Ok(i32::from(par) + entry.map_or(0, |d| i32::from(d.value())))
    }

    /// Totals of a player for the given course.
    pub fn totals(&self, player: usize, course: &Course) -> Result<Totals, ScoreError> {
        let p: &Player = self.player(player)?;
        let subtotal = |par: u32, range: Range<usize>| -> Subtotal {
            let diff: i32 = p.diff(range);
            Subtotal {
                par,
                diff,
                throws: par as i32 + diff,
            }
        };

        Ok(Totals {
            front: subtotal(course.front_par(), 0..FRONT_NINE),
            back: subtotal(course.back_par(), FRONT_NINE..NUM_HOLES),
            total: subtotal(course.total_par(), 0..NUM_HOLES),
        })
    }

    /// Verify that the undo and redo lists only refer to existing players and holes.
    pub fn verify(&self) -> Result<(), ScoreError> {
        for op in self.undo_op.iter().chain(&self.redo_op) {
            self.player(op.player)?;
            Self::hole_index(op.hole)?;
        }
        Ok(())
    }

    /// Convert a hole number (starting at 1) into an index.
    fn hole_index(hole: usize) -> Result<usize, ScoreError> {
        if (1..=NUM_HOLES).contains(&hole) {
            Ok(hole - 1)
        } else {
            Err(ScoreError::UnknownHole(hole))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::course::tests::SAMPLE;
    use crate::generator::rules::RuleSet;

    fn delta(v: i64) -> Option<ScoreDelta> {
        Some(ScoreDelta::new(v).unwrap())
    }

    #[test]
    fn delta_range() {
        for v in -2..=3 {
            assert_eq!(ScoreDelta::new(v).map(ScoreDelta::value), Ok(v as i8));
        }
        assert_eq!(ScoreDelta::new(-3), Err(ScoreError::OutOfRange(-3)));
        assert_eq!(ScoreDelta::new(4), Err(ScoreError::OutOfRange(4)));
    }

    #[test]
    fn delta_parse_and_display() {
        assert_eq!("+2".parse::<ScoreDelta>(), Ok(ScoreDelta(2)));
        assert_eq!(" -1 ".parse::<ScoreDelta>(), Ok(ScoreDelta(-1)));
        assert_eq!("0".parse::<ScoreDelta>(), Ok(ScoreDelta(0)));
        assert_eq!("5".parse::<ScoreDelta>(), Err(ScoreError::OutOfRange(5)));
        assert!(matches!(
            "two".parse::<ScoreDelta>(),
            Err(ScoreError::Parse(_))
        ));
        assert_eq!(ScoreDelta(3).to_string(), "+3");
        assert_eq!(ScoreDelta(-2).to_string(), "-2");
        assert_eq!(ScoreDelta(0).to_string(), "0");
    }

    #[test]
    fn delta_json_is_checked() {
        assert_eq!(serde_json::to_string(&ScoreDelta(-2)).unwrap(), "-2");
        assert!(serde_json::from_str::<ScoreDelta>("7").is_err());
    }

    #[test]
    fn standing() {
        assert_eq!(Standing::of(-4), Standing::Under);
        assert_eq!(Standing::of(0), Standing::Even);
        assert_eq!(Standing::of(2), Standing::Over);
    }

    #[test]
    fn totals_follow_par() {
        let course: Course = Course::from_targets(&SAMPLE, &RuleSet::standard()).unwrap();
        let mut card: Scorecard = Scorecard::default();

        card.set(0, 1, delta(-1)).unwrap();
        card.set(0, 9, delta(2)).unwrap();
        card.set(0, 10, delta(3)).unwrap();
        card.set(1, 18, delta(-2)).unwrap();

        let p1: Totals = card.totals(0, &course).unwrap();
        assert_eq!(
            p1.front,
            Subtotal {
                par: 33,
                diff: 1,
                throws: 34
            }
        );
        assert_eq!(
            p1.back,
            Subtotal {
                par: 34,
                diff: 3,
                throws: 37
            }
        );
        assert_eq!(
            p1.total,
            Subtotal {
                par: 67,
                diff: 4,
                throws: 71
            }
        );

        let p2: Totals = card.totals(1, &course).unwrap();
        assert_eq!(p2.front.diff, 0);
        assert_eq!(p2.total.throws, 65);

        // Hole 1 is a par 3
        assert_eq!(card.throws(0, 1, &course), Ok(2));
        assert_eq!(card.throws(1, 1, &course), Ok(3));
        assert_eq!(card.throws(0, 19, &course), Err(ScoreError::UnknownHole(19)));
    }

    #[test]
    fn progress_counts_holes_played_by_anyone() {
        let mut card: Scorecard = Scorecard::default();

        assert_eq!(card.progress(), 0);
        card.set(0, 1, delta(0)).unwrap();
        card.set(1, 1, delta(1)).unwrap();
        card.set(1, 2, delta(0)).unwrap();
        assert_eq!(card.played(), 2);
        // 2 / 18 = 11.1%
        assert_eq!(card.progress(), 11);
        card.set(0, 3, delta(0)).unwrap();
        // 3 / 18 = 16.7%
        assert_eq!(card.progress(), 17);

        for hole in 1..=NUM_HOLES {
            card.set(0, hole, delta(0)).unwrap();
        }
        assert_eq!(card.progress(), 100);

        card.clear();
        assert_eq!(card.played(), 0);
        assert_eq!(card.undo_len(), 0);
    }

    #[test]
    fn undo_and_redo() {
        let mut card: Scorecard = Scorecard::default();

        card.set(0, 4, delta(1)).unwrap();
        card.set(0, 4, delta(-1)).unwrap();
        card.set(0, 4, None).unwrap();
        assert_eq!(card.undo_len(), 3);

        assert_eq!(card.undo(), Some(4));
        assert_eq!(card.get(0, 4), Ok(delta(-1)));
        assert_eq!(card.undo(), Some(4));
        assert_eq!(card.get(0, 4), Ok(delta(1)));
        assert_eq!(card.redo(), Some(4));
        assert_eq!(card.get(0, 4), Ok(delta(-1)));
        assert_eq!(card.redo_len(), 1);

        // A new entry drops the redo list
        card.set(1, 5, delta(2)).unwrap();
        assert_eq!(card.redo_len(), 0);
        assert_eq!(card.redo(), None);

        // Setting the same value is not an operation
        card.set(1, 5, delta(2)).unwrap();
        assert_eq!(card.undo_len(), 3);
    }

    #[test]
    fn unknown_player_and_hole() {
        let mut card: Scorecard = Scorecard::default();

        assert_eq!(card.set(2, 1, None), Err(ScoreError::UnknownPlayer(2)));
        assert_eq!(card.set(0, 0, None), Err(ScoreError::UnknownHole(0)));
        assert_eq!(card.set(0, 19, delta(1)), Err(ScoreError::UnknownHole(19)));
        assert_eq!(card.undo_len(), 0);
    }

    #[test]
    fn rename_players() {
        let mut card: Scorecard = Scorecard::new(&["Ann", "Bob", "Cy"]);

        assert_eq!(card.players().len(), 3);
        card.rename(1, "  Bea ").unwrap();
        assert_eq!(card.player(1).map(|p| p.name.as_str()), Ok("Bea"));
        card.rename(2, "").unwrap();
        assert_eq!(card.player(2).map(|p| p.name.as_str()), Ok("P3"));
        assert_eq!(card.rename(3, "Dee"), Err(ScoreError::UnknownPlayer(3)));
    }

    #[test]
    fn verify_checks_the_undo_and_redo_lists() {
        let mut card: Scorecard = Scorecard::default();
        card.set(0, 2, delta(1)).unwrap();
        card.set(1, 3, delta(-1)).unwrap();
        card.undo();
        assert_eq!(card.verify(), Ok(()));

        card.undo_op.push(DoOperation {
            player: 0,
            hole: 0,
            before: None,
            after: delta(2),
        });
        assert_eq!(card.verify(), Err(ScoreError::UnknownHole(0)));

        // Replaying the bad operation leaves the entries untouched
        assert_eq!(card.undo(), Some(0));
        assert_eq!(card.player(0).map(|p| p.entries()[0]), Ok(None));
        assert_eq!(card.verify(), Err(ScoreError::UnknownHole(0)));

        card.redo_op.clear();
        card.redo_op.push(DoOperation {
            player: 5,
            hole: 4,
            before: None,
            after: None,
        });
        assert_eq!(card.verify(), Err(ScoreError::UnknownPlayer(5)));
    }
}
