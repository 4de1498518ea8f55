/*
rules.rs

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

//! Transition rules between goals.
//!
//! A [`RuleSet`] answers two questions for a throw from an origin to a goal:
//!
//! * Is the throw allowed? See [`RuleSet::is_allowed`].
//! * What is its par? See [`RuleSet::par_of`].
//!
//! The tables are indexed by [`Goal::index`] and [`Origin::index`], so a lookup never misses.
//! Pairs that are not listed are allowed and have a par of 4.
//!
//! The standard rules are returned by [`RuleSet::standard`].
//! Other rules can be loaded from a JSON file with [`RuleSet::from_file`]:
//!
//! ```json
//! {
//!   "blocked": [["Orange", "Pink"], ["Tee", "Yellow"]],
//!   "start_par3": ["White"],
//!   "par3": [["White", "Yellow"]],
//!   "par5": [["White", "Blue"]]
//! }
//! ```

use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::goals::{GOAL_COUNT, Goal, ORIGIN_COUNT, Origin, UnknownGoal};

/// Expected number of throws for a hole.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(into = "u8", try_from = "u8")]
pub enum Par {
    Three,
    Four,
    Five,
}

impl Par {
    /// Number of throws.
    pub fn value(self) -> u8 {
        match self {
            Par::Three => 3,
            Par::Four => 4,
            Par::Five => 5,
        }
    }
}

impl From<Par> for u8 {
    fn from(par: Par) -> Self {
        par.value()
    }
}

/// Error returned when converting a number that is not a par.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidPar(pub u8);

impl fmt::Display for InvalidPar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid par {} (must be 3, 4, or 5)", self.0)
    }
}

impl Error for InvalidPar {}

impl TryFrom<u8> for Par {
    type Error = InvalidPar;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(Par::Three),
            4 => Ok(Par::Four),
            5 => Ok(Par::Five),
            v => Err(InvalidPar(v)),
        }
    }
}

impl fmt::Display for Par {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Blocked throws of the standard rules. The tee to Green throw is always blocked and is not
/// listed here.
const STANDARD_BLOCKED: [(Goal, Goal); 12] = [
    (Goal::Orange, Goal::Pink),
    (Goal::Orange, Goal::Blue),
    (Goal::Blue, Goal::Orange),
    (Goal::Blue, Goal::Red),
    (Goal::Pink, Goal::Orange),
    (Goal::Pink, Goal::Red),
    (Goal::Red, Goal::Blue),
    (Goal::Red, Goal::Pink),
    (Goal::Green, Goal::Yellow),
    (Goal::Yellow, Goal::Green),
    (Goal::Green, Goal::Pink),
    (Goal::Pink, Goal::Green),
];

/// Goals that are a par 3 from the tee in the standard rules.
const STANDARD_START_PAR3: [Goal; 1] = [Goal::White];

/// Par 3 pairs of the standard rules, in both directions.
const STANDARD_PAR3: [(Goal, Goal); 7] = [
    (Goal::White, Goal::Yellow),
    (Goal::White, Goal::Green),
    (Goal::Yellow, Goal::Red),
    (Goal::Yellow, Goal::Pink),
    (Goal::Red, Goal::Orange),
    (Goal::Red, Goal::Blue),
    (Goal::Blue, Goal::Pink),
];

/// Par 5 pairs of the standard rules, in both directions.
const STANDARD_PAR5: [(Goal, Goal); 2] = [(Goal::White, Goal::Blue), (Goal::White, Goal::Orange)];

/// Adjacency blocklist and par tables.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(into = "RulesFile", try_from = "RulesFile")]
pub struct RuleSet {
    /// For each origin, whether the throw to each goal is blocked.
    blocked: [[bool; GOAL_COUNT]; ORIGIN_COUNT],

    /// Par of the throws from the tee.
    start_par: [Par; GOAL_COUNT],

    /// Par of the throws between two goals. The table is kept symmetric.
    pair_par: [[Par; GOAL_COUNT]; GOAL_COUNT],
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl RuleSet {
    /// Rules with no blocked throw (besides the built-in ones) and a par of 4 everywhere.
    pub fn unrestricted() -> Self {
        Self {
            blocked: [[false; GOAL_COUNT]; ORIGIN_COUNT],
            start_par: [Par::Four; GOAL_COUNT],
            pair_par: [[Par::Four; GOAL_COUNT]; GOAL_COUNT],
        }
    }

    /// The standard rules of the game.
    pub fn standard() -> Self {
        let mut rules: RuleSet = Self::unrestricted();

        for (from, to) in STANDARD_BLOCKED {
            rules.block(from.into(), to);
        }
        for to in STANDARD_START_PAR3 {
            rules.set_start_par(to, Par::Three);
        }
        for (a, b) in STANDARD_PAR3 {
            rules.set_pair_par(a, b, Par::Three);
        }
        for (a, b) in STANDARD_PAR5 {
            rules.set_pair_par(a, b, Par::Five);
        }
        rules
    }

    /// Load the rules from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        debug!("Loading rules from {path:?}");
        let file: File = File::open(path)?;
        let reader: BufReader<File> = BufReader::new(file);
        let rules: RuleSet = serde_json::from_reader(reader)?;
        Ok(rules)
    }

    /// Block the throw from `from` to `to`.
    pub fn block(&mut self, from: Origin, to: Goal) -> &mut Self {
        self.blocked[from.index()][to.index()] = true;
        self
    }

    /// Remove the throw from `from` to `to` from the blocklist.
    ///
    /// The throws that are always illegal (same goal, tee to Green) stay illegal.
    pub fn unblock(&mut self, from: Origin, to: Goal) -> &mut Self {
        self.blocked[from.index()][to.index()] = false;
        self
    }

    /// Set the par of the throw from the tee to the given goal.
    pub fn set_start_par(&mut self, to: Goal, par: Par) -> &mut Self {
        self.start_par[to.index()] = par;
        self
    }

    /// Set the par of the throws between two goals, in both directions.
    pub fn set_pair_par(&mut self, a: Goal, b: Goal, par: Par) -> &mut Self {
        self.pair_par[a.index()][b.index()] = par;
        self.pair_par[b.index()][a.index()] = par;
        self
    }

    /// Whether the throw from `from` to `to` is allowed.
    pub fn is_allowed(&self, from: Origin, to: Goal) -> bool {
        if from.is(to) {
            return false;
        }
        if from == Origin::Start && to == Goal::Green {
            return false;
        }
        !self.blocked[from.index()][to.index()]
    }

    /// Par of the throw from `from` to `to`.
    pub fn par_of(&self, from: Origin, to: Goal) -> Par {
        match from {
            Origin::Start => self.start_par[to.index()],
            Origin::Goal(g) => self.pair_par[g.index()][to.index()],
        }
    }

    /// Goals from which a throw to `to` is allowed.
    pub fn incoming(&self, to: Goal) -> impl Iterator<Item = Goal> + '_ {
        Goal::ALL
            .into_iter()
            .filter(move |g| self.is_allowed(Origin::Goal(*g), to))
    }

    /// Throws listed in the blocklist, tee first.
    pub fn blocked_throws(&self) -> Vec<(Origin, Goal)> {
        let origins = std::iter::once(Origin::Start).chain(Goal::ALL.into_iter().map(Origin::Goal));
        let mut ret: Vec<(Origin, Goal)> = Vec::new();

        for from in origins {
            for to in Goal::ALL {
                if self.blocked[from.index()][to.index()] {
                    ret.push((from, to));
                }
            }
        }
        ret
    }

    /// Unordered goal pairs with the given par, each pair listed once.
    fn pairs_with_par(&self, par: Par) -> Vec<(Goal, Goal)> {
        let mut ret: Vec<(Goal, Goal)> = Vec::new();

        for (i, a) in Goal::ALL.iter().enumerate() {
            for b in &Goal::ALL[i + 1..] {
                if self.pair_par[a.index()][b.index()] == par {
                    ret.push((*a, *b));
                }
            }
        }
        ret
    }
}

/// JSON representation of a [`RuleSet`].
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
struct RulesFile {
    /// Blocked throws as `[from, to]`. The origin is a goal name or `Tee`.
    blocked: Vec<(String, Goal)>,

    /// Goals that are a par 3 from the tee.
    start_par3: Vec<Goal>,

    /// Goals that are a par 5 from the tee.
    start_par5: Vec<Goal>,

    /// Par 3 goal pairs.
    par3: Vec<(Goal, Goal)>,

    /// Par 5 goal pairs. They take precedence over the par 3 pairs.
    par5: Vec<(Goal, Goal)>,
}

impl From<RuleSet> for RulesFile {
    fn from(rules: RuleSet) -> Self {
        Self {
            blocked: rules
                .blocked_throws()
                .into_iter()
                .map(|(from, to)| (from.to_string(), to))
                .collect(),
            start_par3: Goal::ALL
                .into_iter()
                .filter(|g| rules.start_par[g.index()] == Par::Three)
                .collect(),
            start_par5: Goal::ALL
                .into_iter()
                .filter(|g| rules.start_par[g.index()] == Par::Five)
                .collect(),
            par3: rules.pairs_with_par(Par::Three),
            par5: rules.pairs_with_par(Par::Five),
        }
    }
}

impl TryFrom<RulesFile> for RuleSet {
    type Error = UnknownGoal;

    fn try_from(file: RulesFile) -> Result<Self, Self::Error> {
        let mut rules: RuleSet = RuleSet::unrestricted();

        for (from, to) in &file.blocked {
            rules.block(from.parse::<Origin>()?, *to);
        }
        for to in file.start_par3 {
            rules.set_start_par(to, Par::Three);
        }
        for to in file.start_par5 {
            rules.set_start_par(to, Par::Five);
        }
        for (a, b) in file.par3 {
            rules.set_pair_par(a, b, Par::Three);
        }
        for (a, b) in file.par5 {
            rules.set_pair_par(a, b, Par::Five);
        }
        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_goal_and_tee_to_green_are_always_blocked() {
        let rules: RuleSet = RuleSet::unrestricted();

        for g in Goal::ALL {
            assert!(!rules.is_allowed(g.into(), g), "{g} -> {g} must be blocked");
        }
        assert!(!rules.is_allowed(Origin::Start, Goal::Green));
        assert!(rules.is_allowed(Origin::Start, Goal::White));
        assert!(rules.is_allowed(Goal::Pink.into(), Goal::Green));
    }

    #[test]
    fn standard_blocklist_is_directional() {
        let rules: RuleSet = RuleSet::standard();

        assert!(!rules.is_allowed(Goal::Orange.into(), Goal::Pink));
        assert!(!rules.is_allowed(Goal::Pink.into(), Goal::Orange));
        assert!(!rules.is_allowed(Goal::Pink.into(), Goal::Green));
        assert!(!rules.is_allowed(Goal::Green.into(), Goal::Pink));
        assert!(rules.is_allowed(Goal::Orange.into(), Goal::Red));
        assert!(rules.is_allowed(Goal::Blue.into(), Goal::Pink));
        assert!(rules.is_allowed(Goal::White.into(), Goal::Green));
        assert_eq!(rules.blocked_throws().len(), STANDARD_BLOCKED.len());
    }

    #[test]
    fn standard_par_table() {
        let rules: RuleSet = RuleSet::standard();

        assert_eq!(rules.par_of(Origin::Start, Goal::White), Par::Three);
        assert_eq!(rules.par_of(Origin::Start, Goal::Yellow), Par::Four);
        assert_eq!(rules.par_of(Goal::White.into(), Goal::Yellow), Par::Three);
        assert_eq!(rules.par_of(Goal::Yellow.into(), Goal::White), Par::Three);
        assert_eq!(rules.par_of(Goal::Orange.into(), Goal::White), Par::Five);
        assert_eq!(rules.par_of(Goal::White.into(), Goal::Blue), Par::Five);
        assert_eq!(rules.par_of(Goal::Green.into(), Goal::Red), Par::Four);
    }

    #[test]
    fn par_is_pure_and_bounded() {
        let rules: RuleSet = RuleSet::standard();
        let origins = std::iter::once(Origin::Start).chain(Goal::ALL.into_iter().map(Origin::Goal));

        for from in origins {
            for to in Goal::ALL {
                let par: Par = rules.par_of(from, to);
                assert_eq!(par, rules.par_of(from, to));
                assert!((3..=5).contains(&par.value()));
            }
        }
    }

    #[test]
    fn incoming_lists_allowed_origins() {
        let rules: RuleSet = RuleSet::standard();
        let into_green: Vec<Goal> = rules.incoming(Goal::Green).collect();

        assert_eq!(
            into_green,
            vec![Goal::White, Goal::Orange, Goal::Blue, Goal::Red]
        );
    }

    #[test]
    fn rules_file_round_trip() {
        let rules: RuleSet = RuleSet::standard();
        let json: String = serde_json::to_string(&rules).unwrap();
        let back: RuleSet = serde_json::from_str(&json).unwrap();

        assert_eq!(rules, back);
    }

    #[test]
    fn tee_par5_survives_the_file() {
        let mut rules: RuleSet = RuleSet::standard();
        rules.set_start_par(Goal::Red, Par::Five);
        let json: String = serde_json::to_string(&rules).unwrap();
        let back: RuleSet = serde_json::from_str(&json).unwrap();

        assert_eq!(back.par_of(Origin::Start, Goal::Red), Par::Five);
        assert_eq!(rules, back);
    }

    #[test]
    fn rules_file_with_tee_origin() {
        let json = r#"{
            "blocked": [["Tee", "Yellow"], ["Red", "White"]],
            "par5": [["Green", "Blue"]]
        }"#;
        let rules: RuleSet = serde_json::from_str(json).unwrap();

        assert!(!rules.is_allowed(Origin::Start, Goal::Yellow));
        assert!(!rules.is_allowed(Goal::Red.into(), Goal::White));
        assert!(rules.is_allowed(Goal::White.into(), Goal::Red));
        assert_eq!(rules.par_of(Goal::Blue.into(), Goal::Green), Par::Five);
        assert_eq!(rules.par_of(Origin::Start, Goal::White), Par::Four);
    }

    #[test]
    fn rules_file_rejects_unknown_names() {
        assert!(serde_json::from_str::<RuleSet>(r#"{"blocked": [["Start", "Red"]]}"#).is_err());
        assert!(serde_json::from_str::<RuleSet>(r#"{"par3": [["Red", "Purple"]]}"#).is_err());
    }

    #[test]
    fn par_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Par::Five).unwrap(), "5");
        assert_eq!(serde_json::from_str::<Par>("3").unwrap(), Par::Three);
        assert!(serde_json::from_str::<Par>("6").is_err());
    }
}
