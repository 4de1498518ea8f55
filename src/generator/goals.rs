/*
goals.rs

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

//! Goals of the course and the tee.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum_macros::FromRepr;

/// Number of goals on the field.
pub const GOAL_COUNT: usize = 7;

/// Number of possible origins for a throw: the goals plus the tee.
pub const ORIGIN_COUNT: usize = GOAL_COUNT + 1;

/// Target of a throw.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, FromRepr,
)]
#[repr(usize)]
pub enum Goal {
    White,
    Orange,
    Blue,
    Pink,
    Red,
    Green,
    Yellow,
}

impl Goal {
    /// All the goals, in canonical order.
    pub const ALL: [Goal; GOAL_COUNT] = [
        Goal::White,
        Goal::Orange,
        Goal::Blue,
        Goal::Pink,
        Goal::Red,
        Goal::Green,
        Goal::Yellow,
    ];

    /// Position of the goal in [`Goal::ALL`]. Used to index the rule and counter tables.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Name of the goal, as used in share tokens and rules files.
    pub fn name(self) -> &'static str {
        match self {
            Goal::White => "White",
            Goal::Orange => "Orange",
            Goal::Blue => "Blue",
            Goal::Pink => "Pink",
            Goal::Red => "Red",
            Goal::Green => "Green",
            Goal::Yellow => "Yellow",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Error returned when a string does not name a goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGoal(pub String);

impl fmt::Display for UnknownGoal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown goal `{}`", self.0)
    }
}

impl std::error::Error for UnknownGoal {}

/// Names are case sensitive: "Green" is a goal, "green" is not.
impl FromStr for Goal {
    type Err = UnknownGoal;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Goal::ALL
            .iter()
            .find(|g| g.name() == s)
            .copied()
            .ok_or_else(|| UnknownGoal(s.to_string()))
    }
}

/// Where a throw starts from: the tee for the first hole, a goal for the others.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Origin {
    Start,
    Goal(Goal),
}

impl Origin {
    /// Name used for the tee in rules files and reports.
    pub const START_NAME: &'static str = "Tee";

    /// Index in the origin tables. The goals keep their own index and the tee comes last.
    pub fn index(self) -> usize {
        match self {
            Origin::Start => GOAL_COUNT,
            Origin::Goal(g) => g.index(),
        }
    }

    /// Whether the origin is the given goal.
    pub fn is(self, goal: Goal) -> bool {
        self == Origin::Goal(goal)
    }
}

impl From<Goal> for Origin {
    fn from(goal: Goal) -> Self {
        Origin::Goal(goal)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Origin::Start => f.pad(Origin::START_NAME),
            Origin::Goal(g) => f.pad(g.name()),
        }
    }
}

impl FromStr for Origin {
    type Err = UnknownGoal;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == Origin::START_NAME {
            Ok(Origin::Start)
        } else {
            s.parse::<Goal>().map(Origin::Goal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_canonical_order() {
        for (i, g) in Goal::ALL.iter().enumerate() {
            assert_eq!(g.index(), i);
            assert_eq!(Goal::from_repr(i), Some(*g));
        }
        assert_eq!(Goal::from_repr(GOAL_COUNT), None);
        assert_eq!(Origin::Start.index(), GOAL_COUNT);
    }

    #[test]
    fn names_parse_back() {
        for g in Goal::ALL {
            assert_eq!(g.name().parse::<Goal>(), Ok(g));
        }
        assert_eq!("Tee".parse::<Origin>(), Ok(Origin::Start));
        assert_eq!("Red".parse::<Origin>(), Ok(Origin::Goal(Goal::Red)));
    }

    #[test]
    fn names_are_case_sensitive() {
        assert_eq!(
            "green".parse::<Goal>(),
            Err(UnknownGoal("green".to_string()))
        );
        assert!("Tee".parse::<Goal>().is_err());
        assert!("Purple".parse::<Origin>().is_err());
    }
}
