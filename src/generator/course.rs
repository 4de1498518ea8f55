/*
course.rs

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

//! Validated 18-hole course.
//!
//! A [`Course`] can only be built with [`Course::from_targets`], which verifies all the course
//! constraints.
//! The course generator ([`super::random_course`]) and the share token decoder
//! ([`crate::codec`]) both go through that function, so a course built from a token is checked
//! exactly like a generated one.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::edges::UsedEdges;
use super::goals::{GOAL_COUNT, Goal, Origin};
use super::rules::{Par, RuleSet};

/// Number of holes in a course.
pub const NUM_HOLES: usize = 18;

/// Number of holes in the front nine.
pub const FRONT_NINE: usize = 9;

/// Holes (starting at 1) that must end at [`FIXED_GOAL`].
pub const FIXED_HOLES: [usize; 2] = [9, 18];

/// Goal of the fixed holes.
pub const FIXED_GOAL: Goal = Goal::Green;

/// Minimum number of holes that must end at each goal.
pub const MIN_VISITS: usize = 2;

/// Whether the hole (starting at 1) is a fixed hole.
pub fn is_fixed_hole(hole: usize) -> bool {
    FIXED_HOLES.contains(&hole)
}

/// Course constraint violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseError {
    /// The course does not have [`NUM_HOLES`] holes.
    WrongLength(usize),

    /// A fixed hole does not end at [`FIXED_GOAL`].
    FixedHole { hole: usize, found: Goal },

    /// The first hole ends at Green.
    StartOnGreen,

    /// The rules do not allow the throw.
    IllegalTransition { hole: usize, from: Origin, to: Goal },

    /// The throw has already been used by a previous hole.
    RepeatedTransition { hole: usize, from: Origin, to: Goal },

    /// A goal is not visited often enough.
    Coverage { goal: Goal, visits: usize },
}

impl fmt::Display for CourseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CourseError::WrongLength(n) => write!(f, "{n} holes instead of {NUM_HOLES}"),
            CourseError::FixedHole { hole, found } => {
                write!(f, "hole {hole} must end at {FIXED_GOAL}, not {found}")
            }
            CourseError::StartOnGreen => write!(f, "the first hole cannot end at Green"),
            CourseError::IllegalTransition { hole, from, to } => {
                write!(f, "hole {hole}: throw {from} -> {to} is not allowed")
            }
            CourseError::RepeatedTransition { hole, from, to } => {
                write!(f, "hole {hole}: throw {from} -> {to} is already used")
            }
            CourseError::Coverage { goal, visits } => write!(
                f,
                "{goal} is the target of {visits} holes (at least {MIN_VISITS} required)"
            ),
        }
    }
}

impl std::error::Error for CourseError {}

/// Directed throw of a hole.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub from: Origin,
    pub to: Goal,
}

impl Edge {
    /// Create an [`Edge`] object.
    pub fn new(from: impl Into<Origin>, to: Goal) -> Self {
        Self {
            from: from.into(),
            to,
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Hole of a course.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Hole {
    /// Hole number, starting at 1.
    pub number: usize,

    /// Throw to play.
    pub edge: Edge,

    /// Par of the throw.
    pub par: Par,
}

/// Course of [`NUM_HOLES`] holes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Course {
    holes: Vec<Hole>,
}

impl Course {
    /// Build a course from the target of each hole.
    ///
    /// The origin of the first hole is the tee, and the origin of the other holes is the target
    /// of the previous hole.
    ///
    /// # Errors
    ///
    /// Return the first constraint violation, checked in this order: number of holes, fixed
    /// holes, first hole, allowed and unique throws (hole by hole), goal coverage.
    pub fn from_targets(targets: &[Goal], rules: &RuleSet) -> Result<Self, CourseError> {
        if targets.len() != NUM_HOLES {
            return Err(CourseError::WrongLength(targets.len()));
        }

        for hole in FIXED_HOLES {
            let found: Goal = targets[hole - 1];
            if found != FIXED_GOAL {
                return Err(CourseError::FixedHole { hole, found });
            }
        }

        if targets[0] == Goal::Green {
            return Err(CourseError::StartOnGreen);
        }

        let mut used: UsedEdges = UsedEdges::new();
        let mut visits: [usize; GOAL_COUNT] = [0; GOAL_COUNT];
        let mut holes: Vec<Hole> = Vec::with_capacity(NUM_HOLES);
        let mut from: Origin = Origin::Start;

        for (i, to) in targets.iter().copied().enumerate() {
            let hole: usize = i + 1;

            if !rules.is_allowed(from, to) {
                return Err(CourseError::IllegalTransition { hole, from, to });
            }
            if !used.insert(from, to) {
                return Err(CourseError::RepeatedTransition { hole, from, to });
            }
            visits[to.index()] += 1;
            holes.push(Hole {
                number: hole,
                edge: Edge { from, to },
                par: rules.par_of(from, to),
            });
            from = Origin::Goal(to);
        }

        if let Some(goal) = Goal::ALL
            .into_iter()
            .find(|g| visits[g.index()] < MIN_VISITS)
        {
            return Err(CourseError::Coverage {
                goal,
                visits: visits[goal.index()],
            });
        }

        Ok(Self { holes })
    }

    /// Re-run the validation against the given rules.
    pub fn revalidate(&self, rules: &RuleSet) -> Result<Self, CourseError> {
        Self::from_targets(&self.targets(), rules)
    }

    /// All the holes, in order.
    pub fn holes(&self) -> &[Hole] {
        &self.holes
    }

    /// Return the hole with the given number (starting at 1).
    pub fn hole(&self, number: usize) -> Option<&Hole> {
        number.checked_sub(1).and_then(|i| self.holes.get(i))
    }

    /// Target of each hole, in order.
    pub fn targets(&self) -> Vec<Goal> {
        self.holes.iter().map(|h| h.edge.to).collect()
    }

    /// Number of holes that end at the given goal.
    pub fn visits(&self, goal: Goal) -> usize {
        self.holes.iter().filter(|h| h.edge.to == goal).count()
    }

    /// Sum of the par of the holes in the given range of hole indexes (starting at 0).
    fn par_sum(&self, range: std::ops::Range<usize>) -> u32 {
        self.holes[range].iter().map(|h| u32::from(h.par.value())).sum()
    }

    /// Par of the front nine.
    pub fn front_par(&self) -> u32 {
        self.par_sum(0..FRONT_NINE)
    }

    /// Par of the back nine.
    pub fn back_par(&self) -> u32 {
        self.par_sum(FRONT_NINE..NUM_HOLES)
    }

    /// Par of the course.
    pub fn total_par(&self) -> u32 {
        self.par_sum(0..NUM_HOLES)
    }
}
