/*
edges.rs

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

//! Directed throws already used by a course.

use log::debug;

use super::goals::{GOAL_COUNT, Goal, ORIGIN_COUNT, Origin};
use super::rules::RuleSet;

/// Set of the directed throws (origin to goal) already played in a course.
///
/// A course cannot use the same throw twice. The tee to goal throws are tracked like the
/// others.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsedEdges {
    /// For each origin, whether the throw to each goal has been used.
    used: [[bool; GOAL_COUNT]; ORIGIN_COUNT],

    /// Number of used throws.
    count: usize,
}

impl Default for UsedEdges {
    fn default() -> Self {
        Self::new()
    }
}

impl UsedEdges {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            used: [[false; GOAL_COUNT]; ORIGIN_COUNT],
            count: 0,
        }
    }

    /// Remove all the throws from the set.
    pub fn clear(&mut self) {
        self.used = [[false; GOAL_COUNT]; ORIGIN_COUNT];
        self.count = 0;
    }

    /// Mark the throw as used.
    ///
    /// Return `false` if the throw was already used.
    pub fn insert(&mut self, from: Origin, to: Goal) -> bool {
        let cell: &mut bool = &mut self.used[from.index()][to.index()];
        if *cell {
            return false;
        }
        *cell = true;
        self.count += 1;
        true
    }

    /// Release the throw.
    pub fn remove(&mut self, from: Origin, to: Goal) {
        let cell: &mut bool = &mut self.used[from.index()][to.index()];
        if *cell {
            *cell = false;
            self.count -= 1;
        }
    }

    /// Whether the throw has been used.
    pub fn contains(&self, from: Origin, to: Goal) -> bool {
        self.used[from.index()][to.index()]
    }

    /// Number of used throws.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether no throw has been used yet.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of throws into `to` that the rules allow from a goal and that are still unused.
    ///
    /// The tee is not counted: it is only used by the first hole.
    pub fn available_into(&self, to: Goal, rules: &RuleSet) -> usize {
        rules
            .incoming(to)
            .filter(|from| !self.contains(Origin::Goal(*from), to))
            .count()
    }

    /// Print the used throws.
    pub fn debug(&self) {
        let mut s: String = String::new();
        let origins = std::iter::once(Origin::Start).chain(Goal::ALL.into_iter().map(Origin::Goal));

        for from in origins {
            s.clear();
            s.push_str(&format!("{from:>6} -->"));
            for to in Goal::ALL.iter().filter(|to| self.contains(from, **to)) {
                s.push_str(&format!(" {to}"));
            }
            debug!("{s}");
        }
    }
}
