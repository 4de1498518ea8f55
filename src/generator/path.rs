/*
path.rs

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

//! Course being built, as the ordered list of the hole targets.

use super::goals::{GOAL_COUNT, Goal, Origin};

/// Path object.
#[derive(Debug, Default, Clone)]
pub struct Path {
    /// Target of each hole, in order.
    targets: Vec<Goal>,

    /// Number of holes that end at each goal.
    /// Instead of counting the goal in the [`Path::targets`] vector, this array is updated on
    /// every push and pop.
    visits: [usize; GOAL_COUNT],
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.targets == other.targets
    }
}

impl Path {
    /// Create a [`Path`] object.
    pub fn new(num_holes: usize) -> Self {
        Self {
            targets: Vec::with_capacity(num_holes),
            visits: [0; GOAL_COUNT],
        }
    }

    /// Remove all the targets from the path.
    pub fn clear(&mut self) {
        self.targets.clear();
        self.visits = [0; GOAL_COUNT];
    }

    /// Add a target to the path.
    pub fn push(&mut self, goal: Goal) {
        self.targets.push(goal);
        self.visits[goal.index()] += 1;
    }

    /// Remove the last target from the path.
    pub fn pop(&mut self) {
        if let Some(g) = self.targets.pop() {
            self.visits[g.index()] -= 1;
        }
    }

    /// Get the number of holes in the path.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether the path has no hole yet.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Return a reference to the targets.
    pub fn get(&self) -> &[Goal] {
        &self.targets
    }

    /// Origin of the next hole: the tee for an empty path, the last target otherwise.
    pub fn next_origin(&self) -> Origin {
        match self.targets.last() {
            Some(g) => Origin::Goal(*g),
            None => Origin::Start,
        }
    }

    /// Number of holes that end at the given goal.
    pub fn visits(&self, goal: Goal) -> usize {
        self.visits[goal.index()]
    }

    /// Number of visits still missing for the given goal to reach `min_visits`.
    pub fn missing(&self, goal: Goal, min_visits: usize) -> usize {
        min_visits.saturating_sub(self.visits(goal))
    }

    /// Goals that have fewer than `min_visits` visits, with their visit count.
    pub fn under_visited(&self, min_visits: usize) -> Vec<(Goal, usize)> {
        self.visits
            .iter()
            .enumerate()
            .filter(|(_, count)| **count < min_visits)
            .filter_map(|(i, count)| Goal::from_repr(i).map(|g| (g, *count)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_pop_keep_visits() {
        let mut path: Path = Path::new(18);

        assert_eq!(path.next_origin(), Origin::Start);
        path.push(Goal::Red);
        path.push(Goal::White);
        path.push(Goal::Red);
        assert_eq!(path.visits(Goal::Red), 2);
        assert_eq!(path.next_origin(), Origin::Goal(Goal::Red));

        path.pop();
        assert_eq!(path.visits(Goal::Red), 1);
        assert_eq!(path.missing(Goal::Red, 2), 1);
        assert_eq!(path.missing(Goal::White, 1), 0);
        assert_eq!(path.get(), &[Goal::Red, Goal::White]);

        path.clear();
        assert!(path.is_empty());
        assert_eq!(path.visits(Goal::White), 0);
    }

    #[test]
    fn under_visited_lists_missing_goals() {
        let mut path: Path = Path::new(18);

        for g in [Goal::White, Goal::Orange, Goal::White] {
            path.push(g);
        }
        let under: Vec<(Goal, usize)> = path.under_visited(2);

        assert_eq!(under.len(), Goal::ALL.len() - 1);
        assert!(under.contains(&(Goal::Orange, 1)));
        assert!(under.contains(&(Goal::Yellow, 0)));
        assert!(!under.iter().any(|(g, _)| *g == Goal::White));
    }
}
