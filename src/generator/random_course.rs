/*
random_course.rs

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

//! Generate a random course.

use log::{Level, debug, log_enabled, warn};
use rand::Rng;
use rand::seq::SliceRandom;
use std::fmt;
use std::time::Instant;

use super::course::{
    Course, FIXED_GOAL, FIXED_HOLES, MIN_VISITS, NUM_HOLES, is_fixed_hole,
};
use super::edges::UsedEdges;
use super::goals::Goal;
use super::path::Path;
use super::rules::RuleSet;

// Number of attempts before giving up. Each attempt reshuffles the search order.
const MAX_ATTEMPTS: usize = 1000;

// Number of search nodes an attempt can visit before it is abandoned. An unlucky search order can
// spend a long time in a dead subtree; a fresh attempt is usually faster.
const MAX_ITERATIONS: usize = 10_000;

/// Type of errors.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// No course found after all the attempts.
    Exhausted { attempts: usize },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GenerationError::Exhausted { attempts } => {
                write!(f, "no course found after {attempts} attempts")
            }
        }
    }
}

impl std::error::Error for GenerationError {}

/// Why a search branch stopped.
#[derive(Debug, PartialEq)]
enum SearchError {
    /// No possible course from this branch.
    DeadEnd,

    /// The attempt used all its iterations.
    IterationsExceeded,
}

/// State of one attempt, rolled back step by step while backtracking.
#[derive(Debug, Clone)]
struct SearchState {
    /// Targets chosen so far, with their visit counts.
    path: Path,

    /// Throws already used by the chosen holes.
    used: UsedEdges,
}

impl SearchState {
    fn new() -> Self {
        Self {
            path: Path::new(NUM_HOLES),
            used: UsedEdges::new(),
        }
    }

    fn clear(&mut self) {
        self.path.clear();
        self.used.clear();
    }
}

/// [`RandomCourse`] object.
#[derive(Debug, Clone)]
pub struct RandomCourse {
    /// Rules that the generated courses follow.
    rules: RuleSet,

    /// Number of attempts before [`RandomCourse::generate`] gives up.
    pub max_attempts: usize,

    /// Number of search nodes per attempt.
    pub max_iterations: usize,

    /// Number of attempts it took to generate the last course.
    pub attempts: usize,

    /// Number of search nodes, over all the attempts, it took to generate the last course.
    pub iteration: usize,

    /// Duration in seconds it took to generate the last course.
    pub duration: f32,

    /// Search nodes visited by the current attempt.
    attempt_iteration: usize,

    /// Time when the generation started. Used to compute the [`RandomCourse::duration`].
    start: Instant,
}

impl Default for RandomCourse {
    fn default() -> Self {
        Self::new(&RuleSet::standard())
    }
}

impl RandomCourse {
    /// Create the object.
    pub fn new(rules: &RuleSet) -> Self {
        Self::with_limits(rules, MAX_ATTEMPTS, MAX_ITERATIONS)
    }

    /// Create the object with custom attempt and iteration limits.
    pub fn with_limits(rules: &RuleSet, max_attempts: usize, max_iterations: usize) -> Self {
        Self {
            rules: rules.clone(),
            max_attempts,
            max_iterations,
            attempts: 0,
            iteration: 0,
            duration: 0.0,
            attempt_iteration: 0,
            start: Instant::now(),
        }
    }

    /// Rules that the generated courses follow.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Generate and return a random course, shuffling with the thread random generator.
    ///
    /// # Errors
    ///
    /// See [`RandomCourse::generate_with_rng`].
    pub fn generate(&mut self) -> Result<Course, GenerationError> {
        self.generate_with_rng(&mut rand::rng())
    }

    /// Generate and return a random course, shuffling with the given random generator.
    ///
    /// # Errors
    ///
    /// The method returns an error if no course is found after [`RandomCourse::max_attempts`]
    /// attempts. This can happen by bad luck, and the method can then be retried. If it happens
    /// every time, the rules cannot produce a course.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Course, GenerationError> {
        self.attempts = 0;
        self.iteration = 0;
        self.duration = 0.0;
        self.start = Instant::now();

        let mut state: SearchState = SearchState::new();

        for attempt in 1..=self.max_attempts {
            self.attempts = attempt;
            self.attempt_iteration = 0;
            state.clear();

            match self.find_course(&mut state, rng) {
                Ok(course) => {
                    self.duration = self.start.elapsed().as_secs_f32();
                    debug!(
                        "Attempts = {}  Iterations = {}  Duration = {}",
                        self.attempts, self.iteration, self.duration
                    );
                    return Ok(course);
                }
                Err(SearchError::IterationsExceeded) => {
                    debug!("Attempt {attempt}: more than {} iterations", self.max_iterations);
                }
                Err(SearchError::DeadEnd) => {
                    debug!("Attempt {attempt}: no possible course");
                }
            }
        }

        self.duration = self.start.elapsed().as_secs_f32();
        warn!(
            "No course after {} attempts ({} iterations, {}s)",
            self.max_attempts, self.iteration, self.duration
        );
        Err(GenerationError::Exhausted {
            attempts: self.max_attempts,
        })
    }

    /// Recursively choose the target of the next hole.
    ///
    /// On error, `state` is left as it was when the method was called.
    fn find_course<R: Rng + ?Sized>(
        &mut self,
        state: &mut SearchState,
        rng: &mut R,
    ) -> Result<Course, SearchError> {
        let hole: usize = state.path.len() + 1;

        if hole > NUM_HOLES {
            // The pruning should make this impossible, but never return an uncovered course
            let under: Vec<(Goal, usize)> = state.path.under_visited(MIN_VISITS);
            if !under.is_empty() {
                debug!("    Back: goals under visited {under:?}");
                return Err(SearchError::DeadEnd);
            }
            return match Course::from_targets(state.path.get(), &self.rules) {
                Ok(course) => Ok(course),
                Err(e) => {
                    warn!("Generated course rejected: {e}");
                    Err(SearchError::DeadEnd)
                }
            };
        }

        self.iteration += 1;
        self.attempt_iteration += 1;
        if self.attempt_iteration > self.max_iterations {
            return Err(SearchError::IterationsExceeded);
        }

        let from = state.path.next_origin();

        // Randomize the order in which to test the targets
        let mut candidates: Vec<Goal> = if is_fixed_hole(hole) {
            vec![FIXED_GOAL]
        } else {
            Goal::ALL.to_vec()
        };
        candidates.retain(|to| self.rules.is_allowed(from, *to) && !state.used.contains(from, *to));
        candidates.shuffle(rng);

        for to in candidates {
            debug!("== Hole {hole}: {from} -> {to} (iteration {})", self.iteration);

            state.path.push(to);
            state.used.insert(from, to);

            let res: Result<Course, SearchError> = if self.is_feasible(hole, state) {
                self.find_course(state, rng)
            } else {
                debug!("    Back: not enough holes left to visit all the goals");
                Err(SearchError::DeadEnd)
            };

            match res {
                Ok(course) => return Ok(course),
                Err(e) => {
                    state.used.remove(from, to);
                    state.path.pop();
                    if e == SearchError::IterationsExceeded {
                        return Err(e);
                    }
                }
            }
        }

        if log_enabled!(Level::Debug) {
            debug!("    Back: no eligible target for hole {hole}");
            state.used.debug();
        }
        Err(SearchError::DeadEnd)
    }

    /// Whether the goals can still all reach [`MIN_VISITS`] once `hole` has been chosen.
    ///
    /// Two bounds are checked:
    ///
    /// * The visits still missing, minus those that the upcoming fixed holes provide, must fit
    ///   in the remaining free holes.
    /// * Each goal needs an unused and allowed throw into it for every missing visit.
    fn is_feasible(&self, hole: usize, state: &SearchState) -> bool {
        let fixed_ahead: usize = FIXED_HOLES.iter().filter(|h| **h > hole).count();
        let free_holes: usize = NUM_HOLES - hole - fixed_ahead;
        let mut needed: usize = 0;

        for goal in Goal::ALL {
            let missing: usize = state.path.missing(goal, MIN_VISITS);

            if missing > state.used.available_into(goal, &self.rules) {
                return false;
            }
            needed += if goal == FIXED_GOAL {
                missing.saturating_sub(fixed_ahead)
            } else {
                missing
            };
        }
        needed <= free_holes
    }
}
