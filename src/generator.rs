/*
generator.rs

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

//! Course model and random course generation.
//!
//! A course is made of 18 holes.
//! Each hole is a throw from an origin to a [`goals::Goal`]: the tee for the first hole, and the
//! target of the previous hole for the others.
//!
//! The [`rules::RuleSet`] object lists the throws that are not allowed and gives the par of each
//! throw.
//! The standard rules are provided by [`rules::RuleSet::standard`].
//!
//! A [`course::Course`] object is always valid:
//!
//! * holes 9 and 18 end at Green, and hole 1 does not,
//! * every throw is allowed by the rules and is played only once,
//! * every goal is the target of at least two holes.
//!
//! To play, a random course must be created.
//! You create it by creating a [`random_course::RandomCourse`] object and by using its
//! [`random_course::RandomCourse::generate`] method.
//! The search is a randomized backtracking over the holes.
//! The in-progress holes are stored in a [`path::Path`] object and the used throws in an
//! [`edges::UsedEdges`] object.
//! If no course is found after a number of attempts, then the method returns an error and can be
//! retried.

pub mod course;
pub mod edges;
pub mod goals;
pub mod path;
pub mod random_course;
pub mod rules;
