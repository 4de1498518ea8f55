/*
lib.rs

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

//! Generate, share, and score random 18-hole disc golf courses played between seven goals.
//!
//! The functions at the top level use the standard rules.
//! For custom rules, use [`generator::random_course::RandomCourse`], [`codec::decode`], and
//! [`generator::rules::RuleSet::par_of`] with your own [`generator::rules::RuleSet`].
//!
//! ```
//! let course = teegoal::generate().unwrap();
//! let token = teegoal::encode(&course);
//! assert_eq!(teegoal::decode(&token).unwrap(), course);
//! ```

pub mod codec;
pub mod config;
pub mod generator;
pub mod round;
pub mod saver;
pub mod scorecard;

use codec::InvalidToken;
use generator::course::{Course, Edge};
use generator::random_course::{GenerationError, RandomCourse};
use generator::rules::{Par, RuleSet};

/// Generate a random course with the standard rules.
pub fn generate() -> Result<Course, GenerationError> {
    RandomCourse::new(&RuleSet::standard()).generate()
}

/// Encode a course into a token for share links.
pub fn encode(course: &Course) -> String {
    codec::encode(course)
}

/// Decode and validate a token with the standard rules.
pub fn decode(token: &str) -> Result<Course, InvalidToken> {
    codec::decode(token, &RuleSet::standard())
}

/// Par of a throw with the standard rules.
pub fn par_of(edge: Edge) -> Par {
    RuleSet::standard().par_of(edge.from, edge.to)
}
