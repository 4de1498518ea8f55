/*
codec.rs

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

//! Share a course as a compact token.
//!
//! The token is the list of the 18 hole targets, separated by commas and percent-encoded so that
//! it can be used as a URL query parameter:
//!
//! ```text
//! White%2CPink%2CWhite%2CYellow%2COrange%2CYellow%2CWhite%2CRed%2CGreen%2C...
//! ```
//!
//! The origin of each hole is not stored: it is always the tee for the first hole and the
//! target of the previous hole for the others.
//!
//! A decoded token goes through [`Course::from_targets`], like a generated course, so a token
//! can never produce a course that breaks the rules.

use log::debug;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use std::fmt;

use crate::generator::course::{Course, CourseError, NUM_HOLES};
use crate::generator::goals::Goal;
use crate::generator::rules::RuleSet;

/// Separator between the goal names.
const SEPARATOR: char = ',';

/// Query parameter that carries the token in a share link.
pub const SHARE_PARAM: &str = "c";

/// Characters that are escaped in a token: everything but the unreserved URI characters.
const TOKEN_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Reasons for rejecting a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidToken {
    /// The percent-decoded token is not valid UTF-8.
    Encoding,

    /// The token does not list [`NUM_HOLES`] goals.
    WrongLength(usize),

    /// The token contains a name that is not a goal.
    UnknownGoal(String),

    /// The goals do not form a valid course.
    Course(CourseError),

    /// The link does not carry a token.
    MissingToken,
}

impl fmt::Display for InvalidToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InvalidToken::Encoding => write!(f, "invalid token encoding"),
            InvalidToken::WrongLength(n) => {
                write!(f, "the token lists {n} goals instead of {NUM_HOLES}")
            }
            InvalidToken::UnknownGoal(name) => write!(f, "unknown goal `{name}` in token"),
            InvalidToken::Course(e) => write!(f, "invalid course: {e}"),
            InvalidToken::MissingToken => {
                write!(f, "the link has no `{SHARE_PARAM}` parameter")
            }
        }
    }
}

impl std::error::Error for InvalidToken {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InvalidToken::Course(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CourseError> for InvalidToken {
    fn from(e: CourseError) -> Self {
        InvalidToken::Course(e)
    }
}

/// Return the token for the given course.
pub fn encode(course: &Course) -> String {
    let names: Vec<&str> = course.holes().iter().map(|h| h.edge.to.name()).collect();
    let joined: String = names.join(&SEPARATOR.to_string());
    utf8_percent_encode(&joined, TOKEN_ESCAPE).to_string()
}

/// Rebuild and validate the course from a token.
///
/// Spaces around the names and empty names are ignored.
///
/// # Errors
///
/// The function returns an error when the token does not describe a course that the given
/// rules allow.
pub fn decode(token: &str, rules: &RuleSet) -> Result<Course, InvalidToken> {
    let decoded = percent_decode_str(token)
        .decode_utf8()
        .map_err(|_| InvalidToken::Encoding)?;

    let names: Vec<&str> = decoded
        .split(SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if names.len() != NUM_HOLES {
        debug!("Token rejected: {} goals", names.len());
        return Err(InvalidToken::WrongLength(names.len()));
    }

    let targets: Vec<Goal> = names
        .iter()
        .map(|name| {
            name.parse::<Goal>()
                .map_err(|e| InvalidToken::UnknownGoal(e.0))
        })
        .collect::<Result<Vec<Goal>, InvalidToken>>()?;

    let course: Course = Course::from_targets(&targets, rules).inspect_err(|e| {
        debug!("Token rejected: {e}");
    })?;
    Ok(course)
}

/// Return a link to the course, built by adding the token to `base`.
pub fn share_link(base: &str, course: &Course) -> String {
    let separator: char = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}{SHARE_PARAM}={}", encode(course))
}

/// Extract the token from a share link.
///
/// A string without a query part and that is not a URL is returned as is, so a bare token is
/// also accepted.
/// Return None when the link does not carry a token.
pub fn token_from_link(link: &str) -> Option<&str> {
    let link: &str = link.trim();

    let Some((_, query)) = link.split_once('?') else {
        if link.is_empty() || link.contains("://") {
            return None;
        }
        return Some(link);
    };
    let query: &str = query.split('#').next().unwrap_or_default();

    query
        .split('&')
        .filter_map(|param| param.split_once('='))
        .find(|(key, _)| *key == SHARE_PARAM)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// Extract the token from a share link, or take a bare token, and decode it.
pub fn decode_link(link: &str, rules: &RuleSet) -> Result<Course, InvalidToken> {
    let token: &str = token_from_link(link).ok_or(InvalidToken::MissingToken)?;
    decode(token, rules)
}
