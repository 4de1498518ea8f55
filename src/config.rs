/*
config.rs

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

//! Application constants and locations.

use std::path::PathBuf;

/// Name of the application, also used as the name of its data directory.
pub const APP_NAME: &str = "teegoal";

/// Text printed by `--version`.
pub const COPYRIGHT_NOTICE: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nCopyright 2025 Hervé Quatremain\n",
    "License GPLv3+: GNU GPL version 3 or later <https://gnu.org/licenses/gpl.html>.\n",
    "This is free software: you are free to change and redistribute it.\n",
    "There is NO WARRANTY, to the extent permitted by law."
);

/// Directory where the round in progress is saved.
///
/// The `override_dir` parameter takes precedence over the user data directory.
/// Return None if the user data directory cannot be determined.
pub fn data_dir(override_dir: Option<PathBuf>) -> Option<PathBuf> {
    override_dir.or_else(|| dirs::data_dir().map(|d| d.join(APP_NAME)))
}
