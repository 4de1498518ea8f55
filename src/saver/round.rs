/*
round.rs

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

//! Save and restore the round in progress.
//!
//! The round status is saved in the `round.json` file after every change, and is loaded when
//! Teegoal starts with the `--resume` option.
//!
//! The saved object is a serialization of the [`Round`] object in JSON format by using [`serde`].
//! Because the file can be edited, the course is verified again when the round is restored.

use log::{debug, warn};
use std::error::Error;
use std::fs::{File, create_dir_all, remove_file};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::round::Round;

/// Serialize and deserialize [`chrono::DateTime`] objects with Serde, as RFC 3339 strings.
pub mod timestamp {
    use chrono::{DateTime, Local};
    use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error};

    /// Serialize a [`chrono::DateTime`] object.
    pub fn serialize<S>(time: &DateTime<Local>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        time.to_rfc3339().serialize(serializer)
    }

    /// Deserialize a [`chrono::DateTime`] object.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Local>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text: String = String::deserialize(deserializer)?;
        let time: DateTime<Local> = DateTime::parse_from_rfc3339(&text)
            .map_err(|e| Error::custom(format!("Cannot parse the round time `{text}`: {e}")))?
            .with_timezone(&Local);
        Ok(time)
    }
}

/// Object to save and restore a round in progress.
pub struct SaverRound {
    /// Absolute path to the save file.
    save_file: PathBuf,
}

impl SaverRound {
    /// Create a [`SaverRound`] object.
    ///
    /// The provided [`PathBuf`] is the path to the directory where the round must be saved.
    pub fn new(mut data_dir: PathBuf) -> Self {
        data_dir.push("round.json");
        debug!("Save round file: {data_dir:?}");
        SaverRound {
            save_file: data_dir,
        }
    }

    /// Path to the save file.
    pub fn path(&self) -> &Path {
        &self.save_file
    }

    /// Retrieve the saved [`Round`] object.
    ///
    /// Return the [`Round`] object or None if there is no saved round.
    /// A saved course that the saved rules reject is an error.
    pub fn get_round(&self) -> Result<Option<Round>, Box<dyn Error>> {
        let file: File = match File::open(&self.save_file) {
            Ok(f) => f,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(Box::new(error)),
        };
        let reader: BufReader<File> = BufReader::new(file);
        let round: Round = serde_json::from_reader(reader)?;
        if let Err(e) = round.verify() {
            warn!("Saved round {:?} rejected: {e}", self.save_file);
            return Err(e);
        }
        Ok(Some(round))
    }

    /// Save the provided [`Round`] object. The data directory is created if needed.
    pub fn save_round(&self, round: &Round) -> Result<(), Box<dyn Error>> {
        if let Some(dir) = self.save_file.parent() {
            create_dir_all(dir)?;
        }
        let file: File = File::create(&self.save_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer(&mut writer, round)?;
        writer.flush()?;
        Ok(())
    }

    /// Delete the saved round.
    pub fn delete_save(&self) {
        let _ = remove_file(&self.save_file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::course::{Course, tests::SAMPLE};
    use crate::generator::goals::Goal;
    use crate::generator::rules::{Par, RuleSet};
    use crate::scorecard::ScoreDelta;
    use serde_json::Value;
    use std::fs;
    use tempfile::TempDir;

    fn sample_round() -> Round {
        let rules: RuleSet = RuleSet::standard();
        let course: Course = Course::from_targets(&SAMPLE, &rules).unwrap();
        let mut round: Round = Round::new(rules, course);
        round
            .enter_scores(&[Some(ScoreDelta::new(1).unwrap()), None])
            .unwrap();
        round
            .enter_scores(&[Some(ScoreDelta::new(-2).unwrap()), Some(ScoreDelta::new(0).unwrap())])
            .unwrap();
        round
    }

    #[test]
    fn missing_file() {
        let dir: TempDir = TempDir::new().unwrap();
        let saver: SaverRound = SaverRound::new(dir.path().to_path_buf());

        assert!(saver.get_round().unwrap().is_none());
        // Deleting a missing file is not an error
        saver.delete_save();
    }

    #[test]
    fn save_and_restore() {
        let dir: TempDir = TempDir::new().unwrap();
        let saver: SaverRound = SaverRound::new(dir.path().join("nested"));
        let round: Round = sample_round();

        saver.save_round(&round).unwrap();
        assert!(saver.path().exists());

        let restored: Round = saver.get_round().unwrap().unwrap();
        assert_eq!(restored, round);
        assert_eq!(restored.selected_hole(), 3);
        assert_eq!(restored.scorecard.undo_len(), 3);

        saver.delete_save();
        assert!(saver.get_round().unwrap().is_none());
    }

    #[test]
    fn custom_rules_are_saved() {
        let dir: TempDir = TempDir::new().unwrap();
        let saver: SaverRound = SaverRound::new(dir.path().to_path_buf());
        let mut rules: RuleSet = RuleSet::standard();
        rules.set_pair_par(Goal::White, Goal::Pink, Par::Five);
        let course: Course = Course::from_targets(&SAMPLE, &rules).unwrap();
        let round: Round = Round::new(rules.clone(), course);

        saver.save_round(&round).unwrap();
        let restored: Round = saver.get_round().unwrap().unwrap();
        assert_eq!(restored.rules(), &rules);
        // Hole 2 is White to Pink
        assert_eq!(restored.course().hole(2).map(|h| h.par), Some(Par::Five));
    }

    /// Rewrite the saved file after applying the given change to its JSON content.
    fn tamper(saver: &SaverRound, change: impl FnOnce(&mut Value)) {
        let text: String = fs::read_to_string(saver.path()).unwrap();
        let mut json: Value = serde_json::from_str(&text).unwrap();
        change(&mut json);
        fs::write(saver.path(), json.to_string()).unwrap();
    }

    #[test]
    fn tampered_target_is_rejected() {
        let dir: TempDir = TempDir::new().unwrap();
        let saver: SaverRound = SaverRound::new(dir.path().to_path_buf());
        saver.save_round(&sample_round()).unwrap();

        // Hole 9 must end at Green
        tamper(&saver, |json| {
            json["course"]["holes"][8]["edge"]["to"] = Value::from("Red");
        });
        assert!(saver.get_round().is_err());
    }

    #[test]
    fn tampered_par_is_rejected() {
        let dir: TempDir = TempDir::new().unwrap();
        let saver: SaverRound = SaverRound::new(dir.path().to_path_buf());
        saver.save_round(&sample_round()).unwrap();

        // Hole 1 is a par 3
        tamper(&saver, |json| {
            json["course"]["holes"][0]["par"] = Value::from(5);
        });
        assert!(saver.get_round().is_err());
    }

    #[test]
    fn truncated_course_is_rejected() {
        let dir: TempDir = TempDir::new().unwrap();
        let saver: SaverRound = SaverRound::new(dir.path().to_path_buf());
        saver.save_round(&sample_round()).unwrap();

        tamper(&saver, |json| {
            if let Some(holes) = json["course"]["holes"].as_array_mut() {
                holes.truncate(10);
            }
        });
        assert!(saver.get_round().is_err());
    }

    #[test]
    fn bad_score_is_rejected() {
        let dir: TempDir = TempDir::new().unwrap();
        let saver: SaverRound = SaverRound::new(dir.path().to_path_buf());
        saver.save_round(&sample_round()).unwrap();

        tamper(&saver, |json| {
            json["scorecard"]["players"][0]["entries"][0] = Value::from(9);
        });
        assert!(saver.get_round().is_err());
    }

    #[test]
    fn bad_selected_hole_is_rejected() {
        let dir: TempDir = TempDir::new().unwrap();
        let saver: SaverRound = SaverRound::new(dir.path().to_path_buf());
        saver.save_round(&sample_round()).unwrap();

        tamper(&saver, |json| {
            json["selected_hole"] = Value::from(19);
        });
        assert!(saver.get_round().is_err());
    }

    #[test]
    fn tampered_undo_is_rejected() {
        let dir: TempDir = TempDir::new().unwrap();
        let saver: SaverRound = SaverRound::new(dir.path().to_path_buf());
        saver.save_round(&sample_round()).unwrap();

        tamper(&saver, |json| {
            json["scorecard"]["undo_op"][0]["hole"] = Value::from(0);
        });
        assert!(saver.get_round().is_err());

        saver.save_round(&sample_round()).unwrap();
        tamper(&saver, |json| {
            json["scorecard"]["undo_op"][2]["hole"] = Value::from(19);
        });
        assert!(saver.get_round().is_err());

        saver.save_round(&sample_round()).unwrap();
        tamper(&saver, |json| {
            json["scorecard"]["undo_op"][1]["player"] = Value::from(2);
        });
        assert!(saver.get_round().is_err());
    }
}
