/*
cli_options.rs

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

//! Process command-line options.
//!
//! Teegoal generates random courses, decodes shared courses, and keeps the scorecard of the round
//! in progress in the user data directory.
//!
//! # Examples
//!
//! Generate a course and print a link to share it:
//!
//! ```
//! $ teegoal --seed 7 --link https://example.org/play
//! Hole  From    To      Par
//!    1  Tee     White     3
//!    2  White   Pink      4
//! ...
//!   18  Blue    Green     4
//!       Total            67
//! Token: White%2CPink%2C...
//! Link:  https://example.org/play?c=White%2CPink%2C...
//! ```
//!
//! Start a round for two named players with a shared course, and then enter the scores of the
//! first hole:
//!
//! ```
//! $ teegoal --decode 'https://example.org/play?c=White%2CPink%2C...' --save --names Ann,Bob
//! $ teegoal --score=+1,-1
//! ```
//!
//! Generate a hundred courses and print some statistics:
//!
//! ```
//! $ teegoal -c 100 --summary > /dev/null
//! ```

use clap::Parser;
use log::{LevelFilter, debug, warn};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde_json::json;
use std::error::Error;
use std::path::PathBuf;

use teegoal::codec;
use teegoal::config::{self, COPYRIGHT_NOTICE};
use teegoal::generator::course::{Course, FRONT_NINE, Hole};
use teegoal::generator::random_course::{GenerationError, RandomCourse};
use teegoal::generator::rules::RuleSet;
use teegoal::round::Round;
use teegoal::saver::round::SaverRound;
use teegoal::scorecard::{ScoreDelta, Scorecard, Standing, Subtotal, Totals};

/// Generate, share, and score random disc golf courses.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// Number of courses to generate
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Print some statistics after generating the courses
    #[arg(short, long, default_value_t = false)]
    summary: bool,

    /// Seed for reproducible courses
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with the throw rules (blocked throws and par tables). A saved round keeps the
    /// rules it was started with
    #[arg(
        short,
        long,
        value_name = "FILE",
        conflicts_with_all = ["resume", "hole", "score", "undo", "clear_scores"]
    )]
    rules: Option<PathBuf>,

    /// Print the rules in JSON format and exit
    #[arg(long, default_value_t = false)]
    show_rules: bool,

    /// Course token or share link to decode instead of generating a course
    #[arg(long, value_name = "TOKEN", conflicts_with_all = ["count", "seed"])]
    decode: Option<String>,

    /// Print a share link built on this base URL
    #[arg(short, long, value_name = "BASE_URL")]
    link: Option<String>,

    /// Print the courses in JSON format
    #[arg(short, long, default_value_t = false)]
    json: bool,

    /// Start a new round with the course and save it
    #[arg(long, default_value_t = false)]
    save: bool,

    /// Player names for the new round, separated by commas
    #[arg(long, value_delimiter = ',', requires = "save")]
    names: Vec<String>,

    /// Print the scorecard of the saved round
    #[arg(long, default_value_t = false, conflicts_with = "save")]
    resume: bool,

    /// Select a hole of the saved round before entering scores
    #[arg(long, conflicts_with = "save")]
    hole: Option<usize>,

    /// Enter the scores of the selected hole of the saved round, one per player, separated by
    /// commas. Use `-` for no entry
    #[arg(
        long,
        value_delimiter = ',',
        allow_hyphen_values = true,
        value_name = "SCORES",
        conflicts_with = "save"
    )]
    score: Option<Vec<String>>,

    /// Undo the last score entry of the saved round
    #[arg(long, default_value_t = false, conflicts_with = "save")]
    undo: bool,

    /// Remove all the scores of the saved round
    #[arg(long, default_value_t = false, conflicts_with = "save")]
    clear_scores: bool,

    /// Directory for the saved round instead of the user data directory
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

impl Args {
    /// Whether the options work on the saved round.
    fn uses_saved_round(&self) -> bool {
        self.resume || self.hole.is_some() || self.score.is_some() || self.undo || self.clear_scores
    }
}

/// Parse and process command-line options. Return the process exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.debug {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    match run(&args) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}

/// Process the options.
fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let rules: RuleSet = match &args.rules {
        Some(path) => RuleSet::from_file(path)?,
        None => RuleSet::standard(),
    };

    if args.show_rules {
        println!("{}", serde_json::to_string_pretty(&rules)?);
        return Ok(());
    }

    if args.uses_saved_round() {
        return play_saved_round(args);
    }

    let (courses, failure): (Vec<Course>, Option<GenerationError>) = match &args.decode {
        Some(link) => (vec![codec::decode_link(link, &rules)?], None),
        None => generate_courses(&rules, args.count, args.seed, args.summary),
    };

    for course in &courses {
        if args.json {
            print_course_json(course, args.link.as_deref())?;
        } else {
            print_course(course, args.link.as_deref());
        }
    }

    if let Some(e) = failure {
        return Err(format!("could not generate a course ({e}), try again").into());
    }

    if args.save {
        let course: Course = courses
            .into_iter()
            .next()
            .ok_or("no course could be generated")?;
        let mut round: Round = Round::new(rules, course);
        if !args.names.is_empty() {
            let names: Vec<&str> = args.names.iter().map(String::as_str).collect();
            round.scorecard = Scorecard::new(&names);
        }
        let saver: SaverRound = round_saver(args)?;
        saver.save_round(&round)?;
        eprintln!("Round saved in {}", saver.path().display());
    }
    Ok(())
}

/// Build the saver for the data directory.
fn round_saver(args: &Args) -> Result<SaverRound, Box<dyn Error>> {
    let dir: PathBuf = config::data_dir(args.data_dir.clone())
        .ok_or("cannot find the user data directory, use --data-dir")?;
    Ok(SaverRound::new(dir))
}

/// Generate the requested number of courses. Failed generations are counted but not retried.
///
/// Return the courses and the last generation error, if any.
fn generate_courses(
    rules: &RuleSet,
    count: usize,
    seed: Option<u64>,
    summary: bool,
) -> (Vec<Course>, Option<GenerationError>) {
    let mut rng: Box<dyn RngCore> = match seed {
        Some(seed) => Box::new(ChaCha8Rng::seed_from_u64(seed)),
        None => Box::new(rand::rng()),
    };
    let mut generator: RandomCourse = RandomCourse::new(rules);
    let mut courses: Vec<Course> = Vec::with_capacity(count);
    let mut failure: Option<GenerationError> = None;

    let mut total: f32 = 0.0;
    let mut max: f32 = 0.0;
    let mut errors: usize = 0;
    let mut attempts: usize = 0;
    let mut iterations: usize = 0;

    for i in 0..count {
        debug!("Course {i}");
        match generator.generate_with_rng(rng.as_mut()) {
            Ok(course) => courses.push(course),
            Err(e) => {
                warn!("Course {i}: {e}");
                errors += 1;
                failure = Some(e);
            }
        }
        total += generator.duration;
        max = max.max(generator.duration);
        attempts += generator.attempts;
        iterations += generator.iteration;
    }

    if summary && count > 0 {
        eprintln!(
            "
        total time = {}s
      average time = {}s
          max time = {}s
  average attempts = {}
average iterations = {}
            errors = {}",
            total,
            total / count as f32,
            max,
            attempts as f32 / count as f32,
            iterations / count,
            errors
        );
    }
    (courses, failure)
}

/// Print the line of a hole.
fn hole_line(hole: &Hole) -> String {
    format!(
        "{:>4}  {:<7} {:<7} {:>3}",
        hole.number,
        hole.edge.from,
        hole.edge.to,
        hole.par.value()
    )
}

/// Print the course as a table, followed by its token.
fn print_course(course: &Course, link: Option<&str>) {
    println!("Hole  From    To      Par");
    for hole in course.holes() {
        println!("{}", hole_line(hole));
        if hole.number == FRONT_NINE {
            println!("      {:<15} {:>3}", "Front nine", course.front_par());
        }
    }
    println!("      {:<15} {:>3}", "Back nine", course.back_par());
    println!("      {:<15} {:>3}", "Total", course.total_par());
    println!("Token: {}", codec::encode(course));
    if let Some(base) = link {
        println!("Link:  {}", codec::share_link(base, course));
    }
    println!();
}

/// Print the course in JSON format.
fn print_course_json(course: &Course, link: Option<&str>) -> Result<(), Box<dyn Error>> {
    let value = json!({
        "token": codec::encode(course),
        "link": link.map(|base| codec::share_link(base, course)),
        "par": course.total_par(),
        "holes": course.holes(),
    });
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

/// Convert the `--score` values into entries.
fn parse_scores(values: &[String]) -> Result<Vec<Option<ScoreDelta>>, Box<dyn Error>> {
    values
        .iter()
        .map(|v| -> Result<Option<ScoreDelta>, Box<dyn Error>> {
            match v.trim() {
                "" | "-" => Ok(None),
                s => Ok(Some(s.parse::<ScoreDelta>()?)),
            }
        })
        .collect()
}

/// Apply the options to the saved round, save it, and print its scorecard.
fn play_saved_round(args: &Args) -> Result<(), Box<dyn Error>> {
    let saver: SaverRound = round_saver(args)?;
    let mut round: Round = saver
        .get_round()?
        .ok_or("no round in progress, start one with --save")?;
    let mut changed: bool = false;

    if args.clear_scores {
        round.scorecard.clear();
        changed = true;
    }
    if args.undo {
        if round.undo() {
            changed = true;
        } else {
            eprintln!("Nothing to undo");
        }
    }
    if let Some(hole) = args.hole {
        round.select_hole(hole)?;
        changed = true;
    }
    if let Some(values) = &args.score {
        round.enter_scores(&parse_scores(values)?)?;
        changed = true;
    }

    if changed {
        saver.save_round(&round)?;
    }
    print_round(&round, args.link.as_deref())
}

/// Format a difference from par.
fn format_diff(diff: i32) -> String {
    match Standing::of(diff) {
        Standing::Under => format!("{diff}"),
        Standing::Even => "E".to_string(),
        Standing::Over => format!("+{diff}"),
    }
}

/// Print the subtotal line of all the players.
fn subtotal_line(label: &str, par: u32, subtotals: &[Subtotal], widths: &[usize]) -> String {
    let mut line: String = format!("      {label:<15} {par:>3}");
    for (s, &w) in subtotals.iter().zip(widths) {
        let cell: String = format!("{} ({})", s.throws, format_diff(s.diff));
        line.push_str(&format!("  {cell:>w$}"));
    }
    line
}

/// Print the scorecard of the round.
fn print_round(round: &Round, link: Option<&str>) -> Result<(), Box<dyn Error>> {
    let course: &Course = round.course();
    let card: &Scorecard = &round.scorecard;
    let widths: Vec<usize> = card.players().iter().map(|p| p.name.len().max(8)).collect();

    println!("Round of {}", round.created().format("%Y-%m-%d %H:%M"));
    let mut header: String = "Hole  From    To      Par".to_string();
    for (p, &w) in card.players().iter().zip(&widths) {
        header.push_str(&format!("  {:>w$}", p.name));
    }
    println!("{header}");

    let totals: Vec<Totals> = (0..card.players().len())
        .map(|p| card.totals(p, course))
        .collect::<Result<_, _>>()?;

    for hole in course.holes() {
        let marker: char = if hole.number == round.selected_hole() { '>' } else { ' ' };
        let mut line: String = hole_line(hole);
        line.replace_range(0..1, &marker.to_string());
        for (p, &w) in card.players().iter().zip(&widths) {
            let cell: String = match p.entries()[hole.number - 1] {
                Some(d) => d.to_string(),
                None => "-".to_string(),
            };
            line.push_str(&format!("  {cell:>w$}"));
        }
        println!("{line}");

        if hole.number == FRONT_NINE {
            let front: Vec<Subtotal> = totals.iter().map(|t| t.front).collect();
            println!("{}", subtotal_line("Front nine", course.front_par(), &front, &widths));
        }
    }
    let back: Vec<Subtotal> = totals.iter().map(|t| t.back).collect();
    println!("{}", subtotal_line("Back nine", course.back_par(), &back, &widths));
    let total: Vec<Subtotal> = totals.iter().map(|t| t.total).collect();
    println!("{}", subtotal_line("Total", course.total_par(), &total, &widths));

    println!("Progress: {}%", card.progress());
    if let Some(base) = link {
        println!("Link: {}", round.link(base));
    } else {
        println!("Token: {}", round.token());
    }
    Ok(())
}
