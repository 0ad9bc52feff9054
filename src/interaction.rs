use regex::Regex;
use std::io::{self, BufRead, StdinLock};
use std::sync::OnceLock;
use tracing::warn;

use super::game::{Action, GameState};
use super::Agent;

/// Reads moves of the form `TYPE ROW COL` from a line based input.
pub struct HumanAgent<R> {
    input: R,
}

impl HumanAgent<StdinLock<'static>> {
    pub fn stdin() -> Self {
        HumanAgent::new(io::stdin().lock())
    }
}

impl<R: BufRead> HumanAgent<R> {
    pub fn new(input: R) -> Self {
        HumanAgent { input }
    }
}

impl<R: BufRead> Agent for HumanAgent<R> {
    fn generate_move(&mut self, game: &GameState) -> Option<Action> {
        loop {
            println!("{}", game.board());
            println!(
                "{} mines left. Please input your move: TYPE ROW COL",
                game.remaining_mines()
            );
            let mut input = String::new();
            match self.input.read_line(&mut input) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(err) => {
                    warn!(%err, "failed to read move");
                    return None;
                }
            }
            if input.trim() == "quit" {
                return None;
            }
            match action_from_string(&input) {
                Some(action) => return Some(action),
                None => println!("Must be of the form: reveal|flag ROW COL"),
            }
        }
    }
}

fn command_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*(click|reveal|flag)\s+(-?\d+)\s+(-?\d+)\s*$")
            .expect("command pattern is valid")
    })
}

/// Parses `reveal ROW COL` (or `click`) and `flag ROW COL`. Coordinates are
/// passed through unchecked; the game ignores those off the board.
pub fn action_from_string(input: &str) -> Option<Action> {
    let cap = command_pattern().captures(input)?;
    let row: i32 = cap[2].parse().ok()?;
    let col: i32 = cap[3].parse().ok()?;
    extract_type_from_string(&cap[1], row, col)
}

fn extract_type_from_string(input: &str, row: i32, col: i32) -> Option<Action> {
    match input {
        "click" | "reveal" => Some(Action::Reveal(row, col)),
        "flag" => Some(Action::ToggleFlag(row, col)),
        _ => None,
    }
}
