use crate::code::{Code, DuplicatesPolicy};
use crate::debug_log;
use crate::error::ValidationError;
use crate::evaluator::Peg;
use crate::game_state::{GameInterface, PlayRecord, UserAction};
use crate::session::{
    DEFAULT_LENGTH, DEFAULT_MAX_ATTEMPTS, GuessOutcome, Session, SessionConfig, Status,
};
use clap::Parser;
use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Guess the secret digit code
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Number of digits in the secret code
    #[arg(short = 'l', long = "length", default_value_t = DEFAULT_LENGTH)]
    pub length: usize,

    /// Whether the secret code may repeat a digit
    #[arg(short = 'd', long = "duplicates", value_enum, default_value_t = DuplicatesPolicy::Forbidden)]
    pub duplicates: DuplicatesPolicy,

    /// Number of guesses before the game is lost
    #[arg(short = 'm', long = "max-attempts", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,

    /// Seed for a reproducible sequence of secret codes
    #[arg(long)]
    pub seed: Option<u64>,

    /// Use the line-based interface instead of the full-screen one
    #[arg(long)]
    pub plain: bool,

    /// Write log output to this file instead of stderr
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    #[must_use]
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            length: self.length,
            policy: self.duplicates,
            max_attempts: self.max_attempts,
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Text input understood by the line-based interface.
#[derive(Debug)]
pub enum GuessInput {
    Valid(Code),
    Invalid(ValidationError),
    Exit,
    NewGame,
}

pub fn parse_guess_input(input: &str) -> GuessInput {
    let input = input.trim();
    if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
        return GuessInput::Exit;
    }
    if input.eq_ignore_ascii_case("next") || input.eq_ignore_ascii_case("new") {
        return GuessInput::NewGame;
    }
    match input.parse::<Code>() {
        Ok(code) => GuessInput::Valid(code),
        Err(e) => GuessInput::Invalid(e),
    }
}

fn peg_symbol(peg: Peg) -> char {
    match peg {
        Peg::Exact => '●',
        Peg::Misplaced => '○',
        Peg::Miss => '·',
    }
}

/// Peg string for one attempt, e.g. `● ○ ○ ·`.
#[must_use]
pub fn format_pegs(outcome_pegs: impl Iterator<Item = Peg>) -> String {
    outcome_pegs
        .map(peg_symbol)
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Line-based implementation of [`GameInterface`] over any reader and writer.
pub struct CliInterface<R: BufRead, W: Write> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> CliInterface<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Gives back the writer, e.g. to inspect captured output.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn say(&mut self, line: impl fmt::Display) {
        if let Err(e) = writeln!(self.writer, "{line}") {
            debug_log!("CliInterface::say() - write failed: {}", e);
        }
    }

    fn display_history(&mut self, session: &Session) {
        let length = session.length();
        let total = session.attempts().len();
        // Newest first
        for (offset, attempt) in session.attempts().iter().rev().enumerate() {
            let pegs = format_pegs(attempt.result.pegs(length));
            self.say(format_args!(
                "Try {}: {}  {}",
                total - offset,
                attempt.guess,
                pegs
            ));
        }
    }
}

impl CliInterface<io::StdinLock<'static>, io::Stdout> {
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> GameInterface for CliInterface<R, W> {
    fn read_action(&mut self) -> Option<UserAction> {
        self.say("\nEnter your guess ('next' for a new game, 'exit' to quit):");
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) => return Some(UserAction::Exit),
            Ok(_) => {}
            Err(e) => {
                debug_log!("CliInterface::read_action() - read failed: {}", e);
                return Some(UserAction::Exit);
            }
        }

        match parse_guess_input(&input) {
            GuessInput::Valid(code) => Some(UserAction::Guess(code)),
            GuessInput::NewGame => Some(UserAction::NewGame),
            GuessInput::Exit => Some(UserAction::Exit),
            GuessInput::Invalid(e) => {
                self.say(format_args!("Invalid guess. {e}"));
                None
            }
        }
    }

    fn display_new_game(&mut self, session: &Session) {
        let repeats = match session.policy() {
            DuplicatesPolicy::Allowed => "may repeat",
            DuplicatesPolicy::Forbidden => "are all different",
        };
        self.say(format_args!(
            "New game: guess the {}-digit code (digits {}).",
            session.length(),
            repeats
        ));
        self.say("● right digit, right place   ○ right digit, wrong place   · no match");
        self.say(format_args!("Tries remaining: {}", session.remaining_attempts()));
    }

    fn display_attempt(&mut self, session: &Session, outcome: &GuessOutcome) {
        self.say(format_args!("Result: {}", outcome.result));
        self.display_history(session);
        self.say(format_args!("Tries remaining: {}", session.remaining_attempts()));
    }

    fn display_game_over(&mut self, session: &Session) {
        let Some(secret) = session.revealed_secret() else {
            return;
        };
        match session.status() {
            Status::Won => self.say(format_args!(
                "Congratulations! You guessed it right, the code was {secret}"
            )),
            Status::Lost => self.say(format_args!(
                "Sorry, you didn't get it. The code was {secret}"
            )),
            Status::InProgress => {}
        }
        self.say("Type 'next' to play again or 'exit' to quit.");
    }

    fn display_error(&mut self, error: &ValidationError) {
        self.say(error);
    }

    fn display_exit_message(&mut self, record: &PlayRecord) {
        self.say(format_args!(
            "Exiting. Won {}, lost {}, abandoned {}.",
            record.wins, record.losses, record.abandoned
        ));
    }
}
