//! Game session state machine.
//!
//! A [`Session`] starts `InProgress` and moves to `Won` or `Lost` after an
//! accepted guess. Terminal sessions reject further guesses; the caller starts
//! a new session to play again.

use crate::code::{Code, DuplicatesPolicy};
use crate::error::{ConfigurationError, ValidationError};
use crate::evaluator::{MatchResult, evaluate};
use crate::secret::{DigitSource, check_length, generate};
use crate::{debug_log, info_log};
use derive_more::Display;

pub const DEFAULT_LENGTH: usize = 4;
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Settings for one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub length: usize,
    pub policy: DuplicatesPolicy,
    pub max_attempts: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            policy: DuplicatesPolicy::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        check_length(self.length, self.policy)?;
        if self.max_attempts == 0 {
            return Err(ConfigurationError::NoAttempts);
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum Status {
    #[display("in progress")]
    InProgress,
    #[display("won")]
    Won,
    #[display("lost")]
    Lost,
}

impl Status {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// A recorded guess and its score.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attempt {
    pub guess: Code,
    pub result: MatchResult,
}

/// What `submit_guess` reports back to the frontend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuessOutcome {
    pub result: MatchResult,
    pub status: Status,
}

#[derive(Clone, Debug)]
pub struct Session {
    secret: Code,
    policy: DuplicatesPolicy,
    attempts: Vec<Attempt>,
    max_attempts: usize,
    status: Status,
}

impl Session {
    /// Validates `config` and starts a game with a freshly generated secret.
    pub fn start<S: DigitSource + ?Sized>(
        config: &SessionConfig,
        source: &mut S,
    ) -> Result<Self, ConfigurationError> {
        config.validate()?;
        let secret = generate(config.length, config.policy, source)?;
        info_log!(
            "Session::start() - {} digits, duplicates {}, {} attempts",
            config.length,
            config.policy,
            config.max_attempts
        );
        Ok(Self {
            secret,
            policy: config.policy,
            attempts: Vec::new(),
            max_attempts: config.max_attempts,
            status: Status::InProgress,
        })
    }

    /// Starts a game around a known secret. The policy is inferred from the
    /// secret itself.
    pub fn from_secret(secret: Code, max_attempts: usize) -> Result<Self, ConfigurationError> {
        let policy = if secret.has_repeats() {
            DuplicatesPolicy::Allowed
        } else {
            DuplicatesPolicy::Forbidden
        };
        SessionConfig {
            length: secret.len(),
            policy,
            max_attempts,
        }
        .validate()?;
        Ok(Self {
            secret,
            policy,
            attempts: Vec::new(),
            max_attempts,
            status: Status::InProgress,
        })
    }

    /// Scores `guess`, records it, and advances the status.
    ///
    /// A solved guess wins even on the last allowed attempt. On error the
    /// session is left untouched.
    pub fn submit_guess(&mut self, guess: Code) -> Result<GuessOutcome, ValidationError> {
        if self.status.is_terminal() {
            debug_log!("submit_guess() - rejected, session is {}", self.status);
            return Err(ValidationError::SessionOver {
                status: self.status,
            });
        }
        if guess.len() != self.secret.len() {
            debug_log!(
                "submit_guess() - rejected, expected {} digits, got {}",
                self.secret.len(),
                guess.len()
            );
            return Err(ValidationError::LengthMismatch {
                expected: self.secret.len(),
                actual: guess.len(),
            });
        }

        let result = evaluate(guess.digits(), self.secret.digits());
        debug_log!("submit_guess() - {} scored {}", guess, result);
        self.attempts.push(Attempt { guess, result });

        if result.is_solved(self.secret.len()) {
            self.status = Status::Won;
            info_log!("submit_guess() - won after {} attempts", self.attempts.len());
        } else if self.attempts.len() == self.max_attempts {
            self.status = Status::Lost;
            info_log!("submit_guess() - lost, secret was {}", self.secret);
        }

        Ok(GuessOutcome {
            result,
            status: self.status,
        })
    }

    /// Attempts so far, oldest first.
    #[must_use]
    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    #[must_use]
    pub fn remaining_attempts(&self) -> usize {
        self.max_attempts - self.attempts.len()
    }

    /// The secret, once the game is over.
    #[must_use]
    pub fn revealed_secret(&self) -> Option<&Code> {
        self.status.is_terminal().then_some(&self.secret)
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Number of digits in the secret.
    #[must_use]
    pub fn length(&self) -> usize {
        self.secret.len()
    }

    #[must_use]
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    #[must_use]
    pub fn policy(&self) -> DuplicatesPolicy {
        self.policy
    }
}
