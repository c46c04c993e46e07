//! Error types shared by the session core and the frontends.

use crate::session::Status;
use derive_more::{Display, Error};

/// A guess that cannot be applied to the current session.
///
/// Raising one never changes the session; the frontend reports it and
/// prompts again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ValidationError {
    #[display("Please enter {expected} digits (got {actual}).")]
    LengthMismatch { expected: usize, actual: usize },
    #[display("This game is already over ({status}). Start a new game to keep playing.")]
    SessionOver { status: Status },
    #[display("'{found}' is not a digit.")]
    NotADigit { found: char },
}

/// Settings that cannot produce a playable game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ConfigurationError {
    #[display("code length must be at least 1")]
    ZeroLength,
    #[display("a {length}-digit code without repeated digits is impossible (at most {max} distinct digits)")]
    TooLongWithoutRepeats { length: usize, max: usize },
    #[display("a game needs at least one attempt")]
    NoAttempts,
}
