// Library interface for codebreaker
// This allows integration tests to access internal modules

pub mod cli;
pub mod code;
pub mod error;
pub mod evaluator;
pub mod game_state;
pub mod logging;
pub mod secret;
pub mod session;
pub mod tui;

// Re-export commonly used items for easier testing
pub use code::{Code, DIGIT_COUNT, Digit, DuplicatesPolicy};
pub use error::{ConfigurationError, ValidationError};
pub use evaluator::{MatchResult, Peg, evaluate};
pub use game_state::{GameInterface, PlayRecord, UserAction, game_loop};
pub use secret::{DigitSource, RandomSource, ScriptedSource, generate};
pub use session::{Attempt, GuessOutcome, Session, SessionConfig, Status};
