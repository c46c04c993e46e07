use crate::code::Code;
use crate::error::{ConfigurationError, ValidationError};
use crate::secret::DigitSource;
use crate::session::{GuessOutcome, Session, SessionConfig, Status};
use crate::{debug_log, info_log};

/// What the player asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(Code),
    NewGame,
    Exit,
}

/// Games finished during one run of the loop. Kept in memory only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayRecord {
    pub wins: usize,
    pub losses: usize,
    /// Games left unfinished by starting a new one or exiting.
    pub abandoned: usize,
}

impl PlayRecord {
    #[must_use]
    pub fn games_played(&self) -> usize {
        self.wins + self.losses + self.abandoned
    }
}

/// The frontend side of the game loop.
///
/// `read_action` returns `None` for input it could not make sense of; the
/// implementation has already told the player, and the loop simply asks again.
pub trait GameInterface {
    fn read_action(&mut self) -> Option<UserAction>;
    fn display_new_game(&mut self, session: &Session);
    fn display_attempt(&mut self, session: &Session, outcome: &GuessOutcome);
    fn display_game_over(&mut self, session: &Session);
    fn display_error(&mut self, error: &ValidationError);
    fn display_exit_message(&mut self, record: &PlayRecord);
}

/// Plays games until the player exits, starting a fresh session on request.
///
/// Fails only if `config` cannot produce a game, before anything is shown.
pub fn game_loop<I, S>(
    config: &SessionConfig,
    interface: &mut I,
    source: &mut S,
) -> Result<PlayRecord, ConfigurationError>
where
    I: GameInterface + ?Sized,
    S: DigitSource + ?Sized,
{
    config.validate()?;
    let mut record = PlayRecord::default();
    let mut session = Session::start(config, source)?;
    interface.display_new_game(&session);

    loop {
        let action = match interface.read_action() {
            Some(action) => action,
            None => continue,
        };
        debug_log!("game_loop() - action: {:?}", action);

        match action {
            UserAction::Exit => {
                if session.status() == Status::InProgress {
                    record.abandoned += 1;
                }
                info_log!("game_loop() - exiting after {} games", record.games_played());
                interface.display_exit_message(&record);
                return Ok(record);
            }
            UserAction::NewGame => {
                if session.status() == Status::InProgress {
                    record.abandoned += 1;
                }
                session = Session::start(config, source)?;
                interface.display_new_game(&session);
            }
            UserAction::Guess(guess) => match session.submit_guess(guess) {
                Ok(outcome) => {
                    interface.display_attempt(&session, &outcome);
                    match outcome.status {
                        Status::Won => record.wins += 1,
                        Status::Lost => record.losses += 1,
                        Status::InProgress => continue,
                    }
                    interface.display_game_over(&session);
                }
                Err(e) => interface.display_error(&e),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::DuplicatesPolicy;
    use crate::secret::ScriptedSource;
    use std::collections::VecDeque;

    /// Replays scripted actions and records what the loop showed.
    #[derive(Default)]
    struct ScriptedInterface {
        actions: VecDeque<Option<UserAction>>,
        events: Vec<String>,
    }

    impl ScriptedInterface {
        fn new(actions: Vec<Option<UserAction>>) -> Self {
            Self {
                actions: actions.into(),
                events: Vec::new(),
            }
        }
    }

    impl GameInterface for ScriptedInterface {
        fn read_action(&mut self) -> Option<UserAction> {
            self.actions.pop_front().unwrap_or(Some(UserAction::Exit))
        }

        fn display_new_game(&mut self, session: &Session) {
            self.events.push(format!("new {}", session.length()));
        }

        fn display_attempt(&mut self, session: &Session, outcome: &GuessOutcome) {
            self.events.push(format!(
                "attempt {} {} {}",
                outcome.result.exact_matches,
                outcome.result.digit_matches,
                session.remaining_attempts()
            ));
        }

        fn display_game_over(&mut self, session: &Session) {
            let secret = session.revealed_secret().unwrap();
            self.events.push(format!("over {} {secret}", session.status()));
        }

        fn display_error(&mut self, error: &ValidationError) {
            self.events.push(format!("error {error:?}"));
        }

        fn display_exit_message(&mut self, record: &PlayRecord) {
            self.events.push(format!("exit {}", record.games_played()));
        }
    }

    fn guess(s: &str) -> Option<UserAction> {
        Some(UserAction::Guess(s.parse().unwrap()))
    }

    fn config(max_attempts: usize) -> SessionConfig {
        SessionConfig {
            length: 4,
            policy: DuplicatesPolicy::Forbidden,
            max_attempts,
        }
    }

    #[test]
    fn test_immediate_exit_abandons_game() {
        let mut ui = ScriptedInterface::new(vec![Some(UserAction::Exit)]);
        let mut source = ScriptedSource::new([4]);
        let record = game_loop(&config(10), &mut ui, &mut source).unwrap();
        assert_eq!(record.abandoned, 1);
        assert_eq!(ui.events, vec!["new 4", "exit 1"]);
    }

    #[test]
    fn test_win_then_exit() {
        let mut ui = ScriptedInterface::new(vec![guess("4658"), guess("4567")]);
        let mut source = ScriptedSource::new([4]);
        let record = game_loop(&config(10), &mut ui, &mut source).unwrap();
        assert_eq!(
            record,
            PlayRecord {
                wins: 1,
                losses: 0,
                abandoned: 0
            }
        );
        assert_eq!(
            ui.events,
            vec![
                "new 4",
                "attempt 1 2 9",
                "attempt 4 0 8",
                "over won 4567",
                "exit 1"
            ]
        );
    }

    #[test]
    fn test_loss_reveals_secret() {
        let mut ui = ScriptedInterface::new(vec![guess("0123"), guess("0123")]);
        let mut source = ScriptedSource::new([4]);
        let record = game_loop(&config(2), &mut ui, &mut source).unwrap();
        assert_eq!(record.losses, 1);
        assert!(ui.events.contains(&"over lost 4567".to_string()));
    }

    #[test]
    fn test_guess_after_game_over_reports_error() {
        let mut ui = ScriptedInterface::new(vec![guess("4567"), guess("4567")]);
        let mut source = ScriptedSource::new([4]);
        let record = game_loop(&config(10), &mut ui, &mut source).unwrap();
        assert_eq!(record.wins, 1);
        assert!(
            ui.events
                .iter()
                .any(|e| e.starts_with("error SessionOver"))
        );
    }

    #[test]
    fn test_invalid_input_and_wrong_length_keep_playing() {
        let mut ui = ScriptedInterface::new(vec![None, guess("45"), guess("4567")]);
        let mut source = ScriptedSource::new([4]);
        let record = game_loop(&config(10), &mut ui, &mut source).unwrap();
        assert_eq!(record.wins, 1);
        assert_eq!(ui.events[1], "error LengthMismatch { expected: 4, actual: 2 }");
        assert_eq!(ui.events[2], "attempt 4 0 9");
    }

    #[test]
    fn test_new_game_mid_play_counts_abandoned() {
        let mut ui = ScriptedInterface::new(vec![
            guess("0123"),
            Some(UserAction::NewGame),
            guess("4567"),
            Some(UserAction::NewGame),
        ]);
        let mut source = ScriptedSource::new([4]);
        let record = game_loop(&config(10), &mut ui, &mut source).unwrap();
        // First game abandoned, second won, third abandoned on exit
        assert_eq!(
            record,
            PlayRecord {
                wins: 1,
                losses: 0,
                abandoned: 2
            }
        );
        assert_eq!(ui.events.iter().filter(|e| e.starts_with("new")).count(), 3);
    }

    #[test]
    fn test_bad_config_fails_before_display() {
        let mut ui = ScriptedInterface::default();
        let mut source = ScriptedSource::new([0]);
        let config = SessionConfig {
            length: 12,
            policy: DuplicatesPolicy::Forbidden,
            max_attempts: 10,
        };
        assert!(game_loop(&config, &mut ui, &mut source).is_err());
        assert!(ui.events.is_empty());
    }
}
