// Integration tests for the codebreaker application
// These tests verify that all modules work together correctly

use codebreaker::cli::CliInterface;
use codebreaker::*;
use std::io::Cursor;

fn play(input: &str, config: &SessionConfig, source: &mut dyn DigitSource) -> (PlayRecord, String) {
    let mut interface = CliInterface::new(Cursor::new(input.to_string()), Vec::new());
    let record = game_loop(config, &mut interface, source).unwrap();
    let output = String::from_utf8(interface.into_writer()).unwrap();
    (record, output)
}

fn code(s: &str) -> Code {
    s.parse().unwrap()
}

#[test]
fn test_end_to_end_win() {
    // Secret is 4567: index 4 into a shrinking pool every time
    let config = SessionConfig::default();
    let mut source = ScriptedSource::new([4]);
    let (record, output) = play("0123\n4658\n4567\nexit\n", &config, &mut source);

    assert_eq!(record.wins, 1);
    assert_eq!(record.games_played(), 1);
    assert!(output.contains("Result: 0 exact, 0 misplaced"));
    assert!(output.contains("Result: 1 exact, 2 misplaced"));
    assert!(output.contains("Try 3: 4567  ● ● ● ●"));
    assert!(output.contains("Tries remaining: 7"));
    assert!(output.contains("the code was 4567"));
}

#[test]
fn test_end_to_end_loss_after_max_attempts() {
    let config = SessionConfig {
        length: 3,
        policy: DuplicatesPolicy::Allowed,
        max_attempts: 3,
    };
    let mut source = ScriptedSource::new([9, 9, 9]);
    let (record, output) = play("111\n222\n333\n999\nexit\n", &config, &mut source);

    assert_eq!(record.losses, 1);
    assert_eq!(record.wins, 0);
    assert!(output.contains("Sorry, you didn't get it. The code was 999"));
    // The fourth guess is refused rather than scored
    assert!(output.contains("This game is already over (lost)."));
    assert!(!output.contains("Try 4"));
}

#[test]
fn test_seeded_games_are_reproducible() {
    let config = SessionConfig {
        length: 5,
        policy: DuplicatesPolicy::Allowed,
        max_attempts: 1,
    };
    let mut first = RandomSource::seeded(2024);
    let mut second = RandomSource::seeded(2024);
    let (_, out_a) = play("00000\n", &config, &mut first);
    let (_, out_b) = play("00000\n", &config, &mut second);
    assert_eq!(out_a, out_b);
}

#[test]
fn test_multiple_games_in_one_run() {
    let config = SessionConfig {
        length: 2,
        policy: DuplicatesPolicy::Forbidden,
        max_attempts: 5,
    };
    // Every secret is 01
    let mut source = ScriptedSource::new([0]);
    let input = "01\nnext\n10\nnext\n01\nexit\n";
    let (record, output) = play(input, &config, &mut source);

    assert_eq!(
        record,
        PlayRecord {
            wins: 2,
            losses: 0,
            abandoned: 1
        }
    );
    assert_eq!(output.matches("New game:").count(), 3);
    assert!(output.contains("Exiting. Won 2, lost 0, abandoned 1."));
}

#[test]
fn test_invalid_configuration_is_rejected() {
    let config = SessionConfig {
        length: 11,
        policy: DuplicatesPolicy::Forbidden,
        max_attempts: 10,
    };
    let mut interface = CliInterface::new(Cursor::new(String::new()), Vec::new());
    let mut source = ScriptedSource::new([0]);
    let err = game_loop(&config, &mut interface, &mut source).unwrap_err();
    assert_eq!(
        err,
        ConfigurationError::TooLongWithoutRepeats {
            length: 11,
            max: DIGIT_COUNT
        }
    );
    assert!(interface.into_writer().is_empty());
}

#[test]
fn test_session_api_without_frontend() {
    let config = SessionConfig {
        length: 4,
        policy: DuplicatesPolicy::Forbidden,
        max_attempts: 3,
    };
    let mut session = Session::start(&config, &mut RandomSource::seeded(5)).unwrap();
    assert!(session.revealed_secret().is_none());

    for (i, guess) in ["0123", "4567", "8901"].iter().enumerate() {
        if session.status() != Status::InProgress {
            break;
        }
        session.submit_guess(code(guess)).unwrap();
        assert_eq!(session.remaining_attempts(), 3 - (i + 1));
    }

    assert!(session.status().is_terminal());
    let secret = session.revealed_secret().unwrap();
    assert_eq!(secret.len(), 4);
    assert!(!secret.has_repeats());
}

#[test]
fn test_scoring_examples() {
    let secret = code("4567");
    let result = evaluate(code("4658").digits(), secret.digits());
    assert_eq!(
        result,
        MatchResult {
            exact_matches: 1,
            digit_matches: 2
        }
    );
    assert_eq!(result.misses(4), 1);

    let result = evaluate(code("312").digits(), code("123").digits());
    assert_eq!((result.exact_matches, result.digit_matches), (0, 3));
}

#[test]
fn test_forbidden_generation_through_public_api() {
    let mut source = RandomSource::seeded(77);
    for length in 1..=DIGIT_COUNT {
        for _ in 0..100 {
            let secret = generate(length, DuplicatesPolicy::Forbidden, &mut source).unwrap();
            assert_eq!(secret.len(), length);
            assert!(!secret.has_repeats());
        }
    }
}

#[test]
fn test_filtering_with_feedback_finds_secret() {
    // A simple consistent-guess strategy should solve a 3-digit game within budget
    let secret = code("852");
    let mut session = Session::from_secret(secret.clone(), 10).unwrap();
    let mut candidates: Vec<Code> = (0..1000u16)
        .map(|n| {
            let values = [(n / 100) as u8, (n / 10 % 10) as u8, (n % 10) as u8];
            Code::from_values(&values).unwrap()
        })
        .filter(|c| !c.has_repeats())
        .collect();

    while session.status() == Status::InProgress {
        let guess = candidates[0].clone();
        let outcome = session.submit_guess(guess.clone()).unwrap();
        candidates.retain(|c| evaluate(guess.digits(), c.digits()) == outcome.result);
    }

    assert_eq!(session.status(), Status::Won);
    assert_eq!(session.revealed_secret(), Some(&secret));
}
