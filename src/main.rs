use codebreaker::cli::{CliInterface, parse_cli};
use codebreaker::logging::init_logging;
use codebreaker::tui::TuiInterface;
use codebreaker::{DigitSource, GameInterface, RandomSource, game_loop};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();
    if let Err(e) = init_logging(cli.log_file.as_deref()) {
        eprintln!("Failed to open log file: {e}");
        return ExitCode::FAILURE;
    }
    let config = cli.session_config();
    if let Err(e) = config.validate() {
        eprintln!("Invalid settings: {e}");
        return ExitCode::FAILURE;
    }

    let mut source: Box<dyn DigitSource> = match cli.seed {
        Some(seed) => Box::new(RandomSource::seeded(seed)),
        None => Box::new(RandomSource::new()),
    };

    let mut interface: Box<dyn GameInterface> = if cli.plain {
        Box::new(CliInterface::stdio())
    } else {
        match TuiInterface::new() {
            Ok(tui) => Box::new(tui),
            Err(e) => {
                eprintln!("Failed to start the terminal interface ({e}); falling back to plain mode.");
                Box::new(CliInterface::stdio())
            }
        }
    };

    let result = game_loop(&config, interface.as_mut(), source.as_mut());
    // Restore the terminal before printing anything else
    drop(interface);

    match result {
        Ok(record) => {
            log::info!(
                "Played {} games: {} won, {} lost",
                record.games_played(),
                record.wins,
                record.losses
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Invalid settings: {e}");
            ExitCode::FAILURE
        }
    }
}
