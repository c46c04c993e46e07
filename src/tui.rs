//! TUI (Terminal User Interface) module for Codebreaker
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # State Machine
//! - `EnteringGuess`: digits fill the guess boxes, ENTER submits
//! - `GameOver`: the code is revealed, N starts a new game
//!
//! ESC quits from either state.

use crate::code::{Code, Digit};
use crate::error::ValidationError;
use crate::evaluator::Peg;
use crate::game_state::{GameInterface, PlayRecord, UserAction};
use crate::session::{GuessOutcome, Session, Status};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const FAILURE_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const BOX_STYLE: Style = Style::new().fg(Color::White).bg(Color::DarkGray);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    EnteringGuess,
    GameOver { won: bool },
}

/// One line of the previous tries list.
#[derive(Debug)]
struct TryRow {
    number: usize,
    guess: String,
    pegs: Vec<Peg>,
}

fn peg_color(peg: Peg) -> Color {
    match peg {
        Peg::Exact => Color::Green,
        Peg::Misplaced => Color::Yellow,
        Peg::Miss => Color::DarkGray,
    }
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    length: usize,
    current_input: &'a [Digit],
    tries: &'a [TryRow],
    remaining: usize,
    state: TuiState,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Full-screen implementation of [`GameInterface`].
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    length: usize,
    current_input: Vec<Digit>,
    tries: Vec<TryRow>,
    remaining: usize,
    state: TuiState,
    message: String,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal backend created");

        Ok(Self {
            terminal,
            length: 0,
            current_input: Vec::new(),
            tries: Vec::new(),
            remaining: 0,
            state: TuiState::EnteringGuess,
            message: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            length: self.length,
            current_input: &self.current_input,
            tries: &self.tries,
            remaining: self.remaining,
            state: self.state,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Guess boxes
                Constraint::Min(6),    // Previous tries
                Constraint::Length(5), // Info panel
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_guess_boxes(f, chunks[1], ctx);
        Self::render_tries(f, chunks[2], ctx.tries);
        Self::render_info(f, chunks[3], ctx);
        Self::render_status(f, chunks[4], ctx.status);
        Self::render_instructions(f, chunks[5], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("CODEBREAKER")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_guess_boxes(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut spans = vec![Span::raw("  ")];
        if ctx.state == TuiState::EnteringGuess {
            for i in 0..ctx.length {
                let digit = ctx
                    .current_input
                    .get(i)
                    .map_or_else(|| " ".to_string(), ToString::to_string);
                spans.push(Span::styled(format!(" {digit} "), BOX_STYLE));
                spans.push(Span::raw(" "));
            }
        }

        let paragraph = Paragraph::new(Line::from(spans))
            .block(Block::default().title("Your guess").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    /// Newest try first; older ones fall off the bottom when space runs out.
    fn render_tries(f: &mut Frame, area: Rect, tries: &[TryRow]) {
        let lines: Vec<Line> = tries
            .iter()
            .rev()
            .map(|row| {
                let mut spans = vec![Span::raw(format!("  Try {:>2}: {}   ", row.number, row.guess))];
                for &peg in &row.pegs {
                    spans.push(Span::styled("●", Style::default().fg(peg_color(peg))));
                    spans.push(Span::raw(" "));
                }
                Line::from(spans)
            })
            .collect();

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Previous tries").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = vec![Line::from(vec![Span::styled(
            format!("Tries remaining: {}", ctx.remaining),
            INFO_STYLE,
        )])];

        if !ctx.message.is_empty() {
            let style = match ctx.state {
                TuiState::GameOver { won: true } => SUCCESS_STYLE,
                TuiState::GameOver { won: false } => FAILURE_STYLE,
                TuiState::EnteringGuess => Style::default().fg(Color::Cyan),
            };
            lines.push(Line::from(vec![Span::styled(ctx.message, style)]));
        }

        if !ctx.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::EnteringGuess => "0-9: Enter digit | BACKSPACE: Delete | ENTER: Submit | ESC: Quit",
            TuiState::GameOver { .. } => "N: New Game | ESC: Quit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        let Event::Key(key) = event::read()? else {
            debug_log!("handle_input() - Ignoring non-key event");
            return Ok(None);
        };

        // Only process Press events, ignore Release and Repeat to avoid double input
        if key.kind != event::KeyEventKind::Press {
            return Ok(None);
        }
        if Self::has_modifier_keys(&key) {
            debug_log!("handle_input() - Ignoring key with modifier: {:?}", key.modifiers);
            return Ok(None);
        }

        Ok(match self.state {
            TuiState::EnteringGuess => self.handle_guess_input(key),
            TuiState::GameOver { .. } => Self::handle_game_over_input(key),
        })
    }

    fn handle_guess_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        self.error_message.clear();

        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if self.current_input.len() < self.length {
                    if let Ok(digit) = Digit::try_from(c) {
                        self.current_input.push(digit);
                    }
                } else {
                    self.error_message = format!("The code has only {} digits.", self.length);
                }
            }
            KeyCode::Backspace => {
                self.current_input.pop();
            }
            KeyCode::Enter if self.current_input.len() == self.length => {
                let guess = Code::new(std::mem::take(&mut self.current_input));
                info_log!("handle_guess_input() - submitting {}", guess);
                return Some(UserAction::Guess(guess));
            }
            KeyCode::Enter => {
                self.error_message = format!("Please enter {} digits.", self.length);
            }
            KeyCode::Esc => {
                info_log!("handle_guess_input() - ESC pressed, returning Exit");
                return Some(UserAction::Exit);
            }
            KeyCode::Char(c) => {
                self.error_message = format!("Only digits are allowed! ('{c}' is not a digit)");
            }
            _ => {
                debug_log!("handle_guess_input() - Ignoring key: {:?}", key.code);
            }
        }
        None
    }

    fn handle_game_over_input(key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Char('n' | 'N') => Some(UserAction::NewGame),
            KeyCode::Esc | KeyCode::Char('q' | 'Q') => Some(UserAction::Exit),
            _ => None,
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(event::KeyModifiers::ALT)
            || key.modifiers.contains(event::KeyModifiers::CONTROL)
    }

    fn sync_from_session(&mut self, session: &Session) {
        let length = session.length();
        self.length = length;
        self.remaining = session.remaining_attempts();
        self.tries = session
            .attempts()
            .iter()
            .enumerate()
            .map(|(i, attempt)| TryRow {
                number: i + 1,
                guess: attempt.guess.to_string(),
                pegs: attempt.result.pegs(length).collect(),
            })
            .collect();
    }
}

impl GameInterface for TuiInterface {
    fn read_action(&mut self) -> Option<UserAction> {
        loop {
            if self.draw().is_err() {
                info_log!("read_action() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }

            match self.handle_input() {
                Ok(Some(action)) => return Some(action),
                Ok(None) => {}
                Err(e) => {
                    info_log!("read_action() - Input error {}, returning Exit", e);
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_new_game(&mut self, session: &Session) {
        self.sync_from_session(session);
        self.current_input.clear();
        self.state = TuiState::EnteringGuess;
        self.message = format!(
            "Guess the {}-digit code. Green: right place, yellow: wrong place.",
            session.length()
        );
        self.error_message.clear();
        self.status = format!("New game - duplicates {}", session.policy());
        self.draw_or_log();
    }

    fn display_attempt(&mut self, session: &Session, outcome: &GuessOutcome) {
        self.sync_from_session(session);
        self.message.clear();
        self.status = format!("Last guess: {}", outcome.result);
        self.draw_or_log();
    }

    fn display_game_over(&mut self, session: &Session) {
        let Some(secret) = session.revealed_secret() else {
            return;
        };
        let won = session.status() == Status::Won;
        self.state = TuiState::GameOver { won };
        self.message = if won {
            format!("Congratulations! You guessed it right, the code was {secret}")
        } else {
            format!("Sorry, you didn't get it. The code was {secret}")
        };
        self.status = format!("Game Over - {}", session.status());
        self.draw_or_log();
    }

    fn display_error(&mut self, error: &ValidationError) {
        self.error_message = error.to_string();
        self.draw_or_log();
    }

    fn display_exit_message(&mut self, record: &PlayRecord) {
        self.message = "Exiting...".to_string();
        self.status = format!(
            "Won {}, lost {}, abandoned {}",
            record.wins, record.losses, record.abandoned
        );
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
