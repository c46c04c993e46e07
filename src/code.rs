use crate::error::ValidationError;
use clap::ValueEnum;
use derive_more::Display;
use std::fmt;
use std::str::FromStr;

/// Number of distinct digit values a code can draw from.
pub const DIGIT_COUNT: usize = 10;

/// A single decimal digit, 0 through 9.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub struct Digit(u8);

impl Digit {
    /// Returns `None` for values above 9.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value < DIGIT_COUNT as u8 {
            Some(Self(value))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// All ten digits in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..DIGIT_COUNT as u8).map(Self)
    }
}

impl TryFrom<char> for Digit {
    type Error = ValidationError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        c.to_digit(10)
            .and_then(|d| u8::try_from(d).ok())
            .and_then(Self::new)
            .ok_or(ValidationError::NotADigit { found: c })
    }
}

/// Whether a secret code may repeat a digit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Display, ValueEnum)]
pub enum DuplicatesPolicy {
    #[display("allowed")]
    Allowed,
    #[default]
    #[display("forbidden")]
    Forbidden,
}

/// An ordered sequence of digits: a secret or a guess.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Code(Vec<Digit>);

impl Code {
    #[must_use]
    pub fn new(digits: Vec<Digit>) -> Self {
        Self(digits)
    }

    /// Builds a code from raw values, or `None` if any value is above 9.
    #[must_use]
    pub fn from_values(values: &[u8]) -> Option<Self> {
        values
            .iter()
            .map(|&v| Digit::new(v))
            .collect::<Option<Vec<_>>>()
            .map(Self)
    }

    #[must_use]
    pub fn digits(&self) -> &[Digit] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if some digit appears more than once.
    #[must_use]
    pub fn has_repeats(&self) -> bool {
        let mut seen = [false; DIGIT_COUNT];
        self.0.iter().any(|d| {
            let slot = &mut seen[usize::from(d.value())];
            std::mem::replace(slot, true)
        })
    }
}

impl AsRef<[Digit]> for Code {
    fn as_ref(&self) -> &[Digit] {
        &self.0
    }
}

impl From<Vec<Digit>> for Code {
    fn from(digits: Vec<Digit>) -> Self {
        Self(digits)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in &self.0 {
            write!(f, "{digit}")?;
        }
        Ok(())
    }
}

/// Parses typed input such as `"4567"` or `"4 5 6 7"`. Whitespace is
/// ignored; length is not checked here.
impl FromStr for Code {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .filter(|c| !c.is_whitespace())
            .map(Digit::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}
