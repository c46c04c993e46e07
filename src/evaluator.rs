use crate::code::Digit;
use derive_more::Display;

/// Counts reported for one guess.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display)]
#[display("{exact_matches} exact, {digit_matches} misplaced")]
pub struct MatchResult {
    /// Positions where guess and secret hold the same digit.
    pub exact_matches: usize,
    /// Remaining guess digits that appear elsewhere in the secret, each
    /// secret digit counted at most once.
    pub digit_matches: usize,
}

/// One feedback marker, as drawn by the frontends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Peg {
    Exact,        // Green
    Misplaced,    // Yellow
    Miss,         // Black
}

impl MatchResult {
    /// Guess digits that matched nothing.
    #[must_use]
    pub fn misses(&self, length: usize) -> usize {
        length.saturating_sub(self.exact_matches + self.digit_matches)
    }

    #[must_use]
    pub fn is_solved(&self, length: usize) -> bool {
        self.exact_matches == length
    }

    /// Exact pegs first, then misplaced, then misses; `length` pegs in total.
    pub fn pegs(&self, length: usize) -> impl Iterator<Item = Peg> + use<> {
        std::iter::repeat_n(Peg::Exact, self.exact_matches)
            .chain(std::iter::repeat_n(Peg::Misplaced, self.digit_matches))
            .chain(std::iter::repeat_n(Peg::Miss, self.misses(length)))
    }
}

/// Scores `guess` against `secret`.
///
/// Both slices must have the same length; the session checks this before
/// calling. Exact matches are taken first and their slots consumed, then each
/// remaining guess digit claims the first unconsumed secret slot with the same
/// value.
#[must_use]
pub fn evaluate(guess: &[Digit], secret: &[Digit]) -> MatchResult {
    debug_assert_eq!(guess.len(), secret.len());

    let mut guess_left: Vec<Option<Digit>> = guess.iter().copied().map(Some).collect();
    let mut secret_left: Vec<Option<Digit>> = secret.iter().copied().map(Some).collect();
    let mut result = MatchResult::default();

    // First pass: exact positions
    for (g, s) in guess_left.iter_mut().zip(secret_left.iter_mut()) {
        if g.is_some() && g == s {
            result.exact_matches += 1;
            *g = None;
            *s = None;
        }
    }

    // Second pass: right digit, wrong position
    for g in guess_left.iter().flatten() {
        if let Some(slot) = secret_left.iter_mut().find(|s| **s == Some(*g)) {
            result.digit_matches += 1;
            *slot = None;
        }
    }

    result
}
