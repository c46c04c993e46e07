//! Secret code generation.
//!
//! Randomness is drawn through [`DigitSource`] so tests and demos can swap
//! the thread RNG for a seeded or fully scripted stream.

use crate::code::{Code, DIGIT_COUNT, Digit, DuplicatesPolicy};
use crate::debug_log;
use crate::error::ConfigurationError;
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// A source of uniformly distributed indices.
pub trait DigitSource {
    /// Returns an index in `0..bound`. Callers never pass a zero bound.
    fn next_index(&mut self, bound: usize) -> usize;
}

/// [`DigitSource`] backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomSource<R = ThreadRng> {
    rng: R,
}

impl RandomSource<ThreadRng> {
    #[must_use]
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for RandomSource<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource<StdRng> {
    /// Reproducible stream: the same seed yields the same secrets.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> DigitSource for RandomSource<R> {
    fn next_index(&mut self, bound: usize) -> usize {
        self.rng.random_range(0..bound)
    }
}

/// Deterministic [`DigitSource`] that replays a fixed list of indices,
/// cycling when it runs out. Each value is reduced modulo the requested bound.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    script: Vec<usize>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(script: impl Into<Vec<usize>>) -> Self {
        Self {
            script: script.into(),
            cursor: 0,
        }
    }
}

impl DigitSource for ScriptedSource {
    fn next_index(&mut self, bound: usize) -> usize {
        if self.script.is_empty() {
            return 0;
        }
        let value = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        value % bound
    }
}

/// Checks that `length` digits can be produced under `policy`.
pub fn check_length(length: usize, policy: DuplicatesPolicy) -> Result<(), ConfigurationError> {
    if length == 0 {
        return Err(ConfigurationError::ZeroLength);
    }
    if policy == DuplicatesPolicy::Forbidden && length > DIGIT_COUNT {
        return Err(ConfigurationError::TooLongWithoutRepeats {
            length,
            max: DIGIT_COUNT,
        });
    }
    Ok(())
}

/// Generates a secret of `length` digits.
///
/// With [`DuplicatesPolicy::Allowed`] every position is an independent
/// uniform draw from 0..=9. With [`DuplicatesPolicy::Forbidden`] digits are
/// drawn without replacement from the ten-digit pool, giving a uniformly
/// random permutation truncated to `length`.
pub fn generate<S: DigitSource + ?Sized>(
    length: usize,
    policy: DuplicatesPolicy,
    source: &mut S,
) -> Result<Code, ConfigurationError> {
    check_length(length, policy)?;

    let mut pool: Vec<Digit> = Digit::all().collect();
    let digits = match policy {
        DuplicatesPolicy::Allowed => (0..length)
            .map(|_| pool[source.next_index(pool.len())])
            .collect(),
        DuplicatesPolicy::Forbidden => (0..length)
            .map(|_| {
                let index = source.next_index(pool.len());
                pool.remove(index)
            })
            .collect(),
    };

    let code = Code::new(digits);
    debug_log!("generate() - {} digits, duplicates {}: {}", length, policy, code);
    Ok(code)
}
