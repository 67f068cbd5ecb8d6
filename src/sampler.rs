use log::trace;
use rand::{Rng, SeedableRng, rngs::{StdRng, ThreadRng}};

use crate::{Alphabet, GenerationOptions, KeysmithError, alphabet::build_alphabet};

/// Draws passwords from an alphabet using an injected random source.
///
/// Indices come from `Rng::random_range`, which rejects out-of-zone samples
/// instead of reducing modulo the alphabet size, so every character has
/// probability `1 / alphabet.len()` up to the quality of `R`.
/// Nothing here makes a password cryptographically strong on its own.
#[derive(Debug, Clone)]
pub struct PasswordSampler<R: Rng> {
    rng: R,
}

impl PasswordSampler<ThreadRng> {
    pub fn thread() -> Self {
        Self::new(rand::rng())
    }
}

impl PasswordSampler<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> PasswordSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn draw(&mut self, alphabet: &Alphabet) -> char {
        let chars = alphabet.chars();
        chars[self.rng.random_range(0..chars.len())]
    }

    pub fn generate(&mut self, alphabet: &Alphabet, length: usize) -> String {
        trace!("Sampling {} characters from an alphabet of {}", length, alphabet.len());
        let mut password = String::with_capacity(length);
        for _ in 0..length {
            password.push(self.draw(alphabet));
        }
        password
    }

    /// Like [`generate`](Self::generate) for callers holding a signed length.
    pub fn generate_signed(&mut self, alphabet: &Alphabet, length: i64) -> Result<String, KeysmithError> {
        let length = usize::try_from(length).map_err(|_| KeysmithError::InvalidLength {
            length,
            min: 0,
            max: usize::MAX,
        })?;
        Ok(self.generate(alphabet, length))
    }

    pub fn generate_for(&mut self, options: &GenerationOptions) -> String {
        self.generate(&build_alphabet(options), options.length)
    }
}

pub fn generate_password(options: &GenerationOptions) -> String {
    PasswordSampler::thread().generate_for(options)
}
