use serde::{Deserialize, Serialize};

use crate::KeysmithError;

pub const DEFAULT_LENGTH: usize = 8;
pub const MIN_LENGTH: usize = 6;
pub const MAX_LENGTH: usize = 100;

/// Inclusive range of lengths a caller may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    pub min: usize,
    pub max: usize,
}

impl Default for LengthBounds {
    fn default() -> Self {
        Self { min: MIN_LENGTH, max: MAX_LENGTH }
    }
}

impl LengthBounds {
    pub fn contains(&self, length: usize) -> bool {
        (self.min..=self.max).contains(&length)
    }

    /// Converts a signed length into a `usize`, rejecting anything outside the bounds.
    pub fn check(&self, length: i64) -> Result<usize, KeysmithError> {
        match usize::try_from(length) {
            Ok(len) if self.contains(len) => Ok(len),
            _ => Err(KeysmithError::InvalidLength { length, min: self.min, max: self.max }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    pub length: usize,
    #[serde(default)]
    pub include_digits: bool,
    #[serde(default)]
    pub include_symbols: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            include_digits: false,
            include_symbols: false,
        }
    }
}

impl GenerationOptions {
    pub fn new(length: i64, include_digits: bool, include_symbols: bool) -> Result<Self, KeysmithError> {
        let length = LengthBounds::default().check(length)?;
        Ok(Self { length, include_digits, include_symbols })
    }

    pub fn set_length(&mut self, length: i64) -> Result<&mut Self, KeysmithError> {
        self.length = LengthBounds::default().check(length)?;
        Ok(self)
    }

    pub fn with_digits(mut self, include_digits: bool) -> Self {
        self.include_digits = include_digits;
        self
    }

    pub fn with_symbols(mut self, include_symbols: bool) -> Self {
        self.include_symbols = include_symbols;
        self
    }

    /// Deserialized options bypass the constructor, so they are checked here.
    pub fn validate_within(&self, bounds: &LengthBounds) -> Result<(), KeysmithError> {
        if bounds.contains(self.length) {
            Ok(())
        } else {
            Err(KeysmithError::InvalidLength {
                length: i64::try_from(self.length).unwrap_or(i64::MAX),
                min: bounds.min,
                max: bounds.max,
            })
        }
    }
}
