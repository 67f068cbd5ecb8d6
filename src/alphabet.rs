use std::fmt;

use log::trace;
use once_cell::sync::Lazy;

use crate::GenerationOptions;

pub const LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*()_+~`|}{[]:;?><,./-=";

// Indexed by `digits as usize | (symbols as usize) << 1`
static ALPHABETS: Lazy<[Alphabet; 4]> = Lazy::new(|| {
    [
        Alphabet::compose(false, false),
        Alphabet::compose(true, false),
        Alphabet::compose(false, true),
        Alphabet::compose(true, true),
    ]
});

/// Ordered set of characters eligible for sampling. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<char>,
}

impl Alphabet {
    fn compose(include_digits: bool, include_symbols: bool) -> Self {
        let mut chars: Vec<char> = LETTERS.chars().collect();
        if include_digits {
            chars.extend(DIGITS.chars());
        }
        if include_symbols {
            chars.extend(SYMBOLS.chars());
        }
        Self { chars }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Never true for alphabets built by this module.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.chars {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// Shared alphabet for a flag combination.
pub fn alphabet_for(include_digits: bool, include_symbols: bool) -> &'static Alphabet {
    let index = usize::from(include_digits) | (usize::from(include_symbols) << 1);
    &ALPHABETS[index]
}

pub fn build_alphabet(options: &GenerationOptions) -> Alphabet {
    let alphabet = alphabet_for(options.include_digits, options.include_symbols);
    trace!("Built alphabet of {} characters for {:?}", alphabet.len(), options);
    alphabet.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_sizes() {
        assert_eq!(LETTERS.chars().count(), 52);
        assert_eq!(DIGITS.chars().count(), 10);
        assert_eq!(SYMBOLS.chars().count(), 29);
    }

    #[test]
    fn test_concatenation_order() {
        let options = GenerationOptions::default().with_digits(true).with_symbols(true);
        let alphabet = build_alphabet(&options);
        assert_eq!(alphabet.to_string(), format!("{}{}{}", LETTERS, DIGITS, SYMBOLS));
        assert_eq!(alphabet.get(0), Some('a'));
        assert_eq!(alphabet.get(52), Some('0'));
        assert_eq!(alphabet.get(62), Some('!'));
        assert_eq!(alphabet.get(91), None);
    }

    #[test]
    fn test_shared_table() {
        assert!(std::ptr::eq(alphabet_for(true, false), alphabet_for(true, false)));
        assert!(!alphabet_for(false, false).is_empty());
    }
}
