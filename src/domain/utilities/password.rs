//! Random password generation and strength rating.

use rand::rngs::OsRng;
use rand::Rng;
use serde::Serialize;

use super::UtilityError;

pub const MIN_LENGTH: usize = 4;
pub const MAX_LENGTH: usize = 128;
pub const DEFAULT_LENGTH: usize = 16;

const ALPHANUMERIC: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Strength {
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPassword {
    pub password: String,
    pub length: usize,
    pub include_symbols: bool,
    pub strength: Strength,
}

/// Draws `length` characters from the OS CSPRNG.
pub fn generate(length: usize, include_symbols: bool) -> Result<GeneratedPassword, UtilityError> {
    if !(MIN_LENGTH..=MAX_LENGTH).contains(&length) {
        return Err(UtilityError::invalid(
            "length",
            format!("must be between {} and {}", MIN_LENGTH, MAX_LENGTH),
        ));
    }

    let alphabet: Vec<char> = if include_symbols {
        ALPHANUMERIC.chars().chain(SYMBOLS.chars()).collect()
    } else {
        ALPHANUMERIC.chars().collect()
    };

    let mut rng = OsRng;
    let password: String = (0..length)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
        .collect();

    Ok(GeneratedPassword {
        password,
        length,
        include_symbols,
        strength: rate(length, include_symbols),
    })
}

/// Rates a generated password by length and alphabet.
pub fn rate(length: usize, include_symbols: bool) -> Strength {
    match length {
        l if l < 8 => Strength::Weak,
        l if l < 12 => Strength::Medium,
        l if l >= 16 && include_symbols => Strength::VeryStrong,
        _ => Strength::Strong,
    }
}

pub fn is_symbol(c: char) -> bool {
    SYMBOLS.contains(c)
}
