//! Human-speakable ticket codes for anonymous help requests.
//!
//! A code looks like `নীল-মাছ-482`: a color, an animal and a three-digit
//! number. It is the submitter's only handle on their request, so it is
//! optimised for being read aloud and written down, not for secrecy.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

pub const COLORS: [&str; 7] = ["নীল", "লাল", "সবুজ", "হলুদ", "কালো", "সাদা", "বেগুনি"];
pub const ANIMALS: [&str; 7] = ["পাখি", "মাছ", "গরু", "ছাগল", "হাঁস", "মুরগি", "বিড়াল"];
pub const NUMBER_MIN: u16 = 100;
pub const NUMBER_MAX: u16 = 999;

/// Attempts made by a submission before giving up on finding a free code.
pub const MAX_TICKET_ATTEMPTS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(transparent)]
pub struct TicketCode(String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketCodeError {
    pub value: String,
}

impl fmt::Display for TicketCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid ticket code: {}", self.value)
    }
}

impl std::error::Error for TicketCodeError {}

impl TicketCode {
    pub fn from_parts(color: usize, animal: usize, number: u16) -> Option<Self> {
        let color = COLORS.get(color)?;
        let animal = ANIMALS.get(animal)?;
        if !(NUMBER_MIN..=NUMBER_MAX).contains(&number) {
            return None;
        }
        Some(Self(format!("{color}-{animal}-{number}")))
    }

    pub fn parse(value: &str) -> Result<Self, TicketCodeError> {
        let invalid = || TicketCodeError {
            value: value.to_string(),
        };
        let mut parts = value.split('-');
        let (Some(color), Some(animal), Some(number), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        if !COLORS.contains(&color) || !ANIMALS.contains(&animal) {
            return Err(invalid());
        }
        if number.len() != 3 || !number.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let number: u16 = number.parse().map_err(|_| invalid())?;
        if !(NUMBER_MIN..=NUMBER_MAX).contains(&number) {
            return Err(invalid());
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TicketCode {
    type Err = TicketCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for TicketCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}

/// Supplies candidate codes to a submission. Uniqueness is not its
/// concern; the store rejects duplicates and the caller asks again.
pub trait CodeSource {
    fn next_code(&mut self) -> TicketCode;
}

pub struct RandomCodes<R> {
    rng: R,
}

impl<R: Rng> RandomCodes<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomCodes<rand::rngs::ThreadRng> {
    pub fn thread() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl<R: Rng> CodeSource for RandomCodes<R> {
    fn next_code(&mut self) -> TicketCode {
        let color = self.rng.gen_range(0..COLORS.len());
        let animal = self.rng.gen_range(0..ANIMALS.len());
        let number = self.rng.gen_range(NUMBER_MIN..=NUMBER_MAX);
        TicketCode(format!("{}-{}-{number}", COLORS[color], ANIMALS[animal]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn generated_codes_parse_back() {
        let mut codes = RandomCodes::new(StdRng::seed_from_u64(42));
        for _ in 0..500 {
            let code = codes.next_code();
            assert_eq!(TicketCode::parse(code.as_str()).unwrap(), code);
        }
    }

    #[test]
    fn generated_numbers_stay_in_range() {
        let mut codes = RandomCodes::new(StdRng::seed_from_u64(7));
        for _ in 0..500 {
            let code = codes.next_code();
            let number: u16 = code.as_str().rsplit('-').next().unwrap().parse().unwrap();
            assert!((NUMBER_MIN..=NUMBER_MAX).contains(&number));
        }
    }

    #[test]
    fn from_parts_builds_expected_text() {
        let code = TicketCode::from_parts(0, 1, 482).unwrap();
        assert_eq!(code.as_str(), "নীল-মাছ-482");
        assert!(TicketCode::from_parts(7, 0, 482).is_none());
        assert!(TicketCode::from_parts(0, 0, 99).is_none());
    }

    #[test]
    fn parse_rejects_malformed_codes() {
        for value in [
            "",
            "নীল-মাছ",
            "নীল-মাছ-48",
            "নীল-মাছ-4821",
            "নীল-মাছ-099",
            "কমলা-মাছ-482",
            "নীল-বাঘ-482",
            "নীল-মাছ-৪৮২",
            "নীল-মাছ-482-1",
        ] {
            assert!(TicketCode::parse(value).is_err(), "{value} should be rejected");
        }
    }
}
