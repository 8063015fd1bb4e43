mod consts;
mod generate;
mod prelude;
mod types;

pub use consts::*;
pub use generate::{GenerateError, PeselBuilder};
pub use types::{
    Gender, UnknownGender, checksum, days_in_month, decode_year_month, is_leap_year, month_offset,
};

use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

/// A validated PESEL identifier: 11 decimal digits encoding a birth date,
/// a serial, a gender-parity digit and a checksum digit.
///
/// Parsing is the only way to obtain a value from text, so every `Pesel`
/// in existence carries a correct checksum. The date fields are decoded
/// arithmetically on access and are deliberately not checked against the
/// calendar (see [`date`](Self::date)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pesel {
    digits: [u8; PESEL_LENGTH],
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DecodeError {
    #[display(fmt = "Invalid length: {} characters (identifier has {})", "_0", PESEL_LENGTH)]
    InvalidLength(usize),
    #[display(fmt = "Invalid character {character:?} at position {position}")]
    NonDigit { position: usize, character: char },
    #[display(fmt = "Invalid checksum: computed {computed}, found {found}")]
    ChecksumMismatch { computed: u8, found: u8 },
}

impl std::error::Error for DecodeError {}

impl Pesel {
    /// Builds a value from digits the generator has already made
    /// checksum-correct.
    pub(crate) const fn from_digits(digits: [u8; PESEL_LENGTH]) -> Self {
        Self { digits }
    }

    /// Returns a builder for generating identifiers from partial
    /// constraints.
    pub fn builder() -> PeselBuilder {
        PeselBuilder::new()
    }

    /// Returns the digit values of the identifier, most significant first
    pub const fn digits(&self) -> [u8; PESEL_LENGTH] {
        self.digits
    }

    const fn pair(&self, index: usize) -> u8 {
        self.digits[index] * 10 + self.digits[index + 1]
    }

    /// Four-digit birth year, reconstructed from the two year digits and
    /// the century offset carried by the month field
    pub const fn year(&self) -> u16 {
        decode_year_month(self.pair(0), self.pair(2)).0
    }

    /// Birth month with the century offset stripped.
    /// Purely arithmetic: a checksum-valid identifier can carry a month
    /// outside 1-12 and it is returned as-is.
    pub const fn month(&self) -> u8 {
        decode_year_month(self.pair(0), self.pair(2)).1
    }

    /// Birth day as written in positions 4-5, not checked against the
    /// length of the decoded month
    pub const fn day(&self) -> u8 {
        self.pair(4)
    }

    /// Birth date as a zero-padded `YYYY-MM-DD` string.
    ///
    /// The composite is arithmetic only: identifiers whose digits encode an
    /// impossible calendar date (e.g. February 30) still pass checksum
    /// validation and format here unchanged.
    pub fn date(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }

    /// Three-digit serial from positions 6-8
    pub const fn serial(&self) -> u16 {
        self.digits[6] as u16 * 100 + self.pair(7) as u16
    }

    /// Gender encoded by the parity of the digit at position 9
    pub const fn gender(&self) -> Gender {
        Gender::from_digit(self.digits[9])
    }

    /// Returns true for identifiers with an odd gender digit
    pub const fn is_male(&self) -> bool {
        matches!(self.gender(), Gender::Male)
    }

    /// Returns true for identifiers with an even gender digit
    pub const fn is_female(&self) -> bool {
        matches!(self.gender(), Gender::Female)
    }

    /// Checksum digit at position 10
    pub const fn checksum_digit(&self) -> u8 {
        self.digits[PESEL_LENGTH - 1]
    }

    /// Decodes the identifier into the flat record consumed by host glue
    pub fn info(&self) -> PeselInfo {
        let gender = self.gender();
        PeselInfo {
            id: self.to_string(),
            year: self.year(),
            month: self.month(),
            day: self.day(),
            date: self.date(),
            gender,
            male: matches!(gender, Gender::Male),
            female: matches!(gender, Gender::Female),
        }
    }
}

/// Decoded view of a PESEL identifier: birth date fields, the composite
/// date string and both gender forms, alongside the identifier itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeselInfo {
    pub id: String,
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub date: String,
    pub gender: Gender,
    pub male: bool,
    pub female: bool,
}

impl FromStr for Pesel {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let length = s.chars().count();
        if length != PESEL_LENGTH {
            return Err(DecodeError::InvalidLength(length));
        }

        let mut digits = [0_u8; PESEL_LENGTH];
        for (position, character) in s.chars().enumerate() {
            let value = character
                .to_digit(10)
                .ok_or(DecodeError::NonDigit { position, character })?;
            digits[position] = value as u8;
        }

        let computed = checksum(&digits);
        let found = digits[PESEL_LENGTH - 1];
        if computed != found {
            return Err(DecodeError::ChecksumMismatch { computed, found });
        }

        Ok(Self { digits })
    }
}

impl fmt::Display for Pesel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in self.digits {
            write!(f, "{digit}")?;
        }
        Ok(())
    }
}

impl TryFrom<&str> for Pesel {
    type Error = DecodeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Serialize for Pesel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Pesel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
