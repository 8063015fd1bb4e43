use crate::consts::{
    CENTURY_BANDS, CENTURY_CYCLE, CHECKSUM_WEIGHTS, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP,
    GREGORIAN_CYCLE, LEAP_YEAR_CYCLE, MAX_MONTH, MAX_YEAR, MIN_YEAR, MONTH_OFFSET_STEP, YEAR_BASE,
    YEAR_CYCLE,
};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Gender encoded by the parity of the identifier's gender digit
/// (position 9): odd means male, even means female.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Even gender digit
    #[display(fmt = "female")]
    Female,
    /// Odd gender digit
    #[display(fmt = "male")]
    Male,
}

/// Error type for gender names other than `"male"` or `"female"`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown gender {0:?} (expected \"male\" or \"female\")")]
pub struct UnknownGender(pub String);

impl Gender {
    /// Returns the parity class of this gender: 0 for female, 1 for male
    #[inline]
    pub const fn parity(self) -> u8 {
        match self {
            Self::Female => 0,
            Self::Male => 1,
        }
    }

    /// Returns the gender encoded by the parity of `digit`
    #[inline]
    pub const fn from_digit(digit: u8) -> Self {
        if digit % 2 == 1 { Self::Male } else { Self::Female }
    }
}

impl FromStr for Gender {
    type Err = UnknownGender;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "female" => Ok(Self::Female),
            "male" => Ok(Self::Male),
            other => Err(UnknownGender(other.to_owned())),
        }
    }
}

impl From<Gender> for u8 {
    fn from(gender: Gender) -> Self {
        gender.parity()
    }
}

/// Computes the value required of the checksum digit (position 10) for the
/// leading ten digits of `digits`, given as digit values 0-9.
/// Only the first ten digits are consulted; extra digits are ignored.
pub fn checksum(digits: &[u8]) -> u8 {
    let sum: u32 = digits
        .iter()
        .take(CHECKSUM_WEIGHTS.len())
        .zip(CHECKSUM_WEIGHTS)
        .map(|(&digit, weight)| weight * u32::from(digit))
        .sum();
    ((10 - sum % 10) % 10) as u8
}

/// Returns the multiple-of-20 added to the month field for the century
/// band containing `year`. Band 0 sits at `YEAR_BASE` (1900-1999) and the
/// mapping cycles every 500 years, so the 1800s reuse the 2300s offset.
pub const fn month_offset(year: u16) -> u8 {
    debug_assert!(year >= MIN_YEAR && year <= MAX_YEAR);
    ((year / CENTURY_CYCLE - 4) % CENTURY_BANDS * MONTH_OFFSET_STEP as u16) as u8
}

/// Splits a raw two-digit year and an offset-encoded month field back into
/// the full four-digit year and the actual month.
///
/// Exact inverse of [`month_offset`] for every year in `1800..=2299`:
/// the multiple-of-20 part of the month field selects the century band and
/// years past `MAX_YEAR` wrap back one 500-year cycle.
pub const fn decode_year_month(year_digits: u8, encoded_month: u8) -> (u16, u8) {
    let offset = (encoded_month - encoded_month % MONTH_OFFSET_STEP) as u16;
    let mut year = CENTURY_BANDS * offset + year_digits as u16 + YEAR_BASE;
    if year > MAX_YEAR {
        year -= YEAR_CYCLE;
    }
    (year, encoded_month % MONTH_OFFSET_STEP)
}

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}
