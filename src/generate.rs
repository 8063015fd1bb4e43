use rand::Rng;
use rand::seq::SliceRandom;

use crate::consts::{
    DECEMBER, FEBRUARY, FEBRUARY_DAYS_LEAP, MAX_MONTH, MAX_YEAR, MIN_DAY, MIN_YEAR, PESEL_LENGTH,
    SERIAL_SPAN,
};
use crate::types::{Gender, UnknownGender, checksum, days_in_month, is_leap_year, month_offset};
use crate::Pesel;

/// Builder for generating PESEL identifiers from partial constraints.
///
/// Fields that are set are honored exactly; unset fields are filled with
/// uniformly distributed random values drawn from the generator passed to
/// [`build_with`](Self::build_with). When a day is set without a month,
/// the month is drawn only from months long enough to contain that day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeselBuilder {
    year: Option<u16>,
    month: Option<u8>,
    day: Option<u8>,
    gender: Option<Gender>,
}

/// Error type for identifier generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    /// February 29 requested in a year that does not have one.
    #[error("Year {0} is not a leap year so February has only 28 days")]
    NotLeapYear(u16),

    /// Requested year falls outside the representable range.
    #[error("Year {0} out of range: must be between {min} and {max}", min = MIN_YEAR, max = MAX_YEAR)]
    YearOutOfRange(u16),

    /// Requested month falls outside 1-12.
    #[error("Month {0} out of range: must be between 1 and {max}", max = MAX_MONTH)]
    MonthOutOfRange(u8),

    /// Requested day does not exist in the resolved month.
    #[error("Day {day} out of range: must be between 1 and {max_day} for month {year}-{month:02}")]
    DayOutOfRange {
        day: u8,
        month: u8,
        year: u16,
        max_day: u8,
    },

    /// Gender name other than "male" or "female".
    #[error(transparent)]
    Gender(#[from] UnknownGender),
}

impl PeselBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrains the birth year (1800-2299)
    pub const fn year(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }

    /// Constrains the birth month (1-12)
    pub const fn month(mut self, month: u8) -> Self {
        self.month = Some(month);
        self
    }

    /// Constrains the birth day (1 to the length of the resolved month)
    pub const fn day(mut self, day: u8) -> Self {
        self.day = Some(day);
        self
    }

    /// Constrains the gender encoded by the parity digit
    pub const fn gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    /// Generates an identifier using the thread-local random generator.
    ///
    /// # Errors
    /// Returns `GenerateError` when the constraints are infeasible or out
    /// of range.
    pub fn build(&self) -> Result<Pesel, GenerateError> {
        self.build_with(&mut rand::thread_rng())
    }

    /// Generates an identifier, drawing every unconstrained field from
    /// `rng`. A seeded generator makes the result deterministic.
    ///
    /// # Errors
    /// Returns `GenerateError` when the constraints are infeasible or out
    /// of range.
    pub fn build_with<R: Rng>(&self, rng: &mut R) -> Result<Pesel, GenerateError> {
        // A February 29 request is only satisfiable when the fixed year
        // actually has one; with an unconstrained year the range check
        // below decides after the year is drawn.
        if let (Some(year), Some(FEBRUARY), Some(FEBRUARY_DAYS_LEAP)) =
            (self.year, self.month, self.day)
        {
            if !is_leap_year(year) {
                return Err(GenerateError::NotLeapYear(year));
            }
        }

        let gender = match self.gender {
            Some(gender) => gender,
            None => Gender::from_digit(rng.gen_range(0..2)),
        };

        let year = match self.year {
            Some(year) => {
                if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
                    return Err(GenerateError::YearOutOfRange(year));
                }
                year
            }
            None => rng.gen_range(MIN_YEAR..MAX_YEAR),
        };

        // Day drives month: with a day fixed and the month free, only
        // months long enough for that day are candidates.
        let (month, day) = match self.day {
            Some(day) => {
                let month = match self.month {
                    Some(month) => month,
                    None => random_month(rng, year, day),
                };
                if !(1..=MAX_MONTH).contains(&month) {
                    return Err(GenerateError::MonthOutOfRange(month));
                }
                (month, day)
            }
            None => {
                let month = match self.month {
                    Some(month) => month,
                    None => rng.gen_range(1..=MAX_MONTH),
                };
                if !(1..=MAX_MONTH).contains(&month) {
                    return Err(GenerateError::MonthOutOfRange(month));
                }
                let day = rng.gen_range(MIN_DAY..=days_in_month(year, month));
                (month, day)
            }
        };

        let max_day = days_in_month(year, month);
        if !(MIN_DAY..=max_day).contains(&day) {
            return Err(GenerateError::DayOutOfRange {
                day,
                month,
                year,
                max_day,
            });
        }

        let encoded_month = month + month_offset(year);
        let serial = rng.gen_range(0..SERIAL_SPAN);

        let mut digits = [0_u8; PESEL_LENGTH];
        digits[0] = ((year / 10) % 10) as u8;
        digits[1] = (year % 10) as u8;
        digits[2] = encoded_month / 10;
        digits[3] = encoded_month % 10;
        digits[4] = day / 10;
        digits[5] = day % 10;
        digits[6] = (serial / 100) as u8;
        digits[7] = (serial / 10 % 10) as u8;
        digits[8] = (serial % 10) as u8;
        digits[9] = gender_digit(rng, gender);
        digits[10] = checksum(&digits);

        Ok(Pesel::from_digits(digits))
    }
}

/// Draws a month of `year` long enough to contain `day`. When no month
/// fits (day above 31) December is returned so the caller's range check
/// reports the valid bounds.
fn random_month<R: Rng>(rng: &mut R, year: u16, day: u8) -> u8 {
    let candidates: Vec<u8> = (1..=MAX_MONTH)
        .filter(|&month| days_in_month(year, month) >= day)
        .collect();
    candidates.choose(rng).copied().unwrap_or(DECEMBER)
}

/// Draws the gender digit: uniform over 0-9, nudged to the neighbouring
/// digit when its parity does not match `gender`. A mismatched 0 lands on
/// 1, so the emitted parity always matches the request.
fn gender_digit<R: Rng>(rng: &mut R, gender: Gender) -> u8 {
    let digit = rng.gen_range(0..10);
    if digit % 2 == gender.parity() {
        digit
    } else if digit == 0 {
        1
    } else {
        digit - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5EED)
    }

    #[test]
    fn test_fully_constrained_round_trip() {
        let mut rng = rng();

        struct TestCase {
            year: u16,
            month: u8,
            day: u8,
            date: &'static str,
        }

        let cases = [
            TestCase {
                year: 1800,
                month: 1,
                day: 1,
                date: "1800-01-01",
            },
            TestCase {
                year: 1944,
                month: 5,
                day: 14,
                date: "1944-05-14",
            },
            TestCase {
                year: 2000,
                month: 2,
                day: 29,
                date: "2000-02-29",
            },
            TestCase {
                year: 2299,
                month: 12,
                day: 31,
                date: "2299-12-31",
            },
        ];

        for case in &cases {
            for gender in [Gender::Female, Gender::Male] {
                let pesel = PeselBuilder::new()
                    .year(case.year)
                    .month(case.month)
                    .day(case.day)
                    .gender(gender)
                    .build_with(&mut rng)
                    .unwrap();

                // Decode what was generated and compare field by field
                let decoded = pesel.to_string().parse::<Pesel>().unwrap();
                assert_eq!(decoded.year(), case.year);
                assert_eq!(decoded.month(), case.month);
                assert_eq!(decoded.day(), case.day);
                assert_eq!(decoded.date(), case.date);
                assert_eq!(decoded.gender(), gender);
            }
        }
    }

    #[test]
    fn test_round_trip_sweep_across_centuries() {
        let mut rng = rng();
        for year in (MIN_YEAR..=MAX_YEAR).step_by(7) {
            for month in 1..=MAX_MONTH {
                let day = days_in_month(year, month);
                let pesel = PeselBuilder::new()
                    .year(year)
                    .month(month)
                    .day(day)
                    .build_with(&mut rng)
                    .unwrap();
                let decoded = pesel.to_string().parse::<Pesel>().unwrap();
                assert_eq!((decoded.year(), decoded.month(), decoded.day()), (year, month, day));
            }
        }
    }

    #[test]
    fn test_generated_checksum_always_parses() {
        let mut rng = rng();
        for _ in 0..1000 {
            let pesel = PeselBuilder::new().build_with(&mut rng).unwrap();
            assert!(pesel.to_string().parse::<Pesel>().is_ok());
        }
    }

    #[test]
    fn test_unconstrained_fields_stay_in_range() {
        let mut rng = rng();
        for _ in 0..1000 {
            let pesel = PeselBuilder::new().build_with(&mut rng).unwrap();
            assert!((MIN_YEAR..MAX_YEAR).contains(&pesel.year()));
            assert!((1..=MAX_MONTH).contains(&pesel.month()));
            assert!((MIN_DAY..=days_in_month(pesel.year(), pesel.month())).contains(&pesel.day()));
        }
    }

    #[test]
    fn test_leap_day_accepted_in_leap_year() {
        let mut rng = rng();
        let pesel = PeselBuilder::new()
            .year(2024)
            .month(2)
            .day(29)
            .gender(Gender::Male)
            .build_with(&mut rng)
            .unwrap();
        assert_eq!(pesel.date(), "2024-02-29");
    }

    #[test]
    fn test_leap_day_rejected_in_common_year() {
        let mut rng = rng();
        let result = PeselBuilder::new()
            .year(2023)
            .month(2)
            .day(29)
            .gender(Gender::Male)
            .build_with(&mut rng);
        assert_eq!(result, Err(GenerateError::NotLeapYear(2023)));
    }

    #[test]
    fn test_year_out_of_range() {
        let mut rng = rng();
        assert_eq!(
            PeselBuilder::new().year(1799).build_with(&mut rng),
            Err(GenerateError::YearOutOfRange(1799))
        );
        assert_eq!(
            PeselBuilder::new().year(2300).build_with(&mut rng),
            Err(GenerateError::YearOutOfRange(2300))
        );
    }

    #[test]
    fn test_month_out_of_range() {
        let mut rng = rng();
        assert_eq!(
            PeselBuilder::new().month(13).build_with(&mut rng),
            Err(GenerateError::MonthOutOfRange(13))
        );
        assert_eq!(
            PeselBuilder::new().month(0).build_with(&mut rng),
            Err(GenerateError::MonthOutOfRange(0))
        );
    }

    #[test]
    fn test_day_out_of_range_for_month() {
        let mut rng = rng();
        let result = PeselBuilder::new()
            .year(2021)
            .month(4)
            .day(31)
            .build_with(&mut rng);
        assert_eq!(
            result,
            Err(GenerateError::DayOutOfRange {
                day: 31,
                month: 4,
                year: 2021,
                max_day: 30,
            })
        );
    }

    #[test]
    fn test_day_zero_rejected() {
        let mut rng = rng();
        let result = PeselBuilder::new().year(2021).day(0).build_with(&mut rng);
        assert!(matches!(
            result,
            Err(GenerateError::DayOutOfRange { day: 0, .. })
        ));
    }

    #[test]
    fn test_day_longer_than_any_month_rejected() {
        let mut rng = rng();
        let result = PeselBuilder::new().year(2021).day(32).build_with(&mut rng);
        assert!(matches!(
            result,
            Err(GenerateError::DayOutOfRange {
                day: 32,
                max_day: 31,
                ..
            })
        ));
    }

    #[test]
    fn test_day_drives_month_selection() {
        let mut rng = rng();
        // Day 31 exists only in the seven long months
        for _ in 0..500 {
            let pesel = PeselBuilder::new()
                .year(2021)
                .day(31)
                .build_with(&mut rng)
                .unwrap();
            assert!(
                [1, 3, 5, 7, 8, 10, 12].contains(&pesel.month()),
                "day 31 drew month {}",
                pesel.month()
            );
            assert_eq!(pesel.day(), 31);
        }
    }

    #[test]
    fn test_day_29_excludes_february_in_common_year() {
        let mut rng = rng();
        for _ in 0..500 {
            let pesel = PeselBuilder::new()
                .year(2023)
                .day(29)
                .build_with(&mut rng)
                .unwrap();
            assert_ne!(pesel.month(), FEBRUARY, "2023 February has no day 29");
        }
    }

    #[test]
    fn test_day_29_allows_february_in_leap_year() {
        let mut rng = rng();
        let mut seen_february = false;
        for _ in 0..500 {
            let pesel = PeselBuilder::new()
                .year(2024)
                .day(29)
                .build_with(&mut rng)
                .unwrap();
            seen_february |= pesel.month() == FEBRUARY;
        }
        assert!(seen_february, "leap-year February should be drawable");
    }

    #[test]
    fn test_gender_parity_never_mismatches() {
        let mut rng = rng();
        for gender in [Gender::Female, Gender::Male] {
            for _ in 0..1000 {
                let pesel = PeselBuilder::new()
                    .gender(gender)
                    .build_with(&mut rng)
                    .unwrap();
                assert_eq!(
                    pesel.gender(),
                    gender,
                    "parity digit mismatch in {pesel} for {gender}"
                );
            }
        }
    }

    #[test]
    fn test_unconstrained_gender_draws_both() {
        let mut rng = rng();
        let mut males = 0_u32;
        let mut females = 0_u32;
        for _ in 0..1000 {
            let pesel = PeselBuilder::new().build_with(&mut rng).unwrap();
            if pesel.is_male() {
                males += 1;
            } else {
                females += 1;
            }
        }
        assert!(males > 0 && females > 0);
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let build = || {
            PeselBuilder::new()
                .year(1991)
                .build_with(&mut StdRng::seed_from_u64(7))
                .unwrap()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_builder_via_pesel_entry_point() {
        let mut rng = rng();
        let pesel = Pesel::builder()
            .year(1991)
            .month(8)
            .day(15)
            .build_with(&mut rng)
            .unwrap();
        assert_eq!(pesel.date(), "1991-08-15");
    }

    #[test]
    fn test_gender_error_wraps_unknown_gender() {
        let error = GenerateError::from(UnknownGender("robot".to_owned()));
        assert_eq!(
            error.to_string(),
            "Unknown gender \"robot\" (expected \"male\" or \"female\")"
        );
    }

    #[test]
    fn test_error_messages_name_valid_ranges() {
        assert_eq!(
            GenerateError::YearOutOfRange(1500).to_string(),
            "Year 1500 out of range: must be between 1800 and 2299"
        );
        assert_eq!(
            GenerateError::MonthOutOfRange(13).to_string(),
            "Month 13 out of range: must be between 1 and 12"
        );
        assert_eq!(
            GenerateError::DayOutOfRange {
                day: 31,
                month: 4,
                year: 2021,
                max_day: 30,
            }
            .to_string(),
            "Day 31 out of range: must be between 1 and 30 for month 2021-04"
        );
    }
}
