/// Number of digits in a PESEL identifier
pub const PESEL_LENGTH: usize = 11;

/// Earliest year representable by the century-offset encoding (inclusive)
pub const MIN_YEAR: u16 = 1800;

/// Latest year representable by the century-offset encoding (inclusive)
pub const MAX_YEAR: u16 = 2299;

/// Year corresponding to a zero century offset
pub const YEAR_BASE: u16 = 1900;

/// The century-offset encoding repeats after this many years
pub(crate) const YEAR_CYCLE: u16 = 500;

/// Step added to the month field per century band
pub(crate) const MONTH_OFFSET_STEP: u8 = 20;

/// Number of century bands in one 500-year cycle
pub(crate) const CENTURY_BANDS: u16 = 5;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month
pub const MIN_DAY: u8 = 1;

/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for December
pub const DECEMBER: u8 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Weights applied to the leading ten digits when computing the checksum
pub const CHECKSUM_WEIGHTS: [u32; 10] = [1, 3, 7, 9, 1, 3, 7, 9, 1, 3];

/// Number of distinct values of the three serial digits (positions 6-8)
pub(crate) const SERIAL_SPAN: u16 = 1000;
