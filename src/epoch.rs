//! Epoch and calendar arithmetic used by the time faces.
//!
//! This module provides:
//! - Calendar helpers (`is_leap_year`, `day_of_year`, `iso_weekday`, `week_of_year`)
//! - J2000 day count with an integer/fractional split (`unix_to_j2000_days`)
//! - GPS seconds, week number and time-of-week (`unix_to_gps_seconds`, ...)
//!
//! Everything here is pure and allocation-free. Inputs are expected to be valid
//! calendar dates and post-epoch second counts; nothing is range checked.

pub const SECONDS_PER_DAY: u32 = 86_400;
pub const SECONDS_PER_WEEK: u32 = 7 * SECONDS_PER_DAY; // 604800

// Cumulative days before the first of each month, non-leap year.
const DAYS_BEFORE_MONTH: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Fixed reference values for the epoch conversions.
///
/// Passed by reference into every conversion so nothing in here depends on a
/// mutable global.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EpochConfig {
    /// J2000.0 expressed as Unix-equivalent seconds.
    pub j2000_unix_offset: f64,
    /// Leap seconds inserted between 2000 and the J2000 reference.
    pub leap_seconds_since_2000: u32,
    /// GPS epoch (1980-01-06) as Unix seconds.
    pub gps_unix_offset: u32,
}

impl EpochConfig {
    pub const DEFAULT: EpochConfig = EpochConfig {
        j2000_unix_offset: 946_727_935.816,
        leap_seconds_since_2000: 6,
        gps_unix_offset: 315_964_800,
    };
}

impl Default for EpochConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// J2000 day count split into whole and fractional days.
///
/// Both halves carry the sign of the full value (truncation toward zero).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct J2000Days {
    pub int_part: f64,
    pub frac_part: f64,
}

// Gregorian rule: every 4th year, except centuries not divisible by 400.
#[inline]
pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// 1-based day count within the year, so January 1st is day 1.
pub fn day_of_year(year: u16, month: u8, day: u8) -> u16 {
    let idx = (month.clamp(1, 12) - 1) as usize;
    let leap_day = (month > 2 && is_leap_year(year)) as u16;
    DAYS_BEFORE_MONTH[idx] + leap_day + day as u16
}

/// ISO weekday, Monday = 1 through Sunday = 7.
pub fn iso_weekday(year: u16, month: u8, day: u8) -> u8 {
    // 1970-01-01 was a Thursday (ISO 4)
    let days = crate::clock::days_since_unix(year, month, day);
    ((days + 3).rem_euclid(7) + 1) as u8
}

// ISO years have 53 weeks when they start on a Thursday, or on a Wednesday in a leap year.
fn iso_weeks_in_year(year: u16) -> u8 {
    let jan1 = iso_weekday(year, 1, 1);
    if jan1 == 4 || (jan1 == 3 && is_leap_year(year)) {
        53
    } else {
        52
    }
}

/// ISO 8601 week number (weeks start on Monday, week 1 holds the first Thursday).
///
/// Early January days before week 1 report the last week of the previous year,
/// late December days past the final ISO week report week 1.
pub fn week_of_year(year: u16, month: u8, day: u8) -> u8 {
    let doy = day_of_year(year, month, day) as i32;
    let weekday = iso_weekday(year, month, day) as i32;
    let week = (doy - weekday + 10) / 7;

    if week < 1 {
        iso_weeks_in_year(year - 1)
    } else if week > iso_weeks_in_year(year) as i32 {
        1
    } else {
        week as u8
    }
}

/// Days since J2000.0, split the way C `modf` splits a double.
pub fn unix_to_j2000_days(unix_seconds: u32, config: &EpochConfig) -> J2000Days {
    let corrected = unix_seconds as f64 + config.leap_seconds_since_2000 as f64;
    let days = (corrected - config.j2000_unix_offset) / SECONDS_PER_DAY as f64;
    let int_part = libm::trunc(days);
    J2000Days {
        int_part,
        frac_part: days - int_part,
    }
}

/// Seconds since the GPS epoch. `unix_seconds` must not predate 1980-01-06.
#[inline]
pub fn unix_to_gps_seconds(unix_seconds: u32, leap_seconds: u8, config: &EpochConfig) -> u32 {
    unix_seconds
        .wrapping_sub(config.gps_unix_offset)
        .wrapping_add(leap_seconds as u32)
}

// No rollover handling, this is the full week count since 1980.
#[inline]
pub fn gps_week_number(gps_seconds: u32) -> u32 {
    gps_seconds / SECONDS_PER_WEEK
}

#[inline]
pub fn gps_time_of_week(gps_seconds: u32) -> u32 {
    gps_seconds % SECONDS_PER_WEEK
}
