//! Wall-clock readings and the clock sources behind them.
//!
//! - `DateTime` is the calendar snapshot every face reads on refresh
//! - `WallClock` is what the host offers: a UTC reading and a local one
//! - `SoftClock` counts seconds in RAM (fallback when the RTC is unusable, and tests)

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DateTime {
    pub year: u16,  // full year, e.g., 2024
    pub month: u8,  // 1-12
    pub day: u8,    // 1-31
    pub hour: u8,   // 0-23
    pub minute: u8, // 0-59
    pub second: u8, // 0-59
}

impl DateTime {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self { year, month, day, hour, minute, second }
    }

    pub fn to_unix(&self) -> u32 {
        datetime_to_unix(self)
    }

    pub fn from_unix(ts: u32) -> Self {
        unix_to_datetime(ts)
    }
}

/// Source of wall-clock time.
///
/// Date displays read local time, epoch and GPS displays read UTC. Implementations
/// hand out a fresh snapshot on every call.
pub trait WallClock {
    fn utc_now(&mut self) -> DateTime;
    fn local_now(&mut self) -> DateTime;
}

// Days since 1970-01-01 (negative before it), proleptic Gregorian.
pub fn days_since_unix(year: u16, month: u8, day: u8) -> i32 {
    let y = year as i32;
    let m = month as i32;
    let d = day as i32;
    let (y1, m1) = if m <= 2 { (y - 1, m + 12) } else { (y, m) };
    let era = y1.div_euclid(400);
    let yoe = y1 - era * 400; // year of era
    let doy = 153 * (m1 + 1) / 5 + d - 123; // days since March 1
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy; // days since era
    era * 146_097 + doe - 719_468 // 719468 = days from 0000-03-01 to 1970-01-01
}

// Convert DateTime to Unix timestamp (seconds since 1970-01-01).
pub fn datetime_to_unix(dt: &DateTime) -> u32 {
    let days = days_since_unix(dt.year, dt.month, dt.day).max(0) as u64;
    let secs = days
        .saturating_mul(86_400)
        .saturating_add((dt.hour as u64) * 3600)
        .saturating_add((dt.minute as u64) * 60)
        .saturating_add(dt.second as u64);
    secs.min(u32::MAX as u64) as u32
}

// Convert Unix timestamp (seconds since 1970-01-01) to DateTime.
pub fn unix_to_datetime(mut ts: u32) -> DateTime {
    let days = ts / 86_400;
    ts %= 86_400;
    let hour = (ts / 3600) as u8;
    ts %= 3600;
    let minute = (ts / 60) as u8;
    let second = (ts % 60) as u8;

    let z = days as i32 + 719_468;
    let era = z.div_euclid(146_097); // 146097 = days in 400 years
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153; // 153 = days in 5 months starting March
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = mp + if mp < 10 { 3 } else { -9 };
    let year = y + if month <= 2 { 1 } else { 0 };

    DateTime {
        year: year as u16,
        month: month as u8,
        day: day as u8,
        hour,
        minute,
        second,
    }
}

// Basic sanity check on a decoded reading.
pub fn datetime_is_valid(dt: &DateTime) -> bool {
    (1970..=2105).contains(&dt.year)
        && (1..=12).contains(&dt.month)
        && (1..=crate::epoch::days_in_month(dt.year, dt.month)).contains(&dt.day)
        && dt.hour < 24
        && dt.minute < 60
        && dt.second < 60
}

/// Shift a Unix time by a signed offset, saturating at the ends of `u32`.
#[inline]
pub fn apply_offset(unix: u32, offset_seconds: i32) -> u32 {
    if offset_seconds >= 0 {
        unix.saturating_add(offset_seconds as u32)
    } else {
        unix.saturating_sub(offset_seconds.unsigned_abs())
    }
}

/// RAM-only clock kept in UTC seconds and advanced by the host tick.
#[derive(Copy, Clone, Debug)]
pub struct SoftClock {
    unix: u32,
    utc_offset_seconds: i32,
}

impl SoftClock {
    pub const fn new(unix: u32, utc_offset_seconds: i32) -> Self {
        Self { unix, utc_offset_seconds }
    }

    pub fn unix(&self) -> u32 {
        self.unix
    }

    pub fn set_unix(&mut self, unix: u32) {
        self.unix = unix;
    }

    pub fn advance(&mut self, seconds: u32) {
        self.unix = self.unix.saturating_add(seconds);
    }
}

impl WallClock for SoftClock {
    fn utc_now(&mut self) -> DateTime {
        unix_to_datetime(self.unix)
    }

    fn local_now(&mut self) -> DateTime {
        unix_to_datetime(apply_offset(self.unix, self.utc_offset_seconds))
    }
}
