//! Per-face display modes and the leap-second setting.
//!
//! Each face owns one closed mode enum. `next` is the Advance transition fired
//! by the alarm button. `as_u8`/`from_u8` are the byte encoding for a future
//! persisted-state path (no face stores its mode yet, activation always starts
//! over); `from_u8` falls back to the first mode for anything it doesn't recognise.

pub trait ModeCycle: Copy + Eq + core::fmt::Debug + Sized + 'static {
    // Every mode, in display order. The first one is the activation mode.
    const ALL: &'static [Self];

    fn first() -> Self {
        Self::ALL[0]
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|m| *m == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        let n = Self::ALL.len();
        Self::ALL[(self.index() + n - 1) % n]
    }

    // Byte encoding for persisted state: 1-based, 0 stays free for "never written"
    fn as_u8(self) -> u8 {
        self.index() as u8 + 1
    }

    fn from_u8(n: u8) -> Self {
        match (n as usize).checked_sub(1) {
            Some(i) if i < Self::ALL.len() => Self::ALL[i],
            _ => Self::first(),
        }
    }

    /// Whether the mode shows half of a wider number, selectable with the light button.
    fn has_significant_split(self) -> bool;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DateNumMode {
    DayOfYear,
    WeekOfYear,
}

impl ModeCycle for DateNumMode {
    const ALL: &'static [Self] = &[DateNumMode::DayOfYear, DateNumMode::WeekOfYear];

    fn has_significant_split(self) -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EpochMode {
    Unix,
    J2000,
}

impl ModeCycle for EpochMode {
    const ALL: &'static [Self] = &[EpochMode::Unix, EpochMode::J2000];

    fn has_significant_split(self) -> bool {
        true
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GpsMode {
    Seconds,
    WeekNumber,
    TimeOfWeek,
    LeapSeconds,
}

impl ModeCycle for GpsMode {
    const ALL: &'static [Self] = &[
        GpsMode::Seconds,
        GpsMode::WeekNumber,
        GpsMode::TimeOfWeek,
        GpsMode::LeapSeconds,
    ];

    fn has_significant_split(self) -> bool {
        matches!(self, GpsMode::Seconds)
    }
}

/// GPS-UTC leap second count, user adjustable in `[0, 60]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LeapSeconds(u8);

impl LeapSeconds {
    pub const DEFAULT: LeapSeconds = LeapSeconds(18); // as of 2017
    pub const MAX: u8 = 60;

    // Anything past MAX comes back as 0, same as one step past the top
    pub const fn new(value: u8) -> Self {
        if value > Self::MAX {
            LeapSeconds(0)
        } else {
            LeapSeconds(value)
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// One press: +1, wrapping 60 -> 0.
    pub fn adjust(&mut self) {
        *self = Self::new(self.0 + 1);
    }
}

impl Default for LeapSeconds {
    fn default() -> Self {
        Self::DEFAULT
    }
}
