//! Fixed-width text for each display mode.
//!
//! A `Readout` is the label / tag / value triple for one refresh. Renderers only
//! format numbers they are handed; the arithmetic lives in `epoch`.

use core::fmt::{self, Write};

use crate::epoch::J2000Days;
use crate::modes::LeapSeconds;
use crate::segment::{Position, SegmentDisplay, BOTTOM_WIDTH};

pub type Value = heapless::String<BOTTOM_WIDTH>;

// Six digits fit the bottom row; wider values are shown in two halves.
const HALF_SPLIT: u32 = 1_000_000;

/// Label text for the custom (3 char) and classic (2 char) LCD.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Label {
    pub full: &'static str,
    pub fallback: &'static str,
}

impl Label {
    pub const fn new(full: &'static str, fallback: &'static str) -> Self {
        Self { full, fallback }
    }

    pub const fn same(text: &'static str) -> Self {
        Self { full: text, fallback: text }
    }
}

pub const TAG_LOW: Label = Label::same(" L");
pub const TAG_HIGH: Label = Label::same(" S");
pub const TAG_FRACTION: Label = Label::same(" F");
pub const TAG_INTEGER: Label = Label::same(" I");
pub const TAG_BLANK: Label = Label::same("  ");

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Readout {
    pub label: Label,
    pub label_position: Position,
    /// Top-right field; `None` leaves it as it is.
    pub tag: Option<Label>,
    pub value: Value,
}

impl Readout {
    pub fn write_to<D: SegmentDisplay + ?Sized>(&self, display: &mut D) {
        display.write_with_fallback(self.label_position, self.label.full, self.label.fallback);
        if let Some(tag) = self.tag {
            display.write_with_fallback(Position::TopRight, tag.full, tag.fallback);
        }
        display.write(Position::Bottom, &self.value);
    }
}

// Drops whatever doesn't fit instead of failing the whole format
struct Truncating<'a>(&'a mut Value);

impl Write for Truncating<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

fn value(args: fmt::Arguments<'_>) -> Value {
    let mut out = Value::new();
    let _ = Truncating(&mut out).write_fmt(args);
    out
}

fn readout(label: Label, tag: Option<Label>, value: Value) -> Readout {
    Readout { label, label_position: Position::TopLeft, tag, value }
}

/// Low six digits, or everything above them when `significant` is set.
#[inline]
pub fn six_digit_half(n: u32, significant: bool) -> u32 {
    if significant {
        n / HALF_SPLIT
    } else {
        n % HALF_SPLIT
    }
}

pub fn day_of_year(doy: u16) -> Readout {
    readout(Label::new("DOY", "DO"), None, value(format_args!(" {:>3}  ", doy)))
}

pub fn week_of_year(woy: u8) -> Readout {
    readout(Label::new("WOY", "WO"), None, value(format_args!("  {:>2}  ", woy)))
}

pub fn unix_seconds(seconds: u32, significant: bool) -> Readout {
    let tag = if significant { TAG_HIGH } else { TAG_LOW };
    let shown = six_digit_half(seconds, significant);
    readout(Label::new("UNX", "UX"), Some(tag), value(format_args!("{:>6}", shown)))
}

/// Fraction as six truncated decimals, or the whole day count.
pub fn j2000(days: J2000Days, significant: bool) -> Readout {
    let (tag, shown) = if significant {
        (TAG_INTEGER, days.int_part as u32)
    } else {
        (TAG_FRACTION, (days.frac_part * HALF_SPLIT as f64) as u32)
    };
    readout(Label::new("MJD", "MJ"), Some(tag), value(format_args!("{:>6}", shown)))
}

pub fn gps_seconds(seconds: u32, significant: bool) -> Readout {
    let tag = if significant { TAG_HIGH } else { TAG_LOW };
    let shown = six_digit_half(seconds, significant);
    readout(Label::new("GPS", "NT"), Some(tag), value(format_args!("{:>6}", shown)))
}

pub fn gps_week_number(week: u32) -> Readout {
    readout(Label::new("WKN", "WN"), Some(TAG_BLANK), value(format_args!("{:>6}", week)))
}

pub fn gps_time_of_week(tow: u32) -> Readout {
    readout(Label::new("TOW", "TO"), Some(TAG_BLANK), value(format_args!("{:>6}", tow)))
}

// "LPS" runs across the top row with "EC" after it; the classic LCD just shows "LE"
pub fn leap_seconds(leap: LeapSeconds) -> Readout {
    Readout {
        label: Label::new("LPS", "LE"),
        label_position: Position::Top,
        tag: Some(Label::new("EC", "  ")),
        value: value(format_args!("  {:>2}  ", leap.get())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epoch::{unix_to_j2000_days, EpochConfig};
    use crate::segment::{LcdType, SegmentBuffer};

    #[test]
    fn unix_halves() {
        assert_eq!(six_digit_half(1_700_000_000, false), 0);
        assert_eq!(six_digit_half(1_700_000_000, true), 1700);
        assert_eq!(unix_seconds(1_700_000_000, false).value.as_str(), "     0");
        assert_eq!(unix_seconds(1_700_000_000, true).value.as_str(), "  1700");
        assert_eq!(unix_seconds(1_700_123_456, false).value.as_str(), "123456");
        assert_eq!(unix_seconds(1, true).tag, Some(TAG_HIGH));
    }

    #[test]
    fn date_fields_are_padded() {
        assert_eq!(day_of_year(61).value.as_str(), "  61  ");
        assert_eq!(day_of_year(366).value.as_str(), " 366  ");
        assert_eq!(day_of_year(1).value.as_str(), "   1  ");
        assert_eq!(week_of_year(7).value.as_str(), "   7  ");
        assert_eq!(week_of_year(42).value.as_str(), "  42  ");
        assert_eq!(week_of_year(42).tag, None);
    }

    #[test]
    fn j2000_fields() {
        let days = unix_to_j2000_days(1_700_000_000, &EpochConfig::DEFAULT);
        let frac = j2000(days, false);
        assert_eq!(frac.value.as_str(), "426738");
        assert_eq!(frac.tag, Some(TAG_FRACTION));
        assert_eq!(j2000(days, true).value.as_str(), "  8718");
    }

    #[test]
    fn gps_fields() {
        assert_eq!(gps_seconds(1_384_035_218, false).value.as_str(), " 35218");
        assert_eq!(gps_seconds(1_384_035_218, true).value.as_str(), "  1384");
        assert_eq!(gps_week_number(2288).value.as_str(), "  2288");
        assert_eq!(gps_time_of_week(252_818).value.as_str(), "252818");
        assert_eq!(gps_time_of_week(0).tag, Some(TAG_BLANK));
    }

    #[test]
    fn oversized_values_truncate() {
        assert_eq!(gps_week_number(12_345_678).value.as_str(), "123456");
    }

    #[test]
    fn leap_seconds_layout() {
        let r = leap_seconds(LeapSeconds::DEFAULT);
        let mut custom = SegmentBuffer::new(LcdType::Custom);
        r.write_to(&mut custom);
        assert_eq!(custom.top(), "LPSEC");
        assert_eq!(custom.bottom(), "  18  ");

        let mut classic = SegmentBuffer::new(LcdType::Classic);
        r.write_to(&mut classic);
        assert_eq!(classic.top(), "LE  ");
    }

    #[test]
    fn readout_leaves_tag_alone_when_none() {
        let mut lcd = SegmentBuffer::new(LcdType::Classic);
        lcd.write(Position::TopRight, "15");
        day_of_year(200).write_to(&mut lcd);
        assert_eq!(lcd.top(), "DO15");
        assert_eq!(lcd.bottom(), " 200  ");
    }
}
