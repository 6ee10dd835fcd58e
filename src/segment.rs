//! Character model of the segmented watch display.
//!
//! The panel has a top row (a short label field on the left, a two character
//! field on the right) and a six character bottom row. Two glass variants exist:
//! the classic LCD fits only two label characters, the custom LCD fits three.

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LcdType {
    Classic,
    Custom,
}

impl LcdType {
    pub const fn top_left_width(self) -> usize {
        match self {
            LcdType::Classic => 2,
            LcdType::Custom => 3,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Position {
    /// The whole top row, starting at the label field.
    Top,
    TopLeft,
    TopRight,
    Bottom,
}

pub const TOP_RIGHT_WIDTH: usize = 2;
pub const BOTTOM_WIDTH: usize = 6;
const TOP_MAX: usize = 3 + TOP_RIGHT_WIDTH;

/// Text sink provided by the host.
pub trait SegmentDisplay {
    fn lcd_type(&self) -> LcdType;

    /// Write `text` into `position`; characters past the field end are dropped.
    fn write(&mut self, position: Position, text: &str);

    fn clear(&mut self);

    /// Write `full` on the custom LCD, `fallback` where only two characters fit.
    fn write_with_fallback(&mut self, position: Position, full: &str, fallback: &str) {
        match self.lcd_type() {
            LcdType::Custom => self.write(position, full),
            LcdType::Classic => self.write(position, fallback),
        }
    }
}

/// In-memory segment contents. The `ui` renderer draws from this.
#[derive(Clone, Debug)]
pub struct SegmentBuffer {
    lcd: LcdType,
    top: [u8; TOP_MAX],
    bottom: [u8; BOTTOM_WIDTH],
    dirty: bool,
}

impl SegmentBuffer {
    pub const fn new(lcd: LcdType) -> Self {
        Self {
            lcd,
            top: [b' '; TOP_MAX],
            bottom: [b' '; BOTTOM_WIDTH],
            dirty: true,
        }
    }

    fn top_width(&self) -> usize {
        self.lcd.top_left_width() + TOP_RIGHT_WIDTH
    }

    pub fn top(&self) -> &str {
        as_str(&self.top[..self.top_width()])
    }

    pub fn top_left(&self) -> &str {
        as_str(&self.top[..self.lcd.top_left_width()])
    }

    pub fn top_right(&self) -> &str {
        as_str(&self.top[self.lcd.top_left_width()..self.top_width()])
    }

    pub fn bottom(&self) -> &str {
        as_str(&self.bottom)
    }

    /// True once after any change; used to skip redundant panel redraws.
    pub fn take_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }
}

// Only printable ASCII is ever stored, so this can't fail in practice
fn as_str(bytes: &[u8]) -> &str {
    core::str::from_utf8(bytes).unwrap_or("")
}

fn copy_field(field: &mut [u8], text: &str) -> bool {
    let mut changed = false;
    for (slot, b) in field.iter_mut().zip(text.bytes()) {
        let b = if b.is_ascii_graphic() || b == b' ' { b } else { b' ' };
        changed |= *slot != b;
        *slot = b;
    }
    changed
}

impl SegmentDisplay for SegmentBuffer {
    fn lcd_type(&self) -> LcdType {
        self.lcd
    }

    fn write(&mut self, position: Position, text: &str) {
        let tl = self.lcd.top_left_width();
        let tw = self.top_width();
        let field = match position {
            Position::Top => &mut self.top[..tw],
            Position::TopLeft => &mut self.top[..tl],
            Position::TopRight => &mut self.top[tl..tw],
            Position::Bottom => &mut self.bottom[..],
        };
        if copy_field(field, text) {
            self.dirty = true;
        }
    }

    fn clear(&mut self) {
        self.top = [b' '; TOP_MAX];
        self.bottom = [b' '; BOTTOM_WIDTH];
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_bounded() {
        let mut lcd = SegmentBuffer::new(LcdType::Custom);
        lcd.write(Position::TopLeft, "ABCDE");
        assert_eq!(lcd.top_left(), "ABC");
        assert_eq!(lcd.top_right(), "  ");

        lcd.write(Position::Bottom, "1234567");
        assert_eq!(lcd.bottom(), "123456");
    }

    #[test]
    fn top_spans_both_fields() {
        let mut lcd = SegmentBuffer::new(LcdType::Classic);
        lcd.write(Position::Top, "LPSEC");
        assert_eq!(lcd.top(), "LPSE");
        assert_eq!(lcd.top_left(), "LP");
        assert_eq!(lcd.top_right(), "SE");
    }

    #[test]
    fn fallback_picks_by_lcd() {
        let mut custom = SegmentBuffer::new(LcdType::Custom);
        let mut classic = SegmentBuffer::new(LcdType::Classic);
        custom.write_with_fallback(Position::TopLeft, "UNX", "UX");
        classic.write_with_fallback(Position::TopLeft, "UNX", "UX");
        assert_eq!(custom.top_left(), "UNX");
        assert_eq!(classic.top_left(), "UX");
    }

    #[test]
    fn dirty_tracks_changes() {
        let mut lcd = SegmentBuffer::new(LcdType::Custom);
        assert!(lcd.take_dirty());
        assert!(!lcd.take_dirty());
        lcd.write(Position::Bottom, "      ");
        assert!(!lcd.take_dirty());
        lcd.write(Position::Bottom, "   1  ");
        assert!(lcd.take_dirty());
    }

    #[test]
    fn non_ascii_is_blanked() {
        let mut lcd = SegmentBuffer::new(LcdType::Custom);
        lcd.write(Position::TopRight, "\u{e9}x");
        // the two-byte char fills both slots with blanks
        assert_eq!(lcd.top_right(), "  ");
    }
}
