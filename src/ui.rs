//! Segment display emulation on a round pixel panel.
//!
//! This module provides:
//! - `draw_segments`, which paints a `SegmentBuffer` (label, tag, six digit row)
//! - `update_ui`, which only repaints when the buffer changed since the last call
//!
//! Designed for embedded-graphics draw targets such as the mipidsi GC9A01 driver.
//! Layout is centered on a 240x240 display.

use embedded_graphics::{
    draw_target::DrawTarget,
    mono_font::{
        ascii::{FONT_10X20, FONT_6X10},
        MonoTextStyle, MonoTextStyleBuilder,
    },
    pixelcolor::Rgb565,
    prelude::{Point, RgbColor},
    text::{Alignment, Text},
    Drawable,
};

use crate::segment::SegmentBuffer;

// Display configuration, (0,0) is top-left corner
pub const RESOLUTION: u32 = 240; // 240x240 display
pub const CENTER: i32 = RESOLUTION as i32 / 2;

const TOP_ROW_Y: i32 = CENTER - 24;
const BOTTOM_ROW_Y: i32 = CENTER + 20;
const ROW_GAP: i32 = 6; // between label and tag

pub fn draw_segments<D>(disp: &mut D, lcd: &SegmentBuffer) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    disp.clear(Rgb565::BLACK)?;

    let label_style = MonoTextStyle::new(&FONT_10X20, Rgb565::WHITE);
    let tag_style = MonoTextStyle::new(&FONT_6X10, Rgb565::CYAN);
    let digit_style = MonoTextStyleBuilder::new()
        .font(&FONT_10X20)
        .text_color(Rgb565::WHITE)
        .build();

    // label ends just left of center, tag starts just right of it
    Text::with_alignment(
        lcd.top_left(),
        Point::new(CENTER - ROW_GAP, TOP_ROW_Y),
        label_style,
        Alignment::Right,
    )
    .draw(disp)?;

    Text::with_alignment(
        lcd.top_right(),
        Point::new(CENTER + ROW_GAP, TOP_ROW_Y),
        tag_style,
        Alignment::Left,
    )
    .draw(disp)?;

    Text::with_alignment(
        lcd.bottom(),
        Point::new(CENTER, BOTTOM_ROW_Y),
        digit_style,
        Alignment::Center,
    )
    .draw(disp)?;

    Ok(())
}

/// Repaint if the segment buffer changed. Returns whether anything was drawn.
pub fn update_ui<D>(disp: &mut D, lcd: &mut SegmentBuffer) -> Result<bool, D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    if !lcd.take_dirty() {
        return Ok(false);
    }
    draw_segments(disp, lcd)?;
    Ok(true)
}
