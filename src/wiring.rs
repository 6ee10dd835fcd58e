// This module handles board-specific pin mappings and initialization.
//! The following wiring is assumed (ESP32-S3 devkit + GC9A01 round panel + PCF85063 RTC):
//! - LIGHT button => GPIO15
//! - ALARM button => GPIO21
//! - MODE button  => GPIO16
//! - RTC SDA => GPIO4, RTC SCL => GPIO5 (I2C0, 400 kHz)
//! - LCD CS => GPIO9, DC => GPIO8, RST => GPIO14, BL => GPIO2
//! - LCD SCK => GPIO10, MOSI => GPIO11 (SPI2)
//! - GND => GND
//! - 3.3V => 3.3V
//! Buttons connect to GND when pressed (internal pull-ups).

use esp_backtrace as _;
use esp_hal::{
    gpio::{Event, Input, InputConfig, Io, Level, Output, OutputConfig, Pull},
    peripherals::{Peripherals, GPIO10, GPIO11, GPIO4, GPIO5, I2C0, SPI2},
};

pub struct DisplayPins<'a> {
    pub spi2: SPI2<'a>,
    pub spi_sck: GPIO10<'a>,
    pub spi_mosi: GPIO11<'a>,
    pub lcd_cs: Output<'a>,
    pub lcd_dc: Output<'a>,
    pub lcd_rst: Output<'a>,
    pub lcd_bl: Output<'a>,
}

pub struct RtcPins<'a> {
    pub i2c0: I2C0<'a>,
    pub sda: GPIO4<'a>,
    pub scl: GPIO5<'a>,
}

pub struct BoardPins<'a> {
    pub btn_light: Input<'a>,
    pub btn_alarm: Input<'a>,
    pub btn_mode: Input<'a>,
    pub display_pins: DisplayPins<'a>,
    pub rtc_pins: RtcPins<'a>,
}

fn button<'a>(pin: impl esp_hal::gpio::InputPin + 'a) -> Input<'a> {
    let mut btn = Input::new(pin, InputConfig::default().with_pull(Pull::Up));
    btn.listen(Event::AnyEdge);
    btn
}

pub fn init_board_pins<'a>(p: Peripherals) -> (Io<'a>, BoardPins<'a>) {
    let io = Io::new(p.IO_MUX);

    // buttons, both edges: the faces care about press and release
    let btn_light = button(p.GPIO15);
    let btn_alarm = button(p.GPIO21);
    let btn_mode = button(p.GPIO16);

    // LCD control pins: SCK/MOSI stay raw, SPI2 takes them in display.rs
    let display_pins = DisplayPins {
        spi2: p.SPI2,
        spi_sck: p.GPIO10,
        spi_mosi: p.GPIO11,
        lcd_cs: Output::new(p.GPIO9, Level::High, OutputConfig::default()),
        lcd_dc: Output::new(p.GPIO8, Level::Low, OutputConfig::default()),
        lcd_rst: Output::new(p.GPIO14, Level::High, OutputConfig::default()),
        lcd_bl: Output::new(p.GPIO2, Level::High, OutputConfig::default()),
    };

    let rtc_pins = RtcPins { i2c0: p.I2C0, sda: p.GPIO4, scl: p.GPIO5 };

    (
        io,
        BoardPins { btn_light, btn_alarm, btn_mode, display_pins, rtc_pins },
    )
}
