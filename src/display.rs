//! Round 240x240 GC9A01 panel that the segment model is painted onto.
//
// SPI2 at 40 MHz, mode 0, with a D/C pin, driven through mipidsi.
// `ui::update_ui` does the painting; this module only brings the panel up.

use esp_backtrace as _;

use embedded_hal::delay::DelayNs;
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use esp_hal::{
    gpio::Output,
    spi::master::{Config as SpiConfig, Spi},
    spi::Mode,
    time::Rate,
    Blocking,
};
use mipidsi::interface::SpiInterface;
use mipidsi::{
    models::GC9A01,
    options::{ColorInversion, ColorOrder, Orientation, Rotation},
    Builder,
};

use crate::ui::RESOLUTION;
use crate::wiring::DisplayPins;

const SPI_MHZ: u32 = 40;
const RESET_PULSE_US: u32 = 100;

/// Busy-wait delay for the panel init sequence.
pub struct SpinDelay;

impl DelayNs for SpinDelay {
    #[inline]
    fn delay_ns(&mut self, ns: u32) {
        // roughly 50 ns per spin at 240 MHz
        for _ in 0..ns / 50 + 1 {
            core::hint::spin_loop();
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PanelError {
    SpiConfig,
    ChipSelect,
    Init,
}

pub type Panel<'a> = mipidsi::Display<
    SpiInterface<'a, ExclusiveDevice<Spi<'a, Blocking>, Output<'a>, NoDelay>, Output<'a>>,
    GC9A01,
    Output<'a>,
>;

/// Power the backlight and bring the panel out of reset.
///
/// `display_buf` is the staging buffer mipidsi batches pixels through.
pub fn setup_display<'a>(pins: DisplayPins<'a>, display_buf: &'a mut [u8]) -> Result<Panel<'a>, PanelError> {
    let DisplayPins {
        spi2,
        spi_sck,
        spi_mosi,
        lcd_cs,
        lcd_dc,
        mut lcd_rst,
        mut lcd_bl,
    } = pins;
    let mut delay = SpinDelay;

    lcd_rst.set_low();
    delay.delay_us(RESET_PULSE_US);
    lcd_rst.set_high();
    lcd_bl.set_high();

    let bus_cfg = SpiConfig::default()
        .with_frequency(Rate::from_mhz(SPI_MHZ))
        .with_mode(Mode::_0);
    let bus = Spi::new(spi2, bus_cfg)
        .map_err(|_| PanelError::SpiConfig)?
        .with_sck(spi_sck)
        .with_mosi(spi_mosi);
    let device = ExclusiveDevice::new(bus, lcd_cs, NoDelay).map_err(|_| PanelError::ChipSelect)?;

    Builder::new(GC9A01, SpiInterface::new(device, lcd_dc, display_buf))
        .display_size(RESOLUTION as u16, RESOLUTION as u16)
        .orientation(Orientation::new().rotate(Rotation::Deg180))
        .invert_colors(ColorInversion::Inverted)
        .color_order(ColorOrder::Bgr)
        .reset_pin(lcd_rst)
        .init(&mut delay)
        .map_err(|_| PanelError::Init)
}
