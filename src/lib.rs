#![cfg_attr(not(test), no_std)]

pub mod button;
pub mod clock;
pub mod config;
pub mod epoch;
pub mod face;
pub mod faces;
pub mod format;
pub mod modes;
pub mod movement;
pub mod rtc_pcf85063;
pub mod segment;

#[cfg(feature = "graphics")]
pub mod ui;

#[cfg(feature = "esp32s3")]
pub mod display;
#[cfg(feature = "esp32s3")]
pub mod input;
#[cfg(feature = "esp32s3")]
pub mod wiring;
