//! Runtime configuration for the watch.
//!
//! Board and panel selection is done with Cargo features; everything that can
//! differ between two wearers of the same board lives here.

use crate::epoch::EpochConfig;
use crate::face::FaceId;
use crate::modes::LeapSeconds;
use crate::segment::LcdType;

pub const DEFAULT_TIMEOUT_SECONDS: u32 = 60;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WatchConfig {
    pub utc_offset_seconds: i32,
    /// Seconds without a button press before the face gets `Event::Timeout`.
    pub timeout_seconds: u32,
    pub lcd: LcdType,
    pub home_face: FaceId,
    pub leap_seconds_at_boot: LeapSeconds,
    pub epoch: EpochConfig,
}

impl WatchConfig {
    pub const fn new() -> Self {
        Self {
            utc_offset_seconds: 0,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            lcd: LcdType::Custom,
            home_face: FaceId::DateNum,
            leap_seconds_at_boot: LeapSeconds::DEFAULT,
            epoch: EpochConfig::DEFAULT,
        }
    }

    pub const fn with_utc_offset_seconds(mut self, offset: i32) -> Self {
        self.utc_offset_seconds = offset;
        self
    }

    pub const fn with_timeout_seconds(mut self, seconds: u32) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub const fn with_lcd(mut self, lcd: LcdType) -> Self {
        self.lcd = lcd;
        self
    }

    pub const fn with_home_face(mut self, face: FaceId) -> Self {
        self.home_face = face;
        self
    }

    pub const fn with_leap_seconds_at_boot(mut self, leap: LeapSeconds) -> Self {
        self.leap_seconds_at_boot = leap;
        self
    }

    pub const fn with_epoch(mut self, epoch: EpochConfig) -> Self {
        self.epoch = epoch;
        self
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self::new()
    }
}
