//! Watch face contract shared by the host loop and the faces.
//!
//! This module provides:
//! - `Event`, the input events the host delivers one at a time
//! - `Movement`, the services the host offers to the active face
//! - `WatchFace`, the activate / handle / resign callbacks every face implements
//! - `FaceState`, the mode + significant-digit flag each face keeps

use crate::clock::DateTime;
use crate::modes::ModeCycle;
use crate::segment::SegmentDisplay;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Delivered right after `WatchFace::activate`.
    Activate,
    /// Once per second while the face is on screen.
    Tick,
    LightButtonDown,
    LightButtonUp,
    AlarmButtonDown,
    AlarmButtonUp,
    ModeButtonDown,
    ModeButtonUp,
    ModeLongPress,
    /// No button activity for the configured timeout.
    Timeout,
}

impl Event {
    pub fn is_button(self) -> bool {
        !matches!(self, Event::Activate | Event::Tick | Event::Timeout)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FaceId {
    DateNum,
    Epoch,
    GpsTime,
}

impl FaceId {
    pub const ALL: [FaceId; 3] = [FaceId::DateNum, FaceId::Epoch, FaceId::GpsTime];

    pub fn next(self) -> Self {
        use FaceId::*;
        match self {
            DateNum => Epoch,
            Epoch => GpsTime,
            GpsTime => DateNum,
        }
    }
}

/// Host services available to a face while it handles an event.
pub trait Movement {
    fn local_date_time(&mut self) -> DateTime;
    fn utc_date_time(&mut self) -> DateTime;
    fn display(&mut self) -> &mut dyn SegmentDisplay;

    fn home_face(&self) -> FaceId;
    /// Takes effect once the current handler has returned.
    fn move_to_face(&mut self, face: FaceId);

    /// Fallback for events a face doesn't use. Returns whether it was consumed.
    fn default_loop_handler(&mut self, event: Event) -> bool;

    fn sleep_animation_running(&self) -> bool;
    fn stop_sleep_animation(&mut self);
}

pub trait WatchFace {
    /// Called each time the face comes on screen, before `Event::Activate`.
    fn activate(&mut self, host: &mut dyn Movement);

    fn handle(&mut self, event: Event, host: &mut dyn Movement) -> bool;

    fn resign(&mut self, _host: &mut dyn Movement) {}
}

/// Display mode plus the "show the high digits" flag held by the light button.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FaceState<M: ModeCycle> {
    pub mode: M,
    pub significant: bool,
}

impl<M: ModeCycle> FaceState<M> {
    pub fn new() -> Self {
        Self { mode: M::first(), significant: false }
    }

    // Activation always starts over from the first mode
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn advance(&mut self) {
        self.mode = self.mode.next();
    }

    /// Light button pressed. Returns false when the current mode has no split.
    pub fn enter_significant(&mut self) -> bool {
        if self.mode.has_significant_split() {
            self.significant = true;
            true
        } else {
            false
        }
    }

    /// Light button released. The flag always clears; returns whether the mode shows it.
    pub fn exit_significant(&mut self) -> bool {
        self.significant = false;
        self.mode.has_significant_split()
    }
}

impl<M: ModeCycle> Default for FaceState<M> {
    fn default() -> Self {
        Self::new()
    }
}

// Shared activation chores: wake from the sleep animation if it's running
pub(crate) fn wake_display(host: &mut dyn Movement) {
    if host.sleep_animation_running() {
        host.stop_sleep_animation();
    }
}
