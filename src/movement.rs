//! Host side of the watch: owns the faces, the clock and the display, and feeds
//! events to whichever face is on screen.
//!
//! This module provides:
//! - `Host`, the `Movement` services handed to the active face
//! - `Faces`, one instance of every face, created once at boot
//! - `Watch`, the dispatcher: face switching, inactivity timeout, default handling
//!
//! Exactly one event is handled at a time. A face asking to move elsewhere only
//! records the request; the switch happens once its handler has returned.

use log::debug;

use crate::clock::{DateTime, WallClock};
use crate::config::WatchConfig;
use crate::face::{Event, FaceId, Movement, WatchFace};
use crate::faces::{DateNumFace, EpochFace, GpsTimeFace};
use crate::segment::SegmentDisplay;

pub struct Host<C, D> {
    clock: C,
    display: D,
    home: FaceId,
    current: FaceId,
    requested: Option<FaceId>,
    sleep_animation: bool,
}

impl<C: WallClock, D: SegmentDisplay> Host<C, D> {
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn start_sleep_animation(&mut self) {
        self.sleep_animation = true;
    }
}

impl<C: WallClock, D: SegmentDisplay> Movement for Host<C, D> {
    fn local_date_time(&mut self) -> DateTime {
        self.clock.local_now()
    }

    fn utc_date_time(&mut self) -> DateTime {
        self.clock.utc_now()
    }

    fn display(&mut self) -> &mut dyn SegmentDisplay {
        &mut self.display
    }

    fn home_face(&self) -> FaceId {
        self.home
    }

    fn move_to_face(&mut self, face: FaceId) {
        self.requested = Some(face);
    }

    // MODE cycles through the faces, a long MODE press goes home
    fn default_loop_handler(&mut self, event: Event) -> bool {
        match event {
            Event::ModeButtonUp => {
                self.requested = Some(self.current.next());
                true
            }
            Event::ModeLongPress => {
                self.requested = Some(self.home);
                true
            }
            _ => false,
        }
    }

    fn sleep_animation_running(&self) -> bool {
        self.sleep_animation
    }

    fn stop_sleep_animation(&mut self) {
        self.sleep_animation = false;
    }
}

pub struct Faces {
    pub datenum: DateNumFace,
    pub epoch: EpochFace,
    pub gps_time: GpsTimeFace,
}

impl Faces {
    pub fn new(config: &WatchConfig) -> Self {
        Self {
            datenum: DateNumFace::new(),
            epoch: EpochFace::new(config.epoch),
            gps_time: GpsTimeFace::new(config.epoch, config.leap_seconds_at_boot),
        }
    }

    pub fn get_mut(&mut self, id: FaceId) -> &mut dyn WatchFace {
        match id {
            FaceId::DateNum => &mut self.datenum,
            FaceId::Epoch => &mut self.epoch,
            FaceId::GpsTime => &mut self.gps_time,
        }
    }
}

pub struct Watch<C, D> {
    host: Host<C, D>,
    faces: Faces,
    timeout_seconds: u32,
    idle_seconds: u32,
    timed_out: bool,
}

impl<C: WallClock, D: SegmentDisplay> Watch<C, D> {
    pub fn new(clock: C, display: D, config: WatchConfig) -> Self {
        Self {
            host: Host {
                clock,
                display,
                home: config.home_face,
                current: config.home_face,
                requested: None,
                sleep_animation: false,
            },
            faces: Faces::new(&config),
            timeout_seconds: config.timeout_seconds,
            idle_seconds: 0,
            timed_out: false,
        }
    }

    /// Bring the home face on screen. Call once after boot or wake.
    pub fn start(&mut self) {
        let home = self.host.home;
        self.enter(home);
    }

    pub fn current_face(&self) -> FaceId {
        self.host.current
    }

    pub fn host(&mut self) -> &mut Host<C, D> {
        &mut self.host
    }

    pub fn display(&self) -> &D {
        &self.host.display
    }

    pub fn faces(&self) -> &Faces {
        &self.faces
    }

    /// Deliver one event to the active face. Returns whether anything consumed it.
    pub fn dispatch(&mut self, event: Event) -> bool {
        if event.is_button() {
            self.idle_seconds = 0;
            self.timed_out = false;
        }
        let current = self.host.current;
        let handled = self.faces.get_mut(current).handle(event, &mut self.host);
        self.apply_requested_move();
        handled
    }

    /// One-second heartbeat: inactivity timeout first, then the face's tick.
    pub fn tick(&mut self) {
        self.idle_seconds = self.idle_seconds.saturating_add(1);
        if !self.timed_out
            && self.idle_seconds >= self.timeout_seconds
            && self.host.current != self.host.home
        {
            self.timed_out = true;
            debug!("inactive for {}s, timing out", self.idle_seconds);
            self.dispatch(Event::Timeout);
        }
        self.dispatch(Event::Tick);
    }

    fn apply_requested_move(&mut self) {
        let Some(next) = self.host.requested.take() else {
            return;
        };
        if next == self.host.current {
            return;
        }
        let current = self.host.current;
        self.faces.get_mut(current).resign(&mut self.host);
        debug!("face {:?} -> {:?}", current, next);
        self.enter(next);
    }

    fn enter(&mut self, face: FaceId) {
        self.host.current = face;
        self.host.display.clear();
        self.idle_seconds = 0;
        self.timed_out = false;
        let active = self.faces.get_mut(face);
        active.activate(&mut self.host);
        active.handle(Event::Activate, &mut self.host);
        // a face may ask to move again while activating
        self.host.requested = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SoftClock;
    use crate::segment::{LcdType, SegmentBuffer};

    fn watch() -> Watch<SoftClock, SegmentBuffer> {
        let mut w = Watch::new(
            SoftClock::new(1_700_000_000, 0),
            SegmentBuffer::new(LcdType::Custom),
            WatchConfig::default().with_timeout_seconds(3),
        );
        w.start();
        w
    }

    #[test]
    fn starts_on_home_face() {
        let w = watch();
        assert_eq!(w.current_face(), FaceId::DateNum);
        assert_eq!(w.display().top_left(), "DOY");
    }

    #[test]
    fn mode_button_cycles_faces() {
        let mut w = watch();
        assert!(w.dispatch(Event::ModeButtonUp));
        assert_eq!(w.current_face(), FaceId::Epoch);
        assert_eq!(w.display().top(), "UNX L");

        w.dispatch(Event::ModeButtonUp);
        assert_eq!(w.current_face(), FaceId::GpsTime);
        w.dispatch(Event::ModeButtonUp);
        assert_eq!(w.current_face(), FaceId::DateNum);
    }

    #[test]
    fn switching_clears_stale_segments() {
        let mut w = watch();
        w.dispatch(Event::ModeButtonUp);
        w.dispatch(Event::ModeButtonUp);
        w.dispatch(Event::ModeButtonUp);
        // the date face never writes the top-right field
        assert_eq!(w.display().top_right(), "  ");
    }

    #[test]
    fn long_press_goes_home() {
        let mut w = watch();
        w.dispatch(Event::ModeButtonUp);
        w.dispatch(Event::ModeButtonUp);
        assert!(w.dispatch(Event::ModeLongPress));
        assert_eq!(w.current_face(), FaceId::DateNum);
    }

    #[test]
    fn unused_events_are_not_consumed() {
        let mut w = watch();
        assert!(!w.dispatch(Event::AlarmButtonDown));
        assert!(!w.dispatch(Event::ModeButtonDown));
    }

    #[test]
    fn inactivity_returns_home_once() {
        let mut w = watch();
        w.dispatch(Event::ModeButtonUp);
        w.tick();
        w.tick();
        assert_eq!(w.current_face(), FaceId::Epoch);
        w.tick();
        assert_eq!(w.current_face(), FaceId::DateNum);
    }

    #[test]
    fn button_press_resets_inactivity() {
        let mut w = watch();
        w.dispatch(Event::ModeButtonUp);
        w.tick();
        w.tick();
        w.dispatch(Event::LightButtonDown);
        w.dispatch(Event::LightButtonUp);
        w.tick();
        w.tick();
        assert_eq!(w.current_face(), FaceId::Epoch);
    }

    #[test]
    fn tick_refreshes_from_clock() {
        let mut w = watch();
        w.dispatch(Event::ModeButtonUp);
        w.host().clock_mut().advance(7);
        w.tick();
        assert_eq!(w.display().bottom(), "     7");
    }

    #[test]
    fn leap_seconds_persist_across_face_changes() {
        let mut w = watch();
        w.dispatch(Event::ModeButtonUp);
        w.dispatch(Event::ModeButtonUp);
        for _ in 0..3 {
            w.dispatch(Event::AlarmButtonUp);
        }
        w.dispatch(Event::LightButtonDown);
        w.dispatch(Event::LightButtonUp);
        assert_eq!(w.faces().gps_time.leap_seconds().get(), 19);

        for _ in 0..3 {
            w.dispatch(Event::ModeButtonUp);
        }
        assert_eq!(w.current_face(), FaceId::GpsTime);
        assert_eq!(w.faces().gps_time.leap_seconds().get(), 19);
        assert_eq!(w.display().bottom(), " 35219");
    }

    #[test]
    fn start_wakes_from_sleep_animation() {
        let mut w = watch();
        w.host().start_sleep_animation();
        w.dispatch(Event::ModeButtonUp);
        assert!(!w.host().sleep_animation_running());
    }
}
