// GPS time face: seconds since the GPS epoch, week number, time of week, and the
// GPS-UTC leap second count used for all of them.
//
// The leap second count is set by hand (light button in the LPS mode) and lives
// for as long as the face does; activation doesn't touch it.

use log::{debug, info};

use crate::epoch::{self, EpochConfig};
use crate::face::{wake_display, Event, FaceState, Movement, WatchFace};
use crate::format::{self, Readout};
use crate::modes::{GpsMode, LeapSeconds};

#[derive(Debug)]
pub struct GpsTimeFace {
    state: FaceState<GpsMode>,
    leap_seconds: LeapSeconds,
    config: EpochConfig,
}

impl GpsTimeFace {
    pub fn new(config: EpochConfig, leap_seconds: LeapSeconds) -> Self {
        Self { state: FaceState::new(), leap_seconds, config }
    }

    pub fn state(&self) -> &FaceState<GpsMode> {
        &self.state
    }

    pub fn leap_seconds(&self) -> LeapSeconds {
        self.leap_seconds
    }

    fn readout(&self, host: &mut dyn Movement) -> Readout {
        let now = host.utc_date_time().to_unix();
        let gps = epoch::unix_to_gps_seconds(now, self.leap_seconds.get(), &self.config);
        match self.state.mode {
            GpsMode::Seconds => format::gps_seconds(gps, self.state.significant),
            GpsMode::WeekNumber => format::gps_week_number(epoch::gps_week_number(gps)),
            GpsMode::TimeOfWeek => format::gps_time_of_week(epoch::gps_time_of_week(gps)),
            GpsMode::LeapSeconds => format::leap_seconds(self.leap_seconds),
        }
    }

    fn refresh(&self, host: &mut dyn Movement) {
        let readout = self.readout(host);
        readout.write_to(host.display());
    }
}

impl Default for GpsTimeFace {
    fn default() -> Self {
        Self::new(EpochConfig::DEFAULT, LeapSeconds::DEFAULT)
    }
}

impl WatchFace for GpsTimeFace {
    fn activate(&mut self, host: &mut dyn Movement) {
        self.state.reset();
        wake_display(host);
    }

    fn handle(&mut self, event: Event, host: &mut dyn Movement) -> bool {
        match event {
            Event::Activate | Event::Tick => self.refresh(host),
            Event::AlarmButtonUp => {
                self.state.advance();
                debug!("gps mode -> {:?}", self.state.mode);
                self.refresh(host);
            }
            Event::LightButtonDown if self.state.mode == GpsMode::LeapSeconds => {
                self.leap_seconds.adjust();
                info!("leap seconds set to {}", self.leap_seconds.get());
                self.refresh(host);
            }
            Event::LightButtonDown => {
                if !self.state.enter_significant() {
                    return host.default_loop_handler(event);
                }
                self.refresh(host);
            }
            Event::LightButtonUp => {
                if !self.state.exit_significant() {
                    return host.default_loop_handler(event);
                }
                self.refresh(host);
            }
            Event::Timeout => {
                let home = host.home_face();
                host.move_to_face(home);
            }
            _ => return host.default_loop_handler(event),
        }
        true
    }
}
