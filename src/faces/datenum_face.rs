// Day-of-year / week-of-year face. Reads local time, the date the wearer lives in.

use log::debug;

use crate::epoch;
use crate::face::{wake_display, Event, FaceState, Movement, WatchFace};
use crate::format::{self, Readout};
use crate::modes::DateNumMode;

#[derive(Debug, Default)]
pub struct DateNumFace {
    state: FaceState<DateNumMode>,
}

impl DateNumFace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FaceState<DateNumMode> {
        &self.state
    }

    fn readout(&self, host: &mut dyn Movement) -> Readout {
        let now = host.local_date_time();
        match self.state.mode {
            DateNumMode::DayOfYear => {
                format::day_of_year(epoch::day_of_year(now.year, now.month, now.day))
            }
            DateNumMode::WeekOfYear => {
                format::week_of_year(epoch::week_of_year(now.year, now.month, now.day))
            }
        }
    }

    fn refresh(&self, host: &mut dyn Movement) {
        let readout = self.readout(host);
        readout.write_to(host.display());
    }
}

impl WatchFace for DateNumFace {
    fn activate(&mut self, host: &mut dyn Movement) {
        self.state.reset();
        wake_display(host);
    }

    fn handle(&mut self, event: Event, host: &mut dyn Movement) -> bool {
        match event {
            Event::Activate | Event::Tick => self.refresh(host),
            Event::AlarmButtonUp => {
                self.state.advance();
                debug!("datenum mode -> {:?}", self.state.mode);
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
