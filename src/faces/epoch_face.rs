// Unix seconds / J2000 day face. Both values come from UTC.
//
// Holding the light button shows the high half: the upper digits of the Unix
// count, or the integer day count for J2000.

use log::debug;

use crate::epoch::{self, EpochConfig};
use crate::face::{wake_display, Event, FaceState, Movement, WatchFace};
use crate::format::{self, Readout};
use crate::modes::EpochMode;

#[derive(Debug)]
pub struct EpochFace {
    state: FaceState<EpochMode>,
    config: EpochConfig,
}

impl EpochFace {
    pub fn new(config: EpochConfig) -> Self {
        Self { state: FaceState::new(), config }
    }

    pub fn state(&self) -> &FaceState<EpochMode> {
        &self.state
    }

    fn readout(&self, host: &mut dyn Movement) -> Readout {
        let now = host.utc_date_time().to_unix();
        match self.state.mode {
            EpochMode::Unix => format::unix_seconds(now, self.state.significant),
            EpochMode::J2000 => {
                let days = epoch::unix_to_j2000_days(now, &self.config);
                format::j2000(days, self.state.significant)
            }
        }
    }

    fn refresh(&self, host: &mut dyn Movement) {
        let readout = self.readout(host);
        readout.write_to(host.display());
    }
}

impl Default for EpochFace {
    fn default() -> Self {
        Self::new(EpochConfig::DEFAULT)
    }
}

impl WatchFace for EpochFace {
    fn activate(&mut self, host: &mut dyn Movement) {
        self.state.reset();
        wake_display(host);
    }

    fn handle(&mut self, event: Event, host: &mut dyn Movement) -> bool {
        match event {
            Event::Activate | Event::Tick => self.refresh(host),
            Event::AlarmButtonUp => {
                self.state.advance();
                debug!("epoch mode -> {:?}", self.state.mode);
                self.refresh(host);
            }
            Event::LightButtonDown => {
                self.state.enter_significant();
                self.refresh(host);
            }
            Event::LightButtonUp => {
                self.state.exit_significant();
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
