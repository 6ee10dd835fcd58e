//! The three time faces.
//!
//! - `DateNumFace`: day-of-year and ISO week number, from local time
//! - `EpochFace`: Unix seconds and J2000 days, from UTC
//! - `GpsTimeFace`: GPS seconds, week number, time of week and the leap-second setting, from UTC

pub mod datenum_face;
pub mod epoch_face;
pub mod gps_time_face;

pub use datenum_face::DateNumFace;
pub use epoch_face::EpochFace;
pub use gps_time_face::GpsTimeFace;
