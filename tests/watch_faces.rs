//! End-to-end runs of the watch: events in, segment text out.

use epoch_faces::clock::{DateTime, SoftClock};
use epoch_faces::config::WatchConfig;
use epoch_faces::face::{Event, FaceId};
use epoch_faces::modes::{EpochMode, GpsMode, LeapSeconds};
use epoch_faces::movement::Watch;
use epoch_faces::segment::{LcdType, SegmentBuffer};

// 2023-11-14 22:13:20 UTC
const T0: u32 = 1_700_000_000;

fn watch_with(config: WatchConfig) -> Watch<SoftClock, SegmentBuffer> {
    let clock = SoftClock::new(T0, config.utc_offset_seconds);
    let mut watch = Watch::new(clock, SegmentBuffer::new(config.lcd), config);
    watch.start();
    watch
}

fn press(watch: &mut Watch<SoftClock, SegmentBuffer>, down: Event, up: Event) {
    watch.dispatch(down);
    watch.dispatch(up);
}

fn go_to(watch: &mut Watch<SoftClock, SegmentBuffer>, face: FaceId) {
    while watch.current_face() != face {
        press(watch, Event::ModeButtonDown, Event::ModeButtonUp);
    }
}

#[test]
fn date_face_uses_local_calendar() {
    // UTC+3 puts T0 on November 15th
    let mut watch = watch_with(WatchConfig::default().with_utc_offset_seconds(3 * 3600));
    assert_eq!(watch.display().top_left(), "DOY");
    assert_eq!(watch.display().bottom(), " 319  ");

    press(&mut watch, Event::AlarmButtonDown, Event::AlarmButtonUp);
    assert_eq!(watch.display().top_left(), "WOY");
    assert_eq!(watch.display().bottom(), "  46  ");
}

#[test]
fn epoch_face_ignores_local_offset() {
    let mut watch = watch_with(WatchConfig::default().with_utc_offset_seconds(-8 * 3600));
    go_to(&mut watch, FaceId::Epoch);
    assert_eq!(watch.display().bottom(), "     0");

    watch.dispatch(Event::LightButtonDown);
    assert_eq!(watch.display().top(), "UNX S");
    assert_eq!(watch.display().bottom(), "  1700");
    watch.dispatch(Event::LightButtonUp);
    assert_eq!(watch.display().top(), "UNX L");
}

#[test]
fn classic_lcd_uses_two_letter_labels() {
    let mut watch = watch_with(WatchConfig::default().with_lcd(LcdType::Classic));
    assert_eq!(watch.display().top_left(), "DO");

    go_to(&mut watch, FaceId::Epoch);
    press(&mut watch, Event::AlarmButtonDown, Event::AlarmButtonUp);
    assert_eq!(watch.faces().epoch.state().mode, EpochMode::J2000);
    assert_eq!(watch.display().top(), "MJ F");

    go_to(&mut watch, FaceId::GpsTime);
    assert_eq!(watch.display().top(), "NT L");
    for _ in 0..3 {
        press(&mut watch, Event::AlarmButtonDown, Event::AlarmButtonUp);
    }
    assert_eq!(watch.faces().gps_time.state().mode, GpsMode::LeapSeconds);
    assert_eq!(watch.display().top(), "LE  ");
    assert_eq!(watch.display().bottom(), "  18  ");
}

#[test]
fn gps_face_follows_the_clock() {
    let mut watch = watch_with(WatchConfig::default());
    go_to(&mut watch, FaceId::GpsTime);
    press(&mut watch, Event::AlarmButtonDown, Event::AlarmButtonUp);
    press(&mut watch, Event::AlarmButtonDown, Event::AlarmButtonUp);
    assert_eq!(watch.display().top_left(), "TOW");
    assert_eq!(watch.display().bottom(), "252818");

    watch.host().clock_mut().advance(10);
    watch.tick();
    assert_eq!(watch.display().bottom(), "252828");
}

#[test]
fn gps_week_rolls_over_at_sunday_midnight() {
    // 2023-11-19 00:00:00 UTC is a GPS week boundary once the 18 leap seconds are added
    let boundary = DateTime::new(2023, 11, 19, 0, 0, 0).to_unix() - 18;
    let mut watch = watch_with(WatchConfig::default());
    watch.host().clock_mut().set_unix(boundary - 1);
    go_to(&mut watch, FaceId::GpsTime);
    press(&mut watch, Event::AlarmButtonDown, Event::AlarmButtonUp);
    assert_eq!(watch.display().bottom(), "  2288");

    watch.host().clock_mut().advance(1);
    watch.tick();
    assert_eq!(watch.display().bottom(), "  2289");
}

#[test]
fn configured_leap_seconds_and_timeout() {
    let config = WatchConfig::default()
        .with_leap_seconds_at_boot(LeapSeconds::new(0))
        .with_timeout_seconds(2);
    let mut watch = watch_with(config);
    go_to(&mut watch, FaceId::GpsTime);
    assert_eq!(watch.display().bottom(), " 35200");

    watch.tick();
    assert_eq!(watch.current_face(), FaceId::GpsTime);
    watch.tick();
    assert_eq!(watch.current_face(), FaceId::DateNum);
    assert_eq!(watch.display().top_left(), "DOY");
}

#[test]
fn home_face_can_be_changed() {
    let mut watch = watch_with(WatchConfig::default().with_home_face(FaceId::Epoch));
    assert_eq!(watch.current_face(), FaceId::Epoch);
    go_to(&mut watch, FaceId::GpsTime);
    watch.dispatch(Event::ModeLongPress);
    assert_eq!(watch.current_face(), FaceId::Epoch);
}
