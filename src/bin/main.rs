//! Epoch faces firmware
//! ========================================
//! needs to be run in WSL2 terminal
//! source ~/export-esp.sh
//! cargo run --release --features esp32s3
//! ========================================
//!
//! MODE cycles between the date-number, epoch and GPS-time faces (hold it to go
//! home). ALARM steps through the current face's modes, LIGHT is held to show the
//! high digits or, on the GPS leap-second screen, bumps the count.

//% CHIPS: esp32s3
//% FEATURES: esp-hal/unstable

#![no_std]
#![no_main]

// Define the application description, which is placed in a special section of the binary.
// This is used by the bootloader to verify the application.
// The macro automatically fills in the fields.
esp_bootloader_esp_idf::esp_app_desc!();

use epoch_faces::{
    clock::DateTime,
    config::WatchConfig,
    display::setup_display,
    face::Event,
    input::{handle_button_generic, ButtonState, Edge, EventQueue},
    movement::Watch,
    rtc_pcf85063::{Pcf85063, RtcClock, RtcError},
    segment::SegmentBuffer,
    ui::update_ui,
    wiring::{init_board_pins, BoardPins, RtcPins},
};

use esp_backtrace as _;
use log::{info, warn};

// ESP-HAL imports
use esp_hal::{
    handler,
    i2c::master::{Config as I2cConfig, I2c},
    main, ram,
    time::Rate,
    timer::systimer::{SystemTimer, Unit},
    Config,
};

#[ram]
static mut DISPLAY_BUF: [u8; 1024] = [0; 1024];

// Shared resources for the three buttons
static LIGHT: ButtonState<'static> = ButtonState::new("Light");
static ALARM: ButtonState<'static> = ButtonState::new("Alarm");
static MODE: ButtonState<'static> = ButtonState::new("Mode");

// Button edges waiting for the main loop
static EVENTS: EventQueue = EventQueue::new();

// Current debounce time (milliseconds)
const DEBOUNCE_MS: u64 = 40;
const LONG_PRESS_MS: u64 = 1500; // hold MODE this long to return home
const TICK_MS: u64 = 1000;

// Where the clock starts when the RTC has lost power: 2025-01-01 00:00:00 UTC
const RTC_RESET_TIME: DateTime = DateTime::new(2025, 1, 1, 0, 0, 0);

fn now_ms() -> u64 {
    let t = SystemTimer::unit_value(Unit::Unit0);
    t.saturating_mul(1000) / SystemTimer::ticks_per_second()
}

fn light_event(edge: Edge) -> Event {
    match edge {
        Edge::Pressed => Event::LightButtonDown,
        Edge::Released => Event::LightButtonUp,
    }
}

fn alarm_event(edge: Edge) -> Event {
    match edge {
        Edge::Pressed => Event::AlarmButtonDown,
        Edge::Released => Event::AlarmButtonUp,
    }
}

// MODE release is turned into ModeButtonUp or ModeLongPress by the main loop
fn mode_event(edge: Edge) -> Event {
    match edge {
        Edge::Pressed => Event::ModeButtonDown,
        Edge::Released => Event::ModeButtonUp,
    }
}

// Interrupt handler
#[handler]
#[ram]
fn handler() {
    let now_ms = now_ms();

    handle_button_generic(&LIGHT, now_ms, DEBOUNCE_MS, |edge| EVENTS.push(light_event(edge)));
    handle_button_generic(&ALARM, now_ms, DEBOUNCE_MS, |edge| EVENTS.push(alarm_event(edge)));
    handle_button_generic(&MODE, now_ms, DEBOUNCE_MS, |edge| EVENTS.push(mode_event(edge)));
}

fn open_rtc(pins: RtcPins<'static>) -> Pcf85063<I2c<'static, esp_hal::Blocking>> {
    let cfg = I2cConfig::default().with_frequency(Rate::from_khz(400));
    let i2c = I2c::new(pins.i2c0, cfg)
        .expect("I2C0 config rejected")
        .with_sda(pins.sda)
        .with_scl(pins.scl);
    Pcf85063::new(i2c)
}

#[main]
fn main() -> ! {
    esp_println::logger::init_logger_from_env();

    // Initialize peripherals
    let peripherals = esp_hal::init(Config::default());

    // one call gives you IO handler + all your role pins from wiring.rs
    let (mut io, pins) = init_board_pins(peripherals);
    let BoardPins {
        btn_light,
        btn_alarm,
        btn_mode,
        display_pins,
        rtc_pins,
    } = pins;

    // -------------------- RTC --------------------
    let mut rtc = open_rtc(rtc_pins);
    let boot_time = match rtc.read_datetime() {
        Ok(dt) => dt,
        Err(RtcError::Bus(e)) => {
            warn!("RTC not responding: {:?}", e);
            RTC_RESET_TIME
        }
        Err(e) => {
            warn!("RTC time unusable ({:?}), resetting", e);
            if let Err(e) = rtc.set_datetime(&RTC_RESET_TIME) {
                warn!("RTC reset failed: {:?}", e);
            }
            RTC_RESET_TIME
        }
    };
    info!(
        "boot {:04}-{:02}-{:02} {:02}:{:02}:{:02} UTC",
        boot_time.year, boot_time.month, boot_time.day, boot_time.hour, boot_time.minute, boot_time.second
    );

    let config = WatchConfig::default();
    let clock = RtcClock::new(rtc, config.utc_offset_seconds, boot_time);
    let mut watch = Watch::new(clock, SegmentBuffer::new(config.lcd), config);

    // Stash pins in global state
    critical_section::with(|cs| {
        LIGHT.input.borrow_ref_mut(cs).replace(btn_light);
        ALARM.input.borrow_ref_mut(cs).replace(btn_alarm);
        MODE.input.borrow_ref_mut(cs).replace(btn_mode);
    });
    io.set_interrupt_handler(handler);

    // Safe because DISPLAY_BUF is only used here
    #[allow(static_mut_refs)]
    let mut my_display =
        unsafe { setup_display(display_pins, &mut DISPLAY_BUF) }.expect("display bring-up failed");

    // -------------------- UI Init --------------------
    watch.start();
    let _ = update_ui(&mut my_display, watch.host().display_mut());

    let mut next_tick_ms = now_ms() + TICK_MS;
    let mut mode_down_since: Option<u64> = None;
    let mut long_press_sent = false;

    // -------------------- Main loop --------------------
    loop {
        let now = now_ms();

        // edges the interrupt saw inside the debounce window
        LIGHT.poll(now, DEBOUNCE_MS, |edge| EVENTS.push(light_event(edge)));
        ALARM.poll(now, DEBOUNCE_MS, |edge| EVENTS.push(alarm_event(edge)));
        MODE.poll(now, DEBOUNCE_MS, |edge| EVENTS.push(mode_event(edge)));

        while let Some(event) = EVENTS.pop() {
            match event {
                Event::ModeButtonDown => {
                    mode_down_since = Some(now);
                    long_press_sent = false;
                    watch.dispatch(event);
                }
                // already handled as a long press
                Event::ModeButtonUp if long_press_sent => {
                    mode_down_since = None;
                    long_press_sent = false;
                }
                Event::ModeButtonUp => {
                    mode_down_since = None;
                    watch.dispatch(event);
                }
                _ => {
                    watch.dispatch(event);
                }
            }
        }

        if let Some(t0) = mode_down_since {
            if !long_press_sent && now.saturating_sub(t0) >= LONG_PRESS_MS && MODE.is_down() {
                long_press_sent = true;
                watch.dispatch(Event::ModeLongPress);
            }
        }

        if now >= next_tick_ms {
            next_tick_ms += TICK_MS;
            watch.tick();
        }

        if let Err(e) = update_ui(&mut my_display, watch.host().display_mut()) {
            warn!("display update failed: {:?}", e);
        }
    }
}
