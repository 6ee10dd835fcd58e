//! Button handling for the firmware.
//!
//! This module provides:
//! - `ButtonState` for tracking one debounced, active-low button
//! - Edge detection via `handle_button_generic` (press and release both matter:
//!   the light button is held to show the high digits), and `ButtonState::poll`
//!   so a release that came too soon after its press is still delivered
//! - `EventQueue`, a small FIFO carrying watch events from the GPIO interrupt to the main loop
//!
//! All input state is protected with `critical_section` for safe access from interrupt and main contexts.

use esp_backtrace as _;

use core::cell::{Cell, RefCell};
use critical_section::{CriticalSection, Mutex};
use heapless::Deque;

// ESP-HAL imports
use esp_hal::gpio::Input;

use crate::button::Debouncer;
use crate::face::Event;

pub use crate::button::Edge;

// Button state struct
pub struct ButtonState<'a> {
    pub input: Mutex<RefCell<Option<Input<'a>>>>,
    pub debounce: Mutex<Cell<Debouncer>>,
    pub name: &'static str,
}

impl<'a> ButtonState<'a> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            input: Mutex::new(RefCell::new(None)),
            debounce: Mutex::new(Cell::new(Debouncer::new())),
            name,
        }
    }

    pub fn is_down(&self) -> bool {
        critical_section::with(|cs| {
            self.input
                .borrow_ref(cs)
                .as_ref()
                .map(|p| p.is_low())
                .unwrap_or(false)
        })
    }

    // Sample the pin from the main loop; reports an edge held back by the debounce window
    pub fn poll(&self, now_ms: u64, debounce_ms: u64, on_edge: impl Fn(Edge)) {
        critical_section::with(|cs| {
            let binding = self.input.borrow_ref(cs);
            let Some(input) = binding.as_ref() else {
                return;
            };
            sample(self, cs, input.is_high(), now_ms, debounce_ms, &on_edge);
        });
    }
}

fn sample(
    btn: &ButtonState,
    cs: CriticalSection,
    level_high: bool,
    now_ms: u64,
    debounce_ms: u64,
    on_edge: &impl Fn(Edge),
) {
    let cell = btn.debounce.borrow(cs);
    let mut debounce = cell.get();
    let edge = debounce.update(level_high, now_ms, debounce_ms);
    cell.set(debounce);
    if let Some(edge) = edge {
        on_edge(edge);
    }
}

// Handle one button's interrupt; `on_edge` runs for each debounced level change
pub fn handle_button_generic(
    btn: &ButtonState,
    now_ms: u64,
    debounce_ms: u64,
    on_edge: impl Fn(Edge),
) {
    critical_section::with(|cs| {
        let mut btn_binding = btn.input.borrow_ref_mut(cs);
        let Some(input) = btn_binding.as_mut() else {
            return;
        };

        // Check if interrupt is actually pending
        if !input.is_interrupt_set() {
            return;
        }
        input.clear_interrupt();

        sample(btn, cs, input.is_high(), now_ms, debounce_ms, &on_edge);
    });
}

pub const EVENT_QUEUE_LEN: usize = 16;

pub struct EventQueue {
    events: Mutex<RefCell<Deque<Event, EVENT_QUEUE_LEN>>>,
}

impl EventQueue {
    pub const fn new() -> Self {
        Self { events: Mutex::new(RefCell::new(Deque::new())) }
    }

    // A full queue drops the newest event
    pub fn push(&self, event: Event) {
        critical_section::with(|cs| {
            let _ = self.events.borrow_ref_mut(cs).push_back(event);
        });
    }

    pub fn pop(&self) -> Option<Event> {
        critical_section::with(|cs| self.events.borrow_ref_mut(cs).pop_front())
    }
}
