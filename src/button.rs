//! Debounced press/release tracking for one active-low button.
//!
//! The pin level is sampled from the GPIO interrupt and again from the main
//! loop. A level change seen inside the debounce window is not reported yet;
//! the next sample after the window reports it, so every press gets its release.

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Edge {
    Pressed,
    Released,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Debouncer {
    // level last handed to the caller; pulled up, so high means released
    reported_high: bool,
    last_edge_ms: u64,
}

impl Debouncer {
    pub const fn new() -> Self {
        Self {
            reported_high: true,
            last_edge_ms: 0,
        }
    }

    pub fn is_pressed(&self) -> bool {
        !self.reported_high
    }

    /// Feed one pin sample. Returns the edge to report, if any.
    pub fn update(&mut self, level_high: bool, now_ms: u64, debounce_ms: u64) -> Option<Edge> {
        if level_high == self.reported_high {
            return None;
        }
        if now_ms.saturating_sub(self.last_edge_ms) <= debounce_ms {
            return None;
        }
        self.reported_high = level_high;
        self.last_edge_ms = now_ms;
        Some(if level_high { Edge::Released } else { Edge::Pressed })
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}
