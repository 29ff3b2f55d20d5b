//! Polled input state.
//!
//! The host feeds raw events in (`press`, `release`, `set_axis`) and calls
//! [`InputState::end_frame`] after each frame's variable tick so press edges
//! last exactly one frame.

use std::collections::{HashMap, HashSet};

use bn_behavior::KeyMode;

#[derive(Clone, Default, Debug)]
pub struct InputState {
    axes:    HashMap<String, f32>,
    held:    HashSet<String>,
    pressed: HashSet<String>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_axis(&mut self, name: impl Into<String>, value: f32) {
        self.axes.insert(name.into(), value);
    }

    /// Key goes down.  Registers a press edge unless it was already held.
    pub fn press(&mut self, key: &str) {
        if self.held.insert(key.to_owned()) {
            self.pressed.insert(key.to_owned());
        }
    }

    pub fn release(&mut self, key: &str) {
        self.held.remove(key);
    }

    /// Clear press edges.  Held keys and axes persist.
    pub fn end_frame(&mut self) {
        self.pressed.clear();
    }

    /// Current axis value; `0.0` for axes never set.
    pub fn axis(&self, name: &str) -> f32 {
        self.axes.get(name).copied().unwrap_or(0.0)
    }

    pub fn key(&self, key: &str, mode: KeyMode) -> bool {
        match mode {
            KeyMode::Press => self.pressed.contains(key),
            KeyMode::Hold => self.held.contains(key),
        }
    }
}
