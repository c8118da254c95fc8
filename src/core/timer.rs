//! Repeating timers: the fixed-rate accumulator used to emulate platform
//! timers, and the registry mapping timer ids to user callbacks.

use slotmap::{new_key_type, SlotMap};

/// Fixed rate timer - fires once per interval of accumulated time
#[derive(Debug, Clone, Copy)]
pub struct FixedHz {
    pub interval: f64,
    pub accumulator: f64,
}

impl FixedHz {
    /// Create timer firing every `interval_ms` milliseconds
    pub fn from_interval_ms(interval_ms: u64) -> Self {
        Self {
            interval: interval_ms.max(1) as f64 / 1000.0,
            accumulator: 0.0,
        }
    }

    /// Update with delta seconds, returns how many times the timer fired
    pub fn tick(&mut self, delta: f64) -> u32 {
        self.accumulator += delta;
        let mut fired = 0;
        while self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            fired += 1;
        }
        fired
    }
}

new_key_type! {
    /// Handle returned by `Interactor::create_timer_callback`
    pub struct TimerId;
}

/// Platform timer handle paired with the callback it drives
pub struct TimerEntry {
    pub platform_id: i32,
    pub callback: Box<dyn FnMut()>,
}

/// Owner of every live timer callback
#[derive(Default)]
pub struct TimerRegistry {
    timers: SlotMap<TimerId, TimerEntry>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, platform_id: i32, callback: Box<dyn FnMut()>) -> TimerId {
        self.timers.insert(TimerEntry { platform_id, callback })
    }

    /// Free the slot, returning the platform handle to destroy
    pub fn remove(&mut self, id: TimerId) -> Option<i32> {
        self.timers.remove(id).map(|entry| entry.platform_id)
    }

    /// Run every callback attached to `platform_id`, returns how many ran
    pub fn fire(&mut self, platform_id: i32) -> usize {
        let mut fired = 0;
        for entry in self.timers.values_mut().filter(|entry| entry.platform_id == platform_id) {
            (entry.callback)();
            fired += 1;
        }
        fired
    }

    /// Empty the registry, returning every platform handle
    pub fn drain(&mut self) -> Vec<i32> {
        self.timers.drain().map(|(_, entry)| entry.platform_id).collect()
    }

    pub fn contains(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
