use std::time::Instant;

/// Monotonic stopwatch measuring time since it was started
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    start: Instant,
}

impl Clock {
    /// Create new clock starting now
    pub fn new() -> Self {
        Self { start: Instant::now() }
    }

    /// Milliseconds since the clock started
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn clock_measures_elapsed() {
        let clock = Clock::new();

        thread::sleep(Duration::from_millis(10));

        assert!(clock.elapsed_ms() >= 9.0);
    }

    #[test]
    fn clocks_start_independently() {
        let first = Clock::new();
        thread::sleep(Duration::from_millis(10));
        let second = Clock::new();

        assert!(first.elapsed_ms() > second.elapsed_ms());
    }
}
