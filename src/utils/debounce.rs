use embassy_time::{Duration, Instant};

/// Accepts a new value only after it has been measured unchanged for `delay`
#[derive(Debug, Copy, Clone)]
pub struct Debounce<T> {
    value: T,
    delay: Duration,
    measured_value: T,
    measured_at: Instant,
}

impl<T> Debounce<T>
where
    T: Copy + PartialEq,
{
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            value: initial,
            delay,
            measured_value: initial,
            measured_at: Instant::now(),
        }
    }

    /// The last stable value
    pub fn value(&self) -> T {
        self.value
    }

    /// Feed a raw reading. Returns true when the stable value changed.
    pub fn measure(&mut self, reading: T) -> bool {
        let now = Instant::now();

        if reading != self.measured_value {
            self.measured_value = reading;
            self.measured_at = now;
            return false;
        }

        if reading != self.value && now.duration_since(self.measured_at) >= self.delay {
            self.value = reading;
            return true;
        }

        false
    }
}
