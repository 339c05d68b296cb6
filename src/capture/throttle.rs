/// Drops frames that arrive sooner than `interval_ms` after the last
/// accepted one. Arrival times are host milliseconds.
pub struct FrameThrottle {
    interval_ms: u64,
    last_accepted: Option<u64>,
}

impl FrameThrottle {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_accepted: None,
        }
    }

    /// Returns true and records the time if the frame should be kept.
    /// An arrival earlier than the last accepted one counts as too soon.
    pub fn accept(&mut self, arrival_ms: u64) -> bool {
        if let Some(last) = self.last_accepted {
            if arrival_ms < last || arrival_ms - last < self.interval_ms {
                return false;
            }
        }
        self.last_accepted = Some(arrival_ms);
        true
    }

    pub fn reset(&mut self) {
        self.last_accepted = None;
    }
}
