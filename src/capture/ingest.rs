use tracing::{debug, trace};

use super::{FrameThrottle, LiveBuffer};
use crate::config::MatcherConfig;
use crate::pose::{PoseFrame, PoseSequence};

/// Throttle + buffer. Sole writer of the live buffer.
pub struct FrameIngest {
    throttle: FrameThrottle,
    buffer: LiveBuffer,
}

impl FrameIngest {
    pub fn new(throttle_ms: u64, capacity: usize) -> Self {
        Self {
            throttle: FrameThrottle::new(throttle_ms),
            buffer: LiveBuffer::new(capacity),
        }
    }

    pub fn from_config(config: &MatcherConfig) -> Self {
        Self::new(config.throttle_ms, config.max_buffer_frames)
    }

    /// Returns true if the frame was buffered, false if throttled.
    pub fn ingest(&mut self, frame: PoseFrame, arrival_ms: u64) -> bool {
        if !self.throttle.accept(arrival_ms) {
            trace!(arrival_ms, "frame throttled");
            return false;
        }
        if self.buffer.push(frame) {
            debug!(capacity = self.buffer.capacity(), "live buffer full, evicted oldest frame");
        }
        true
    }

    pub fn drain(&mut self) -> PoseSequence {
        self.buffer.drain()
    }

    /// Drop buffered frames and forget the last arrival time
    pub fn reset(&mut self) {
        self.buffer.reset();
        self.throttle.reset();
    }

    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }
}
