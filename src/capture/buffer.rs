//! Bounded frame buffer for one repetition attempt.

use std::collections::VecDeque;

use crate::pose::{PoseFrame, PoseSequence};

/// Order-preserving frame store with drop-oldest eviction
pub struct LiveBuffer {
    frames: VecDeque<PoseFrame>,
    capacity: usize,
}

impl LiveBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            frames: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a frame, evicting the oldest one when full.
    /// Returns true if a frame was evicted.
    pub fn push(&mut self, frame: PoseFrame) -> bool {
        let evicted = if self.frames.len() == self.capacity {
            self.frames.pop_front();
            true
        } else {
            false
        };
        self.frames.push_back(frame);
        evicted
    }

    /// Take all buffered frames, oldest first, leaving the buffer empty
    pub fn drain(&mut self) -> PoseSequence {
        self.frames.drain(..).collect()
    }

    pub fn reset(&mut self) {
        self.frames.clear();
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(timestamp: u64) -> PoseFrame {
        let mut frame = PoseFrame::default();
        frame.timestamp = timestamp;
        frame
    }

    #[test]
    fn test_push_and_drain_order() {
        let mut buf = LiveBuffer::new(4);
        for t in 0..3 {
            buf.push(frame(t));
        }
        let drained = buf.drain();
        let stamps: Vec<u64> = drained.iter().map(|f| f.timestamp).collect();
        assert_eq!(stamps, vec![0, 1, 2]);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_drop_oldest_on_overflow() {
        let mut buf = LiveBuffer::new(3);
        assert!(!buf.push(frame(0)));
        assert!(!buf.push(frame(1)));
        assert!(!buf.push(frame(2)));
        assert!(buf.push(frame(3)));

        let stamps: Vec<u64> = buf.drain().iter().map(|f| f.timestamp).collect();
        assert_eq!(stamps, vec![1, 2, 3]);
    }

    #[test]
    fn test_cap_invariant_keeps_newest() {
        let mut buf = LiveBuffer::new(120);
        for t in 0..1000 {
            buf.push(frame(t));
            assert!(buf.len() <= 120);
            assert_eq!(buf.frames.back().map(|f| f.timestamp), Some(t));
        }
        assert_eq!(buf.len(), 120);
        let drained = buf.drain();
        assert_eq!(drained.first().map(|f| f.timestamp), Some(880));
        assert_eq!(drained.last().map(|f| f.timestamp), Some(999));
    }

    #[test]
    fn test_reset_keeps_capacity() {
        let mut buf = LiveBuffer::new(8);
        buf.push(frame(0));
        buf.reset();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), 8);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let mut buf = LiveBuffer::new(0);
        buf.push(frame(0));
        buf.push(frame(1));
        assert_eq!(buf.len(), 1);
        assert_eq!(buf.frames.back().map(|f| f.timestamp), Some(1));
    }
}
