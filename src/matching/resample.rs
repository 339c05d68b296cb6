//! Nearest-neighbour resampling onto a fixed number of key-frames.
//!
//! Frames are picked, never blended: interpolating joint positions between
//! two detector samples can produce a pose nobody actually held.

/// Source index for target slot `k` of `slots` over a sequence of `len`.
/// Slot positions are `k / (slots - 1)` in [0, 1]; a single slot maps to 0.
pub fn nearest_index(k: usize, slots: usize, len: usize) -> usize {
    if len <= 1 || slots <= 1 {
        return 0;
    }
    let t = k as f64 / (slots - 1) as f64;
    let idx = (t * (len - 1) as f64).round() as usize;
    idx.min(len - 1)
}

/// Map `sequence` onto exactly `slots` entries. An empty input yields an
/// empty output.
pub fn resample<T: Clone>(sequence: &[T], slots: usize) -> Vec<T> {
    if sequence.is_empty() {
        return Vec::new();
    }
    (0..slots)
        .map(|k| sequence[nearest_index(k, slots, sequence.len())].clone())
        .collect()
}
