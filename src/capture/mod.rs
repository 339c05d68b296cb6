//! Frame capture for the repetition being attempted.
//!
//! Frames from the detector pass the throttle and land in a bounded buffer;
//! the session drains it once per repetition.

mod buffer;
mod ingest;
mod throttle;

pub use buffer::LiveBuffer;
pub use ingest::FrameIngest;
pub use throttle::FrameThrottle;
