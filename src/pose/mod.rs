pub mod keypoint;
pub mod reference;

pub use keypoint::{KeypointIndex, Landmark, PoseFrame, PoseSequence};
pub use reference::{load_reference, parse_reference, reference_or_practice};
