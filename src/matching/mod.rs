//! Normalize → resample → compare.

pub mod distance;
pub mod normalize;
pub mod resample;

pub use distance::{slot_distance, DistanceEvaluator};
pub use normalize::{NormalizedFrame, NormalizedLandmark, PoseNormalizer};
pub use resample::resample;
