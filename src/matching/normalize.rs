use nalgebra::Vector3;
use tracing::trace;

use crate::config::MatcherConfig;
use crate::pose::{KeypointIndex, PoseFrame};

/// Landmark in torso-relative coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedLandmark {
    pub position: Vector3<f64>,
    pub confidence: f64,
    /// Below the confidence floor; kept but skipped by the evaluator
    pub low_confidence: bool,
}

impl Default for NormalizedLandmark {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            confidence: 0.0,
            low_confidence: true,
        }
    }
}

/// One frame after translation and scale removal.
/// A degenerate frame (`valid == false`) has no usable coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedFrame {
    pub landmarks: [NormalizedLandmark; KeypointIndex::COUNT],
    pub valid: bool,
}

impl NormalizedFrame {
    fn degenerate(frame: &PoseFrame, min_confidence: f64) -> Self {
        let mut landmarks = [NormalizedLandmark::default(); KeypointIndex::COUNT];
        for (out, lm) in landmarks.iter_mut().zip(frame.landmarks().iter()) {
            out.confidence = lm.confidence;
            out.low_confidence = !lm.is_valid(min_confidence);
        }
        Self { landmarks, valid: false }
    }
}

/// Puts the hip center at the origin and scales the shoulder-hip distance to 1
#[derive(Debug, Clone)]
pub struct PoseNormalizer {
    min_confidence: f64,
    epsilon: f64,
    use_depth: bool,
}

impl PoseNormalizer {
    pub fn new(min_confidence: f64, epsilon: f64, use_depth: bool) -> Self {
        Self {
            min_confidence,
            epsilon,
            use_depth,
        }
    }

    pub fn from_config(config: &MatcherConfig) -> Self {
        Self::new(config.min_confidence, config.degenerate_epsilon, config.use_depth)
    }

    pub fn normalize(&self, frame: &PoseFrame) -> NormalizedFrame {
        let anchors_seen = KeypointIndex::ANCHORS
            .iter()
            .all(|&idx| frame.get(idx).is_valid(self.min_confidence));
        if !anchors_seen {
            trace!(timestamp = frame.timestamp, "anchor landmarks below confidence floor");
            return NormalizedFrame::degenerate(frame, self.min_confidence);
        }

        let hip_center = self.midpoint(frame, KeypointIndex::LeftHip, KeypointIndex::RightHip);
        let shoulder_center =
            self.midpoint(frame, KeypointIndex::LeftShoulder, KeypointIndex::RightShoulder);
        let torso = (shoulder_center - hip_center).norm();
        if torso < self.epsilon.max(f64::MIN_POSITIVE) {
            trace!(timestamp = frame.timestamp, torso, "degenerate torso length");
            return NormalizedFrame::degenerate(frame, self.min_confidence);
        }

        let mut landmarks = [NormalizedLandmark::default(); KeypointIndex::COUNT];
        for (out, lm) in landmarks.iter_mut().zip(frame.landmarks().iter()) {
            *out = NormalizedLandmark {
                position: (lm.position(self.use_depth) - hip_center) / torso,
                confidence: lm.confidence,
                low_confidence: !lm.is_valid(self.min_confidence),
            };
        }
        NormalizedFrame { landmarks, valid: true }
    }

    pub fn normalize_sequence(&self, frames: &[PoseFrame]) -> Vec<NormalizedFrame> {
        frames.iter().map(|f| self.normalize(f)).collect()
    }

    fn midpoint(&self, frame: &PoseFrame, a: KeypointIndex, b: KeypointIndex) -> Vector3<f64> {
        (frame.get(a).position(self.use_depth) + frame.get(b).position(self.use_depth)) / 2.0
    }
}

impl Default for PoseNormalizer {
    fn default() -> Self {
        Self::from_config(&MatcherConfig::default())
    }
}
