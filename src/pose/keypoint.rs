use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::{PoseError, PoseResult};

/// COCO 17-keypoint indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum KeypointIndex {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
    LeftHip = 11,
    RightHip = 12,
    LeftKnee = 13,
    RightKnee = 14,
    LeftAnkle = 15,
    RightAnkle = 16,
}

impl KeypointIndex {
    pub const COUNT: usize = 17;

    /// Shoulders and hips, used as the normalization anchor
    pub const ANCHORS: [KeypointIndex; 4] = [
        KeypointIndex::LeftShoulder,
        KeypointIndex::RightShoulder,
        KeypointIndex::LeftHip,
        KeypointIndex::RightHip,
    ];
}

/// Single joint observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    /// Depth, only if the detector provides it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    /// Confidence score (0.0..=1.0)
    #[serde(alias = "score", alias = "visibility")]
    pub confidence: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64, confidence: f64) -> Self {
        Self { x, y, z: None, confidence }
    }

    pub fn with_z(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }

    /// Confidence at or above `threshold`
    pub fn is_valid(&self, threshold: f64) -> bool {
        self.confidence >= threshold
    }

    /// Position as a vector; z is 0 unless `use_depth` is set and z is present
    pub fn position(&self, use_depth: bool) -> Vector3<f64> {
        let z = if use_depth { self.z.unwrap_or(0.0) } else { 0.0 };
        Vector3::new(self.x, self.y, z)
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.z.map_or(true, f64::is_finite)
            && self.confidence.is_finite()
    }
}

impl Default for Landmark {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

/// One detector sample. Undetected joints carry confidence 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFrame", into = "RawFrame")]
pub struct PoseFrame {
    landmarks: [Landmark; KeypointIndex::COUNT],
    /// Detector timestamp (ms)
    pub timestamp: u64,
}

impl PoseFrame {
    pub fn new(landmarks: [Landmark; KeypointIndex::COUNT], timestamp: u64) -> Self {
        Self { landmarks, timestamp }
    }

    /// Build from untrusted input; fails on a topology size mismatch,
    /// non-finite values or confidence outside [0, 1]
    pub fn from_landmarks(landmarks: Vec<Landmark>, timestamp: u64) -> PoseResult<Self> {
        for (index, lm) in landmarks.iter().enumerate() {
            if !lm.is_finite() {
                return Err(PoseError::NonFiniteCoordinate { index });
            }
            if !(0.0..=1.0).contains(&lm.confidence) {
                return Err(PoseError::ConfidenceOutOfRange {
                    index,
                    confidence: lm.confidence,
                });
            }
        }
        let actual = landmarks.len();
        let landmarks: [Landmark; KeypointIndex::COUNT] =
            landmarks.try_into().map_err(|_| PoseError::TopologyMismatch {
                expected: KeypointIndex::COUNT,
                actual,
            })?;
        Ok(Self::new(landmarks, timestamp))
    }

    pub fn get(&self, index: KeypointIndex) -> &Landmark {
        &self.landmarks[index as usize]
    }

    pub fn landmarks(&self) -> &[Landmark; KeypointIndex::COUNT] {
        &self.landmarks
    }
}

impl Default for PoseFrame {
    fn default() -> Self {
        Self::new([Landmark::default(); KeypointIndex::COUNT], 0)
    }
}

/// Frames in arrival order, which is temporal order
pub type PoseSequence = Vec<PoseFrame>;

#[derive(Serialize, Deserialize)]
struct RawFrame {
    landmarks: Vec<Landmark>,
    #[serde(default)]
    timestamp: u64,
}

impl TryFrom<RawFrame> for PoseFrame {
    type Error = PoseError;

    fn try_from(raw: RawFrame) -> PoseResult<Self> {
        PoseFrame::from_landmarks(raw.landmarks, raw.timestamp)
    }
}

impl From<PoseFrame> for RawFrame {
    fn from(frame: PoseFrame) -> Self {
        RawFrame {
            landmarks: frame.landmarks.to_vec(),
            timestamp: frame.timestamp,
        }
    }
}
