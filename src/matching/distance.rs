use crate::config::MatcherConfig;

use super::normalize::NormalizedFrame;

/// Mean distance between comparable landmarks of two key-frames.
/// `None` when no landmark is confident in both frames.
pub fn slot_distance(live: &NormalizedFrame, reference: &NormalizedFrame) -> Option<f64> {
    if !live.valid || !reference.valid {
        return None;
    }
    let (sum, count) = live
        .landmarks
        .iter()
        .zip(reference.landmarks.iter())
        .filter(|(a, b)| !a.low_confidence && !b.low_confidence)
        .fold((0.0, 0usize), |(sum, count), (a, b)| {
            (sum + (a.position - b.position).norm(), count + 1)
        });
    (count > 0).then(|| sum / count as f64)
}

/// Aggregate dissimilarity between two key-frame sequences; lower is better.
pub struct DistanceEvaluator {
    missing_slot_distance: f64,
}

impl DistanceEvaluator {
    pub fn new(missing_slot_distance: f64) -> Self {
        Self { missing_slot_distance }
    }

    pub fn from_config(config: &MatcherConfig) -> Self {
        Self::new(config.missing_slot_distance)
    }

    /// Mean of per-slot distances. A slot with nothing to compare
    /// contributes the largest distance seen in the other slots, never
    /// less than `missing_slot_distance`.
    pub fn evaluate(&self, live: &[NormalizedFrame], reference: &[NormalizedFrame]) -> f64 {
        let slots: Vec<Option<f64>> = live
            .iter()
            .zip(reference.iter())
            .map(|(a, b)| slot_distance(a, b))
            .collect();
        if slots.is_empty() {
            return self.missing_slot_distance;
        }

        let penalty = slots
            .iter()
            .flatten()
            .copied()
            .fold(self.missing_slot_distance, f64::max);

        let total: f64 = slots.iter().map(|d| d.unwrap_or(penalty)).sum();
        total / slots.len() as f64
    }
}

impl Default for DistanceEvaluator {
    fn default() -> Self {
        Self::from_config(&MatcherConfig::default())
    }
}
