//! Repetition decision state machine.
//!
//! `Idle → Capturing → Evaluating → Resolved → Idle`. Frames move the
//! session into `Capturing`; only an explicit [`RepSession::complete_rep`]
//! evaluates. Evaluating and Resolved are passed through within that call.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::capture::FrameIngest;
use crate::config::MatcherConfig;
use crate::matching::{resample, DistanceEvaluator, NormalizedFrame, PoseNormalizer};
use crate::pose::{PoseFrame, PoseSequence};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchReason {
    /// Reference present but too few frames were captured
    NotEnoughFrames,
    /// Practice mode: nothing to compare against
    NoReference,
    BelowThreshold,
    AboveThreshold,
}

/// Outcome of one repetition attempt
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchResult {
    pub matched: bool,
    pub reason: MatchReason,
    /// Aggregate distance, only when a comparison ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl MatchResult {
    fn short_circuit(reason: MatchReason) -> Self {
        Self {
            matched: reason == MatchReason::NoReference,
            reason,
            score: None,
        }
    }

    fn scored(score: f64, threshold: f64) -> Self {
        let matched = score <= threshold;
        Self {
            matched,
            reason: if matched {
                MatchReason::BelowThreshold
            } else {
                MatchReason::AboveThreshold
            },
            score: Some(score),
        }
    }
}

/// Counters for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RepStats {
    pub correct_reps: u32,
    pub attempted_reps: u32,
    /// None until the first rep resolves
    pub last_rep_correct: Option<bool>,
}

impl RepStats {
    fn record(&mut self, result: &MatchResult) {
        self.attempted_reps += 1;
        if result.matched {
            self.correct_reps += 1;
        }
        self.last_rep_correct = Some(result.matched);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Capturing,
    Evaluating,
    Resolved,
}

/// One exercise module's matching session
pub struct RepSession {
    config: MatcherConfig,
    ingest: FrameIngest,
    normalizer: PoseNormalizer,
    evaluator: DistanceEvaluator,
    /// Reference already normalized and resampled to key-frames
    reference: Option<Vec<NormalizedFrame>>,
    state: SessionState,
    stats: RepStats,
}

impl RepSession {
    pub fn new(config: MatcherConfig, reference: Option<PoseSequence>) -> Self {
        let mut session = Self {
            ingest: FrameIngest::from_config(&config),
            normalizer: PoseNormalizer::from_config(&config),
            evaluator: DistanceEvaluator::from_config(&config),
            reference: None,
            state: SessionState::Idle,
            stats: RepStats::default(),
            config,
        };
        session.set_reference(reference);
        session
    }

    /// Session without a reference; every attempted rep counts
    pub fn practice(config: MatcherConfig) -> Self {
        Self::new(config, None)
    }

    /// Replace the reference. Too-short references are treated as absent.
    pub fn set_reference(&mut self, reference: Option<PoseSequence>) {
        self.reference = match reference {
            Some(frames) if frames.len() >= self.config.min_frames_for_rep.max(1) => {
                let normalized = self.normalizer.normalize_sequence(&frames);
                let degenerate = normalized.iter().filter(|f| !f.valid).count();
                if degenerate > 0 {
                    warn!(degenerate, total = frames.len(), "reference contains degenerate frames");
                }
                Some(resample(&normalized, self.config.key_frames))
            }
            Some(frames) => {
                warn!(frames = frames.len(), "reference too short, using practice mode");
                None
            }
            None => None,
        };
    }

    pub fn has_reference(&self) -> bool {
        self.reference.is_some()
    }

    /// Offer a detector frame. Returns false if it was throttled.
    pub fn ingest(&mut self, frame: PoseFrame, arrival_ms: u64) -> bool {
        let accepted = self.ingest.ingest(frame, arrival_ms);
        if accepted && self.state == SessionState::Idle {
            self.transition(SessionState::Capturing);
        }
        accepted
    }

    /// Rep-complete signal: drain, decide, update counters, back to Idle
    pub fn complete_rep(&mut self) -> MatchResult {
        self.transition(SessionState::Evaluating);
        let live = self.ingest.drain();

        let result = if live.len() < self.config.min_frames_for_rep {
            if self.reference.is_some() {
                MatchResult::short_circuit(MatchReason::NotEnoughFrames)
            } else {
                MatchResult::short_circuit(MatchReason::NoReference)
            }
        } else {
            match self.score_sequence(&live) {
                Some(score) => MatchResult::scored(score, self.config.match_threshold),
                None => MatchResult::short_circuit(MatchReason::NoReference),
            }
        };

        self.transition(SessionState::Resolved);
        self.stats.record(&result);
        info!(
            frames = live.len(),
            matched = result.matched,
            reason = ?result.reason,
            score = ?result.score,
            correct = self.stats.correct_reps,
            "rep resolved"
        );
        self.transition(SessionState::Idle);
        result
    }

    /// Aggregate distance of `live` against the reference, `None` in
    /// practice mode. Does not touch the buffer or counters.
    pub fn score_sequence(&self, live: &[PoseFrame]) -> Option<f64> {
        let reference = self.reference.as_ref()?;
        let normalized = self.normalizer.normalize_sequence(live);
        let key_frames = resample(&normalized, self.config.key_frames);
        let score = self.evaluator.evaluate(&key_frames, reference);
        debug!(score, live_frames = live.len(), "sequence scored");
        Some(score)
    }

    /// Cancel the current attempt without emitting a result
    pub fn reset(&mut self) {
        self.ingest.reset();
        self.transition(SessionState::Idle);
    }

    pub fn clear_stats(&mut self) {
        self.stats = RepStats::default();
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn stats(&self) -> RepStats {
        self.stats
    }

    pub fn buffered(&self) -> usize {
        self.ingest.buffered()
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    fn transition(&mut self, next: SessionState) {
        if self.state != next {
            debug!(from = ?self.state, to = ?next, "session state");
            self.state = next;
        }
    }
}
