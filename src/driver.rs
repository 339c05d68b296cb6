//! Channel boundary between a host that delivers frames and rep signals
//! from different execution contexts and a single [`RepSession`].
//!
//! The event channel is the only path into the session, so the live buffer
//! keeps exactly one producer and one consumer.

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::pose::PoseFrame;
use crate::session::{MatchResult, RepSession};

#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Detector output with host arrival time (ms)
    Frame { frame: PoseFrame, arrival_ms: u64 },
    /// User signalled the end of a repetition
    RepComplete,
    /// User backed out; discard the attempt
    Reset,
}

/// Process events until the sender side closes, then hand the session back.
/// Results are dropped silently once the result receiver is gone.
pub async fn run_session(
    mut session: RepSession,
    mut events: mpsc::Receiver<SessionEvent>,
    results: mpsc::Sender<MatchResult>,
) -> RepSession {
    while let Some(event) = events.recv().await {
        match event {
            SessionEvent::Frame { frame, arrival_ms } => {
                session.ingest(frame, arrival_ms);
            }
            SessionEvent::RepComplete => {
                let result = session.complete_rep();
                if results.send(result).await.is_err() {
                    debug!("result receiver dropped");
                }
            }
            SessionEvent::Reset => session.reset(),
        }
    }
    info!(stats = ?session.stats(), "event channel closed");
    session
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatcherConfig;
    use crate::session::MatchReason;

    #[tokio::test]
    async fn test_practice_session_over_channels() {
        let (event_tx, event_rx) = mpsc::channel(64);
        let (result_tx, mut result_rx) = mpsc::channel(8);
        let handle = tokio::spawn(run_session(
            RepSession::practice(MatcherConfig::default()),
            event_rx,
            result_tx,
        ));

        for i in 0..6u64 {
            let event = SessionEvent::Frame { frame: PoseFrame::default(), arrival_ms: i * 100 };
            event_tx.send(event).await.unwrap();
        }
        event_tx.send(SessionEvent::RepComplete).await.unwrap();

        let result = result_rx.recv().await.unwrap();
        assert!(result.matched);
        assert_eq!(result.reason, MatchReason::NoReference);

        drop(event_tx);
        let session = handle.await.unwrap();
        assert_eq!(session.stats().correct_reps, 1);
    }

    #[tokio::test]
    async fn test_reset_emits_nothing() {
        let (event_tx, event_rx) = mpsc::channel(64);
        let (result_tx, mut result_rx) = mpsc::channel(8);

        event_tx
            .send(SessionEvent::Frame { frame: PoseFrame::default(), arrival_ms: 0 })
            .await
            .unwrap();
        event_tx.send(SessionEvent::Reset).await.unwrap();
        drop(event_tx);

        let session = run_session(
            RepSession::practice(MatcherConfig::default()),
            event_rx,
            result_tx,
        )
        .await;
        assert_eq!(session.buffered(), 0);
        assert_eq!(session.stats().attempted_reps, 0);
        assert!(result_rx.recv().await.is_none());
    }
}
