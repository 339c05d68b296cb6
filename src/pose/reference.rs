//! Reference sequence loading.
//!
//! The reference arrives as an opaque JSON document fetched by the host.
//! Either a bare array of frames or an object with a `frames` field is
//! accepted.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

use super::keypoint::{PoseFrame, PoseSequence};

#[derive(Deserialize)]
#[serde(untagged)]
enum ReferenceDocument {
    Frames(Vec<PoseFrame>),
    Wrapped { frames: Vec<PoseFrame> },
}

/// Parse a reference sequence from its JSON document
pub fn parse_reference(json: &str) -> Result<PoseSequence> {
    let doc: ReferenceDocument =
        serde_json::from_str(json).context("Failed to parse reference sequence")?;
    Ok(match doc {
        ReferenceDocument::Frames(frames) => frames,
        ReferenceDocument::Wrapped { frames } => frames,
    })
}

pub fn load_reference<P: AsRef<Path>>(path: P) -> Result<PoseSequence> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read reference file {}", path.display()))?;
    parse_reference(&content)
}

/// A missing document and an unreadable one both mean practice mode.
pub fn reference_or_practice(json: Option<&str>) -> Option<PoseSequence> {
    let json = json?;
    match parse_reference(json) {
        Ok(frames) => Some(frames),
        Err(e) => {
            warn!("reference unavailable, falling back to practice mode: {e:#}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::KeypointIndex;

    fn frame_json(timestamp: u64) -> String {
        let lm = r#"{"x":0.5,"y":0.5,"z":-0.1,"confidence":0.8}"#;
        format!(
            r#"{{"landmarks":[{}],"timestamp":{}}}"#,
            vec![lm; KeypointIndex::COUNT].join(","),
            timestamp
        )
    }

    #[test]
    fn test_parse_bare_array() {
        let json = format!("[{},{}]", frame_json(0), frame_json(33));
        let frames = parse_reference(&json).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].timestamp, 33);
        assert_eq!(frames[0].get(KeypointIndex::Nose).z, Some(-0.1));
    }

    #[test]
    fn test_parse_wrapped_document() {
        let json = format!(r#"{{"frames":[{}]}}"#, frame_json(5));
        let frames = parse_reference(&json).unwrap();
        assert_eq!(frames.len(), 1);
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(parse_reference("{not json").is_err());
    }

    #[test]
    fn test_reference_or_practice() {
        assert!(reference_or_practice(None).is_none());
        assert!(reference_or_practice(Some("[{\"landmarks\":[]}]")).is_none());

        let json = format!("[{}]", frame_json(0));
        assert_eq!(reference_or_practice(Some(json.as_str())).map(|f| f.len()), Some(1));
    }
}
