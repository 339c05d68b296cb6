pub mod capture;
pub mod config;
pub mod driver;
pub mod error;
pub mod matching;
pub mod pose;
pub mod session;

pub use config::{Config, MatcherConfig};
pub use error::{PoseError, PoseResult};
pub use session::{MatchReason, MatchResult, RepSession, RepStats, SessionState};
