//! Squat Coach engine
//!
//! Turns a stream of pose keypoint frames into an exercise phase, good/bad
//! repetition counts, a bounded form accuracy score and a feedback message.
//! The engine is synchronous and performs no I/O; the caller owns the frame
//! loop and calls [`SquatAnalysisEngine::process_frame`] once per tick.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::EngineConfig;
pub use error::{ConfigError, PoseFault};
pub use models::analysis::{
    AccuracyScore, Angles, BadReason, EngineSnapshot, FeedbackMessage, RepOutcome,
    SessionCounters, SessionSummary, Severity, SquatState, ValidatedPose,
};
pub use models::keypoint::{JointName, Keypoint, Point, PoseFrame, REQUIRED_JOINTS};
pub use services::squat_analysis_engine::{EngineState, SquatAnalysisEngine};
