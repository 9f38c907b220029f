pub mod analysis;
pub mod keypoint;

pub use analysis::{
    AccuracyScore, Angles, BadReason, EngineSnapshot, FeedbackMessage, RepOutcome,
    SessionCounters, SessionSummary, Severity, SquatState, ValidatedPose,
};
pub use keypoint::{JointName, Keypoint, Point, PoseFrame, REQUIRED_JOINTS};
