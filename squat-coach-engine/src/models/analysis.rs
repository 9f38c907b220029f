use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::PoseFault;
use crate::models::keypoint::{JointName, Keypoint};

/// Exercise phase derived from the knee angle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SquatState {
    #[default]
    Standing,
    MidSquat,
    BottomSquat,
}

impl std::fmt::Display for SquatState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SquatState::Standing => write!(f, "standing"),
            SquatState::MidSquat => write!(f, "mid-squat"),
            SquatState::BottomSquat => write!(f, "bottom-squat"),
        }
    }
}

/// Why a repetition was judged as bad form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BadReason {
    NotDeepEnough,
    LeaningTooFarForward,
    NotBentEnoughAtHip,
}

impl std::fmt::Display for BadReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BadReason::NotDeepEnough => write!(f, "not deep enough"),
            BadReason::LeaningTooFarForward => write!(f, "leaning too far forward"),
            BadReason::NotBentEnoughAtHip => write!(f, "not bent enough at the hip"),
        }
    }
}

/// Verdict for one completed repetition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "camelCase")]
pub enum RepOutcome {
    Good,
    Bad(BadReason),
}

impl RepOutcome {
    pub fn is_good(&self) -> bool {
        matches!(self, RepOutcome::Good)
    }
}

impl std::fmt::Display for RepOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepOutcome::Good => write!(f, "good"),
            RepOutcome::Bad(reason) => write!(f, "bad ({})", reason),
        }
    }
}

/// Averaged left/right joint angles in degrees, each in [0, 180]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Angles {
    pub knee_angle_deg: f64,
    pub hip_angle_deg: f64,
}

impl Angles {
    pub fn new(knee_angle_deg: f64, hip_angle_deg: f64) -> Self {
        Self {
            knee_angle_deg,
            hip_angle_deg,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.knee_angle_deg.is_finite() && self.hip_angle_deg.is_finite()
    }
}

/// Result of confidence-filtering a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ValidatedPose {
    #[serde(rename_all = "camelCase")]
    Usable {
        required_joints: BTreeMap<JointName, Keypoint>,
    },
    Insufficient { missing: BTreeSet<JointName> },
}

impl ValidatedPose {
    pub fn is_usable(&self) -> bool {
        matches!(self, ValidatedPose::Usable { .. })
    }

    /// Joints that kept the frame from being analyzed
    pub fn missing(&self) -> Option<&BTreeSet<JointName>> {
        match self {
            ValidatedPose::Usable { .. } => None,
            ValidatedPose::Insufficient { missing } => Some(missing),
        }
    }

    pub fn joint(&self, part: JointName) -> Option<&Keypoint> {
        match self {
            ValidatedPose::Usable { required_joints } => required_joints.get(&part),
            ValidatedPose::Insufficient { .. } => None,
        }
    }
}

/// Good/bad repetition tallies for the current session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCounters {
    pub good_reps: u32,
    pub bad_reps: u32,
}

impl SessionCounters {
    pub fn total(&self) -> u32 {
        self.good_reps + self.bad_reps
    }

    pub fn record(&mut self, outcome: RepOutcome) {
        match outcome {
            RepOutcome::Good => self.good_reps = self.good_reps.saturating_add(1),
            RepOutcome::Bad(_) => self.bad_reps = self.bad_reps.saturating_add(1),
        }
    }
}

/// Running form accuracy, always within the configured bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccuracyScore(u8);

impl AccuracyScore {
    pub fn new(value: u8) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for AccuracyScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Severity level of a feedback message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// The single message shown to the user for the current tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackMessage {
    pub text: String,
    pub severity: Severity,
}

impl FeedbackMessage {
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Success)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Warning)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Info)
    }
}

/// Everything the engine reports after one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineSnapshot {
    /// Timestamp of the frame that produced this snapshot
    pub timestamp_ms: u64,
    pub state: SquatState,
    /// Absent when the frame could not be analyzed
    pub angles: Option<Angles>,
    pub validated: ValidatedPose,
    /// Why the frame was rejected, if it was
    pub fault: Option<PoseFault>,
    /// Outcome of the rep completed on this tick, if any
    pub rep: Option<RepOutcome>,
    pub counters: SessionCounters,
    pub accuracy: AccuracyScore,
    pub feedback: FeedbackMessage,
}

/// End-of-session record for a summary writer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub good_reps: u32,
    pub bad_reps: u32,
    pub total_reps: u32,
    pub final_accuracy: AccuracyScore,
    pub frames_processed: u64,
    pub frames_rejected: u64,
}
