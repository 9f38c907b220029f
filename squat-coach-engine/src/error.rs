use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

use crate::models::keypoint::JointName;

/// Why a frame was rejected without analysis.
///
/// Faults are reported inside the snapshot, never returned as `Err` from the
/// engine; the next frame is the retry.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PoseFault {
    #[error("Pose score {score:.2} is below the minimum")]
    LowPoseScore { score: f64 },

    #[error("Missing joints: {}", format_joints(.missing))]
    MissingJoints { missing: BTreeSet<JointName> },

    #[error("Joint angles could not be computed from the keypoints")]
    DegenerateGeometry,
}

fn format_joints(joints: &BTreeSet<JointName>) -> String {
    joints
        .iter()
        .map(|joint| joint.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Engine configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}
