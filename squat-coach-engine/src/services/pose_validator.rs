/// Confidence filtering of incoming pose frames
///
/// A frame is analyzable only when the overall pose score and every required
/// joint clear their thresholds. Low overall confidence fails closed: all
/// required joints are reported missing.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::ValidationConfig;
use crate::error::PoseFault;
use crate::models::analysis::ValidatedPose;
use crate::models::keypoint::{JointName, Keypoint, PoseFrame, REQUIRED_JOINTS};

#[derive(Debug, Clone)]
pub struct PoseValidator {
    /// Minimum overall pose score
    min_pose_score: f64,
    /// Minimum confidence for each required joint
    min_keypoint_confidence: f64,
}

impl PoseValidator {
    pub fn new() -> Self {
        Self::with_config(&ValidationConfig::default())
    }

    pub fn with_config(config: &ValidationConfig) -> Self {
        Self {
            min_pose_score: config.min_pose_score,
            min_keypoint_confidence: config.min_keypoint_confidence,
        }
    }

    /// Confidence-filter a frame
    pub fn validate(&self, frame: &PoseFrame) -> ValidatedPose {
        match self.check(frame) {
            Ok(required_joints) => ValidatedPose::Usable { required_joints },
            Err(fault) => Self::rejected(&fault),
        }
    }

    /// Like [`validate`](Self::validate), but reports why a frame was rejected
    pub fn check(&self, frame: &PoseFrame) -> Result<BTreeMap<JointName, Keypoint>, PoseFault> {
        // NaN scores fail the comparison and are rejected too
        if !(frame.pose_score >= self.min_pose_score) {
            return Err(PoseFault::LowPoseScore {
                score: frame.pose_score,
            });
        }

        let mut required_joints = BTreeMap::new();
        let mut missing = BTreeSet::new();

        for part in REQUIRED_JOINTS {
            match frame.get_keypoint(part) {
                Some(kp) if kp.is_usable(self.min_keypoint_confidence) => {
                    required_joints.insert(part, *kp);
                }
                _ => {
                    missing.insert(part);
                }
            }
        }

        if missing.is_empty() {
            Ok(required_joints)
        } else {
            Err(PoseFault::MissingJoints { missing })
        }
    }

    /// The validation result reported for a rejected frame
    pub fn rejected(fault: &PoseFault) -> ValidatedPose {
        let missing = match fault {
            PoseFault::MissingJoints { missing } => missing.clone(),
            PoseFault::LowPoseScore { .. } | PoseFault::DegenerateGeometry => {
                REQUIRED_JOINTS.into_iter().collect()
            }
        };
        ValidatedPose::Insufficient { missing }
    }
}

impl Default for PoseValidator {
    fn default() -> Self {
        Self::new()
    }
}
