/// Keypoint and pose frame models
///
/// Frames arrive from an external pose-estimation model once per tick. Joint
/// names follow the 17-part COCO layout using the camelCase PoseNet spelling
/// on the wire (`leftHip`, `rightAnkle`, ...).

use serde::{Deserialize, Serialize};

/// COCO body parts reported by the pose model
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JointName {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

/// Joints that must be confidently detected before a frame is analyzed
pub const REQUIRED_JOINTS: [JointName; 8] = [
    JointName::LeftHip,
    JointName::RightHip,
    JointName::LeftKnee,
    JointName::RightKnee,
    JointName::LeftAnkle,
    JointName::RightAnkle,
    JointName::LeftShoulder,
    JointName::RightShoulder,
];

impl JointName {
    /// Wire name of the joint
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEye => "leftEye",
            Self::RightEye => "rightEye",
            Self::LeftEar => "leftEar",
            Self::RightEar => "rightEar",
            Self::LeftShoulder => "leftShoulder",
            Self::RightShoulder => "rightShoulder",
            Self::LeftElbow => "leftElbow",
            Self::RightElbow => "rightElbow",
            Self::LeftWrist => "leftWrist",
            Self::RightWrist => "rightWrist",
            Self::LeftHip => "leftHip",
            Self::RightHip => "rightHip",
            Self::LeftKnee => "leftKnee",
            Self::RightKnee => "rightKnee",
            Self::LeftAnkle => "leftAnkle",
            Self::RightAnkle => "rightAnkle",
        }
    }

    /// All joints in COCO index order
    pub fn all() -> Vec<Self> {
        vec![
            Self::Nose,
            Self::LeftEye,
            Self::RightEye,
            Self::LeftEar,
            Self::RightEar,
            Self::LeftShoulder,
            Self::RightShoulder,
            Self::LeftElbow,
            Self::RightElbow,
            Self::LeftWrist,
            Self::RightWrist,
            Self::LeftHip,
            Self::RightHip,
            Self::LeftKnee,
            Self::RightKnee,
            Self::LeftAnkle,
            Self::RightAnkle,
        ]
    }
}

impl std::fmt::Display for JointName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A 2D position in image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A single estimated joint position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    /// Which body part this is
    pub part: JointName,
    /// X coordinate (normalized 0-1 or pixel coordinates)
    pub x: f64,
    /// Y coordinate (normalized 0-1 or pixel coordinates)
    pub y: f64,
    /// Detection confidence (0-1)
    #[serde(alias = "score")]
    pub confidence: f64,
}

impl Keypoint {
    /// Create a new keypoint
    pub fn new(part: JointName, x: f64, y: f64, confidence: f64) -> Self {
        Self {
            part,
            x,
            y,
            confidence,
        }
    }

    /// Check if the keypoint meets the confidence threshold.
    /// NaN confidence never does.
    pub fn is_usable(&self, min_confidence: f64) -> bool {
        self.confidence >= min_confidence
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// One pose estimate delivered by the pose source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseFrame {
    /// Frame timestamp in milliseconds
    #[serde(default)]
    pub timestamp_ms: u64,
    /// Model confidence for the whole pose (0-1)
    #[serde(alias = "score")]
    pub pose_score: f64,
    /// Detected keypoints, in the order the model reported them
    pub keypoints: Vec<Keypoint>,
}

impl PoseFrame {
    /// Create a new pose frame
    pub fn new(timestamp_ms: u64, pose_score: f64, keypoints: Vec<Keypoint>) -> Self {
        Self {
            timestamp_ms,
            pose_score,
            keypoints,
        }
    }

    /// Get keypoint by part. The first occurrence wins if a part repeats.
    pub fn get_keypoint(&self, part: JointName) -> Option<&Keypoint> {
        self.keypoints.iter().find(|kp| kp.part == part)
    }
}
