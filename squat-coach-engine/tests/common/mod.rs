// Shared fixtures for engine integration tests
#![allow(dead_code)]

use squat_coach_engine::{JointName, Keypoint, PoseFrame};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize test logging
pub fn init_test_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .init();
    });
}

/// Build a frame whose averaged knee and hip angles are exactly `knee` and
/// `hip` degrees, with every keypoint at confidence 0.9.
///
/// Hip sits at the origin with the knee straight below it. The ankle is the
/// hip direction rotated by `knee` around the knee; the shoulder is the knee
/// direction rotated by `hip` around the hip. Image y grows downwards.
pub fn squat_frame(timestamp_ms: u64, knee: f64, hip: f64, pose_score: f64) -> PoseFrame {
    let hip_pt = (0.0_f64, 0.0_f64);
    let knee_pt = (0.0_f64, 100.0_f64);
    let k = knee.to_radians();
    let ankle_pt = (knee_pt.0 + 100.0 * k.sin(), knee_pt.1 - 100.0 * k.cos());
    let h = hip.to_radians();
    let shoulder_pt = (hip_pt.0 - 100.0 * h.sin(), hip_pt.1 + 100.0 * h.cos());

    let sides = [
        (
            0.0,
            [
                JointName::LeftShoulder,
                JointName::LeftHip,
                JointName::LeftKnee,
                JointName::LeftAnkle,
            ],
        ),
        (
            60.0,
            [
                JointName::RightShoulder,
                JointName::RightHip,
                JointName::RightKnee,
                JointName::RightAnkle,
            ],
        ),
    ];

    let mut keypoints = vec![Keypoint::new(JointName::Nose, 30.0, -140.0, 0.9)];
    for (dx, parts) in sides {
        for (part, (x, y)) in parts
            .into_iter()
            .zip([shoulder_pt, hip_pt, knee_pt, ankle_pt])
        {
            keypoints.push(Keypoint::new(part, x + dx, y, 0.9));
        }
    }

    PoseFrame::new(timestamp_ms, pose_score, keypoints)
}

/// A clearly visible frame (pose score 0.9)
pub fn clear_frame(timestamp_ms: u64, knee: f64, hip: f64) -> PoseFrame {
    squat_frame(timestamp_ms, knee, hip, 0.9)
}

/// Standing → bottom → rising frames for one rep, rising at `rise_knee`/`rise_hip`
pub fn rep_frames(start_ms: u64, rise_knee: f64, rise_hip: f64) -> Vec<PoseFrame> {
    vec![
        clear_frame(start_ms, 170.0, 165.0),
        clear_frame(start_ms + 33, 130.0, 120.0),
        clear_frame(start_ms + 66, 90.0, 100.0),
        clear_frame(start_ms + 99, rise_knee, rise_hip),
        clear_frame(start_ms + 132, 170.0, 165.0),
    ]
}
