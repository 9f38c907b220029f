/// Joint angle geometry
///
/// Angles are measured at the middle point of a three-point chain
/// (e.g. hip → knee → ankle) and always reported in [0, 180] degrees.

use std::collections::BTreeMap;

use crate::models::analysis::Angles;
use crate::models::keypoint::{JointName, Keypoint, Point};

/// Angle at vertex `b` formed by the rays `b→a` and `b→c`, in degrees.
///
/// Uses the difference of the two ray directions from `atan2`, so the result
/// is total for finite input. Coincident points are not rejected here.
pub fn angle_at(a: Point, b: Point, c: Point) -> f64 {
    let radians = (c.y - b.y).atan2(c.x - b.x) - (a.y - b.y).atan2(a.x - b.x);
    let angle = radians.to_degrees().abs();

    if angle > 180.0 {
        360.0 - angle
    } else {
        angle
    }
}

/// Per-side knee and hip angles before averaging
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideAngles {
    pub left_knee: f64,
    pub right_knee: f64,
    pub left_hip: f64,
    pub right_hip: f64,
}

impl SideAngles {
    /// Average the two sides of each joint
    pub fn averaged(&self) -> Angles {
        Angles::new(
            (self.left_knee + self.right_knee) / 2.0,
            (self.left_hip + self.right_hip) / 2.0,
        )
    }
}

// (point_a, joint, point_c) for each measured angle
const LEFT_KNEE: (JointName, JointName, JointName) =
    (JointName::LeftHip, JointName::LeftKnee, JointName::LeftAnkle);
const RIGHT_KNEE: (JointName, JointName, JointName) =
    (JointName::RightHip, JointName::RightKnee, JointName::RightAnkle);
const LEFT_HIP: (JointName, JointName, JointName) =
    (JointName::LeftShoulder, JointName::LeftHip, JointName::LeftKnee);
const RIGHT_HIP: (JointName, JointName, JointName) =
    (JointName::RightShoulder, JointName::RightHip, JointName::RightKnee);

/// Compute knee and hip angles on both sides.
///
/// Returns `None` if any joint of the four chains is absent.
pub fn joint_angles(joints: &BTreeMap<JointName, Keypoint>) -> Option<SideAngles> {
    let chain = |(a, b, c): (JointName, JointName, JointName)| -> Option<f64> {
        Some(angle_at(
            joints.get(&a)?.position(),
            joints.get(&b)?.position(),
            joints.get(&c)?.position(),
        ))
    };

    Some(SideAngles {
        left_knee: chain(LEFT_KNEE)?,
        right_knee: chain(RIGHT_KNEE)?,
        left_hip: chain(LEFT_HIP)?,
        right_hip: chain(RIGHT_HIP)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_right_angle() {
        let angle = angle_at(p(0.0, 0.0), p(0.0, 1.0), p(1.0, 1.0));
        assert!((angle - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_straight_line() {
        let angle = angle_at(p(0.0, 0.0), p(0.5, 0.0), p(1.0, 0.0));
        assert!((angle - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_reflex_angle_is_reflected() {
        // Raw atan2 difference here is 270 degrees
        let angle = angle_at(p(0.0, -1.0), p(0.0, 0.0), p(-1.0, 0.0));
        assert!((angle - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_angle_is_symmetric() {
        let a = p(3.0, 1.0);
        let b = p(0.0, 0.0);
        let c = p(-1.0, 2.0);
        assert!((angle_at(a, b, c) - angle_at(c, b, a)).abs() < 1e-9);
    }

    #[test]
    fn test_nan_propagates() {
        assert!(angle_at(p(f64::NAN, 0.0), p(0.0, 0.0), p(1.0, 0.0)).is_nan());
    }

    #[test]
    fn test_joint_angles_standing_pose() {
        let mut joints = BTreeMap::new();
        for (part, x, y) in [
            (JointName::LeftShoulder, 280.0, 200.0),
            (JointName::RightShoulder, 360.0, 200.0),
            (JointName::LeftHip, 280.0, 400.0),
            (JointName::RightHip, 360.0, 400.0),
            (JointName::LeftKnee, 280.0, 550.0),
            (JointName::RightKnee, 360.0, 550.0),
            (JointName::LeftAnkle, 280.0, 700.0),
            (JointName::RightAnkle, 360.0, 700.0),
        ] {
            joints.insert(part, Keypoint::new(part, x, y, 0.9));
        }

        let sides = joint_angles(&joints).unwrap();
        let angles = sides.averaged();
        assert!((angles.knee_angle_deg - 180.0).abs() < 1e-9);
        assert!((angles.hip_angle_deg - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_joint_angles_missing_joint() {
        let mut joints = BTreeMap::new();
        joints.insert(
            JointName::LeftHip,
            Keypoint::new(JointName::LeftHip, 0.0, 0.0, 0.9),
        );
        assert!(joint_angles(&joints).is_none());
    }
}
