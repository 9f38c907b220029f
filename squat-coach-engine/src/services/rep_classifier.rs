/// Form judgement for a completed repetition
///
/// Invoked once per rep, with the angles observed on the tick the athlete
/// rises out of the bottom position.

use crate::config::ClassifierConfig;
use crate::models::analysis::{BadReason, RepOutcome};

#[derive(Debug, Clone)]
pub struct RepClassifier {
    config: ClassifierConfig,
}

impl RepClassifier {
    pub fn new() -> Self {
        Self::with_config(ClassifierConfig::default())
    }

    pub fn with_config(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn classify(&self, knee_angle_deg: f64, hip_angle_deg: f64) -> RepOutcome {
        let c = &self.config;
        let deep_enough = knee_angle_deg < c.good_max_knee_deg;
        let hip_in_range = (c.good_min_hip_deg..=c.good_max_hip_deg).contains(&hip_angle_deg);

        if deep_enough && hip_in_range {
            RepOutcome::Good
        } else {
            RepOutcome::Bad(self.bad_reason(knee_angle_deg, hip_angle_deg))
        }
    }

    fn bad_reason(&self, knee_angle_deg: f64, hip_angle_deg: f64) -> BadReason {
        let c = &self.config;

        if knee_angle_deg > c.shallow_knee_deg {
            return BadReason::NotDeepEnough;
        }
        if hip_angle_deg < c.lean_forward_hip_deg {
            return BadReason::LeaningTooFarForward;
        }
        if hip_angle_deg > c.upright_hip_deg {
            return BadReason::NotBentEnoughAtHip;
        }

        // Between the good band and the named limits: blame the nearest
        // criterion that failed.
        if !(knee_angle_deg < c.good_max_knee_deg) {
            BadReason::NotDeepEnough
        } else if hip_angle_deg < c.good_min_hip_deg {
            BadReason::LeaningTooFarForward
        } else {
            BadReason::NotBentEnoughAtHip
        }
    }
}

impl Default for RepClassifier {
    fn default() -> Self {
        Self::new()
    }
}
