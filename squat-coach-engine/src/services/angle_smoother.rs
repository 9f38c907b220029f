/// Moving-average smoothing of the joint angle signal
///
/// Pose models jitter from frame to frame; averaging the last few angle
/// readings keeps the phase from flickering. A window of 1 passes angles
/// through untouched. The history buffer is owned by the engine state.
/// The window must be at least 1; `EngineConfig::validate` rejects 0.

use std::collections::VecDeque;

use crate::config::SmoothingConfig;
use crate::models::analysis::Angles;

#[derive(Debug, Clone)]
pub struct AngleSmoother {
    window_size: usize,
}

impl AngleSmoother {
    pub fn new() -> Self {
        Self::with_config(&SmoothingConfig::default())
    }

    pub fn with_config(config: &SmoothingConfig) -> Self {
        Self {
            window_size: config.window_size,
        }
    }

    /// Push a reading into `history` and return the windowed average
    pub fn smooth(&self, history: &mut VecDeque<Angles>, angles: Angles) -> Angles {
        if self.window_size == 1 {
            history.clear();
            return angles;
        }

        history.push_back(angles);
        while history.len() > self.window_size {
            history.pop_front();
        }

        let count = history.len() as f64;
        let (knee_sum, hip_sum) = history.iter().fold((0.0, 0.0), |(knee, hip), a| {
            (knee + a.knee_angle_deg, hip + a.hip_angle_deg)
        });

        Angles::new(knee_sum / count, hip_sum / count)
    }
}

impl Default for AngleSmoother {
    fn default() -> Self {
        Self::new()
    }
}
