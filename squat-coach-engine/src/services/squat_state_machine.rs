/// Squat phase transitions
///
/// The phase is derived from the current knee angle alone. The caller keeps
/// the previous phase and passes it in so edges can be detected; the only
/// edge that completes a repetition is BottomSquat → MidSquat.

use crate::config::StateConfig;
use crate::models::analysis::SquatState;

/// Phase change observed on one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: SquatState,
    pub to: SquatState,
}

impl Transition {
    pub fn is_change(&self) -> bool {
        self.from != self.to
    }

    /// The ascent out of the bottom position
    pub fn is_rep_completing(&self) -> bool {
        self.from == SquatState::BottomSquat && self.to == SquatState::MidSquat
    }
}

#[derive(Debug, Clone)]
pub struct SquatStateMachine {
    standing_threshold_deg: f64,
    bottom_threshold_deg: f64,
    hysteresis_deg: f64,
}

impl SquatStateMachine {
    pub fn new() -> Self {
        Self::with_config(&StateConfig::default())
    }

    pub fn with_config(config: &StateConfig) -> Self {
        Self {
            standing_threshold_deg: config.standing_threshold_deg,
            bottom_threshold_deg: config.bottom_threshold_deg,
            hysteresis_deg: config.hysteresis_deg,
        }
    }

    /// Phase for a knee angle, ignoring history
    pub fn state_for(&self, knee_angle_deg: f64) -> SquatState {
        if knee_angle_deg > self.standing_threshold_deg {
            SquatState::Standing
        } else if knee_angle_deg < self.bottom_threshold_deg {
            SquatState::BottomSquat
        } else {
            SquatState::MidSquat
        }
    }

    /// Phase for a knee angle given the previous phase.
    ///
    /// With a zero hysteresis band this equals [`state_for`](Self::state_for).
    pub fn next_state(&self, previous: SquatState, knee_angle_deg: f64) -> SquatState {
        let raw = self.state_for(knee_angle_deg);
        if self.hysteresis_deg == 0.0 || raw == previous {
            return raw;
        }

        match previous {
            SquatState::BottomSquat
                if knee_angle_deg < self.bottom_threshold_deg + self.hysteresis_deg =>
            {
                SquatState::BottomSquat
            }
            SquatState::Standing
                if knee_angle_deg > self.standing_threshold_deg - self.hysteresis_deg =>
            {
                SquatState::Standing
            }
            _ => raw,
        }
    }

    pub fn step(&self, previous: SquatState, knee_angle_deg: f64) -> Transition {
        let transition = Transition {
            from: previous,
            to: self.next_state(previous, knee_angle_deg),
        };
        if transition.is_change() {
            tracing::debug!(
                from = %transition.from,
                to = %transition.to,
                knee_angle_deg,
                "squat state changed"
            );
        }
        transition
    }
}

impl Default for SquatStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
