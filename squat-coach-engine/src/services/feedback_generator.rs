/// Per-tick coaching message
///
/// The message is a view over the current tick only: the validation result,
/// the phase, the angles, and the outcome of a rep completed on this tick.
/// No history is kept.

use crate::config::FeedbackConfig;
use crate::models::analysis::{
    Angles, BadReason, FeedbackMessage, RepOutcome, SquatState, ValidatedPose,
};

pub const BODY_NOT_VISIBLE: &str = "Can't detect all body parts. Ensure your full body is visible.";
pub const POSE_NOT_CLEAR: &str = "Pose not clear. Check your lighting.";
pub const START_SQUAT: &str = "Start your squat by bending your knees.";
pub const LEANING_FORWARD: &str = "Leaning too far forward. Keep your chest up.";
pub const BEND_AT_HIPS: &str = "Bend forward slightly at the hips.";
pub const CONTINUE_LOWERING: &str = "Good, continue lowering.";
pub const TOO_DEEP: &str = "Too deep! Rise up slightly.";
pub const GREAT_DEPTH: &str = "Great depth! Push through your heels to rise.";
pub const GOOD_REP: &str = "Great form! Keep going!";
pub const SQUAT_DEEPER: &str = "Squat deeper! Aim for thighs parallel to the floor.";
pub const REP_LEANING_FORWARD: &str = "You're leaning too far forward. Keep your chest up.";
pub const REP_BEND_HIPS_MORE: &str = "Bend more at the hips as you lower.";

/// Inputs for one tick's message
#[derive(Debug, Clone, Copy)]
pub struct FeedbackContext<'a> {
    pub state: SquatState,
    pub angles: Option<Angles>,
    pub validated: &'a ValidatedPose,
    /// Overall pose score of the frame
    pub pose_score: f64,
    /// Outcome of a rep completed on this tick
    pub completed_rep: Option<RepOutcome>,
}

#[derive(Debug, Clone)]
pub struct FeedbackGenerator {
    config: FeedbackConfig,
}

impl FeedbackGenerator {
    pub fn new() -> Self {
        Self::with_config(FeedbackConfig::default())
    }

    pub fn with_config(config: FeedbackConfig) -> Self {
        Self { config }
    }

    /// First matching rule wins
    pub fn current_feedback(&self, ctx: &FeedbackContext<'_>) -> FeedbackMessage {
        let angles = match (ctx.validated, ctx.angles) {
            (ValidatedPose::Usable { .. }, Some(angles)) => angles,
            _ => return FeedbackMessage::warning(BODY_NOT_VISIBLE),
        };

        if !(ctx.pose_score >= self.config.marginal_pose_score) {
            return FeedbackMessage::warning(POSE_NOT_CLEAR);
        }

        if let Some(outcome) = ctx.completed_rep {
            return Self::rep_feedback(outcome);
        }

        self.state_feedback(ctx.state, angles)
    }

    /// Message announcing a just-completed rep
    pub fn rep_feedback(outcome: RepOutcome) -> FeedbackMessage {
        match outcome {
            RepOutcome::Good => FeedbackMessage::success(GOOD_REP),
            RepOutcome::Bad(BadReason::NotDeepEnough) => FeedbackMessage::warning(SQUAT_DEEPER),
            RepOutcome::Bad(BadReason::LeaningTooFarForward) => {
                FeedbackMessage::warning(REP_LEANING_FORWARD)
            }
            RepOutcome::Bad(BadReason::NotBentEnoughAtHip) => {
                FeedbackMessage::warning(REP_BEND_HIPS_MORE)
            }
        }
    }

    fn state_feedback(&self, state: SquatState, angles: Angles) -> FeedbackMessage {
        let c = &self.config;
        match state {
            SquatState::Standing => FeedbackMessage::info(START_SQUAT),
            SquatState::MidSquat => {
                if angles.hip_angle_deg < c.lean_forward_hip_deg {
                    FeedbackMessage::warning(LEANING_FORWARD)
                } else if angles.hip_angle_deg > c.upright_hip_deg {
                    FeedbackMessage::warning(BEND_AT_HIPS)
                } else {
                    FeedbackMessage::success(CONTINUE_LOWERING)
                }
            }
            SquatState::BottomSquat => {
                if angles.knee_angle_deg < c.too_deep_knee_deg {
                    FeedbackMessage::warning(TOO_DEEP)
                } else {
                    FeedbackMessage::success(GREAT_DEPTH)
                }
            }
        }
    }
}

impl Default for FeedbackGenerator {
    fn default() -> Self {
        Self::new()
    }
}
