/// Squat Analysis Engine
///
/// Runs one pose frame per tick through the pipeline:
/// - Confidence filtering of the frame
/// - Knee and hip angle measurement (averaged over both sides, optionally smoothed)
/// - Phase transition on the knee angle
/// - Rep classification and accuracy update on the BottomSquat → MidSquat edge
/// - Feedback for the tick
///
/// Rejected frames never move the phase, the counters or the accuracy score.
/// Every call returns a complete snapshot; nothing in here panics or errors
/// on bad input.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

use crate::config::EngineConfig;
use crate::error::{ConfigError, PoseFault};
use crate::models::analysis::{
    AccuracyScore, Angles, EngineSnapshot, RepOutcome, SessionCounters, SessionSummary,
    SquatState, ValidatedPose,
};
use crate::models::keypoint::{JointName, Keypoint, PoseFrame};
use crate::services::accuracy_tracker::AccuracyTracker;
use crate::services::angle_calculator::joint_angles;
use crate::services::angle_smoother::AngleSmoother;
use crate::services::feedback_generator::{FeedbackContext, FeedbackGenerator};
use crate::services::pose_validator::PoseValidator;
use crate::services::rep_classifier::RepClassifier;
use crate::services::squat_state_machine::SquatStateMachine;

/// Everything that changes between ticks of one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineState {
    pub state: SquatState,
    pub counters: SessionCounters,
    pub accuracy: AccuracyScore,
    /// Recent angle readings for smoothing, oldest first
    pub angle_history: VecDeque<Angles>,
    pub frames_processed: u64,
    pub frames_rejected: u64,
}

impl EngineState {
    pub fn new(initial_accuracy: AccuracyScore) -> Self {
        Self {
            state: SquatState::Standing,
            counters: SessionCounters::default(),
            accuracy: initial_accuracy,
            angle_history: VecDeque::new(),
            frames_processed: 0,
            frames_rejected: 0,
        }
    }
}

pub struct SquatAnalysisEngine {
    config: EngineConfig,
    validator: PoseValidator,
    smoother: AngleSmoother,
    state_machine: SquatStateMachine,
    classifier: RepClassifier,
    tracker: AccuracyTracker,
    feedback: FeedbackGenerator,
    session: EngineState,
}

impl SquatAnalysisEngine {
    /// Create an engine with the reference thresholds
    pub fn new() -> Self {
        Self::build(EngineConfig::default())
    }

    /// Create an engine with custom thresholds
    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        let tracker = AccuracyTracker::with_config(config.scoring.clone());
        let session = EngineState::new(tracker.initial());

        Self {
            validator: PoseValidator::with_config(&config.validation),
            smoother: AngleSmoother::with_config(&config.smoothing),
            state_machine: SquatStateMachine::with_config(&config.state),
            classifier: RepClassifier::with_config(config.classifier.clone()),
            feedback: FeedbackGenerator::with_config(config.feedback.clone()),
            tracker,
            session,
            config,
        }
    }

    /// Analyze one frame and report the engine's view of this tick
    pub fn process_frame(&mut self, frame: &PoseFrame) -> EngineSnapshot {
        self.session.frames_processed += 1;

        match self.measure(frame) {
            Ok((required_joints, raw_angles)) => {
                self.advance(frame, required_joints, raw_angles)
            }
            Err(fault) => self.hold(frame, fault),
        }
    }

    /// Validate the frame and compute its averaged joint angles
    fn measure(
        &self,
        frame: &PoseFrame,
    ) -> Result<(BTreeMap<JointName, Keypoint>, Angles), PoseFault> {
        let required_joints = self.validator.check(frame)?;
        let angles = joint_angles(&required_joints)
            .map(|sides| sides.averaged())
            .filter(Angles::is_finite)
            .ok_or(PoseFault::DegenerateGeometry)?;

        Ok((required_joints, angles))
    }

    fn advance(
        &mut self,
        frame: &PoseFrame,
        required_joints: BTreeMap<JointName, Keypoint>,
        raw_angles: Angles,
    ) -> EngineSnapshot {
        let angles = self
            .smoother
            .smooth(&mut self.session.angle_history, raw_angles);

        let transition = self
            .state_machine
            .step(self.session.state, angles.knee_angle_deg);
        self.session.state = transition.to;

        let rep = if transition.is_rep_completing() {
            Some(self.complete_rep(angles))
        } else {
            None
        };

        let validated = ValidatedPose::Usable { required_joints };
        let feedback = self.feedback.current_feedback(&FeedbackContext {
            state: self.session.state,
            angles: Some(angles),
            validated: &validated,
            pose_score: frame.pose_score,
            completed_rep: rep,
        });

        EngineSnapshot {
            timestamp_ms: frame.timestamp_ms,
            state: self.session.state,
            angles: Some(angles),
            validated,
            fault: None,
            rep,
            counters: self.session.counters,
            accuracy: self.session.accuracy,
            feedback,
        }
    }

    fn complete_rep(&mut self, angles: Angles) -> RepOutcome {
        let outcome = self
            .classifier
            .classify(angles.knee_angle_deg, angles.hip_angle_deg);
        self.session.counters.record(outcome);
        let accuracy = self.tracker.apply(&mut self.session.accuracy, outcome);

        tracing::info!(
            outcome = %outcome,
            knee_angle_deg = angles.knee_angle_deg,
            hip_angle_deg = angles.hip_angle_deg,
            good_reps = self.session.counters.good_reps,
            bad_reps = self.session.counters.bad_reps,
            accuracy = accuracy.value(),
            "rep completed"
        );

        outcome
    }

    /// Report a rejected frame without touching phase, counters or accuracy
    fn hold(&mut self, frame: &PoseFrame, fault: PoseFault) -> EngineSnapshot {
        self.session.frames_rejected += 1;
        tracing::debug!(timestamp_ms = frame.timestamp_ms, fault = %fault, "frame rejected");

        let validated = PoseValidator::rejected(&fault);
        let feedback = self.feedback.current_feedback(&FeedbackContext {
            state: self.session.state,
            angles: None,
            validated: &validated,
            pose_score: frame.pose_score,
            completed_rep: None,
        });

        EngineSnapshot {
            timestamp_ms: frame.timestamp_ms,
            state: self.session.state,
            angles: None,
            validated,
            fault: Some(fault),
            rep: None,
            counters: self.session.counters,
            accuracy: self.session.accuracy,
            feedback,
        }
    }

    /// Start a new session, keeping the configuration
    pub fn reset(&mut self) {
        tracing::info!(
            good_reps = self.session.counters.good_reps,
            bad_reps = self.session.counters.bad_reps,
            accuracy = self.session.accuracy.value(),
            "session reset"
        );
        self.session = EngineState::new(self.tracker.initial());
    }

    pub fn state(&self) -> SquatState {
        self.session.state
    }

    pub fn counters(&self) -> SessionCounters {
        self.session.counters
    }

    pub fn accuracy(&self) -> AccuracyScore {
        self.session.accuracy
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn summary(&self) -> SessionSummary {
        let counters = self.session.counters;
        SessionSummary {
            good_reps: counters.good_reps,
            bad_reps: counters.bad_reps,
            total_reps: counters.total(),
            final_accuracy: self.session.accuracy,
            frames_processed: self.session.frames_processed,
            frames_rejected: self.session.frames_rejected,
        }
    }
}

impl Default for SquatAnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let engine = SquatAnalysisEngine::new();
        assert_eq!(engine.state(), SquatState::Standing);
        assert_eq!(engine.counters(), SessionCounters::default());
        assert_eq!(engine.accuracy().value(), 75);
        assert_eq!(engine.summary().frames_processed, 0);
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let mut config = EngineConfig::default();
        config.smoothing.window_size = 0;
        assert!(SquatAnalysisEngine::with_config(config).is_err());

        let mut config = EngineConfig::default();
        config.state.hysteresis_deg = -2.0;
        assert!(SquatAnalysisEngine::with_config(config).is_err());
    }

    #[test]
    fn test_with_config_keeps_thresholds() {
        let mut config = EngineConfig::default();
        config.state.hysteresis_deg = 5.0;
        config.smoothing.window_size = 4;
        let engine = SquatAnalysisEngine::with_config(config.clone()).unwrap();
        assert_eq!(engine.config(), &config);
    }

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SquatAnalysisEngine>();
        assert_send_sync::<EngineSnapshot>();
    }
}
