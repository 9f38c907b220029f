use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Thresholds and scoring constants for the analysis engine.
///
/// The defaults are the reference squat thresholds; every section can be
/// overridden from TOML and omitted fields fall back to those defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub validation: ValidationConfig,

    #[serde(default)]
    pub state: StateConfig,

    #[serde(default)]
    pub classifier: ClassifierConfig,

    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub feedback: FeedbackConfig,

    #[serde(default)]
    pub smoothing: SmoothingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Frames below this overall pose score are rejected outright
    #[serde(default = "default_min_pose_score")]
    pub min_pose_score: f64,

    /// Required joints below this confidence count as missing
    #[serde(default = "default_min_keypoint_confidence")]
    pub min_keypoint_confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateConfig {
    /// Knee angle above which the athlete is standing
    #[serde(default = "default_standing_threshold")]
    pub standing_threshold_deg: f64,

    /// Knee angle below which the athlete is at the bottom of the squat
    #[serde(default = "default_bottom_threshold")]
    pub bottom_threshold_deg: f64,

    /// Extra margin needed to leave Standing or BottomSquat. Zero disables it.
    #[serde(default)]
    pub hysteresis_deg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default = "default_good_max_knee")]
    pub good_max_knee_deg: f64,

    #[serde(default = "default_good_min_hip")]
    pub good_min_hip_deg: f64,

    #[serde(default = "default_good_max_hip")]
    pub good_max_hip_deg: f64,

    /// Knee angle above which a rep is "not deep enough"
    #[serde(default = "default_shallow_knee")]
    pub shallow_knee_deg: f64,

    /// Hip angle below which the torso leans too far forward
    #[serde(default = "default_lean_forward_hip")]
    pub lean_forward_hip_deg: f64,

    /// Hip angle above which the hips are not bent enough
    #[serde(default = "default_upright_hip")]
    pub upright_hip_deg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_initial_accuracy")]
    pub initial: u8,

    #[serde(default = "default_min_accuracy")]
    pub min: u8,

    #[serde(default = "default_max_accuracy")]
    pub max: u8,

    #[serde(default = "default_good_delta")]
    pub good_delta: u8,

    #[serde(default = "default_bad_penalty")]
    pub bad_penalty: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackConfig {
    /// Usable frames below this pose score still get a "pose not clear" warning
    #[serde(default = "default_marginal_pose_score")]
    pub marginal_pose_score: f64,

    #[serde(default = "default_lean_forward_hip")]
    pub lean_forward_hip_deg: f64,

    #[serde(default = "default_upright_hip")]
    pub upright_hip_deg: f64,

    #[serde(default = "default_too_deep_knee")]
    pub too_deep_knee_deg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmoothingConfig {
    /// Moving average window over joint angles. 1 means no smoothing.
    #[serde(default = "default_window_size")]
    pub window_size: usize,
}

// Default value functions
fn default_min_pose_score() -> f64 {
    0.3
}

fn default_min_keypoint_confidence() -> f64 {
    0.5
}

fn default_standing_threshold() -> f64 {
    160.0
}

fn default_bottom_threshold() -> f64 {
    100.0
}

fn default_good_max_knee() -> f64 {
    110.0
}

fn default_good_min_hip() -> f64 {
    80.0
}

fn default_good_max_hip() -> f64 {
    140.0
}

fn default_shallow_knee() -> f64 {
    120.0
}

fn default_lean_forward_hip() -> f64 {
    70.0
}

fn default_upright_hip() -> f64 {
    150.0
}

fn default_initial_accuracy() -> u8 {
    75
}

fn default_min_accuracy() -> u8 {
    50
}

fn default_max_accuracy() -> u8 {
    100
}

fn default_good_delta() -> u8 {
    2
}

fn default_bad_penalty() -> u8 {
    5
}

fn default_marginal_pose_score() -> f64 {
    0.5
}

fn default_too_deep_knee() -> f64 {
    70.0
}

fn default_window_size() -> usize {
    1
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_pose_score: default_min_pose_score(),
            min_keypoint_confidence: default_min_keypoint_confidence(),
        }
    }
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            standing_threshold_deg: default_standing_threshold(),
            bottom_threshold_deg: default_bottom_threshold(),
            hysteresis_deg: 0.0,
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            good_max_knee_deg: default_good_max_knee(),
            good_min_hip_deg: default_good_min_hip(),
            good_max_hip_deg: default_good_max_hip(),
            shallow_knee_deg: default_shallow_knee(),
            lean_forward_hip_deg: default_lean_forward_hip(),
            upright_hip_deg: default_upright_hip(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            initial: default_initial_accuracy(),
            min: default_min_accuracy(),
            max: default_max_accuracy(),
            good_delta: default_good_delta(),
            bad_penalty: default_bad_penalty(),
        }
    }
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            marginal_pose_score: default_marginal_pose_score(),
            lean_forward_hip_deg: default_lean_forward_hip(),
            upright_hip_deg: default_upright_hip(),
            too_deep_knee_deg: default_too_deep_knee(),
        }
    }
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject threshold combinations the engine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let v = &self.validation;
        check_unit_interval("validation.min_pose_score", v.min_pose_score)?;
        check_unit_interval(
            "validation.min_keypoint_confidence",
            v.min_keypoint_confidence,
        )?;
        check_unit_interval(
            "feedback.marginal_pose_score",
            self.feedback.marginal_pose_score,
        )?;

        let s = &self.state;
        check_finite("state.standing_threshold_deg", s.standing_threshold_deg)?;
        check_finite("state.bottom_threshold_deg", s.bottom_threshold_deg)?;
        check_finite("state.hysteresis_deg", s.hysteresis_deg)?;
        if s.bottom_threshold_deg >= s.standing_threshold_deg {
            return Err(ConfigError::Invalid(format!(
                "state.bottom_threshold_deg ({}) must be below state.standing_threshold_deg ({})",
                s.bottom_threshold_deg, s.standing_threshold_deg
            )));
        }
        if s.hysteresis_deg < 0.0 {
            return Err(ConfigError::Invalid(
                "state.hysteresis_deg cannot be negative".to_string(),
            ));
        }
        if s.bottom_threshold_deg + s.hysteresis_deg > s.standing_threshold_deg - s.hysteresis_deg
        {
            return Err(ConfigError::Invalid(format!(
                "state.hysteresis_deg ({}) is too wide for the state thresholds",
                s.hysteresis_deg
            )));
        }

        let c = &self.classifier;
        for (field, value) in [
            ("classifier.good_max_knee_deg", c.good_max_knee_deg),
            ("classifier.good_min_hip_deg", c.good_min_hip_deg),
            ("classifier.good_max_hip_deg", c.good_max_hip_deg),
            ("classifier.shallow_knee_deg", c.shallow_knee_deg),
            ("classifier.lean_forward_hip_deg", c.lean_forward_hip_deg),
            ("classifier.upright_hip_deg", c.upright_hip_deg),
            ("feedback.lean_forward_hip_deg", self.feedback.lean_forward_hip_deg),
            ("feedback.upright_hip_deg", self.feedback.upright_hip_deg),
            ("feedback.too_deep_knee_deg", self.feedback.too_deep_knee_deg),
        ] {
            check_finite(field, value)?;
        }
        if c.good_min_hip_deg > c.good_max_hip_deg {
            return Err(ConfigError::Invalid(
                "classifier.good_min_hip_deg must not exceed classifier.good_max_hip_deg"
                    .to_string(),
            ));
        }

        let sc = &self.scoring;
        if sc.min > sc.initial || sc.initial > sc.max {
            return Err(ConfigError::Invalid(format!(
                "scoring bounds must satisfy min <= initial <= max (got {} <= {} <= {})",
                sc.min, sc.initial, sc.max
            )));
        }

        if self.smoothing.window_size == 0 {
            return Err(ConfigError::Invalid(
                "smoothing.window_size must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

fn check_finite(field: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::Invalid(format!("{} must be a finite number", field)));
    }
    Ok(())
}

fn check_unit_interval(field: &str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::Invalid(format!(
            "{} must be between 0.0 and 1.0",
            field
        )));
    }
    Ok(())
}
