use crate::config::ScoringConfig;
use crate::models::analysis::{AccuracyScore, RepOutcome};

/// Bounded running form score, moved only by classified reps.
///
/// The score itself lives in the engine state; the tracker holds the rules.
#[derive(Debug, Clone)]
pub struct AccuracyTracker {
    config: ScoringConfig,
}

impl AccuracyTracker {
    pub fn new() -> Self {
        Self::with_config(ScoringConfig::default())
    }

    pub fn with_config(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Score at session start and after a reset
    pub fn initial(&self) -> AccuracyScore {
        AccuracyScore::new(self.config.initial.clamp(self.config.min, self.config.max))
    }

    /// Fold one rep outcome into `score` and return the new value
    pub fn apply(&self, score: &mut AccuracyScore, outcome: RepOutcome) -> AccuracyScore {
        let c = &self.config;
        let current = score.value();
        let next = match outcome {
            RepOutcome::Good => current.saturating_add(c.good_delta).min(c.max),
            RepOutcome::Bad(_) => current.saturating_sub(c.bad_penalty).max(c.min),
        };
        *score = AccuracyScore::new(next);
        *score
    }
}

impl Default for AccuracyTracker {
    fn default() -> Self {
        Self::new()
    }
}
