pub mod accuracy_tracker;
pub mod angle_calculator;
pub mod angle_smoother;
pub mod feedback_generator;
pub mod pose_validator;
pub mod rep_classifier;
pub mod squat_analysis_engine;
pub mod squat_state_machine;
