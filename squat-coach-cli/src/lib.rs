// Library exports for Squat Coach CLI
// This allows testing of internal modules

pub mod commands;
pub mod config;
pub mod frames;
pub mod ui;
