// ABOUTME: Command implementations for vitalis-cli
// ABOUTME: Calculator commands plus profile, measurement, and dashboard commands

pub mod measure;
pub mod plan;
pub mod profile;
pub mod progress;
pub mod strategy;
