//! WordCoach Core Library
//!
//! This crate provides the core functionality for the WordCoach application,
//! including pronunciation scoring, assessment orchestration, recording
//! archive retention, and telemetry.

pub mod archive;
pub mod assessor;
pub mod scoring;
pub mod telemetry;
