//! Correction of rendered subtitles by an external service.

pub mod corrector;
pub mod diff;
pub mod station;
