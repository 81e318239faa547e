//! Shared fixtures for the canopy integration tests: paired networks over
//! an in-memory hub, message capture and assertions.

pub mod helpers;

pub use helpers::*;
