//! downmixer - adds stereo downmixes of surround audio tracks
//!
//! This library crate exposes the configuration layer for integration testing.

pub mod config;
pub mod report;
