//! dm-core: shared types, IDs, and errors for the downmixer crates.
//!
//! This crate is the foundational dependency for all other dm-* crates,
//! providing the job identifier used for idempotency, a unified error type,
//! and the media-domain enums (stream kinds, speaker positions).

pub mod error;
pub mod ids;
pub mod media;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use ids::JobId;
pub use media::*;
