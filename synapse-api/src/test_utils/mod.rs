//! In-memory implementations for testing.
//!
//! Available behind the `test-utils` feature flag. These are minimal
//! implementations that prove the trait APIs are usable.

mod memory_artifacts;
mod recording_reactivator;

pub use memory_artifacts::MemoryArtifacts;
pub use recording_reactivator::RecordingReactivator;
