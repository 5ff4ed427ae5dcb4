pub mod definition;
pub mod profile;

pub use definition::Quality;
pub use profile::{GrabReason, HeldFile, QualityProfile, ReleaseDecision, SkipReason};
