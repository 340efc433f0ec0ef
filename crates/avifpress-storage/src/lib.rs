pub mod local;
pub mod naming;

pub use local::{ArtifactStore, SweepStats};
