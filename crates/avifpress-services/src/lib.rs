pub mod convert;
pub mod reaper;

pub use convert::{CompressionRequest, Converter};
pub use reaper::Reaper;
