pub mod avif;

pub use avif::{codec_quality, encode_avif, EncodeError};
