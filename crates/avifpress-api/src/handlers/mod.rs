pub mod compress;
pub mod index;
