//! Request construction: ordered query parameters and fully resolved request targets.

pub mod params;
pub mod target;

pub use params::*;
pub use target::*;
