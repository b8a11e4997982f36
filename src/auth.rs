//! Client credentials and the HTTP Basic token derived from them.

pub mod credentials;
pub mod secret;

pub use credentials::*;
pub use secret::*;
