//! Auth-domain identifiers and the redacted token wrapper.

pub mod id;
pub mod secret;

pub use id::*;
pub use secret::*;
