//! Domain Layer
//!
//! Claims carried by admin tokens.

pub mod claims;
