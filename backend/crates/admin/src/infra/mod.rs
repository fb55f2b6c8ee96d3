//! Infrastructure Layer
//!
//! Token encoding backed by `jsonwebtoken`.

pub mod jwt;

pub use jwt::JwtCodec;
