//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod sign_in;
pub mod verify_token;

// Re-exports
pub use config::AdminAuthConfig;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use verify_token::VerifyTokenUseCase;
