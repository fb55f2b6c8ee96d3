//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, constant-time comparison)
//! - Admin password hash verification (bcrypt, Argon2, SHA-256)
//! - Request helpers (bearer token, client IP)
//! - Environment configuration loading

pub mod client;
pub mod config;
pub mod crypto;
pub mod password;
