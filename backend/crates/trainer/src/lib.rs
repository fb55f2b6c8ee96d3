//! Phishing Awareness Trainer API
//!
//! Clean Architecture structure:
//! - `domain/` - entities, value objects, repository traits
//! - `application/` - use cases
//! - `infra/` - PostgreSQL repository
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Rules
//! - Progress markers only move forward
//! - Attempts reference an existing user and scenario; unknown error codes
//!   are refused
//! - A user has at most one final report; regenerating overwrites it
//! - Admin routes sit behind `admin::require_admin`

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use error::{TrainerError, TrainerResult};
pub use infra::postgres::PgTrainerRepository;
pub use presentation::router::{trainer_router, trainer_router_generic};

#[cfg(test)]
mod tests;
