//! Presentation Layer
//!
//! HTTP handlers, DTOs and router.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod router;

pub use handlers::TrainerAppState;
pub use router::{trainer_router, trainer_router_generic};
