//! Domain Layer

pub mod analysis;
pub mod catalog;
pub mod generator;
pub mod stats;
