//! imagestream domain crate
//!
//! This crate contains the core domain logic following hexagonal architecture:
//! - `model`: Domain entities and value objects
//! - `ports`: Trait definitions for external dependencies (adapters)
//! - `addressing`: Content-addressed storage names
//! - `urls`: Public URL composition helpers
//! - `usecases`: Submission pipeline and listing pagination

pub mod addressing;
pub mod model;
pub mod ports;
pub mod urls;
pub mod usecases;

pub use model::*;
pub use ports::*;
