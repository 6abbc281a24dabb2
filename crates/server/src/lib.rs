//! imagestream server library
//!
//! HTTP wiring around the domain pipeline: configuration, route
//! registration, content negotiation, and the minimal HTML views. The
//! binary in `main.rs` assembles real adapters; integration tests assemble
//! the same router over in-memory ones.

pub mod config;
pub mod negotiate;
pub mod routes;
pub mod state;
pub mod views;
