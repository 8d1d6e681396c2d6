//! sentimind adapters crate
//!
//! This crate contains infrastructure adapters implementing the domain ports:
//! - `rest`: HTTP client for the classification-backed feed API
//! - `memory`: In-memory feed service for offline mode and tests

pub mod memory;
pub mod rest;

pub use memory::InMemoryPostService;
pub use rest::RestPostService;
