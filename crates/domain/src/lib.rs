//! sentimind domain crate
//!
//! This crate contains the core domain logic following hexagonal architecture:
//! - `model`: Posts, detected categories and the category filter
//! - `ports`: Trait definitions for external dependencies (adapters)
//! - `palette`: Category display table
//! - `usecases`: Feed state, composer and rendering

pub mod model;
pub mod palette;
pub mod ports;
pub mod usecases;

pub use model::*;
pub use palette::{CategoryPalette, CategoryStyle};
pub use ports::*;
