//! # Bodyform-Core
//!
//! Core types and utilities for the Bodyform anthropometric analysis and
//! training-plan system: the pose landmark topology, validated landmark sets,
//! identifiers and the shared error taxonomy.

pub mod error;
pub mod geometry;
pub mod landmarks;
pub mod types;

pub use error::{Error, Result};
pub use geometry::*;
pub use landmarks::*;
pub use types::*;
