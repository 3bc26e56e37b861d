//! # Bodyform-API
//!
//! Service layer around the anthropometry and planning pipeline.
//!
//! ## Operations
//!
//! - `analyze_image`: pose → normalized landmarks → measurements and
//!   proportions → stored `Analysis` (once per image)
//! - `generate_plan`: stored analyses → aggregate profile → weekly plan →
//!   stored `WorkoutRecord`
//! - `list_plans`: a subject's workout records, newest first
//!
//! Storage sits behind the [`RecordStore`] trait; [`InMemoryStore`] is the
//! bundled implementation.

pub mod config;
pub mod service;
pub mod store;
pub mod telemetry;

pub use config::*;
pub use service::*;
pub use store::*;
