//! # Bodyform-Plan
//!
//! Weekly exercise plans from an aggregate body profile.
//!
//! ## Flow
//!
//! ```text
//! AggregateProfile.proportions
//!     ↓
//! [RuleSet]            threshold rules → weighted priorities
//!     ↓
//! [PlanSynthesizer]    priorities + ExerciseCatalog → WeeklyPlan
//! ```
//!
//! Rules and catalog are plain data and can be loaded from configuration.

pub mod catalog;
pub mod rules;
pub mod synthesizer;

pub use catalog::*;
pub use rules::*;
pub use synthesizer::*;
