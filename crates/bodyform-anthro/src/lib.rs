//! # Bodyform-Anthro
//!
//! Anthropometry from pose landmarks.
//!
//! ## Pipeline
//!
//! 1. **Measurements**: model-space distances between named landmarks,
//!    calibrated to centimeters with the subject's known height
//! 2. **Proportions**: 21 dimensionless ratios between measurements
//! 3. **Analysis**: one immutable record per subject image
//! 4. **Aggregation**: subject-level averages over every analysis
//!
//! Every stage is a pure function of its inputs.

pub mod aggregate;
pub mod analysis;
pub mod measurements;
pub mod proportions;

pub use aggregate::*;
pub use analysis::*;
pub use measurements::*;
pub use proportions::*;
