//! Subject-level averaging of analyses.

use bodyform_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::analysis::Analysis;
use crate::measurements::{Measurement, Measurements};
use crate::proportions::{Proportions, Ratio};

/// Denominator used when a field is missing from some analyses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AveragingPolicy {
    /// Divide by the total number of analyses; a missing value counts as zero.
    #[default]
    TotalCount,
    /// Divide by the number of analyses that define the field.
    DefinedCount,
}

/// Averaged measurements and proportions over a subject's analyses
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateProfile {
    pub measurements: Measurements,
    pub proportions: Proportions,
    pub source_count: usize,
}

impl AggregateProfile {
    /// Profile built directly from proportions, with zeroed measurements
    pub fn from_proportions(proportions: Proportions) -> Self {
        Self {
            measurements: Measurements::default(),
            proportions,
            source_count: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AggregationEngine {
    policy: AveragingPolicy,
}

impl AggregationEngine {
    pub fn new(policy: AveragingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> AveragingPolicy {
        self.policy
    }

    /// Average every measurement and proportion field independently.
    ///
    /// Values are summed in ascending order, so any permutation of `analyses`
    /// yields a bit-identical profile. A ratio that no analysis defines stays
    /// undefined under either policy.
    pub fn aggregate(&self, analyses: &[Analysis]) -> Result<AggregateProfile> {
        if analyses.is_empty() {
            return Err(Error::NoData);
        }
        let total = analyses.len();

        let mut measurements = Measurements::default();
        for field in Measurement::ALL {
            let mut values: Vec<f64> = analyses.iter().map(|a| a.measurements.get(field)).collect();
            measurements.set(field, ordered_sum(&mut values) / total as f64);
        }

        let mut proportions = Proportions::default();
        for ratio in Ratio::ALL {
            let mut values: Vec<f64> = analyses.iter().filter_map(|a| a.proportions.get(ratio)).collect();
            if values.is_empty() {
                continue;
            }

            let denominator = match self.policy {
                AveragingPolicy::TotalCount => total,
                AveragingPolicy::DefinedCount => values.len(),
            };
            proportions.set(ratio, Some(ordered_sum(&mut values) / denominator as f64));
        }

        tracing::debug!(
            sources = total,
            policy = ?self.policy,
            "aggregated subject profile"
        );

        Ok(AggregateProfile {
            measurements,
            proportions,
            source_count: total,
        })
    }
}

fn ordered_sum(values: &mut [f64]) -> f64 {
    values.sort_by(f64::total_cmp);
    values.iter().sum()
}

/// Aggregate with the default (total-count) policy.
pub fn aggregate(analyses: &[Analysis]) -> Result<AggregateProfile> {
    AggregationEngine::default().aggregate(analyses)
}
