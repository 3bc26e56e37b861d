//! Per-image analysis records.

use bodyform_core::{ImageId, LandmarkSet, Position3D, Result, SubjectId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::measurements::{MeasurementExtractor, Measurements};
use crate::proportions::{ProportionCalculator, Proportions};

/// Immutable result of analyzing one subject image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub subject_id: SubjectId,
    pub image_id: ImageId,
    /// Landmarks kept for later visualization
    pub landmarks: LandmarkSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cam_t: Option<Position3D>,
    pub reference_height_cm: f64,
    /// Version of the landmark table the measurements were taken with
    pub landmark_table_version: u32,
    pub measurements: Measurements,
    pub proportions: Proportions,
    pub created_at: Timestamp,
}

/// Runs measurement extraction and proportion derivation as one step
#[derive(Debug, Clone, Default)]
pub struct AnthropometricAnalyzer {
    extractor: MeasurementExtractor,
    calculator: ProportionCalculator,
}

impl AnthropometricAnalyzer {
    pub fn new(extractor: MeasurementExtractor) -> Self {
        Self {
            extractor,
            calculator: ProportionCalculator::new(),
        }
    }

    pub fn extractor(&self) -> &MeasurementExtractor {
        &self.extractor
    }

    /// Measurements and proportions for a landmark set, without identity
    pub fn measure(&self, landmarks: &LandmarkSet, reference_height_cm: f64) -> Result<(Measurements, Proportions)> {
        let measurements = self.extractor.extract(landmarks.points(), reference_height_cm)?;
        let proportions = self.calculator.derive(&measurements);
        Ok((measurements, proportions))
    }

    /// Build a complete [`Analysis`]; nothing is produced on failure.
    pub fn analyze(
        &self,
        subject_id: SubjectId,
        image_id: ImageId,
        landmarks: LandmarkSet,
        cam_t: Option<Position3D>,
        reference_height_cm: f64,
    ) -> Result<Analysis> {
        let (measurements, proportions) = self.measure(&landmarks, reference_height_cm)?;

        tracing::debug!(
            subject = %subject_id,
            image = %image_id,
            height_cm = reference_height_cm,
            defined_ratios = proportions.defined_count(),
            "analysis computed"
        );

        Ok(Analysis {
            subject_id,
            image_id,
            landmarks,
            cam_t,
            reference_height_cm,
            landmark_table_version: self.extractor.table().version(),
            measurements,
            proportions,
            created_at: Timestamp::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurements::tests::t_pose;
    use bodyform_core::Error;

    #[test]
    fn test_analyze_populates_record() {
        let analyzer = AnthropometricAnalyzer::default();
        let landmarks = LandmarkSet::new(t_pose()).unwrap();
        let analysis = analyzer
            .analyze(SubjectId::new(), ImageId::new("img-1"), landmarks.clone(), None, 168.0)
            .unwrap();

        assert_eq!(analysis.landmarks, landmarks);
        assert_eq!(analysis.landmark_table_version, 1);
        assert!((analysis.measurements.height - 168.0).abs() < 1e-9);
        assert!(analysis.proportions.leg_to_height.is_some());
    }

    #[test]
    fn test_analyze_rejects_bad_height() {
        let analyzer = AnthropometricAnalyzer::default();
        let landmarks = LandmarkSet::new(t_pose()).unwrap();
        let err = analyzer
            .analyze(SubjectId::new(), ImageId::new("img-1"), landmarks, None, 0.0)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_analysis_json_shape() {
        let analyzer = AnthropometricAnalyzer::default();
        let analysis = analyzer
            .analyze(
                SubjectId::new(),
                ImageId::new("img-2"),
                LandmarkSet::new(t_pose()).unwrap(),
                Some(Position3D::new(0.0, 0.1, 12.0)),
                181.0,
            )
            .unwrap();

        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["landmarks"].as_array().map(Vec::len), Some(44));
        assert_eq!(json["referenceHeightCm"].as_f64(), Some(181.0));
        assert!(json["measurements"]["shoulderWidth"].is_number());
        assert!(json["proportions"]["legToHeight"].is_number());
        assert!(json["camT"].is_object());
    }
}
