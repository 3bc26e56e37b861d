//! Linear body measurements derived from pose landmarks.
//!
//! Distances are first taken in the pose model's native units, then scaled to
//! centimeters using the operator-supplied standing height as the single
//! calibration reference.

use bodyform_core::{validate_landmarks, Error, Landmark, LandmarkTable, Position3D, Result};
use serde::{Deserialize, Serialize};

/// Model heights at or below this are treated as degenerate
pub const DEFAULT_MIN_MODEL_HEIGHT: f64 = 1e-6;

/// Named linear quantity in a [`Measurements`] record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Measurement {
    Height,
    Torso,
    Leg,
    UpperLeg,
    LowerLeg,
    Arm,
    UpperArm,
    Forearm,
    ShoulderWidth,
    HipWidth,
    ArmSpan,
    Chest,
    Waist,
    Thigh,
    Calf,
}

impl Measurement {
    pub const COUNT: usize = 15;

    pub const ALL: [Measurement; Measurement::COUNT] = [
        Measurement::Height,
        Measurement::Torso,
        Measurement::Leg,
        Measurement::UpperLeg,
        Measurement::LowerLeg,
        Measurement::Arm,
        Measurement::UpperArm,
        Measurement::Forearm,
        Measurement::ShoulderWidth,
        Measurement::HipWidth,
        Measurement::ArmSpan,
        Measurement::Chest,
        Measurement::Waist,
        Measurement::Thigh,
        Measurement::Calf,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Measurement::Height => "height",
            Measurement::Torso => "torso",
            Measurement::Leg => "leg",
            Measurement::UpperLeg => "upperLeg",
            Measurement::LowerLeg => "lowerLeg",
            Measurement::Arm => "arm",
            Measurement::UpperArm => "upperArm",
            Measurement::Forearm => "forearm",
            Measurement::ShoulderWidth => "shoulderWidth",
            Measurement::HipWidth => "hipWidth",
            Measurement::ArmSpan => "armSpan",
            Measurement::Chest => "chest",
            Measurement::Waist => "waist",
            Measurement::Thigh => "thigh",
            Measurement::Calf => "calf",
        }
    }
}

/// Fifteen linear measurements, in centimeters once scaled
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurements {
    pub height: f64,
    pub torso: f64,
    pub leg: f64,
    pub upper_leg: f64,
    pub lower_leg: f64,
    pub arm: f64,
    pub upper_arm: f64,
    pub forearm: f64,
    pub shoulder_width: f64,
    pub hip_width: f64,
    pub arm_span: f64,
    pub chest: f64,
    pub waist: f64,
    pub thigh: f64,
    pub calf: f64,
}

impl Measurements {
    pub fn get(&self, field: Measurement) -> f64 {
        match field {
            Measurement::Height => self.height,
            Measurement::Torso => self.torso,
            Measurement::Leg => self.leg,
            Measurement::UpperLeg => self.upper_leg,
            Measurement::LowerLeg => self.lower_leg,
            Measurement::Arm => self.arm,
            Measurement::UpperArm => self.upper_arm,
            Measurement::Forearm => self.forearm,
            Measurement::ShoulderWidth => self.shoulder_width,
            Measurement::HipWidth => self.hip_width,
            Measurement::ArmSpan => self.arm_span,
            Measurement::Chest => self.chest,
            Measurement::Waist => self.waist,
            Measurement::Thigh => self.thigh,
            Measurement::Calf => self.calf,
        }
    }

    pub fn set(&mut self, field: Measurement, value: f64) {
        let slot = match field {
            Measurement::Height => &mut self.height,
            Measurement::Torso => &mut self.torso,
            Measurement::Leg => &mut self.leg,
            Measurement::UpperLeg => &mut self.upper_leg,
            Measurement::LowerLeg => &mut self.lower_leg,
            Measurement::Arm => &mut self.arm,
            Measurement::UpperArm => &mut self.upper_arm,
            Measurement::Forearm => &mut self.forearm,
            Measurement::ShoulderWidth => &mut self.shoulder_width,
            Measurement::HipWidth => &mut self.hip_width,
            Measurement::ArmSpan => &mut self.arm_span,
            Measurement::Chest => &mut self.chest,
            Measurement::Waist => &mut self.waist,
            Measurement::Thigh => &mut self.thigh,
            Measurement::Calf => &mut self.calf,
        };
        *slot = value;
    }

    /// Multiply every quantity by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        let mut out = *self;
        for field in Measurement::ALL {
            out.set(field, self.get(field) * factor);
        }
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = (Measurement, f64)> + '_ {
        Measurement::ALL.iter().map(move |&f| (f, self.get(f)))
    }
}

/// Converts landmark coordinates into calibrated body measurements
#[derive(Debug, Clone)]
pub struct MeasurementExtractor {
    table: &'static LandmarkTable,
    min_model_height: f64,
}

impl MeasurementExtractor {
    pub fn new(table: &'static LandmarkTable) -> Self {
        Self {
            table,
            min_model_height: DEFAULT_MIN_MODEL_HEIGHT,
        }
    }

    pub fn with_min_model_height(mut self, min_model_height: f64) -> Self {
        self.min_model_height = min_model_height;
        self
    }

    pub fn table(&self) -> &'static LandmarkTable {
        self.table
    }

    /// Measure a landmark array and calibrate it to `reference_height_cm`.
    ///
    /// Height is always taken from head top to the *left* heel; the right heel
    /// only contributes to leg lengths.
    pub fn extract(&self, landmarks: &[Position3D], reference_height_cm: f64) -> Result<Measurements> {
        validate_landmarks(landmarks)?;
        if !(reference_height_cm.is_finite() && reference_height_cm > 0.0) {
            return Err(Error::InvalidInput(format!(
                "reference height must be a positive number of centimeters, got {}",
                reference_height_cm
            )));
        }

        let raw = self.model_space(landmarks);
        if raw.height <= self.min_model_height {
            return Err(Error::DegenerateGeometry {
                model_height: raw.height,
            });
        }

        let scale_factor = reference_height_cm / raw.height;
        let mut scaled = raw.scaled(scale_factor);
        scaled.height = reference_height_cm;

        tracing::trace!(
            model_height = raw.height,
            scale_factor,
            "calibrated landmark measurements"
        );

        Ok(scaled)
    }

    /// Uncalibrated distances in the pose model's units
    pub fn model_space(&self, landmarks: &[Position3D]) -> Measurements {
        let at = |lm: Landmark| landmarks[self.table.index(lm)];
        let d = |a: Landmark, b: Landmark| at(a).distance_to(&at(b));

        let left_upper_leg = d(Landmark::LeftHip, Landmark::LeftKnee);
        let right_upper_leg = d(Landmark::RightHip, Landmark::RightKnee);
        let left_lower_leg = d(Landmark::LeftKnee, Landmark::LeftHeel);
        let right_lower_leg = d(Landmark::RightKnee, Landmark::RightHeel);

        let upper_leg = mean2(left_upper_leg, right_upper_leg);
        let lower_leg = mean2(left_lower_leg, right_lower_leg);
        let shoulder_width = d(Landmark::LeftShoulder, Landmark::RightShoulder);
        let hip_width = d(Landmark::LeftHip, Landmark::RightHip);

        Measurements {
            height: d(Landmark::HeadTop, Landmark::LeftHeel),
            torso: d(Landmark::Neck, Landmark::Pelvis),
            leg: mean2(
                left_upper_leg + left_lower_leg,
                right_upper_leg + right_lower_leg,
            ),
            upper_leg,
            lower_leg,
            arm: mean2(
                d(Landmark::LeftShoulder, Landmark::LeftWrist),
                d(Landmark::RightShoulder, Landmark::RightWrist),
            ),
            upper_arm: mean2(
                d(Landmark::LeftShoulder, Landmark::LeftElbow),
                d(Landmark::RightShoulder, Landmark::RightElbow),
            ),
            forearm: mean2(
                d(Landmark::LeftElbow, Landmark::LeftWrist),
                d(Landmark::RightElbow, Landmark::RightWrist),
            ),
            shoulder_width,
            hip_width,
            arm_span: d(Landmark::LeftWrist, Landmark::RightWrist),
            chest: shoulder_width,
            waist: hip_width,
            thigh: upper_leg,
            calf: lower_leg,
        }
    }
}

impl Default for MeasurementExtractor {
    fn default() -> Self {
        Self::new(LandmarkTable::current())
    }
}

fn mean2(a: f64, b: f64) -> f64 {
    (a + b) / 2.0
}

/// Extract measurements with the current landmark table and default tolerances.
pub fn extract_measurements(landmarks: &[Position3D], reference_height_cm: f64) -> Result<Measurements> {
    MeasurementExtractor::default().extract(landmarks, reference_height_cm)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use bodyform_core::LANDMARK_COUNT;

    /// Upright T-pose roughly 1.7 model units tall, facing +Z.
    pub(crate) fn t_pose() -> Vec<Position3D> {
        let table = LandmarkTable::current();
        let mut points = vec![Position3D::new(0.0, 0.9, 0.0); LANDMARK_COUNT];
        let mut put = |lm: Landmark, x: f64, y: f64| {
            points[table.index(lm)] = Position3D::new(x, y, 0.0);
        };

        put(Landmark::HeadTop, 0.0, 1.70);
        put(Landmark::Neck, 0.0, 1.45);
        put(Landmark::Pelvis, 0.0, 0.95);
        put(Landmark::LeftShoulder, 0.20, 1.42);
        put(Landmark::RightShoulder, -0.20, 1.42);
        put(Landmark::LeftElbow, 0.48, 1.42);
        put(Landmark::RightElbow, -0.48, 1.42);
        put(Landmark::LeftWrist, 0.74, 1.42);
        put(Landmark::RightWrist, -0.74, 1.42);
        put(Landmark::LeftHip, 0.15, 0.92);
        put(Landmark::RightHip, -0.15, 0.92);
        put(Landmark::LeftKnee, 0.15, 0.48);
        put(Landmark::RightKnee, -0.15, 0.48);
        put(Landmark::LeftHeel, 0.15, 0.0);
        put(Landmark::RightHeel, -0.15, 0.0);

        points
    }

    #[test]
    fn test_height_equals_reference() {
        for h in [150.0, 172.5, 201.3] {
            let m = extract_measurements(&t_pose(), h).unwrap();
            assert!((m.height - h).abs() < 1e-9);
        }
    }

    #[test]
    fn test_scaled_values() {
        let m = extract_measurements(&t_pose(), 170.0).unwrap();
        let model_height = (0.15f64.powi(2) + 1.70f64.powi(2)).sqrt();
        let k = 170.0 / model_height;

        assert!((m.shoulder_width - 0.40 * k).abs() < 1e-9);
        assert!((m.chest - m.shoulder_width).abs() < 1e-12);
        assert!((m.waist - m.hip_width).abs() < 1e-12);
        assert!((m.upper_leg - 0.44 * k).abs() < 1e-9);
        assert!((m.lower_leg - 0.48 * k).abs() < 1e-9);
        assert!((m.leg - 0.92 * k).abs() < 1e-9);
        assert!((m.arm_span - 1.48 * k).abs() < 1e-9);
        assert!((m.forearm - 0.26 * k).abs() < 1e-9);
        assert!(m.iter().all(|(_, v)| v > 0.0));
    }

    #[test]
    fn test_rejects_wrong_landmark_count() {
        let mut points = t_pose();
        points.pop();
        let err = extract_measurements(&points, 170.0).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_non_positive_height() {
        for h in [0.0, -10.0, f64::NAN] {
            let err = extract_measurements(&t_pose(), h).unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)));
        }
    }

    #[test]
    fn test_degenerate_geometry() {
        let points = vec![Position3D::new(0.5, 0.5, 0.5); LANDMARK_COUNT];
        let err = extract_measurements(&points, 170.0).unwrap_err();
        assert!(matches!(err, Error::DegenerateGeometry { .. }));
    }

    #[test]
    fn test_get_set_cover_every_field() {
        let mut m = Measurements::default();
        for (i, field) in Measurement::ALL.iter().enumerate() {
            m.set(*field, i as f64 + 1.0);
        }
        for (i, field) in Measurement::ALL.iter().enumerate() {
            assert_eq!(m.get(*field), i as f64 + 1.0);
        }
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(Measurements::default()).unwrap();
        for field in Measurement::ALL {
            assert!(json.get(field.name()).is_some(), "missing {}", field.name());
        }
    }
}
