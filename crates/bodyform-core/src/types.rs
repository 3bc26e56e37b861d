//! Fundamental types for the Bodyform system.

use std::fmt;

use chrono::{DateTime, Utc};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::landmarks::{Landmark, LandmarkTable, LANDMARK_COUNT};

/// Unique identifier for a subject (the person whose images are analyzed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectId(pub Uuid);

impl SubjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a hyphenated RFC 4122 UUID (versions 1 through 5).
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.len() != 36 {
            return Err(Error::InvalidSubjectId(raw.to_string()));
        }

        let uuid = Uuid::parse_str(raw).map_err(|_| Error::InvalidSubjectId(raw.to_string()))?;

        let version_ok = (1..=5).contains(&uuid.get_version_num());
        let variant_ok = uuid.get_variant() == uuid::Variant::RFC4122;
        if !version_ok || !variant_ok {
            return Err(Error::InvalidSubjectId(raw.to_string()));
        }

        Ok(Self(uuid))
    }
}

impl Default for SubjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Identifier of one uploaded subject image
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ImageId(pub String);

impl ImageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Timestamp wrapper with nanosecond precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now().timestamp_nanos_opt().unwrap_or(0))
    }

    pub fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    pub fn as_nanos(&self) -> i64 {
        self.0
    }

    pub fn to_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_nanos(self.0)
    }
}

/// 3D point in pose-model coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn from_array(xyz: [f64; 3]) -> Self {
        Self::new(xyz[0], xyz[1], xyz[2])
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn to_nalgebra(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }

    pub fn from_nalgebra(p: Point3<f64>) -> Self {
        Self::new(p.x, p.y, p.z)
    }

    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Validate a raw landmark sequence against the fixed topology.
pub fn validate_landmarks(points: &[Position3D]) -> Result<()> {
    if points.len() != LANDMARK_COUNT {
        return Err(Error::InvalidInput(format!(
            "expected {} landmarks, got {}",
            LANDMARK_COUNT,
            points.len()
        )));
    }

    if let Some(idx) = points.iter().position(|p| !p.is_finite()) {
        return Err(Error::InvalidInput(format!(
            "landmark {} has a non-finite coordinate",
            idx
        )));
    }

    Ok(())
}

/// Immutable, validated set of exactly [`LANDMARK_COUNT`] body landmarks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Position3D>", into = "Vec<Position3D>")]
pub struct LandmarkSet {
    points: Vec<Position3D>,
}

impl LandmarkSet {
    pub fn new(points: Vec<Position3D>) -> Result<Self> {
        validate_landmarks(&points)?;
        Ok(Self { points })
    }

    pub fn from_arrays(points: &[[f64; 3]]) -> Result<Self> {
        Self::new(points.iter().copied().map(Position3D::from_array).collect())
    }

    pub fn points(&self) -> &[Position3D] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Resolve a named landmark through a topology table.
    pub fn get(&self, table: &LandmarkTable, landmark: Landmark) -> Position3D {
        self.points[table.index(landmark)]
    }
}

impl TryFrom<Vec<Position3D>> for LandmarkSet {
    type Error = Error;

    fn try_from(points: Vec<Position3D>) -> Result<Self> {
        Self::new(points)
    }
}

impl From<LandmarkSet> for Vec<Position3D> {
    fn from(set: LandmarkSet) -> Self {
        set.points
    }
}

/// Raw output of the external pose-estimation service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoseEstimate {
    /// Joint positions in model space
    pub joints: Vec<Position3D>,
    /// Camera translation, when the service reports one
    pub cam_t: Option<Position3D>,
}

impl PoseEstimate {
    pub fn new(joints: Vec<Position3D>, cam_t: Option<Position3D>) -> Self {
        Self { joints, cam_t }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(n: usize) -> Vec<Position3D> {
        (0..n).map(|i| Position3D::new(i as f64, 0.0, 0.0)).collect()
    }

    #[test]
    fn test_position_distance() {
        let p1 = Position3D::new(0.0, 0.0, 0.0);
        let p2 = Position3D::new(3.0, 4.0, 0.0);
        assert!((p1.distance_to(&p2) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_landmark_set_requires_exact_count() {
        assert!(LandmarkSet::new(points(LANDMARK_COUNT)).is_ok());
        assert!(matches!(
            LandmarkSet::new(points(LANDMARK_COUNT - 1)),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            LandmarkSet::new(points(LANDMARK_COUNT + 1)),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_landmark_set_rejects_nan() {
        let mut pts = points(LANDMARK_COUNT);
        pts[7].y = f64::NAN;
        assert!(matches!(LandmarkSet::new(pts), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_landmark_set_deserialize_validates() {
        let short = serde_json::to_string(&points(43)).unwrap();
        assert!(serde_json::from_str::<LandmarkSet>(&short).is_err());

        let full = serde_json::to_string(&points(LANDMARK_COUNT)).unwrap();
        let set: LandmarkSet = serde_json::from_str(&full).unwrap();
        assert_eq!(set.len(), LANDMARK_COUNT);
    }

    #[test]
    fn test_subject_id_parse() {
        let id = SubjectId::new();
        assert_eq!(SubjectId::parse(&id.to_string()).unwrap(), id);

        assert!(SubjectId::parse("not-a-uuid").is_err());
        // Version nibble 0 is outside the accepted 1..=5 range
        assert!(SubjectId::parse("123e4567-e89b-02d3-a456-426614174000").is_err());
        // Variant must be 10xx
        assert!(SubjectId::parse("123e4567-e89b-42d3-c456-426614174000").is_err());
        // Simple (unhyphenated) form is rejected
        assert!(SubjectId::parse("123e4567e89b42d3a456426614174000").is_err());
    }
}
