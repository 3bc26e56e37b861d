//! Geometric utilities for landmark normalization.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{validate_landmarks, LandmarkSet, PoseEstimate, Position3D};

/// 180° rotation about the X axis (Y and Z flipped)
fn flip_yz() -> Vector3<f64> {
    Vector3::new(1.0, -1.0, -1.0)
}

/// Bounding box in 3D space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox3D {
    pub min: Position3D,
    pub max: Position3D,
}

impl BoundingBox3D {
    pub fn new(min: Position3D, max: Position3D) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: &[Position3D]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let mut min = Position3D::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        let mut max = Position3D::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);

        for p in points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        Some(Self { min, max })
    }

    pub fn center(&self) -> Position3D {
        Position3D::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }
}

/// Arithmetic mean of a point cloud
pub fn centroid(points: &[Position3D]) -> Option<Position3D> {
    if points.is_empty() {
        return None;
    }

    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.to_vector());
    let mean = sum / points.len() as f64;
    Some(Position3D::new(mean.x, mean.y, mean.z))
}

/// Pose re-expressed in a viewer-friendly frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPose {
    /// Joints centred on their mean, flipped about X and vertically centred
    pub landmarks: LandmarkSet,
    /// Mean of the raw joints, in model space
    pub center: Position3D,
    /// Camera translation relative to `center`
    pub cam_t: Option<Position3D>,
}

/// Normalize a raw pose estimate.
///
/// Joints are translated so their mean sits at the origin, rotated 180° about
/// the X axis, then shifted along Y so the vertical extent is symmetric about
/// zero. All three steps are rigid, so pairwise distances are preserved.
pub fn normalize_pose(pose: &PoseEstimate) -> Result<NormalizedPose> {
    validate_landmarks(&pose.joints)?;

    // Non-empty after validation
    let center = centroid(&pose.joints).unwrap_or_else(Position3D::origin);
    let c = center.to_vector();
    let flip = flip_yz();

    let mut joints: Vec<Position3D> = pose
        .joints
        .iter()
        .map(|p| {
            let v = (p.to_vector() - c).component_mul(&flip);
            Position3D::new(v.x, v.y, v.z)
        })
        .collect();

    if let Some(bbox) = BoundingBox3D::from_points(&joints) {
        let offset = bbox.center().y;
        for p in &mut joints {
            p.y -= offset;
        }
    }

    let cam_t = pose.cam_t.map(|t| {
        let v = t.to_vector() - c;
        Position3D::new(v.x, v.y, v.z)
    });

    Ok(NormalizedPose {
        landmarks: LandmarkSet::new(joints)?,
        center,
        cam_t,
    })
}
