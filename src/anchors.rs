//! Virtual anchors: the three reference points authored in the scene.
//!
//! Anchors are stored in the governed frame's local coordinates, so they move
//! with the frame as calibration translates and rotates it.

use crate::transform::RigidTransform;
use crate::Vector3;

/// Number of anchor points (and the maximum number of calibration steps).
pub const NUM_ANCHORS: usize = 3;

/// Fixed triple of virtual anchor positions (V1, V2, V3).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualAnchors {
    points: [Vector3; NUM_ANCHORS],
}

impl VirtualAnchors {
    /// Anchors given in the governed frame's local coordinates.
    pub fn new(v1: Vector3, v2: Vector3, v3: Vector3) -> Self {
        Self {
            points: [v1, v2, v3],
        }
    }

    /// Anchors authored in world space while the frame sits at `frame`.
    pub fn from_world(frame: &RigidTransform, v1: Vector3, v2: Vector3, v3: Vector3) -> Self {
        Self::new(
            frame.inverse_transform_point(&v1),
            frame.inverse_transform_point(&v2),
            frame.inverse_transform_point(&v3),
        )
    }

    /// Local position of anchor `index` (0-based). Panics if `index >= 3`.
    pub fn anchor(&self, index: usize) -> Vector3 {
        self.points[index]
    }

    /// Current world position of anchor `index` under `frame`. Panics if `index >= 3`.
    pub fn world_position(&self, frame: &RigidTransform, index: usize) -> Vector3 {
        frame.transform_point(&self.points[index])
    }

    /// Current world positions of all three anchors under `frame`.
    pub fn world_positions(&self, frame: &RigidTransform) -> [Vector3; NUM_ANCHORS] {
        self.points.map(|p| frame.transform_point(&p))
    }
}
