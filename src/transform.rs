//! Rigid transform (position + orientation, no scale) governing the calibrated frame.
//!
//! A point `v` expressed in the governed frame's local coordinates lands in world
//! space at `position + orientation * v`. Calibration mutates this transform in place.
//!
//! # Pivot rotation
//!
//! Rotating a transform by `R` about an external pivot `c` keeps `c` fixed:
//!
//! ```text
//! position'    = c + R * (position - c)
//! orientation' = R * orientation
//! ```

use crate::{Quaternion, Vector3};

/// Placement of a frame in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidTransform {
    /// World-space position of the frame origin.
    pub position: Vector3,
    /// Rotation from frame-local axes to world axes.
    pub orientation: Quaternion,
}

impl RigidTransform {
    /// Identity transform: origin at world origin, no rotation.
    pub fn identity() -> Self {
        Self {
            position: Vector3::zeros(),
            orientation: Quaternion::identity(),
        }
    }

    /// Transform at `position` with orientation reset to identity.
    pub fn with_origin(position: Vector3) -> Self {
        Self {
            position,
            orientation: Quaternion::identity(),
        }
    }

    /// Map a frame-local point into world space.
    pub fn transform_point(&self, local: &Vector3) -> Vector3 {
        self.position + self.orientation * local
    }

    /// Map a world-space point into frame-local coordinates.
    pub fn inverse_transform_point(&self, world: &Vector3) -> Vector3 {
        self.orientation.inverse() * (world - self.position)
    }

    /// Translate in world space. Orientation is untouched.
    pub fn translate_world(&mut self, translation: &Vector3) {
        self.position += translation;
    }

    /// Rotate by `rotation` about the world-space `pivot`, holding the pivot fixed.
    pub fn rotate_about(&mut self, pivot: &Vector3, rotation: &Quaternion) {
        self.position = pivot + rotation * (self.position - pivot);
        self.orientation = rotation * self.orientation;
    }
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::identity()
    }
}
