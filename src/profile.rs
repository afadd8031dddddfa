//! Calibration profile: a saved calibration result that can be reapplied later
//! without repeating the capture, serialized with rkyv.

use rkyv::{Archive, Deserialize, Serialize};
use tracing::info;

use crate::anchors::NUM_ANCHORS;
use crate::transform::RigidTransform;
use crate::{Quaternion, Vector3};

/// Snapshot of a completed calibration.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
pub struct CalibrationProfile {
    /// Frame position in world space [x, y, z].
    pub position: [f64; 3],
    /// Frame orientation as a quaternion [i, j, k, w].
    pub orientation: [f64; 4],
    /// Number of points the calibration used (1-3).
    pub points_used: u8,
}

impl CalibrationProfile {
    pub fn new(transform: &RigidTransform, points_used: u8) -> Self {
        let p = transform.position;
        let q = transform.orientation.quaternion().coords;
        Self {
            position: [p.x, p.y, p.z],
            orientation: [q.x, q.y, q.z, q.w],
            points_used,
        }
    }

    /// Rebuild the calibrated transform. The stored quaternion is renormalized.
    pub fn transform(&self) -> RigidTransform {
        let [x, y, z] = self.position;
        let [i, j, k, w] = self.orientation;
        RigidTransform {
            position: Vector3::new(x, y, z),
            orientation: Quaternion::from_quaternion(nalgebra::Quaternion::new(w, i, j, k)),
        }
    }

    /// Serialize the profile to bytes using rkyv.
    pub fn to_rkyv_bytes(&self) -> Vec<u8> {
        rkyv::to_bytes::<rkyv::rancor::Error>(self)
            .expect("rkyv serialization failed")
            .to_vec()
    }

    /// Deserialize and validate a profile from rkyv bytes.
    pub fn from_rkyv_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        // Archived f64 fields need aligned input
        let mut aligned = rkyv::util::AlignedVec::<16>::with_capacity(bytes.len());
        aligned.extend_from_slice(bytes);
        let profile = rkyv::from_bytes::<Self, rkyv::rancor::Error>(&aligned)
            .map_err(|e| anyhow::anyhow!("rkyv deserialization failed: {}", e))?;
        anyhow::ensure!(
            (1..=NUM_ANCHORS as u8).contains(&profile.points_used),
            "profile reports {} points used, expected 1-{}",
            profile.points_used,
            NUM_ANCHORS
        );
        anyhow::ensure!(
            profile.position.iter().all(|c| c.is_finite()),
            "profile position is not finite: {:?}",
            profile.position
        );
        let norm = profile.orientation.iter().map(|c| c * c).sum::<f64>().sqrt();
        anyhow::ensure!(
            norm.is_finite() && norm > 1e-9,
            "profile orientation is not a valid rotation (norm {})",
            norm
        );
        Ok(profile)
    }

    /// Save the profile to a file using rkyv.
    pub fn save_to_file(&self, path: &str) -> anyhow::Result<()> {
        let bytes = self.to_rkyv_bytes();
        std::fs::write(path, &bytes)?;
        info!("Saved calibration profile to {} ({} bytes)", path, bytes.len());
        Ok(())
    }

    /// Load a profile from an rkyv file.
    pub fn load_from_file(path: &str) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path)?;
        let profile = Self::from_rkyv_bytes(&bytes)?;
        info!(
            "Loaded calibration profile: {} points, position [{:.4}, {:.4}, {:.4}]",
            profile.points_used, profile.position[0], profile.position[1], profile.position[2]
        );
        Ok(profile)
    }
}
