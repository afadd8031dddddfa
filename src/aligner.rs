//! Frame aligner: the three-step procedure that superimposes the virtual frame
//! onto the physical one.
//!
//! 1. **Translation** — move the frame so V1 lands exactly on the first sample.
//! 2. **First rotation** — about the placed V1, rotate the V1→V2 direction onto
//!    the V1→p2 direction.
//! 3. **Second rotation** — same technique for V1→V3 and V1→p3. Because V1→V2 is
//!    already aligned this acts mostly as a roll about that axis, but it is a
//!    plain shortest-arc rotation and does not re-check the step-2 alignment.
//!
//! Each step reads the anchors' *current* world positions, so step `i` depends on
//! every earlier step. Steps run strictly in order and at most once each.

use tracing::debug;

use crate::anchors::{VirtualAnchors, NUM_ANCHORS};
use crate::error::{CalibrationError, Direction};
use crate::transform::RigidTransform;
use crate::{Quaternion, Vector3};

/// Directions shorter than this are treated as zero-length.
pub const DEGENERATE_EPSILON: f64 = 1e-9;

/// Shortest-arc rotation taking `virtual_dir` onto `physical_dir`.
///
/// `step` is the 1-based step number reported in errors. Parallel directions give
/// the identity; zero-length, non-finite or antiparallel directions are rejected.
pub fn shortest_arc(
    step: usize,
    virtual_dir: &Vector3,
    physical_dir: &Vector3,
) -> Result<Quaternion, CalibrationError> {
    // Negated so NaN norms count as zero-length
    if !(virtual_dir.norm() >= DEGENERATE_EPSILON) {
        return Err(CalibrationError::ZeroLengthDirection {
            step,
            which: Direction::Virtual,
        });
    }
    if !(physical_dir.norm() >= DEGENERATE_EPSILON) {
        return Err(CalibrationError::ZeroLengthDirection {
            step,
            which: Direction::Physical,
        });
    }
    Quaternion::rotation_between(virtual_dir, physical_dir)
        .ok_or(CalibrationError::AntiparallelDirections { step })
}

fn check_finite(step: usize, sample: &Vector3) -> Result<(), CalibrationError> {
    if sample.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(CalibrationError::NonFiniteSample { step })
    }
}

/// Owns the governed transform and mutates it one calibration step at a time.
#[derive(Debug, Clone)]
pub struct FrameAligner {
    anchors: VirtualAnchors,
    transform: RigidTransform,
    steps_applied: usize,
}

impl FrameAligner {
    /// Start aligning `anchors`, with the governed frame initially at `transform`.
    pub fn new(anchors: VirtualAnchors, transform: RigidTransform) -> Self {
        Self {
            anchors,
            transform,
            steps_applied: 0,
        }
    }

    pub fn anchors(&self) -> &VirtualAnchors {
        &self.anchors
    }

    /// The governed transform in its current state.
    pub fn transform(&self) -> &RigidTransform {
        &self.transform
    }

    /// Write access for the host, e.g. to reposition the frame before calibrating.
    pub fn transform_mut(&mut self) -> &mut RigidTransform {
        &mut self.transform
    }

    /// Number of steps applied so far (0..=3).
    pub fn steps_applied(&self) -> usize {
        self.steps_applied
    }

    /// Current world position of anchor `index` (0-based). Panics if `index >= 3`.
    pub fn anchor_world(&self, index: usize) -> Vector3 {
        self.anchors.world_position(&self.transform, index)
    }

    /// Apply step `index` (0-based), dispatching to the matching step function.
    pub fn align_step(&mut self, index: usize, sample: &Vector3) -> Result<(), CalibrationError> {
        match index {
            0 => self.align_step1(sample),
            1 => self.align_step2(sample),
            2 => self.align_step3(sample),
            _ => Err(CalibrationError::Exhausted),
        }
    }

    /// Translation step: place V1 exactly on `p1`.
    pub fn align_step1(&mut self, p1: &Vector3) -> Result<(), CalibrationError> {
        self.check_next(1)?;
        check_finite(1, p1)?;
        let translation = p1 - self.anchor_world(0);
        self.transform.translate_world(&translation);
        self.steps_applied = 1;
        debug!(
            "Step 1: translated by [{:.4}, {:.4}, {:.4}]",
            translation.x, translation.y, translation.z
        );
        Ok(())
    }

    /// First rotation: align V1→V2 with V1→`p2`, pivoting about V1.
    pub fn align_step2(&mut self, p2: &Vector3) -> Result<(), CalibrationError> {
        self.check_next(2)?;
        check_finite(2, p2)?;
        self.rotate_toward(2, 1, p2)
    }

    /// Second rotation: align V1→V3 with V1→`p3`, pivoting about V1.
    pub fn align_step3(&mut self, p3: &Vector3) -> Result<(), CalibrationError> {
        self.check_next(3)?;
        check_finite(3, p3)?;
        self.rotate_toward(3, 2, p3)
    }

    fn check_next(&self, requested: usize) -> Result<(), CalibrationError> {
        if self.steps_applied >= NUM_ANCHORS {
            return Err(CalibrationError::Exhausted);
        }
        let expected = self.steps_applied + 1;
        if requested != expected {
            return Err(CalibrationError::OutOfOrder {
                expected,
                requested,
            });
        }
        Ok(())
    }

    /// Rotate about the placed V1 so that the direction towards anchor `anchor`
    /// matches the direction towards `sample`. Nothing is mutated on error.
    fn rotate_toward(
        &mut self,
        step: usize,
        anchor: usize,
        sample: &Vector3,
    ) -> Result<(), CalibrationError> {
        let pivot = self.anchor_world(0);
        let virtual_dir = pivot - self.anchor_world(anchor);
        let physical_dir = pivot - sample;

        let rotation = shortest_arc(step, &virtual_dir, &physical_dir)?;
        self.transform.rotate_about(&pivot, &rotation);
        self.steps_applied = step;
        debug!(
            "Step {}: rotated {:.4} deg about pivot [{:.4}, {:.4}, {:.4}]",
            step,
            rotation.angle().to_degrees(),
            pivot.x,
            pivot.y,
            pivot.z
        );
        Ok(())
    }
}
