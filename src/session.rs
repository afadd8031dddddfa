//! Calibration session: collects physical samples and drives the frame aligner.
//!
//! The session is a small state machine over the number of accepted samples:
//!
//! ```text
//! Collecting(0) --submit--> Collecting(1) --submit--> ... --submit--> Calibrated
//! ```
//!
//! It moves to `Calibrated` once the requested number of points (1-3) has been
//! accepted, and from then on ignores every further event.

use tracing::{debug, info, warn};

use crate::aligner::FrameAligner;
use crate::anchors::{VirtualAnchors, NUM_ANCHORS};
use crate::error::CalibrationError;
use crate::profile::CalibrationProfile;
use crate::transform::RigidTransform;
use crate::trigger::TriggerSource;
use crate::Vector3;

/// Session configuration.
#[derive(Debug, Clone)]
pub struct CalibrationConfig {
    /// Number of points to calibrate, in [1, 3]. Default 3.
    pub requested_point_count: u8,
    /// Where the governed frame starts. Its orientation always starts at identity.
    /// Default origin.
    pub initial_position: Vector3,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            requested_point_count: 3,
            initial_position: Vector3::zeros(),
        }
    }
}

/// Outcome of a single `submit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// Sample accepted; `next_step` (0-based) is the one awaiting a sample.
    AwaitingPoint { next_step: usize },
    /// Sample accepted and calibration is complete.
    Calibrated { points_used: usize },
    /// The session was already calibrated; nothing changed.
    Ignored,
}

/// One calibration run.
#[derive(Debug, Clone)]
pub struct CalibrationSession {
    requested_point_count: usize,
    samples: Vec<Vector3>,
    calibrated: bool,
    aligner: FrameAligner,
}

impl CalibrationSession {
    /// Start a session. Fails if the requested point count is outside [1, 3].
    pub fn new(
        anchors: VirtualAnchors,
        config: &CalibrationConfig,
    ) -> Result<Self, CalibrationError> {
        let count = config.requested_point_count;
        if count == 0 || count as usize > NUM_ANCHORS {
            return Err(CalibrationError::InvalidPointCount(count));
        }
        Ok(Self {
            requested_point_count: count as usize,
            samples: Vec::with_capacity(count as usize),
            calibrated: false,
            aligner: FrameAligner::new(
                anchors,
                RigidTransform::with_origin(config.initial_position),
            ),
        })
    }

    /// Feed one physical sample captured by a trigger event.
    ///
    /// The sample goes to the next alignment step. If the sample is not finite or
    /// the step fails on degenerate geometry, the error is returned and neither the samples nor
    /// the transform change. After calibration every call is ignored.
    pub fn submit(&mut self, physical: Vector3) -> Result<StepResult, CalibrationError> {
        if self.calibrated {
            return Ok(StepResult::Ignored);
        }

        let step = self.samples.len();
        if let Err(e) = self.aligner.align_step(step, &physical) {
            warn!("Rejected sample for step {}: {}", step + 1, e);
            return Err(e);
        }
        self.samples.push(physical);

        if self.samples.len() == self.requested_point_count {
            self.calibrated = true;
            info!("Calibration success! {} points found", self.samples.len());
            Ok(StepResult::Calibrated {
                points_used: self.samples.len(),
            })
        } else {
            debug!(
                "Accepted point {}/{}",
                self.samples.len(),
                self.requested_point_count
            );
            Ok(StepResult::AwaitingPoint {
                next_step: self.samples.len(),
            })
        }
    }

    /// Poll `source` once and submit its sample if an event occurred.
    ///
    /// Returns `Ok(None)` when there was no event. A calibrated session does
    /// not poll at all.
    pub fn poll<S: TriggerSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<Option<StepResult>, CalibrationError> {
        if self.calibrated {
            return Ok(None);
        }
        let sample = source.poll(self.samples.len());
        if !sample.event_occurred {
            return Ok(None);
        }
        self.submit(sample.position).map(Some)
    }

    pub fn is_calibrated(&self) -> bool {
        self.calibrated
    }

    pub fn requested_point_count(&self) -> usize {
        self.requested_point_count
    }

    /// Samples accepted so far, in step order.
    pub fn samples(&self) -> &[Vector3] {
        &self.samples
    }

    /// The governed transform in its current state.
    pub fn transform(&self) -> &RigidTransform {
        self.aligner.transform()
    }

    /// Write access to the governed transform, e.g. to reposition the frame.
    ///
    /// Only available before the first sample is accepted: every later step
    /// builds on the previous ones, and a calibrated result is final.
    pub fn transform_mut(&mut self) -> Option<&mut RigidTransform> {
        if self.samples.is_empty() {
            Some(self.aligner.transform_mut())
        } else {
            None
        }
    }

    pub fn aligner(&self) -> &FrameAligner {
        &self.aligner
    }

    /// Snapshot of the result, available once calibrated.
    pub fn profile(&self) -> Option<CalibrationProfile> {
        if !self.calibrated {
            return None;
        }
        Some(CalibrationProfile::new(
            self.aligner.transform(),
            self.samples.len() as u8,
        ))
    }
}
