//! # frame_align
//!
//! Three-point calibration of a **virtual coordinate frame** onto a **physical**
//! one, so that content authored in a scene shows up at the right real-world
//! place and orientation.
//!
//! Three virtual anchors (V1, V2, V3) are authored in the scene. An operator
//! touches the matching real-world points with a tracked controller, one trigger
//! press per point. Each press feeds the next step of a fixed, order-dependent
//! procedure that mutates a single rigid transform:
//!
//! 1. **Translate** so V1 lands exactly on the first physical sample.
//! 2. **Rotate about V1** so the V1→V2 direction matches V1→p2.
//! 3. **Rotate about V1** so the V1→V3 direction matches V1→p3.
//!
//! This is not a least-squares fit over a point cloud: every step is exact for
//! the point it consumes and irrevocable once applied.
//!
//! ## Example
//!
//! ```
//! use frame_align::{CalibrationConfig, CalibrationSession, StepResult, Vector3, VirtualAnchors};
//!
//! let anchors = VirtualAnchors::new(
//!     Vector3::new(0.0, 0.0, 0.0),
//!     Vector3::new(1.0, 0.0, 0.0),
//!     Vector3::new(0.0, 1.0, 0.0),
//! );
//! let mut session = CalibrationSession::new(anchors, &CalibrationConfig::default()).unwrap();
//!
//! session.submit(Vector3::new(0.0, 0.0, 0.0)).unwrap();
//! session.submit(Vector3::new(0.0, 1.0, 0.0)).unwrap();
//! let done = session.submit(Vector3::new(0.0, 0.0, 1.0)).unwrap();
//! assert_eq!(done, StepResult::Calibrated { points_used: 3 });
//!
//! let frame = session.transform();
//! println!("Calibrated frame at {:?}", frame.position);
//! ```
//!
//! Samples normally come from a [`TriggerSource`] polled once per host tick with
//! [`CalibrationSession::poll`]: a [`ControllerPair`] of tracked devices, a
//! [`DebugPointer`] that substitutes pre-authored points on click, or a
//! [`TimedSequence`] that feeds them on a fixed schedule.

pub mod aligner;
pub mod anchors;
mod error;
pub mod profile;
pub mod session;
pub mod transform;
pub mod trigger;

pub use aligner::{shortest_arc, FrameAligner};
pub use anchors::VirtualAnchors;
pub use error::*;
pub use profile::CalibrationProfile;
pub use session::{CalibrationConfig, CalibrationSession, StepResult};
pub use transform::RigidTransform;
pub use trigger::{
    ControllerPair, DebugPointer, PointerButton, TimedSequence, TrackedDevice, TriggerSample,
    TriggerSource,
};

// Commonly used types. Calibration distances are small and errors compound
// across steps, so everything is 64-bit.
pub type Quaternion = nalgebra::UnitQuaternion<f64>;
pub type Vector3 = nalgebra::Vector3<f64>;
