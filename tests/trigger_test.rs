//! Integration tests: drive sessions from trigger sources tick by tick, the way a
//! host polling loop would, and persist the result as a profile.

use std::collections::VecDeque;
use std::time::Duration;

use frame_align::{
    CalibrationConfig, CalibrationProfile, CalibrationSession, ControllerPair, DebugPointer,
    PointerButton, StepResult, TimedSequence, TrackedDevice, TriggerSample, TriggerSource,
    Vector3, VirtualAnchors,
};

fn anchors() -> VirtualAnchors {
    VirtualAnchors::new(
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
    )
}

fn physical_points() -> [Vector3; 3] {
    [
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
        Vector3::new(0.0, 0.0, 1.0),
    ]
}

/// Scripted controller: a queue of (pressed, position) per tick.
struct ScriptedController {
    ticks: VecDeque<(bool, Vector3)>,
    current: Vector3,
}

impl ScriptedController {
    fn new(ticks: Vec<(bool, Vector3)>) -> Self {
        Self {
            ticks: ticks.into(),
            current: Vector3::zeros(),
        }
    }
}

impl TrackedDevice for ScriptedController {
    fn trigger_pressed_down(&mut self) -> bool {
        match self.ticks.pop_front() {
            Some((pressed, position)) => {
                self.current = position;
                pressed
            }
            None => false,
        }
    }

    fn position(&self) -> Vector3 {
        self.current
    }
}

struct ScriptedButton(VecDeque<bool>);

impl PointerButton for ScriptedButton {
    fn pressed_down(&mut self) -> bool {
        self.0.pop_front().unwrap_or(false)
    }
}

/// Fires every tick and counts how often it was polled.
struct CountingSource {
    polls: usize,
}

impl TriggerSource for CountingSource {
    fn poll(&mut self, _next_step: usize) -> TriggerSample {
        self.polls += 1;
        TriggerSample::fired(Vector3::new(self.polls as f64, 1.0, 0.0))
    }
}

fn run_until_calibrated<S: TriggerSource>(
    session: &mut CalibrationSession,
    source: &mut S,
    max_ticks: usize,
) -> Vec<StepResult> {
    let mut results = Vec::new();
    for _ in 0..max_ticks {
        if let Some(r) = session.poll(source).unwrap() {
            results.push(r);
        }
        if session.is_calibrated() {
            break;
        }
    }
    results
}

fn assert_unit_axes_calibrated(session: &CalibrationSession) {
    let world = session.aligner().anchors().world_positions(session.transform());
    for (w, p) in world.iter().zip(physical_points().iter()) {
        assert!((w - p).norm() < 1e-9, "anchor {:?} vs sample {:?}", w, p);
    }
}

#[test]
fn test_controller_pair_drives_session() {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();
    let [p1, p2, p3] = physical_points();
    let idle = Vector3::new(7.0, 7.0, 7.0);

    // Primary takes points 1 and 3, secondary takes point 2
    let primary = ScriptedController::new(vec![
        (false, idle),
        (true, p1),
        (false, idle),
        (false, idle),
        (true, p3),
    ]);
    let secondary = ScriptedController::new(vec![
        (false, idle),
        (false, idle),
        (false, idle),
        (true, p2),
        (false, idle),
    ]);
    let mut source = ControllerPair::new(primary, secondary);
    let mut session = CalibrationSession::new(anchors(), &CalibrationConfig::default()).unwrap();

    let results = run_until_calibrated(&mut session, &mut source, 10);
    assert_eq!(
        results,
        vec![
            StepResult::AwaitingPoint { next_step: 1 },
            StepResult::AwaitingPoint { next_step: 2 },
            StepResult::Calibrated { points_used: 3 },
        ]
    );
    assert_unit_axes_calibrated(&session);
}

#[test]
fn test_debug_pointer_drives_session() {
    let button = ScriptedButton(VecDeque::from(vec![true, false, false, true, true]));
    let mut source = DebugPointer::new(button, physical_points());
    let mut session = CalibrationSession::new(anchors(), &CalibrationConfig::default()).unwrap();

    let results = run_until_calibrated(&mut session, &mut source, 10);
    assert_eq!(results.len(), 3);
    assert_eq!(session.samples(), &physical_points());
    assert_unit_axes_calibrated(&session);
}

#[test]
fn test_timed_sequence_drives_session() {
    let mut source = TimedSequence::new(physical_points());
    let mut session = CalibrationSession::new(anchors(), &CalibrationConfig::default()).unwrap();

    // 100 ms ticks: steps land at 1.5 s, 2.0 s and 2.5 s
    let mut completed_at = None;
    for tick in 1..=40u32 {
        source.advance(Duration::from_millis(100));
        if let Some(StepResult::Calibrated { points_used }) = session.poll(&mut source).unwrap() {
            assert_eq!(points_used, 3);
            completed_at = Some(tick);
            break;
        }
    }
    assert_eq!(completed_at, Some(25));
    assert_unit_axes_calibrated(&session);
}

#[test]
fn test_calibrated_session_stops_polling() {
    let config = CalibrationConfig {
        requested_point_count: 2,
        ..Default::default()
    };
    let mut session = CalibrationSession::new(anchors(), &config).unwrap();
    let mut source = CountingSource { polls: 0 };

    for _ in 0..10 {
        session.poll(&mut source).unwrap();
    }
    assert!(session.is_calibrated());
    assert_eq!(source.polls, 2);
    assert_eq!(session.samples().len(), 2);
}

#[test]
fn test_profile_save_and_load() {
    let mut session = CalibrationSession::new(anchors(), &CalibrationConfig::default()).unwrap();
    for p in physical_points() {
        session.submit(p).unwrap();
    }
    let profile = session.profile().expect("calibrated session has a profile");
    assert_eq!(profile.points_used, 3);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calibration.rkyv");
    let path = path.to_str().unwrap();
    profile.save_to_file(path).unwrap();

    let loaded = CalibrationProfile::load_from_file(path).unwrap();
    assert_eq!(loaded, profile);
    let t = loaded.transform();
    assert!((t.position - session.transform().position).norm() < 1e-12);
    assert!(t.orientation.angle_to(&session.transform().orientation) < 1e-12);
}

#[test]
fn test_load_missing_profile_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does_not_exist.rkyv");
    assert!(CalibrationProfile::load_from_file(path.to_str().unwrap()).is_err());
}
