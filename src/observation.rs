use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Identifier assigned by the external detector, stable for a physical face
/// across consecutive frames and never reused within a session.
pub type TrackingId = u32;

/// One tracked face as reported by the external detection pipeline for a
/// single frame, in detector-space coordinates.
///
/// Probabilities are expected in `[0, 1]`; head pose angles are signed
/// degrees. Fields are carried through unvalidated, matching what the
/// detector hands over.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaceObservation {
    pub tracking_id: TrackingId,
    pub bounding_box: Rect,
    pub nose_base: Vec2,
    /// Yaw, rotation about the vertical axis, in degrees.
    pub head_euler_y: f32,
    /// Roll, rotation about the depth axis, in degrees.
    pub head_euler_z: f32,
    pub left_eye_open: f32,
    pub right_eye_open: f32,
    pub smiling: f32,
}
