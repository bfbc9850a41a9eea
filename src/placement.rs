use glam::{vec2, Quat, Vec2};
use serde::{Deserialize, Serialize};

use crate::config::DisplayConfig;
use crate::emoji::EmojiKind;
use crate::geometry::{CoordinateTransform, Rect};
use crate::observation::{FaceObservation, TrackingId};

/// Vertical shift applied to the detector offset when the rear camera feeds
/// the preview. The rear module sits lower than the front one on the
/// reference hardware.
const REAR_LENS_SHIFT: Vec2 = vec2(0., -15.);

/// Where and how to draw one emoji overlay, in display-space coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverlayPlacement {
    pub tracking_id: TrackingId,
    pub emoji: EmojiKind,
    pub rect: Rect,
    /// Display-space image centre, anchored on the nose base.
    pub anchor: Vec2,
    pub rotation: Quat,
}

/// Compute the overlay placement for one face observation.
///
/// Pure and stateless: identical inputs give bit-identical output, and the
/// config snapshot is read only through the passed value. The bounding box
/// and nose base are mapped through `transform` (with the rear-camera offset
/// correction applied first), then the rect's size is scaled about its own
/// centre by `config.emoji_scale` while the anchor stays nose-based.
///
/// Observation fields are not validated; NaN or infinite inputs propagate
/// into the resulting geometry unchanged.
pub fn compute_placement(
    observation: &FaceObservation,
    config: &DisplayConfig,
    transform: &CoordinateTransform,
) -> OverlayPlacement {
    let transform = if config.use_front_camera {
        *transform
    } else {
        transform.shifted(REAR_LENS_SHIFT)
    };

    let rect = transform
        .apply_rect(observation.bounding_box)
        .scaled_about_centre(config.emoji_scale);
    let anchor = transform.apply_point(observation.nose_base);

    OverlayPlacement {
        tracking_id: observation.tracking_id,
        emoji: EmojiKind::for_observation(observation),
        rect,
        anchor,
        rotation: head_rotation(observation.head_euler_y, observation.head_euler_z),
    }
}

/// Rotation matching the observed head pose, yaw applied first, then roll.
///
/// Angles are negated to map the detector's convention onto the display's.
fn head_rotation(head_euler_y: f32, head_euler_z: f32) -> Quat {
    let yaw = Quat::from_rotation_y((-head_euler_y).to_radians());
    let roll = Quat::from_rotation_z((-head_euler_z).to_radians());
    roll * yaw
}
