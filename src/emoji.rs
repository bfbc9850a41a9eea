use serde::{Deserialize, Serialize};

use crate::observation::FaceObservation;

/// Eye-open probabilities below this read as a closed eye.
pub const EYE_CLOSED_THRESHOLD: f32 = 0.30;

/// Smile probabilities below this read as a neutral face.
pub const SMILE_NEUTRAL_MAX: f32 = 0.25;

/// Smile probabilities at or above this read as a full grin.
pub const SMILE_SMILEY_MIN: f32 = 0.70;

/// The emoji asset shown over a face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmojiKind {
    Neutral,
    Smiling,
    Smiley,
    Wink,
}

impl EmojiKind {
    /// Pick the emoji for an observed expression.
    ///
    /// Eye closure takes precedence over smile state entirely: a wink is
    /// shown even on a wide smile with an eye shut.
    pub fn for_observation(observation: &FaceObservation) -> EmojiKind {
        if observation.left_eye_open < EYE_CLOSED_THRESHOLD
            || observation.right_eye_open < EYE_CLOSED_THRESHOLD
        {
            return EmojiKind::Wink;
        }

        match observation.smiling {
            s if s < SMILE_NEUTRAL_MAX => EmojiKind::Neutral,
            s if s < SMILE_SMILEY_MIN => EmojiKind::Smiling,
            _ => EmojiKind::Smiley,
        }
    }

    /// Name of the image asset backing this emoji.
    pub fn asset_name(&self) -> &'static str {
        match self {
            EmojiKind::Neutral => "neutral",
            EmojiKind::Smiling => "smiling",
            EmojiKind::Smiley => "smiley",
            EmojiKind::Wink => "wink",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use glam::Vec2;

    fn observation(smiling: f32, left_eye_open: f32, right_eye_open: f32) -> FaceObservation {
        FaceObservation {
            tracking_id: 0,
            bounding_box: Rect::new(0., 0., 1., 1.),
            nose_base: Vec2::ZERO,
            head_euler_y: 0.,
            head_euler_z: 0.,
            left_eye_open,
            right_eye_open,
            smiling,
        }
    }

    #[test]
    fn smile_bands() {
        assert_eq!(EmojiKind::for_observation(&observation(0., 1., 1.)), EmojiKind::Neutral);
        assert_eq!(EmojiKind::for_observation(&observation(0.24, 1., 1.)), EmojiKind::Neutral);
        assert_eq!(EmojiKind::for_observation(&observation(0.25, 1., 1.)), EmojiKind::Smiling);
        assert_eq!(EmojiKind::for_observation(&observation(0.69, 1., 1.)), EmojiKind::Smiling);
        assert_eq!(EmojiKind::for_observation(&observation(0.70, 1., 1.)), EmojiKind::Smiley);
        assert_eq!(EmojiKind::for_observation(&observation(1., 1., 1.)), EmojiKind::Smiley);
    }

    #[test]
    fn eye_closure_overrides_smile() {
        assert_eq!(EmojiKind::for_observation(&observation(1., 0.1, 1.)), EmojiKind::Wink);
        assert_eq!(EmojiKind::for_observation(&observation(0., 1., 0.29)), EmojiKind::Wink);
        assert_eq!(EmojiKind::for_observation(&observation(0.5, 0., 0.)), EmojiKind::Wink);
    }

    #[test]
    fn eye_exactly_at_threshold_counts_as_open() {
        assert_eq!(EmojiKind::for_observation(&observation(0.5, 0.30, 0.30)), EmojiKind::Smiling);
    }

    #[test]
    fn asset_names_are_stable() {
        assert_eq!(EmojiKind::Neutral.asset_name(), "neutral");
        assert_eq!(EmojiKind::Wink.asset_name(), "wink");
    }
}
