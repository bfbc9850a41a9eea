use crossbeam_channel::{unbounded, Receiver, Sender};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Error;

/// Display-side settings for overlay placement.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Whether the front camera module feeds the preview. The rear module
    /// sits at a different height, so placement applies an extra vertical
    /// offset correction when this is false.
    pub use_front_camera: bool,
    /// Size multiplier for the overlay rect. Must be positive and finite.
    pub emoji_scale: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            use_front_camera: true,
            emoji_scale: 1.1,
        }
    }
}

impl DisplayConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if !self.emoji_scale.is_finite() || self.emoji_scale <= 0. {
            return Err(Error::ConfigValidation {
                emoji_scale: self.emoji_scale,
            });
        }
        Ok(())
    }
}

/// Holds the current display configuration and broadcasts accepted changes.
///
/// Callers take a copy snapshot with [`ConfigStore::get`] and hand it to each
/// placement computation, so an update landing mid-frame never tears the
/// fields read by one call. Broadcast is fire-and-forget: each subscriber
/// sees every accepted update in order, and a subscriber dropped mid-session
/// is pruned on the next `set` without affecting the rest.
#[derive(Debug, Default)]
pub struct ConfigStore {
    current: DisplayConfig,
    subscribers: Vec<Sender<DisplayConfig>>,
}

impl ConfigStore {
    pub fn new(config: DisplayConfig) -> Result<ConfigStore, Error> {
        config.validate()?;
        Ok(ConfigStore {
            current: config,
            subscribers: Vec::new(),
        })
    }

    pub fn get(&self) -> DisplayConfig {
        self.current
    }

    /// Replace the current configuration. An invalid configuration is
    /// rejected and the previous one is retained.
    pub fn set(&mut self, config: DisplayConfig) -> Result<(), Error> {
        config.validate()?;
        self.current = config;
        self.subscribers.retain(|tx| tx.send(config).is_ok());
        debug!(
            use_front_camera = config.use_front_camera,
            emoji_scale = config.emoji_scale,
            "display config updated"
        );
        Ok(())
    }

    pub fn subscribe(&mut self) -> Receiver<DisplayConfig> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_app_startup_settings() {
        let config = DisplayConfig::default();
        assert!(config.use_front_camera);
        assert_eq!(config.emoji_scale, 1.1);
    }

    #[test]
    fn emoji_scale_round_trips() {
        let mut store = ConfigStore::new(DisplayConfig::default()).unwrap();
        store
            .set(DisplayConfig {
                use_front_camera: false,
                emoji_scale: 2.5,
            })
            .unwrap();
        assert_eq!(store.get().emoji_scale, 2.5);
        assert!(!store.get().use_front_camera);
    }

    #[test]
    fn invalid_scale_is_rejected_and_previous_config_kept() {
        let mut store = ConfigStore::new(DisplayConfig::default()).unwrap();
        let before = store.get();

        for emoji_scale in [0., -1., f32::NAN, f32::INFINITY] {
            let result = store.set(DisplayConfig {
                use_front_camera: false,
                emoji_scale,
            });
            assert!(matches!(result, Err(Error::ConfigValidation { .. })));
            assert_eq!(store.get(), before);
        }
    }

    #[test]
    fn subscribers_see_updates_in_order() {
        let mut store = ConfigStore::new(DisplayConfig::default()).unwrap();
        let rx = store.subscribe();

        for emoji_scale in [1.0, 2.0, 3.0] {
            store
                .set(DisplayConfig {
                    use_front_camera: true,
                    emoji_scale,
                })
                .unwrap();
        }

        let scales: Vec<f32> = rx.try_iter().map(|c| c.emoji_scale).collect();
        assert_eq!(scales, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn dropped_subscriber_does_not_break_broadcast() {
        let mut store = ConfigStore::new(DisplayConfig::default()).unwrap();
        let dead = store.subscribe();
        let live = store.subscribe();
        drop(dead);

        store
            .set(DisplayConfig {
                use_front_camera: true,
                emoji_scale: 1.5,
            })
            .unwrap();
        assert_eq!(live.try_recv().unwrap().emoji_scale, 1.5);
    }

    #[test]
    fn rejected_update_is_not_broadcast() {
        let mut store = ConfigStore::new(DisplayConfig::default()).unwrap();
        let rx = store.subscribe();
        store
            .set(DisplayConfig {
                use_front_camera: true,
                emoji_scale: 0.,
            })
            .unwrap_err();
        assert!(rx.try_recv().is_err());
    }
}
