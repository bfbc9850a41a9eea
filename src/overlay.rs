use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::DisplayConfig;
use crate::geometry::CoordinateTransform;
use crate::observation::{FaceObservation, TrackingId};
use crate::placement::{compute_placement, OverlayPlacement};

/// Lifecycle event reported by the external detection pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TrackEvent {
    /// A new face entered the tracked set.
    Started(FaceObservation),
    /// Fresh geometry for a face already in the tracked set.
    Updated(FaceObservation),
    /// The detector lost the whole tracked set.
    AllCompleted,
}

/// Instruction for an [`OverlayRenderer`].
///
/// Commands carry owned copies of their placement, so handing them across to
/// a display context shares nothing with the detection context that produced
/// them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum OverlayCommand {
    Create(OverlayPlacement),
    Update(OverlayPlacement),
    Remove(TrackingId),
}

impl OverlayCommand {
    pub fn tracking_id(&self) -> TrackingId {
        match self {
            OverlayCommand::Create(placement) | OverlayCommand::Update(placement) => {
                placement.tracking_id
            }
            OverlayCommand::Remove(tracking_id) => *tracking_id,
        }
    }
}

/// Applies overlay commands to an actual display surface.
///
/// Implementations must apply `rect`, `anchor`, `rotation` and the emoji
/// asset exactly as computed, with no additional transformation.
pub trait OverlayRenderer {
    fn create(&mut self, placement: &OverlayPlacement);
    fn update(&mut self, placement: &OverlayPlacement);
    fn remove(&mut self, tracking_id: TrackingId);

    fn apply(&mut self, command: &OverlayCommand) {
        match command {
            OverlayCommand::Create(placement) => self.create(placement),
            OverlayCommand::Update(placement) => self.update(placement),
            OverlayCommand::Remove(tracking_id) => self.remove(*tracking_id),
        }
    }
}

/// Renderer that reports every command through `tracing`, for diagnostics
/// and headless runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingRenderer;

impl OverlayRenderer for TracingRenderer {
    fn create(&mut self, placement: &OverlayPlacement) {
        debug!(
            id = placement.tracking_id,
            emoji = placement.emoji.asset_name(),
            "overlay created"
        );
    }

    fn update(&mut self, placement: &OverlayPlacement) {
        debug!(
            id = placement.tracking_id,
            emoji = placement.emoji.asset_name(),
            "overlay updated"
        );
    }

    fn remove(&mut self, tracking_id: TrackingId) {
        debug!(id = tracking_id, "overlay removed");
    }
}

/// Per-face overlay lifecycle, driven by detector events.
///
/// Each tracking id moves through absent, active, removed; removed is
/// terminal. One active overlay exists per currently-tracked id, and no
/// placement is ever produced for an id once it has been removed: events for
/// retired ids are dropped with a warning rather than resurrecting an
/// overlay, even if the detector misbehaves.
#[derive(Debug, Default)]
pub struct OverlayTracker {
    active: HashMap<TrackingId, OverlayPlacement>,
    retired: HashSet<TrackingId>,
}

impl OverlayTracker {
    pub fn new() -> OverlayTracker {
        OverlayTracker::default()
    }

    pub fn is_active(&self, tracking_id: TrackingId) -> bool {
        self.active.contains_key(&tracking_id)
    }

    pub fn active_overlays(&self) -> impl Iterator<Item = &OverlayPlacement> {
        self.active.values()
    }

    /// Feed one detector event through the mapper.
    ///
    /// `config` is a snapshot taken by the caller for the duration of this
    /// call; a store update landing concurrently applies from the next event
    /// onwards.
    #[tracing::instrument(skip_all)]
    pub fn handle_event(
        &mut self,
        event: &TrackEvent,
        config: DisplayConfig,
        transform: &CoordinateTransform,
    ) -> Vec<OverlayCommand> {
        match event {
            TrackEvent::Started(observation) => self
                .track_started(observation, config, transform)
                .into_iter()
                .collect(),
            TrackEvent::Updated(observation) => self
                .track_updated(observation, config, transform)
                .into_iter()
                .collect(),
            TrackEvent::AllCompleted => self.all_completed(),
        }
    }

    pub fn track_started(
        &mut self,
        observation: &FaceObservation,
        config: DisplayConfig,
        transform: &CoordinateTransform,
    ) -> Option<OverlayCommand> {
        let tracking_id = observation.tracking_id;
        if self.retired.contains(&tracking_id) {
            warn!(id = tracking_id, "start for retired track dropped");
            return None;
        }
        if self.active.contains_key(&tracking_id) {
            warn!(id = tracking_id, "duplicate start for active track dropped");
            return None;
        }

        let placement = compute_placement(observation, &config, transform);
        self.active.insert(tracking_id, placement);
        debug!(id = tracking_id, "face entered tracked set");
        Some(OverlayCommand::Create(placement))
    }

    pub fn track_updated(
        &mut self,
        observation: &FaceObservation,
        config: DisplayConfig,
        transform: &CoordinateTransform,
    ) -> Option<OverlayCommand> {
        let tracking_id = observation.tracking_id;
        let Some(slot) = self.active.get_mut(&tracking_id) else {
            warn!(id = tracking_id, "update for untracked face dropped");
            return None;
        };

        let placement = compute_placement(observation, &config, transform);
        *slot = placement;
        Some(OverlayCommand::Update(placement))
    }

    /// The detector lost the whole tracked set; every active overlay is
    /// removed and its id retired. Removals are emitted in id order.
    pub fn all_completed(&mut self) -> Vec<OverlayCommand> {
        let mut ids: Vec<TrackingId> = self.active.keys().copied().collect();
        ids.sort_unstable();
        self.active.clear();
        self.retired.extend(ids.iter().copied());
        debug!(count = ids.len(), "tracked set completed");
        ids.into_iter().map(OverlayCommand::Remove).collect()
    }
}
