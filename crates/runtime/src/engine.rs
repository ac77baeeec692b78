use std::sync::{Mutex, MutexGuard, PoisonError};

use camera::{CameraPose, ScreenLabel, Viewport, place_labels};
use catalog::Catalog;
use foundation::AttitudeSignal;
use foundation::math::GeoPoint;
use visibility::{ScoredPoi, SelectionState, select_visible};

use crate::frame::Frame;
use crate::pump::ProjectionPump;

/// What the host should do with this frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameUpdate {
    /// Nothing changed since the last projection; keep the current overlay.
    Idle,
    /// The attitude provider reported itself unavailable. The engine takes no
    /// fallback view; the host decides what to show.
    AttitudeUnavailable,
    /// Attitude is flowing but no location fix has arrived yet. Selection is
    /// empty by contract.
    AwaitingLocation,
    /// Fresh selection, pose, and label placements.
    Refresh(ViewUpdate),
}

/// One frame's worth of render state.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewUpdate {
    pub selected: Vec<ScoredPoi>,
    pub pose: CameraPose,
    pub labels: Vec<ScreenLabel>,
}

#[derive(Debug)]
struct EngineInner {
    location: Option<GeoPoint>,
    attitude: AttitudeSignal,
    selection: SelectionState,
    selected: Vec<ScoredPoi>,
    pump: ProjectionPump,
}

/// Single update boundary around the ranking pass and its persisted state.
///
/// Sensor callbacks ([`on_location`](Self::on_location),
/// [`on_attitude`](Self::on_attitude)) run the full score-select-replace pass
/// synchronously under one lock, so the previous-selection state is never
/// read concurrently with its replacement. The projection pass is deferred to
/// [`render_frame`](Self::render_frame) and coalesced to once per frame by
/// the [`ProjectionPump`].
pub struct Engine<'c> {
    catalog: &'c Catalog,
    inner: Mutex<EngineInner>,
}

impl<'c> Engine<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            inner: Mutex::new(EngineInner {
                location: None,
                attitude: AttitudeSignal::Unavailable,
                selection: SelectionState::new(),
                selected: Vec::new(),
                pump: ProjectionPump::new(),
            }),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    /// Location update from the position provider. `None` means the fix was
    /// lost; the selection empties on the next pass.
    pub fn on_location(&self, location: Option<GeoPoint>) {
        let mut inner = self.lock();
        inner.location = location;
        self.rescore(&mut inner);
    }

    /// Attitude update from the orientation provider, at sensor rate.
    pub fn on_attitude(&self, signal: AttitudeSignal) {
        let mut inner = self.lock();
        inner.attitude = signal;
        self.rescore(&mut inner);
    }

    /// Snapshot of the current selection, in display order.
    pub fn selected(&self) -> Vec<ScoredPoi> {
        self.lock().selected.clone()
    }

    /// Per-display-tick entry point. Runs the projection pass at most once
    /// per frame, and only when an update made the overlay stale.
    pub fn render_frame(&self, frame: Frame, viewport: Viewport) -> FrameUpdate {
        let mut inner = self.lock();

        let attitude = match inner.attitude {
            AttitudeSignal::Unavailable => return FrameUpdate::AttitudeUnavailable,
            AttitudeSignal::Available(a) => a,
        };
        if !inner.pump.take(frame) {
            return FrameUpdate::Idle;
        }
        let Some(location) = inner.location else {
            return FrameUpdate::AwaitingLocation;
        };

        let pose = CameraPose::for_viewer(location, attitude);
        let labels = place_labels(&pose, viewport, &inner.selected);
        tracing::trace!(
            frame = frame.index,
            labels = labels.len(),
            visible = labels.iter().filter(|l| l.visible).count(),
            "projection pass"
        );

        FrameUpdate::Refresh(ViewUpdate {
            selected: inner.selected.clone(),
            pose,
            labels,
        })
    }

    /// Full ranking pass: score, select, replace the stickiness state, and
    /// flag the overlay stale. No-op while attitude is unavailable.
    fn rescore(&self, inner: &mut EngineInner) {
        let Some(attitude) = inner.attitude.attitude() else {
            return;
        };
        let (selected, next) =
            select_visible(self.catalog, inner.location, attitude, &inner.selection);
        tracing::debug!(
            candidates = self.catalog.len(),
            selected = selected.len(),
            "ranking pass"
        );
        inner.selection = next;
        inner.selected = selected;
        inner.pump.request();
    }

    fn lock(&self) -> MutexGuard<'_, EngineInner> {
        // A panicked sensor callback must not wedge the render loop.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::{Engine, FrameUpdate};
    use crate::frame::Frame;
    use camera::Viewport;
    use catalog::world_catalog;
    use foundation::math::GeoPoint;
    use foundation::{Attitude, AttitudeSignal};
    use pretty_assertions::assert_eq;

    const TOKYO: GeoPoint = GeoPoint {
        lat_deg: 35.6762,
        lng_deg: 139.6503,
    };
    const VIEWPORT: Viewport = Viewport {
        width_px: 390.0,
        height_px: 844.0,
    };

    fn frame0() -> Frame {
        Frame::new(0, 1.0 / 60.0)
    }

    #[test]
    fn attitude_unavailable_is_reported_not_defaulted() {
        let engine = Engine::new(world_catalog());
        engine.on_location(Some(TOKYO));
        assert_eq!(
            engine.render_frame(frame0(), VIEWPORT),
            FrameUpdate::AttitudeUnavailable
        );
        // No pass ran, so nothing is selected either.
        assert!(engine.selected().is_empty());
    }

    #[test]
    fn attitude_without_location_awaits_a_fix() {
        let engine = Engine::new(world_catalog());
        engine.on_attitude(AttitudeSignal::Available(Attitude::upright()));
        assert_eq!(
            engine.render_frame(frame0(), VIEWPORT),
            FrameUpdate::AwaitingLocation
        );
        assert!(engine.selected().is_empty());
    }

    #[test]
    fn update_then_frame_produces_a_refresh_then_goes_idle() {
        let engine = Engine::new(world_catalog());
        engine.on_attitude(AttitudeSignal::Available(Attitude::upright()));
        engine.on_location(Some(TOKYO));

        let update = engine.render_frame(frame0(), VIEWPORT);
        let FrameUpdate::Refresh(view) = update else {
            panic!("expected a refresh, got {update:?}");
        };
        assert!(!view.selected.is_empty());
        assert_eq!(view.labels.len(), view.selected.len());

        // Nothing new arrived: the next frame has nothing to do.
        assert_eq!(
            engine.render_frame(frame0().next(), VIEWPORT),
            FrameUpdate::Idle
        );
    }

    #[test]
    fn sensor_burst_coalesces_into_one_projection() {
        let engine = Engine::new(world_catalog());
        engine.on_location(Some(TOKYO));
        for i in 0..10 {
            let yaw = i as f64 * 0.01;
            engine.on_attitude(AttitudeSignal::Available(Attitude::new(
                yaw,
                std::f64::consts::FRAC_PI_2,
                0.0,
            )));
        }

        let f0 = frame0();
        assert!(matches!(
            engine.render_frame(f0, VIEWPORT),
            FrameUpdate::Refresh(_)
        ));
        assert_eq!(engine.render_frame(f0, VIEWPORT), FrameUpdate::Idle);
    }

    #[test]
    fn losing_the_fix_empties_the_selection() {
        let engine = Engine::new(world_catalog());
        engine.on_attitude(AttitudeSignal::Available(Attitude::upright()));
        engine.on_location(Some(TOKYO));
        assert!(!engine.selected().is_empty());

        engine.on_location(None);
        assert!(engine.selected().is_empty());
        assert_eq!(
            engine.render_frame(frame0(), VIEWPORT),
            FrameUpdate::AwaitingLocation
        );
    }

    #[test]
    fn selection_is_sticky_across_small_yaw_changes() {
        let engine = Engine::new(world_catalog());
        engine.on_location(Some(TOKYO));
        engine.on_attitude(AttitudeSignal::Available(Attitude::upright()));
        let before: Vec<String> = engine
            .selected()
            .iter()
            .map(|s| s.poi.id.clone())
            .collect();

        engine.on_attitude(AttitudeSignal::Available(Attitude::new(
            0.02,
            std::f64::consts::FRAC_PI_2,
            0.0,
        )));
        let after: Vec<String> = engine
            .selected()
            .iter()
            .map(|s| s.poi.id.clone())
            .collect();
        let kept = before.iter().filter(|id| after.contains(id)).count();
        assert!(kept * 2 >= before.len(), "selection churned: {before:?} -> {after:?}");
    }
}
