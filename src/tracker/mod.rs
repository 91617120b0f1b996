pub mod settings;

pub use settings::TrackerSettings;

use crate::core::{LatLng, Route};
use crate::map::{MapStatus, MapSurface, ViewportConfig};
use crate::playback::{
    PlaybackConfig, PlaybackEngine, PlaybackState, PlaybackStatus, PositionUpdate,
};
use anyhow::anyhow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Default frame interval (~60 fps)
const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// A map surface shared between the tracker and its frame task
pub type SharedSurface = Arc<Mutex<dyn MapSurface>>;

/// Vehicle tracker: drives a playback engine against a map surface
///
/// Owns the cancellable frame-loop task. Exactly one frame task is alive
/// per play session; `pause()` and `reset()` stop it before returning so
/// no stale tick can move the marker after the transition.
pub struct Tracker {
    engine: Arc<Mutex<PlaybackEngine>>,
    surface: SharedSurface,
    viewport: ViewportConfig,
    frame_interval: Duration,
    stop_signal: Arc<AtomicBool>,
    frame_task: Option<JoinHandle<()>>,
}

impl Tracker {
    pub fn new(route: Route, surface: SharedSurface) -> Self {
        Self::with_config(
            route,
            PlaybackConfig::default(),
            ViewportConfig::default(),
            DEFAULT_FRAME_INTERVAL,
            surface,
        )
    }

    pub fn with_config(
        route: Route,
        config: PlaybackConfig,
        viewport: ViewportConfig,
        frame_interval: Duration,
        surface: SharedSurface,
    ) -> Self {
        Self {
            engine: Arc::new(Mutex::new(PlaybackEngine::with_config(route, config))),
            surface,
            viewport,
            frame_interval,
            stop_signal: Arc::new(AtomicBool::new(false)),
            frame_task: None,
        }
    }

    /// Run the surface's initialize handshake: marker and path seeded at
    /// the first route point, viewport applied. Until this succeeds the
    /// map is not ready and `play()` is ignored.
    pub async fn init_map(&self) -> anyhow::Result<()> {
        let origin = self.engine.lock().await.route().first().position();

        let mut surface = self.surface.lock().await;
        surface
            .initialize(origin, self.viewport.clone())
            .await
            .map_err(|e| anyhow!("map surface failed to initialize: {}", e))?;

        info!("map surface {} initialized", surface.name());
        Ok(())
    }

    pub async fn map_ready(&self) -> bool {
        self.surface.lock().await.status() == MapStatus::Ready
    }

    /// Start or resume playback
    pub async fn play(&mut self) {
        if !self.map_ready().await {
            warn!("map surface not ready; ignoring play");
            return;
        }

        {
            let mut engine = self.engine.lock().await;
            engine.play();
            if !engine.is_playing() {
                // Nothing to interpolate toward (single point, or finished)
                return;
            }
        }

        self.spawn_frame_loop();
    }

    /// Pause playback, cancelling the frame task
    pub async fn pause(&mut self) {
        self.engine.lock().await.pause();
        self.cancel_frame_loop().await;
    }

    /// Return to the start of the route and snap the surface back to it
    pub async fn reset(&mut self) {
        self.cancel_frame_loop().await;

        let origin = {
            let mut engine = self.engine.lock().await;
            engine.reset();
            engine.displayed_position()
        };

        let mut surface = self.surface.lock().await;
        if surface.status() != MapStatus::Ready {
            return;
        }
        if let Err(e) = surface.set_marker_position(origin).await {
            warn!("marker reset skipped: {}", e);
        }
        if let Err(e) = surface.reset_path(origin).await {
            warn!("path reset skipped: {}", e);
        }
        if let Err(e) = surface.pan_to(origin).await {
            warn!("pan reset skipped: {}", e);
        }
    }

    pub async fn status(&self) -> PlaybackStatus {
        self.engine.lock().await.status()
    }

    pub async fn state(&self) -> PlaybackState {
        self.engine.lock().await.state()
    }

    pub async fn displayed_position(&self) -> LatLng {
        self.engine.lock().await.displayed_position()
    }

    pub async fn progress_percent(&self) -> f64 {
        self.engine.lock().await.progress_percent()
    }

    pub async fn total_points(&self) -> usize {
        self.engine.lock().await.total_points()
    }

    /// Wait for the current play session to run the route to completion
    pub async fn wait_until_finished(&mut self) {
        if let Some(task) = self.frame_task.take() {
            let _ = task.await;
        }
    }

    fn spawn_frame_loop(&mut self) {
        if self.frame_task.is_some() {
            return;
        }

        self.stop_signal.store(false, Ordering::Relaxed);

        let engine = Arc::clone(&self.engine);
        let surface = Arc::clone(&self.surface);
        let stop = Arc::clone(&self.stop_signal);
        let frame_interval = self.frame_interval;
        let follow_vehicle = self.viewport.follow_vehicle;

        self.frame_task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(frame_interval);
            // The first tick completes immediately; use it to start the clock
            ticker.tick().await;
            let mut last = Instant::now();

            loop {
                ticker.tick().await;
                if stop.load(Ordering::Relaxed) {
                    break;
                }

                let now = Instant::now();
                let delta = now - last;
                last = now;

                let (update, finished) = {
                    let mut engine = engine.lock().await;
                    let update = engine.update(delta);
                    (update, engine.state() == PlaybackState::Finished)
                };

                if let Some(update) = update {
                    publish(&surface, update, follow_vehicle).await;
                }

                if finished {
                    info!("route playback finished");
                    break;
                }
            }
        }));
    }

    async fn cancel_frame_loop(&mut self) {
        self.stop_signal.store(true, Ordering::Relaxed);
        if let Some(task) = self.frame_task.take() {
            let _ = task.await;
        }
    }
}

/// Best-effort position publish: a failed surface call is logged and
/// skipped, playback continues and no state changes.
async fn publish(surface: &SharedSurface, update: PositionUpdate, follow_vehicle: bool) {
    let mut surface = surface.lock().await;

    if let Err(e) = surface.set_marker_position(update.position).await {
        warn!("marker update skipped: {}", e);
    }
    if let Err(e) = surface.append_path_point(update.position).await {
        warn!("path update skipped: {}", e);
    }
    if follow_vehicle {
        if let Err(e) = surface.pan_to(update.position).await {
            warn!("pan skipped: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RoutePoint;
    use crate::map::MockMapSurface;
    use chrono::{TimeZone, Utc};

    fn short_route() -> Route {
        let points = [
            (17.385044, 78.486671, 0),
            (17.385045, 78.486672, 5),
            (17.385050, 78.486680, 10),
        ];
        Route::new(
            points
                .iter()
                .map(|&(lat, lng, secs)| {
                    RoutePoint::new(lat, lng, Utc.timestamp_opt(1_721_469_600 + secs, 0).unwrap())
                })
                .collect(),
        )
        .unwrap()
    }

    fn fast_tracker(route: Route, surface: SharedSurface) -> Tracker {
        Tracker::with_config(
            route,
            PlaybackConfig {
                segment_duration: Duration::from_millis(10),
            },
            ViewportConfig::default(),
            Duration::from_millis(2),
            surface,
        )
    }

    #[tokio::test]
    async fn test_play_runs_route_to_completion() {
        let mock = Arc::new(Mutex::new(MockMapSurface::new("mock")));
        let mut tracker = fast_tracker(short_route(), mock.clone());

        tracker.init_map().await.unwrap();
        tracker.play().await;
        tracker.wait_until_finished().await;

        assert_eq!(tracker.state().await, PlaybackState::Finished);
        let status = tracker.status().await;
        assert_eq!(status.current_index, 2);
        assert_eq!(status.elapsed_time, 10.0);
        assert!(!status.is_playing);

        // Segment completions publish the exact endpoints
        let last = LatLng::new(17.385050, 78.486680);
        let mock = mock.lock().await;
        assert!(mock.path().contains(&last));
        assert_eq!(*mock.marker_positions().last().unwrap(), last);
    }

    #[tokio::test]
    async fn test_play_ignored_until_map_ready() {
        let mock = Arc::new(Mutex::new(MockMapSurface::new("mock")));
        let mut tracker = fast_tracker(short_route(), mock.clone());

        // No init_map: the ready signal never fired
        tracker.play().await;

        assert!(tracker.frame_task.is_none());
        assert_eq!(tracker.state().await, PlaybackState::Idle);
    }

    #[tokio::test]
    async fn test_failed_initialize_keeps_playback_inert() {
        let mock = Arc::new(Mutex::new(MockMapSurface::new("mock")));
        mock.lock().await.set_fail_initialize(true);
        let mut tracker = fast_tracker(short_route(), mock.clone());

        assert!(tracker.init_map().await.is_err());
        tracker.play().await;

        assert!(tracker.frame_task.is_none());
        assert_eq!(tracker.state().await, PlaybackState::Idle);
    }

    #[tokio::test]
    async fn test_failing_surface_does_not_stop_playback() {
        let mock = Arc::new(Mutex::new(MockMapSurface::new("mock")));
        let mut tracker = fast_tracker(short_route(), mock.clone());

        tracker.init_map().await.unwrap();
        mock.lock().await.set_fail_updates(true);

        tracker.play().await;
        tracker.wait_until_finished().await;

        // Every publish failed, playback still ran the whole route
        assert_eq!(tracker.state().await, PlaybackState::Finished);
        assert_eq!(tracker.status().await.elapsed_time, 10.0);
    }

    #[tokio::test]
    async fn test_pause_cancels_frame_task() {
        let mock = Arc::new(Mutex::new(MockMapSurface::new("mock")));
        let mut tracker = fast_tracker(short_route(), mock.clone());

        tracker.init_map().await.unwrap();
        tracker.play().await;
        assert!(tracker.frame_task.is_some());

        tracker.pause().await;
        assert!(tracker.frame_task.is_none());
        assert_eq!(tracker.state().await, PlaybackState::Paused);

        // Nothing creeps after the cancel
        let held = tracker.displayed_position().await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(tracker.displayed_position().await, held);
    }

    #[tokio::test]
    async fn test_reset_snaps_surface_to_origin() {
        let mock = Arc::new(Mutex::new(MockMapSurface::new("mock")));
        let mut tracker = fast_tracker(short_route(), mock.clone());

        tracker.init_map().await.unwrap();
        tracker.play().await;
        tracker.wait_until_finished().await;
        tracker.reset().await;

        assert_eq!(tracker.status().await, PlaybackStatus::initial());

        let origin = LatLng::new(17.385044, 78.486671);
        assert_eq!(tracker.displayed_position().await, origin);

        let mock = mock.lock().await;
        assert_eq!(mock.path(), &[origin]);
        assert_eq!(*mock.marker_positions().last().unwrap(), origin);
    }

    #[tokio::test]
    async fn test_resume_after_pause_reaches_the_end() {
        let mock = Arc::new(Mutex::new(MockMapSurface::new("mock")));
        let mut tracker = fast_tracker(short_route(), mock.clone());

        tracker.init_map().await.unwrap();
        tracker.play().await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        tracker.pause().await;

        tracker.play().await;
        tracker.wait_until_finished().await;
        assert_eq!(tracker.state().await, PlaybackState::Finished);
    }
}
