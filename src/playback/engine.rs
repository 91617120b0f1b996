use crate::core::{geo, LatLng, Route};
use crate::playback::{PlaybackConfig, PlaybackState, PlaybackStatus};
use std::time::Duration;

/// A position to publish to the map surface after a frame tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionUpdate {
    /// Interpolated (or exact, at segment boundaries) vehicle position
    pub position: LatLng,
    /// Route index the cursor sits on after this tick
    pub index: usize,
    /// Fraction of the current segment's render animation completed
    pub progress: f64,
    /// True when this tick completed a segment and advanced the cursor
    pub segment_completed: bool,
}

/// Playback engine for a recorded vehicle route
///
/// Advances a cursor through the route one segment at a time, linearly
/// interpolating between consecutive points over a fixed render duration.
/// Driven by feeding frame deltas into [`PlaybackEngine::update`].
pub struct PlaybackEngine {
    route: Route,
    config: PlaybackConfig,
    state: PlaybackState,
    current_index: usize,
    elapsed_time: f64,
    speed: f64,
    /// Render time accumulated into the current segment's animation
    anim_clock: Duration,
    /// Last position handed to the renderer; held across pauses
    displayed: LatLng,
}

impl PlaybackEngine {
    pub fn new(route: Route) -> Self {
        Self::with_config(route, PlaybackConfig::default())
    }

    pub fn with_config(route: Route, config: PlaybackConfig) -> Self {
        let displayed = route.first().position();
        Self {
            route,
            config,
            state: PlaybackState::Idle,
            current_index: 0,
            elapsed_time: 0.0,
            speed: 0.0,
            anim_clock: Duration::ZERO,
            displayed,
        }
    }

    /// Get current playback state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Get current cursor position (index into the route)
    pub fn position(&self) -> usize {
        self.current_index
    }

    /// Get total number of route points
    pub fn total_points(&self) -> usize {
        self.route.len()
    }

    /// Check if currently playing
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// The position currently shown on the map. Holds the in-progress
    /// interpolated position across a pause.
    pub fn displayed_position(&self) -> LatLng {
        self.displayed
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Fraction of the route covered, 0-100, by cursor index
    pub fn progress_percent(&self) -> f64 {
        if self.route.len() < 2 {
            return 0.0;
        }
        self.current_index as f64 / self.route.last_index() as f64 * 100.0
    }

    /// Snapshot of the derived playback state
    pub fn status(&self) -> PlaybackStatus {
        PlaybackStatus {
            current_index: self.current_index,
            is_playing: self.is_playing(),
            elapsed_time: self.elapsed_time,
            speed: self.speed,
        }
    }

    /// Start or resume playback
    ///
    /// No-op when already playing, when the route has nothing to
    /// interpolate toward, or once the final point is reached. Resuming
    /// restarts the in-flight segment's animation from the segment start,
    /// not from the paused fraction.
    pub fn play(&mut self) {
        if self.state == PlaybackState::Playing {
            return;
        }
        if self.route.len() < 2 || self.current_index >= self.route.last_index() {
            return;
        }

        self.anim_clock = Duration::ZERO;
        self.state = PlaybackState::Playing;
    }

    /// Pause playback, holding the current interpolated position
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    /// Return to the start of the route, stopped
    pub fn reset(&mut self) {
        self.state = PlaybackState::Idle;
        self.current_index = 0;
        self.elapsed_time = 0.0;
        self.speed = 0.0;
        self.anim_clock = Duration::ZERO;
        self.displayed = self.route.first().position();
    }

    /// Advance the animation by one frame delta
    ///
    /// Returns the position to publish, or `None` when not playing. A
    /// delta larger than the render duration completes only the current
    /// segment; the render clock is presentation time, not a deadline.
    pub fn update(&mut self, delta: Duration) -> Option<PositionUpdate> {
        if self.state != PlaybackState::Playing {
            return None;
        }

        let (from, to, dt_seconds) = match self.route.segment(self.current_index) {
            Some((a, b)) => (a.position(), b.position(), b.seconds_since(a)),
            None => {
                self.state = PlaybackState::Finished;
                return None;
            }
        };

        self.anim_clock += delta;
        let duration = self.config.segment_duration;
        let progress = if duration.is_zero() {
            1.0
        } else {
            (self.anim_clock.as_secs_f64() / duration.as_secs_f64()).min(1.0)
        };

        if progress < 1.0 {
            let position = from.lerp(to, progress);
            self.displayed = position;
            return Some(PositionUpdate {
                position,
                index: self.current_index,
                progress,
                segment_completed: false,
            });
        }

        // Segment complete: land exactly on the endpoint, account the real
        // route time, and move the cursor on.
        self.elapsed_time += dt_seconds;
        self.speed = geo::speed_kmh(from, to, dt_seconds);
        self.current_index += 1;
        self.anim_clock = Duration::ZERO;
        self.displayed = to;

        if self.current_index >= self.route.last_index() {
            self.state = PlaybackState::Finished;
        }

        Some(PositionUpdate {
            position: to,
            index: self.current_index,
            progress: 1.0,
            segment_completed: true,
        })
    }
}
