use crate::core::LatLng;
use async_trait::async_trait;
use std::error::Error;

/// Result type for map surface operations
pub type SurfaceResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

/// Viewport configuration for a map surface
#[derive(Debug, Clone)]
pub struct ViewportConfig {
    /// Initial zoom level
    pub zoom: u8,
    /// Keep the viewport centered on the vehicle while it moves
    pub follow_vehicle: bool,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            zoom: 16,
            follow_vehicle: true,
        }
    }
}

/// Readiness of a map surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapStatus {
    /// Surface not initialized yet; position publishes will fail
    Loading,
    /// Surface initialized and accepting updates
    Ready,
    /// Surface failed to initialize
    Error,
}

/// Capability exposed by a map-rendering collaborator
///
/// The playback side depends only on this narrow interface, never on a
/// concrete mapping widget:
/// - a hosted map widget (marker + polyline + viewport)
/// - a console surface for headless runs
/// - a mock surface for tests
///
/// Every call is best-effort from the caller's point of view: a failed
/// update is logged and skipped, playback state never changes because a
/// render target went away.
#[async_trait]
pub trait MapSurface: Send {
    /// Get the name/identifier of this surface
    fn name(&self) -> &str;

    /// Get the current readiness of the surface
    fn status(&self) -> MapStatus;

    /// Bring the surface up: seed the vehicle marker and path at `origin`
    /// and apply the viewport. Completing this is the "map ready" signal
    /// that gates playback.
    async fn initialize(&mut self, origin: LatLng, viewport: ViewportConfig)
        -> SurfaceResult<()>;

    /// Move the vehicle marker
    async fn set_marker_position(&mut self, position: LatLng) -> SurfaceResult<()>;

    /// Extend the traveled-path polyline
    async fn append_path_point(&mut self, position: LatLng) -> SurfaceResult<()>;

    /// Re-center the viewport
    async fn pan_to(&mut self, position: LatLng) -> SurfaceResult<()>;

    /// Change the zoom level
    async fn set_zoom(&mut self, zoom: u8) -> SurfaceResult<()>;

    /// Collapse the traveled path back to a single point (reset)
    async fn reset_path(&mut self, origin: LatLng) -> SurfaceResult<()>;
}
