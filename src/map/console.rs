use crate::core::LatLng;
use crate::map::surface::{MapStatus, MapSurface, SurfaceResult, ViewportConfig};
use async_trait::async_trait;
use tracing::{debug, info};

/// Headless map surface that logs position updates instead of drawing them
///
/// Stands in for a hosted map widget when running without a display.
pub struct ConsoleMapSurface {
    name: String,
    status: MapStatus,
    zoom: u8,
}

impl ConsoleMapSurface {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            status: MapStatus::Loading,
            zoom: 16,
        }
    }
}

#[async_trait]
impl MapSurface for ConsoleMapSurface {
    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> MapStatus {
        self.status
    }

    async fn initialize(
        &mut self,
        origin: LatLng,
        viewport: ViewportConfig,
    ) -> SurfaceResult<()> {
        self.zoom = viewport.zoom;
        self.status = MapStatus::Ready;
        info!("map surface {} ready at {} (zoom {})", self.name, origin, self.zoom);
        Ok(())
    }

    async fn set_marker_position(&mut self, position: LatLng) -> SurfaceResult<()> {
        debug!("marker -> {}", position);
        Ok(())
    }

    async fn append_path_point(&mut self, position: LatLng) -> SurfaceResult<()> {
        debug!("path += {}", position);
        Ok(())
    }

    async fn pan_to(&mut self, position: LatLng) -> SurfaceResult<()> {
        debug!("pan -> {}", position);
        Ok(())
    }

    async fn set_zoom(&mut self, zoom: u8) -> SurfaceResult<()> {
        self.zoom = zoom;
        debug!("zoom -> {}", zoom);
        Ok(())
    }

    async fn reset_path(&mut self, origin: LatLng) -> SurfaceResult<()> {
        info!("path reset to {}", origin);
        Ok(())
    }
}
