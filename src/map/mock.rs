use crate::core::LatLng;
use crate::map::surface::{MapStatus, MapSurface, SurfaceResult, ViewportConfig};
use async_trait::async_trait;

/// Mock map surface for testing without a map widget
///
/// Records every call so tests can assert on the published position
/// stream, and can be told to fail calls to exercise the best-effort
/// publishing path.
pub struct MockMapSurface {
    name: String,
    status: MapStatus,
    viewport: Option<ViewportConfig>,
    marker_positions: Vec<LatLng>,
    path: Vec<LatLng>,
    pan_targets: Vec<LatLng>,
    zoom: Option<u8>,
    fail_updates: bool,
    fail_initialize: bool,
}

impl MockMapSurface {
    /// Create a new mock surface
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            status: MapStatus::Loading,
            viewport: None,
            marker_positions: Vec::new(),
            path: Vec::new(),
            pan_targets: Vec::new(),
            zoom: None,
            fail_updates: false,
            fail_initialize: false,
        }
    }

    /// Make every position update call fail
    pub fn set_fail_updates(&mut self, fail: bool) {
        self.fail_updates = fail;
    }

    /// Make the initialize handshake fail
    pub fn set_fail_initialize(&mut self, fail: bool) {
        self.fail_initialize = fail;
    }

    /// All marker positions published so far
    pub fn marker_positions(&self) -> &[LatLng] {
        &self.marker_positions
    }

    /// The traveled path as published so far
    pub fn path(&self) -> &[LatLng] {
        &self.path
    }

    /// All viewport re-centers published so far
    pub fn pan_targets(&self) -> &[LatLng] {
        &self.pan_targets
    }

    pub fn zoom(&self) -> Option<u8> {
        self.zoom
    }

    fn guard(&self) -> SurfaceResult<()> {
        if self.status != MapStatus::Ready {
            return Err("surface not ready".into());
        }
        if self.fail_updates {
            return Err("injected update failure".into());
        }
        Ok(())
    }
}

#[async_trait]
impl MapSurface for MockMapSurface {
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
        if self.fail_initialize {
            self.status = MapStatus::Error;
            return Err("injected initialize failure".into());
        }

        self.zoom = Some(viewport.zoom);
        self.viewport = Some(viewport);
        self.marker_positions.push(origin);
        self.path = vec![origin];
        self.pan_targets.push(origin);
        self.status = MapStatus::Ready;
        Ok(())
    }

    async fn set_marker_position(&mut self, position: LatLng) -> SurfaceResult<()> {
        self.guard()?;
        self.marker_positions.push(position);
        Ok(())
    }

    async fn append_path_point(&mut self, position: LatLng) -> SurfaceResult<()> {
        self.guard()?;
        self.path.push(position);
        Ok(())
    }

    async fn pan_to(&mut self, position: LatLng) -> SurfaceResult<()> {
        self.guard()?;
        self.pan_targets.push(position);
        Ok(())
    }

    async fn set_zoom(&mut self, zoom: u8) -> SurfaceResult<()> {
        self.guard()?;
        self.zoom = Some(zoom);
        Ok(())
    }

    async fn reset_path(&mut self, origin: LatLng) -> SurfaceResult<()> {
        self.guard()?;
        self.path = vec![origin];
        Ok(())
    }
}
