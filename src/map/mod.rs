pub mod console;
pub mod mock;
pub mod surface;

pub use console::ConsoleMapSurface;
pub use mock::MockMapSurface;
pub use surface::{MapStatus, MapSurface, SurfaceResult, ViewportConfig};
