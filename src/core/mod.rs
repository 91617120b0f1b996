pub mod geo;
pub mod route;

pub use geo::LatLng;
pub use route::{Route, RouteError, RoutePoint};
