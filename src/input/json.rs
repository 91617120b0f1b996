use crate::core::{Route, RouteError, RoutePoint};

/// Parse a JSON route document: an array of
/// `{latitude, longitude, timestamp}` objects.
///
/// Missing fields, non-numeric coordinates and unparseable timestamps all
/// surface as `RouteError::Malformed`.
pub fn parse_json(text: &str) -> Result<Route, RouteError> {
    let points: Vec<RoutePoint> =
        serde_json::from_str(text).map_err(|e| RouteError::Malformed(e.to_string()))?;

    Route::new(points)
}
