use crate::core::geo::LatLng;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One timestamped GPS sample on a route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutePoint {
    /// Latitude in degrees
    pub latitude: f64,

    /// Longitude in degrees
    pub longitude: f64,

    /// Time the vehicle was at this point, UTC
    pub timestamp: DateTime<Utc>,
}

impl RoutePoint {
    pub fn new(latitude: f64, longitude: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            latitude,
            longitude,
            timestamp,
        }
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }

    /// Real time gap from `earlier` to this point, in seconds. May be
    /// negative for out-of-order samples.
    pub fn seconds_since(&self, earlier: &RoutePoint) -> f64 {
        (self.timestamp - earlier.timestamp).num_milliseconds() as f64 / 1000.0
    }
}

/// Errors loading a route from its source
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("failed to read route source: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed route data: {0}")]
    Malformed(String),

    #[error("route contains no points")]
    Empty,

    #[error("unrecognized route format")]
    UnknownFormat,
}

/// An ordered, immutable sequence of route points
///
/// Timestamps are assumed monotonically non-decreasing but this is not
/// enforced; out-of-order samples are logged and the speed computation
/// guards against them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    points: Vec<RoutePoint>,
}

impl Route {
    pub fn new(points: Vec<RoutePoint>) -> Result<Self, RouteError> {
        if points.is_empty() {
            return Err(RouteError::Empty);
        }

        for (i, pair) in points.windows(2).enumerate() {
            if pair[1].timestamp < pair[0].timestamp {
                tracing::warn!(
                    "route timestamps out of order at index {}: {} then {}",
                    i,
                    pair[0].timestamp,
                    pair[1].timestamp
                );
            }
        }

        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Index of the final point
    pub fn last_index(&self) -> usize {
        self.points.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&RoutePoint> {
        self.points.get(index)
    }

    pub fn first(&self) -> &RoutePoint {
        &self.points[0]
    }

    pub fn points(&self) -> &[RoutePoint] {
        &self.points
    }

    /// The two endpoints of the segment starting at `index`, if any
    pub fn segment(&self, index: usize) -> Option<(&RoutePoint, &RoutePoint)> {
        match (self.points.get(index), self.points.get(index + 1)) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        }
    }

    /// Total real route time in seconds, first point to last
    pub fn duration_seconds(&self) -> f64 {
        self.points[self.last_index()].seconds_since(&self.points[0])
    }
}
