use crate::core::{Route, RouteError, RoutePoint};
use chrono::{DateTime, TimeZone, Utc};

/// Parse a CSV route document
///
/// Supports flexible column names:
/// - latitude,longitude,timestamp
/// - lat,lng,time
/// - lat,lon,ts
///
/// Timestamps are RFC 3339 strings or Unix epoch seconds.
pub fn parse_csv(data: &[u8]) -> Result<Route, RouteError> {
    let mut rdr = csv::Reader::from_reader(data);

    let headers = rdr
        .headers()
        .map_err(|e| RouteError::Malformed(format!("failed to read CSV header: {}", e)))?;
    let (lat_idx, lng_idx, time_idx) = detect_columns(headers)?;

    let mut points = Vec::new();

    for (row, result) in rdr.records().enumerate() {
        let record =
            result.map_err(|e| RouteError::Malformed(format!("row {}: {}", row + 1, e)))?;

        let latitude = parse_coord(&record, lat_idx, "latitude", row)?;
        let longitude = parse_coord(&record, lng_idx, "longitude", row)?;

        let raw_time = record
            .get(time_idx)
            .ok_or_else(|| RouteError::Malformed(format!("row {}: missing timestamp", row + 1)))?;
        let timestamp = parse_timestamp(raw_time)
            .ok_or_else(|| {
                RouteError::Malformed(format!("row {}: bad timestamp {:?}", row + 1, raw_time))
            })?;

        points.push(RoutePoint::new(latitude, longitude, timestamp));
    }

    Route::new(points)
}

fn parse_coord(
    record: &csv::StringRecord,
    idx: usize,
    name: &str,
    row: usize,
) -> Result<f64, RouteError> {
    record
        .get(idx)
        .and_then(|s| s.trim().parse::<f64>().ok())
        .ok_or_else(|| RouteError::Malformed(format!("row {}: non-numeric {}", row + 1, name)))
}

/// RFC 3339 first, then epoch seconds (possibly fractional)
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    raw.parse::<f64>()
        .ok()
        .and_then(|secs| Utc.timestamp_millis_opt((secs * 1000.0) as i64).single())
}

/// Detect column indices from CSV headers
fn detect_columns(headers: &csv::StringRecord) -> Result<(usize, usize, usize), RouteError> {
    let lat_idx = find_column(headers, &["latitude", "lat"])?;
    let lng_idx = find_column(headers, &["longitude", "lng", "lon", "long"])?;
    let time_idx = find_column(headers, &["timestamp", "time", "t", "ts"])?;

    Ok((lat_idx, lng_idx, time_idx))
}

/// Find a column by checking possible names
fn find_column(headers: &csv::StringRecord, names: &[&str]) -> Result<usize, RouteError> {
    for (idx, header) in headers.iter().enumerate() {
        let header_lower = header.trim().to_lowercase();
        if names.iter().any(|&name| header_lower == name) {
            return Ok(idx);
        }
    }

    Err(RouteError::Malformed(format!(
        "could not find column with names: {:?}",
        names
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339_rows() {
        let data = b"latitude,longitude,timestamp\n\
                     17.385044,78.486671,2024-07-20T10:00:00Z\n\
                     17.385045,78.486672,2024-07-20T10:00:05Z\n";

        let route = parse_csv(data).unwrap();
        assert_eq!(route.len(), 2);
        let (a, b) = route.segment(0).unwrap();
        assert_eq!(b.seconds_since(a), 5.0);
    }

    #[test]
    fn test_parse_alternate_headers_and_epoch_seconds() {
        let data = b"lat,lon,ts\n17.385044,78.486671,1721469600\n17.385045,78.486672,1721469605.5\n";

        let route = parse_csv(data).unwrap();
        assert_eq!(route.len(), 2);
        let (a, b) = route.segment(0).unwrap();
        assert_eq!(b.seconds_since(a), 5.5);
    }

    #[test]
    fn test_missing_column_is_malformed() {
        let data = b"latitude,timestamp\n17.385044,2024-07-20T10:00:00Z\n";
        assert!(matches!(parse_csv(data), Err(RouteError::Malformed(_))));
    }

    #[test]
    fn test_non_numeric_coordinate_is_malformed() {
        let data = b"latitude,longitude,timestamp\nnorth,78.486671,2024-07-20T10:00:00Z\n";
        assert!(matches!(parse_csv(data), Err(RouteError::Malformed(_))));
    }

    #[test]
    fn test_header_only_is_empty_route() {
        let data = b"latitude,longitude,timestamp\n";
        assert!(matches!(parse_csv(data), Err(RouteError::Empty)));
    }
}
