pub mod csv;
pub mod json;

pub use csv::parse_csv;
pub use json::parse_json;

use crate::core::{Route, RouteError};

/// Input format detection result
#[derive(Debug, Clone)]
pub enum RouteFormat {
    Json,
    Csv,
    Unknown,
}

/// Detect the format of a route document from its leading bytes
pub fn detect_format(data: &[u8]) -> RouteFormat {
    if is_json(data) {
        return RouteFormat::Json;
    }

    if is_csv(data) {
        return RouteFormat::Csv;
    }

    RouteFormat::Unknown
}

fn is_json(data: &[u8]) -> bool {
    // A route document is a JSON array of point objects
    data.iter()
        .find(|b| !b.is_ascii_whitespace())
        .map(|&b| b == b'[')
        .unwrap_or(false)
}

fn is_csv(data: &[u8]) -> bool {
    // Text with a comma-separated header line
    if data.len() < 10 {
        return false;
    }

    let sample = std::str::from_utf8(&data[..data.len().min(500)]);
    match sample {
        Ok(text) => text
            .lines()
            .take(5)
            .any(|line| line.chars().filter(|&c| c == ',').count() >= 2),
        Err(_) => false,
    }
}

/// Load a route from a file, auto-detecting the format
pub fn load_file(path: &str) -> Result<Route, RouteError> {
    let data = std::fs::read(path)?;

    match detect_format(&data) {
        RouteFormat::Json => {
            let text = std::str::from_utf8(&data)
                .map_err(|e| RouteError::Malformed(format!("route file is not UTF-8: {}", e)))?;
            parse_json(text)
        }
        RouteFormat::Csv => parse_csv(&data),
        RouteFormat::Unknown => Err(RouteError::UnknownFormat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_json() {
        let data = br#"  [{"latitude": 17.0, "longitude": 78.0, "timestamp": "2024-07-20T10:00:00Z"}]"#;
        assert!(matches!(detect_format(data), RouteFormat::Json));
    }

    #[test]
    fn test_detect_csv() {
        let data = b"latitude,longitude,timestamp\n17.0,78.0,2024-07-20T10:00:00Z\n";
        assert!(matches!(detect_format(data), RouteFormat::Csv));
    }

    #[test]
    fn test_detect_unknown() {
        assert!(matches!(
            detect_format(b"<html>not a route</html>"),
            RouteFormat::Unknown
        ));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        assert!(matches!(
            load_file("/nonexistent/route.json"),
            Err(RouteError::Io(_))
        ));
    }
}
