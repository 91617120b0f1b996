mod core;
mod input;
mod map;
mod playback;
mod tracker;

use map::ConsoleMapSurface;
use playback::{format_elapsed, PlaybackState};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracker::{SharedSurface, Tracker, TrackerSettings};
use tracing::{error, info};

/// Bundled demo route (Hyderabad), used when no route file is given
const DEMO_ROUTE: &str = include_str!("../routes/demo-route.json");

fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Create tokio runtime for the frame loop
    let rt = tokio::runtime::Runtime::new().expect("Failed to create Tokio runtime");

    let settings = TrackerSettings::load();

    // Route from argv, or the embedded demo route
    let route = match std::env::args().nth(1) {
        Some(path) => match input::load_file(&path) {
            Ok(route) => route,
            Err(e) => {
                // No route means no playback controls; nothing to do
                error!("failed to load route from {}: {}", path, e);
                return;
            }
        },
        None => input::parse_json(DEMO_ROUTE).expect("bundled demo route is valid"),
    };

    info!(
        "loaded route: {} points covering {}",
        route.len(),
        format_elapsed(route.duration_seconds())
    );

    let surface: SharedSurface = Arc::new(Mutex::new(ConsoleMapSurface::new("console")));
    let mut tracker = Tracker::with_config(
        route,
        settings.playback_config(),
        settings.viewport(),
        settings.frame_interval(),
        surface,
    );

    rt.block_on(async {
        if let Err(e) = tracker.init_map().await {
            error!("{}", e);
            return;
        }

        tracker.play().await;

        // Live readouts while the vehicle moves
        while tracker.state().await == PlaybackState::Playing {
            tokio::time::sleep(Duration::from_millis(500)).await;

            let status = tracker.status().await;
            info!(
                "position {} | elapsed {} | speed {} km/h | {:.0}%",
                tracker.displayed_position().await,
                format_elapsed(status.elapsed_time),
                status.speed,
                tracker.progress_percent().await
            );
        }

        tracker.wait_until_finished().await;

        let status = tracker.status().await;
        println!(
            "Route complete: {} points in {} (last segment {} km/h)",
            tracker.total_points().await,
            format_elapsed(status.elapsed_time),
            status.speed
        );
    });

    settings.save();
}
