//! Store locator demo.
//!
//! Run it with
//! ```not_rust
//! cargo run
//! ```
//!
//! A simulated device walks a short path near the Mumbai outlet; once the
//! first fix arrives a search fires, and the surface commands the map
//! widget would receive are logged as JSON.

use std::{env, time::Duration};

use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pharmacy_locator::handlers::locator::{SearchRequest, StoreLocatorActor};
use pharmacy_locator::handlers::provider::SimulatedProvider;
use pharmacy_locator::handlers::tracker::{LocationTracker, TrackerConfig};
use pharmacy_locator::models::position::Coordinate;
use pharmacy_locator::models::store::SAMPLE_STORES;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pharmacy_locator=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let radius_km = env::var("SEARCH_RADIUS_KM")
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(10.0);
    let fix_timeout = env::var("FIX_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(TrackerConfig::default().fix_timeout);
    info!("search radius {} km, fix timeout {:?}", radius_km, fix_timeout);

    // Stands in for the map widget and notification area.
    let (surface_tx, mut surface_rx) = mpsc::channel(16);
    tokio::spawn(async move {
        while let Some(command) = surface_rx.recv().await {
            info!("surface <- {}", serde_json::to_string(&command).unwrap());
        }
    });

    let mut tracker = LocationTracker::new(TrackerConfig { fix_timeout });
    let (request_tx, request_rx) = mpsc::channel(4);
    let locator = StoreLocatorActor::new(
        request_rx,
        tracker.subscribe_latest(),
        SAMPLE_STORES.clone(),
        radius_km,
        surface_tx,
    );
    tokio::spawn(locator.run_actor());

    let walk = vec![
        Coordinate::new(19.0728, 72.8826),
        Coordinate::new(19.0745, 72.8801),
        Coordinate::new(19.0760, 72.8777),
    ];
    let provider = SimulatedProvider::new(walk, Duration::from_millis(500));

    let mut position = tracker.subscribe_latest();
    let handle = tracker.start_tracking(
        provider,
        |fix| info!("fix ({:.4}, {:.4})", fix.lat, fix.lon),
        |e| error!("tracking failed: {}", e),
    );

    // Search once the first fix lands, like the user pressing the locate
    // button right after granting access.
    position.changed().await.unwrap();
    request_tx.send(SearchRequest).await.unwrap();

    tokio::time::sleep(Duration::from_secs(2)).await;
    tracker.stop_tracking(handle);
    info!("watch released");
}
