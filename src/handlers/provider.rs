use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use futures::Stream;

use crate::models::error::TrackerError;
use crate::models::position::Coordinate;

pub type PositionStream = Pin<Box<dyn Stream<Item = Result<Coordinate, TrackerError>> + Send>>;

/// Platform location capability. Opening the watch fails up front with
/// `PermissionDenied` or `Unavailable`; once open, the stream yields fixes
/// until it ends or the subscriber drops it.
#[async_trait]
pub trait LocationProvider: Send + 'static {
    async fn watch_position(&mut self) -> Result<PositionStream, TrackerError>;
}

/// Replays a fixed coordinate path on an interval. Stands in for a real
/// device in the demo binary and in tests.
pub struct SimulatedProvider {
    path: Vec<Coordinate>,
    interval: Duration,
}

impl SimulatedProvider {
    pub fn new(path: Vec<Coordinate>, interval: Duration) -> Self {
        Self { path, interval }
    }
}

#[async_trait]
impl LocationProvider for SimulatedProvider {
    async fn watch_position(&mut self) -> Result<PositionStream, TrackerError> {
        let path = std::mem::take(&mut self.path);
        let interval = self.interval;
        Ok(Box::pin(async_stream::stream! {
            for fix in path {
                tokio::time::sleep(interval).await;
                yield Ok(fix);
            }
        }))
    }
}
