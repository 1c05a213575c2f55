use std::time::Duration;

use futures::StreamExt;
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};
use tokio::time;
use tracing::{debug, error, warn};

use crate::handlers::provider::LocationProvider;
use crate::models::error::TrackerError;
use crate::models::position::Coordinate;

struct AutoCancelTask<T>(pub JoinHandle<T>);

impl<T> Drop for AutoCancelTask<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

pub struct TrackerConfig {
    /// Bound on acquiring the first fix. Later gaps between fixes are not
    /// timed out; a stationary device is not an error.
    pub fix_timeout: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            fix_timeout: Duration::from_secs(5),
        }
    }
}

/// Handle to one live watch. Stopping is idempotent and also happens on
/// Drop; callbacks are never invoked after stop.
pub struct SubscriptionHandle {
    watch_id: u64,
    task: Option<AutoCancelTask<()>>,
}

impl SubscriptionHandle {
    pub fn stop(&mut self) {
        self.task.take();
    }

    pub fn is_active(&self) -> bool {
        self.task.as_ref().map(|t| !t.0.is_finished()).unwrap_or(false)
    }
}

/// Continuous location watch over a [`LocationProvider`]. Holds at most one
/// live platform subscription: starting again aborts the previous watch
/// first. The most recent Coordinate is published on a `watch` channel for
/// any number of read-only consumers.
pub struct LocationTracker {
    config: TrackerConfig,
    latest: watch::Sender<Option<Coordinate>>,
    next_watch_id: u64,
    active: Option<(u64, AbortHandle)>,
}

impl LocationTracker {
    pub fn new(config: TrackerConfig) -> Self {
        let (latest, _) = watch::channel(None);
        Self {
            config,
            latest,
            next_watch_id: 0,
            active: None,
        }
    }

    /// Latest-Coordinate channel; `None` until the first fix arrives.
    pub fn subscribe_latest(&self) -> watch::Receiver<Option<Coordinate>> {
        self.latest.subscribe()
    }

    /// Begins a continuous watch. `on_update` receives each newer valid
    /// Coordinate; out-of-bounds fixes are dropped. Every failure surfaces
    /// through `on_error`; nothing panics across this boundary.
    pub fn start_tracking<P, U, E>(
        &mut self,
        mut provider: P,
        on_update: U,
        on_error: E,
    ) -> SubscriptionHandle
    where
        P: LocationProvider,
        U: Fn(Coordinate) + Send + Sync + 'static,
        E: Fn(TrackerError) + Send + Sync + 'static,
    {
        if let Some((_, previous)) = self.active.take() {
            debug!("aborting previous location watch");
            previous.abort();
        }

        let latest = self.latest.clone();
        let fix_timeout = self.config.fix_timeout;
        let task = tokio::spawn(async move {
            // The bound covers opening the watch and the first fix; a
            // provider that hangs while opening is a timeout too.
            let acquire = async {
                let mut stream = provider.watch_position().await?;
                let first = stream.next().await;
                Ok::<_, TrackerError>((stream, first))
            };
            let (mut stream, mut next) = match time::timeout(fix_timeout, acquire).await {
                Ok(Ok(acquired)) => acquired,
                Ok(Err(e)) => {
                    error!("could not open location watch: {}", e);
                    on_error(e);
                    return;
                }
                Err(_) => {
                    error!("no fix within {:?}", fix_timeout);
                    on_error(TrackerError::Timeout);
                    return;
                }
            };

            loop {
                match next {
                    Some(Ok(fix)) if fix.is_valid() => {
                        latest.send_replace(Some(fix));
                        on_update(fix);
                    }
                    Some(Ok(fix)) => {
                        warn!("dropping out-of-bounds fix ({}, {})", fix.lat, fix.lon);
                    }
                    Some(Err(e)) => {
                        error!("location watch failed: {}", e);
                        on_error(e);
                        return;
                    }
                    None => {
                        debug!("position stream ended");
                        return;
                    }
                }
                next = stream.next().await;
            }
        });

        let watch_id = self.next_watch_id;
        self.next_watch_id += 1;
        self.active = Some((watch_id, task.abort_handle()));
        SubscriptionHandle {
            watch_id,
            task: Some(AutoCancelTask(task)),
        }
    }

    /// Releases the watch behind `handle`. Safe to call on an already
    /// stopped or superseded handle: the record of the live watch is only
    /// cleared when `handle` is the one holding it.
    pub fn stop_tracking(&mut self, mut handle: SubscriptionHandle) {
        handle.stop();
        if matches!(self.active, Some((id, _)) if id == handle.watch_id) {
            self.active = None;
        }
    }
}
