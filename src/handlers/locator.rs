use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tracing::{error, info};

use crate::handlers::ranker::{find_nearby, nearest};
use crate::models::position::{Coordinate, Distance};
use crate::models::store::Store;

/// A user pressing the locate button. Searches run only on request, never
/// automatically on location updates.
#[derive(Debug, Clone, Copy)]
pub struct SearchRequest;

/// Instructions for the presentation surface (map widget + notification
/// area). The core renders nothing itself.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub enum SurfaceCommand {
    PlaceUserMarker(Coordinate),
    PlaceStoreMarkers(Vec<Store>),
    DrawRoute {
        from: Coordinate,
        to: Coordinate,
        length: Distance,
    },
    Notify(String),
}

/// Serves nearby-store searches over the latest tracked Coordinate and the
/// fixed store list. Results are recomputed fresh on every request, since
/// the fix may have moved, and forwarded to the surface as commands. Failures
/// become plain-language notifications; the actor keeps serving.
pub struct StoreLocatorActor {
    requests: mpsc::Receiver<SearchRequest>,
    position: watch::Receiver<Option<Coordinate>>,
    stores: Vec<Store>,
    radius_km: f64,
    surface: mpsc::Sender<SurfaceCommand>,
}

impl StoreLocatorActor {
    pub fn new(
        requests: mpsc::Receiver<SearchRequest>,
        position: watch::Receiver<Option<Coordinate>>,
        stores: Vec<Store>,
        radius_km: f64,
        surface: mpsc::Sender<SurfaceCommand>,
    ) -> Self {
        Self {
            requests,
            position,
            stores,
            radius_km,
            surface,
        }
    }

    pub async fn run_actor(mut self) {
        while let Some(SearchRequest) = self.requests.recv().await {
            for command in self.handle_search() {
                if self.surface.send(command).await.is_err() {
                    info!("surface channel closed");
                    return;
                }
            }
        }
        info!("request channel closed");
    }

    fn handle_search(&self) -> Vec<SurfaceCommand> {
        let user = match *self.position.borrow() {
            Some(fix) => fix,
            None => {
                return vec![SurfaceCommand::Notify(
                    "Waiting for a location fix. Try again shortly.".to_string(),
                )]
            }
        };

        let candidates = match find_nearby(user, &self.stores, self.radius_km) {
            Ok(candidates) => candidates,
            Err(e) => {
                error!("nearby search failed: {}", e);
                return vec![SurfaceCommand::Notify(format!("Could not search stores: {}", e))];
            }
        };

        let mut commands = vec![
            SurfaceCommand::Notify("Location found".to_string()),
            SurfaceCommand::PlaceUserMarker(user),
            SurfaceCommand::PlaceStoreMarkers(self.stores.clone()),
        ];

        match nearest(&candidates) {
            Some((store, km)) => {
                commands.push(SurfaceCommand::DrawRoute {
                    from: user,
                    to: store.position,
                    length: Distance::new(km),
                });
                commands.push(SurfaceCommand::Notify(format!(
                    "Distance to {}: {:.2} km",
                    store.name, km
                )));
            }
            None => commands.push(SurfaceCommand::Notify(format!(
                "No stores found within {} km",
                self.radius_km
            ))),
        }

        commands
    }
}
