use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::message_processor::{snapshot_from_provision, snapshot_from_update};
use super::status::derive_status;
use crate::error::ApiError;
use crate::models::message::{ProvisionMessage, UpdateMessage};
use crate::models::status::StatusRecord;
use crate::models::vehicle::VehicleSnapshot;
use crate::store::VehicleStore;

/// Ingestion and fleet-status operations over a `VehicleStore`.
///
/// `now` is always supplied by the caller so that request handlers stamp
/// server time and tests can pin the clock.
pub struct TelemetryService {
    store: Arc<dyn VehicleStore>,
    offline_threshold: Duration,
}

impl TelemetryService {
    pub fn new(store: Arc<dyn VehicleStore>, offline_threshold: Duration) -> Self {
        Self {
            store,
            offline_threshold,
        }
    }

    pub fn offline_threshold(&self) -> Duration {
        self.offline_threshold
    }

    pub async fn ingest(&self, message: UpdateMessage, now: DateTime<Utc>) -> Result<VehicleSnapshot, ApiError> {
        let correlation_id = Uuid::new_v4();

        let snapshot = match snapshot_from_update(message, now) {
            Ok(s) => s,
            Err(e) => {
                warn!(%correlation_id, "Rejected telemetry update: {}", e);
                return Err(e);
            }
        };

        debug!(%correlation_id, "Upserting snapshot {:?}", snapshot);

        if let Err(e) = self.store.upsert(snapshot.clone()).await {
            error!(%correlation_id, vehicle_id = %snapshot.vehicle_id, "Save error: {}", e);
            return Err(e.into());
        }

        info!(
            %correlation_id,
            vehicle_id = %snapshot.vehicle_id,
            has_patient = snapshot.has_patient,
            "Telemetry updated"
        );
        Ok(snapshot)
    }

    /// The whole fleet with status derived against `now`.
    pub async fn fleet_status(&self, now: DateTime<Utc>) -> Result<Vec<StatusRecord>, ApiError> {
        let snapshots = self.store.list().await.map_err(|e| {
            error!("Fetch error: {}", e);
            ApiError::from(e)
        })?;

        Ok(snapshots
            .iter()
            .map(|s| StatusRecord::from_snapshot(s, derive_status(s, now, self.offline_threshold)))
            .collect())
    }

    /// Returns `true` if a new record was created.
    pub async fn provision(&self, message: ProvisionMessage, now: DateTime<Utc>) -> Result<bool, ApiError> {
        let snapshot = snapshot_from_provision(message, now)?;
        let vehicle_id = snapshot.vehicle_id.clone();

        let created = self.store.provision(snapshot).await.map_err(|e| {
            error!(%vehicle_id, "Provision error: {}", e);
            ApiError::from(e)
        })?;

        if created {
            info!(%vehicle_id, "Provisioned vehicle");
        } else {
            info!(%vehicle_id, "Vehicle already provisioned, left untouched");
        }
        Ok(created)
    }

    pub async fn remove(&self, vehicle_id: &str) -> Result<(), ApiError> {
        let removed = self.store.remove(vehicle_id).await.map_err(|e| {
            error!(%vehicle_id, "Remove error: {}", e);
            ApiError::from(e)
        })?;

        if !removed {
            return Err(ApiError::NotFound(format!("ambulance {} not found", vehicle_id)));
        }

        info!(%vehicle_id, "Removed vehicle");
        Ok(())
    }

    pub async fn shutdown(&self) {
        self.store.close().await;
    }
}
