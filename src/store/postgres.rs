use async_trait::async_trait;

use super::VehicleStore;
use crate::db::{queries, DbPool};
use crate::error::StoreError;
use crate::models::vehicle::VehicleSnapshot;

pub struct PgVehicleStore {
    pool: DbPool,
}

impl PgVehicleStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleStore for PgVehicleStore {
    async fn upsert(&self, snapshot: VehicleSnapshot) -> Result<(), StoreError> {
        sqlx::query(queries::UPSERT_SNAPSHOT)
            .bind(&snapshot.vehicle_id)
            .bind(snapshot.has_patient)
            .bind(snapshot.heart_rate)
            .bind(snapshot.spo2)
            .bind(snapshot.latitude)
            .bind(snapshot.longitude)
            .bind(snapshot.last_updated)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn provision(&self, snapshot: VehicleSnapshot) -> Result<bool, StoreError> {
        let result = sqlx::query(queries::INSERT_SNAPSHOT_IF_ABSENT)
            .bind(&snapshot.vehicle_id)
            .bind(snapshot.has_patient)
            .bind(snapshot.heart_rate)
            .bind(snapshot.spo2)
            .bind(snapshot.latitude)
            .bind(snapshot.longitude)
            .bind(snapshot.last_updated)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn get(&self, vehicle_id: &str) -> Result<Option<VehicleSnapshot>, StoreError> {
        let snapshot = sqlx::query_as::<_, VehicleSnapshot>(queries::SELECT_SNAPSHOT)
            .bind(vehicle_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(snapshot)
    }

    async fn list(&self) -> Result<Vec<VehicleSnapshot>, StoreError> {
        let snapshots = sqlx::query_as::<_, VehicleSnapshot>(queries::SELECT_ALL_SNAPSHOTS)
            .fetch_all(&self.pool)
            .await?;

        Ok(snapshots)
    }

    async fn remove(&self, vehicle_id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query(queries::DELETE_SNAPSHOT)
            .bind(vehicle_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
