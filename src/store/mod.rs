pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::vehicle::VehicleSnapshot;

pub use memory::MemoryVehicleStore;
pub use postgres::PgVehicleStore;

/// Latest-snapshot-per-vehicle storage.
///
/// Writes to one `vehicle_id` are serialized by the backend; a reader sees a
/// whole snapshot from some committed write, never a mix of two.
#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// Create or fully overwrite the snapshot for `snapshot.vehicle_id`.
    async fn upsert(&self, snapshot: VehicleSnapshot) -> Result<(), StoreError>;

    /// Insert only when no record exists. Returns `true` if a record was created.
    async fn provision(&self, snapshot: VehicleSnapshot) -> Result<bool, StoreError>;

    async fn get(&self, vehicle_id: &str) -> Result<Option<VehicleSnapshot>, StoreError>;

    /// Every stored snapshot, ordered by vehicle id.
    async fn list(&self) -> Result<Vec<VehicleSnapshot>, StoreError>;

    /// Returns `true` if a record was removed.
    async fn remove(&self, vehicle_id: &str) -> Result<bool, StoreError>;

    /// Release backend resources. Called once on shutdown.
    async fn close(&self) {}
}
