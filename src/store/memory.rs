use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::VehicleStore;
use crate::error::StoreError;
use crate::models::vehicle::VehicleSnapshot;

/// Process-local store. Snapshots are replaced whole under the write lock.
#[derive(Default)]
pub struct MemoryVehicleStore {
    snapshots: RwLock<BTreeMap<String, VehicleSnapshot>>,
}

impl MemoryVehicleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VehicleStore for MemoryVehicleStore {
    async fn upsert(&self, snapshot: VehicleSnapshot) -> Result<(), StoreError> {
        let mut snapshots = self.snapshots.write().await;
        snapshots.insert(snapshot.vehicle_id.clone(), snapshot);
        Ok(())
    }

    async fn provision(&self, snapshot: VehicleSnapshot) -> Result<bool, StoreError> {
        let mut snapshots = self.snapshots.write().await;
        if snapshots.contains_key(&snapshot.vehicle_id) {
            return Ok(false);
        }
        snapshots.insert(snapshot.vehicle_id.clone(), snapshot);
        Ok(true)
    }

    async fn get(&self, vehicle_id: &str) -> Result<Option<VehicleSnapshot>, StoreError> {
        Ok(self.snapshots.read().await.get(vehicle_id).cloned())
    }

    async fn list(&self) -> Result<Vec<VehicleSnapshot>, StoreError> {
        Ok(self.snapshots.read().await.values().cloned().collect())
    }

    async fn remove(&self, vehicle_id: &str) -> Result<bool, StoreError> {
        Ok(self.snapshots.write().await.remove(vehicle_id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use std::sync::Arc;

    fn snapshot(id: &str, heart_rate: i32) -> VehicleSnapshot {
        VehicleSnapshot {
            vehicle_id: id.to_string(),
            has_patient: heart_rate > 0,
            heart_rate,
            spo2: if heart_rate > 0 { 95 } else { 0 },
            latitude: 12.97,
            longitude: 77.59,
            last_updated: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_upsert_overwrites_single_record() {
        let store = MemoryVehicleStore::new();
        let first = snapshot("AMB_001", 0);
        let mut second = snapshot("AMB_001", 110);
        second.last_updated = first.last_updated + Duration::seconds(3);

        store.upsert(first).await.unwrap();
        store.upsert(second.clone()).await.unwrap();

        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], second);
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let store = MemoryVehicleStore::new();
        for id in ["AMB_003", "AMB_001", "AMB_002"] {
            store.upsert(snapshot(id, 0)).await.unwrap();
        }

        let ids: Vec<String> = store.list().await.unwrap().into_iter().map(|s| s.vehicle_id).collect();
        assert_eq!(ids, vec!["AMB_001", "AMB_002", "AMB_003"]);
    }

    #[tokio::test]
    async fn test_provision_keeps_existing_record() {
        let store = MemoryVehicleStore::new();
        let live = snapshot("AMB_004", 120);
        store.upsert(live.clone()).await.unwrap();

        let created = store.provision(snapshot("AMB_004", 0)).await.unwrap();
        assert!(!created);
        assert_eq!(store.get("AMB_004").await.unwrap(), Some(live));

        assert!(store.provision(snapshot("AMB_005", 0)).await.unwrap());
    }

    #[tokio::test]
    async fn test_remove() {
        let store = MemoryVehicleStore::new();
        store.upsert(snapshot("AMB_006", 0)).await.unwrap();

        assert!(store.remove("AMB_006").await.unwrap());
        assert!(!store.remove("AMB_006").await.unwrap());
        assert!(store.get("AMB_006").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_writers_never_tear_snapshots() {
        let store = Arc::new(MemoryVehicleStore::new());
        let mut handles = Vec::new();

        for i in 1..=50 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                // heart_rate and spo2 move together so a torn write would be visible
                let mut s = snapshot("AMB_010", 60 + i);
                s.spo2 = 60 + i;
                store.upsert(s).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].heart_rate, all[0].spo2);
    }
}
