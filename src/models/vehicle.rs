use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Latest known telemetry for one vehicle. One row per `vehicle_id`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct VehicleSnapshot {
    pub vehicle_id: String,
    pub has_patient: bool,
    pub heart_rate: i32,
    pub spo2: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub last_updated: DateTime<Utc>,
}

impl VehicleSnapshot {
    /// An empty record for a freshly provisioned vehicle.
    pub fn provisioned(vehicle_id: String, latitude: f64, longitude: f64, now: DateTime<Utc>) -> Self {
        Self {
            vehicle_id,
            has_patient: false,
            heart_rate: 0,
            spo2: 0,
            latitude,
            longitude,
            last_updated: now,
        }
    }
}

/// Operational state derived at read time. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleStatus {
    Offline,
    Idle,
    Emergency,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Offline => "OFFLINE",
            Self::Idle => "IDLE",
            Self::Emergency => "EMERGENCY",
        }
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_as_wire_label() {
        assert_eq!(serde_json::to_string(&VehicleStatus::Emergency).unwrap(), "\"EMERGENCY\"");
        assert_eq!(serde_json::to_string(&VehicleStatus::Offline).unwrap(), "\"OFFLINE\"");
        let idle: VehicleStatus = serde_json::from_str("\"IDLE\"").unwrap();
        assert_eq!(idle, VehicleStatus::Idle);
        assert!(serde_json::from_str::<VehicleStatus>("\"EN_ROUTE\"").is_err());
    }
}
