use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::vehicle::{VehicleSnapshot, VehicleStatus};

/// Blood pressure is never measured by the devices.
pub const BLOOD_PRESSURE_PLACEHOLDER: &str = "--/--";

/// One element of the `GET /api/ambulance/status` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRecord {
    pub vehicle_id: String,
    pub status: VehicleStatus,
    pub last_updated: DateTime<Utc>,
    pub location: Location,
    pub patient: Patient,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub is_onboard: bool,
    pub vitals: Vitals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    #[serde(rename = "heartRate")]
    pub heart_rate: i32,
    #[serde(rename = "spO2")]
    pub spo2: i32,
    #[serde(rename = "bloodPressure")]
    pub blood_pressure: String,
}

impl StatusRecord {
    pub fn from_snapshot(snapshot: &VehicleSnapshot, status: VehicleStatus) -> Self {
        Self {
            vehicle_id: snapshot.vehicle_id.clone(),
            status,
            last_updated: snapshot.last_updated,
            location: Location {
                latitude: snapshot.latitude,
                longitude: snapshot.longitude,
            },
            patient: Patient {
                is_onboard: snapshot.has_patient,
                vitals: Vitals {
                    heart_rate: snapshot.heart_rate,
                    spo2: snapshot.spo2,
                    blood_pressure: BLOOD_PRESSURE_PLACEHOLDER.to_string(),
                },
            },
        }
    }
}
