use chrono::{DateTime, Utc};

use crate::error::ApiError;
use crate::models::message::{ProvisionMessage, UpdateMessage};
use crate::models::vehicle::VehicleSnapshot;

/// Turn an update message into the snapshot to store, stamped with the
/// server's `now`. Fails without side effects when the id or a coordinate is
/// missing or out of range.
pub fn snapshot_from_update(message: UpdateMessage, now: DateTime<Utc>) -> Result<VehicleSnapshot, ApiError> {
    let vehicle_id = require_id(message.ambulance_id)?;
    let (latitude, longitude) = require_coordinates(message.latitude, message.longitude)?;

    let has_patient = message.has_patient.unwrap_or(false);
    // Vitals without a patient are meaningless; store zeros.
    let (heart_rate, spo2) = if has_patient {
        (message.heart_rate.unwrap_or(0), message.spo2.unwrap_or(0))
    } else {
        (0, 0)
    };

    Ok(VehicleSnapshot {
        vehicle_id,
        has_patient,
        heart_rate,
        spo2,
        latitude,
        longitude,
        last_updated: now,
    })
}

pub fn snapshot_from_provision(
    message: ProvisionMessage,
    now: DateTime<Utc>,
) -> Result<VehicleSnapshot, ApiError> {
    let vehicle_id = require_id(message.ambulance_id)?;
    let (latitude, longitude) = require_coordinates(message.latitude, message.longitude)?;

    Ok(VehicleSnapshot::provisioned(vehicle_id, latitude, longitude, now))
}

fn require_id(id: Option<String>) -> Result<String, ApiError> {
    match id {
        Some(id) if !id.trim().is_empty() => Ok(id),
        _ => Err(ApiError::Validation("ambulanceId required".to_string())),
    }
}

fn require_coordinates(latitude: Option<f64>, longitude: Option<f64>) -> Result<(f64, f64), ApiError> {
    let (latitude, longitude) = match (latitude, longitude) {
        (Some(lat), Some(lng)) => (lat, lng),
        (None, Some(_)) => return Err(ApiError::Validation("latitude required".to_string())),
        (Some(_), None) => return Err(ApiError::Validation("longitude required".to_string())),
        (None, None) => {
            return Err(ApiError::Validation("latitude and longitude required".to_string()))
        }
    };

    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ApiError::Validation(format!("latitude {} out of range [-90, 90]", latitude)));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ApiError::Validation(format!(
            "longitude {} out of range [-180, 180]",
            longitude
        )));
    }

    Ok((latitude, longitude))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(id: Option<&str>) -> UpdateMessage {
        UpdateMessage {
            ambulance_id: id.map(str::to_string),
            has_patient: Some(true),
            heart_rate: Some(130),
            spo2: Some(93),
            latitude: Some(12.95),
            longitude: Some(77.60),
        }
    }

    #[test]
    fn test_valid_update_is_stamped_with_server_time() {
        let now = Utc::now();
        let snapshot = snapshot_from_update(update(Some("AMB_002")), now).unwrap();

        assert_eq!(snapshot.vehicle_id, "AMB_002");
        assert!(snapshot.has_patient);
        assert_eq!(snapshot.heart_rate, 130);
        assert_eq!(snapshot.spo2, 93);
        assert_eq!(snapshot.last_updated, now);
    }

    #[test]
    fn test_missing_or_blank_id_is_rejected() {
        for id in [None, Some(""), Some("   ")] {
            let err = snapshot_from_update(update(id), Utc::now()).unwrap_err();
            assert_eq!(err, ApiError::Validation("ambulanceId required".to_string()));
        }
    }

    #[test]
    fn test_missing_coordinates_are_named() {
        let mut msg = update(Some("AMB_001"));
        msg.latitude = None;
        let err = snapshot_from_update(msg, Utc::now()).unwrap_err();
        assert_eq!(err, ApiError::Validation("latitude required".to_string()));

        let mut msg = update(Some("AMB_001"));
        msg.longitude = None;
        let err = snapshot_from_update(msg, Utc::now()).unwrap_err();
        assert_eq!(err, ApiError::Validation("longitude required".to_string()));
    }

    #[test]
    fn test_out_of_range_coordinates_are_rejected() {
        let mut msg = update(Some("AMB_001"));
        msg.latitude = Some(91.0);
        assert!(snapshot_from_update(msg, Utc::now()).is_err());

        let mut msg = update(Some("AMB_001"));
        msg.longitude = Some(-180.5);
        assert!(snapshot_from_update(msg, Utc::now()).is_err());
    }

    #[test]
    fn test_defaults_when_fields_absent() {
        let msg = UpdateMessage {
            ambulance_id: Some("AMB_009".to_string()),
            latitude: Some(13.0),
            longitude: Some(77.6),
            ..Default::default()
        };

        let snapshot = snapshot_from_update(msg, Utc::now()).unwrap();
        assert!(!snapshot.has_patient);
        assert_eq!(snapshot.heart_rate, 0);
        assert_eq!(snapshot.spo2, 0);
    }

    #[test]
    fn test_vitals_zeroed_without_patient() {
        let mut msg = update(Some("AMB_003"));
        msg.has_patient = Some(false);

        let snapshot = snapshot_from_update(msg, Utc::now()).unwrap();
        assert_eq!(snapshot.heart_rate, 0);
        assert_eq!(snapshot.spo2, 0);
    }

    #[test]
    fn test_provision_builds_empty_record() {
        let now = Utc::now();
        let msg = ProvisionMessage {
            ambulance_id: Some("AMB_011".to_string()),
            latitude: Some(12.9),
            longitude: Some(77.5),
        };

        let snapshot = snapshot_from_provision(msg, now).unwrap();
        assert_eq!(snapshot, VehicleSnapshot::provisioned("AMB_011".to_string(), 12.9, 77.5, now));
    }
}
