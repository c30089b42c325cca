use chrono::{DateTime, Duration, Utc};

use crate::models::vehicle::{VehicleSnapshot, VehicleStatus};

pub const DEFAULT_OFFLINE_THRESHOLD_SECS: i64 = 10;

/// Classify a snapshot as seen at `now`.
///
/// Staleness wins over everything else: a snapshot older than `threshold` is
/// `Offline` whatever it claims about the patient. The boundary is inclusive,
/// so an age of exactly `threshold` is still fresh. A negative age (sender
/// ahead of the server clock) counts as fresh.
pub fn derive_status(snapshot: &VehicleSnapshot, now: DateTime<Utc>, threshold: Duration) -> VehicleStatus {
    let age = now.signed_duration_since(snapshot.last_updated);

    if age > threshold {
        VehicleStatus::Offline
    } else if !snapshot.has_patient {
        VehicleStatus::Idle
    } else {
        VehicleStatus::Emergency
    }
}
