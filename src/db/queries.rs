pub const CREATE_VEHICLE_SNAPSHOTS: &str = r#"
CREATE TABLE IF NOT EXISTS vehicle_snapshots (
    vehicle_id   TEXT PRIMARY KEY,
    has_patient  BOOLEAN NOT NULL DEFAULT FALSE,
    heart_rate   INTEGER NOT NULL DEFAULT 0,
    spo2         INTEGER NOT NULL DEFAULT 0,
    latitude     DOUBLE PRECISION NOT NULL,
    longitude    DOUBLE PRECISION NOT NULL,
    last_updated TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
"#;

pub const UPSERT_SNAPSHOT: &str = r#"
INSERT INTO vehicle_snapshots (vehicle_id, has_patient, heart_rate, spo2, latitude, longitude, last_updated)
VALUES ($1, $2, $3, $4, $5, $6, $7)
ON CONFLICT (vehicle_id) DO UPDATE
SET has_patient = EXCLUDED.has_patient,
    heart_rate = EXCLUDED.heart_rate,
    spo2 = EXCLUDED.spo2,
    latitude = EXCLUDED.latitude,
    longitude = EXCLUDED.longitude,
    last_updated = EXCLUDED.last_updated;
"#;

pub const INSERT_SNAPSHOT_IF_ABSENT: &str = r#"
INSERT INTO vehicle_snapshots (vehicle_id, has_patient, heart_rate, spo2, latitude, longitude, last_updated)
VALUES ($1, $2, $3, $4, $5, $6, $7)
ON CONFLICT (vehicle_id) DO NOTHING;
"#;

pub const SELECT_ALL_SNAPSHOTS: &str = r#"
SELECT vehicle_id, has_patient, heart_rate, spo2, latitude, longitude, last_updated
FROM vehicle_snapshots
ORDER BY vehicle_id;
"#;

pub const SELECT_SNAPSHOT: &str = r#"
SELECT vehicle_id, has_patient, heart_rate, spo2, latitude, longitude, last_updated
FROM vehicle_snapshots
WHERE vehicle_id = $1;
"#;

pub const DELETE_SNAPSHOT: &str = r#"
DELETE FROM vehicle_snapshots WHERE vehicle_id = $1;
"#;
