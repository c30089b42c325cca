//! Client-side fleet view: merges polled status records and orders them for display.
//!
//! Ordering is a presentation policy of this client, not a server guarantee:
//! `EMERGENCY` first, then `IDLE`, then `OFFLINE`, ties broken by id.

use reqwest::Client;
use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::Write as _;

use crate::models::status::BLOOD_PRESSURE_PLACEHOLDER;

/// A status record as the client reads it. Everything is optional so that one
/// odd record does not fail the whole poll.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolledRecord {
    #[serde(default)]
    pub vehicle_id: Option<String>,
    #[serde(default)]
    pub ambulance_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub location: Option<PolledLocation>,
    #[serde(default)]
    pub patient: Option<PolledPatient>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PolledLocation {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolledPatient {
    #[serde(default)]
    pub is_onboard: bool,
    #[serde(default)]
    pub vitals: Option<PolledVitals>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PolledVitals {
    #[serde(rename = "heartRate", default)]
    pub heart_rate: Option<i32>,
    #[serde(rename = "spO2", default)]
    pub spo2: Option<i32>,
    #[serde(rename = "bloodPressure", default)]
    pub blood_pressure: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VitalsView {
    pub heart_rate: Option<i32>,
    pub blood_pressure: String,
    pub spo2: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FleetEntry {
    pub id: String,
    pub status: String,
    pub location: Option<(f64, f64)>,
    /// Present only while a patient is onboard.
    pub vitals: Option<VitalsView>,
}

impl FleetEntry {
    fn from_record(id: String, record: PolledRecord) -> Self {
        let vitals = match record.patient {
            Some(patient) if patient.is_onboard => {
                let vitals = patient.vitals.unwrap_or(PolledVitals {
                    heart_rate: None,
                    spo2: None,
                    blood_pressure: None,
                });
                Some(VitalsView {
                    heart_rate: vitals.heart_rate,
                    blood_pressure: vitals
                        .blood_pressure
                        .filter(|bp| !bp.is_empty())
                        .unwrap_or_else(|| BLOOD_PRESSURE_PLACEHOLDER.to_string()),
                    spo2: vitals.spo2,
                })
            }
            _ => None,
        };

        Self {
            id,
            status: record.status.unwrap_or_default(),
            location: record.location.map(|l| (l.latitude, l.longitude)),
            vitals,
        }
    }

    pub fn is_offline(&self) -> bool {
        self.status == "OFFLINE"
    }
}

fn status_rank(status: &str) -> u8 {
    match status {
        "IDLE" => 1,
        "OFFLINE" => 2,
        // EMERGENCY and anything unrecognised
        _ => 0,
    }
}

fn display_order(a: &FleetEntry, b: &FleetEntry) -> Ordering {
    status_rank(&a.status)
        .cmp(&status_rank(&b.status))
        .then_with(|| a.id.cmp(&b.id))
}

#[derive(Debug, Default)]
pub struct FleetView {
    entries: Vec<FleetEntry>,
}

impl FleetView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a poll result into the view. Vehicles missing from `records` keep
    /// their previous entry.
    pub fn merge(&mut self, records: Vec<PolledRecord>) {
        let mut by_id: HashMap<String, FleetEntry> =
            self.entries.drain(..).map(|e| (e.id.clone(), e)).collect();

        for record in records {
            let id = match record.vehicle_id.clone().or_else(|| record.ambulance_id.clone()) {
                Some(id) if !id.is_empty() => id,
                _ => continue,
            };
            by_id.insert(id.clone(), FleetEntry::from_record(id, record));
        }

        let mut entries: Vec<FleetEntry> = by_id.into_values().collect();
        entries.sort_by(display_order);
        self.entries = entries;
    }

    pub fn entries(&self) -> &[FleetEntry] {
        &self.entries
    }

    pub fn active_count(&self) -> usize {
        self.entries.len()
    }

    pub fn detail(&self, id: &str) -> Option<&FleetEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Like `detail`, but offline vehicles cannot be selected.
    pub fn select(&self, id: &str) -> Option<&FleetEntry> {
        self.detail(id).filter(|e| !e.is_offline())
    }

    pub fn search(&self, term: &str) -> Vec<&FleetEntry> {
        let term = term.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.id.to_lowercase().contains(&term))
            .collect()
    }

    /// Plain-text table of the current view.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Active ambulances: {}", self.active_count());
        for e in &self.entries {
            let location = e
                .location
                .map(|(lat, lng)| format!("{:.5},{:.5}", lat, lng))
                .unwrap_or_else(|| "-".to_string());
            let vitals = match &e.vitals {
                Some(v) => format!(
                    "HR {} bpm | BP {} mmHg | O2 {} %",
                    v.heart_rate.map(|x| x.to_string()).unwrap_or_else(|| "-".into()),
                    v.blood_pressure,
                    v.spo2.map(|x| x.to_string()).unwrap_or_else(|| "-".into()),
                ),
                None => String::new(),
            };
            let _ = writeln!(out, "{:<10} {:<10} {:<22} {}", e.id, e.status, location, vitals);
        }
        out
    }
}

/// Fetch the latest status list. Any failure leaves the caller's view as is.
pub async fn poll(client: &Client, status_url: &str) -> anyhow::Result<Vec<PolledRecord>> {
    let response = client.get(status_url).send().await?.error_for_status()?;
    let records = response.json::<Vec<PolledRecord>>().await?;
    Ok(records)
}
