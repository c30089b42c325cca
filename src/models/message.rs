use serde::{Deserialize, Deserializer};

/// Body of `POST /api/ambulance/update` as sent by the in-vehicle devices.
///
/// Every field is optional at the wire level so that a missing id or
/// coordinate can be reported precisely instead of as a generic decode error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMessage {
    #[serde(default)]
    pub ambulance_id: Option<String>,
    #[serde(default, deserialize_with = "parse_bool_option")]
    pub has_patient: Option<bool>,
    #[serde(default, deserialize_with = "parse_i32_option")]
    pub heart_rate: Option<i32>,
    #[serde(default, deserialize_with = "parse_i32_option")]
    pub spo2: Option<i32>,
    #[serde(default, deserialize_with = "parse_f64_option")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "parse_f64_option")]
    pub longitude: Option<f64>,
}

/// Body of `POST /api/ambulance` (administrative provisioning).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionMessage {
    #[serde(default)]
    pub ambulance_id: Option<String>,
    #[serde(default, deserialize_with = "parse_f64_option")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "parse_f64_option")]
    pub longitude: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrFloat {
    String(String),
    Float(f64),
}

fn parse_f64_option<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v: Option<StringOrFloat> = Option::deserialize(deserializer)?;
    match v {
        Some(StringOrFloat::Float(f)) => Ok(Some(f)),
        Some(StringOrFloat::String(s)) => {
            if s.trim().is_empty() {
                Ok(None)
            } else {
                s.trim().parse::<f64>().map(Some).map_err(serde::de::Error::custom)
            }
        }
        None => Ok(None),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolLike {
    Bool(bool),
    Number(f64),
    String(String),
}

fn parse_bool_option<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let v: Option<BoolLike> = Option::deserialize(deserializer)?;
    match v {
        Some(BoolLike::Bool(b)) => Ok(Some(b)),
        Some(BoolLike::Number(n)) if n == 1.0 => Ok(Some(true)),
        Some(BoolLike::Number(n)) if n == 0.0 => Ok(Some(false)),
        Some(BoolLike::Number(n)) => Err(serde::de::Error::custom(format!("{} is not a boolean", n))),
        Some(BoolLike::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "true" | "1" | "yes" => Ok(Some(true)),
            "false" | "0" | "no" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!("'{}' is not a boolean", other))),
        },
        None => Ok(None),
    }
}

fn parse_i32_option<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = parse_f64_option(deserializer)?;
    match v {
        Some(f) if f.is_finite() && f >= i32::MIN as f64 && f <= i32::MAX as f64 => {
            Ok(Some(f.round() as i32))
        }
        Some(f) => Err(serde::de::Error::custom(format!("{} is not a valid integer reading", f))),
        None => Ok(None),
    }
}
