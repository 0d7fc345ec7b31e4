use serde::{Deserialize, Serialize};

/// A single measured value as returned by the observations endpoint.
///
/// Every field is optional and unknown fields are ignored, so records from datasets
/// with different shapes can be concatenated into one [`crate::ObservationFrame`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub instrument: Option<String>,
    pub sensor: Option<String>,
    /// Timestamp of the measurement as sent by the service.
    pub date: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub value: Option<f64>,
    pub phenomenon: Option<String>,
    pub offering: Option<String>,
    pub variable: Option<String>,
    pub unit: Option<String>,
}
