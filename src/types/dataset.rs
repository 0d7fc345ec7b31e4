//! The dataset descriptor returned by the dataset listing endpoint.

use geo::Point;
use serde::{Deserialize, Serialize};

/// Separator between the codes of [`Dataset::obs_type_code`].
pub const OBS_TYPE_CODE_SEPARATOR: &str = "_";
/// Separator between the names of [`Dataset::description`].
pub const DESCRIPTION_SEPARATOR: &str = " - ";

/// One measurable series offered by the Observation Database: a phenomenon measured
/// with a given offering and unit at one station.
///
/// Only the fields below are kept when parsing the listing; anything else the service
/// sends is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Opaque dataset identifier, used in the observations URL.
    pub id: String,
    pub site_name: Option<String>,
    pub station_name: Option<String>,
    pub phenomenon_name: Option<String>,
    pub phenomenon_code: Option<String>,
    pub offering_name: Option<String>,
    pub offering_code: Option<String>,
    pub unit_name: Option<String>,
    pub unit_code: Option<String>,
    /// Latitude in decimal degrees.
    pub latitude_north: Option<f64>,
    /// Longitude in decimal degrees.
    pub longitude_east: Option<f64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Number of observations in the dataset.
    pub value_count: Option<i64>,
}

impl Dataset {
    /// `phenomenonCode_offeringCode_unitCode`, e.g. `AT_Min_C`.
    pub fn obs_type_code(&self) -> String {
        join_parts(
            [&self.phenomenon_code, &self.offering_code, &self.unit_code],
            OBS_TYPE_CODE_SEPARATOR,
        )
    }

    /// `phenomenonName - offeringName - unitName`, e.g.
    /// `Air Temperature - Daily Minimum - Degrees Celsius`.
    pub fn description(&self) -> String {
        join_parts(
            [&self.phenomenon_name, &self.offering_name, &self.unit_name],
            DESCRIPTION_SEPARATOR,
        )
    }

    /// The station location as an `(x = longitude, y = latitude)` point.
    ///
    /// `None` when either coordinate is missing.
    pub fn point(&self) -> Option<Point<f64>> {
        match (self.longitude_east, self.latitude_north) {
            (Some(lon), Some(lat)) => Some(Point::new(lon, lat)),
            _ => None,
        }
    }
}

fn join_parts(parts: [&Option<String>; 3], separator: &str) -> String {
    parts
        .iter()
        .map(|part| part.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join(separator)
}
