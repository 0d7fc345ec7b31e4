use crate::types::observation::Observation;
use polars::prelude::*;

/// Column names of [`ObservationFrame::to_dataframe`].
pub const OBSERVATION_COLUMNS: [&str; 10] = [
    "instrument",
    "sensor",
    "date",
    "latitude",
    "longitude",
    "value",
    "phenomenon",
    "offering",
    "variable",
    "unit",
];

/// Observations of one or more datasets, concatenated in request order.
///
/// Records carry no link back to the dataset they came from other than the fields
/// the service includes in them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationFrame {
    records: Vec<Observation>,
}

impl ObservationFrame {
    pub fn new(records: Vec<Observation>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&Observation> {
        self.records.get(row)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.records.iter()
    }

    pub fn records(&self) -> &[Observation] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Observation> {
        self.records
    }

    /// Appends the records of `other` after the current ones.
    pub fn append(&mut self, other: ObservationFrame) {
        self.records.extend(other.records);
    }

    /// Converts the frame into a polars `DataFrame` with [`OBSERVATION_COLUMNS`].
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let records = &self.records;
        df!(
            "instrument" => text_column(records, |o| o.instrument.as_deref()),
            "sensor" => text_column(records, |o| o.sensor.as_deref()),
            "date" => text_column(records, |o| o.date.as_deref()),
            "latitude" => records.iter().map(|o| o.latitude).collect::<Vec<_>>(),
            "longitude" => records.iter().map(|o| o.longitude).collect::<Vec<_>>(),
            "value" => records.iter().map(|o| o.value).collect::<Vec<_>>(),
            "phenomenon" => text_column(records, |o| o.phenomenon.as_deref()),
            "offering" => text_column(records, |o| o.offering.as_deref()),
            "variable" => text_column(records, |o| o.variable.as_deref()),
            "unit" => text_column(records, |o| o.unit.as_deref()),
        )
    }
}

impl<'a> IntoIterator for &'a ObservationFrame {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

fn text_column<'a>(
    records: &'a [Observation],
    field: fn(&Observation) -> Option<&str>,
) -> Vec<Option<&'a str>> {
    records.iter().map(field).collect()
}
