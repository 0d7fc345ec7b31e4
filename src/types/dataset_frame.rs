//! Contains the `DatasetFrame`, the result of [`crate::ObservationClient::list_datasets`].

use crate::types::dataset::Dataset;
use geo::Point;
use polars::prelude::*;

/// Column names of [`DatasetFrame::to_dataframe`], without the optional `geometry` column.
pub const DATASET_COLUMNS: [&str; 16] = [
    "id",
    "siteName",
    "stationName",
    "phenomenonName",
    "phenomenonCode",
    "offeringName",
    "offeringCode",
    "unitName",
    "unitCode",
    "latitudeNorth",
    "longitudeEast",
    "startDate",
    "endDate",
    "valueCount",
    "obs_type_code",
    "description",
];

/// Name of the optional geometry column.
pub const GEOMETRY_COLUMN: &str = "geometry";

/// An ordered table of [`Dataset`] descriptors with an optional geometry column.
///
/// The geometry column, when present, holds one point per row built from the
/// row's `(longitudeEast, latitudeNorth)`. It is `None` for rows missing a coordinate.
///
/// # Examples
///
/// ```no_run
/// # use saeon_obs::{ObservationClient, ObservationsError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), ObservationsError> {
/// let client = ObservationClient::from_env()?;
/// let datasets = client.list_datasets().call().await?;
///
/// let selection = datasets.filter(|d| {
///     d.site_name.as_deref() == Some("Constantiaberg")
///         && d.description() == "Air Temperature - Daily Minimum - Degrees Celsius"
/// });
/// println!("{}", selection.to_dataframe()?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetFrame {
    datasets: Vec<Dataset>,
    geometry: Option<Vec<Option<Point<f64>>>>,
}

impl DatasetFrame {
    /// Creates a frame without a geometry column.
    pub fn new(datasets: Vec<Dataset>) -> Self {
        Self {
            datasets,
            geometry: None,
        }
    }

    /// Adds the geometry column, computed from each row's coordinates.
    pub fn with_geometry(mut self) -> Self {
        self.geometry = Some(self.datasets.iter().map(Dataset::point).collect());
        self
    }

    /// Drops the geometry column.
    pub fn without_geometry(mut self) -> Self {
        self.geometry = None;
        self
    }

    pub fn has_geometry(&self) -> bool {
        self.geometry.is_some()
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&Dataset> {
        self.datasets.get(row)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Dataset> {
        self.datasets.iter()
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    /// The geometry column, if present.
    pub fn geometry(&self) -> Option<&[Option<Point<f64>>]> {
        self.geometry.as_deref()
    }

    pub fn into_datasets(self) -> Vec<Dataset> {
        self.datasets
    }

    /// Ids of all rows, in order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.datasets.iter().map(|d| d.id.as_str())
    }

    /// Returns a new frame with the rows matching `predicate`.
    ///
    /// The geometry column, if any, is kept aligned with the remaining rows.
    pub fn filter(&self, predicate: impl Fn(&Dataset) -> bool) -> DatasetFrame {
        let rows: Vec<usize> = self
            .datasets
            .iter()
            .enumerate()
            .filter(|(_, d)| predicate(d))
            .map(|(row, _)| row)
            .collect();
        self.take(&rows)
    }

    /// Returns a new frame with the given rows, in the given order.
    ///
    /// Out-of-range rows are skipped.
    pub(crate) fn take(&self, rows: &[usize]) -> DatasetFrame {
        let rows: Vec<usize> = rows
            .iter()
            .copied()
            .filter(|&row| row < self.datasets.len())
            .collect();
        DatasetFrame {
            datasets: rows.iter().map(|&row| self.datasets[row].clone()).collect(),
            geometry: self
                .geometry
                .as_ref()
                .map(|geometry| rows.iter().map(|&row| geometry[row]).collect()),
        }
    }

    /// Converts the frame into a polars `DataFrame`.
    ///
    /// Columns are [`DATASET_COLUMNS`], followed by a `geometry` column with WKT
    /// `POINT (lon lat)` strings when the frame carries geometry.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let datasets = &self.datasets;
        let mut df = df!(
            "id" => datasets.iter().map(|d| d.id.as_str()).collect::<Vec<_>>(),
            "siteName" => text_column(datasets, |d| d.site_name.as_deref()),
            "stationName" => text_column(datasets, |d| d.station_name.as_deref()),
            "phenomenonName" => text_column(datasets, |d| d.phenomenon_name.as_deref()),
            "phenomenonCode" => text_column(datasets, |d| d.phenomenon_code.as_deref()),
            "offeringName" => text_column(datasets, |d| d.offering_name.as_deref()),
            "offeringCode" => text_column(datasets, |d| d.offering_code.as_deref()),
            "unitName" => text_column(datasets, |d| d.unit_name.as_deref()),
            "unitCode" => text_column(datasets, |d| d.unit_code.as_deref()),
            "latitudeNorth" => datasets.iter().map(|d| d.latitude_north).collect::<Vec<_>>(),
            "longitudeEast" => datasets.iter().map(|d| d.longitude_east).collect::<Vec<_>>(),
            "startDate" => text_column(datasets, |d| d.start_date.as_deref()),
            "endDate" => text_column(datasets, |d| d.end_date.as_deref()),
            "valueCount" => datasets.iter().map(|d| d.value_count).collect::<Vec<_>>(),
            "obs_type_code" => datasets.iter().map(Dataset::obs_type_code).collect::<Vec<_>>(),
            "description" => datasets.iter().map(Dataset::description).collect::<Vec<_>>(),
        )?;

        if let Some(geometry) = &self.geometry {
            let wkt: Vec<Option<String>> = geometry
                .iter()
                .map(|point| point.map(|p| format!("POINT ({} {})", p.x(), p.y())))
                .collect();
            df.with_column(Series::new(GEOMETRY_COLUMN.into(), wkt))?;
        }

        Ok(df)
    }
}

impl<'a> IntoIterator for &'a DatasetFrame {
    type Item = &'a Dataset;
    type IntoIter = std::slice::Iter<'a, Dataset>;

    fn into_iter(self) -> Self::IntoIter {
        self.datasets.iter()
    }
}

impl From<Vec<Dataset>> for DatasetFrame {
    fn from(datasets: Vec<Dataset>) -> Self {
        DatasetFrame::new(datasets)
    }
}

fn text_column<'a>(
    datasets: &'a [Dataset],
    field: fn(&Dataset) -> Option<&str>,
) -> Vec<Option<&'a str>> {
    datasets.iter().map(field).collect()
}
