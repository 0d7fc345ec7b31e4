//! Anything that can name the datasets to download.

use crate::request::error::ValidationError;
use crate::types::dataset::Dataset;
use crate::types::dataset_frame::DatasetFrame;
use polars::prelude::{col, DataFrame, DataType, LazyFrame};

/// Name of the column holding dataset ids in tabular selections.
pub const ID_COLUMN: &str = "id";

/// A set of datasets to fetch observations for.
///
/// Implemented for the frames returned by [`crate::ObservationClient::list_datasets`],
/// plain `Dataset` collections, and polars frames with an `id` column, so a listing can
/// be narrowed down with polars before fetching.
pub trait DatasetSelection {
    /// The dataset ids, in iteration order.
    fn dataset_ids(&self) -> Result<Vec<String>, ValidationError>;
}

impl<T: DatasetSelection + ?Sized> DatasetSelection for &T {
    fn dataset_ids(&self) -> Result<Vec<String>, ValidationError> {
        (**self).dataset_ids()
    }
}

impl DatasetSelection for DatasetFrame {
    fn dataset_ids(&self) -> Result<Vec<String>, ValidationError> {
        Ok(self.ids().map(str::to_string).collect())
    }
}

impl DatasetSelection for [Dataset] {
    fn dataset_ids(&self) -> Result<Vec<String>, ValidationError> {
        Ok(self.iter().map(|d| d.id.clone()).collect())
    }
}

impl DatasetSelection for Vec<Dataset> {
    fn dataset_ids(&self) -> Result<Vec<String>, ValidationError> {
        self.as_slice().dataset_ids()
    }
}

impl DatasetSelection for DataFrame {
    fn dataset_ids(&self) -> Result<Vec<String>, ValidationError> {
        let column = self
            .column(ID_COLUMN)
            .map_err(|_| ValidationError::MissingIdColumn)?;
        let ids = column
            .cast(&DataType::String)
            .map_err(ValidationError::IdColumn)?;
        let ids = ids.str().map_err(ValidationError::IdColumn)?;

        ids.into_iter()
            .enumerate()
            .map(|(row, id)| {
                id.map(str::to_string)
                    .ok_or(ValidationError::NullId { row })
            })
            .collect()
    }
}

impl DatasetSelection for LazyFrame {
    fn dataset_ids(&self) -> Result<Vec<String>, ValidationError> {
        let mut frame = self.clone();
        let schema = frame
            .collect_schema()
            .map_err(ValidationError::IdColumn)?;
        if !schema.contains(ID_COLUMN) {
            return Err(ValidationError::MissingIdColumn);
        }
        frame
            .select([col(ID_COLUMN)])
            .collect()
            .map_err(ValidationError::IdColumn)?
            .dataset_ids()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::dataset::tests::air_temperature;
    use polars::prelude::*;

    #[test]
    fn test_dataset_frame_ids() {
        let frame = DatasetFrame::new(vec![
            air_temperature("a", 18.4, -34.06),
            air_temperature("b", 19.0, -33.9),
        ]);

        assert_eq!(frame.dataset_ids().unwrap(), ["a", "b"]);
        assert_eq!((&frame).dataset_ids().unwrap(), ["a", "b"]);
        assert_eq!(frame.datasets().dataset_ids().unwrap(), ["a", "b"]);
    }

    #[test]
    fn test_dataframe_ids() -> Result<(), Box<dyn std::error::Error>> {
        let df = df!("id" => ["x", "y", "z"], "siteName" => ["s1", "s2", "s3"])?;
        assert_eq!(df.dataset_ids()?, ["x", "y", "z"]);
        Ok(())
    }

    #[test]
    fn test_dataframe_numeric_ids_are_cast() -> Result<(), Box<dyn std::error::Error>> {
        let df = df!("id" => [17i64, 42])?;
        assert_eq!(df.dataset_ids()?, ["17", "42"]);
        Ok(())
    }

    #[test]
    fn test_dataframe_without_id_column() -> Result<(), Box<dyn std::error::Error>> {
        let df = df!("siteName" => ["s1"], "stationName" => ["st1"])?;
        let err = df.dataset_ids().unwrap_err();
        assert!(matches!(err, ValidationError::MissingIdColumn));
        Ok(())
    }

    #[test]
    fn test_dataframe_null_id() -> Result<(), Box<dyn std::error::Error>> {
        let df = df!("id" => [Some("x"), None])?;
        let err = df.dataset_ids().unwrap_err();
        assert!(matches!(err, ValidationError::NullId { row: 1 }));
        Ok(())
    }

    #[test]
    fn test_lazyframe_ids() -> Result<(), Box<dyn std::error::Error>> {
        let lazy = df!("id" => ["x", "y", "z"], "valueCount" => [1i64, 5, 10])?
            .lazy()
            .filter(col("valueCount").gt(lit(2i64)));
        assert_eq!(lazy.dataset_ids()?, ["y", "z"]);

        let without_id = df!("siteName" => ["s1"])?.lazy();
        assert!(matches!(
            without_id.dataset_ids().unwrap_err(),
            ValidationError::MissingIdColumn
        ));
        Ok(())
    }
}
