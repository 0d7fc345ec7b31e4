//! This module provides the main entry point for interacting with the SAEON Observation
//! Database API. It allows listing the available datasets, optionally restricted to an
//! area of interest, and downloading the observations of a selection of datasets.

use crate::config::ClientConfig;
use crate::error::ObservationsError;
use crate::request::dates::DateFilter;
use crate::request::selection::DatasetSelection;
use crate::spatial::{PolygonIntersector, RTreeIntersector};
use crate::transport::{HttpTransport, ReqwestTransport};
use crate::types::dataset::Dataset;
use crate::types::dataset_frame::DatasetFrame;
use crate::types::observation::Observation;
use crate::types::observation_frame::ObservationFrame;
use bon::bon;
use geo::Polygon;
use log::{debug, info};
use reqwest::header::HeaderValue;
use std::sync::Arc;
use std::time::Duration;

/// The client for the SAEON Observation Database.
///
/// Holds the base URL and the bearer credential. Every call issues its requests
/// one after the other and returns freshly built frames; nothing is cached between
/// calls.
///
/// # Examples
///
/// ```no_run
/// # use saeon_obs::{ObservationClient, ObservationsError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), ObservationsError> {
/// // Reads the API key from OBSDB_KEY
/// let client = ObservationClient::from_env()?;
///
/// let datasets = client.list_datasets().call().await?;
/// let selection = datasets.filter(|d| d.site_name.as_deref() == Some("Constantiaberg"));
///
/// let observations = client
///     .fetch_observations(&selection)
///     .start_date("2020-12-01")
///     .end_date("2020-12-07")
///     .call()
///     .await?;
/// println!("{}", observations.to_dataframe()?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ObservationClient {
    base_url: String,
    authorization: HeaderValue,
    transport: Arc<dyn HttpTransport>,
    intersector: Arc<dyn PolygonIntersector>,
}

#[bon]
impl ObservationClient {
    /// Creates a client from an explicit API key.
    ///
    /// No network request is made.
    ///
    /// # Arguments
    ///
    /// * `.api_key(String)`: **Required.** The pre-issued Observation Database API key.
    /// * `.base_url(String)`: Optional. Defaults to [`crate::DEFAULT_BASE_URL`].
    /// * `.timeout(Duration)`: Optional per-request timeout. Defaults to 60 seconds.
    ///
    /// # Errors
    ///
    /// Returns [`ObservationsError::Config`] if the key is empty or unusable, or if the
    /// HTTP client cannot be built.
    ///
    /// # Examples
    ///
    /// ```
    /// # use saeon_obs::ObservationClient;
    /// let client = ObservationClient::builder().api_key("my-token").build();
    /// assert!(client.is_ok());
    ///
    /// let client = ObservationClient::builder().api_key("").build();
    /// assert!(client.is_err());
    /// ```
    #[builder]
    pub fn new(
        #[builder(into)] api_key: String,
        #[builder(into)] base_url: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ObservationsError> {
        let config = ClientConfig::builder()
            .api_key(api_key)
            .maybe_base_url(base_url)
            .maybe_timeout(timeout)
            .build()?;
        Self::with_config(config)
    }

    /// Creates a client with the API key from `OBSDB_KEY` (and base URL from `OBSDB_URL`, if set).
    ///
    /// # Errors
    ///
    /// Returns [`ObservationsError::Config`] if `OBSDB_KEY` is unset or empty.
    pub fn from_env() -> Result<Self, ObservationsError> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Creates a client using the default reqwest transport.
    pub fn with_config(config: ClientConfig) -> Result<Self, ObservationsError> {
        let transport = ReqwestTransport::from_config(&config)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Creates a client that sends its requests through `transport`.
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, ObservationsError> {
        Ok(Self {
            authorization: config.authorization()?,
            base_url: config.base_url,
            transport,
            intersector: Arc::new(RTreeIntersector),
        })
    }

    /// Replaces the polygon intersection used by [`ObservationClient::list_datasets`].
    pub fn with_intersector(mut self, intersector: impl PolygonIntersector + 'static) -> Self {
        self.intersector = Arc::new(intersector);
        self
    }

    /// The datasets endpoint all requests are made against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Lists the datasets offered by the Observation Database.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.area(Polygon<f64>)`: Optional. Area of interest in longitude/latitude. Only
    ///   datasets whose station lies inside it (boundary included) are returned.
    /// * `.spatial(bool)`: Optional, default `false`. Attach a point geometry column.
    ///
    /// # Returns
    ///
    /// A [`DatasetFrame`] in the order the service listed the datasets. Without `area`
    /// and `spatial` the frame has no geometry column; filtering by `area` alone uses
    /// the geometry internally and drops it afterwards. An area containing no station
    /// gives an empty frame.
    ///
    /// # Errors
    ///
    /// Returns [`ObservationsError::Upstream`] if the request fails, the service answers
    /// with a failure status (status and body are kept), or the body is not a list of
    /// datasets.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use saeon_obs::{ObservationClient, ObservationsError};
    /// use geo::polygon;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), ObservationsError> {
    /// let client = ObservationClient::from_env()?;
    /// let cape_peninsula = polygon![
    ///     (x: 18.3, y: -34.4),
    ///     (x: 18.6, y: -34.4),
    ///     (x: 18.6, y: -33.8),
    ///     (x: 18.3, y: -33.8),
    /// ];
    ///
    /// let datasets = client
    ///     .list_datasets()
    ///     .area(cape_peninsula)
    ///     .spatial(true)
    ///     .call()
    ///     .await?;
    /// println!("{} datasets on the Cape Peninsula", datasets.len());
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn list_datasets(
        &self,
        area: Option<Polygon<f64>>,
        #[builder(default)] spatial: bool,
    ) -> Result<DatasetFrame, ObservationsError> {
        info!("Listing datasets from {}", self.base_url);
        let response = self
            .transport
            .get(&self.base_url, &self.authorization)
            .await?;
        let datasets: Vec<Dataset> = response.into_json(&self.base_url)?;
        info!("Received {} datasets", datasets.len());

        let frame = DatasetFrame::new(datasets);
        let frame = match area {
            Some(area) => {
                let frame = frame.with_geometry();
                let rows = self
                    .intersector
                    .intersecting(frame.geometry().unwrap_or_default(), &area);
                info!(
                    "{} of {} datasets lie within the area of interest",
                    rows.len(),
                    frame.len()
                );
                let frame = frame.take(&rows);
                if spatial {
                    frame
                } else {
                    frame.without_geometry()
                }
            }
            None if spatial => frame.with_geometry(),
            None => frame,
        };
        Ok(frame)
    }

    /// Downloads the observations of every dataset in `selection`.
    ///
    /// Datasets are requested one at a time, in selection order, and their records are
    /// concatenated in that order.
    ///
    /// # Arguments
    ///
    /// * `selection` (start argument): Anything implementing [`DatasetSelection`], such
    ///   as a [`DatasetFrame`] or a polars `DataFrame` with an `id` column.
    /// * `.start_date(String)` / `.end_date(String)`: Optional. Dates like `2020-12-01`
    ///   or `2020-12-01T06:00:00`, sent as `YYYY-MM-DDTHH:MM:SS`. The range is only
    ///   applied when **both** are given; with only one of them, all observations
    ///   are requested.
    ///
    /// # Errors
    ///
    /// * [`ObservationsError::Validation`] if the selection has no usable `id` column or
    ///   a date cannot be parsed. Nothing is requested in that case.
    /// * [`ObservationsError::Upstream`] as soon as one request fails. Observations
    ///   already downloaded for earlier datasets are discarded.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use saeon_obs::{ObservationClient, ObservationsError};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), ObservationsError> {
    /// let client = ObservationClient::from_env()?;
    /// let datasets = client.list_datasets().call().await?;
    /// let first = datasets.filter(|d| d.id == datasets.datasets()[0].id);
    ///
    /// let observations = client.fetch_observations(&first).call().await?;
    /// println!("{} observations", observations.len());
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn fetch_observations<S: DatasetSelection>(
        &self,
        #[builder(start_fn)] selection: S,
        #[builder(into)] start_date: Option<String>,
        #[builder(into)] end_date: Option<String>,
    ) -> Result<ObservationFrame, ObservationsError> {
        let ids = selection.dataset_ids()?;
        let filter = DateFilter::from_bounds(start_date.as_deref(), end_date.as_deref())?;
        let body = DateFilter::request_body(filter.as_ref());

        let mut observations = ObservationFrame::default();
        for id in &ids {
            let url = self.observations_url(id);
            debug!("Requesting observations from {} with body {}", url, body);
            let response = self
                .transport
                .post_json(&url, &self.authorization, &body)
                .await?;
            let records: Vec<Observation> = response.into_json(&url)?;
            info!("Received {} observations for dataset {}", records.len(), id);
            observations.append(ObservationFrame::new(records));
        }

        info!(
            "Fetched {} observations from {} datasets",
            observations.len(),
            ids.len()
        );
        Ok(observations)
    }

    fn observations_url(&self, id: &str) -> String {
        format!("{}/{}/Observations", self.base_url, id)
    }
}
