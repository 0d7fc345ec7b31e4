mod config;
mod error;
mod observation_client;
mod request;
mod spatial;
mod transport;
mod types;

pub use error::ObservationsError;
pub use observation_client::*;

pub use config::error::ConfigError;
pub use config::{ClientConfig, API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL};

pub use request::dates::{normalize_date, DateFilter, API_TIMESTAMP_FORMAT};
pub use request::error::ValidationError;
pub use request::selection::{DatasetSelection, ID_COLUMN};

pub use spatial::{PolygonIntersector, RTreeIntersector};

pub use transport::error::UpstreamError;
pub use transport::{HttpTransport, ReqwestTransport, TransportResponse};

pub use types::dataset::Dataset;
pub use types::dataset_frame::{DatasetFrame, DATASET_COLUMNS, GEOMETRY_COLUMN};
pub use types::observation::Observation;
pub use types::observation_frame::{ObservationFrame, OBSERVATION_COLUMNS};

pub use geo::{Point, Polygon};
