pub mod dataset;
pub mod dataset_frame;
pub mod observation;
pub mod observation_frame;
