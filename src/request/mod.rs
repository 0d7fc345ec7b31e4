//! Validation of the inputs of an observations request.

pub mod dates;
pub mod error;
pub mod selection;
