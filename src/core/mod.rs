//! Core types and error handling.
//!
//! - [`error`] - [`DatasetXmlError`], [`ErrorKind`] and user-facing error display
//! - [`kinds`] - Sampling mode, processing level, dataset type and CDM data type

pub mod error;
pub mod kinds;

pub use error::{DatasetXmlError, ErrorContext, ErrorKind, user_friendly_error};
pub use kinds::{CdmDataType, DatasetType, ProcessingLevel, SamplingMode};
