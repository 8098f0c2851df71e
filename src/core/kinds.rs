//! Dataset kind enumerations.
//!
//! The generator is parameterised by three independent choices made on the
//! command line (sampling mode, processing level and dataset type) plus the
//! ERDDAP CDM data type derived from the dataset type. Each is a closed enum
//! so that title rules, graph-query selection and path construction can match
//! exhaustively instead of comparing strings.
//!
//! `Display` yields the lowercase token used both on the command line and in
//! dataset identifiers and file names (`rt`, `sci`, `profile`, ...).

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{REQUIRED_PROFILE_VARIABLES, REQUIRED_TRAJECTORY_VARIABLES};

/// Whether the dataset is served in real time or after delayed-mode recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SamplingMode {
    /// Real-time data telemetered during the deployment
    #[default]
    Rt,
    /// Delayed-mode data recovered after the deployment
    Delayed,
}

/// Processing level of the NetCDF files backing the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingLevel {
    /// Raw instrument variables as reported by the glider
    #[default]
    Raw,
    /// Derived and calibrated science variables
    Sci,
}

/// Shape of the dataset being described.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DatasetType {
    /// Time series along the glider track
    #[default]
    Trajectory,
    /// Individual up/down casts
    Profile,
}

/// ERDDAP `cdm_data_type` global attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CdmDataType {
    Trajectory,
    TrajectoryProfile,
}

impl DatasetType {
    /// The ERDDAP CDM data type served for this dataset type.
    #[must_use]
    pub const fn cdm_data_type(self) -> CdmDataType {
        match self {
            DatasetType::Trajectory => CdmDataType::Trajectory,
            DatasetType::Profile => CdmDataType::TrajectoryProfile,
        }
    }

    /// Variables that must be defined for this dataset type, in presentation order.
    #[must_use]
    pub const fn required_variables(self) -> &'static [&'static str] {
        match self {
            DatasetType::Trajectory => REQUIRED_TRAJECTORY_VARIABLES,
            DatasetType::Profile => REQUIRED_PROFILE_VARIABLES,
        }
    }
}

impl fmt::Display for SamplingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SamplingMode::Rt => write!(f, "rt"),
            SamplingMode::Delayed => write!(f, "delayed"),
        }
    }
}

impl fmt::Display for ProcessingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingLevel::Raw => write!(f, "raw"),
            ProcessingLevel::Sci => write!(f, "sci"),
        }
    }
}

impl fmt::Display for DatasetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetType::Trajectory => write!(f, "trajectory"),
            DatasetType::Profile => write!(f, "profile"),
        }
    }
}

impl fmt::Display for CdmDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CdmDataType::Trajectory => write!(f, "Trajectory"),
            CdmDataType::TrajectoryProfile => write!(f, "TrajectoryProfile"),
        }
    }
}
