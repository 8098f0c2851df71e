//! Deployment data layout.
//!
//! Glider deployments live below a single data root:
//!
//! ```text
//! $GLIDER_DATA_HOME/
//! └── deployments/
//!     └── 2021/
//!         └── ru01-20210101T1200/
//!             ├── config/
//!             │   ├── raw-trajectory-var_defs.yml
//!             │   └── sci-profile-var_defs.yml
//!             └── data/out/nc/
//!                 ├── raw-trajectory/rt/
//!                 └── sci-profile/delayed/
//! ```
//!
//! The root is an explicit [`DataHome`] value, resolved once by the CLI (from
//! `--data-home` or `GLIDER_DATA_HOME`) and passed down. Nothing in this
//! module reads the process environment.

use regex::Regex;
use std::path::{Path, PathBuf};

use crate::constants::DEPLOYMENTS_DIR;
use crate::core::{DatasetType, DatasetXmlError, ProcessingLevel, SamplingMode};

/// The deployment data root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataHome {
    root: PathBuf,
}

impl DataHome {
    /// Build from a configured value, expanding a leading `~`.
    ///
    /// # Errors
    ///
    /// [`DatasetXmlError::DataHomeNotSet`] when the value is absent or blank.
    pub fn from_setting(value: Option<&str>) -> Result<Self, DatasetXmlError> {
        match value.map(str::trim) {
            Some(value) if !value.is_empty() => Ok(Self {
                root: PathBuf::from(shellexpand::tilde(value).as_ref()),
            }),
            _ => Err(DatasetXmlError::DataHomeNotSet),
        }
    }

    /// `{root}/deployments`, which must be a directory.
    pub fn deployments_root(&self) -> Result<PathBuf, DatasetXmlError> {
        let path = self.root.join(DEPLOYMENTS_DIR);
        if path.is_dir() {
            Ok(path)
        } else {
            Err(DatasetXmlError::DeploymentsRootInvalid {
                path: path.display().to_string(),
            })
        }
    }
}

/// The 4-digit year embedded in a deployment name (`ru01-20210101T1200` -> `2021`).
#[must_use]
pub fn deployment_year(deployment: &str) -> Option<String> {
    let re = Regex::new(r"-(\d{4})").ok()?;
    re.captures(deployment).and_then(|caps| caps.get(1)).map(|m| m.as_str().to_string())
}

/// Whether a deployment name follows `glider-YYYYmmddTHHMM`.
#[must_use]
pub fn is_standard_deployment_name(deployment: &str) -> bool {
    Regex::new(r"^[A-Za-z0-9_]+(-[A-Za-z0-9_]+)*-\d{8}T\d{4}$")
        .map(|re| re.is_match(deployment))
        .unwrap_or(false)
}

/// Resolved directory tree of one deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentLayout {
    home: PathBuf,
}

impl DeploymentLayout {
    /// Locate `{root}/deployments/{year}/{deployment}`.
    ///
    /// # Errors
    ///
    /// - [`DatasetXmlError::DeploymentsRootInvalid`] when the deployments
    ///   directory is missing
    /// - [`DatasetXmlError::DeploymentYearMissing`] when the name has no year
    /// - [`DatasetXmlError::DeploymentHomeInvalid`] when the deployment
    ///   directory is missing
    pub fn resolve(data_home: &DataHome, deployment: &str) -> Result<Self, DatasetXmlError> {
        let root = data_home.deployments_root()?;

        if !is_standard_deployment_name(deployment) {
            tracing::warn!(
                "Deployment name {} does not match glider-YYYYmmddTHHMM",
                deployment
            );
        }

        let year = deployment_year(deployment).ok_or_else(|| {
            DatasetXmlError::DeploymentYearMissing {
                deployment: deployment.to_string(),
            }
        })?;

        let home = root.join(year).join(deployment);
        if !home.is_dir() {
            return Err(DatasetXmlError::DeploymentHomeInvalid {
                path: home.display().to_string(),
            });
        }

        Ok(Self {
            home,
        })
    }

    #[must_use]
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// `{home}/config/{level}-{dtype}-var_defs.yml`
    #[must_use]
    pub fn definitions_file(&self, level: ProcessingLevel, dtype: DatasetType) -> PathBuf {
        self.home.join("config").join(format!("{level}-{dtype}-var_defs.yml"))
    }

    /// `{home}/data/out/nc/{level}-{dtype}/{mode}`
    #[must_use]
    pub fn nc_dir(&self, level: ProcessingLevel, dtype: DatasetType, mode: SamplingMode) -> PathBuf {
        self.home
            .join("data")
            .join("out")
            .join("nc")
            .join(format!("{level}-{dtype}"))
            .join(mode.to_string())
    }
}
