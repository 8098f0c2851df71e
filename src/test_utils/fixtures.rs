//! Test fixtures for deployment trees and variable definitions.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::cli::BuildConfig;
use crate::constants::REQUIRED_TRAJECTORY_VARIABLES;

/// Deployment name used by the fixtures.
pub const FIXTURE_DEPLOYMENT: &str = "ru01-20210101T1200";

/// Build a variable definitions YAML document.
///
/// Each name gets a `long_name` attribute; a few well-known names get units.
pub fn definitions_yaml(names: &[&str]) -> String {
    let mut yaml = String::new();
    for name in names {
        yaml.push_str(&format!("- name: {name}\n  attrs:\n    long_name: {name}\n"));
        let units = match *name {
            "time" => Some("seconds since 1970-01-01T00:00:00Z"),
            "latitude" | "profile_lat" => Some("degrees_north"),
            "longitude" | "profile_lon" => Some("degrees_east"),
            "depth" => Some("m"),
            "temperature" | "sci_water_temp" => Some("Celsius"),
            _ => None,
        };
        if let Some(units) = units {
            yaml.push_str(&format!("    units: \"{units}\"\n"));
        }
    }
    yaml
}

/// Trajectory variables plus an instrument and two science variables.
pub fn trajectory_names() -> Vec<&'static str> {
    let mut names = vec!["temperature", "instrument_ctd", "conductivity"];
    names.extend_from_slice(REQUIRED_TRAJECTORY_VARIABLES);
    names
}

/// A temporary `GLIDER_DATA_HOME` with one deployment.
///
/// The deployment has a `raw-trajectory` definitions file containing
/// [`trajectory_names`] and an empty NetCDF output directory.
pub struct DeploymentFixture {
    temp: TempDir,
    home: PathBuf,
}

impl DeploymentFixture {
    pub fn new() -> Result<Self> {
        let temp = TempDir::new().context("Failed to create temp data home")?;
        let home = temp.path().join("deployments").join("2021").join(FIXTURE_DEPLOYMENT);
        fs::create_dir_all(home.join("config"))?;
        fs::create_dir_all(home.join("data/out/nc/raw-trajectory/rt"))?;

        let fixture = Self {
            temp,
            home,
        };
        fixture.write_definitions("raw-trajectory-var_defs.yml", &trajectory_names())?;
        Ok(fixture)
    }

    /// The data root, suitable for `GLIDER_DATA_HOME`.
    pub fn data_home(&self) -> &Path {
        self.temp.path()
    }

    /// The deployment directory.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Write `config/{file_name}` with the given variable names.
    pub fn write_definitions(&self, file_name: &str, names: &[&str]) -> Result<PathBuf> {
        let path = self.home.join("config").join(file_name);
        fs::write(&path, definitions_yaml(names))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Build settings pointing at this data home, otherwise defaults.
    pub fn config(&self) -> BuildConfig {
        let mut config = BuildConfig::new(FIXTURE_DEPLOYMENT);
        config.data_home = Some(self.data_home().display().to_string());
        config
    }
}
