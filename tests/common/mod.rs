//! Common test utilities for `build-dataset-xml` integration tests
//!
//! Wraps the library's [`DeploymentFixture`] with helpers for running the
//! binary against it.

// Not every helper is used by every test module
#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use erddap_dataset_xml::test_utils::{DeploymentFixture, FIXTURE_DEPLOYMENT};
use std::fs;
use std::path::{Path, PathBuf};

/// A temporary data home with one deployment and a command runner.
pub struct TestDataHome {
    pub fixture: DeploymentFixture,
}

impl TestDataHome {
    pub fn new() -> Result<Self> {
        Ok(Self {
            fixture: DeploymentFixture::new()?,
        })
    }

    pub fn deployment(&self) -> &'static str {
        FIXTURE_DEPLOYMENT
    }

    pub fn home(&self) -> &Path {
        self.fixture.home()
    }

    /// Write definitions for `{level}-{dtype}`.
    pub fn write_definitions(&self, level: &str, dtype: &str, names: &[&str]) -> Result<PathBuf> {
        self.fixture.write_definitions(&format!("{level}-{dtype}-var_defs.yml"), names)
    }

    /// Write an arbitrary file below the deployment directory.
    pub fn write_file(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.home().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    /// The binary, pointed at this data home, for the fixture deployment.
    pub fn cmd(&self) -> Command {
        let mut cmd = bare_cmd();
        cmd.env("GLIDER_DATA_HOME", self.fixture.data_home()).arg(self.deployment());
        cmd
    }
}

/// The binary with a clean environment and no arguments.
pub fn bare_cmd() -> Command {
    let mut cmd = Command::cargo_bin("build-dataset-xml").unwrap();
    cmd.env_remove("GLIDER_DATA_HOME").env_remove("RUST_LOG").env("NO_COLOR", "1");
    cmd
}
