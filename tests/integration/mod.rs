//! Integration test suite for `build-dataset-xml`
//!
//! These tests run the binary end to end against temporary deployment trees.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **build**: rendered XML for each dataset type and processing level
//! - **dry_run**: `--debug` validation-only runs
//! - **error_scenarios**: configuration and validation failures

#[path = "../common/mod.rs"]
mod common;

mod build;
mod dry_run;
mod error_scenarios;
