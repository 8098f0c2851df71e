//! Generate ERDDAP `<dataset/>` XML for glider deployment data sets.
//!
//! A glider deployment produces NetCDF files for up to eight data sets
//! (real-time or delayed mode, raw or science processing, trajectory or
//! profile). Each data set is served by ERDDAP through an
//! `EDDTableFromNcFiles` `<dataset>` element. This crate builds that element
//! from the deployment's variable definitions file.
//!
//! # Pipeline
//!
//! ```text
//! var_defs.yml ──► variables::load ──► missing_required ──► enrich ──► order_variables
//!                                                              ▲              │
//!                                    ioos_categories.yml ──────┘              ▼
//!                             DeploymentDataset ──► DatasetContext ──► TemplateRenderer ──► stdout
//! ```
//!
//! # Modules
//!
//! - [`variables`] - definitions loader, IOOS category enrichment, ordering
//! - [`dataset`] - dataset id, title, CDM data type, default graph query
//! - [`templating`] - Tera rendering with structured template errors
//! - [`config`] - deployment directory layout under the data root
//! - [`cli`] - the `build-dataset-xml` command
//! - [`core`] - error types and the dataset choice enums
//! - [`constants`] - required variables, graph queries, defaults
//!
//! # Example
//!
//! ```rust,no_run
//! use erddap_dataset_xml::core::{DatasetType, ProcessingLevel, SamplingMode};
//! use erddap_dataset_xml::dataset::{DatasetContext, DeploymentDataset};
//! use erddap_dataset_xml::templating::{TemplateRenderer, TemplateSource};
//! use erddap_dataset_xml::variables;
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let defs = variables::load(Path::new("sci-trajectory-var_defs.yml"))?;
//! let ordered = variables::order_variables(defs, DatasetType::Trajectory)?;
//!
//! let dataset = DeploymentDataset::new(
//!     "ru01-20210101T1200",
//!     SamplingMode::Rt,
//!     ProcessingLevel::Sci,
//!     DatasetType::Trajectory,
//! );
//! let context = DatasetContext::new(&dataset, "/data/nc", ordered, 86400, -1);
//! let xml = TemplateRenderer::new().render_dataset(&TemplateSource::Bundled, &context)?;
//! println!("{xml}");
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod dataset;
pub mod templating;
pub mod variables;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
