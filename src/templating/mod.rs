//! Dataset XML templating.
//!
//! Dataset XML is produced by rendering a Tera template against a
//! [`crate::dataset::DatasetContext`]. The bundled `gliders.xml` template
//! renders an ERDDAP `EDDTableFromNcFiles` `<dataset>` element; a different
//! template can be supplied with `--template`.
//!
//! # Template Context
//!
//! - `dataset.dataset_id`, `dataset.active`, `dataset.file_dir`,
//!   `dataset.title`, `dataset.default_graph_query`
//! - `cdm_data_type`: `Trajectory` or `TrajectoryProfile`
//! - `n_minutes`: `reloadEveryNMinutes`
//! - `n_millis`: `updateEveryNMillis`
//! - `variables`: ordered list of `{name, attrs, ...}` records
//!
//! Attribute mappings keep their source order, so
//! `{% for key, value in var.attrs %}` emits attributes as written in the
//! definitions file.
//!
//! # Escaping
//!
//! Autoescaping is off. Values are emitted verbatim; the default graph
//! queries are stored pre-escaped (`&amp;`, `&gt;`).

pub mod error;
pub mod renderer;


pub use error::{ErrorLocation, TemplateError};
pub use renderer::{TemplateRenderer, TemplateSource};
