//! Build the ERDDAP `<dataset>` XML for one deployment data set.
//!
//! The command runs every configuration and validation check before anything
//! is rendered, so a failing run never writes to standard output:
//!
//! 1. template file
//! 2. deployment data root and deployment directory
//! 3. variable definitions file
//! 4. IOOS category file (existence only)
//! 5. definitions parse and required variables
//!
//! With `--debug` the command stops here and exits successfully. Otherwise
//! the variables are enriched with IOOS categories, ordered, and rendered
//! through the template.
//!
//! # Examples
//!
//! ```bash
//! # Real-time raw trajectory data set, definitions discovered in the deployment
//! build-dataset-xml ru01-20210101T1200
//!
//! # Delayed-mode science profiles with an explicit data root
//! build-dataset-xml ru01-20210101T1200 -m delayed --level sci -d profile \
//!     --data-home /data/gliders
//!
//! # Validate only
//! build-dataset-xml ru01-20210101T1200 -x -l debug
//! ```

use anyhow::{Context, Result};
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

use crate::config::{DataHome, DeploymentLayout};
use crate::constants::{DATA_HOME_ENV, DEFAULT_RELOAD_MINUTES, DEFAULT_UPDATE_MILLIS};
use crate::core::{DatasetType, DatasetXmlError, ProcessingLevel, SamplingMode};
use crate::dataset::{DatasetContext, DeploymentDataset};
use crate::templating::{TemplateRenderer, TemplateSource};
use crate::variables::{self, CategorySource, enrich, load_categories, order_variables};

/// Command-line options for building a dataset XML element.
#[derive(Args, Debug, Clone)]
pub struct BuildCommand {
    /// Glider deployment name formatted as glider-YYYYmmddTHHMM
    pub deployment: String,

    /// Deployment dataset status
    #[arg(short, long, value_enum, default_value_t = SamplingMode::Rt)]
    pub mode: SamplingMode,

    /// Dataset type
    #[arg(short, long, value_enum, default_value_t = DatasetType::Trajectory)]
    pub dtype: DatasetType,

    /// Processing level
    #[arg(long, value_enum, default_value_t = ProcessingLevel::Raw)]
    pub level: ProcessingLevel,

    /// Reload data set metadata and data every N minutes
    #[arg(short, long, default_value_t = DEFAULT_RELOAD_MINUTES, allow_negative_numbers = true)]
    pub reload: i64,

    /// Look for new data files every N milliseconds (-1 disables)
    #[arg(short, long, default_value_t = DEFAULT_UPDATE_MILLIS, allow_negative_numbers = true)]
    pub update: i64,

    /// ERDDAP <dataset /> template file [default: bundled gliders.xml]
    #[arg(short, long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Variable definitions YAML file. If not specified, the definitions file
    /// matching --level and --dtype is looked up in the deployment's config
    /// directory.
    #[arg(long = "defs", value_name = "FILE")]
    pub defs: Option<PathBuf>,

    /// IOOS category table YAML file [default: bundled vocabulary]
    #[arg(long, value_name = "FILE")]
    pub ioos_categories: Option<PathBuf>,

    /// Deployment data root
    #[arg(long, value_name = "DIR", env = DATA_HOME_ENV)]
    pub data_home: Option<String>,

    /// Clobber existing NetCDF files if they exist (no effect on the XML)
    #[arg(short, long)]
    pub clobber: bool,

    /// Check the configuration and exit without rendering
    #[arg(short = 'x', long)]
    pub debug: bool,
}

/// Resolved settings for one build.
///
/// Everything the build needs is carried here; nothing below this point
/// reads the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub deployment: String,
    pub mode: SamplingMode,
    pub level: ProcessingLevel,
    pub dtype: DatasetType,
    pub reload_minutes: i64,
    pub update_millis: i64,
    pub template: TemplateSource,
    pub definitions: Option<PathBuf>,
    pub categories: CategorySource,
    pub data_home: Option<String>,
    pub clobber: bool,
    pub dry_run: bool,
}

impl BuildConfig {
    /// Defaults for a deployment, matching the command-line defaults.
    pub fn new(deployment: impl Into<String>) -> Self {
        Self {
            deployment: deployment.into(),
            mode: SamplingMode::default(),
            level: ProcessingLevel::default(),
            dtype: DatasetType::default(),
            reload_minutes: DEFAULT_RELOAD_MINUTES,
            update_millis: DEFAULT_UPDATE_MILLIS,
            template: TemplateSource::default(),
            definitions: None,
            categories: CategorySource::default(),
            data_home: None,
            clobber: false,
            dry_run: false,
        }
    }
}

impl From<BuildCommand> for BuildConfig {
    fn from(cmd: BuildCommand) -> Self {
        Self {
            deployment: cmd.deployment,
            mode: cmd.mode,
            level: cmd.level,
            dtype: cmd.dtype,
            reload_minutes: cmd.reload,
            update_millis: cmd.update,
            template: cmd.template.map_or(TemplateSource::Bundled, TemplateSource::File),
            definitions: cmd.defs,
            categories: cmd.ioos_categories.map_or(CategorySource::Bundled, CategorySource::File),
            data_home: cmd.data_home,
            clobber: cmd.clobber,
            dry_run: cmd.debug,
        }
    }
}

impl BuildCommand {
    /// Run the build, printing the XML to stdout.
    pub fn execute(self) -> Result<()> {
        let config = BuildConfig::from(self);
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        execute_with_writer(&config, &mut out)
    }
}

/// Run the build, writing the XML to `out`.
///
/// Nothing is written unless rendering succeeds. A dry run writes nothing.
pub fn execute_with_writer<W: Write>(config: &BuildConfig, out: &mut W) -> Result<()> {
    match build(config)? {
        Some(xml) => {
            let xml = xml.strip_suffix('\n').unwrap_or(xml.as_str());
            writeln!(out, "{xml}")
                .and_then(|()| out.flush())
                .context("Failed to write dataset XML")?;
        }
        None => tracing::info!("Debug mode: configuration is valid, skipping render"),
    }
    Ok(())
}

/// Validate the configuration and render the dataset XML.
///
/// Returns `None` for a dry run.
pub fn build(config: &BuildConfig) -> Result<Option<String>, DatasetXmlError> {
    config.template.ensure_exists()?;

    let data_home = DataHome::from_setting(config.data_home.as_deref())?;
    let layout = DeploymentLayout::resolve(&data_home, &config.deployment)?;

    let defs_file = match &config.definitions {
        Some(path) => {
            tracing::info!("Using specified definitions file: {}", path.display());
            path.clone()
        }
        None => {
            tracing::info!("Searching for ERDDAP variable definitions file");
            layout.definitions_file(config.level, config.dtype)
        }
    };
    if !defs_file.is_file() {
        return Err(DatasetXmlError::DefinitionsNotFound {
            path: defs_file.display().to_string(),
        });
    }

    config.categories.ensure_exists()?;

    let mut definitions = variables::load(&defs_file)?;

    let cdm_data_type = config.dtype.cdm_data_type();
    let missing = variables::missing_required(&definitions, config.dtype);
    if !missing.is_empty() {
        tracing::error!("Missing one or more required {} variables", cdm_data_type);
        for name in &missing {
            tracing::error!("Missing required variable {}", name);
        }
        return Err(DatasetXmlError::MissingRequiredVariables {
            cdm_data_type: cdm_data_type.to_string(),
            missing,
        });
    }

    let dataset =
        DeploymentDataset::new(&config.deployment, config.mode, config.level, config.dtype);

    tracing::info!("Data set location: {}", layout.home().display());
    tracing::info!("XML template: {}", config.template.name());
    tracing::info!("Variable definitions: {}", defs_file.display());
    tracing::info!("IOOS categories: {}", config.categories.describe());
    tracing::info!("ERDDAP CDM data type: {}", cdm_data_type);
    if config.clobber {
        tracing::debug!("--clobber has no effect on dataset XML");
    }

    if config.dry_run {
        return Ok(None);
    }

    if let Some(table) = load_categories(&config.categories) {
        enrich(&mut definitions, &table);
    }

    let ordered = order_variables(definitions, config.dtype)?;
    let file_dir = layout.nc_dir(config.level, config.dtype, config.mode);
    let context = DatasetContext::new(
        &dataset,
        file_dir.display().to_string(),
        ordered,
        config.reload_minutes,
        config.update_millis,
    );

    tracing::info!("Data set ID: {}", context.dataset.dataset_id);
    let xml = TemplateRenderer::new().render_dataset(&config.template, &context)?;
    Ok(Some(xml))
}
