//! Error handling for the dataset XML generator
//!
//! This module provides the error types and user-friendly error reporting for
//! the generator. The error system follows two principles:
//! 1. **Strongly-typed errors** so callers can tell configuration problems from
//!    validation and rendering failures
//! 2. **User-friendly messages** with an actionable suggestion for CLI users
//!
//! # Architecture
//!
//! - [`DatasetXmlError`] - Enumerated error types for every fatal failure
//! - [`ErrorKind`] - The three fatal categories a run can end in
//! - [`ErrorContext`] - Wrapper that adds details and suggestions for display
//!
//! # Error Categories
//!
//! - **Configuration**: template, data home, deployment directory, definitions
//!   and category files. Always detected before anything is rendered.
//! - **Validation**: required variables absent from the definitions.
//! - **Render**: the template is malformed or references unknown fields.
//!
//! Category-table problems that only degrade the output (missing entries, an
//! unreadable table) are not errors; they are logged at warn level and the run
//! continues.
//!
//! # Examples
//!
//! ```rust,no_run
//! use erddap_dataset_xml::core::{DatasetXmlError, user_friendly_error};
//!
//! let error = DatasetXmlError::DataHomeNotSet;
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestion
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::constants::DATA_HOME_ENV;
use crate::templating::TemplateError;

/// Fatal error categories.
///
/// Every [`DatasetXmlError`] belongs to exactly one category. Configuration and
/// validation errors are always raised before rendering starts, so a run that
/// fails with either of them has written nothing to standard output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Environment, path or file problems
    Configuration,
    /// Required variables missing from the definitions
    Validation,
    /// Template rendering failed
    Render,
}

/// The main error type for dataset XML generation
///
/// # Error Categories
///
/// ## Configuration
/// - [`TemplateNotFound`] - Template path is not a file
/// - [`DataHomeNotSet`] - No deployment data root configured
/// - [`DeploymentsRootInvalid`] - `{data_home}/deployments` is not a directory
/// - [`DeploymentYearMissing`] - Deployment name carries no 4-digit year
/// - [`DeploymentHomeInvalid`] - Deployment directory does not exist
/// - [`DefinitionsNotFound`] - Variable definitions file missing
/// - [`DefinitionsParseError`] - Definitions file is not a list of records
/// - [`InvalidDefinitions`] - A record failed load-time validation
/// - [`CategoriesNotFound`] - Explicit IOOS category table missing
/// - [`IoError`] - Standard I/O errors from [`std::io::Error`]
///
/// ## Validation
/// - [`MissingRequiredVariables`] - Required variables absent
///
/// ## Render
/// - [`RenderError`] - Template rendering failed
///
/// [`TemplateNotFound`]: DatasetXmlError::TemplateNotFound
/// [`DataHomeNotSet`]: DatasetXmlError::DataHomeNotSet
/// [`DeploymentsRootInvalid`]: DatasetXmlError::DeploymentsRootInvalid
/// [`DeploymentYearMissing`]: DatasetXmlError::DeploymentYearMissing
/// [`DeploymentHomeInvalid`]: DatasetXmlError::DeploymentHomeInvalid
/// [`DefinitionsNotFound`]: DatasetXmlError::DefinitionsNotFound
/// [`DefinitionsParseError`]: DatasetXmlError::DefinitionsParseError
/// [`InvalidDefinitions`]: DatasetXmlError::InvalidDefinitions
/// [`CategoriesNotFound`]: DatasetXmlError::CategoriesNotFound
/// [`IoError`]: DatasetXmlError::IoError
/// [`MissingRequiredVariables`]: DatasetXmlError::MissingRequiredVariables
/// [`RenderError`]: DatasetXmlError::RenderError
#[derive(Error, Debug)]
pub enum DatasetXmlError {
    /// The XML template path does not name a regular file
    #[error("Invalid XML template: {path}")]
    TemplateNotFound {
        /// The template path as given on the command line
        path: String,
    },

    /// No deployment data root was configured
    ///
    /// The root comes from `--data-home` or the `GLIDER_DATA_HOME`
    /// environment variable.
    #[error("GLIDER_DATA_HOME environment variable not set")]
    DataHomeNotSet,

    /// The deployments directory under the data root does not exist
    #[error("Invalid deployment data sets home: {path}")]
    DeploymentsRootInvalid {
        /// The `{data_home}/deployments` path that was checked
        path: String,
    },

    /// The deployment name has no embedded 4-digit year
    ///
    /// Deployment trees are grouped by year, so the year is needed to locate
    /// the deployment directory.
    #[error("Cannot determine deployment year from '{deployment}'")]
    DeploymentYearMissing {
        /// The deployment name as given on the command line
        deployment: String,
    },

    /// The deployment directory does not exist
    #[error("Invalid data set home: {path}")]
    DeploymentHomeInvalid {
        /// The resolved `{root}/{year}/{deployment}` path
        path: String,
    },

    /// The variable definitions file does not exist
    #[error("Invalid variable definitions file: {path}")]
    DefinitionsNotFound {
        /// The definitions path that was checked
        path: String,
    },

    /// The variable definitions file is not a sequence of `{name, attrs}` records
    #[error("Error reading {file}: {reason}")]
    DefinitionsParseError {
        /// Path of the definitions file
        file: String,
        /// Parser message
        reason: String,
    },

    /// A definition record parsed but failed validation
    #[error("Invalid variable definition in {file}: {reason}")]
    InvalidDefinitions {
        /// Path of the definitions file
        file: String,
        /// Which record failed and why
        reason: String,
    },

    /// An explicitly configured IOOS category table does not exist
    #[error("Invalid IOOS categories file: {path}")]
    CategoriesNotFound {
        /// The category table path that was checked
        path: String,
    },

    /// One or more required variables are not defined
    ///
    /// `missing` lists every absent name in required-set order.
    #[error("Missing one or more required {cdm_data_type} variables: {}", .missing.join(", "))]
    MissingRequiredVariables {
        /// CDM data type whose required set was checked
        cdm_data_type: String,
        /// Every absent required name
        missing: Vec<String>,
    },

    /// The template failed to render
    #[error("Failed to render template {template}")]
    RenderError {
        /// Template name or path
        template: String,
        /// Structured template error
        #[source]
        source: TemplateError,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DatasetXmlError {
    /// The fatal category this error belongs to.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            DatasetXmlError::MissingRequiredVariables {
                ..
            } => ErrorKind::Validation,
            DatasetXmlError::RenderError {
                ..
            } => ErrorKind::Render,
            _ => ErrorKind::Configuration,
        }
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// The error is shown in red, details in yellow and the suggestion in green.
///
/// # Examples
///
/// ```rust,no_run
/// use erddap_dataset_xml::core::{DatasetXmlError, ErrorContext};
///
/// let context = ErrorContext::new(DatasetXmlError::DataHomeNotSet)
///     .with_suggestion("export GLIDER_DATA_HOME=/data/gliders")
///     .with_details("Deployments are located below the data root");
///
/// println!("{}", context);
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// Message of the underlying error
    pub message: String,
    /// Fatal category, when the error was a [`DatasetXmlError`]
    pub kind: Option<ErrorKind>,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a [`DatasetXmlError`]
    #[must_use]
    pub fn new(error: DatasetXmlError) -> Self {
        Self {
            kind: Some(error.kind()),
            message: error.to_string(),
            suggestion: None,
            details: None,
        }
    }

    /// Create an error context from a plain message with no known category
    #[must_use]
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: None,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// Standard output is reserved for the rendered XML, so nothing here
    /// writes to it.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.message);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognises [`DatasetXmlError`] anywhere in the error chain (commands wrap
/// errors with `anyhow::Context`) and [`std::io::Error`]; anything else is
/// shown with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for cause in error.chain() {
        if let Some(xml_error) = cause.downcast_ref::<DatasetXmlError>() {
            return create_error_context(xml_error);
        }
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        if io_error.kind() == std::io::ErrorKind::PermissionDenied {
            return ErrorContext::from_message(io_error.to_string())
                .with_suggestion("Check file ownership and permissions")
                .with_details("A required file could not be read");
        }
    }

    // Generic error - include the full error chain for better diagnostics
    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::from_message(message)
}

/// Map each [`DatasetXmlError`] variant to a context with a suggestion.
fn create_error_context(error: &DatasetXmlError) -> ErrorContext {
    let base = ErrorContext {
        message: error.to_string(),
        kind: Some(error.kind()),
        suggestion: None,
        details: None,
    };

    match error {
        DatasetXmlError::TemplateNotFound {
            ..
        } => base.with_suggestion(
            "Pass an existing template with --template, or omit it to use the bundled template",
        ),
        DatasetXmlError::DataHomeNotSet => base
            .with_suggestion(format!("Set {DATA_HOME_ENV} or pass --data-home"))
            .with_details("Deployments are located under <data home>/deployments/<year>/<name>"),
        DatasetXmlError::DeploymentsRootInvalid {
            ..
        } => base.with_suggestion(format!(
            "Check that {DATA_HOME_ENV} points at the glider data root containing 'deployments'"
        )),
        DatasetXmlError::DeploymentYearMissing {
            ..
        } => base.with_suggestion("Deployment names are formatted as glider-YYYYmmddTHHMM"),
        DatasetXmlError::DeploymentHomeInvalid {
            ..
        } => base.with_suggestion("Check the deployment name and the year directory it maps to"),
        DatasetXmlError::DefinitionsNotFound {
            ..
        } => base
            .with_suggestion("Pass the definitions file with --defs")
            .with_details("Without --defs the file is searched as config/<level>-<dtype>-var_defs.yml"),
        DatasetXmlError::DefinitionsParseError {
            ..
        }
        | DatasetXmlError::InvalidDefinitions {
            ..
        } => base
            .with_suggestion("Each entry needs a unique, non-empty 'name' and an 'attrs' mapping")
            .with_details("The definitions file must be a YAML list of {name, attrs} records"),
        DatasetXmlError::CategoriesNotFound {
            ..
        } => base.with_suggestion(
            "Pass an existing file with --ioos-categories, or omit it to use the bundled vocabulary",
        ),
        DatasetXmlError::MissingRequiredVariables {
            ..
        } => base.with_suggestion("Add the missing variables to the variable definitions file"),
        DatasetXmlError::RenderError {
            source,
            ..
        } => base
            .with_details(source.format_with_context())
            .with_suggestion(
                "Check template syntax: variables use {{ var }}, control flow uses {% %}. \
                 Available fields: dataset, variables, cdm_data_type, n_millis, n_minutes",
            ),
        DatasetXmlError::IoError(_) => {
            base.with_suggestion("Check that the file exists and is readable")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_error_kinds() {
        assert_eq!(DatasetXmlError::DataHomeNotSet.kind(), ErrorKind::Configuration);
        assert_eq!(
            DatasetXmlError::DefinitionsNotFound {
                path: "defs.yml".to_string()
            }
            .kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            DatasetXmlError::MissingRequiredVariables {
                cdm_data_type: "Trajectory".to_string(),
                missing: vec!["time".to_string()],
            }
            .kind(),
            ErrorKind::Validation
        );
    }

    #[test]
    fn test_missing_variables_message_lists_all_names() {
        let error = DatasetXmlError::MissingRequiredVariables {
            cdm_data_type: "TrajectoryProfile".to_string(),
            missing: vec!["profile_id".to_string(), "profile_lat".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "Missing one or more required TrajectoryProfile variables: profile_id, profile_lat"
        );
    }

    #[test]
    fn test_data_home_message_names_env_var() {
        assert_eq!(
            DatasetXmlError::DataHomeNotSet.to_string(),
            "GLIDER_DATA_HOME environment variable not set"
        );
    }

    #[test]
    fn test_user_friendly_error_finds_wrapped_error() {
        let result: anyhow::Result<()> = Err(DatasetXmlError::DeploymentHomeInvalid {
            path: "/data/deployments/2021/ru01-20210101T1200".to_string(),
        })
        .context("Failed to resolve deployment");

        let ctx = user_friendly_error(result.unwrap_err());
        assert_eq!(ctx.kind, Some(ErrorKind::Configuration));
        assert!(ctx.message.contains("Invalid data set home"));
        assert!(ctx.suggestion.is_some());
    }

    #[test]
    fn test_user_friendly_error_generic_includes_chain() {
        let result: anyhow::Result<()> =
            Err(anyhow::anyhow!("root cause")).context("outer operation");
        let ctx = user_friendly_error(result.unwrap_err());
        assert_eq!(ctx.kind, None);
        assert!(ctx.message.contains("outer operation"));
        assert!(ctx.message.contains("Caused by:"));
        assert!(ctx.message.contains("root cause"));
    }

    #[test]
    fn test_error_context_display() {
        let ctx = ErrorContext::new(DatasetXmlError::DataHomeNotSet)
            .with_details("details here")
            .with_suggestion("do this");
        let text = ctx.to_string();
        assert!(text.contains("GLIDER_DATA_HOME environment variable not set"));
        assert!(text.contains("Details: details here"));
        assert!(text.contains("Suggestion: do this"));
    }
}
