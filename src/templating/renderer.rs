//! Template rendering engine with Tera.
//!
//! [`TemplateRenderer`] renders a dataset template against a
//! [`DatasetContext`]. Each render uses a fresh Tera instance holding exactly
//! one template, so there is no shared state between runs.

use regex::Regex;
use std::path::{Path, PathBuf};
use strsim::levenshtein;
use tera::{Context as TeraContext, Tera};

use super::error::{ErrorLocation, TemplateError};
use crate::constants::{DEFAULT_TEMPLATE, DEFAULT_TEMPLATE_NAME};
use crate::core::DatasetXmlError;
use crate::dataset::DatasetContext;

/// Maximum allowed Levenshtein distance as a percentage of target length for suggestions.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Lines shown on each side of the failing template line.
const CONTEXT_LINE_COUNT: usize = 3;

/// Where the dataset template comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TemplateSource {
    /// `gliders.xml`, compiled into the binary
    #[default]
    Bundled,
    /// User supplied template file
    File(PathBuf),
}

impl TemplateSource {
    /// Name used for the template in Tera and in error messages.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            TemplateSource::Bundled => DEFAULT_TEMPLATE_NAME.to_string(),
            TemplateSource::File(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        }
    }

    /// Fail if a configured template file does not exist.
    pub fn ensure_exists(&self) -> Result<(), DatasetXmlError> {
        match self {
            TemplateSource::Bundled => Ok(()),
            TemplateSource::File(path) if path.is_file() => Ok(()),
            TemplateSource::File(path) => Err(template_not_found(path)),
        }
    }

    /// Template text.
    pub fn load(&self) -> Result<String, DatasetXmlError> {
        match self {
            TemplateSource::Bundled => Ok(DEFAULT_TEMPLATE.to_string()),
            TemplateSource::File(path) => {
                self.ensure_exists()?;
                Ok(std::fs::read_to_string(path)?)
            }
        }
    }
}

fn template_not_found(path: &Path) -> DatasetXmlError {
    DatasetXmlError::TemplateNotFound {
        path: path.display().to_string(),
    }
}

/// Tera renderer for dataset XML templates.
///
/// Autoescaping is disabled: attribute values are written as given in the
/// variable definitions, and the graph queries are already XML-escaped.
#[derive(Debug, Default, Clone, Copy)]
pub struct TemplateRenderer;

impl TemplateRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Render a dataset template.
    ///
    /// # Errors
    ///
    /// - [`DatasetXmlError::TemplateNotFound`] if a template file is missing
    /// - [`DatasetXmlError::IoError`] if it cannot be read
    /// - [`DatasetXmlError::RenderError`] if the context cannot be built or
    ///   Tera fails to parse or render the template
    pub fn render_dataset(
        &self,
        source: &TemplateSource,
        context: &DatasetContext,
    ) -> Result<String, DatasetXmlError> {
        let name = source.name();
        let content = source.load()?;

        let render = TeraContext::from_serialize(context)
            .map_err(|e| TemplateError::InvalidContext {
                message: Self::format_tera_error(&e),
            })
            .and_then(|tera_context| self.render_template(&name, &content, &tera_context));

        render.map_err(|source| DatasetXmlError::RenderError {
            template: name,
            source,
        })
    }

    /// Render template text with the given context.
    pub fn render_template(
        &self,
        name: &str,
        content: &str,
        context: &TeraContext,
    ) -> Result<String, TemplateError> {
        tracing::debug!("Rendering template {}", name);
        Self::log_context_as_kv(context);

        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);

        tera.add_raw_template(name, content)
            .map_err(|e| Self::parse_tera_error(&e, name, content, context))?;

        let rendered = tera
            .render(name, context)
            .map_err(|e| Self::parse_tera_error(&e, name, content, context))?;

        tracing::debug!("Template rendering complete ({} bytes)", rendered.len());
        Ok(rendered)
    }

    /// Parse a Tera error into a structured TemplateError
    fn parse_tera_error(
        error: &tera::Error,
        template_name: &str,
        template_content: &str,
        context: &TeraContext,
    ) -> TemplateError {
        let messages = Self::error_chain(error);

        let line_number = messages.iter().find_map(|msg| Self::extract_line_number(msg));
        let context_lines = line_number
            .map(|line| Self::extract_context_lines(template_content, line, CONTEXT_LINE_COUNT))
            .filter(|lines| !lines.is_empty());

        let location = Box::new(ErrorLocation {
            template_name: template_name.to_string(),
            line_number,
            context_lines,
        });

        if let Some(name) = messages.iter().find_map(|msg| Self::extract_variable_name(msg)) {
            let available_variables = Self::extract_available_variables(context);
            let suggestions = Self::find_similar_variables(&name, &available_variables);
            return TemplateError::VariableNotFound {
                variable: name,
                available_variables: Box::new(available_variables),
                suggestions: Box::new(suggestions),
                location,
            };
        }

        TemplateError::SyntaxError {
            message: Self::format_tera_error(error),
            location,
        }
    }

    /// Messages of the error and every error in its source chain.
    fn error_chain(error: &tera::Error) -> Vec<String> {
        use std::error::Error;

        let mut messages = vec![error.to_string()];
        let mut current: Option<&dyn Error> = error.source();
        while let Some(err) = current {
            messages.push(err.to_string());
            current = err.source();
        }
        messages
    }

    /// Extract variable name from "Variable `foo` not found" message
    fn extract_variable_name(error_msg: &str) -> Option<String> {
        let re = Regex::new(r"Variable `([^`]+)` not found").ok()?;
        re.captures(error_msg).and_then(|caps| caps.get(1)).map(|m| m.as_str().to_string())
    }

    /// Line number from a Tera parse error (`--> 12:5`).
    fn extract_line_number(error_msg: &str) -> Option<usize> {
        let re = Regex::new(r"-->\s*(\d+):(\d+)").ok()?;
        re.captures(error_msg).and_then(|caps| caps.get(1)).and_then(|m| m.as_str().parse().ok())
    }

    /// Dotted paths of everything in the context.
    ///
    /// Arrays are listed once, with the keys of their first element shown as
    /// `name[].key`.
    pub(crate) fn extract_available_variables(context: &TeraContext) -> Vec<String> {
        fn walk(prefix: &str, value: &serde_json::Value, out: &mut Vec<String>) {
            match value {
                serde_json::Value::Object(map) => {
                    for (key, value) in map {
                        let path = if prefix.is_empty() {
                            key.clone()
                        } else {
                            format!("{prefix}.{key}")
                        };
                        walk(&path, value, out);
                    }
                }
                serde_json::Value::Array(items) => {
                    out.push(prefix.to_string());
                    if let Some(first @ serde_json::Value::Object(_)) = items.first() {
                        walk(&format!("{prefix}[]"), first, out);
                    }
                }
                _ => out.push(prefix.to_string()),
            }
        }

        let mut vars = Vec::new();
        walk("", &context.clone().into_json(), &mut vars);
        vars
    }

    /// Find similar variable names using Levenshtein distance
    pub(crate) fn find_similar_variables(target: &str, available: &[String]) -> Vec<String> {
        let mut scored: Vec<_> =
            available.iter().map(|var| (var.clone(), levenshtein(target, var))).collect();

        scored.sort_by_key(|(_, dist)| *dist);

        scored
            .into_iter()
            .filter(|(_, dist)| *dist <= target.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
            .take(3)
            .map(|(var, _)| var)
            .collect()
    }

    /// Extract context lines around an error location
    ///
    /// Returns up to `context_size` lines before and after the error line,
    /// along with their line numbers (1-indexed).
    pub(crate) fn extract_context_lines(
        content: &str,
        error_line: usize,
        context_size: usize,
    ) -> Vec<(usize, String)> {
        let lines: Vec<&str> = content.lines().collect();
        let total_lines = lines.len();

        if error_line == 0 || error_line > total_lines {
            return Vec::new();
        }

        let start = error_line.saturating_sub(context_size + 1);
        let end = (error_line + context_size).min(total_lines);

        lines[start..end]
            .iter()
            .enumerate()
            .map(|(idx, line)| (start + idx + 1, line.to_string()))
            .collect()
    }

    /// Format a Tera error by walking its source chain.
    ///
    /// Tera wraps the useful message ("Variable `foo` not found", "Filter
    /// `bar` not found", parse details) in generic "Failed to render" errors;
    /// those wrappers are dropped.
    pub fn format_tera_error(error: &tera::Error) -> String {
        let messages: Vec<String> = Self::error_chain(error)
            .into_iter()
            .map(|msg| msg.trim().to_string())
            .filter(|msg| {
                !msg.is_empty()
                    && !msg.starts_with("Failed to render")
                    && !msg.starts_with("Failed to parse")
            })
            .collect();

        if messages.is_empty() {
            error.to_string()
        } else {
            messages.join("\n  -> ")
        }
    }

    /// Log the template context as key-value pairs at trace level.
    fn log_context_as_kv(context: &TeraContext) {
        let json = context.clone().into_json();
        if let serde_json::Value::Object(map) = &json {
            for (key, value) in map {
                match value {
                    serde_json::Value::Array(items) => {
                        tracing::trace!("  {}: [{} items]", key, items.len());
                    }
                    other => tracing::trace!("  {}: {}", key, other),
                }
            }
        }
    }
}
