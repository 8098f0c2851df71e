//! Template error handling
//!
//! This module provides structured error types for template rendering with the
//! template location and user-friendly formatting.

/// Template errors with location context
#[derive(Debug)]
pub enum TemplateError {
    VariableNotFound {
        variable: String,
        available_variables: Box<Vec<String>>,
        suggestions: Box<Vec<String>>,
        location: Box<ErrorLocation>,
    },

    SyntaxError {
        message: String,
        location: Box<ErrorLocation>,
    },

    InvalidContext {
        message: String,
    },
}

/// Location information for template errors
#[derive(Debug, Clone)]
pub struct ErrorLocation {
    /// Template name (file name or the bundled template name)
    pub template_name: String,
    /// Line number if available from Tera
    pub line_number: Option<usize>,
    /// Template lines surrounding the error, 1-indexed
    pub context_lines: Option<Vec<(usize, String)>>,
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateError::VariableNotFound {
                variable,
                ..
            } => {
                write!(f, "Template variable not found: '{}'", variable)
            }
            TemplateError::SyntaxError {
                message,
                ..
            } => {
                write!(f, "Template syntax error: {}", message)
            }
            TemplateError::InvalidContext {
                message,
            } => {
                write!(f, "Template context could not be built: {}", message)
            }
        }
    }
}

impl std::error::Error for TemplateError {}

impl TemplateError {
    /// Generate user-friendly error message with context and suggestions
    pub fn format_with_context(&self) -> String {
        match self {
            TemplateError::VariableNotFound {
                variable,
                available_variables,
                suggestions,
                location,
            } => format_variable_not_found_error(
                variable,
                available_variables,
                suggestions,
                location,
            ),
            TemplateError::SyntaxError {
                message,
                location,
            } => format_syntax_error(message, location),
            TemplateError::InvalidContext {
                message,
            } => format!("ERROR: Template Context Error\n\nError: {}\n", message),
        }
    }

    /// Location of the error in the template, when one is known
    pub fn location(&self) -> Option<&ErrorLocation> {
        match self {
            TemplateError::VariableNotFound {
                location,
                ..
            }
            | TemplateError::SyntaxError {
                location,
                ..
            } => Some(location.as_ref()),
            TemplateError::InvalidContext {
                ..
            } => None,
        }
    }
}

/// Format a detailed "variable not found" error message
fn format_variable_not_found_error(
    variable: &str,
    available_variables: &[String],
    suggestions: &[String],
    location: &ErrorLocation,
) -> String {
    let mut msg = String::new();

    msg.push_str("ERROR: Template Variable Not Found\n\n");
    msg.push_str(&format!("Variable: {}\n", variable));
    msg.push_str(&format!("Template: {}\n", location.template_name));

    if let Some(line) = location.line_number {
        msg.push_str(&format!("Line: {}\n", line));
    }
    msg.push('\n');

    if !suggestions.is_empty() {
        msg.push_str("Did you mean one of these?\n");
        for suggestion in suggestions.iter() {
            msg.push_str(&format!("  - {}\n", suggestion));
        }
        msg.push('\n');
    }

    if !available_variables.is_empty() {
        msg.push_str("Available variables in this context:\n");
        for var in available_variables.iter() {
            msg.push_str(&format!("  {}\n", var));
        }
        msg.push('\n');
    }

    msg
}

/// Format syntax error
fn format_syntax_error(message: &str, location: &ErrorLocation) -> String {
    let mut msg = String::new();

    msg.push_str("ERROR: Template Syntax Error\n\n");
    msg.push_str(&format!("Error: {}\n", message));
    msg.push_str(&format!("Template: {}\n", location.template_name));

    if let Some(line) = location.line_number {
        msg.push_str(&format!("Line: {}\n", line));
    }

    if let Some(lines) = &location.context_lines {
        msg.push('\n');
        for (number, text) in lines {
            let marker = if Some(*number) == location.line_number {
                ">"
            } else {
                " "
            };
            msg.push_str(&format!("{} {:>4} | {}\n", marker, number, text));
        }
    }

    msg.push_str("\nSUGGESTION: Check template syntax for unclosed tags or invalid expressions.\n");
    msg.push_str("Common issues:\n");
    msg.push_str("  - Unclosed {{ }} or {% %} delimiters\n");
    msg.push_str("  - Invalid filter names\n");
    msg.push_str("  - Jinja-only syntax such as .items() on mappings\n\n");

    msg
}
