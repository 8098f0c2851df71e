//! Variable definitions.
//!
//! A variable definitions file is a YAML list of records, one per NetCDF
//! variable exposed by the ERDDAP dataset:
//!
//! ```yaml
//! - name: time
//!   type: double
//!   attrs:
//!     long_name: Time
//!     standard_name: time
//!     units: seconds since 1970-01-01T00:00:00Z
//! - name: instrument_ctd
//!   type: int
//!   attrs:
//!     long_name: Seabird Glider Payload CTD
//! ```
//!
//! Every record needs a `name` and an `attrs` mapping. Other keys are kept
//! verbatim and exposed to templates next to `name` and `attrs`. Records are
//! validated once, when the file is loaded: names must be non-empty and
//! unique, attribute keys must be strings. After loading, the rest of the
//! pipeline can rely on those invariants.
//!
//! Attribute values are stored as strings. Scalars are converted when the
//! file is read, using the spelling ERDDAP configurations have always
//! received for them: `40.0` stays `40.0`, `.nan` becomes `nan`, `1.0e-5`
//! becomes `1e-05` and `true` becomes `True`.
//!
//! Submodules:
//! - [`categories`] - IOOS category table and the `ioos_category` enricher
//! - [`ordering`] - required-variable validation and presentation order

pub mod categories;
pub mod ordering;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Number, Value};
use std::collections::HashSet;
use std::path::Path;

use crate::core::DatasetXmlError;

pub use categories::{CategorySource, IoosCategoryTable, enrich, load_categories};
pub use ordering::{missing_required, order_variables};

/// A single dataset variable and its attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDefinition {
    /// NetCDF variable name, unique within a definitions file
    pub name: String,

    /// Variable attributes in source order, every value a string
    #[serde(deserialize_with = "string_attrs")]
    pub attrs: Mapping,

    /// Any other keys present on the record
    #[serde(flatten)]
    pub extra: Mapping,
}

impl VariableDefinition {
    /// Create a definition with the given name and no attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Mapping::new(),
            extra: Mapping::new(),
        }
    }

    /// Value of an attribute, if present.
    #[must_use]
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).and_then(serde_yaml::Value::as_str)
    }
}

/// Read an `attrs` mapping, converting every value to its string form.
fn string_attrs<'de, D>(deserializer: D) -> Result<Mapping, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Mapping(attrs) => Ok(attrs
            .into_iter()
            .map(|(key, value)| (key, Value::String(attr_string(&value))))
            .collect()),
        other => Err(D::Error::custom(format!(
            "attrs must be a mapping, found {}",
            value_kind(&other)
        ))),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// String form of an attribute value.
///
/// Matches Python's `str()`, which is how these values have always been
/// written into dataset XML.
fn attr_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => python_repr(other),
    }
}

fn python_repr(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(number) => number_string(number),
        Value::String(s) => format!("'{s}'"),
        Value::Sequence(items) => {
            let items: Vec<String> = items.iter().map(python_repr).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Mapping(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", python_repr(k), python_repr(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
        Value::Tagged(tagged) => python_repr(&tagged.value),
    }
}

fn number_string(number: &Number) -> String {
    if let Some(i) = number.as_i64() {
        i.to_string()
    } else if let Some(u) = number.as_u64() {
        u.to_string()
    } else if let Some(f) = number.as_f64() {
        float_string(f)
    } else {
        number.to_string()
    }
}

/// Shortest round-trip float text with Python's layout: a `.0` on integral
/// values and exponent notation outside `1e-4 <= |x| < 1e16`.
fn float_string(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..16).contains(&exponent) {
        let plain = value.to_string();
        if plain.contains('.') { plain } else { format!("{plain}.0") }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.abs())
    }
}

/// Load and validate variable definitions from a YAML file.
///
/// Records are returned in file order.
///
/// # Errors
///
/// - [`DatasetXmlError::DefinitionsNotFound`] if `path` is not a file
/// - [`DatasetXmlError::DefinitionsParseError`] if the file cannot be read or
///   is not a list of `{name, attrs}` records
/// - [`DatasetXmlError::InvalidDefinitions`] if a record fails validation
pub fn load(path: &Path) -> Result<Vec<VariableDefinition>, DatasetXmlError> {
    if !path.is_file() {
        return Err(DatasetXmlError::DefinitionsNotFound {
            path: path.display().to_string(),
        });
    }

    let content =
        std::fs::read_to_string(path).map_err(|e| DatasetXmlError::DefinitionsParseError {
            file: path.display().to_string(),
            reason: e.to_string(),
        })?;

    let definitions = from_yaml_str(&content, &path.display().to_string())?;
    tracing::debug!("Loaded {} variable definitions from {}", definitions.len(), path.display());
    Ok(definitions)
}

/// Parse and validate variable definitions from YAML text.
///
/// `file` is only used in error messages.
pub fn from_yaml_str(content: &str, file: &str) -> Result<Vec<VariableDefinition>, DatasetXmlError> {
    let definitions: Vec<VariableDefinition> =
        serde_yaml::from_str(content).map_err(|e| DatasetXmlError::DefinitionsParseError {
            file: file.to_string(),
            reason: e.to_string(),
        })?;

    validate(&definitions).map_err(|reason| DatasetXmlError::InvalidDefinitions {
        file: file.to_string(),
        reason,
    })?;

    Ok(definitions)
}

/// Check the load-time invariants of a definitions list.
fn validate(definitions: &[VariableDefinition]) -> Result<(), String> {
    if definitions.is_empty() {
        return Err("no variables are defined".to_string());
    }

    let mut seen = HashSet::with_capacity(definitions.len());
    for (index, definition) in definitions.iter().enumerate() {
        if definition.name.trim().is_empty() {
            return Err(format!("record {} has an empty name", index + 1));
        }

        if let Some(key) = definition.attrs.keys().find(|key| !key.is_string()) {
            return Err(format!(
                "variable '{}' has a non-string attribute key: {:?}",
                definition.name, key
            ));
        }

        if !seen.insert(definition.name.as_str()) {
            return Err(format!("variable '{}' is defined more than once", definition.name));
        }
    }

    Ok(())
}
