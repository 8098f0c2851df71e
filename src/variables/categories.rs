//! IOOS category enrichment.
//!
//! ERDDAP requires an `ioos_category` attribute on every variable when the
//! server runs with `variablesMustHaveIoosCategory`. The controlled vocabulary
//! maps variable names to category labels:
//!
//! ```yaml
//! conductivity: Salinity
//! temperature: Temperature
//! sci_water_temp: Temperature
//! ```
//!
//! Enrichment is best effort. A variable with no entry gets `Unknown`; a table
//! that cannot be read or is empty disables enrichment for the run and is only
//! reported as a warning.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_IOOS_CATEGORIES, IOOS_CATEGORY_ATTR, UNKNOWN_IOOS_CATEGORY};
use crate::core::DatasetXmlError;
use crate::variables::VariableDefinition;

/// Where the category table comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategorySource {
    /// Vocabulary compiled into the binary
    #[default]
    Bundled,
    /// User supplied YAML file
    File(PathBuf),
}

impl CategorySource {
    /// Fail if an explicitly configured file does not exist.
    ///
    /// This is the only fatal category-table check; everything after it is
    /// best effort.
    pub fn ensure_exists(&self) -> Result<(), DatasetXmlError> {
        match self {
            CategorySource::Bundled => Ok(()),
            CategorySource::File(path) if path.is_file() => Ok(()),
            CategorySource::File(path) => Err(DatasetXmlError::CategoriesNotFound {
                path: path.display().to_string(),
            }),
        }
    }

    /// Human readable description for logs.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            CategorySource::Bundled => "bundled IOOS categories".to_string(),
            CategorySource::File(path) => path.display().to_string(),
        }
    }
}

/// Variable name to IOOS category label lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IoosCategoryTable {
    categories: HashMap<String, String>,
}

impl IoosCategoryTable {
    /// Parse a flat `name: label` YAML mapping.
    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        let categories: Option<HashMap<String, String>> = serde_yaml::from_str(content)?;
        Ok(Self {
            categories: categories.unwrap_or_default(),
        })
    }

    /// Read and parse a category table file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_yaml_str(&content)?)
    }

    /// The category label for a variable, if the table has one.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.categories.get(name).map(String::as_str)
    }

    /// Number of entries in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl FromIterator<(String, String)> for IoosCategoryTable {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            categories: iter.into_iter().collect(),
        }
    }
}

/// Load the category table, returning `None` when enrichment should be skipped.
///
/// Read or parse failures and empty tables are logged at warn level.
pub fn load_categories(source: &CategorySource) -> Option<IoosCategoryTable> {
    let loaded = match source {
        CategorySource::Bundled => {
            IoosCategoryTable::from_yaml_str(DEFAULT_IOOS_CATEGORIES).map_err(anyhow::Error::from)
        }
        CategorySource::File(path) => IoosCategoryTable::load(path),
    };

    match loaded {
        Ok(table) if table.is_empty() => {
            tracing::warn!(
                "IOOS categories file {} has no entries, skipping ioos_category enrichment",
                source.describe()
            );
            None
        }
        Ok(table) => {
            tracing::debug!("Loaded {} IOOS categories from {}", table.len(), source.describe());
            Some(table)
        }
        Err(e) => {
            tracing::warn!(
                "Error loading IOOS categories file: {} ({}), skipping ioos_category enrichment",
                source.describe(),
                e
            );
            None
        }
    }
}

/// Set `attrs.ioos_category` on every variable.
///
/// Variables without a table entry get `Unknown`. Running this again with the
/// same table leaves the variables unchanged. Returns the number of variables
/// that were assigned `Unknown`.
pub fn enrich(variables: &mut [VariableDefinition], table: &IoosCategoryTable) -> usize {
    let mut unknown = 0;

    for variable in variables.iter_mut() {
        let category = match table.get(&variable.name) {
            Some(category) => category,
            None => {
                tracing::debug!("No IOOS category for variable {}", variable.name);
                unknown += 1;
                UNKNOWN_IOOS_CATEGORY
            }
        };

        variable.attrs.insert(IOOS_CATEGORY_ATTR.into(), category.into());
    }

    if unknown > 0 {
        tracing::warn!(
            "{} of {} variables have no IOOS category and were set to {}",
            unknown,
            variables.len(),
            UNKNOWN_IOOS_CATEGORY
        );
    }

    unknown
}
