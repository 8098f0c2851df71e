//! Required-variable validation and presentation order.
//!
//! ERDDAP lists variables in the order they appear in `<dataVariable>`
//! elements. Generated datasets use a fixed order:
//!
//! 1. the required variables of the dataset type, in their declared order
//! 2. `instrument_*` variables, sorted by name
//! 3. every other variable, sorted by name
//!
//! Names compare as plain strings (byte order).

use std::cmp::Ordering;

use crate::constants::INSTRUMENT_PREFIX;
use crate::core::{DatasetType, DatasetXmlError};
use crate::variables::VariableDefinition;

/// Required variables of `dtype` that are not defined, in required-set order.
#[must_use]
pub fn missing_required(variables: &[VariableDefinition], dtype: DatasetType) -> Vec<String> {
    dtype
        .required_variables()
        .iter()
        .filter(|required| !variables.iter().any(|v| v.name == **required))
        .map(|required| (*required).to_string())
        .collect()
}

/// Reorder variables for presentation.
///
/// The result is a permutation of `variables`. Names are unique after
/// [`crate::variables::load`]; if a list with repeated names is passed in,
/// every copy is kept and repeats stay in input order.
///
/// # Errors
///
/// [`DatasetXmlError::MissingRequiredVariables`] listing every required
/// variable of `dtype` that is absent.
pub fn order_variables(
    variables: Vec<VariableDefinition>,
    dtype: DatasetType,
) -> Result<Vec<VariableDefinition>, DatasetXmlError> {
    let missing = missing_required(&variables, dtype);
    if !missing.is_empty() {
        return Err(DatasetXmlError::MissingRequiredVariables {
            cdm_data_type: dtype.cdm_data_type().to_string(),
            missing,
        });
    }

    let required = dtype.required_variables();
    let mut ordered = variables;
    ordered.sort_by(|a, b| compare(a, b, required));
    Ok(ordered)
}

/// Position group of a name: required (by declared index), instrument, other.
fn rank(name: &str, required: &[&str]) -> (u8, usize) {
    match required.iter().position(|r| *r == name) {
        Some(index) => (0, index),
        None if name.starts_with(INSTRUMENT_PREFIX) => (1, 0),
        None => (2, 0),
    }
}

fn compare(a: &VariableDefinition, b: &VariableDefinition, required: &[&str]) -> Ordering {
    rank(&a.name, required)
        .cmp(&rank(&b.name, required))
        .then_with(|| a.name.cmp(&b.name))
}
