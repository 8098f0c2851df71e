//! Global constants used throughout the crate.
//!
//! This module contains the required-variable sets, ERDDAP graph queries,
//! default intervals and the well-known names that are shared between the
//! loader, the ordering engine, the metadata builder and the CLI. Defining
//! them centrally keeps the literal strings discoverable.

/// Variables every trajectory dataset must define, in presentation order.
pub const REQUIRED_TRAJECTORY_VARIABLES: &[&str] =
    &["time", "latitude", "longitude", "depth", "trajectory", "source_file", "platform"];

/// Variables every profile dataset must define, in presentation order.
pub const REQUIRED_PROFILE_VARIABLES: &[&str] = &[
    "time",
    "latitude",
    "longitude",
    "depth",
    "trajectory",
    "profile_id",
    "profile_lat",
    "profile_lon",
    "source_file",
    "platform",
];

/// Name prefix of instrument description variables.
///
/// Instrument variables are listed directly after the required variables.
pub const INSTRUMENT_PREFIX: &str = "instrument_";

/// Attribute key written by the category enricher.
pub const IOOS_CATEGORY_ATTR: &str = "ioos_category";

/// Category assigned to variables missing from the IOOS category table.
pub const UNKNOWN_IOOS_CATEGORY: &str = "Unknown";

/// Make A Graph query for trajectory datasets (already XML-escaped).
pub const TRAJECTORY_GRAPH_QUERY: &str = "longitude,latitude,time&amp;.draw=markers&amp;\
    .marker=6%7C3&amp;.color=0xFFFFFF&amp;.colorBar=Rainbow2%7C%7C%7C%7C%7C&amp;\
    .bgColor=0xffccccff";

/// Make A Graph query for raw profile datasets, plotting the raw CTD temperature.
pub const RAW_PROFILE_GRAPH_QUERY: &str = "sci_water_temp,depth,time&amp;\
    time&gt;=max(time)-1days&amp;sci_water_temp!=NaN&amp;.draw=markers&amp;\
    .marker=6%7C3&amp;.color=0xFFFFFF&amp;.colorBar=Rainbow2%7C%7C%7C%7C%7C&amp;\
    .bgColor=0xffccccff&amp;.yRange=%7C%7Cfalse";

/// Make A Graph query for science profile datasets, plotting calibrated temperature.
pub const SCIENCE_PROFILE_GRAPH_QUERY: &str = "temperature,depth,time&amp;\
    time&gt;=max(time)-1days&amp;temperature!=NaN&amp;.draw=markers&amp;\
    .marker=6%7C3&amp;.color=0xFFFFFF&amp;.colorBar=Rainbow2%7C%7C%7C%7C%7C&amp;\
    .bgColor=0xffccccff&amp;.yRange=%7C%7Cfalse";

/// Default ERDDAP `reloadEveryNMinutes`.
pub const DEFAULT_RELOAD_MINUTES: i64 = 86400;

/// Default ERDDAP `updateEveryNMillis`; `-1` disables update checks.
pub const DEFAULT_UPDATE_MILLIS: i64 = -1;

/// Environment variable holding the deployment data root.
pub const DATA_HOME_ENV: &str = "GLIDER_DATA_HOME";

/// Directory below the data root containing the per-year deployment trees.
pub const DEPLOYMENTS_DIR: &str = "deployments";

/// Bundled ERDDAP `<dataset/>` template.
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/gliders.xml");

/// Name used for the bundled template in logs and error messages.
pub const DEFAULT_TEMPLATE_NAME: &str = "gliders.xml";

/// Bundled IOOS category controlled vocabulary.
pub const DEFAULT_IOOS_CATEGORIES: &str = include_str!("../resources/ioos_categories.yml");
