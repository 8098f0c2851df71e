//! Dataset metadata.
//!
//! Everything in this module is a pure function of the deployment name and
//! the three dataset choices (sampling mode, processing level, dataset type):
//!
//! | field | example |
//! |---|---|
//! | `dataset_id` | `ru01-20210101T1200-sci-trajectory-rt` |
//! | `title` | `ru01-20210101T1200 Real Time Science Time Series` |
//! | `cdm_data_type` | `Trajectory` / `TrajectoryProfile` |
//! | `default_graph_query` | Make A Graph query, see [`default_graph_query`] |
//!
//! [`DatasetContext`] bundles the metadata with the ordered variables and the
//! ERDDAP reload/update intervals; it is the value handed to the template.

use serde::Serialize;

use crate::constants::{
    RAW_PROFILE_GRAPH_QUERY, SCIENCE_PROFILE_GRAPH_QUERY, TRAJECTORY_GRAPH_QUERY,
};
use crate::core::{CdmDataType, DatasetType, ProcessingLevel, SamplingMode};
use crate::variables::VariableDefinition;

/// One dataset of a glider deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentDataset {
    /// Deployment name, `glider-YYYYmmddTHHMM`
    pub deployment: String,
    pub mode: SamplingMode,
    pub level: ProcessingLevel,
    pub dtype: DatasetType,
}

/// Title suffix rule, evaluated against the dataset and its CDM data type.
type TitleRule = fn(&DeploymentDataset, CdmDataType) -> &'static str;

/// Title suffixes, applied in this order.
const TITLE_RULES: [TitleRule; 3] = [mode_suffix, level_suffix, cdm_suffix];

fn mode_suffix(dataset: &DeploymentDataset, _: CdmDataType) -> &'static str {
    match dataset.mode {
        SamplingMode::Rt => "Real Time",
        SamplingMode::Delayed => "Delayed Mode",
    }
}

fn level_suffix(dataset: &DeploymentDataset, _: CdmDataType) -> &'static str {
    match dataset.level {
        ProcessingLevel::Sci => "Science",
        ProcessingLevel::Raw => "Raw",
    }
}

fn cdm_suffix(_: &DeploymentDataset, cdm_data_type: CdmDataType) -> &'static str {
    match cdm_data_type {
        CdmDataType::TrajectoryProfile => "Profiles",
        CdmDataType::Trajectory => "Time Series",
    }
}

impl DeploymentDataset {
    pub fn new(
        deployment: impl Into<String>,
        mode: SamplingMode,
        level: ProcessingLevel,
        dtype: DatasetType,
    ) -> Self {
        Self {
            deployment: deployment.into(),
            mode,
            level,
            dtype,
        }
    }

    #[must_use]
    pub const fn cdm_data_type(&self) -> CdmDataType {
        self.dtype.cdm_data_type()
    }

    /// `{deployment}-{level}-{dtype}-{mode}`
    #[must_use]
    pub fn dataset_id(&self) -> String {
        format!("{}-{}-{}-{}", self.deployment, self.level, self.dtype, self.mode)
    }

    /// The deployment name followed by each [`TITLE_RULES`] suffix.
    #[must_use]
    pub fn title(&self) -> String {
        let cdm_data_type = self.cdm_data_type();
        TITLE_RULES.iter().fold(self.deployment.clone(), |title, rule| {
            format!("{} {}", title, rule(self, cdm_data_type))
        })
    }

    #[must_use]
    pub const fn default_graph_query(&self) -> &'static str {
        default_graph_query(self.cdm_data_type(), self.level)
    }

    /// Build the `dataset` block of the template context.
    ///
    /// `file_dir` is the directory holding the dataset's NetCDF files.
    pub fn metadata(&self, file_dir: impl Into<String>) -> DatasetMetadata {
        DatasetMetadata {
            dataset_id: self.dataset_id(),
            active: true,
            file_dir: file_dir.into(),
            title: self.title(),
            default_graph_query: self.default_graph_query().to_string(),
        }
    }
}

/// ERDDAP Make A Graph default query.
///
/// Trajectories plot the track. Profiles plot the last day of temperature
/// against depth, using the raw CTD variable for raw datasets and the derived
/// variable for science datasets. The strings are already XML-escaped.
#[must_use]
pub const fn default_graph_query(
    cdm_data_type: CdmDataType,
    level: ProcessingLevel,
) -> &'static str {
    match (cdm_data_type, level) {
        (CdmDataType::Trajectory, _) => TRAJECTORY_GRAPH_QUERY,
        (CdmDataType::TrajectoryProfile, ProcessingLevel::Raw) => RAW_PROFILE_GRAPH_QUERY,
        (CdmDataType::TrajectoryProfile, ProcessingLevel::Sci) => SCIENCE_PROFILE_GRAPH_QUERY,
    }
}

/// The `dataset` block of the template context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetMetadata {
    pub dataset_id: String,
    pub active: bool,
    pub file_dir: String,
    pub title: String,
    pub default_graph_query: String,
}

/// Everything a template can reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetContext {
    pub dataset: DatasetMetadata,
    pub cdm_data_type: CdmDataType,
    /// ERDDAP `updateEveryNMillis`
    pub n_millis: i64,
    /// ERDDAP `reloadEveryNMinutes`
    pub n_minutes: i64,
    /// Variables in presentation order
    pub variables: Vec<VariableDefinition>,
}

impl DatasetContext {
    pub fn new(
        dataset: &DeploymentDataset,
        file_dir: impl Into<String>,
        variables: Vec<VariableDefinition>,
        n_minutes: i64,
        n_millis: i64,
    ) -> Self {
        Self {
            dataset: dataset.metadata(file_dir),
            cdm_data_type: dataset.cdm_data_type(),
            n_millis,
            n_minutes,
            variables,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEPLOYMENT: &str = "ru01-20210101T1200";

    #[test]
    fn test_science_realtime_trajectory() {
        let dataset = DeploymentDataset::new(
            DEPLOYMENT,
            SamplingMode::Rt,
            ProcessingLevel::Sci,
            DatasetType::Trajectory,
        );
        assert_eq!(dataset.dataset_id(), "ru01-20210101T1200-sci-trajectory-rt");
        assert_eq!(dataset.cdm_data_type(), CdmDataType::Trajectory);
        assert_eq!(dataset.title(), "ru01-20210101T1200 Real Time Science Time Series");
        assert_eq!(dataset.default_graph_query(), TRAJECTORY_GRAPH_QUERY);
    }

    #[test]
    fn test_raw_delayed_profile() {
        let dataset = DeploymentDataset::new(
            DEPLOYMENT,
            SamplingMode::Delayed,
            ProcessingLevel::Raw,
            DatasetType::Profile,
        );
        assert_eq!(dataset.dataset_id(), "ru01-20210101T1200-raw-profile-delayed");
        assert_eq!(dataset.cdm_data_type(), CdmDataType::TrajectoryProfile);
        assert_eq!(dataset.title(), "ru01-20210101T1200 Delayed Mode Raw Profiles");
        assert_eq!(dataset.default_graph_query(), RAW_PROFILE_GRAPH_QUERY);
        assert!(dataset.default_graph_query().starts_with("sci_water_temp,depth,time"));
    }

    #[test]
    fn test_science_profile_uses_derived_temperature() {
        let query = default_graph_query(CdmDataType::TrajectoryProfile, ProcessingLevel::Sci);
        assert_eq!(query, SCIENCE_PROFILE_GRAPH_QUERY);
        assert!(query.starts_with("temperature,depth,time&amp;"));
        assert!(!query.contains("sci_water_temp"));
    }

    #[test]
    fn test_trajectory_query_ignores_level() {
        assert_eq!(
            default_graph_query(CdmDataType::Trajectory, ProcessingLevel::Raw),
            default_graph_query(CdmDataType::Trajectory, ProcessingLevel::Sci)
        );
    }

    #[test]
    fn test_graph_queries_are_pre_escaped() {
        assert_eq!(
            TRAJECTORY_GRAPH_QUERY,
            "longitude,latitude,time&amp;.draw=markers&amp;.marker=6%7C3&amp;.color=0xFFFFFF&amp;\
             .colorBar=Rainbow2%7C%7C%7C%7C%7C&amp;.bgColor=0xffccccff"
        );
        assert!(RAW_PROFILE_GRAPH_QUERY.contains("time&gt;=max(time)-1days"));
        assert!(RAW_PROFILE_GRAPH_QUERY.ends_with("&amp;.yRange=%7C%7Cfalse"));
        assert!(!SCIENCE_PROFILE_GRAPH_QUERY.contains(" "));
    }

    #[test]
    fn test_title_suffix_order_for_every_combination() {
        for mode in [SamplingMode::Rt, SamplingMode::Delayed] {
            for level in [ProcessingLevel::Raw, ProcessingLevel::Sci] {
                for dtype in [DatasetType::Trajectory, DatasetType::Profile] {
                    let title = DeploymentDataset::new("g-20200101T0000", mode, level, dtype).title();
                    let expected = format!(
                        "g-20200101T0000 {} {} {}",
                        if mode == SamplingMode::Rt { "Real Time" } else { "Delayed Mode" },
                        if level == ProcessingLevel::Sci { "Science" } else { "Raw" },
                        if dtype == DatasetType::Profile { "Profiles" } else { "Time Series" },
                    );
                    assert_eq!(title, expected);
                }
            }
        }
    }

    #[test]
    fn test_metadata_and_context() {
        let dataset = DeploymentDataset::new(
            DEPLOYMENT,
            SamplingMode::Rt,
            ProcessingLevel::Raw,
            DatasetType::Trajectory,
        );
        let ctx = DatasetContext::new(
            &dataset,
            "/data/nc/raw-trajectory/rt",
            vec![VariableDefinition::new("time")],
            86400,
            -1,
        );

        assert!(ctx.dataset.active);
        assert_eq!(ctx.dataset.file_dir, "/data/nc/raw-trajectory/rt");
        assert_eq!(ctx.dataset.dataset_id, "ru01-20210101T1200-raw-trajectory-rt");
        assert_eq!(ctx.n_minutes, 86400);
        assert_eq!(ctx.n_millis, -1);

        let json = serde_json::to_value(&ctx).unwrap();
        assert_eq!(json["cdm_data_type"], "Trajectory");
        assert_eq!(json["dataset"]["title"], "ru01-20210101T1200 Real Time Raw Time Series");
        assert_eq!(json["variables"][0]["name"], "time");
    }
}
