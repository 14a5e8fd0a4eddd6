//! Chart configuration assembly
//!
//! The top-level mapping pipeline: validate the input frame, resolve column
//! roles, run the family dataset builder, merge caller options over the
//! per-type defaults, and package `{type, data, options, meta}` for the
//! rendering boundary.

pub mod dataset;
pub mod merge;
pub mod options;
pub mod palette;
pub mod resolve;

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

pub use dataset::{ChartData, ColorValue, Dataset, PointDatum, SeriesData};
pub use merge::{merge as merge_options, merge_with as merge_options_with, NullPolicy};
pub use options::defaults_for;
pub use palette::{maybe_with_alpha, with_alpha, Palette};
pub use resolve::{ColumnRoles, RoleOverrides};

use crate::frame;
use crate::{ChartError, Result};

/// The eight supported chart types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    Bar,
    Line,
    Scatter,
    Bubble,
    Pie,
    Doughnut,
    Radar,
    PolarArea,
}

impl ChartKind {
    pub const ALL: [Self; 8] = [
        Self::Bar,
        Self::Line,
        Self::Scatter,
        Self::Bubble,
        Self::Pie,
        Self::Doughnut,
        Self::Radar,
        Self::PolarArea,
    ];

    /// The Chart.js type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Scatter => "scatter",
            Self::Bubble => "bubble",
            Self::Pie => "pie",
            Self::Doughnut => "doughnut",
            Self::Radar => "radar",
            Self::PolarArea => "polarArea",
        }
    }

    /// Parse a chart type name, rejecting anything outside the supported set.
    pub fn parse(value: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| ChartError::UnsupportedChartType {
                found: value.to_string(),
                expected: Self::ALL.map(|kind| kind.as_str()).join(", "),
            })
    }

    /// The dataset-builder family this type belongs to.
    pub fn family(&self) -> ChartFamily {
        match self {
            Self::Bar | Self::Line | Self::Radar => ChartFamily::Category,
            Self::Pie | Self::Doughnut | Self::PolarArea => ChartFamily::Segment,
            Self::Scatter | Self::Bubble => ChartFamily::Point,
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chart types sharing a dataset builder shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartFamily {
    /// bar / line / radar - labeled categories, one series per value column
    Category,
    /// pie / doughnut / polarArea - one series, one value per row
    Segment,
    /// scatter / bubble - self-positioning points
    Point,
}

/// How value columns are selected for a build.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValueSpec {
    /// Use every uniformly numeric column not claimed by another role.
    #[default]
    Auto,
    /// A single named value column.
    Column(String),
    /// An ordered list of value columns, one series each.
    Columns(Vec<String>),
    /// Bubble mapping: y values, point radius, optional grouping.
    Bubble {
        value: String,
        radius: String,
        group: Option<String>,
    },
}

/// A chart build request.
///
/// Collects the chart type, column mapping arguments, palette, and options
/// overrides, then produces a [`ChartConfig`] from a DataFrame.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    kind: ChartKind,
    label: Option<String>,
    values: ValueSpec,
    palette: Palette,
    options: Option<Value>,
    title: Option<String>,
}

impl ChartSpec {
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            label: None,
            values: ValueSpec::Auto,
            palette: Palette::default(),
            options: None,
            title: None,
        }
    }

    /// Label column (category/segment charts) or x column (point charts).
    pub fn with_label(mut self, column: impl Into<String>) -> Self {
        self.label = Some(column.into());
        self
    }

    /// A single value column.
    pub fn with_value(mut self, column: impl Into<String>) -> Self {
        self.values = ValueSpec::Column(column.into());
        self
    }

    /// An ordered list of value columns.
    pub fn with_value_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = ValueSpec::Columns(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Full value specification, including the bubble mapping record.
    pub fn with_values(mut self, values: ValueSpec) -> Self {
        self.values = values;
        self
    }

    /// Palette used for series colors.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Options override tree, deep-merged over the per-type defaults.
    pub fn with_options(mut self, options: Value) -> Self {
        self.options = Some(options);
        self
    }

    /// Convenience for `plugins.title` without hand-writing the tree.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Build the chart configuration.
    ///
    /// Validates the frame shape, resolves column roles, runs the family
    /// dataset builder, and merges options. Either fully succeeds with a
    /// complete configuration or fails before producing one.
    pub fn build(&self, df: &DataFrame) -> Result<ChartConfig> {
        frame::ensure_table(df)?;
        let roles = resolve::resolve(df, self.label.as_deref(), &self.values, self.kind)?;
        debug!(
            kind = self.kind.as_str(),
            rows = df.height(),
            series = roles.values.len(),
            "building chart configuration"
        );
        let data = dataset::build(df, &roles, self.kind, self.palette)?;

        let mut options = options::defaults_for(self.kind);
        if let Some(title) = &self.title {
            options = merge_options(
                &options,
                &json!({"plugins": {"title": {"display": true, "text": title}}}),
            );
        }
        if let Some(user) = &self.options {
            options = merge_options(&options, user);
        }

        Ok(ChartConfig {
            kind: self.kind,
            data,
            options,
            meta: roles,
        })
    }
}

/// An assembled chart configuration, ready for the rendering boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: Value,
    /// Column-role mapping for later live-update calls.
    pub meta: ColumnRoles,
}

impl ChartConfig {
    /// The configuration as a JSON value tree.
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self)
            .map_err(|e| ChartError::InternalError(format!("failed to serialize config: {}", e)))
    }

    /// The configuration as pretty-printed JSON for direct hand-off.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InternalError(format!("failed to serialize config: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_kinds() {
        assert_eq!(ChartKind::parse("bar").unwrap(), ChartKind::Bar);
        assert_eq!(ChartKind::parse("polarArea").unwrap(), ChartKind::PolarArea);
    }

    #[test]
    fn test_parse_unknown_kind_lists_valid_ones() {
        let err = ChartKind::parse("histogram").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("histogram"));
        for kind in ChartKind::ALL {
            assert!(message.contains(kind.as_str()), "missing {kind}");
        }
    }

    #[test]
    fn test_kind_serializes_as_chartjs_name() {
        assert_eq!(
            serde_json::to_value(ChartKind::PolarArea).unwrap(),
            json!("polarArea")
        );
    }

    #[test]
    fn test_family_partition() {
        use ChartFamily::*;
        assert_eq!(ChartKind::Bar.family(), Category);
        assert_eq!(ChartKind::Line.family(), Category);
        assert_eq!(ChartKind::Radar.family(), Category);
        assert_eq!(ChartKind::Pie.family(), Segment);
        assert_eq!(ChartKind::Doughnut.family(), Segment);
        assert_eq!(ChartKind::PolarArea.family(), Segment);
        assert_eq!(ChartKind::Scatter.family(), Point);
        assert_eq!(ChartKind::Bubble.family(), Point);
    }

    #[test]
    fn test_bar_build_end_to_end() {
        let df = df! {
            "category" => &["A", "B", "C", "D"],
            "values" => &[10, 15, 8, 12],
        }
        .unwrap();

        let config = ChartSpec::new(ChartKind::Bar)
            .with_label("category")
            .with_value("values")
            .build(&df)
            .unwrap();

        assert_eq!(
            config.data.labels.as_deref().unwrap(),
            ["A", "B", "C", "D"]
        );
        assert_eq!(config.data.datasets.len(), 1);
        assert_eq!(
            config.data.datasets[0].data,
            SeriesData::Numbers(vec![10.0, 15.0, 8.0, 12.0])
        );
        assert_eq!(config.meta.label.as_deref(), Some("category"));
    }

    #[test]
    fn test_config_value_shape() {
        let df = df! {
            "k" => &["a", "b"],
            "v" => &[1, 2],
        }
        .unwrap();
        let config = ChartSpec::new(ChartKind::Bar).build(&df).unwrap();
        let value = config.to_value().unwrap();

        assert_eq!(value["type"], json!("bar"));
        assert!(value["data"]["datasets"].is_array());
        assert!(value["options"].is_object());
        assert!(value["meta"]["values"].is_array());
    }

    #[test]
    fn test_user_options_override_defaults() {
        let df = df! {
            "k" => &["a", "b"],
            "v" => &[1, 2],
        }
        .unwrap();
        let config = ChartSpec::new(ChartKind::Bar)
            .with_options(json!({"plugins": {"legend": {"display": false}}}))
            .build(&df)
            .unwrap();

        assert_eq!(config.options["plugins"]["legend"]["display"], json!(false));
        // Untouched defaults survive alongside
        assert_eq!(config.options["responsive"], json!(true));
        assert_eq!(config.options["scales"]["y"]["beginAtZero"], json!(true));
    }

    #[test]
    fn test_explicit_null_override_suppresses_default() {
        let df = df! {
            "k" => &["a", "b"],
            "v" => &[1, 2],
        }
        .unwrap();
        let config = ChartSpec::new(ChartKind::Line)
            .with_options(json!({"elements": {"line": {"tension": null}}}))
            .build(&df)
            .unwrap();

        let line = config.options["elements"]["line"].as_object().unwrap();
        assert!(line.contains_key("tension"));
        assert!(line["tension"].is_null());
    }

    #[test]
    fn test_with_title_injects_title_plugin() {
        let df = df! {
            "k" => &["a", "b"],
            "v" => &[1, 2],
        }
        .unwrap();
        let config = ChartSpec::new(ChartKind::Bar)
            .with_title("Units by key")
            .build(&df)
            .unwrap();
        assert_eq!(
            config.options["plugins"]["title"],
            json!({"display": true, "text": "Units by key"})
        );
    }

    #[test]
    fn test_empty_frame_is_invalid_input() {
        let df = DataFrame::empty();
        let err = ChartSpec::new(ChartKind::Bar).build(&df).unwrap_err();
        assert!(matches!(err, ChartError::InvalidInput(_)));
    }

    #[test]
    fn test_datasets_never_empty_on_success() {
        for kind in [ChartKind::Bar, ChartKind::Line, ChartKind::Pie, ChartKind::Radar] {
            let df = df! {
                "k" => &["a", "b", "c"],
                "v" => &[1, 2, 3],
            }
            .unwrap();
            let config = ChartSpec::new(kind).with_label("k").build(&df).unwrap();
            assert!(!config.data.datasets.is_empty(), "{kind}");
            for dataset in &config.data.datasets {
                assert_eq!(dataset.data.len(), df.height(), "{kind}");
            }
        }
    }
}
