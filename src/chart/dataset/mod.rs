//! Chart.js dataset construction
//!
//! One builder per chart family. Each is a pure function from a DataFrame
//! plus resolved [`ColumnRoles`] to the `data` block of a Chart.js
//! configuration. Field names on the emitted structures (`label`, `data`,
//! `backgroundColor`, `borderColor`, `borderWidth`, `fill`, `tension`,
//! `pointRadius`) follow the Chart.js dataset schema exactly; they are the
//! wire contract, not internal naming.

mod category;
mod point;
mod segment;

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::{ChartFamily, ChartKind, ColumnRoles, Palette};
use crate::Result;

/// The `data` block of a chart configuration.
///
/// `labels` is omitted entirely (never an empty array) for point-family
/// charts, whose points carry their own x positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub labels: Option<Vec<String>>,
    pub datasets: Vec<Dataset>,
}

/// One rendered series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: SeriesData,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub background_color: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub border_color: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub border_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub point_radius: Option<f64>,
}

impl Dataset {
    pub(crate) fn new(label: impl Into<String>, data: SeriesData) -> Self {
        Self {
            label: label.into(),
            data,
            background_color: None,
            border_color: None,
            border_width: None,
            fill: None,
            tension: None,
            point_radius: None,
        }
    }
}

/// Series values: plain numbers for category/segment charts, point objects
/// for the point family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesData {
    Numbers(Vec<f64>),
    Points(Vec<PointDatum>),
}

impl SeriesData {
    /// Number of entries in the series.
    pub fn len(&self) -> usize {
        match self {
            Self::Numbers(v) => v.len(),
            Self::Points(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single color or a per-item color array (segment charts color each
/// slice, so their one dataset carries one color per row).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    Single(String),
    PerItem(Vec<String>),
}

/// One point of a scatter or bubble series. `r` is present exactly for
/// bubble datasets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointDatum {
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub r: Option<f64>,
}

/// Dispatch to the family builder for `kind`.
pub(crate) fn build(
    df: &DataFrame,
    roles: &ColumnRoles,
    kind: ChartKind,
    palette: Palette,
) -> Result<ChartData> {
    match kind.family() {
        ChartFamily::Category => category::build(df, roles, kind, palette),
        ChartFamily::Segment => segment::build(df, roles, palette),
        ChartFamily::Point => point::build(df, roles, kind, palette),
    }
}
