//! Column role resolution
//!
//! Maps a DataFrame's columns onto the roles a chart family needs - labels,
//! values, bubble radius, grouping - from explicit caller arguments where
//! given, otherwise from the frame's numeric/non-numeric column split. The
//! result is an explicit [`ColumnRoles`] record computed once per build and
//! carried as `meta` so later update calls can reconstruct the same shape.
//!
//! Validation aggregates: every missing column of a request is reported in
//! one `ColumnNotFound`, and every non-numeric offender in one
//! `NonNumericColumn`, rather than failing one column at a time.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::{ChartFamily, ChartKind, ValueSpec};
use crate::frame;
use crate::{ChartError, Result};

/// Which columns serve which chart role. Computed fresh per build; cached
/// only by the live-update bridge as `meta`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColumnRoles {
    /// Label column (category/segment) or shared x column (point family).
    /// `None` for category charts labeled by row index.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub label: Option<String>,
    /// Value columns, one chart series each (segment charts keep exactly one).
    pub values: Vec<String>,
    /// Bubble radius column.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub radius: Option<String>,
    /// Bubble grouping column, one dataset per distinct value.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub group: Option<String>,
}

impl ColumnRoles {
    /// Overlay per-call overrides, key by key. Set fields win; unset fields
    /// keep the cached role.
    pub fn merged(&self, overrides: &RoleOverrides) -> Self {
        Self {
            label: overrides.label.clone().or_else(|| self.label.clone()),
            values: overrides.values.clone().unwrap_or_else(|| self.values.clone()),
            radius: overrides.radius.clone().or_else(|| self.radius.clone()),
            group: overrides.group.clone().or_else(|| self.group.clone()),
        }
    }
}

/// Partial role mapping passed to update calls; unset fields fall back to
/// the cached mapping.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoleOverrides {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub values: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub radius: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub group: Option<String>,
}

/// Resolve and validate column roles for one chart build.
pub(crate) fn resolve(
    df: &DataFrame,
    label: Option<&str>,
    values: &ValueSpec,
    kind: ChartKind,
) -> Result<ColumnRoles> {
    let family = kind.family();

    // Untangle the value spec first; explicit names influence which column
    // may default to the x role below.
    let (explicit_values, radius, group) = match (kind, values) {
        (ChartKind::Bubble, ValueSpec::Bubble { value, radius, group }) => {
            (Some(vec![value.clone()]), Some(radius.clone()), group.clone())
        }
        // Bubble radius and value are never inferred
        (ChartKind::Bubble, ValueSpec::Auto) => {
            return Err(ChartError::MissingRequiredColumn("value".to_string()));
        }
        (ChartKind::Bubble, _) => {
            return Err(ChartError::MissingRequiredColumn("radius".to_string()));
        }
        (_, ValueSpec::Bubble { .. }) => {
            return Err(ChartError::InvalidInput(format!(
                "a bubble value mapping is only valid for bubble charts, not '{}'",
                kind.as_str()
            )));
        }
        (_, ValueSpec::Column(name)) => (Some(vec![name.clone()]), None, None),
        (_, ValueSpec::Columns(names)) => {
            if names.is_empty() {
                return Err(ChartError::InvalidInput(
                    "value column list is empty".to_string(),
                ));
            }
            if family == ChartFamily::Segment && names.len() > 1 {
                return Err(ChartError::InvalidInput(format!(
                    "'{}' charts hold exactly one series; pass a single value column",
                    kind.as_str()
                )));
            }
            (Some(names.clone()), None, None)
        }
        (_, ValueSpec::Auto) => (None, None, None),
    };

    // Label/x column. An explicit name is its own check, separate from the
    // value-column checks.
    let label_col = match label {
        Some(name) => {
            if !frame::has_column(df, name) {
                return Err(ChartError::ColumnNotFound(vec![name.to_string()]));
            }
            Some(name.to_string())
        }
        None => match family {
            // Row indices are synthesized at dataset-build time
            ChartFamily::Category => None,
            ChartFamily::Segment => frame::column_names(df).first().cloned(),
            ChartFamily::Point => {
                Some(default_x_column(df, &explicit_values, &radius, &group)?)
            }
        },
    };

    let value_cols = match explicit_values {
        Some(names) => {
            let mut missing: Vec<String> = Vec::new();
            for name in names.iter().chain(radius.iter()).chain(group.iter()) {
                if !frame::has_column(df, name) {
                    missing.push(name.clone());
                }
            }
            if !missing.is_empty() {
                return Err(ChartError::ColumnNotFound(missing));
            }
            names
        }
        None => {
            // Uniformly numeric columns in table order, label excluded
            let mut inferred: Vec<String> = frame::column_names(df)
                .into_iter()
                .filter(|name| Some(name) != label_col.as_ref())
                .filter(|name| frame::is_numeric_column(df, name))
                .collect();
            if inferred.is_empty() {
                return Err(ChartError::NoNumericColumns);
            }
            // Segment charts hold one series: keep the first candidate
            if family == ChartFamily::Segment {
                inferred.truncate(1);
            }
            inferred
        }
    };

    // Numeric validation over every role that must be numeric, aggregated
    let mut offending: Vec<String> = Vec::new();
    if family == ChartFamily::Point {
        if let Some(x) = &label_col {
            if !frame::is_numeric_column(df, x) {
                offending.push(x.clone());
            }
        }
    }
    for name in value_cols.iter().chain(radius.iter()) {
        if !frame::is_numeric_column(df, name) && !offending.contains(name) {
            offending.push(name.clone());
        }
    }
    if !offending.is_empty() {
        return Err(ChartError::NonNumericColumn(offending));
    }

    Ok(ColumnRoles {
        label: label_col,
        values: value_cols,
        radius,
        group,
    })
}

/// Default x column for point-family charts: the first uniformly numeric
/// column not already claimed by an explicit value, radius, or group role.
fn default_x_column(
    df: &DataFrame,
    explicit_values: &Option<Vec<String>>,
    radius: &Option<String>,
    group: &Option<String>,
) -> Result<String> {
    let claimed: Vec<&String> = explicit_values
        .iter()
        .flatten()
        .chain(radius.iter())
        .chain(group.iter())
        .collect();
    frame::column_names(df)
        .into_iter()
        .filter(|name| !claimed.contains(&name))
        .find(|name| frame::is_numeric_column(df, name))
        .ok_or(ChartError::NoNumericColumns)
}
