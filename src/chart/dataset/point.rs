//! Point family: scatter, bubble
//!
//! Scatter: one dataset per y column, each plotted against the single
//! shared x column; points carry no radius. Bubble: one dataset per
//! distinct group value (first-seen order) or a single dataset without
//! grouping; points always carry their radius.

use polars::prelude::*;

use super::{ChartData, ColorValue, Dataset, PointDatum, SeriesData};
use crate::chart::palette::{self, Palette};
use crate::chart::{ChartKind, ColumnRoles};
use crate::frame;
use crate::{ChartError, Result};

const BUBBLE_FILL_ALPHA: f64 = 0.6;

pub(crate) fn build(
    df: &DataFrame,
    roles: &ColumnRoles,
    kind: ChartKind,
    palette: Palette,
) -> Result<ChartData> {
    let x_column = roles.label.as_deref().ok_or_else(|| {
        ChartError::MissingRequiredColumn("x".to_string())
    })?;
    let xs = frame::numeric_values(df, x_column)?;

    let datasets = match kind {
        ChartKind::Scatter => scatter_datasets(df, roles, &xs, palette)?,
        ChartKind::Bubble => bubble_datasets(df, roles, &xs, palette)?,
        _ => unreachable!("point builder called for non-point kind"),
    };

    // Point data is self-positioning; no labels array at all
    Ok(ChartData {
        labels: None,
        datasets,
    })
}

fn scatter_datasets(
    df: &DataFrame,
    roles: &ColumnRoles,
    xs: &[f64],
    palette: Palette,
) -> Result<Vec<Dataset>> {
    let colors = palette.series_colors(roles.values.len());
    let mut datasets = Vec::with_capacity(roles.values.len());
    for (column, color) in roles.values.iter().zip(colors) {
        let ys = frame::numeric_values(df, column)?;
        let points = xs
            .iter()
            .zip(ys)
            .map(|(&x, y)| PointDatum { x, y, r: None })
            .collect();
        let mut dataset = Dataset::new(column.clone(), SeriesData::Points(points));
        dataset.background_color = Some(ColorValue::Single(color.clone()));
        dataset.border_color = Some(ColorValue::Single(color));
        datasets.push(dataset);
    }
    Ok(datasets)
}

fn bubble_datasets(
    df: &DataFrame,
    roles: &ColumnRoles,
    xs: &[f64],
    palette: Palette,
) -> Result<Vec<Dataset>> {
    let value_column = &roles.values[0];
    let radius_column = roles
        .radius
        .as_deref()
        .ok_or_else(|| ChartError::MissingRequiredColumn("radius".to_string()))?;
    let ys = frame::numeric_values(df, value_column)?;
    let rs = frame::numeric_values(df, radius_column)?;

    let mut partitions: Vec<(String, Vec<PointDatum>)> = match &roles.group {
        Some(group_column) => {
            // One partition per distinct group value, in first-seen order
            let keys = frame::string_values(df, group_column)?;
            let mut out: Vec<(String, Vec<PointDatum>)> = Vec::new();
            for (row, key) in keys.into_iter().enumerate() {
                let point = PointDatum {
                    x: xs[row],
                    y: ys[row],
                    r: Some(rs[row]),
                };
                match out.iter_mut().find(|(k, _)| *k == key) {
                    Some((_, points)) => points.push(point),
                    None => out.push((key, vec![point])),
                }
            }
            out
        }
        None => {
            let points = (0..xs.len())
                .map(|row| PointDatum {
                    x: xs[row],
                    y: ys[row],
                    r: Some(rs[row]),
                })
                .collect();
            vec![(value_column.clone(), points)]
        }
    };

    let colors = palette.series_colors(partitions.len());
    let mut datasets = Vec::with_capacity(partitions.len());
    for ((label, points), color) in partitions.drain(..).zip(colors) {
        let mut dataset = Dataset::new(label, SeriesData::Points(points));
        dataset.background_color = Some(ColorValue::Single(palette::with_alpha(
            &color,
            BUBBLE_FILL_ALPHA,
        )?));
        dataset.border_color = Some(ColorValue::Single(color));
        datasets.push(dataset);
    }
    Ok(datasets)
}
