//! Category family: bar, line, radar
//!
//! One dataset per value column, labeled by the column name, values in row
//! order. Series i takes palette color i for both fill and border; radar
//! fills at 0.25 alpha of its border, line charts carry the same low-alpha
//! fill color but stay unfilled unless the caller enables fill via options.

use polars::prelude::*;

use super::{ChartData, ColorValue, Dataset, SeriesData};
use crate::chart::palette::{self, Palette};
use crate::chart::{ChartKind, ColumnRoles};
use crate::frame;
use crate::Result;

const FILL_ALPHA: f64 = 0.25;

pub(crate) fn build(
    df: &DataFrame,
    roles: &ColumnRoles,
    kind: ChartKind,
    palette: Palette,
) -> Result<ChartData> {
    let labels = match &roles.label {
        Some(column) => frame::string_values(df, column)?,
        // Row index labels when no label column was mapped
        None => (0..df.height()).map(|i| i.to_string()).collect(),
    };

    let colors = palette.series_colors(roles.values.len());
    let mut datasets = Vec::with_capacity(roles.values.len());
    for (column, color) in roles.values.iter().zip(colors) {
        let values = frame::numeric_values(df, column)?;
        let mut dataset = Dataset::new(column.clone(), SeriesData::Numbers(values));
        match kind {
            ChartKind::Bar => {
                dataset.background_color = Some(ColorValue::Single(color.clone()));
                dataset.border_color = Some(ColorValue::Single(color));
                dataset.border_width = Some(1.0);
            }
            ChartKind::Line => {
                dataset.background_color =
                    Some(ColorValue::Single(palette::with_alpha(&color, FILL_ALPHA)?));
                dataset.border_color = Some(ColorValue::Single(color));
                dataset.fill = Some(false);
            }
            ChartKind::Radar => {
                dataset.background_color =
                    Some(ColorValue::Single(palette::with_alpha(&color, FILL_ALPHA)?));
                dataset.border_color = Some(ColorValue::Single(color));
                dataset.fill = Some(true);
            }
            _ => unreachable!("category builder called for non-category kind"),
        }
        datasets.push(dataset);
    }

    Ok(ChartData {
        labels: Some(labels),
        datasets,
    })
}
