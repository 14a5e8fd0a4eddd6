//! Segment family: pie, doughnut, polarArea
//!
//! Exactly one dataset whose `data` holds one value per row, and whose
//! `backgroundColor` is an array with one palette color per row - the one
//! place where color count follows rows rather than series.

use polars::prelude::*;

use super::{ChartData, ColorValue, Dataset, SeriesData};
use crate::chart::palette::Palette;
use crate::chart::ColumnRoles;
use crate::frame;
use crate::Result;

pub(crate) fn build(df: &DataFrame, roles: &ColumnRoles, palette: Palette) -> Result<ChartData> {
    let labels = match &roles.label {
        Some(column) => frame::string_values(df, column)?,
        None => (0..df.height()).map(|i| i.to_string()).collect(),
    };

    let column = &roles.values[0];
    let values = frame::numeric_values(df, column)?;

    let mut dataset = Dataset::new(column.clone(), SeriesData::Numbers(values));
    dataset.background_color = Some(ColorValue::PerItem(palette.series_colors(df.height())));
    dataset.border_width = Some(1.0);

    Ok(ChartData {
        labels: Some(labels),
        datasets: vec![dataset],
    })
}
