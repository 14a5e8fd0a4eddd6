//! Tabular data helpers over Polars DataFrames
//!
//! Everything downstream of the public API speaks Polars: a chart build
//! consumes a `DataFrame` and the helpers here answer the questions the
//! resolver and dataset builders ask of it - which columns exist, which are
//! uniformly numeric, and what a column's values look like as `f64`s or as
//! display strings. JSON row records coming across the browser boundary can
//! be turned into a frame with [`records_to_frame`].

use polars::prelude::*;
use serde_json::Value;

use crate::{ChartError, Result};

/// Column names in table-declared order.
pub(crate) fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect()
}

pub(crate) fn has_column(df: &DataFrame, name: &str) -> bool {
    df.column(name).is_ok()
}

/// Reject inputs that are not table-shaped before any column resolution.
pub(crate) fn ensure_table(df: &DataFrame) -> Result<()> {
    if df.width() == 0 {
        return Err(ChartError::InvalidInput(
            "data frame has no columns".to_string(),
        ));
    }
    Ok(())
}

fn is_numeric_dtype(dtype: &DataType) -> bool {
    use DataType::*;
    matches!(
        dtype,
        Int8 | Int16 | Int32 | Int64 | UInt8 | UInt16 | UInt32 | UInt64 | Float32 | Float64
    )
}

/// Check whether a column is uniformly numeric.
///
/// Numeric dtypes qualify when they carry no nulls. String columns qualify
/// when every value parses as a number - spreadsheet exports and JSON row
/// payloads routinely deliver numbers as strings.
pub(crate) fn is_numeric_column(df: &DataFrame, name: &str) -> bool {
    let Ok(column) = df.column(name) else {
        return false;
    };
    let series = column.as_materialized_series();
    if is_numeric_dtype(series.dtype()) {
        return series.null_count() == 0;
    }
    if series.dtype() == &DataType::String {
        if let Ok(ca) = series.str() {
            if ca.null_count() > 0 {
                return false;
            }
            return ca.into_iter().flatten().all(|v| v.parse::<f64>().is_ok());
        }
    }
    false
}

/// Extract a column's values as `f64`, in row order.
///
/// Fails with [`ChartError::NonNumericColumn`] if any scalar is null or not
/// numeric. Callers that aggregate offenders across several columns check
/// [`is_numeric_column`] first and report the whole set in one failure.
pub(crate) fn numeric_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let column = df
        .column(name)
        .map_err(|_| ChartError::ColumnNotFound(vec![name.to_string()]))?;
    let series = column.as_materialized_series();

    if series.dtype() == &DataType::String {
        let ca = series.str().map_err(|e| {
            ChartError::InternalError(format!("failed to read column '{}' as string: {}", name, e))
        })?;
        let mut out = Vec::with_capacity(ca.len());
        for v in ca.into_iter() {
            match v.and_then(|s| s.parse::<f64>().ok()) {
                Some(n) => out.push(n),
                None => return Err(ChartError::NonNumericColumn(vec![name.to_string()])),
            }
        }
        return Ok(out);
    }

    if !is_numeric_dtype(series.dtype()) {
        return Err(ChartError::NonNumericColumn(vec![name.to_string()]));
    }

    let casted = series.cast(&DataType::Float64).map_err(|e| {
        ChartError::InternalError(format!("failed to cast column '{}' to f64: {}", name, e))
    })?;
    let ca = casted.f64().map_err(|e| {
        ChartError::InternalError(format!("failed to read column '{}' as f64: {}", name, e))
    })?;
    let mut out = Vec::with_capacity(ca.len());
    for v in ca.into_iter() {
        match v {
            Some(n) => out.push(n),
            None => return Err(ChartError::NonNumericColumn(vec![name.to_string()])),
        }
    }
    Ok(out)
}

/// Extract a column's values as display strings, in row order.
///
/// Used for category labels and group keys; numeric and boolean columns are
/// string-cast, nulls become empty strings.
pub(crate) fn string_values(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let column = df
        .column(name)
        .map_err(|_| ChartError::ColumnNotFound(vec![name.to_string()]))?;
    let series = column.as_materialized_series();
    let mut out = Vec::with_capacity(series.len());

    use DataType::*;
    match series.dtype() {
        String => {
            let ca = series.str().map_err(|e| {
                ChartError::InternalError(format!("failed to read column '{}': {}", name, e))
            })?;
            for v in ca.into_iter() {
                out.push(v.unwrap_or_default().to_string());
            }
        }
        Boolean => {
            let ca = series.bool().map_err(|e| {
                ChartError::InternalError(format!("failed to read column '{}': {}", name, e))
            })?;
            for v in ca.into_iter() {
                out.push(v.map(|b| b.to_string()).unwrap_or_default());
            }
        }
        dt if is_numeric_dtype(dt) => {
            let casted = series.cast(&Float64).map_err(|e| {
                ChartError::InternalError(format!("failed to cast column '{}': {}", name, e))
            })?;
            let ca = casted.f64().map_err(|e| {
                ChartError::InternalError(format!("failed to read column '{}': {}", name, e))
            })?;
            for v in ca.into_iter() {
                out.push(v.map(|n| n.to_string()).unwrap_or_default());
            }
        }
        _ => {
            // Fallback: Polars display representation
            for idx in 0..series.len() {
                let av = series.get(idx).map_err(|e| {
                    ChartError::InternalError(format!("failed to read column '{}': {}", name, e))
                })?;
                out.push(av.to_string());
            }
        }
    }
    Ok(out)
}

/// Convert a JSON array of row objects into a DataFrame.
///
/// Columns whose every present value is a number become `Float64`;
/// everything else becomes a string column. Missing keys become nulls and
/// surface later as `NonNumericColumn` if the column is selected for values.
pub fn records_to_frame(value: &Value) -> Result<DataFrame> {
    let rows = value.as_array().ok_or_else(|| {
        ChartError::InvalidInput("expected a JSON array of row objects".to_string())
    })?;
    if rows.is_empty() {
        return Err(ChartError::InvalidInput(
            "row array is empty".to_string(),
        ));
    }

    let first = rows[0]
        .as_object()
        .ok_or_else(|| ChartError::InvalidInput("rows must be JSON objects".to_string()))?;
    let names: Vec<String> = first.keys().cloned().collect();

    let mut columns: Vec<Column> = Vec::with_capacity(names.len());
    for name in &names {
        let mut cells: Vec<&Value> = Vec::with_capacity(rows.len());
        for row in rows {
            let obj = row.as_object().ok_or_else(|| {
                ChartError::InvalidInput("rows must be JSON objects".to_string())
            })?;
            cells.push(obj.get(name).unwrap_or(&Value::Null));
        }

        let all_numeric = cells
            .iter()
            .all(|v| v.is_number() || v.is_null());

        let series = if all_numeric {
            let ca: Float64Chunked = cells.iter().map(|v| v.as_f64()).collect();
            let mut s = ca.into_series();
            s.rename(name.as_str().into());
            s
        } else {
            let ca: StringChunked = cells
                .iter()
                .map(|v| match v {
                    Value::Null => None,
                    Value::String(s) => Some(s.clone()),
                    other => Some(other.to_string()),
                })
                .collect();
            let mut s = ca.into_series();
            s.rename(name.as_str().into());
            s
        };
        columns.push(series.into_column());
    }

    DataFrame::new(columns)
        .map_err(|e| ChartError::InvalidInput(format!("could not assemble data frame: {}", e)))
}
