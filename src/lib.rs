/*!
# chartframe - DataFrame to Chart.js configuration mapping

chartframe turns tabular data into declarative [Chart.js] configurations.
It does no rendering of its own: the output is a JSON-shaped
`{type, data, options, meta}` record handed to a Chart.js instance running
in a browser context. What lives here is the mapping layer in front of it:
column-role resolution, per-chart-family dataset construction, deterministic
palette assignment, and deep-merging of caller options over per-type
defaults.

[Chart.js]: https://www.chartjs.org/docs/latest/configuration/

## Example

```rust,ignore
use chartframe::{ChartKind, ChartSpec};
use polars::prelude::*;

let df = df! {
    "quarter" => &["Q1", "Q2", "Q3", "Q4"],
    "revenue" => &[120.0, 135.5, 128.0, 150.2],
}?;

let config = ChartSpec::new(ChartKind::Bar)
    .with_label("quarter")
    .with_value("revenue")
    .with_title("Revenue by quarter")
    .build(&df)?;

// Hand off to the rendering boundary
let json = config.to_json()?;
```

## Live updates

An already-rendered chart is addressed through a [`bridge::ChartProxy`],
which caches the column-role mapping from the original build and replays it
(merged with per-call overrides) against fresh data, emitting typed
update messages across a [`bridge::Transport`].

## Core Components

- [`chart`] - column resolution, dataset builders, palettes, options merging
- [`bridge`] - live-update proxy for rendered chart instances
- [`frame`] - tabular data helpers over Polars DataFrames
*/

pub mod bridge;
pub mod chart;
pub mod frame;

// Re-export key types for convenience
pub use bridge::{ChartProxy, ClickEvent, MemoryTransport, RoleOverrides, Transport, UpdateMessage};
pub use chart::{
    merge_options, merge_options_with, ChartConfig, ChartData, ChartFamily, ChartKind, ChartSpec,
    ColorValue, ColumnRoles, Dataset, NullPolicy, Palette, PointDatum, SeriesData, ValueSpec,
};
pub use frame::records_to_frame;

// DataFrame abstraction (wraps Polars)
pub use polars::prelude::DataFrame;

/// Main library error type
#[derive(thiserror::Error, Debug)]
pub enum ChartError {
    /// The data argument is not table-shaped (or cannot become a DataFrame).
    #[error("Invalid input data: {0}")]
    InvalidInput(String),

    /// The requested chart type is not one of the supported names.
    #[error("Unsupported chart type '{found}' (expected one of: {expected})")]
    UnsupportedChartType { found: String, expected: String },

    /// One or more requested columns are absent from the data.
    #[error("Column(s) not found in data: {}", .0.join(", "))]
    ColumnNotFound(Vec<String>),

    /// One or more selected value columns contain non-numeric scalars.
    #[error("Column(s) contain non-numeric values: {}", .0.join(", "))]
    NonNumericColumn(Vec<String>),

    /// Automatic value resolution found nothing numeric to plot.
    #[error("No numeric columns available to use as values")]
    NoNumericColumns,

    /// A column role this chart type cannot infer was not supplied.
    #[error("Missing required '{0}' column for this chart type")]
    MissingRequiredColumn(String),

    /// An update call reached a proxy with no bound chart instance.
    #[error("Chart proxy error: {0}")]
    InvalidProxyState(String),

    /// Unexpected failure inside the data layer.
    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type Result<T> = std::result::Result<T, ChartError>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
