//! Per-chart-type default options trees
//!
//! `defaults_for` is a pure function: every call returns a fresh tree, so
//! merging caller overrides can never contaminate a later build. The trees
//! follow the Chart.js options schema.

use serde_json::{json, Value};

use super::merge::merge;
use super::ChartKind;

/// Default options for a chart type. Always a new tree.
pub fn defaults_for(kind: ChartKind) -> Value {
    let base = json!({
        "responsive": true,
        "maintainAspectRatio": false,
        "plugins": {
            "legend": { "display": true, "position": "top" }
        }
    });

    let specific = match kind {
        ChartKind::Bar => json!({
            "scales": {
                "x": { "grid": { "display": false } },
                "y": { "beginAtZero": true }
            }
        }),
        ChartKind::Line => json!({
            "scales": {
                "y": { "beginAtZero": true }
            },
            "elements": {
                "line": { "tension": 0.25 }
            }
        }),
        ChartKind::Scatter | ChartKind::Bubble => json!({
            "scales": {
                "x": { "type": "linear", "position": "bottom" },
                "y": { "beginAtZero": true }
            }
        }),
        ChartKind::Pie => json!({
            "plugins": {
                "legend": { "position": "right" }
            }
        }),
        ChartKind::Doughnut => json!({
            "plugins": {
                "legend": { "position": "right" }
            },
            "cutout": "50%"
        }),
        ChartKind::Radar | ChartKind::PolarArea => json!({
            "scales": {
                "r": { "beginAtZero": true }
            }
        }),
    };

    merge(&base, &specific)
}
