//! Fixed palette definitions and deterministic series color assignment
//!
//! Series colors are drawn from a fixed ordered palette: the i-th series of
//! a chart always gets the i-th palette entry, cycling from the start when a
//! chart has more series than the palette has colors. Identical inputs
//! therefore always produce identical colors across runs.

use crate::{ChartError, Result};

/// Tableau 10 - default categorical palette
pub const TABLEAU10: &[&str] = &[
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f",
    "#edc948", "#b07aa1", "#ff9da7", "#9c755f", "#bab0ac",
];

/// D3 Category 10
pub const CATEGORY10: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd",
    "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22", "#17becf",
];

/// ColorBrewer Set2
pub const SET2: &[&str] = &[
    "#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3", "#a6d854",
    "#ffd92f", "#e5c494", "#b3b3b3",
];

/// ColorBrewer Dark2
pub const DARK2: &[&str] = &[
    "#1b9e77", "#d95f02", "#7570b3", "#e7298a", "#66a61e",
    "#e6ab02", "#a6761d", "#666666",
];

/// ColorBrewer Pastel1
pub const PASTEL1: &[&str] = &[
    "#fbb4ae", "#b3cde3", "#ccebc5", "#decbe4", "#fed9a6",
    "#ffffcc", "#e5d8bd", "#fddaec", "#f2f2f2",
];

/// Named fixed palettes available for series coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Palette {
    #[default]
    Tableau10,
    Category10,
    Set2,
    Dark2,
    Pastel1,
}

impl Palette {
    /// The palette's ordered color list.
    pub fn colors(&self) -> &'static [&'static str] {
        match self {
            Self::Tableau10 => TABLEAU10,
            Self::Category10 => CATEGORY10,
            Self::Set2 => SET2,
            Self::Dark2 => DARK2,
            Self::Pastel1 => PASTEL1,
        }
    }

    /// Deterministic colors for `n` series: the first `n` palette entries in
    /// order, cycling from index 0 when `n` exceeds the palette length.
    pub fn series_colors(&self, n: usize) -> Vec<String> {
        let colors = self.colors();
        (0..n).map(|i| colors[i % colors.len()].to_string()).collect()
    }
}

/// Apply an alpha fraction to a color, returning an `rgba(...)` string.
///
/// Accepts any CSS color format (`#rrggbb`, named colors, `rgb()`, ...).
/// The alpha fraction is clamped to `[0, 1]`.
pub fn with_alpha(color: &str, alpha: f64) -> Result<String> {
    let parsed = csscolorparser::parse(color)
        .map_err(|e| ChartError::InvalidInput(format!("invalid color '{}': {}", color, e)))?;
    let [r, g, b, _] = parsed.to_rgba8();
    Ok(format!("rgba({}, {}, {}, {})", r, g, b, alpha.clamp(0.0, 1.0)))
}

/// Alpha application lifted over an absent color: `None` passes through
/// unchanged rather than erroring.
pub fn maybe_with_alpha(color: Option<&str>, alpha: f64) -> Result<Option<String>> {
    match color {
        Some(c) => Ok(Some(with_alpha(c, alpha)?)),
        None => Ok(None),
    }
}
