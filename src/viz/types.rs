//! Public geometry types produced by the projection engine.

use super::scale::LinearScale;
use crate::config::Layout;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The plotting rectangle inside the chart margins. `left`/`top` place it on
/// the outer surface; path coordinates are relative to its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl From<&Layout> for PlotArea {
    fn from(layout: &Layout) -> Self {
        Self {
            left: layout.margin.left as f64,
            top: layout.margin.top as f64,
            width: layout.plot_width().max(0.0),
            height: layout.plot_height().max(0.0),
        }
    }
}

impl PlotArea {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= 0.0 && x <= self.width && y >= 0.0 && y <= self.height
    }
}

/// Which side of the plot area an axis is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AxisOrientation {
    Bottom,
    Left,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Data value of the tick.
    pub value: f64,
    /// Pixel offset along the axis, in plot-area coordinates.
    pub position: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub orientation: AxisOrientation,
    pub domain: (f64, f64),
    pub ticks: Vec<Tick>,
}

/// Everything a renderer needs for one frame. Rebuilt on every change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderGeometry {
    pub x_domain: (f64, f64),
    pub y_domain: (f64, f64),
    pub plot: PlotArea,
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    /// One polyline per visible country, points in year order.
    pub paths: BTreeMap<String, Vec<(f64, f64)>>,
}

impl RenderGeometry {
    pub fn x_scale(&self) -> LinearScale {
        LinearScale::new(self.x_domain, (0.0, self.plot.width))
    }

    pub fn y_scale(&self) -> LinearScale {
        LinearScale::new(self.y_domain, (self.plot.height, 0.0))
    }
}
