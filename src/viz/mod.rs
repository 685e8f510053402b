//! Projection engine: (repository, view state) → renderable geometry.
//!
//! - Only visible countries participate; hidden ones are absent, not faded
//! - Optional rebasing to an anchor year (a derived copy; the repository is never touched)
//! - Value domain from the view state, or derived from the selected data
//! - Linear year/value scales into plot-area pixels, nice ticks with `%` labels
//!
//! [`project`] is pure: equal inputs always yield equal geometry.

pub mod axis;
pub mod scale;
pub mod text;
pub mod types;
pub mod util;

pub use scale::LinearScale;
pub use types::{AxisOrientation, AxisSpec, PlotArea, RenderGeometry, Tick};

use crate::config::Layout;
use crate::models::{DataPoint, Series, ViewState};
use crate::repository::SeriesRepository;
use std::collections::BTreeMap;

/// Y-domain used when nothing is selected.
pub const FALLBACK_VALUE_DOMAIN: (f64, f64) = (-1.0, 1.0);

/// Subtract the value at `anchor_year` from every point.
/// A series without an observation in that year is returned unchanged.
pub fn rebase(series: &Series, anchor_year: i32) -> Series {
    shift(series, series.value_at(anchor_year).unwrap_or(0.0))
}

fn shift(series: &Series, offset: f64) -> Series {
    Series {
        country: series.country.clone(),
        points: series
            .points
            .iter()
            .map(|p| DataPoint {
                year: p.year,
                value: p.value - offset,
            })
            .collect(),
    }
}

/// Value subtracted from `series` when normalizing under `state`.
///
/// An anchor inside the year window uses that year's observation (0 when the
/// series has none). An anchor outside the window is clamped into it and the
/// series' in-window observation nearest to it is used, or 0 without any.
pub fn anchor_offset(series: &Series, state: &ViewState) -> f64 {
    let window = state.year_window();
    if window.contains(state.anchor_year) {
        return series.value_at(state.anchor_year).unwrap_or(0.0);
    }
    let anchor = state.anchor_year.clamp(window.start, window.end);
    series
        .in_window(window.start, window.end)
        .min_by_key(|p| (p.year - anchor).abs())
        .map_or(0.0, |p| p.value)
}

/// The series as it is displayed under `state` (rebased when normalizing).
pub fn displayed_series(series: &Series, state: &ViewState) -> Series {
    if state.normalize {
        shift(series, anchor_offset(series, state))
    } else {
        series.clone()
    }
}

/// Visible series in repository order, rebased as needed.
fn selected_series(repo: &SeriesRepository, state: &ViewState) -> Vec<Series> {
    repo.iter()
        .filter(|s| state.is_visible(&s.country))
        .map(|s| displayed_series(s, state))
        .collect()
}

/// Min/max over every value of `series`, widened when degenerate.
pub fn derive_value_domain(series: &[Series]) -> (f64, f64) {
    let mut values = series.iter().flat_map(|s| s.points.iter().map(|p| p.value));
    let Some(first) = values.next() else {
        return FALLBACK_VALUE_DOMAIN;
    };
    widen_degenerate(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

/// `v..v` becomes `v - 1..v + 1`; any other extent is returned as is.
pub fn widen_degenerate((lo, hi): (f64, f64)) -> (f64, f64) {
    if (hi - lo).abs() < f64::EPSILON {
        (lo - 1.0, hi + 1.0)
    } else {
        (lo, hi)
    }
}

/// Project the repository under `state` onto a `layout`-sized surface.
pub fn project(
    repo: &SeriesRepository,
    state: &ViewState,
    layout: &Layout,
    locale_tag: &str,
) -> RenderGeometry {
    let plot = PlotArea::from(layout);
    let selected = selected_series(repo, state);

    let window = state.year_window();
    let x_domain = (window.start as f64, window.end as f64);
    let y_domain = match state.value_window {
        Some(w) => (w.min, w.max),
        None => derive_value_domain(&selected),
    };
    let x = LinearScale::new(x_domain, (0.0, plot.width));
    let y = LinearScale::new(y_domain, (plot.height, 0.0));

    let paths: BTreeMap<String, Vec<(f64, f64)>> = selected
        .iter()
        .map(|s| {
            let pts = s
                .points
                .iter()
                .filter(|p| window.contains(p.year))
                .map(|p| (x.map(p.year as f64), y.map(p.value)))
                .collect();
            (s.country.clone(), pts)
        })
        .collect();

    log::debug!(
        "projected {} paths, years {}..={}, values {:.2}..{:.2}",
        paths.len(),
        state.year_min,
        state.year_max,
        y_domain.0,
        y_domain.1
    );

    RenderGeometry {
        x_domain,
        y_domain,
        plot,
        x_axis: axis::year_axis(&x),
        y_axis: axis::value_axis(&y, locale_tag),
        paths,
    }
}

impl RenderGeometry {
    /// Nearest country whose polyline passes within `tolerance` pixels of
    /// `(x, y)` (plot-area coordinates).
    pub fn hit_test(&self, x: f64, y: f64, tolerance: f64) -> Option<&str> {
        self.paths
            .iter()
            .filter_map(|(c, pts)| util::polyline_distance((x, y), pts).map(|d| (c, d)))
            .filter(|(_, d)| *d <= tolerance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(c, _)| c.as_str())
    }
}
