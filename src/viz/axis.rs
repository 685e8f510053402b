//! Axis tick derivation and label formatting.

use super::scale::LinearScale;
use super::types::{AxisOrientation, AxisSpec, Tick};
use super::util::map_locale;

/// Upper bound on year labels so they don't overlap.
pub const MAX_YEAR_TICKS: usize = 12;
pub const VALUE_TICKS: usize = 10;

/// Step of 1, 2 or 5 times a power of ten giving roughly `count` ticks.
/// Returns the step and, for steps below one, its exact reciprocal.
fn tick_step(lo: f64, hi: f64, count: usize) -> (f64, Option<f64>) {
    let raw = (hi - lo) / count as f64;
    let power = raw.log10().floor();
    let error = raw / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    if power < 0.0 {
        let inv = 10f64.powf(-power) / factor;
        (1.0 / inv, Some(inv))
    } else {
        (10f64.powf(power) * factor, None)
    }
}

/// Evenly spaced "nice" values covering `[start, stop]`, ascending.
pub fn nice_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !start.is_finite() || !stop.is_finite() || count == 0 {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (lo, hi) = if start < stop { (start, stop) } else { (stop, start) };
    let (step, inv) = tick_step(lo, hi, count);
    if !step.is_finite() || step <= 0.0 {
        return Vec::new();
    }
    // Dividing by the reciprocal keeps 0.1-style steps exact.
    let (scale_up, scale_down): (f64, Box<dyn Fn(i64) -> f64>) = match inv {
        Some(inv) => (inv, Box::new(move |i| i as f64 / inv)),
        None => (1.0 / step, Box::new(move |i| i as f64 * step)),
    };
    let i0 = (lo * scale_up - 1e-9).ceil() as i64;
    let i1 = (hi * scale_up + 1e-9).floor() as i64;
    (i0..=i1).map(|i| scale_down(i) + 0.0).collect()
}

/// Decimals needed to tell ticks of this step apart.
fn step_precision(ticks: &[f64]) -> usize {
    if ticks.len() < 2 {
        return 0;
    }
    let step = (ticks[1] - ticks[0]).abs();
    if step <= 0.0 {
        return 0;
    }
    (-step.log10()).ceil().max(0.0) as usize
}

/// Format a percentage with the locale's decimal separator, e.g. `-2.5%` / `-2,5%`.
pub fn format_percent(v: f64, precision: usize, locale_tag: &str) -> String {
    let (_, dec_sep) = map_locale(locale_tag);
    let s = format!("{:.*}", precision, v + 0.0);
    // "-0.0" after rounding reads as zero.
    let s = if s.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        s.trim_start_matches('-').to_string()
    } else {
        s
    };
    let s = if dec_sep == '.' { s } else { s.replace('.', &dec_sep.to_string()) };
    format!("{s}%")
}

/// Year axis: integer ticks only, labelled as plain numbers.
pub fn year_axis(scale: &LinearScale) -> AxisSpec {
    let (d0, d1) = scale.domain;
    let span = (d1 - d0).abs().round() as usize;
    let count = (span + 1).min(MAX_YEAR_TICKS);
    let ticks = nice_ticks(d0, d1, count)
        .into_iter()
        .filter(|v| v.fract() == 0.0)
        .map(|v| Tick {
            value: v,
            position: scale.map(v),
            label: format!("{}", v as i64),
        })
        .collect();
    AxisSpec {
        orientation: AxisOrientation::Bottom,
        domain: scale.domain,
        ticks,
    }
}

/// Value axis: ~10 ticks with a percent suffix.
pub fn value_axis(scale: &LinearScale, locale_tag: &str) -> AxisSpec {
    let (d0, d1) = scale.domain;
    let values = nice_ticks(d0, d1, VALUE_TICKS);
    let prec = step_precision(&values);
    let ticks = values
        .iter()
        .map(|&v| Tick {
            value: v,
            position: scale.map(v),
            label: format_percent(v, prec, locale_tag),
        })
        .collect();
    AxisSpec {
        orientation: AxisOrientation::Left,
        domain: scale.domain,
        ticks,
    }
}
