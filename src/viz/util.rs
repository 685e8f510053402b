//! Utility functions for visualization: palette, locale mapping, polyline geometry.

use crate::viz_style::Rgb8;
use num_format::Locale;

/// Microsoft Office (2013+) chart series palette.
/// Order: Blue, Orange, Gray, Gold, Light Blue, Green, Dark Blue, Dark Orange, Dark Gray, Brownish Gold.
const OFFICE10: [Rgb8; 10] = [
    Rgb8::new(68, 114, 196),  // blue      (#4472C4)
    Rgb8::new(237, 125, 49),  // orange    (#ED7D31)
    Rgb8::new(165, 165, 165), // gray      (#A5A5A5)
    Rgb8::new(255, 192, 0),   // gold      (#FFC000)
    Rgb8::new(91, 155, 213),  // light blue(#5B9BD5)
    Rgb8::new(112, 173, 71),  // green     (#70AD47)
    Rgb8::new(38, 68, 120),   // dark blue (#264478)
    Rgb8::new(158, 72, 14),   // dark org. (#9E480E)
    Rgb8::new(99, 99, 99),    // dark gray (#636363)
    Rgb8::new(153, 115, 0),   // brownish  (#997300)
];

/// Get a color from the Office palette.
#[inline]
pub fn office_color(idx: usize) -> Rgb8 {
    OFFICE10[idx % OFFICE10.len()]
}

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    let locale = match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        "it" | "it_it" => &Locale::it,
        "pt" | "pt_pt" | "pt_br" => &Locale::pt,
        "nl" | "nl_nl" => &Locale::nl,
        _ => &Locale::en,
    };
    let sep = locale.decimal().chars().next().unwrap_or('.');
    (locale, sep)
}

/// Distance from `p` to the segment `a`–`b`.
pub fn segment_distance(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len2 = dx * dx + dy * dy;
    let t = if len2 == 0.0 {
        0.0
    } else {
        (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len2).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.0 + t * dx, a.1 + t * dy);
    ((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}

/// Distance from `p` to the nearest part of a polyline. `None` when empty.
pub fn polyline_distance(p: (f64, f64), points: &[(f64, f64)]) -> Option<f64> {
    match points {
        [] => None,
        [only] => Some(segment_distance(p, *only, *only)),
        _ => points
            .windows(2)
            .map(|w| segment_distance(p, w[0], w[1]))
            .reduce(f64::min),
    }
}

/// Liang–Barsky clip of one segment against `[0, w] x [0, h]`.
fn clip_segment(a: (f64, f64), b: (f64, f64), w: f64, h: f64) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    for (p, q) in [(-dx, a.0), (dx, w - a.0), (-dy, a.1), (dy, h - a.1)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
            if t0 > t1 {
                return None;
            }
        }
    }
    Some((
        (a.0 + t0 * dx, a.1 + t0 * dy),
        (a.0 + t1 * dx, a.1 + t1 * dy),
    ))
}

/// Split a polyline into the runs that lie inside `[0, w] x [0, h]`.
pub fn clip_polyline(points: &[(f64, f64)], w: f64, h: f64) -> Vec<Vec<(f64, f64)>> {
    let inside = |p: &(f64, f64)| p.0 >= 0.0 && p.0 <= w && p.1 >= 0.0 && p.1 <= h;
    if points.len() == 1 {
        return if inside(&points[0]) {
            vec![points.to_vec()]
        } else {
            Vec::new()
        };
    }
    let mut runs: Vec<Vec<(f64, f64)>> = Vec::new();
    let mut cur: Vec<(f64, f64)> = Vec::new();
    for seg in points.windows(2) {
        match clip_segment(seg[0], seg[1], w, h) {
            Some((s, e)) => {
                if cur.last() != Some(&s) {
                    if cur.len() > 1 {
                        runs.push(std::mem::take(&mut cur));
                    }
                    cur.clear();
                    cur.push(s);
                }
                cur.push(e);
            }
            None => {
                if cur.len() > 1 {
                    runs.push(std::mem::take(&mut cur));
                }
                cur.clear();
            }
        }
    }
    if cur.len() > 1 {
        runs.push(cur);
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_wraps() {
        assert_eq!(office_color(0), office_color(10));
        assert_ne!(office_color(0), office_color(1));
    }

    #[test]
    fn locale_separators() {
        assert_eq!(map_locale("en").1, '.');
        assert_eq!(map_locale("de_DE").1, ',');
        assert_eq!(map_locale("unknown").1, '.');
    }

    #[test]
    fn distance_to_polyline() {
        let line = [(0.0, 0.0), (10.0, 0.0)];
        assert_eq!(polyline_distance((5.0, 3.0), &line), Some(3.0));
        assert_eq!(polyline_distance((13.0, 4.0), &line), Some(5.0));
        assert_eq!(polyline_distance((0.0, 0.0), &[]), None);
    }

    #[test]
    fn clipping_splits_runs_that_leave_the_box() {
        // up out of the top edge, then back in
        let pts = [(0.0, 50.0), (50.0, -50.0), (100.0, 50.0)];
        let runs = clip_polyline(&pts, 100.0, 100.0);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0], vec![(0.0, 50.0), (25.0, 0.0)]);
        assert_eq!(runs[1], vec![(75.0, 0.0), (100.0, 50.0)]);
    }

    #[test]
    fn clipping_keeps_fully_inside_line_whole() {
        let pts = [(0.0, 0.0), (10.0, 10.0), (20.0, 5.0)];
        let runs = clip_polyline(&pts, 100.0, 100.0);
        assert_eq!(runs, vec![pts.to_vec()]);
    }
}
