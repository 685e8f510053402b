//! Styling: map each country to a stable color and resolve the stroke of its
//! line from the current highlight record.
//!
//! Design:
//! - Country: a palette slot from its position in the allow-list (primary identity).
//! - Emphasis: pinned lines keep their color and get a heavier stroke, the
//!   hovered line turns orange.

use crate::models::{Emphasis, Highlight};
use crate::repository::SeriesRepository;
use crate::viz::util::office_color;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub const HOVER_COLOR: Rgb8 = Rgb8::new(255, 165, 0);
pub const BASE_WIDTH: f32 = 1.5;
pub const EMPHASIS_WIDTH: f32 = 3.0;

/// Stroke of one drawn line.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathStyle {
    pub color: Rgb8,
    pub width: f32,
}

impl PathStyle {
    /// Style for palette slot `idx` at the given emphasis.
    pub fn resolve(idx: usize, emphasis: Emphasis) -> Self {
        let base = office_color(idx);
        match emphasis {
            Emphasis::Normal => Self {
                color: base,
                width: BASE_WIDTH,
            },
            Emphasis::Pinned => Self {
                color: base,
                width: EMPHASIS_WIDTH,
            },
            Emphasis::Hovered => Self {
                color: HOVER_COLOR,
                width: EMPHASIS_WIDTH,
            },
        }
    }

    pub fn is_emphasized(&self) -> bool {
        self.width > BASE_WIDTH
    }
}

/// Looks up styles by country; owns nothing but the repository's color order.
#[derive(Clone, Copy, Debug)]
pub struct StyleTable<'a> {
    repo: &'a SeriesRepository,
}

impl<'a> StyleTable<'a> {
    pub fn new(repo: &'a SeriesRepository) -> Self {
        Self { repo }
    }

    pub fn base_color(&self, country: &str) -> Rgb8 {
        office_color(self.repo.color_index(country).unwrap_or(0))
    }

    pub fn style_for(&self, country: &str, highlight: &Highlight) -> PathStyle {
        PathStyle::resolve(
            self.repo.color_index(country).unwrap_or(0),
            highlight.emphasis(country),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DataPoint, Series};

    #[test]
    fn emphasis_changes_stroke_not_identity() {
        let repo = SeriesRepository::from_series(vec![
            Series::new("Japan", vec![DataPoint::new(2000, 2.8)]),
            Series::new("Italy", vec![DataPoint::new(2000, 3.8)]),
        ]);
        let table = StyleTable::new(&repo);
        let mut h = Highlight::default();
        let normal = table.style_for("Italy", &h);
        assert_eq!(normal.color, office_color(1));
        assert!(!normal.is_emphasized());

        h.pinned.insert("Italy".into());
        let pinned = table.style_for("Italy", &h);
        assert_eq!(pinned.color, normal.color);
        assert!(pinned.is_emphasized());

        h.hovered = Some("Italy".into());
        assert_eq!(table.style_for("Italy", &h).color, HOVER_COLOR);
    }
}
