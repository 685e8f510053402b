use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Closed, inclusive range of years like 2000..=2020.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, year: i32) -> bool {
        year >= self.start && year <= self.end
    }

    /// Iterate the years in ascending order. Empty when `start > end`.
    pub fn years(&self) -> std::ops::RangeInclusive<i32> {
        self.start..=self.end
    }
}

/// One observation of a series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DataPoint {
    pub year: i32,
    pub value: f64,
}

impl DataPoint {
    pub fn new(year: i32, value: f64) -> Self {
        Self { year, value }
    }
}

/// One country's observations, sorted ascending by year with unique years.
/// Gaps are allowed and are never filled in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Series {
    pub country: String,
    pub points: Vec<DataPoint>,
}

impl Series {
    pub fn new(country: impl Into<String>, mut points: Vec<DataPoint>) -> Self {
        points.sort_by_key(|p| p.year);
        points.dedup_by_key(|p| p.year);
        Self {
            country: country.into(),
            points,
        }
    }

    /// Value observed in `year`, if any.
    pub fn value_at(&self, year: i32) -> Option<f64> {
        self.points
            .binary_search_by_key(&year, |p| p.year)
            .ok()
            .map(|i| self.points[i].value)
    }

    /// Points whose year falls within `[min, max]`.
    pub fn in_window(&self, min: i32, max: i32) -> impl Iterator<Item = &DataPoint> {
        self.points
            .iter()
            .filter(move |p| p.year >= min && p.year <= max)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Explicit value-axis bounds set through the controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueWindow {
    pub min: f64,
    pub max: f64,
}

/// The mutable parameters that determine what is currently visible.
///
/// `value_window == None` means no bounds were set yet; the projection then
/// derives the value domain from the data it is about to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub year_min: i32,
    pub year_max: i32,
    pub value_window: Option<ValueWindow>,
    pub visible: BTreeSet<String>,
    pub pinned: BTreeSet<String>,
    pub normalize: bool,
    pub anchor_year: i32,
}

impl ViewState {
    pub fn is_visible(&self, country: &str) -> bool {
        self.visible.contains(country)
    }

    pub fn is_pinned(&self, country: &str) -> bool {
        self.pinned.contains(country)
    }

    pub fn year_window(&self) -> YearRange {
        YearRange::new(self.year_min, self.year_max)
    }
}

/// Transient per-country highlight record consumed by renderers.
/// Kept apart from any drawable so the state stays plain data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub hovered: Option<String>,
    pub pinned: BTreeSet<String>,
}

/// How strongly a series is emphasized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Emphasis {
    Normal,
    Pinned,
    Hovered,
}

impl Highlight {
    /// Hover wins over pin so the pointer target is always identifiable.
    pub fn emphasis(&self, country: &str) -> Emphasis {
        if self.hovered.as_deref() == Some(country) {
            Emphasis::Hovered
        } else if self.pinned.contains(country) {
            Emphasis::Pinned
        } else {
            Emphasis::Normal
        }
    }
}

/// Hover inspection content for one data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub country: String,
    pub year: i32,
    pub value: f64,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_sorts_and_dedups_years() {
        let s = Series::new(
            "Japan",
            vec![
                DataPoint::new(2002, 0.1),
                DataPoint::new(2000, 2.8),
                DataPoint::new(2002, 9.9),
            ],
        );
        let years: Vec<i32> = s.points.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2000, 2002]);
        assert_eq!(s.value_at(2000), Some(2.8));
        assert_eq!(s.value_at(2001), None);
    }

    #[test]
    fn hover_takes_precedence_over_pin() {
        let h = Highlight {
            hovered: Some("China".into()),
            pinned: ["China".to_string(), "India".to_string()].into(),
        };
        assert_eq!(h.emphasis("China"), Emphasis::Hovered);
        assert_eq!(h.emphasis("India"), Emphasis::Pinned);
        assert_eq!(h.emphasis("Italy"), Emphasis::Normal);
    }
}
