//! The immutable base dataset: one sorted series per allowed country.

use crate::error::{ChartError, Result};
use crate::models::{DataPoint, Series, YearRange};
use crate::storage::RawRow;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeriesRepository {
    series: BTreeMap<String, Series>,
    /// Countries that produced a series, in allow-list order.
    order: Vec<String>,
}

/// Parse one raw cell. Empty, unparsable and non-finite cells are "no observation".
pub fn parse_cell(raw: &str) -> Option<f64> {
    let t = raw.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<f64>().ok().filter(|v| v.is_finite())
}

impl SeriesRepository {
    /// Build from wide rows, keeping only allowed countries and years in `years`.
    pub fn build(rows: &[RawRow], allowed: &[String], years: YearRange) -> Result<Self> {
        if allowed.is_empty() {
            return Err(ChartError::InvalidConfig(
                "at least one country must be allowed".into(),
            ));
        }

        let mut grouped: BTreeMap<String, Vec<DataPoint>> = BTreeMap::new();
        let mut skipped = 0usize;
        for row in rows {
            if !allowed.iter().any(|c| c == &row.country) {
                continue;
            }
            if grouped.contains_key(&row.country) {
                log::warn!("duplicate row for {}, keeping the first", row.country);
                continue;
            }
            let mut points = Vec::new();
            for year in years.years() {
                match row.cell(year).and_then(parse_cell) {
                    Some(value) => points.push(DataPoint { year, value }),
                    None => skipped += 1,
                }
            }
            grouped.insert(row.country.clone(), points);
        }

        let order: Vec<String> = allowed
            .iter()
            .filter(|c| grouped.contains_key(c.as_str()))
            .cloned()
            .collect();
        let series = grouped
            .into_iter()
            .map(|(country, points)| (country.clone(), Series::new(country, points)))
            .collect::<BTreeMap<_, _>>();

        log::info!(
            "built repository: {} of {} countries, {} missing observations skipped",
            series.len(),
            allowed.len(),
            skipped
        );
        Ok(Self { series, order })
    }

    /// Assemble a repository from ready-made series, in the given order.
    pub fn from_series(list: Vec<Series>) -> Self {
        let mut series = BTreeMap::new();
        let mut order = Vec::new();
        for s in list {
            if !series.contains_key(&s.country) {
                order.push(s.country.clone());
                series.insert(s.country.clone(), s);
            }
        }
        Self { series, order }
    }

    pub fn get(&self, country: &str) -> Option<&Series> {
        self.series.get(country)
    }

    pub fn contains(&self, country: &str) -> bool {
        self.series.contains_key(country)
    }

    /// Countries in allow-list order.
    pub fn countries(&self) -> &[String] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = &Series> {
        self.order.iter().filter_map(|c| self.series.get(c))
    }

    /// Stable palette slot for a country.
    pub fn color_index(&self, country: &str) -> Option<usize> {
        self.order.iter().position(|c| c == country)
    }

    /// Min and max over every value in the repository.
    pub fn value_extent(&self) -> Option<(f64, f64)> {
        let mut values = self.series.values().flat_map(|s| s.points.iter().map(|p| p.value));
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_cell_rejects_blank_and_non_finite() {
        assert_eq!(parse_cell(" 4.1 "), Some(4.1));
        assert_eq!(parse_cell(""), None);
        assert_eq!(parse_cell("  "), None);
        assert_eq!(parse_cell("n/a"), None);
        assert_eq!(parse_cell("NaN"), None);
        assert_eq!(parse_cell("inf"), None);
    }
}
