use crate::models::{ViewState, YearRange};
use crate::repository::SeriesRepository;
use std::collections::BTreeSet;

impl ViewState {
    /// Full year range, data-derived value range, every series visible,
    /// nothing pinned, normalization off.
    pub fn initial(repo: &SeriesRepository, years: YearRange) -> Self {
        Self {
            year_min: years.start,
            year_max: years.end,
            value_window: None,
            visible: repo.countries().iter().cloned().collect(),
            pinned: BTreeSet::new(),
            normalize: false,
            anchor_year: years.start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DataPoint, Series};

    #[test]
    fn initial_state_shows_everything() {
        let repo = SeriesRepository::from_series(vec![
            Series::new("China", vec![DataPoint::new(2000, 8.5)]),
            Series::new("India", vec![DataPoint::new(2000, 3.8)]),
        ]);
        let s = ViewState::initial(&repo, YearRange::new(2000, 2020));
        assert_eq!((s.year_min, s.year_max), (2000, 2020));
        assert!(s.value_window.is_none());
        assert!(s.is_visible("China") && s.is_visible("India"));
        assert!(s.pinned.is_empty());
        assert!(!s.normalize);
        assert_eq!(s.anchor_year, 2000);
    }
}
