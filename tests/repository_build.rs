use gdp_chart::ChartError;
use gdp_chart::models::YearRange;
use gdp_chart::repository::SeriesRepository;
use gdp_chart::storage;

const WIDE_CSV: &str = "\
Country Name,Country Code,1999,2000,2001,2002
United States,USA,4.8,4.1,1.0,1.7
China,CHN,7.7,8.5,,9.1
Narnia,NAR,1,2,3,4
Japan,JPN,,,,
China,CHN,0,0,0,0
";

fn allowed() -> Vec<String> {
    ["United States", "China", "Japan", "Germany"]
        .iter()
        .map(|c| c.to_string())
        .collect()
}

fn build() -> SeriesRepository {
    let rows = storage::read_rows(WIDE_CSV.as_bytes(), "inline", "Country Name").unwrap();
    SeriesRepository::build(&rows, &allowed(), YearRange::new(2000, 2002)).unwrap()
}

fn years(repo: &SeriesRepository, country: &str) -> Vec<i32> {
    repo.get(country).unwrap().points.iter().map(|p| p.year).collect()
}

#[test]
fn only_allowed_countries_in_allow_list_order() {
    let repo = build();
    assert_eq!(repo.countries(), ["United States", "China", "Japan"]);
    assert!(!repo.contains("Narnia"));
    // Allowed but absent from the source: no entry at all.
    assert!(!repo.contains("Germany"));
    assert!(repo.get("Germany").is_none());
    assert_eq!(repo.len(), 3);
}

#[test]
fn years_outside_the_range_are_dropped() {
    let repo = build();
    assert_eq!(years(&repo, "United States"), vec![2000, 2001, 2002]);
    let values: Vec<f64> = repo
        .get("United States")
        .unwrap()
        .points
        .iter()
        .map(|p| p.value)
        .collect();
    assert_eq!(values, vec![4.1, 1.0, 1.7]);
}

#[test]
fn empty_cells_are_gaps_not_zeros() {
    let repo = build();
    assert_eq!(years(&repo, "China"), vec![2000, 2002]);
    assert_eq!(repo.get("China").unwrap().value_at(2001), None);
    assert!(repo.get("Japan").unwrap().is_empty());
}

#[test]
fn duplicate_rows_keep_the_first() {
    let repo = build();
    assert_eq!(repo.get("China").unwrap().value_at(2000), Some(8.5));
}

#[test]
fn extent_covers_every_kept_value() {
    let repo = build();
    assert_eq!(repo.value_extent(), Some((1.0, 9.1)));
    assert_eq!(repo.color_index("Japan"), Some(2));
}

#[test]
fn empty_allow_list_is_rejected() {
    let rows = storage::read_rows(WIDE_CSV.as_bytes(), "inline", "Country Name").unwrap();
    let err = SeriesRepository::build(&rows, &[], YearRange::new(2000, 2002)).unwrap_err();
    assert!(matches!(err, ChartError::InvalidConfig(_)));
}
