use gdp_chart::canvas::scene_for;
use gdp_chart::config::ChartConfig;
use gdp_chart::viz_style::StyleTable;
use gdp_chart::{Controller, Event, storage, viz_plotters_adapter};
use std::fs;

fn sample_chart() -> Controller {
    let csv = "Country Name,2000,2001,2002\nUnited States,4.1,1.0,1.7\nChina,8.5,8.3,9.1\n";
    let rows = storage::read_rows(csv.as_bytes(), "inline", "Country Name").unwrap();
    let config = ChartConfig {
        countries: vec!["United States".into(), "China".into()],
        year_end: 2002,
        ..Default::default()
    };
    Controller::from_rows(&rows, config).unwrap()
}

fn svg_of(chart: &Controller) -> String {
    let scene = scene_for(
        chart.geometry(),
        &chart.highlight(),
        &StyleTable::new(chart.repository()),
    );
    viz_plotters_adapter::render_svg(&scene, &chart.config().layout, "GDP growth").unwrap()
}

#[test]
fn svg_has_axes_legend_and_title() {
    let svg = svg_of(&sample_chart());
    assert!(svg.contains("<svg"));
    assert!(svg.contains("GDP growth"));
    assert!(svg.contains("Year"));
    assert!(svg.contains("United States"));
    assert!(svg.contains("2001"));
    assert!(svg.contains('%'));
}

#[test]
fn hovered_line_is_orange_in_svg() {
    let mut chart = sample_chart();
    let plain = svg_of(&chart);
    chart.dispatch(Event::Hover(Some("China".into()))).unwrap();
    let hovered = svg_of(&chart);
    assert_ne!(plain, hovered);
    assert!(hovered.to_uppercase().contains("#FFA500"));
}

#[test]
fn save_svg_writes_file() {
    let chart = sample_chart();
    let scene = scene_for(
        chart.geometry(),
        &chart.highlight(),
        &StyleTable::new(chart.repository()),
    );
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chart.svg");
    viz_plotters_adapter::save_svg(&scene, &chart.config().layout, "GDP growth", &path).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("<svg"));
    assert!(text.contains("</svg>"));
}
