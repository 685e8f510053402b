use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use gdp_chart::canvas::scene_for;
use gdp_chart::config::ChartConfig;
use gdp_chart::viz_style::StyleTable;
use gdp_chart::{BrushAxis, Controller, Event, storage, viz_plotters_adapter};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "gdp-chart",
    version,
    about = "Render and interrogate the GDP growth line chart"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the data, apply interactions, and write the chart (and optionally geometry/state).
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// JSON config file (defaults to the user config dir if present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// CSV file with a "Country Name" column and one column per year.
    #[arg(long)]
    data: Option<PathBuf>,
    /// Year window (YYYY:YYYY)
    #[arg(long)]
    years: Option<String>,
    /// Value window in percent (MIN:MAX), e.g. -5:10
    #[arg(long, allow_hyphen_values = true)]
    values: Option<String>,
    /// Pixel brush on the year axis (FROM:TO, plot-area pixels).
    #[arg(long)]
    brush_years: Option<String>,
    /// Rebase every series to its value in this year.
    #[arg(long)]
    normalize: Option<i32>,
    /// Hide a country (repeatable).
    #[arg(long)]
    hide: Vec<String>,
    /// Pin a country (repeatable).
    #[arg(long)]
    pin: Vec<String>,
    /// Hover a country (shows it emphasized in the output).
    #[arg(long)]
    hover: Option<String>,
    /// JSON file with an array of events, applied after the flags above.
    #[arg(long)]
    events: Option<PathBuf>,
    /// Write the chart as SVG.
    #[arg(long)]
    svg: Option<PathBuf>,
    /// Write the projected geometry as JSON.
    #[arg(long)]
    geometry: Option<PathBuf>,
    /// Print the final view state as JSON to stdout.
    #[arg(long, default_value_t = false)]
    state: bool,
    /// Label locale (en, de, fr, ...).
    #[arg(long)]
    locale: Option<String>,
    /// Chart title used in the SVG.
    #[arg(long, default_value = "GDP growth, top 10 economies")]
    title: String,
}

fn parse_pair<T: std::str::FromStr>(s: &str) -> Option<(T, T)> {
    let (a, b) = s.split_once(':')?;
    Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
    }
}

/// Flags turned into the events a user would have produced, in a fixed order.
fn events_from_args(args: &RenderArgs) -> Result<Vec<Event>> {
    let mut events = Vec::new();
    if let Some(s) = &args.years {
        let (min, max) =
            parse_pair::<i32>(s).ok_or_else(|| anyhow::anyhow!("invalid --years, expected YYYY:YYYY"))?;
        events.push(Event::YearWindow { min, max });
    }
    if let Some(s) = &args.brush_years {
        let (from, to) =
            parse_pair::<f64>(s).ok_or_else(|| anyhow::anyhow!("invalid --brush-years, expected FROM:TO"))?;
        events.push(Event::Brush {
            axis: BrushAxis::Year,
            from,
            to,
        });
    }
    if let Some(s) = &args.values {
        let (min, max) =
            parse_pair::<f64>(s).ok_or_else(|| anyhow::anyhow!("invalid --values, expected MIN:MAX"))?;
        events.push(Event::ValueWindow { min, max });
    }
    if let Some(anchor_year) = args.normalize {
        events.push(Event::Normalize {
            enabled: true,
            anchor_year,
        });
    }
    events.extend(args.hide.iter().cloned().map(Event::ToggleVisible));
    events.extend(args.pin.iter().cloned().map(Event::TogglePin));
    if let Some(c) = &args.hover {
        events.push(Event::Hover(Some(c.clone())));
    }
    if let Some(path) = &args.events {
        let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let more: Vec<Event> =
            serde_json::from_str(&text).with_context(|| format!("parsing events in {}", path.display()))?;
        events.extend(more);
    }
    Ok(events)
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let mut config = ChartConfig::load_or_default(args.config.as_deref())?;
    if let Some(p) = &args.data {
        config.data_path = Some(p.clone());
    }
    if let Some(l) = &args.locale {
        config.locale = l.clone();
    }
    if config.data_path.is_none() {
        anyhow::bail!("no data file: pass --data or set data_path in the config");
    }

    let events = events_from_args(&args)?;
    let mut chart = Controller::load(config)?;
    eprintln!(
        "Loaded {} series of {} allowed countries",
        chart.repository().len(),
        chart.config().countries.len()
    );
    for event in events {
        chart
            .dispatch(event.clone())
            .with_context(|| format!("event {:?} rejected", event))?;
    }

    if let Some(path) = args.svg.as_ref() {
        let scene = scene_for(
            chart.geometry(),
            &chart.highlight(),
            &StyleTable::new(chart.repository()),
        );
        viz_plotters_adapter::save_svg(&scene, &chart.config().layout, &args.title, path)?;
        eprintln!("Wrote chart to {}", path.display());
    }

    if let Some(path) = args.geometry.as_ref() {
        storage::save_geometry_json(chart.geometry(), path)?;
        eprintln!("Wrote geometry to {}", path.display());
    }

    if args.state {
        println!("{}", serde_json::to_string_pretty(chart.view_state())?);
    }

    Ok(())
}
