//! gdp_chart
//!
//! A reactive rendering engine for a multi-series GDP growth line chart.
//! Pairs with the `gdp-chart` CLI and the `gdp-chart-gui` desktop viewer.
//!
//! ### Features
//! - Reshape a wide World Bank CSV (one row per country, one column per year) into per-country series
//! - Pure projection of (series, view state) into scales, ticks and pixel polylines
//! - Interaction controller: year/value windows, brushing, visibility, hover, pin, normalization, reset
//! - A minimal canvas interface, a retained scene, and SVG export via plotters
//!
//! ### Example
//! ```no_run
//! use gdp_chart::{ChartConfig, Controller, Event};
//!
//! let config = ChartConfig {
//!     data_path: Some("data/GDP_annual_growth_NEW.csv".into()),
//!     ..Default::default()
//! };
//! let mut chart = Controller::load(config)?;
//! chart.dispatch(Event::YearWindow { min: 2005, max: 2015 })?;
//! chart.dispatch(Event::Normalize { enabled: true, anchor_year: 2005 })?;
//! let geometry = chart.geometry();
//! println!("{} lines", geometry.paths.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod canvas;
pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod repository;
pub mod storage;
pub mod view;
pub mod viz;
pub mod viz_plotters_adapter;
pub mod viz_style;

pub use config::ChartConfig;
pub use controller::{BrushAxis, Controller, Event};
pub use error::ChartError;
pub use models::{DataPoint, Series, ViewState, YearRange};
pub use repository::SeriesRepository;
pub use viz::{RenderGeometry, project};
