//! Chart configuration: data location, country allow-list, analysis range,
//! pixel layout and label locale.
//!
//! Every field has a default, so a JSON config file only needs to name what
//! it overrides:
//!
//! ```json
//! { "data_path": "data/GDP_annual_growth_NEW.csv", "year_start": 2005 }
//! ```

use crate::error::{ChartError, Result};
use crate::models::YearRange;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The ten largest economies, spelled as in the World Bank "Country Name" column.
pub const TOP10_COUNTRIES: [&str; 10] = [
    "United States",
    "China",
    "Japan",
    "Germany",
    "India",
    "United Kingdom",
    "France",
    "Italy",
    "Canada",
    "South Korea",
];

pub const DEFAULT_COUNTRY_FIELD: &str = "Country Name";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 50,
            right: 150,
            bottom: 100,
            left: 100,
        }
    }
}

/// Outer chart size plus margins; the plot area is what remains inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    pub margin: Margins,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            margin: Margins::default(),
        }
    }
}

impl Layout {
    pub fn plot_width(&self) -> f64 {
        self.width as f64 - self.margin.left as f64 - self.margin.right as f64
    }

    pub fn plot_height(&self) -> f64 {
        self.height as f64 - self.margin.top as f64 - self.margin.bottom as f64
    }

    /// Same margins, different outer size (used when a host window resizes).
    pub fn with_size(&self, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            margin: self.margin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub data_path: Option<PathBuf>,
    pub country_field: String,
    pub countries: Vec<String>,
    pub year_start: i32,
    pub year_end: i32,
    pub layout: Layout,
    /// Locale tag for number labels, e.g. "en" or "de".
    pub locale: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            country_field: DEFAULT_COUNTRY_FIELD.to_string(),
            countries: TOP10_COUNTRIES.iter().map(|c| c.to_string()).collect(),
            year_start: 2000,
            year_end: 2020,
            layout: Layout::default(),
            locale: "en".to_string(),
        }
    }
}

impl ChartConfig {
    /// Read a JSON config file. Missing fields fall back to defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| ChartError::InvalidConfig(format!("{}: {}", path.display(), e)))?;
        let cfg: ChartConfig = serde_json::from_str(&text)
            .map_err(|e| ChartError::InvalidConfig(format!("{}: {}", path.display(), e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load the config at `path`, or the one at [`default_config_path`] when it
    /// exists, or fall back to the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => match default_config_path() {
                Some(p) if p.exists() => {
                    log::info!("using config {}", p.display());
                    Self::load(p)
                }
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.countries.is_empty() {
            return Err(ChartError::InvalidConfig(
                "at least one country must be allowed".into(),
            ));
        }
        if self.year_start > self.year_end {
            return Err(ChartError::InvalidConfig(format!(
                "year range {}:{} is inverted",
                self.year_start, self.year_end
            )));
        }
        if self.layout.plot_width() <= 0.0 || self.layout.plot_height() <= 0.0 {
            return Err(ChartError::InvalidConfig(format!(
                "layout {}x{} leaves no room inside the margins",
                self.layout.width, self.layout.height
            )));
        }
        Ok(())
    }

    pub fn year_range(&self) -> YearRange {
        YearRange::new(self.year_start, self.year_end)
    }
}

/// `<config dir>/gdp-chart/config.json`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("gdp-chart").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_chart() {
        let cfg = ChartConfig::default();
        assert_eq!(cfg.countries.len(), 10);
        assert_eq!(cfg.year_range(), YearRange::new(2000, 2020));
        assert_eq!(cfg.layout.plot_width(), 550.0);
        assert_eq!(cfg.layout.plot_height(), 250.0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: ChartConfig =
            serde_json::from_str(r#"{ "year_start": 2005, "layout": { "width": 1000 } }"#).unwrap();
        assert_eq!(cfg.year_start, 2005);
        assert_eq!(cfg.year_end, 2020);
        assert_eq!(cfg.layout.width, 1000);
        assert_eq!(cfg.layout.height, 400);
        assert_eq!(cfg.country_field, "Country Name");
    }

    #[test]
    fn rejects_empty_allow_list_and_inverted_years() {
        let mut cfg = ChartConfig {
            countries: vec![],
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ChartError::InvalidConfig(_))));
        cfg.countries = vec!["Japan".into()];
        cfg.year_start = 2021;
        assert!(matches!(cfg.validate(), Err(ChartError::InvalidConfig(_))));
    }
}
