use crate::error::{ChartError, Result};
use crate::viz::RenderGeometry;
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// One wide source row: a country name plus the raw cell of every other column,
/// keyed by header label (e.g. "2005").
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRow {
    pub country: String,
    pub cells: HashMap<String, String>,
}

impl RawRow {
    /// Raw cell for a year label, if the column exists.
    pub fn cell(&self, year: i32) -> Option<&str> {
        self.cells.get(&year.to_string()).map(String::as_str)
    }
}

/// Read wide CSV rows with a header line. `source_name` only labels errors.
pub fn read_rows<R: Read>(reader: R, source_name: &str, country_field: &str) -> Result<Vec<RawRow>> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| ChartError::data_source(source_name, e))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let Some(country_col) = headers.iter().position(|h| h == country_field) else {
        return Err(ChartError::data_source(
            source_name,
            format!("missing column `{}`", country_field),
        ));
    };

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| ChartError::data_source(source_name, e))?;
        let Some(country) = record.get(country_col).map(str::trim) else {
            continue;
        };
        if country.is_empty() {
            continue;
        }
        let cells = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != country_col)
            .filter_map(|(i, h)| record.get(i).map(|v| (h.clone(), v.to_string())))
            .collect();
        rows.push(RawRow {
            country: country.to_string(),
            cells,
        });
    }
    log::debug!("read {} rows from {}", rows.len(), source_name);
    Ok(rows)
}

/// Open and read a CSV file. Any failure becomes [`ChartError::DataSource`].
pub fn load_rows<P: AsRef<Path>>(path: P, country_field: &str) -> Result<Vec<RawRow>> {
    let path = path.as_ref();
    let name = path.display().to_string();
    let file = File::open(path).map_err(|e| ChartError::data_source(&name, e))?;
    read_rows(file, &name, country_field)
}

/// Save projected geometry as pretty JSON.
pub fn save_geometry_json<P: AsRef<Path>>(geometry: &RenderGeometry, path: P) -> anyhow::Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(geometry)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
