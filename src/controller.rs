//! Interaction controller: turns input events into view-state transitions and
//! keeps the projected geometry current.
//!
//! The host surface is three calls: [`Controller::dispatch`],
//! [`Controller::geometry`] and [`Controller::view_state`]. A rejected event
//! leaves the state exactly as it was.

use crate::config::{ChartConfig, Layout};
use crate::error::{ChartError, Result};
use crate::models::{Highlight, Tooltip, ValueWindow, ViewState};
use crate::repository::SeriesRepository;
use crate::storage::{self, RawRow};
use crate::viz::axis::format_percent;
use crate::viz::{self, RenderGeometry};
use serde::{Deserialize, Serialize};

/// Brush selections narrower than this many pixels are ignored.
pub const MIN_BRUSH_PX: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BrushAxis {
    Year,
    Value,
}

/// Input events, as emitted by sliders, brushes, legend checkboxes and the
/// pointer. Serialized as `{ "kind": ..., "payload": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "camelCase")]
pub enum Event {
    YearWindow {
        min: i32,
        max: i32,
    },
    ValueWindow {
        min: f64,
        max: f64,
    },
    /// Pixel interval in plot-area coordinates along `axis`.
    Brush {
        axis: BrushAxis,
        from: f64,
        to: f64,
    },
    ToggleVisible(String),
    Hover(Option<String>),
    TogglePin(String),
    Reset,
    Normalize {
        enabled: bool,
        #[serde(rename = "anchorYear")]
        anchor_year: i32,
    },
}

#[derive(Debug, Clone)]
pub struct Controller {
    repo: SeriesRepository,
    config: ChartConfig,
    state: ViewState,
    hovered: Option<String>,
    geometry: RenderGeometry,
}

impl Controller {
    /// Attach a controller to an already built repository, in the initial state.
    pub fn new(repo: SeriesRepository, config: ChartConfig) -> Self {
        let state = ViewState::initial(&repo, config.year_range());
        let geometry = viz::project(&repo, &state, &config.layout, &config.locale);
        Self {
            repo,
            config,
            state,
            hovered: None,
            geometry,
        }
    }

    pub fn from_rows(rows: &[RawRow], config: ChartConfig) -> Result<Self> {
        config.validate()?;
        let repo = SeriesRepository::build(rows, &config.countries, config.year_range())?;
        Ok(Self::new(repo, config))
    }

    /// Read `config.data_path` and build the chart. Fails before anything is
    /// rendered when the source is unreadable.
    pub fn load(config: ChartConfig) -> Result<Self> {
        let path = config.data_path.clone().ok_or_else(|| {
            ChartError::InvalidConfig("no data path configured".into())
        })?;
        let rows = storage::load_rows(&path, &config.country_field)?;
        Self::from_rows(&rows, config)
    }

    /// Apply one event. On success returns the (possibly unchanged) state.
    pub fn dispatch(&mut self, event: Event) -> Result<&ViewState> {
        log::debug!("dispatch {:?}", event);
        match event {
            Event::Hover(target) => {
                if let Some(c) = &target {
                    self.require_country(c)?;
                }
                // Hidden lines cannot be hovered.
                self.hovered = target.filter(|c| self.state.is_visible(c));
            }
            Event::Reset => {
                let next = self.next_state(&Event::Reset)?;
                self.hovered = None;
                self.commit(next);
            }
            other => {
                let next = self.next_state(&other)?;
                self.commit(next);
            }
        }
        Ok(&self.state)
    }

    /// Dispatch in order, stopping at the first rejected event.
    pub fn dispatch_all<I: IntoIterator<Item = Event>>(&mut self, events: I) -> Result<&ViewState> {
        for e in events {
            self.dispatch(e)?;
        }
        Ok(&self.state)
    }

    pub fn geometry(&self) -> &RenderGeometry {
        &self.geometry
    }

    pub fn view_state(&self) -> &ViewState {
        &self.state
    }

    pub fn repository(&self) -> &SeriesRepository {
        &self.repo
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Highlight record for renderers: the hovered country plus the pinned set.
    pub fn highlight(&self) -> Highlight {
        Highlight {
            hovered: self.hovered.clone(),
            pinned: self.state.pinned.clone(),
        }
    }

    /// Change the drawing surface size; the view state is untouched.
    pub fn set_layout(&mut self, layout: Layout) {
        if layout != self.config.layout {
            self.config.layout = layout;
            self.reproject();
        }
    }

    /// Tooltip for the hovered country at plot-area x `pointer_x`: the
    /// in-window observation whose year is closest to the pointer.
    pub fn tooltip(&self, pointer_x: f64) -> Option<Tooltip> {
        let country = self.hovered.as_deref()?;
        if !self.state.is_visible(country) {
            return None;
        }
        let series = viz::displayed_series(self.repo.get(country)?, &self.state);
        let year = self.geometry.x_scale().invert(pointer_x);
        let point = series
            .in_window(self.state.year_min, self.state.year_max)
            .min_by(|a, b| {
                let da = (a.year as f64 - year).abs();
                let db = (b.year as f64 - year).abs();
                da.total_cmp(&db)
            })?;
        let text = format!(
            "{}\n{}: {}",
            country,
            point.year,
            format_percent(point.value, 1, &self.config.locale)
        );
        Some(Tooltip {
            country: country.to_string(),
            year: point.year,
            value: point.value,
            text,
        })
    }

    fn require_country(&self, country: &str) -> Result<()> {
        if self.repo.contains(country) {
            Ok(())
        } else {
            Err(ChartError::UnknownCountry(country.to_string()))
        }
    }

    fn commit(&mut self, next: Option<ViewState>) {
        let Some(next) = next else { return };
        if next == self.state {
            return;
        }
        self.state = next;
        if let Some(h) = &self.hovered
            && !self.state.is_visible(h)
        {
            self.hovered = None;
        }
        self.reproject();
    }

    fn reproject(&mut self) {
        self.geometry = viz::project(&self.repo, &self.state, &self.config.layout, &self.config.locale);
    }

    /// Compute the state after `event` without touching `self`.
    /// `Ok(None)` is a no-op (e.g. an empty brush).
    fn next_state(&self, event: &Event) -> Result<Option<ViewState>> {
        let mut next = self.state.clone();
        match event {
            Event::YearWindow { min, max } => {
                if min > max {
                    return Err(ChartError::InvalidRange {
                        min: *min as f64,
                        max: *max as f64,
                    });
                }
                next.year_min = *min;
                next.year_max = *max;
            }
            Event::ValueWindow { min, max } => {
                if !min.is_finite() || !max.is_finite() || min > max {
                    return Err(ChartError::InvalidRange {
                        min: *min,
                        max: *max,
                    });
                }
                next.value_window = Some(ValueWindow {
                    min: *min,
                    max: *max,
                });
            }
            Event::Brush { axis, from, to } => {
                return match self.brush_to_window(*axis, *from, *to) {
                    Some(window) => self.next_state(&window),
                    None => Ok(None),
                };
            }
            Event::ToggleVisible(country) => {
                self.require_country(country)?;
                if !next.visible.remove(country) {
                    next.visible.insert(country.clone());
                }
            }
            Event::TogglePin(country) => {
                self.require_country(country)?;
                if !next.pinned.remove(country) {
                    next.pinned.insert(country.clone());
                }
            }
            Event::Reset => {
                let years = self.config.year_range();
                next.year_min = years.start;
                next.year_max = years.end;
                next.value_window = self
                    .repo
                    .value_extent()
                    .map(viz::widen_degenerate)
                    .map(|(min, max)| ValueWindow { min, max });
                next.pinned.clear();
            }
            Event::Normalize {
                enabled,
                anchor_year,
            } => {
                next.normalize = *enabled;
                next.anchor_year = *anchor_year;
            }
            Event::Hover(_) => return Ok(None),
        }
        Ok(Some(next))
    }

    /// Inverse-map a pixel interval through the current scale into a window
    /// event. `None` when the selection is empty.
    fn brush_to_window(&self, axis: BrushAxis, from: f64, to: f64) -> Option<Event> {
        if !from.is_finite() || !to.is_finite() {
            return None;
        }
        match axis {
            BrushAxis::Year => {
                let x = self.geometry.x_scale();
                let (a, b) = (x.clamp_px(from.min(to)), x.clamp_px(from.max(to)));
                if b - a < MIN_BRUSH_PX {
                    return None;
                }
                Some(Event::YearWindow {
                    min: x.invert(a).round() as i32,
                    max: x.invert(b).round() as i32,
                })
            }
            BrushAxis::Value => {
                let y = self.geometry.y_scale();
                let (a, b) = (y.clamp_px(from.min(to)), y.clamp_px(from.max(to)));
                if b - a < MIN_BRUSH_PX {
                    return None;
                }
                let (v0, v1) = (y.invert(a), y.invert(b));
                Some(Event::ValueWindow {
                    min: v0.min(v1),
                    max: v0.max(v1),
                })
            }
        }
    }
}
