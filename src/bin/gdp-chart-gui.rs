/*!
 * Desktop viewer for gdp-chart - interactive GDP growth line chart
 *
 * A cross-platform desktop application providing:
 * - Year/value window sliders and brush selection on the plot
 * - Per-country visibility and pin toggles
 * - Hover inspection with tooltips and normalization to an anchor year
 * - SVG export of the current view
 *
 * Platform support: Windows, macOS, Linux
 */

use eframe::egui;
use gdp_chart::canvas::{Renderer, Scene, scene_for};
use gdp_chart::config::ChartConfig;
use gdp_chart::viz::text::block_width_px;
use gdp_chart::viz::{AxisOrientation, PlotArea};
use gdp_chart::viz_style::{Rgb8, StyleTable};
use gdp_chart::{BrushAxis, Controller, Event, viz_plotters_adapter};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

/// Pointer distance (px) within which a line counts as hovered.
const HIT_TOLERANCE_PX: f64 = 6.0;
const TOOLTIP_FONT_PX: u32 = 13;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let config = ChartConfig::load_or_default(None).unwrap_or_else(|e| {
        log::warn!("ignoring config: {e}");
        ChartConfig::default()
    });
    let initial_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| config.data_path.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 620.0])
            .with_min_inner_size([700.0, 420.0])
            .with_title("GDP growth - gdp-chart"),
        ..Default::default()
    };

    eframe::run_native(
        "GDP growth chart",
        options,
        Box::new(move |_cc| {
            let mut app = ChartApp::new(config);
            if let Some(path) = initial_path {
                app.start_load(path);
            }
            Ok(Box::new(app))
        }),
    )
}

#[derive(Debug)]
enum LoadResult {
    Loaded(Box<Controller>),
    Error(String),
}

/// Main application state
struct ChartApp {
    config: ChartConfig,
    chart: Option<Controller>,
    scene: Scene,
    renderer: Renderer,

    // Widget mirrors of the view state, refreshed every frame
    year_min: i32,
    year_max: i32,
    value_min: f64,
    value_max: f64,
    normalize: bool,
    anchor_year: i32,

    // Pointer state
    last_pointer: Option<egui::Pos2>,
    brush: Option<(egui::Pos2, egui::Pos2)>,

    // UI state
    is_loading: bool,
    status_message: String,
    error_message: String,
    hint: String,

    // Background load
    load_receiver: Option<mpsc::Receiver<LoadResult>>,
}

impl ChartApp {
    fn new(config: ChartConfig) -> Self {
        Self {
            year_min: config.year_start,
            year_max: config.year_end,
            anchor_year: config.year_start,
            config,
            chart: None,
            scene: Scene::new(),
            renderer: Renderer::new(),
            value_min: -1.0,
            value_max: 1.0,
            normalize: false,
            last_pointer: None,
            brush: None,
            is_loading: false,
            status_message: String::new(),
            error_message: String::new(),
            hint: String::new(),
            load_receiver: None,
        }
    }

    /// Load and build the repository off the UI thread; the controller is
    /// attached only once loading has finished.
    fn start_load(&mut self, path: PathBuf) {
        let mut config = self.config.clone();
        config.data_path = Some(path.clone());

        self.is_loading = true;
        self.error_message.clear();
        self.status_message = format!("Loading {}...", path.display());

        let (sender, receiver) = mpsc::channel();
        self.load_receiver = Some(receiver);

        thread::spawn(move || {
            let result = match Controller::load(config) {
                Ok(chart) => LoadResult::Loaded(Box::new(chart)),
                Err(err) => LoadResult::Error(format!("Failed to load data: {}", err)),
            };
            let _ = sender.send(result);
        });
    }

    fn check_load_result(&mut self) {
        if let Some(receiver) = &self.load_receiver
            && let Ok(result) = receiver.try_recv()
        {
            self.is_loading = false;
            self.load_receiver = None;

            match result {
                LoadResult::Loaded(chart) => {
                    self.status_message = format!(
                        "Loaded {} of {} countries",
                        chart.repository().len(),
                        chart.config().countries.len()
                    );
                    self.config = chart.config().clone();
                    self.chart = Some(*chart);
                    self.scene = Scene::new();
                    self.renderer.invalidate();
                    self.hint.clear();
                }
                LoadResult::Error(error) => {
                    self.error_message = error;
                    self.status_message.clear();
                }
            }
        }
    }

    fn sync_widgets(&mut self) {
        if let Some(chart) = &self.chart {
            let s = chart.view_state();
            self.year_min = s.year_min;
            self.year_max = s.year_max;
            let (lo, hi) = chart.geometry().y_domain;
            self.value_min = lo;
            self.value_max = hi;
            self.normalize = s.normalize;
            self.anchor_year = s.anchor_year;
        }
    }

    fn export_svg(&mut self) {
        let Some(chart) = &self.chart else { return };
        let Some(path) = rfd::FileDialog::new()
            .add_filter("SVG", &["svg"])
            .set_file_name("gdp_growth.svg")
            .save_file()
        else {
            return;
        };
        let scene = scene_for(
            chart.geometry(),
            &chart.highlight(),
            &StyleTable::new(chart.repository()),
        );
        match viz_plotters_adapter::save_svg(&scene, &chart.config().layout, "GDP growth", &path) {
            Ok(()) => self.status_message = format!("Wrote {}", path.display()),
            Err(err) => self.error_message = format!("Failed to export chart: {}", err),
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui, events: &mut Vec<Event>) {
        ui.heading("GDP growth (annual %)");
        ui.add_space(6.0);

        ui.horizontal(|ui| {
            if ui
                .add_enabled(!self.is_loading, egui::Button::new("Open CSV..."))
                .clicked()
                && let Some(path) = rfd::FileDialog::new().add_filter("CSV", &["csv"]).pick_file()
            {
                self.start_load(path);
            }
            if ui
                .add_enabled(self.chart.is_some(), egui::Button::new("Export SVG..."))
                .clicked()
            {
                self.export_svg();
            }
            if self.is_loading {
                ui.spinner();
            }
        });

        if !self.status_message.is_empty() {
            ui.colored_label(egui::Color32::DARK_GREEN, &self.status_message);
        }
        if !self.error_message.is_empty() {
            ui.colored_label(egui::Color32::RED, &self.error_message);
        }

        let Some(chart) = self.chart.as_ref() else {
            return;
        };
        let (y0, y1) = (chart.config().year_start, chart.config().year_end);
        ui.add_space(10.0);

        ui.group(|ui| {
            ui.label("Year window");
            let a = ui.add(egui::Slider::new(&mut self.year_min, y0..=y1).text("from"));
            let b = ui.add(egui::Slider::new(&mut self.year_max, y0..=y1).text("to"));
            if a.changed() || b.changed() {
                events.push(Event::YearWindow {
                    min: self.year_min,
                    max: self.year_max,
                });
            }
        });

        let m = chart
            .repository()
            .value_extent()
            .map(|(lo, hi)| (lo.abs().max(hi.abs()) * 2.0).ceil())
            .unwrap_or(1.0)
            .max(1.0);
        ui.group(|ui| {
            ui.label("Value window (%)");
            let a = ui.add(
                egui::Slider::new(&mut self.value_min, -m..=m)
                    .text("min")
                    .fixed_decimals(1),
            );
            let b = ui.add(
                egui::Slider::new(&mut self.value_max, -m..=m)
                    .text("max")
                    .fixed_decimals(1),
            );
            if a.changed() || b.changed() {
                events.push(Event::ValueWindow {
                    min: self.value_min,
                    max: self.value_max,
                });
            }
        });

        ui.group(|ui| {
            let toggled = ui
                .checkbox(&mut self.normalize, "Rebase to anchor year")
                .changed();
            if toggled && self.normalize {
                self.anchor_year = self.year_min;
            }
            let mut changed = toggled;
            ui.horizontal(|ui| {
                ui.label("Anchor:");
                changed |= ui
                    .add(egui::DragValue::new(&mut self.anchor_year).range(y0..=y1))
                    .changed();
                if ui.button("Window start").clicked() {
                    self.anchor_year = self.year_min;
                    changed = true;
                }
            });
            if changed {
                events.push(Event::Normalize {
                    enabled: self.normalize,
                    anchor_year: self.anchor_year,
                });
            }
        });

        ui.group(|ui| {
            ui.label("Countries");
            let styles = StyleTable::new(chart.repository());
            let state = chart.view_state();
            for country in chart.repository().countries() {
                ui.horizontal(|ui| {
                    let (rect, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
                    ui.painter().rect_filled(rect, 2.0, to_color32(styles.base_color(country)));
                    let mut visible = state.is_visible(country);
                    if ui.checkbox(&mut visible, country.as_str()).changed() {
                        events.push(Event::ToggleVisible(country.clone()));
                    }
                    if ui
                        .selectable_label(state.is_pinned(country), "pin")
                        .on_hover_text("Keep this line highlighted")
                        .clicked()
                    {
                        events.push(Event::TogglePin(country.clone()));
                    }
                });
            }
        });

        ui.add_space(8.0);
        if ui
            .button("Reset")
            .on_hover_text("Full year range, full data value range, no pins")
            .clicked()
        {
            events.push(Event::Reset);
        }

        if !self.hint.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(egui::Color32::from_rgb(180, 90, 0), &self.hint);
        }

        ui.add_space(10.0);
        ui.small("Drag: select years - Shift+drag: select values - Click: pin");
    }

    fn plot_panel(&mut self, ui: &mut egui::Ui, events: &mut Vec<Event>) {
        let Some(chart) = self.chart.as_mut() else {
            ui.centered_and_justified(|ui| {
                ui.label(if self.is_loading {
                    "Loading data..."
                } else {
                    "Open a CSV file to start"
                });
            });
            return;
        };

        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let rect = response.rect;
        let layout = chart
            .config()
            .layout
            .with_size(rect.width().max(1.0) as u32, rect.height().max(1.0) as u32);
        if layout.plot_width() < 10.0 || layout.plot_height() < 10.0 {
            return;
        }
        chart.set_layout(layout);
        let origin = rect.min + egui::vec2(layout.margin.left as f32, layout.margin.top as f32);
        let to_local = |p: egui::Pos2| ((p.x - origin.x) as f64, (p.y - origin.y) as f64);

        // Only hit-test when the pointer actually moved.
        let pointer = response.hover_pos();
        if pointer != self.last_pointer {
            self.last_pointer = pointer;
            let target = pointer.and_then(|p| {
                let (x, y) = to_local(p);
                let geometry = chart.geometry();
                if !geometry.plot.contains(x, y) {
                    return None;
                }
                geometry.hit_test(x, y, HIT_TOLERANCE_PX).map(str::to_string)
            });
            if target.as_deref() != chart.hovered() {
                events.push(Event::Hover(target));
            }
        }

        if response.clicked()
            && let Some(c) = chart.hovered()
        {
            events.push(Event::TogglePin(c.to_string()));
        }

        if response.drag_started() {
            self.brush = response.interact_pointer_pos().map(|p| (p, p));
        }
        if response.dragged()
            && let (Some((start, _)), Some(p)) = (self.brush, response.interact_pointer_pos())
        {
            self.brush = Some((start, p));
        }
        if response.drag_stopped()
            && let Some((start, end)) = self.brush.take()
        {
            let shift = ui.input(|i| i.modifiers.shift);
            let (a, b) = (to_local(start), to_local(end));
            events.push(if shift {
                Event::Brush {
                    axis: BrushAxis::Value,
                    from: a.1,
                    to: b.1,
                }
            } else {
                Event::Brush {
                    axis: BrushAxis::Year,
                    from: a.0,
                    to: b.0,
                }
            });
        }

        for event in events.drain(..) {
            let is_hover = matches!(event, Event::Hover(_));
            match chart.dispatch(event) {
                Ok(_) if !is_hover => self.hint.clear(),
                Ok(_) => {}
                Err(err) => self.hint = err.to_string(),
            }
        }

        let highlight = chart.highlight();
        self.renderer.render(
            &mut self.scene,
            chart.geometry(),
            &highlight,
            &StyleTable::new(chart.repository()),
        );

        let plot = chart.geometry().plot;
        paint_scene(&painter, &self.scene, origin, plot);

        if let Some((start, end)) = self.brush {
            let shift = ui.input(|i| i.modifiers.shift);
            let top = origin.y;
            let bottom = origin.y + plot.height as f32;
            let band = if shift {
                egui::Rect::from_x_y_ranges(
                    origin.x..=origin.x + plot.width as f32,
                    start.y.min(end.y)..=start.y.max(end.y),
                )
            } else {
                egui::Rect::from_x_y_ranges(start.x.min(end.x)..=start.x.max(end.x), top..=bottom)
            };
            painter.rect_filled(band, 0.0, egui::Color32::from_rgba_unmultiplied(68, 114, 196, 40));
        }

        if let Some(p) = pointer
            && let Some(tip) = chart.tooltip(to_local(p).0)
        {
            let flip = to_local(p).0 + block_width_px(&tip.text, TOOLTIP_FONT_PX) as f64 + 24.0 > plot.width;
            paint_tooltip(&painter, p, &tip.text, flip);
        }
    }
}

fn to_color32(c: Rgb8) -> egui::Color32 {
    egui::Color32::from_rgb(c.r, c.g, c.b)
}

/// Paint the retained scene with egui's painter; lines are clipped to the plot area.
fn paint_scene(painter: &egui::Painter, scene: &Scene, origin: egui::Pos2, plot: PlotArea) {
    let at = |x: f64, y: f64| egui::pos2(origin.x + x as f32, origin.y + y as f32);
    let axis_stroke = egui::Stroke::new(1.0, egui::Color32::DARK_GRAY);
    let grid_stroke = egui::Stroke::new(1.0, egui::Color32::from_gray(230));
    let font = egui::FontId::proportional(12.0);

    if let Some(axis) = scene.axis(AxisOrientation::Left) {
        for t in &axis.ticks {
            painter.line_segment([at(0.0, t.position), at(plot.width, t.position)], grid_stroke);
            painter.line_segment([at(-6.0, t.position), at(0.0, t.position)], axis_stroke);
            painter.text(
                at(-9.0, t.position),
                egui::Align2::RIGHT_CENTER,
                &t.label,
                font.clone(),
                egui::Color32::DARK_GRAY,
            );
        }
        painter.line_segment([at(0.0, 0.0), at(0.0, plot.height)], axis_stroke);
    }

    if let Some(axis) = scene.axis(AxisOrientation::Bottom) {
        for t in &axis.ticks {
            painter.line_segment(
                [at(t.position, plot.height), at(t.position, plot.height + 6.0)],
                axis_stroke,
            );
            painter.text(
                at(t.position, plot.height + 8.0),
                egui::Align2::CENTER_TOP,
                &t.label,
                font.clone(),
                egui::Color32::DARK_GRAY,
            );
        }
        painter.line_segment([at(0.0, plot.height), at(plot.width, plot.height)], axis_stroke);
    }

    let clip = painter.with_clip_rect(egui::Rect::from_min_size(
        origin,
        egui::vec2(plot.width as f32, plot.height as f32),
    ));
    for (_id, path) in scene.paint_order() {
        let color = to_color32(path.style.color);
        let pts: Vec<egui::Pos2> = path.points.iter().map(|&(x, y)| at(x, y)).collect();
        match pts.len() {
            0 => {}
            1 => {
                clip.circle_filled(pts[0], path.style.width * 1.5, color);
            }
            _ => {
                clip.add(egui::Shape::line(pts, egui::Stroke::new(path.style.width, color)));
            }
        }
    }
}

/// Tooltip box above the pointer; `flip` puts it on the pointer's left.
fn paint_tooltip(painter: &egui::Painter, pointer: egui::Pos2, text: &str, flip: bool) {
    let galley = painter.layout_no_wrap(
        text.to_string(),
        egui::FontId::proportional(TOOLTIP_FONT_PX as f32),
        egui::Color32::BLACK,
    );
    let size = galley.size() + egui::vec2(10.0, 8.0);
    let dx = if flip { -size.x - 12.0 } else { 12.0 };
    let rect = egui::Rect::from_min_size(pointer + egui::vec2(dx, -size.y - 6.0), size);
    painter.rect_filled(rect, 4.0, egui::Color32::from_rgba_unmultiplied(255, 255, 255, 235));
    painter.rect_stroke(rect, 4.0, egui::Stroke::new(1.0, egui::Color32::GRAY));
    painter.galley(rect.min + egui::vec2(5.0, 4.0), galley, egui::Color32::BLACK);
}

impl eframe::App for ChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for a finished background load
        self.check_load_result();
        self.sync_widgets();

        // Request repaint while loading (for spinner animation)
        if self.is_loading {
            ctx.request_repaint();
        }

        let mut events = Vec::new();
        egui::SidePanel::left("controls")
            .resizable(false)
            .default_width(280.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| self.controls(ui, &mut events));
            });
        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(egui::Color32::WHITE))
            .show(ctx, |ui| self.plot_panel(ui, &mut events));
    }
}
