//! Adapter from a retained [`Scene`] to the plotters crate.
//!
//! Geometry is already in pixel space, so nothing goes through `ChartBuilder`:
//! the scene is drawn straight onto a `DrawingArea` with the plot area offset
//! by the layout margins. Lines are clipped to the plot area here, the legend
//! sits in the right margin.
//!
//! Usage example:
//! ```ignore
//!     let scene = canvas::scene_for(ctl.geometry(), &ctl.highlight(), &StyleTable::new(ctl.repository()));
//!     viz_plotters_adapter::save_svg(&scene, &ctl.config().layout, "GDP growth", "chart.svg")?;
//! ```

use anyhow::{Result, anyhow};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use plotters_svg::SVGBackend;
use std::fs;
use std::path::Path;

use crate::canvas::Scene;
use crate::config::Layout;
use crate::viz::text::fit_to_width;
use crate::viz::util::clip_polyline;
use crate::viz::{AxisOrientation, PlotArea};
use crate::viz_style::{PathStyle, Rgb8};

const TICK_PX: i32 = 6;
const LABEL_FONT_PX: u32 = 12;
const GRID: RGBColor = RGBColor(230, 230, 230);

pub fn rgb_color(c: Rgb8) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

/// Build a ShapeStyle for line strokes. Plotters strokes are whole pixels.
pub fn line_style(style: &PathStyle) -> ShapeStyle {
    rgb_color(style.color).stroke_width(style.width.ceil().max(1.0) as u32)
}

/// Render the scene to an SVG document.
pub fn render_svg(scene: &Scene, layout: &Layout, title: &str) -> Result<String> {
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, (layout.width, layout.height)).into_drawing_area();
        draw_scene(&root, scene, layout, title)?;
        root.present().map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(buf)
}

/// Render the scene and write it to `path`.
pub fn save_svg<P: AsRef<Path>>(scene: &Scene, layout: &Layout, title: &str, path: P) -> Result<()> {
    let svg = render_svg(scene, layout, title)?;
    fs::write(path, svg)?;
    Ok(())
}

/// Helper that draws to any Plotters backend.
fn draw_scene<DB>(root: &DrawingArea<DB, Shift>, scene: &Scene, layout: &Layout, title: &str) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

    let plot = PlotArea::from(layout);
    let (ox, oy) = (plot.left.round() as i32, plot.top.round() as i32);
    let (w, h) = (plot.width.round() as i32, plot.height.round() as i32);
    let to_px = |(x, y): (f64, f64)| (ox + x.round() as i32, oy + y.round() as i32);

    let font = |px: u32| ("sans-serif", px).into_font();

    root.draw(&Text::new(
        title.to_string(),
        (layout.width as i32 / 2, 14),
        font(20).color(&BLACK).pos(Pos::new(HPos::Center, VPos::Top)),
    ))
    .map_err(|e| anyhow!("{:?}", e))?;

    // Grid first so axes and lines paint over it.
    if let Some(axis) = scene.axis(AxisOrientation::Left) {
        for t in &axis.ticks {
            let y = oy + t.position.round() as i32;
            root.draw(&PathElement::new(vec![(ox, y), (ox + w, y)], GRID.stroke_width(1)))
                .map_err(|e| anyhow!("{:?}", e))?;
        }
    }

    if let Some(axis) = scene.axis(AxisOrientation::Bottom) {
        root.draw(&PathElement::new(
            vec![(ox, oy + h), (ox + w, oy + h)],
            BLACK.stroke_width(1),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
        for t in &axis.ticks {
            let x = ox + t.position.round() as i32;
            root.draw(&PathElement::new(
                vec![(x, oy + h), (x, oy + h + TICK_PX)],
                BLACK.stroke_width(1),
            ))
            .map_err(|e| anyhow!("{:?}", e))?;
            root.draw(&Text::new(
                t.label.clone(),
                (x, oy + h + TICK_PX + 2),
                font(LABEL_FONT_PX).color(&BLACK).pos(Pos::new(HPos::Center, VPos::Top)),
            ))
            .map_err(|e| anyhow!("{:?}", e))?;
        }
        root.draw(&Text::new(
            "Year".to_string(),
            (ox + w / 2, oy + h + 36),
            font(14).color(&BLACK).pos(Pos::new(HPos::Center, VPos::Top)),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
    }

    if let Some(axis) = scene.axis(AxisOrientation::Left) {
        root.draw(&PathElement::new(vec![(ox, oy), (ox, oy + h)], BLACK.stroke_width(1)))
            .map_err(|e| anyhow!("{:?}", e))?;
        for t in &axis.ticks {
            let y = oy + t.position.round() as i32;
            root.draw(&PathElement::new(
                vec![(ox - TICK_PX, y), (ox, y)],
                BLACK.stroke_width(1),
            ))
            .map_err(|e| anyhow!("{:?}", e))?;
            root.draw(&Text::new(
                t.label.clone(),
                (ox - TICK_PX - 3, y),
                font(LABEL_FONT_PX).color(&BLACK).pos(Pos::new(HPos::Right, VPos::Center)),
            ))
            .map_err(|e| anyhow!("{:?}", e))?;
        }
        root.draw(&Text::new(
            "GDP growth (annual %)".to_string(),
            ((ox - 64).max(12), oy + h / 2),
            font(14)
                .transform(FontTransform::Rotate270)
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Center)),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
    }

    for (_id, path) in scene.paint_order() {
        for run in clip_polyline(&path.points, plot.width, plot.height) {
            let pts: Vec<(i32, i32)> = run.into_iter().map(to_px).collect();
            root.draw(&PathElement::new(pts, line_style(&path.style)))
                .map_err(|e| anyhow!("{:?}", e))?;
        }
    }

    // Legend in the right margin, one row per drawn line.
    let legend_x = ox + w + 16;
    let label_room = (layout.margin.right as i32 - 16 - 24 - 8 - 4).max(0) as u32;
    for (row, (id, path)) in scene.paths.iter().enumerate() {
        let y = oy + 8 + row as i32 * 20;
        root.draw(&PathElement::new(
            vec![(legend_x, y), (legend_x + 24, y)],
            line_style(&path.style),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
        root.draw(&Text::new(
            fit_to_width(id, LABEL_FONT_PX, label_room),
            (legend_x + 32, y),
            font(LABEL_FONT_PX).color(&BLACK).pos(Pos::new(HPos::Left, VPos::Center)),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
    }

    Ok(())
}
