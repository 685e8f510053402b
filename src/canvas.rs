//! Drawing-surface interface and the renderer that keeps a surface in sync
//! with projected geometry.
//!
//! The core only ever writes to a [`Canvas`]; it never reads back. [`Scene`]
//! is a retained in-memory canvas that concrete backends (SVG export, the
//! desktop painter) draw from.

use crate::models::Highlight;
use crate::viz::{AxisOrientation, AxisSpec, RenderGeometry};
use crate::viz_style::{PathStyle, StyleTable};
use std::collections::BTreeMap;

pub trait Canvas {
    fn draw_axis(&mut self, axis: &AxisSpec);
    /// Create or replace the polyline `id`.
    fn draw_path(&mut self, id: &str, points: &[(f64, f64)], style: &PathStyle);
    fn set_style(&mut self, id: &str, style: &PathStyle);
    fn remove_path(&mut self, id: &str);
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScenePath {
    pub points: Vec<(f64, f64)>,
    pub style: PathStyle,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub axes: BTreeMap<AxisOrientation, AxisSpec>,
    pub paths: BTreeMap<String, ScenePath>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn axis(&self, orientation: AxisOrientation) -> Option<&AxisSpec> {
        self.axes.get(&orientation)
    }

    /// Paths with emphasized strokes last, so they paint on top.
    pub fn paint_order(&self) -> Vec<(&str, &ScenePath)> {
        let mut out: Vec<(&str, &ScenePath)> =
            self.paths.iter().map(|(k, v)| (k.as_str(), v)).collect();
        out.sort_by_key(|(_, p)| p.style.is_emphasized());
        out
    }
}

impl Canvas for Scene {
    fn draw_axis(&mut self, axis: &AxisSpec) {
        self.axes.insert(axis.orientation, axis.clone());
    }

    fn draw_path(&mut self, id: &str, points: &[(f64, f64)], style: &PathStyle) {
        self.paths.insert(
            id.to_string(),
            ScenePath {
                points: points.to_vec(),
                style: *style,
            },
        );
    }

    fn set_style(&mut self, id: &str, style: &PathStyle) {
        if let Some(p) = self.paths.get_mut(id) {
            p.style = *style;
        }
    }

    fn remove_path(&mut self, id: &str) {
        self.paths.remove(id);
    }
}

/// Pushes geometry onto a canvas with the fewest calls: new or moved lines
/// are redrawn, restyled lines only get `set_style`, vanished lines are removed.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    drawn: BTreeMap<String, ScenePath>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render<C: Canvas>(
        &mut self,
        canvas: &mut C,
        geometry: &RenderGeometry,
        highlight: &Highlight,
        styles: &StyleTable<'_>,
    ) {
        canvas.draw_axis(&geometry.x_axis);
        canvas.draw_axis(&geometry.y_axis);

        let gone: Vec<String> = self
            .drawn
            .keys()
            .filter(|id| !geometry.paths.contains_key(*id))
            .cloned()
            .collect();
        for id in gone {
            canvas.remove_path(&id);
            self.drawn.remove(&id);
        }

        for (id, points) in &geometry.paths {
            let style = styles.style_for(id, highlight);
            let same_points = self.drawn.get(id).is_some_and(|prev| prev.points == *points);
            if same_points {
                if let Some(prev) = self.drawn.get_mut(id)
                    && prev.style != style
                {
                    canvas.set_style(id, &style);
                    prev.style = style;
                }
            } else {
                canvas.draw_path(id, points, &style);
                self.drawn.insert(
                    id.clone(),
                    ScenePath {
                        points: points.clone(),
                        style,
                    },
                );
            }
        }
    }

    /// Forget what was drawn (e.g. after the target canvas was cleared).
    pub fn invalidate(&mut self) {
        self.drawn.clear();
    }
}

/// Render `geometry` into a fresh [`Scene`].
pub fn scene_for(geometry: &RenderGeometry, highlight: &Highlight, styles: &StyleTable<'_>) -> Scene {
    let mut scene = Scene::new();
    Renderer::new().render(&mut scene, geometry, highlight, styles);
    scene
}
