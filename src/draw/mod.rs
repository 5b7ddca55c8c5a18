use std::{collections::BTreeMap, fs, path::Path};

use serde::Deserialize;
use svg::{node::element::Group, Document};
use tracing::{debug, info};

use crate::{
    element::{Element, Placement, Symbol},
    error::{Error, Result},
};

pub mod shape;
pub mod util;

use shape::Shape;
use util::{Bounds, Transform, Vec2};

/// Style shared by every element of a drawing. Lengths are in drawing units
/// except `scale` (pixels per unit) and `stroke_width` (pixels).
#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(default)]
pub struct DrawSpec {
    pub unit: f32,
    pub scale: f32,
    pub stroke_width: f32,
    pub font_size: f32,
    pub font_family: String,
    pub char_width: f32,
    pub margin: f32,
    pub dot_radius: f32,
    pub color: String,
    pub background: Option<String>,
}

impl Default for DrawSpec {
    fn default() -> Self {
        Self {
            unit: 3.0,
            scale: 40.0,
            stroke_width: 2.0,
            font_size: 0.4,
            font_family: "sans-serif".to_string(),
            char_width: 0.55,
            margin: 0.3,
            dot_radius: 0.075,
            color: "black".to_string(),
            background: None,
        }
    }
}

impl DrawSpec {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn small_font(&self) -> f32 {
        self.font_size * 0.75
    }
}

/// Local geometry of one element before placement.
#[derive(Clone, Debug, Default)]
pub struct Sketch {
    pub shapes: Vec<Shape>,
    pub anchors: BTreeMap<String, Vec2>,
    pub start: Vec2,
    pub end: Vec2,
    pub drop: Option<Vec2>,
}

impl Sketch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn span(start: Vec2, end: Vec2) -> Self {
        Self { start, end, ..Self::default() }
    }

    pub fn add(&mut self, shape: Shape) -> &mut Self {
        self.shapes.push(shape);
        self
    }

    pub fn anchor(&mut self, name: impl ToString, point: Vec2) -> &mut Self {
        self.anchors.insert(name.to_string(), point);
        self
    }

    /// Bounds of everything but text, used to place labels around the body.
    pub fn body_bounds(&self, spec: &DrawSpec) -> Bounds {
        let mut bounds = Bounds::closed_at(self.start);
        bounds.include(self.end);
        self.shapes.iter()
            .filter(|s| !s.is_text())
            .filter_map(|s| s.bounds(spec))
            .for_each(|b| bounds.expand(b));
        bounds
    }
}

/// Absolute positions of a placed element.
#[derive(Clone, Debug)]
pub struct Placed {
    pub name: String,
    pub start: Vec2,
    pub end: Vec2,
    pub bounds: Bounds,
    pub transform: Transform,
    anchors: BTreeMap<String, Vec2>,
}

impl Placed {
    pub fn anchor(&self, name: &str) -> Result<Vec2> {
        self.anchors.get(name)
            .copied()
            .ok_or_else(|| Error::unknown_anchor(&self.name, name))
    }

    pub fn anchors(&self) -> impl Iterator<Item = (&str, Vec2)> {
        self.anchors.iter().map(|(name, p)| (name.as_str(), *p))
    }

    pub fn center(&self) -> Vec2 {
        self.bounds.center()
    }

    pub fn width(&self) -> f32 {
        self.bounds.width()
    }

    pub fn height(&self) -> f32 {
        self.bounds.height()
    }
}

/// Canvas that elements are added to one after another.
pub struct Drawing {
    spec: DrawSpec,
    here: Vec2,
    theta: f32,
    layers: Vec<(String, Vec<Shape>)>,
    bounds: Option<Bounds>,
}

impl Drawing {
    pub fn new(spec: &DrawSpec) -> Self {
        Self {
            spec: spec.clone(),
            here: Vec2::ZERO,
            theta: 0.0,
            layers: Vec::new(),
            bounds: None,
        }
    }

    pub fn spec(&self) -> &DrawSpec {
        &self.spec
    }

    pub fn unit(&self) -> f32 {
        self.spec.unit
    }

    pub fn here(&self) -> Vec2 {
        self.here
    }

    pub fn theta(&self) -> f32 {
        self.theta
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds.unwrap_or_else(|| Bounds::closed_at(Vec2::ZERO))
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn add(&mut self, element: impl Into<Element>) -> Result<Placed> {
        let element = element.into();
        let name = element.kind.name().to_string();
        let resolved = element.resolve(&self.spec, self.here, self.theta)?;

        let t = &resolved.transform;
        let body_center = t.apply(resolved.sketch.body_bounds(&self.spec).center());

        let mut shapes = resolved.sketch.shapes;
        let mut bounds: Option<Bounds> = None;
        for shape in shapes.iter_mut() {
            shape.transform(&resolved.transform);
            if let Some(b) = shape.bounds(&self.spec) {
                bounds.get_or_insert(b).expand(b);
            }
        }

        let start = t.apply(resolved.sketch.start);
        let end = t.apply(resolved.sketch.end);
        let bounds = bounds.unwrap_or_else(|| Bounds::closed_at(start));

        let mut anchors: BTreeMap<String, Vec2> = resolved.sketch.anchors.iter()
            .map(|(name, p)| (name.clone(), t.apply(*p)))
            .collect();
        anchors.entry("start".to_string()).or_insert(start);
        anchors.entry("end".to_string()).or_insert(end);
        anchors.entry("center".to_string()).or_insert(body_center);

        match element.kind.placement() {
            Placement::Linear => {
                self.here = end;
                self.theta = t.theta;
            }
            Placement::Routed => self.here = end,
            Placement::Fixed => {
                if let Some(drop) = resolved.sketch.drop {
                    self.here = t.apply(drop);
                }
            }
        }

        self.bounds.get_or_insert(bounds).expand(bounds);
        debug!(element = %name, ?start, ?end, "placed");
        self.layers.push((name.clone(), shapes));

        Ok(Placed {
            name,
            start,
            end,
            bounds,
            transform: resolved.transform,
            anchors,
        })
    }

    /// Every text string drawn so far, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.layers.iter()
            .flat_map(|(_, shapes)| shapes.iter())
            .filter_map(|shape| match shape {
                Shape::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
    }

    /// Grows the image to include `point` without drawing anything there.
    pub fn reserve(&mut self, point: Vec2) {
        self.bounds.get_or_insert(Bounds::closed_at(point)).include(point);
    }

    pub fn to_document(&self) -> Document {
        let s = self.spec.scale;
        let bounds = self.bounds().padded(self.spec.margin);
        let (x, y, w, h) = bounds.svg_viewbox();
        // Drawing y grows upward, SVG y grows downward.
        let viewbox = (x * s, -(y + h) * s, w * s, h * s);

        let mut document = Document::new()
            .set("viewBox", format!("{} {} {} {}", viewbox.0, viewbox.1, viewbox.2, viewbox.3))
            .set("width", viewbox.2)
            .set("height", viewbox.3);

        if let Some(background) = &self.spec.background {
            document = document.add(
                svg::node::element::Rectangle::new()
                    .set("x", viewbox.0)
                    .set("y", viewbox.1)
                    .set("width", viewbox.2)
                    .set("height", viewbox.3)
                    .set("fill", background.clone()),
            );
        }

        self.layers.iter()
            .map(|(name, shapes)| {
                shapes.iter()
                    .fold(Group::new().set("class", name.clone()), |g, shape| shape.draw_into(&self.spec, g))
            })
            .fold(document, Document::add)
    }

    pub fn to_svg_string(&self) -> String {
        self.to_document().to_string()
    }

    #[tracing::instrument(skip(self), fields(elements = self.layers.len()))]
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        svg::save(path, &self.to_document())?;
        info!(path = %path.display(), "saved drawing");
        Ok(())
    }
}
