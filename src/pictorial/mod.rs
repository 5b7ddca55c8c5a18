//! Parts drawn as they look on the bench, for breadboard wiring views.
//!
//! Everything here is laid out on the 0.1" breadboard grid: one
//! [`PINSPACING`] between neighbouring holes, [`INCH`] drawing units per inch.

use crate::{
    draw::{
        shape::{disc, Align, Paint, Shape},
        util::Vec2,
        DrawSpec, Sketch,
    },
    element::{Loc, Symbol},
    error::{Error, Result},
};

pub mod breadboard;
pub mod components;

pub use breadboard::Breadboard;
pub use components::{resistor_bands, BandedResistor, To92};

/// Drawing units per inch.
pub const INCH: f32 = 3.5;
/// Distance between neighbouring breadboard holes.
pub const PINSPACING: f32 = INCH * 0.1;

const PIN_GOLD: &str = "#c9a227";

/// Pin header module: a coloured board with named pins on the hole grid.
#[derive(Clone, Debug)]
pub struct Module {
    pub title: String,
    pub pins: Vec<(String, Vec2)>,
    pub body: (Vec2, Vec2),
    pub fill: String,
    pub decorations: Vec<Shape>,
    pub pin_labels: bool,
}

impl Module {
    pub fn new(title: impl ToString) -> Self {
        Self {
            title: title.to_string(),
            pins: Vec::new(),
            body: (Vec2::ZERO, Vec2::ZERO),
            fill: "#1f5fa8".to_string(),
            decorations: Vec::new(),
            pin_labels: true,
        }
    }

    /// Adds a pin at `(column, row)` pitches from the module origin.
    pub fn pin(mut self, name: impl ToString, column: f32, row: f32) -> Self {
        self.pins.push((name.to_string(), Vec2::new(column, row) * PINSPACING));
        self
    }

    /// A straight row of pins starting at `(column, row)` and stepping by `step` pitches.
    pub fn row<S: ToString>(mut self, names: impl IntoIterator<Item = S>, column: f32, row: f32, step: Vec2) -> Self {
        for (i, name) in names.into_iter().enumerate() {
            let at = Vec2::new(column, row) + step * i as f32;
            self = self.pin(name, at.x, at.y);
        }
        self
    }

    /// Board outline corners, in pitches.
    pub fn body(mut self, min: (f32, f32), max: (f32, f32)) -> Self {
        self.body = (Vec2::from(min) * PINSPACING, Vec2::from(max) * PINSPACING);
        self
    }

    pub fn board_color(mut self, fill: impl ToString) -> Self {
        self.fill = fill.to_string();
        self
    }

    /// Extra artwork drawn over the board, in drawing units.
    pub fn decorate(mut self, shape: Shape) -> Self {
        self.decorations.push(shape);
        self
    }

    pub fn hide_pin_labels(mut self) -> Self {
        self.pin_labels = false;
        self
    }

    /// Four-leg tactile push button straddling the breadboard trench.
    pub fn push_button() -> Self {
        Self::new("")
            .pin("Pin 4", 0.0, 0.0)
            .pin("Pin 3", 2.0, 0.0)
            .pin("Pin 1", 0.0, 3.0)
            .pin("Pin 2", 2.0, 3.0)
            .body((-0.5, -0.25), (2.5, 3.25))
            .board_color("#2b2b2b")
            .decorate(disc(Vec2::new(1.0, 1.5) * PINSPACING, PINSPACING * 0.9, Paint::color("#555")).stroke(Paint::None))
            .hide_pin_labels()
    }

    /// Mechanical rotary encoder, pins `EncoderPinA`, `EncoderPinC`, `EncoderPinB`
    /// with the knob on the +y side.
    pub fn rotary_encoder() -> Self {
        let knob = Vec2::new(0.0, 3.0) * PINSPACING;
        Self::new("")
            .row(["EncoderPinA", "EncoderPinC", "EncoderPinB"], -1.0, 0.0, Vec2::x(1.0))
            .body((-2.0, 1.0), (2.0, 5.0))
            .board_color("#3a3a3a")
            .decorate(disc(knob, PINSPACING * 1.3, Paint::color("#888")).stroke(Paint::None))
            .decorate(Shape::line(knob, knob + Vec2::y(PINSPACING * 1.1)).stroke(Paint::color("#eee")))
            .hide_pin_labels()
    }

    /// 8-pin DIP package: pins 1-4 along the bottom, 5-8 back along the top.
    pub fn dip8(title: impl ToString) -> Self {
        Self::new(title)
            .row(["pin1", "pin2", "pin3", "pin4"], 0.0, 0.0, Vec2::x(1.0))
            .row(["pin5", "pin6", "pin7", "pin8"], 3.0, 3.0, Vec2::x(-1.0))
            .body((-0.5, 0.4), (3.5, 2.6))
            .board_color("#222")
            .decorate(disc(Vec2::new(-0.5, 1.5) * PINSPACING, PINSPACING * 0.3, Paint::color("#eee")).stroke(Paint::None))
            .hide_pin_labels()
    }
}

impl Symbol for Module {
    fn name(&self) -> &'static str {
        "Module"
    }

    fn default_label_loc(&self) -> Loc {
        Loc::Bottom
    }

    fn sketch(&self, spec: &DrawSpec, _span: Vec2) -> Result<Sketch> {
        let (min, max) = self.body;
        let center = (min + max) / 2.0;
        let pad = PINSPACING * 0.25;
        let tiny = PINSPACING * 0.45;

        let mut sketch = Sketch::new();
        sketch.add(Shape::rect(min, max, Paint::color(&self.fill)).stroke(Paint::color("#111")));
        for shape in &self.decorations {
            sketch.add(shape.clone());
        }

        for (name, at) in &self.pins {
            if sketch.anchors.contains_key(name) {
                return Err(Error::DuplicateAnchor { element: self.title.clone(), anchor: name.clone() });
            }
            let half = Vec2::new(pad, pad);
            sketch
                .add(Shape::rect(*at - half, *at + half, Paint::color(PIN_GOLD)).stroke(Paint::color("#111")))
                .anchor(name, *at);

            if self.pin_labels {
                // Labels sit on the board side of each pin.
                let inward = if at.x <= center.x { 1.0 } else { -1.0 };
                let vertical = (max.y - min.y) > (max.x - min.x);
                let above = if at.y <= center.y { 1.0 } else { -1.0 };
                let shift = if vertical {
                    Vec2::x(inward * PINSPACING * 0.9)
                } else {
                    Vec2::y(above * PINSPACING * 0.9)
                };
                // Repeated pins carry an unprinted `_n` suffix.
                let printed = name.split_once('_').map_or(name.as_str(), |(head, _)| head);
                sketch.add(Shape::text(*at + shift, printed, tiny, Align::CENTER).stroke(Paint::color("white")));
            }
        }

        if !self.title.is_empty() {
            sketch.add(Shape::text(center, &self.title, spec.small_font(), Align::CENTER).stroke(Paint::color("white")));
        }
        Ok(sketch)
    }
}

/// Raster artwork placed in the drawing, with named connection points.
///
/// `xy` is where the image's lower-left corner sits in the element's frame.
/// Anchors are given in the same frame. A dashed outline is drawn underneath
/// so the element is visible even when the image cannot be loaded.
#[derive(Clone, Debug)]
pub struct ImageElement {
    pub href: String,
    pub size: Vec2,
    pub xy: Vec2,
    pub anchors: Vec<(String, Vec2)>,
}

impl ImageElement {
    pub fn new(href: impl ToString, width: f32, height: f32) -> Self {
        Self {
            href: href.to_string(),
            size: Vec2::new(width, height),
            xy: Vec2::ZERO,
            anchors: Vec::new(),
        }
    }

    pub fn xy(mut self, xy: impl Into<Vec2>) -> Self {
        self.xy = xy.into();
        self
    }

    pub fn pin(mut self, name: impl ToString, at: impl Into<Vec2>) -> Self {
        self.anchors.push((name.to_string(), at.into()));
        self
    }
}

impl Symbol for ImageElement {
    fn name(&self) -> &'static str {
        "ImageElement"
    }

    fn sketch(&self, _spec: &DrawSpec, _span: Vec2) -> Result<Sketch> {
        let mut sketch = Sketch::new();
        sketch
            .add(Shape::rect(self.xy, self.xy + self.size, Paint::None).stroke(Paint::color("#bbb")).dashed())
            .add(Shape::Image {
                corner: self.xy,
                size: self.size,
                theta: 0.0,
                href: self.href.clone(),
            });
        for (name, at) in &self.anchors {
            sketch.anchor(name, *at);
        }
        Ok(sketch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{draw::Drawing, element::Place};

    #[test]
    fn push_button_straddles_trench() {
        let mut d = Drawing::new(&DrawSpec::default());
        let bb = d.add(Breadboard::new().up()).unwrap();
        let e16 = bb.anchor("E16").unwrap();
        let button = d.add(Module::push_button().at(e16).anchor("Pin 4")).unwrap();
        let f16 = bb.anchor("F16").unwrap();
        let pin1 = button.anchor("Pin 1").unwrap();
        assert!((pin1 - f16).length() < 1e-4, "{pin1:?} vs {f16:?}");
    }

    #[test]
    fn dip8_numbering_runs_anticlockwise() {
        let sketch = Module::dip8("TXS0108E").sketch(&DrawSpec::default(), Vec2::ZERO).unwrap();
        let a = &sketch.anchors;
        assert_eq!(a["pin4"], Vec2::new(3.0, 0.0) * PINSPACING);
        assert_eq!(a["pin5"], Vec2::new(3.0, 3.0) * PINSPACING);
        assert_eq!(a["pin8"], Vec2::new(0.0, 3.0) * PINSPACING);
    }

    #[test]
    fn center_anchor_matches_center_placement() {
        let mut d = Drawing::new(&DrawSpec::default());
        let chip = d.add(Module::dip8("PMW3320DB").at((5.0, 5.0)).anchor("center")).unwrap();
        assert!((chip.anchor("center").unwrap() - Vec2::new(5.0, 5.0)).length() < 1e-5);

        let board = d.add(Breadboard::new().up().at((0.0, 0.0)).anchor("center")).unwrap();
        assert!(board.anchor("center").unwrap().length() < 1e-4);
    }

    #[test]
    fn duplicate_module_pins_are_rejected() {
        let m = Module::new("x").pin("GND", 0.0, 0.0).pin("GND", 1.0, 0.0);
        assert!(m.sketch(&DrawSpec::default(), Vec2::ZERO).is_err());
    }

    #[test]
    fn image_anchors_follow_placement() {
        let mut d = Drawing::new(&DrawSpec::default());
        let image = ImageElement::new("board.png", 4.0, 2.0).xy((-1.0, 0.0)).pin("GND", (0.5, 0.25));
        let placed = d.add(image.at((10.0, 10.0)).anchor("GND")).unwrap();
        assert_eq!(placed.anchor("GND").unwrap(), Vec2::new(10.0, 10.0));
        assert!((placed.bounds.min - Vec2::new(8.5, 9.75)).length() < 1e-5);
        assert!(d.to_svg_string().contains("board.png"));
    }
}
