//! Circuit elements and the chainable placement builder shared by all of them.
//!
//! Every symbol draws itself in a local frame facing +x. Linear (two-terminal)
//! symbols run from the origin to `(length, 0)`; routed symbols receive the
//! offset between their endpoints; fixed symbols are placed by one of their
//! anchors. [`Drawing::add`](crate::draw::Drawing::add) resolves the frame.

use enum_dispatch::enum_dispatch;

use crate::{
    draw::{
        shape::{Align, HAlign, Paint, Shape, VAlign},
        util::{Transform, Vec2},
        DrawSpec, Sketch,
    },
    error::{Error, Result},
    logic::TimingDiagram,
    pictorial::{BandedResistor, Breadboard, ImageElement, Module, To92},
};

pub mod ic;
pub mod misc;
pub mod two_term;
pub mod wire;

use ic::Ic;
use misc::{BjtNpn, Dot, Ground};
use two_term::{Battery, Button, Lamp, Line, Resistor, Switch};
use wire::Wire;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Body placed by an anchor; keeps the drawing direction.
    Fixed,
    /// Two-terminal element stretched along the drawing direction.
    Linear,
    /// Path between two absolute points.
    Routed,
}

#[enum_dispatch]
pub trait Symbol {
    fn name(&self) -> &'static str;

    fn placement(&self) -> Placement {
        Placement::Fixed
    }

    fn default_label_loc(&self) -> Loc {
        Loc::Top
    }

    /// Local geometry. `span` is `(length, 0)` for linear symbols, the
    /// endpoint offset for routed ones and zero for fixed ones.
    fn sketch(&self, spec: &DrawSpec, span: Vec2) -> Result<Sketch>;
}

#[enum_dispatch(Symbol)]
#[derive(Clone, Debug)]
pub enum Kind {
    Line,
    Resistor,
    Button,
    Switch,
    Battery,
    Lamp,
    Wire,
    Dot,
    Ground,
    BjtNpn,
    Ic,
    Breadboard,
    BandedResistor,
    To92,
    Module,
    ImageElement,
    TimingDiagram,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Loc {
    Top,
    Bottom,
    Left,
    Right,
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Offset {
    /// Distance away from the body, negative pulls the label in.
    Away(f32),
    /// Offset in the element's local frame.
    By(Vec2),
}

impl From<f32> for Offset {
    fn from(distance: f32) -> Self {
        Offset::Away(distance)
    }
}

impl From<Vec2> for Offset {
    fn from(v: Vec2) -> Self {
        Offset::By(v)
    }
}

impl From<(f32, f32)> for Offset {
    fn from(v: (f32, f32)) -> Self {
        Offset::By(v.into())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub parts: Vec<String>,
    pub loc: Option<Loc>,
    pub ofst: Offset,
}

#[derive(Clone, Debug)]
pub struct Element {
    pub kind: Kind,
    at: Option<Vec2>,
    anchor: Option<String>,
    theta: Option<f32>,
    length: Option<f32>,
    to: Option<Vec2>,
    tox: Option<f32>,
    toy: Option<f32>,
    reverse: bool,
    flip: bool,
    color: Option<Paint>,
    fill: Option<Paint>,
    labels: Vec<Label>,
    dot_start: bool,
    dot_end: bool,
}

impl Element {
    pub fn new(kind: impl Into<Kind>) -> Self {
        Self {
            kind: kind.into(),
            at: None,
            anchor: None,
            theta: None,
            length: None,
            to: None,
            tox: None,
            toy: None,
            reverse: false,
            flip: false,
            color: None,
            fill: None,
            labels: Vec::new(),
            dot_start: false,
            dot_end: false,
        }
    }

    pub(crate) fn resolve(&self, spec: &DrawSpec, here: Vec2, theta: f32) -> Result<Resolved> {
        let origin = self.at.unwrap_or(here);

        let (mut sketch, theta) = match self.kind.placement() {
            Placement::Linear => {
                let (theta, length) = self.linear_extent(spec, origin, theta);
                (self.kind.sketch(spec, Vec2::x(length))?, theta)
            }
            Placement::Routed => {
                let to = self.to.ok_or_else(|| Error::MissingTarget {
                    element: self.kind.name().to_string(),
                })?;
                (self.kind.sketch(spec, to - origin)?, 0.0)
            }
            Placement::Fixed => (self.kind.sketch(spec, Vec2::ZERO)?, self.theta.unwrap_or(0.0)),
        };

        if self.reverse {
            let mid = (sketch.start.x + sketch.end.x) / 2.0;
            let linear = self.kind.placement() != Placement::Fixed;
            mirror(&mut sketch, linear, |p| Vec2::new(2.0 * mid - p.x, p.y));
        }
        if self.flip {
            mirror(&mut sketch, false, |p| Vec2::new(p.x, -p.y));
        }

        self.add_labels(spec, &mut sketch, theta);
        self.add_dots(spec, &mut sketch);
        self.apply_paint(&mut sketch);

        let local = match (&self.anchor, self.kind.placement()) {
            (_, Placement::Routed) => sketch.start,
            (Some(name), _) => local_anchor(&sketch, spec, self.kind.name(), name)?,
            (None, _) => sketch.start,
        };

        Ok(Resolved {
            transform: Transform::aligning(theta, local, origin),
            sketch,
        })
    }

    fn linear_extent(&self, spec: &DrawSpec, origin: Vec2, theta: f32) -> (f32, f32) {
        let theta = self.theta.unwrap_or(theta);

        // `tox`/`toy` pin one coordinate of the end and keep the other.
        let target = self.to
            .or_else(|| self.tox.map(|x| Vec2::new(x, origin.y)))
            .or_else(|| self.toy.map(|y| Vec2::new(origin.x, y)));

        match target.map(|to| to - origin) {
            Some(delta) if delta.length() > 1e-6 => (delta.angle(), delta.length()),
            Some(_) => (theta, 0.0),
            None => (theta, self.length.unwrap_or(spec.unit)),
        }
    }

    fn add_labels(&self, spec: &DrawSpec, sketch: &mut Sketch, theta: f32) {
        if self.labels.is_empty() {
            return;
        }

        let body = sketch.body_bounds(spec);
        let gap = spec.font_size * 0.25;

        for label in &self.labels {
            let loc = label.loc.unwrap_or_else(|| self.kind.default_label_loc());
            let (dir, from, to) = match loc {
                Loc::Top => (Vec2::y(1.0), Vec2::new(body.min.x, body.max.y + gap), Vec2::new(body.max.x, body.max.y + gap)),
                Loc::Bottom => (Vec2::y(-1.0), Vec2::new(body.min.x, body.min.y - gap), Vec2::new(body.max.x, body.min.y - gap)),
                Loc::Left => (Vec2::x(-1.0), Vec2::new(body.min.x - gap, body.min.y), Vec2::new(body.min.x - gap, body.max.y)),
                Loc::Right => (Vec2::x(1.0), Vec2::new(body.max.x + gap, body.min.y), Vec2::new(body.max.x + gap, body.max.y)),
                Loc::Center => (Vec2::ZERO, body.center(), body.center()),
            };

            let shift = match label.ofst {
                Offset::Away(d) => dir * d,
                Offset::By(v) => v,
            };
            let align = Align::facing(dir.rotate(theta));

            let count = label.parts.len();
            for (i, text) in label.parts.iter().enumerate() {
                let t = if count == 1 { 0.5 } else { i as f32 / (count - 1) as f32 };
                let pos = from + (to - from) * t + shift;
                sketch.add(Shape::text(pos, text, spec.font_size, align));
            }
        }
    }

    fn add_dots(&self, spec: &DrawSpec, sketch: &mut Sketch) {
        if self.dot_start {
            sketch.add(Shape::circle(sketch.start, spec.dot_radius, Paint::Inherit));
        }
        if self.dot_end {
            sketch.add(Shape::circle(sketch.end, spec.dot_radius, Paint::Inherit));
        }
    }

    fn apply_paint(&self, sketch: &mut Sketch) {
        for shape in sketch.shapes.iter_mut() {
            if let (Some(fill), Shape::Poly { closed: true, fill: current @ Paint::None, .. }) = (&self.fill, &mut *shape) {
                *current = fill.clone();
            }
            if let Some(color) = &self.color {
                shape.resolve_paint(color);
            }
        }
    }
}

/// Placement resolved against the drawing state.
pub(crate) struct Resolved {
    pub sketch: Sketch,
    pub transform: Transform,
}

fn local_anchor(sketch: &Sketch, spec: &DrawSpec, element: &str, name: &str) -> Result<Vec2> {
    if let Some(p) = sketch.anchors.get(name).copied() {
        return Ok(p);
    }
    match name {
        "start" => Ok(sketch.start),
        "end" => Ok(sketch.end),
        "center" => Ok(sketch.body_bounds(spec).center()),
        _ => Err(Error::unknown_anchor(element, name)),
    }
}

fn mirror(sketch: &mut Sketch, keep_terminals: bool, f: impl Fn(Vec2) -> Vec2 + Copy) {
    for shape in sketch.shapes.iter_mut() {
        shape.map_points(f);
        if let Shape::Text { align, .. } = shape {
            let along_x = f(Vec2::x(1.0)) - f(Vec2::ZERO);
            let along_y = f(Vec2::y(1.0)) - f(Vec2::ZERO);
            if along_x.x < 0.0 {
                align.0 = match align.0 {
                    HAlign::Start => HAlign::End,
                    HAlign::End => HAlign::Start,
                    HAlign::Middle => HAlign::Middle,
                };
            }
            if along_y.y < 0.0 {
                align.1 = match align.1 {
                    VAlign::Top => VAlign::Bottom,
                    VAlign::Bottom => VAlign::Top,
                    VAlign::Middle => VAlign::Middle,
                };
            }
        }
    }
    sketch.anchors.values_mut().for_each(|p| *p = f(*p));
    sketch.drop = sketch.drop.map(f);
    if !keep_terminals {
        sketch.start = f(sketch.start);
        sketch.end = f(sketch.end);
    }
}

macro_rules! into_element {
    ($($kind:ty),* $(,)?) => {
        $(
            impl From<$kind> for Element {
                fn from(kind: $kind) -> Self {
                    Element::new(kind)
                }
            }
        )*
    };
}

into_element!(
    Line, Resistor, Button, Switch, Battery, Lamp, Wire, Dot, Ground, BjtNpn, Ic,
    Breadboard, BandedResistor, To92, Module, ImageElement, TimingDiagram,
);

/// Chainable placement options, available on every element value.
pub trait Place: Into<Element> + Sized {
    fn at(self, point: impl Into<Vec2>) -> Element {
        let mut e = self.into();
        e.at = Some(point.into());
        e
    }

    fn anchor(self, name: impl ToString) -> Element {
        let mut e = self.into();
        e.anchor = Some(name.to_string());
        e
    }

    fn theta(self, degrees: f32) -> Element {
        let mut e = self.into();
        e.theta = Some(degrees);
        e
    }

    fn right(self) -> Element {
        self.theta(0.0)
    }

    fn up(self) -> Element {
        self.theta(90.0)
    }

    fn left(self) -> Element {
        self.theta(180.0)
    }

    fn down(self) -> Element {
        self.theta(270.0)
    }

    fn length(self, length: f32) -> Element {
        let mut e = self.into();
        e.length = Some(length);
        e
    }

    fn to(self, point: impl Into<Vec2>) -> Element {
        let mut e = self.into();
        e.to = Some(point.into());
        e
    }

    fn tox(self, x: f32) -> Element {
        let mut e = self.into();
        e.tox = Some(x);
        e
    }

    fn toy(self, y: f32) -> Element {
        let mut e = self.into();
        e.toy = Some(y);
        e
    }

    fn reverse(self) -> Element {
        let mut e = self.into();
        e.reverse = !e.reverse;
        e
    }

    fn flip(self) -> Element {
        let mut e = self.into();
        e.flip = !e.flip;
        e
    }

    fn color(self, color: impl ToString) -> Element {
        let mut e = self.into();
        e.color = Some(Paint::color(color));
        e
    }

    /// Draws nothing but still takes up space in the image bounds.
    fn no_color(self) -> Element {
        let mut e = self.into();
        e.color = Some(Paint::None);
        e
    }

    fn fill(self, color: impl ToString) -> Element {
        let mut e = self.into();
        e.fill = Some(Paint::color(color));
        e
    }

    fn label(self, text: impl ToString) -> Element {
        let mut e = self.into();
        e.labels.push(Label { parts: vec![text.to_string()], loc: None, ofst: Offset::Away(0.0) });
        e
    }

    fn label_at(self, text: impl ToString, loc: Loc, ofst: impl Into<Offset>) -> Element {
        let mut e = self.into();
        e.labels.push(Label { parts: vec![text.to_string()], loc: Some(loc), ofst: ofst.into() });
        e
    }

    /// One label per part, spread evenly from the start to the end of the element.
    fn spread_label<S: ToString>(self, parts: impl IntoIterator<Item = S>) -> Element {
        let mut e = self.into();
        let parts = parts.into_iter().map(|p| p.to_string()).collect();
        e.labels.push(Label { parts, loc: None, ofst: Offset::Away(0.0) });
        e
    }

    fn dot(self) -> Element {
        let mut e = self.into();
        e.dot_end = true;
        e
    }

    fn start_dot(self) -> Element {
        let mut e = self.into();
        e.dot_start = true;
        e
    }
}

impl<T: Into<Element>> Place for T {}

/// Draws `body` centred between leads on a linear symbol of length `span.x`.
/// The closure receives the body's start and end x.
pub(crate) fn two_terminal(span: Vec2, body: f32, draw: impl FnOnce(&mut Sketch, f32, f32)) -> Sketch {
    let length = span.x;
    let body = body.min(length);
    let a = (length - body) / 2.0;
    let b = a + body;

    let mut sketch = Sketch::span(Vec2::ZERO, Vec2::x(length));
    if a > 0.0 {
        sketch.add(Shape::line(Vec2::ZERO, Vec2::x(a)));
        sketch.add(Shape::line(Vec2::x(b), Vec2::x(length)));
    }
    sketch.anchor("center", Vec2::x(length / 2.0));
    draw(&mut sketch, a, b);
    sketch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::Drawing;

    fn drawing() -> Drawing {
        Drawing::new(&DrawSpec::default())
    }

    #[test]
    fn to_sets_direction_and_length() {
        let mut d = drawing();
        let r = d.add(Resistor::new().at((1.0, 1.0)).to((1.0, 5.0))).unwrap();
        assert_eq!(r.start, Vec2::new(1.0, 1.0));
        assert!((r.end - Vec2::new(1.0, 5.0)).length() < 1e-5);
        assert!((d.theta() - 90.0).abs() < 1e-4);
    }

    #[test]
    fn tox_reaches_coordinate_even_backwards() {
        let mut d = drawing();
        let l = d.add(Line::new().at((4.0, 2.0)).right().tox(1.0)).unwrap();
        assert!((l.end - Vec2::new(1.0, 2.0)).length() < 1e-5);
        assert!((d.theta() - 180.0).abs() < 1e-4);

        // The end coordinate wins over the requested direction.
        let l = d.add(Line::new().at((0.0, 0.0)).up().tox(5.0)).unwrap();
        assert!((l.end - Vec2::new(5.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn toy_going_down() {
        let mut d = drawing();
        let l = d.add(Line::new().at((0.0, 0.0)).down().toy(-4.5)).unwrap();
        assert!((l.end - Vec2::new(0.0, -4.5)).length() < 1e-5);
    }

    #[test]
    fn anchor_aligns_fixed_element() {
        let mut d = drawing();
        let bjt = d.add(BjtNpn::new().at((2.0, 3.0)).anchor("base")).unwrap();
        assert_eq!(bjt.anchor("base").unwrap(), Vec2::new(2.0, 3.0));
        let err = d.add(BjtNpn::new().anchor("gate")).unwrap_err();
        assert!(matches!(err, Error::UnknownAnchor { .. }));
    }

    #[test]
    fn wire_requires_target() {
        let mut d = drawing();
        let err = d.add(Wire::new("-|")).unwrap_err();
        assert!(matches!(err, Error::MissingTarget { .. }));
    }

    #[test]
    fn reverse_keeps_terminals() {
        let mut d = drawing();
        let b = d.add(Battery::new().reverse().up()).unwrap();
        assert_eq!(b.start, Vec2::ZERO);
        assert!((b.end - Vec2::new(0.0, 3.0)).length() < 1e-5);
    }

    #[test]
    fn spread_label_emits_every_part() {
        let mut d = drawing();
        d.add(Battery::new().up().spread_label(["-", "Battery", "+"])).unwrap();
        let texts: Vec<_> = d.texts().collect();
        assert_eq!(texts, vec!["-", "Battery", "+"]);
    }

    #[test]
    fn dots_sit_on_terminals() {
        let mut d = drawing();
        let line = d.add(Line::new().right().length(2.0).start_dot().dot()).unwrap();
        assert_eq!(d.to_svg_string().matches("<circle").count(), 2);
        assert_eq!(line.bounds.min.x, -d.spec().dot_radius);
    }

    fn local_texts(element: impl Into<Element>) -> Vec<(String, Vec2, Align)> {
        let resolved = element.into().resolve(&DrawSpec::default(), Vec2::ZERO, 0.0).unwrap();
        resolved.sketch.shapes.into_iter()
            .filter_map(|s| match s {
                Shape::Text { text, pos, align, .. } => Some((text, pos, align)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn flip_mirrors_anchors() {
        let mut d = drawing();
        let plain = d.add(BjtNpn::new().at((0.0, 0.0)).anchor("base")).unwrap();
        let flipped = d.add(BjtNpn::new().flip().at((0.0, 0.0)).anchor("base")).unwrap();
        let c = plain.anchor("collector").unwrap();
        assert!((flipped.anchor("collector").unwrap() - Vec2::new(c.x, -c.y)).length() < 1e-5);
        assert!((flipped.anchor("emitter").unwrap() - c).length() < 1e-5);
    }

    #[test]
    fn flipped_ic_label_stays_outside_the_body() {
        let ic = Ic::new(vec![ic::IcPin::left("A"), ic::IcPin::bottom("B")]).botlabel("Chip");
        let find = |texts: Vec<(String, Vec2, Align)>| texts.into_iter().find(|t| t.0 == "Chip").unwrap();
        let (_, plain_pos, plain_align) = find(local_texts(ic.clone()));
        let (_, pos, align) = find(local_texts(ic.flip()));
        assert_eq!(plain_align.1, VAlign::Top);
        assert_eq!(align.1, VAlign::Bottom);
        assert!((pos.y + plain_pos.y).abs() < 1e-5);
    }

    #[test]
    fn label_offset_by_vector() {
        let plain = local_texts(Resistor::new().right().label_at("R1", Loc::Top, 0.0));
        let moved = local_texts(Resistor::new().right().label_at("R1", Loc::Top, (0.5, -0.25)));
        assert_eq!(moved.len(), 1);
        assert!((moved[0].1 - plain[0].1 - Vec2::new(0.5, -0.25)).length() < 1e-5);
        assert_eq!(moved[0].2, plain[0].2);
    }

    #[test]
    fn no_color_still_reserves_space() {
        let mut d = drawing();
        d.add(Line::new().at((0.0, 0.0)).to((0.0, -5.0)).no_color()).unwrap();
        assert_eq!(d.bounds().min.y, -5.0);
        assert!(d.to_svg_string().contains("stroke=\"none\""));
    }
}
