use crate::{
    draw::{
        shape::{Paint, Shape},
        util::Vec2,
        DrawSpec, Sketch,
    },
    error::Result,
};

use super::{Loc, Symbol};

/// Filled junction dot.
#[derive(Clone, Debug, Default)]
pub struct Dot;

impl Dot {
    pub fn new() -> Self {
        Self
    }
}

impl Symbol for Dot {
    fn name(&self) -> &'static str {
        "Dot"
    }

    fn sketch(&self, spec: &DrawSpec, _span: Vec2) -> Result<Sketch> {
        let mut sketch = Sketch::new();
        sketch.add(Shape::circle(Vec2::ZERO, spec.dot_radius, Paint::Inherit));
        sketch.drop = Some(Vec2::ZERO);
        Ok(sketch)
    }
}

/// Ground symbol hanging below its connection point.
#[derive(Clone, Debug, Default)]
pub struct Ground;

impl Ground {
    pub fn new() -> Self {
        Self
    }
}

impl Symbol for Ground {
    fn name(&self) -> &'static str {
        "Ground"
    }

    fn sketch(&self, _spec: &DrawSpec, _span: Vec2) -> Result<Sketch> {
        let mut sketch = Sketch::new();
        for (i, half) in [0.3, 0.2, 0.1].into_iter().enumerate() {
            let y = -0.15 * i as f32;
            sketch.add(Shape::line(Vec2::new(-half, y), Vec2::new(half, y)));
        }
        sketch.drop = Some(Vec2::ZERO);
        Ok(sketch)
    }
}

/// NPN bipolar transistor with `base`, `collector` and `emitter` anchors.
#[derive(Clone, Debug, Default)]
pub struct BjtNpn;

impl BjtNpn {
    pub fn new() -> Self {
        Self
    }
}

impl Symbol for BjtNpn {
    fn name(&self) -> &'static str {
        "BjtNpn"
    }

    fn default_label_loc(&self) -> Loc {
        Loc::Right
    }

    fn sketch(&self, _spec: &DrawSpec, _span: Vec2) -> Result<Sketch> {
        let base = Vec2::ZERO;
        let bar = 0.6;
        let collector = Vec2::new(1.2, 0.9);
        let emitter = Vec2::new(1.2, -0.9);

        let mut sketch = Sketch::span(base, collector);
        sketch
            .add(Shape::line(base, Vec2::x(bar)))
            .add(Shape::line(Vec2::new(bar, -0.4), Vec2::new(bar, 0.4)).weight(1.5))
            .add(Shape::polyline(vec![Vec2::new(bar, 0.2), Vec2::new(1.2, 0.55), collector]))
            .add(Shape::polyline(vec![Vec2::new(bar, -0.2), Vec2::new(1.2, -0.55), emitter]))
            .add(Shape::circle(Vec2::new(0.85, 0.0), 0.75, Paint::None));

        // Arrow on the emitter, pointing away from the base.
        let tip = Vec2::new(1.2, -0.55);
        let back = (Vec2::new(bar, -0.2) - tip).normalized() * 0.25;
        let side = back.perp() * 0.4;
        sketch.add(Shape::polygon(vec![tip, tip + back + side, tip + back - side], Paint::Inherit));

        sketch
            .anchor("base", base)
            .anchor("collector", collector)
            .anchor("emitter", emitter);
        Ok(sketch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{draw::Drawing, element::Place};

    #[test]
    fn ground_keeps_position() {
        let mut d = Drawing::new(&DrawSpec::default());
        d.add(crate::element::two_term::Line::new().down().length(1.0)).unwrap();
        let g = d.add(Ground::new()).unwrap();
        assert_eq!(g.anchor("start").unwrap(), Vec2::new(0.0, -1.0));
        assert_eq!(d.here(), Vec2::new(0.0, -1.0));
        assert!(g.bounds.min.y < -1.0);
    }

    #[test]
    fn dot_marks_a_junction() {
        let mut d = Drawing::new(&DrawSpec::default());
        let dot = d.add(Dot::new().at((2.0, 1.0))).unwrap();
        assert!((dot.center() - Vec2::new(2.0, 1.0)).length() < 1e-5);
        assert_eq!(d.here(), Vec2::new(2.0, 1.0));
    }

    #[test]
    fn bjt_anchors_follow_rotation() {
        let mut d = Drawing::new(&DrawSpec::default());
        let bjt = d.add(BjtNpn::new().up().at((0.0, 0.0))).unwrap();
        let c = bjt.anchor("collector").unwrap();
        assert!((c - Vec2::new(-0.9, 1.2)).length() < 1e-5);
    }
}
