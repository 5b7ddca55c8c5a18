use crate::{
    draw::{
        shape::{Paint, Shape},
        util::Vec2,
        DrawSpec, Sketch,
    },
    error::Result,
};

use super::{two_terminal, Placement, Symbol};

#[derive(Clone, Debug, Default)]
pub struct Line;

impl Line {
    pub fn new() -> Self {
        Self
    }
}

impl Symbol for Line {
    fn name(&self) -> &'static str {
        "Line"
    }

    fn placement(&self) -> Placement {
        Placement::Linear
    }

    fn sketch(&self, _spec: &DrawSpec, span: Vec2) -> Result<Sketch> {
        let mut sketch = Sketch::span(Vec2::ZERO, span);
        sketch.add(Shape::line(Vec2::ZERO, span));
        Ok(sketch)
    }
}

/// Zigzag resistor.
#[derive(Clone, Debug, Default)]
pub struct Resistor;

impl Resistor {
    const BODY: f32 = 1.0;
    const PEAK: f32 = 0.25;

    pub fn new() -> Self {
        Self
    }
}

impl Symbol for Resistor {
    fn name(&self) -> &'static str {
        "Resistor"
    }

    fn placement(&self) -> Placement {
        Placement::Linear
    }

    fn sketch(&self, _spec: &DrawSpec, span: Vec2) -> Result<Sketch> {
        Ok(two_terminal(span, Self::BODY, |sketch, a, b| {
            let step = (b - a) / 12.0;
            let mut points = vec![Vec2::x(a)];
            for i in 0..6 {
                let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
                points.push(Vec2::new(a + step * (2 * i + 1) as f32, sign * Self::PEAK));
            }
            points.push(Vec2::x(b));
            sketch.add(Shape::polyline(points));
        }))
    }
}

/// Normally-open push button.
#[derive(Clone, Debug, Default)]
pub struct Button;

impl Button {
    const BODY: f32 = 1.0;

    pub fn new() -> Self {
        Self
    }
}

impl Symbol for Button {
    fn name(&self) -> &'static str {
        "Button"
    }

    fn placement(&self) -> Placement {
        Placement::Linear
    }

    fn sketch(&self, _spec: &DrawSpec, span: Vec2) -> Result<Sketch> {
        Ok(two_terminal(span, Self::BODY, |sketch, a, b| {
            let r = 0.075;
            let mid = (a + b) / 2.0;
            sketch
                .add(Shape::circle(Vec2::x(a + r), r, Paint::None))
                .add(Shape::circle(Vec2::x(b - r), r, Paint::None))
                .add(Shape::line(Vec2::new(a, 0.3), Vec2::new(b, 0.3)))
                .add(Shape::line(Vec2::new(mid, 0.3), Vec2::new(mid, 0.6)))
                .add(Shape::line(Vec2::new(mid - 0.15, 0.6), Vec2::new(mid + 0.15, 0.6)));
        }))
    }
}

/// Single-pole switch, drawn open unless `closed`.
#[derive(Clone, Debug, Default)]
pub struct Switch {
    pub closed: bool,
}

impl Switch {
    const BODY: f32 = 1.0;

    pub fn new() -> Self {
        Self { closed: false }
    }

    pub fn closed() -> Self {
        Self { closed: true }
    }
}

impl Symbol for Switch {
    fn name(&self) -> &'static str {
        "Switch"
    }

    fn placement(&self) -> Placement {
        Placement::Linear
    }

    fn sketch(&self, _spec: &DrawSpec, span: Vec2) -> Result<Sketch> {
        let closed = self.closed;
        Ok(two_terminal(span, Self::BODY, |sketch, a, b| {
            let r = 0.075;
            let blade_end = if closed {
                Vec2::new(b - r, r)
            } else {
                Vec2::new(b - 0.1, 0.45)
            };
            sketch
                .add(Shape::circle(Vec2::x(a + r), r, Paint::None))
                .add(Shape::circle(Vec2::x(b - r), r, Paint::None))
                .add(Shape::line(Vec2::new(a + r, r), blade_end));
        }))
    }
}

/// Two-cell battery, positive plate towards the start.
#[derive(Clone, Debug, Default)]
pub struct Battery;

impl Battery {
    const BODY: f32 = 0.75;

    pub fn new() -> Self {
        Self
    }
}

impl Symbol for Battery {
    fn name(&self) -> &'static str {
        "Battery"
    }

    fn placement(&self) -> Placement {
        Placement::Linear
    }

    fn sketch(&self, _spec: &DrawSpec, span: Vec2) -> Result<Sketch> {
        Ok(two_terminal(span, Self::BODY, |sketch, a, b| {
            let pitch = (b - a) / 3.0;
            for i in 0..4 {
                let x = a + pitch * i as f32;
                let half = if i % 2 == 0 { 0.375 } else { 0.2 };
                sketch.add(Shape::line(Vec2::new(x, -half), Vec2::new(x, half)));
            }
        }))
    }
}

/// Incandescent lamp: a circle around a looped filament.
#[derive(Clone, Debug)]
pub struct Lamp {
    pub filament: Option<String>,
}

impl Lamp {
    const BODY: f32 = 1.0;

    pub fn new() -> Self {
        Self { filament: None }
    }

    /// Lamp with a lit filament in the given colour.
    pub fn lit(color: impl ToString) -> Self {
        Self { filament: Some(color.to_string()) }
    }
}

impl Default for Lamp {
    fn default() -> Self {
        Self::new()
    }
}

impl Symbol for Lamp {
    fn name(&self) -> &'static str {
        "Lamp"
    }

    fn placement(&self) -> Placement {
        Placement::Linear
    }

    fn sketch(&self, _spec: &DrawSpec, span: Vec2) -> Result<Sketch> {
        let filament = self.filament.clone();
        Ok(two_terminal(span, Self::BODY, |sketch, a, b| {
            let mid = Vec2::x((a + b) / 2.0);
            let radius = (b - a) / 2.0;
            let mut coil = Shape::arc(mid, Vec2::new(radius * 0.6, radius * 0.6), 180.0, 0.0)
                .weight(if filament.is_some() { 1.5 } else { 1.0 });
            if let Some(color) = filament {
                coil = coil.stroke(Paint::color(color));
            }
            sketch
                .add(Shape::circle(mid, radius, Paint::None))
                .add(Shape::line(Vec2::x(a), mid - Vec2::x(radius * 0.6)))
                .add(Shape::line(mid + Vec2::x(radius * 0.6), Vec2::x(b)))
                .add(coil);
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly_points(shape: &Shape) -> &[Vec2] {
        match shape {
            Shape::Poly { points, .. } => points,
            _ => &[],
        }
    }

    #[test]
    fn resistor_leads_fill_extra_length() {
        let sketch = Resistor::new().sketch(&DrawSpec::default(), Vec2::x(3.0)).unwrap();
        assert_eq!(poly_points(&sketch.shapes[0]), &[Vec2::ZERO, Vec2::x(1.0)]);
        assert_eq!(poly_points(&sketch.shapes[1]), &[Vec2::x(2.0), Vec2::x(3.0)]);
        let zigzag = poly_points(&sketch.shapes[2]);
        assert_eq!(zigzag.len(), 8);
        assert_eq!(zigzag.first().copied(), Some(Vec2::x(1.0)));
        assert_eq!(zigzag.last().copied(), Some(Vec2::x(2.0)));
    }

    #[test]
    fn short_span_squeezes_body() {
        let sketch = Battery::new().sketch(&DrawSpec::default(), Vec2::x(0.5)).unwrap();
        // No leads, four plates.
        assert_eq!(sketch.shapes.len(), 4);
        assert_eq!(sketch.end, Vec2::x(0.5));
    }

    #[test]
    fn lit_lamp_colours_filament() {
        let sketch = Lamp::lit("gold").sketch(&DrawSpec::default(), Vec2::x(3.0)).unwrap();
        assert!(sketch.shapes.iter().any(|s| matches!(
            s,
            Shape::Poly { stroke: Paint::Color(c), .. } if c == "gold"
        )));
    }
}
