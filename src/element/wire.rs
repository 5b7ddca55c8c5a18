use crate::{
    draw::{shape::Shape, util::Vec2, DrawSpec, Sketch},
    error::Result,
};

use super::{Placement, Symbol};

/// Path taken by a [`Wire`] between its endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// `-`: straight line.
    Straight,
    /// `-|`: horizontal, then vertical.
    HorizontalFirst,
    /// `|-`: vertical, then horizontal.
    VerticalFirst,
    /// `n`: out by `k` perpendicular to the start, across, then back down.
    Arch,
    /// `c`: sideways by `k`, along, then back.
    Bracket,
    /// `z`: horizontal jog at fraction `k` of the way.
    ZigHorizontal,
    /// `N`: vertical jog at fraction `k` of the way.
    ZigVertical,
}

impl Route {
    pub fn parse(shape: &str) -> Option<Self> {
        Some(match shape {
            "-" => Route::Straight,
            "-|" => Route::HorizontalFirst,
            "|-" => Route::VerticalFirst,
            "n" => Route::Arch,
            "c" => Route::Bracket,
            "z" => Route::ZigHorizontal,
            "N" => Route::ZigVertical,
            _ => return None,
        })
    }

    fn default_k(&self) -> f32 {
        match self {
            Route::Arch | Route::Bracket => 1.0,
            _ => 0.5,
        }
    }

    pub fn points(&self, delta: Vec2, k: f32) -> Vec<Vec2> {
        let Vec2 { x: dx, y: dy } = delta;
        let o = Vec2::ZERO;
        match self {
            Route::Straight => vec![o, delta],
            Route::HorizontalFirst => vec![o, Vec2::x(dx), delta],
            Route::VerticalFirst => vec![o, Vec2::y(dy), delta],
            Route::Arch => vec![o, Vec2::y(k), Vec2::new(dx, k), delta],
            Route::Bracket => vec![o, Vec2::x(k), Vec2::new(k, dy), delta],
            Route::ZigHorizontal => vec![o, Vec2::x(dx * k), Vec2::new(dx * k, dy), delta],
            Route::ZigVertical => vec![o, Vec2::y(dy * k), Vec2::new(dx, dy * k), delta],
        }
    }
}

#[derive(Clone, Debug)]
pub struct Wire {
    pub route: Route,
    pub k: Option<f32>,
}

impl Wire {
    /// Wire with the route given in its short form (`"-|"`, `"n"`, ...).
    /// Unrecognised shapes fall back to a straight line.
    pub fn new(shape: &str) -> Self {
        let route = Route::parse(shape).unwrap_or_else(|| {
            tracing::warn!(shape, "unknown wire shape, drawing straight");
            Route::Straight
        });
        Self { route, k: None }
    }

    pub fn straight() -> Self {
        Self { route: Route::Straight, k: None }
    }

    pub fn k(mut self, k: f32) -> Self {
        self.k = Some(k);
        self
    }
}

impl Symbol for Wire {
    fn name(&self) -> &'static str {
        "Wire"
    }

    fn placement(&self) -> Placement {
        Placement::Routed
    }

    fn sketch(&self, _spec: &DrawSpec, span: Vec2) -> Result<Sketch> {
        let k = self.k.unwrap_or_else(|| self.route.default_k());
        let points = self.route.points(span, k);
        let mut sketch = Sketch::span(Vec2::ZERO, span);
        sketch.add(Shape::polyline(points));
        Ok(sketch)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        draw::Drawing,
        element::Place,
    };

    #[test]
    fn corner_routes() {
        let d = Vec2::new(2.0, -1.0);
        assert_eq!(
            Route::HorizontalFirst.points(d, 0.0),
            vec![Vec2::ZERO, Vec2::new(2.0, 0.0), d],
        );
        assert_eq!(
            Route::VerticalFirst.points(d, 0.0),
            vec![Vec2::ZERO, Vec2::new(0.0, -1.0), d],
        );
    }

    #[test]
    fn arch_and_bracket_use_k() {
        let d = Vec2::new(3.0, 1.0);
        assert_eq!(
            Route::Arch.points(d, 2.5),
            vec![Vec2::ZERO, Vec2::new(0.0, 2.5), Vec2::new(3.0, 2.5), d],
        );
        assert_eq!(
            Route::Bracket.points(d, -1.0),
            vec![Vec2::ZERO, Vec2::new(-1.0, 0.0), Vec2::new(-1.0, 1.0), d],
        );
    }

    #[test]
    fn zigzag_routes_jog_at_k() {
        let d = Vec2::new(4.0, 2.0);
        assert_eq!(
            Route::ZigHorizontal.points(d, 0.25),
            vec![Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(1.0, 2.0), d],
        );
        assert_eq!(
            Route::ZigVertical.points(d, 0.5),
            vec![Vec2::ZERO, Vec2::new(0.0, 1.0), Vec2::new(4.0, 1.0), d],
        );
    }

    #[test]
    fn zigzag_defaults_to_halfway() {
        let mut drawing = Drawing::new(&DrawSpec::default());
        let wire = drawing.add(Wire::new("z").at((0.0, 0.0)).to((2.0, 2.0))).unwrap();
        assert_eq!(wire.end, Vec2::new(2.0, 2.0));
        assert_eq!(wire.anchor("center").unwrap(), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn wire_lands_on_target() {
        let mut drawing = Drawing::new(&DrawSpec::default());
        let wire = drawing.add(Wire::new("n").k(2.0).at((1.0, 1.0)).to((4.0, 0.0))).unwrap();
        assert_eq!(wire.end, Vec2::new(4.0, 0.0));
        assert_eq!(drawing.here(), Vec2::new(4.0, 0.0));
        assert_eq!(wire.bounds.max.y, 3.0);
    }

    #[test]
    fn unknown_shape_is_straight() {
        assert_eq!(Wire::new("?!").route, Route::Straight);
        assert_eq!(Route::parse("N"), Some(Route::ZigVertical));
    }
}
