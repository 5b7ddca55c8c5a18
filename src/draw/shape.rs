use svg::node::element::{path::Data, Circle, Group, Image, Path, Text};
use unicode_width::UnicodeWidthStr;

use super::{
    util::{Bounds, Transform, Vec2},
    DrawSpec,
};

/// Colour of a stroke or fill. `Inherit` resolves to the element colour when the
/// element is placed.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Paint {
    #[default]
    Inherit,
    None,
    Color(String),
}

impl Paint {
    pub fn color(name: impl ToString) -> Self {
        Paint::Color(name.to_string())
    }

    pub fn resolve(&mut self, element: &Paint) {
        if *self == Paint::Inherit {
            *self = element.clone();
        }
    }

    fn svg_value(&self, spec: &DrawSpec) -> String {
        match self {
            Paint::Inherit => spec.color.clone(),
            Paint::None => "none".to_string(),
            Paint::Color(c) => c.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HAlign {
    Start,
    Middle,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Middle,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Align(pub HAlign, pub VAlign);

impl Align {
    pub const CENTER: Align = Align(HAlign::Middle, VAlign::Middle);

    /// Alignment for text sitting at the end of `dir`, reading away from whatever
    /// it labels.
    pub fn facing(dir: Vec2) -> Self {
        if dir.length() < 1e-6 {
            Align::CENTER
        } else if dir.x.abs() > dir.y.abs() + 1e-4 {
            let h = if dir.x > 0.0 { HAlign::Start } else { HAlign::End };
            Align(h, VAlign::Middle)
        } else {
            let v = if dir.y > 0.0 { VAlign::Bottom } else { VAlign::Top };
            Align(HAlign::Middle, v)
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Poly {
        points: Vec<Vec2>,
        closed: bool,
        stroke: Paint,
        fill: Paint,
        width: f32,
        dashed: bool,
    },
    Circle {
        center: Vec2,
        radius: f32,
        stroke: Paint,
        fill: Paint,
    },
    Text {
        pos: Vec2,
        text: String,
        size: f32,
        align: Align,
        color: Paint,
    },
    Image {
        corner: Vec2,
        size: Vec2,
        theta: f32,
        href: String,
    },
}

impl Shape {
    pub fn line(a: Vec2, b: Vec2) -> Self {
        Self::polyline(vec![a, b])
    }

    pub fn polyline(points: Vec<Vec2>) -> Self {
        Shape::Poly {
            points,
            closed: false,
            stroke: Paint::Inherit,
            fill: Paint::None,
            width: 1.0,
            dashed: false,
        }
    }

    pub fn polygon(points: Vec<Vec2>, fill: Paint) -> Self {
        Shape::Poly {
            points,
            closed: true,
            stroke: Paint::Inherit,
            fill,
            width: 1.0,
            dashed: false,
        }
    }

    pub fn rect(min: Vec2, max: Vec2, fill: Paint) -> Self {
        Self::polygon(
            vec![min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)],
            fill,
        )
    }

    /// Arc sampled into a polyline, angles in degrees counter-clockwise.
    pub fn arc(center: Vec2, radius: Vec2, from: f32, to: f32) -> Self {
        let steps = (((to - from).abs() / 360.0 * 48.0).ceil() as usize).max(4);
        let points = (0..=steps)
            .map(|i| {
                let theta = from + (to - from) * i as f32 / steps as f32;
                let Vec2 { x, y } = Vec2::polar(theta);
                center + Vec2::new(x * radius.x, y * radius.y)
            })
            .collect();
        Self::polyline(points)
    }

    pub fn circle(center: Vec2, radius: f32, fill: Paint) -> Self {
        Shape::Circle { center, radius, stroke: Paint::Inherit, fill }
    }

    pub fn text(pos: Vec2, text: impl ToString, size: f32, align: Align) -> Self {
        Shape::Text { pos, text: text.to_string(), size, align, color: Paint::Inherit }
    }

    pub fn stroke(mut self, paint: Paint) -> Self {
        match &mut self {
            Shape::Poly { stroke, .. } | Shape::Circle { stroke, .. } => *stroke = paint,
            Shape::Text { color, .. } => *color = paint,
            Shape::Image { .. } => {}
        }
        self
    }

    pub fn fill(mut self, paint: Paint) -> Self {
        if let Shape::Poly { fill, .. } | Shape::Circle { fill, .. } = &mut self {
            *fill = paint;
        }
        self
    }

    pub fn weight(mut self, factor: f32) -> Self {
        if let Shape::Poly { width, .. } = &mut self {
            *width = factor;
        }
        self
    }

    pub fn dashed(mut self) -> Self {
        if let Shape::Poly { dashed, .. } = &mut self {
            *dashed = true;
        }
        self
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Shape::Text { .. })
    }

    /// Applies the element colour to every inherited paint.
    pub fn resolve_paint(&mut self, element: &Paint) {
        match self {
            Shape::Poly { stroke, fill, .. } | Shape::Circle { stroke, fill, .. } => {
                stroke.resolve(element);
                fill.resolve(element);
            }
            Shape::Text { color, .. } => color.resolve(element),
            Shape::Image { .. } => {}
        }
    }

    pub fn map_points(&mut self, f: impl Fn(Vec2) -> Vec2) {
        match self {
            Shape::Poly { points, .. } => points.iter_mut().for_each(|p| *p = f(*p)),
            Shape::Circle { center, .. } => *center = f(*center),
            Shape::Text { pos, .. } => *pos = f(*pos),
            Shape::Image { corner, .. } => *corner = f(*corner),
        }
    }

    pub fn transform(&mut self, t: &Transform) {
        self.map_points(|p| t.apply(p));
        if let Shape::Image { theta, .. } = self {
            *theta += t.theta;
        }
    }

    pub fn bounds(&self, spec: &DrawSpec) -> Option<Bounds> {
        match self {
            Shape::Poly { points, .. } => Bounds::around(points.iter().copied()),
            Shape::Circle { center, radius, .. } => {
                let r = Vec2::new(*radius, *radius);
                Some(Bounds { min: *center - r, max: *center + r })
            }
            Shape::Text { pos, text, size, align, .. } => {
                let width = text_width(spec, text, *size);
                let x = match align.0 {
                    HAlign::Start => pos.x,
                    HAlign::Middle => pos.x - width / 2.0,
                    HAlign::End => pos.x - width,
                };
                let y = match align.1 {
                    VAlign::Top => pos.y - size,
                    VAlign::Middle => pos.y - size / 2.0,
                    VAlign::Bottom => pos.y,
                };
                let min = Vec2::new(x, y);
                Some(Bounds { min, max: min + Vec2::new(width, *size) })
            }
            Shape::Image { corner, size, theta, .. } => {
                let corners = [Vec2::ZERO, Vec2::x(size.x), *size, Vec2::y(size.y)];
                Bounds::around(corners.map(|c| *corner + c.rotate(*theta)))
            }
        }
    }

    /// Emits the shape in SVG coordinates: scaled by `spec.scale` with y pointing down.
    pub fn draw_into(&self, spec: &DrawSpec, group: Group) -> Group {
        let s = spec.scale;
        let flip = |p: Vec2| Vec2::new(p.x * s, -p.y * s);

        match self {
            Shape::Poly { points, closed, stroke, fill, width, dashed } => {
                let mut data = Data::new();
                for (i, p) in points.iter().map(|p| flip(*p)).enumerate() {
                    data = if i == 0 { data.move_to(p) } else { data.line_to(p) };
                }
                if *closed {
                    data = data.close();
                }

                let mut path = Path::new()
                    .set("fill", fill.svg_value(spec))
                    .set("stroke", stroke.svg_value(spec))
                    .set("stroke-width", spec.stroke_width * width)
                    .set("stroke-linejoin", "round")
                    .set("stroke-linecap", "round")
                    .set("d", data);
                if *dashed {
                    path = path.set("stroke-dasharray", format!("{} {}", s * 0.1, s * 0.08));
                }
                group.add(path)
            }
            Shape::Circle { center, radius, stroke, fill } => {
                let c = flip(*center);
                group.add(
                    Circle::new()
                        .set("cx", c.x)
                        .set("cy", c.y)
                        .set("r", radius * s)
                        .set("fill", fill.svg_value(spec))
                        .set("stroke", stroke.svg_value(spec))
                        .set("stroke-width", spec.stroke_width),
                )
            }
            Shape::Text { pos, text, size, align, color } => {
                let p = flip(*pos);
                let anchor = match align.0 {
                    HAlign::Start => "start",
                    HAlign::Middle => "middle",
                    HAlign::End => "end",
                };
                let baseline = match align.1 {
                    VAlign::Top => "hanging",
                    VAlign::Middle => "middle",
                    VAlign::Bottom => "auto",
                };
                group.add(
                    Text::new()
                        .add(svg::node::Text::new(text.clone()))
                        .set("fill", color.svg_value(spec))
                        .set("font-family", spec.font_family.clone())
                        .set("font-size", size * s)
                        .set("dominant-baseline", baseline)
                        .set("text-anchor", anchor)
                        .set("x", p.x)
                        .set("y", p.y),
                )
            }
            Shape::Image { corner, size, theta, href } => {
                let Vec2 { x: c, y: sn } = Vec2::polar(*theta);
                let h = size.y * s;
                let matrix = (
                    c,
                    -sn,
                    sn,
                    c,
                    s * corner.x - sn * h,
                    -s * corner.y - c * h,
                );
                group.add(
                    Image::new()
                        .set("href", href.clone())
                        .set("x", 0)
                        .set("y", 0)
                        .set("width", size.x * s)
                        .set("height", h)
                        .set("preserveAspectRatio", "none")
                        .set(
                            "transform",
                            format!(
                                "matrix({},{},{},{},{},{})",
                                matrix.0, matrix.1, matrix.2, matrix.3, matrix.4, matrix.5
                            ),
                        ),
                )
            }
        }
    }
}

pub fn text_width(spec: &DrawSpec, text: &str, size: f32) -> f32 {
    text.width_cjk() as f32 * spec.char_width * size
}

/// Full circle as a closed polygon, for shapes that need a fill with an outline path.
pub fn disc(center: Vec2, radius: f32, fill: Paint) -> Shape {
    let points = (0..32)
        .map(|i| center + Vec2::polar(i as f32 * 360.0 / 32.0) * radius)
        .collect();
    Shape::polygon(points, fill)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facing_alignment() {
        assert_eq!(Align::facing(Vec2::new(0.0, 1.0)), Align(HAlign::Middle, VAlign::Bottom));
        assert_eq!(Align::facing(Vec2::new(0.0, -1.0)), Align(HAlign::Middle, VAlign::Top));
        assert_eq!(Align::facing(Vec2::new(-1.0, 0.2)), Align(HAlign::End, VAlign::Middle));
        assert_eq!(Align::facing(Vec2::ZERO), Align::CENTER);
    }

    #[test]
    fn arc_endpoints() {
        let Shape::Poly { points, .. } = Shape::arc(Vec2::ZERO, Vec2::new(1.0, 1.0), 0.0, 180.0) else {
            panic!("arc should be a polyline");
        };
        assert_eq!(points.first().copied(), Some(Vec2::new(1.0, 0.0)));
        assert_eq!(points.last().copied(), Some(Vec2::new(-1.0, 0.0)));
    }

    #[test]
    fn text_bounds_follow_alignment() {
        let spec = DrawSpec::default();
        let shape = Shape::text(Vec2::ZERO, "GND", 1.0, Align(HAlign::End, VAlign::Bottom));
        let b = shape.bounds(&spec).unwrap();
        assert_eq!(b.max.x, 0.0);
        assert_eq!(b.min.y, 0.0);
        assert!((b.width() - 3.0 * spec.char_width).abs() < 1e-6);
    }

    #[test]
    fn inherit_resolves_to_element_color() {
        let mut shape = Shape::line(Vec2::ZERO, Vec2::x(1.0));
        shape.resolve_paint(&Paint::color("red"));
        let Shape::Poly { stroke, fill, .. } = shape else { unreachable!() };
        assert_eq!(stroke, Paint::color("red"));
        assert_eq!(fill, Paint::None);
    }
}
