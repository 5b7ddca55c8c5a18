use std::{iter, str::FromStr};

use pom::parser::{any, end, is_a, none_of, one_of, sym, tag};

use crate::{
    draw::{
        shape::{Align, Paint, Shape},
        util::Vec2,
        Sketch,
    },
    error::Error,
};

type Parser<'a, O> = pom::parser::Parser<'a, char, O>;

/// Vertical position of an edge endpoint within its signal row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    High,
    Middle,
    Low,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgePoint {
    pub row: usize,
    pub level: Level,
    /// In periods from the start of the diagram.
    pub time: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Connector {
    /// `-`
    Line,
    /// `->`
    Arrow,
    /// `<-`
    BackArrow,
    /// `<->`
    BothArrows,
    /// `+`: dimension line with end ticks.
    Dimension,
}

/// Annotation between two points of a timing diagram, written like
/// `[0^:1.9]+[0^:8.9]{blue} signal`.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub from: EdgePoint,
    pub connector: Connector,
    pub to: EdgePoint,
    pub color: Option<String>,
    pub label: Option<String>,
}

fn star_space<'a>() -> Parser<'a, ()> {
    is_a(char::is_whitespace).repeat(0..).discard()
}

fn integer<'a>() -> Parser<'a, usize> {
    is_a(|c: char| c.is_ascii_digit())
        .repeat(1..)
        .map(|seq| seq.into_iter().collect::<String>())
        .convert(|s| s.parse())
}

fn number<'a>() -> Parser<'a, f32> {
    let digits = || is_a(|c: char| c.is_ascii_digit()).repeat(1..);
    (sym('-').opt() + digits() + (sym('.') * digits()).opt())
        .map(|((sign, int), frac)| {
            sign.into_iter()
                .chain(int)
                .chain(frac.into_iter().flat_map(|f| iter::once('.').chain(f)))
                .collect::<String>()
        })
        .convert(|s| s.parse())
}

fn level<'a>() -> Parser<'a, Level> {
    one_of("^v").opt().map(|marker| match marker {
        Some('^') => Level::High,
        Some(_) => Level::Low,
        None => Level::Middle,
    })
}

fn point<'a>() -> Parser<'a, EdgePoint> {
    (sym('[') * star_space() * integer() + level() - sym(':') - star_space() + number() - star_space() - sym(']'))
        .map(|((row, level), time)| EdgePoint { row, level, time })
}

fn connector<'a>() -> Parser<'a, Connector> {
    tag("<->").map(|_| Connector::BothArrows)
        | tag("->").map(|_| Connector::Arrow)
        | tag("<-").map(|_| Connector::BackArrow)
        | sym('-').map(|_| Connector::Line)
        | sym('+').map(|_| Connector::Dimension)
}

fn color<'a>() -> Parser<'a, String> {
    (sym('{') * none_of("}").repeat(0..) - sym('}'))
        .map(|seq| seq.into_iter().collect::<String>().trim().to_string())
}

fn edge<'a>() -> Parser<'a, Edge> {
    let parser = star_space() * point() - star_space()
        + connector() - star_space()
        + point() - star_space()
        + color().opt() - star_space()
        + any().repeat(0..) - end();

    parser.map(|((((from, connector), to), color), rest)| {
        let label = rest.into_iter().collect::<String>().trim().to_string();
        Edge {
            from,
            connector,
            to,
            color,
            label: (!label.is_empty()).then_some(label),
        }
    })
}

impl FromStr for Edge {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars = s.chars().collect::<Vec<_>>();
        let parsed = edge().parse(&chars).map_err(|e| Error::edge(s, e));
        parsed
    }
}

impl Edge {
    pub fn draw(&self, sketch: &mut Sketch, from: Vec2, to: Vec2, size: f32) {
        let paint = self.color.as_ref().map_or(Paint::Inherit, Paint::color);
        let dir = (to - from).normalized();
        let head = size * 0.35;

        sketch.add(Shape::line(from, to).stroke(paint.clone()));

        let (start_head, end_head) = match self.connector {
            Connector::Line => (false, false),
            Connector::Arrow => (false, true),
            Connector::BackArrow => (true, false),
            Connector::BothArrows | Connector::Dimension => (true, true),
        };
        if end_head {
            sketch.add(arrowhead(to, dir, head).stroke(paint.clone()).fill(paint.clone()));
        }
        if start_head {
            sketch.add(arrowhead(from, -dir, head).stroke(paint.clone()).fill(paint.clone()));
        }
        if self.connector == Connector::Dimension {
            let tick = dir.perp() * (size * 0.4);
            for p in [from, to] {
                sketch.add(Shape::line(p - tick, p + tick).stroke(paint.clone()));
            }
        }

        if let Some(text) = &self.label {
            // Labels go above horizontal edges and right of vertical ones.
            let mut normal = dir.perp();
            if normal.y < -1e-6 || (normal.y.abs() < 1e-6 && normal.x < 0.0) {
                normal = -normal;
            }
            let mid = (from + to) / 2.0;
            sketch.add(
                Shape::text(mid + normal * (size * 0.2), text, size * 0.6, Align::facing(normal))
                    .stroke(paint.clone()),
            );
        }
    }
}

fn arrowhead(tip: Vec2, dir: Vec2, length: f32) -> Shape {
    let back = tip - dir * length;
    let side = dir.perp() * (length * 0.35);
    Shape::polygon(vec![tip, back + side, back - side], Paint::Inherit)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn dimension_with_label() {
        let edge: Edge = "[0^:1.9]+[0^:8.9] signal".parse().unwrap();
        assert_eq!(
            edge,
            Edge {
                from: EdgePoint { row: 0, level: Level::High, time: 1.9 },
                connector: Connector::Dimension,
                to: EdgePoint { row: 0, level: Level::High, time: 8.9 },
                color: None,
                label: Some("signal".to_string()),
            }
        );
    }

    #[test]
    fn colour_and_rows() {
        let edge: Edge = "[1v:2]+[0^:2]{red} read".parse().unwrap();
        assert_eq!(edge.from, EdgePoint { row: 1, level: Level::Low, time: 2.0 });
        assert_eq!(edge.to.level, Level::High);
        assert_eq!(edge.color.as_deref(), Some("red"));
        assert_eq!(edge.label.as_deref(), Some("read"));
    }

    #[test]
    fn connectors() {
        let conn = |s: &str| s.parse::<Edge>().unwrap().connector;
        assert_eq!(conn("[0:0]-[0:1]"), Connector::Line);
        assert_eq!(conn("[0:0]->[0:1]"), Connector::Arrow);
        assert_eq!(conn("[0:0]<-[0:1]"), Connector::BackArrow);
        assert_eq!(conn("[0:0]<->[0:1]"), Connector::BothArrows);
        assert_eq!("[0:0] - [2:1.25]".parse::<Edge>().unwrap().to.time, 1.25);
    }

    #[test]
    fn unlabelled_edge_has_no_label() {
        let edge: Edge = "[0:0.5]->[1:0.5]".parse().unwrap();
        assert_eq!(edge.label, None);
        assert_eq!(edge.from.level, Level::Middle);
    }

    #[test]
    fn malformed_edges() {
        for bad in ["[0^:1.9+[0^:8.9]", "[x:1]-[0:1]", "[0:1]=[0:2]", "[0:1]-"] {
            let err = bad.parse::<Edge>().unwrap_err();
            assert!(matches!(err, Error::Edge { .. }), "{bad}: {err}");
        }
    }
}
