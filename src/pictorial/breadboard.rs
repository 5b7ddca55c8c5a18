use crate::{
    draw::{
        shape::{Align, Paint, Shape},
        util::Vec2,
        DrawSpec, Sketch,
    },
    error::Result,
    element::Symbol,
};

use super::PINSPACING;

pub const ROWS: usize = 30;
pub const COLUMNS: [char; 10] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J'];
pub const RAILS: [&str; 4] = ["L1", "L2", "R1", "R2"];

/// Solderless breadboard with 30 terminal rows and four power rails.
///
/// Drawn upright: row 1 at the top, `L1`/`L2` rails on the left, `R1`/`R2` on
/// the right. Rotated with `.up()` the rows run left to right with `J` on top.
/// Anchors are `A1`..`J30` and `L1_1`..`R2_30`.
#[derive(Clone, Debug, Default)]
pub struct Breadboard;

impl Breadboard {
    pub fn new() -> Self {
        Self
    }

    /// Column position in pitches from `L1`.
    fn column_x(column: char) -> Option<f32> {
        let i = COLUMNS.iter().position(|c| *c == column)?;
        Some(if i < 5 { 3 + i } else { 5 + i } as f32)
    }

    fn rail_x(rail: &str) -> Option<f32> {
        Some(match rail {
            "L1" => 0.0,
            "L2" => 1.0,
            "R1" => 16.0,
            "R2" => 17.0,
            _ => return None,
        })
    }

    fn row_y(row: usize) -> f32 {
        -((row + 1) as f32)
    }

    /// Local position of a named hole, in drawing units.
    pub fn hole(name: &str) -> Option<Vec2> {
        let (x, row) = match name.split_once('_') {
            Some((rail, n)) => (Self::rail_x(rail)?, n.parse().ok()?),
            None => {
                let mut chars = name.chars();
                let column = chars.next()?;
                (Self::column_x(column)?, chars.as_str().parse().ok()?)
            }
        };
        (1..=ROWS).contains(&row).then(|| Vec2::new(x, Self::row_y(row)) * PINSPACING)
    }
}

impl Symbol for Breadboard {
    fn name(&self) -> &'static str {
        "Breadboard"
    }

    fn sketch(&self, _spec: &DrawSpec, _span: Vec2) -> Result<Sketch> {
        let ps = PINSPACING;
        let at = |x: f32, y: f32| Vec2::new(x, y) * ps;
        let grey = |c: &str| Paint::color(c);

        let mut sketch = Sketch::new();
        sketch
            .add(Shape::rect(at(-1.5, -32.5), at(18.5, -0.5), grey("#f4f4f0")).stroke(grey("#b8b8b0")))
            .add(Shape::rect(at(7.6, -31.5), at(9.4, -1.5), grey("#e2e2dc")).stroke(Paint::None));

        for (x, color) in [(-0.7, "#d33"), (1.5, "#33d"), (15.5, "#d33"), (17.7, "#33d")] {
            sketch.add(Shape::line(at(x, -1.5), at(x, -31.5)).stroke(grey(color)));
        }

        let hole = ps * 0.2;
        let mut add_hole = |name: String, p: Vec2| {
            let half = Vec2::new(hole, hole);
            sketch
                .add(Shape::rect(p - half, p + half, grey("#555")).stroke(Paint::None))
                .anchor(name, p);
        };

        for row in 1..=ROWS {
            for column in COLUMNS {
                let name = format!("{column}{row}");
                if let Some(p) = Self::hole(&name) {
                    add_hole(name, p);
                }
            }
            for rail in RAILS {
                let name = format!("{rail}_{row}");
                if let Some(p) = Self::hole(&name) {
                    add_hole(name, p);
                }
            }
        }

        let size = ps * 0.6;
        let tag = |text: String, p: Vec2| Shape::text(p, text, size, Align::CENTER).stroke(grey("#777"));
        for column in COLUMNS {
            if let Some(x) = Self::column_x(column) {
                sketch
                    .add(tag(column.to_string(), at(x, -0.9)))
                    .add(tag(column.to_string(), at(x, -32.1)));
            }
        }
        for row in [1, 5, 10, 15, 20, 25, 30] {
            let y = Self::row_y(row);
            sketch
                .add(tag(row.to_string(), at(2.0, y)))
                .add(tag(row.to_string(), at(15.0, y)));
        }

        Ok(sketch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{draw::Drawing, element::Place};

    #[test]
    fn hole_names() {
        assert_eq!(Breadboard::hole("A1"), Some(Vec2::new(3.0, -2.0) * PINSPACING));
        assert_eq!(Breadboard::hole("F1"), Some(Vec2::new(10.0, -2.0) * PINSPACING));
        assert_eq!(Breadboard::hole("R2_30"), Some(Vec2::new(17.0, -31.0) * PINSPACING));
        assert_eq!(Breadboard::hole("K1"), None);
        assert_eq!(Breadboard::hole("A31"), None);
        assert_eq!(Breadboard::hole("L3_1"), None);
    }

    #[test]
    fn every_hole_is_an_anchor() {
        let sketch = Breadboard::new().sketch(&DrawSpec::default(), Vec2::ZERO).unwrap();
        assert_eq!(sketch.anchors.len(), ROWS * (COLUMNS.len() + RAILS.len()));
    }

    #[test]
    fn up_lays_rows_left_to_right_with_j_on_top() {
        let mut d = Drawing::new(&DrawSpec::default());
        let bb = d.add(Breadboard::new().up()).unwrap();
        let a1 = bb.anchor("A1").unwrap();
        let a2 = bb.anchor("A2").unwrap();
        let j1 = bb.anchor("J1").unwrap();
        let l1 = bb.anchor("L1_1").unwrap();
        assert!((a2.x - a1.x - PINSPACING).abs() < 1e-5);
        assert!((a2.y - a1.y).abs() < 1e-5);
        assert!(j1.y > a1.y && l1.y < a1.y);
        // E and F straddle the trench three pitches apart.
        let e1 = bb.anchor("E1").unwrap();
        let f1 = bb.anchor("F1").unwrap();
        assert!((f1.y - e1.y - 3.0 * PINSPACING).abs() < 1e-5);
    }
}
