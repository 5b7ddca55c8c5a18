use std::mem;

use crate::{
    draw::{
        shape::{Align, Paint, Shape},
        util::Vec2,
        Sketch,
    },
    error::{Error, Result},
};

/// What one wave character draws for its period.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    /// `p`/`n` and, with edge arrows, `P`/`N`.
    Clock { positive: bool, arrows: bool },
    /// `0`/`1` with sloped edges, `l`/`h` with sharp ones.
    Level { high: bool, sharp: bool },
    /// `z`
    HighZ,
    /// `x`
    Unknown,
    /// `=` or `2`..`9`, labelled from the signal's data.
    Data(char),
}

impl Cell {
    pub fn parse(ch: char) -> Option<Self> {
        Some(match ch {
            'p' | 'P' => Cell::Clock { positive: true, arrows: ch == 'P' },
            'n' | 'N' => Cell::Clock { positive: false, arrows: ch == 'N' },
            '0' | 'l' => Cell::Level { high: false, sharp: ch == 'l' },
            '1' | 'h' => Cell::Level { high: true, sharp: ch == 'h' },
            'z' => Cell::HighZ,
            'x' => Cell::Unknown,
            '=' | '2'..='9' => Cell::Data(ch),
            _ => return None,
        })
    }

    fn fill(&self) -> Paint {
        let color = match self {
            Cell::Unknown => "#e4e4e4",
            Cell::Data('3') => "#ffffb4",
            Cell::Data('4') => "#ffe0b9",
            Cell::Data('5') => "#b9e0ff",
            Cell::Data('6') => "#ccfdfe",
            Cell::Data('7') => "#cdfdc5",
            Cell::Data('8') => "#f0c1fb",
            Cell::Data('9') => "#f5c2c0",
            _ => "white",
        };
        Paint::color(color)
    }
}

/// One cell held over consecutive periods `start..end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Run {
    pub cell: Cell,
    pub start: usize,
    pub end: usize,
}

/// Splits a wave string into runs. `.` and `|` extend the previous run; the
/// periods holding a `|` are returned alongside for gap markers.
pub fn runs(signal: &str, wave: &str) -> Result<(Vec<Run>, Vec<usize>)> {
    let mut runs: Vec<Run> = Vec::new();
    let mut gaps = Vec::new();

    for (i, ch) in wave.chars().enumerate() {
        match ch {
            '.' | '|' => {
                if ch == '|' {
                    gaps.push(i);
                }
                match runs.last_mut() {
                    Some(run) => run.end = i + 1,
                    None => runs.push(Run { cell: Cell::Unknown, start: i, end: i + 1 }),
                }
            }
            _ => {
                let cell = Cell::parse(ch).ok_or_else(|| Error::Wave { signal: signal.to_string(), ch })?;
                runs.push(Run { cell, start: i, end: i + 1 });
            }
        }
    }
    Ok((runs, gaps))
}

/// Vertical extent of one signal row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Row {
    pub high: f32,
    pub low: f32,
    pub rise: f32,
}

impl Row {
    pub fn mid(&self) -> f32 {
        (self.high + self.low) / 2.0
    }
}

/// Continuous polyline for the digital parts of a wave.
struct Trace {
    points: Vec<Vec2>,
    rise: f32,
}

impl Trace {
    fn step(&mut self, x: f32, y: f32, sharp: bool) {
        match self.points.last().copied() {
            Some(last) if (last.y - y).abs() > 1e-6 => {
                let rise = if sharp { 0.0 } else { self.rise };
                let corner = Vec2::new(x, last.y);
                if (corner - last).length() > 1e-6 {
                    self.points.push(corner);
                }
                self.points.push(Vec2::new(x + rise, y));
            }
            Some(_) => {}
            None => self.points.push(Vec2::new(x, y)),
        }
    }

    fn hold(&mut self, x: f32) {
        if let Some(last) = self.points.last().copied() {
            self.points.push(Vec2::new(x, last.y));
        }
    }

    /// Ends the current line and starts the next one from `restart`, if given.
    fn break_at(&mut self, sketch: &mut Sketch, restart: Option<Vec2>) {
        let points = mem::take(&mut self.points);
        if points.len() > 1 {
            sketch.add(Shape::polyline(points));
        }
        self.points.extend(restart);
    }
}

/// Draws `runs` into `sketch`; `xs` holds the x of every period boundary.
pub fn draw<'d>(
    sketch: &mut Sketch,
    runs: &[Run],
    gaps: &[usize],
    xs: &[f32],
    row: Row,
    data: &mut impl Iterator<Item = &'d String>,
) {
    let Row { high, low, rise } = row;
    let mid = row.mid();
    let height = high - low;
    let mut trace = Trace { points: Vec::new(), rise };

    for run in runs {
        let x0 = xs[run.start];
        let x1 = xs[run.end];

        match run.cell {
            Cell::Clock { positive, arrows } => {
                let (first, second) = if positive { (high, low) } else { (low, high) };
                // A negative clock opens on its falling edge.
                if !positive && trace.points.is_empty() {
                    trace.points.push(Vec2::new(x0, high));
                }
                for period in run.start..run.end {
                    let (a, b) = (xs[period], xs[period + 1]);
                    let half = (a + b) / 2.0;
                    trace.step(a, first, false);
                    trace.step(half, second, false);
                    trace.hold(b);
                    if arrows {
                        let dir = if positive { 1.0 } else { -1.0 };
                        sketch.add(clock_arrow(Vec2::new(a + rise / 2.0, mid), dir, height));
                    }
                }
            }
            Cell::Level { high: is_high, sharp } => {
                trace.step(x0, if is_high { high } else { low }, sharp);
                trace.hold(x1);
            }
            Cell::HighZ => {
                trace.break_at(sketch, None);
                sketch.add(Shape::line(Vec2::new(x0, mid), Vec2::new(x1, mid)).stroke(Paint::color("#2b6cb0")));
                trace.break_at(sketch, Some(Vec2::new(x1, mid)));
            }
            Cell::Unknown | Cell::Data(_) => {
                trace.break_at(sketch, None);
                let r = rise.min((x1 - x0) / 2.0) / 2.0;
                let outline = vec![
                    Vec2::new(x0, mid),
                    Vec2::new(x0 + r, high),
                    Vec2::new(x1 - r, high),
                    Vec2::new(x1, mid),
                    Vec2::new(x1 - r, low),
                    Vec2::new(x0 + r, low),
                ];
                sketch.add(Shape::polygon(outline, run.cell.fill()));

                if run.cell == Cell::Unknown {
                    hatch(sketch, x0 + r, x1 - r, row);
                } else if let Some(text) = data.next() {
                    let center = Vec2::new((x0 + x1) / 2.0, mid);
                    sketch.add(Shape::text(center, text, height * 0.6, Align::CENTER));
                }
                trace.break_at(sketch, Some(Vec2::new(x1, mid)));
            }
        }
    }
    trace.break_at(sketch, None);

    for &period in gaps {
        let x = (xs[period] + xs[period + 1]) / 2.0;
        let slant = height * 0.2;
        for dx in [-0.04, 0.04] {
            sketch.add(Shape::line(
                Vec2::new(x + dx - slant / 2.0, low - 0.05),
                Vec2::new(x + dx + slant / 2.0, high + 0.05),
            ));
        }
    }
}

fn hatch(sketch: &mut Sketch, from: f32, to: f32, row: Row) {
    let height = row.high - row.low;
    let lean = height * 0.5;
    let step = height * 0.35;
    let mut x = from;
    while x + lean <= to {
        sketch.add(
            Shape::line(Vec2::new(x, row.low), Vec2::new(x + lean, row.high))
                .stroke(Paint::color("#999"))
                .weight(0.5),
        );
        x += step;
    }
}

fn clock_arrow(center: Vec2, dir: f32, height: f32) -> Shape {
    let size = height * 0.2;
    let tip = center + Vec2::y(dir * size);
    let back = center - Vec2::y(dir * size);
    Shape::polygon(
        vec![tip, back + Vec2::x(size * 0.7), back - Vec2::x(size * 0.7)],
        Paint::Inherit,
    )
}
