//! Digital timing diagrams in the style of WaveDrom.
//!
//! Each [`Signal`] is a row; each character of its wave is one period.
//! Annotations between rows are written as [`Edge`] strings.

use serde::Deserialize;

use crate::{
    draw::{
        shape::{Align, HAlign, Paint, Shape, VAlign},
        util::Vec2,
        DrawSpec, Sketch,
    },
    element::Symbol,
    error::{Error, Result},
};

pub mod edge;
pub mod wave;

pub use edge::{Connector, Edge, EdgePoint, Level};
use wave::Row;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Signal {
    pub name: String,
    pub wave: String,
    #[serde(default)]
    pub data: Vec<String>,
    /// Period boundaries, one more than the wave has characters.
    #[serde(default, rename = "async")]
    pub async_times: Vec<f32>,
}

impl Signal {
    pub fn new(name: impl ToString, wave: impl ToString) -> Self {
        Self {
            name: name.to_string(),
            wave: wave.to_string(),
            data: Vec::new(),
            async_times: Vec::new(),
        }
    }

    pub fn data<S: ToString>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.data = labels.into_iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn async_times(mut self, times: impl IntoIterator<Item = f32>) -> Self {
        self.async_times = times.into_iter().collect();
        self
    }

    fn periods(&self) -> usize {
        self.wave.chars().count()
    }

    /// Boundary times in periods.
    fn boundaries(&self) -> Result<Vec<f32>> {
        let n = self.periods();
        if self.async_times.is_empty() {
            return Ok((0..=n).map(|i| i as f32).collect());
        }
        if self.async_times.len() != n + 1 {
            return Err(Error::AsyncTimes {
                signal: self.name.clone(),
                given: self.async_times.len(),
                expected: n + 1,
            });
        }
        Ok(self.async_times.clone())
    }
}

#[derive(Deserialize)]
struct WaveJson {
    signal: Vec<Signal>,
    #[serde(default)]
    edge: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct TimingDiagram {
    pub signals: Vec<Signal>,
    pub edges: Vec<String>,
    pub ygap: f32,
    pub yheight: f32,
    pub period: f32,
    pub risetime: f32,
    pub grid: bool,
}

impl TimingDiagram {
    pub fn new(signals: Vec<Signal>) -> Self {
        Self {
            signals,
            edges: Vec::new(),
            ygap: 0.3,
            yheight: 0.5,
            period: 0.5,
            risetime: 0.15,
            grid: true,
        }
    }

    /// Reads the `signal` and `edge` lists of a WaveDrom JSON document.
    pub fn from_wavedrom(json: &str) -> Result<Self> {
        let WaveJson { signal, edge } = serde_json::from_str(json)?;
        Ok(Self { edges: edge, ..Self::new(signal) })
    }

    pub fn edge(mut self, spec: impl ToString) -> Self {
        self.edges.push(spec.to_string());
        self
    }

    pub fn ygap(mut self, ygap: f32) -> Self {
        self.ygap = ygap;
        self
    }

    pub fn grid(mut self, grid: bool) -> Self {
        self.grid = grid;
        self
    }

    fn row(&self, index: usize) -> Row {
        let high = -(index as f32) * (self.yheight + self.ygap);
        Row { high, low: high - self.yheight, rise: self.risetime }
    }

    fn point(&self, p: &EdgePoint) -> Vec2 {
        let row = self.row(p.row);
        let y = match p.level {
            Level::High => row.high,
            Level::Middle => row.mid(),
            Level::Low => row.low,
        };
        Vec2::new(p.time * self.period, y)
    }
}

impl Symbol for TimingDiagram {
    fn name(&self) -> &'static str {
        "TimingDiagram"
    }

    fn sketch(&self, spec: &DrawSpec, _span: Vec2) -> Result<Sketch> {
        let mut sketch = Sketch::new();

        let longest = self.signals.iter().map(Signal::periods).max().unwrap_or(0);
        if self.grid && !self.signals.is_empty() {
            let top = self.ygap / 2.0;
            let bottom = self.row(self.signals.len() - 1).low - self.ygap / 2.0;
            for i in 0..=longest {
                let x = i as f32 * self.period;
                sketch.add(
                    Shape::line(Vec2::new(x, top), Vec2::new(x, bottom))
                        .stroke(Paint::color("#ccc"))
                        .weight(0.5)
                        .dashed(),
                );
            }
        }

        for (i, signal) in self.signals.iter().enumerate() {
            let row = self.row(i);
            let (runs, gaps) = wave::runs(&signal.name, &signal.wave)?;
            let xs: Vec<f32> = signal.boundaries()?.iter().map(|t| t * self.period).collect();

            let name_at = Vec2::new(-self.period * 0.3, row.mid());
            sketch.add(Shape::text(name_at, &signal.name, spec.font_size, Align(HAlign::End, VAlign::Middle)));
            wave::draw(&mut sketch, &runs, &gaps, &xs, row, &mut signal.data.iter());
            sketch.anchor(format!("{}_start", signal.name), Vec2::new(0.0, row.mid()));
        }

        for text in &self.edges {
            let edge: Edge = text.parse()?;
            for point in [&edge.from, &edge.to] {
                if point.row >= self.signals.len() {
                    return Err(Error::edge(text, format!("row {} out of range", point.row)));
                }
            }
            edge.draw(&mut sketch, self.point(&edge.from), self.point(&edge.to), spec.font_size);
        }

        Ok(sketch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{draw::Drawing, element::Place};

    fn spi() -> TimingDiagram {
        TimingDiagram::new(vec![
            Signal::new("clk", "p......"),
            Signal::new("data", "x.==.x.").data(["request", "response"]),
            Signal::new("cs", "0.1..0."),
        ])
    }

    #[test]
    fn rows_stack_downwards() {
        let d = spi();
        assert_eq!(d.row(0).high, 0.0);
        assert!((d.row(1).high + 0.8).abs() < 1e-6);
        assert!(d.row(2).low < d.row(1).low);
    }

    #[test]
    fn renders_names_and_data() {
        let mut drawing = Drawing::new(&DrawSpec::default());
        drawing.add(spi()).unwrap();
        let texts: Vec<_> = drawing.texts().collect();
        for text in ["clk", "data", "cs", "request", "response"] {
            assert!(texts.contains(&text), "missing {text}");
        }
    }

    #[test]
    fn async_length_is_checked() {
        let bad = TimingDiagram::new(vec![Signal::new("data", "x==x").async_times([0.0, 0.5, 2.0])]);
        let err = bad.sketch(&DrawSpec::default(), Vec2::ZERO).unwrap_err();
        assert!(matches!(err, Error::AsyncTimes { given: 3, expected: 5, .. }));
    }

    #[test]
    fn edge_rows_must_exist() {
        let d = spi().edge("[0^:1]->[3v:1] nowhere");
        let err = d.sketch(&DrawSpec::default(), Vec2::ZERO).unwrap_err();
        assert!(err.to_string().contains("row 3 out of range"), "{err}");
    }

    #[test]
    fn wavedrom_json() {
        let d = TimingDiagram::from_wavedrom(
            r#"{
                "signal": [
                    { "name": "clk", "wave": "p........" },
                    { "name": "data", "wave": "x==x", "data": ["b1", "b2"], "async": [0, 0.5, 1.5, 2.5, 3] }
                ],
                "edge": ["[0^:0.5]+[1v:0.5]{blue} write"]
            }"#,
        )
        .unwrap();
        assert_eq!(d.signals[1].async_times, vec![0.0, 0.5, 1.5, 2.5, 3.0]);
        assert_eq!(d.edges.len(), 1);

        let mut drawing = Drawing::new(&DrawSpec::default());
        let placed = drawing.add(d.at((1.0, 1.0))).unwrap();
        assert!(placed.anchor("data_start").is_ok());
        assert!(drawing.to_svg_string().contains("blue"));
    }
}
