use crate::{
    draw::{
        shape::{Paint, Shape},
        util::Vec2,
        DrawSpec, Sketch,
    },
    element::{two_terminal, Placement, Symbol},
    error::Result,
};

use super::PINSPACING;

const BAND_COLORS: [&str; 10] = [
    "black", "#8b4513", "red", "orange", "yellow", "green", "blue", "violet", "grey", "white",
];

/// Colour bands of a four-band resistor: two digits, multiplier, tolerance.
pub fn resistor_bands(ohms: f64) -> [&'static str; 4] {
    const GOLD: &str = "#d4af37";
    const SILVER: &str = "silver";

    if ohms <= 0.0 || !ohms.is_finite() {
        return ["black", "black", "black", GOLD];
    }

    let mut exponent = ohms.log10().floor() as i32 - 1;
    let mut digits = (ohms / 10f64.powi(exponent)).round() as usize;
    if digits >= 100 {
        digits /= 10;
        exponent += 1;
    }

    let multiplier = match exponent {
        -2 => SILVER,
        -1 => GOLD,
        e @ 0..=9 => BAND_COLORS[e as usize],
        e => {
            tracing::warn!(ohms, exponent = e, "resistance outside the colour code, clamping multiplier");
            if e < -2 { SILVER } else { BAND_COLORS[9] }
        }
    };
    [BAND_COLORS[digits / 10 % 10], BAND_COLORS[digits % 10], multiplier, GOLD]
}

/// Through-hole resistor with colour bands, drawn to scale for breadboard views.
#[derive(Clone, Debug)]
pub struct BandedResistor {
    pub ohms: f64,
}

impl BandedResistor {
    const BODY: f32 = 2.5 * PINSPACING;
    const RADIUS: f32 = 0.3 * PINSPACING;

    pub fn new(ohms: f64) -> Self {
        Self { ohms }
    }
}

impl Symbol for BandedResistor {
    fn name(&self) -> &'static str {
        "BandedResistor"
    }

    fn placement(&self) -> Placement {
        Placement::Linear
    }

    fn sketch(&self, _spec: &DrawSpec, span: Vec2) -> Result<Sketch> {
        let bands = resistor_bands(self.ohms);
        let mut sketch = two_terminal(span, Self::BODY, |sketch, a, b| {
            let r = Self::RADIUS.min((b - a) / 4.0);
            sketch.add(
                Shape::rect(Vec2::new(a, -r), Vec2::new(b, r), Paint::color("#d8c08e"))
                    .stroke(Paint::color("#8a7550")),
            );

            let width = (b - a) * 0.07;
            for (band, at) in bands.iter().zip([0.2, 0.33, 0.46, 0.8]) {
                let x = a + (b - a) * at;
                sketch.add(
                    Shape::rect(Vec2::new(x, -r), Vec2::new(x + width, r), Paint::color(*band))
                        .stroke(Paint::None),
                );
            }
        });

        // Leads are bare wire whatever colour the element is drawn in.
        for shape in sketch.shapes.iter_mut() {
            if let Shape::Poly { closed: false, stroke, .. } = shape {
                *stroke = Paint::color("#999");
            }
        }
        Ok(sketch)
    }
}

/// TO-92 package seen from above, legs `collector`, `base`, `emitter` one pitch apart.
#[derive(Clone, Debug, Default)]
pub struct To92;

impl To92 {
    pub fn new() -> Self {
        Self
    }
}

impl Symbol for To92 {
    fn name(&self) -> &'static str {
        "To92"
    }

    fn sketch(&self, _spec: &DrawSpec, _span: Vec2) -> Result<Sketch> {
        let ps = PINSPACING;
        let flat = 0.3 * ps;
        let center = Vec2::new(ps, flat);

        // Flat face along the legs, rounded back away from them.
        let points = (0..=24)
            .map(|i| {
                let Vec2 { x, y } = Vec2::polar(i as f32 * 7.5);
                center + Vec2::new(x * 1.4 * ps, y * 1.1 * ps)
            })
            .collect();

        let mut sketch = Sketch::new();
        sketch.add(Shape::polygon(points, Paint::color("#333")).stroke(Paint::color("#111")));
        for (i, leg) in ["collector", "base", "emitter"].into_iter().enumerate() {
            let foot = Vec2::x(i as f32 * ps);
            sketch
                .add(Shape::line(foot, foot + Vec2::y(flat)).stroke(Paint::color("#999")))
                .add(Shape::circle(foot, ps * 0.15, Paint::color("#999")).stroke(Paint::None))
                .anchor(leg, foot);
        }
        Ok(sketch)
    }
}
