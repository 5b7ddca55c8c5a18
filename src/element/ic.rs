use crate::{
    draw::{
        shape::{text_width, Align, HAlign, Paint, Shape, VAlign},
        util::Vec2,
        DrawSpec, Sketch,
    },
    error::{Error, Result},
};

use super::Symbol;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IcPin {
    pub name: String,
    pub side: Side,
    pub anchorname: Option<String>,
    pub pin: Option<String>,
}

impl IcPin {
    pub fn new(name: impl ToString, side: Side) -> Self {
        Self { name: name.to_string(), side, anchorname: None, pin: None }
    }

    pub fn left(name: impl ToString) -> Self {
        Self::new(name, Side::Left)
    }

    pub fn right(name: impl ToString) -> Self {
        Self::new(name, Side::Right)
    }

    pub fn top(name: impl ToString) -> Self {
        Self::new(name, Side::Top)
    }

    pub fn bottom(name: impl ToString) -> Self {
        Self::new(name, Side::Bottom)
    }

    /// Anchor name to use instead of the printed name, for repeated names like `GND`.
    pub fn anchorname(mut self, anchor: impl ToString) -> Self {
        self.anchorname = Some(anchor.to_string());
        self
    }

    /// Physical pin number, printed on the lead and exposed as `pin<N>`.
    pub fn number(mut self, pin: impl ToString) -> Self {
        self.pin = Some(pin.to_string());
        self
    }

    pub fn anchor_name(&self) -> &str {
        self.anchorname.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IcStyle {
    pub pinspacing: f32,
    pub edgepad_w: f32,
    pub edgepad_h: f32,
    pub leadlen: f32,
}

impl Default for IcStyle {
    fn default() -> Self {
        Self {
            pinspacing: 0.6,
            edgepad_w: 0.25,
            edgepad_h: 0.25,
            leadlen: 0.5,
        }
    }
}

/// Integrated circuit drawn as a box with labelled pins.
///
/// Pins on the left and right are listed bottom to top, pins on the top and
/// bottom left to right. Each side is centred on its edge.
#[derive(Clone, Debug)]
pub struct Ic {
    pub pins: Vec<IcPin>,
    pub style: IcStyle,
    pub botlabel: Option<String>,
    pub toplabel: Option<String>,
}

impl Ic {
    pub fn new(pins: Vec<IcPin>) -> Self {
        Self { pins, style: IcStyle::default(), botlabel: None, toplabel: None }
    }

    pub fn style(mut self, style: IcStyle) -> Self {
        self.style = style;
        self
    }

    pub fn botlabel(mut self, text: impl ToString) -> Self {
        self.botlabel = Some(text.to_string());
        self
    }

    pub fn toplabel(mut self, text: impl ToString) -> Self {
        self.toplabel = Some(text.to_string());
        self
    }

    fn side(&self, side: Side) -> impl Iterator<Item = &IcPin> {
        self.pins.iter().filter(move |p| p.side == side)
    }

    fn count(&self, side: Side) -> usize {
        self.side(side).count()
    }

    /// Width and height of the box, excluding leads.
    pub fn size(&self, spec: &DrawSpec) -> Vec2 {
        let IcStyle { pinspacing, edgepad_w, edgepad_h, .. } = self.style;
        let font = spec.small_font();
        let widest = |side| {
            self.side(side)
                .map(|p| text_width(spec, &p.name, font))
                .fold(0.0f32, f32::max)
        };

        let rows = self.count(Side::Left).max(self.count(Side::Right));
        let cols = self.count(Side::Top).max(self.count(Side::Bottom));

        let height = rows.saturating_sub(1) as f32 * pinspacing + 2.0 * edgepad_h;
        let label_width = widest(Side::Left) + widest(Side::Right) + font;
        let pin_width = cols.saturating_sub(1) as f32 * pinspacing;
        let width = label_width.max(pin_width).max(1.0) + 2.0 * edgepad_w;

        Vec2::new(width, height.max(pinspacing))
    }

    fn pin_positions(&self, side: Side, size: Vec2) -> Vec<Vec2> {
        let ps = self.style.pinspacing;
        let n = self.count(side);
        let span = n.saturating_sub(1) as f32 * ps;
        (0..n)
            .map(|i| {
                let along = i as f32 * ps;
                match side {
                    Side::Left => Vec2::new(0.0, (size.y - span) / 2.0 + along),
                    Side::Right => Vec2::new(size.x, (size.y - span) / 2.0 + along),
                    Side::Bottom => Vec2::new((size.x - span) / 2.0 + along, 0.0),
                    Side::Top => Vec2::new((size.x - span) / 2.0 + along, size.y),
                }
            })
            .collect()
    }
}

impl Symbol for Ic {
    fn name(&self) -> &'static str {
        "Ic"
    }

    fn sketch(&self, spec: &DrawSpec, _span: Vec2) -> Result<Sketch> {
        let size = self.size(spec);
        let lead = self.style.leadlen;
        let font = spec.small_font();
        let inset = font * 0.3;

        let mut sketch = Sketch::new();
        sketch.add(Shape::rect(Vec2::ZERO, size, Paint::None));

        for side in [Side::Left, Side::Right, Side::Top, Side::Bottom] {
            let (outward, name_align) = match side {
                Side::Left => (Vec2::x(-1.0), Align(HAlign::Start, VAlign::Middle)),
                Side::Right => (Vec2::x(1.0), Align(HAlign::End, VAlign::Middle)),
                Side::Top => (Vec2::y(1.0), Align(HAlign::Middle, VAlign::Top)),
                Side::Bottom => (Vec2::y(-1.0), Align(HAlign::Middle, VAlign::Bottom)),
            };

            for (pin, base) in self.side(side).zip(self.pin_positions(side, size)) {
                let tip = base + outward * lead;
                sketch
                    .add(Shape::line(base, tip))
                    .add(Shape::text(base - outward * inset, &pin.name, font, name_align));

                if let Some(number) = &pin.pin {
                    let mid = (base + tip) / 2.0 + outward.perp() * 0.05;
                    let align = Align::facing(outward.perp());
                    sketch.add(Shape::text(mid, number, font * 0.8, align));
                    insert_unique(&mut sketch, &format!("pin{number}"), tip)?;
                }
                insert_unique(&mut sketch, pin.anchor_name(), tip)?;
            }
        }

        let has = |side| self.count(side) > 0;
        if let Some(text) = &self.botlabel {
            let drop = if has(Side::Bottom) { lead } else { 0.0 };
            let pos = Vec2::new(size.x / 2.0, -drop - inset);
            sketch.add(Shape::text(pos, text, spec.font_size, Align(HAlign::Middle, VAlign::Top)));
        }
        if let Some(text) = &self.toplabel {
            let rise = if has(Side::Top) { lead } else { 0.0 };
            let pos = Vec2::new(size.x / 2.0, size.y + rise + inset);
            sketch.add(Shape::text(pos, text, spec.font_size, Align(HAlign::Middle, VAlign::Bottom)));
        }

        sketch.anchor("center", size / 2.0);
        Ok(sketch)
    }
}

fn insert_unique(sketch: &mut Sketch, name: &str, point: Vec2) -> Result<()> {
    if sketch.anchors.contains_key(name) {
        return Err(Error::DuplicateAnchor { element: "Ic".to_string(), anchor: name.to_string() });
    }
    sketch.anchor(name, point);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{draw::Drawing, element::Place};

    fn two_sided() -> Ic {
        Ic::new(vec![
            IcPin::left("CS"),
            IcPin::left("DATA"),
            IcPin::left("CLK"),
            IcPin::right("GND"),
        ])
    }

    #[test]
    fn left_pins_run_bottom_to_top() {
        let spec = DrawSpec::default();
        let sketch = two_sided().sketch(&spec, Vec2::ZERO).unwrap();
        let cs = sketch.anchors["CS"];
        let data = sketch.anchors["DATA"];
        let clk = sketch.anchors["CLK"];
        assert_eq!(cs.x, -0.5);
        assert!(cs.y < data.y && data.y < clk.y);
        assert!((data.y - cs.y - 0.6).abs() < 1e-5);
    }

    #[test]
    fn lone_pin_is_centred() {
        let spec = DrawSpec::default();
        let ic = two_sided();
        let size = ic.size(&spec);
        let sketch = ic.sketch(&spec, Vec2::ZERO).unwrap();
        let gnd = sketch.anchors["GND"];
        assert!((gnd.y - size.y / 2.0).abs() < 1e-5);
        assert!((gnd.x - (size.x + 0.5)).abs() < 1e-5);
    }

    #[test]
    fn duplicate_names_need_anchornames() {
        let spec = DrawSpec::default();
        let clash = Ic::new(vec![IcPin::left("GND"), IcPin::right("GND")]);
        assert!(matches!(
            clash.sketch(&spec, Vec2::ZERO),
            Err(Error::DuplicateAnchor { .. })
        ));

        let fine = Ic::new(vec![
            IcPin::left("GND").anchorname("GND1"),
            IcPin::right("GND").anchorname("GND2"),
        ]);
        let sketch = fine.sketch(&spec, Vec2::ZERO).unwrap();
        assert!(sketch.anchors.contains_key("GND1") && sketch.anchors.contains_key("GND2"));
    }

    #[test]
    fn numbered_pins_get_pin_anchors() {
        let spec = DrawSpec::default();
        let ic = Ic::new(vec![IcPin::left("VDD").number(7), IcPin::right("SDIO").number(1)]);
        let sketch = ic.sketch(&spec, Vec2::ZERO).unwrap();
        assert_eq!(sketch.anchors["pin7"], sketch.anchors["VDD"]);
        assert_eq!(sketch.anchors["pin1"], sketch.anchors["SDIO"]);
    }

    #[test]
    fn top_and_bottom_pins_run_left_to_right() {
        let spec = DrawSpec::default();
        let ic = Ic::new(vec![IcPin::top("A"), IcPin::top("B"), IcPin::bottom("C")]).toplabel("U1");
        let size = ic.size(&spec);
        let sketch = ic.sketch(&spec, Vec2::ZERO).unwrap();
        assert!(sketch.anchors["A"].x < sketch.anchors["B"].x);
        assert!((sketch.anchors["A"].y - (size.y + 0.5)).abs() < 1e-5);
        assert!((sketch.anchors["C"].x - size.x / 2.0).abs() < 1e-5);
        assert_eq!(sketch.anchors["C"].y, -0.5);
    }

    #[test]
    fn anchored_placement() {
        let mut d = Drawing::new(&DrawSpec::default());
        let ic = d.add(two_sided().at((5.0, 5.0)).anchor("CLK")).unwrap();
        assert!((ic.anchor("CLK").unwrap() - Vec2::new(5.0, 5.0)).length() < 1e-5);
        assert!(ic.anchor("GND").unwrap().x > 5.0);
    }
}
