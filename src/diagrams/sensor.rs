//! XIAO ESP32C6 driving the PMW3320DB-TYDU optical sensor over a shared
//! SDIO line, with and without the MOTION interrupt.

use crate::{
    draw::{util::Vec2, Drawing},
    element::{
        misc::Ground,
        two_term::{Line, Resistor},
        wire::Wire,
        Loc, Place,
    },
    error::Result,
    parts::{esp32c6_ic, esp32c6_pictorial, pmw3320db_ic},
    pictorial::{BandedResistor, Breadboard, Module},
};

pub fn pmw3320db(d: &mut Drawing) -> Result<()> {
    d.add(pmw3320db_ic())?;
    Ok(())
}

fn sensor_schematic(d: &mut Drawing, interrupt: bool) -> Result<()> {
    let esp32 = d.add(esp32c6_ic())?;
    let pin = |name: &str| esp32.anchor(name);

    d.add(Line::new().at(pin("GND")?).right().length(4.0))?;
    let pmw = d.add(pmw3320db_ic().anchor("GND"))?;
    d.add(Wire::new("-|").at(pin("3.3V")?).to(pmw.anchor("VDD")?))?;

    // D10 writes through 1k, D9 reads the line directly.
    let r = d.add(Resistor::new().right().label_at("1kΩ", Loc::Top, -0.05).at(pin("D10")?))?;
    d.add(Line::new().at(r.end).toy(pin("D9")?.y).dot())?;
    d.add(Wire::new("-|").at(pin("D9")?).to(pmw.anchor("SDIO")?))?;

    d.add(Line::new().at(pin("D8")?).right().length(0.5))?;
    d.add(Wire::new("|-").to(pmw.anchor("SCLK")?))?;

    d.add(Line::new().at(pin("D3")?).left().length(0.25))?;
    d.add(Line::new().up().length(3.0))?;
    d.add(Wire::new("-|").to(pmw.anchor("NCS")?))?;

    if interrupt {
        d.add(Line::new().at(pin("D4")?).left().length(0.75))?;
        d.add(Line::new().up().length(4.3))?;
        d.add(Wire::new("c").k(13.0).to(pmw.anchor("MOTION")?))?;
    }
    Ok(())
}

pub fn esp32_pmw3320db(d: &mut Drawing) -> Result<()> {
    sensor_schematic(d, false)
}

pub fn esp32_pmw3320db_interrupt(d: &mut Drawing) -> Result<()> {
    sensor_schematic(d, true)
}

/// The sensor sits in a DIP-8 socket above the breadboard, wired over the
/// top edge. The 1k resistor bridges `H4` and `H5`, lifted clear of the holes.
fn sensor_breadboard(d: &mut Drawing, interrupt: bool) -> Result<()> {
    let chip = d.add(Module::dip8("PMW3320DB"))?;
    let bb = d.add(Breadboard::new().up().at(chip.anchor("pin1")? + Vec2::y(-2.0)).anchor("R2_1"))?;
    let hole = |name: &str| bb.anchor(name);
    let pin = |name: &str| chip.anchor(name);

    d.add(esp32c6_pictorial().at(hole("C1")?).anchor("D0"))?;

    let start = hole("H3")? + Vec2::new(0.1, 0.25);
    let end = Vec2::new(hole("H5")?.x, start.y);
    d.add(Line::new().at(hole("H4")?).to(start).color("grey"))?;
    d.add(Line::new().at(hole("H5")?).to(end).color("grey"))?;
    d.add(BandedResistor::new(1_000.0).at(start).tox(end.x).label_at("1kΩ", Loc::Top, (-0.9, -0.35)))?;

    d.add(Wire::new("n").k(2.3).at(hole("J2")?).to(pin("pin2")?))?;
    d.add(Wire::new("n").k(2.0).at(hole("J3")?).to(pin("pin3")?).color("red"))?;
    d.add(Line::new().at(hole("J5")?).up().length(2.0).color("blue"))?;
    d.add(Line::new().right().length(0.75).color("blue"))?;
    d.add(Wire::new("n").k(2.5).to(pin("pin5")?).color("blue"))?;
    d.add(Wire::new("n").k(2.6).at(hole("J6")?).to(pin("pin1")?).color("brown"))?;
    d.add(Line::new().at(hole("B4")?).left().length(1.75).color("green"))?;
    d.add(Wire::new("n").k(8.0).to(pin("pin8")?).color("green"))?;

    if interrupt {
        d.add(Line::new().at(hole("A5")?).left().length(2.4).color("pink"))?;
        d.add(Wire::new("n").k(8.65).to(pin("pin7")?).color("pink"))?;
    }
    Ok(())
}

pub fn esp32_pmw3320db_bb(d: &mut Drawing) -> Result<()> {
    sensor_breadboard(d, false)
}

pub fn esp32_pmw3320db_bb_interrupt(d: &mut Drawing) -> Result<()> {
    sensor_breadboard(d, true)
}

/// Exercise G: a push button between `D4` and ground.
pub fn on_board_switch(d: &mut Drawing) -> Result<()> {
    let bb = d.add(Breadboard::new().up())?;
    d.add(esp32c6_pictorial().at(bb.anchor("C1")?).anchor("D0"))?;

    let button = d.add(Module::push_button().at(bb.anchor("L1_4")? + Vec2::y(-1.0)).anchor("Pin 3"))?;
    d.add(Wire::new("|-").at(bb.anchor("A5")?).to(button.anchor("Pin 3")?).color("blue"))?;

    let gnd = d.add(Line::new().at(button.anchor("Pin 2")?).down().length(0.75).color("black"))?;
    d.add(Ground::new().at(gnd.end))?;
    d.add(Line::new().at(bb.anchor("I2")?).right().to(bb.anchor("I10")?).color("black"))?;
    d.add(Line::new().down().toy(gnd.end.y).color("black"))?;
    d.add(Ground::new())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::DrawSpec;

    fn render(build: fn(&mut Drawing) -> Result<()>) -> Drawing {
        let mut d = Drawing::new(&DrawSpec::default());
        build(&mut d).unwrap();
        d
    }

    #[test]
    fn interrupt_adds_motion_line() {
        let plain = render(esp32_pmw3320db);
        let interrupt = render(esp32_pmw3320db_interrupt);
        assert_eq!(interrupt.len(), plain.len() + 3);
    }

    #[test]
    fn breadboard_interrupt_adds_pink_jumper() {
        let plain = render(esp32_pmw3320db_bb);
        let interrupt = render(esp32_pmw3320db_bb_interrupt);
        assert_eq!(interrupt.len(), plain.len() + 2);
        assert!(interrupt.to_svg_string().contains("pink"));
        assert!(!plain.to_svg_string().contains("pink"));
    }

    #[test]
    fn switch_circuit_has_two_grounds() {
        let d = render(on_board_switch);
        assert_eq!(d.to_svg_string().matches("class=\"Ground\"").count(), 2);
    }
}
