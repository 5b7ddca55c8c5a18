//! Reading a push button with the Pro Micro: internal pull-up, then an
//! external pull-down resistor.

use crate::{
    draw::{Drawing, Placed},
    element::{
        two_term::{Button, Line, Resistor},
        wire::Wire,
        Place,
    },
    error::Result,
    parts::{atmega_ic, atmega_pictorial},
    pictorial::{BandedResistor, Breadboard, Module},
};

use super::jumper;

pub fn internal_pull_up(d: &mut Drawing) -> Result<()> {
    let button = d.add(Button::new().label("Push Button"))?;
    let atmega = d.add(atmega_ic().at(button.end).anchor("GND1"))?;
    d.add(Wire::new("-|").at(atmega.anchor("9")?).to(button.start))?;
    Ok(())
}

/// Breadboard turned so its rows run left to right, with the Pro Micro
/// straddling the trench from `D1`.
fn pro_micro_breadboard(d: &mut Drawing) -> Result<Placed> {
    let bb = d.add(Breadboard::new().up())?;
    d.add(atmega_pictorial().up().at(bb.anchor("D1")?).anchor("TXO"))?;
    Ok(bb)
}

fn push_button(d: &mut Drawing, bb: &Placed) -> Result<Placed> {
    d.add(Module::push_button().at(bb.anchor("E16")?).anchor("Pin 4"))
}

pub fn internal_pull_up_bb(d: &mut Drawing) -> Result<()> {
    let bb = pro_micro_breadboard(d)?;
    jumper(d, &bb, "L2_3", "A4", "black")?;
    jumper(d, &bb, "L2_17", "A18", "black")?;
    jumper(d, &bb, "B12", "B16", "black")?;
    push_button(d, &bb)?;
    Ok(())
}

/// Returns VCC down and back round to the start of the button.
fn vcc_loop(d: &mut Drawing, atmega: &Placed, button: &Placed) -> Result<()> {
    d.add(Line::new().right().length(d.unit() * 0.5).at(atmega.anchor("VCC")?))?;
    d.add(Line::new().down().length(atmega.height() * 0.75))?;
    d.add(Line::new().left().tox(button.start.x))?;
    d.add(Line::new().up().toy(button.start.y))?;
    Ok(())
}

pub fn mouse_click_diagram(d: &mut Drawing) -> Result<()> {
    let button = d.add(Button::new().label("Push Button"))?;
    let atmega = d.add(atmega_ic().at(button.end).anchor("9"))?;
    vcc_loop(d, &atmega, &button)
}

pub fn mouse_click_pull_down_diagram(d: &mut Drawing) -> Result<()> {
    let button = d.add(Button::new().label("Push Button"))?;
    d.add(Line::new().right().length(d.unit() * 0.5))?;
    let atmega = d.add(atmega_ic().anchor("9"))?;
    vcc_loop(d, &atmega, &button)?;

    let gnd = atmega.anchor("GND1")?;
    d.add(Resistor::new().up().at(button.end).label("10KΩ"))?;
    d.add(Line::new().up().toy(gnd.y))?;
    d.add(Line::new().right().to(gnd))?;
    Ok(())
}

/// VCC to the `+` rail and on to the button, button output to pin 9 through
/// a jumper from `signal_from`.
fn mouse_click_breadboard(d: &mut Drawing, signal_from: &str, pull_down: bool) -> Result<()> {
    let bb = pro_micro_breadboard(d)?;
    jumper(d, &bb, "J4", "R1_3", "red")?;
    jumper(d, &bb, "R1_15", "J16", "red")?;
    push_button(d, &bb)?;
    jumper(d, &bb, signal_from, "B12", "blue")?;
    if pull_down {
        d.add(BandedResistor::new(10_000.0).at(bb.anchor("A4")?).to(bb.anchor("A12")?))?;
    }
    Ok(())
}

pub fn mouse_click_bb(d: &mut Drawing) -> Result<()> {
    mouse_click_breadboard(d, "B16", false)
}

pub fn mouse_click_pull_down_bb(d: &mut Drawing) -> Result<()> {
    mouse_click_breadboard(d, "B16", true)
}

/// Moves the signal jumper to the button's far leg, which is only connected
/// while the button is pressed.
pub fn mouse_click_pull_down_bb_working(d: &mut Drawing) -> Result<()> {
    mouse_click_breadboard(d, "B18", true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::DrawSpec;

    fn drawing() -> Drawing {
        Drawing::new(&DrawSpec::default())
    }

    #[test]
    fn vcc_loop_returns_to_button() {
        let mut d = drawing();
        mouse_click_diagram(&mut d).unwrap();
        assert!(d.here().length() < 1e-4, "{:?}", d.here());
    }

    #[test]
    fn pull_down_resistor_is_labelled() {
        let mut d = drawing();
        mouse_click_pull_down_diagram(&mut d).unwrap();
        assert!(d.texts().any(|t| t == "10KΩ"));
        assert!(d.to_svg_string().contains("class=\"Resistor\""));
    }

    #[test]
    fn breadboard_variants_differ_only_in_parts() {
        let mut plain = drawing();
        mouse_click_bb(&mut plain).unwrap();
        let mut pulled = drawing();
        mouse_click_pull_down_bb(&mut pulled).unwrap();
        assert_eq!(pulled.len(), plain.len() + 1);
        assert!(pulled.to_svg_string().contains("class=\"BandedResistor\""));
    }
}
