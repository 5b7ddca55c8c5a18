use crate::{
    draw::{util::Vec2, Drawing},
    element::{two_term::Line, wire::Wire, Place},
    error::Result,
    parts::{atmega_ic, atmega_pictorial, wheel_encoder_ic},
    pictorial::{Breadboard, Module},
};

pub fn scroll_wheel(d: &mut Drawing) -> Result<()> {
    let enc = d.add(wheel_encoder_ic())?;
    let line = d.add(Line::new().right().at(enc.anchor("COM")?))?;
    let atmega = d.add(atmega_ic().at(line.end).anchor("GND1"))?;

    d.add(Wire::new("-|").at(enc.anchor("CLK")?).to(atmega.anchor("3")?))?;
    d.add(Wire::new("-|").at(enc.anchor("DT")?).to(atmega.anchor("2")?))?;
    Ok(())
}

/// Encoder hangs below the board, its legs jumpered into `A4`..`A6`.
pub fn scroll_wheel_bb(d: &mut Drawing) -> Result<()> {
    let bb = d.add(Breadboard::new().up())?;
    d.add(atmega_pictorial().up().at(bb.anchor("D1")?).anchor("TXO"))?;

    let a5 = bb.anchor("A5")?;
    let enc = d.add(Module::rotary_encoder().left().at(a5 + Vec2::y(-3.0)).anchor("EncoderPinC"))?;

    for (pin, hole) in [("EncoderPinB", "A4"), ("EncoderPinC", "A5"), ("EncoderPinA", "A6")] {
        d.add(Line::new().at(enc.anchor(pin)?).to(bb.anchor(hole)?).color("black"))?;
    }

    // Room for the encoder knob.
    d.reserve(a5 + Vec2::y(-5.0));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::DrawSpec;

    #[test]
    fn encoder_legs_line_up_with_columns() {
        let mut d = Drawing::new(&DrawSpec::default());
        let bb = d.add(Breadboard::new().up()).unwrap();
        let a5 = bb.anchor("A5").unwrap();
        let enc = d.add(Module::rotary_encoder().left().at(a5 + Vec2::y(-3.0)).anchor("EncoderPinC")).unwrap();
        for (pin, hole) in [("EncoderPinB", "A4"), ("EncoderPinA", "A6")] {
            let dx = enc.anchor(pin).unwrap().x - bb.anchor(hole).unwrap().x;
            assert!(dx.abs() < 1e-4, "{pin} is {dx} off {hole}");
        }

        let mut full = Drawing::new(&DrawSpec::default());
        scroll_wheel_bb(&mut full).unwrap();
        assert!(full.bounds().min.y <= a5.y - 5.0 + 1e-4);
    }

    #[test]
    fn schematic_wires_both_phases() {
        let mut d = Drawing::new(&DrawSpec::default());
        scroll_wheel(&mut d).unwrap();
        assert_eq!(d.to_svg_string().matches("class=\"Wire\"").count(), 2);
    }
}
