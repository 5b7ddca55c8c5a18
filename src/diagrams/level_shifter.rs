//! NPN level shifter between a 2.2V sensor and a 5V Arduino input.

use crate::{
    draw::Drawing,
    element::{
        misc::{BjtNpn, Ground},
        two_term::{Line, Resistor},
        wire::Wire,
        Loc, Place,
    },
    error::Result,
    parts::{arduino_ic, arduino_uno, sensor_ic},
    pictorial::{BandedResistor, Breadboard, To92},
};

pub fn level_shifter(d: &mut Drawing) -> Result<()> {
    let sensor = d.add(sensor_ic())?;
    d.add(Line::new().at(sensor.anchor("GND")?).down().length(d.unit() * 0.3))?;
    let ground = d.add(Ground::new())?.start.y;

    d.add(Resistor::new().right().label("1kΩ").at(sensor.anchor("SDIO")?))?;
    let bjt = d.add(BjtNpn::new().right().anchor("base").label("BC547B"))?;
    let collector = bjt.anchor("collector")?;

    d.add(Line::new().at(bjt.anchor("emitter")?).down().toy(ground))?;
    d.add(Ground::new())?;

    d.add(Line::new().at(collector).right())?;
    let arduino = d.add(arduino_ic().anchor("Pin 8"))?;
    d.add(Line::new().at(arduino.anchor("GND")?).down().toy(ground))?;
    d.add(Ground::new())?;

    let pull_up = d.add(Resistor::new().left().label("4.7kΩ").at(arduino.anchor("5V")?))?;
    d.add(Wire::new("-|").at(pull_up.end).to(collector))?;
    Ok(())
}

pub fn level_shifter_bb(d: &mut Drawing) -> Result<()> {
    let uno = d.add(arduino_uno())?;
    let bb = d.add(Breadboard::new().at((0.0, 9.0)).up())?;
    let hole = |name: &str| bb.anchor(name);

    d.add(To92::new().at(hole("J19")?))?;
    d.add(Wire::new("n").k(-1.0).at(uno.anchor("gnd1")?).to(hole("L2_28")?))?;
    d.add(Wire::new("n").k(-1.5).at(uno.anchor("fivev")?).to(hole("L1_29")?).color("red"))?;
    d.add(Wire::new("|-").k(1.0).at(uno.anchor("pin8")?).to(hole("G19")?).color("green"))?;

    d.add(BandedResistor::new(4_700.0).at(hole("E19")?).to(hole("F19")?).label_at("4.7kΩ", Loc::Bottom, 0.2))?;
    d.add(Wire::straight().at(hole("L1_20")?).to(hole("A19")?).color("red"))?;
    d.add(Wire::new("-|").at(hole("G21")?).to(hole("L2_27")?))?;
    d.add(BandedResistor::new(1_000.0).at(hole("I20")?).to(hole("I30")?).label_at("1kΩ", Loc::Top, 0.2))?;

    d.add(Line::new().at(hole("H30")?).right().label_at("SDIO", Loc::Right, 0.0))?;
    d.add(Line::new().at(hole("L2_29")?).right().label_at("Sensor GND", Loc::Right, 0.0))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{util::Vec2, DrawSpec};

    #[test]
    fn schematic_has_three_grounds() {
        let mut d = Drawing::new(&DrawSpec::default());
        level_shifter(&mut d).unwrap();
        assert_eq!(d.to_svg_string().matches("class=\"Ground\"").count(), 3);
        let texts: Vec<_> = d.texts().collect();
        for label in ["1kΩ", "BC547B", "4.7kΩ", "Sensor (2.2V)", "Arduino Uno"] {
            assert!(texts.contains(&label), "missing {label}");
        }
    }

    #[test]
    fn transistor_legs_follow_the_row() {
        let mut d = Drawing::new(&DrawSpec::default());
        let bb = d.add(Breadboard::new().at((0.0, 9.0)).up()).unwrap();
        let t = d.add(To92::new().at(bb.anchor("J19").unwrap())).unwrap();
        let close = |a: Vec2, b: Vec2| (a - b).length() < 1e-4;
        assert!(close(t.anchor("base").unwrap(), bb.anchor("J20").unwrap()));
        assert!(close(t.anchor("emitter").unwrap(), bb.anchor("J21").unwrap()));
    }
}
