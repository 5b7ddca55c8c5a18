//! Three-wire SPI: wiring, bus timing and the logic-analyser hookup.

use crate::{
    draw::{util::Vec2, Drawing, Placed},
    element::{two_term::Line, wire::Wire, Place},
    error::Result,
    logic::{Signal, TimingDiagram},
    parts::{controller_ic, esp32c6_pictorial, lonely_binary, peripheral_ic},
    pictorial::Breadboard,
};

use super::jumper;

pub fn three_wire_spi(d: &mut Drawing) -> Result<()> {
    let controller = d.add(controller_ic(1))?;
    d.add(Line::new().at(controller.anchor("CLK")?).right())?;
    let peripheral = d.add(peripheral_ic("Peripheral").anchor("CLK"))?;

    for pin in ["DATA", "CS", "GND"] {
        d.add(Wire::new("-|").at(controller.anchor(pin)?).to(peripheral.anchor(pin)?))?;
    }
    Ok(())
}

/// One controller, three peripherals sharing `GND`, `CLK` and `DATA`.
/// Each bus line drops off the controller at its own distance so the
/// vertical runs don't overlap.
pub fn three_wire_spi_multiple_peripherals(d: &mut Drawing) -> Result<()> {
    const DROP: f32 = 0.15;
    let unit = d.unit();

    let controller = d.add(controller_ic(3))?;
    let bus_drop = |d: &mut Drawing, pin: &str, steps: f32| -> Result<Placed> {
        d.add(Line::new().at(controller.anchor(pin)?).right().length(unit * DROP * steps).dot())
    };
    let gnd_drop = bus_drop(d, "GND", 2.0)?;
    let clk_drop = bus_drop(d, "CLK", 3.0)?;
    let data_drop = bus_drop(d, "DATA", 4.0)?;

    d.add(Line::new().at(gnd_drop.end).right().length(unit * (1.0 - DROP * 2.0)))?;
    let first = d.add(peripheral_ic("Peripheral 1").right().anchor("GND"))?;
    d.add(Wire::new("|-").at(data_drop.end).to(first.anchor("DATA")?))?;
    d.add(Wire::new("|-").at(clk_drop.end).to(first.anchor("CLK")?))?;
    d.add(Wire::new("|-").at(controller.anchor("CS1")?).to(first.anchor("CS")?))?;

    let offset = Vec2::y(-first.height() * 1.2);

    let second = d.add(peripheral_ic("Peripheral 2").right().at(first.anchor("CLK")? + offset).anchor("CLK"))?;
    d.add(Line::new().at(controller.anchor("CS2")?).right().length(unit * DROP))?;
    d.add(Wire::new("|-").to(second.anchor("CS")?))?;
    for (pin, bus) in [("GND", &gnd_drop), ("DATA", &data_drop), ("CLK", &clk_drop)] {
        d.add(Line::new().left().at(second.anchor(pin)?).tox(bus.end.x).dot())?;
    }

    let third = d.add(peripheral_ic("Peripheral 3").right().at(second.anchor("CLK")? + offset).anchor("CLK"))?;
    d.add(Wire::new("|-").at(controller.anchor("CS3")?).to(third.anchor("CS")?))?;
    for (pin, bus) in [("GND", &gnd_drop), ("DATA", &data_drop), ("CLK", &clk_drop)] {
        d.add(Wire::new("|-").at(bus.end).to(third.anchor(pin)?))?;
    }
    Ok(())
}

pub fn clock_signal(d: &mut Drawing) -> Result<()> {
    d.add(TimingDiagram::new(vec![Signal::new("clk", "p......")]))?;
    Ok(())
}

pub fn three_wire_spi_data_signal(d: &mut Drawing) -> Result<()> {
    d.add(TimingDiagram::new(vec![
        Signal::new("clk", "p......"),
        Signal::new("data", "x.==.x.").data(["request", "response"]),
        Signal::new("cs", "0.1..0."),
    ]))?;
    Ok(())
}

const CLOCK_POLARITY: &str = r#"{
    "signal": [
        { "name": "low_polarity", "wave": "0.p......" },
        { "name": "high_polarity", "wave": "1.n......" }
    ],
    "edge": [
        "[0^:0]+[0^:1.9] idle",
        "[0^:1.9]+[0^:8.9] signal",
        "[1v:0]+[1v:1.9] idle",
        "[1v:1.9]+[1v:8.9] signal"
    ]
}"#;

pub fn clock_polarity(d: &mut Drawing) -> Result<()> {
    d.add(TimingDiagram::from_wavedrom(CLOCK_POLARITY)?.ygap(0.5))?;
    Ok(())
}

/// Mode 0: data changes half a period before each rising edge.
pub fn low_polarity_cpha0(d: &mut Drawing) -> Result<()> {
    let half_shifted = [0.0, 0.5, 1.5, 2.5, 3.5, 4.5, 5.5, 6.5, 7.5, 8.5, 9.0];
    let diagram = TimingDiagram::new(vec![
        Signal::new("clk", "p........"),
        Signal::new("data", "x========x")
            .data((1..=8).map(|bit| format!("b{bit}")))
            .async_times(half_shifted),
    ])
    .edge("[0^:0.5]+[1v:0.5]{blue} write")
    .edge("[1v:2]+[0^:2]{red} read")
    .grid(false)
    .ygap(0.5);
    d.add(diagram)?;
    Ok(())
}

/// XIAO ESP32C6 wired to a Lonely Binary logic analyser.
pub fn esp32_spi(d: &mut Drawing) -> Result<()> {
    let bb = d.add(Breadboard::new().up())?;
    d.add(esp32c6_pictorial().at(bb.anchor("C1")?).anchor("D0"))?;
    d.add(lonely_binary().at(bb.anchor("F30")?).anchor("0_top"))?;

    jumper(d, &bb, "J2", "R2_1", "black")?;
    jumper(d, &bb, "R2_20", "J21", "black")?;
    jumper(d, &bb, "I4", "I30", "blue")?;
    jumper(d, &bb, "H6", "H29", "brown")?;
    jumper(d, &bb, "B4", "B28", "red")?;
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
    fn peripherals_share_the_bus() {
        let d = render(three_wire_spi_multiple_peripherals);
        let texts: Vec<_> = d.texts().collect();
        for name in ["Peripheral 1", "Peripheral 2", "Peripheral 3"] {
            assert!(texts.contains(&name), "missing {name}");
        }
        let text = d.to_svg_string();
        // Three wires to the first, the CS run to the second, four to the third.
        assert_eq!(text.matches("class=\"Wire\"").count(), 8);
    }

    #[test]
    fn polarity_edges_are_labelled() {
        let d = render(clock_polarity);
        assert_eq!(d.texts().filter(|t| *t == "idle").count(), 2);
        assert_eq!(d.texts().filter(|t| *t == "signal").count(), 2);
    }

    #[test]
    fn cpha0_marks_write_and_read() {
        let d = render(low_polarity_cpha0);
        let texts: Vec<_> = d.texts().collect();
        for label in ["b1", "b8", "write", "read"] {
            assert!(texts.contains(&label), "missing {label}");
        }
    }
}
