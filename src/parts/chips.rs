use crate::element::ic::{Ic, IcPin};

use super::boards::board_style;

/// PixArt PMW3320DB-TYDU optical mouse sensor, with package pin numbers.
pub fn pmw3320db_ic() -> Ic {
    Ic::new(vec![
        IcPin::left("REG").number(8),
        IcPin::left("VDD").number(7),
        IcPin::left("GND").number(6),
        IcPin::left("SCLK").number(5),
        IcPin::right("SDIO").number(1),
        IcPin::right("LED").number(2),
        IcPin::right("MOTION").number(3),
        IcPin::right("NCS").number(4),
    ])
    .botlabel("PMW3320DB-TYDU")
}

/// Mouse scroll wheel: a mechanical quadrature encoder.
pub fn wheel_encoder_ic() -> Ic {
    Ic::new(vec![IcPin::right("CLK"), IcPin::right("DT"), IcPin::right("COM")])
        .style(board_style())
        .botlabel("Scroll Wheel")
}

/// SPI controller with `cs_count` chip selects. A single select is named
/// `CS`; several are `CS1`.. with `CS1` on top.
pub fn controller_ic(cs_count: usize) -> Ic {
    let selects: Vec<IcPin> = match cs_count {
        1 => vec![IcPin::right("CS")],
        n => (1..=n).rev().map(|i| IcPin::right(format!("CS{i}"))).collect(),
    };
    let bus = ["DATA", "CLK", "GND"].map(IcPin::right);
    Ic::new(selects.into_iter().chain(bus).collect()).botlabel("Controller")
}

pub fn peripheral_ic(name: &str) -> Ic {
    Ic::new(["CS", "DATA", "CLK", "GND"].map(IcPin::left).to_vec()).botlabel(name)
}

/// Low-voltage sensor on the input side of the level shifter.
pub fn sensor_ic() -> Ic {
    Ic::new(vec![IcPin::right("GND"), IcPin::right("SDIO")]).botlabel("Sensor (2.2V)")
}

/// The Arduino Uno pins used by the level shifter.
pub fn arduino_ic() -> Ic {
    Ic::new(vec![IcPin::left("GND"), IcPin::left("Pin 8"), IcPin::left("5V")]).botlabel("Arduino Uno")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        draw::{util::Vec2, DrawSpec},
        element::Symbol,
    };

    fn names(ic: &Ic) -> Vec<&str> {
        ic.pins.iter().map(IcPin::anchor_name).collect()
    }

    #[test]
    fn controller_selects() {
        assert_eq!(names(&controller_ic(1)), vec!["CS", "DATA", "CLK", "GND"]);
        assert_eq!(
            names(&controller_ic(3)),
            vec!["CS3", "CS2", "CS1", "DATA", "CLK", "GND"]
        );
    }

    #[test]
    fn pmw_pins_are_numbered() {
        let sketch = pmw3320db_ic().sketch(&DrawSpec::default(), Vec2::ZERO).unwrap();
        for n in 1..=8 {
            assert!(sketch.anchors.contains_key(&format!("pin{n}")));
        }
        assert_eq!(sketch.anchors["pin6"], sketch.anchors["GND"]);
    }

    #[test]
    fn peripheral_takes_its_name() {
        assert_eq!(peripheral_ic("Peripheral 2").botlabel.as_deref(), Some("Peripheral 2"));
    }
}
