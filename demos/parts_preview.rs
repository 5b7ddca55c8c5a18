//! Every chip symbol side by side, written to `target/parts_preview.svg`.

use std::path::Path;

use circuit_diagrams::{parts, prelude::*};

fn main() -> Result<()> {
    let chips: Vec<(&str, Ic)> = vec![
        ("atmega", parts::atmega_ic()),
        ("esp32c6", parts::esp32c6_ic()),
        ("pmw3320db", parts::pmw3320db_ic()),
        ("wheel", parts::wheel_encoder_ic()),
        ("controller", parts::controller_ic(3)),
        ("peripheral", parts::peripheral_ic("Peripheral")),
        ("sensor", parts::sensor_ic()),
        ("arduino", parts::arduino_ic()),
    ];

    let mut d = Drawing::new(&DrawSpec::default());
    let mut x = 0.0;
    for (name, chip) in chips {
        let placed = d.add(chip.at((x, 0.0)))?;
        println!("{name:>12}: {:.2} x {:.2}", placed.width(), placed.height());
        x = placed.bounds.max.x + 1.5;
    }

    d.save(Path::new("target/parts_preview.svg"))
}
