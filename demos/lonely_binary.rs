//! Lonely Binary breakout on a breadboard, written to `target/lonely_binary.svg`.

use std::path::Path;

use circuit_diagrams::{parts::lonely_binary, prelude::*};

fn main() -> Result<()> {
    let mut d = Drawing::new(&DrawSpec::default());
    let bb = d.add(Breadboard::new().up())?;
    let lb = d.add(lonely_binary().at(bb.anchor("F30")?).anchor("0_top"))?;

    d.add(Line::new().at(lb.anchor("GND")?).to(bb.anchor("A21")?))?;
    d.add(Line::new().at(lb.anchor("CLK_top")?).to(bb.anchor("J22")?))?;
    d.add(Line::new().at(lb.anchor("0_top")?).to(bb.anchor("J30")?))?;

    d.save(Path::new("target/lonely_binary.svg"))
}
