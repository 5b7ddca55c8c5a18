//! Every drawing used by the documentation, by output name.
//!
//! Each diagram is a plain function that adds elements to an empty
//! [`Drawing`] in order. [`all`] lists them for the CLI and the tests.

use tracing::info_span;

use crate::{
    draw::{DrawSpec, Drawing, Placed},
    element::{two_term::Line, Place},
    error::Result,
};

mod button;
mod light;
mod level_shifter;
mod scroll_wheel;
mod sensor;
mod spi;

pub type Build = fn(&mut Drawing) -> Result<()>;

#[derive(Clone, Copy)]
pub struct Diagram {
    /// File stem of the rendered SVG.
    pub name: &'static str,
    pub build: Build,
}

impl Diagram {
    pub const fn new(name: &'static str, build: Build) -> Self {
        Self { name, build }
    }

    pub fn file_name(&self) -> String {
        format!("{}.svg", self.name)
    }

    pub fn render(&self, spec: &DrawSpec) -> Result<Drawing> {
        let _span = info_span!("diagram", name = self.name).entered();
        let mut drawing = Drawing::new(spec);
        (self.build)(&mut drawing)?;
        Ok(drawing)
    }
}

impl std::fmt::Debug for Diagram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagram").field("name", &self.name).finish()
    }
}

pub fn all() -> Vec<Diagram> {
    vec![
        Diagram::new("switched_light", light::switched_light),
        Diagram::new("closed_switched_light", light::closed_switched_light),
        Diagram::new("internal_pull_up", button::internal_pull_up),
        Diagram::new("internal_pull_up_bb", button::internal_pull_up_bb),
        Diagram::new("mouse_click_diagram", button::mouse_click_diagram),
        Diagram::new("mouse_click_pull_down_diagram", button::mouse_click_pull_down_diagram),
        Diagram::new("mouse_click_bb", button::mouse_click_bb),
        Diagram::new("mouse_click_pull_down_bb", button::mouse_click_pull_down_bb),
        Diagram::new("mouse_click_pull_down_bb_working", button::mouse_click_pull_down_bb_working),
        Diagram::new("scroll_wheel", scroll_wheel::scroll_wheel),
        Diagram::new("scroll_wheel_bb", scroll_wheel::scroll_wheel_bb),
        Diagram::new("three_wire_spi", spi::three_wire_spi),
        Diagram::new("clock_signal", spi::clock_signal),
        Diagram::new("three_wire_spi_data_signal", spi::three_wire_spi_data_signal),
        Diagram::new("three_wire_spi_multiple_peripherals", spi::three_wire_spi_multiple_peripherals),
        Diagram::new("clock_polarity", spi::clock_polarity),
        Diagram::new("low_polarity_cpha0", spi::low_polarity_cpha0),
        Diagram::new("level_shifter", level_shifter::level_shifter),
        Diagram::new("level_shifter_bb", level_shifter::level_shifter_bb),
        Diagram::new("esp32-pmw3320db-tydu", sensor::esp32_pmw3320db),
        Diagram::new("esp32-pmw3320db-tydu-interrupt", sensor::esp32_pmw3320db_interrupt),
        Diagram::new("esp32-pmw3320db-tydu-bb", sensor::esp32_pmw3320db_bb),
        Diagram::new("esp32-pmw3320db-tydu-bb-interrupt", sensor::esp32_pmw3320db_bb_interrupt),
        Diagram::new("ex_g_on_board_switch", sensor::on_board_switch),
        Diagram::new("esp32-spi", spi::esp32_spi),
        Diagram::new("pmw3320db-tydu", sensor::pmw3320db),
    ]
}

pub fn find(name: &str) -> Option<Diagram> {
    all().into_iter().find(|d| d.name == name)
}

/// Straight jumper wire between two breadboard holes.
fn jumper(d: &mut Drawing, bb: &Placed, from: &str, to: &str, color: &str) -> Result<Placed> {
    d.add(Line::new().at(bb.anchor(from)?).to(bb.anchor(to)?).color(color))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn names_are_unique() {
        let names: BTreeSet<_> = all().iter().map(|d| d.name).collect();
        assert_eq!(names.len(), all().len());
        assert_eq!(all().len(), 26);
    }

    #[test]
    fn find_by_name() {
        assert_eq!(find("esp32-spi").map(|d| d.file_name()).as_deref(), Some("esp32-spi.svg"));
        assert!(find("nope").is_none());
    }
}
