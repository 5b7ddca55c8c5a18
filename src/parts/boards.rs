use crate::{
    draw::{
        shape::{Paint, Shape},
        util::Vec2,
    },
    element::ic::{Ic, IcPin, IcStyle},
    pictorial::{Module, PINSPACING},
};

/// Pin style shared by the tall development-board symbols.
pub fn board_style() -> IcStyle {
    IcStyle {
        pinspacing: 0.5,
        edgepad_w: 0.5,
        edgepad_h: 1.0,
        leadlen: 0.5,
    }
}

/// SparkFun Pro Micro (ATmega32U4) as a schematic block.
///
/// The three ground pins are anchored as `GND1`, `GND2` (left) and `GND3` (right).
pub fn atmega_ic() -> Ic {
    let left = ["9", "8", "7", "6", "5", "4", "3", "2"]
        .into_iter()
        .map(IcPin::left)
        .chain([
            IcPin::left("GND").anchorname("GND1"),
            IcPin::left("GND").anchorname("GND2"),
            IcPin::left("RXI"),
            IcPin::left("TXO"),
        ]);
    let right = ["10", "16", "14", "15", "A0", "A1", "A2", "A3", "VCC", "RST"]
        .into_iter()
        .map(IcPin::right)
        .chain([IcPin::right("GND").anchorname("GND3"), IcPin::right("RAW")]);

    Ic::new(left.chain(right).collect())
        .style(board_style())
        .botlabel("Atmega Board")
}

/// Pro Micro header board. Drawn upright with `TXO` at the origin and its
/// row running down; placed with `.up()` both rows run along +x, `RAW` row
/// six holes above the `TXO` row.
pub fn atmega_pictorial() -> Module {
    let down = Vec2::y(-1.0);
    Module::new("Pro Micro")
        .row(["TXO", "RXI", "GND", "GND_2", "2", "3", "4", "5", "6", "7", "8", "9"], 0.0, 0.0, down)
        .row(["RAW", "GND_3", "RST", "VCC", "A3", "A2", "A1", "A0", "15", "14", "16", "10"], 6.0, 0.0, down)
        .body((-1.0, -11.6), (7.0, 1.4))
        .board_color("#1f5fa8")
        .decorate(
            Shape::rect(Vec2::new(2.0, 0.9) * PINSPACING, Vec2::new(4.0, 1.9) * PINSPACING, Paint::color("#c0c0c0")),
        )
}

/// Seeed Studio XIAO ESP32C6 as a schematic block.
pub fn esp32c6_ic() -> Ic {
    let left = ["D6", "D5", "D4", "D3", "D2", "D1", "D0"].map(IcPin::left);
    let right = ["D7", "D8", "D9", "D10", "3.3V", "GND", "5V"].map(IcPin::right);
    Ic::new(left.into_iter().chain(right).collect()).botlabel("ESP32C6")
}

/// XIAO ESP32C6 header board, `D0` at the origin with `D0`..`D6` along +x and
/// the power row six holes above.
pub fn esp32c6_pictorial() -> Module {
    Module::new("XIAO ESP32C6")
        .row(["D0", "D1", "D2", "D3", "D4", "D5", "D6"], 0.0, 0.0, Vec2::x(1.0))
        .row(["5V", "GND", "3.3V", "D10", "D9", "D8", "D7"], 0.0, 6.0, Vec2::x(1.0))
        .body((-1.0, -1.0), (7.0, 7.0))
        .board_color("#2d2d2d")
        .decorate(
            Shape::rect(Vec2::new(-1.6, 2.0) * PINSPACING, Vec2::new(-0.4, 4.0) * PINSPACING, Paint::color("#c0c0c0")),
        )
}
