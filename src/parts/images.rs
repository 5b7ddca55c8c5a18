use crate::pictorial::{ImageElement, INCH, PINSPACING};

/// Lonely Binary logic analyser breakout board. Each header pin has a lower
/// anchor (`GND`, `CLK`, `7`..`0`) and an upper one with a `_top` suffix.
pub fn lonely_binary() -> ImageElement {
    const WIDTH_PX: f32 = 726.0;
    const HEIGHT_PX: f32 = 421.0;
    const GROUND_PX: (f32, f32) = (39.0, 152.0);
    const ROW_GAP_PX: f32 = 124.0;

    let width = 6.2;
    let height = width * HEIGHT_PX / WIDTH_PX;
    let x0 = width * GROUND_PX.0 / WIDTH_PX;
    let y_bottom = height * GROUND_PX.1 / HEIGHT_PX;
    let y_top = height * (GROUND_PX.1 + ROW_GAP_PX) / HEIGHT_PX;

    ["GND", "CLK", "7", "6", "5", "4", "3", "2", "1", "0"]
        .into_iter()
        .enumerate()
        .fold(ImageElement::new("lonely-binary-bb.png", width, height), |image, (i, name)| {
            let x = x0 + i as f32 * PINSPACING;
            image
                .pin(name, (x, y_bottom))
                .pin(format!("{name}_top"), (x, y_top))
        })
}

/// Arduino Uno photo scaled so its headers sit on the 0.1" grid.
pub fn arduino_uno() -> ImageElement {
    let width = 10.3;
    let height = width / 1.397;
    let mut image = ImageElement::new("arduino_uno.png", width, height).xy((-0.75, 0.0));

    let top = height * 0.956;
    let digital = ["aref", "gnd_top", "pin13", "pin12", "pin11", "pin10", "pin9", "pin8"];
    for (i, name) in digital.into_iter().enumerate() {
        image = image.pin(name, (3.4 + i as f32 * PINSPACING, top));
    }

    let bottom = 0.11 * INCH;
    let power = ["ioref", "reset", "threev3", "fivev", "gnd1", "gnd2", "vin"];
    let power_x = 1.23 * INCH;
    for (i, name) in power.into_iter().enumerate() {
        image = image.pin(name, (power_x + i as f32 * PINSPACING, bottom));
    }

    // Analog header starts two pitches after the last power pin.
    let analog_x = power_x + (power.len() - 1) as f32 * PINSPACING + 2.0 * PINSPACING;
    for (i, name) in ["A0", "A1", "A2", "A3", "A4", "A5"].into_iter().enumerate() {
        image = image.pin(name, (analog_x + i as f32 * PINSPACING, bottom));
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor(image: &ImageElement, name: &str) -> (f32, f32) {
        image.anchors.iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| (p.x, p.y))
            .unwrap_or_else(|| panic!("no anchor {name}"))
    }

    #[test]
    fn lonely_binary_rows() {
        let lb = lonely_binary();
        assert_eq!(lb.anchors.len(), 20);
        let (gx, gy) = anchor(&lb, "GND");
        let (zx, zy) = anchor(&lb, "0_top");
        assert!((zx - gx - 9.0 * PINSPACING).abs() < 1e-5);
        assert!(zy > gy);
    }

    #[test]
    fn arduino_headers() {
        let uno = arduino_uno();
        let (vin, _) = anchor(&uno, "vin");
        let (a0, y) = anchor(&uno, "A0");
        assert!((a0 - vin - 2.0 * PINSPACING).abs() < 1e-5);
        assert!((y - 0.11 * INCH).abs() < 1e-6);
        assert_eq!(uno.xy.x, -0.75);
    }
}
