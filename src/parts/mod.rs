//! The boards, chips and modules used across the project's diagrams.

mod boards;
mod chips;
mod images;

pub use boards::{atmega_ic, atmega_pictorial, board_style, esp32c6_ic, esp32c6_pictorial};
pub use chips::{arduino_ic, controller_ic, peripheral_ic, pmw3320db_ic, sensor_ic, wheel_encoder_ic};
pub use images::{arduino_uno, lonely_binary};
