//! Circuit diagrams for the mouse-building documentation, drawn straight to SVG.
//!
//! A [`Drawing`](draw::Drawing) is built up one element at a time: each
//! element is placed relative to the current position, a given point, or an
//! anchor of something already placed. [`diagrams`] holds every figure the
//! documentation uses.

pub mod diagrams;
pub mod draw;
pub mod element;
pub mod error;
pub mod logic;
pub mod parts;
pub mod pictorial;

pub use error::{Error, Result};

/// Everything a diagram needs in scope.
pub mod prelude {
    pub use crate::{
        draw::{util::Vec2, DrawSpec, Drawing, Placed},
        element::{
            ic::{Ic, IcPin, IcStyle},
            misc::{BjtNpn, Dot, Ground},
            two_term::{Battery, Button, Lamp, Line, Resistor, Switch},
            wire::Wire,
            Loc, Place,
        },
        error::{Error, Result},
        logic::{Signal, TimingDiagram},
        pictorial::{BandedResistor, Breadboard, ImageElement, Module, To92},
    };
}
