use crate::{
    draw::Drawing,
    element::{
        two_term::{Battery, Lamp, Line, Switch},
        Place,
    },
    error::Result,
};

/// Battery, switch and lamp in one loop, battery `+` on top.
fn light_circuit(d: &mut Drawing, switch: Switch, lamp: Lamp) -> Result<()> {
    let lead = d.unit() * 0.75;
    let battery = d.add(Battery::new().reverse().up().spread_label(["−", "Battery", "+"]))?;
    d.add(Line::new().right().length(lead))?;
    d.add(switch.label("Switch"))?;
    d.add(Line::new().right().length(lead))?;
    d.add(lamp.down().label("Light"))?;
    d.add(Line::new().left().to(battery.start))?;
    Ok(())
}

pub fn switched_light(d: &mut Drawing) -> Result<()> {
    light_circuit(d, Switch::new(), Lamp::new())
}

pub fn closed_switched_light(d: &mut Drawing) -> Result<()> {
    light_circuit(d, Switch::closed(), Lamp::lit("gold"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::DrawSpec;

    #[test]
    fn loop_closes_at_battery() {
        let mut d = Drawing::new(&DrawSpec::default());
        switched_light(&mut d).unwrap();
        assert!(d.here().length() < 1e-4, "{:?}", d.here());
        assert!(d.texts().any(|t| t == "Light"));
    }
}
