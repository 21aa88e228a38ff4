use std::collections::HashMap;
use std::f32::consts::PI;

use nalgebra::Point3;

use super::body::{BodyDescriptor, BodyID};
use super::orbit::{clamp_speed, OrbitalState, Spin};
use super::registry::BodyRegistry;

// The sun ignores every speed setting.
const SUN_SPIN_RATE_Y: f32 = 0.5;
const SUN_SPIN_RATE_X: f32 = 0.2;

/// The moving parts of the solar system: one `OrbitalState` per planet plus
/// the sun's spin.
#[derive(Debug, Clone)]
pub struct Orrery {
    registry: BodyRegistry,
    states: HashMap<BodyID, OrbitalState>,
    sun_spin: Spin,
}

impl Orrery {
    pub fn new(registry: BodyRegistry) -> Self {
        // Spread the planets evenly around the sun to start with
        let n = registry.len().max(1) as f32;
        let states = registry
            .planets()
            .map(|(id, desc)| {
                let initial_angle = id.0 as f32 * 2.0 * PI / n;
                (id, OrbitalState::new(desc, initial_angle))
            })
            .collect();

        Orrery {
            registry,
            states,
            sun_spin: Spin::default(),
        }
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    pub fn descriptor(&self, id: BodyID) -> &BodyDescriptor {
        self.registry.get(id)
    }

    pub fn state(&self, id: BodyID) -> &OrbitalState {
        &self.states[&id]
    }

    pub fn position(&self, id: BodyID) -> Point3<f32> {
        self.state(id).position(self.registry.get(id))
    }

    pub fn sun_spin(&self) -> Spin {
        self.sun_spin
    }

    pub fn advance(&mut self, dt: f32) {
        for (id, state) in self.states.iter_mut() {
            state.advance(self.registry.get(*id), dt);
        }
        self.sun_spin.advance(SUN_SPIN_RATE_X, SUN_SPIN_RATE_Y, dt);
    }

    pub fn speed(&self, id: BodyID) -> f32 {
        self.state(id).speed_multiplier
    }

    /// Stores the clamped multiplier and returns what was actually stored.
    pub fn set_speed(&mut self, id: BodyID, value: f32) -> f32 {
        let speed = clamp_speed(value);
        if let Some(state) = self.states.get_mut(&id) {
            state.speed_multiplier = speed;
        }
        speed
    }

    pub fn reset_speeds(&mut self) {
        for (id, state) in self.states.iter_mut() {
            state.speed_multiplier = self.registry.get(*id).base_angular_speed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_initial_angles() {
        let orrery = Orrery::new(BodyRegistry::default());
        for id in orrery.registry().planet_ids() {
            assert_relative_eq!(orrery.state(id).angle, id.0 as f32 * PI / 4.0);
        }
    }

    #[test]
    fn test_zero_speed_freezes_one_body() {
        let mut orrery = Orrery::new(BodyRegistry::default());
        let earth = orrery.registry().find("Earth").unwrap();
        let mars = orrery.registry().find("Mars").unwrap();

        orrery.set_speed(earth, 0.0);
        let earth_before = orrery.position(earth);
        let mars_before = orrery.position(mars);
        orrery.advance(1.0);

        assert_eq!(orrery.position(earth), earth_before);
        assert_ne!(orrery.position(mars), mars_before);
    }

    #[test]
    fn test_sun_spin_ignores_speeds() {
        let mut orrery = Orrery::new(BodyRegistry::default());
        for id in orrery.registry().planet_ids().collect::<Vec<_>>() {
            orrery.set_speed(id, 0.0);
        }
        orrery.advance(2.0);
        assert_relative_eq!(orrery.sun_spin().y, 1.0);
        assert_relative_eq!(orrery.sun_spin().x, 0.4);
    }

    #[test]
    fn test_reset_speeds() {
        let mut orrery = Orrery::new(BodyRegistry::default());
        let jupiter = orrery.registry().find("Jupiter").unwrap();
        assert_eq!(orrery.set_speed(jupiter, 7.5), 7.5);
        orrery.reset_speeds();
        assert_eq!(orrery.speed(jupiter), 1.31);
    }
}
