use super::body::{BodyDescriptor, BodyID};

const SUN_COLOR: u32 = 0xFFD700;
const SUN_RADIUS: f32 = 1.2;

/// Owns the descriptors for the sun and every planet. Planets are addressed
/// by `BodyID`, which is just their index in the table.
#[derive(Debug, Clone)]
pub struct BodyRegistry {
    sun: BodyDescriptor,
    planets: Vec<BodyDescriptor>,
}

impl BodyRegistry {
    pub fn new(sun: BodyDescriptor, planets: Vec<BodyDescriptor>) -> Self {
        BodyRegistry { sun, planets }
    }

    pub fn sun(&self) -> &BodyDescriptor {
        &self.sun
    }

    pub fn get(&self, id: BodyID) -> &BodyDescriptor {
        &self.planets[id.0]
    }

    pub fn planets(&self) -> impl Iterator<Item = (BodyID, &BodyDescriptor)> {
        self.planets
            .iter()
            .enumerate()
            .map(|(idx, desc)| (BodyID(idx), desc))
    }

    pub fn planet_ids(&self) -> impl Iterator<Item = BodyID> {
        (0..self.planets.len()).map(BodyID)
    }

    pub fn len(&self) -> usize {
        self.planets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planets.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<BodyID> {
        self.planets
            .iter()
            .position(|desc| desc.name == name)
            .map(BodyID)
    }
}

impl Default for BodyRegistry {
    fn default() -> Self {
        let sun = BodyDescriptor::new(
            "Sun",
            SUN_COLOR,
            SUN_RADIUS,
            0.0,
            0.0,
            0.0,
            "The star at the center",
        );

        #[rustfmt::skip]
        let planets = vec![
            BodyDescriptor::new("Mercury", 0x8C7853, 0.2,  3.0,  4.74, 0.02,  "Closest to the Sun"),
            BodyDescriptor::new("Venus",   0xFFC649, 0.3,  4.0,  3.5,  0.015, "Hottest planet"),
            BodyDescriptor::new("Earth",   0x6B93D6, 0.35, 5.0,  2.98, 0.02,  "Our home planet"),
            BodyDescriptor::new("Mars",    0xCD5C5C, 0.25, 6.5,  2.41, 0.018, "The Red Planet"),
            BodyDescriptor::new("Jupiter", 0xD8CA9D, 0.8,  9.0,  1.31, 0.04,  "Largest planet"),
            BodyDescriptor::new("Saturn",  0xFAD5A5, 0.7,  11.5, 0.97, 0.035, "Planet with rings"),
            BodyDescriptor::new("Uranus",  0x4FD0E7, 0.5,  14.0, 0.68, 0.025, "Ice giant"),
            BodyDescriptor::new("Neptune", 0x4B70DD, 0.48, 16.5, 0.54, 0.022, "Farthest planet"),
        ];

        BodyRegistry::new(sun, planets)
    }
}
