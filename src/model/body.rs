use nalgebra::Point3;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BodyID(pub usize);

// All the immutable info about a body
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDescriptor {
    pub name: String,
    pub color: Point3<f32>,
    pub radius: f32,
    pub orbital_distance: f32,
    pub base_angular_speed: f32,
    pub rotation_speed: f32,
    pub description: String,
}

impl BodyDescriptor {
    pub fn new(
        name: &str,
        color: u32,
        radius: f32,
        orbital_distance: f32,
        base_angular_speed: f32,
        rotation_speed: f32,
        description: &str,
    ) -> Self {
        BodyDescriptor {
            name: name.to_owned(),
            color: color_from_hex(color),
            radius,
            orbital_distance,
            base_angular_speed,
            rotation_speed,
            description: description.to_owned(),
        }
    }
}

/// Turns a packed 0xRRGGBB color into the [0, 1] triple kiss3d wants.
pub fn color_from_hex(rgb: u32) -> Point3<f32> {
    let r = (rgb >> 16) & 0xFF;
    let g = (rgb >> 8) & 0xFF;
    let b = rgb & 0xFF;

    Point3::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        assert_eq!(color_from_hex(0xFF0000), Point3::new(1.0, 0.0, 0.0));
        assert_eq!(color_from_hex(0x00FF00), Point3::new(0.0, 1.0, 0.0));
        assert_eq!(color_from_hex(0x0000FF), Point3::new(0.0, 0.0, 1.0));
        assert_eq!(color_from_hex(0x000000), Point3::origin());
    }
}
