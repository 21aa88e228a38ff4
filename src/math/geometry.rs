use nalgebra::{Point2, Point3, Unit, Vector3};

/// Converts spherical coordinates into a point, using y as the polar axis.
/// `theta` is the azimuth measured from +x towards +z, `phi` is the angle
/// down from +y.
pub fn spherical_to_cartesian(radius: f32, theta: f32, phi: f32) -> Point3<f32> {
    Point3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

/// Maps a screen position (origin top-left, y down) into normalized device
/// coordinates, where both axes run from -1 to 1 and y points up.
pub fn screen_to_ndc(pos: Point2<f32>, width: f32, height: f32) -> Point2<f32> {
    Point2::new((pos.x / width) * 2.0 - 1.0, -(pos.y / height) * 2.0 + 1.0)
}

#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Unit<Vector3<f32>>,
}

impl Ray {
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Ray {
            origin,
            direction: Unit::new_normalize(direction),
        }
    }

    pub fn at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction.into_inner() * t
    }

    /// Returns the distance along the ray to the first place it touches the
    /// sphere, or None if it misses. Hits behind the origin don't count, but
    /// starting inside the sphere does (at t = 0).
    pub fn intersect_sphere(&self, center: &Point3<f32>, radius: f32) -> Option<f32> {
        // Solve |o + td - c|^2 = r^2 with |d| = 1:
        //   t^2 + 2t(d.m) + |m|^2 - r^2 = 0, where m = o - c
        let m = self.origin - center;
        let b = m.dot(&self.direction);
        let c = m.norm_squared() - radius * radius;

        // Outside the sphere and pointing away from it
        if c > 0.0 && b > 0.0 {
            return None;
        }

        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let t = -b - discriminant.sqrt();
        Some(t.max(0.0))
    }
}
