use nalgebra::Point3;

use crate::model::color_from_hex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

/// Everything the theme is allowed to touch. Nothing here feeds back into
/// orbits or the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub clear_color: Point3<f32>,
    pub fog_color: Point3<f32>,
    pub fog_near: f32,
    pub fog_far: f32,
    pub star_tint: Point3<f32>,
    pub orbit_color: Point3<f32>,
    pub text_color: Point3<f32>,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                clear_color: color_from_hex(0x000011),
                fog_color: color_from_hex(0x000011),
                fog_near: 50.0,
                fog_far: 200.0,
                star_tint: color_from_hex(0xFFFFFF),
                orbit_color: color_from_hex(0x555555),
                text_color: color_from_hex(0xFFFFFF),
            },
            Theme::Light => Palette {
                clear_color: color_from_hex(0xEEEEEE),
                fog_color: color_from_hex(0xCCCCCC),
                fog_near: 50.0,
                fog_far: 200.0,
                star_tint: color_from_hex(0x333333),
                orbit_color: color_from_hex(0x999999),
                text_color: color_from_hex(0x222222),
            },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Dark
    }
}

impl Palette {
    /// Linear fog: untouched before `fog_near`, fully fog-colored past
    /// `fog_far`.
    pub fn apply_fog(&self, color: Point3<f32>, distance: f32) -> Point3<f32> {
        let amount = nalgebra::clamp(
            (distance - self.fog_near) / (self.fog_far - self.fog_near),
            0.0,
            1.0,
        );
        Point3::from(color.coords.lerp(&self.fog_color.coords, amount))
    }
}
