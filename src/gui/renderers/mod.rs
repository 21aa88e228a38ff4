use std::f32::consts::TAU;

use kiss3d::camera::Camera;
use kiss3d::renderer::{LineRenderer, PointRenderer, Renderer};
use nalgebra::{distance, Point3, Vector3};

use self::utils::{draw_path, sample_curve};
use super::theme::Palette;

mod starfield;
mod utils;

pub use starfield::Starfield;

const RING_SEGMENTS: usize = 128;
const STAR_SIZE: f32 = 1.5;

// Glow: rings spreading out from the body's rim, fading into the background
const HALO_LAYERS: usize = 6;
const HALO_SPREAD: f32 = 1.6;
const HALO_SEGMENTS: usize = 64;

#[derive(Debug, Clone, Copy)]
struct Halo {
    center: Point3<f32>,
    radius: f32,
    core: Point3<f32>,
    edge: Point3<f32>,
}

impl Halo {
    /// Radius and color of one glow layer; layer 0 sits on the rim.
    fn layer(&self, layer: usize) -> (f32, Point3<f32>) {
        let u = layer as f32 / HALO_LAYERS as f32;
        let radius = self.radius * (1.0 + u * (HALO_SPREAD - 1.0));
        let color = Point3::from(self.core.coords.lerp(&self.edge.coords, u));
        (radius, color)
    }
}

/// Everything that isn't a scene node: orbit rings, the star field and the
/// sun's glow. All of it is immediate-mode, so it has to be queued up again
/// every frame.
pub struct CompoundRenderer {
    line_renderer: LineRenderer,
    point_renderer: PointRenderer,
    halos: Vec<Halo>,
}

impl CompoundRenderer {
    pub fn new() -> Self {
        let mut point_renderer = PointRenderer::new();
        point_renderer.set_point_size(STAR_SIZE);

        CompoundRenderer {
            line_renderer: LineRenderer::new(),
            point_renderer,
            halos: vec![],
        }
    }

    /// Draws a flat circle of the given radius around the origin, in the
    /// orbital plane.
    pub fn draw_orbit_ring(&mut self, radius: f32, eye: &Point3<f32>, palette: &Palette) {
        let f = |theta: f32| Point3::new(radius * theta.cos(), 0.0, radius * theta.sin());
        draw_path(
            &mut self.line_renderer,
            sample_curve(f, 0.0, TAU, RING_SEGMENTS),
            |midpoint| palette.apply_fog(palette.orbit_color, distance(eye, midpoint)),
        );
    }

    pub fn draw_stars(&mut self, starfield: &Starfield, eye: &Point3<f32>, palette: &Palette) {
        for star in starfield.stars() {
            let color = palette.apply_fog(palette.star_tint, distance(eye, star));
            self.point_renderer.draw_point(*star, color);
        }
    }

    /// Queues a glow around a sphere. The glow always faces the camera, so
    /// it can only be laid out once the camera is known, in `render`.
    pub fn draw_halo(
        &mut self,
        center: Point3<f32>,
        radius: f32,
        core: Point3<f32>,
        edge: Point3<f32>,
    ) {
        self.halos.push(Halo {
            center,
            radius,
            core,
            edge,
        });
    }

    fn queue_halos(&mut self, camera: &dyn Camera) {
        if self.halos.is_empty() {
            return;
        }

        // Screen right and up, in world space
        let to_world = camera.view_transform().inverse();
        let right = to_world.transform_vector(&Vector3::x());
        let up = to_world.transform_vector(&Vector3::y());

        for halo in self.halos.drain(..) {
            for layer in 0..HALO_LAYERS {
                let (radius, color) = halo.layer(layer);
                let circle =
                    |t: f32| halo.center + (right * t.cos() + up * t.sin()) * radius;
                draw_path(
                    &mut self.line_renderer,
                    sample_curve(circle, 0.0, TAU, HALO_SEGMENTS),
                    |_| color,
                );
            }
        }
    }
}

impl Renderer for CompoundRenderer {
    fn render(&mut self, pass: usize, camera: &mut dyn Camera) {
        self.queue_halos(&*camera);
        self.line_renderer.render(pass, camera);
        self.point_renderer.render(pass, camera);
    }
}
