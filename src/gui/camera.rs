use std::f32::consts::PI;

use kiss3d::camera::Camera;
use kiss3d::event::WindowEvent;
use kiss3d::resource::ShaderUniform;
use kiss3d::window::Canvas;
use nalgebra::{Isometry3, Matrix4, Perspective3, Point2, Point3, Vector3};

use crate::math::geometry::{screen_to_ndc, spherical_to_cartesian, Ray};

pub const DEFAULT_THETA: f32 = 0.0;
pub const DEFAULT_PHI: f32 = PI / 4.0;
pub const DEFAULT_DISTANCE: f32 = 25.0;

pub const PHI_LIMIT: f32 = 0.1;
pub const MIN_DISTANCE: f32 = 5.0;
pub const MAX_DISTANCE: f32 = 100.0;

/// Spherical angles and zoom; the whole of the camera's movable state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub theta: f32,
    pub phi: f32,
    pub distance: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        CameraState {
            theta: DEFAULT_THETA,
            phi: DEFAULT_PHI,
            distance: DEFAULT_DISTANCE,
        }
    }
}

// An orbit-only camera. It always points at the origin, where the sun sits,
// and uses the y-axis as up. Unlike kiss3d's ArcBall it doesn't read input
// itself; the input router decides what a drag or a scroll means and calls
// `rotate` and `zoom`. The only event it listens to is the framebuffer
// resizing.
pub struct CameraRig {
    state: CameraState,
    // -- perspective --
    width: u32,
    height: u32,
    fovy: f32,
    znear: f32,
    zfar: f32,
}

impl CameraRig {
    pub fn new(width: u32, height: u32) -> Self {
        CameraRig {
            state: CameraState::default(),
            width: width.max(1),
            height: height.max(1),
            fovy: 75.0_f32.to_radians(),
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    fn projection(&self) -> Perspective3<f32> {
        Perspective3::new(
            self.width as f32 / self.height as f32,
            self.fovy,
            self.znear,
            self.zfar,
        )
    }

    fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection().into_inner()
    }

    fn view_matrix(&self) -> Matrix4<f32> {
        self.view_transform().to_homogeneous()
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    pub fn theta(&self) -> f32 {
        self.state.theta
    }

    pub fn phi(&self) -> f32 {
        self.state.phi
    }

    pub fn distance(&self) -> f32 {
        self.state.distance
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        // A minimized window reports zero; keep the aspect ratio finite
        self.width = width.max(1);
        self.height = height.max(1);
    }

    pub fn rotate(&mut self, dtheta: f32, dphi: f32) {
        self.state.theta += dtheta;
        self.state.phi = nalgebra::clamp(self.state.phi + dphi, PHI_LIMIT, PI - PHI_LIMIT);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.state.distance =
            nalgebra::clamp(self.state.distance + delta, MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn reset(&mut self) {
        self.state = CameraState::default();
    }

    /// Casts a ray from the eye through the given screen position (in pixels,
    /// origin at the top-left).
    pub fn pick_ray(&self, screen_pos: Point2<f32>) -> Ray {
        let ndc = screen_to_ndc(screen_pos, self.width as f32, self.height as f32);

        // Direction in view space, where the camera looks down -z
        let half_height = (self.fovy / 2.0).tan();
        let aspect = self.width as f32 / self.height as f32;
        let view_dir = Vector3::new(ndc.x * half_height * aspect, ndc.y * half_height, -1.0);

        let world_dir = self.view_transform().inverse_transform_vector(&view_dir);
        Ray::new(self.eye(), world_dir)
    }
}

impl Camera for CameraRig {
    fn handle_event(&mut self, _canvas: &Canvas, event: &WindowEvent) {
        if let WindowEvent::FramebufferSize(w, h) = *event {
            self.set_viewport(w, h);
        }
    }

    fn eye(&self) -> Point3<f32> {
        spherical_to_cartesian(self.state.distance, self.state.theta, self.state.phi)
    }

    fn view_transform(&self) -> Isometry3<f32> {
        Isometry3::look_at_rh(&self.eye(), &Point3::origin(), &Vector3::y())
    }

    fn transformation(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    fn inverse_transformation(&self) -> Matrix4<f32> {
        // phi never reaches the poles, so the view is never degenerate
        self.transformation()
            .try_inverse()
            .unwrap_or_else(Matrix4::identity)
    }

    fn clip_planes(&self) -> (f32, f32) {
        (self.znear, self.zfar)
    }

    fn update(&mut self, _canvas: &Canvas) {}

    fn upload(
        &self,
        _: usize,
        proj: &mut ShaderUniform<Matrix4<f32>>,
        view: &mut ShaderUniform<Matrix4<f32>>,
    ) {
        proj.upload(&self.projection_matrix());
        view.upload(&self.view_matrix());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_view() {
        let camera = CameraRig::new(800, 600);
        assert_eq!(camera.theta(), 0.0);
        assert_eq!(camera.phi(), PI / 4.0);
        assert_eq!(camera.distance(), 25.0);

        let eye = camera.eye();
        assert_relative_eq!(eye.coords.norm(), 25.0, epsilon = 1e-4);
        assert_relative_eq!(eye.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rotate_clamps_phi() {
        let mut camera = CameraRig::new(800, 600);
        camera.rotate(0.0, 100.0);
        assert_eq!(camera.phi(), PI - PHI_LIMIT);
        camera.rotate(0.0, -100.0);
        assert_eq!(camera.phi(), PHI_LIMIT);
    }

    #[test]
    fn test_zoom_clamps_distance() {
        let mut camera = CameraRig::new(800, 600);
        camera.zoom(1000.0);
        assert_eq!(camera.distance(), MAX_DISTANCE);
        camera.zoom(-1000.0);
        assert_eq!(camera.distance(), MIN_DISTANCE);
    }

    #[test]
    fn test_reset() {
        let mut camera = CameraRig::new(800, 600);
        camera.rotate(1.3, 0.7);
        camera.zoom(40.0);
        camera.reset();
        assert_eq!(camera.state(), CameraState::default());
    }

    #[test]
    fn test_center_ray_points_at_origin() {
        let camera = CameraRig::new(800, 600);
        let ray = camera.pick_ray(Point2::new(400.0, 300.0));

        let to_origin = (Point3::origin() - camera.eye()).normalize();
        assert_relative_eq!(ray.direction.into_inner(), to_origin, epsilon = 1e-4);
        assert!(ray.intersect_sphere(&Point3::origin(), 1.2).is_some());
    }

    #[test]
    fn test_corner_ray_misses_origin() {
        let camera = CameraRig::new(800, 600);
        let ray = camera.pick_ray(Point2::new(0.0, 0.0));
        assert_eq!(ray.intersect_sphere(&Point3::origin(), 1.2), None);
    }

    #[test]
    fn test_zero_viewport() {
        let mut camera = CameraRig::new(800, 600);
        camera.set_viewport(0, 0);
        assert_eq!((camera.width(), camera.height()), (1, 1));
    }
}
