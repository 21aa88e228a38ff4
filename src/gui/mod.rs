use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use kiss3d::camera::Camera;
use kiss3d::event::EventManager;
use kiss3d::light::Light;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::window::{State, Window};
use nalgebra::Point3;

use self::controller::{Controller, FrameClock};
use self::view::View;
use crate::app::App;
use crate::config::Args;
use crate::error::StartupError;

pub mod camera;
pub mod controller;
pub mod input;
mod renderers;
pub mod theme;
mod view;

const WINDOW_TITLE: &str = "Solar System";

pub struct Simulation {
    app: App,
    view: View,
    controller: Controller,
    clock: FrameClock,
}

impl Simulation {
    pub fn new(app: App, window: &mut Window, args: &Args) -> Self {
        Self {
            view: View::new(window, &app, args.stars, args.star_seed),
            app,
            controller: Controller::new(),
            clock: FrameClock::new(args.max_dt),
        }
    }

    fn process_user_input(&mut self, mut events: EventManager) {
        for event in events.iter() {
            self.controller.process_event(&event.value, &mut self.app);
            if let Some(change) = self.app.handle_window_event(&event.value) {
                self.view.apply_tooltip(change);
            }
        }
    }
}

impl State for Simulation {
    fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        (
            Some(self.app.camera_mut()),
            None,
            Some(self.view.renderer_mut()),
            None,
        )
    }

    fn step(&mut self, window: &mut Window) {
        self.process_user_input(window.events());
        // Tick even while paused, so resuming doesn't jump
        let dt = self.clock.tick();
        self.app.frame(dt);
        self.view.update_scene_objects(&self.app);
        self.view.prerender_scene(window, &self.app, &self.controller);
        self.controller.increment_frame_counter();
    }
}

/// Opens the window, turning a backend failure into an error rather than a
/// crash.
pub fn open_window(width: u32, height: u32) -> Result<Window, StartupError> {
    catch_backend_failure(|| Window::new_with_size(WINDOW_TITLE, width, height))
}

/// Runs `init`, converting a panic into `StartupError::Backend`. The panic
/// hook is silenced meanwhile so the caller's report is the only one.
fn catch_backend_failure<T, F: FnOnce() -> T>(init: F) -> Result<T, StartupError> {
    let hook = panic::take_hook();
    panic::set_hook(Box::new(|_| {}));
    let result = panic::catch_unwind(AssertUnwindSafe(init));
    panic::set_hook(hook);

    result.map_err(|payload| StartupError::Backend(panic_message(payload.as_ref())))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        String::from("unknown error")
    }
}

/// Builds everything and runs the frame loop until the window closes.
pub fn run(args: &Args) -> Result<(), StartupError> {
    let registry = args.registry()?;

    let mut window = open_window(args.width, args.height)?;
    window.set_light(Light::Absolute(Point3::origin()));
    window.set_framerate_limit(Some(60));

    let mut app = App::new(registry, window.width(), window.height());
    app.set_paused(args.paused);
    app.set_theme(args.theme());

    let simulation = Simulation::new(app, &mut window, args);
    log::info!("Solar system initialized");
    window.render_loop(simulation);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message() {
        let payload = panic::catch_unwind(|| panic!("no GL context")).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "no GL context");

        let payload = panic::catch_unwind(|| panic!("{} failed", "init")).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "init failed");
    }

    #[test]
    fn test_catch_backend_failure() {
        assert_eq!(catch_backend_failure(|| 7).ok(), Some(7));

        let result: Result<(), _> = catch_backend_failure(|| panic!("no GL context"));
        match result {
            Err(StartupError::Backend(message)) => assert_eq!(message, "no GL context"),
            other => panic!("expected a backend error, got {:?}", other),
        }
    }
}
