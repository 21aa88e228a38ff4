use kiss3d::event::WindowEvent;

use crate::error::ControlError;
use crate::gui::camera::CameraRig;
use crate::gui::input::{InputRouter, PointerEvent, TooltipChange};
use crate::gui::theme::Theme;
use crate::model::{BodyID, BodyRegistry, Orrery};

/// The operations the UI is allowed to perform on a running orrery.
pub trait ControlSurface {
    /// Sets a planet's speed multiplier, clamped to [0, 10]. Returns the
    /// value that was stored.
    fn set_speed(&mut self, name: &str, value: f32) -> Result<f32, ControlError>;
    fn reset_all_speeds(&mut self);
    /// Returns whether the animation is now paused.
    fn toggle_pause(&mut self) -> bool;
    fn reset_camera(&mut self);
    /// Returns the theme now in effect.
    fn toggle_theme(&mut self) -> Theme;
}

/// What the UI needs to label a planet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetSummary<'a> {
    pub id: BodyID,
    pub name: &'a str,
    pub speed: f32,
    pub description: &'a str,
}

/// Everything that changes while the viewer runs, in one place. Only the
/// frame callback and the input handlers touch it, and never at the same
/// time, so nothing here needs locking.
pub struct App {
    orrery: Orrery,
    camera: CameraRig,
    input: InputRouter,
    paused: bool,
    theme: Theme,
}

impl App {
    pub fn new(registry: BodyRegistry, width: u32, height: u32) -> Self {
        App {
            orrery: Orrery::new(registry),
            camera: CameraRig::new(width, height),
            input: InputRouter::new(),
            paused: false,
            theme: Theme::default(),
        }
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn orrery(&self) -> &Orrery {
        &self.orrery
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraRig {
        &mut self.camera
    }

    pub fn input(&self) -> &InputRouter {
        &self.input
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Advances the animation by `dt` seconds unless paused. Returns whether
    /// anything moved.
    pub fn frame(&mut self, dt: f32) -> bool {
        if self.paused {
            return false;
        }
        self.orrery.advance(dt);
        true
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<TooltipChange> {
        self.input.handle(event, &mut self.camera, &self.orrery)
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent) -> Option<TooltipChange> {
        let event = self.input.translate(event)?;
        self.handle_pointer(event)
    }

    pub fn speed(&self, name: &str) -> Result<f32, ControlError> {
        let id = self.lookup(name)?;
        Ok(self.orrery.speed(id))
    }

    pub fn planets(&self) -> impl Iterator<Item = PlanetSummary<'_>> + '_ {
        self.orrery
            .registry()
            .planets()
            .map(move |(id, desc)| PlanetSummary {
                id,
                name: &desc.name,
                speed: self.orrery.speed(id),
                description: &desc.description,
            })
    }

    pub fn summary(&self, id: BodyID) -> PlanetSummary<'_> {
        let desc = self.orrery.descriptor(id);
        PlanetSummary {
            id,
            name: &desc.name,
            speed: self.orrery.speed(id),
            description: &desc.description,
        }
    }

    fn lookup(&self, name: &str) -> Result<BodyID, ControlError> {
        self.orrery
            .registry()
            .find(name)
            .ok_or_else(|| ControlError::UnknownBody(name.to_owned()))
    }
}

impl ControlSurface for App {
    fn set_speed(&mut self, name: &str, value: f32) -> Result<f32, ControlError> {
        let id = self.lookup(name)?;
        let speed = self.orrery.set_speed(id, value);
        log::debug!("{} speed changed to {:.1}x", name, speed);
        Ok(speed)
    }

    fn reset_all_speeds(&mut self) {
        self.orrery.reset_speeds();
        log::info!("All planet speeds reset to default");
    }

    fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        log::info!(
            "Animation {}",
            if self.paused { "paused" } else { "resumed" }
        );
        self.paused
    }

    fn reset_camera(&mut self) {
        self.camera.reset();
        log::info!("Camera reset to default position");
    }

    fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        log::info!("Switched to {} Mode", self.theme.name());
        self.theme
    }
}
