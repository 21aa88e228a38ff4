use std::time::{Duration, Instant};

use kiss3d::event::{Action, Key, WindowEvent};

use crate::app::{App, ControlSurface};
use crate::model::BodyID;

// Key config, all in one place
const KEY_TOGGLE_PAUSE: Key = Key::Space;
const KEY_RESET_SPEEDS: Key = Key::R;
const KEY_RESET_CAMERA: Key = Key::C;
const KEY_TOGGLE_THEME: Key = Key::T;
const KEY_TOGGLE_PANEL: Key = Key::H;
const KEY_SPEED_UP: Key = Key::Up;
const KEY_SLOW_DOWN: Key = Key::Down;
const KEY_STOP: Key = Key::Key0;
const KEY_SELECT: [Key; 8] = [
    Key::Key1,
    Key::Key2,
    Key::Key3,
    Key::Key4,
    Key::Key5,
    Key::Key6,
    Key::Key7,
    Key::Key8,
];

// Same granularity as the slider on the speed panel
pub const SPEED_STEP: f32 = 0.1;

const FPS_WINDOW: Duration = Duration::from_secs(1);

/// Maps keys onto control surface operations, and keeps the bits of UI state
/// that don't belong to the simulation itself.
pub struct Controller {
    selected: BodyID,
    show_panel: bool,
    fps_counter: FpsCounter,
}

/// Frame rate averaged over fixed windows of wall time. The reading only
/// changes when a window closes, so the HUD doesn't flicker.
pub struct FpsCounter {
    window: Duration,
    window_start: Instant,
    frames: u32,
    reading: f32,
}

impl FpsCounter {
    pub fn new(window: Duration) -> Self {
        FpsCounter {
            window,
            window_start: Instant::now(),
            frames: 0,
            reading: 0.0,
        }
    }

    pub fn value(&self) -> f32 {
        self.reading
    }

    pub fn record_frame(&mut self) {
        self.frames += 1;

        let elapsed = self.window_start.elapsed();
        if elapsed >= self.window && !elapsed.is_zero() {
            self.reading = self.frames as f32 / elapsed.as_secs_f32();
            self.window_start = Instant::now();
            self.frames = 0;
        }
    }
}

/// Measures wall time between frames. It should be ticked every frame, even
/// paused ones, so that unpausing doesn't dump the whole pause into one step.
pub struct FrameClock {
    last: Instant,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        FrameClock {
            last: Instant::now(),
            max_dt: max_dt.max(0.0),
        }
    }

    /// Seconds since the previous tick, capped at `max_dt`.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt.min(self.max_dt)
    }
}

impl Controller {
    pub fn new() -> Self {
        Controller {
            selected: BodyID(0),
            show_panel: true,
            fps_counter: FpsCounter::new(FPS_WINDOW),
        }
    }

    pub fn process_event(&mut self, event: &WindowEvent, app: &mut App) {
        let key = match *event {
            WindowEvent::Key(key, Action::Press, _) => key,
            _ => return,
        };

        match key {
            KEY_TOGGLE_PAUSE => {
                app.toggle_pause();
            }
            KEY_RESET_SPEEDS => app.reset_all_speeds(),
            KEY_RESET_CAMERA => app.reset_camera(),
            KEY_TOGGLE_THEME => {
                app.toggle_theme();
            }
            KEY_TOGGLE_PANEL => self.show_panel = !self.show_panel,
            KEY_SPEED_UP => self.nudge_selected_speed(app, SPEED_STEP),
            KEY_SLOW_DOWN => self.nudge_selected_speed(app, -SPEED_STEP),
            KEY_STOP => self.set_selected_speed(app, 0.0),
            other => {
                if let Some(idx) = KEY_SELECT.iter().position(|k| *k == other) {
                    if idx < app.orrery().registry().len() {
                        self.selected = BodyID(idx);
                    }
                }
            }
        }
    }

    fn nudge_selected_speed(&self, app: &mut App, delta: f32) {
        if app.orrery().registry().is_empty() {
            return;
        }
        let current = app.summary(self.selected).speed;
        // Snap to the slider's grid so repeated nudges don't accumulate error
        let target = ((current + delta) / SPEED_STEP).round() * SPEED_STEP;
        self.set_selected_speed(app, target);
    }

    fn set_selected_speed(&self, app: &mut App, value: f32) {
        if app.orrery().registry().is_empty() {
            return;
        }
        let name = app.orrery().descriptor(self.selected).name.clone();
        if let Err(e) = app.set_speed(&name, value) {
            log::warn!("{}", e);
        }
    }

    pub fn selected(&self) -> BodyID {
        self.selected
    }

    pub fn show_panel(&self) -> bool {
        self.show_panel
    }

    pub fn fps(&self) -> f32 {
        self.fps_counter.value()
    }

    pub fn increment_frame_counter(&mut self) {
        self.fps_counter.record_frame()
    }
}

impl Default for Controller {
    fn default() -> Self {
        Controller::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::theme::Theme;
    use crate::model::BodyRegistry;
    use kiss3d::event::Modifiers;

    fn press(key: Key) -> WindowEvent {
        WindowEvent::Key(key, Action::Press, Modifiers::empty())
    }

    fn app() -> App {
        App::new(BodyRegistry::default(), 800, 600)
    }

    #[test]
    fn test_global_keys() {
        let mut app = app();
        let mut controller = Controller::new();

        controller.process_event(&press(KEY_TOGGLE_PAUSE), &mut app);
        assert!(app.is_paused());
        controller.process_event(&press(KEY_TOGGLE_THEME), &mut app);
        assert_eq!(app.theme(), Theme::Light);
        controller.process_event(&press(KEY_TOGGLE_PANEL), &mut app);
        assert!(!controller.show_panel());
    }

    #[test]
    fn test_key_release_ignored() {
        let mut app = app();
        let mut controller = Controller::new();
        let released = WindowEvent::Key(KEY_TOGGLE_PAUSE, Action::Release, Modifiers::empty());
        controller.process_event(&released, &mut app);
        assert!(!app.is_paused());
    }

    #[test]
    fn test_select_and_adjust() {
        let mut app = app();
        let mut controller = Controller::new();

        // Select Earth, speed it up once, then stop it
        controller.process_event(&press(Key::Key3), &mut app);
        assert_eq!(controller.selected(), BodyID(2));
        controller.process_event(&press(KEY_SPEED_UP), &mut app);
        approx::assert_relative_eq!(app.speed("Earth").unwrap(), 3.1, epsilon = 1e-5);
        controller.process_event(&press(KEY_STOP), &mut app);
        assert_eq!(app.speed("Earth"), Ok(0.0));

        // Can't go below zero
        controller.process_event(&press(KEY_SLOW_DOWN), &mut app);
        assert_eq!(app.speed("Earth"), Ok(0.0));

        controller.process_event(&press(KEY_RESET_SPEEDS), &mut app);
        assert_eq!(app.speed("Earth"), Ok(2.98));
    }

    #[test]
    fn test_fps_counter() {
        let mut counter = FpsCounter::new(Duration::from_secs(3600));
        for _ in 0..10 {
            counter.record_frame();
        }
        // Window still open
        assert_eq!(counter.value(), 0.0);

        let mut counter = FpsCounter::new(Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(5));
        counter.record_frame();
        assert!(counter.value() > 0.0 && counter.value() <= 1000.0);
    }

    #[test]
    fn test_frame_clock_cap() {
        let mut clock = FrameClock::new(0.0);
        std::thread::sleep(Duration::from_millis(2));
        assert_eq!(clock.tick(), 0.0);

        let mut clock = FrameClock::new(10.0);
        let dt = clock.tick();
        assert!(dt >= 0.0 && dt < 10.0);
    }
}
