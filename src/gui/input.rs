use kiss3d::event::{Action, TouchAction, WindowEvent};
use nalgebra::Point2;

use super::camera::CameraRig;
use crate::model::{BodyID, Orrery};

/// Radians of camera swing per pixel of drag.
pub const SENSITIVITY: f32 = 0.01;
/// Change in camera distance per pixel of wheel travel.
pub const ZOOM_SENSITIVITY: f32 = 0.02;
// kiss3d reports scrolling in lines; browsers report ~100px per notch.
const PIXELS_PER_SCROLL_LINE: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerClass {
    Mouse,
    Touch,
}

/// Input after it's been stripped of backend details. Positions are in
/// screen pixels with the origin at the top-left. Positive wheel deltas move
/// the camera away from the sun.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press(PointerClass, Point2<f32>),
    Move(PointerClass, Point2<f32>),
    Release(PointerClass),
    Wheel(f32),
}

/// What the tooltip should do after an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TooltipChange {
    Show { body: BodyID, at: Point2<f32> },
    Move { at: Point2<f32> },
    Hide,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerGesture {
    pub active: bool,
    pub last_position: Point2<f32>,
}

impl PointerGesture {
    fn idle() -> Self {
        PointerGesture {
            active: false,
            last_position: Point2::origin(),
        }
    }

    fn begin(&mut self, pos: Point2<f32>) {
        self.active = true;
        self.last_position = pos;
    }

    fn end(&mut self) {
        self.active = false;
    }

    // Returns how far the pointer moved since the last call
    fn drag_to(&mut self, pos: Point2<f32>) -> nalgebra::Vector2<f32> {
        let delta = pos - self.last_position;
        self.last_position = pos;
        delta
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HoverState {
    pub currently_hovered: Option<BodyID>,
}

/// Turns mouse and touch gestures into camera movement, and works out which
/// planet (if any) is under the cursor.
///
/// Each pointer class runs its own two-state machine: Idle until pressed,
/// Dragging until released. Hovering only happens while neither is dragging.
pub struct InputRouter {
    mouse: PointerGesture,
    touch: PointerGesture,
    hover: HoverState,
    // kiss3d doesn't attach a position to button presses
    cursor_pos: Point2<f32>,
    // Fingers currently on the screen; only single-finger drags rotate
    fingers: Vec<u64>,
}

impl InputRouter {
    pub fn new() -> Self {
        InputRouter {
            mouse: PointerGesture::idle(),
            touch: PointerGesture::idle(),
            hover: HoverState::default(),
            cursor_pos: Point2::origin(),
            fingers: vec![],
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.mouse.active || self.touch.active
    }

    pub fn gesture(&self, class: PointerClass) -> &PointerGesture {
        match class {
            PointerClass::Mouse => &self.mouse,
            PointerClass::Touch => &self.touch,
        }
    }

    pub fn hovered(&self) -> Option<BodyID> {
        self.hover.currently_hovered
    }

    pub fn cursor_pos(&self) -> Point2<f32> {
        self.cursor_pos
    }

    fn gesture_mut(&mut self, class: PointerClass) -> &mut PointerGesture {
        match class {
            PointerClass::Mouse => &mut self.mouse,
            PointerClass::Touch => &mut self.touch,
        }
    }

    /// Translates a kiss3d window event into a `PointerEvent`, keeping track
    /// of the cursor and of how many fingers are down.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<PointerEvent> {
        match event {
            WindowEvent::CursorPos(x, y, _) => {
                self.cursor_pos = Point2::new(*x as f32, *y as f32);
                Some(PointerEvent::Move(PointerClass::Mouse, self.cursor_pos))
            }
            WindowEvent::MouseButton(_, Action::Press, _) => {
                Some(PointerEvent::Press(PointerClass::Mouse, self.cursor_pos))
            }
            WindowEvent::MouseButton(_, Action::Release, _) => {
                Some(PointerEvent::Release(PointerClass::Mouse))
            }
            WindowEvent::Scroll(_, dy, _) => {
                // scroll up == zoom in
                Some(PointerEvent::Wheel(-(*dy as f32) * PIXELS_PER_SCROLL_LINE))
            }
            WindowEvent::Touch(id, x, y, action, _) => {
                let pos = Point2::new(*x as f32, *y as f32);
                self.translate_touch(*id, pos, action)
            }
            _ => None,
        }
    }

    fn translate_touch(
        &mut self,
        id: u64,
        pos: Point2<f32>,
        action: &TouchAction,
    ) -> Option<PointerEvent> {
        match action {
            TouchAction::Start => {
                if !self.fingers.contains(&id) {
                    self.fingers.push(id);
                }
                if self.fingers.len() == 1 {
                    Some(PointerEvent::Press(PointerClass::Touch, pos))
                } else {
                    // A second finger isn't a rotation gesture
                    Some(PointerEvent::Release(PointerClass::Touch))
                }
            }
            TouchAction::Move => {
                if self.fingers.len() == 1 && self.fingers[0] == id {
                    Some(PointerEvent::Move(PointerClass::Touch, pos))
                } else {
                    None
                }
            }
            TouchAction::End | TouchAction::Cancel => {
                self.fingers.retain(|f| *f != id);
                Some(PointerEvent::Release(PointerClass::Touch))
            }
        }
    }

    pub fn handle(
        &mut self,
        event: PointerEvent,
        camera: &mut CameraRig,
        orrery: &Orrery,
    ) -> Option<TooltipChange> {
        match event {
            PointerEvent::Press(class, pos) => {
                self.gesture_mut(class).begin(pos);
                None
            }
            PointerEvent::Release(class) => {
                self.gesture_mut(class).end();
                None
            }
            PointerEvent::Move(class, pos) => {
                let gesture = self.gesture_mut(class);
                if gesture.active {
                    // Drag right == camera swings left
                    let delta = gesture.drag_to(pos);
                    camera.rotate(-delta.x * SENSITIVITY, delta.y * SENSITIVITY);
                    None
                } else if class == PointerClass::Mouse && !self.is_dragging() {
                    self.update_hover(pos, camera, orrery)
                } else {
                    None
                }
            }
            PointerEvent::Wheel(delta_y) => {
                camera.zoom(delta_y * ZOOM_SENSITIVITY);
                None
            }
        }
    }

    fn update_hover(
        &mut self,
        pos: Point2<f32>,
        camera: &CameraRig,
        orrery: &Orrery,
    ) -> Option<TooltipChange> {
        let nearest = pick_planet(pos, camera, orrery);

        match (nearest, self.hover.currently_hovered) {
            (Some(hit), Some(current)) if hit == current => Some(TooltipChange::Move { at: pos }),
            (Some(hit), _) => {
                self.hover.currently_hovered = Some(hit);
                Some(TooltipChange::Show { body: hit, at: pos })
            }
            (None, Some(_)) => {
                self.hover.currently_hovered = None;
                Some(TooltipChange::Hide)
            }
            (None, None) => None,
        }
    }
}

impl Default for InputRouter {
    fn default() -> Self {
        InputRouter::new()
    }
}

/// Finds the planet nearest the camera along the ray under `pos`.
pub fn pick_planet(pos: Point2<f32>, camera: &CameraRig, orrery: &Orrery) -> Option<BodyID> {
    let ray = camera.pick_ray(pos);

    orrery
        .registry()
        .planets()
        .filter_map(|(id, desc)| {
            let center = orrery.position(id);
            ray.intersect_sphere(&center, desc.radius).map(|t| (id, t))
        })
        .min_by(|(_, t1), (_, t2)| t1.total_cmp(t2))
        .map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BodyDescriptor, BodyRegistry};
    use kiss3d::camera::Camera;
    use kiss3d::event::Modifiers;
    use std::f32::consts::PI;

    const WIDTH: u32 = 800;
    const HEIGHT: u32 = 600;

    fn setup() -> (InputRouter, CameraRig, Orrery) {
        (
            InputRouter::new(),
            CameraRig::new(WIDTH, HEIGHT),
            Orrery::new(BodyRegistry::default()),
        )
    }

    // Screen position of a planet, found by projecting through the camera
    fn screen_pos_of(camera: &CameraRig, orrery: &Orrery, id: BodyID) -> Point2<f32> {
        let clip = camera.transformation() * orrery.position(id).to_homogeneous();
        let ndc = clip.xy() / clip.w;
        Point2::new(
            (ndc.x + 1.0) / 2.0 * WIDTH as f32,
            (1.0 - ndc.y) / 2.0 * HEIGHT as f32,
        )
    }

    #[test]
    fn test_drag_rotates_camera() {
        let (mut router, mut camera, orrery) = setup();
        let mouse = PointerClass::Mouse;

        router.handle(PointerEvent::Press(mouse, Point2::new(100.0, 100.0)), &mut camera, &orrery);
        assert!(router.is_dragging());
        router.handle(PointerEvent::Move(mouse, Point2::new(110.0, 105.0)), &mut camera, &orrery);

        approx::assert_relative_eq!(camera.theta(), -0.1);
        approx::assert_relative_eq!(camera.phi(), PI / 4.0 + 0.05);
        assert_eq!(router.gesture(mouse).last_position, Point2::new(110.0, 105.0));

        router.handle(PointerEvent::Release(mouse), &mut camera, &orrery);
        assert!(!router.is_dragging());
    }

    #[test]
    fn test_idle_move_does_not_rotate() {
        let (mut router, mut camera, orrery) = setup();
        router.handle(
            PointerEvent::Move(PointerClass::Touch, Point2::new(300.0, 10.0)),
            &mut camera,
            &orrery,
        );
        assert_eq!(camera.theta(), 0.0);
        assert_eq!(camera.phi(), PI / 4.0);
    }

    #[test]
    fn test_wheel_zooms() {
        let (mut router, mut camera, orrery) = setup();
        router.handle(PointerEvent::Wheel(100.0), &mut camera, &orrery);
        approx::assert_relative_eq!(camera.distance(), 27.0);
        router.handle(PointerEvent::Wheel(-1.0e6), &mut camera, &orrery);
        assert_eq!(camera.distance(), 5.0);
    }

    #[test]
    fn test_hover_show_move_hide() {
        let (mut router, mut camera, orrery) = setup();
        let jupiter = orrery.registry().find("Jupiter").unwrap();
        let pos = screen_pos_of(&camera, &orrery, jupiter);
        let mouse = PointerClass::Mouse;

        let change = router.handle(PointerEvent::Move(mouse, pos), &mut camera, &orrery);
        assert_eq!(change, Some(TooltipChange::Show { body: jupiter, at: pos }));
        assert_eq!(router.hovered(), Some(jupiter));

        let nudged = pos + nalgebra::Vector2::new(1.0, 0.0);
        let change = router.handle(PointerEvent::Move(mouse, nudged), &mut camera, &orrery);
        assert_eq!(change, Some(TooltipChange::Move { at: nudged }));

        // The top-left corner is empty space
        let corner = Point2::new(1.0, 1.0);
        let change = router.handle(PointerEvent::Move(mouse, corner), &mut camera, &orrery);
        assert_eq!(change, Some(TooltipChange::Hide));
        assert_eq!(router.hovered(), None);

        let change = router.handle(PointerEvent::Move(mouse, corner), &mut camera, &orrery);
        assert_eq!(change, None);
    }

    #[test]
    fn test_no_hover_while_dragging() {
        let (mut router, mut camera, orrery) = setup();
        let earth = orrery.registry().find("Earth").unwrap();
        let pos = screen_pos_of(&camera, &orrery, earth);

        router.handle(
            PointerEvent::Press(PointerClass::Touch, Point2::new(5.0, 5.0)),
            &mut camera,
            &orrery,
        );
        let change = router.handle(PointerEvent::Move(PointerClass::Mouse, pos), &mut camera, &orrery);
        assert_eq!(change, None);
        assert_eq!(router.hovered(), None);
    }

    #[test]
    fn test_second_finger_ends_gesture() {
        let mut router = InputRouter::new();
        let start = |id| WindowEvent::Touch(id, 10.0, 10.0, TouchAction::Start, Modifiers::empty());

        assert_eq!(
            router.translate(&start(1)),
            Some(PointerEvent::Press(PointerClass::Touch, Point2::new(10.0, 10.0)))
        );
        assert_eq!(
            router.translate(&start(2)),
            Some(PointerEvent::Release(PointerClass::Touch))
        );

        // With two fingers down, moves are ignored
        let moved = WindowEvent::Touch(1, 20.0, 20.0, TouchAction::Move, Modifiers::empty());
        assert_eq!(router.translate(&moved), None);
    }

    #[test]
    fn test_press_uses_last_cursor_pos() {
        let mut router = InputRouter::new();
        router.translate(&WindowEvent::CursorPos(42.0, 24.0, Modifiers::empty()));
        let pressed = WindowEvent::MouseButton(
            kiss3d::event::MouseButton::Button1,
            Action::Press,
            Modifiers::empty(),
        );
        assert_eq!(
            router.translate(&pressed),
            Some(PointerEvent::Press(PointerClass::Mouse, Point2::new(42.0, 24.0)))
        );
    }

    #[test]
    fn test_scroll_up_zooms_in() {
        let mut router = InputRouter::new();
        let scrolled = WindowEvent::Scroll(0.0, 1.0, Modifiers::empty());
        assert_eq!(router.translate(&scrolled), Some(PointerEvent::Wheel(-100.0)));
    }

    #[test]
    fn test_hover_prefers_nearest() {
        // Two planets start at opposite ends of the x axis. The near one is
        // big enough to cover the far one from the default camera.
        let sun = BodyDescriptor::new("Sun", 0xFFD700, 1.2, 0.0, 0.0, 0.0, "");
        let near = BodyDescriptor::new("Near", 0xFF0000, 8.0, 3.0, 1.0, 0.0, "");
        let far = BodyDescriptor::new("Far", 0x0000FF, 0.5, 9.0, 1.0, 0.0, "");
        let orrery = Orrery::new(BodyRegistry::new(sun, vec![near, far]));
        let camera = CameraRig::new(WIDTH, HEIGHT);

        let near_id = orrery.registry().find("Near").unwrap();
        let far_id = orrery.registry().find("Far").unwrap();
        approx::assert_relative_eq!(orrery.position(far_id).x, -9.0, epsilon = 1e-5);

        let pos = screen_pos_of(&camera, &orrery, far_id);
        assert_eq!(pick_planet(pos, &camera, &orrery), Some(near_id));

        // Out of the way, the far planet is found
        let mut router = InputRouter::new();
        let mut camera = camera;
        let small_near = BodyDescriptor::new("Near", 0xFF0000, 0.2, 3.0, 1.0, 0.0, "");
        let far = orrery.descriptor(far_id).clone();
        let sun = orrery.registry().sun().clone();
        let orrery = Orrery::new(BodyRegistry::new(sun, vec![small_near, far]));
        let change = router.handle(PointerEvent::Move(PointerClass::Mouse, pos), &mut camera, &orrery);
        assert_eq!(change, Some(TooltipChange::Show { body: far_id, at: pos }));
    }
}
