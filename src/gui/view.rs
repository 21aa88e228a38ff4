use std::collections::HashMap;

use kiss3d::camera::Camera;
use kiss3d::scene::SceneNode;
use kiss3d::text::Font;
use kiss3d::window::Window;
use nalgebra::{distance, Point2, Point3, Translation3};

use super::controller::Controller;
use super::input::TooltipChange;
use super::renderers::{CompoundRenderer, Starfield};
use super::theme::Palette;
use crate::app::App;
use crate::model::{BodyDescriptor, BodyID};

const HALO_RADIUS: f32 = 1.5;
const STARFIELD_HALF_EXTENT: f32 = 200.0;
const TEXT_SIZE: f32 = 40.0;
const TOOLTIP_OFFSET: f32 = 15.0;

// The default material's unlit term is a third of the color. The light sits
// inside the sun, so this brings it back to full brightness.
const SUN_BRIGHTNESS: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Tooltip {
    body: BodyID,
    at: Point2<f32>,
}

/// Owns everything the window draws: the scene nodes for the sun and planets
/// plus the immediate-mode extras.
pub struct View {
    sun_sphere: SceneNode,
    planet_spheres: HashMap<BodyID, SceneNode>,
    starfield: Starfield,
    tooltip: Option<Tooltip>,
    renderer: CompoundRenderer,
}

impl View {
    pub fn new(window: &mut Window, app: &App, star_count: usize, star_seed: u64) -> Self {
        let sun_sphere = Self::create_body_object(window, app.orrery().registry().sun());

        let mut planet_spheres = HashMap::new();
        for (id, desc) in app.orrery().registry().planets() {
            planet_spheres.insert(id, Self::create_body_object(window, desc));
        }

        let mut view = View {
            sun_sphere,
            planet_spheres,
            starfield: Starfield::generate(star_count, STARFIELD_HALF_EXTENT, star_seed),
            tooltip: None,
            renderer: CompoundRenderer::new(),
        };
        view.update_scene_objects(app);

        log::info!("Created {} planets", view.planet_spheres.len());
        view
    }

    fn create_body_object(window: &mut Window, desc: &BodyDescriptor) -> SceneNode {
        let mut sphere = window.add_sphere(desc.radius);
        let color = &desc.color;
        sphere.set_color(color.x, color.y, color.z);
        sphere
    }

    pub fn apply_tooltip(&mut self, change: TooltipChange) {
        match change {
            TooltipChange::Show { body, at } => self.tooltip = Some(Tooltip { body, at }),
            TooltipChange::Move { at } => {
                if let Some(tooltip) = self.tooltip.as_mut() {
                    tooltip.at = at;
                }
            }
            TooltipChange::Hide => self.tooltip = None,
        }
    }

    /// Moves and spins every body, and re-tints it for the current fog.
    pub fn update_scene_objects(&mut self, app: &App) {
        let orrery = app.orrery();
        let palette = app.theme().palette();
        let eye = app.camera().eye();

        for (id, sphere) in self.planet_spheres.iter_mut() {
            let position = orrery.position(*id);
            sphere.set_local_translation(Translation3::from(position.coords));
            sphere.set_local_rotation(orrery.state(*id).spin.to_rotation());

            let color = planet_color(&palette, orrery.descriptor(*id), &eye, &position);
            sphere.set_color(color.x, color.y, color.z);
        }

        let sun = orrery.registry().sun();
        self.sun_sphere
            .set_local_rotation(orrery.sun_spin().to_rotation());
        let color = sun_color(&palette, sun, &eye);
        self.sun_sphere.set_color(color.x, color.y, color.z);
    }

    pub fn prerender_scene(&mut self, window: &mut Window, app: &App, controller: &Controller) {
        let palette = app.theme().palette();
        let clear = palette.clear_color;
        window.set_background_color(clear.x, clear.y, clear.z);

        let eye = app.camera().eye();
        for (_, desc) in app.orrery().registry().planets() {
            self.renderer
                .draw_orbit_ring(desc.orbital_distance, &eye, &palette);
        }
        self.renderer.draw_stars(&self.starfield, &eye, &palette);

        let sun = app.orrery().registry().sun();
        let glow = palette.apply_fog(sun.color, distance(&eye, &Point3::origin()));
        self.renderer.draw_halo(
            Point3::origin(),
            sun.radius.max(HALO_RADIUS),
            glow,
            palette.clear_color,
        );

        let font = Font::default();
        if controller.show_panel() {
            window.draw_text(
                &self.panel_text(app, controller),
                &Point2::origin(),
                TEXT_SIZE,
                &font,
                &palette.text_color,
            );
        }

        if let Some(tooltip) = self.tooltip {
            let summary = app.summary(tooltip.body);
            window.draw_text(
                &format!("{}\n{}", summary.name, summary.description),
                &(tooltip.at + nalgebra::Vector2::repeat(TOOLTIP_OFFSET)),
                TEXT_SIZE,
                &font,
                &palette.text_color,
            );
        }
    }

    fn panel_text(&self, app: &App, controller: &Controller) -> String {
        let mut lines = vec![String::from("Planet speeds")];
        for planet in app.planets() {
            let marker = if planet.id == controller.selected() {
                ">"
            } else {
                " "
            };
            lines.push(format!("{} {:<8} {:.1}x", marker, planet.name, planet.speed));
        }

        lines.push(String::new());
        lines.push(format!(
            "{} | {} mode | FPS: {:.0}",
            if app.is_paused() { "Paused" } else { "Running" },
            app.theme().name(),
            controller.fps(),
        ));
        lines.push(String::from(
            "[1-8] select  [Up/Down/0] speed  [R] reset speeds",
        ));
        lines.push(String::from(
            "[Space] pause  [C] reset camera  [T] theme  [H] hide",
        ));
        lines.join("\n")
    }

    pub fn renderer_mut(&mut self) -> &mut CompoundRenderer {
        &mut self.renderer
    }
}

fn planet_color(
    palette: &Palette,
    desc: &BodyDescriptor,
    eye: &Point3<f32>,
    position: &Point3<f32>,
) -> Point3<f32> {
    palette.apply_fog(desc.color, distance(eye, position))
}

fn sun_color(palette: &Palette, sun: &BodyDescriptor, eye: &Point3<f32>) -> Point3<f32> {
    let fogged = palette.apply_fog(sun.color, distance(eye, &Point3::origin()));
    Point3::from(fogged.coords * SUN_BRIGHTNESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::theme::Theme;
    use crate::model::BodyRegistry;
    use approx::assert_relative_eq;

    #[test]
    fn test_planet_fog() {
        let registry = BodyRegistry::default();
        let earth = registry.get(registry.find("Earth").unwrap());
        let position = Point3::new(earth.orbital_distance, 0.0, 0.0);

        // Close up, the planet keeps its own color
        let palette = Theme::Dark.palette();
        let eye = Point3::new(earth.orbital_distance, 10.0, 0.0);
        assert_eq!(planet_color(&palette, earth, &eye, &position), earth.color);

        // 116 units away is 44% of the way through the fog band
        let eye = Point3::new(earth.orbital_distance, 116.0, 0.0);
        let expected = earth.color.coords.lerp(&palette.fog_color.coords, 0.44);
        assert_relative_eq!(
            planet_color(&palette, earth, &eye, &position).coords,
            expected,
            epsilon = 1e-5
        );

        // The light theme fogs toward a different color
        let light = Theme::Light.palette();
        let far = Point3::new(earth.orbital_distance, 500.0, 0.0);
        assert_eq!(planet_color(&light, earth, &far, &position), light.fog_color);
    }

    #[test]
    fn test_sun_brightness() {
        let registry = BodyRegistry::default();
        let sun = registry.sun();
        let palette = Theme::Dark.palette();

        let near = sun_color(&palette, sun, &Point3::new(0.0, 0.0, 25.0));
        assert_relative_eq!(near.coords / SUN_BRIGHTNESS, sun.color.coords, epsilon = 1e-6);

        let far = sun_color(&palette, sun, &Point3::new(0.0, 0.0, 300.0));
        assert_relative_eq!(far.coords / SUN_BRIGHTNESS, palette.fog_color.coords, epsilon = 1e-6);
    }
}
