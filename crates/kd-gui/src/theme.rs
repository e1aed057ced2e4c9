//! Colors, layout constants, and virtual canvas scaling.

use macroquad::prelude::*;

/// Virtual canvas width in world units. The window scales this to fit.
pub const CANVAS_W: f32 = 960.0;
/// Virtual canvas height in world units.
pub const CANVAS_H: f32 = 640.0;

/// Colors for the world and the fallback shapes.
pub mod palette {
    use macroquad::prelude::Color;

    /// Letterbox bars.
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    /// Grass background.
    pub const GRASS: Color = Color::new(0.227, 0.635, 0.290, 1.0);
    /// Water pool surface.
    pub const WATER: Color = Color::new(0.118, 0.471, 1.0, 0.85);
    /// Highlight on a water pool.
    pub const WATER_SHINE: Color = Color::new(1.0, 1.0, 1.0, 0.08);
    /// Tree trunk.
    pub const TRUNK: Color = Color::new(0.420, 0.239, 0.094, 1.0);
    /// Tree canopy.
    pub const CANOPY: Color = Color::new(0.051, 0.478, 0.184, 1.0);
    /// Rock.
    pub const ROCK: Color = Color::new(0.498, 0.498, 0.502, 1.0);
    /// Berry.
    pub const BERRY: Color = Color::new(0.863, 0.078, 0.235, 1.0);
    /// Campfire.
    pub const FIRE: Color = Color::new(1.0, 0.647, 0.0, 1.0);
    /// Player body.
    pub const PLAYER: Color = Color::new(0.118, 0.565, 1.0, 1.0);
    /// Faint reach ring.
    pub const REACH: Color = Color::new(1.0, 1.0, 1.0, 0.08);
    /// HUD panel background.
    pub const PANEL: Color = Color::new(0.0, 0.0, 0.0, 0.55);
    /// Primary HUD text.
    pub const TEXT: Color = Color::new(1.0, 0.945, 0.910, 1.0);
    /// Secondary HUD text.
    pub const DIM: Color = Color::new(0.761, 0.765, 0.780, 1.0);
    /// Health bar fill.
    pub const HEALTH: Color = Color::new(1.0, 0.0, 0.302, 1.0);
    /// Hunger bar fill.
    pub const HUNGER: Color = Color::new(1.0, 0.639, 0.0, 1.0);
    /// Thirst bar fill.
    pub const THIRST: Color = Color::new(0.161, 0.678, 1.0, 1.0);
}

/// Set up a `Camera2D` that maps the virtual canvas to the current window,
/// letterboxed to keep the aspect ratio.
pub fn setup_virtual_canvas() {
    let scale_x = screen_width() / CANVAS_W;
    let scale_y = screen_height() / CANVAS_H;
    let scale = scale_x.min(scale_y);

    let viewport_w = CANVAS_W * scale;
    let viewport_h = CANVAS_H * scale;
    let offset_x = (screen_width() - viewport_w) / 2.0;
    let offset_y = (screen_height() - viewport_h) / 2.0;

    set_camera(&Camera2D {
        zoom: vec2(2.0 / CANVAS_W, 2.0 / CANVAS_H),
        target: vec2(CANVAS_W / 2.0, CANVAS_H / 2.0),
        viewport: Some((
            offset_x as i32,
            offset_y as i32,
            viewport_w as i32,
            viewport_h as i32,
        )),
        ..Default::default()
    });
}
