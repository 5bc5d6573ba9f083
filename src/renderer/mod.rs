//! Presentation boundary
//!
//! The simulation never draws. Each frame the outer loop hands the state to
//! [`draw_frame`], which issues primitive draw calls against a [`Surface`].

pub mod headless;

pub use headless::{DrawCommand, HeadlessSurface};

use std::time::Duration;

use glam::Vec2;

use crate::consts::*;
use crate::sim::{GameState, PickupKind, Rect, door_rect};

/// RGBA color, components in 0..=1
pub type Color = [f32; 4];

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = [0.0, 0.0, 0.0, 1.0];
    pub const TEXT: Color = [1.0, 1.0, 1.0, 1.0];
    pub const AVATAR: Color = [1.0, 1.0, 1.0, 1.0];
    pub const ADVERSARY: Color = [1.0, 0.0, 0.0, 1.0];
    pub const EXPLOSION: Color = [1.0, 1.0, 0.0, 1.0];
    pub const SWING: Color = [0.0, 0.0, 1.0, 1.0];
    pub const DOOR: Color = [0.0, 1.0, 0.0, 1.0];
    pub const TITLE_BACKGROUND: Color = [0.0, 0.0, 1.0, 1.0];
    pub const PICKUP_HEALTH: Color = [1.0, 0.75, 0.8, 1.0]; // Pink
    pub const PICKUP_ATTACK: Color = [0.5, 0.0, 0.5, 1.0]; // Purple
    pub const PICKUP_SPEED: Color = [1.0, 0.65, 0.0, 1.0]; // Orange
}

/// Fill mode for rectangles
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RectStyle {
    Filled,
    /// Outline of the given line width
    Outline(f32),
}

/// Font size and placement for a line of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    /// Position is the text's center instead of its top-left
    pub centered: bool,
}

impl TextStyle {
    pub const HUD: TextStyle = TextStyle {
        size: 36.0,
        centered: false,
    };
    pub const TITLE: TextStyle = TextStyle {
        size: 74.0,
        centered: true,
    };
    pub const PROMPT: TextStyle = TextStyle {
        size: 36.0,
        centered: true,
    };
}

/// A drawing target with a frame clock
pub trait Surface {
    fn clear(&mut self, color: Color);
    fn draw_rect(&mut self, rect: Rect, color: Color, style: RectStyle);
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn draw_text(&mut self, text: &str, color: Color, pos: Vec2, style: TextStyle);
    /// Show the frame drawn since the last present
    fn present(&mut self);
    /// Wait out the rest of the frame budget at `target_fps`; returns the
    /// time elapsed since the previous call
    fn tick(&mut self, target_fps: u32) -> Duration;
    /// Block for a fixed time (used by effects that animate inside one frame)
    fn delay(&mut self, ms: u64);
}

pub fn pickup_color(kind: PickupKind) -> Color {
    match kind {
        PickupKind::Health => colors::PICKUP_HEALTH,
        PickupKind::AttackPower => colors::PICKUP_ATTACK,
        PickupKind::Speed => colors::PICKUP_SPEED,
    }
}

pub const LEGEND: &str = "Items: Pink=Health, Purple=Attack, Orange=Speed";

/// Draw one gameplay frame (does not present)
pub fn draw_frame(state: &GameState, surface: &mut dyn Surface) {
    surface.clear(colors::BACKGROUND);

    if let Some(hitbox) = state.last_swing {
        surface.draw_rect(hitbox, colors::SWING, RectStyle::Outline(2.0));
    }

    if state.door_open {
        surface.draw_rect(door_rect(), colors::DOOR, RectStyle::Filled);
    }

    surface.draw_rect(state.avatar.body.rect(), colors::AVATAR, RectStyle::Filled);
    for adversary in &state.adversaries {
        surface.draw_rect(adversary.body.rect(), colors::ADVERSARY, RectStyle::Filled);
    }
    for pickup in &state.pickups {
        surface.draw_circle(
            pickup.body.center(),
            (PICKUP_SIZE / 2.0).floor(),
            pickup_color(pickup.kind),
        );
    }

    // HUD
    surface.draw_text(
        &format!("Score: {}", state.score),
        colors::TEXT,
        Vec2::new(WIDTH - 150.0, 10.0),
        TextStyle::HUD,
    );
    surface.draw_text(
        &format!("Health: {}", state.avatar.health),
        colors::TEXT,
        Vec2::new(10.0, 10.0),
        TextStyle::HUD,
    );
    surface.draw_text(LEGEND, colors::TEXT, Vec2::new(10.0, HEIGHT - 30.0), TextStyle::HUD);
}

/// Draw and present the title screen
pub fn draw_title(surface: &mut dyn Surface) {
    surface.clear(colors::TITLE_BACKGROUND);
    surface.draw_text(
        "Spire of Ash",
        colors::TEXT,
        Vec2::new(WIDTH / 2.0, HEIGHT / 3.0),
        TextStyle::TITLE,
    );
    surface.draw_text(
        "Press spacebar to start!",
        colors::TEXT,
        Vec2::new(WIDTH / 2.0, HEIGHT / 2.0),
        TextStyle::PROMPT,
    );
    surface.present();
}

/// Destruction effect: a burst of growing rings, each shown for a moment.
/// Blocks for `EXPLOSION_RINGS * EXPLOSION_RING_DELAY_MS`.
pub fn explode(surface: &mut dyn Surface, center: Vec2) {
    for ring in 0..EXPLOSION_RINGS {
        surface.draw_circle(center, ring as f32 * EXPLOSION_RING_STEP, colors::EXPLOSION);
        surface.present();
        surface.delay(EXPLOSION_RING_DELAY_MS);
    }
}
