//! Spire of Ash - a room-based top-down action game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, combat, rooms, game state)
//! - `renderer`: Presentation boundary (surface trait, frame drawing)
//! - `platform`: Input snapshots and the blocking start prompt
//! - `game`: The outer loop tying simulation and presentation together
//! - `settings`: Runtime options

pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{GameError, Result};
pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (pixels)
    pub const WIDTH: f32 = 800.0;
    pub const HEIGHT: f32 = 600.0;

    /// Target frame rate
    pub const FPS: u32 = 60;

    /// Entity extents (square side length)
    pub const AVATAR_SIZE: f32 = 20.0;
    pub const ADVERSARY_SIZE: f32 = 20.0;
    pub const PICKUP_SIZE: f32 = 15.0;

    /// Avatar defaults
    pub const DEFAULT_SPEED: f32 = 5.0;
    /// Speed after collecting a speed pickup
    pub const UPGRADED_SPEED: f32 = 8.0;
    pub const MAX_HEALTH: u8 = 3;
    pub const DEFAULT_ATTACK_POWER: u32 = 1;
    /// Attack power after collecting an attack pickup
    pub const UPGRADED_ATTACK_POWER: u32 = 2;

    /// Adversary defaults
    pub const ADVERSARY_SPEED: f32 = 2.0;
    /// Minimum time between two hits from the same adversary
    pub const ATTACK_COOLDOWN_MS: u64 = 1000;

    /// Attack reach, in avatar extents
    pub const ATTACK_REACH: f32 = 3.0;

    /// Room population ranges (inclusive)
    pub const MIN_ADVERSARIES: usize = 3;
    pub const MAX_ADVERSARIES: usize = 10;
    pub const MIN_PICKUPS: usize = 1;
    pub const MAX_PICKUPS: usize = 3;
    /// Adversaries never spawn this close to the avatar
    pub const SPAWN_EXCLUSION_RADIUS: f32 = 50.0;
    /// Rejection-sampling bound before falling back to the farthest corner
    pub const MAX_SPAWN_ATTEMPTS: u32 = 1000;

    /// Exit door (open once the room is cleared)
    pub const DOOR_X: f32 = WIDTH - 50.0;
    pub const DOOR_Y: f32 = HEIGHT / 2.0 - 50.0;
    pub const DOOR_WIDTH: f32 = 40.0;
    pub const DOOR_HEIGHT: f32 = 100.0;

    /// Destruction effect: rings drawn, radius growth per ring, delay per ring
    pub const EXPLOSION_RINGS: u32 = 5;
    pub const EXPLOSION_RING_STEP: f32 = 5.0;
    pub const EXPLOSION_RING_DELAY_MS: u64 = 50;
}

/// Avatar spawn point (top-left of its box) used at game start, after death
/// and after every room transition
#[inline]
pub fn arena_center() -> glam::Vec2 {
    glam::Vec2::new(consts::WIDTH / 2.0, consts::HEIGHT / 2.0)
}
