//! Room population
//!
//! Every room is a fresh batch of adversaries and pickups scattered over the
//! arena. Adversaries keep a safe distance from the avatar's spawn point.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Adversary, Pickup, PickupKind};
use crate::consts::*;

/// Playable bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub const STANDARD: Arena = Arena {
        width: WIDTH,
        height: HEIGHT,
    };

    /// Uniform integer position for a square of side `extent`, fully inside
    fn random_position<R: Rng + ?Sized>(&self, rng: &mut R, extent: f32) -> Vec2 {
        let max_x = (self.width - extent).max(0.0) as u32;
        let max_y = (self.height - extent).max(0.0) as u32;
        Vec2::new(
            rng.random_range(0..=max_x) as f32,
            rng.random_range(0..=max_y) as f32,
        )
    }

    /// The corner position (for a square of side `extent`) farthest from `from`
    fn farthest_corner(&self, extent: f32, from: Vec2) -> Vec2 {
        let max_x = (self.width - extent).max(0.0);
        let max_y = (self.height - extent).max(0.0);
        [
            Vec2::new(0.0, 0.0),
            Vec2::new(max_x, 0.0),
            Vec2::new(0.0, max_y),
            Vec2::new(max_x, max_y),
        ]
        .into_iter()
        .max_by(|a, b| a.distance_squared(from).total_cmp(&b.distance_squared(from)))
        .unwrap_or(Vec2::ZERO)
    }
}

/// A generated room population
#[derive(Debug, Clone, Default)]
pub struct Room {
    pub adversaries: Vec<Adversary>,
    pub pickups: Vec<Pickup>,
}

/// Generate a room around the avatar spawn point `spawn`.
///
/// `now_ms` stamps the adversaries' cooldown so none can strike during its
/// first second.
pub fn generate_room<R: Rng + ?Sized>(rng: &mut R, arena: &Arena, spawn: Vec2, now_ms: u64) -> Room {
    let adversary_count = rng.random_range(MIN_ADVERSARIES..=MAX_ADVERSARIES);
    let adversaries = (0..adversary_count)
        .map(|_| Adversary::new(adversary_spawn(rng, arena, spawn), now_ms))
        .collect();

    let pickup_count = rng.random_range(MIN_PICKUPS..=MAX_PICKUPS);
    let pickups = (0..pickup_count)
        .map(|_| {
            let pos = arena.random_position(rng, PICKUP_SIZE);
            let kind = PickupKind::ALL[rng.random_range(0..PickupKind::ALL.len())];
            Pickup::new(pos, kind)
        })
        .collect();

    Room { adversaries, pickups }
}

/// Rejection-sample a position farther than the exclusion radius from
/// `spawn`; after `MAX_SPAWN_ATTEMPTS` misses use the farthest corner.
fn adversary_spawn<R: Rng + ?Sized>(rng: &mut R, arena: &Arena, spawn: Vec2) -> Vec2 {
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        let pos = arena.random_position(rng, ADVERSARY_SIZE);
        if pos.distance(spawn) > SPAWN_EXCLUSION_RADIUS {
            return pos;
        }
    }

    let fallback = arena.farthest_corner(ADVERSARY_SIZE, spawn);
    log::warn!(
        "No spawn point beyond {} px of ({:.0}, {:.0}) after {} attempts; using corner ({:.0}, {:.0})",
        SPAWN_EXCLUSION_RADIUS,
        spawn.x,
        spawn.y,
        MAX_SPAWN_ATTEMPTS,
        fallback.x,
        fallback.y
    );
    fallback
}
