//! Game state and core simulation types
//!
//! Entities are plain structs sharing a [`Body`] component. The room's
//! adversaries and pickups are owned by [`GameState`] and replaced wholesale
//! whenever a new room is entered.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::attack_hitbox;
use super::rect::Rect;
use super::room::{Arena, generate_room};
use super::tick::TickInput;
use crate::arena_center;
use crate::consts::*;

/// Position and square extent shared by every entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner
    pub pos: Vec2,
    /// Side length
    pub size: f32,
}

impl Body {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self { pos, size }
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }
}

/// Direction of a swing, resolved from the held direction keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
    /// No direction held: swing all around
    Around,
}

impl Facing {
    /// Up beats down beats left beats right
    pub fn from_input(input: &TickInput) -> Self {
        if input.up {
            Facing::Up
        } else if input.down {
            Facing::Down
        } else if input.left {
            Facing::Left
        } else if input.right {
            Facing::Right
        } else {
            Facing::Around
        }
    }
}

/// Outcome of one attack swing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swing {
    pub hitbox: Rect,
    /// Adversaries removed by this swing
    pub slain: u32,
    /// Score earned: one `attack_power` per adversary slain
    pub points: u32,
}

/// The player-controlled character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    pub body: Body,
    pub speed: f32,
    pub health: u8,
    pub attack_power: u32,
}

impl Avatar {
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: Body::new(pos, AVATAR_SIZE),
            speed: DEFAULT_SPEED,
            health: MAX_HEALTH,
            attack_power: DEFAULT_ATTACK_POWER,
        }
    }

    /// Move one step along every held axis, stopping at the arena walls
    pub fn walk(&mut self, input: &TickInput, arena: &Arena) {
        let max_x = (arena.width - self.body.size).max(0.0);
        let max_y = (arena.height - self.body.size).max(0.0);
        let pos = &mut self.body.pos;

        if input.up && pos.y > 0.0 {
            pos.y = (pos.y - self.speed).max(0.0);
        }
        if input.down && pos.y < max_y {
            pos.y = (pos.y + self.speed).min(max_y);
        }
        if input.left && pos.x > 0.0 {
            pos.x = (pos.x - self.speed).max(0.0);
        }
        if input.right && pos.x < max_x {
            pos.x = (pos.x + self.speed).min(max_x);
        }
    }

    /// Swing in the facing given by `input`, removing every adversary the
    /// hitbox touches.
    pub fn attack(&self, adversaries: &mut Vec<Adversary>, input: &TickInput) -> Swing {
        let hitbox = attack_hitbox(&self.body, Facing::from_input(input));

        let before = adversaries.len();
        adversaries.retain(|a| !hitbox.overlaps(&a.body.rect()));
        let slain = (before - adversaries.len()) as u32;

        Swing {
            hitbox,
            slain,
            points: slain * self.attack_power,
        }
    }

    /// Lose one health point. Returns true when this hit was fatal.
    pub fn take_hit(&mut self) -> bool {
        self.health = self.health.saturating_sub(1);
        self.health == 0
    }

    /// Gain one health point, never beyond the cap. Returns true if healed.
    pub fn heal(&mut self) -> bool {
        if self.health < MAX_HEALTH {
            self.health += 1;
            true
        } else {
            false
        }
    }
}

/// A hostile chaser
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Adversary {
    pub body: Body,
    pub speed: f32,
    pub attack_cooldown_ms: u64,
    /// Sim clock reading of the last hit (or of creation)
    pub last_attack_ms: u64,
}

impl Adversary {
    /// A fresh adversary is created mid-cooldown: it cannot strike during its
    /// first second.
    pub fn new(pos: Vec2, now_ms: u64) -> Self {
        Self {
            body: Body::new(pos, ADVERSARY_SIZE),
            speed: ADVERSARY_SPEED,
            attack_cooldown_ms: ATTACK_COOLDOWN_MS,
            last_attack_ms: now_ms,
        }
    }

    /// Greedy chase: step toward `target` independently on each axis
    pub fn pursue(&mut self, target: Vec2) {
        let pos = &mut self.body.pos;
        if pos.x < target.x {
            pos.x += self.speed;
        } else if pos.x > target.x {
            pos.x -= self.speed;
        }
        if pos.y < target.y {
            pos.y += self.speed;
        } else if pos.y > target.y {
            pos.y -= self.speed;
        }
    }

    /// Claim the right to strike at `now_ms`. Succeeds at most once per
    /// cooldown window and restarts the window on success.
    pub fn can_attack(&mut self, now_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_attack_ms) >= self.attack_cooldown_ms {
            self.last_attack_ms = now_ms;
            true
        } else {
            false
        }
    }
}

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    Health,
    AttackPower,
    Speed,
}

impl PickupKind {
    pub const ALL: [PickupKind; 3] = [PickupKind::Health, PickupKind::AttackPower, PickupKind::Speed];
}

/// A one-shot consumable lying in the room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub body: Body,
    pub kind: PickupKind,
}

impl Pickup {
    pub fn new(pos: Vec2, kind: PickupKind) -> Self {
        Self {
            body: Body::new(pos, PICKUP_SIZE),
            kind,
        }
    }

    /// Apply this pickup's effect. Upgrades are set, not stacked.
    pub fn apply(&self, avatar: &mut Avatar) {
        match self.kind {
            PickupKind::Health => {
                avatar.heal();
            }
            PickupKind::AttackPower => avatar.attack_power = UPGRADED_ATTACK_POWER,
            PickupKind::Speed => avatar.speed = UPGRADED_SPEED,
        }
    }
}

/// Something notable that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    AdversariesSlain { count: u32, points: u32 },
    AvatarHit { health: u8 },
    /// Health ran out; `pos` is the avatar's center at the moment of death,
    /// `score` the score that was lost
    AvatarDestroyed { pos: Vec2, score: u64 },
    PickupCollected { kind: PickupKind },
    DoorOpened,
    RoomEntered { room: u32 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub arena: Arena,
    pub avatar: Avatar,
    pub adversaries: Vec<Adversary>,
    pub pickups: Vec<Pickup>,
    /// Kills weighted by attack power; survives room changes, not death
    pub score: u64,
    /// Set once the room has no adversaries left
    pub door_open: bool,
    /// Rooms entered this session (1-based, counts restarts)
    pub room_index: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Hitbox of this tick's swing, if any (drawn as an outline)
    pub last_swing: Option<Rect>,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with the avatar at the arena center and a fresh room
    pub fn new(seed: u64, now_ms: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            arena: Arena::STANDARD,
            avatar: Avatar::new(arena_center()),
            adversaries: Vec::new(),
            pickups: Vec::new(),
            score: 0,
            door_open: false,
            room_index: 0,
            time_ticks: 0,
            last_swing: None,
            events: Vec::new(),
        };
        state.enter_new_room(now_ms);
        state
    }

    /// Put the avatar back at the center and replace the room's population.
    /// Score and health are untouched.
    pub fn enter_new_room(&mut self, now_ms: u64) {
        self.avatar.body.pos = arena_center();
        let room = generate_room(&mut self.rng, &self.arena, self.avatar.body.pos, now_ms);
        self.adversaries = room.adversaries;
        self.pickups = room.pickups;
        self.door_open = false;
        self.room_index += 1;

        log::info!(
            "Entered room {} ({} adversaries, {} pickups)",
            self.room_index,
            self.adversaries.len(),
            self.pickups.len()
        );
        self.events.push(GameEvent::RoomEntered {
            room: self.room_index,
        });
    }

    /// Death transition: fresh room, score back to zero, full health
    pub fn reset_after_death(&mut self, now_ms: u64) {
        let pos = self.avatar.body.center();
        log::info!("Avatar destroyed at ({:.0}, {:.0}) with score {}", pos.x, pos.y, self.score);
        self.events.push(GameEvent::AvatarDestroyed { pos, score: self.score });

        self.enter_new_room(now_ms);
        self.score = 0;
        self.avatar.health = MAX_HEALTH;
    }
}
