//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time comes in as an explicit sim clock reading
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod room;
pub mod state;
pub mod tick;

pub use collision::{attack_hitbox, door_rect, in_door_zone};
pub use rect::Rect;
pub use room::{Arena, Room, generate_room};
pub use state::{Adversary, Avatar, Body, Facing, GameEvent, GameState, Pickup, PickupKind, Swing};
pub use tick::{TickInput, tick};
