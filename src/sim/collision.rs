//! Attack hitboxes and the exit door zone

use glam::Vec2;

use super::rect::Rect;
use super::state::{Body, Facing};
use crate::consts::*;

/// Hitbox of a swing by `body` in the given facing.
///
/// Directional swings are a bar `ATTACK_REACH` extents long and one extent
/// wide, starting at the body's edge. A swing with no direction is a square
/// of `ATTACK_REACH` extents centered on the body.
pub fn attack_hitbox(body: &Body, facing: Facing) -> Rect {
    let s = body.size;
    let reach = s * ATTACK_REACH;
    let Vec2 { x, y } = body.pos;

    match facing {
        Facing::Up => Rect::new(x, y - reach, s, reach),
        Facing::Down => Rect::new(x, y + s, s, reach),
        Facing::Left => Rect::new(x - reach, y, reach, s),
        Facing::Right => Rect::new(x + s, y, reach, s),
        Facing::Around => Rect::centered_on(body.center(), Vec2::splat(reach)),
    }
}

/// The exit door's drawn rectangle
pub fn door_rect() -> Rect {
    Rect::new(DOOR_X, DOOR_Y, DOOR_WIDTH, DOOR_HEIGHT)
}

/// True when a box has reached the door: its right edge at or past the door's
/// left edge, with its vertical center strictly inside the door's span.
pub fn in_door_zone(rect: &Rect) -> bool {
    let cy = rect.center().y;
    rect.right() >= DOOR_X && cy > DOOR_Y && cy < DOOR_Y + DOOR_HEIGHT
}
