//! Per-frame simulation tick
//!
//! Core game loop step: movement, combat, pickups, door gating, death.

use glam::Vec2;

use super::collision::in_door_zone;
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Swing (space)
    pub attack: bool,
    /// Window closed / escape. Handled by the outer loop, ignored by `tick`.
    pub quit: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one frame. `now_ms` is the sim clock reading
/// used for adversary cooldowns.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: u64) {
    state.events.clear();
    state.last_swing = None;
    state.time_ticks += 1;

    let mut input = input.clone();
    if input.idle_mode {
        pilot(state, &mut input);
    }
    let input = &input;

    // Movement
    let arena = state.arena;
    state.avatar.walk(input, &arena);

    // Swing
    if input.attack {
        let swing = state.avatar.attack(&mut state.adversaries, input);
        state.score += u64::from(swing.points);
        state.last_swing = Some(swing.hitbox);
        if swing.slain > 0 {
            log::debug!("Swing slew {} (+{} score)", swing.slain, swing.points);
            state.events.push(GameEvent::AdversariesSlain {
                count: swing.slain,
                points: swing.points,
            });
        }
    }

    // Adversaries close in and strike
    let target = state.avatar.body.pos;
    let avatar_box = state.avatar.body.rect();
    let mut died = false;
    for adversary in state.adversaries.iter_mut() {
        adversary.pursue(target);
        if adversary.body.rect().overlaps(&avatar_box) && adversary.can_attack(now_ms) {
            if state.avatar.take_hit() {
                died = true;
                break;
            }
            log::debug!("Avatar hit, health {}", state.avatar.health);
            state.events.push(GameEvent::AvatarHit {
                health: state.avatar.health,
            });
        }
    }
    if died {
        state.reset_after_death(now_ms);
    }

    // Room cleared
    if state.adversaries.is_empty() && !state.door_open {
        log::info!("Room {} cleared, door open", state.room_index);
        state.door_open = true;
        state.events.push(GameEvent::DoorOpened);
    }

    // Pickups
    let avatar_box = state.avatar.body.rect();
    let GameState {
        avatar,
        pickups,
        events,
        ..
    } = state;
    pickups.retain(|pickup| {
        if !pickup.body.rect().overlaps(&avatar_box) {
            return true;
        }
        pickup.apply(avatar);
        log::debug!("Collected {:?}", pickup.kind);
        events.push(GameEvent::PickupCollected { kind: pickup.kind });
        false
    });

    // Exit door
    if state.door_open && in_door_zone(&state.avatar.body.rect()) {
        state.enter_new_room(now_ms);
    }
}

/// Demo pilot: replaces the direction and attack inputs.
///
/// Hunts the nearest adversary and swings once it is in reach; with the room
/// clear it collects pickups, then walks to the door.
fn pilot(state: &GameState, input: &mut TickInput) {
    input.up = false;
    input.down = false;
    input.left = false;
    input.right = false;
    input.attack = false;

    let here = state.avatar.body.center();
    let target = if let Some(enemy) = nearest(here, state.adversaries.iter().map(|a| a.body.center())) {
        // Swing all around as soon as it would connect
        let reach = AVATAR_SIZE * ATTACK_REACH / 2.0 + ADVERSARY_SIZE / 2.0;
        let delta = (enemy - here).abs();
        if delta.x < reach && delta.y < reach {
            input.attack = true;
            return;
        }
        enemy
    } else if let Some(pickup) = nearest(here, state.pickups.iter().map(|p| p.body.center())) {
        pickup
    } else if state.door_open {
        Vec2::new(DOOR_X + DOOR_WIDTH / 2.0, DOOR_Y + DOOR_HEIGHT / 2.0)
    } else {
        return;
    };

    // Dead zone keeps the pilot from jittering around its target
    let dead_zone = state.avatar.speed;
    let delta = target - here;
    input.left = delta.x < -dead_zone;
    input.right = delta.x > dead_zone;
    input.up = delta.y < -dead_zone;
    input.down = delta.y > dead_zone;
}

fn nearest(here: Vec2, points: impl Iterator<Item = Vec2>) -> Option<Vec2> {
    points.min_by(|a, b| a.distance_squared(here).total_cmp(&b.distance_squared(here)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena_center;
    use crate::sim::state::{Adversary, Pickup, PickupKind};
    use proptest::prelude::*;

    /// A state with an empty room and the avatar at `(400, 300)`
    fn bare_state() -> GameState {
        let mut state = GameState::new(12345, 0);
        state.adversaries.clear();
        state.pickups.clear();
        state.events.clear();
        state
    }

    fn attack_up() -> TickInput {
        TickInput {
            up: true,
            attack: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_up_swing_misses_adversary_below() {
        let mut state = bare_state();
        state.adversaries.push(Adversary::new(Vec2::new(400.0, 360.0), 0));

        tick(&mut state, &attack_up(), 16);
        assert_eq!(state.adversaries.len(), 1);
        assert_eq!(state.score, 0);
        assert!(!state.door_open);
        assert!(state.last_swing.is_some());
    }

    #[test]
    fn test_up_swing_clears_room() {
        let mut state = bare_state();
        state.adversaries.push(Adversary::new(Vec2::new(400.0, 250.0), 0));

        tick(&mut state, &attack_up(), 16);
        assert!(state.adversaries.is_empty());
        assert_eq!(state.score, 1);
        assert!(state.door_open);
        assert!(state.events.contains(&GameEvent::DoorOpened));
        assert!(state.events.contains(&GameEvent::AdversariesSlain { count: 1, points: 1 }));
    }

    #[test]
    fn test_door_opens_once() {
        let mut state = bare_state();
        tick(&mut state, &TickInput::default(), 16);
        assert!(state.door_open);
        tick(&mut state, &TickInput::default(), 32);
        assert!(state.door_open);
        assert!(!state.events.contains(&GameEvent::DoorOpened));
    }

    #[test]
    fn test_contact_damage_respects_cooldown() {
        let mut state = bare_state();
        state.adversaries.push(Adversary::new(Vec2::new(405.0, 300.0), 0));

        tick(&mut state, &TickInput::default(), 500);
        assert_eq!(state.avatar.health, MAX_HEALTH);

        tick(&mut state, &TickInput::default(), 1000);
        assert_eq!(state.avatar.health, MAX_HEALTH - 1);

        tick(&mut state, &TickInput::default(), 1500);
        assert_eq!(state.avatar.health, MAX_HEALTH - 1);

        tick(&mut state, &TickInput::default(), 2000);
        assert_eq!(state.avatar.health, MAX_HEALTH - 2);
    }

    #[test]
    fn test_death_transition() {
        let mut state = bare_state();
        state.score = 9;
        state.avatar.health = 1;
        state.avatar.body.pos = Vec2::new(100.0, 100.0);
        state.adversaries.push(Adversary::new(Vec2::new(105.0, 100.0), 0));
        state.adversaries.push(Adversary::new(Vec2::new(100.0, 105.0), 0));

        tick(&mut state, &TickInput::default(), 1000);
        let destroyed = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::AvatarDestroyed { .. }))
            .count();
        assert_eq!(destroyed, 1);
        assert_eq!(state.avatar.health, MAX_HEALTH);
        assert_eq!(state.score, 0);
        assert_eq!(state.avatar.body.pos, arena_center());
        assert!(!state.door_open);
        assert!(state.adversaries.len() >= MIN_ADVERSARIES);
    }

    #[test]
    fn test_pickup_consumed_on_overlap() {
        let mut state = bare_state();
        state.pickups.push(Pickup::new(Vec2::new(405.0, 305.0), PickupKind::Speed));
        state.pickups.push(Pickup::new(Vec2::new(100.0, 100.0), PickupKind::AttackPower));

        tick(&mut state, &TickInput::default(), 16);
        assert_eq!(state.avatar.speed, UPGRADED_SPEED);
        assert_eq!(state.avatar.attack_power, DEFAULT_ATTACK_POWER);
        assert_eq!(state.pickups.len(), 1);
        assert_eq!(state.pickups[0].kind, PickupKind::AttackPower);
    }

    #[test]
    fn test_health_pickup_consumed_at_full_health() {
        let mut state = bare_state();
        state.pickups.push(Pickup::new(Vec2::new(400.0, 300.0), PickupKind::Health));
        tick(&mut state, &TickInput::default(), 16);
        assert!(state.pickups.is_empty());
        assert_eq!(state.avatar.health, MAX_HEALTH);
    }

    #[test]
    fn test_door_transition_keeps_score() {
        let mut state = bare_state();
        state.score = 5;
        state.avatar.health = 2;
        tick(&mut state, &TickInput::default(), 16);
        assert!(state.door_open);

        let room_before = state.room_index;
        state.avatar.body.pos = Vec2::new(DOOR_X - AVATAR_SIZE, 290.0);
        tick(&mut state, &TickInput::default(), 32);

        assert_eq!(state.room_index, room_before + 1);
        assert!(!state.door_open);
        assert_eq!(state.score, 5);
        assert_eq!(state.avatar.health, 2);
        assert_eq!(state.avatar.body.pos, arena_center());
        assert!(!state.adversaries.is_empty());
    }

    #[test]
    fn test_closed_door_blocks_exit() {
        let mut state = bare_state();
        state.adversaries.push(Adversary::new(Vec2::new(10.0, 10.0), 0));
        state.avatar.body.pos = Vec2::new(DOOR_X - AVATAR_SIZE, 290.0);
        let room_before = state.room_index;

        tick(&mut state, &TickInput::default(), 16);
        assert_eq!(state.room_index, room_before);
        assert!(!state.door_open);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999, 0);
        let mut state2 = GameState::new(99999, 0);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        for frame in 0..600u64 {
            tick(&mut state1, &input, frame * 16);
            tick(&mut state2, &input, frame * 16);
        }

        assert_eq!(state1.time_ticks, 600);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.room_index, state2.room_index);
        assert_eq!(state1.avatar.body.pos, state2.avatar.body.pos);
        assert_eq!(state1.adversaries.len(), state2.adversaries.len());
    }

    #[test]
    fn test_pilot_scores() {
        let mut state = GameState::new(2024, 0);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        let mut slain = 0;
        for frame in 0..1200u64 {
            tick(&mut state, &input, frame * 16);
            slain += state
                .events
                .iter()
                .filter_map(|e| match e {
                    GameEvent::AdversariesSlain { count, .. } => Some(*count),
                    _ => None,
                })
                .sum::<u32>();
        }
        assert!(slain > 0);
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
            |(up, down, left, right, attack)| TickInput {
                up,
                down,
                left,
                right,
                attack,
                ..Default::default()
            },
        )
    }

    proptest! {
        #[test]
        fn prop_avatar_stays_in_arena(
            seed in any::<u64>(),
            speed_up in any::<bool>(),
            inputs in prop::collection::vec(arb_input(), 1..300),
        ) {
            let mut state = GameState::new(seed, 0);
            if speed_up {
                state.avatar.speed = UPGRADED_SPEED;
            }
            for (frame, input) in inputs.iter().enumerate() {
                tick(&mut state, input, frame as u64 * 16);
                let r = state.avatar.body.rect();
                prop_assert!(r.left() >= 0.0 && r.top() >= 0.0);
                prop_assert!(r.right() <= WIDTH && r.bottom() <= HEIGHT);
            }
        }

        #[test]
        fn prop_health_bounded(
            seed in any::<u64>(),
            inputs in prop::collection::vec(arb_input(), 1..300),
        ) {
            let mut state = GameState::new(seed, 0);
            for (frame, input) in inputs.iter().enumerate() {
                tick(&mut state, input, frame as u64 * 250);
                prop_assert!(state.avatar.health >= 1 && state.avatar.health <= MAX_HEALTH);
                let deaths = state
                    .events
                    .iter()
                    .filter(|e| matches!(e, GameEvent::AvatarDestroyed { .. }))
                    .count();
                prop_assert!(deaths <= 1);
                if deaths == 1 {
                    prop_assert_eq!(state.avatar.health, MAX_HEALTH);
                    prop_assert_eq!(state.score, 0);
                }
            }
        }
    }
}
