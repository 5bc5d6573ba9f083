//! The outer game loop
//!
//! [`Game`] is the context everything runs in: it owns the simulation state,
//! the presentation surface, the input source, the start prompt and the sim
//! clock. One call to [`Game::step`] is one frame.

use std::time::Duration;

use crate::platform::{InputSource, PromptOutcome, StartPrompt};
use crate::renderer::{Surface, draw_frame, explode};
use crate::sim::{GameEvent, GameState, tick};

/// Totals for a finished session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub frames: u64,
    pub deaths: u32,
    pub best_score: u64,
    pub rooms_entered: u32,
}

pub struct Game<S: Surface, I: InputSource, P: StartPrompt> {
    pub state: GameState,
    surface: S,
    input: I,
    prompt: P,
    target_fps: u32,
    /// Sim clock: frame time accumulated from the surface, excluding time
    /// spent blocked in the start prompt
    clock: Duration,
    stats: RunStats,
}

impl<S: Surface, I: InputSource, P: StartPrompt> Game<S, I, P> {
    pub fn new(seed: u64, target_fps: u32, surface: S, input: I, prompt: P) -> Self {
        log::info!("New session, seed {}", seed);
        let state = GameState::new(seed, 0);
        let stats = RunStats {
            rooms_entered: state.room_index,
            ..Default::default()
        };
        Self {
            state,
            surface,
            input,
            prompt,
            target_fps,
            clock: Duration::ZERO,
            stats,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Sim clock in whole milliseconds
    pub fn clock_ms(&self) -> u64 {
        self.clock.as_millis() as u64
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Show the start prompt, then play frames until quit
    pub fn run(&mut self) -> RunStats {
        if self.prompt.wait_for_start(&mut self.surface, &mut self.input) == PromptOutcome::Quit {
            log::info!("Quit at title screen");
            return self.stats;
        }

        while self.step() {}

        log::info!(
            "Session over (seed {}, {} ticks): {} frames, {} deaths, best score {}, {} rooms",
            self.state.seed,
            self.state.time_ticks,
            self.stats.frames,
            self.stats.deaths,
            self.stats.best_score,
            self.stats.rooms_entered
        );
        self.stats
    }

    /// Run one frame. Returns false once the player has quit.
    pub fn step(&mut self) -> bool {
        let input = self.input.poll();
        if input.quit {
            log::info!("Quit requested");
            return false;
        }

        let now_ms = self.clock_ms();
        tick(&mut self.state, &input, now_ms);
        self.stats.best_score = self.stats.best_score.max(self.state.score);

        for event in &self.state.events {
            match event {
                GameEvent::AvatarDestroyed { pos, score } => {
                    self.stats.deaths += 1;
                    self.stats.best_score = self.stats.best_score.max(*score);
                    explode(&mut self.surface, *pos);
                    if self.prompt.wait_for_start(&mut self.surface, &mut self.input) == PromptOutcome::Quit {
                        log::info!("Quit after death");
                        return false;
                    }
                }
                GameEvent::RoomEntered { .. } => self.stats.rooms_entered += 1,
                _ => {}
            }
        }

        draw_frame(&self.state, &mut self.surface);
        self.surface.present();
        self.clock += self.surface.tick(self.target_fps);
        self.stats.frames += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::consts::*;
    use crate::platform::{AutoStart, ScriptedInput, TitleScreen};
    use crate::renderer::HeadlessSurface;
    use crate::sim::{Adversary, TickInput};

    fn headless() -> HeadlessSurface {
        HeadlessSurface::new(WIDTH as u32, HEIGHT as u32, false).unwrap()
    }

    #[test]
    fn test_quit_stops_loop() {
        let input = ScriptedInput::new(vec![TickInput::default(); 5]);
        let mut game = Game::new(1, FPS, headless(), input, AutoStart);
        let stats = game.run();
        assert_eq!(stats.frames, 5);
        assert_eq!(game.clock_ms(), 83);
        assert_eq!(game.surface().frames_presented(), 5);
        assert_eq!(game.state.time_ticks, 5);
        assert_eq!(game.state.seed, 1);
    }

    #[test]
    fn test_quit_on_title_screen_plays_nothing() {
        let input = ScriptedInput::default();
        let mut game = Game::new(1, FPS, headless(), input, TitleScreen);
        let stats = game.run();
        assert_eq!(stats.frames, 0);
    }

    #[test]
    fn test_death_explodes_and_prompts() {
        let start = TickInput {
            attack: true,
            ..Default::default()
        };
        // Title, one fatal frame, title again, then quit
        let input = ScriptedInput::new([start.clone(), TickInput::default(), start]);
        let mut game = Game::new(3, FPS, headless(), input, TitleScreen);

        game.state.avatar.health = 1;
        game.state.pickups.clear();
        game.state.adversaries = vec![Adversary::new(game.state.avatar.body.pos + Vec2::new(3.0, 0.0), 0)];
        game.clock = Duration::from_millis(ATTACK_COOLDOWN_MS);

        let stats = game.run();
        assert_eq!(stats.deaths, 1);
        assert_eq!(stats.frames, 1);
        assert_eq!(game.state.avatar.health, MAX_HEALTH);
        assert_eq!(game.surface().delayed_ms(), EXPLOSION_RINGS as u64 * EXPLOSION_RING_DELAY_MS);
    }

    #[test]
    fn test_clock_keeps_sub_millisecond_frame_time() {
        // 60 frames at 60 fps are just short of a second; the 61st crosses it
        let input = ScriptedInput::new(vec![TickInput::default(); 61]);
        let mut game = Game::new(1, FPS, headless(), input, AutoStart);
        for _ in 0..60 {
            assert!(game.step());
        }
        assert_eq!(game.clock_ms(), 999);
        assert!(game.step());
        assert_eq!(game.clock_ms(), 1016);
    }

    #[test]
    fn test_adversary_strikes_after_one_second_of_frames() {
        let input = ScriptedInput::new(vec![TickInput::default(); 62]);
        let mut game = Game::new(5, FPS, headless(), input, AutoStart);
        game.state.pickups.clear();
        let mut adversary = Adversary::new(game.state.avatar.body.pos, 0);
        adversary.speed = 0.0;
        game.state.adversaries = vec![adversary];

        // Frame 61 ticks at 999 ms
        for _ in 0..61 {
            assert!(game.step());
        }
        assert_eq!(game.state.avatar.health, MAX_HEALTH);

        // Frame 62 ticks at 1016 ms
        assert!(game.step());
        assert_eq!(game.state.avatar.health, MAX_HEALTH - 1);
    }
}
