//! Platform abstraction layer
//!
//! Handles the outside world the simulation must not touch directly:
//! - Input snapshots, sampled once per frame
//! - The blocking start prompt (title screen)

use std::collections::VecDeque;

use crate::consts::FPS;
use crate::renderer::{Surface, draw_title};
use crate::sim::TickInput;

/// Supplies one input snapshot per frame
pub trait InputSource {
    fn poll(&mut self) -> TickInput;
}

/// Replays a fixed list of inputs, then asks to quit
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    inputs: VecDeque<TickInput>,
}

impl ScriptedInput {
    pub fn new(inputs: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            inputs: inputs.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> TickInput {
        self.inputs.pop_front().unwrap_or(TickInput {
            quit: true,
            ..Default::default()
        })
    }
}

/// Hands control to the demo pilot, optionally for a limited number of polls
#[derive(Debug, Clone)]
pub struct DemoInput {
    polls_left: Option<u64>,
}

impl DemoInput {
    pub fn new(max_polls: Option<u64>) -> Self {
        Self {
            polls_left: max_polls,
        }
    }
}

impl InputSource for DemoInput {
    fn poll(&mut self) -> TickInput {
        if let Some(left) = self.polls_left.as_mut() {
            if *left == 0 {
                return TickInput {
                    quit: true,
                    ..Default::default()
                };
            }
            *left -= 1;
        }
        // Attack doubles as "start" on the title screen
        TickInput {
            attack: true,
            idle_mode: true,
            ..Default::default()
        }
    }
}

/// Result of waiting on the start prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOutcome {
    Start,
    /// The player closed the game while the prompt was up
    Quit,
}

/// Blocks until the player is ready to (re)start
pub trait StartPrompt {
    fn wait_for_start(&mut self, surface: &mut dyn Surface, input: &mut dyn InputSource) -> PromptOutcome;
}

/// Title screen: runs its own frame loop until start (space) or quit
#[derive(Debug, Clone, Default)]
pub struct TitleScreen;

impl StartPrompt for TitleScreen {
    fn wait_for_start(&mut self, surface: &mut dyn Surface, input: &mut dyn InputSource) -> PromptOutcome {
        loop {
            let snapshot = input.poll();
            if snapshot.quit {
                return PromptOutcome::Quit;
            }
            if snapshot.attack {
                return PromptOutcome::Start;
            }
            draw_title(surface);
            surface.tick(FPS);
        }
    }
}

/// Starts immediately without showing anything
#[derive(Debug, Clone, Default)]
pub struct AutoStart;

impl StartPrompt for AutoStart {
    fn wait_for_start(&mut self, _surface: &mut dyn Surface, _input: &mut dyn InputSource) -> PromptOutcome {
        PromptOutcome::Start
    }
}
