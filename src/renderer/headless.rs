//! Headless surface: records draw calls instead of rasterizing them
//!
//! Runs the game without a window (demo runs, CI, tests). Optionally paces
//! frames against the wall clock so a demo plays back at real speed.

use std::time::{Duration, Instant};

use glam::Vec2;

use super::{Color, RectStyle, Surface, TextStyle};
use crate::error::{GameError, Result};
use crate::sim::Rect;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Rect {
        rect: Rect,
        color: Color,
        style: RectStyle,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Text {
        text: String,
        color: Color,
        pos: Vec2,
        style: TextStyle,
    },
}

pub struct HeadlessSurface {
    /// Sleep in `tick`/`delay` to match wall-clock timing
    pace: bool,
    pending: Vec<DrawCommand>,
    last_frame: Vec<DrawCommand>,
    frames_presented: u64,
    delayed_ms: u64,
    last_tick: Option<Instant>,
}

impl HeadlessSurface {
    pub fn new(width: u32, height: u32, pace: bool) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::SurfaceInit(format!(
                "invalid surface size {}x{}",
                width, height
            )));
        }
        log::info!("Headless surface {}x{} (pacing {})", width, height, if pace { "on" } else { "off" });
        Ok(Self {
            pace,
            pending: Vec::new(),
            last_frame: Vec::new(),
            frames_presented: 0,
            delayed_ms: 0,
            last_tick: None,
        })
    }

    /// Draw calls of the most recently presented frame
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last_frame
    }

    /// Text lines of the most recently presented frame
    pub fn last_frame_text(&self) -> Vec<String> {
        self.last_frame
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Total time requested through `delay`
    pub fn delayed_ms(&self) -> u64 {
        self.delayed_ms
    }

    fn record(&mut self, command: DrawCommand) {
        log::trace!("{:?}", command);
        self.pending.push(command);
    }
}

impl Surface for HeadlessSurface {
    fn clear(&mut self, color: Color) {
        self.pending.clear();
        self.record(DrawCommand::Clear(color));
    }

    fn draw_rect(&mut self, rect: Rect, color: Color, style: RectStyle) {
        self.record(DrawCommand::Rect { rect, color, style });
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.record(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, color: Color, pos: Vec2, style: TextStyle) {
        self.record(DrawCommand::Text {
            text: text.to_string(),
            color,
            pos,
            style,
        });
    }

    fn present(&mut self) {
        // The buffer persists until the next clear, like a real back buffer
        self.last_frame = self.pending.clone();
        self.frames_presented += 1;
    }

    fn tick(&mut self, target_fps: u32) -> Duration {
        let budget = Duration::from_secs(1) / target_fps.max(1);
        if !self.pace {
            return budget;
        }

        let now = Instant::now();
        let elapsed = match self.last_tick {
            Some(last) => {
                let spent = now.duration_since(last);
                if spent < budget {
                    std::thread::sleep(budget - spent);
                }
                last.elapsed()
            }
            None => budget,
        };
        self.last_tick = Some(Instant::now());
        elapsed
    }

    fn delay(&mut self, ms: u64) {
        self.delayed_ms += ms;
        if self.pace {
            std::thread::sleep(Duration::from_millis(ms));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_size_is_fatal() {
        assert!(matches!(HeadlessSurface::new(0, 600, false), Err(GameError::SurfaceInit(_))));
    }

    #[test]
    fn test_present_snapshots_frame() {
        let mut surface = HeadlessSurface::new(800, 600, false).unwrap();
        surface.clear([0.0; 4]);
        surface.draw_circle(Vec2::ZERO, 3.0, [1.0; 4]);
        surface.present();
        assert_eq!(surface.last_frame().len(), 2);

        // Drawing on top without clearing keeps the old content
        surface.draw_circle(Vec2::ONE, 4.0, [1.0; 4]);
        surface.present();
        assert_eq!(surface.last_frame().len(), 3);

        surface.clear([0.0; 4]);
        surface.present();
        assert_eq!(surface.last_frame().len(), 1);
        assert_eq!(surface.frames_presented(), 3);
    }

    #[test]
    fn test_unpaced_tick_reports_frame_budget() {
        let mut surface = HeadlessSurface::new(800, 600, false).unwrap();
        assert_eq!(surface.tick(60), Duration::from_nanos(16_666_666));
        assert_eq!(surface.tick(50), Duration::from_millis(20));
    }
}
