//! Software-rendered game window using `minifb`.
//!
//! Doubles as the keyboard fallback: arrow keys steer, Space restarts after
//! a game over, Escape (or closing the window) quits.

use std::time::Duration;

use anyhow::{anyhow, Result};
use game_core::{Config, ControlCommand, Direction, FrameView, KeyCommand, KeyInput, RenderSink};
use glam::IVec2;
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use tracing::warn;

const BG_COLOR: u32 = 0xFF000000;
const BODY_COLOR: u32 = 0xFF00FF00;
const HEAD_COLOR: u32 = 0xFF00B400;
const FOOD_COLOR: u32 = 0xFFFF0000;
const OUTLINE_COLOR: u32 = 0xFFFFFFFF;
const GAME_OVER_BORDER: u32 = 0xFFFF0000;
const GAME_OVER_BORDER_PX: usize = 6;

/// Arrow keys in priority order
const ARROWS: [(Key, Direction); 4] = [
    (Key::Up, Direction::Up),
    (Key::Down, Direction::Down),
    (Key::Left, Direction::Left),
    (Key::Right, Direction::Right),
];

pub struct GameWindow {
    window: Window,
    canvas: Canvas,
    title: String,
}

impl GameWindow {
    pub fn open(config: &Config) -> Result<Self> {
        let canvas = Canvas::new(
            config.grid_width as usize,
            config.grid_height as usize,
            config.cell_size as usize,
        );
        let mut window = Window::new(
            "Hand-Controlled Snake",
            canvas.width,
            canvas.height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| anyhow!("failed to open game window: {e}"))?;

        window.limit_update_rate(Some(Duration::from_millis(16))); // ~60fps

        Ok(Self {
            window,
            canvas,
            title: String::new(),
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Translate this frame's keyboard state into queued commands
    pub fn poll_keys(&self, keys: &mut KeyInput) {
        if !self.window.is_open() {
            keys.press(KeyCommand::Control(ControlCommand::Quit));
            return;
        }
        let commands = key_commands(
            |k| self.window.is_key_pressed(k, KeyRepeat::No),
            |k| self.window.is_key_down(k),
        );
        for command in commands {
            keys.press(command);
        }
    }
}

/// Keyboard mapping. Held arrows repeat every frame; only the first held
/// arrow in Up, Down, Left, Right order counts.
pub fn key_commands(pressed: impl Fn(Key) -> bool, held: impl Fn(Key) -> bool) -> Vec<KeyCommand> {
    let mut commands = Vec::new();
    if pressed(Key::Escape) {
        commands.push(KeyCommand::Control(ControlCommand::Quit));
    }
    if pressed(Key::Space) {
        commands.push(KeyCommand::Control(ControlCommand::Restart));
    }
    if let Some((_, dir)) = ARROWS.iter().find(|(key, _)| held(*key)) {
        commands.push(KeyCommand::Move(*dir));
    }
    commands
}

pub fn title_for(frame: &FrameView) -> String {
    if frame.game_over {
        format!(
            "GAME OVER | Final Score: {} | SPACE to restart, ESC to quit",
            frame.score
        )
    } else {
        format!(
            "Snake | Score: {} | Move hand to control, ESC to quit",
            frame.score
        )
    }
}

impl RenderSink for GameWindow {
    fn present(&mut self, frame: &FrameView) {
        self.canvas.draw(frame);

        let title = title_for(frame);
        if title != self.title {
            self.window.set_title(&title);
            self.title = title;
        }

        if let Err(e) =
            self.window
                .update_with_buffer(&self.canvas.buf, self.canvas.width, self.canvas.height)
        {
            warn!("window update failed: {e}");
        }
    }
}

/// Frame buffer with a cell grid drawn on it
pub struct Canvas {
    pub width: usize,
    pub height: usize,
    pub cell: usize,
    pub buf: Vec<u32>,
}

impl Canvas {
    pub fn new(width: usize, height: usize, cell: usize) -> Self {
        Self {
            width,
            height,
            cell,
            buf: vec![BG_COLOR; width * height],
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        self.buf[y * self.width + x]
    }

    pub fn draw(&mut self, frame: &FrameView) {
        self.buf.fill(BG_COLOR);

        if frame.game_over {
            self.border(GAME_OVER_BORDER, GAME_OVER_BORDER_PX);
            return;
        }

        self.cell_rect(frame.food, FOOD_COLOR);
        // Tail first so the head is drawn on top
        for (i, pos) in frame.body.iter().enumerate().rev() {
            let color = if i == 0 { HEAD_COLOR } else { BODY_COLOR };
            self.cell_rect(*pos, color);
        }
    }

    fn cell_rect(&mut self, pos: IVec2, fill: u32) {
        if pos.x < 0 || pos.y < 0 {
            return;
        }
        let (x0, y0) = (pos.x as usize, pos.y as usize);
        let x1 = (x0 + self.cell).min(self.width);
        let y1 = (y0 + self.cell).min(self.height);
        for y in y0..y1 {
            for x in x0..x1 {
                let edge = x == x0 || y == y0 || x + 1 == x1 || y + 1 == y1;
                self.buf[y * self.width + x] = if edge { OUTLINE_COLOR } else { fill };
            }
        }
    }

    fn border(&mut self, color: u32, thickness: usize) {
        for y in 0..self.height {
            for x in 0..self.width {
                let edge = x < thickness
                    || y < thickness
                    || x + thickness >= self.width
                    || y + thickness >= self.height;
                if edge {
                    self.buf[y * self.width + x] = color;
                }
            }
        }
    }
}
