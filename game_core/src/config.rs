use glam::IVec2;

use crate::params::Params;

/// Game configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub grid_width: i32,
    pub grid_height: i32,
    pub cell_size: i32,
    pub tick_rate_hz: f32,
    pub max_dt: f32,
    pub dead_zone: i32,
    pub frame_width: u32,
    pub frame_height: u32,
    /// Extended-finger count that restarts a finished game. `None` disables it.
    pub restart_finger_count: Option<u8>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid_width: Params::GRID_WIDTH,
            grid_height: Params::GRID_HEIGHT,
            cell_size: Params::CELL_SIZE,
            tick_rate_hz: Params::TICK_RATE_HZ,
            max_dt: Params::MAX_DT,
            dead_zone: Params::DEAD_ZONE_PX,
            frame_width: Params::FRAME_WIDTH,
            frame_height: Params::FRAME_HEIGHT,
            restart_finger_count: Some(Params::RESTART_FINGER_COUNT),
        }
    }
}

/// Reasons a [`Config`] cannot drive a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("cell size must be positive")]
    ZeroCellSize,
    #[error("grid size must be a positive multiple of the cell size")]
    Misaligned,
    #[error("tick rate must be positive")]
    ZeroTickRate,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size <= 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.grid_width <= 0
            || self.grid_height <= 0
            || self.grid_width % self.cell_size != 0
            || self.grid_height % self.cell_size != 0
        {
            return Err(ConfigError::Misaligned);
        }
        if self.tick_rate_hz <= 0.0 {
            return Err(ConfigError::ZeroTickRate);
        }
        Ok(())
    }

    /// Number of cell columns
    pub fn cols(&self) -> i32 {
        self.grid_width / self.cell_size
    }

    /// Number of cell rows
    pub fn rows(&self) -> i32 {
        self.grid_height / self.cell_size
    }

    /// Spawn cell for a fresh snake
    pub fn center(&self) -> IVec2 {
        IVec2::new(self.grid_width / 2, self.grid_height / 2)
    }

    /// Seconds between simulation ticks
    pub fn tick_interval(&self) -> f32 {
        1.0 / self.tick_rate_hz
    }
}
