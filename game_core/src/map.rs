use glam::IVec2;
use rand::Rng;

use crate::config::Config;
use crate::resources::GameRng;

/// Toroidal playfield. Positions are pixel coordinates snapped to the cell size;
/// anything leaving one edge comes back on the opposite one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameMap {
    pub width: i32,
    pub height: i32,
    pub cell_size: i32,
}

impl GameMap {
    pub fn new(width: i32, height: i32, cell_size: i32) -> Self {
        Self {
            width,
            height,
            cell_size,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.grid_width, config.grid_height, config.cell_size)
    }

    pub fn cols(&self) -> i32 {
        self.width / self.cell_size
    }

    pub fn rows(&self) -> i32 {
        self.height / self.cell_size
    }

    /// Wrap a position back onto the torus
    pub fn wrap(&self, pos: IVec2) -> IVec2 {
        IVec2::new(pos.x.rem_euclid(self.width), pos.y.rem_euclid(self.height))
    }

    /// Check a position lies on the grid lattice and inside the bounds
    pub fn contains(&self, pos: IVec2) -> bool {
        pos.x >= 0
            && pos.x < self.width
            && pos.y >= 0
            && pos.y < self.height
            && pos.x % self.cell_size == 0
            && pos.y % self.cell_size == 0
    }

    /// Uniformly random cell, ignoring whatever occupies it
    pub fn random_cell(&self, rng: &mut GameRng) -> IVec2 {
        let col = rng.0.gen_range(0..self.cols());
        let row = rng.0.gen_range(0..self.rows());
        IVec2::new(col * self.cell_size, row * self.cell_size)
    }

    /// Pixel position of a (col, row) cell
    pub fn cell(&self, col: i32, row: i32) -> IVec2 {
        self.wrap(IVec2::new(col * self.cell_size, row * self.cell_size))
    }
}

impl Default for GameMap {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
