use std::collections::VecDeque;

use glam::IVec2;

use crate::map::GameMap;
use crate::resources::GameRng;

/// Cardinal heading. Image space: y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step in cells
    pub fn unit(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    /// Displacement of one move on a grid with the given cell size
    pub fn delta(self, cell_size: i32) -> IVec2 {
        self.unit() * cell_size
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Result of advancing the snake by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Success,
    Collision,
}

/// Snake component - head-first body plus target length and heading
#[derive(Debug, Clone)]
pub struct Snake {
    positions: VecDeque<IVec2>,
    pub length: usize, // Target length; growth happens by skipping truncation
    direction: Direction,
}

impl Snake {
    /// Fresh snake: one cell long, heading up
    pub fn new(head: IVec2) -> Self {
        Self {
            positions: VecDeque::from([head]),
            length: 1,
            direction: Direction::Up,
        }
    }

    /// Snake with an explicit body (head first) and heading. An empty body
    /// becomes a single cell at the origin.
    pub fn with_body(body: impl IntoIterator<Item = IVec2>, direction: Direction) -> Self {
        let mut positions: VecDeque<IVec2> = body.into_iter().collect();
        if positions.is_empty() {
            positions.push_back(IVec2::ZERO);
        }
        let length = positions.len();
        Self {
            positions,
            length,
            direction,
        }
    }

    pub fn head(&self) -> IVec2 {
        self.positions[0]
    }

    pub fn positions(&self) -> &VecDeque<IVec2> {
        &self.positions
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Change heading. Reversing onto the neck is silently ignored.
    /// Returns whether the heading was accepted.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if direction == self.direction.opposite() {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Advance one cell. On collision the body is left untouched.
    pub fn tick(&mut self, map: &GameMap) -> TickOutcome {
        let new_head = map.wrap(self.head() + self.direction.delta(map.cell_size));

        // The neck cell can never be re-entered thanks to the reversal guard
        if self.positions.len() > 2 && self.positions.iter().skip(2).any(|p| *p == new_head) {
            return TickOutcome::Collision;
        }

        self.positions.push_front(new_head);
        if self.positions.len() > self.length {
            self.positions.pop_back();
        }
        TickOutcome::Success
    }

    pub fn grow(&mut self) {
        self.length += 1;
    }

    pub fn reset(&mut self, head: IVec2) {
        *self = Self::new(head);
    }
}

/// Food component - a single cell the snake can eat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub pos: IVec2,
}

impl Food {
    pub fn new(pos: IVec2) -> Self {
        Self { pos }
    }

    /// Spawn at a random cell
    pub fn spawn(map: &GameMap, rng: &mut GameRng) -> Self {
        Self::new(map.random_cell(rng))
    }

    /// Move to a uniformly random cell. The snake body is not avoided.
    pub fn randomize(&mut self, map: &GameMap, rng: &mut GameRng) {
        self.pos = map.random_cell(rng);
    }
}

/// Pending heading change for the snake, applied at the start of a tick
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectionIntent {
    pub dir: Option<Direction>,
}

impl DirectionIntent {
    pub fn new() -> Self {
        Self::default()
    }
}
