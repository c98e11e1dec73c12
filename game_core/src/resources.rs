/// Fixed-rate tick scheduler. Frames arrive at camera/display rate; the
/// simulation advances at most once per frame when an interval has elapsed.
#[derive(Debug, Clone, Copy)]
pub struct TickClock {
    pub interval: f32, // Seconds per tick
    pub max_dt: f32,   // Frame delta clamp
    acc: f32,
    pub ticks: u64, // Ticks handed out so far
}

impl TickClock {
    pub fn new(interval: f32, max_dt: f32) -> Self {
        Self {
            interval,
            max_dt,
            acc: 0.0,
            ticks: 0,
        }
    }

    /// Feed a frame delta; returns true when a tick is due this frame
    pub fn advance(&mut self, dt: f32) -> bool {
        self.acc += dt.clamp(0.0, self.max_dt);
        if self.acc < self.interval {
            return false;
        }
        // Drop backlog beyond one interval so a stalled frame never bursts
        self.acc = (self.acc - self.interval).min(self.interval);
        self.ticks += 1;
        true
    }

    pub fn reset(&mut self) {
        self.acc = 0.0;
        self.ticks = 0;
    }
}

/// Game score tracking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub value: u32, // Food eaten this round
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self) {
        self.value += 1;
    }

    pub fn reset(&mut self) {
        self.value = 0;
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Events that occurred during the last tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Events {
    pub ate_food: bool,
    pub collided: bool,
    pub restarted: bool,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.ate_food = false;
        self.collided = false;
        self.restarted = false;
    }
}
