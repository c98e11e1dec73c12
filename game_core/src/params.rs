/// Game tuning parameters for Snake
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Grid (pixels)
    pub const GRID_WIDTH: i32 = 800;
    pub const GRID_HEIGHT: i32 = 600;
    pub const CELL_SIZE: i32 = 20;

    // Simulation
    pub const TICK_RATE_HZ: f32 = 15.0;
    pub const MAX_DT: f32 = 0.25; // Clamp to prevent large jumps

    // Gesture input
    pub const DEAD_ZONE_PX: i32 = 50;
    pub const FRAME_WIDTH: u32 = 640;
    pub const FRAME_HEIGHT: u32 = 480;
    pub const RESTART_FINGER_COUNT: u8 = 4; // Open palm

    // Companion telemetry
    pub const TELEMETRY_ADDR: &str = "127.0.0.1:5060";
}
