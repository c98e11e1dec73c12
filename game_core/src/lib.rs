pub mod components;
pub mod config;
pub mod debounce;
pub mod fsm;
pub mod game;
pub mod gesture;
pub mod input;
pub mod map;
pub mod params;
pub mod resources;
pub mod systems;

pub use components::*;
pub use config::*;
pub use debounce::*;
pub use fsm::*;
pub use game::*;
pub use gesture::*;
pub use input::*;
pub use map::*;
pub use params::*;
pub use resources::*;

use hecs::World;
use systems::*;

/// Run one deterministic Snake simulation tick
pub fn step(
    world: &mut World,
    map: &GameMap,
    score: &mut Score,
    events: &mut Events,
    rng: &mut GameRng,
) -> TickOutcome {
    // Clear events at start of tick
    events.clear();

    // 1. Apply the latest heading request (reversals are dropped)
    apply_direction_intents(world);

    // 2. Move the snake, stopping on self-collision
    let outcome = advance_snakes(world, map, events);

    // 3. Food is only checked after a successful move
    if outcome == TickOutcome::Success {
        eat_food(world, map, score, events, rng);
    }

    outcome
}
