use hecs::World;

use crate::components::*;
use crate::map::GameMap;
use crate::resources::Events;

/// Advance every snake one cell. Any self-collision makes the tick fail.
pub fn advance_snakes(world: &mut World, map: &GameMap, events: &mut Events) -> TickOutcome {
    let mut outcome = TickOutcome::Success;
    for (_entity, snake) in world.query_mut::<&mut Snake>() {
        if snake.tick(map) == TickOutcome::Collision {
            events.collided = true;
            outcome = TickOutcome::Collision;
        }
    }
    outcome
}
