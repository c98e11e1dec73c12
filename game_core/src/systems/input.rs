use hecs::World;
use tracing::trace;

use crate::components::*;

/// Record a requested heading; the latest valid request before a tick wins.
/// A reversal of the current heading never displaces an earlier turn.
pub fn queue_direction(world: &mut World, dir: Direction) {
    for (_entity, (snake, intent)) in world.query_mut::<(&Snake, &mut DirectionIntent)>() {
        if dir == snake.direction().opposite() {
            trace!(?dir, heading = ?snake.direction(), "ignored reversing direction");
            continue;
        }
        intent.dir = Some(dir);
    }
}

/// Hand pending headings to the snakes. Reversals are dropped by the snake.
pub fn apply_direction_intents(world: &mut World) {
    for (_entity, (snake, intent)) in world.query_mut::<(&mut Snake, &mut DirectionIntent)>() {
        if let Some(dir) = intent.dir.take() {
            if !snake.set_direction(dir) {
                trace!(?dir, heading = ?snake.direction(), "ignored reversing direction");
            }
        }
    }
}
