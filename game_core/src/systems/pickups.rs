use glam::IVec2;
use hecs::{Entity, World};
use tracing::debug;

use crate::components::*;
use crate::map::GameMap;
use crate::resources::*;

/// Let snakes eat food under their heads: grow, score, and move the food
pub fn eat_food(
    world: &mut World,
    map: &GameMap,
    score: &mut Score,
    events: &mut Events,
    rng: &mut GameRng,
) {
    // Deterministic: sort by entity ID
    let mut heads: Vec<(Entity, IVec2)> = world
        .query::<&Snake>()
        .iter()
        .map(|(entity, snake)| (entity, snake.head()))
        .collect();
    heads.sort_by_key(|(e, _)| e.id());

    let mut foods: Vec<(Entity, IVec2)> = world
        .query::<&Food>()
        .iter()
        .map(|(entity, food)| (entity, food.pos))
        .collect();
    foods.sort_by_key(|(e, _)| e.id());

    for (food_entity, food_pos) in foods {
        let Some(&(eater, _)) = heads.iter().find(|(_, head)| *head == food_pos) else {
            continue;
        };

        if let Ok(mut snake) = world.get::<&mut Snake>(eater) {
            snake.grow();
        }
        if let Ok(mut food) = world.get::<&mut Food>(food_entity) {
            food.randomize(map, rng);
            debug!(eaten = %food_pos, next = %food.pos, "food eaten");
        }
        score.increment();
        events.ate_food = true;
    }
}
