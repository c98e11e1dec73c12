//! Game controller: owns the world, gates ticks on the state machine and
//! keeps score.

use glam::IVec2;
use hecs::{Entity, World};
use tracing::debug;

use crate::components::*;
use crate::config::Config;
use crate::fsm::{FsmState, GameAction, GameFsm};
use crate::input::{ControlCommand, InputSource};
use crate::map::GameMap;
use crate::resources::*;
use crate::step;
use crate::systems::queue_direction;

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameView {
    pub body: Vec<IVec2>, // Head first
    pub food: IVec2,
    pub score: u32,
    pub game_over: bool,
    pub tick: u64,
}

/// Consumer of per-frame views; never feeds back into the game
pub trait RenderSink {
    fn present(&mut self, frame: &FrameView);
}

pub struct Game {
    pub world: World,
    pub map: GameMap,
    pub config: Config,
    pub score: Score,
    pub events: Events,
    pub rng: GameRng,
    pub clock: TickClock,
    fsm: GameFsm,
    round_over_announced: bool,
    snake: Entity,
    food: Entity,
}

impl Game {
    pub fn new(config: Config, seed: u64) -> Self {
        let map = GameMap::from_config(&config);
        let mut rng = GameRng::new(seed);
        let mut world = World::new();
        let (snake, food) = spawn_round(&mut world, &map, &config, &mut rng);
        let clock = TickClock::new(config.tick_interval(), config.max_dt);

        Self {
            world,
            map,
            config,
            score: Score::new(),
            events: Events::new(),
            rng,
            clock,
            fsm: GameFsm::new(),
            round_over_announced: false,
            snake,
            food,
        }
    }

    pub fn state(&self) -> FsmState {
        self.fsm.state()
    }

    pub fn is_game_over(&self) -> bool {
        self.fsm.is_game_over()
    }

    pub fn snake(&self) -> hecs::Ref<'_, Snake> {
        self.world
            .get::<&Snake>(self.snake)
            .expect("snake entity lives as long as the round")
    }

    pub fn snake_mut(&mut self) -> hecs::RefMut<'_, Snake> {
        self.world
            .get::<&mut Snake>(self.snake)
            .expect("snake entity lives as long as the round")
    }

    pub fn food(&self) -> IVec2 {
        self.world
            .get::<&Food>(self.food)
            .map(|food| food.pos)
            .expect("food entity lives as long as the round")
    }

    /// Move the food, e.g. to stage a scenario
    pub fn place_food(&mut self, pos: IVec2) {
        if let Ok(mut food) = self.world.get::<&mut Food>(self.food) {
            food.pos = self.map.wrap(pos);
        }
    }

    /// Drain one frame of input from each source, in order.
    ///
    /// Headings are queued only while running. Sources hear about the end
    /// of a round before their first poll in GAME_OVER. A restart resets
    /// every source's cross-frame memory. Quit is handed back to the caller.
    pub fn poll_inputs(&mut self, sources: &mut [&mut dyn InputSource]) -> Option<ControlCommand> {
        let mut quit = None;
        let mut restarted = false;

        if self.fsm.is_game_over() && !self.round_over_announced {
            for source in sources.iter_mut() {
                source.round_over();
            }
            self.round_over_announced = true;
        }

        for source in sources.iter_mut() {
            // Always pull the direction so gesture filters see every frame
            let dir = source.next_direction_command();
            let control = source.next_control_command();

            if let Some(dir) = dir {
                if self.fsm.is_running() {
                    queue_direction(&mut self.world, dir);
                }
            }

            match control {
                Some(ControlCommand::Quit) => quit = Some(ControlCommand::Quit),
                Some(ControlCommand::Restart) => restarted |= self.restart(),
                None => {}
            }
        }

        if restarted {
            for source in sources.iter_mut() {
                source.reset();
            }
        }
        quit
    }

    /// Apply RESTART. Only valid from GAME_OVER; returns whether it happened.
    pub fn restart(&mut self) -> bool {
        if !self.fsm.transition(GameAction::Restart).success {
            return false;
        }
        self.reset();
        self.events.restarted = true;
        debug!("game restarted");
        true
    }

    /// Fresh round: new snake at the center, new food, zero score, running
    pub fn reset(&mut self) {
        self.world.clear();
        let (snake, food) = spawn_round(&mut self.world, &self.map, &self.config, &mut self.rng);
        self.snake = snake;
        self.food = food;
        self.score.reset();
        self.events.clear();
        self.clock.reset();
        self.fsm = GameFsm::new();
        self.round_over_announced = false;
    }

    /// Advance the frame clock; ticks when an interval is due and running
    pub fn update(&mut self, dt: f32) -> Option<TickOutcome> {
        if !self.fsm.is_running() {
            return None;
        }
        if !self.clock.advance(dt) {
            return None;
        }
        self.tick()
    }

    /// One simulation step. Nothing happens while the game is over.
    pub fn tick(&mut self) -> Option<TickOutcome> {
        if !self.fsm.is_running() {
            return None;
        }

        let outcome = step(
            &mut self.world,
            &self.map,
            &mut self.score,
            &mut self.events,
            &mut self.rng,
        );

        if outcome == TickOutcome::Collision {
            self.fsm.transition(GameAction::Collide);
            debug!(score = self.score.value, "snake collided with itself");
        }
        Some(outcome)
    }

    pub fn snapshot(&self) -> FrameView {
        FrameView {
            body: self.snake().positions().iter().copied().collect(),
            food: self.food(),
            score: self.score.value,
            game_over: self.fsm.is_game_over(),
            tick: self.clock.ticks,
        }
    }

    pub fn render(&self, sink: &mut dyn RenderSink) {
        sink.present(&self.snapshot());
    }
}

fn spawn_round(
    world: &mut World,
    map: &GameMap,
    config: &Config,
    rng: &mut GameRng,
) -> (Entity, Entity) {
    let snake = create_snake(world, config.center());
    let food = create_food(world, Food::spawn(map, rng).pos);
    (snake, food)
}

/// Helper to create the snake entity
pub fn create_snake(world: &mut World, head: IVec2) -> Entity {
    world.spawn((Snake::new(head), DirectionIntent::new()))
}

/// Helper to create a food entity
pub fn create_food(world: &mut World, pos: IVec2) -> Entity {
    world.spawn((Food::new(pos),))
}
