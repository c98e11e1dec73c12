//! Hand-controlled Snake: game loop entry point.

use std::time::Instant;

use anyhow::{Context, Result};
use desktop::detector::DetectorFeed;
use desktop::net::SnapshotPublisher;
use desktop::settings::Settings;
use desktop::window::GameWindow;
use game_core::{
    Config, ControlCommand, Game, GestureInput, InputSource, KeyInput, ObservationSource,
    TickOutcome,
};
use tracing::info;

fn main() -> Result<()> {
    desktop::init_tracing();

    let settings = Settings::from_env()?;
    let config = Config::default();
    config.validate().context("invalid game configuration")?;

    info!("hand-controlled snake v{} starting", env!("CARGO_PKG_VERSION"));

    // Resources are owned here and released by Drop on every exit path
    let mut detector = match settings.detector.as_deref() {
        Some(command) => Some(DetectorFeed::spawn(command)?),
        None => {
            info!("no hand detector configured; arrow keys only");
            None
        }
    };
    let mut publisher = settings
        .snapshot_addr
        .map(SnapshotPublisher::connect)
        .transpose()
        .context("failed to set up snapshot publishing")?;
    let mut window = GameWindow::open(&config)?;

    let observations = || detector.as_mut().and_then(|feed| feed.next_observation());
    let mut gesture = GestureInput::new(observations, &config);
    let mut keys = KeyInput::new();
    let mut game = Game::new(config, rand::random());

    let mut last_frame = Instant::now();
    while window.is_open() {
        window.poll_keys(&mut keys);

        let mut sources: [&mut dyn InputSource; 2] = [&mut gesture, &mut keys];
        if game.poll_inputs(&mut sources) == Some(ControlCommand::Quit) {
            break;
        }

        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        if game.update(dt) == Some(TickOutcome::Collision) {
            info!(score = game.score.value, "game over");
        }
        if game.events.restarted {
            info!("new round");
            game.events.clear();
        }

        game.render(&mut window);
        if let Some(publisher) = publisher.as_mut() {
            game.render(publisher);
        }
    }

    info!(score = game.score.value, "shutting down");
    Ok(())
}
