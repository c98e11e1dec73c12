//! Desktop shell for the gesture-controlled Snake game.
//!
//! Everything with a device behind it lives here: the window (rendering and
//! keyboard fallback), the hand-landmark detector process, and the UDP
//! senders. The game rules themselves live in `game_core`.

pub mod detector;
pub mod net;
pub mod settings;
pub mod window;

/// Install the `tracing` subscriber; `RUST_LOG` overrides the default filter
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "desktop=info,game_core=info".into()),
        )
        .init();
}
