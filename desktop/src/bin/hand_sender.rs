//! Companion sender: streams absolute-mode hand telemetry as fixed 8-byte
//! UDP datagrams, one per detector frame, until the detector exits.

use anyhow::{Context, Result};
use desktop::detector::DetectorFeed;
use desktop::net::TelemetrySender;
use desktop::settings::{Settings, DETECTOR_VAR};
use game_core::classify_fingers;
use proto::HandDatagram;
use tracing::{debug, info};

fn main() -> Result<()> {
    desktop::init_tracing();

    let settings = Settings::from_env()?;
    let command = settings
        .detector
        .as_deref()
        .with_context(|| format!("{DETECTOR_VAR} must name a hand-landmark detector command"))?;

    let mut feed = DetectorFeed::spawn(command)?;
    let mut sender = TelemetrySender::connect(settings.telemetry_addr)?;
    info!("sending hand data to {}", settings.telemetry_addr);

    while let Some(observation) = feed.recv() {
        let sample = classify_fingers(observation.as_ref());
        let datagram = HandDatagram::new(sample.fingertip_x, i32::from(sample.extended_fingers));
        debug!(x = datagram.fingertip_x, fingers = datagram.finger_count, "hand frame");
        sender.send(&datagram);
    }

    let link = sender.link();
    info!(sent = link.sent, dropped = link.dropped, "detector finished");
    Ok(())
}
