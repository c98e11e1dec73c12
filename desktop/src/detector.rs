//! Hand-landmark detector running as a child process.
//!
//! The detector writes one JSON object per camera frame to stdout:
//! `{"landmarks": [[x, y], ...]}` with 21 normalized points, or
//! `{"landmarks": null}` when no hand is visible. A reader thread parses the
//! lines and forwards observations over a channel so the game loop never
//! blocks on the camera.

use std::io::{BufRead, BufReader};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

use anyhow::{bail, Context, Result};
use game_core::{HandLandmarks, Landmark, Observation, ObservationSource};
use serde::Deserialize;
use tracing::{debug, info, warn};

#[derive(Debug, Deserialize)]
struct DetectorLine {
    landmarks: Option<Vec<[f32; 2]>>,
}

#[derive(Debug, thiserror::Error)]
pub enum LineError {
    #[error("malformed detector line: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected 21 landmarks, got {0}")]
    PointCount(usize),
}

/// Parse one stdout line of the detector
pub fn parse_line(line: &str) -> Result<Observation, LineError> {
    let parsed: DetectorLine = serde_json::from_str(line)?;
    let Some(points) = parsed.landmarks else {
        return Ok(None);
    };
    let points: Vec<Landmark> = points.iter().map(|[x, y]| Landmark::new(*x, *y)).collect();
    HandLandmarks::from_slice(&points)
        .map(Some)
        .ok_or(LineError::PointCount(points.len()))
}

/// Running detector process plus the channel its frames arrive on.
/// Dropping the feed kills and reaps the process.
pub struct DetectorFeed {
    child: Child,
    rx: Receiver<Observation>,
    reader: Option<JoinHandle<()>>,
    disconnected: bool,
}

impl DetectorFeed {
    /// Start the detector. The command line is split on whitespace.
    pub fn spawn(command_line: &str) -> Result<Self> {
        let mut parts = command_line.split_whitespace();
        let Some(program) = parts.next() else {
            bail!("detector command is empty");
        };

        let mut child = Command::new(program)
            .args(parts)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to start hand detector `{command_line}`"))?;

        let stdout = child
            .stdout
            .take()
            .context("hand detector stdout was not captured")?;

        let (tx, rx) = mpsc::channel();
        let reader = thread::spawn(move || {
            for line in BufReader::new(stdout).lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        warn!("detector stream read failed: {e}");
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                match parse_line(&line) {
                    Ok(observation) => {
                        if tx.send(observation).is_err() {
                            break;
                        }
                    }
                    Err(e) => warn!("{e}"),
                }
            }
            debug!("detector stream closed");
        });

        info!(pid = child.id(), "hand detector started: {command_line}");
        Ok(Self {
            child,
            rx,
            reader: Some(reader),
            disconnected: false,
        })
    }

    /// Block until the next frame; `None` once the detector has exited
    pub fn recv(&mut self) -> Option<Observation> {
        self.rx.recv().ok()
    }
}

impl ObservationSource for DetectorFeed {
    /// Latest frame since the last call; stale frames are skipped and
    /// `None` means the camera has not produced a new one yet
    fn next_observation(&mut self) -> Option<Observation> {
        let mut latest = None;
        loop {
            match self.rx.try_recv() {
                Ok(observation) => latest = Some(observation),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.disconnected {
                        warn!("hand detector stopped; continuing without gestures");
                        self.disconnected = true;
                    }
                    break;
                }
            }
        }
        latest
    }
}

impl Drop for DetectorFeed {
    fn drop(&mut self) {
        if let Err(e) = self.child.kill() {
            debug!("detector already gone: {e}");
        }
        if let Err(e) = self.child.wait() {
            warn!("failed to reap hand detector: {e}");
        }
        // A grandchild of a wrapper script can outlive the kill and keep the
        // pipe open, so only join a reader that has already stopped
        if let Some(reader) = self.reader.take() {
            if !reader.is_finished() {
                debug!("detector stream still open; leaving reader thread behind");
            } else if reader.join().is_err() {
                warn!("detector reader thread panicked");
            }
        }
    }
}
