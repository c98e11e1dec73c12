//! Wire formats for the companion transport
//!
//! `HandDatagram` is a fixed 8-byte little-endian record so that any
//! receiver (whatever language it is written in) can read it without a
//! schema. `Snapshot` carries a whole frame for a remote renderer and uses
//! postcard for compact binary serialization.

use postcard::{from_bytes, to_allocvec};
use serde::{Deserialize, Serialize};

/// Fingertip x reported when no hand is visible
pub const NO_HAND_X: f32 = -1.0;

#[derive(Debug, thiserror::Error)]
pub enum ProtoError {
    #[error("hand datagram must be {expected} bytes, got {actual}")]
    BadLength { expected: usize, actual: usize },

    #[error("snapshot decode failed: {0}")]
    Postcard(#[from] postcard::Error),
}

// ============================================================================
// Hand telemetry
// ============================================================================

/// One frame of absolute-mode hand telemetry.
///
/// Layout: `f32 fingertip_x` then `i32 finger_count`, both little-endian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandDatagram {
    pub fingertip_x: f32,
    pub finger_count: i32,
}

impl HandDatagram {
    pub const SIZE: usize = 8;

    /// Telemetry for a frame without a hand
    pub const NO_HAND: HandDatagram = HandDatagram {
        fingertip_x: NO_HAND_X,
        finger_count: 0,
    };

    pub fn new(fingertip_x: f32, finger_count: i32) -> Self {
        Self {
            fingertip_x,
            finger_count,
        }
    }

    pub fn has_hand(&self) -> bool {
        self.fingertip_x != NO_HAND_X
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[..4].copy_from_slice(&self.fingertip_x.to_le_bytes());
        out[4..].copy_from_slice(&self.finger_count.to_le_bytes());
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProtoError> {
        let bytes: &[u8; Self::SIZE] = bytes.try_into().map_err(|_| ProtoError::BadLength {
            expected: Self::SIZE,
            actual: bytes.len(),
        })?;
        let [x0, x1, x2, x3, c0, c1, c2, c3] = *bytes;
        Ok(Self {
            fingertip_x: f32::from_le_bytes([x0, x1, x2, x3]),
            finger_count: i32::from_le_bytes([c0, c1, c2, c3]),
        })
    }
}

// ============================================================================
// Scene snapshots
// ============================================================================

/// A rendered frame: snake cells (head first), food cell, score and state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub body: Vec<(i32, i32)>,
    pub food: (i32, i32),
    pub score: u32,
    pub game_over: bool,
}

impl Snapshot {
    /// Serialize snapshot to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, ProtoError> {
        Ok(to_allocvec(self)?)
    }

    /// Deserialize snapshot from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProtoError> {
        Ok(from_bytes(bytes)?)
    }
}
