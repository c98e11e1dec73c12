//! Hand-landmark classification
//!
//! Turns one frame's landmark set into a coarse signal: either the index
//! fingertip position plus an extended-finger count (absolute mode), or the
//! wrist pixel position used for frame-to-frame displacement.

use glam::IVec2;

/// Landmark indices (21-point hand model)
pub mod landmarks {
    pub const WRIST: usize = 0;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_FINGER_MCP: usize = 5;
    pub const INDEX_FINGER_TIP: usize = 8;
    pub const MIDDLE_FINGER_MCP: usize = 9;
    pub const MIDDLE_FINGER_TIP: usize = 12;
    pub const RING_FINGER_MCP: usize = 13;
    pub const RING_FINGER_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_TIP: usize = 20;

    pub const COUNT: usize = 21;

    /// (tip, base joint) for the four non-thumb fingers
    pub const FINGERS: [(usize, usize); 4] = [
        (INDEX_FINGER_TIP, INDEX_FINGER_MCP),
        (MIDDLE_FINGER_TIP, MIDDLE_FINGER_MCP),
        (RING_FINGER_TIP, RING_FINGER_MCP),
        (PINKY_TIP, PINKY_MCP),
    ];
}

/// Sentinel fingertip x reported when no hand is visible
pub const NO_HAND_X: f32 = -1.0;

/// A single landmark in normalized image coordinates (0.0..=1.0)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// All 21 landmarks of one detected hand
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks {
    pub points: [Landmark; landmarks::COUNT],
}

impl HandLandmarks {
    pub fn new(points: [Landmark; landmarks::COUNT]) -> Self {
        Self { points }
    }

    /// Build from a slice; `None` unless exactly 21 points are given
    pub fn from_slice(points: &[Landmark]) -> Option<Self> {
        let points: [Landmark; landmarks::COUNT] = points.try_into().ok()?;
        Some(Self { points })
    }

    pub fn get(&self, index: usize) -> Landmark {
        self.points[index]
    }
}

/// What the observation source saw this frame
pub type Observation = Option<HandLandmarks>;

/// Absolute-mode reading: where the index fingertip is and how many fingers are up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FingerSample {
    /// Normalized x of the index fingertip, or [`NO_HAND_X`]
    pub fingertip_x: f32,
    /// Extended non-thumb fingers, 0..=4
    pub extended_fingers: u8,
}

impl FingerSample {
    pub const NO_HAND: FingerSample = FingerSample {
        fingertip_x: NO_HAND_X,
        extended_fingers: 0,
    };

    pub fn is_hand(&self) -> bool {
        self.fingertip_x != NO_HAND_X
    }
}

/// Classified gesture for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureSample {
    Fingers(FingerSample),
    /// Wrist position in frame pixels
    HandCenter(IVec2),
}

/// Count extended fingers. A fingertip above (smaller y than) its base joint
/// counts as extended; the thumb is never counted.
pub fn count_extended_fingers(hand: &HandLandmarks) -> u8 {
    landmarks::FINGERS
        .iter()
        .filter(|(tip, base)| hand.get(*tip).y < hand.get(*base).y)
        .count() as u8
}

/// Absolute-mode classification; no hand yields the sentinel sample
pub fn classify_fingers(observation: Option<&HandLandmarks>) -> FingerSample {
    match observation {
        Some(hand) => FingerSample {
            fingertip_x: hand.get(landmarks::INDEX_FINGER_TIP).x,
            extended_fingers: count_extended_fingers(hand),
        },
        None => FingerSample::NO_HAND,
    }
}

/// Wrist position scaled to frame pixels, rounded to the nearest pixel
pub fn hand_center(hand: &HandLandmarks, frame_width: u32, frame_height: u32) -> IVec2 {
    let wrist = hand.get(landmarks::WRIST);
    IVec2::new(
        (wrist.x * frame_width as f32).round() as i32,
        (wrist.y * frame_height as f32).round() as i32,
    )
}

/// Displacement-mode classification; `None` means no hand this frame
pub fn classify_center(
    observation: Option<&HandLandmarks>,
    frame_width: u32,
    frame_height: u32,
) -> Option<IVec2> {
    observation.map(|hand| hand_center(hand, frame_width, frame_height))
}
