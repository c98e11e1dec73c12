//! Input capability shared by the gesture pipeline and the keyboard fallback.
//!
//! The controller only ever sees [`InputSource`]; which device produced a
//! command is invisible to it.

use std::collections::VecDeque;

use crate::components::Direction;
use crate::config::Config;
use crate::debounce::Debouncer;
use crate::gesture::{classify_center, count_extended_fingers, HandLandmarks, Observation};

/// Non-directional commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    Quit,
    Restart,
}

/// A discrete key press from the fallback device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Move(Direction),
    Control(ControlCommand),
}

/// Per-frame source of commands
pub trait InputSource {
    /// Direction requested this frame, if any
    fn next_direction_command(&mut self) -> Option<Direction>;

    /// Control requested this frame, if any
    fn next_control_command(&mut self) -> Option<ControlCommand>;

    /// Drop any cross-frame memory (called on restart)
    fn reset(&mut self) {}

    /// The round just ended; called once before the first poll in GAME_OVER
    fn round_over(&mut self) {}
}

/// Anything that yields hand observations as the camera produces them
pub trait ObservationSource {
    /// Newest camera frame since the last call, or `None` if no frame
    /// arrived. `Some(None)` is a frame with no hand in it.
    fn next_observation(&mut self) -> Option<Observation>;
}

impl<F> ObservationSource for F
where
    F: FnMut() -> Option<Observation>,
{
    fn next_observation(&mut self) -> Option<Observation> {
        self()
    }
}

/// Keyboard fallback: presses queued by the window layer, one consumed per frame
#[derive(Debug, Clone, Default)]
pub struct KeyInput {
    directions: VecDeque<Direction>,
    controls: VecDeque<ControlCommand>,
}

impl KeyInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: KeyCommand) {
        match key {
            KeyCommand::Move(dir) => self.directions.push_back(dir),
            KeyCommand::Control(cmd) => self.controls.push_back(cmd),
        }
    }
}

impl InputSource for KeyInput {
    fn next_direction_command(&mut self) -> Option<Direction> {
        self.directions.pop_front()
    }

    fn next_control_command(&mut self) -> Option<ControlCommand> {
        self.controls.pop_front()
    }

    fn reset(&mut self) {
        self.directions.clear();
        self.controls.clear();
    }
}

/// Gesture-derived input: debounces wrist motion into directions and maps
/// opening the hand into a restart request.
///
/// Only fresh camera frames reach the debouncer, so a render loop running
/// faster than the camera does not read the gaps as lost tracking. The
/// restart pose is edge-triggered: some other hand pose has to be seen
/// first, and the end of a round disarms it, so a palm held while steering
/// never restarts on its own.
pub struct GestureInput<S> {
    source: S,
    debouncer: Debouncer,
    frame_width: u32,
    frame_height: u32,
    restart_finger_count: Option<u8>,
    restart_armed: bool,
    pending_control: Option<ControlCommand>,
}

impl<S: ObservationSource> GestureInput<S> {
    pub fn new(source: S, config: &Config) -> Self {
        Self {
            source,
            debouncer: Debouncer::new(config.dead_zone),
            frame_width: config.frame_width,
            frame_height: config.frame_height,
            restart_finger_count: config.restart_finger_count,
            restart_armed: false,
            pending_control: None,
        }
    }

    pub fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }

    pub fn restart_armed(&self) -> bool {
        self.restart_armed
    }

    fn control_for(&mut self, hand: &HandLandmarks) -> Option<ControlCommand> {
        let wanted = self.restart_finger_count?;
        if count_extended_fingers(hand) != wanted {
            self.restart_armed = true;
            return None;
        }
        // Fires once per opening of the hand
        std::mem::replace(&mut self.restart_armed, false).then_some(ControlCommand::Restart)
    }
}

impl<S: ObservationSource> InputSource for GestureInput<S> {
    /// Consumes this frame's observation. Call before `next_control_command`.
    fn next_direction_command(&mut self) -> Option<Direction> {
        self.pending_control = None;
        let observation = self.source.next_observation()?;
        if let Some(hand) = observation.as_ref() {
            self.pending_control = self.control_for(hand);
        }
        let center = classify_center(observation.as_ref(), self.frame_width, self.frame_height);
        self.debouncer.update(center)
    }

    fn next_control_command(&mut self) -> Option<ControlCommand> {
        self.pending_control.take()
    }

    fn reset(&mut self) {
        self.debouncer.reset();
        self.restart_armed = false;
        self.pending_control = None;
    }

    fn round_over(&mut self) {
        self.restart_armed = false;
        self.pending_control = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::{landmarks, Landmark};
    use glam::IVec2;

    fn hand_at(x: f32, y: f32, fingers_up: usize) -> HandLandmarks {
        let mut points = [Landmark::new(x, y); landmarks::COUNT];
        for (i, (tip, base)) in landmarks::FINGERS.iter().enumerate() {
            points[*base] = Landmark::new(x, y - 0.1);
            let dy = if i < fingers_up { -0.3 } else { 0.0 };
            points[*tip] = Landmark::new(x, y + dy);
        }
        HandLandmarks::new(points)
    }

    /// Every call delivers the next camera frame
    fn scripted(frames: Vec<Observation>) -> impl FnMut() -> Option<Observation> {
        let mut frames = frames.into_iter();
        move || frames.next()
    }

    /// `None` entries are render frames where the camera had nothing new
    fn paced(frames: Vec<Option<Observation>>) -> impl FnMut() -> Option<Observation> {
        let mut frames = frames.into_iter();
        move || frames.next().flatten()
    }

    #[test]
    fn test_key_input_one_press_per_frame() {
        let mut keys = KeyInput::new();
        keys.press(KeyCommand::Move(Direction::Left));
        keys.press(KeyCommand::Move(Direction::Down));
        keys.press(KeyCommand::Control(ControlCommand::Restart));

        assert_eq!(keys.next_direction_command(), Some(Direction::Left));
        assert_eq!(keys.next_control_command(), Some(ControlCommand::Restart));
        assert_eq!(keys.next_direction_command(), Some(Direction::Down));
        assert_eq!(keys.next_direction_command(), None);
        assert_eq!(keys.next_control_command(), None);
    }

    #[test]
    fn test_key_input_reset_drops_queue() {
        let mut keys = KeyInput::new();
        keys.press(KeyCommand::Move(Direction::Left));
        keys.reset();
        assert_eq!(keys.next_direction_command(), None);
    }

    #[test]
    fn test_gesture_swipe_right() {
        let config = Config::new();
        // 0.1 of a 640px frame is 64px, outside the 50px dead zone
        let frames = vec![Some(hand_at(0.3, 0.5, 0)), Some(hand_at(0.4, 0.5, 0))];
        let mut input = GestureInput::new(scripted(frames), &config);

        assert_eq!(input.next_direction_command(), None);
        assert_eq!(input.next_direction_command(), Some(Direction::Right));
    }

    #[test]
    fn test_gesture_swipe_with_camera_slower_than_loop() {
        let config = Config::new();
        let frames = vec![
            Some(Some(hand_at(0.1, 0.5, 0))),
            None,
            Some(Some(hand_at(0.2, 0.5, 0))),
            None,
            Some(Some(hand_at(0.3, 0.5, 0))),
            None,
        ];
        let mut input = GestureInput::new(paced(frames), &config);

        let directions: Vec<Option<Direction>> =
            (0..6).map(|_| input.next_direction_command()).collect();
        assert_eq!(
            directions,
            vec![
                None,
                None,
                Some(Direction::Right),
                None,
                Some(Direction::Right),
                None
            ]
        );
        // A gap between camera frames keeps the reference point
        assert_eq!(input.debouncer().state.previous, Some(IVec2::new(192, 240)));
    }

    #[test]
    fn test_frame_without_hand_still_clears_reference() {
        let config = Config::new();
        let frames = vec![
            Some(Some(hand_at(0.1, 0.5, 0))),
            Some(None),
            Some(Some(hand_at(0.2, 0.5, 0))),
        ];
        let mut input = GestureInput::new(paced(frames), &config);
        input.next_direction_command();
        input.next_direction_command();
        assert_eq!(input.debouncer().state.previous, None);
        assert_eq!(input.next_direction_command(), None);
    }

    #[test]
    fn test_gesture_no_hand_gives_nothing() {
        let config = Config::new();
        let mut input = GestureInput::new(scripted(vec![None, None]), &config);
        assert_eq!(input.next_direction_command(), None);
        assert_eq!(input.next_control_command(), None);
        assert_eq!(input.debouncer().state.previous, None);
    }

    #[test]
    fn test_opening_the_hand_requests_restart() {
        let config = Config::new();
        let frames = vec![
            Some(hand_at(0.5, 0.5, 0)),
            Some(hand_at(0.5, 0.5, 4)),
            Some(hand_at(0.5, 0.5, 4)),
            Some(hand_at(0.5, 0.5, 1)),
            Some(hand_at(0.5, 0.5, 4)),
        ];
        let mut input = GestureInput::new(scripted(frames), &config);

        input.next_direction_command();
        assert_eq!(input.next_control_command(), None);
        assert!(input.restart_armed());

        input.next_direction_command();
        assert_eq!(input.next_control_command(), Some(ControlCommand::Restart));
        assert_eq!(input.next_control_command(), None);

        // Still open: no repeat
        input.next_direction_command();
        assert_eq!(input.next_control_command(), None);

        input.next_direction_command();
        input.next_direction_command();
        assert_eq!(input.next_control_command(), Some(ControlCommand::Restart));
    }

    #[test]
    fn test_palm_held_from_the_start_does_not_restart() {
        let config = Config::new();
        let frames = vec![Some(hand_at(0.5, 0.5, 4)); 5];
        let mut input = GestureInput::new(scripted(frames), &config);
        for _ in 0..5 {
            input.next_direction_command();
            assert_eq!(input.next_control_command(), None);
        }
    }

    #[test]
    fn test_round_over_disarms_restart() {
        let config = Config::new();
        let frames = vec![Some(hand_at(0.5, 0.5, 0)), Some(hand_at(0.5, 0.5, 4))];
        let mut input = GestureInput::new(scripted(frames), &config);
        input.next_direction_command();
        assert!(input.restart_armed());

        input.round_over();
        input.next_direction_command();
        assert_eq!(input.next_control_command(), None);
    }

    #[test]
    fn test_restart_gesture_can_be_disabled() {
        let config = Config {
            restart_finger_count: None,
            ..Config::default()
        };
        let frames = vec![Some(hand_at(0.5, 0.5, 0)), Some(hand_at(0.5, 0.5, 4))];
        let mut input = GestureInput::new(scripted(frames), &config);
        input.next_direction_command();
        input.next_direction_command();
        assert_eq!(input.next_control_command(), None);
    }

    #[test]
    fn test_gesture_reset_forgets_previous_center() {
        let config = Config::new();
        let frames = vec![Some(hand_at(0.1, 0.5, 0)), Some(hand_at(0.9, 0.5, 0))];
        let mut input = GestureInput::new(scripted(frames), &config);
        input.next_direction_command();
        input.reset();
        assert_eq!(input.next_direction_command(), None);
    }
}
