use glam::IVec2;
use tracing::trace;

use crate::components::Direction;

/// Cross-frame memory of the displacement filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebouncerState {
    pub previous: Option<IVec2>, // Hand center seen on the previous frame
}

/// Turns frame-to-frame hand motion into cardinal direction commands.
///
/// Motion inside the dead zone on both axes is jitter and produces nothing.
/// Otherwise the dominant axis wins; an exact tie between axes is treated as
/// noise. The reference point is replaced on every frame, whether or not a
/// command came out, so the filter tracks rate of change rather than
/// accumulated drift.
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    pub dead_zone: i32,
    pub state: DebouncerState,
}

impl Debouncer {
    pub fn new(dead_zone: i32) -> Self {
        Self {
            dead_zone,
            state: DebouncerState::default(),
        }
    }

    /// Feed the current hand center (`None` = no hand this frame)
    pub fn update(&mut self, center: Option<IVec2>) -> Option<Direction> {
        let (previous, current) = match (self.state.previous, center) {
            (Some(previous), Some(current)) => (previous, current),
            _ => {
                // First sighting or tracking lost: remember (or forget) and wait
                self.state.previous = center;
                return None;
            }
        };
        self.state.previous = Some(current);

        let command = classify_displacement(current - previous, self.dead_zone);
        if let Some(dir) = command {
            trace!(?dir, dx = current.x - previous.x, dy = current.y - previous.y, "gesture direction");
        }
        command
    }

    pub fn reset(&mut self) {
        self.state = DebouncerState::default();
    }
}

/// Map a displacement to a direction, or `None` for jitter and ties
pub fn classify_displacement(delta: IVec2, dead_zone: i32) -> Option<Direction> {
    let (ax, ay) = (delta.x.abs(), delta.y.abs());
    if ax <= dead_zone && ay <= dead_zone {
        return None;
    }
    if ax > ay {
        Some(if delta.x > 0 {
            Direction::Right
        } else {
            Direction::Left
        })
    } else if ay > ax {
        Some(if delta.y > 0 {
            Direction::Down
        } else {
            Direction::Up
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(debouncer: &mut Debouncer, from: IVec2, to: IVec2) -> Option<Direction> {
        debouncer.update(Some(from));
        debouncer.update(Some(to))
    }

    #[test]
    fn test_dead_zone_boundary() {
        let origin = IVec2::new(300, 200);
        let mut d = Debouncer::new(50);
        assert_eq!(feed(&mut d, origin, origin + IVec2::new(49, 0)), None);
        d.reset();
        assert_eq!(feed(&mut d, origin, origin + IVec2::new(50, 0)), None);
        d.reset();
        assert_eq!(
            feed(&mut d, origin, origin + IVec2::new(51, 0)),
            Some(Direction::Right)
        );
        d.reset();
        assert_eq!(
            feed(&mut d, origin, origin + IVec2::new(-51, 0)),
            Some(Direction::Left)
        );
    }

    #[test]
    fn test_vertical_uses_image_space() {
        assert_eq!(
            classify_displacement(IVec2::new(10, 80), 50),
            Some(Direction::Down)
        );
        assert_eq!(
            classify_displacement(IVec2::new(-10, -80), 50),
            Some(Direction::Up)
        );
    }

    #[test]
    fn test_dominant_axis_wins_even_if_minor_axis_is_large() {
        assert_eq!(
            classify_displacement(IVec2::new(90, -70), 50),
            Some(Direction::Right)
        );
    }

    #[test]
    fn test_tie_is_noise() {
        assert_eq!(classify_displacement(IVec2::new(60, 60), 50), None);
        assert_eq!(classify_displacement(IVec2::new(-60, 60), 50), None);
    }

    #[test]
    fn test_first_sighting_emits_nothing() {
        let mut d = Debouncer::new(50);
        assert_eq!(d.update(Some(IVec2::new(0, 0))), None);
        assert_eq!(d.state.previous, Some(IVec2::ZERO));
    }

    #[test]
    fn test_lost_tracking_clears_reference() {
        let mut d = Debouncer::new(50);
        d.update(Some(IVec2::new(0, 0)));
        assert_eq!(d.update(None), None);
        assert_eq!(d.state.previous, None);
        // Reappearing far away is a fresh sighting, not a swipe
        assert_eq!(d.update(Some(IVec2::new(500, 0))), None);
    }

    #[test]
    fn test_reference_replaced_without_command() {
        let mut d = Debouncer::new(50);
        d.update(Some(IVec2::new(0, 0)));
        assert_eq!(d.update(Some(IVec2::new(30, 0))), None);
        assert_eq!(d.state.previous, Some(IVec2::new(30, 0)));
        // Slow drift never adds up to a command
        assert_eq!(d.update(Some(IVec2::new(60, 0))), None);
        assert_eq!(d.update(Some(IVec2::new(90, 0))), None);
    }
}
