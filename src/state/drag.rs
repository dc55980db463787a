// Pointer gesture tracking: a press becomes either a click or a drag.
use crate::model::PixelPos;

pub const DEFAULT_DRAG_THRESHOLD: f64 = 5.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    /// Pressed but not yet moved past the threshold.
    PendingClick { start: PixelPos },
    Dragging { last: PixelPos },
}

/// What a pointer release resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    Click(PixelPos),
    DragEnd,
    Ignored,
}

impl DragState {
    pub fn is_idle(&self) -> bool {
        matches!(self, DragState::Idle)
    }

    pub fn press(&mut self, at: PixelPos) {
        if self.is_idle() {
            *self = DragState::PendingClick { start: at };
        }
    }

    /// Returns the pointer movement to pan by, if this move is part of a drag.
    pub fn motion(&mut self, at: PixelPos, threshold: f64) -> Option<(i32, i32)> {
        match *self {
            DragState::Idle => None,
            DragState::PendingClick { start } => {
                if start.distance_to(at) >= threshold {
                    *self = DragState::Dragging { last: at };
                    Some((at.x - start.x, at.y - start.y))
                } else {
                    None
                }
            }
            DragState::Dragging { last } => {
                *self = DragState::Dragging { last: at };
                Some((at.x - last.x, at.y - last.y))
            }
        }
    }

    pub fn release(&mut self, at: PixelPos) -> Release {
        let outcome = match *self {
            DragState::Idle => Release::Ignored,
            DragState::PendingClick { .. } => Release::Click(at),
            DragState::Dragging { .. } => Release::DragEnd,
        };
        *self = DragState::Idle;
        outcome
    }

    pub fn cancel(&mut self) {
        *self = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: f64 = DEFAULT_DRAG_THRESHOLD;

    #[test]
    fn short_press_is_a_click() {
        let mut d = DragState::default();
        d.press(PixelPos::new(45, 65));
        assert_eq!(d.motion(PixelPos::new(46, 66), T), None);
        assert!(matches!(d, DragState::PendingClick { .. }));
        assert_eq!(d.release(PixelPos::new(46, 66)), Release::Click(PixelPos::new(46, 66)));
        assert!(d.is_idle());
    }

    #[test]
    fn crossing_threshold_starts_drag_with_full_delta() {
        let mut d = DragState::default();
        d.press(PixelPos::new(10, 10));
        assert_eq!(d.motion(PixelPos::new(13, 14), T), Some((3, 4)));
        assert_eq!(d, DragState::Dragging { last: PixelPos::new(13, 14) });
        assert_eq!(d.motion(PixelPos::new(20, 14), T), Some((7, 0)));
        assert_eq!(d.release(PixelPos::new(20, 14)), Release::DragEnd);
        assert!(d.is_idle());
    }

    #[test]
    fn just_under_threshold_stays_pending() {
        let mut d = DragState::default();
        d.press(PixelPos::new(0, 0));
        assert_eq!(d.motion(PixelPos::new(3, 3), T), None);
        assert_eq!(d.motion(PixelPos::new(-4, 0), T), None);
        assert!(matches!(d, DragState::PendingClick { start } if start == PixelPos::new(0, 0)));
    }

    #[test]
    fn moves_while_idle_do_nothing() {
        let mut d = DragState::default();
        assert_eq!(d.motion(PixelPos::new(100, 100), T), None);
        assert_eq!(d.release(PixelPos::new(100, 100)), Release::Ignored);
    }

    #[test]
    fn second_press_does_not_restart_gesture() {
        let mut d = DragState::default();
        d.press(PixelPos::new(0, 0));
        d.motion(PixelPos::new(10, 0), T);
        d.press(PixelPos::new(50, 50));
        assert_eq!(d, DragState::Dragging { last: PixelPos::new(10, 0) });
    }

    #[test]
    fn cancel_returns_to_idle() {
        let mut d = DragState::default();
        d.press(PixelPos::new(0, 0));
        d.cancel();
        assert!(d.is_idle());
        assert_eq!(d.release(PixelPos::new(0, 0)), Release::Ignored);
    }
}
