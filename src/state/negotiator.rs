// Decides when the server needs a new SetView.
use crate::model::TileRect;
use crate::state::Viewport;

pub const DEFAULT_PREFETCH_MARGIN: i32 = 5;

#[derive(Debug, Clone)]
pub struct ViewNegotiator {
    /// Extra tiles requested on every side of the visible area.
    margin: i32,
    last_sent: Option<TileRect>,
}

impl Default for ViewNegotiator {
    fn default() -> Self {
        Self::new(DEFAULT_PREFETCH_MARGIN)
    }
}

impl ViewNegotiator {
    pub fn new(margin: i32) -> Self {
        Self {
            margin: margin.max(0),
            last_sent: None,
        }
    }

    #[cfg(test)]
    pub fn margin(&self) -> i32 {
        self.margin
    }

    pub fn set_margin(&mut self, margin: i32) {
        self.margin = margin.max(0);
    }

    pub fn last_sent(&self) -> Option<TileRect> {
        self.last_sent
    }

    pub fn compute_requested_bounds(&self, vp: &Viewport) -> TileRect {
        vp.visible_tile_bounds().expand(self.margin)
    }

    /// Returns the rectangle to send, or `None` when it equals the one already sent.
    pub fn maybe_request(&mut self, bounds: TileRect) -> Option<TileRect> {
        if self.last_sent == Some(bounds) {
            return None;
        }
        self.last_sent = Some(bounds);
        Some(bounds)
    }

    /// Forgets the last sent rectangle so the next negotiation always emits (new connection).
    pub fn reset(&mut self) {
        self.last_sent = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::PanPolicy;

    #[test]
    fn margin_expands_every_side() {
        let vp = Viewport {
            origin_x: 0,
            origin_y: 0,
            width: 300,
            height: 300,
            zoom: 20,
        };
        for margin in [0, 1, 5, 12] {
            let n = ViewNegotiator::new(margin);
            let visible = vp.visible_tile_bounds();
            let req = n.compute_requested_bounds(&vp);
            assert_eq!(req.w, visible.w + 2 * margin);
            assert_eq!(req.h, visible.h + 2 * margin);
            assert_eq!((req.x, req.y), (visible.x - margin, visible.y - margin));
        }
    }

    #[test]
    fn same_bounds_are_sent_once() {
        let mut n = ViewNegotiator::default();
        let r = TileRect::new(-5, -5, 26, 26);
        assert_eq!(n.maybe_request(r), Some(r));
        assert_eq!(n.maybe_request(r), None);
        assert_eq!(n.maybe_request(r), None);
        assert_eq!(n.last_sent(), Some(r));
    }

    #[test]
    fn any_field_change_is_sent() {
        let mut n = ViewNegotiator::default();
        let r = TileRect::new(0, 0, 10, 10);
        n.maybe_request(r);
        for changed in [
            TileRect::new(1, 0, 10, 10),
            TileRect::new(1, 1, 10, 10),
            TileRect::new(1, 1, 11, 10),
            TileRect::new(1, 1, 11, 9),
        ] {
            assert_eq!(n.maybe_request(changed), Some(changed));
        }
    }

    #[test]
    fn small_pans_inside_a_tile_send_nothing() {
        let mut vp = Viewport {
            origin_x: 0,
            origin_y: 0,
            width: 300,
            height: 300,
            zoom: 20,
        };
        let mut n = ViewNegotiator::default();
        assert!(n.maybe_request(n.compute_requested_bounds(&vp)).is_some());
        let mut sent = 0;
        for _ in 0..4 {
            vp.pan(1, 1, PanPolicy::Unbounded);
            if n.maybe_request(n.compute_requested_bounds(&vp)).is_some() {
                sent += 1;
            }
        }
        assert_eq!(sent, 0);
    }

    #[test]
    fn reset_forces_a_resend() {
        let mut n = ViewNegotiator::new(2);
        let r = TileRect::new(0, 0, 4, 4);
        n.maybe_request(r);
        n.reset();
        assert_eq!(n.maybe_request(r), Some(r));
    }

    #[test]
    fn negative_margin_is_treated_as_zero() {
        assert_eq!(ViewNegotiator::new(-3).margin(), 0);
    }
}
