//! Click ripple on the submit button.
//!
//! A [`RippleLayer`] holds at most one ripple. Emitting replaces the current
//! one; expiry timers name the ripple they were scheduled for, so a late
//! timer for a replaced ripple is a no-op.

use log::debug;
use std::rc::Rc;
use yew::prelude::*;

/// Bounding box of the clicked control in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// A square overlay centered on the pointer, relative to the control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub id: u32,
    pub size: f64,
    pub x: f64,
    pub y: f64,
}

impl Ripple {
    pub fn at(id: u32, bounds: Bounds, client_x: f64, client_y: f64) -> Self {
        let size = bounds.width.max(bounds.height);
        Self {
            id,
            size,
            x: client_x - bounds.left - size / 2.0,
            y: client_y - bounds.top - size / 2.0,
        }
    }

    /// Inline style positioning the overlay inside the control.
    pub fn style(&self) -> String {
        format!(
            "width: {size}px; height: {size}px; left: {}px; top: {}px;",
            self.x,
            self.y,
            size = self.size
        )
    }
}

pub enum RippleAction {
    Emit(Ripple),
    Expire(u32),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RippleLayer {
    current: Option<Ripple>,
}

impl RippleLayer {
    pub fn current(&self) -> Option<&Ripple> {
        self.current.as_ref()
    }

    pub fn apply(&mut self, action: RippleAction) {
        match action {
            RippleAction::Emit(ripple) => {
                if let Some(old) = self.current.replace(ripple) {
                    debug!("Ripple {} replaced by {}", old.id, ripple.id);
                }
            }
            RippleAction::Expire(id) => {
                if self.current.is_some_and(|r| r.id == id) {
                    self.current = None;
                }
            }
        }
    }
}

impl Reducible for RippleLayer {
    type Action = RippleAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUTTON: Bounds = Bounds {
        left: 100.0,
        top: 50.0,
        width: 200.0,
        height: 40.0,
    };

    #[test]
    fn ripple_is_square_and_centered_on_pointer() {
        let r = Ripple::at(1, BUTTON, 150.0, 70.0);
        assert_eq!(r.size, 200.0);
        assert_eq!(r.x, -50.0);
        assert_eq!(r.y, -80.0);
        assert_eq!(
            r.style(),
            "width: 200px; height: 200px; left: -50px; top: -80px;"
        );
    }

    #[test]
    fn tall_controls_use_height() {
        let tall = Bounds {
            height: 300.0,
            ..BUTTON
        };
        assert_eq!(Ripple::at(1, tall, 0.0, 0.0).size, 300.0);
    }

    #[test]
    fn one_ripple_then_expiry() {
        let mut layer = RippleLayer::default();
        layer.apply(RippleAction::Emit(Ripple::at(1, BUTTON, 120.0, 60.0)));
        assert_eq!(layer.current().map(|r| r.id), Some(1));

        layer.apply(RippleAction::Expire(1));
        assert!(layer.current().is_none());
    }

    #[test]
    fn second_click_replaces_and_stale_timer_is_ignored() {
        let mut layer = RippleLayer::default();
        layer.apply(RippleAction::Emit(Ripple::at(1, BUTTON, 120.0, 60.0)));
        layer.apply(RippleAction::Emit(Ripple::at(2, BUTTON, 250.0, 60.0)));
        assert_eq!(layer.current().map(|r| r.id), Some(2));

        // first ripple's timer fires
        layer.apply(RippleAction::Expire(1));
        assert_eq!(layer.current().map(|r| r.id), Some(2));

        layer.apply(RippleAction::Expire(2));
        assert!(layer.current().is_none());
    }

    #[test]
    fn reducer_matches_apply() {
        let layer = Rc::new(RippleLayer::default());
        let next = layer.reduce(RippleAction::Emit(Ripple::at(7, BUTTON, 0.0, 0.0)));
        assert_eq!(next.current().map(|r| r.id), Some(7));
    }
}
