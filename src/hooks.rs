use crate::defaults::{BUSY_TIMEOUT_MS, RIPPLE_LIFETIME_MS};
use crate::dom;
use crate::ripple::{Ripple, RippleAction, RippleLayer};
use crate::submit::{SubmitAction, SubmitToggle};
use gloo_timers::callback::Timeout;
use web_sys::Element;
use yew::prelude::*;

/// A flag that turns on when pressed and back off after `duration_ms`.
#[hook]
pub fn use_press_feedback(duration_ms: u32) -> (bool, Callback<()>) {
    let pressed = use_state(|| false);

    let press = {
        let pressed = pressed.clone();
        Callback::from(move |_| {
            pressed.set(true);
            let pressed = pressed.clone();
            Timeout::new(duration_ms, move || pressed.set(false)).forget();
        })
    };

    (*pressed, press)
}

/// Ripple overlay for the element behind `target`.
///
/// Returns the ripple to render (if any) and the click handler that spawns
/// a new one.
#[hook]
pub fn use_ripple(target: NodeRef) -> (Option<Ripple>, Callback<MouseEvent>) {
    let layer = use_reducer(RippleLayer::default);
    let next_id = use_mut_ref(|| 0u32);

    let onclick = {
        let dispatcher = layer.dispatcher();
        Callback::from(move |e: MouseEvent| {
            let Some(element) = target.cast::<Element>() else {
                return;
            };
            let id = {
                let mut n = next_id.borrow_mut();
                *n = n.wrapping_add(1);
                *n
            };
            let ripple = Ripple::at(
                id,
                dom::bounds_of(&element),
                e.client_x() as f64,
                e.client_y() as f64,
            );
            dispatcher.dispatch(RippleAction::Emit(ripple));

            let dispatcher = dispatcher.clone();
            Timeout::new(RIPPLE_LIFETIME_MS, move || {
                dispatcher.dispatch(RippleAction::Expire(id));
            })
            .forget();
        })
    };

    (layer.current().copied(), onclick)
}

/// Busy state of a submit button plus the callback that starts a cycle.
pub struct BusySubmit {
    pub label: String,
    pub busy: bool,
    /// Starts a busy cycle and returns the callback that ends it. The cycle
    /// also ends on its own after the safety timeout.
    pub begin: Callback<(), Callback<()>>,
}

#[hook]
pub fn use_busy_submit(label: &'static str) -> BusySubmit {
    let toggle = use_reducer(|| SubmitToggle::new(label));
    let next_cycle = use_mut_ref(|| 0u64);

    let begin = {
        let dispatcher = toggle.dispatcher();
        Callback::from(move |_| {
            let cycle = {
                let mut n = next_cycle.borrow_mut();
                *n += 1;
                *n
            };
            dispatcher.dispatch(SubmitAction::Begin { cycle });

            let on_timeout = dispatcher.clone();
            Timeout::new(BUSY_TIMEOUT_MS, move || {
                on_timeout.dispatch(SubmitAction::TimedOut { cycle });
            })
            .forget();

            let on_complete = dispatcher.clone();
            Callback::from(move |_| on_complete.dispatch(SubmitAction::Complete { cycle }))
        })
    };

    BusySubmit {
        label: toggle.label().to_string(),
        busy: toggle.is_busy(),
        begin,
    }
}
