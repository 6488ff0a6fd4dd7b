//! Thin wrappers over the browser APIs the form needs.

use crate::config::{ACTION_ATTR, MODE_ATTR, MOUNT_ID};
use crate::reading::FormMode;
use crate::ripple::Bounds;
use crate::validation::ControlSnapshot;
use crate::SliderSpec;
use gloo_utils::{document, window};
use log::{debug, warn};
use web_sys::{
    Element, HtmlInputElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
    ScrollToOptions,
};
use yew::html::NodeRef;

/// The element the form renders into, with its `data-*` settings.
pub struct Mount {
    pub root: Element,
    pub mode: FormMode,
    pub action: Option<String>,
}

/// Locate the mount element. `None` when the page has no form.
pub fn find_mount() -> Option<Mount> {
    let root = document().get_element_by_id(MOUNT_ID)?;
    let mode = FormMode::from_attr(root.get_attribute(MODE_ATTR).as_deref());
    let action = root.get_attribute(ACTION_ATTR).filter(|a| !a.trim().is_empty());
    Some(Mount { root, mode, action })
}

/// Blocking `window.alert`.
pub fn alert(message: &str) {
    if let Err(e) = window().alert_with_message(message) {
        warn!("alert failed: {:?}", e);
    }
}

pub fn scroll_to_top() {
    let opts = ScrollToOptions::new();
    opts.set_top(0.0);
    opts.set_behavior(ScrollBehavior::Smooth);
    window().scroll_to_with_scroll_to_options(&opts);
}

/// Smoothly bring `element` to the top of the viewport.
pub fn scroll_into_view(element: &Element) {
    let opts = ScrollIntoViewOptions::new();
    opts.set_behavior(ScrollBehavior::Smooth);
    opts.set_block(ScrollLogicalPosition::Start);
    element.scroll_into_view_with_scroll_into_view_options(&opts);
}

pub fn bounds_of(element: &Element) -> Bounds {
    let rect = element.get_bounding_client_rect();
    Bounds {
        left: rect.left(),
        top: rect.top(),
        width: rect.width(),
        height: rect.height(),
    }
}

/// Read the live attributes of every rendered slider. Sliders whose input
/// is not in the DOM are left out.
pub fn snapshot_controls<'a>(
    controls: impl IntoIterator<Item = (&'a SliderSpec, &'a NodeRef)>,
) -> Vec<ControlSnapshot> {
    controls
        .into_iter()
        .filter_map(|(spec, node)| match node.cast::<HtmlInputElement>() {
            Some(input) => Some(ControlSnapshot {
                name: input.name(),
                value: input.value(),
                min: input.min(),
                max: input.max(),
            }),
            None => {
                debug!("Slider {} not rendered, skipping", spec.id);
                None
            }
        })
        .collect()
}
