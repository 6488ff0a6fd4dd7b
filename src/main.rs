//! Entry point for the CropSense form front end.
//! Finds the mount element and renders the form controller into it.

use cropsense_form::controller::{FormController, FormControllerProps};
use cropsense_form::dom::find_mount;
use log::info;
use yew::virtual_dom::AttrValue;

/// Entry point: renders the form into `#cropsense-form` when the page has one.
fn main() {
    // Set the panic hook to log detailed errors to the console
    console_error_panic_hook::set_once();

    let Some(mount) = find_mount() else {
        info!("No form mount point on this page, nothing to bind");
        return;
    };

    let props = FormControllerProps {
        mode: mount.mode,
        action: mount.action.map(AttrValue::from),
        transport: None,
    };
    yew::Renderer::<FormController>::with_root_and_props(mount.root, props).render();
}
