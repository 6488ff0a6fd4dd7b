//! View components for the soil form.
//!
//! These render from props only; state lives in the form controller.

use crate::config::{ACTIVE_OPACITY, CROP_SELECT_ID, RESTING_OPACITY, SUBMIT_BUTTON_CLASS};
use crate::defaults::ERROR_BORDER;
use crate::reading::Crop;
use crate::ripple::Ripple;
use crate::SliderSpec;
use log::debug;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

/// Opacity a slider takes while the pointer is down or after release.
fn pointer_opacity(pressed: bool) -> &'static str {
    if pressed {
        ACTIVE_OPACITY
    } else {
        RESTING_OPACITY
    }
}

/// Inline style of a slider track. Opacity stays with the stylesheet until
/// the first pointer event.
fn slider_style(gradient: &str, opacity: Option<&str>, invalid: bool) -> String {
    let mut style = format!("background: {};", gradient);
    if let Some(opacity) = opacity {
        style.push_str(&format!(" opacity: {};", opacity));
    }
    if invalid {
        style.push_str(&format!(" border: {};", ERROR_BORDER));
    }
    style
}

#[derive(Properties, PartialEq)]
pub struct SliderFieldProps {
    pub spec: &'static SliderSpec,
    pub value: f64,
    /// Formatted value for the display element.
    pub display: AttrValue,
    /// Track background.
    pub gradient: AttrValue,
    #[prop_or_default]
    pub invalid: bool,
    pub node_ref: NodeRef,
    pub oninput: Callback<f64>,
}

/// One range input with its live value display.
#[function_component(SliderField)]
pub fn slider_field(props: &SliderFieldProps) -> Html {
    let spec = props.spec;
    let opacity = use_state(|| None::<&'static str>);

    let oninput = {
        let cb = props.oninput.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            match input.value().parse::<f64>() {
                Ok(v) => cb.emit(v),
                Err(_) => debug!("Ignoring non-numeric input on {}", spec.id),
            }
        })
    };
    let onmousedown = {
        let opacity = opacity.clone();
        Callback::from(move |_: MouseEvent| opacity.set(Some(pointer_opacity(true))))
    };
    let onmouseup = {
        let opacity = opacity.clone();
        Callback::from(move |_: MouseEvent| opacity.set(Some(pointer_opacity(false))))
    };

    html! {
        <div class="form-group">
            <label for={spec.id}>{ spec.label }</label>
            <div class="slider-with-value">
                <input type="range"
                    id={spec.id}
                    name={spec.name}
                    min={spec.min.to_string()}
                    max={spec.max.to_string()}
                    step={spec.step.to_string()}
                    value={props.value.to_string()}
                    ref={props.node_ref.clone()}
                    style={slider_style(&props.gradient, *opacity, props.invalid)}
                    {oninput}
                    {onmousedown}
                    {onmouseup}
                />
                <span class="slider-value" id={spec.display_id}>{ props.display.clone() }</span>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SubmitButtonProps {
    pub label: AttrValue,
    pub disabled: bool,
    pub ripple: Option<Ripple>,
    pub node_ref: NodeRef,
    pub onclick: Callback<MouseEvent>,
}

/// Primary submit button with its label span and ripple overlay.
#[function_component(SubmitButton)]
pub fn submit_button(props: &SubmitButtonProps) -> Html {
    html! {
        <button type="submit"
            class={SUBMIT_BUTTON_CLASS}
            disabled={props.disabled}
            ref={props.node_ref.clone()}
            onclick={props.onclick.clone()}
        >
            <span class="btn-text">{ props.label.clone() }</span>
            { for props.ripple.iter().map(|r| html! {
                <span key={r.id} class="ripple-effect" style={r.style()}></span>
            }) }
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub struct CropSelectProps {
    pub selected: Crop,
    pub onchange: Callback<Crop>,
}

/// Crop picker for the yield form, submitted as `label`.
#[function_component(CropSelect)]
pub fn crop_select(props: &CropSelectProps) -> Html {
    let onchange = {
        let cb = props.onchange.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            match select.value().parse::<Crop>() {
                Ok(crop) => cb.emit(crop),
                Err(err) => debug!("{}", err),
            }
        })
    };

    html! {
        <div class="form-group">
            <label for={CROP_SELECT_ID}>{ "Crop" }</label>
            <select id={CROP_SELECT_ID} name="label" {onchange}>
                { for Crop::ALL.iter().map(|c| html! {
                    <option value={c.as_str()} selected={*c == props.selected}>{ c.title() }</option>
                }) }
            </select>
        </div>
    }
}
