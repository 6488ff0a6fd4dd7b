//! The form controller: owns slider values, validation highlights, the
//! ripple and the busy state, and wires them to the rendered form.

use crate::components::{CropSelect, SliderField, SubmitButton};
use crate::config::{INVALID_RANGE_ALERT, PRESSED_TRANSFORM, RESET_BUTTON_ID, RESET_LABEL};
use crate::defaults::PRESS_FEEDBACK_MS;
use crate::dom;
use crate::hooks::{use_busy_submit, use_press_feedback, use_ripple};
use crate::reading::{Crop, FormMode, ReadingError, SoilReading};
use crate::validation::{validate_controls, ControlSnapshot, ValidationReport};
use crate::{slider_index, BankAction, SliderBank, SLIDERS};
use log::{debug, info, warn};
use web_sys::Element;
use yew::prelude::*;

/// Sends a reading somewhere and calls the completion callback when done.
pub type Transport = Callback<(SoilReading, Callback<()>)>;

#[derive(Properties, PartialEq)]
pub struct FormControllerProps {
    #[prop_or_default]
    pub mode: FormMode,
    /// Overrides the mode's default action URL.
    #[prop_or_default]
    pub action: Option<AttrValue>,
    /// When set, the browser does not post the form; the reading is handed
    /// to this callback and the busy state ends on its completion signal.
    #[prop_or_default]
    pub transport: Option<Transport>,
}

/// Turn a passing report into the typed payload for `mode`.
fn reading_from_report(
    report: &ValidationReport,
    crop: Crop,
    mode: FormMode,
) -> Result<SoilReading, ReadingError> {
    let numbers: Vec<(&str, String)> = report
        .values()
        .map(|(name, v)| (name, v.to_string()))
        .collect();
    let fields = numbers
        .iter()
        .map(|(name, v)| (*name, v.as_str()))
        .chain(std::iter::once(("label", crop.as_str())));
    SoilReading::from_fields(fields, mode)
}

/// What a submit event should do.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Cancel the submission; `first_invalid` indexes [`SLIDERS`].
    Blocked { first_invalid: Option<usize> },
    /// Let it through and enter the busy state.
    Proceed(Result<SoilReading, ReadingError>),
}

/// Validate the rendered controls and decide the fate of the submission.
pub fn plan_submit(
    controls: &[ControlSnapshot],
    crop: Crop,
    mode: FormMode,
) -> (ValidationReport, SubmitOutcome) {
    let report = validate_controls(controls);
    let outcome = if report.is_valid() {
        SubmitOutcome::Proceed(reading_from_report(&report, crop, mode))
    } else {
        let first_invalid = report
            .invalid_names()
            .first()
            .and_then(|name| slider_index(name));
        SubmitOutcome::Blocked { first_invalid }
    };
    (report, outcome)
}

/// Pass a proceeding submission to `transport`. Returns whether the native
/// form post must be suppressed. Without a usable reading the cycle is
/// completed at once.
fn hand_off(
    reading: Result<SoilReading, ReadingError>,
    complete: Callback<()>,
    transport: Option<&Transport>,
) -> bool {
    let Some(transport) = transport else {
        return false;
    };
    match reading {
        Ok(r) => transport.emit((r, complete)),
        Err(_) => complete.emit(()),
    }
    true
}

#[function_component(FormController)]
pub fn form_controller(props: &FormControllerProps) -> Html {
    let mode = props.mode;
    let bank = use_reducer(SliderBank::at_midpoints);
    let report = use_state(ValidationReport::default);
    let crop = use_state(|| Crop::Rice);
    let slider_refs = use_memo((), |_| {
        SLIDERS.iter().map(|_| NodeRef::default()).collect::<Vec<_>>()
    });
    let submit_ref = use_node_ref();

    let (reset_pressed, press_reset) = use_press_feedback(PRESS_FEEDBACK_MS);
    let (ripple, on_submit_click) = use_ripple(submit_ref.clone());
    let busy = use_busy_submit(mode.submit_label());

    {
        use_effect_with((), move |_| {
            info!("Form initialized in {:?} mode with {} sliders", mode, SLIDERS.len());
            || ()
        });
    }

    let on_reset = {
        let bank = bank.clone();
        Callback::from(move |_: MouseEvent| {
            bank.dispatch(BankAction::ResetAll);
            press_reset.emit(());
            dom::scroll_to_top();
            info!("Sliders reset to midpoints");
        })
    };

    let on_crop = {
        let crop = crop.clone();
        Callback::from(move |c: Crop| crop.set(c))
    };

    let onsubmit = {
        let slider_refs = slider_refs.clone();
        let report = report.clone();
        let crop = crop.clone();
        let begin = busy.begin.clone();
        let transport = props.transport.clone();
        Callback::from(move |e: SubmitEvent| {
            let controls = dom::snapshot_controls(SLIDERS.iter().zip(slider_refs.iter()));
            let (checked, outcome) = plan_submit(&controls, *crop, mode);
            report.set(checked);

            match outcome {
                SubmitOutcome::Blocked { first_invalid } => {
                    e.prevent_default();
                    if let Some(element) =
                        first_invalid.and_then(|idx| slider_refs[idx].cast::<Element>())
                    {
                        dom::scroll_into_view(&element);
                    }
                    dom::alert(INVALID_RANGE_ALERT);
                }
                SubmitOutcome::Proceed(reading) => {
                    match &reading {
                        Ok(r) => debug!(
                            "Submitting {}",
                            r.to_json().unwrap_or_else(|err| err.to_string())
                        ),
                        Err(err) => warn!("Could not build reading: {}", err),
                    }
                    let complete = begin.emit(());
                    if hand_off(reading, complete, transport.as_ref()) {
                        e.prevent_default();
                    }
                }
            }
        })
    };

    let action = props
        .action
        .clone()
        .unwrap_or_else(|| AttrValue::from(mode.action()));
    let reset_style = if reset_pressed {
        format!("transform: {};", PRESSED_TRANSFORM)
    } else {
        String::new()
    };

    html! {
        <form method="post" {action} {onsubmit}>
            if mode.needs_crop() {
                <CropSelect selected={*crop} onchange={on_crop} />
            }
            { for bank.iter().enumerate().map(|(idx, (spec, value))| {
                let dispatcher = bank.dispatcher();
                let oninput = Callback::from(move |v: f64| {
                    dispatcher.dispatch(BankAction::Set(idx, v));
                });
                html! {
                    <SliderField
                        key={spec.id}
                        spec={spec}
                        {value}
                        display={bank.display(idx).unwrap_or_default()}
                        gradient={bank.gradient(idx).unwrap_or_default()}
                        invalid={report.is_invalid(spec.name)}
                        node_ref={slider_refs[idx].clone()}
                        {oninput}
                    />
                }
            }) }
            <div class="form-actions">
                <button type="button"
                    id={RESET_BUTTON_ID}
                    class="reset-btn"
                    style={reset_style}
                    onclick={on_reset}
                >
                    { RESET_LABEL }
                </button>
                <SubmitButton
                    label={busy.label.clone()}
                    disabled={busy.busy}
                    {ripple}
                    node_ref={submit_ref}
                    onclick={on_submit_click}
                />
            </div>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submit::{SubmitAction, SubmitToggle};
    use std::cell::RefCell;
    use std::rc::Rc;

    const MIDPOINTS: [&str; 7] = ["70", "75", "105", "26", "57", "6.8", "160"];

    fn snapshots(values: [&str; 7]) -> Vec<ControlSnapshot> {
        SLIDERS
            .iter()
            .zip(values)
            .map(|(s, v)| ControlSnapshot {
                name: s.name.to_string(),
                value: v.to_string(),
                min: s.min.to_string(),
                max: s.max.to_string(),
            })
            .collect()
    }

    /// Run the submit path against a toggle the way the form does.
    fn submit(toggle: &mut SubmitToggle, outcome: SubmitOutcome) -> bool {
        match outcome {
            SubmitOutcome::Blocked { .. } => false,
            SubmitOutcome::Proceed(_) => {
                toggle.apply(SubmitAction::Begin { cycle: 1 });
                true
            }
        }
    }

    #[test]
    fn passing_report_becomes_reading() {
        let report = validate_controls(&snapshots(MIDPOINTS));
        let r = reading_from_report(&report, Crop::Maize, FormMode::Recommend).unwrap();
        assert_eq!(r.rainfall, 160.0);
        assert_eq!(r.label, None);

        let r = reading_from_report(&report, Crop::Maize, FormMode::Yield).unwrap();
        assert_eq!(r.label, Some(Crop::Maize));
    }

    #[test]
    fn out_of_range_control_blocks_submission() {
        let (report, outcome) = plan_submit(
            &snapshots(["70", "75", "105", "26", "120", "6.8", "900"]),
            Crop::Rice,
            FormMode::Recommend,
        );
        assert!(report.is_invalid("humidity"));
        assert!(report.is_invalid("rainfall"));
        assert!(!report.is_invalid("N"));
        assert_eq!(
            outcome,
            SubmitOutcome::Blocked {
                first_invalid: slider_index("humidity")
            }
        );

        let mut toggle = SubmitToggle::new("Get Recommendation");
        assert!(!submit(&mut toggle, outcome));
        assert!(!toggle.is_busy());
        assert_eq!(toggle.label(), "Get Recommendation");
    }

    #[test]
    fn valid_controls_proceed_into_busy() {
        let (report, outcome) =
            plan_submit(&snapshots(MIDPOINTS), Crop::Coffee, FormMode::Yield);
        assert!(report.is_valid());
        let SubmitOutcome::Proceed(Ok(reading)) = &outcome else {
            panic!("expected a reading, got {:?}", outcome);
        };
        assert_eq!(reading.ph, 6.8);
        assert_eq!(reading.label, Some(Crop::Coffee));

        let mut toggle = SubmitToggle::new("Predict Yield");
        assert!(submit(&mut toggle, outcome));
        assert!(toggle.is_busy());
        assert_eq!(toggle.label(), crate::submit::BUSY_LABEL);
    }

    #[test]
    fn transport_receives_reading_and_completion() {
        let received = Rc::new(RefCell::new(None::<SoilReading>));
        let completed = Rc::new(RefCell::new(0));

        let transport: Transport = {
            let received = received.clone();
            Callback::from(move |(reading, done): (SoilReading, Callback<()>)| {
                *received.borrow_mut() = Some(reading);
                done.emit(());
            })
        };
        let complete = {
            let completed = completed.clone();
            Callback::from(move |_| *completed.borrow_mut() += 1)
        };

        let (_, outcome) = plan_submit(&snapshots(MIDPOINTS), Crop::Rice, FormMode::Recommend);
        let SubmitOutcome::Proceed(reading) = outcome else {
            panic!("valid form was blocked");
        };
        assert!(hand_off(reading, complete, Some(&transport)));
        assert_eq!(received.borrow().as_ref().map(|r| r.n), Some(70.0));
        assert_eq!(*completed.borrow(), 1);
    }

    #[test]
    fn unusable_reading_completes_at_once() {
        let completed = Rc::new(RefCell::new(0));
        let complete = {
            let completed = completed.clone();
            Callback::from(move |_| *completed.borrow_mut() += 1)
        };
        let transport: Transport =
            Callback::from(|_: (SoilReading, Callback<()>)| panic!("nothing to send"));

        let reading = Err(ReadingError::MissingField("label"));
        assert!(hand_off(reading, complete, Some(&transport)));
        assert_eq!(*completed.borrow(), 1);
    }

    #[test]
    fn native_post_is_kept_without_transport() {
        let (_, outcome) = plan_submit(&snapshots(MIDPOINTS), Crop::Rice, FormMode::Recommend);
        let SubmitOutcome::Proceed(reading) = outcome else {
            panic!("valid form was blocked");
        };
        assert!(!hand_off(reading, Callback::from(|_| ()), None));
    }
}
