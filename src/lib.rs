//! Slider bindings for the CropSense soil form.
//!
//! The crate root holds the static slider table, value formatting and the
//! per-page [`SliderBank`]. Validation, ripple geometry, the busy-state
//! machine and the typed submission payload live in their own modules; the
//! Yew components in [`components`] and [`controller`] wire events to them.

use log::debug;
use std::fmt;
use std::rc::Rc;
use yew::functional::Reducible;

pub mod components;
pub mod config;
pub mod controller;
pub mod dom;
pub mod hooks;
pub mod reading;
pub mod ripple;
pub mod submit;
pub mod validation;

/// Timings and colors shared by the front end.
pub mod defaults {
    /// Lifetime of a ripple overlay.
    pub const RIPPLE_LIFETIME_MS: u32 = 600;
    /// How long the reset button stays pressed.
    pub const PRESS_FEEDBACK_MS: u32 = 150;
    /// Worst-case revert of the busy state when no completion arrives.
    pub const BUSY_TIMEOUT_MS: u32 = 5000;

    pub const FILLED_COLOR: &str = "#81c784";
    pub const UNFILLED_COLOR: &str = "#e0e0e0";
    pub const ERROR_BORDER: &str = "2px solid #f44336";
}

/// What a slider measures; decides how its value is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Temperature,
    Ph,
    Humidity,
    Rainfall,
    Generic,
}

/// Static description of one range control and its display element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderSpec {
    /// Form field name, also the key the server reads.
    pub name: &'static str,
    /// Element id of the range input.
    pub id: &'static str,
    /// Element id of the text element showing the formatted value.
    pub display_id: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub unit: Unit,
}

impl SliderSpec {
    pub fn midpoint(&self) -> f64 {
        midpoint(self.min, self.max)
    }

    /// Nearest position on the step grid, as the range input itself stores it.
    ///
    /// Halfway values go up, so the pH midpoint 6.75 lands on 6.8.
    pub fn snap(&self, value: f64) -> f64 {
        if self.step <= 0.0 || !value.is_finite() {
            return value;
        }
        // drop the error of the division before picking a side
        let steps = ((value - self.min) / self.step * 1e6).round() / 1e6;
        let snapped = self.min + (steps + 0.5).floor() * self.step;
        ((snapped * 1e9).round() / 1e9).clamp(self.min, self.max)
    }

    /// Value the control holds on load and after reset.
    pub fn initial_value(&self) -> f64 {
        self.snap(self.midpoint())
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn format(&self, value: f64) -> String {
        format_value(self.unit, value)
    }

    pub fn fill_percent(&self, value: f64) -> f64 {
        fill_percent(value, self.min, self.max)
    }
}

pub const SLIDER_COUNT: usize = 7;

/// The seven soil and climate sliders, in form order.
pub static SLIDERS: [SliderSpec; SLIDER_COUNT] = [
    SliderSpec {
        name: "N",
        id: "N-slider",
        display_id: "N-value",
        label: "Nitrogen (N)",
        min: 0.0,
        max: 140.0,
        step: 1.0,
        unit: Unit::Generic,
    },
    SliderSpec {
        name: "P",
        id: "P-slider",
        display_id: "P-value",
        label: "Phosphorus (P)",
        min: 5.0,
        max: 145.0,
        step: 1.0,
        unit: Unit::Generic,
    },
    SliderSpec {
        name: "K",
        id: "K-slider",
        display_id: "K-value",
        label: "Potassium (K)",
        min: 5.0,
        max: 205.0,
        step: 1.0,
        unit: Unit::Generic,
    },
    SliderSpec {
        name: "temperature",
        id: "temperature-slider",
        display_id: "temperature-value",
        label: "Temperature",
        min: 8.0,
        max: 44.0,
        step: 0.1,
        unit: Unit::Temperature,
    },
    SliderSpec {
        name: "humidity",
        id: "humidity-slider",
        display_id: "humidity-value",
        label: "Humidity",
        min: 14.0,
        max: 100.0,
        step: 1.0,
        unit: Unit::Humidity,
    },
    SliderSpec {
        name: "ph",
        id: "ph-slider",
        display_id: "ph-value",
        label: "Soil pH",
        min: 3.5,
        max: 10.0,
        step: 0.1,
        unit: Unit::Ph,
    },
    SliderSpec {
        name: "rainfall",
        id: "rainfall-slider",
        display_id: "rainfall-value",
        label: "Rainfall",
        min: 20.0,
        max: 300.0,
        step: 1.0,
        unit: Unit::Rainfall,
    },
];

/// Position of a slider in [`SLIDERS`] by its form field name.
pub fn slider_index(name: &str) -> Option<usize> {
    SLIDERS.iter().position(|s| s.name == name)
}

/// Arithmetic mean of the bounds; the load and reset value of a slider.
#[inline]
pub fn midpoint(min: f64, max: f64) -> f64 {
    (min + max) / 2.0
}

/// Position of `value` inside `[min, max]` as a percentage.
///
/// A degenerate range (`max <= min`) has nothing to fill and yields `0.0`.
pub fn fill_percent(value: f64, min: f64, max: f64) -> f64 {
    if max > min {
        (value - min) / (max - min) * 100.0
    } else {
        0.0
    }
}

/// Two-stop gradient used as the track background of a slider.
pub fn gradient_css(percent: f64) -> String {
    format!(
        "linear-gradient(90deg, {} {}%, {} {}%)",
        defaults::FILLED_COLOR,
        percent,
        defaults::UNFILLED_COLOR,
        percent
    )
}

/// Render `value` with exactly one decimal, rounding halves away from zero.
fn one_decimal(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    format!("{:.1}", rounded)
}

/// Display text for a slider value of the given unit.
///
/// # Examples
/// ```
/// use cropsense_form::{format_value, Unit};
/// assert_eq!(format_value(Unit::Temperature, 26.0), "26.0°C");
/// assert_eq!(format_value(Unit::Humidity, 57.0), "57%");
/// assert_eq!(format_value(Unit::Rainfall, 160.0), "160mm");
/// ```
pub fn format_value(unit: Unit, value: f64) -> String {
    match unit {
        Unit::Temperature => format!("{}°C", one_decimal(value)),
        Unit::Ph => one_decimal(value),
        Unit::Humidity => format!("{}%", value),
        Unit::Rainfall => format!("{}mm", value),
        Unit::Generic => value.to_string(),
    }
}

/// Error for an index that does not name a declared slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownSlider(pub usize);

impl fmt::Display for UnknownSlider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "No slider at index {} (have {})", self.0, SLIDERS.len())
    }
}

impl std::error::Error for UnknownSlider {}

/// Current values of all sliders, indexed like [`SLIDERS`].
#[derive(Debug, Clone, PartialEq)]
pub struct SliderBank {
    values: [f64; SLIDER_COUNT],
}

impl Default for SliderBank {
    fn default() -> Self {
        Self::at_midpoints()
    }
}

impl SliderBank {
    /// Every slider at the midpoint of its range, snapped to its step.
    pub fn at_midpoints() -> Self {
        let mut values = [0.0; SLIDER_COUNT];
        for (slot, spec) in values.iter_mut().zip(SLIDERS.iter()) {
            *slot = spec.initial_value();
        }
        Self { values }
    }

    pub fn value(&self, idx: usize) -> Option<f64> {
        self.values.get(idx).copied()
    }

    /// Record a new value for one slider. The value is stored as given; the
    /// range input itself keeps user input inside the bounds.
    pub fn set(&mut self, idx: usize, value: f64) -> Result<(), UnknownSlider> {
        let slot = self.values.get_mut(idx).ok_or(UnknownSlider(idx))?;
        *slot = value;
        Ok(())
    }

    /// Put every slider back at its midpoint.
    pub fn reset_all(&mut self) {
        *self = Self::at_midpoints();
        debug!("Slider bank reset to midpoints");
    }

    /// Formatted display text for one slider.
    pub fn display(&self, idx: usize) -> Option<String> {
        let spec = SLIDERS.get(idx)?;
        self.value(idx).map(|v| spec.format(v))
    }

    /// Track background for one slider.
    pub fn gradient(&self, idx: usize) -> Option<String> {
        let spec = SLIDERS.get(idx)?;
        self.value(idx).map(|v| gradient_css(spec.fill_percent(v)))
    }

    /// `(spec, value)` pairs in form order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static SliderSpec, f64)> + '_ {
        SLIDERS.iter().zip(self.values.iter().copied())
    }
}

pub enum BankAction {
    Set(usize, f64),
    ResetAll,
}

impl Reducible for SliderBank {
    type Action = BankAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            BankAction::Set(idx, value) => {
                if let Err(e) = next.set(idx, value) {
                    debug!("{}", e);
                    return self;
                }
            }
            BankAction::ResetAll => next.reset_all(),
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoints_of_declared_sliders() {
        let mids: Vec<f64> = SLIDERS.iter().map(SliderSpec::midpoint).collect();
        assert_eq!(mids, vec![70.0, 75.0, 105.0, 26.0, 57.0, 6.75, 160.0]);
    }

    #[test]
    fn timings_match_the_page_behaviour() {
        assert_eq!(defaults::PRESS_FEEDBACK_MS, 150);
        assert_eq!(defaults::RIPPLE_LIFETIME_MS, 600);
        assert_eq!(defaults::BUSY_TIMEOUT_MS, 5000);
    }

    #[test]
    fn midpoints_are_snapped_to_the_step_grid() {
        let bank = SliderBank::at_midpoints();
        let values: Vec<f64> = bank.iter().map(|(_, v)| v).collect();
        assert_eq!(values, vec![70.0, 75.0, 105.0, 26.0, 57.0, 6.8, 160.0]);
    }

    #[test]
    fn ph_gradient_follows_the_snapped_value() {
        let bank = SliderBank::at_midpoints();
        let ph = slider_index("ph").unwrap();
        assert_eq!(
            bank.gradient(ph).unwrap(),
            gradient_css(fill_percent(6.8, 3.5, 10.0))
        );
        assert!(!bank.gradient(ph).unwrap().contains(" 50%"));
    }

    #[test]
    fn snap_rounds_to_nearest_step_within_bounds() {
        let ph = &SLIDERS[slider_index("ph").unwrap()];
        assert_eq!(ph.snap(6.75), 6.8);
        assert_eq!(ph.snap(6.74), 6.7);
        assert_eq!(ph.snap(12.0), 10.0);
        assert_eq!(ph.snap(1.0), 3.5);

        let n = &SLIDERS[0];
        assert_eq!(n.snap(70.4), 70.0);
        assert_eq!(n.snap(70.5), 71.0);
    }

    #[test]
    fn initial_displays_are_formatted_midpoints() {
        let bank = SliderBank::at_midpoints();
        let shown: Vec<String> = (0..SLIDERS.len())
            .map(|i| bank.display(i).unwrap())
            .collect();
        assert_eq!(
            shown,
            vec!["70", "75", "105", "26.0°C", "57%", "6.8", "160mm"]
        );
    }

    #[test]
    fn formats_by_unit() {
        assert_eq!(format_value(Unit::Temperature, 31.25), "31.3°C");
        assert_eq!(format_value(Unit::Temperature, 8.0), "8.0°C");
        assert_eq!(format_value(Unit::Ph, 7.0), "7.0");
        assert_eq!(format_value(Unit::Ph, 3.54), "3.5");
        assert_eq!(format_value(Unit::Humidity, 82.5), "82.5%");
        assert_eq!(format_value(Unit::Rainfall, 20.0), "20mm");
        assert_eq!(format_value(Unit::Generic, 0.0), "0");
        assert_eq!(format_value(Unit::Generic, 12.5), "12.5");
    }

    #[test]
    fn fill_percent_tracks_position() {
        let n = &SLIDERS[slider_index("N").unwrap()];
        assert_eq!(n.fill_percent(0.0), 0.0);
        assert_eq!(n.fill_percent(70.0), 50.0);
        assert_eq!(n.fill_percent(140.0), 100.0);

        let ph = &SLIDERS[slider_index("ph").unwrap()];
        assert!((ph.fill_percent(6.75) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_range_has_no_fill() {
        assert_eq!(fill_percent(5.0, 5.0, 5.0), 0.0);
        assert_eq!(fill_percent(5.0, 9.0, 1.0), 0.0);
    }

    #[test]
    fn gradient_uses_both_stops() {
        assert_eq!(
            gradient_css(25.0),
            "linear-gradient(90deg, #81c784 25%, #e0e0e0 25%)"
        );
    }

    #[test]
    fn moving_a_slider_updates_display_and_gradient() {
        let mut bank = SliderBank::at_midpoints();
        let idx = slider_index("rainfall").unwrap();
        bank.set(idx, 90.0).unwrap();
        assert_eq!(bank.display(idx).as_deref(), Some("90mm"));
        assert_eq!(
            bank.gradient(idx).as_deref(),
            Some("linear-gradient(90deg, #81c784 25%, #e0e0e0 25%)")
        );
    }

    #[test]
    fn reset_restores_every_midpoint() {
        let mut bank = SliderBank::at_midpoints();
        for i in 0..SLIDERS.len() {
            bank.set(i, SLIDERS[i].max).unwrap();
        }
        assert_ne!(bank, SliderBank::at_midpoints());

        bank.reset_all();
        assert_eq!(bank, SliderBank::at_midpoints());
        for (spec, value) in bank.iter() {
            assert_eq!(value, spec.initial_value(), "{}", spec.name);
        }
    }

    #[test]
    fn set_rejects_unknown_index() {
        let mut bank = SliderBank::default();
        assert_eq!(bank.set(7, 1.0), Err(UnknownSlider(7)));
        assert_eq!(bank.display(7), None);
    }

    #[test]
    fn reducer_sets_and_resets() {
        let bank = Rc::new(SliderBank::at_midpoints());
        let moved = bank.clone().reduce(BankAction::Set(0, 10.0));
        assert_eq!(moved.value(0), Some(10.0));
        assert_eq!(moved.display(0).as_deref(), Some("10"));

        let same = moved.clone().reduce(BankAction::Set(99, 1.0));
        assert!(Rc::ptr_eq(&same, &moved));

        let reset = moved.reduce(BankAction::ResetAll);
        assert_eq!(*reset, SliderBank::at_midpoints());
    }

    #[test]
    fn ids_follow_field_names() {
        for spec in &SLIDERS {
            assert_eq!(spec.id, format!("{}-slider", spec.name));
            assert_eq!(spec.display_id, format!("{}-value", spec.name));
            assert!(spec.contains(spec.initial_value()));
        }
    }
}
