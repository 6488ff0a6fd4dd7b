//! Range checks run before the form is submitted.
//!
//! The checks work on the raw attribute strings read from each rendered
//! range input, so a value forced outside its bounds (by script or by a
//! stale page) is caught even though the input normally clamps it.

use log::warn;
use std::fmt;

/// Why a control failed validation.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeError {
    /// The value parsed but lies outside the declared bounds.
    OutOfRange {
        name: String,
        value: f64,
        min: Option<f64>,
        max: Option<f64>,
    },
    /// The value is not a number at all.
    NotANumber { name: String, raw: String },
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeError::OutOfRange {
                name,
                value,
                min,
                max,
            } => {
                write!(f, "{} = {} is outside [", name, value)?;
                match min {
                    Some(m) => write!(f, "{}", m)?,
                    None => write!(f, "-inf")?,
                }
                write!(f, ", ")?;
                match max {
                    Some(m) => write!(f, "{}", m)?,
                    None => write!(f, "inf")?,
                }
                write!(f, "]")
            }
            RangeError::NotANumber { name, raw } => {
                write!(f, "{} has a non-numeric value {:?}", name, raw)
            }
        }
    }
}

impl std::error::Error for RangeError {}

/// Raw state of one range input as found in the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlSnapshot {
    pub name: String,
    pub value: String,
    pub min: String,
    pub max: String,
}

/// Parse a numeric attribute; blank or garbage attributes count as absent.
fn parse_bound(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Check one control against its own `min`/`max` attributes.
pub fn check_control(control: &ControlSnapshot) -> Result<f64, RangeError> {
    let value = match control.value.trim().parse::<f64>() {
        Ok(v) if !v.is_nan() => v,
        _ => {
            return Err(RangeError::NotANumber {
                name: control.name.clone(),
                raw: control.value.clone(),
            })
        }
    };

    let min = parse_bound(&control.min);
    let max = parse_bound(&control.max);
    let below = min.is_some_and(|m| value < m);
    let above = max.is_some_and(|m| value > m);

    if below || above {
        return Err(RangeError::OutOfRange {
            name: control.name.clone(),
            value,
            min,
            max,
        });
    }
    Ok(value)
}

/// Outcome of validating every range control of the form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationReport {
    outcomes: Vec<(String, Result<f64, RangeError>)>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.outcomes.iter().all(|(_, r)| r.is_ok())
    }

    /// Whether the named control needs the error highlight.
    pub fn is_invalid(&self, name: &str) -> bool {
        self.outcomes
            .iter()
            .any(|(n, r)| n == name && r.is_err())
    }

    /// Names of the failing controls, in form order.
    pub fn invalid_names(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|(_, r)| r.is_err())
            .map(|(n, _)| n.as_str())
            .collect()
    }

    pub fn errors(&self) -> impl Iterator<Item = &RangeError> {
        self.outcomes.iter().filter_map(|(_, r)| r.as_ref().err())
    }

    /// Parsed values of the controls that passed.
    pub fn values(&self) -> impl Iterator<Item = (&str, f64)> {
        self.outcomes
            .iter()
            .filter_map(|(n, r)| r.as_ref().ok().map(|v| (n.as_str(), *v)))
    }
}

/// Validate all controls. Never short-circuits so every failing control
/// can be highlighted at once.
pub fn validate_controls(controls: &[ControlSnapshot]) -> ValidationReport {
    let outcomes: Vec<_> = controls
        .iter()
        .map(|c| (c.name.clone(), check_control(c)))
        .collect();

    let report = ValidationReport { outcomes };
    for err in report.errors() {
        warn!("Validation failed: {}", err);
    }
    report
}
