//! Busy state of the submit button.
//!
//! Every submission opens a numbered cycle. The cycle ends when the
//! transport reports completion or when the safety timer fires, whichever
//! comes first; signals for any other cycle are ignored.

use log::{info, warn};
use std::rc::Rc;
use yew::prelude::*;

pub const BUSY_LABEL: &str = "Analyzing... 🌱";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Busy { cycle: u64, original_label: String },
}

pub enum SubmitAction {
    /// Valid submission started.
    Begin { cycle: u64 },
    /// The transport finished the request of this cycle.
    Complete { cycle: u64 },
    /// The safety timer of this cycle fired.
    TimedOut { cycle: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitToggle {
    label: String,
    state: SubmitState,
}

impl SubmitToggle {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            state: SubmitState::Idle,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, SubmitState::Busy { .. })
    }

    /// Text currently shown in the button.
    pub fn label(&self) -> &str {
        match self.state {
            SubmitState::Idle => &self.label,
            SubmitState::Busy { .. } => BUSY_LABEL,
        }
    }

    pub fn apply(&mut self, action: SubmitAction) {
        match action {
            SubmitAction::Begin { cycle } => {
                if let SubmitState::Busy { cycle: running, .. } = self.state {
                    warn!("Submit cycle {} ignored, cycle {} still busy", cycle, running);
                    return;
                }
                info!("Submit cycle {} busy", cycle);
                self.state = SubmitState::Busy {
                    cycle,
                    original_label: self.label.clone(),
                };
            }
            SubmitAction::Complete { cycle } => self.finish(cycle, "completed"),
            SubmitAction::TimedOut { cycle } => self.finish(cycle, "timed out"),
        }
    }

    fn finish(&mut self, cycle: u64, how: &str) {
        let original_label = match &self.state {
            SubmitState::Busy {
                cycle: running,
                original_label,
            } if *running == cycle => original_label.clone(),
            _ => return,
        };
        info!("Submit cycle {} {}", cycle, how);
        self.label = original_label;
        self.state = SubmitState::Idle;
    }
}

impl Reducible for SubmitToggle {
    type Action = SubmitAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}
