//! Lookup state and the presentation seam.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::model::DisplayRecord;

/// Where the current lookup stands.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LookupState {
    #[default]
    Idle,
    Loading,
    Success(DisplayRecord),
    Failed(String),
}

/// Which panels a front end should show for a state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Panels<'a> {
    pub loading: bool,
    pub error: Option<&'a str>,
    pub result: Option<&'a DisplayRecord>,
}

impl LookupState {
    pub fn panels(&self) -> Panels<'_> {
        match self {
            LookupState::Idle => Panels {
                loading: false,
                error: None,
                result: None,
            },
            LookupState::Loading => Panels {
                loading: true,
                error: None,
                result: None,
            },
            LookupState::Success(record) => Panels {
                loading: false,
                error: None,
                result: Some(record),
            },
            LookupState::Failed(message) => Panels {
                loading: false,
                error: Some(message.as_str()),
                result: None,
            },
        }
    }

    pub fn record(&self) -> Option<&DisplayRecord> {
        match self {
            LookupState::Success(record) => Some(record),
            _ => None,
        }
    }
}

/// Renders lookup states. Called once per applied transition.
pub trait Presenter: Send {
    fn render(&mut self, state: &LookupState);
}

/// Keeps every rendered state; handy for tests and headless callers.
/// Clones share the same history.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    rendered: Arc<Mutex<Vec<LookupState>>>,
}

impl RecordingPresenter {
    pub fn rendered(&self) -> Vec<LookupState> {
        self.rendered.lock().clone()
    }

    pub fn last(&self) -> Option<LookupState> {
        self.rendered.lock().last().cloned()
    }
}

impl Presenter for RecordingPresenter {
    fn render(&mut self, state: &LookupState) {
        self.rendered.lock().push(state.clone());
    }
}
