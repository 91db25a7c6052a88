//! Read-only snapshot of state handed to the AI collaborator.

use serde::Serialize;

use crate::application::store::AppState;
use crate::domain::alerts::Alert;
use crate::domain::dashboard::ManagerScorecard;
use crate::domain::foundation::ManagerId;
use crate::domain::scoring::ReportingWindow;

/// Owned copy of the scorecards and alerts an insight request may see.
///
/// Taking a snapshot releases the store immediately; the AI call never
/// holds a reference into live state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightSnapshot {
    pub window: ReportingWindow,
    pub scorecards: Vec<ManagerScorecard>,
    pub alerts: Vec<Alert>,
}

impl InsightSnapshot {
    /// Every manager in the current window.
    pub fn of_state(state: &AppState) -> Self {
        let window = state.window();
        Self {
            window,
            scorecards: state
                .managers()
                .iter()
                .map(|manager| ManagerScorecard::build(manager, &window))
                .collect(),
            alerts: state.alerts().to_vec(),
        }
    }

    /// A single manager, or `None` if the id is unknown.
    pub fn of_manager(state: &AppState, id: &ManagerId) -> Option<Self> {
        let scorecard = state.scorecard(id)?;
        Some(Self {
            window: state.window(),
            scorecards: vec![scorecard],
            alerts: state.alerts_for(id).cloned().collect(),
        })
    }

    /// Compact JSON used as prompt context.
    pub fn to_context(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
