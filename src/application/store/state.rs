//! Application state tree.

use serde::{Deserialize, Serialize};

use crate::domain::alerts::Alert;
use crate::domain::dashboard::{ExecutiveRollup, ManagerScorecard};
use crate::domain::foundation::{AlertId, ManagerId, Month, NotFoundError, TimePeriod};
use crate::domain::manager::Manager;
use crate::domain::scoring::ReportingWindow;

/// Which dashboard is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Manager,
    Executive,
}

/// The aggregate root held by the state store.
///
/// # Invariants
///
/// - `managers` is in insertion order, which is display order
/// - `selected_manager`, if set, names a manager in `managers`
/// - `alerts` is always the reconciled output of the alert generator over
///   `managers` and the current window
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub(super) managers: Vec<Manager>,
    pub(super) selected_manager: Option<ManagerId>,
    pub(super) view: ViewMode,
    pub(super) time_period: TimePeriod,
    pub(super) reporting_month: Month,
    pub(super) alerts: Vec<Alert>,
}

impl AppState {
    pub(super) fn new(reporting_month: Month) -> Self {
        Self {
            managers: Vec::new(),
            selected_manager: None,
            view: ViewMode::default(),
            time_period: TimePeriod::default(),
            reporting_month,
            alerts: Vec::new(),
        }
    }

    pub fn managers(&self) -> &[Manager] {
        &self.managers
    }

    pub fn manager(&self, id: &ManagerId) -> Option<&Manager> {
        self.managers.iter().find(|manager| manager.id() == id)
    }

    pub fn selected_manager_id(&self) -> Option<&ManagerId> {
        self.selected_manager.as_ref()
    }

    pub fn selected_manager(&self) -> Option<&Manager> {
        self.selected_manager.as_ref().and_then(|id| self.manager(id))
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn time_period(&self) -> TimePeriod {
        self.time_period
    }

    pub fn reporting_month(&self) -> Month {
        self.reporting_month
    }

    /// The window every score in this state is computed against.
    pub fn window(&self) -> ReportingWindow {
        ReportingWindow::new(self.time_period, self.reporting_month)
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// Alerts raised for one manager, in generation order.
    pub fn alerts_for<'a>(&'a self, id: &'a ManagerId) -> impl Iterator<Item = &'a Alert> + 'a {
        self.alerts.iter().filter(move |alert| alert.manager_id() == id)
    }

    pub fn unread_alert_count(&self) -> usize {
        self.alerts.iter().filter(|alert| !alert.is_read()).count()
    }

    /// Score tree for one manager in the current window.
    pub fn scorecard(&self, id: &ManagerId) -> Option<ManagerScorecard> {
        self.manager(id)
            .map(|manager| ManagerScorecard::build(manager, &self.window()))
    }

    /// Executive rollup over every manager in the current window.
    pub fn rollup(&self, top_alerts_limit: usize) -> ExecutiveRollup {
        ExecutiveRollup::build(&self.managers, &self.alerts, &self.window(), top_alerts_limit)
    }

    pub(super) fn manager_mut(&mut self, id: &ManagerId) -> Result<&mut Manager, NotFoundError> {
        self.managers
            .iter_mut()
            .find(|manager| manager.id() == id)
            .ok_or(NotFoundError::Manager(*id))
    }

    pub(super) fn alert_mut(&mut self, id: &AlertId) -> Result<&mut Alert, NotFoundError> {
        self.alerts
            .iter_mut()
            .find(|alert| alert.id() == id)
            .ok_or(NotFoundError::Alert(*id))
    }
}
