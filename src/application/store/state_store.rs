//! StateStore - single owner of application state.
//!
//! Every change goes through [`StateStore::dispatch`]. A command is applied
//! to a working copy of the state; alerts are regenerated against the
//! result and only then is the copy swapped in. A rejected command leaves
//! the previous state exactly as it was.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{AlertDelta, AppState, Command, DispatchOutcome, StoreError, StoreEvent};
use crate::domain::alerts::{Alert, AlertGenerator, AlertThresholds};
use crate::domain::catalog::RoleCatalog;
use crate::domain::foundation::{AlertId, Month, NotFoundError, Timestamp};
use crate::domain::manager::Manager;
use crate::ports::Clock;

/// Process-wide store for managers, view selection and derived alerts.
pub struct StateStore {
    state: AppState,
    catalog: Arc<RoleCatalog>,
    generator: AlertGenerator,
    clock: Arc<dyn Clock>,
}

impl StateStore {
    /// Creates an empty store whose reporting month is the clock's month.
    pub fn new(
        catalog: Arc<RoleCatalog>,
        thresholds: AlertThresholds,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let reporting_month = Month::of_timestamp(&clock.now());
        Self {
            state: AppState::new(reporting_month),
            catalog,
            generator: AlertGenerator::new(thresholds),
            clock,
        }
    }

    /// Creates a store pre-populated with `managers` and their alerts.
    pub fn with_managers(
        catalog: Arc<RoleCatalog>,
        thresholds: AlertThresholds,
        clock: Arc<dyn Clock>,
        managers: Vec<Manager>,
    ) -> Self {
        let mut store = Self::new(catalog, thresholds, clock);
        store.state.managers = managers;
        let now = store.clock.now();
        store.state.alerts = store.regenerate(&store.state, now);
        store
    }

    /// Anchors the reporting window at `month` and recomputes alerts.
    pub fn at_reporting_month(mut self, month: Month) -> Self {
        self.state.reporting_month = month;
        let now = self.clock.now();
        self.state.alerts = self.regenerate(&self.state, now);
        self
    }

    /// Read access to the current state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn catalog(&self) -> &RoleCatalog {
        &self.catalog
    }

    pub fn thresholds(&self) -> &AlertThresholds {
        self.generator.thresholds()
    }

    /// Applies one command atomically.
    ///
    /// # Errors
    ///
    /// - `Validation` for malformed input (blank names, empty plans,
    ///   negative or non-finite values)
    /// - `NotFound` for references to unknown managers, pillars, KPIs,
    ///   plans, steps or alerts
    pub fn dispatch(&mut self, command: Command) -> Result<DispatchOutcome, StoreError> {
        let kind = command.kind();
        let now = self.clock.now();
        let mut next = self.state.clone();

        let event = match self.apply(&mut next, command, now) {
            Ok(event) => event,
            Err(err) => {
                warn!(command = %kind, code = %err.code(), error = %err, "command rejected");
                return Err(err);
            }
        };

        let mut alerts = AlertDelta {
            total: next.alerts.len(),
            ..AlertDelta::default()
        };
        if kind.affects_alerts() {
            let regenerated = self.regenerate(&next, now);
            alerts = delta(&next.alerts, &regenerated);
            next.alerts = regenerated;
        }

        self.state = next;
        info!(command = %kind, "command applied");
        debug!(
            raised = alerts.raised,
            cleared = alerts.cleared,
            total = alerts.total,
            "alerts recomputed"
        );

        Ok(DispatchOutcome {
            command: kind,
            event,
            alerts,
        })
    }

    fn apply(
        &self,
        state: &mut AppState,
        command: Command,
        now: Timestamp,
    ) -> Result<Option<StoreEvent>, StoreError> {
        match command {
            Command::AddManager {
                name,
                department,
                role,
            } => {
                let manager = Manager::new(name, department, role, &self.catalog)?;
                let id = *manager.id();
                state.managers.push(manager);
                Ok(Some(StoreEvent::ManagerAdded(id)))
            }
            Command::EditManager { id, patch } => {
                state.manager_mut(&id)?.apply_patch(patch, &self.catalog)?;
                Ok(None)
            }
            Command::SetSelectedManager { id } => {
                if let Some(id) = &id {
                    if state.manager(id).is_none() {
                        return Err(NotFoundError::Manager(*id).into());
                    }
                }
                state.selected_manager = id;
                Ok(None)
            }
            Command::SetView { view } => {
                state.view = view;
                Ok(None)
            }
            Command::SetTimePeriod { period } => {
                state.time_period = period;
                Ok(None)
            }
            Command::SetReportingMonth { month } => {
                state.reporting_month = month;
                Ok(None)
            }
            Command::UpdateKpiValue {
                manager_id,
                pillar_id,
                kpi_id,
                month,
                value,
            } => {
                state
                    .manager_mut(&manager_id)?
                    .record_kpi_value(&pillar_id, &kpi_id, month, value)?;
                Ok(None)
            }
            Command::CreateActionPlan {
                manager_id,
                recommendation,
                steps,
            } => {
                let plan_id = *state
                    .manager_mut(&manager_id)?
                    .create_action_plan(recommendation, steps, now)?
                    .id();
                Ok(Some(StoreEvent::ActionPlanCreated(plan_id)))
            }
            Command::CompleteActionStep {
                manager_id,
                plan_id,
                step_index,
            } => {
                let completion = state
                    .manager_mut(&manager_id)?
                    .complete_action_step(&plan_id, step_index, now)?;
                Ok(Some(StoreEvent::StepCompleted(completion)))
            }
            Command::MarkAlertRead { id } => {
                state.alert_mut(&id)?.mark_read();
                Ok(None)
            }
            Command::MarkAllAlertsRead => {
                state.alerts.iter_mut().for_each(Alert::mark_read);
                Ok(None)
            }
        }
    }

    fn regenerate(&self, state: &AppState, now: Timestamp) -> Vec<Alert> {
        self.generator
            .generate(&state.alerts, &state.managers, &state.window(), now)
    }
}

fn delta(previous: &[Alert], next: &[Alert]) -> AlertDelta {
    let before: HashSet<&AlertId> = previous.iter().map(Alert::id).collect();
    let after: HashSet<&AlertId> = next.iter().map(Alert::id).collect();
    AlertDelta {
        raised: after.difference(&before).count(),
        cleared: before.difference(&after).count(),
        total: next.len(),
    }
}
