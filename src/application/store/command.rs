//! Commands accepted by the state store and the outcome of applying one.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ViewMode;
use crate::domain::action_plan::StepCompletion;
use crate::domain::catalog::Role;
use crate::domain::foundation::{
    ActionPlanId, AlertId, KpiId, ManagerId, Month, PillarId, TimePeriod,
};
use crate::domain::manager::ManagerPatch;

/// The only way to change application state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Command {
    /// Creates a manager seeded from its role's catalog. Not auto-selected.
    AddManager {
        name: String,
        department: String,
        role: Role,
    },
    EditManager {
        id: ManagerId,
        patch: ManagerPatch,
    },
    /// `None` clears the selection.
    SetSelectedManager { id: Option<ManagerId> },
    SetView { view: ViewMode },
    SetTimePeriod { period: TimePeriod },
    SetReportingMonth { month: Month },
    /// Records the value of a KPI for one calendar month.
    UpdateKpiValue {
        manager_id: ManagerId,
        pillar_id: PillarId,
        kpi_id: KpiId,
        month: Month,
        value: f64,
    },
    CreateActionPlan {
        manager_id: ManagerId,
        recommendation: String,
        steps: Vec<String>,
    },
    CompleteActionStep {
        manager_id: ManagerId,
        plan_id: ActionPlanId,
        step_index: usize,
    },
    MarkAlertRead { id: AlertId },
    MarkAllAlertsRead,
}

/// Command discriminant, used in logs and outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandKind {
    AddManager,
    EditManager,
    SetSelectedManager,
    SetView,
    SetTimePeriod,
    SetReportingMonth,
    UpdateKpiValue,
    CreateActionPlan,
    CompleteActionStep,
    MarkAlertRead,
    MarkAllAlertsRead,
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::AddManager { .. } => CommandKind::AddManager,
            Command::EditManager { .. } => CommandKind::EditManager,
            Command::SetSelectedManager { .. } => CommandKind::SetSelectedManager,
            Command::SetView { .. } => CommandKind::SetView,
            Command::SetTimePeriod { .. } => CommandKind::SetTimePeriod,
            Command::SetReportingMonth { .. } => CommandKind::SetReportingMonth,
            Command::UpdateKpiValue { .. } => CommandKind::UpdateKpiValue,
            Command::CreateActionPlan { .. } => CommandKind::CreateActionPlan,
            Command::CompleteActionStep { .. } => CommandKind::CompleteActionStep,
            Command::MarkAlertRead { .. } => CommandKind::MarkAlertRead,
            Command::MarkAllAlertsRead => CommandKind::MarkAllAlertsRead,
        }
    }
}

impl CommandKind {
    /// False for pure view-selection commands, which leave scores and
    /// alerts untouched.
    pub fn affects_alerts(&self) -> bool {
        !matches!(self, CommandKind::SetView | CommandKind::SetSelectedManager)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::AddManager => "ADD_MANAGER",
            CommandKind::EditManager => "EDIT_MANAGER",
            CommandKind::SetSelectedManager => "SET_SELECTED_MANAGER",
            CommandKind::SetView => "SET_VIEW",
            CommandKind::SetTimePeriod => "SET_TIME_PERIOD",
            CommandKind::SetReportingMonth => "SET_REPORTING_MONTH",
            CommandKind::UpdateKpiValue => "UPDATE_KPI_VALUE",
            CommandKind::CreateActionPlan => "CREATE_ACTION_PLAN",
            CommandKind::CompleteActionStep => "COMPLETE_ACTION_STEP",
            CommandKind::MarkAlertRead => "MARK_ALERT_READ",
            CommandKind::MarkAllAlertsRead => "MARK_ALL_ALERTS_READ",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something a command produced that the caller may need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum StoreEvent {
    ManagerAdded(ManagerId),
    ActionPlanCreated(ActionPlanId),
    StepCompleted(StepCompletion),
}

/// Change in the alert collection caused by one command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertDelta {
    pub raised: usize,
    pub cleared: usize,
    pub total: usize,
}

/// Result of a successful dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchOutcome {
    pub command: CommandKind,
    pub event: Option<StoreEvent>,
    pub alerts: AlertDelta,
}

impl DispatchOutcome {
    /// Id of the manager created by `AddManager`.
    pub fn added_manager(&self) -> Option<ManagerId> {
        match self.event {
            Some(StoreEvent::ManagerAdded(id)) => Some(id),
            _ => None,
        }
    }

    /// Id of the plan created by `CreateActionPlan`.
    pub fn created_plan(&self) -> Option<ActionPlanId> {
        match self.event {
            Some(StoreEvent::ActionPlanCreated(id)) => Some(id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_deserializes_from_tagged_json() {
        let json = r#"{
            "type": "ADD_MANAGER",
            "name": "Ada",
            "department": "Sales",
            "role": "sales_manager"
        }"#;
        let command: Command = serde_json::from_str(json).unwrap();
        assert_eq!(command.kind(), CommandKind::AddManager);

        let json = r#"{"type":"SET_TIME_PERIOD","period":"quarterly"}"#;
        let command: Command = serde_json::from_str(json).unwrap();
        assert_eq!(
            command,
            Command::SetTimePeriod {
                period: TimePeriod::Quarterly
            }
        );

        let json = r#"{"type":"SET_SELECTED_MANAGER","id":null}"#;
        let command: Command = serde_json::from_str(json).unwrap();
        assert_eq!(command, Command::SetSelectedManager { id: None });
    }

    #[test]
    fn view_commands_do_not_affect_alerts() {
        assert!(!CommandKind::SetView.affects_alerts());
        assert!(!CommandKind::SetSelectedManager.affects_alerts());
        assert!(CommandKind::SetTimePeriod.affects_alerts());
        assert!(CommandKind::UpdateKpiValue.affects_alerts());
        assert!(CommandKind::MarkAlertRead.affects_alerts());
    }

    #[test]
    fn kind_display_matches_wire_name() {
        assert_eq!(CommandKind::CompleteActionStep.to_string(), "COMPLETE_ACTION_STEP");
        assert_eq!(
            serde_json::to_string(&CommandKind::MarkAllAlertsRead).unwrap(),
            "\"MARK_ALL_ALERTS_READ\""
        );
    }
}
