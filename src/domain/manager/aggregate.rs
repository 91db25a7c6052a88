//! Manager aggregate.
//!
//! A manager owns its pillars (and through them its KPIs) and its action
//! plans. Managers themselves are owned by the state store.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::{ManagerError, Pillar};
use crate::domain::action_plan::{ActionPlan, StepCompletion};
use crate::domain::catalog::{Role, RoleCatalog};
use crate::domain::foundation::{
    ActionPlanId, KpiId, ManagerId, Month, NotFoundError, PillarId, Timestamp, ValidationError,
};

/// Partial update applied by `EDIT_MANAGER`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

impl ManagerPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }
}

/// Manager aggregate.
///
/// # Invariants
///
/// - `id` never changes once created
/// - `name` and `department` are non-blank
/// - `pillars` always matches the catalog shape of `role`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manager {
    id: ManagerId,
    name: String,
    department: String,
    role: Role,
    pillars: Vec<Pillar>,
    action_plans: Vec<ActionPlan>,
}

impl Manager {
    /// Creates a manager whose pillar/KPI shape is seeded from `role`'s
    /// catalog entry, with no recorded values.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if name or department is blank
    pub fn new(
        name: impl Into<String>,
        department: impl Into<String>,
        role: Role,
        catalog: &RoleCatalog,
    ) -> Result<Self, ValidationError> {
        let name = non_blank("name", name.into())?;
        let department = non_blank("department", department.into())?;

        Ok(Self {
            id: ManagerId::new(),
            name,
            department,
            role,
            pillars: seed_pillars(role, catalog),
            action_plans: Vec::new(),
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ManagerId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn pillars(&self) -> &[Pillar] {
        &self.pillars
    }

    pub fn pillar(&self, id: &PillarId) -> Option<&Pillar> {
        self.pillars.iter().find(|pillar| pillar.id() == id)
    }

    pub fn action_plans(&self) -> &[ActionPlan] {
        &self.action_plans
    }

    pub fn action_plan(&self, id: &ActionPlanId) -> Option<&ActionPlan> {
        self.action_plans.iter().find(|plan| plan.id() == id)
    }

    /// Plans with at least one incomplete step.
    pub fn open_action_plans(&self) -> impl Iterator<Item = &ActionPlan> {
        self.action_plans.iter().filter(|plan| plan.is_open())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Applies a partial update.
    ///
    /// A role change re-seeds the pillar/KPI shape, keeping recorded values
    /// of every KPI whose identifier exists in the new shape. Nothing is
    /// modified if any field fails validation.
    pub fn apply_patch(
        &mut self,
        patch: ManagerPatch,
        catalog: &RoleCatalog,
    ) -> Result<(), ValidationError> {
        let name = patch.name.map(|n| non_blank("name", n)).transpose()?;
        let department = patch
            .department
            .map(|d| non_blank("department", d))
            .transpose()?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(department) = department {
            self.department = department;
        }
        if let Some(role) = patch.role {
            if role != self.role {
                self.change_role(role, catalog);
            }
        }
        Ok(())
    }

    fn change_role(&mut self, role: Role, catalog: &RoleCatalog) {
        let mut carried: HashMap<KpiId, BTreeMap<Month, f64>> = HashMap::new();
        for pillar in &mut self.pillars {
            for kpi in pillar.kpis_mut() {
                carried.insert(kpi.id().clone(), kpi.take_values());
            }
        }

        let mut pillars = seed_pillars(role, catalog);
        for pillar in &mut pillars {
            for kpi in pillar.kpis_mut() {
                if let Some(values) = carried.remove(kpi.id()) {
                    kpi.replace_values(values);
                }
            }
        }

        self.role = role;
        self.pillars = pillars;
    }

    /// Records a KPI value for `month`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the pillar or KPI does not exist
    /// - `Validation` if the value is not finite and non-negative
    pub fn record_kpi_value(
        &mut self,
        pillar_id: &PillarId,
        kpi_id: &KpiId,
        month: Month,
        value: f64,
    ) -> Result<(), ManagerError> {
        let manager_id = self.id;
        let pillar = self
            .pillars
            .iter_mut()
            .find(|pillar| pillar.id() == pillar_id)
            .ok_or_else(|| NotFoundError::Pillar {
                manager_id,
                pillar_id: pillar_id.clone(),
            })?;
        let kpi = pillar.kpi_mut(kpi_id).ok_or_else(|| NotFoundError::Kpi {
            pillar_id: pillar_id.clone(),
            kpi_id: kpi_id.clone(),
        })?;
        kpi.record(month, value)?;
        Ok(())
    }

    /// Creates an action plan from a recommendation and appends it.
    pub fn create_action_plan(
        &mut self,
        recommendation: impl Into<String>,
        steps: Vec<String>,
        now: Timestamp,
    ) -> Result<&ActionPlan, ManagerError> {
        let plan = ActionPlan::from_recommendation(recommendation, steps, now)?;
        self.action_plans.push(plan);
        Ok(&self.action_plans[self.action_plans.len() - 1])
    }

    /// Completes one step of one of this manager's plans.
    pub fn complete_action_step(
        &mut self,
        plan_id: &ActionPlanId,
        step_index: usize,
        now: Timestamp,
    ) -> Result<StepCompletion, ManagerError> {
        let plan = self
            .action_plans
            .iter_mut()
            .find(|plan| plan.id() == plan_id)
            .ok_or(NotFoundError::ActionPlan(*plan_id))?;
        Ok(plan.complete_step(step_index, now)?)
    }
}

fn non_blank(field: &str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(trimmed.to_string())
}

fn seed_pillars(role: Role, catalog: &RoleCatalog) -> Vec<Pillar> {
    catalog
        .pillars_for(role)
        .iter()
        .map(Pillar::from_template)
        .collect()
}
