//! Seed documents - the initial organisation loaded at process start.
//!
//! A seed is a YAML document listing managers with their recorded KPI
//! values and any action plans already in flight. The embedded demo seed
//! is used when configuration names no file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::application::store::StateStore;
use crate::domain::alerts::AlertThresholds;
use crate::domain::catalog::{Role, RoleCatalog};
use crate::domain::foundation::{DomainError, ErrorCode, KpiId, Month, PillarId, Timestamp};
use crate::domain::manager::{Manager, ManagerError};
use crate::ports::Clock;

const DEMO_SEED: &str = include_str!("demo_seed.yaml");

/// Errors raised while loading a seed.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed seed document: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("manager '{manager}': KPI '{kpi}' is not part of the {role} shape")]
    UnknownKpi {
        manager: String,
        role: Role,
        kpi: KpiId,
    },

    #[error("manager '{manager}': {source}")]
    Manager {
        manager: String,
        #[source]
        source: ManagerError,
    },

    #[error("manager '{manager}': action plan created {days} days ago is out of range")]
    InvalidPlanAge { manager: String, days: u32 },
}

impl From<SeedError> for DomainError {
    fn from(err: SeedError) -> Self {
        let code = match &err {
            SeedError::Io { .. } | SeedError::Parse(_) => ErrorCode::InvalidSeed,
            SeedError::UnknownKpi { .. } => ErrorCode::KpiNotFound,
            SeedError::InvalidPlanAge { .. } => ErrorCode::OutOfRange,
            SeedError::Manager { source, .. } => DomainError::from(source.clone()).code,
        };
        DomainError::new(code, err.to_string())
    }
}

/// Root of a seed document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeedDocument {
    /// Month the store's reporting window is anchored at. Defaults to the
    /// clock's current month.
    #[serde(default)]
    pub reporting_month: Option<Month>,
    #[serde(default)]
    pub managers: Vec<SeedManager>,
}

/// One manager in a seed document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeedManager {
    pub name: String,
    pub department: String,
    pub role: Role,
    /// KPI id to month to value. KPI ids are unique within a role.
    #[serde(default)]
    pub kpi_values: BTreeMap<KpiId, BTreeMap<Month, f64>>,
    #[serde(default)]
    pub action_plans: Vec<SeedActionPlan>,
}

/// An action plan already in progress when the seed is loaded.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeedActionPlan {
    pub recommendation: String,
    pub steps: Vec<String>,
    /// Indices of steps that are already done.
    #[serde(default)]
    pub completed_steps: Vec<usize>,
    /// Age of the plan, relative to load time.
    #[serde(default)]
    pub created_days_ago: u32,
}

impl SeedDocument {
    /// The embedded demo organisation.
    pub fn demo() -> Result<Self, SeedError> {
        Self::from_yaml(DEMO_SEED)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, SeedError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, SeedError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    /// Reads `path` if given, otherwise the demo seed.
    pub fn load(path: Option<&Path>) -> Result<Self, SeedError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::demo(),
        }
    }

    /// Builds the managers described by this document.
    ///
    /// Each manager is shaped from its role's catalog entry before values
    /// are recorded, so the usual validation applies. Plans are back-dated
    /// by `created_days_ago`; completed steps are stamped at creation.
    pub fn into_managers(
        self,
        catalog: &RoleCatalog,
        now: Timestamp,
    ) -> Result<Vec<Manager>, SeedError> {
        self.managers
            .into_iter()
            .map(|seed| seed.into_manager(catalog, now))
            .collect()
    }

    /// Builds a store holding this document's managers, with alerts
    /// already generated.
    pub fn into_store(
        self,
        catalog: Arc<RoleCatalog>,
        thresholds: AlertThresholds,
        clock: Arc<dyn Clock>,
    ) -> Result<StateStore, SeedError> {
        let reporting_month = self.reporting_month;
        let managers = self.into_managers(&catalog, clock.now())?;
        let store = StateStore::with_managers(catalog, thresholds, clock, managers);

        Ok(match reporting_month {
            Some(month) => store.at_reporting_month(month),
            None => store,
        })
    }
}

impl SeedManager {
    fn into_manager(self, catalog: &RoleCatalog, now: Timestamp) -> Result<Manager, SeedError> {
        let name = self.name.clone();
        let wrap = |source: ManagerError| SeedError::Manager {
            manager: name.clone(),
            source,
        };

        let mut manager = Manager::new(self.name.clone(), self.department, self.role, catalog)
            .map_err(|err| wrap(err.into()))?;

        for (kpi_id, values) in self.kpi_values {
            let pillar_id = pillar_of(&manager, &kpi_id).ok_or_else(|| SeedError::UnknownKpi {
                manager: self.name.clone(),
                role: self.role,
                kpi: kpi_id.clone(),
            })?;
            for (month, value) in values {
                manager
                    .record_kpi_value(&pillar_id, &kpi_id, month, value)
                    .map_err(wrap)?;
            }
        }

        for plan in self.action_plans {
            let created_at = now
                .minus_days(i64::from(plan.created_days_ago))
                .ok_or_else(|| SeedError::InvalidPlanAge {
                    manager: self.name.clone(),
                    days: plan.created_days_ago,
                })?;
            let plan_id = *manager
                .create_action_plan(plan.recommendation, plan.steps, created_at)
                .map_err(wrap)?
                .id();
            for index in plan.completed_steps {
                manager
                    .complete_action_step(&plan_id, index, created_at)
                    .map_err(wrap)?;
            }
        }

        Ok(manager)
    }
}

fn pillar_of(manager: &Manager, kpi_id: &KpiId) -> Option<PillarId> {
    manager
        .pillars()
        .iter()
        .find(|pillar| pillar.kpi(kpi_id).is_some())
        .map(|pillar| pillar.id().clone())
}
