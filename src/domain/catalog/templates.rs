//! Pillar/KPI templates and the role catalog that owns them.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;

use super::Role;
use crate::domain::foundation::{KpiId, PillarId};

const STANDARD_ROLES_YAML: &str = include_str!("standard_roles.yaml");

static STANDARD_CATALOG: Lazy<Arc<RoleCatalog>> = Lazy::new(|| {
    Arc::new(
        RoleCatalog::from_yaml(STANDARD_ROLES_YAML)
            .expect("embedded standard role catalog must be valid"),
    )
});

/// Which way a KPI improves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreDirection {
    HigherIsBetter,
    LowerIsBetter,
}

/// How monthly values combine over a quarterly or yearly window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Countable KPIs (complaints, incidents).
    Sum,
    /// Rates and percentages.
    Average,
}

/// Static definition of a KPI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiTemplate {
    pub id: KpiId,
    pub name: String,
    #[serde(default)]
    pub unit: Option<String>,
    /// Monthly target.
    pub target: f64,
    pub weight: f64,
    pub direction: ScoreDirection,
    pub aggregation: Aggregation,
}

/// Static definition of a pillar and its KPIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PillarTemplate {
    pub id: PillarId,
    pub name: String,
    pub weight: f64,
    /// Pillar-specific risk threshold; the configured default applies when absent.
    #[serde(default)]
    pub risk_threshold: Option<u8>,
    pub kpis: Vec<KpiTemplate>,
}

/// Errors raised while loading a role catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse role catalog: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("role '{0}' is missing from the catalog")]
    MissingRole(&'static str),

    #[error("role '{0}' declares no pillars")]
    EmptyRole(&'static str),

    #[error("pillar '{pillar}' of role '{role}' declares no KPIs")]
    EmptyPillar { role: &'static str, pillar: PillarId },

    #[error("pillar '{pillar}' is declared twice for role '{role}'")]
    DuplicatePillar { role: &'static str, pillar: PillarId },

    #[error("KPI '{kpi}' is declared twice for role '{role}'")]
    DuplicateKpi { role: &'static str, kpi: KpiId },

    #[error("'{subject}' has invalid {field} {value}: must be finite and non-negative")]
    InvalidNumber {
        subject: String,
        field: &'static str,
        value: f64,
    },

    #[error("pillar '{pillar}' has risk threshold {value} above 100")]
    InvalidThreshold { pillar: PillarId, value: u8 },
}

/// Tagged-variant table: role → ordered pillar templates.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleCatalog {
    roles: HashMap<Role, Vec<PillarTemplate>>,
}

impl RoleCatalog {
    /// The catalog shipped with the crate.
    pub fn standard() -> Arc<RoleCatalog> {
        Arc::clone(&STANDARD_CATALOG)
    }

    /// Parses and validates a catalog document.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let roles: HashMap<Role, Vec<PillarTemplate>> = serde_yaml::from_str(yaml)?;
        let catalog = Self { roles };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Pillar templates for `role`, in display order.
    pub fn pillars_for(&self, role: Role) -> &[PillarTemplate] {
        self.roles.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Looks up a KPI template anywhere in `role`'s shape.
    pub fn kpi(&self, role: Role, kpi_id: &KpiId) -> Option<&KpiTemplate> {
        self.pillars_for(role)
            .iter()
            .flat_map(|pillar| pillar.kpis.iter())
            .find(|kpi| &kpi.id == kpi_id)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        for role in Role::all() {
            let key = role.key();
            let pillars = self.roles.get(role).ok_or(CatalogError::MissingRole(key))?;
            if pillars.is_empty() {
                return Err(CatalogError::EmptyRole(key));
            }

            let mut pillar_ids = HashSet::new();
            let mut kpi_ids = HashSet::new();
            for pillar in pillars {
                if !pillar_ids.insert(&pillar.id) {
                    return Err(CatalogError::DuplicatePillar {
                        role: key,
                        pillar: pillar.id.clone(),
                    });
                }
                if pillar.kpis.is_empty() {
                    return Err(CatalogError::EmptyPillar {
                        role: key,
                        pillar: pillar.id.clone(),
                    });
                }
                check_number(pillar.id.as_str(), "weight", pillar.weight)?;
                if let Some(threshold) = pillar.risk_threshold {
                    if threshold > 100 {
                        return Err(CatalogError::InvalidThreshold {
                            pillar: pillar.id.clone(),
                            value: threshold,
                        });
                    }
                }

                for kpi in &pillar.kpis {
                    if !kpi_ids.insert(&kpi.id) {
                        return Err(CatalogError::DuplicateKpi {
                            role: key,
                            kpi: kpi.id.clone(),
                        });
                    }
                    check_number(kpi.id.as_str(), "weight", kpi.weight)?;
                    check_number(kpi.id.as_str(), "target", kpi.target)?;
                }
            }
        }
        Ok(())
    }
}

fn check_number(subject: &str, field: &'static str, value: f64) -> Result<(), CatalogError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CatalogError::InvalidNumber {
            subject: subject.to_string(),
            field,
            value,
        })
    }
}
