//! Manager roles. A role selects the pillar/KPI shape from the catalog.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// The role of a manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SalesManager,
    OperationsManager,
    CustomerSuccessManager,
}

impl Role {
    /// Returns all roles in display order.
    pub fn all() -> &'static [Role] {
        &[
            Role::SalesManager,
            Role::OperationsManager,
            Role::CustomerSuccessManager,
        ]
    }

    /// Returns the display label for this role.
    pub fn label(&self) -> &'static str {
        match self {
            Role::SalesManager => "Sales Manager",
            Role::OperationsManager => "Operations Manager",
            Role::CustomerSuccessManager => "Customer Success Manager",
        }
    }

    /// Returns the catalog key for this role.
    pub fn key(&self) -> &'static str {
        match self {
            Role::SalesManager => "sales_manager",
            Role::OperationsManager => "operations_manager",
            Role::CustomerSuccessManager => "customer_success_manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Role::all()
            .iter()
            .copied()
            .find(|role| role.key() == wanted)
            .ok_or_else(|| ValidationError::invalid_format("role", format!("unknown role '{}'", s)))
    }
}
