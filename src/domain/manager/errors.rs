//! Manager-specific error types.

use thiserror::Error;

use crate::domain::action_plan::ActionPlanError;
use crate::domain::foundation::{DomainError, NotFoundError, ValidationError};

/// Errors raised while mutating a manager.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ManagerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}

impl From<ActionPlanError> for ManagerError {
    fn from(err: ActionPlanError) -> Self {
        match err {
            ActionPlanError::Validation(inner) => ManagerError::Validation(inner),
            ActionPlanError::StepNotFound { plan_id, index } => {
                ManagerError::NotFound(NotFoundError::ActionStep { plan_id, index })
            }
        }
    }
}

impl From<ManagerError> for DomainError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::Validation(inner) => inner.into(),
            ManagerError::NotFound(inner) => inner.into(),
        }
    }
}
