//! Action plan error types.

use thiserror::Error;

use crate::domain::foundation::{ActionPlanId, DomainError, NotFoundError, ValidationError};

/// Errors raised by action plan lifecycle operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionPlanError {
    /// Recommendation or steps were missing.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Step index does not exist in the plan.
    #[error("Action plan {plan_id} has no step at index {index}")]
    StepNotFound { plan_id: ActionPlanId, index: usize },
}

impl ActionPlanError {
    pub fn step_not_found(plan_id: ActionPlanId, index: usize) -> Self {
        ActionPlanError::StepNotFound { plan_id, index }
    }
}

impl From<ActionPlanError> for DomainError {
    fn from(err: ActionPlanError) -> Self {
        match err {
            ActionPlanError::Validation(inner) => inner.into(),
            ActionPlanError::StepNotFound { plan_id, index } => {
                NotFoundError::ActionStep { plan_id, index }.into()
            }
        }
    }
}
