//! State store error types.

use serde::Serialize;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, NotFoundError, ValidationError};
use crate::domain::manager::ManagerError;

/// A rejected command. The store state is untouched when this is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}

/// How the presentation layer should surface a rejected command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Notice {
    /// Keep the form open and show the message next to it.
    BlockingForm,
    /// Transient notification.
    Toast,
}

impl StoreError {
    pub fn code(&self) -> ErrorCode {
        match self {
            StoreError::Validation(_) => ErrorCode::ValidationFailed,
            StoreError::NotFound(err) => err.code(),
        }
    }

    pub fn notice(&self) -> Notice {
        match self {
            StoreError::Validation(_) => Notice::BlockingForm,
            StoreError::NotFound(_) => Notice::Toast,
        }
    }
}

impl From<ManagerError> for StoreError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::Validation(inner) => StoreError::Validation(inner),
            ManagerError::NotFound(inner) => StoreError::NotFound(inner),
        }
    }
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(inner) => inner.into(),
            StoreError::NotFound(inner) => inner.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ActionPlanId, ManagerId};

    #[test]
    fn validation_errors_block_the_form() {
        let err = StoreError::from(ValidationError::empty_field("name"));
        assert_eq!(err.notice(), Notice::BlockingForm);
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }

    #[test]
    fn missing_references_become_toasts() {
        let err = StoreError::from(NotFoundError::Manager(ManagerId::new()));
        assert_eq!(err.notice(), Notice::Toast);
        assert_eq!(err.code(), ErrorCode::ManagerNotFound);
    }

    #[test]
    fn manager_errors_keep_their_kind() {
        let plan_id = ActionPlanId::new();
        let err: StoreError =
            ManagerError::NotFound(NotFoundError::ActionStep { plan_id, index: 4 }).into();
        assert_eq!(err.code(), ErrorCode::ActionStepNotFound);

        let domain: DomainError = err.into();
        assert_eq!(domain.code, ErrorCode::ActionStepNotFound);
    }
}
