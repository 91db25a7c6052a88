//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

use super::{ActionPlanId, AlertId, KpiId, ManagerId, PillarId};

/// Errors that occur when input to a value object or command is malformed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Field '{field}' must be a finite non-negative number, got {value}")]
    InvalidValue { field: String, value: f64 },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid numeric value error.
    pub fn invalid_value(field: impl Into<String>, value: f64) -> Self {
        ValidationError::InvalidValue {
            field: field.into(),
            value,
        }
    }

    /// Returns the name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::InvalidValue { field, .. } => field,
        }
    }
}

/// Reference to an entity that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFoundError {
    #[error("Manager not found: {0}")]
    Manager(ManagerId),

    #[error("Pillar '{pillar_id}' not found for manager {manager_id}")]
    Pillar {
        manager_id: ManagerId,
        pillar_id: PillarId,
    },

    #[error("KPI '{kpi_id}' not found in pillar '{pillar_id}'")]
    Kpi { pillar_id: PillarId, kpi_id: KpiId },

    #[error("Action plan not found: {0}")]
    ActionPlan(ActionPlanId),

    #[error("Action plan {plan_id} has no step at index {index}")]
    ActionStep { plan_id: ActionPlanId, index: usize },

    #[error("Alert not found: {0}")]
    Alert(AlertId),
}

impl NotFoundError {
    /// Returns the error code for this missing reference.
    pub fn code(&self) -> ErrorCode {
        match self {
            NotFoundError::Manager(_) => ErrorCode::ManagerNotFound,
            NotFoundError::Pillar { .. } => ErrorCode::PillarNotFound,
            NotFoundError::Kpi { .. } => ErrorCode::KpiNotFound,
            NotFoundError::ActionPlan(_) => ErrorCode::ActionPlanNotFound,
            NotFoundError::ActionStep { .. } => ErrorCode::ActionStepNotFound,
            NotFoundError::Alert(_) => ErrorCode::AlertNotFound,
        }
    }
}

/// A score could not be produced because no data resolves for the period.
///
/// Not a failure of the command that asked: callers render it as "no data".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Insufficient data to score {subject}")]
pub struct InsufficientData {
    pub subject: String,
}

impl InsufficientData {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,
    OutOfRange,
    InvalidFormat,
    InvalidValue,

    // Not found errors
    ManagerNotFound,
    PillarNotFound,
    KpiNotFound,
    ActionPlanNotFound,
    ActionStepNotFound,
    AlertNotFound,

    // Scoring
    InsufficientData,

    // Catalog / seed data
    InvalidCatalog,
    InvalidSeed,

    // AI errors
    AIProviderError,

    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::InvalidValue => "INVALID_VALUE",
            ErrorCode::ManagerNotFound => "MANAGER_NOT_FOUND",
            ErrorCode::PillarNotFound => "PILLAR_NOT_FOUND",
            ErrorCode::KpiNotFound => "KPI_NOT_FOUND",
            ErrorCode::ActionPlanNotFound => "ACTION_PLAN_NOT_FOUND",
            ErrorCode::ActionStepNotFound => "ACTION_STEP_NOT_FOUND",
            ErrorCode::AlertNotFound => "ALERT_NOT_FOUND",
            ErrorCode::InsufficientData => "INSUFFICIENT_DATA",
            ErrorCode::InvalidCatalog => "INVALID_CATALOG",
            ErrorCode::InvalidSeed => "INVALID_SEED",
            ErrorCode::AIProviderError => "AI_PROVIDER_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_detail("field", field.into())
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let code = match &err {
            ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
            ValidationError::OutOfRange { .. } => ErrorCode::OutOfRange,
            ValidationError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            ValidationError::InvalidValue { .. } => ErrorCode::InvalidValue,
        };
        let field = err.field().to_string();
        DomainError::new(code, err.to_string()).with_detail("field", field)
    }
}

impl From<NotFoundError> for DomainError {
    fn from(err: NotFoundError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

impl From<InsufficientData> for DomainError {
    fn from(err: InsufficientData) -> Self {
        DomainError::new(ErrorCode::InsufficientData, err.to_string())
            .with_detail("subject", err.subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("name");
        assert_eq!(format!("{}", err), "Field 'name' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("month", 1, 12, 13);
        assert_eq!(
            format!("{}", err),
            "Field 'month' must be between 1 and 12, got 13"
        );
    }

    #[test]
    fn validation_error_invalid_value_displays_correctly() {
        let err = ValidationError::invalid_value("value", -3.5);
        assert_eq!(
            format!("{}", err),
            "Field 'value' must be a finite non-negative number, got -3.5"
        );
    }

    #[test]
    fn not_found_maps_to_specific_code() {
        let id = ManagerId::new();
        let err = NotFoundError::Manager(id);
        assert_eq!(err.code(), ErrorCode::ManagerNotFound);
        assert_eq!(err.to_string(), format!("Manager not found: {}", id));
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::AlertNotFound, "Alert not found");
        assert_eq!(format!("{}", err), "[ALERT_NOT_FOUND] Alert not found");
    }

    #[test]
    fn domain_error_from_validation_keeps_field() {
        let err: DomainError = ValidationError::empty_field("department").into();
        assert_eq!(err.code, ErrorCode::EmptyField);
        assert_eq!(err.details.get("field"), Some(&"department".to_string()));
    }

    #[test]
    fn domain_error_from_insufficient_data_keeps_subject() {
        let err: DomainError = InsufficientData::new("manager Ada").into();
        assert_eq!(err.code, ErrorCode::InsufficientData);
        assert_eq!(err.details.get("subject"), Some(&"manager Ada".to_string()));
    }
}
