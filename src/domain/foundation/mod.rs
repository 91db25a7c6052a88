//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, periods, and error types
//! that form the vocabulary of the scorecard domain.

mod errors;
mod ids;
mod period;
mod score;
mod timestamp;

pub use errors::{DomainError, ErrorCode, InsufficientData, NotFoundError, ValidationError};
pub use ids::{ActionPlanId, AlertId, KpiId, ManagerId, PillarId};
pub use period::{Month, TimePeriod};
pub use score::Score;
pub use timestamp::Timestamp;
