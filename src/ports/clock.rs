//! Clock Port - Source of the current time.
//!
//! Stale-plan ageing, alert creation times and step completion stamps all
//! read "now" through this port so tests can pin it.

use crate::domain::foundation::Timestamp;

/// Provides the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
