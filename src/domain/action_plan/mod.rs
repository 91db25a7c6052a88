//! Action Plan module - remediation plans and their step lifecycle.

mod errors;
mod plan;

pub use errors::ActionPlanError;
pub use plan::{ActionPlan, ActionStep, StepCompletion};
