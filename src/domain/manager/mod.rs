//! Manager module - the manager aggregate with its pillars, KPIs and plans.

mod aggregate;
mod errors;
mod pillar;

pub use aggregate::{Manager, ManagerPatch};
pub use errors::ManagerError;
pub use pillar::{Kpi, Pillar};

pub use crate::domain::catalog::{Aggregation, ScoreDirection};
