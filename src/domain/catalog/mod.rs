//! Catalog module - Static role → pillar/KPI configuration.
//!
//! The role of a manager decides the *shape* of its pillar/KPI tree. Shapes
//! live in a single table keyed by [`Role`] rather than in branching logic.

mod role;
mod templates;

pub use role::Role;
pub use templates::{
    Aggregation, CatalogError, KpiTemplate, PillarTemplate, RoleCatalog, ScoreDirection,
};
