//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, periods, errors)
//! - `catalog` - Role → pillar/KPI template table
//! - `manager` - Manager aggregate with pillars, KPIs and action plans
//! - `action_plan` - Remediation plans and step lifecycle
//! - `scoring` - Pure scoring services (period aggregation, weighted scores)
//! - `alerts` - Derived alerts and identity-preserving regeneration
//! - `dashboard` - Read projections for the manager and executive views

pub mod action_plan;
pub mod alerts;
pub mod catalog;
pub mod dashboard;
pub mod foundation;
pub mod manager;
pub mod scoring;
