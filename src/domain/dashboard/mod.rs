pub mod rollup;
pub mod scorecard;

pub use rollup::{top_alerts, DepartmentRollup, ExecutiveRollup};
pub use scorecard::{ActionPlanSummary, KpiScorecard, ManagerScorecard, PillarScorecard};
