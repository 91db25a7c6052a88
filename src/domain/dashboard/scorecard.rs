use serde::Serialize;

use crate::domain::catalog::{Role, ScoreDirection};
use crate::domain::foundation::{ActionPlanId, KpiId, ManagerId, PillarId, Score};
use crate::domain::manager::{Kpi, Manager, Pillar};
use crate::domain::scoring::{resolve_value, ReportingWindow, ScoreCalculator};

/// Score tree for one manager in one reporting window - the manager view.
///
/// `None` scores mean "no data" and are rendered as such, never as zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerScorecard {
    pub manager_id: ManagerId,
    pub name: String,
    pub department: String,
    pub role: Role,
    pub window: ReportingWindow,
    pub overall: Option<Score>,
    pub pillars: Vec<PillarScorecard>,
    pub action_plans: Vec<ActionPlanSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PillarScorecard {
    pub id: PillarId,
    pub name: String,
    pub weight: f64,
    pub score: Option<Score>,
    pub kpis: Vec<KpiScorecard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiScorecard {
    pub id: KpiId,
    pub name: String,
    pub unit: Option<String>,
    /// Target for the window (scaled for sum-aggregated KPIs)
    pub target: f64,
    pub direction: ScoreDirection,
    /// Window-resolved raw value
    pub value: Option<f64>,
    pub score: Option<Score>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPlanSummary {
    pub id: ActionPlanId,
    pub recommendation: String,
    pub completed_steps: usize,
    pub total_steps: usize,
    pub progress: Score,
    pub is_open: bool,
}

impl ManagerScorecard {
    pub fn build(manager: &Manager, window: &ReportingWindow) -> Self {
        Self {
            manager_id: *manager.id(),
            name: manager.name().to_string(),
            department: manager.department().to_string(),
            role: manager.role(),
            window: *window,
            overall: ScoreCalculator::overall_score(manager, window),
            pillars: manager
                .pillars()
                .iter()
                .map(|pillar| PillarScorecard::build(pillar, window))
                .collect(),
            action_plans: manager
                .action_plans()
                .iter()
                .map(|plan| ActionPlanSummary {
                    id: *plan.id(),
                    recommendation: plan.recommendation().to_string(),
                    completed_steps: plan.completed_steps(),
                    total_steps: plan.steps().len(),
                    progress: plan.progress(),
                    is_open: plan.is_open(),
                })
                .collect(),
        }
    }

    /// Pillars with a score, lowest first.
    pub fn weakest_pillars(&self) -> Vec<&PillarScorecard> {
        let mut scored: Vec<&PillarScorecard> =
            self.pillars.iter().filter(|p| p.score.is_some()).collect();
        scored.sort_by_key(|p| p.score);
        scored
    }
}

impl PillarScorecard {
    fn build(pillar: &Pillar, window: &ReportingWindow) -> Self {
        Self {
            id: pillar.id().clone(),
            name: pillar.name().to_string(),
            weight: pillar.weight(),
            score: ScoreCalculator::score_pillar(pillar, window),
            kpis: pillar
                .kpis()
                .iter()
                .map(|kpi| KpiScorecard::build(kpi, window))
                .collect(),
        }
    }
}

impl KpiScorecard {
    fn build(kpi: &Kpi, window: &ReportingWindow) -> Self {
        Self {
            id: kpi.id().clone(),
            name: kpi.name().to_string(),
            unit: kpi.unit().map(str::to_string),
            target: kpi.target_for(window.period),
            direction: kpi.direction(),
            value: resolve_value(kpi, window),
            score: ScoreCalculator::score_kpi(kpi, window),
        }
    }
}

#[cfg(test)]
#[path = "scorecard_test.rs"]
mod scorecard_test;
