use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::alerts::Alert;
use crate::domain::foundation::Score;
use crate::domain::manager::Manager;
use crate::domain::scoring::{ReportingWindow, ScoreCalculator};

/// Executive view - scores and alerts across every manager.
///
/// Managers with no scoreable data are counted but excluded from every
/// average.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutiveRollup {
    pub window: ReportingWindow,
    /// Departments keyed by name, alphabetical
    pub per_department: BTreeMap<String, DepartmentRollup>,
    /// Plain mean over every scored manager
    pub org_wide: Option<Score>,
    pub manager_count: usize,
    pub unread_alerts: usize,
    /// Most severe first, newest first within a severity
    pub top_alerts: Vec<Alert>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentRollup {
    pub average_score: Option<Score>,
    pub manager_count: usize,
    pub scored_manager_count: usize,
    pub open_action_plans: usize,
}

impl ExecutiveRollup {
    pub fn build(
        managers: &[Manager],
        alerts: &[Alert],
        window: &ReportingWindow,
        top_alerts_limit: usize,
    ) -> Self {
        let mut departments: BTreeMap<String, (Vec<Score>, usize, usize)> = BTreeMap::new();
        let mut scored = Vec::new();

        for manager in managers {
            let entry = departments
                .entry(manager.department().to_string())
                .or_default();
            entry.1 += 1;
            entry.2 += manager.open_action_plans().count();
            if let Some(score) = ScoreCalculator::overall_score(manager, window) {
                entry.0.push(score);
                scored.push(score);
            }
        }

        let per_department = departments
            .into_iter()
            .map(|(name, (scores, manager_count, open_action_plans))| {
                let rollup = DepartmentRollup {
                    average_score: mean(&scores),
                    manager_count,
                    scored_manager_count: scores.len(),
                    open_action_plans,
                };
                (name, rollup)
            })
            .collect();

        Self {
            window: *window,
            per_department,
            org_wide: mean(&scored),
            manager_count: managers.len(),
            unread_alerts: alerts.iter().filter(|a| !a.is_read()).count(),
            top_alerts: top_alerts(alerts, top_alerts_limit),
        }
    }
}

/// Alerts ordered by severity desc, then creation time desc, truncated.
///
/// Ties keep generation order.
pub fn top_alerts(alerts: &[Alert], limit: usize) -> Vec<Alert> {
    let mut sorted: Vec<Alert> = alerts.to_vec();
    sorted.sort_by(|a, b| {
        b.severity()
            .cmp(&a.severity())
            .then_with(|| b.created_at().cmp(a.created_at()))
    });
    sorted.truncate(limit);
    sorted
}

fn mean(scores: &[Score]) -> Option<Score> {
    ScoreCalculator::weighted_mean(scores.iter().map(|score| (*score, 1.0)))
}

#[cfg(test)]
#[path = "rollup_test.rs"]
mod rollup_test;
