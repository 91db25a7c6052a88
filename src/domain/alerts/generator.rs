//! Alert Generator - derives the complete alert set from manager data.
//!
//! Generation is two steps:
//! 1. `candidates` scans managers (insertion order) and rules (fixed order)
//!    and lists every alert that should exist right now.
//! 2. `reconcile` matches candidates against the previous alerts by
//!    (manager, rule, subject), reusing id, read flag and creation time
//!    for conditions that still hold. Everything else is dropped.

use std::collections::HashMap;

use super::{Alert, AlertCandidate, AlertKey, AlertKind, AlertSubject, AlertThresholds};
use crate::domain::foundation::Timestamp;
use crate::domain::manager::Manager;
use crate::domain::scoring::{ReportingWindow, ScoreCalculator};

/// Evaluates the alert rules against configured thresholds.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlertGenerator {
    thresholds: AlertThresholds,
}

impl AlertGenerator {
    pub fn new(thresholds: AlertThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &AlertThresholds {
        &self.thresholds
    }

    /// Lists every alert whose condition currently holds.
    pub fn candidates(
        &self,
        managers: &[Manager],
        window: &ReportingWindow,
        now: Timestamp,
    ) -> Vec<AlertCandidate> {
        let mut candidates = Vec::new();
        for manager in managers {
            self.low_performance(manager, window, &mut candidates);
            self.pillar_risk(manager, window, &mut candidates);
            self.stale_action_plans(manager, now, &mut candidates);
        }
        candidates
    }

    /// Rebuilds the alert collection from candidates, preserving identity
    /// of alerts whose condition persists.
    pub fn reconcile(
        previous: &[Alert],
        candidates: Vec<AlertCandidate>,
        now: Timestamp,
    ) -> Vec<Alert> {
        let existing: HashMap<AlertKey, &Alert> =
            previous.iter().map(|alert| (alert.key(), alert)).collect();

        candidates
            .into_iter()
            .map(|candidate| match existing.get(&candidate.key) {
                Some(prev) => Alert::carry_over(prev, candidate),
                None => Alert::from_candidate(candidate, now),
            })
            .collect()
    }

    /// Candidates followed by reconciliation.
    pub fn generate(
        &self,
        previous: &[Alert],
        managers: &[Manager],
        window: &ReportingWindow,
        now: Timestamp,
    ) -> Vec<Alert> {
        Self::reconcile(previous, self.candidates(managers, window, now), now)
    }

    fn low_performance(
        &self,
        manager: &Manager,
        window: &ReportingWindow,
        out: &mut Vec<AlertCandidate>,
    ) {
        let threshold = self.thresholds.low_performance;
        let Some(score) = ScoreCalculator::overall_score(manager, window) else {
            return;
        };
        if score.is_below(threshold) {
            out.push(AlertCandidate {
                key: AlertKey {
                    manager_id: *manager.id(),
                    kind: AlertKind::LowPerformance,
                    subject: AlertSubject::Overall,
                },
                message: format!(
                    "{}'s overall score is {}, below the {} threshold",
                    manager.name(),
                    score,
                    threshold
                ),
            });
        }
    }

    fn pillar_risk(
        &self,
        manager: &Manager,
        window: &ReportingWindow,
        out: &mut Vec<AlertCandidate>,
    ) {
        for pillar in manager.pillars() {
            let threshold = pillar.risk_threshold().unwrap_or(self.thresholds.pillar_risk);
            let Some(score) = ScoreCalculator::score_pillar(pillar, window) else {
                continue;
            };
            if score.is_below(threshold) {
                out.push(AlertCandidate {
                    key: AlertKey {
                        manager_id: *manager.id(),
                        kind: AlertKind::PillarRisk,
                        subject: AlertSubject::Pillar(pillar.id().clone()),
                    },
                    message: format!(
                        "{}: {} scored {}, below its {} threshold",
                        manager.name(),
                        pillar.name(),
                        score,
                        threshold
                    ),
                });
            }
        }
    }

    fn stale_action_plans(
        &self,
        manager: &Manager,
        now: Timestamp,
        out: &mut Vec<AlertCandidate>,
    ) {
        let max_days = i64::from(self.thresholds.stale_plan_days);
        for plan in manager.open_action_plans() {
            let age_days = now.duration_since(plan.created_at()).num_days();
            if age_days > max_days {
                out.push(AlertCandidate {
                    key: AlertKey {
                        manager_id: *manager.id(),
                        kind: AlertKind::StaleActionPlan,
                        subject: AlertSubject::ActionPlan(*plan.id()),
                    },
                    message: format!(
                        "{}: action plan \"{}\" has been open for {} days ({} of {} steps done)",
                        manager.name(),
                        plan.recommendation(),
                        age_days,
                        plan.completed_steps(),
                        plan.steps().len()
                    ),
                });
            }
        }
    }
}
