//! Action plan entity - remediation steps tracked to closure.
//!
//! Plans are append-only history: they are never deleted, and they move
//! from open to closed as their steps complete.

use serde::{Deserialize, Serialize};

use super::ActionPlanError;
use crate::domain::foundation::{ActionPlanId, Score, Timestamp, ValidationError};

/// One step of an action plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionStep {
    description: String,
    completed: bool,
    /// Set only on the transition to completed.
    completed_at: Option<Timestamp>,
}

impl ActionStep {
    /// Creates an incomplete step.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            completed: false,
            completed_at: None,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn completed_at(&self) -> Option<&Timestamp> {
        self.completed_at.as_ref()
    }
}

/// Outcome of [`ActionPlan::complete_step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepCompletion {
    /// The step transitioned to completed.
    Completed,
    /// The step was already complete; nothing changed.
    AlreadyComplete,
}

/// A remediation task list created from a recommendation.
///
/// # Invariants
///
/// - `recommendation` is non-blank
/// - `steps` is non-empty
/// - a step's `completed_at` never changes once set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPlan {
    id: ActionPlanId,
    /// Provenance, e.g. generated from a low pillar score.
    recommendation: String,
    steps: Vec<ActionStep>,
    created_at: Timestamp,
}

impl ActionPlan {
    /// Creates an open plan from a recommendation and its step descriptions.
    ///
    /// # Errors
    ///
    /// - `Validation` if the recommendation is blank, there are no steps,
    ///   or any step description is blank
    pub fn from_recommendation(
        recommendation: impl Into<String>,
        steps: Vec<String>,
        created_at: Timestamp,
    ) -> Result<Self, ActionPlanError> {
        let recommendation = recommendation.into();
        if recommendation.trim().is_empty() {
            return Err(ValidationError::empty_field("recommendation").into());
        }
        if steps.is_empty() {
            return Err(ValidationError::empty_field("steps").into());
        }
        if steps.iter().any(|step| step.trim().is_empty()) {
            return Err(ValidationError::empty_field("step").into());
        }

        Ok(Self {
            id: ActionPlanId::new(),
            recommendation: recommendation.trim().to_string(),
            steps: steps.into_iter().map(ActionStep::new).collect(),
            created_at,
        })
    }

    pub fn id(&self) -> &ActionPlanId {
        &self.id
    }

    pub fn recommendation(&self) -> &str {
        &self.recommendation
    }

    pub fn steps(&self) -> &[ActionStep] {
        &self.steps
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// True iff any step is incomplete.
    pub fn is_open(&self) -> bool {
        self.steps.iter().any(|step| !step.completed)
    }

    pub fn completed_steps(&self) -> usize {
        self.steps.iter().filter(|step| step.completed).count()
    }

    /// Share of completed steps.
    pub fn progress(&self) -> Score {
        if self.steps.is_empty() {
            return Score::ZERO;
        }
        Score::from_f64(self.completed_steps() as f64 / self.steps.len() as f64 * 100.0)
    }

    /// When the last step completed, if the plan is closed.
    pub fn closed_at(&self) -> Option<&Timestamp> {
        if self.is_open() {
            return None;
        }
        self.steps.iter().filter_map(|step| step.completed_at.as_ref()).max()
    }

    /// Marks a step complete and stamps the completion time.
    ///
    /// Completing an already-complete step is a no-op: the original
    /// timestamp is kept.
    ///
    /// # Errors
    ///
    /// - `StepNotFound` if `index` is out of range
    pub fn complete_step(
        &mut self,
        index: usize,
        now: Timestamp,
    ) -> Result<StepCompletion, ActionPlanError> {
        let plan_id = self.id;
        let step = self
            .steps
            .get_mut(index)
            .ok_or_else(|| ActionPlanError::step_not_found(plan_id, index))?;

        if step.completed {
            return Ok(StepCompletion::AlreadyComplete);
        }
        step.completed = true;
        step.completed_at = Some(now);
        Ok(StepCompletion::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> ActionPlan {
        ActionPlan::from_recommendation(
            "Improve team engagement",
            vec!["Hold skip-level 1:1s".to_string(), "Run pulse survey".to_string()],
            Timestamp::now().minus_days(10).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn new_plan_is_open_with_incomplete_steps() {
        let plan = plan();
        assert!(plan.is_open());
        assert_eq!(plan.steps().len(), 2);
        assert_eq!(plan.completed_steps(), 0);
        assert_eq!(plan.progress(), Score::ZERO);
        assert!(plan.closed_at().is_none());
    }

    #[test]
    fn blank_recommendation_is_rejected() {
        let result =
            ActionPlan::from_recommendation("  ", vec!["step".to_string()], Timestamp::now());
        assert_eq!(
            result.unwrap_err(),
            ActionPlanError::Validation(ValidationError::empty_field("recommendation"))
        );
    }

    #[test]
    fn empty_steps_are_rejected() {
        let result = ActionPlan::from_recommendation("Fix it", vec![], Timestamp::now());
        assert_eq!(
            result.unwrap_err(),
            ActionPlanError::Validation(ValidationError::empty_field("steps"))
        );
    }

    #[test]
    fn blank_step_is_rejected() {
        let result = ActionPlan::from_recommendation(
            "Fix it",
            vec!["ok".to_string(), "".to_string()],
            Timestamp::now(),
        );
        assert!(matches!(result, Err(ActionPlanError::Validation(_))));
    }

    #[test]
    fn complete_step_stamps_time() {
        let mut plan = plan();
        let now = Timestamp::now();
        assert_eq!(plan.complete_step(0, now).unwrap(), StepCompletion::Completed);
        assert_eq!(plan.steps()[0].completed_at(), Some(&now));
        assert!(plan.steps()[0].is_completed());
        assert_eq!(plan.progress().value(), 50);
    }

    #[test]
    fn complete_step_is_idempotent() {
        let mut plan = plan();
        let first = Timestamp::now();
        plan.complete_step(1, first).unwrap();
        let before = plan.clone();

        let later = first.add_days(2).unwrap();
        assert_eq!(
            plan.complete_step(1, later).unwrap(),
            StepCompletion::AlreadyComplete
        );
        assert_eq!(plan, before);
        assert_eq!(plan.steps()[1].completed_at(), Some(&first));
    }

    #[test]
    fn complete_step_out_of_range_fails() {
        let mut plan = plan();
        let id = *plan.id();
        assert_eq!(
            plan.complete_step(5, Timestamp::now()).unwrap_err(),
            ActionPlanError::step_not_found(id, 5)
        );
    }

    #[test]
    fn completing_all_steps_closes_plan() {
        let mut plan = plan();
        let first = Timestamp::now();
        let second = first.add_days(1).unwrap();
        plan.complete_step(0, first).unwrap();
        plan.complete_step(1, second).unwrap();

        assert!(!plan.is_open());
        assert_eq!(plan.progress(), Score::MAX);
        assert_eq!(plan.closed_at(), Some(&second));
    }
}
