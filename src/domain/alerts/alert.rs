//! Alert types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{ActionPlanId, AlertId, ManagerId, PillarId, Timestamp};

/// The rule that raised an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertKind {
    LowPerformance,
    PillarRisk,
    StaleActionPlan,
}

impl AlertKind {
    /// Severity assigned to alerts of this kind.
    pub fn severity(&self) -> AlertSeverity {
        match self {
            AlertKind::LowPerformance => AlertSeverity::Critical,
            AlertKind::PillarRisk => AlertSeverity::Warning,
            AlertKind::StaleActionPlan => AlertSeverity::Info,
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AlertKind::LowPerformance => "low-performance",
            AlertKind::PillarRisk => "pillar-risk",
            AlertKind::StaleActionPlan => "stale-action-plan",
        };
        f.write_str(s)
    }
}

/// Alert severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

/// What inside the manager an alert is about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "camelCase")]
pub enum AlertSubject {
    Overall,
    Pillar(PillarId),
    ActionPlan(ActionPlanId),
}

/// Identity of an alert across recomputations: (manager, rule, subject).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlertKey {
    pub manager_id: ManagerId,
    pub kind: AlertKind,
    pub subject: AlertSubject,
}

/// An alert that should exist given the current data, before identity
/// reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertCandidate {
    pub key: AlertKey,
    pub message: String,
}

/// A derived notification of a threshold breach or stale condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    id: AlertId,
    kind: AlertKind,
    severity: AlertSeverity,
    manager_id: ManagerId,
    subject: AlertSubject,
    message: String,
    is_read: bool,
    created_at: Timestamp,
}

impl Alert {
    /// Creates a fresh, unread alert from a candidate.
    pub fn from_candidate(candidate: AlertCandidate, created_at: Timestamp) -> Self {
        Self {
            id: AlertId::new(),
            kind: candidate.key.kind,
            severity: candidate.key.kind.severity(),
            manager_id: candidate.key.manager_id,
            subject: candidate.key.subject,
            message: candidate.message,
            is_read: false,
            created_at,
        }
    }

    /// Rebuilds a still-valid alert, keeping identity, read flag and
    /// creation time from `previous`.
    pub fn carry_over(previous: &Alert, candidate: AlertCandidate) -> Self {
        Self {
            id: previous.id,
            is_read: previous.is_read,
            created_at: previous.created_at,
            ..Self::from_candidate(candidate, previous.created_at)
        }
    }

    pub fn id(&self) -> &AlertId {
        &self.id
    }

    pub fn kind(&self) -> AlertKind {
        self.kind
    }

    pub fn severity(&self) -> AlertSeverity {
        self.severity
    }

    pub fn manager_id(&self) -> &ManagerId {
        &self.manager_id
    }

    pub fn subject(&self) -> &AlertSubject {
        &self.subject
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_read(&self) -> bool {
        self.is_read
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn key(&self) -> AlertKey {
        AlertKey {
            manager_id: self.manager_id,
            kind: self.kind,
            subject: self.subject.clone(),
        }
    }

    pub fn mark_read(&mut self) {
        self.is_read = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> AlertCandidate {
        AlertCandidate {
            key: AlertKey {
                manager_id: ManagerId::new(),
                kind: AlertKind::PillarRisk,
                subject: AlertSubject::Pillar(PillarId::new("customer_focus").unwrap()),
            },
            message: "Customer Focus scored 40".to_string(),
        }
    }

    #[test]
    fn severity_follows_kind() {
        assert_eq!(AlertKind::LowPerformance.severity(), AlertSeverity::Critical);
        assert_eq!(AlertKind::PillarRisk.severity(), AlertSeverity::Warning);
        assert_eq!(AlertKind::StaleActionPlan.severity(), AlertSeverity::Info);
        assert!(AlertSeverity::Critical > AlertSeverity::Warning);
        assert!(AlertSeverity::Warning > AlertSeverity::Info);
    }

    #[test]
    fn new_alert_is_unread() {
        let alert = Alert::from_candidate(candidate(), Timestamp::now());
        assert!(!alert.is_read());
        assert_eq!(alert.severity(), AlertSeverity::Warning);
    }

    #[test]
    fn carry_over_keeps_identity_and_read_flag() {
        let created = Timestamp::now().minus_days(3).unwrap();
        let mut previous = Alert::from_candidate(candidate(), created);
        previous.mark_read();

        let mut next = candidate();
        next.key = previous.key();
        next.message = "Customer Focus scored 35".to_string();
        let carried = Alert::carry_over(&previous, next);

        assert_eq!(carried.id(), previous.id());
        assert!(carried.is_read());
        assert_eq!(carried.created_at(), &created);
        assert_eq!(carried.message(), "Customer Focus scored 35");
    }

    #[test]
    fn alert_serializes_kind_in_kebab_case() {
        let alert = Alert::from_candidate(candidate(), Timestamp::now());
        let json = serde_json::to_value(&alert).unwrap();
        assert_eq!(json["kind"], "pillar-risk");
        assert_eq!(json["severity"], "warning");
        assert_eq!(json["subject"]["type"], "pillar");
        assert_eq!(json["subject"]["id"], "customer_focus");
        assert_eq!(json["isRead"], false);
    }
}
