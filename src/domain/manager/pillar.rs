//! Pillars and KPIs owned by a manager.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::catalog::{Aggregation, KpiTemplate, PillarTemplate, ScoreDirection};
use crate::domain::foundation::{KpiId, Month, PillarId, TimePeriod, ValidationError};

/// A single measurable metric with its recorded monthly values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    id: KpiId,
    name: String,
    unit: Option<String>,
    target: f64,
    weight: f64,
    direction: ScoreDirection,
    aggregation: Aggregation,
    values: BTreeMap<Month, f64>,
}

impl Kpi {
    /// Creates a KPI with no recorded values from its template.
    pub fn from_template(template: &KpiTemplate) -> Self {
        Self {
            id: template.id.clone(),
            name: template.name.clone(),
            unit: template.unit.clone(),
            target: template.target,
            weight: template.weight,
            direction: template.direction,
            aggregation: template.aggregation,
            values: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &KpiId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    /// Monthly target.
    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn direction(&self) -> ScoreDirection {
        self.direction
    }

    pub fn aggregation(&self) -> Aggregation {
        self.aggregation
    }

    /// Recorded values keyed by month, oldest first.
    pub fn values(&self) -> &BTreeMap<Month, f64> {
        &self.values
    }

    /// Target scaled to a window of `period`.
    ///
    /// Sum-aggregated KPIs accumulate over the window, so their monthly
    /// target is multiplied by the window length.
    pub fn target_for(&self, period: TimePeriod) -> f64 {
        match self.aggregation {
            Aggregation::Sum => self.target * f64::from(period.months()),
            Aggregation::Average => self.target,
        }
    }

    /// Records (or overwrites) the value for `month`.
    ///
    /// # Errors
    ///
    /// - `InvalidValue` if `value` is negative, NaN or infinite
    pub fn record(&mut self, month: Month, value: f64) -> Result<(), ValidationError> {
        if !value.is_finite() || value < 0.0 {
            return Err(ValidationError::invalid_value("value", value));
        }
        self.values.insert(month, value);
        Ok(())
    }

    pub(crate) fn take_values(&mut self) -> BTreeMap<Month, f64> {
        std::mem::take(&mut self.values)
    }

    pub(crate) fn replace_values(&mut self, values: BTreeMap<Month, f64>) {
        self.values = values;
    }
}

/// A weighted category of KPIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pillar {
    id: PillarId,
    name: String,
    weight: f64,
    risk_threshold: Option<u8>,
    kpis: Vec<Kpi>,
}

impl Pillar {
    /// Creates a pillar and its KPIs from a template, with no recorded values.
    pub fn from_template(template: &PillarTemplate) -> Self {
        Self {
            id: template.id.clone(),
            name: template.name.clone(),
            weight: template.weight,
            risk_threshold: template.risk_threshold,
            kpis: template.kpis.iter().map(Kpi::from_template).collect(),
        }
    }

    pub fn id(&self) -> &PillarId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Pillar-specific risk threshold, if the catalog declares one.
    pub fn risk_threshold(&self) -> Option<u8> {
        self.risk_threshold
    }

    pub fn kpis(&self) -> &[Kpi] {
        &self.kpis
    }

    pub fn kpi(&self, id: &KpiId) -> Option<&Kpi> {
        self.kpis.iter().find(|kpi| &kpi.id == id)
    }

    pub fn kpi_mut(&mut self, id: &KpiId) -> Option<&mut Kpi> {
        self.kpis.iter_mut().find(|kpi| &kpi.id == id)
    }

    pub(crate) fn kpis_mut(&mut self) -> impl Iterator<Item = &mut Kpi> {
        self.kpis.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Role, RoleCatalog};

    fn month(s: &str) -> Month {
        s.parse().unwrap()
    }

    fn complaints() -> Kpi {
        let catalog = RoleCatalog::standard();
        Kpi::from_template(
            catalog
                .kpi(Role::SalesManager, &KpiId::new("customer_complaints").unwrap())
                .unwrap(),
        )
    }

    #[test]
    fn kpi_from_template_has_no_values() {
        let kpi = complaints();
        assert!(kpi.values().is_empty());
        assert_eq!(kpi.name(), "Customer Complaints");
        assert_eq!(kpi.unit(), Some("complaints"));
    }

    #[test]
    fn record_overwrites_same_month() {
        let mut kpi = complaints();
        kpi.record(month("2026-01"), 4.0).unwrap();
        kpi.record(month("2026-01"), 6.0).unwrap();
        assert_eq!(kpi.values().len(), 1);
        assert_eq!(kpi.values().get(&month("2026-01")), Some(&6.0));
    }

    #[test]
    fn record_rejects_negative_and_non_finite() {
        let mut kpi = complaints();
        assert!(kpi.record(month("2026-01"), -1.0).is_err());
        assert!(kpi.record(month("2026-01"), f64::NAN).is_err());
        assert!(kpi.record(month("2026-01"), f64::INFINITY).is_err());
        assert!(kpi.values().is_empty());
    }

    #[test]
    fn sum_target_scales_with_window() {
        let kpi = complaints();
        assert_eq!(kpi.target_for(TimePeriod::Monthly), 10.0);
        assert_eq!(kpi.target_for(TimePeriod::Quarterly), 30.0);
        assert_eq!(kpi.target_for(TimePeriod::Yearly), 120.0);
    }

    #[test]
    fn pillar_from_template_keeps_kpi_order() {
        let catalog = RoleCatalog::standard();
        let template = &catalog.pillars_for(Role::SalesManager)[0];
        let pillar = Pillar::from_template(template);
        let ids: Vec<_> = pillar.kpis().iter().map(|k| k.id().as_str()).collect();
        let expected: Vec<_> = template.kpis.iter().map(|k| k.id.as_str()).collect();
        assert_eq!(ids, expected);
        assert_eq!(pillar.risk_threshold(), Some(75));
    }
}
