//! Time-period aggregation of recorded KPI values.

use serde::{Deserialize, Serialize};

use crate::domain::catalog::Aggregation;
use crate::domain::foundation::{Month, TimePeriod};
use crate::domain::manager::Kpi;

/// The period granularity being viewed, anchored at a reporting month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingWindow {
    pub period: TimePeriod,
    /// Last month included in the window.
    pub as_of: Month,
}

impl ReportingWindow {
    pub fn new(period: TimePeriod, as_of: Month) -> Self {
        Self { period, as_of }
    }

    /// First month of the trailing window.
    pub fn start(&self) -> Month {
        self.as_of.window_start(self.period)
    }
}

/// Resolves the value of `kpi` applicable to `window`.
///
/// - Monthly: most recent recorded value at or before the reporting month.
/// - Quarterly / Yearly: values recorded inside the trailing window,
///   summed or averaged according to the KPI's aggregation mode.
///
/// Returns `None` when nothing was recorded in the window.
pub fn resolve_value(kpi: &Kpi, window: &ReportingWindow) -> Option<f64> {
    match window.period {
        TimePeriod::Monthly => kpi
            .values()
            .range(..=window.as_of)
            .next_back()
            .map(|(_, value)| *value),
        TimePeriod::Quarterly | TimePeriod::Yearly => {
            let in_window: Vec<f64> = kpi
                .values()
                .range(window.start()..=window.as_of)
                .map(|(_, value)| *value)
                .collect();
            if in_window.is_empty() {
                return None;
            }
            let total: f64 = in_window.iter().sum();
            match kpi.aggregation() {
                Aggregation::Sum => Some(total),
                Aggregation::Average => Some(total / in_window.len() as f64),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Role, RoleCatalog};
    use crate::domain::foundation::KpiId;

    fn month(s: &str) -> Month {
        s.parse().unwrap()
    }

    fn kpi(id: &str, values: &[(&str, f64)]) -> Kpi {
        let catalog = RoleCatalog::standard();
        let mut kpi = Kpi::from_template(
            catalog
                .kpi(Role::SalesManager, &KpiId::new(id).unwrap())
                .unwrap(),
        );
        for (m, v) in values {
            kpi.record(month(m), *v).unwrap();
        }
        kpi
    }

    fn window(period: TimePeriod, as_of: &str) -> ReportingWindow {
        ReportingWindow::new(period, month(as_of))
    }

    #[test]
    fn monthly_returns_most_recent_value() {
        let kpi = kpi(
            "employee_engagement",
            &[("2026-01", 70.0), ("2026-03", 82.0), ("2026-02", 75.0)],
        );
        assert_eq!(
            resolve_value(&kpi, &window(TimePeriod::Monthly, "2026-03")),
            Some(82.0)
        );
    }

    #[test]
    fn monthly_ignores_values_after_reporting_month() {
        let kpi = kpi("employee_engagement", &[("2026-01", 70.0), ("2026-04", 90.0)]);
        assert_eq!(
            resolve_value(&kpi, &window(TimePeriod::Monthly, "2026-03")),
            Some(70.0)
        );
    }

    #[test]
    fn quarterly_sums_countable_kpis() {
        let kpi = kpi(
            "customer_complaints",
            &[
                ("2025-12", 50.0),
                ("2026-01", 4.0),
                ("2026-02", 6.0),
                ("2026-03", 5.0),
            ],
        );
        assert_eq!(
            resolve_value(&kpi, &window(TimePeriod::Quarterly, "2026-03")),
            Some(15.0)
        );
    }

    #[test]
    fn quarterly_averages_rate_kpis() {
        let kpi = kpi(
            "employee_engagement",
            &[("2026-01", 70.0), ("2026-02", 80.0), ("2026-03", 90.0)],
        );
        assert_eq!(
            resolve_value(&kpi, &window(TimePeriod::Quarterly, "2026-03")),
            Some(80.0)
        );
    }

    #[test]
    fn yearly_window_spans_twelve_months() {
        let kpi = kpi(
            "customer_complaints",
            &[("2025-03", 100.0), ("2025-04", 2.0), ("2026-03", 3.0)],
        );
        assert_eq!(
            resolve_value(&kpi, &window(TimePeriod::Yearly, "2026-03")),
            Some(5.0)
        );
    }

    #[test]
    fn empty_window_has_no_value() {
        let kpi = kpi("customer_complaints", &[("2025-01", 4.0)]);
        assert_eq!(
            resolve_value(&kpi, &window(TimePeriod::Quarterly, "2026-03")),
            None
        );
        let empty = kpi_without_values();
        assert_eq!(resolve_value(&empty, &window(TimePeriod::Monthly, "2026-03")), None);
    }

    fn kpi_without_values() -> Kpi {
        kpi("turnover_rate", &[])
    }
}
