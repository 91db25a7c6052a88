//! Score Calculator - KPI, pillar and overall manager scores.

use super::{resolve_value, ReportingWindow};
use crate::domain::catalog::ScoreDirection;
use crate::domain::foundation::{InsufficientData, Score};
use crate::domain::manager::{Kpi, Manager, Pillar};

/// Calculator for normalized performance scores.
///
/// Every function is pure and deterministic. "No data" is reported as
/// `None`, never as a zero score.
pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Normalizes a raw value against its target.
    ///
    /// # Edge Cases
    /// - Higher-is-better with target <= 0: 100
    /// - Lower-is-better with raw == 0: 100
    /// - Lower-is-better with target == 0 and raw > 0: 0
    pub fn normalize(raw: f64, target: f64, direction: ScoreDirection) -> Score {
        match direction {
            ScoreDirection::HigherIsBetter => {
                if target <= 0.0 {
                    return Score::MAX;
                }
                Score::from_f64(raw / target * 100.0)
            }
            ScoreDirection::LowerIsBetter => {
                if raw <= 0.0 {
                    return Score::MAX;
                }
                Score::from_f64(target / raw * 100.0)
            }
        }
    }

    /// Scores a KPI for the window, or `None` if no value resolves.
    pub fn score_kpi(kpi: &Kpi, window: &ReportingWindow) -> Option<Score> {
        let raw = resolve_value(kpi, window)?;
        Some(Self::normalize(raw, kpi.target_for(window.period), kpi.direction()))
    }

    /// Weighted average of the pillar's scoreable KPIs.
    pub fn score_pillar(pillar: &Pillar, window: &ReportingWindow) -> Option<Score> {
        Self::weighted_mean(
            pillar
                .kpis()
                .iter()
                .filter_map(|kpi| Self::score_kpi(kpi, window).map(|s| (s, kpi.weight()))),
        )
    }

    /// Weighted average over pillars with data.
    pub fn overall_score(manager: &Manager, window: &ReportingWindow) -> Option<Score> {
        Self::weighted_mean(
            manager
                .pillars()
                .iter()
                .filter_map(|pillar| {
                    Self::score_pillar(pillar, window).map(|s| (s, pillar.weight()))
                }),
        )
    }

    /// Like [`Self::overall_score`] but names the missing data.
    pub fn require_overall(
        manager: &Manager,
        window: &ReportingWindow,
    ) -> Result<Score, InsufficientData> {
        Self::overall_score(manager, window).ok_or_else(|| {
            InsufficientData::new(format!("manager '{}' for {}", manager.name(), window.period))
        })
    }

    /// Weighted mean of scores, rounded half-up.
    ///
    /// Weights are relative proportions. If every weight is zero the
    /// plain mean is used. Returns `None` for no input.
    pub fn weighted_mean(items: impl IntoIterator<Item = (Score, f64)>) -> Option<Score> {
        let items: Vec<(Score, f64)> = items.into_iter().collect();
        if items.is_empty() {
            return None;
        }

        let total_weight: f64 = items.iter().map(|(_, w)| w.max(0.0)).sum();
        let mean = if total_weight > 0.0 {
            items
                .iter()
                .map(|(score, w)| score.as_f64() * w.max(0.0))
                .sum::<f64>()
                / total_weight
        } else {
            items.iter().map(|(score, _)| score.as_f64()).sum::<f64>() / items.len() as f64
        };
        Some(Score::from_f64(mean))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Role, RoleCatalog};
    use crate::domain::foundation::{KpiId, Month, PillarId, TimePeriod};

    fn month(s: &str) -> Month {
        s.parse().unwrap()
    }

    fn monthly() -> ReportingWindow {
        ReportingWindow::new(TimePeriod::Monthly, month("2026-03"))
    }

    fn manager() -> Manager {
        Manager::new("Ada", "Sales", Role::SalesManager, &RoleCatalog::standard()).unwrap()
    }

    fn record(manager: &mut Manager, pillar: &str, kpi: &str, value: f64) {
        manager
            .record_kpi_value(
                &PillarId::new(pillar).unwrap(),
                &KpiId::new(kpi).unwrap(),
                month("2026-03"),
                value,
            )
            .unwrap();
    }

    #[test]
    fn higher_is_better_clamps_at_100() {
        let score = ScoreCalculator::normalize(120.0, 100.0, ScoreDirection::HigherIsBetter);
        assert_eq!(score.value(), 100);
    }

    #[test]
    fn lower_is_better_complaints_scenario() {
        let score = ScoreCalculator::normalize(20.0, 10.0, ScoreDirection::LowerIsBetter);
        assert_eq!(score.value(), 50);
    }

    #[test]
    fn lower_is_better_zero_raw_is_perfect() {
        assert_eq!(
            ScoreCalculator::normalize(0.0, 10.0, ScoreDirection::LowerIsBetter),
            Score::MAX
        );
        assert_eq!(
            ScoreCalculator::normalize(3.0, 0.0, ScoreDirection::LowerIsBetter),
            Score::ZERO
        );
    }

    #[test]
    fn higher_is_better_zero_target_is_perfect() {
        assert_eq!(
            ScoreCalculator::normalize(0.0, 0.0, ScoreDirection::HigherIsBetter),
            Score::MAX
        );
    }

    #[test]
    fn normalize_rounds_half_up() {
        // 2/3 * 100 = 66.67
        assert_eq!(
            ScoreCalculator::normalize(2.0, 3.0, ScoreDirection::HigherIsBetter).value(),
            67
        );
        // 1/8 * 100 = 12.5
        assert_eq!(
            ScoreCalculator::normalize(1.0, 8.0, ScoreDirection::HigherIsBetter).value(),
            13
        );
    }

    #[test]
    fn weighted_mean_uses_relative_weights() {
        let score =
            ScoreCalculator::weighted_mean(vec![(Score::new(100), 3.0), (Score::new(60), 1.0)]);
        assert_eq!(score, Some(Score::new(90)));
    }

    #[test]
    fn weighted_mean_falls_back_to_plain_mean_for_zero_weights() {
        let score =
            ScoreCalculator::weighted_mean(vec![(Score::new(80), 0.0), (Score::new(40), 0.0)]);
        assert_eq!(score, Some(Score::new(60)));
        assert_eq!(ScoreCalculator::weighted_mean(Vec::new()), None);
    }

    #[test]
    fn pillar_without_data_has_no_score() {
        let manager = manager();
        for pillar in manager.pillars() {
            assert_eq!(ScoreCalculator::score_pillar(pillar, &monthly()), None);
        }
        assert_eq!(ScoreCalculator::overall_score(&manager, &monthly()), None);
        assert!(ScoreCalculator::require_overall(&manager, &monthly()).is_err());
    }

    #[test]
    fn pillar_score_only_counts_kpis_with_data() {
        let mut manager = manager();
        // engagement 60/80 = 75; other people KPIs unrecorded
        record(&mut manager, "people_leadership", "employee_engagement", 60.0);
        let pillar = manager
            .pillar(&PillarId::new("people_leadership").unwrap())
            .unwrap();
        assert_eq!(ScoreCalculator::score_pillar(pillar, &monthly()), Some(Score::new(75)));
    }

    #[test]
    fn overall_excludes_pillars_without_data() {
        let mut manager = manager();
        // people: engagement 80/80 = 100 (w40), turnover 5/10*100 = 50 (w30)
        // => (100*40 + 50*30) / 70 = 78.57 -> 79
        record(&mut manager, "people_leadership", "employee_engagement", 80.0);
        record(&mut manager, "people_leadership", "turnover_rate", 10.0);
        // customer focus: complaints 20 vs 10 -> 50
        record(&mut manager, "customer_focus", "customer_complaints", 20.0);

        // overall: (79*30 + 50*25) / 55 = 65.82 -> 66
        assert_eq!(
            ScoreCalculator::overall_score(&manager, &monthly()),
            Some(Score::new(66))
        );
        assert_eq!(
            ScoreCalculator::require_overall(&manager, &monthly()).unwrap(),
            Score::new(66)
        );
    }

    #[test]
    fn quarterly_sum_kpi_compares_against_scaled_target() {
        let mut manager = manager();
        for (m, v) in [("2026-01", 10.0), ("2026-02", 10.0), ("2026-03", 10.0)] {
            manager
                .record_kpi_value(
                    &PillarId::new("customer_focus").unwrap(),
                    &KpiId::new("customer_complaints").unwrap(),
                    month(m),
                    v,
                )
                .unwrap();
        }
        let pillar = manager
            .pillar(&PillarId::new("customer_focus").unwrap())
            .unwrap();
        let quarterly = ReportingWindow::new(TimePeriod::Quarterly, month("2026-03"));
        assert_eq!(ScoreCalculator::score_pillar(pillar, &quarterly), Some(Score::MAX));
    }
}
