//! Per-period run log.
//!
//! One [`PeriodRecord`] is appended for every period that reaches the
//! experts. Records are positional over the run's [`AssetUniverse`].

use agents::UpdateOutcome;
use types::{AssetUniverse, NaiveDate, Period};

/// Everything logged for a single period.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodRecord {
    pub period: Period,
    pub date: NaiveDate,
    /// Prices fed to the experts this period.
    pub prices: Vec<f64>,
    /// Expert rewards after the update (0.0 while unset).
    pub rewards: Vec<f64>,
    /// Expert buy flags after the update.
    pub buy: Vec<bool>,
    /// Agent weights before the agent updated.
    pub weights: Vec<f64>,
    /// Wealth before accrual.
    pub wealth_before: f64,
    /// Wealth after accrual (equal to `wealth_before` when skipped).
    pub wealth: f64,
    pub outcome: UpdateOutcome,
    /// Whether rewards were accrued to the portfolio.
    pub accrued: bool,
}

/// Append-only log of a run.
#[derive(Debug, Clone)]
pub struct RunHistory {
    universe: AssetUniverse,
    initial_wealth: f64,
    records: Vec<PeriodRecord>,
}

impl RunHistory {
    pub fn new(universe: AssetUniverse, initial_wealth: f64) -> Self {
        Self {
            universe,
            initial_wealth,
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: PeriodRecord) {
        self.records.push(record);
    }

    pub fn universe(&self) -> &AssetUniverse {
        &self.universe
    }

    pub fn initial_wealth(&self) -> f64 {
        self.initial_wealth
    }

    pub fn records(&self) -> &[PeriodRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|r| r.date)
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.records.iter().map(|r| r.date).collect()
    }

    /// Number of periods where rewards were accrued.
    pub fn accrued_periods(&self) -> usize {
        self.records.iter().filter(|r| r.accrued).count()
    }

    /// Initial wealth followed by end-of-period wealth for every record.
    pub fn wealth_curve(&self) -> Vec<f64> {
        std::iter::once(self.initial_wealth)
            .chain(self.records.iter().map(|r| r.wealth))
            .collect()
    }

    /// Prices divided by each asset's first logged price.
    pub fn normalized_prices(&self) -> Vec<Vec<f64>> {
        let Some(first) = self.records.first() else {
            return Vec::new();
        };
        self.records
            .iter()
            .map(|r| {
                r.prices
                    .iter()
                    .zip(&first.prices)
                    .map(|(p, base)| p / base)
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(day: &str, prices: Vec<f64>, wealth: f64) -> PeriodRecord {
        PeriodRecord {
            period: Period::ZERO,
            date: types::parse_date(day).unwrap(),
            prices,
            rewards: vec![0.0, 0.0],
            buy: vec![true, true],
            weights: vec![0.5, 0.5],
            wealth_before: wealth,
            wealth,
            outcome: UpdateOutcome::Updated,
            accrued: true,
        }
    }

    #[test]
    fn test_wealth_curve_starts_at_initial_wealth() {
        let universe = AssetUniverse::new(["A", "B"]).unwrap();
        let mut history = RunHistory::new(universe, 2.0);
        assert_eq!(history.wealth_curve(), vec![2.0]);

        history.push(record("2000-01-03", vec![10.0, 20.0], 2.5));
        history.push(record("2000-01-04", vec![15.0, 10.0], 3.0));
        assert_eq!(history.wealth_curve(), vec![2.0, 2.5, 3.0]);
        assert_eq!(history.accrued_periods(), 2);
        assert_eq!(history.first_date(), types::parse_date("2000-01-03").ok());
        assert_eq!(history.last_date(), types::parse_date("2000-01-04").ok());
    }

    #[test]
    fn test_normalized_prices() {
        let universe = AssetUniverse::new(["A", "B"]).unwrap();
        let mut history = RunHistory::new(universe, 1.0);
        assert!(history.normalized_prices().is_empty());

        history.push(record("2000-01-03", vec![10.0, 20.0], 1.0));
        history.push(record("2000-01-04", vec![15.0, 10.0], 1.0));
        assert_eq!(
            history.normalized_prices(),
            vec![vec![1.0, 1.0], vec![1.5, 0.5]]
        );
    }
}
