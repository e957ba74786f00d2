//! Performance and risk metrics over a wealth curve.

use crate::stats;

/// Summary metrics for a run's wealth curve.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PerformanceMetrics {
    /// Final over initial wealth, minus one.
    pub total_return: f64,
    /// Geometric annualized return.
    pub annualized_return: f64,
    /// Maximum peak-to-trough decline as a fraction.
    pub max_drawdown: f64,
    /// Annualized Sharpe ratio of per-period returns (zero risk-free rate).
    pub sharpe: Option<f64>,
    /// Annualized volatility of per-period returns.
    pub volatility: Option<f64>,
}

impl PerformanceMetrics {
    /// Compute all metrics from a wealth curve (one entry per period).
    ///
    /// Returns `None` for an empty curve or a non-positive starting value.
    pub fn from_wealth_curve(curve: &[f64], periods_per_year: f64) -> Option<Self> {
        let initial = *curve.first()?;
        let last = *curve.last()?;
        let returns = stats::returns(curve);

        Some(Self {
            total_return: total_return(initial, last)?,
            annualized_return: annualized_return(initial, last, curve.len(), periods_per_year)?,
            max_drawdown: max_drawdown(curve),
            sharpe: sharpe_ratio(&returns, 0.0, periods_per_year),
            volatility: annualized_volatility(&returns, periods_per_year),
        })
    }
}

/// Simple total return `final / initial - 1`.
pub fn total_return(initial: f64, last: f64) -> Option<f64> {
    if initial <= 0.0 {
        return None;
    }
    Some(last / initial - 1.0)
}

/// Geometric annualized return `(final / initial)^(periods_per_year / periods) - 1`.
pub fn annualized_return(
    initial: f64,
    last: f64,
    periods: usize,
    periods_per_year: f64,
) -> Option<f64> {
    if initial <= 0.0 || periods == 0 {
        return None;
    }
    Some((last / initial).powf(periods_per_year / periods as f64) - 1.0)
}

/// Calculate maximum drawdown from a wealth curve.
///
/// Returns the largest peak-to-trough decline as a fraction.
pub fn max_drawdown(curve: &[f64]) -> f64 {
    let Some(&first) = curve.first() else {
        return 0.0;
    };

    let mut max_dd: f64 = 0.0;
    let mut peak = first;

    for &value in curve {
        if value > peak {
            peak = value;
        }
        let dd = if peak > 0.0 {
            (peak - value) / peak
        } else {
            0.0
        };
        max_dd = max_dd.max(dd);
    }

    max_dd
}

/// Calculate Sharpe ratio from per-period returns.
///
/// # Arguments
/// * `returns` - Periodic returns
/// * `risk_free_rate` - Risk-free rate for the same period
/// * `periods_per_year` - Number of periods in a year (252 for daily)
pub fn sharpe_ratio(returns: &[f64], risk_free_rate: f64, periods_per_year: f64) -> Option<f64> {
    if returns.len() < 2 {
        return None;
    }

    let mean_return = stats::mean(returns)?;
    let std = stats::sample_std_dev(returns)?;

    if std == 0.0 {
        return None;
    }

    let excess_return = mean_return - risk_free_rate;
    Some((excess_return / std) * periods_per_year.sqrt())
}

/// Calculate annualized volatility from per-period returns.
pub fn annualized_volatility(returns: &[f64], periods_per_year: f64) -> Option<f64> {
    let std = stats::sample_std_dev(returns)?;
    Some(std * periods_per_year.sqrt())
}
