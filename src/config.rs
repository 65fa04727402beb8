//! Calculator configuration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::chinese::{Branch, Pillar, Stem};

/// Upper bound on [`ChartConfig::lookback_years`]; larger values are capped.
pub const MAX_LOOKBACK_YEARS: u32 = 10;

/// A date whose day pillar is known, used as the origin for day counting.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAnchor {
    pub date: NaiveDate,
    pub pillar: Pillar,
}

impl Default for DayAnchor {
    /// 2026-01-07, a 辛巳 day.
    fn default() -> Self {
        Self {
            date: NaiveDate::from_ymd_opt(2026, 1, 7).expect("valid anchor date"),
            pillar: Pillar::compose(Stem::Xin, Branch::Si),
        }
    }
}

/// Settings for a [`ChartCalculator`](crate::ChartCalculator).
///
/// # Example
///
/// ```
/// use sizhu::ChartConfig;
///
/// let config = ChartConfig::default();
/// assert_eq!("辛巳", config.anchor.pillar.to_string());
/// assert_eq!(1, config.lookback_years);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub anchor: DayAnchor,
    /// Years fetched before the target year, at most [`MAX_LOOKBACK_YEARS`].
    /// One year reaches back past the previous Start of Spring for any date.
    pub lookback_years: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            anchor: DayAnchor::default(),
            lookback_years: 1,
        }
    }
}
