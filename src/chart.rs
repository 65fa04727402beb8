//! Chart assembly.

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::almanac::{self, AlmanacDay, AlmanacProvider};
use crate::chinese::{Pillar, SolarTerm, Stem};
use crate::config::ChartConfig;
use crate::error::ChartError;
use crate::pillars::{self, YearPrecision};

/// A Four Pillars chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaziChart {
    pub at: NaiveDateTime,
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
    /// The sectional term opening the month.
    pub solar_term: SolarTerm,
    /// Hidden stems of the year, month, day and hour branches.
    pub hidden_stems: [&'static [Stem]; 4],
    pub year_precision: YearPrecision,
}

/// The serializable form of a [`BaziChart`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartRecord {
    /// ISO 8601, `YYYY-MM-DDTHH:MM:SS`.
    pub timestamp: String,
    pub pillars: [String; 4],
    pub solar_term: String,
    /// One string per pillar, stems in table order.
    pub hidden_stems: [String; 4],
    pub year_precision: YearPrecision,
}

impl BaziChart {
    /// Year, month, day and hour pillars.
    pub fn pillars(&self) -> [Pillar; 4] {
        [self.year, self.month, self.day, self.hour]
    }

    pub fn to_record(&self) -> ChartRecord {
        ChartRecord {
            timestamp: self.at.format("%Y-%m-%dT%H:%M:%S").to_string(),
            pillars: self.pillars().map(|p| p.to_string()),
            solar_term: self.solar_term.name().to_owned(),
            hidden_stems: self
                .hidden_stems
                .map(|stems| stems.iter().map(Stem::name).collect()),
            year_precision: self.year_precision,
        }
    }
}

/// Computes charts with a fixed configuration.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use sizhu::almanac::AlmanacDay;
/// use sizhu::chinese::SolarTerm;
/// use sizhu::{ChartCalculator, YearPrecision};
///
/// let year = "乙巳".parse().unwrap();
/// let start = NaiveDate::from_ymd_opt(2025, 2, 3).unwrap();
/// let days: Vec<_> = start
///     .iter_days()
///     .take(5)
///     .enumerate()
///     .map(|(i, date)| AlmanacDay::new(date, year, (i == 0).then_some(SolarTerm::StartOfSpring)))
///     .collect();
///
/// let at = NaiveDate::from_ymd_opt(2025, 2, 5).unwrap().and_hms_opt(9, 30, 0).unwrap();
/// let chart = ChartCalculator::default().chart_from_days(at, &days).unwrap();
///
/// assert_eq!("乙巳", chart.year.to_string());
/// assert_eq!("戊寅", chart.month.to_string());
/// assert_eq!(YearPrecision::Exact, chart.year_precision);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChartCalculator {
    config: ChartConfig,
}

impl ChartCalculator {
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Computes the chart for `at` from an ascending almanac window.
    ///
    /// The window must contain the civil date of `at` and reach back to a
    /// sectional term; reaching back to a Start of Spring makes the year pillar
    /// exact.
    pub fn chart_from_days(
        &self,
        at: NaiveDateTime,
        days: &[AlmanacDay],
    ) -> Result<BaziChart, ChartError> {
        let index = almanac::locate(days, at.date())?;
        let active = almanac::resolve_active_term(days, index)?;
        let (year, year_precision) = pillars::year_pillar(days, index, &active);
        let month = pillars::month_pillar(year.stem(), active.month_branch);
        let day = pillars::day_pillar(at, &self.config.anchor);
        let hour = pillars::hour_pillar(at, day);
        debug!(%at, %year, %month, %day, %hour, term = %active.term, "chart computed");

        Ok(BaziChart {
            at,
            year,
            month,
            day,
            hour,
            solar_term: active.term,
            hidden_stems: [year, month, day, hour].map(|p| p.hidden_stems()),
            year_precision,
        })
    }

    /// Fetches the almanac window for `at` from `provider` and computes the
    /// chart.
    ///
    /// Years the provider cannot deliver are skipped; the request fails only
    /// if what remains cannot locate `at` or its sectional term.
    #[tracing::instrument(skip(self, provider))]
    pub async fn chart<P>(&self, at: NaiveDateTime, provider: &P) -> Result<BaziChart, ChartError>
    where
        P: AlmanacProvider + ?Sized,
    {
        let days = almanac::fetch_window(provider, at.year(), self.config.lookback_years).await;
        self.chart_from_days(at, &days)
    }
}
