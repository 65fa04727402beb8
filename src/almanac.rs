//! Daily almanac facts and the lookups over them.
//!
//! The crate does not compute solar-term instants or lunar years itself. It
//! consumes them as [`AlmanacDay`] records from an [`AlmanacProvider`], one
//! Gregorian year at a time, and searches a merged, ascending window of them.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::chinese::{Branch, Pillar, SolarTerm};
use crate::config::MAX_LOOKBACK_YEARS;
use crate::error::ChartError;

/// One calendar day as printed by an almanac.
///
/// `lunar_year` is the year pillar the almanac assigns to the day. On a
/// Start-of-Spring onset day it must name the year that begins with that term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlmanacDay {
    pub date: NaiveDate,
    pub lunar_year: Pillar,
    /// Set only on the day a solar term begins.
    #[serde(default)]
    pub solar_term: Option<SolarTerm>,
}

impl AlmanacDay {
    pub fn new(date: NaiveDate, lunar_year: Pillar, solar_term: Option<SolarTerm>) -> Self {
        Self {
            date,
            lunar_year,
            solar_term,
        }
    }
}

/// The sectional term governing a day, as found by [`resolve_active_term`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ActiveTerm {
    pub term: SolarTerm,
    /// Branch of the month the term opens.
    pub month_branch: Branch,
    /// Window index of the term's onset day.
    pub index: usize,
    pub date: NaiveDate,
    /// Lunar year recorded on the onset day.
    pub lunar_year: Pillar,
}

/// Returns the window index of the record for `date`.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use sizhu::almanac::{AlmanacDay, locate};
/// use sizhu::ChartError;
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 7).unwrap();
/// let days = [AlmanacDay::new(date, "乙巳".parse().unwrap(), None)];
///
/// assert_eq!(Ok(0), locate(&days, date));
/// assert_eq!(
///     Err(ChartError::DateNotFound(date.succ_opt().unwrap())),
///     locate(&days, date.succ_opt().unwrap()),
/// );
/// ```
pub fn locate(days: &[AlmanacDay], date: NaiveDate) -> Result<usize, ChartError> {
    days.iter()
        .position(|day| day.date == date)
        .ok_or(ChartError::DateNotFound(date))
}

/// Scans `index, index - 1, ..., 0` for the first sectional term onset.
///
/// Mid-point terms (solstices, equinoxes and the like) are skipped.
///
/// # Panics
///
/// Panics if `index` is out of bounds, as returned only by [`locate`] on the
/// same window.
pub fn resolve_active_term(days: &[AlmanacDay], index: usize) -> Result<ActiveTerm, ChartError> {
    let start = &days[index];
    days[..=index]
        .iter()
        .enumerate()
        .rev()
        .find_map(|(i, day)| {
            let term = day.solar_term?;
            Some(ActiveTerm {
                term,
                month_branch: term.month_branch()?,
                index: i,
                date: day.date,
                lunar_year: day.lunar_year,
            })
        })
        .ok_or(ChartError::NoSectionalTermFound(start.date))
}

/// Scans `index, index - 1, ..., 0` for the most recent Start of Spring.
pub fn find_start_of_spring(days: &[AlmanacDay], index: usize) -> Option<&AlmanacDay> {
    days.get(..=index)?
        .iter()
        .rev()
        .find(|day| day.solar_term == Some(SolarTerm::StartOfSpring))
}

/// A source of almanac records, one Gregorian year per request.
#[async_trait]
pub trait AlmanacProvider: Send + Sync {
    /// Returns every day of `year` in ascending order.
    async fn fetch_year(&self, year: i32) -> anyhow::Result<Vec<AlmanacDay>>;
}

/// In-memory provider, keyed by Gregorian year.
#[derive(Debug, Clone, Default)]
pub struct StaticAlmanac {
    years: BTreeMap<i32, Vec<AlmanacDay>>,
}

impl StaticAlmanac {
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups `days` by Gregorian year, sorting each year by date.
    pub fn from_days(days: impl IntoIterator<Item = AlmanacDay>) -> Self {
        let mut almanac = Self::new();
        for day in days {
            almanac.years.entry(day.date.year()).or_default().push(day);
        }
        for days in almanac.years.values_mut() {
            days.sort_by_key(|day| day.date);
        }
        almanac
    }

    /// Replaces the records held for `year`.
    pub fn insert_year(&mut self, year: i32, days: Vec<AlmanacDay>) {
        self.years.insert(year, days);
    }
}

#[async_trait]
impl AlmanacProvider for StaticAlmanac {
    async fn fetch_year(&self, year: i32) -> anyhow::Result<Vec<AlmanacDay>> {
        self.years
            .get(&year)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no almanac data for {year}"))
    }
}

/// Fetches `year - lookback_years ..= year` concurrently and merges them in
/// ascending order.
///
/// `lookback_years` is capped at [`MAX_LOOKBACK_YEARS`]. A year the provider
/// fails to deliver contributes nothing; the caller finds out only if the
/// merged window turns out too short.
pub async fn fetch_window<P>(provider: &P, year: i32, lookback_years: u32) -> Vec<AlmanacDay>
where
    P: AlmanacProvider + ?Sized,
{
    let lookback = lookback_years.min(MAX_LOOKBACK_YEARS);
    if lookback < lookback_years {
        warn!(
            requested = lookback_years,
            max = MAX_LOOKBACK_YEARS,
            "almanac lookback capped"
        );
    }
    let first = i32::try_from(lookback).map_or(year, |l| year.saturating_sub(l));
    let years: Vec<i32> = (first..=year).collect();
    let results = join_all(years.iter().map(|&y| provider.fetch_year(y))).await;

    let mut window = Vec::new();
    for (y, result) in years.into_iter().zip(results) {
        match result {
            Ok(days) => {
                debug!(year = y, days = days.len(), "almanac year fetched");
                window.extend(days);
            }
            Err(e) => warn!(year = y, error = %e, "almanac year unavailable, continuing without it"),
        }
    }
    window
}
