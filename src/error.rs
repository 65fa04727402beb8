//! Error types for chart calculation and symbol parsing.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while assembling a chart.
///
/// Both variants mean the supplied almanac window was insufficient; the pillar
/// arithmetic itself never fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChartError {
    /// The target date has no record in the almanac window.
    #[error("No almanac record for {0}")]
    DateNotFound(NaiveDate),

    /// Scanning backward from the given date reached the start of the window
    /// without meeting a sectional solar term.
    ///
    /// Supply an earlier year of almanac data to widen the lookback.
    #[error("No sectional solar term on or before {0} in the almanac window")]
    NoSectionalTermFound(NaiveDate),
}

/// Errors from parsing symbol names supplied as text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown heavenly stem: {0:?}")]
    UnknownStem(String),

    #[error("Unknown earthly branch: {0:?}")]
    UnknownBranch(String),

    #[error("Unknown solar term: {0:?}")]
    UnknownSolarTerm(String),

    /// Not a stem followed by a branch, or a stem-branch pair of mismatched
    /// parity (e.g. 甲丑), which never occurs in the sexagenary cycle.
    #[error("Not a sexagenary pillar: {0:?}")]
    InvalidPillar(String),
}
