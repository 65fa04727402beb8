//! Four Pillars (BaZi, 八字) charts from Gregorian date-times.
//!
//! A chart is four sexagenary stem-branch pairs: the year pillar turns at the
//! Start of Spring (立春), the month pillar at each sectional solar term, the
//! day pillar at 23:00, and the hour pillar every two clock hours. Solar-term
//! onsets and lunar years are not computed here; they come from daily almanac
//! records supplied by the caller, see [`almanac`].
//!
//! # Examples
//!
//! Day and hour pillars need no almanac:
//!
//! ```
//! use chrono::NaiveDate;
//! use sizhu::config::DayAnchor;
//! use sizhu::pillars::{day_pillar, hour_pillar};
//!
//! let at = NaiveDate::from_ymd_opt(2026, 1, 7).unwrap().and_hms_opt(23, 30, 0).unwrap();
//! let day = day_pillar(at, &DayAnchor::default());
//!
//! assert_eq!("壬午", day.to_string()); // 23:00 already belongs to the 8th
//! assert_eq!("庚子", hour_pillar(at, day).to_string());
//! ```
//!
//! Full charts go through [`ChartCalculator`], either with an almanac window
//! at hand ([`ChartCalculator::chart_from_days`]) or with an
//! [`AlmanacProvider`] fetched per year ([`ChartCalculator::chart`]).

pub mod almanac;
pub mod chart;
pub mod chinese;
pub mod config;
pub mod error;
pub mod pillars;

pub use almanac::{AlmanacDay, AlmanacProvider, StaticAlmanac};
pub use chart::{BaziChart, ChartCalculator, ChartRecord};
pub use chinese::{Branch, Pillar, SolarTerm, Stem};
pub use config::{ChartConfig, DayAnchor};
pub use error::{ChartError, ParseError};
pub use pillars::YearPrecision;
