//! The four pillar formulas.
//!
//! Year and month pillars come from almanac facts; day and hour pillars are
//! pure arithmetic on the clock time and a [`DayAnchor`].

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::almanac::{ActiveTerm, AlmanacDay, find_start_of_spring};
use crate::chinese::{Branch, Pillar, Stem};
use crate::config::DayAnchor;

/// Whether the year pillar was read at a Start of Spring onset, or taken from
/// the active term's lunar year because the window held no Start of Spring.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YearPrecision {
    Exact,
    Approximate,
}

/// Returns the year pillar for the day at `index`.
///
/// The year turns at Start of Spring, not on January 1 or the lunar new
/// year. Without a Start of Spring in the window this falls back to the lunar
/// year recorded with `active` and reports [`YearPrecision::Approximate`].
pub fn year_pillar(
    days: &[AlmanacDay],
    index: usize,
    active: &ActiveTerm,
) -> (Pillar, YearPrecision) {
    match find_start_of_spring(days, index) {
        Some(spring) => (spring.lunar_year, YearPrecision::Exact),
        None => {
            warn!(
                term = %active.term,
                term_date = %active.date,
                "no Start of Spring in almanac window, using lunar year of active term"
            );
            (active.lunar_year, YearPrecision::Approximate)
        }
    }
}

/// Five Tigers: the stem of the 寅 month in a year with the given stem.
fn tiger_month_stem(year_stem: Stem) -> Stem {
    use Stem::*;
    match year_stem {
        Jia | Ji => Bing,
        Yi | Geng => Wu,
        Bing | Xin => Geng,
        Ding | Ren => Ren,
        Wu | Gui => Jia,
    }
}

/// Five Rats: the stem of the 子 hour on a day with the given stem.
fn rat_hour_stem(day_stem: Stem) -> Stem {
    use Stem::*;
    match day_stem {
        Jia | Ji => Jia,
        Yi | Geng => Bing,
        Bing | Xin => Wu,
        Ding | Ren => Geng,
        Wu | Gui => Ren,
    }
}

/// Returns the month pillar for a year stem and the branch of the month's
/// opening sectional term.
///
/// # Example
///
/// ```
/// use sizhu::chinese::{Branch, Stem};
/// use sizhu::pillars::month_pillar;
///
/// // First month of a 甲 or 己 year.
/// assert_eq!("丙寅", month_pillar(Stem::Jia, Branch::Yin).to_string());
/// assert_eq!("丙寅", month_pillar(Stem::Ji, Branch::Yin).to_string());
/// ```
pub fn month_pillar(year_stem: Stem, month_branch: Branch) -> Pillar {
    // 寅 opens the month cycle
    let position = (month_branch.index() as i64 - 2).rem_euclid(12);
    let stem = Stem::from_index(tiger_month_stem(year_stem).index() as i64 + position);
    Pillar::compose(stem, month_branch)
}

/// Returns the day pillar for `at`.
///
/// The day turns at 23:00, so any time from 23:00 on counts toward the
/// following calendar day.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use sizhu::config::DayAnchor;
/// use sizhu::pillars::day_pillar;
///
/// let anchor = DayAnchor::default();
/// let at = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// assert_eq!("戊午", day_pillar(at, &anchor).to_string());
/// ```
pub fn day_pillar(at: NaiveDateTime, anchor: &DayAnchor) -> Pillar {
    let shift = i64::from(at.hour() >= 23);
    let diff = at.date().signed_duration_since(anchor.date).num_days() + shift;
    anchor.pillar.offset(diff)
}

/// Clock hours `[start, end)` of each double hour but 子, which takes the
/// rest: 23:00 to 01:00 across midnight.
const DOUBLE_HOURS: [(u32, u32, Branch); 11] = [
    (1, 3, Branch::Chou),
    (3, 5, Branch::Yin),
    (5, 7, Branch::Mao),
    (7, 9, Branch::Chen),
    (9, 11, Branch::Si),
    (11, 13, Branch::Wu),
    (13, 15, Branch::Wei),
    (15, 17, Branch::Shen),
    (17, 19, Branch::You),
    (19, 21, Branch::Xu),
    (21, 23, Branch::Hai),
];

/// Returns the branch of the double hour containing clock hour `hour`.
pub fn hour_branch(hour: u32) -> Branch {
    DOUBLE_HOURS
        .iter()
        .find(|(start, end, _)| (*start..*end).contains(&hour))
        .map_or(Branch::Zi, |&(_, _, branch)| branch)
}

/// Returns the hour pillar for `at`.
///
/// `day` must be the pillar from [`day_pillar`] for the same instant: from
/// 23:00 the hour stem follows the next day's stem.
pub fn hour_pillar(at: NaiveDateTime, day: Pillar) -> Pillar {
    let branch = hour_branch(at.hour());
    let stem = Stem::from_index(rat_hour_stem(day.stem()).index() as i64 + branch.index() as i64);
    debug!(%at, day = %day, %stem, %branch, "hour pillar");
    Pillar::compose(stem, branch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::almanac::{locate, resolve_active_term};
    use crate::chinese::SolarTerm;
    use chrono::{Days, NaiveDate};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn pillar(s: &str) -> Pillar {
        s.parse().unwrap()
    }

    #[test]
    fn day_pillar_at_anchor() {
        let anchor = DayAnchor::default();
        assert_eq!(pillar("辛巳"), day_pillar(at(2026, 1, 7, 18, 0), &anchor));
        assert_eq!(pillar("辛巳"), day_pillar(at(1970, 1, 1, 0, 0), &anchor));
        assert_eq!(pillar("戊午"), day_pillar(at(2000, 1, 1, 12, 0), &anchor));
    }

    #[test]
    fn day_pillar_with_other_anchor() {
        let anchor = DayAnchor {
            date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            pillar: pillar("戊午"),
        };
        assert_eq!(pillar("辛巳"), day_pillar(at(2026, 1, 7, 18, 0), &anchor));
    }

    #[test]
    fn day_pillar_period_is_sixty() {
        let anchor = DayAnchor::default();
        for start in [at(1900, 3, 1, 8, 0), at(2024, 2, 29, 12, 0), at(2100, 12, 31, 0, 0)] {
            for step in 0..60 {
                let d = start.checked_add_days(Days::new(step)).unwrap();
                let later = d.checked_add_days(Days::new(60)).unwrap();
                assert_eq!(day_pillar(d, &anchor), day_pillar(later, &anchor), "{d}");
            }
        }
    }

    #[test]
    fn day_turns_at_23() {
        let anchor = DayAnchor::default();
        let before = day_pillar(at(2026, 1, 7, 22, 59), &anchor);
        let after = day_pillar(at(2026, 1, 7, 23, 0), &anchor);
        assert_eq!(before.offset(1), after);
        assert_eq!(pillar("壬午"), after);
        assert_eq!(day_pillar(at(2026, 1, 8, 0, 0), &anchor), after);
    }

    #[test]
    fn hour_branches() {
        let expected = [
            (0, Branch::Zi),
            (1, Branch::Chou),
            (2, Branch::Chou),
            (3, Branch::Yin),
            (10, Branch::Si),
            (12, Branch::Wu),
            (18, Branch::You),
            (22, Branch::Hai),
            (23, Branch::Zi),
        ];
        for (hour, branch) in expected {
            assert_eq!(branch, hour_branch(hour), "{hour}:00");
        }
        for hour in 0..24 {
            assert_eq!(Branch::from_index((hour as i64 + 1) / 2), hour_branch(hour));
        }
    }

    #[test]
    fn hour_pillar_uses_shifted_day_stem() {
        let anchor = DayAnchor::default();
        let t = at(2026, 1, 7, 23, 30);
        let day = day_pillar(t, &anchor);
        assert_eq!(pillar("壬午"), day);
        assert_eq!(pillar("庚子"), hour_pillar(t, day));
        // With the civil date's 辛 stem the hour would read 戊子.
        assert_ne!(hour_pillar(t, pillar("辛巳")), hour_pillar(t, day));
    }

    #[test]
    fn five_rats() {
        let t = at(2026, 1, 7, 18, 0);
        assert_eq!(pillar("丁酉"), hour_pillar(t, pillar("辛巳")));
        assert_eq!(pillar("甲子"), hour_pillar(at(2026, 1, 7, 0, 30), pillar("甲子")));
        assert_eq!(pillar("壬子"), hour_pillar(at(2026, 1, 7, 0, 30), pillar("癸亥")));
    }

    #[test]
    fn five_tigers_full_year() {
        let months: Vec<String> = (2..14)
            .map(|b| month_pillar(Stem::Jia, Branch::from_index(b)).to_string())
            .collect();
        assert_eq!(
            [
                "丙寅", "丁卯", "戊辰", "己巳", "庚午", "辛未", "壬申", "癸酉", "甲戌", "乙亥",
                "丙子", "丁丑"
            ],
            months.as_slice()
        );
        assert_eq!(pillar("己丑"), month_pillar(Stem::Yi, Branch::Chou));
        assert_eq!(pillar("甲寅"), month_pillar(Stem::Gui, Branch::Yin));
    }

    #[test]
    fn month_pillar_depends_only_on_year_stem() {
        for b in Branch::ALL {
            assert_eq!(
                month_pillar(pillar("甲辰").stem(), b),
                month_pillar(pillar("甲午").stem(), b)
            );
        }
    }

    fn almanac(spring: bool) -> Vec<AlmanacDay> {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        start
            .iter_days()
            .take(60)
            .map(|date| {
                let term = match date.format("%m-%d").to_string().as_str() {
                    "01-05" => Some(SolarTerm::MinorCold),
                    "02-03" if spring => Some(SolarTerm::StartOfSpring),
                    _ => None,
                };
                let year = if date < NaiveDate::from_ymd_opt(2025, 2, 3).unwrap() {
                    "甲辰"
                } else {
                    "乙巳"
                };
                AlmanacDay::new(date, pillar(year), term)
            })
            .collect()
    }

    #[test]
    fn year_pillar_from_start_of_spring() {
        let days = almanac(true);
        let idx = locate(&days, NaiveDate::from_ymd_opt(2025, 2, 20).unwrap()).unwrap();
        let active = resolve_active_term(&days, idx).unwrap();
        assert_eq!(SolarTerm::StartOfSpring, active.term);
        assert_eq!(
            (pillar("乙巳"), YearPrecision::Exact),
            year_pillar(&days, idx, &active)
        );
    }

    #[test]
    fn year_pillar_falls_back_to_active_term() {
        let days = almanac(false);
        let idx = locate(&days, NaiveDate::from_ymd_opt(2025, 2, 20).unwrap()).unwrap();
        let active = resolve_active_term(&days, idx).unwrap();
        assert_eq!(SolarTerm::MinorCold, active.term);
        assert_eq!(
            (pillar("甲辰"), YearPrecision::Approximate),
            year_pillar(&days, idx, &active)
        );
    }
}
