//! 二十四節氣

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Branch, fmt as names};
use crate::error::ParseError;

/// 二十四節氣，序號 `1..=24` 對應立春到大寒。
///
/// 奇數序號者為「節」（立春、驚蟄……小寒），為八字月份之首，各對應一地支；偶數序號者為「中氣」（雨水、春分……大寒），排月時略過。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SolarTerm {
    StartOfSpring,
    RainWater,
    AwakeningOfInsects,
    SpringEquinox,
    PureBrightness,
    GrainRain,
    StartOfSummer,
    GrainBuds,
    GrainInEar,
    SummerSolstice,
    MinorHeat,
    MajorHeat,
    StartOfAutumn,
    EndOfHeat,
    WhiteDew,
    AutumnEquinox,
    ColdDew,
    FrostDescent,
    StartOfWinter,
    MinorSnow,
    MajorSnow,
    WinterSolstice,
    MinorCold,
    MajorCold,
}

impl SolarTerm {
    /// 全部節氣，依序號排列。
    pub const ALL: [SolarTerm; 24] = {
        use SolarTerm::*;
        [
            StartOfSpring,
            RainWater,
            AwakeningOfInsects,
            SpringEquinox,
            PureBrightness,
            GrainRain,
            StartOfSummer,
            GrainBuds,
            GrainInEar,
            SummerSolstice,
            MinorHeat,
            MajorHeat,
            StartOfAutumn,
            EndOfHeat,
            WhiteDew,
            AutumnEquinox,
            ColdDew,
            FrostDescent,
            StartOfWinter,
            MinorSnow,
            MajorSnow,
            WinterSolstice,
            MinorCold,
            MajorCold,
        ]
    };

    /// 以序號 `1..=24` 取得節氣，越界返回 `None`。
    pub fn from_number(num: u32) -> Option<Self> {
        match num {
            1..=24 => Some(Self::ALL[num as usize - 1]),
            _ => None,
        }
    }
    /// 序號，立春為 1，大寒為 24。
    pub fn number(&self) -> u32 {
        *self as u32 + 1
    }
    /// 名稱（繁體）。
    pub fn name(&self) -> &'static str {
        names::solar_term(self.number())
    }

    /// 是否為「節」。
    pub fn is_sectional(&self) -> bool {
        self.number() % 2 == 1
    }

    /// 取得以該節為首之月的月支；中氣返回 `None`。
    ///
    /// # 用例
    ///
    /// ```
    /// use sizhu::chinese::{Branch, SolarTerm};
    ///
    /// assert_eq!(Some(Branch::Yin), SolarTerm::StartOfSpring.month_branch());
    /// assert_eq!(Some(Branch::Chou), SolarTerm::MinorCold.month_branch());
    /// assert_eq!(None, SolarTerm::WinterSolstice.month_branch());
    /// ```
    pub fn month_branch(&self) -> Option<Branch> {
        use Branch::*;
        use SolarTerm::*;
        Some(match self {
            StartOfSpring => Yin,
            AwakeningOfInsects => Mao,
            PureBrightness => Chen,
            StartOfSummer => Si,
            GrainInEar => Wu,
            MinorHeat => Wei,
            StartOfAutumn => Shen,
            WhiteDew => You,
            ColdDew => Xu,
            StartOfWinter => Hai,
            MajorSnow => Zi,
            MinorCold => Chou,
            _ => return None,
        })
    }
}

impl fmt::Display for SolarTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SolarTerm {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        names::solar_term_number(s.trim())
            .and_then(Self::from_number)
            .ok_or_else(|| ParseError::UnknownSolarTerm(s.to_owned()))
    }
}

impl TryFrom<String> for SolarTerm {
    type Error = ParseError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SolarTerm> for String {
    fn from(term: SolarTerm) -> String {
        term.name().to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbering() {
        for (i, term) in SolarTerm::ALL.iter().enumerate() {
            assert_eq!(i as u32 + 1, term.number());
            assert_eq!(Some(*term), SolarTerm::from_number(term.number()));
        }
        assert_eq!(None, SolarTerm::from_number(0));
        assert_eq!(None, SolarTerm::from_number(25));
    }

    #[test]
    fn sectional_terms_map_to_every_branch_once() {
        let branches: Vec<Branch> = SolarTerm::ALL
            .iter()
            .filter_map(|t| t.month_branch())
            .collect();
        assert_eq!(12, branches.len());
        for b in Branch::ALL {
            assert!(branches.contains(&b), "{b}");
        }
        for term in SolarTerm::ALL {
            assert_eq!(term.is_sectional(), term.month_branch().is_some(), "{term}");
        }
    }

    #[test]
    fn parse() {
        assert_eq!(Ok(SolarTerm::StartOfSpring), "立春".parse());
        assert_eq!(Ok(SolarTerm::GrainRain), "穀雨".parse());
        assert_eq!(Ok(SolarTerm::GrainRain), "谷雨".parse());
        assert_eq!("穀雨", SolarTerm::GrainRain.to_string());
        assert_eq!("驚蟄", String::from(SolarTerm::AwakeningOfInsects));
        assert_eq!(
            Err(ParseError::UnknownSolarTerm("春节".into())),
            "春节".parse::<SolarTerm>()
        );
    }
}
