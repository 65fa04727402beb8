//! 干支與節氣
//!
//! Note: 為方便處理諸多術語，本模塊文檔用中文。
//!
//! 天干、地支皆為循環序列，序號取模即可，[`Stem::from_index`]、[`Branch::from_index`] 接受任意整數。

use std::fmt::{self as std_fmt, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

pub mod fmt;
pub mod solar_term;

pub use solar_term::SolarTerm;

/// 天干
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Stem {
    Jia,
    Yi,
    Bing,
    Ding,
    Wu,
    Ji,
    Geng,
    Xin,
    Ren,
    Gui,
}

/// 地支
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Branch {
    Zi,
    Chou,
    Yin,
    Mao,
    Chen,
    Si,
    Wu,
    Wei,
    Shen,
    You,
    Xu,
    Hai,
}

impl Stem {
    pub const ALL: [Stem; 10] = {
        use Stem::*;
        [Jia, Yi, Bing, Ding, Wu, Ji, Geng, Xin, Ren, Gui]
    };

    /// 循環取得天干，`10` 即甲，`-1` 即癸。
    ///
    /// # 用例
    ///
    /// ```
    /// use sizhu::chinese::Stem;
    ///
    /// assert_eq!(Stem::Jia, Stem::from_index(10));
    /// assert_eq!(Stem::Gui, Stem::from_index(-1));
    /// ```
    pub fn from_index(idx: i64) -> Self {
        Self::ALL[idx.rem_euclid(10) as usize]
    }
    /// 序號 `0..=9`，甲為 0。
    pub fn index(&self) -> usize {
        *self as usize
    }
    pub fn name(&self) -> &'static str {
        fmt::STEM_NAMES[self.index()]
    }
}

impl Branch {
    pub const ALL: [Branch; 12] = {
        use Branch::*;
        [Zi, Chou, Yin, Mao, Chen, Si, Wu, Wei, Shen, You, Xu, Hai]
    };

    /// 循環取得地支，`12` 即子，`-1` 即亥。
    pub fn from_index(idx: i64) -> Self {
        Self::ALL[idx.rem_euclid(12) as usize]
    }
    /// 序號 `0..=11`，子為 0。
    pub fn index(&self) -> usize {
        *self as usize
    }
    pub fn name(&self) -> &'static str {
        fmt::BRANCH_NAMES[self.index()]
    }

    /// 地支藏干，依本氣、中氣、餘氣排列。
    ///
    /// # 用例
    ///
    /// ```
    /// use sizhu::chinese::{Branch, Stem::*};
    ///
    /// assert_eq!(&[Gui], Branch::Zi.hidden_stems());
    /// assert_eq!(&[Ji, Gui, Xin], Branch::Chou.hidden_stems());
    /// ```
    pub fn hidden_stems(&self) -> &'static [Stem] {
        use Stem::*;
        match self {
            Branch::Zi => &[Gui],
            Branch::Chou => &[Ji, Gui, Xin],
            Branch::Yin => &[Jia, Bing, Wu],
            Branch::Mao => &[Yi],
            Branch::Chen => &[Wu, Yi, Gui],
            Branch::Si => &[Bing, Geng, Wu],
            Branch::Wu => &[Ding, Ji],
            Branch::Wei => &[Ji, Ding, Yi],
            Branch::Shen => &[Geng, Ren, Wu],
            Branch::You => &[Xin],
            Branch::Xu => &[Wu, Xin, Ding],
            Branch::Hai => &[Ren, Jia],
        }
    }
}

/// 干支，即一柱。
///
/// 六十甲子中天干、地支序號奇偶必同，故一百二十種組合中僅六十種有效。本類型只能以有效組合構造。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pillar {
    stem: Stem,
    branch: Branch,
}

impl Pillar {
    /// 以干、支構造，奇偶不合則返回 `None`。
    ///
    /// # 用例
    ///
    /// ```
    /// use sizhu::chinese::{Branch, Pillar, Stem};
    ///
    /// assert!(Pillar::new(Stem::Xin, Branch::Si).is_some());
    /// assert!(Pillar::new(Stem::Jia, Branch::Chou).is_none());
    /// ```
    pub fn new(stem: Stem, branch: Branch) -> Option<Self> {
        (stem.index() % 2 == branch.index() % 2).then_some(Self { stem, branch })
    }
    /// 由已知合法的干、支序號構造，供排盤公式內部使用。
    pub(crate) fn compose(stem: Stem, branch: Branch) -> Self {
        debug_assert_eq!(stem.index() % 2, branch.index() % 2, "{stem}{branch}");
        Self { stem, branch }
    }

    /// 以干支序號構造，`1..=60` 為甲子到癸亥，其餘數值循環取模。
    pub fn from_number(num: i64) -> Self {
        let idx = num.rem_euclid(60) - 1;
        Self::compose(Stem::from_index(idx), Branch::from_index(idx))
    }
    /// 干支序號，甲子為 1，癸亥為 60。
    ///
    /// # 用例
    ///
    /// ```
    /// use sizhu::chinese::Pillar;
    ///
    /// let pillar: Pillar = "辛巳".parse().unwrap();
    /// assert_eq!(18, pillar.number());
    /// ```
    pub fn number(&self) -> u32 {
        let (s, b) = (self.stem.index() as i64, self.branch.index() as i64);
        (6 * s - 5 * b).rem_euclid(60) as u32 + 1
    }

    pub fn stem(&self) -> Stem {
        self.stem
    }
    pub fn branch(&self) -> Branch {
        self.branch
    }

    /// 沿六十甲子前進 `n` 步，`n` 可為負。
    pub fn offset(&self, n: i64) -> Self {
        let n = n.rem_euclid(60);
        Self::compose(
            Stem::from_index(self.stem.index() as i64 + n),
            Branch::from_index(self.branch.index() as i64 + n),
        )
    }
    /// 該柱地支所藏天干。
    pub fn hidden_stems(&self) -> &'static [Stem] {
        self.branch.hidden_stems()
    }
}

impl Display for Stem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std_fmt::Result {
        f.write_str(self.name())
    }
}

impl Display for Branch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std_fmt::Result {
        f.write_str(self.name())
    }
}

impl Display for Pillar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std_fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}

impl FromStr for Stem {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        fmt::STEM_NAMES
            .iter()
            .position(|&n| n == s)
            .map(|i| Self::ALL[i])
            .ok_or_else(|| ParseError::UnknownStem(s.to_owned()))
    }
}

impl FromStr for Branch {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        fmt::BRANCH_NAMES
            .iter()
            .position(|&n| n == s)
            .map(|i| Self::ALL[i])
            .ok_or_else(|| ParseError::UnknownBranch(s.to_owned()))
    }
}

impl FromStr for Pillar {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidPillar(s.to_owned());
        let mut chars = s.trim().chars();
        let (Some(stem), Some(branch), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        let stem: Stem = stem.encode_utf8(&mut [0; 4]).parse()?;
        let branch: Branch = branch.encode_utf8(&mut [0; 4]).parse()?;
        Self::new(stem, branch).ok_or_else(invalid)
    }
}

impl TryFrom<String> for Pillar {
    type Error = ParseError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Pillar> for String {
    fn from(pillar: Pillar) -> String {
        pillar.to_string()
    }
}
