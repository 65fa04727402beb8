//! 干支、節氣名稱表

/// 天干名，第 `0..=9` 項為甲到癸。
pub const STEM_NAMES: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

/// 地支名，第 `0..=11` 項為子到亥。
pub const BRANCH_NAMES: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

/// 節氣名。為便於以序號取名，第 0 項為「大寒」，其後第 `1..=23` 項為立春到冬至。
const TERM_NAMES: [&str; 24] = [
    "大寒", "立春", "雨水", "驚蟄", "春分", "清明", "穀雨", "立夏", "小滿", "芒種", "夏至",
    "小暑", "大暑", "立秋", "處暑", "白露", "秋分", "寒露", "霜降", "立冬", "小雪", "大雪",
    "冬至", "小寒",
];

/// 節氣名簡體寫法，僅供解析，排列同 [`TERM_NAMES`]。
const TERM_NAMES_SIMPLIFIED: [&str; 24] = [
    "大寒", "立春", "雨水", "惊蛰", "春分", "清明", "谷雨", "立夏", "小满", "芒种", "夏至",
    "小暑", "大暑", "立秋", "处暑", "白露", "秋分", "寒露", "霜降", "立冬", "小雪", "大雪",
    "冬至", "小寒",
];

/// 干支序號轉為文本形式，`1..=60` 分別為甲子到癸亥。
///
/// # 用例
///
/// ```
/// use sizhu::chinese;
///
/// assert_eq!("乙巳", chinese::fmt::sexagenary(42));
/// ```
pub fn sexagenary(num: u32) -> String {
    let idx = num as i64 - 1;
    STEM_NAMES[idx.rem_euclid(10) as usize].to_owned() + BRANCH_NAMES[idx.rem_euclid(12) as usize]
}

/// 節氣序號轉為名稱（繁體）。`1..=24` 分別為立春到大寒。
///
/// # 用例
///
/// ```
/// use sizhu::chinese;
///
/// assert_eq!("穀雨", chinese::fmt::solar_term(6));
/// assert_eq!("大寒", chinese::fmt::solar_term(24));
/// ```
pub fn solar_term(term: u32) -> &'static str {
    TERM_NAMES[term.rem_euclid(24) as usize]
}

/// 依名稱查節氣序號，簡繁體皆可。
pub(crate) fn solar_term_number(name: &str) -> Option<u32> {
    let pos = TERM_NAMES
        .iter()
        .position(|&n| n == name)
        .or_else(|| TERM_NAMES_SIMPLIFIED.iter().position(|&n| n == name))?;
    Some(match pos {
        0 => 24,
        p => p as u32,
    })
}
