//! # Requirement Identity
//!
//! `ItemCode` is the dotted `chapter.section.item` key of a certification
//! requirement. `Chapter` is the first segment lifted into an enum.
//!
//! ## Ordering
//!
//! Codes compare segment by segment as integers. String comparison would
//! place `2.10.1` before `2.9.7`, which is not the order the certification
//! handbook lists them in.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IsmsError;

/// Total number of requirements in the certification framework.
pub const REQUIREMENT_COUNT: usize = 101;

/// Validated `chapter.section.item` identifier, e.g. `2.5.6`.
///
/// Each segment is a positive integer written without leading zeros, and
/// the chapter segment is 1, 2 or 3.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemCode {
    raw: String,
    segments: [u16; 3],
}

impl ItemCode {
    /// Parse and validate a code.
    pub fn parse(s: &str) -> Result<Self, IsmsError> {
        let invalid = || IsmsError::InvalidInput(format!("malformed item code: {s:?}"));

        let mut segments = [0u16; 3];
        let mut parts = s.split('.');
        for slot in segments.iter_mut() {
            let part = parts.next().ok_or_else(invalid)?;
            if part.is_empty()
                || part.starts_with('0')
                || !part.bytes().all(|b| b.is_ascii_digit())
            {
                return Err(invalid());
            }
            *slot = part.parse().map_err(|_| invalid())?;
        }
        if parts.next().is_some() {
            return Err(invalid());
        }
        if Chapter::from_number(segments[0]).is_none() {
            return Err(IsmsError::InvalidInput(format!(
                "item code {s:?} names chapter {}, expected 1, 2 or 3",
                segments[0]
            )));
        }

        Ok(Self {
            raw: s.to_string(),
            segments,
        })
    }

    /// The code as written, e.g. `"2.5.6"`.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The chapter this requirement belongs to.
    pub fn chapter(&self) -> Chapter {
        // parse() only admits chapters 1..=3.
        Chapter::from_number(self.segments[0]).unwrap_or(Chapter::ManagementSystem)
    }

    /// Second segment, the section number within the chapter.
    pub fn section(&self) -> u16 {
        self.segments[1]
    }

    /// Third segment, the item number within the section.
    pub fn item(&self) -> u16 {
        self.segments[2]
    }

    /// `chapter.section` prefix, e.g. `"2.5"`.
    pub fn section_prefix(&self) -> String {
        format!("{}.{}", self.segments[0], self.segments[1])
    }

    /// Human-readable name of the section, when known.
    pub fn section_name(&self) -> Option<&'static str> {
        section_name(self.chapter(), self.section())
    }
}

impl Ord for ItemCode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.segments.cmp(&other.segments)
    }
}

impl PartialOrd for ItemCode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ItemCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for ItemCode {
    type Err = IsmsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ItemCode {
    type Error = IsmsError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ItemCode> for String {
    fn from(code: ItemCode) -> Self {
        code.raw
    }
}

impl AsRef<str> for ItemCode {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

/// Top-level grouping of the certification framework.
///
/// | # | Chapter | Items |
/// |---|---------|-------|
/// | 1 | 관리체계 수립 및 운영 | 16 |
/// | 2 | 보호대책 요구사항 | 64 |
/// | 3 | 개인정보 처리 단계별 요구사항 | 21 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Chapter {
    /// Establishing and operating the management system.
    ManagementSystem,
    /// Protection measures (technical and administrative safeguards).
    ProtectionMeasures,
    /// Personal information processing lifecycle.
    PersonalInformation,
}

impl Chapter {
    /// All chapters in numeric order.
    pub fn all() -> &'static [Chapter] {
        &[
            Self::ManagementSystem,
            Self::ProtectionMeasures,
            Self::PersonalInformation,
        ]
    }

    /// Chapter number as it appears in item codes.
    pub fn number(&self) -> u8 {
        match self {
            Self::ManagementSystem => 1,
            Self::ProtectionMeasures => 2,
            Self::PersonalInformation => 3,
        }
    }

    /// Look up a chapter by its number.
    pub fn from_number(n: u16) -> Option<Self> {
        match n {
            1 => Some(Self::ManagementSystem),
            2 => Some(Self::ProtectionMeasures),
            3 => Some(Self::PersonalInformation),
            _ => None,
        }
    }

    /// Korean chapter title.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ManagementSystem => "관리체계 수립 및 운영",
            Self::ProtectionMeasures => "보호대책 요구사항",
            Self::PersonalInformation => "개인정보 처리 단계별 요구사항",
        }
    }

    /// Number of requirements the framework defines in this chapter.
    pub fn expected_count(&self) -> usize {
        match self {
            Self::ManagementSystem => 16,
            Self::ProtectionMeasures => 64,
            Self::PersonalInformation => 21,
        }
    }
}

impl fmt::Display for Chapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.name())
    }
}

impl FromStr for Chapter {
    type Err = IsmsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u16>()
            .ok()
            .and_then(Self::from_number)
            .ok_or_else(|| IsmsError::InvalidInput(format!("unknown chapter: {s:?}")))
    }
}

impl TryFrom<u8> for Chapter {
    type Error = IsmsError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Self::from_number(u16::from(n))
            .ok_or_else(|| IsmsError::InvalidInput(format!("unknown chapter: {n}")))
    }
}

impl From<Chapter> for u8 {
    fn from(chapter: Chapter) -> Self {
        chapter.number()
    }
}

/// Korean name of section `chapter.section`, or `None` for an unknown pair.
pub fn section_name(chapter: Chapter, section: u16) -> Option<&'static str> {
    let name = match (chapter, section) {
        (Chapter::ManagementSystem, 1) => "관리체계 기반 마련",
        (Chapter::ManagementSystem, 2) => "위험 관리",
        (Chapter::ManagementSystem, 3) => "관리체계 운영",
        (Chapter::ManagementSystem, 4) => "관리체계 점검 및 개선",
        (Chapter::ProtectionMeasures, 1) => "정책, 조직, 자산 관리",
        (Chapter::ProtectionMeasures, 2) => "인적 보안",
        (Chapter::ProtectionMeasures, 3) => "외부자 보안",
        (Chapter::ProtectionMeasures, 4) => "물리 보안",
        (Chapter::ProtectionMeasures, 5) => "인증 및 권한관리",
        (Chapter::ProtectionMeasures, 6) => "접근통제",
        (Chapter::ProtectionMeasures, 7) => "암호화 적용",
        (Chapter::ProtectionMeasures, 8) => "정보시스템 도입 및 개발 보안",
        (Chapter::ProtectionMeasures, 9) => "시스템 및 서비스 운영관리",
        (Chapter::ProtectionMeasures, 10) => "시스템 및 서비스 보안관리",
        (Chapter::ProtectionMeasures, 11) => "사고 예방 및 대응",
        (Chapter::ProtectionMeasures, 12) => "재해복구",
        (Chapter::PersonalInformation, 1) => "개인정보 수집 시 보호조치",
        (Chapter::PersonalInformation, 2) => "개인정보 보유 및 이용 시 보호조치",
        (Chapter::PersonalInformation, 3) => "개인정보 제공 시 보호조치",
        (Chapter::PersonalInformation, 4) => "개인정보 파기 시 보호조치",
        (Chapter::PersonalInformation, 5) => "정보주체 권리보호",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_valid_code() {
        let code = ItemCode::parse("2.10.4").unwrap();
        assert_eq!(code.as_str(), "2.10.4");
        assert_eq!(code.chapter(), Chapter::ProtectionMeasures);
        assert_eq!(code.section(), 10);
        assert_eq!(code.item(), 4);
        assert_eq!(code.section_prefix(), "2.10");
        assert_eq!(code.section_name(), Some("시스템 및 서비스 보안관리"));
    }

    #[test]
    fn parse_rejects_malformed() {
        for bad in [
            "", "1", "1.1", "1.1.1.1", "1..1", "a.b.c", "01.1.1", "1.1.0", "4.1.1", "0.1.1",
            " 1.1.1", "1.1.1 ", "-1.1.1", "1.1.+1",
        ] {
            assert!(ItemCode::parse(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn ordering_is_segment_numeric() {
        let a = ItemCode::parse("2.9.7").unwrap();
        let b = ItemCode::parse("2.10.1").unwrap();
        assert!(a < b);
        assert!("2.9.7" > "2.10.1");
    }

    #[test]
    fn serde_as_plain_string() {
        let code = ItemCode::parse("3.5.3").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"3.5.3\"");
        let parsed: ItemCode = serde_json::from_str("\"3.5.3\"").unwrap();
        assert_eq!(parsed, code);
        assert!(serde_json::from_str::<ItemCode>("\"3.5\"").is_err());
    }

    #[test]
    fn chapter_counts_sum_to_total() {
        let total: usize = Chapter::all().iter().map(Chapter::expected_count).sum();
        assert_eq!(total, REQUIREMENT_COUNT);
    }

    #[test]
    fn chapter_from_str() {
        assert_eq!("1".parse::<Chapter>().unwrap(), Chapter::ManagementSystem);
        assert_eq!(" 3 ".parse::<Chapter>().unwrap(), Chapter::PersonalInformation);
        assert!("4".parse::<Chapter>().is_err());
        assert!("two".parse::<Chapter>().is_err());
    }

    #[test]
    fn chapter_serde_as_number() {
        assert_eq!(serde_json::to_string(&Chapter::ProtectionMeasures).unwrap(), "2");
        let parsed: Vec<Chapter> = serde_yaml::from_str("[1, 3]").unwrap();
        assert_eq!(
            parsed,
            vec![Chapter::ManagementSystem, Chapter::PersonalInformation]
        );
        assert!(serde_json::from_str::<Chapter>("0").is_err());
    }

    #[test]
    fn every_chapter_has_named_sections() {
        for chapter in Chapter::all() {
            assert!(section_name(*chapter, 1).is_some());
        }
        assert!(section_name(Chapter::ManagementSystem, 5).is_none());
        assert!(section_name(Chapter::ProtectionMeasures, 13).is_none());
    }

    proptest! {
        #[test]
        fn ordering_matches_segment_tuples(
            a in (1u16..=3, 1u16..=20, 1u16..=20),
            b in (1u16..=3, 1u16..=20, 1u16..=20),
        ) {
            let ca = ItemCode::parse(&format!("{}.{}.{}", a.0, a.1, a.2)).unwrap();
            let cb = ItemCode::parse(&format!("{}.{}.{}", b.0, b.1, b.2)).unwrap();
            prop_assert_eq!(ca.cmp(&cb), a.cmp(&b));
        }
    }
}
