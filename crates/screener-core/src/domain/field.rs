//! 추출 결과 타입.
//!
//! 모든 추출기는 `ExtractedField`를 반환하며 자신의 경계 밖으로 에러를 던지지 않습니다.
//! 센티널 문자열("N/A", "Error", "P/E Not Found", "Sector Not Found")은
//! 내부에서는 태그된 enum으로 다루고, 출력 경계에서만 문자열로 렌더링합니다.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 출력 셀에 표시되는 "값 없음" 센티널.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentinel {
    /// 일반 "값 없음" (`N/A`)
    NotApplicable,
    /// P/E 랜드마크를 찾지 못함 (`P/E Not Found`)
    PeNotFound,
    /// 섹터 링크를 찾지 못함 (`Sector Not Found`)
    SectorNotFound,
}

impl Sentinel {
    /// 출력 셀에 쓰이는 문자열.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotApplicable => NOT_APPLICABLE,
            Self::PeNotFound => "P/E Not Found",
            Self::SectorNotFound => "Sector Not Found",
        }
    }
}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 일반 "값 없음" 센티널 문자열.
pub const NOT_APPLICABLE: &str = "N/A";

/// 추출 실패 센티널 문자열.
pub const ERROR_SENTINEL: &str = "Error";

/// 단일 필드의 추출 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum ExtractedField {
    /// 값을 찾음 (앞뒤 공백 제거된 원문 텍스트)
    Found(String),
    /// 구조적으로 값이 없음
    NotFound(Sentinel),
    /// 추출 도중 실패 (사유 포함)
    ExtractionError(String),
}

impl ExtractedField {
    /// 텍스트를 정리하여 결과를 만듭니다. 공백뿐인 텍스트는 `NotFound`가 됩니다.
    pub fn from_text(text: &str, missing: Sentinel) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Self::NotFound(missing)
        } else {
            Self::Found(trimmed.to_string())
        }
    }

    /// 일반 `N/A` 결과.
    pub fn not_applicable() -> Self {
        Self::NotFound(Sentinel::NotApplicable)
    }

    /// 실패 결과.
    pub fn error(reason: impl Into<String>) -> Self {
        Self::ExtractionError(reason.into())
    }

    /// 값을 찾았는지 여부.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// 찾은 값을 반환합니다.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Found(v) => Some(v),
            _ => None,
        }
    }

    /// 출력 셀에 쓰일 문자열.
    pub fn render(&self) -> &str {
        match self {
            Self::Found(v) => v,
            Self::NotFound(sentinel) => sentinel.as_str(),
            Self::ExtractionError(_) => ERROR_SENTINEL,
        }
    }
}

impl fmt::Display for ExtractedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.render())
    }
}
