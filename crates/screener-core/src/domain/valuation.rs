//! 밸류에이션 신호 - 과거 중앙값 P/E 대비 할인/프리미엄.
//!
//! 현재 P/E와 과거 중앙값 P/E 두 문자열로부터
//! `((stockPE - medianPE) / medianPE) × 100` 을 계산하고 5단계 색상 버킷으로 분류합니다.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::field::{ExtractedField, ERROR_SENTINEL, NOT_APPLICABLE};

/// 할인/프리미엄 시각화 버킷.
///
/// # 분류 기준 (위에서부터 평가, 첫 일치 적용)
///
/// - **DarkGreen**: value ≤ -40
/// - **LightGreen**: -40 < value ≤ -20
/// - **Yellow**: -20 < value < 0
/// - **Red**: value > 50
/// - **Brown**: 그 외 (0 ≤ value ≤ 50)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColorBucket {
    /// 큰 할인
    DarkGreen,
    /// 할인
    LightGreen,
    /// 소폭 할인
    Yellow,
    /// 적정 ~ 프리미엄
    Brown,
    /// 큰 프리미엄
    Red,
}

impl ColorBucket {
    /// 할인/프리미엄 값(%)을 버킷으로 분류합니다.
    pub fn classify(value: Decimal) -> Self {
        if value <= dec!(-40) {
            Self::DarkGreen
        } else if value <= dec!(-20) {
            Self::LightGreen
        } else if value < Decimal::ZERO {
            Self::Yellow
        } else if value > dec!(50) {
            Self::Red
        } else {
            Self::Brown
        }
    }

    /// 셀 배경색 (RGB hex)
    pub fn hex(self) -> u32 {
        match self {
            Self::DarkGreen => 0x006400,
            Self::LightGreen => 0x90EE90,
            Self::Yellow => 0xFFFF00,
            Self::Brown => 0xA52A2A,
            Self::Red => 0xFF0000,
        }
    }

    /// 모든 버킷 (분류 순서)
    pub fn all() -> [Self; 5] {
        [
            Self::DarkGreen,
            Self::LightGreen,
            Self::Yellow,
            Self::Brown,
            Self::Red,
        ]
    }
}

impl fmt::Display for ColorBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::DarkGreen => "DARK_GREEN",
            Self::LightGreen => "LIGHT_GREEN",
            Self::Yellow => "YELLOW",
            Self::Brown => "BROWN",
            Self::Red => "RED",
        };
        write!(f, "{}", s)
    }
}

/// 과거 중앙값 P/E 대비 할인(-)/프리미엄(+) 비율.
///
/// 값은 항상 소수점 둘째 자리로 반올림되어 있으며,
/// 표시 문자열과 버킷 분류가 같은 값을 사용합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct DiscountPremium {
    value: Percentage,
}

/// 반올림된 퍼센트 값.
///
/// `Decimal` 범위(약 ±7.9e28, 소수 28자리)를 벗어나는 입력은 `f64`로 계산합니다.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Percentage {
    Exact(Decimal),
    /// 항상 유한값
    Approx(f64),
}

// Approx는 생성 시 유한값만 허용하므로 NaN이 없음
impl Eq for Percentage {}

impl DiscountPremium {
    /// 두 추출 결과로부터 할인/프리미엄을 계산합니다.
    ///
    /// 두 값이 모두 `Found`이고 유한한 숫자로 파싱될 때만 `Some`을 반환합니다.
    /// 중앙값이 0이면 계산하지 않습니다.
    pub fn compute(stock_pe: &ExtractedField, median_pe: &ExtractedField) -> Option<Self> {
        let stock = eligible(stock_pe)?;
        let median = eligible(median_pe)?;

        compute_decimal(stock, median).or_else(|| compute_float(stock, median))
    }

    /// 퍼센트 값으로부터 생성 (소수점 둘째 자리 반올림).
    pub fn from_percentage(pct: Decimal) -> Self {
        let mut value = pct.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        value.rescale(2);
        if value.is_zero() {
            value.set_sign_positive(true);
        }
        Self {
            value: Percentage::Exact(value),
        }
    }

    /// `f64` 퍼센트 값으로부터 생성. 유한값이 아니면 `None`.
    pub fn from_float_percentage(pct: f64) -> Option<Self> {
        // 2^52 이상은 이미 정수이므로 반올림하지 않음
        let rounded = if pct.abs() < 1e15 {
            (pct * 100.0).round() / 100.0
        } else {
            pct
        };
        if !rounded.is_finite() {
            return None;
        }
        // -0.0 정규화
        let rounded = if rounded == 0.0 { 0.0 } else { rounded };
        Some(Self {
            value: Percentage::Approx(rounded),
        })
    }

    /// 퍼센트 값. `Decimal` 범위를 벗어난 값이면 `None`.
    pub fn value(&self) -> Option<Decimal> {
        match self.value {
            Percentage::Exact(d) => Some(d),
            Percentage::Approx(f) => Decimal::from_f64(f),
        }
    }

    /// 색상 버킷
    pub fn bucket(&self) -> ColorBucket {
        match self.value {
            Percentage::Exact(d) => ColorBucket::classify(d),
            Percentage::Approx(f) => match Decimal::from_f64(f) {
                Some(d) => ColorBucket::classify(d),
                None if f < 0.0 => ColorBucket::DarkGreen,
                None => ColorBucket::Red,
            },
        }
    }
}

impl fmt::Display for DiscountPremium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Percentage::Exact(d) => write!(f, "{}%", d),
            Percentage::Approx(v) => write!(f, "{:.2}%", v),
        }
    }
}

impl From<DiscountPremium> for String {
    fn from(signal: DiscountPremium) -> Self {
        signal.to_string()
    }
}

fn compute_decimal(stock: &str, median: &str) -> Option<DiscountPremium> {
    let stock = parse_ratio(stock)?;
    let median = parse_ratio(median)?;

    let pct = stock
        .checked_sub(median)?
        .checked_div(median)?
        .checked_mul(dec!(100))?;

    Some(DiscountPremium::from_percentage(pct))
}

fn compute_float(stock: &str, median: &str) -> Option<DiscountPremium> {
    let stock = parse_ratio_f64(stock)?;
    let median = parse_ratio_f64(median)?;
    if median == 0.0 {
        return None;
    }

    DiscountPremium::from_float_percentage((stock - median) / median * 100.0)
}

/// 계산 대상 값인지 확인합니다. `Found`이면서 센티널 문자열이 아니어야 합니다.
fn eligible(field: &ExtractedField) -> Option<&str> {
    field
        .value()
        .filter(|v| *v != ERROR_SENTINEL && *v != NOT_APPLICABLE)
}

/// 비율 문자열 파싱.
///
/// 공백과 끝의 "%"를 제거한 뒤 숫자로 파싱합니다.
/// "25" -> 25, "12.5%" -> 12.5, "1.2e1" -> 12
pub fn parse_ratio(text: &str) -> Option<Decimal> {
    let cleaned = text.trim().trim_end_matches('%').trim_end();
    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(cleaned)
        .or_else(|_| Decimal::from_scientific(cleaned))
        .ok()
}

/// `Decimal`로 표현할 수 없는 값을 위한 `f64` 파싱. 유한값만 허용합니다.
fn parse_ratio_f64(text: &str) -> Option<f64> {
    text.trim()
        .trim_end_matches('%')
        .trim_end()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}
