//! 심볼 정의.
//!
//! 심볼은 한 종목의 페이지와 차트를 가리키는 불투명한 식별자입니다.
//! 티커(예: `TCS`) 또는 완전한 URL 로케이터 모두 허용됩니다.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// 종목 하나를 가리키는 심볼.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// 입력 문자열에서 심볼을 생성합니다.
    ///
    /// 앞뒤 공백을 제거하며, 빈 문자열은 거부합니다.
    pub fn parse(raw: &str) -> CoreResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidInput("빈 심볼".to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// 심볼 문자열을 반환합니다.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 심볼 자체가 절대 URL 로케이터인지 확인합니다.
    pub fn is_locator(&self) -> bool {
        self.0.starts_with("http://") || self.0.starts_with("https://")
    }

    /// URL 템플릿의 `{symbol}` 자리에 심볼을 넣어 주소를 만듭니다.
    ///
    /// 로케이터 심볼은 템플릿과 관계없이 그대로 사용됩니다.
    pub fn locate(&self, template: &str) -> String {
        if self.is_locator() {
            self.0.clone()
        } else {
            template.replace("{symbol}", &self.0)
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Symbol {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_rejects_empty() {
        assert_eq!(Symbol::parse("  TCS ").unwrap().as_str(), "TCS");
        assert!(Symbol::parse("   ").is_err());
        assert!(Symbol::parse("").is_err());
    }

    #[test]
    fn test_locate_with_template() {
        let symbol = Symbol::parse("INFY").unwrap();
        assert_eq!(
            symbol.locate("https://www.screener.in/company/{symbol}/"),
            "https://www.screener.in/company/INFY/"
        );
    }

    #[test]
    fn test_locator_symbol_is_used_verbatim() {
        let symbol = Symbol::parse("https://www.screener.in/company/TCS/consolidated/").unwrap();
        assert!(symbol.is_locator());
        assert_eq!(
            symbol.locate("https://example.com/{symbol}"),
            "https://www.screener.in/company/TCS/consolidated/"
        );
    }
}
