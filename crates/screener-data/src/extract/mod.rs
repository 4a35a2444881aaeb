//! 정적 페이지 필드 추출기.
//!
//! 각 추출기는 파싱된 HTML에서 값 하나(또는 한 쌍)를 꺼내는 순수 함수이며,
//! 실패를 `ExtractedField` 센티널로 변환해 반환합니다.
//!
//! | 필드 | 랜드마크 |
//! |---|---|
//! | P/E | `li.flex.flex-space-between` > `span.name` = "Stock P/E" (대안: `span` "P/E") |
//! | 프로모터 지분 | `section#shareholding` > `table.data-table` > "Promoters" 행 |
//! | EPS | `section#profit-loss` > `table.data-table` > "EPS in Rs" 행 |
//! | 섹터 | `section#peers` > `p.sub` > `a` |

pub mod eps;
pub mod pe;
pub mod promoter;
pub mod sector;

pub use eps::extract_eps;
pub use pe::extract_stock_pe;
pub use promoter::extract_promoter_holding;
pub use sector::extract_sector;

use scraper::{ElementRef, Selector};
use screener_core::PageFields;

use crate::error::{DataError, Result};
use crate::provider::RawDocument;

/// 문서 하나에서 정적 필드 네 가지를 모두 추출합니다.
///
/// 문서가 없으면(수집 실패) 모든 필드가 각자의 "찾을 수 없음" 센티널이 됩니다.
pub fn extract_page_fields(document: Option<&RawDocument>) -> PageFields {
    let Some(document) = document else {
        return PageFields::missing();
    };

    let html = document.parse();
    PageFields {
        stock_pe: extract_stock_pe(&html),
        promoter: extract_promoter_holding(&html),
        eps: extract_eps(&html),
        sector: extract_sector(&html),
    }
}

/// CSS 셀렉터 파싱
pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| DataError::Parse(format!("{}: {}", css, e)))
}

/// 요소의 전체 텍스트 (앞뒤 공백 제거)
pub(crate) fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
