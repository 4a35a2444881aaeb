//! 현재 P/E 추출.
//!
//! HTML 구조:
//! ```html
//! <li class="flex flex-space-between">
//!   <span class="name">Stock P/E</span>
//!   <span class="nowrap value"><span class="number">28.4</span></span>
//! </li>
//! ```
//!
//! 1순위는 "Stock P/E" 라벨이 정확히 일치하는 항목이며, 하나라도 있으면 대안 검색은 하지 않습니다.
//! 이 항목에 숫자가 없으면 조회 실패(`Error`)입니다.
//! 대안은 텍스트가 "P/E"인 `span` 뒤에 처음 나오는 `span.number` 이며, 없으면 `N/A` 입니다.

use scraper::Html;
use screener_core::{ExtractedField, Sentinel};
use tracing::debug;

use super::{selector, text_of};
use crate::error::{DataError, Result};

const STOCK_PE_LABEL: &str = "Stock P/E";
const PE_LANDMARK: &str = "P/E";

/// 현재 P/E 추출
pub fn extract_stock_pe(document: &Html) -> ExtractedField {
    match find_stock_pe(document) {
        Ok(field) => field,
        Err(e) => ExtractedField::error(e.to_string()),
    }
}

fn find_stock_pe(document: &Html) -> Result<ExtractedField> {
    let item_selector = selector("li.flex.flex-space-between")?;
    let name_selector = selector("span.name")?;
    let number_selector = selector("span.number")?;

    // 방법 1: 라벨이 정확히 "Stock P/E"인 항목
    for item in document.select(&item_selector) {
        let is_stock_pe = item
            .select(&name_selector)
            .next()
            .is_some_and(|name| text_of(name) == STOCK_PE_LABEL);

        if is_stock_pe {
            let number = item.select(&number_selector).next().ok_or_else(|| {
                DataError::StructuralNotFound(format!("'{}' 항목에 span.number 없음", STOCK_PE_LABEL))
            })?;
            return Ok(ExtractedField::from_text(&text_of(number), Sentinel::NotApplicable));
        }
    }

    // 방법 2: "P/E" 랜드마크 다음의 첫 숫자 span
    debug!("Stock P/E 항목 없음 - P/E 랜드마크 검색");
    let span_selector = selector("span")?;
    let mut spans = document.select(&span_selector);

    if spans.by_ref().any(|span| text_of(span) == PE_LANDMARK) {
        let next_number = spans.find(|span| span.value().classes().any(|c| c == "number"));
        return Ok(next_number
            .map(|number| ExtractedField::from_text(&text_of(number), Sentinel::NotApplicable))
            .unwrap_or_else(ExtractedField::not_applicable));
    }

    Ok(ExtractedField::NotFound(Sentinel::PeNotFound))
}
