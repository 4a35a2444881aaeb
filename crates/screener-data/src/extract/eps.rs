//! EPS 추출.
//!
//! HTML 구조: `<section id="profit-loss">` 내 손익계산서 테이블의
//! `<tr><td class="text">EPS in Rs</td><td>98.21</td>...<td>125.88</td></tr>`
//!
//! 가장 오른쪽 셀이 최근 기간입니다.

use scraper::Html;
use screener_core::{ExtractedField, Sentinel};
use tracing::debug;

use super::{selector, text_of};
use crate::error::{DataError, Result};

const EPS_LABEL: &str = "EPS in Rs";

/// 최근 기간 EPS 추출
pub fn extract_eps(document: &Html) -> ExtractedField {
    match find_eps(document) {
        Ok(field) => field,
        Err(DataError::StructuralNotFound(what)) => {
            debug!(missing = %what, "EPS 랜드마크 없음");
            ExtractedField::not_applicable()
        }
        Err(e) => ExtractedField::error(e.to_string()),
    }
}

fn find_eps(document: &Html) -> Result<ExtractedField> {
    let section_selector = selector("section#profit-loss")?;
    let table_selector = selector("table.data-table")?;
    let row_selector = selector("tr")?;
    let label_selector = selector("td.text")?;
    let cell_selector = selector("td")?;

    let section = document
        .select(&section_selector)
        .next()
        .ok_or_else(|| DataError::StructuralNotFound("section#profit-loss".into()))?;

    let table = section
        .select(&table_selector)
        .next()
        .ok_or_else(|| DataError::StructuralNotFound("profit-loss table".into()))?;

    let row = table
        .select(&row_selector)
        .find(|row| {
            row.select(&label_selector)
                .next()
                .is_some_and(|label| label.text().collect::<String>().contains(EPS_LABEL))
        })
        .ok_or_else(|| DataError::StructuralNotFound("EPS row".into()))?;

    // 라벨 셀만 있는 행은 값이 없는 것으로 취급
    Ok(row
        .select(&cell_selector)
        .skip(1)
        .last()
        .map(|cell| ExtractedField::from_text(&text_of(cell), Sentinel::NotApplicable))
        .unwrap_or_else(ExtractedField::not_applicable))
}
