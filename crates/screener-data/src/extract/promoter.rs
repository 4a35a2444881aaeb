//! 프로모터 지분 추출.
//!
//! HTML 구조:
//! ```html
//! <section id="shareholding">
//!   <table class="data-table">
//!     <tr class="stripe">
//!       <td class="text"><button>Promoters&nbsp;+</button></td>
//!       <td>72.05%</td> ... <td>71.77%</td>
//!     </tr>
//!   </table>
//! </section>
//! ```
//!
//! 값 셀은 왼쪽이 과거, 오른쪽이 최신입니다.
//! 최신 값은 마지막 셀, 4분기 전 값은 끝에서 다섯 번째 셀입니다.

use scraper::Html;
use screener_core::{ExtractedField, PromoterHolding, Sentinel};
use tracing::debug;

use super::{selector, text_of};
use crate::error::{DataError, Result};

const PROMOTERS_LABEL: &str = "Promoters";

/// 최신 값에서 몇 분기 앞의 값을 비교 대상으로 쓰는지
const QUARTERS_BACK: usize = 4;

/// 프로모터 지분 (최신, 4분기 전) 추출
///
/// 섹션/테이블/행/라벨 중 하나라도 없으면 두 값 모두 `N/A` 입니다.
pub fn extract_promoter_holding(document: &Html) -> PromoterHolding {
    match find_promoter_row(document) {
        Ok(values) => PromoterHolding {
            latest: pick_from_end(&values, 0),
            four_quarters_ago: pick_from_end(&values, QUARTERS_BACK),
        },
        Err(e) => {
            debug!(error = %e, "프로모터 지분 추출 실패");
            PromoterHolding::not_found()
        }
    }
}

/// "Promoters" 행의 값 셀 텍스트 (라벨 셀 제외, 왼쪽부터)
fn find_promoter_row(document: &Html) -> Result<Vec<String>> {
    let section_selector = selector("section#shareholding")?;
    let table_selector = selector("table.data-table")?;
    let row_selector = selector("tr")?;
    let cell_selector = selector("td")?;
    let label_selector = selector("td.text")?;
    let button_selector = selector("button")?;

    let section = document
        .select(&section_selector)
        .next()
        .ok_or_else(|| DataError::StructuralNotFound("section#shareholding".into()))?;

    let table = section
        .select(&table_selector)
        .next()
        .ok_or_else(|| DataError::StructuralNotFound("shareholding table".into()))?;

    let row = table
        .select(&row_selector)
        .find(|row| {
            row.select(&label_selector)
                .next()
                .and_then(|label| label.select(&button_selector).next())
                .is_some_and(|button| button.text().collect::<String>().contains(PROMOTERS_LABEL))
        })
        .ok_or_else(|| DataError::StructuralNotFound("Promoters row".into()))?;

    Ok(row.select(&cell_selector).skip(1).map(text_of).collect())
}

/// 끝에서 `offset`번째 값 (0 = 마지막)
fn pick_from_end(values: &[String], offset: usize) -> ExtractedField {
    values
        .len()
        .checked_sub(offset + 1)
        .map(|index| ExtractedField::from_text(&values[index], Sentinel::NotApplicable))
        .unwrap_or_else(ExtractedField::not_applicable)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shareholding(rows: &str) -> Html {
        Html::parse_document(&format!(
            r#"<html><body><section id="shareholding"><table class="data-table">
                <thead><tr><th></th><th>Dec 2023</th></tr></thead>
                <tbody>{}</tbody></table></section></body></html>"#,
            rows
        ))
    }

    fn promoter_row(values: &[&str]) -> String {
        let cells: String = values.iter().map(|v| format!("<td>{}</td>", v)).collect();
        format!(
            r#"<tr class="stripe"><td class="text"><button class="button-plain">Promoters&nbsp;<span>+</span></button></td>{}</tr>"#,
            cells
        )
    }

    #[test]
    fn test_five_values() {
        let html = shareholding(&promoter_row(&["a", "b", "c", "d", "e"]));
        let holding = extract_promoter_holding(&html);
        assert_eq!(holding.latest, ExtractedField::Found("e".into()));
        assert_eq!(holding.four_quarters_ago, ExtractedField::Found("a".into()));
    }

    #[test]
    fn test_three_values() {
        let html = shareholding(&promoter_row(&["a", "b", "c"]));
        let holding = extract_promoter_holding(&html);
        assert_eq!(holding.latest, ExtractedField::Found("c".into()));
        assert_eq!(holding.four_quarters_ago, ExtractedField::not_applicable());
    }

    #[test]
    fn test_twelve_quarters() {
        let values: Vec<String> = (1..=12).map(|q| format!("{}.00%", 60 + q)).collect();
        let refs: Vec<&str> = values.iter().map(String::as_str).collect();
        let html = shareholding(&promoter_row(&refs));
        let holding = extract_promoter_holding(&html);
        assert_eq!(holding.latest.render(), "72.00%");
        assert_eq!(holding.four_quarters_ago.render(), "68.00%");
    }

    #[test]
    fn test_promoters_row_not_first() {
        let rows = format!(
            r#"<tr><td class="text"><button>FIIs</button></td><td>10%</td></tr>{}"#,
            promoter_row(&[" 50.1% ", "50.2%"])
        );
        let holding = extract_promoter_holding(&shareholding(&rows));
        assert_eq!(holding.latest.render(), "50.2%");
        assert_eq!(holding.four_quarters_ago.render(), "N/A");
    }

    #[test]
    fn test_label_without_button_short_circuits() {
        let rows = r#"<tr class="stripe"><td class="text">Promoters</td><td>1</td><td>2</td></tr>"#;
        assert_eq!(
            extract_promoter_holding(&shareholding(rows)),
            PromoterHolding::not_found()
        );
    }

    #[test]
    fn test_label_is_case_sensitive() {
        let html = shareholding(&promoter_row(&[]).replace("Promoters", "promoters"));
        assert_eq!(extract_promoter_holding(&html), PromoterHolding::not_found());
    }

    #[test]
    fn test_missing_section() {
        let html = Html::parse_document("<html><body><table class='data-table'></table></body></html>");
        assert_eq!(extract_promoter_holding(&html), PromoterHolding::not_found());
    }
}
