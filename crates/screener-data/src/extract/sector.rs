//! 섹터 추출.
//!
//! HTML 구조:
//! ```html
//! <section id="peers">
//!   <p class="sub">Sector: <a href="/company/compare/00000034/">IT - Software</a></p>
//! </section>
//! ```

use scraper::Html;
use screener_core::{ExtractedField, Sentinel};
use tracing::debug;

use super::{selector, text_of};
use crate::error::Result;

/// 섹터 추출
///
/// 링크 텍스트가 비어 있으면(공백뿐이면) `Sector Not Found` 입니다.
pub fn extract_sector(document: &Html) -> ExtractedField {
    match find_sector(document) {
        Ok(field) => field,
        Err(e) => ExtractedField::error(e.to_string()),
    }
}

fn find_sector(document: &Html) -> Result<ExtractedField> {
    let section_selector = selector("section#peers")?;
    let paragraph_selector = selector("p.sub")?;
    let link_selector = selector("a")?;

    let link = document
        .select(&section_selector)
        .next()
        .and_then(|section| section.select(&paragraph_selector).next())
        .and_then(|paragraph| paragraph.select(&link_selector).next());

    match link {
        Some(link) => Ok(ExtractedField::from_text(
            &text_of(link),
            Sentinel::SectorNotFound,
        )),
        None => {
            debug!("섹터 링크 없음");
            Ok(ExtractedField::NotFound(Sentinel::SectorNotFound))
        }
    }
}
