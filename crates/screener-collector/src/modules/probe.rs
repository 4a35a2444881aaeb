//! 단일 심볼 점검.
//!
//! 파일을 읽거나 쓰지 않고 한 심볼에 대해 전체 처리를 수행한 뒤 결과를 반환합니다.

use screener_core::{ColorBucket, Record, Symbol, OUTPUT_HEADERS};
use screener_data::HttpPageFetcher;
use serde::Serialize;
use tracing::Instrument;

use super::valuation_sync::{chart_source, process_symbol};
use crate::{CollectorConfig, Result};

/// 출력 셀 하나 (헤더, 값)
#[derive(Debug, Clone, Serialize)]
pub struct ProbeCell {
    pub header: &'static str,
    pub value: String,
}

/// 단일 심볼 점검 결과
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub symbol: Symbol,
    /// 출력 컬럼 순서의 셀 값
    pub cells: Vec<ProbeCell>,
    /// 할인/프리미엄 색상 버킷
    pub bucket: Option<ColorBucket>,
    /// 종목 페이지 수집 성공 여부
    pub page_fetched: bool,
    /// 필드별 상세 결과
    pub record: Record,
}

impl ProbeReport {
    pub fn new(record: Record, page_fetched: bool) -> Self {
        let cells = OUTPUT_HEADERS
            .into_iter()
            .zip(record.cells())
            .map(|(header, value)| ProbeCell { header, value })
            .collect();

        Self {
            symbol: record.symbol().clone(),
            cells,
            bucket: record.bucket(),
            page_fetched,
            record,
        }
    }
}

/// 심볼 하나를 처리하여 결과를 반환합니다.
///
/// 빈 심볼은 아무 요청도 하기 전에 `CollectorError::Input`으로 거부합니다.
pub async fn probe_symbol(raw_symbol: &str, config: &CollectorConfig) -> Result<ProbeReport> {
    let symbol = Symbol::parse(raw_symbol)?;
    let page_fetcher = HttpPageFetcher::new(config.page_fetcher_config())?;
    let chart_source = chart_source(config);

    let processed = process_symbol(&symbol, &page_fetcher, chart_source.as_ref())
        .instrument(screener_core::symbol_span!(symbol))
        .await;

    Ok(ProbeReport::new(processed.record, processed.page_fetched))
}
