//! 워크북 심볼별 밸류에이션 수집.
//!
//! ## 처리 순서 (심볼 하나당)
//! 1. 종목 페이지 수집 (실패 시 문서 없음으로 계속 진행)
//! 2. 정적 필드 추출: P/E, 프로모터 지분, EPS, 섹터
//! 3. 차트 범례에서 중앙값 P/E 수집 (페이지 수집 실패와 무관하게 시도)
//! 4. 할인/프리미엄 계산 후 레코드 생성
//!
//! 심볼은 입력 순서대로 하나씩 처리하며, 한 심볼의 실패가 다음 심볼 처리를 막지 않습니다.
//! 심볼 사이에는 설정된 딜레이만큼 대기합니다.

use screener_core::{symbol_span, ExtractedField, Record, Symbol};
use screener_data::{
    extract_page_fields, ChartLegendSource, ChromiumChartFetcher, DisabledChartSource,
    HttpPageFetcher, InputTable, PageFetcher, ReportWriter,
};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn, Instrument};

use crate::{CollectionStats, CollectorConfig, Result};

/// 심볼 하나의 처리 결과
#[derive(Debug, Clone)]
pub struct ProcessedSymbol {
    pub record: Record,
    /// 종목 페이지 수집 성공 여부
    pub page_fetched: bool,
}

/// 워크북 하나를 처리합니다.
///
/// 입력 테이블을 읽을 수 없으면 어떤 심볼도 수집하기 전에 실패합니다.
pub async fn sync_workbook(path: &Path, config: &CollectorConfig) -> Result<CollectionStats> {
    info!(path = %path.display(), "밸류에이션 수집 시작");

    let table = InputTable::read(path)?;
    let symbols = table.symbols();
    if symbols.is_empty() {
        warn!(path = %path.display(), "처리할 심볼이 없습니다");
    }

    let page_fetcher = HttpPageFetcher::new(config.page_fetcher_config())?;
    let chart_source = chart_source(config);

    let (records, stats) = collect_records(
        &symbols,
        &page_fetcher,
        chart_source.as_ref(),
        config.request_delay(),
    )
    .await;

    let output = ReportWriter::output_path(path);
    if output != path {
        info!(output = %output.display(), "원본 형식으로 쓸 수 없어 xlsx로 저장");
    }
    ReportWriter.write(&output, &table, &records)?;

    Ok(stats)
}

/// 설정에 맞는 차트 수집기 생성
pub(crate) fn chart_source(config: &CollectorConfig) -> Box<dyn ChartLegendSource> {
    if config.chart.enabled {
        Box::new(ChromiumChartFetcher::new(config.chart_config()))
    } else {
        info!("차트 수집 비활성화 - Median PE는 Error로 기록됩니다");
        Box::new(DisabledChartSource)
    }
}

/// 심볼 목록을 순서대로 처리하여 레코드를 만듭니다.
///
/// 반환되는 레코드는 항상 `symbols`와 같은 개수, 같은 순서입니다.
pub async fn collect_records(
    symbols: &[Symbol],
    page_fetcher: &dyn PageFetcher,
    chart_source: &dyn ChartLegendSource,
    delay: Duration,
) -> (Vec<Record>, CollectionStats) {
    let started = Instant::now();
    let total = symbols.len();
    let mut stats = CollectionStats::new();
    let mut records = Vec::with_capacity(total);

    info!(count = total, delay_ms = delay.as_millis() as u64, "심볼 처리 시작");

    for (idx, symbol) in symbols.iter().enumerate() {
        let span = symbol_span!(symbol, idx + 1, total);
        let processed = process_symbol(symbol, page_fetcher, chart_source)
            .instrument(span)
            .await;

        stats.record(&processed.record, processed.page_fetched);
        records.push(processed.record);

        if idx + 1 < total && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    stats.elapsed = started.elapsed();
    stats.log_summary("밸류에이션 수집");

    (records, stats)
}

/// 심볼 하나를 처리합니다. 에러를 반환하지 않으며 실패는 센티널로 기록됩니다.
pub async fn process_symbol(
    symbol: &Symbol,
    page_fetcher: &dyn PageFetcher,
    chart_source: &dyn ChartLegendSource,
) -> ProcessedSymbol {
    let document = match page_fetcher.fetch(symbol).await {
        Ok(document) => {
            debug!(url = document.url(), bytes = document.html().len(), "페이지 수집 완료");
            Some(document)
        }
        Err(e) => {
            warn!(error = %e, "페이지 수집 실패 - 정적 필드는 센티널로 기록");
            None
        }
    };
    let page_fetched = document.is_some();

    let page = extract_page_fields(document.as_ref());
    log_field("PE", &page.stock_pe);
    log_field("Promoter Holding", &page.promoter.latest);
    log_field("Promoter Holding 4Q Before", &page.promoter.four_quarters_ago);
    log_field("EPS", &page.eps);
    log_field("Sector", &page.sector);

    let median_pe = chart_source.median_pe(symbol).await;
    log_field("Median PE", &median_pe);

    let record = Record::new(symbol.clone(), page, median_pe);
    match record.discount_premium() {
        Some(signal) => info!(
            discount_premium = %signal,
            bucket = %signal.bucket(),
            "할인/프리미엄 계산 완료"
        ),
        None => warn!("할인/프리미엄 계산 불가 (P/E 또는 Median PE 없음)"),
    }

    ProcessedSymbol {
        record,
        page_fetched,
    }
}

/// 필드별 진행 로그: 값이 있으면 info, 센티널이면 warn
fn log_field(field: &str, value: &ExtractedField) {
    match value {
        ExtractedField::Found(v) => info!(field, value = %v, "Processed {}", field),
        ExtractedField::NotFound(sentinel) => {
            warn!(field, value = sentinel.as_str(), "{} 추출 실패", field)
        }
        ExtractedField::ExtractionError(reason) => {
            warn!(field, error = %reason, "{} 수집 오류", field)
        }
    }
}
