//! 심볼별 레코드 수집 시나리오 테스트 (가짜 수집기 사용)

use async_trait::async_trait;
use screener_collector::modules::{collect_records, process_symbol, sync_workbook};
use screener_collector::{CollectorConfig, CollectorError};
use screener_core::{ColorBucket, ExtractedField, Symbol};
use screener_data::{ChartLegendSource, DataError, PageFetcher, RawDocument};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

fn company_page(pe: &str, sector: &str) -> String {
    format!(
        r#"<html><body>
        <ul id="top-ratios"><li class="flex flex-space-between">
          <span class="name">Stock P/E</span><span class="number">{pe}</span></li></ul>
        <section id="peers"><p class="sub">Sector: <a href="/s/">{sector}</a></p></section>
        <section id="profit-loss"><table class="data-table">
          <tr><td class="text">EPS in Rs</td><td>10.5</td><td>11.2</td></tr></table></section>
        <section id="shareholding"><table class="data-table">
          <tr><td class="text"><button>Promoters&nbsp;+</button></td>
          <td>60%</td><td>61%</td><td>62%</td><td>63%</td><td>64%</td></tr></table></section>
        </body></html>"#
    )
}

/// 심볼별로 미리 정한 페이지를 돌려주는 가짜 수집기. 없는 심볼은 수집 실패.
struct FakePages {
    pages: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl FakePages {
    fn new(pages: &[(&str, String)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(s, html)| (s.to_string(), html.clone()))
                .collect(),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PageFetcher for FakePages {
    async fn fetch(&self, symbol: &Symbol) -> Result<RawDocument, DataError> {
        self.calls.lock().unwrap().push(symbol.to_string());
        self.pages
            .get(symbol.as_str())
            .map(|html| RawDocument::new(format!("fake://{}", symbol), html.clone()))
            .ok_or_else(|| DataError::Fetch(format!("connection refused: {}", symbol)))
    }
}

/// 심볼별 중앙값 P/E. 없는 심볼은 범례 조작 실패.
struct FakeChart {
    medians: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl FakeChart {
    fn new(medians: &[(&str, &str)]) -> Self {
        Self {
            medians: medians
                .iter()
                .map(|(s, m)| (s.to_string(), m.to_string()))
                .collect(),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ChartLegendSource for FakeChart {
    async fn median_pe(&self, symbol: &Symbol) -> ExtractedField {
        self.calls.lock().unwrap().push(symbol.to_string());
        match self.medians.get(symbol.as_str()) {
            Some(m) => ExtractedField::Found(m.clone()),
            None => ExtractedField::error("legend not found"),
        }
    }
}

fn symbols(names: &[&str]) -> Vec<Symbol> {
    names.iter().map(|n| Symbol::parse(n).unwrap()).collect()
}

#[tokio::test]
async fn test_discount_and_premium_scenarios() {
    let pages = FakePages::new(&[
        ("TCS", company_page("25", "IT - Software")),
        ("HDFC", company_page("10", "Banks")),
    ]);
    let chart = FakeChart::new(&[("TCS", "20"), ("HDFC", "20")]);

    let (records, stats) =
        collect_records(&symbols(&["TCS", "HDFC"]), &pages, &chart, Duration::ZERO).await;

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].cells()[6], "25.00%");
    assert_eq!(records[0].bucket(), Some(ColorBucket::Brown));
    assert_eq!(records[1].cells()[6], "-50.00%");
    assert_eq!(records[1].bucket(), Some(ColorBucket::DarkGreen));

    assert_eq!(records[0].cells()[2], "64%");
    assert_eq!(records[0].cells()[3], "60%");
    assert_eq!(records[0].cells()[4], "11.2");
    assert_eq!(records[1].cells()[5], "Banks");

    assert_eq!(stats.total, 2);
    assert_eq!(stats.complete, 2);
    assert_eq!(stats.signals, 2);
}

#[tokio::test]
async fn test_failed_fetch_is_isolated() {
    let pages = FakePages::new(&[
        ("AAA", company_page("30", "Auto")),
        ("CCC", company_page("12", "Steel")),
    ]);
    let chart = FakeChart::new(&[("AAA", "20"), ("BBB", "20"), ("CCC", "15")]);

    let (records, stats) =
        collect_records(&symbols(&["AAA", "BBB", "CCC"]), &pages, &chart, Duration::ZERO).await;

    let order: Vec<String> = records.iter().map(|r| r.symbol().to_string()).collect();
    assert_eq!(order, vec!["AAA", "BBB", "CCC"]);

    // 페이지 수집 실패 심볼: 정적 필드는 센티널, 중앙값 P/E는 별도로 수집됨
    let failed = records[1].cells();
    assert_eq!(failed[0], "P/E Not Found");
    assert_eq!(failed[1], "20");
    assert_eq!(failed[2], "N/A");
    assert_eq!(failed[3], "N/A");
    assert_eq!(failed[4], "N/A");
    assert_eq!(failed[5], "Sector Not Found");
    assert_eq!(failed[6], "N/A");
    assert_eq!(records[1].bucket(), None);

    // 다음 심볼은 정상 처리
    assert_eq!(records[2].cells()[6], "-20.00%");
    assert_eq!(records[2].bucket(), Some(ColorBucket::LightGreen));

    assert_eq!(stats.fetch_failed, 1);
    assert_eq!(stats.partial, 1);
    assert_eq!(*chart.calls.lock().unwrap(), vec!["AAA", "BBB", "CCC"]);
}

#[tokio::test]
async fn test_chart_failure_leaves_no_signal() {
    let pages = FakePages::new(&[("XYZ", company_page("18", "Cement"))]);
    let chart = FakeChart::new(&[]);

    let processed = process_symbol(&Symbol::parse("XYZ").unwrap(), &pages, &chart).await;

    assert!(processed.page_fetched);
    assert_eq!(processed.record.cells()[0], "18");
    assert_eq!(processed.record.cells()[1], "Error");
    assert_eq!(processed.record.cells()[6], "N/A");
    assert!(processed.record.discount_premium().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_pacing_delay_between_symbols_only() {
    let pages = FakePages::new(&[]);
    let chart = FakeChart::new(&[]);
    let delay = Duration::from_secs(1);

    let start = tokio::time::Instant::now();
    let (records, _) = collect_records(&symbols(&["A", "B", "C"]), &pages, &chart, delay).await;
    let waited = start.elapsed();

    assert_eq!(records.len(), 3);
    assert!(waited >= Duration::from_secs(2));
    assert!(waited < Duration::from_secs(3));
    assert_eq!(*pages.calls.lock().unwrap(), vec!["A", "B", "C"]);
}

#[tokio::test]
async fn test_empty_symbol_list() {
    let pages = FakePages::new(&[]);
    let chart = FakeChart::new(&[]);

    let (records, stats) = collect_records(&[], &pages, &chart, Duration::from_secs(5)).await;

    assert!(records.is_empty());
    assert_eq!(stats.total, 0);
}

#[tokio::test]
async fn test_unreadable_input_fails_before_processing() {
    let dir = tempfile::tempdir().unwrap();
    let config = CollectorConfig::from_lookup(|_| None).unwrap();

    let missing = dir.path().join("missing.xlsx");
    let err = sync_workbook(&missing, &config).await.unwrap_err();
    assert!(matches!(err, CollectorError::Data(DataError::Workbook(_))));
    assert!(!missing.exists());
}
