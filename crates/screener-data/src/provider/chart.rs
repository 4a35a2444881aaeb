//! 차트 범례에서 중앙값 P/E 읽기.
//!
//! 중앙값 P/E는 차트의 "PE Ratio" 버튼을 누른 뒤 비동기로 그려지는 범례에만 나타나므로
//! 헤드리스 브라우저로 페이지를 조작해야 합니다.
//!
//! ## 절차
//! 1. 차트 페이지 로드 → 고정 대기
//! 2. "PE Ratio" 버튼 클릭 → 고정 대기
//! 3. `#chart-legend` 내에서 "Median PE" 라벨 찾기
//! 4. 라벨의 마지막 "=" 뒤 값 파싱
//!
//! 브라우저 세션은 심볼마다 새로 띄우고, 결과와 관계없이 항상 종료합니다.

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use screener_core::{ExtractedField, Symbol};
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::page::DEFAULT_PRIMARY_URL;
use crate::error::{DataError, Result};

const PE_RATIO_BUTTON_XPATH: &str = "//button[contains(text(), 'PE Ratio')]";
const CHART_LEGEND_SELECTOR: &str = "#chart-legend";
const MEDIAN_PE_LABEL: &str = "Median PE";

/// 렌더링 페이지에서 중앙값 P/E를 얻는 인터페이스.
#[async_trait]
pub trait ChartLegendSource: Send + Sync {
    /// 심볼의 중앙값 P/E. 실패는 `ExtractionError`로 반환하며 에러를 던지지 않습니다.
    async fn median_pe(&self, symbol: &Symbol) -> ExtractedField;
}

/// 차트 수집 설정.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// 차트 페이지 주소 템플릿
    pub chart_url: String,
    /// 페이지 로드 후 대기
    pub load_settle: Duration,
    /// 버튼 클릭 후 대기
    pub click_settle: Duration,
    /// 헤드리스 모드
    pub headless: bool,
    /// Chrome/Chromium 실행 파일 경로 (None이면 자동 탐색)
    pub chrome_path: Option<PathBuf>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            chart_url: DEFAULT_PRIMARY_URL.to_string(),
            load_settle: Duration::from_secs(2),
            click_settle: Duration::from_secs(2),
            headless: true,
            chrome_path: None,
        }
    }
}

/// 헤드리스 Chromium 기반 차트 범례 수집기.
pub struct ChromiumChartFetcher {
    config: ChartConfig,
}

impl ChromiumChartFetcher {
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    /// 설정 반환
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    async fn read_median_pe(&self, symbol: &Symbol) -> Result<String> {
        let url = symbol.locate(&self.config.chart_url);
        let session = BrowserSession::launch(&self.config).await?;

        let label = self.read_legend_label(&session, &url).await;
        session.close().await;

        parse_median_pe_label(&label?)
    }

    async fn read_legend_label(&self, session: &BrowserSession, url: &str) -> Result<String> {
        let page = session.browser.new_page(url).await?;
        tokio::time::sleep(self.config.load_settle).await;

        let button = page
            .find_xpath(PE_RATIO_BUTTON_XPATH)
            .await
            .map_err(|e| DataError::Interaction(format!("'PE Ratio' 버튼 없음: {}", e)))?;
        button.click().await?;
        tokio::time::sleep(self.config.click_settle).await;

        let legend = page
            .find_element(CHART_LEGEND_SELECTOR)
            .await
            .map_err(|e| DataError::Interaction(format!("차트 범례 없음: {}", e)))?;

        for span in legend.find_elements("span").await? {
            if let Some(text) = span.inner_text().await? {
                if text.contains(MEDIAN_PE_LABEL) {
                    return Ok(text);
                }
            }
        }

        Err(DataError::Interaction(format!(
            "범례에 '{}' 라벨 없음",
            MEDIAN_PE_LABEL
        )))
    }
}

#[async_trait]
impl ChartLegendSource for ChromiumChartFetcher {
    async fn median_pe(&self, symbol: &Symbol) -> ExtractedField {
        match self.read_median_pe(symbol).await {
            Ok(value) => ExtractedField::Found(value),
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Median PE 수집 실패");
                ExtractedField::error(e.to_string())
            }
        }
    }
}

/// 차트 수집을 끈 경우의 대체 구현. 항상 `Error`를 반환합니다.
#[derive(Debug, Default)]
pub struct DisabledChartSource;

#[async_trait]
impl ChartLegendSource for DisabledChartSource {
    async fn median_pe(&self, _symbol: &Symbol) -> ExtractedField {
        ExtractedField::error("차트 수집 비활성화")
    }
}

/// 심볼 하나를 처리하는 동안만 유지되는 브라우저 세션.
struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl BrowserSession {
    async fn launch(config: &ChartConfig) -> Result<Self> {
        let mut builder = BrowserConfig::builder();
        if !config.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &config.chrome_path {
            builder = builder.chrome_executable(path);
        }
        let browser_config = builder
            .build()
            .map_err(|e| DataError::Interaction(format!("브라우저 설정 실패: {}", e)))?;

        let (browser, mut handler) = Browser::launch(browser_config).await?;
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(Self { browser, handler })
    }

    /// 브라우저 종료. 종료 중 오류는 기록만 합니다.
    async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            debug!(error = %e, "브라우저 종료 요청 실패");
        }
        if let Err(e) = self.browser.wait().await {
            debug!(error = %e, "브라우저 프로세스 대기 실패");
        }
        self.handler.abort();
    }
}

/// 범례 라벨에서 중앙값 P/E 추출.
///
/// "Median PE = 27.5" -> "27.5"
pub fn parse_median_pe_label(label: &str) -> Result<String> {
    let (_, value) = label
        .rsplit_once('=')
        .ok_or_else(|| DataError::Parse(format!("'=' 없음: {}", label.trim())))?;

    let value = value.trim();
    if value.is_empty() {
        return Err(DataError::Parse(format!("값 없음: {}", label.trim())));
    }

    Ok(value.to_string())
}
