//! 종목 페이지 수집기.
//!
//! 기본 주소에서 페이지를 받아오고, 받아온 문서에 기대 콘텐츠(`ContentProbe`)가
//! 없으면 같은 심볼의 폴백 주소로 한 번 더 요청합니다.
//!
//! ## 사용 예시
//! ```rust,ignore
//! let fetcher = HttpPageFetcher::new(PageFetcherConfig::default())?;
//! let document = fetcher.fetch(&Symbol::parse("TCS")?).await?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use screener_core::Symbol;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{DataError, Result};

/// 기본 주소 템플릿 (연결 재무제표 페이지)
pub const DEFAULT_PRIMARY_URL: &str = "https://www.screener.in/company/{symbol}/consolidated/";

/// 폴백 주소 템플릿 (단독 재무제표 페이지)
pub const DEFAULT_FALLBACK_URL: &str = "https://www.screener.in/company/{symbol}/";

/// 정상 페이지라면 반드시 있어야 하는 요소
pub const DEFAULT_CONTENT_PROBE: &str = "#top-ratios";

/// 기본 User-Agent (데스크톱 Chrome)
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// 수집한 페이지 원문.
///
/// 한 심볼을 추출하는 동안만 유지되며 심볼 간에 재사용되지 않습니다.
#[derive(Debug, Clone)]
pub struct RawDocument {
    url: String,
    html: String,
}

impl RawDocument {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }

    /// 문서를 받아온 주소
    pub fn url(&self) -> &str {
        &self.url
    }

    /// HTML 원문
    pub fn html(&self) -> &str {
        &self.html
    }

    /// HTML 파싱
    pub fn parse(&self) -> Html {
        Html::parse_document(&self.html)
    }
}

/// 기대 콘텐츠 검사.
///
/// 받아온 문서가 실제 종목 페이지인지(빈 페이지/자리표시자 페이지가 아닌지)를
/// CSS 셀렉터 존재 여부로 판단합니다. 셀렉터는 생성 시 한 번만 파싱합니다.
#[derive(Debug, Clone)]
pub struct ContentProbe {
    css: String,
    selector: Selector,
}

impl ContentProbe {
    /// 셀렉터 문법을 검증하여 생성합니다.
    pub fn new(css: impl Into<String>) -> Result<Self> {
        let css = css.into();
        let selector =
            Selector::parse(&css).map_err(|e| DataError::Parse(format!("{}: {}", css, e)))?;
        Ok(Self { css, selector })
    }

    /// 셀렉터 문자열
    pub fn css(&self) -> &str {
        &self.css
    }

    /// 파싱된 문서가 기대 콘텐츠를 포함하는지 확인합니다.
    pub fn matches(&self, html: &Html) -> bool {
        html.select(&self.selector).next().is_some()
    }
}

/// 종목 페이지 수집 인터페이스.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// 심볼의 페이지 원문을 가져옵니다.
    async fn fetch(&self, symbol: &Symbol) -> Result<RawDocument>;
}

/// 페이지 수집기 설정.
#[derive(Debug, Clone)]
pub struct PageFetcherConfig {
    /// 기본 주소 템플릿 (`{symbol}` 치환)
    pub primary_url: String,
    /// 폴백 주소 템플릿 (None이면 폴백 없음)
    pub fallback_url: Option<String>,
    /// 기대 콘텐츠 셀렉터 (None이면 검사하지 않음)
    pub content_probe: Option<String>,
    /// 요청 타임아웃
    pub timeout: Duration,
    /// User-Agent
    pub user_agent: String,
}

impl Default for PageFetcherConfig {
    fn default() -> Self {
        Self {
            primary_url: DEFAULT_PRIMARY_URL.to_string(),
            fallback_url: Some(DEFAULT_FALLBACK_URL.to_string()),
            content_probe: Some(DEFAULT_CONTENT_PROBE.to_string()),
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// reqwest 기반 페이지 수집기.
pub struct HttpPageFetcher {
    client: Client,
    config: PageFetcherConfig,
    probe: Option<ContentProbe>,
}

impl HttpPageFetcher {
    /// 설정으로 생성합니다.
    pub fn new(config: PageFetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| DataError::Fetch(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        let probe = config
            .content_probe
            .as_deref()
            .map(ContentProbe::new)
            .transpose()?;

        Ok(Self {
            client,
            config,
            probe,
        })
    }

    /// 설정 반환
    pub fn config(&self) -> &PageFetcherConfig {
        &self.config
    }

    /// 요청 후 상태 코드와 본문을 반환합니다. 429만 여기서 에러로 처리합니다.
    async fn get(&self, url: &str) -> Result<(StatusCode, RawDocument)> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::RateLimited(url.to_string()));
        }

        let html = response.text().await?;
        Ok((status, RawDocument::new(url, html)))
    }

    /// 기본 주소 응답을 그대로 쓸 수 있는지 판단합니다.
    ///
    /// 성공 상태가 아니거나 기대 콘텐츠가 없으면 폴백 대상입니다.
    fn accepts(&self, status: StatusCode, document: &RawDocument) -> bool {
        if !status.is_success() {
            return false;
        }
        match &self.probe {
            Some(probe) => probe.matches(&document.parse()),
            None => true,
        }
    }
}

/// 성공 상태가 아니면 `Fetch` 에러
fn ensure_success(status: StatusCode, document: RawDocument) -> Result<RawDocument> {
    if status.is_success() {
        Ok(document)
    } else {
        Err(DataError::Fetch(format!("HTTP {}: {}", status, document.url())))
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, symbol: &Symbol) -> Result<RawDocument> {
        let primary_url = symbol.locate(&self.config.primary_url);
        debug!(symbol = %symbol, url = %primary_url, "페이지 요청");

        let (status, document) = self.get(&primary_url).await.map_err(|e| {
            if matches!(e, DataError::RateLimited(_)) {
                warn!(symbol = %symbol, "Rate limit 초과");
            }
            e
        })?;

        let Some(fallback) = &self.config.fallback_url else {
            return ensure_success(status, document);
        };

        if self.accepts(status, &document) {
            return Ok(document);
        }

        let fallback_url = symbol.locate(fallback);
        info!(
            symbol = %symbol,
            status = %status,
            probe = self.probe.as_ref().map(ContentProbe::css),
            url = %fallback_url,
            "기대 콘텐츠 없음 - 폴백 주소로 재요청"
        );

        let (status, document) = self.get(&fallback_url).await?;
        ensure_success(status, document)
    }
}
