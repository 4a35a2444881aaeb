//! 환경변수 기반 설정 모듈.

use screener_data::provider::page::{
    DEFAULT_CONTENT_PROBE, DEFAULT_FALLBACK_URL, DEFAULT_PRIMARY_URL, DEFAULT_USER_AGENT,
};
use screener_data::{ChartConfig, PageFetcherConfig};
use std::path::PathBuf;
use std::time::Duration;

use crate::{CollectorError, Result};

/// Collector 전체 설정
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// 심볼 간 딜레이 (밀리초)
    pub request_delay_ms: u64,
    /// 종목 페이지 수집 설정
    pub page: PageSourceConfig,
    /// 차트 수집 설정
    pub chart: ChartSourceConfig,
}

/// 종목 페이지 수집 설정
#[derive(Debug, Clone)]
pub struct PageSourceConfig {
    /// 요청 타임아웃 (초)
    pub http_timeout_secs: u64,
    /// User-Agent
    pub user_agent: String,
    /// 기본 주소 템플릿 (`{symbol}` 치환)
    pub primary_url: String,
    /// 폴백 주소 템플릿 (None이면 폴백 없음)
    pub fallback_url: Option<String>,
    /// 기대 콘텐츠 셀렉터 (None이면 검사하지 않음)
    pub content_probe: Option<String>,
}

/// 차트 수집 설정
#[derive(Debug, Clone)]
pub struct ChartSourceConfig {
    /// 차트 수집 활성화 (끄면 Median PE는 `Error`)
    pub enabled: bool,
    /// 페이지 로드 후 대기 (밀리초)
    pub load_settle_ms: u64,
    /// "PE Ratio" 클릭 후 대기 (밀리초)
    pub click_settle_ms: u64,
    /// Chrome/Chromium 실행 파일 경로
    pub chrome_path: Option<PathBuf>,
    /// 헤드리스 모드
    pub headless: bool,
}

impl CollectorConfig {
    /// 환경변수에서 설정 로드
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 임의의 키-값 조회 함수로 설정 로드
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let primary_url = env_var_string(&lookup, "SCREENER_PRIMARY_URL")
            .unwrap_or_else(|| DEFAULT_PRIMARY_URL.to_string());
        if !primary_url.contains("{symbol}") {
            return Err(CollectorError::Config(format!(
                "SCREENER_PRIMARY_URL에 {{symbol}} 자리표시자가 없습니다: {}",
                primary_url
            )));
        }

        // 명시적으로 빈 값이면 비활성화, 미설정이면 기본값
        let fallback_url = match lookup("SCREENER_FALLBACK_URL") {
            Some(v) if v.trim().is_empty() => None,
            Some(v) => Some(v.trim().to_string()),
            None => Some(DEFAULT_FALLBACK_URL.to_string()),
        };
        let content_probe = match lookup("SCREENER_CONTENT_PROBE") {
            Some(v) if v.trim().is_empty() => None,
            Some(v) => Some(v.trim().to_string()),
            None => Some(DEFAULT_CONTENT_PROBE.to_string()),
        };

        Ok(Self {
            request_delay_ms: env_var_parse(&lookup, "SCREENER_REQUEST_DELAY_MS", 1000),
            page: PageSourceConfig {
                http_timeout_secs: env_var_parse(&lookup, "SCREENER_HTTP_TIMEOUT_SECS", 30),
                user_agent: env_var_string(&lookup, "SCREENER_USER_AGENT")
                    .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
                primary_url,
                fallback_url,
                content_probe,
            },
            chart: ChartSourceConfig {
                enabled: env_var_bool(&lookup, "SCREENER_CHART_ENABLED", true),
                load_settle_ms: env_var_parse(&lookup, "SCREENER_CHART_LOAD_SETTLE_MS", 2000),
                click_settle_ms: env_var_parse(&lookup, "SCREENER_CHART_CLICK_SETTLE_MS", 2000),
                chrome_path: env_var_string(&lookup, "SCREENER_CHROME_PATH").map(PathBuf::from),
                headless: env_var_bool(&lookup, "SCREENER_HEADLESS", true),
            },
        })
    }

    /// 심볼 간 딜레이를 Duration으로 반환
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    /// 페이지 수집기 설정
    pub fn page_fetcher_config(&self) -> PageFetcherConfig {
        PageFetcherConfig {
            primary_url: self.page.primary_url.clone(),
            fallback_url: self.page.fallback_url.clone(),
            content_probe: self.page.content_probe.clone(),
            timeout: Duration::from_secs(self.page.http_timeout_secs),
            user_agent: self.page.user_agent.clone(),
        }
    }

    /// 차트 수집기 설정. 차트 페이지는 기본 주소와 같습니다.
    pub fn chart_config(&self) -> ChartConfig {
        ChartConfig {
            chart_url: self.page.primary_url.clone(),
            load_settle: Duration::from_millis(self.chart.load_settle_ms),
            click_settle: Duration::from_millis(self.chart.click_settle_ms),
            headless: self.chart.headless,
            chrome_path: self.chart.chrome_path.clone(),
        }
    }
}

/// 값이 있으면 앞뒤 공백을 제거해 반환 (빈 값은 None)
fn env_var_string<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str) -> Option<String> {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 값을 파싱 (실패 시 기본값 사용)
fn env_var_parse<T: std::str::FromStr, F: Fn(&str) -> Option<String>>(
    lookup: &F,
    key: &str,
    default: T,
) -> T {
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// bool 값 파싱
fn env_var_bool<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str, default: bool) -> bool {
    lookup(key)
        .map(|v| v == "true" || v == "1")
        .unwrap_or(default)
}
