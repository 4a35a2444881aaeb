//! 데이터 Provider 모듈.
//!
//! 두 가지 수집 방식을 제공합니다. 어느 쪽이든 최종적으로는 `ExtractedField`를 만듭니다.
//!
//! ## 정적 페이지
//! - `PageFetcher`: 종목 페이지 원문 HTML 수집
//! - `HttpPageFetcher`: reqwest 기반 구현 (기대 콘텐츠 검사 후 폴백 주소 재시도)
//!
//! ## 렌더링 페이지
//! - `ChartLegendSource`: 클라이언트 측 상호작용 후에만 나타나는 값 수집
//! - `ChromiumChartFetcher`: 헤드리스 Chromium으로 차트 범례의 중앙값 P/E 읽기

pub mod chart;
pub mod page;

pub use chart::{
    parse_median_pe_label, ChartConfig, ChartLegendSource, ChromiumChartFetcher,
    DisabledChartSource,
};
pub use page::{ContentProbe, HttpPageFetcher, PageFetcher, PageFetcherConfig, RawDocument};
