//! 페이지 수집, 필드 추출 및 워크북 입출력.
//!
//! 이 crate는 다음을 제공합니다:
//! - 종목 페이지 수집 (`HttpPageFetcher`, 폴백 주소 지원)
//! - 차트 범례에서 중앙값 P/E 읽기 (`ChromiumChartFetcher`, 헤드리스 브라우저)
//! - P/E, 프로모터 지분, EPS, 섹터 추출기
//! - 입력 테이블 읽기 및 결과 워크북 쓰기

pub mod error;
pub mod extract;
pub mod provider;
pub mod workbook;

pub use error::{DataError, Result};
pub use extract::extract_page_fields;
pub use provider::{
    ChartConfig, ChartLegendSource, ChromiumChartFetcher, ContentProbe, DisabledChartSource,
    HttpPageFetcher, PageFetcher, PageFetcherConfig, RawDocument,
};
pub use workbook::{Cell, InputTable, ReportWriter, TableFormat};
