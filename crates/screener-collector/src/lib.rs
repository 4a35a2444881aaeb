//! 종목 밸류에이션 스크리너 수집기.
//!
//! 이 crate는 입력 워크북의 심볼마다 다음을 수행하는 바이너리를 제공합니다:
//! - 종목 페이지에서 P/E, 프로모터 지분, EPS, 섹터 추출
//! - 차트 범례에서 중앙값 P/E 수집
//! - 할인/프리미엄 계산 및 색상 버킷 분류
//! - 결과를 원본 워크북에 컬럼으로 추가

pub mod config;
pub mod error;
pub mod modules;
pub mod stats;

pub use config::CollectorConfig;
pub use error::{CollectorError, Result};
pub use stats::CollectionStats;
