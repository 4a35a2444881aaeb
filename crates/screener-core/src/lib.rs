//! # Screener Core
//!
//! 종목 밸류에이션 스크리너의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 심볼 타입
//! - 추출 결과 (`ExtractedField`) 및 센티널 값
//! - 종목별 결과 레코드
//! - 할인/프리미엄 계산 및 색상 버킷 분류
//! - 로깅 인프라

pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
