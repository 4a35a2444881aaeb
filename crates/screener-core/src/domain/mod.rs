//! 도메인 모델.
//!
//! - `field`: 추출 결과와 센티널
//! - `record`: 종목별 결과 레코드
//! - `valuation`: 할인/프리미엄 계산 및 색상 버킷

pub mod field;
pub mod record;
pub mod valuation;

pub use field::*;
pub use record::*;
pub use valuation::*;
