//! 데이터 모듈 오류 타입.

use thiserror::Error;

/// 데이터 수집/추출/입출력 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 네트워크/전송 오류
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// 요청 한도 초과
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// 기대한 HTML 랜드마크 없음
    #[error("Structural element not found: {0}")]
    StructuralNotFound(String),

    /// 파싱 오류
    #[error("Parse error: {0}")]
    Parse(String),

    /// 렌더링 페이지 조작 오류 (버튼/범례 없음 등)
    #[error("Interaction error: {0}")]
    Interaction(String),

    /// 입력/출력 테이블 오류
    #[error("Workbook error: {0}")]
    Workbook(String),
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        DataError::Fetch(err.to_string())
    }
}

impl From<chromiumoxide::error::CdpError> for DataError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        DataError::Interaction(err.to_string())
    }
}

impl From<calamine::Error> for DataError {
    fn from(err: calamine::Error) -> Self {
        DataError::Workbook(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for DataError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        DataError::Workbook(err.to_string())
    }
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        DataError::Workbook(err.to_string())
    }
}

impl From<std::io::Error> for DataError {
    fn from(err: std::io::Error) -> Self {
        DataError::Workbook(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
