//! 입력 테이블 읽기와 결과 워크북 쓰기.
//!
//! - 스프레드시트(`.xlsx`, `.xlsm`, `.xls`, `.ods`)는 calamine으로 읽고 rust_xlsxwriter로 씁니다.
//! - CSV는 csv crate로 읽고 씁니다 (색상 없음).
//!
//! 첫 번째 행은 헤더, 첫 번째 컬럼은 심볼입니다.

pub mod reader;
pub mod writer;

pub use reader::InputTable;
pub use writer::ReportWriter;

use std::fmt;
use std::path::Path;

use crate::error::{DataError, Result};

/// 테이블 파일 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// 스프레드시트 (xlsx/xlsm/xls/ods)
    Spreadsheet,
    /// 쉼표 구분 텍스트
    Csv,
}

impl TableFormat {
    /// 확장자로 형식 판별
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "xlsx" | "xlsm" | "xls" | "ods" => Ok(Self::Spreadsheet),
            "csv" => Ok(Self::Csv),
            _ => Err(DataError::Workbook(format!(
                "지원하지 않는 파일 형식: {}",
                path.display()
            ))),
        }
    }
}

/// 테이블 셀 값.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    /// 빈 셀 여부 (공백 문자열 포함)
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => write!(f, "{}", s),
            // 정수 값은 소수점 없이 (BSE 코드 500325 등)
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Bool(b) => write!(f, "{}", b),
        }
    }
}
