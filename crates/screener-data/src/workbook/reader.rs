//! 입력 테이블 읽기.

use calamine::{open_workbook_auto, Data, Reader};
use screener_core::Symbol;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::{Cell, TableFormat};
use crate::error::{DataError, Result};

/// 메모리에 읽어들인 입력 테이블.
///
/// 원본의 모든 행과 컬럼을 그대로 보존하며, 결과 쓰기 시 원본 컬럼 뒤에 출력 컬럼이 붙습니다.
#[derive(Debug, Clone)]
pub struct InputTable {
    path: PathBuf,
    format: TableFormat,
    sheet_name: Option<String>,
    headers: Vec<Cell>,
    rows: Vec<Vec<Cell>>,
}

impl InputTable {
    /// 파일에서 테이블을 읽습니다.
    ///
    /// 파일이 없거나, 형식을 알 수 없거나, 컬럼이 하나도 없으면 `DataError::Workbook`.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DataError::Workbook(format!(
                "입력 파일 없음: {}",
                path.display()
            )));
        }

        let format = TableFormat::from_path(path)?;
        let (sheet_name, mut grid) = match format {
            TableFormat::Spreadsheet => read_spreadsheet(path)?,
            TableFormat::Csv => (None, read_csv(path)?),
        };

        if grid.is_empty() {
            return Err(DataError::Workbook(format!("빈 테이블: {}", path.display())));
        }
        let headers = grid.remove(0);
        if headers.is_empty() {
            return Err(DataError::Workbook(format!(
                "컬럼 없음: {}",
                path.display()
            )));
        }

        let table = Self {
            path: path.to_path_buf(),
            format,
            sheet_name,
            headers,
            rows: grid,
        };

        info!(
            path = %table.path.display(),
            rows = table.rows.len(),
            columns = table.headers.len(),
            symbols = table.symbols().len(),
            "입력 테이블 로드"
        );

        Ok(table)
    }

    /// 메모리 내 데이터로 직접 생성합니다.
    pub fn from_parts(
        path: impl Into<PathBuf>,
        format: TableFormat,
        headers: Vec<Cell>,
        rows: Vec<Vec<Cell>>,
    ) -> Self {
        Self {
            path: path.into(),
            format,
            sheet_name: None,
            headers,
            rows,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> TableFormat {
        self.format
    }

    /// 첫 번째 워크시트 이름 (스프레드시트인 경우)
    pub fn sheet_name(&self) -> Option<&str> {
        self.sheet_name.as_deref()
    }

    pub fn headers(&self) -> &[Cell] {
        &self.headers
    }

    /// 헤더를 제외한 데이터 행
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// 행별 심볼. 첫 번째 셀이 비어 있는 행은 `None`.
    pub fn row_symbols(&self) -> Vec<Option<Symbol>> {
        self.rows
            .iter()
            .map(|row| {
                row.first()
                    .filter(|cell| !cell.is_empty())
                    .and_then(|cell| Symbol::parse(&cell.to_string()).ok())
            })
            .collect()
    }

    /// 처리할 심볼 목록 (행 순서 유지)
    pub fn symbols(&self) -> Vec<Symbol> {
        self.row_symbols().into_iter().flatten().collect()
    }
}

fn read_spreadsheet(path: &Path) -> Result<(Option<String>, Vec<Vec<Cell>>)> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_name = workbook.sheet_names().first().cloned();

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DataError::Workbook(format!("워크시트 없음: {}", path.display())))??;

    // calamine 범위는 첫 번째 비어있지 않은 셀부터 시작하므로 앞쪽 빈 컬럼을 복원
    let leading_columns = range.start().map(|(_, col)| col as usize).unwrap_or(0);
    debug!(sheet = ?sheet_name, leading_columns, "워크시트 읽기");

    let grid = range
        .rows()
        .map(|row| {
            std::iter::repeat(Cell::Empty)
                .take(leading_columns)
                .chain(row.iter().map(cell_from_data))
                .collect()
        })
        .collect();

    Ok((sheet_name, grid))
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Bool(*b),
        other => Cell::Text(other.to_string()),
    }
}

fn read_csv(path: &Path) -> Result<Vec<Vec<Cell>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record?;
        grid.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok(grid)
}
