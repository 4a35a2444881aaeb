//! 결과 워크북 쓰기.
//!
//! 원본 컬럼 뒤에 출력 컬럼 7개를 붙여 씁니다. 같은 이름의 헤더가 이미 있으면
//! 새 컬럼을 추가하지 않고 그 컬럼을 덮어쓰므로, 결과 파일을 다시 처리해도 컬럼이 늘지 않습니다.

use rust_xlsxwriter::{Color, Format, FormatPattern, Workbook};
use screener_core::{Record, DISCOUNT_PREMIUM_COLUMN, OUTPUT_HEADERS};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::{Cell, InputTable, TableFormat};
use crate::error::{DataError, Result};

/// 출력 셀 (색상 버킷 포함).
#[derive(Debug, Clone, PartialEq)]
struct OutputCell {
    value: Cell,
    fill: Option<u32>,
}

impl From<Cell> for OutputCell {
    fn from(value: Cell) -> Self {
        Self { value, fill: None }
    }
}

/// 결과 워크북 작성기.
#[derive(Debug, Default)]
pub struct ReportWriter;

impl ReportWriter {
    /// 입력 경로에 대응하는 출력 경로.
    ///
    /// `.xlsx`와 `.csv`는 같은 파일을 덮어쓰고, 그 외 스프레드시트 형식은
    /// 확장자를 `.xlsx`로 바꾼 경로에 씁니다.
    pub fn output_path(input: &Path) -> PathBuf {
        let extension = input
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("xlsx") | Some("csv") => input.to_path_buf(),
            _ => input.with_extension("xlsx"),
        }
    }

    /// 테이블과 레코드를 파일로 씁니다.
    ///
    /// 레코드는 심볼이 있는 행과 같은 순서, 같은 개수여야 합니다.
    pub fn write(&self, path: impl AsRef<Path>, table: &InputTable, records: &[Record]) -> Result<()> {
        let path = path.as_ref();
        let grid = layout(table, records)?;

        match TableFormat::from_path(path)? {
            TableFormat::Spreadsheet => write_spreadsheet(path, table.sheet_name(), &grid)?,
            TableFormat::Csv => write_csv(path, &grid)?,
        }

        info!(
            path = %path.display(),
            rows = grid.len().saturating_sub(1),
            records = records.len(),
            "결과 저장 완료"
        );
        Ok(())
    }
}

/// 헤더 행을 포함한 출력 그리드 구성
fn layout(table: &InputTable, records: &[Record]) -> Result<Vec<Vec<OutputCell>>> {
    let row_symbols = table.row_symbols();
    let symbol_rows = row_symbols.iter().filter(|s| s.is_some()).count();
    if symbol_rows != records.len() {
        return Err(DataError::Workbook(format!(
            "레코드 수 불일치: 심볼 {}개, 레코드 {}개",
            symbol_rows,
            records.len()
        )));
    }

    // 출력 헤더별 컬럼 위치 (기존 헤더가 있으면 재사용)
    let mut headers: Vec<Cell> = table.headers().to_vec();
    let mut columns = [0usize; OUTPUT_HEADERS.len()];
    for (slot, name) in columns.iter_mut().zip(OUTPUT_HEADERS) {
        let existing = headers
            .iter()
            .position(|h| matches!(h, Cell::Text(t) if t.trim() == name));
        *slot = match existing {
            Some(index) => {
                debug!(header = name, column = index, "기존 컬럼 덮어쓰기");
                index
            }
            None => {
                headers.push(Cell::Text(name.to_string()));
                headers.len() - 1
            }
        };
    }

    let width = table
        .rows()
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(headers.len()))
        .max()
        .unwrap_or(0);

    let mut grid = Vec::with_capacity(table.rows().len() + 1);
    grid.push(pad(headers.into_iter().map(OutputCell::from).collect(), width));

    let mut records = records.iter();
    for (row, symbol) in table.rows().iter().zip(&row_symbols) {
        let mut cells = pad(row.iter().cloned().map(OutputCell::from).collect(), width);

        match symbol {
            Some(symbol) => {
                let record = records
                    .next()
                    .ok_or_else(|| DataError::Workbook("레코드 부족".into()))?;
                if record.symbol() != symbol {
                    return Err(DataError::Workbook(format!(
                        "행 순서 불일치: 행 {}, 레코드 {}",
                        symbol,
                        record.symbol()
                    )));
                }

                for (index, (column, value)) in columns.iter().zip(record.cells()).enumerate() {
                    let fill = if index == DISCOUNT_PREMIUM_COLUMN {
                        record.bucket().map(|b| b.hex())
                    } else {
                        None
                    };
                    cells[*column] = OutputCell {
                        value: Cell::Text(value),
                        fill,
                    };
                }
            }
            None => {
                for column in columns {
                    cells[column] = OutputCell::from(Cell::Empty);
                }
            }
        }

        grid.push(cells);
    }

    Ok(grid)
}

fn pad(mut cells: Vec<OutputCell>, width: usize) -> Vec<OutputCell> {
    cells.resize(width, OutputCell::from(Cell::Empty));
    cells
}

fn write_spreadsheet(path: &Path, sheet_name: Option<&str>, grid: &[Vec<OutputCell>]) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    if let Some(name) = sheet_name {
        worksheet.set_name(name)?;
    }

    for (row_index, row) in grid.iter().enumerate() {
        let row_num = u32::try_from(row_index)
            .map_err(|_| DataError::Workbook(format!("행 범위 초과: {}", row_index)))?;

        for (col_index, cell) in row.iter().enumerate() {
            let col_num = u16::try_from(col_index)
                .map_err(|_| DataError::Workbook(format!("컬럼 범위 초과: {}", col_index)))?;

            match (&cell.value, cell.fill) {
                (Cell::Text(text), Some(hex)) => {
                    let format = Format::new()
                        .set_pattern(FormatPattern::Solid)
                        .set_background_color(Color::RGB(hex));
                    worksheet.write_string_with_format(row_num, col_num, text, &format)?;
                }
                (Cell::Text(text), None) => {
                    worksheet.write_string(row_num, col_num, text)?;
                }
                (Cell::Number(n), _) => {
                    worksheet.write_number(row_num, col_num, *n)?;
                }
                (Cell::Bool(b), _) => {
                    worksheet.write_boolean(row_num, col_num, *b)?;
                }
                (Cell::Empty, _) => {}
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

fn write_csv(path: &Path, grid: &[Vec<OutputCell>]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_path(path)?;
    for row in grid {
        writer.write_record(row.iter().map(|cell| cell.value.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}
