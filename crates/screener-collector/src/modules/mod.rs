//! 수집 작업 모듈.

pub mod probe;
pub mod valuation_sync;

pub use probe::{probe_symbol, ProbeReport};
pub use valuation_sync::{collect_records, process_symbol, sync_workbook, ProcessedSymbol};
