//! 수집 통계 구조체.

use screener_core::{ColorBucket, ExtractedField, Record};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 버킷별 종목 수
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCounts {
    pub dark_green: usize,
    pub light_green: usize,
    pub yellow: usize,
    pub brown: usize,
    pub red: usize,
}

impl BucketCounts {
    fn add(&mut self, bucket: ColorBucket) {
        let slot = match bucket {
            ColorBucket::DarkGreen => &mut self.dark_green,
            ColorBucket::LightGreen => &mut self.light_green,
            ColorBucket::Yellow => &mut self.yellow,
            ColorBucket::Brown => &mut self.brown,
            ColorBucket::Red => &mut self.red,
        };
        *slot += 1;
    }
}

/// 수집 작업 통계
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionStats {
    /// 처리한 심볼 수
    pub total: usize,
    /// 7개 값이 모두 채워진 심볼 수
    pub complete: usize,
    /// 일부 값만 채워진 심볼 수
    pub partial: usize,
    /// 페이지 수집 실패 수
    pub fetch_failed: usize,
    /// 중앙값 P/E 수집 실패 수
    pub chart_failed: usize,
    /// 할인/프리미엄이 계산된 심볼 수
    pub signals: usize,
    /// 버킷별 분포
    pub buckets: BucketCounts,
    /// 소요 시간
    #[serde(skip)]
    pub elapsed: Duration,
}

impl CollectionStats {
    /// 새 통계 객체 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 처리된 레코드 하나 반영
    pub fn record(&mut self, record: &Record, page_fetched: bool) {
        self.total += 1;

        if record.is_complete() {
            self.complete += 1;
        } else {
            self.partial += 1;
        }
        if !page_fetched {
            self.fetch_failed += 1;
        }
        if matches!(record.median_pe(), ExtractedField::ExtractionError(_)) {
            self.chart_failed += 1;
        }
        if let Some(bucket) = record.bucket() {
            self.signals += 1;
            self.buckets.add(bucket);
        }
    }

    /// 완전 수집률 계산 (%)
    pub fn complete_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.complete as f64 / self.total as f64) * 100.0
        }
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self, operation: &str) {
        tracing::info!(
            operation = operation,
            total = self.total,
            complete = self.complete,
            partial = self.partial,
            fetch_failed = self.fetch_failed,
            chart_failed = self.chart_failed,
            signals = self.signals,
            dark_green = self.buckets.dark_green,
            light_green = self.buckets.light_green,
            yellow = self.buckets.yellow,
            brown = self.buckets.brown,
            red = self.buckets.red,
            complete_rate = format!("{:.1}%", self.complete_rate()),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "수집 완료"
        );
    }
}
