//! 종목별 결과 레코드.
//!
//! 한 심볼의 모든 추출이 끝난 뒤 한 번에 생성되며 이후 변경되지 않습니다.

use serde::Serialize;

use super::field::{ExtractedField, Sentinel, NOT_APPLICABLE};
use super::valuation::{ColorBucket, DiscountPremium};
use crate::types::Symbol;

/// 출력 테이블에 추가되는 7개 컬럼 (순서 고정).
pub const OUTPUT_HEADERS: [&str; 7] = [
    "Stock Current P/E",
    "Median P/E",
    "Current Quarter Promoter Holding",
    "4-Quarter-Before Promoter Holding",
    "EPS",
    "Sector",
    "Stock Discount/Premium",
];

/// 할인/프리미엄 컬럼의 위치 (`OUTPUT_HEADERS` 기준)
pub const DISCOUNT_PREMIUM_COLUMN: usize = 6;

/// 프로모터 지분 (최신 분기, 4분기 전).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromoterHolding {
    /// 최신 분기
    pub latest: ExtractedField,
    /// 최신 분기보다 4분기 앞선 값
    pub four_quarters_ago: ExtractedField,
}

impl PromoterHolding {
    /// 두 값 모두 `N/A`
    pub fn not_found() -> Self {
        Self {
            latest: ExtractedField::not_applicable(),
            four_quarters_ago: ExtractedField::not_applicable(),
        }
    }
}

/// 정적 페이지에서 추출한 필드 묶음.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageFields {
    /// 현재 P/E
    pub stock_pe: ExtractedField,
    /// 프로모터 지분
    pub promoter: PromoterHolding,
    /// EPS (최근 기간)
    pub eps: ExtractedField,
    /// 섹터
    pub sector: ExtractedField,
}

impl PageFields {
    /// 문서가 없을 때의 결과: 모든 필드가 각자의 "찾을 수 없음" 센티널.
    pub fn missing() -> Self {
        Self {
            stock_pe: ExtractedField::NotFound(Sentinel::PeNotFound),
            promoter: PromoterHolding::not_found(),
            eps: ExtractedField::not_applicable(),
            sector: ExtractedField::NotFound(Sentinel::SectorNotFound),
        }
    }
}

/// 출력 테이블의 한 행.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    symbol: Symbol,
    stock_pe: ExtractedField,
    median_pe: ExtractedField,
    promoter_holding_latest: ExtractedField,
    promoter_holding_4q_ago: ExtractedField,
    eps: ExtractedField,
    sector: ExtractedField,
    discount_premium: Option<DiscountPremium>,
}

impl Record {
    /// 추출 결과로부터 레코드를 조립합니다. 할인/프리미엄은 여기서 계산됩니다.
    pub fn new(symbol: Symbol, page: PageFields, median_pe: ExtractedField) -> Self {
        let discount_premium = DiscountPremium::compute(&page.stock_pe, &median_pe);

        Self {
            symbol,
            stock_pe: page.stock_pe,
            median_pe,
            promoter_holding_latest: page.promoter.latest,
            promoter_holding_4q_ago: page.promoter.four_quarters_ago,
            eps: page.eps,
            sector: page.sector,
            discount_premium,
        }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn stock_pe(&self) -> &ExtractedField {
        &self.stock_pe
    }

    pub fn median_pe(&self) -> &ExtractedField {
        &self.median_pe
    }

    pub fn promoter_holding_latest(&self) -> &ExtractedField {
        &self.promoter_holding_latest
    }

    pub fn promoter_holding_4q_ago(&self) -> &ExtractedField {
        &self.promoter_holding_4q_ago
    }

    pub fn eps(&self) -> &ExtractedField {
        &self.eps
    }

    pub fn sector(&self) -> &ExtractedField {
        &self.sector
    }

    pub fn discount_premium(&self) -> Option<DiscountPremium> {
        self.discount_premium
    }

    /// 할인/프리미엄 셀의 색상 버킷. 값이 없으면 `None` (강조 없음).
    pub fn bucket(&self) -> Option<ColorBucket> {
        self.discount_premium.map(|d| d.bucket())
    }

    /// 추출 필드 7개가 모두 값을 가지는지 여부
    pub fn is_complete(&self) -> bool {
        self.fields().iter().all(|f| f.is_found()) && self.discount_premium.is_some()
    }

    fn fields(&self) -> [&ExtractedField; 6] {
        [
            &self.stock_pe,
            &self.median_pe,
            &self.promoter_holding_latest,
            &self.promoter_holding_4q_ago,
            &self.eps,
            &self.sector,
        ]
    }

    /// `OUTPUT_HEADERS` 순서의 출력 셀 문자열.
    pub fn cells(&self) -> [String; 7] {
        let [pe, median, latest, before, eps, sector] = self.fields();
        [
            pe.render().to_string(),
            median.render().to_string(),
            latest.render().to_string(),
            before.render().to_string(),
            eps.render().to_string(),
            sector.render().to_string(),
            self.discount_premium
                .map(|d| d.to_string())
                .unwrap_or_else(|| NOT_APPLICABLE.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(v: &str) -> ExtractedField {
        ExtractedField::Found(v.to_string())
    }

    fn page(pe: ExtractedField) -> PageFields {
        PageFields {
            stock_pe: pe,
            promoter: PromoterHolding {
                latest: found("72.30"),
                four_quarters_ago: found("72.19"),
            },
            eps: found("125.88"),
            sector: found("IT - Software"),
        }
    }

    #[test]
    fn test_record_cells_order() {
        let record = Record::new(Symbol::parse("TCS").unwrap(), page(found("25")), found("20"));

        assert_eq!(
            record.cells(),
            [
                "25".to_string(),
                "20".to_string(),
                "72.30".to_string(),
                "72.19".to_string(),
                "125.88".to_string(),
                "IT - Software".to_string(),
                "25.00%".to_string(),
            ]
        );
        assert_eq!(record.bucket(), Some(ColorBucket::Brown));
        assert!(record.is_complete());
    }

    #[test]
    fn test_missing_document_sentinels() {
        let record = Record::new(
            Symbol::parse("XYZ").unwrap(),
            PageFields::missing(),
            ExtractedField::error("browser failed"),
        );

        assert_eq!(
            record.cells(),
            [
                "P/E Not Found".to_string(),
                "Error".to_string(),
                "N/A".to_string(),
                "N/A".to_string(),
                "N/A".to_string(),
                "Sector Not Found".to_string(),
                "N/A".to_string(),
            ]
        );
        assert_eq!(record.bucket(), None);
        assert!(!record.is_complete());
    }

    #[test]
    fn test_discount_present_iff_both_parse() {
        let record = Record::new(Symbol::parse("A").unwrap(), page(found("abc")), found("20"));
        assert!(record.discount_premium().is_none());

        let record = Record::new(Symbol::parse("A").unwrap(), page(found("18")), found("20"));
        assert!(record.discount_premium().is_some());
        assert_eq!(record.bucket(), Some(ColorBucket::Yellow));
    }
}
