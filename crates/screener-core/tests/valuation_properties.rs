//! 할인/프리미엄 계산 및 버킷 분류 속성 테스트

use proptest::prelude::*;
use rust_decimal::Decimal;
use screener_core::{ColorBucket, DiscountPremium, ExtractedField};

fn found(v: String) -> ExtractedField {
    ExtractedField::Found(v)
}

proptest! {
    /// 같은 입력은 항상 같은 문자열을 만든다.
    #[test]
    fn compute_is_deterministic(stock in 0.01f64..500.0, median in 0.01f64..500.0) {
        let stock = format!("{:.2}", stock);
        let median = format!("{:.2}", median);

        let a = DiscountPremium::compute(&found(stock.clone()), &found(median.clone()));
        let b = DiscountPremium::compute(&found(stock), &found(median));

        prop_assert!(a.is_some());
        prop_assert_eq!(a.map(|d| d.to_string()), b.map(|d| d.to_string()));
    }

    /// 표시 문자열은 항상 소수점 둘째 자리 + "%" 형식이다.
    #[test]
    fn display_has_two_decimals(stock in 0.01f64..500.0, median in 0.01f64..500.0) {
        let signal = DiscountPremium::compute(
            &found(format!("{:.3}", stock)),
            &found(format!("{:.3}", median)),
        ).unwrap();

        let text = signal.to_string();
        prop_assert!(text.ends_with('%'));
        let number = text.trim_end_matches('%');
        let decimals = number.split('.').nth(1).unwrap_or("");
        prop_assert_eq!(decimals.len(), 2);
    }

    /// 버킷은 값에 대해 단조적이다 (값이 커지면 분류 순서가 뒤로 간다).
    #[test]
    fn classification_is_monotonic(a in -10_000i64..10_000, b in -10_000i64..10_000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let lo = Decimal::new(lo, 2);
        let hi = Decimal::new(hi, 2);

        let order = |bucket: ColorBucket| {
            ColorBucket::all().iter().position(|b| *b == bucket).unwrap()
        };

        prop_assert!(order(ColorBucket::classify(lo)) <= order(ColorBucket::classify(hi)));
    }
}

#[test]
fn test_bucket_colors_are_distinct() {
    let mut colors: Vec<u32> = ColorBucket::all().iter().map(|b| b.hex()).collect();
    colors.sort_unstable();
    colors.dedup();
    assert_eq!(colors.len(), 5);
}
